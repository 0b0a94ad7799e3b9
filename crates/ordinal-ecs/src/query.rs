use std::ops::ControlFlow;

use ordinal_core::EntityId;

use crate::entity::EntityRef;
use crate::system::SystemRef;

/// The view of a world handed to each running system.
///
/// Component masks use "has any" matching: a mask of `A | B` selects
/// entities carrying `A`, `B`, or both.
///
/// Entity handles are locked while matching, so a system must not hold a
/// write guard on an entity across calls into the query.
///
/// Matching looks at the components an entity carries right now. An entity
/// destroyed with [`Entity::destroy`](crate::Entity::destroy) but not removed
/// has no components left and is only reachable by id.
pub trait Query {
    /// All registered entities carrying any of `component_types`, in
    /// registration order.
    fn entities(&self, component_types: u32) -> Vec<EntityRef>;

    /// Visit matching entities in registration order until the visitor
    /// returns [`ControlFlow::Break`].
    fn for_all_entities(
        &self,
        component_types: u32,
        visitor: &mut dyn FnMut(&EntityRef) -> ControlFlow<()>,
    );

    /// Register an entity. `false` if one with the same id is already registered.
    fn add_entity(&mut self, entity: EntityRef) -> bool;

    /// Unregister `entity` (matched by handle identity) and hand it back.
    fn remove_entity(&mut self, entity: &EntityRef) -> Option<EntityRef>;

    /// Unregister the entity with `id` and hand it back.
    fn remove_entity_by_id(&mut self, id: EntityId) -> Option<EntityRef>;

    fn entity_by_id(&self, id: EntityId) -> Option<EntityRef>;

    /// The registered entities among `ids`, in the order given. Unknown ids are skipped.
    fn entities_by_ids(&self, ids: &[EntityId]) -> Vec<EntityRef>;

    /// The registered system with `system_type`.
    ///
    /// The running system is locked for its whole update; use
    /// [`with_system`](crate::with_system) rather than locking the handle directly.
    fn system(&self, system_type: u32) -> Option<SystemRef>;
}
