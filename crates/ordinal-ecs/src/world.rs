use std::collections::HashMap;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use ordinal_core::{EntityId, TaggedVec};
use tracing::{debug, trace};

use crate::entity::EntityRef;
use crate::query::Query;
use crate::system::{system_ref, System, SystemRef};

/// The scheduler: systems ordered by tag plus a flat list of entities.
///
/// The world holds entities and systems through shared handles and never
/// destroys them; removal hands the handle back to the caller.
///
/// Single-threaded by contract. [`World::update`] runs every active system
/// to completion before returning, and must not be re-entered from a system.
pub struct World {
    systems: TaggedVec<SystemRef>,
    entities: Vec<(EntityId, EntityRef)>,
    lookup: HashMap<EntityId, EntityRef>,
}

impl World {
    pub fn new() -> Self {
        Self {
            systems: TaggedVec::new(),
            entities: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// Create a world with room for `entities` entities.
    pub fn with_capacity(entities: usize) -> Self {
        Self {
            systems: TaggedVec::new(),
            entities: Vec::with_capacity(entities),
            lookup: HashMap::with_capacity(entities),
        }
    }

    // ---- System management ----

    /// Register a system. Returns `false` if a system with the same tag is
    /// already registered; the new one is dropped.
    pub fn add_system<S: System>(&mut self, system: S) -> bool {
        self.add_system_ref(system_ref(system))
    }

    /// Register a system the caller keeps a handle to.
    pub fn add_system_ref(&mut self, system: SystemRef) -> bool {
        let tag = system.read().system_type();
        let added = self.systems.insert(tag, system).is_none();
        if added {
            debug!("Added system {:#b}", tag);
        } else {
            trace!("System {:#b} already registered, ignoring", tag);
        }
        added
    }

    /// Unregister the system with `system_type` and hand it back.
    pub fn remove_system(&mut self, system_type: u32) -> Option<SystemRef> {
        let removed = self.systems.remove(system_type)?;
        debug!("Removed system {:#b}", system_type);
        Some(removed)
    }

    pub fn system(&self, system_type: u32) -> Option<SystemRef> {
        self.systems.get(system_type).cloned()
    }

    /// Union of the tags of every registered system.
    pub fn system_types(&self) -> u32 {
        self.systems.mask()
    }

    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    // ---- Scheduling ----

    /// Run every system active in `stage`, in ascending tag order.
    ///
    /// The system list is fixed when the pass starts: systems added or
    /// removed by a running system take effect on the next call. Entity
    /// changes are visible to later systems in the same pass.
    pub fn update(&mut self, stage: i32, delta: Duration) {
        let systems: Vec<SystemRef> = self.systems.iter().cloned().collect();
        for system in systems {
            let mut system = system.write();
            if !system.active(stage) {
                continue;
            }
            trace!("Running system {:#b} in stage {}", system.system_type(), stage);
            system.update(delta, self);
        }
    }

    // ---- Entity management ----

    /// Register an entity. Returns `false` if one with the same id is
    /// already registered.
    pub fn add_entity(&mut self, entity: EntityRef) -> bool {
        let id = entity.read().id();
        if self.lookup.contains_key(&id) {
            return false;
        }
        self.lookup.insert(id, entity.clone());
        self.entities.push((id, entity));
        trace!("Added entity {}", id);
        true
    }

    /// Unregister `entity`, matched by handle identity, and hand it back.
    pub fn remove_entity(&mut self, entity: &EntityRef) -> Option<EntityRef> {
        let index = self
            .entities
            .iter()
            .position(|(_, e)| Arc::ptr_eq(e, entity))?;
        Some(self.unregister(index))
    }

    /// Unregister the entity with `id` and hand it back.
    pub fn remove_entity_by_id(&mut self, id: EntityId) -> Option<EntityRef> {
        if !self.lookup.contains_key(&id) {
            return None;
        }
        let index = self.entities.iter().position(|(e, _)| *e == id)?;
        Some(self.unregister(index))
    }

    fn unregister(&mut self, index: usize) -> EntityRef {
        let (id, entity) = self.entities.remove(index);
        self.lookup.remove(&id);
        trace!("Removed entity {}", id);
        entity
    }

    pub fn entity_by_id(&self, id: EntityId) -> Option<EntityRef> {
        self.lookup.get(&id).cloned()
    }

    /// The registered entities among `ids`, in the order given.
    pub fn entities_by_ids(&self, ids: &[EntityId]) -> Vec<EntityRef> {
        ids.iter().filter_map(|id| self.lookup.get(id).cloned()).collect()
    }

    /// Entities carrying any of `component_types`, in registration order.
    pub fn entities(&self, component_types: u32) -> Vec<EntityRef> {
        self.entities
            .iter()
            .filter(|(_, e)| e.read().has_component_types(component_types))
            .map(|(_, e)| e.clone())
            .collect()
    }

    /// Visit entities carrying any of `component_types` until the visitor breaks.
    pub fn for_all_entities(
        &self,
        component_types: u32,
        mut visitor: impl FnMut(&EntityRef) -> ControlFlow<()>,
    ) {
        for (_, entity) in &self.entities {
            let matches = entity.read().has_component_types(component_types);
            if matches && visitor(entity).is_break() {
                return;
            }
        }
    }

    /// Every registered entity in registration order.
    pub fn all_entities(&self) -> impl Iterator<Item = &EntityRef> + '_ {
        self.entities.iter().map(|(_, e)| e)
    }

    /// Number of registered entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl Query for World {
    fn entities(&self, component_types: u32) -> Vec<EntityRef> {
        World::entities(self, component_types)
    }

    fn for_all_entities(
        &self,
        component_types: u32,
        visitor: &mut dyn FnMut(&EntityRef) -> ControlFlow<()>,
    ) {
        World::for_all_entities(self, component_types, visitor);
    }

    fn add_entity(&mut self, entity: EntityRef) -> bool {
        World::add_entity(self, entity)
    }

    fn remove_entity(&mut self, entity: &EntityRef) -> Option<EntityRef> {
        World::remove_entity(self, entity)
    }

    fn remove_entity_by_id(&mut self, id: EntityId) -> Option<EntityRef> {
        World::remove_entity_by_id(self, id)
    }

    fn entity_by_id(&self, id: EntityId) -> Option<EntityRef> {
        World::entity_by_id(self, id)
    }

    fn entities_by_ids(&self, ids: &[EntityId]) -> Vec<EntityRef> {
        World::entities_by_ids(self, ids)
    }

    fn system(&self, system_type: u32) -> Option<SystemRef> {
        World::system(self, system_type)
    }
}
