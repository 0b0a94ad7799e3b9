use std::fmt;
use std::sync::Arc;

use ordinal_core::{EntityId, IdAllocator, TaggedVec};
use parking_lot::RwLock;
use tracing::{debug, error};

use crate::component::{destroy_component, Component, Destructible};
use crate::error::EcsError;

/// Shared handle to an entity. A world holds entities through these and
/// never owns their lifecycle.
pub type EntityRef = Arc<RwLock<Entity>>;

type DestroyHook = Box<dyn FnOnce(EntityId) + Send + Sync>;

/// An identity plus up to 32 components, one per component tag.
///
/// Components are kept in ascending tag order. An entity exclusively owns
/// its components; nothing is cleaned up on drop, only through [`Entity::destroy`].
pub struct Entity {
    id: EntityId,
    components: TaggedVec<Box<dyn Component>>,
    on_destroy: Option<DestroyHook>,
}

impl Entity {
    /// Create an entity with a fresh id from the process-wide allocator.
    pub fn new() -> Result<Self, EcsError> {
        Self::allocate(IdAllocator::global())
    }

    /// Create an entity with a fresh id from `ids`.
    pub fn allocate(ids: &IdAllocator) -> Result<Self, EcsError> {
        let id = ids.allocate().inspect_err(|e| error!("cannot create entity: {e}"))?;
        Ok(Self::with_id(id))
    }

    /// Create an entity with a caller-chosen id.
    pub fn with_id(id: EntityId) -> Self {
        Self {
            id,
            components: TaggedVec::new(),
            on_destroy: None,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Wrap this entity in a shared handle.
    pub fn into_ref(self) -> EntityRef {
        Arc::new(RwLock::new(self))
    }

    // ---- Components ----

    /// Attach a component. Returns `false`, dropping `component` without
    /// cleanup, if a component with the same tag is already attached.
    pub fn add_component<C: Component>(&mut self, component: C) -> bool {
        self.add_boxed(Box::new(component))
    }

    /// Attach an already boxed component.
    pub fn add_boxed(&mut self, component: Box<dyn Component>) -> bool {
        let tag = component.component_type();
        self.components.insert(tag, component).is_none()
    }

    /// Detach the component with `component_type`, handing it back.
    pub fn remove_component(&mut self, component_type: u32) -> Option<Box<dyn Component>> {
        self.components.remove(component_type)
    }

    pub fn component(&self, component_type: u32) -> Option<&dyn Component> {
        self.components.get(component_type).map(|c| &**c)
    }

    pub fn component_mut(&mut self, component_type: u32) -> Option<&mut dyn Component> {
        self.components
            .get_mut(component_type)
            .map(|c| &mut **c as &mut dyn Component)
    }

    /// Typed access to the component with `component_type`.
    ///
    /// `None` if the tag is absent or the stored component is not a `C`.
    pub fn get<C: Component>(&self, component_type: u32) -> Option<&C> {
        self.component(component_type)?.as_any().downcast_ref::<C>()
    }

    /// Typed mutable access to the component with `component_type`.
    pub fn get_mut<C: Component>(&mut self, component_type: u32) -> Option<&mut C> {
        self.component_mut(component_type)?
            .as_any_mut()
            .downcast_mut::<C>()
    }

    /// Whether the entity carries at least one of the tags in `component_types`.
    ///
    /// `A | B` matches entities holding only `A`, only `B`, or both.
    pub fn has_component_types(&self, component_types: u32) -> bool {
        self.components.has_any(component_types)
    }

    /// Union of the tags of every attached component.
    pub fn component_types(&self) -> u32 {
        self.components.mask()
    }

    /// Attached components in ascending tag order.
    pub fn components(&self) -> impl Iterator<Item = &dyn Component> + '_ {
        self.components.iter().map(|c| &**c)
    }

    /// Number of attached components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    // ---- Cleanup ----

    /// Register the entity's own cleanup hook, run last by [`Entity::destroy`].
    pub fn set_destroy_hook<F>(&mut self, hook: F)
    where
        F: FnOnce(EntityId) + Send + Sync + 'static,
    {
        self.on_destroy = Some(Box::new(hook));
    }

    /// Cascading destroy: clean up every component in ascending tag order,
    /// then run the entity's own hook.
    ///
    /// Components are detached as they are cleaned up and the hook is
    /// consumed, so a second call does nothing. A destroyed entity that is
    /// still registered with a world stays registered but carries no
    /// components, so it no longer matches any component query.
    pub fn destroy(&mut self) {
        let count = self.components.len();
        for mut component in self.components.drain() {
            destroy_component(component.as_mut());
        }
        if let Some(hook) = self.on_destroy.take() {
            hook(self.id);
        }
        debug!("Destroyed entity {} ({} components)", self.id, count);
    }
}

impl Destructible for Entity {
    fn destroy(&mut self) {
        Entity::destroy(self);
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("component_types", &format_args!("{:#b}", self.components.mask()))
            .field("has_destroy_hook", &self.on_destroy.is_some())
            .finish()
    }
}
