use std::any::Any;

/// Upcast to `Any` for typed access to boxed components and systems.
///
/// Implemented for every `'static` type; never implement it by hand.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A typed data block attached to an entity.
///
/// Every component kind is identified by a type tag: a `u32` with exactly
/// one bit set. Tags must be disjoint across the kinds used together, which
/// caps an entity at 32 component kinds.
pub trait Component: AsAny + Send + Sync {
    /// The single-bit tag of this component kind.
    fn component_type(&self) -> u32;

    /// Cleanup capability. Override to return `Some(self)` for components
    /// that implement [`Destructible`].
    fn as_destructible(&mut self) -> Option<&mut dyn Destructible> {
        None
    }
}

/// Something that needs cleanup when its owner is destroyed.
pub trait Destructible {
    fn destroy(&mut self);
}

/// Run the cleanup hook of `component`, if it has one.
pub fn destroy_component(component: &mut dyn Component) {
    if let Some(target) = component.as_destructible() {
        target.destroy();
    }
}
