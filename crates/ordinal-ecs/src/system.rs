use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::component::AsAny;
use crate::query::Query;

/// Shared handle to a registered system.
pub type SystemRef = Arc<RwLock<dyn System>>;

/// Update logic run by the world once per frame stage.
///
/// Like components, every system kind carries a single-bit type tag. A world
/// runs its systems in ascending tag order, one after another.
pub trait System: AsAny + Send + Sync {
    /// The single-bit tag of this system kind.
    fn system_type(&self) -> u32;

    /// Whether the system runs during `stage`.
    fn active(&self, stage: i32) -> bool;

    /// Run one step with the elapsed time and a view of the world.
    fn update(&mut self, delta: Duration, query: &mut dyn Query);
}

/// Wrap a system in a shared handle.
pub fn system_ref<S: System>(system: S) -> SystemRef {
    Arc::new(RwLock::new(system))
}

/// Typed access to a system fetched through a [`SystemRef`].
///
/// Returns `None` if the system is not an `S`, or if it is already locked.
/// A running system is locked by the world for the whole of its update, so
/// a system reaching its own handle through the query gets `None`.
pub fn with_system<S: System, R>(system: &SystemRef, f: impl FnOnce(&mut S) -> R) -> Option<R> {
    let mut guard = system.try_write()?;
    let system: &mut dyn System = &mut *guard;
    system.as_any_mut().downcast_mut::<S>().map(f)
}

/// Stages a [`FnSystem`] is active in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Stages {
    #[default]
    All,
    Only(Vec<i32>),
}

impl Stages {
    pub fn contains(&self, stage: i32) -> bool {
        match self {
            Stages::All => true,
            Stages::Only(stages) => stages.contains(&stage),
        }
    }
}

/// A system backed by a closure.
///
/// ```ignore
/// let gravity = FnSystem::new(GRAVITY, |delta, query| {
///     for entity in query.entities(VELOCITY) {
///         // ...
///     }
/// })
/// .in_stages([0]);
/// ```
pub struct FnSystem<F> {
    tag: u32,
    stages: Stages,
    run: F,
}

impl<F> FnSystem<F>
where
    F: FnMut(Duration, &mut dyn Query) + Send + Sync + 'static,
{
    /// A closure system with `tag`, active in every stage.
    pub fn new(tag: u32, run: F) -> Self {
        Self {
            tag,
            stages: Stages::All,
            run,
        }
    }

    /// Restrict the system to the given stages.
    pub fn in_stages(mut self, stages: impl IntoIterator<Item = i32>) -> Self {
        self.stages = Stages::Only(stages.into_iter().collect());
        self
    }
}

impl<F> System for FnSystem<F>
where
    F: FnMut(Duration, &mut dyn Query) + Send + Sync + 'static,
{
    fn system_type(&self) -> u32 {
        self.tag
    }

    fn active(&self, stage: i32) -> bool {
        self.stages.contains(stage)
    }

    fn update(&mut self, delta: Duration, query: &mut dyn Query) {
        (self.run)(delta, query);
    }
}
