//! Entity identity and its allocator

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Unique identifier for entities in the ECS
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Wrap a raw id. Ids handed out by an [`IdAllocator`] start at 1.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw counter value
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors raised while allocating identities
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("entity id space exhausted")]
    Exhausted,
}

/// Monotonic entity id counter.
///
/// Ids are never reused and never wrap: once `u64::MAX` has been handed out
/// every further call fails with [`IdError::Exhausted`].
#[derive(Debug)]
pub struct IdAllocator {
    last: AtomicU64,
}

static GLOBAL_IDS: IdAllocator = IdAllocator::new();

impl IdAllocator {
    pub const fn new() -> Self {
        Self::starting_after(0)
    }

    /// An allocator whose first id is `last + 1`.
    pub const fn starting_after(last: u64) -> Self {
        Self {
            last: AtomicU64::new(last),
        }
    }

    /// The process-wide allocator.
    pub fn global() -> &'static IdAllocator {
        &GLOBAL_IDS
    }

    /// Hand out the next id.
    pub fn allocate(&self) -> Result<EntityId, IdError> {
        self.last
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| last.checked_add(1))
            .map(|previous| EntityId(previous + 1))
            .map_err(|_| IdError::Exhausted)
    }

    /// The most recently issued id, if any.
    pub fn last_issued(&self) -> Option<EntityId> {
        match self.last.load(Ordering::Relaxed) {
            0 => None,
            raw => Some(EntityId(raw)),
        }
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
