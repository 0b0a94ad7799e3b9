//! Ordinal Core - Core data structures for the ordinal ECS
//!
//! This crate provides the building blocks the ECS is assembled from:
//! - Bit-index arithmetic over 32-bit type masks
//! - `TaggedVec`, a dense container ordered by its membership mask
//! - Entity identity allocation
//! - Frame timing for the update loop

pub mod bits;
pub mod tagged;
pub mod time;
pub mod types;

pub use bits::{bit_index, is_type_tag, tags, Tags, MAX_TAGS};
pub use tagged::TaggedVec;
pub use time::{FrameClock, TimeConfig};
pub use types::{EntityId, IdAllocator, IdError};
