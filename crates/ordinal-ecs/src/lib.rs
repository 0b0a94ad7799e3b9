//! Ordinal ECS - Entity Component System
//!
//! Components and systems are identified by single-bit type tags and kept in
//! `TaggedVec`s, so an entity's components and a world's systems are always
//! ordered by tag. Queries select entities carrying any of a mask's tags.

mod component;
mod config;
mod entity;
mod error;
mod query;
mod schedule;
mod system;
mod world;

pub use component::{destroy_component, AsAny, Component, Destructible};
pub use config::ScheduleConfig;
pub use entity::{Entity, EntityRef};
pub use error::EcsError;
pub use ordinal_core::{EntityId, IdAllocator};
pub use query::Query;
pub use schedule::Schedule;
pub use system::{system_ref, with_system, FnSystem, Stages, System, SystemRef};
pub use world::World;
