//! Particle demo
//!
//! Particles carry a position, a velocity and a lifetime. Movement runs in
//! stage 0, expiry recycles dead particles in stage 1, and a report system
//! logs progress in stage 2.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ordinal_ecs::{
    with_system, Component, Destructible, EcsError, Entity, EntityRef, Query, System,
};
use tracing::{debug, error, info};

pub const POSITION: u32 = 0b001;
pub const VELOCITY: u32 = 0b010;
pub const LIFETIME: u32 = 0b100;

pub const MOVEMENT: u32 = 0b001;
pub const EXPIRY: u32 = 0b010;
pub const REPORT: u32 = 0b100;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Component for Position {
    fn component_type(&self) -> u32 {
        POSITION
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Component for Velocity {
    fn component_type(&self) -> u32 {
        VELOCITY
    }
}

/// Remaining time to live. Counts itself into `expired` when destroyed.
#[derive(Debug)]
pub struct Lifetime {
    pub remaining: f32,
    expired: Arc<AtomicU64>,
}

impl Component for Lifetime {
    fn component_type(&self) -> u32 {
        LIFETIME
    }

    fn as_destructible(&mut self) -> Option<&mut dyn Destructible> {
        Some(self)
    }
}

impl Destructible for Lifetime {
    fn destroy(&mut self) {
        self.expired.fetch_add(1, Ordering::Relaxed);
    }
}

/// Spawns particles fanned out around the origin.
#[derive(Debug, Clone)]
pub struct Emitter {
    lifetime: f32,
    spawned: u64,
    expired: Arc<AtomicU64>,
}

impl Emitter {
    pub fn new(lifetime: f32) -> Self {
        Self {
            lifetime,
            spawned: 0,
            expired: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn spawn(&mut self) -> Result<EntityRef, EcsError> {
        let seq = self.spawned;
        self.spawned += 1;

        // Golden-angle fan so neighbours do not overlap.
        let angle = seq as f32 * 2.399_963;
        // Stagger lifetimes so particles do not all expire on the same frame.
        let stagger = 1.0 + (seq % 8) as f32 / 8.0;

        let mut entity = Entity::new()?;
        entity.add_component(Position::default());
        entity.add_component(Velocity {
            x: angle.cos(),
            y: angle.sin(),
        });
        entity.add_component(Lifetime {
            remaining: self.lifetime * stagger,
            expired: self.expired.clone(),
        });
        Ok(entity.into_ref())
    }
}

/// Integrates velocity into position.
#[derive(Debug, Default)]
pub struct Movement {
    pub moved: u64,
}

impl System for Movement {
    fn system_type(&self) -> u32 {
        MOVEMENT
    }

    fn active(&self, stage: i32) -> bool {
        stage == 0
    }

    fn update(&mut self, delta: Duration, query: &mut dyn Query) {
        let dt = delta.as_secs_f32();
        for entity in query.entities(VELOCITY) {
            let mut entity = entity.write();
            let Some(velocity) = entity.get::<Velocity>(VELOCITY).copied() else {
                continue;
            };
            if let Some(position) = entity.get_mut::<Position>(POSITION) {
                position.x += velocity.x * dt;
                position.y += velocity.y * dt;
                self.moved += 1;
            }
        }
    }
}

/// Ages particles, destroys the expired ones and emits replacements.
pub struct Expiry {
    pub emitter: Emitter,
}

impl System for Expiry {
    fn system_type(&self) -> u32 {
        EXPIRY
    }

    fn active(&self, stage: i32) -> bool {
        stage == 1
    }

    fn update(&mut self, delta: Duration, query: &mut dyn Query) {
        let dt = delta.as_secs_f32();
        let mut dead = Vec::new();
        for entity in query.entities(LIFETIME) {
            let mut guard = entity.write();
            let id = guard.id();
            if let Some(lifetime) = guard.get_mut::<Lifetime>(LIFETIME) {
                lifetime.remaining -= dt;
                if lifetime.remaining <= 0.0 {
                    dead.push(id);
                }
            }
        }

        for id in dead {
            if let Some(entity) = query.remove_entity_by_id(id) {
                entity.write().destroy();
                debug!("Particle {} expired", id);
            }
            match self.emitter.spawn() {
                Ok(entity) => {
                    query.add_entity(entity);
                }
                Err(e) => error!("Failed to emit particle: {}", e),
            }
        }
    }
}

/// Logs a summary every `interval` frames.
pub struct Report {
    interval: u32,
    frames: u64,
    expired: Arc<AtomicU64>,
}

impl Report {
    pub fn new(interval: u32, emitter: &Emitter) -> Self {
        Self {
            interval: interval.max(1),
            frames: 0,
            expired: emitter.expired.clone(),
        }
    }
}

impl System for Report {
    fn system_type(&self) -> u32 {
        REPORT
    }

    fn active(&self, stage: i32) -> bool {
        stage == 2
    }

    fn update(&mut self, _delta: Duration, query: &mut dyn Query) {
        self.frames += 1;
        if self.frames % u64::from(self.interval) != 0 {
            return;
        }

        let particles = query.entities(POSITION).len();
        let moved = query
            .system(MOVEMENT)
            .and_then(|movement| with_system(&movement, |m: &mut Movement| m.moved))
            .unwrap_or(0);
        info!(
            "Frame {}: {} particles, {} moves, {} expired",
            self.frames,
            particles,
            moved,
            self.expired.load(Ordering::Relaxed)
        );
    }
}
