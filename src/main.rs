//! Ordinal - demo frame loop
//!
//! Runs a small particle simulation on the ordinal ECS for a fixed number of
//! frames. Pass a settings file path as the first argument to override
//! `~/.config/ordinal/settings.toml`.

mod demo;
mod settings;

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use ordinal_ecs::{Schedule, World};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::demo::{Emitter, Expiry, Movement, Report};
use crate::settings::Settings;

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting ordinal demo...");

    let settings = match std::env::args_os().nth(1) {
        Some(path) => Settings::load_from(Path::new(&path)),
        None => Settings::load(),
    };
    let demo = &settings.demo;

    let frame_time = Duration::try_from_secs_f32(demo.frame_time)
        .with_context(|| format!("Invalid frame time {}", demo.frame_time))?;

    let mut world = World::with_capacity(demo.particles as usize);
    let mut emitter = Emitter::new(demo.lifetime);
    for _ in 0..demo.particles {
        let particle = emitter.spawn().context("Failed to spawn particle")?;
        world.add_entity(particle);
    }

    world.add_system(Movement::default());
    world.add_system(Report::new(demo.report_interval, &emitter));
    world.add_system(Expiry { emitter });

    info!(
        "World ready: {} particles, systems {:#b}, stages {:?}",
        world.entity_count(),
        world.system_types(),
        settings.schedule.stages
    );

    let mut schedule = Schedule::new(settings.schedule.clone());
    let started = Instant::now();
    for _ in 0..demo.frames {
        schedule.run_frame(&mut world, frame_time);
    }

    info!(
        "Simulated {} frames ({:.2?} simulated) in {:.2?}",
        schedule.clock().frame_count(),
        schedule.clock().total(),
        started.elapsed()
    );
    Ok(())
}
