//! The astrum dedicated server - coordinates player movement, spawn points
//! and gravity between planets.

pub mod commands;
pub mod entities;
pub mod init;
pub mod persistence;
pub mod physics;
pub mod planets;
pub mod plugin;
pub mod settings;
pub mod world;

use std::time::Duration;

use astrum_core::plugin::AstrumCorePlugin;
use bevy::{app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*, state::app::StatesPlugin};
use clap::Parser;

use crate::{plugin::server_plugin::ServerPlugin, settings::Args};

/// Simulation ticks per second
const TICKS_PER_SECOND: f64 = 20.0;

fn main() {
    let settings = Args::parse().into_settings();

    App::new()
        .add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(1.0 / TICKS_PER_SECOND))),
            LogPlugin::default(),
            StatesPlugin,
        ))
        .insert_resource(settings)
        .insert_resource(Time::<Fixed>::from_hz(TICKS_PER_SECOND))
        .add_plugins(AstrumCorePlugin)
        .add_plugins(ServerPlugin)
        .run();
}
