//! Settings for the server

use bevy::prelude::*;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
/// Command line arguments for the server
pub struct Args {
    /// Directory the world contents (including player data) are stored in
    #[arg(long, default_value_t = String::from("world"))]
    world: String,

    /// Directory planet data records are loaded from
    #[arg(long, default_value_t = String::from("assets/astrum/planets"))]
    planet_data: String,

    /// If this flag is set, respawns ignore each player's designated home
    /// planet and only consider the planet they died on
    #[arg(long, default_value_t = false)]
    no_designated_respawn: bool,
}

impl Args {
    /// Converts the parsed arguments into the settings resource
    pub fn into_settings(self) -> ServerSettings {
        ServerSettings {
            world_folder: self.world,
            planet_data_folder: self.planet_data,
            designated_respawn: !self.no_designated_respawn,
        }
    }
}

#[derive(Resource, Debug)]
/// Settings for the server from the command line
pub struct ServerSettings {
    /// The directory the world contents are stored in (defaults to "world")
    pub world_folder: String,
    /// The directory planet data records are loaded from
    pub planet_data_folder: String,
    /// Whether a player's designated home planet participates in respawn
    /// resolution
    pub designated_respawn: bool,
}
