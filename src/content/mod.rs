//! Content domain: data-driven tuning loaded from RON.

mod data;
mod loader;
mod validation;

#[cfg(test)]
mod tests;

use bevy::prelude::*;
use std::path::Path;

use data::TuningFile;
use loader::load_tuning;

/// Location of the tuning file relative to the working directory.
pub const TUNING_PATH: &str = "assets/data/tuning.ron";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        let tuning = match load_tuning(Path::new(TUNING_PATH)) {
            Ok(tuning) => {
                info!("Loaded tuning from {}", TUNING_PATH);
                tuning
            }
            Err(e) => {
                warn!("{}; using default tuning", e);
                TuningFile::default()
            }
        };

        app.insert_resource(tuning.player)
            .insert_resource(tuning.enemy);
    }
}
