//! Content domain: serialized tuning file layout.

use serde::{Deserialize, Serialize};

use crate::combat::{EnemyTuning, PlayerTuning};

/// Schema version this build understands.
pub const TUNING_SCHEMA_VERSION: u32 = 1;

/// Contents of `assets/data/tuning.ron`. Omitted sections and fields fall
/// back to the compiled-in defaults.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TuningFile {
    pub schema_version: u32,
    #[serde(default)]
    pub player: PlayerTuning,
    #[serde(default)]
    pub enemy: EnemyTuning,
}

impl Default for TuningFile {
    fn default() -> Self {
        Self {
            schema_version: TUNING_SCHEMA_VERSION,
            player: PlayerTuning::default(),
            enemy: EnemyTuning::default(),
        }
    }
}
