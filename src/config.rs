use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::map::Placement;
use crate::structures::history::DEFAULT_HISTORY_CAPACITY;

pub const DEFAULT_SAVE_DIR: &str = "saves";
pub const DEFAULT_FOG_RADIUS: u32 = 1;
pub const DEFAULT_AMBIENT_EVENT_CHANCE: i32 = 15;

/// Tunables for one session. Fixed rules live beside the code that uses them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub save_dir: PathBuf,
    /// `None` seeds from the clock.
    pub seed: Option<u64>,
    pub fog_radius: u32,
    pub history_capacity: usize,
    /// Percent chance per move that an ambient event is queued.
    pub ambient_event_chance: i32,
    pub placement: Placement,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
            seed: None,
            fog_radius: DEFAULT_FOG_RADIUS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            ambient_event_chance: DEFAULT_AMBIENT_EVENT_CHANCE,
            placement: Placement::default(),
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "seed": 7, "fog_radius": 2 }"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.fog_radius, 2);
        assert_eq!(config.history_capacity, 10);
        assert_eq!(config.ambient_event_chance, 15);
        assert_eq!(config.placement.total(), 11);
    }
}
