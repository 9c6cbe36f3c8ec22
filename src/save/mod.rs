//! Slot-based persistence of a whole session.

use std::{
    collections::HashMap,
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use bracket_geometry::prelude::Point;
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::items::Item;
use crate::game::{Milestones, Phase, Player};
use crate::map::{Grid, RoomKind};
use crate::structures::{MemoryLog, MemoryRecord};

pub const SAVE_VERSION: u32 = 1;
pub const SAVE_SLOTS: [u8; 3] = [1, 2, 3];

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no saved journey in slot {slot}")]
    NotFound { slot: u8 },
    #[error("slot {0} does not exist; choose 1, 2 or 3")]
    InvalidSlot(u8),
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("save format {found} is not supported (expected {expected})")]
    IncompatibleVersion { expected: u32, found: u32 },
    #[error("save file describes an impossible world: {0}")]
    Invalid(String),
}

pub fn check_slot(slot: u8) -> Result<u8, SaveError> {
    if SAVE_SLOTS.contains(&slot) {
        Ok(slot)
    } else {
        Err(SaveError::InvalidSlot(slot))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub position: (i32, i32),
    pub hope: i32,
    pub strength: i32,
    pub clarity: i32,
    pub burden: i32,
    pub inventory: Vec<Item>,
    pub memories: Vec<MemoryRecord>,
}

impl From<&Player> for PlayerSnapshot {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            position: (player.position.x, player.position.y),
            hope: player.hope,
            strength: player.strength,
            clarity: player.clarity,
            burden: player.burden,
            inventory: player.inventory.clone(),
            memories: player.memories.all().to_vec(),
        }
    }
}

impl PlayerSnapshot {
    pub fn into_player(self) -> Player {
        Player {
            name: self.name,
            position: Point::new(self.position.0, self.position.1),
            hope: self.hope,
            strength: self.strength,
            clarity: self.clarity,
            burden: self.burden,
            inventory: self.inventory,
            memories: MemoryLog::from_records(self.memories),
        }
    }
}

/// Everything needed to resume a journey.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub player: PlayerSnapshot,
    pub grid: Vec<Vec<RoomKind>>,
    pub phase: Phase,
    /// Oldest first.
    pub history: Vec<(i32, i32)>,
    pub milestones: Milestones,
    pub turn: u64,
}

impl Snapshot {
    pub fn grid(&self) -> Result<Grid, SaveError> {
        let grid = Grid::from_rows(&self.grid)
            .ok_or_else(|| SaveError::Invalid("grid rows are empty or ragged".to_string()))?;
        let (x, y) = self.player.position;
        if !grid.is_open(Point::new(x, y)) {
            return Err(SaveError::Invalid(format!(
                "player stands on a wall or off the grid at ({x}, {y})"
            )));
        }
        if let Some(&(x, y)) = self
            .history
            .iter()
            .find(|&&(x, y)| !grid.is_open(Point::new(x, y)))
        {
            return Err(SaveError::Invalid(format!(
                "move history leads onto a wall or off the grid at ({x}, {y})"
            )));
        }
        Ok(grid)
    }

    pub fn history_points(&self) -> Vec<Point> {
        self.history.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn check_version(self) -> Result<Self, SaveError> {
        if self.version == SAVE_VERSION {
            Ok(self)
        } else {
            Err(SaveError::IncompatibleVersion {
                expected: SAVE_VERSION,
                found: self.version,
            })
        }
    }
}

pub trait SaveStore {
    fn save(&mut self, snapshot: &Snapshot, slot: u8) -> Result<(), SaveError>;
    fn load(&self, slot: u8) -> Result<Snapshot, SaveError>;
    fn occupied(&self, slot: u8) -> bool;
}

/// One pretty-printed JSON file per slot under `dir`.
#[derive(Clone, Debug)]
pub struct JsonSlotStore {
    dir: PathBuf,
}

impl JsonSlotStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, slot: u8) -> PathBuf {
        self.dir.join(format!("save_slot_{slot}.json"))
    }
}

impl SaveStore for JsonSlotStore {
    fn save(&mut self, snapshot: &Snapshot, slot: u8) -> Result<(), SaveError> {
        let slot = check_slot(slot)?;
        let content = serde_json::to_string_pretty(snapshot)?;
        let path = self.slot_path(slot);
        write_atomic(&path, &content)?;
        info!("saved slot {slot} to {}", path.display());
        Ok(())
    }

    fn load(&self, slot: u8) -> Result<Snapshot, SaveError> {
        let slot = check_slot(slot)?;
        let path = self.slot_path(slot);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(SaveError::NotFound { slot });
            }
            Err(err) => return Err(err.into()),
        };
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        debug!("read slot {slot} from {}", path.display());
        snapshot.check_version()
    }

    fn occupied(&self, slot: u8) -> bool {
        check_slot(slot).is_ok() && self.slot_path(slot).is_file()
    }
}

/// Writes next to the target and renames over it, so a failed write never
/// clobbers the previous save.
fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(dir)?;
    let base = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("save.json");
    let tmp_path = dir.join(format!(".{base}.tmp-{}", std::process::id()));
    let written = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&tmp_path)
        .and_then(|mut tmp| {
            tmp.write_all(content.as_bytes())?;
            tmp.sync_all()
        });
    if let Err(err) = written.and_then(|_| fs::rename(&tmp_path, path)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }
    Ok(())
}

/// Slots held in memory, for headless runs and tests. Snapshots still pass
/// through JSON so both stores reject the same inputs.
#[derive(Clone, Debug, Default)]
pub struct MemorySlots {
    slots: HashMap<u8, String>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw text in a slot, bypassing serialization.
    pub fn insert_raw<S: Into<String>>(&mut self, slot: u8, content: S) {
        self.slots.insert(slot, content.into());
    }
}

impl SaveStore for MemorySlots {
    fn save(&mut self, snapshot: &Snapshot, slot: u8) -> Result<(), SaveError> {
        let slot = check_slot(slot)?;
        self.slots.insert(slot, serde_json::to_string(snapshot)?);
        Ok(())
    }

    fn load(&self, slot: u8) -> Result<Snapshot, SaveError> {
        let slot = check_slot(slot)?;
        let content = self.slots.get(&slot).ok_or(SaveError::NotFound { slot })?;
        let snapshot: Snapshot = serde_json::from_str(content)?;
        snapshot.check_version()
    }

    fn occupied(&self, slot: u8) -> bool {
        self.slots.contains_key(&slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::items::ItemKind;

    fn sample() -> Snapshot {
        let mut player = Player::default();
        player.position = Point::new(2, 0);
        player.hope = 42;
        player.inventory.push(Item {
            id: "journal".to_string(),
            name: "Journal".to_string(),
            description: "Pages of your own handwriting.".to_string(),
            kind: ItemKind::Clarity,
            value: 4,
        });
        player.remember("first", 1);
        player.remember("second", -2);
        Snapshot {
            version: SAVE_VERSION,
            saved_at: Utc::now(),
            player: PlayerSnapshot::from(&player),
            grid: Grid::base_layout().rows(),
            phase: Phase::Insight,
            history: vec![(0, 0), (1, 0)],
            milestones: Milestones {
                demons_faced: 1,
                items_collected: 2,
                npcs_visited: 3,
            },
            turn: 17,
        }
    }

    #[test]
    fn memory_slots_round_trip() {
        let mut store = MemorySlots::new();
        let snapshot = sample();
        store.save(&snapshot, 2).unwrap();
        assert!(store.occupied(2));
        assert_eq!(store.load(2).unwrap(), snapshot);
    }

    #[test]
    fn missing_and_corrupt_are_distinct() {
        let mut store = MemorySlots::new();
        assert!(matches!(store.load(1), Err(SaveError::NotFound { slot: 1 })));
        store.insert_raw(1, "{ not json");
        assert!(matches!(store.load(1), Err(SaveError::Corrupt(_))));
    }

    #[test]
    fn slots_outside_range_are_rejected() {
        let mut store = MemorySlots::new();
        assert!(matches!(store.save(&sample(), 4), Err(SaveError::InvalidSlot(4))));
        assert!(matches!(store.load(0), Err(SaveError::InvalidSlot(0))));
    }

    #[test]
    fn newer_format_is_refused() {
        let mut store = MemorySlots::new();
        let mut snapshot = sample();
        snapshot.version = SAVE_VERSION + 1;
        store.save(&snapshot, 3).unwrap();
        assert!(matches!(
            store.load(3),
            Err(SaveError::IncompatibleVersion { found, .. }) if found == SAVE_VERSION + 1
        ));
    }

    #[test]
    fn snapshot_player_restores_memories_in_order() {
        let player = sample().player.into_player();
        let texts: Vec<&str> = player.memories.all().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(player.position, Point::new(2, 0));
    }

    #[test]
    fn walled_in_player_is_invalid() {
        let mut snapshot = sample();
        snapshot.player.position = (1, 1);
        assert!(matches!(snapshot.grid(), Err(SaveError::Invalid(_))));
    }

    #[test]
    fn history_through_walls_is_invalid() {
        let mut snapshot = sample();
        snapshot.history = vec![(0, 0), (1, 1)];
        assert!(matches!(snapshot.grid(), Err(SaveError::Invalid(_))));
        snapshot.history = vec![(9, 9)];
        assert!(matches!(snapshot.grid(), Err(SaveError::Invalid(_))));
        snapshot.history = vec![(0, 0), (1, 0)];
        assert!(snapshot.grid().is_ok());
    }
}
