use bracket_geometry::prelude::Point;

use crate::data::items::{Item, ItemKind};
use crate::map::ORIGIN;
use crate::structures::{MemoryLog, MemoryRecord};

pub const MAX_HOPE: i32 = 100;
pub const MAX_BURDEN: i32 = 100;
pub const STARTING_HOPE: i32 = 10;
pub const STARTING_STRENGTH: i32 = 5;
pub const STARTING_CLARITY: i32 = 0;
pub const STARTING_BURDEN: i32 = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub position: Point,
    pub hope: i32,
    pub strength: i32,
    pub clarity: i32,
    pub burden: i32,
    pub inventory: Vec<Item>,
    pub memories: MemoryLog,
}

impl Default for Player {
    fn default() -> Self {
        Self::new("Lost Soul")
    }
}

impl Player {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            position: ORIGIN,
            hope: STARTING_HOPE,
            strength: STARTING_STRENGTH,
            clarity: STARTING_CLARITY,
            burden: STARTING_BURDEN,
            inventory: Vec::new(),
            memories: MemoryLog::new(),
        }
    }

    pub fn gain_hope(&mut self, amount: i32) {
        self.hope = (self.hope + amount).clamp(0, MAX_HOPE);
    }

    pub fn lose_hope(&mut self, amount: i32) {
        self.hope = (self.hope - amount).max(0);
    }

    pub fn ease_burden(&mut self, amount: i32) {
        self.burden = (self.burden - amount).clamp(0, MAX_BURDEN);
    }

    pub fn is_broken(&self) -> bool {
        self.hope <= 0
    }

    pub fn remember<S: Into<String>>(&mut self, text: S, hope_delta: i32) {
        self.memories.append(MemoryRecord::now(text, hope_delta));
    }

    /// Pockets an item and applies its pickup effect.
    pub fn gain_item(&mut self, item: Item) {
        match item.kind {
            ItemKind::Hope => self.gain_hope(item.value),
            ItemKind::Strength => self.strength += item.value,
            ItemKind::Clarity => self.clarity += item.value,
        }
        self.inventory.push(item);
    }

    pub fn take_from_inventory(&mut self, slot: usize) -> Option<Item> {
        if slot < self.inventory.len() {
            Some(self.inventory.remove(slot))
        } else {
            None
        }
    }

    pub fn status_description(&self) -> &'static str {
        match self.hope {
            h if h < 20 => "You feel hollow, like a shadow of who you once were.",
            h if h < 40 => "A faint spark flickers within you, fragile but present.",
            h if h < 60 => "You're beginning to remember what it feels like to feel.",
            h if h < 80 => "Light is breaking through the cracks in your armor.",
            _ => "You stand tall, scars and all, radiating quiet strength.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: ItemKind, value: i32) -> Item {
        Item {
            id: "test".to_string(),
            name: "Test Item".to_string(),
            description: String::new(),
            kind,
            value,
        }
    }

    #[test]
    fn starts_at_rock_bottom() {
        let player = Player::default();
        assert_eq!(player.hope, 10);
        assert_eq!(player.burden, 100);
        assert_eq!(player.position, ORIGIN);
        assert!(player.inventory.is_empty());
    }

    #[test]
    fn hope_is_bounded() {
        let mut player = Player::default();
        player.gain_hope(500);
        assert_eq!(player.hope, MAX_HOPE);
        player.lose_hope(500);
        assert_eq!(player.hope, 0);
        assert!(player.is_broken());
    }

    #[test]
    fn items_apply_their_effect() {
        let mut player = Player::default();
        player.gain_item(item(ItemKind::Strength, 3));
        player.gain_item(item(ItemKind::Clarity, 4));
        player.gain_item(item(ItemKind::Hope, 5));
        assert_eq!(player.strength, 8);
        assert_eq!(player.clarity, 4);
        assert_eq!(player.hope, 15);
        assert_eq!(player.inventory.len(), 3);
    }

    #[test]
    fn taking_from_missing_slot_is_none() {
        let mut player = Player::default();
        assert!(player.take_from_inventory(0).is_none());
        player.gain_item(item(ItemKind::Hope, 1));
        assert!(player.take_from_inventory(0).is_some());
        assert!(player.inventory.is_empty());
    }
}
