use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Hope,
    Strength,
    Clarity,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Hope => "Hope",
            ItemKind::Strength => "Strength",
            ItemKind::Clarity => "Clarity",
        }
    }
}

/// An item as carried in the inventory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: ItemKind,
    pub value: i32,
}

#[derive(Clone, Debug)]
pub struct ItemTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ItemKind,
    pub value: i32,
    pub pickup_message: &'static str,
    pub discovery: &'static str,
}

impl ItemTemplate {
    pub const fn new(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        kind: ItemKind,
        value: i32,
        pickup_message: &'static str,
        discovery: &'static str,
    ) -> Self {
        Self {
            id,
            name,
            description,
            kind,
            value,
            pickup_message,
            discovery,
        }
    }

    pub fn instantiate(&self) -> Item {
        Item {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            kind: self.kind,
            value: self.value,
        }
    }
}

pub const FALLBACK_ITEM: &str = "fragment_of_hope";

pub fn builtin_items() -> Vec<ItemTemplate> {
    vec![
        ItemTemplate::new(
            "fragment_of_hope",
            "Fragment of Hope",
            "A tiny spark of light that refuses to die, no matter how dark it gets.",
            ItemKind::Hope,
            5,
            "You cup the fragile light in your hands. It's warm.",
            "In the corner, something glimmers. A small, warm light.",
        ),
        ItemTemplate::new(
            "memory_of_joy",
            "Memory of Joy",
            "A crystallized moment when you genuinely smiled.",
            ItemKind::Hope,
            7,
            "The memory floods back. You had forgotten you could feel this way.",
            "A photograph, faded and torn. You were happy once.",
        ),
        ItemTemplate::new(
            "shard_of_strength",
            "Shard of Strength",
            "Proof that you survived something you thought would break you.",
            ItemKind::Strength,
            3,
            "You remember: You've been strong before. You can be again.",
            "Something glints amid the shadows. A broken piece of something once whole.",
        ),
        ItemTemplate::new(
            "thread_of_connection",
            "Thread of Connection",
            "A reminder that you are not, and have never been, truly alone.",
            ItemKind::Hope,
            6,
            "Someone, somewhere, cares. The thread proves it.",
            "A delicate thread stretches into the darkness, connecting to something.",
        ),
        ItemTemplate::new(
            "seed_of_tomorrow",
            "Seed of Tomorrow",
            "A tiny promise that things can grow, can change, can bloom.",
            ItemKind::Clarity,
            4,
            "In your palm, a seed. Small, but containing infinite possibility.",
            "In a crack in the stone floor, impossibly, something green grows.",
        ),
        ItemTemplate::new(
            "echo_of_laughter",
            "Echo of Laughter",
            "The ghost of a genuine laugh, yours from better days.",
            ItemKind::Hope,
            8,
            "The sound surprises you. When did you last laugh like that?",
            "You hear it before you see it: your own laughter, echoing.",
        ),
        ItemTemplate::new(
            "piece_of_self",
            "Piece of Self",
            "A part of you that got lost in the darkness, now found.",
            ItemKind::Strength,
            5,
            "You feel a little more whole, a little more yourself.",
            "Something familiar lies in the corner. A fragment that feels like you.",
        ),
        ItemTemplate::new(
            "courage_token",
            "Courage Token",
            "A reminder that you can speak up and your voice has power.",
            ItemKind::Strength,
            6,
            "The weight of the token in your hand feels empowering.",
            "A small token sits on the ground, warm to the touch.",
        ),
        ItemTemplate::new(
            "compass_of_purpose",
            "Compass of Purpose",
            "A guide pointing toward what matters most to you.",
            ItemKind::Clarity,
            7,
            "The needle steadies, showing a direction you recognize.",
            "A compass spins wildly until you pick it up. Then it settles.",
        ),
        ItemTemplate::new(
            "forgiveness_feather",
            "Forgiveness Feather",
            "Permission to release past mistakes and self-judgment.",
            ItemKind::Hope,
            9,
            "As you hold it, some weight lifts from your shoulders.",
            "A feather, impossibly light, lifts the weight from your shoulders.",
        ),
    ]
}
