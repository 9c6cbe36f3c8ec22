pub mod demons;
pub mod dialogue;
pub mod items;

use std::collections::HashMap;

use log::warn;

use crate::game::Phase;
use crate::map::{NpcKind, RoomKind};

use self::{
    demons::{DemonTemplate, FALLBACK_DEMON, builtin_demons},
    items::{FALLBACK_ITEM, ItemTemplate, builtin_items},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DemonLines<'a> {
    pub appearance: &'a str,
    pub defeat: &'a str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NpcScript<'a> {
    pub greeting: &'a str,
    pub conversations: &'a [&'a str],
}

/// Keyed access to narrative content. Lookups never fail: an unknown key
/// yields the documented fallback record.
pub trait ContentRepository {
    /// Unknown ids resolve to the "self-doubt" demon.
    fn demon(&self, id: &str) -> &DemonTemplate;
    fn demon_roster(&self, phase: Phase) -> Vec<&str>;
    /// Unknown ids resolve to the "fragment_of_hope" item.
    fn item(&self, id: &str) -> &ItemTemplate;
    fn item_ids(&self) -> Vec<&str>;
    fn demon_lines(&self, phase: Phase, demon_id: &str) -> DemonLines<'_>;
    fn npc_script(&self, phase: Phase, npc: NpcKind) -> NpcScript<'_>;
    fn mirror_reflection(&self, phase: Phase) -> &str;
    fn phase_transition(&self, phase: Phase) -> &str;
    /// Never empty.
    fn room_descriptions(&self, room: RoomKind) -> &[&str];
    /// Detail line and action hint for rooms that hold something.
    fn room_insight(&self, room: RoomKind) -> Option<(&str, &str)>;
    fn intro(&self) -> &str;
    fn help(&self) -> &str;
    fn epilogue(&self) -> &str;
    fn ambient_memories(&self) -> &[&str];
    fn inner_voices(&self) -> &[&str];
    fn encouragements(&self) -> &[&str];
}

pub struct BuiltinContent {
    demons: HashMap<String, DemonTemplate>,
    fallback_demon: DemonTemplate,
    items: Vec<ItemTemplate>,
    fallback_item: ItemTemplate,
}

impl Default for BuiltinContent {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinContent {
    pub fn new() -> Self {
        Self::from_templates(builtin_demons(), builtin_items())
    }

    /// Drops templates that fail validation so call sites never re-check shape.
    pub fn from_templates(demons: Vec<DemonTemplate>, items: Vec<ItemTemplate>) -> Self {
        let mut table = HashMap::new();
        for demon in demons {
            if demon.is_valid() {
                table.insert(demon.id.clone(), demon);
            } else {
                warn!("discarding malformed demon template {}", demon.id);
            }
        }
        let fallback_demon = table
            .get(FALLBACK_DEMON)
            .cloned()
            .or_else(|| {
                builtin_demons()
                    .into_iter()
                    .find(|demon| demon.id == FALLBACK_DEMON)
            })
            .unwrap_or_else(|| table.values().next().cloned().unwrap_or_else(placeholder_demon));

        let items: Vec<ItemTemplate> = items.into_iter().filter(|item| item.value >= 0).collect();
        let fallback_item = items
            .iter()
            .chain(builtin_items().iter())
            .find(|item| item.id == FALLBACK_ITEM)
            .cloned()
            .unwrap_or_else(placeholder_item);

        Self {
            demons: table,
            fallback_demon,
            items,
            fallback_item,
        }
    }
}

fn placeholder_item() -> ItemTemplate {
    ItemTemplate::new(
        FALLBACK_ITEM,
        "Fragment of Hope",
        "A tiny spark of light.",
        items::ItemKind::Hope,
        5,
        "It's warm.",
        "Something glimmers.",
    )
}

fn placeholder_demon() -> DemonTemplate {
    DemonTemplate::new(
        FALLBACK_DEMON,
        "A Nameless Shadow",
        "Something without a shape presses close.",
        10,
        vec![demons::DemonAttack::new("press", 2, "It presses in from every side.")],
        "The shadow thins and is gone.",
    )
}

impl ContentRepository for BuiltinContent {
    fn demon(&self, id: &str) -> &DemonTemplate {
        self.demons.get(id).unwrap_or(&self.fallback_demon)
    }

    fn demon_roster(&self, phase: Phase) -> Vec<&str> {
        dialogue::demon_roster(phase).to_vec()
    }

    fn item(&self, id: &str) -> &ItemTemplate {
        self.items
            .iter()
            .find(|item| item.id == id)
            .unwrap_or(&self.fallback_item)
    }

    fn item_ids(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.id).collect()
    }

    fn demon_lines(&self, phase: Phase, demon_id: &str) -> DemonLines<'_> {
        match dialogue::demon_lines(phase, demon_id) {
            Some((appearance, defeat)) => DemonLines { appearance, defeat },
            None => {
                let template = self.demon(demon_id);
                DemonLines {
                    appearance: template.description.as_str(),
                    defeat: template.defeat_message.as_str(),
                }
            }
        }
    }

    fn npc_script(&self, phase: Phase, npc: NpcKind) -> NpcScript<'_> {
        NpcScript {
            greeting: dialogue::npc_greeting(npc),
            conversations: dialogue::npc_conversations(phase, npc),
        }
    }

    fn mirror_reflection(&self, phase: Phase) -> &str {
        dialogue::mirror_reflection(phase)
    }

    fn phase_transition(&self, phase: Phase) -> &str {
        dialogue::phase_transition(phase).unwrap_or(dialogue::FALLBACK_LINE)
    }

    fn room_descriptions(&self, room: RoomKind) -> &[&str] {
        dialogue::room_descriptions(room)
    }

    fn room_insight(&self, room: RoomKind) -> Option<(&str, &str)> {
        dialogue::room_insight(room)
    }

    fn intro(&self) -> &str {
        dialogue::INTRO
    }

    fn help(&self) -> &str {
        dialogue::HELP
    }

    fn epilogue(&self) -> &str {
        dialogue::EPILOGUE
    }

    fn ambient_memories(&self) -> &[&str] {
        dialogue::AMBIENT_MEMORIES
    }

    fn inner_voices(&self) -> &[&str] {
        dialogue::INNER_VOICES
    }

    fn encouragements(&self) -> &[&str] {
        dialogue::ENCOURAGEMENTS
    }
}
