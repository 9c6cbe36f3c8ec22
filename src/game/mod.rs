//! The session state machine. A [`Game`] owns the player, the world and the
//! turn queues, and only ever advances when handed a [`Command`].
//!
//! Exploring turns run: apply one action, drain at most one queued event,
//! then check for a phase transition and for collapse. A battle finishes its
//! turn when it resolves; prompts never spend one.

pub mod phase;
pub mod player;

use bracket_geometry::prelude::Point;
use bracket_random::prelude::RandomNumberGenerator;
use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

pub use phase::{PHASES, Phase};
pub use player::Player;

use crate::battle::{self, Battle, BattleOutcome, Strategy};
use crate::config::GameConfig;
use crate::data::ContentRepository;
use crate::data::dialogue::{FALLBACK_LINE, ORIGIN_ROOM_NAME};
use crate::input::Command;
use crate::map::{
    self, DIRECTIONS, Direction, GenerationError, Grid, NpcKind, ORIGIN, RoomKind,
    fog::{self, FogView},
    pathfinding,
};
use crate::save::{PlayerSnapshot, SAVE_SLOTS, SAVE_VERSION, SaveError, SaveStore, Snapshot};
use crate::structures::{EventQueue, GameEvent, MoveHistory, Priority};
use player::{STARTING_BURDEN, STARTING_HOPE};

pub const LOG_MAX_ENTRIES: usize = 12;

const NPC_BASE_HOPE: i32 = 5;
const THERAPIST_CLARITY: i32 = 3;
const THERAPIST_RELIEF: i32 = 5;
const LOVED_ONE_HOPE: i32 = 3;
const STRANGER_STRENGTH: i32 = 2;
const AMBIENT_MEMORY_HOPE: i32 = 2;
const ENCOURAGEMENT_HOPE: i32 = 1;
/// Keys 1-8 pick an item on the current page; 9 turns the page.
const ITEMS_PER_PAGE: usize = 8;
const MORE_ITEMS_KEY: u8 = 9;

/// Tallies reported at the end of a journey.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestones {
    pub demons_faced: u32,
    pub items_collected: u32,
    pub npcs_visited: u32,
}

/// Where backing out of the load prompt leads.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReturnTo {
    Title,
    Exploring,
    GameOver,
}

#[derive(Clone, Debug)]
pub enum Mode {
    Title,
    Exploring,
    Battle {
        battle: Box<Battle>,
        /// Page of the item menu on screen; `None` while picking a strategy.
        item_page: Option<usize>,
    },
    SavePrompt,
    LoadPrompt {
        back: ReturnTo,
    },
    GameOver,
    Complete(JourneySummary),
    Quit,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Title => "title",
            Mode::Exploring => "exploring",
            Mode::Battle { .. } => "battle",
            Mode::SavePrompt => "save prompt",
            Mode::LoadPrompt { .. } => "load prompt",
            Mode::GameOver => "game over",
            Mode::Complete(_) => "complete",
            Mode::Quit => "quit",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Mode::Quit)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: Phase,
    pub to: Phase,
    pub regenerated: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JourneySummary {
    pub starting_hope: i32,
    pub final_hope: i32,
    pub starting_burden: i32,
    pub final_burden: i32,
    pub milestones: Milestones,
    /// Running hope total after every memory that moved it.
    pub hope_over_time: Vec<i32>,
}

impl JourneySummary {
    pub fn new(player: &Player, milestones: Milestones) -> Self {
        let mut hope = STARTING_HOPE;
        let mut hope_over_time = vec![hope];
        for record in player.memories.all() {
            if record.hope_delta != 0 {
                hope += record.hope_delta;
                hope_over_time.push(hope);
            }
        }
        Self {
            starting_hope: STARTING_HOPE,
            final_hope: player.hope,
            starting_burden: STARTING_BURDEN,
            final_burden: player.burden,
            milestones,
            hope_over_time,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!(
                "You started with {} hope. You ended with {}.",
                self.starting_hope, self.final_hope
            ),
            format!(
                "You began carrying {} burden. You now carry {}.",
                self.starting_burden, self.final_burden
            ),
            format!(
                "You found {} fragments of yourself.",
                self.milestones.items_collected
            ),
            format!("You faced {} inner demons.", self.milestones.demons_faced),
            format!(
                "You connected with {} others along the way.",
                self.milestones.npcs_visited
            ),
            "You survived. You grew. You chose to keep going.".to_string(),
        ]
    }
}

pub struct Game {
    config: GameConfig,
    content: Box<dyn ContentRepository>,
    store: Box<dyn SaveStore>,
    rng: RandomNumberGenerator,
    pub player: Player,
    pub grid: Grid,
    pub phase: Phase,
    pub history: MoveHistory,
    pub events: EventQueue,
    pub milestones: Milestones,
    pub turn: u64,
    mode: Mode,
    messages: Vec<String>,
}

impl Game {
    /// Fails only when the configured placement cannot fit the base layout.
    pub fn new(
        config: GameConfig,
        content: Box<dyn ContentRepository>,
        store: Box<dyn SaveStore>,
    ) -> Result<Self, GenerationError> {
        let mut rng = match config.seed {
            Some(seed) => RandomNumberGenerator::seeded(seed),
            None => RandomNumberGenerator::new(),
        };
        let grid = map::generate(&Grid::base_layout(), &[ORIGIN], &config.placement, &mut rng)?;
        let history = MoveHistory::with_capacity(config.history_capacity);
        Ok(Self {
            config,
            content,
            store,
            rng,
            player: Player::default(),
            grid,
            phase: Phase::default(),
            history,
            events: EventQueue::new(),
            milestones: Milestones::default(),
            turn: 0,
            mode: Mode::Title,
            messages: Vec::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn content(&self) -> &dyn ContentRepository {
        self.content.as_ref()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Newest first.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn fog(&self) -> FogView {
        fog::reveal(&self.grid, self.player.position, self.config.fog_radius)
    }

    pub fn current_room(&self) -> RoomKind {
        self.grid
            .room_at(self.player.position)
            .unwrap_or(RoomKind::Empty)
    }

    pub fn room_name(&self, point: Point) -> &'static str {
        if point == ORIGIN {
            return ORIGIN_ROOM_NAME;
        }
        self.grid
            .room_at(point)
            .map(|room| room.as_str())
            .unwrap_or("Unknown Place")
    }

    pub fn start_journey(&mut self) -> Result<(), GenerationError> {
        self.grid = map::generate(
            &Grid::base_layout(),
            &[ORIGIN],
            &self.config.placement,
            &mut self.rng,
        )?;
        self.player = Player::default();
        self.phase = Phase::default();
        self.history = MoveHistory::with_capacity(self.config.history_capacity);
        self.events.clear();
        self.milestones = Milestones::default();
        self.turn = 0;
        self.messages.clear();
        let intro = self.content.intro().to_string();
        self.push_log_entry(intro);
        self.mode = Mode::Exploring;
        info!("new journey started");
        Ok(())
    }

    pub fn handle(&mut self, command: Command) -> Result<(), GenerationError> {
        debug!("turn {} [{}] <- {:?}", self.turn, self.mode.name(), command);
        match self.mode {
            Mode::Title => self.on_title(command),
            Mode::Exploring => self.on_explore(command),
            Mode::Battle { .. } => self.on_battle(command),
            Mode::SavePrompt => {
                self.on_save_prompt(command);
                Ok(())
            }
            Mode::LoadPrompt { back } => {
                self.on_load_prompt(command, back);
                Ok(())
            }
            Mode::GameOver => {
                self.on_game_over(command);
                Ok(())
            }
            Mode::Complete(_) => {
                if command == Command::Quit {
                    self.mode = Mode::Quit;
                }
                Ok(())
            }
            Mode::Quit => Ok(()),
        }
    }

    /// Labelled key hints for the current mode.
    pub fn available_actions(&self) -> Vec<(String, String)> {
        let pair = |key: &str, label: &str| (key.to_string(), label.to_string());
        match &self.mode {
            Mode::Title => vec![
                pair("1", "New journey"),
                pair("2", "Continue journey"),
                pair("3", "Leave"),
            ],
            Mode::Exploring => {
                let mut actions = Vec::new();
                for direction in DIRECTIONS {
                    if self.grid.is_open(direction.step(self.player.position)) {
                        actions.push(pair(direction_key(direction), direction_label(direction)));
                    }
                }
                actions.extend([
                    pair("l", "Look around"),
                    pair("i", "Inventory"),
                    pair("u", "Undo move"),
                    pair("n", "Nearest light"),
                    pair("s", "Save game"),
                    pair("o", "Load game"),
                    pair("h", "Help"),
                ]);
                match self.current_room() {
                    RoomKind::Demon => actions.push(pair("f", "Face demon")),
                    RoomKind::Item => actions.push(pair("t", "Take item")),
                    RoomKind::Mirror => actions.push(pair("x", "Examine mirror")),
                    RoomKind::Therapist | RoomKind::LovedOne | RoomKind::Stranger => {
                        actions.push(pair("k", "Talk to person"))
                    }
                    RoomKind::Wall | RoomKind::Empty | RoomKind::Memory => {}
                }
                actions
            }
            Mode::Battle {
                item_page: Some(page),
                ..
            } => {
                let mut actions: Vec<(String, String)> = self
                    .player
                    .inventory
                    .iter()
                    .skip(page * ITEMS_PER_PAGE)
                    .take(ITEMS_PER_PAGE)
                    .enumerate()
                    .map(|(idx, item)| ((idx + 1).to_string(), item.name.clone()))
                    .collect();
                if self.player.inventory.len() > ITEMS_PER_PAGE {
                    actions.push((MORE_ITEMS_KEY.to_string(), "More items".to_string()));
                }
                actions.push(pair("q", "Back"));
                actions
            }
            Mode::Battle { .. } => Strategy::MENU
                .iter()
                .map(|&(key, label)| pair(key, label))
                .collect(),
            Mode::SavePrompt | Mode::LoadPrompt { .. } => {
                let mut actions: Vec<(String, String)> = SAVE_SLOTS
                    .iter()
                    .map(|&slot| {
                        let label = if self.store.occupied(slot) {
                            format!("Save slot {slot}")
                        } else {
                            "Empty slot".to_string()
                        };
                        (slot.to_string(), label)
                    })
                    .collect();
                actions.push(pair("q", "Back"));
                actions
            }
            Mode::GameOver => vec![
                pair("l", "Load a saved journey"),
                pair("any", "Return to title"),
            ],
            Mode::Complete(_) => vec![pair("q", "Close the journal")],
            Mode::Quit => Vec::new(),
        }
    }

    fn on_title(&mut self, command: Command) -> Result<(), GenerationError> {
        match command {
            Command::Select(1) => self.start_journey()?,
            Command::Select(2) | Command::Load => {
                self.mode = Mode::LoadPrompt {
                    back: ReturnTo::Title,
                }
            }
            Command::Select(3) | Command::Quit => self.mode = Mode::Quit,
            _ => self.push_log_entry("Press 1 to begin, 2 to continue or 3 to leave."),
        }
        Ok(())
    }

    fn on_explore(&mut self, command: Command) -> Result<(), GenerationError> {
        let spends_turn = match command {
            Command::Move(direction) => {
                self.move_player(direction);
                true
            }
            Command::Look => {
                self.look();
                true
            }
            Command::Inventory => {
                self.show_inventory();
                true
            }
            Command::Take => {
                self.take_item();
                true
            }
            Command::Face => return self.face_demon(),
            Command::Talk => {
                self.talk();
                true
            }
            Command::Mirror => {
                self.examine_mirror();
                true
            }
            Command::Undo => {
                self.undo_move();
                true
            }
            Command::Hint => {
                self.hint();
                true
            }
            Command::Help => {
                let help = self.content.help().to_string();
                self.push_log_entry(help);
                true
            }
            Command::Save => {
                self.mode = Mode::SavePrompt;
                false
            }
            Command::Load => {
                self.mode = Mode::LoadPrompt {
                    back: ReturnTo::Exploring,
                };
                false
            }
            Command::Quit => {
                info!("journey abandoned on turn {}", self.turn);
                self.mode = Mode::Quit;
                false
            }
            Command::Select(_) => false,
        };
        if spends_turn {
            self.finish_turn()?;
        }
        Ok(())
    }

    fn finish_turn(&mut self) -> Result<(), GenerationError> {
        self.turn += 1;
        self.process_next_event();
        self.evaluate_progression()?;
        self.check_for_collapse();
        Ok(())
    }

    fn check_for_collapse(&mut self) {
        if matches!(self.mode, Mode::Exploring) && self.player.is_broken() {
            info!("hope exhausted on turn {}", self.turn);
            self.push_log_entry(
                "DARKNESS OVERWHELMS: You sink to the ground, unable to continue. But even now, \
                 a faint spark remains within you.",
            );
            self.mode = Mode::GameOver;
        }
    }

    /// Advances at most one phase when hope has reached the current threshold.
    pub fn evaluate_progression(&mut self) -> Result<Option<PhaseChange>, GenerationError> {
        let Some(threshold) = self.phase.advance_threshold() else {
            return Ok(None);
        };
        if self.player.hope < threshold {
            return Ok(None);
        }
        let Some(next) = self.phase.next() else {
            return Ok(None);
        };
        let from = self.phase;
        self.phase = next;
        info!("phase {} -> {}", from.as_str(), next.as_str());
        let transition = self.content.phase_transition(next).to_string();
        self.push_log_entry(format!(
            "PHASE: {}. {transition}",
            next.as_str().to_uppercase()
        ));

        let regenerated = if next.is_terminal() {
            self.complete_journey();
            false
        } else {
            self.regenerate_grid()?;
            true
        };
        Ok(Some(PhaseChange {
            from,
            to: next,
            regenerated,
        }))
    }

    fn regenerate_grid(&mut self) -> Result<(), GenerationError> {
        let here = self.player.position;
        let mut grid = map::generate(
            &Grid::base_layout(),
            &[ORIGIN, here],
            &self.config.placement,
            &mut self.rng,
        )?;
        grid.set_room(here, RoomKind::Empty);
        self.grid = grid;
        info!("grid regenerated for {}", self.phase.as_str());
        Ok(())
    }

    fn complete_journey(&mut self) {
        let epilogue = self.content.epilogue().to_string();
        self.push_log_entry(format!("JOURNEY COMPLETE: {epilogue}"));
        let summary = JourneySummary::new(&self.player, self.milestones);
        info!(
            "journey complete on turn {} with {} hope",
            self.turn, summary.final_hope
        );
        self.mode = Mode::Complete(summary);
    }

    /// Resolves the front of the event queue, returning what was handled.
    pub fn process_next_event(&mut self) -> Option<GameEvent> {
        let queued = self.events.dequeue()?;
        let title = queued.event.title();
        match &queued.event {
            GameEvent::MemorySurface { text, hope_delta } => {
                self.player.remember(text.clone(), *hope_delta);
                self.player.gain_hope(*hope_delta);
                self.push_log_entry(format!("{title}: {text}"));
                if *hope_delta > 0 {
                    self.push_log_entry(format!("Hope increased by {hope_delta}"));
                }
            }
            GameEvent::DemonPresence { demon } => {
                self.push_log_entry(format!(
                    "{title}: You feel the presence of {demon} surrounding you. Press 'f' to confront it."
                ));
            }
            GameEvent::InnerVoice { message } => {
                self.push_log_entry(format!("{title}: {message}"));
            }
            GameEvent::Encouragement {
                message,
                hope_delta,
            } => {
                self.player.gain_hope(*hope_delta);
                self.push_log_entry(format!("{title}: {message}"));
                self.push_log_entry(format!("Hope increased by {hope_delta}"));
            }
        }
        Some(queued.event)
    }

    fn move_player(&mut self, direction: Direction) {
        let from = self.player.position;
        let to = direction.step(from);
        if !self.grid.is_open(to) {
            self.push_log_entry("You can't go that way");
            return;
        }
        self.history.record(from);
        self.player.position = to;
        let name = self.room_name(to);
        self.push_log_entry(format!("You move {} into {name}.", direction.as_str()));

        if self.rng.range(0, 100) < self.config.ambient_event_chance {
            self.queue_ambient_event();
        }
        if self.grid.room_at(to) == Some(RoomKind::Demon) {
            let roster = self.content.demon_roster(self.phase);
            let id = pick(&mut self.rng, &roster);
            let demon = self.content.demon(id).name.clone();
            self.events
                .enqueue(GameEvent::DemonPresence { demon }, Priority::High);
        }
    }

    fn queue_ambient_event(&mut self) {
        let event = match self.rng.range(0, 3) {
            0 => GameEvent::MemorySurface {
                text: pick(&mut self.rng, self.content.ambient_memories()).to_string(),
                hope_delta: AMBIENT_MEMORY_HOPE,
            },
            1 => GameEvent::InnerVoice {
                message: pick(&mut self.rng, self.content.inner_voices()).to_string(),
            },
            _ => GameEvent::Encouragement {
                message: pick(&mut self.rng, self.content.encouragements()).to_string(),
                hope_delta: ENCOURAGEMENT_HOPE,
            },
        };
        debug!("queued ambient event: {}", event.title());
        self.events.enqueue(event, Priority::Medium);
    }

    fn look(&mut self) {
        let here = self.player.position;
        let room = self.current_room();
        let name = self.room_name(here);
        let description = pick(&mut self.rng, self.content.room_descriptions(room)).to_string();
        let mood = match self.player.hope {
            h if h < 20 => "Everything here feels heavy, oppressive.",
            h if h < 50 => "You notice small details you missed before.",
            _ => "The space feels different now. Lighter somehow.",
        };
        let insight = self
            .content
            .room_insight(room)
            .map(|(detail, hint)| format!("{detail} {hint}."));
        self.push_log_entry(format!("{name}: {description} {mood}"));
        if let Some(insight) = insight {
            self.push_log_entry(insight);
        }
    }

    fn show_inventory(&mut self) {
        if self.player.inventory.is_empty() {
            self.push_log_entry("Your hands are empty, but your heart carries weight.");
            return;
        }
        let lines: Vec<String> = self
            .player
            .inventory
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                format!(
                    "{}. {}: {} ({} +{})",
                    idx + 1,
                    item.name,
                    item.description,
                    item.kind.as_str(),
                    item.value
                )
            })
            .collect();
        self.narrate(lines);
    }

    fn take_item(&mut self) {
        let here = self.player.position;
        if self.current_room() != RoomKind::Item {
            self.push_log_entry("There's nothing here to take");
            return;
        }
        let ids = self.content.item_ids();
        let id = pick(&mut self.rng, &ids);
        let template = self.content.item(id);
        let discovery = template.discovery.to_string();
        let pickup = template.pickup_message.to_string();
        let item = template.instantiate();

        self.push_log_entry(format!("ITEM FOUND: {discovery}"));
        self.push_log_entry(pickup);
        self.push_log_entry(format!("You gained: {}", item.name));
        self.push_log_entry(format!(
            "{} increased by {}",
            item.kind.as_str(),
            item.value
        ));
        debug!("picked up {} at {:?}", item.id, here);
        self.player.gain_item(item);
        self.milestones.items_collected += 1;
        self.grid.set_room(here, RoomKind::Empty);
    }

    fn face_demon(&mut self) -> Result<(), GenerationError> {
        let here = self.player.position;
        if self.current_room() != RoomKind::Demon {
            self.push_log_entry("There are no demons to face here");
            return self.finish_turn();
        }
        let roster = self.content.demon_roster(self.phase);
        let id = pick(&mut self.rng, &roster);
        let lines = self.content.demon_lines(self.phase, id);
        let mut battle = Battle::begin(self.content.demon(id), self.phase, here);
        battle.demon.defeat_message = lines.defeat.to_string();
        let appearance = lines.appearance.to_string();

        info!("facing {} during {}", battle.demon.name, self.phase.as_str());
        self.push_log_entry(format!(
            "CONFRONTING {}: {appearance}",
            battle.demon.name.to_uppercase()
        ));
        let opening = battle.open(&mut self.player, &mut self.rng);
        self.narrate(opening);
        if battle.is_over() {
            return self.conclude_battle(battle);
        }
        self.mode = Mode::Battle {
            battle: Box::new(battle),
            item_page: None,
        };
        Ok(())
    }

    fn on_battle(&mut self, command: Command) -> Result<(), GenerationError> {
        let Mode::Battle { battle, item_page } =
            std::mem::replace(&mut self.mode, Mode::Exploring)
        else {
            return Ok(());
        };

        let chosen = match item_page {
            Some(page) => self.choose_item(command, page),
            None => self.choose_strategy(command),
        };
        let strategy = match chosen {
            Ok(strategy) => strategy,
            Err(item_page) => {
                self.mode = Mode::Battle { battle, item_page };
                return Ok(());
            }
        };

        let mut battle = battle;
        let log = battle.respond(strategy, &mut self.player, &mut self.rng);
        self.narrate(log);
        if battle.is_over() {
            return self.conclude_battle(*battle);
        }
        self.mode = Mode::Battle {
            battle,
            item_page: None,
        };
        Ok(())
    }

    /// `Err` carries the menu to stay on when no strategy was chosen.
    fn choose_strategy(&mut self, command: Command) -> Result<Strategy, Option<usize>> {
        match command {
            Command::Select(1) => Ok(Strategy::Resist),
            Command::Select(2) => Ok(Strategy::Recall),
            Command::Select(3) => Ok(Strategy::Accept),
            Command::Select(4) => Ok(Strategy::Withdraw),
            Command::Select(5) if self.player.inventory.is_empty() => Ok(Strategy::UseItem(0)),
            Command::Select(5) => Err(Some(0)),
            _ => {
                self.push_log_entry("How do you respond? Choose 1 to 5.");
                Err(None)
            }
        }
    }

    fn choose_item(&mut self, command: Command, page: usize) -> Result<Strategy, Option<usize>> {
        let count = self.player.inventory.len();
        let pages = count.div_ceil(ITEMS_PER_PAGE).max(1);
        match command {
            Command::Select(MORE_ITEMS_KEY) if pages > 1 => Err(Some((page + 1) % pages)),
            Command::Select(n) if n >= 1 && usize::from(n) <= ITEMS_PER_PAGE => {
                let slot = page * ITEMS_PER_PAGE + usize::from(n) - 1;
                if slot < count {
                    Ok(Strategy::UseItem(slot))
                } else {
                    self.push_log_entry("Invalid choice");
                    Err(Some(page))
                }
            }
            Command::Quit => Err(None),
            _ => {
                self.push_log_entry("Invalid choice");
                Err(Some(page))
            }
        }
    }

    fn conclude_battle(&mut self, battle: Battle) -> Result<(), GenerationError> {
        let Some(outcome) = battle.outcome() else {
            return Ok(());
        };
        let lines = battle::settle(&battle, outcome, &mut self.player);
        self.narrate(lines);
        if outcome == BattleOutcome::Victory {
            self.grid.set_room(battle.origin, RoomKind::Empty);
            self.milestones.demons_faced += 1;
        }
        info!(
            "battle with {} ended in {:?} after {} turns",
            battle.demon.name, outcome, battle.player_turns
        );
        self.mode = Mode::Exploring;
        self.finish_turn()
    }

    fn talk(&mut self) {
        let here = self.player.position;
        let Some(npc) = self.current_room().npc() else {
            self.push_log_entry("There's no one here to talk to");
            return;
        };
        let script = self.content.npc_script(self.phase, npc);
        let greeting = script.greeting.to_string();
        let conversation = pick(&mut self.rng, script.conversations).to_string();

        let bonus = self.phase.npc_bonus();
        let mut hope = NPC_BASE_HOPE + bonus;
        let mut relief = bonus;
        let effect = match npc {
            NpcKind::Therapist => {
                self.player.clarity += THERAPIST_CLARITY;
                relief += THERAPIST_RELIEF;
                format!("Clarity increased by {THERAPIST_CLARITY}, burden decreased by {relief}")
            }
            NpcKind::LovedOne => {
                hope += LOVED_ONE_HOPE;
                format!("Hope increased by {hope}")
            }
            NpcKind::Stranger => {
                self.player.strength += STRANGER_STRENGTH;
                format!("Hope increased by {hope}, strength increased by {STRANGER_STRENGTH}")
            }
        };
        self.player.gain_hope(hope);
        self.player.ease_burden(relief);
        let gist = conversation.split('.').next().unwrap_or("").trim();
        self.player
            .remember(format!("You connected with someone. {gist}."), hope);
        self.milestones.npcs_visited += 1;
        self.grid.set_room(here, RoomKind::Empty);

        self.push_log_entry(format!("CONVERSATION: {greeting}"));
        self.push_log_entry(conversation);
        self.push_log_entry(effect);
    }

    fn examine_mirror(&mut self) {
        if self.current_room() != RoomKind::Mirror {
            self.push_log_entry("There's no mirror here to examine");
            return;
        }
        let reflection = self.content.mirror_reflection(self.phase).to_string();
        let (hope, relief) = self.phase.mirror_reward();
        self.player.gain_hope(hope);
        self.player.ease_burden(relief);
        self.player.remember(
            format!(
                "You faced yourself in the mirror during your {}.",
                self.phase.as_str().to_lowercase()
            ),
            hope,
        );
        self.push_log_entry(format!("MIRROR OF TRUTH: {reflection}"));
        self.push_log_entry(format!(
            "Hope increased by {hope}, burden decreased by {relief}"
        ));
    }

    fn undo_move(&mut self) {
        match self.history.undo() {
            Some(previous) => {
                self.player.position = previous;
                self.push_log_entry("You retrace your steps and return to where you were.");
            }
            None => self.push_log_entry("No moves to undo."),
        }
    }

    fn hint(&mut self) {
        let here = self.player.position;
        let message = match pathfinding::find_nearest_of_type(&self.grid, here, RoomKind::Item) {
            Some(path) if path.len() < 2 => "Light gathers right here. Press 't' to take it.".to_string(),
            Some(path) => {
                let steps = path.len() - 1;
                let heading = Direction::between(path[0], path[1])
                    .map(|direction| direction.as_str())
                    .unwrap_or("onward");
                let plural = if steps == 1 { "" } else { "s" };
                format!("The nearest light is {steps} step{plural} away. Head {heading}.")
            }
            None => "No path leads to any light from here.".to_string(),
        };
        self.push_log_entry(message);
    }

    fn on_save_prompt(&mut self, command: Command) {
        match command {
            Command::Select(slot @ 1..=3) => {
                let snapshot = self.snapshot();
                match self.store.save(&snapshot, slot) {
                    Ok(()) => self.push_log_entry(format!("Journey saved to slot {slot}.")),
                    Err(err) => {
                        warn!("save to slot {slot} failed: {err}");
                        self.push_log_entry(format!("Save failed: {err}"));
                    }
                }
                self.mode = Mode::Exploring;
            }
            Command::Quit => {
                self.push_log_entry("Save cancelled.");
                self.mode = Mode::Exploring;
            }
            _ => self.push_log_entry("Choose a save slot from 1 to 3, or q to go back."),
        }
    }

    fn on_load_prompt(&mut self, command: Command, back: ReturnTo) {
        match command {
            Command::Select(slot @ 1..=3) => {
                let loaded = self.store.load(slot);
                match loaded.and_then(|snapshot| self.restore(snapshot)) {
                    Ok(()) => {
                        info!("loaded slot {slot}");
                        self.push_log_entry(format!("Continuing your journey from slot {slot}..."));
                        self.mode = Mode::Exploring;
                        self.check_for_collapse();
                    }
                    Err(SaveError::NotFound { slot }) => {
                        self.push_log_entry(format!("No saved journey in slot {slot}."));
                    }
                    Err(err) => {
                        warn!("load from slot {slot} failed: {err}");
                        self.push_log_entry(format!("Load failed: {err}"));
                    }
                }
            }
            Command::Quit => {
                self.mode = match back {
                    ReturnTo::Title => Mode::Title,
                    ReturnTo::Exploring => Mode::Exploring,
                    ReturnTo::GameOver => Mode::GameOver,
                };
            }
            _ => self.push_log_entry("Choose a slot from 1 to 3, or q to go back."),
        }
    }

    fn on_game_over(&mut self, command: Command) {
        match command {
            Command::Look | Command::Load | Command::Select(1) => {
                self.mode = Mode::LoadPrompt {
                    back: ReturnTo::GameOver,
                };
            }
            _ => self.mode = Mode::Title,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: SAVE_VERSION,
            saved_at: Utc::now(),
            player: PlayerSnapshot::from(&self.player),
            grid: self.grid.rows(),
            phase: self.phase,
            history: self.history.iter().map(|point| (point.x, point.y)).collect(),
            milestones: self.milestones,
            turn: self.turn,
        }
    }

    /// Replaces the session with a snapshot. Nothing changes if it is invalid.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<(), SaveError> {
        let grid = snapshot.grid()?;
        let mut history = MoveHistory::with_capacity(self.config.history_capacity);
        for point in snapshot.history_points() {
            history.record(point);
        }
        self.player = snapshot.player.into_player();
        self.grid = grid;
        self.phase = snapshot.phase;
        self.history = history;
        self.events.clear();
        self.milestones = snapshot.milestones;
        self.turn = snapshot.turn;
        Ok(())
    }

    fn narrate<I: IntoIterator<Item = String>>(&mut self, lines: I) {
        for line in lines {
            self.push_log_entry(line);
        }
    }

    fn push_log_entry<S: Into<String>>(&mut self, entry: S) {
        self.messages.insert(0, entry.into());
        self.messages.truncate(LOG_MAX_ENTRIES);
    }
}

fn pick<'a>(rng: &mut RandomNumberGenerator, options: &[&'a str]) -> &'a str {
    if options.is_empty() {
        return FALLBACK_LINE;
    }
    options[rng.range(0, options.len() as i32) as usize]
}

fn direction_key(direction: Direction) -> &'static str {
    match direction {
        Direction::North => "↑",
        Direction::South => "↓",
        Direction::East => "→",
        Direction::West => "←",
    }
}

fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::North => "Move Up",
        Direction::South => "Move Down",
        Direction::East => "Move Right",
        Direction::West => "Move Left",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::BuiltinContent;
    use crate::save::MemorySlots;

    fn grid_from(rows: &[&str]) -> Grid {
        let rows: Vec<Vec<RoomKind>> = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| match c {
                        '#' => RoomKind::Wall,
                        'D' => RoomKind::Demon,
                        '*' => RoomKind::Item,
                        'M' => RoomKind::Mirror,
                        'T' => RoomKind::Therapist,
                        'L' => RoomKind::LovedOne,
                        'S' => RoomKind::Stranger,
                        _ => RoomKind::Empty,
                    })
                    .collect()
            })
            .collect();
        Grid::from_rows(&rows).unwrap()
    }

    fn game_on(rows: &[&str]) -> Game {
        let config = GameConfig {
            ambient_event_chance: 0,
            ..GameConfig::default().with_seed(11)
        };
        let mut game = Game::new(
            config,
            Box::new(BuiltinContent::new()),
            Box::new(MemorySlots::new()),
        )
        .unwrap();
        game.start_journey().unwrap();
        game.grid = grid_from(rows);
        game
    }

    const OPEN_ROW: &str = ".....";

    #[test]
    fn phases_advance_once_per_threshold() {
        let mut game = game_on(&[OPEN_ROW; 5]);
        let mut phases = Vec::new();
        let mut regenerations = Vec::new();
        for hope in [0, 29, 30, 49, 50, 69, 70, 89, 90] {
            game.player.hope = hope;
            if let Some(change) = game.evaluate_progression().unwrap() {
                regenerations.push((hope, change.regenerated));
            }
            phases.push(game.phase);
        }
        assert_eq!(
            phases,
            vec![
                Phase::Initial,
                Phase::Initial,
                Phase::Struggle,
                Phase::Struggle,
                Phase::Insight,
                Phase::Insight,
                Phase::Growth,
                Phase::Growth,
                Phase::Resolution,
            ]
        );
        assert_eq!(
            regenerations,
            vec![(30, true), (50, true), (70, true), (90, false)]
        );
        assert!(matches!(game.mode(), Mode::Complete(_)));
    }

    #[test]
    fn big_jump_still_advances_one_phase() {
        let mut game = game_on(&[OPEN_ROW; 5]);
        game.player.hope = 95;
        game.evaluate_progression().unwrap();
        assert_eq!(game.phase, Phase::Struggle);
    }

    #[test]
    fn regeneration_keeps_the_player_on_open_ground() {
        let mut game = game_on(&[OPEN_ROW; 5]);
        game.player.position = Point::new(2, 2);
        game.player.hope = 30;
        game.evaluate_progression().unwrap();
        assert_eq!(game.grid.room_at(Point::new(2, 2)), Some(RoomKind::Empty));
        assert_eq!(game.grid.count_of(RoomKind::Item), 4);
        assert_eq!(game.grid.count_of(RoomKind::Wall), 4);
    }

    #[test]
    fn walls_block_without_touching_history() {
        let mut game = game_on(&[".#...", OPEN_ROW, OPEN_ROW, OPEN_ROW, OPEN_ROW]);
        game.handle(Command::Move(Direction::East)).unwrap();
        assert_eq!(game.player.position, ORIGIN);
        assert!(game.history.is_empty());
        assert_eq!(game.messages()[0], "You can't go that way");
        assert_eq!(game.turn, 1);
    }

    #[test]
    fn move_then_undo_returns_home() {
        let mut game = game_on(&[OPEN_ROW; 5]);
        game.handle(Command::Move(Direction::South)).unwrap();
        assert_eq!(game.player.position, Point::new(0, 1));
        game.handle(Command::Undo).unwrap();
        assert_eq!(game.player.position, ORIGIN);
        game.handle(Command::Undo).unwrap();
        assert_eq!(game.messages()[0], "No moves to undo.");
    }

    #[test]
    fn taking_an_item_clears_the_room() {
        let mut game = game_on(&[".*...", OPEN_ROW, OPEN_ROW, OPEN_ROW, OPEN_ROW]);
        game.handle(Command::Move(Direction::East)).unwrap();
        game.handle(Command::Take).unwrap();
        assert_eq!(game.player.inventory.len(), 1);
        let taken = game.content().item(&game.player.inventory[0].id).pickup_message;
        assert!(game.messages().iter().any(|line| line == taken));
        assert_eq!(game.milestones.items_collected, 1);
        assert_eq!(game.current_room(), RoomKind::Empty);
        game.handle(Command::Take).unwrap();
        assert_eq!(game.messages()[0], "There's nothing here to take");
    }

    #[test]
    fn entering_a_den_announces_a_presence() {
        let mut game = game_on(&[".D...", OPEN_ROW, OPEN_ROW, OPEN_ROW, OPEN_ROW]);
        game.handle(Command::Move(Direction::East)).unwrap();
        assert!(game.events.is_empty());
        assert!(game.messages()[0].starts_with("PRESENCE FELT"));
    }

    #[test]
    fn therapist_eases_burden_and_sharpens_clarity() {
        let mut game = game_on(&[".T...", OPEN_ROW, OPEN_ROW, OPEN_ROW, OPEN_ROW]);
        game.handle(Command::Move(Direction::East)).unwrap();
        game.handle(Command::Talk).unwrap();
        assert_eq!(game.player.hope, 15);
        assert_eq!(game.player.clarity, 3);
        assert_eq!(game.player.burden, 95);
        assert_eq!(game.milestones.npcs_visited, 1);
        assert_eq!(game.current_room(), RoomKind::Empty);
        assert_eq!(game.player.memories.latest().map(|m| m.hope_delta), Some(5));
    }

    #[test]
    fn mirror_stays_and_pays_out_every_visit() {
        let mut game = game_on(&[".M...", OPEN_ROW, OPEN_ROW, OPEN_ROW, OPEN_ROW]);
        game.handle(Command::Move(Direction::East)).unwrap();
        game.handle(Command::Mirror).unwrap();
        assert_eq!(game.player.hope, 15);
        assert_eq!(game.player.burden, 95);
        assert_eq!(game.current_room(), RoomKind::Mirror);
        game.handle(Command::Mirror).unwrap();
        assert_eq!(game.player.hope, 20);
        assert_eq!(game.player.burden, 90);
        assert_eq!(game.player.memories.len(), 2);
    }

    #[test]
    fn hint_points_toward_the_nearest_item() {
        let mut game = game_on(&[OPEN_ROW, OPEN_ROW, "..*..", OPEN_ROW, OPEN_ROW]);
        game.handle(Command::Hint).unwrap();
        assert_eq!(
            game.messages()[0],
            "The nearest light is 4 steps away. Head down."
        );
    }

    #[test]
    fn victory_clears_the_den() {
        let mut game = game_on(&[".D...", OPEN_ROW, OPEN_ROW, OPEN_ROW, OPEN_ROW]);
        game.player.hope = 12;
        game.player.strength = 100;
        game.handle(Command::Move(Direction::East)).unwrap();
        game.handle(Command::Face).unwrap();
        assert!(matches!(game.mode(), Mode::Battle { .. }));
        game.handle(Command::Select(7)).unwrap();
        assert!(matches!(game.mode(), Mode::Battle { .. }));
        game.handle(Command::Select(1)).unwrap();
        assert!(matches!(game.mode(), Mode::Exploring));
        assert_eq!(game.current_room(), RoomKind::Empty);
        assert_eq!(game.milestones.demons_faced, 1);
    }

    #[test]
    fn item_menu_pages_past_the_ninth_item() {
        use crate::data::items::{Item, ItemKind};

        let mut game = game_on(&[".D...", OPEN_ROW, OPEN_ROW, OPEN_ROW, OPEN_ROW]);
        game.player.hope = 25;
        for n in 1..=10 {
            game.player.inventory.push(Item {
                id: format!("token_{n}"),
                name: format!("Token {n}"),
                description: "A small keepsake.".to_string(),
                kind: ItemKind::Strength,
                value: 1,
            });
        }
        game.handle(Command::Move(Direction::East)).unwrap();
        game.handle(Command::Face).unwrap();
        game.handle(Command::Select(5)).unwrap();
        let keys: Vec<String> = game.available_actions().into_iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["1", "2", "3", "4", "5", "6", "7", "8", "9", "q"]);

        game.handle(Command::Select(9)).unwrap();
        let actions = game.available_actions();
        assert_eq!(actions[0], ("1".to_string(), "Token 9".to_string()));
        assert_eq!(actions[1], ("2".to_string(), "Token 10".to_string()));
        assert_eq!(actions.len(), 4);

        game.handle(Command::Select(3)).unwrap();
        assert_eq!(game.messages()[0], "Invalid choice");
        assert!(matches!(game.mode(), Mode::Battle { item_page: Some(1), .. }));

        game.handle(Command::Select(2)).unwrap();
        assert_eq!(game.player.inventory.len(), 9);
        assert!(game.player.inventory.iter().all(|item| item.name != "Token 10"));
    }

    #[test]
    fn defeat_leaves_the_demon_and_ends_the_session() {
        let mut game = game_on(&[".D...", OPEN_ROW, OPEN_ROW, OPEN_ROW, OPEN_ROW]);
        game.handle(Command::Move(Direction::East)).unwrap();
        game.player.hope = 1;
        game.handle(Command::Face).unwrap();
        assert_eq!(game.current_room(), RoomKind::Demon);
        assert_eq!(game.milestones.demons_faced, 0);
        assert!(matches!(game.mode(), Mode::GameOver));
    }

    #[test]
    fn restore_refuses_history_through_walls() {
        let mut game = game_on(&[OPEN_ROW, ".#...", OPEN_ROW, OPEN_ROW, OPEN_ROW]);
        game.handle(Command::Move(Direction::South)).unwrap();
        let mut snapshot = game.snapshot();
        snapshot.history.push((1, 1));
        let before = game.snapshot();

        assert!(matches!(game.restore(snapshot), Err(SaveError::Invalid(_))));
        assert_eq!(game.snapshot().history, before.history);
        game.handle(Command::Undo).unwrap();
        assert_eq!(game.player.position, ORIGIN);
    }

    #[test]
    fn save_then_load_restores_the_session() {
        let mut game = game_on(&[".*...", OPEN_ROW, OPEN_ROW, OPEN_ROW, OPEN_ROW]);
        game.handle(Command::Move(Direction::East)).unwrap();
        game.handle(Command::Take).unwrap();
        let saved_hope = game.player.hope;
        game.handle(Command::Save).unwrap();
        game.handle(Command::Select(2)).unwrap();
        assert!(matches!(game.mode(), Mode::Exploring));

        game.handle(Command::Move(Direction::East)).unwrap();
        game.player.hope = 3;
        game.handle(Command::Load).unwrap();
        game.handle(Command::Select(1)).unwrap();
        assert_eq!(game.messages()[0], "No saved journey in slot 1.");
        game.handle(Command::Select(2)).unwrap();

        assert!(matches!(game.mode(), Mode::Exploring));
        assert_eq!(game.player.hope, saved_hope);
        assert_eq!(game.player.position, Point::new(1, 0));
        assert_eq!(game.player.inventory.len(), 1);
        assert_eq!(game.history.peek(), Some(ORIGIN));
    }

    #[test]
    fn summary_tracks_hope_over_time() {
        let mut player = Player::default();
        player.remember("up", 5);
        player.remember("flat", 0);
        player.remember("down", -3);
        let summary = JourneySummary::new(&player, Milestones::default());
        assert_eq!(summary.hope_over_time, vec![10, 15, 12]);
    }
}
