//! Turn-based confrontation with an inner demon.
//!
//! A battle opens in [`BattleState::Appearance`]. [`Battle::open`] lets the
//! demon strike first; after that every [`Battle::respond`] applies one player
//! strategy and, if the demon still stands, its counter-attack. Defeat is
//! checked right after each demon attack, before the player may act.

use bracket_geometry::prelude::Point;
use bracket_random::prelude::RandomNumberGenerator;
use log::debug;

use crate::data::demons::{DemonAttack, DemonTemplate};
use crate::data::items::ItemKind;
use crate::game::{Phase, Player};

pub const RECALL_BONUS: i32 = 5;
pub const ACCEPT_DAMAGE: i32 = 10;
pub const ACCEPT_BURDEN_RELIEF: i32 = 5;
pub const WITHDRAW_HOPE_COST: i32 = 5;
pub const WITHDRAW_CLARITY_GAIN: i32 = 3;
pub const WITHDRAW_DAMAGE: i32 = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    Resist,
    Recall,
    Accept,
    Withdraw,
    UseItem(usize),
}

impl Strategy {
    pub const MENU: [(&'static str, &'static str); 5] = [
        ("1", "Stand firm - use strength to resist"),
        ("2", "Use memories - recall past strength"),
        ("3", "Accept truth - acknowledge reality"),
        ("4", "Retreat inward - lose hope, gain clarity"),
        ("5", "Use item"),
    ];
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BattleState {
    Appearance,
    PlayerTurn,
    Victory,
    Defeat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

/// A demon as met in one encounter; its template stays untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemonInstance {
    pub id: String,
    pub name: String,
    pub power: i32,
    pub starting_power: i32,
    pub attacks: Vec<DemonAttack>,
    pub defeat_message: String,
}

impl DemonInstance {
    pub fn from_template(template: &DemonTemplate, phase: Phase) -> Self {
        let power = template.power * phase.demon_power_percent() / 100;
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            power,
            starting_power: power,
            attacks: template.attacks.clone(),
            defeat_message: template.defeat_message.clone(),
        }
    }
}

/// Chooses the player's move when a battle runs without interactive input.
pub trait StrategyPicker {
    fn pick(&mut self, battle: &Battle, player: &Player) -> Strategy;
}

impl<F> StrategyPicker for F
where
    F: FnMut(&Battle, &Player) -> Strategy,
{
    fn pick(&mut self, battle: &Battle, player: &Player) -> Strategy {
        self(battle, player)
    }
}

#[derive(Clone, Debug)]
pub struct Battle {
    pub demon: DemonInstance,
    pub phase: Phase,
    /// Grid cell the demon was met in.
    pub origin: Point,
    pub state: BattleState,
    pub player_turns: u32,
}

impl Battle {
    pub fn begin(template: &DemonTemplate, phase: Phase, origin: Point) -> Self {
        let demon = DemonInstance::from_template(template, phase);
        debug!(
            "battle begins: {} (power {}) in {:?}",
            demon.name, demon.power, phase
        );
        Self {
            demon,
            phase,
            origin,
            state: BattleState::Appearance,
            player_turns: 0,
        }
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.state {
            BattleState::Victory => Some(BattleOutcome::Victory),
            BattleState::Defeat => Some(BattleOutcome::Defeat),
            BattleState::Appearance | BattleState::PlayerTurn => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Leaves the appearance state with the demon's first attack.
    pub fn open(&mut self, player: &mut Player, rng: &mut RandomNumberGenerator) -> Vec<String> {
        if self.state != BattleState::Appearance {
            return Vec::new();
        }
        self.demon_attack(player, rng)
    }

    pub fn respond(
        &mut self,
        strategy: Strategy,
        player: &mut Player,
        rng: &mut RandomNumberGenerator,
    ) -> Vec<String> {
        if self.state != BattleState::PlayerTurn {
            return Vec::new();
        }
        self.player_turns += 1;
        let mut log = self.apply_strategy(strategy, player);
        if self.demon.power <= 0 {
            self.state = BattleState::Victory;
            debug!("battle won after {} turns", self.player_turns);
            return log;
        }
        log.extend(self.demon_attack(player, rng));
        log
    }

    /// Plays the battle to the end, asking `picker` for every player move.
    pub fn run<P: StrategyPicker>(
        &mut self,
        player: &mut Player,
        rng: &mut RandomNumberGenerator,
        picker: &mut P,
    ) -> (BattleOutcome, Vec<String>) {
        let mut log = self.open(player, rng);
        loop {
            if let Some(outcome) = self.outcome() {
                return (outcome, log);
            }
            let strategy = picker.pick(self, player);
            log.extend(self.respond(strategy, player, rng));
        }
    }

    fn demon_attack(&mut self, player: &mut Player, rng: &mut RandomNumberGenerator) -> Vec<String> {
        let mut log = Vec::new();
        if !self.demon.attacks.is_empty() {
            let idx = rng.range(0, self.demon.attacks.len() as i32) as usize;
            let attack = &self.demon.attacks[idx];
            player.lose_hope(attack.damage);
            log.push(attack.message.clone());
            log.push(format!("You lost {} hope", attack.damage));
        }
        self.state = if player.is_broken() {
            BattleState::Defeat
        } else {
            BattleState::PlayerTurn
        };
        log
    }

    fn apply_strategy(&mut self, strategy: Strategy, player: &mut Player) -> Vec<String> {
        let name = self.demon.name.clone();
        match strategy {
            Strategy::Resist => {
                let damage = player.strength.max(1);
                self.demon.power -= damage;
                vec![
                    format!("You stand your ground, drawing on your strength. {name} weakens."),
                    format!("Demon power reduced by {damage}"),
                ]
            }
            Strategy::Recall => {
                let damage = (player.clarity + RECALL_BONUS).max(1);
                self.demon.power -= damage;
                let recollection = match player.memories.latest() {
                    Some(memory) => format!("You recall: {}", memory.text),
                    None => "You try to recall something, anything, but the fog is too thick."
                        .to_string(),
                };
                vec![recollection, format!("Demon power reduced by {damage}")]
            }
            Strategy::Accept => {
                self.demon.power -= ACCEPT_DAMAGE;
                player.ease_burden(ACCEPT_BURDEN_RELIEF);
                vec![
                    format!("You nod, accepting the painful truth in {name}'s words."),
                    format!(
                        "Demon power reduced by {ACCEPT_DAMAGE}, burden decreased by {ACCEPT_BURDEN_RELIEF}"
                    ),
                ]
            }
            Strategy::Withdraw => {
                player.lose_hope(WITHDRAW_HOPE_COST);
                player.clarity += WITHDRAW_CLARITY_GAIN;
                self.demon.power -= WITHDRAW_DAMAGE;
                vec![
                    "You turn inward, shielding yourself but losing some light.".to_string(),
                    format!(
                        "Lost {WITHDRAW_HOPE_COST} hope, gained {WITHDRAW_CLARITY_GAIN} clarity, demon power reduced by {WITHDRAW_DAMAGE}"
                    ),
                ]
            }
            Strategy::UseItem(slot) => {
                if player.inventory.is_empty() {
                    return vec!["You have no items to use.".to_string()];
                }
                let Some(item) = player.take_from_inventory(slot) else {
                    return vec!["Invalid choice".to_string()];
                };
                if item.kind == ItemKind::Hope {
                    let restored = item.value / 2;
                    player.gain_hope(restored);
                    vec![
                        format!("Using {} restores your hope.", item.name),
                        format!("Hope increased by {restored}"),
                    ]
                } else {
                    self.demon.power -= item.value;
                    vec![
                        format!("You wield {} against {name}.", item.name),
                        format!("Demon power reduced by {}", item.value),
                    ]
                }
            }
        }
    }
}

/// Applies the stat consequences of a finished battle to the player.
///
/// Grid cleanup and milestone counting belong to the caller: only a victory
/// clears the demon's room.
pub fn settle(battle: &Battle, outcome: BattleOutcome, player: &mut Player) -> Vec<String> {
    match outcome {
        BattleOutcome::Victory => {
            let (hope, burden) = battle.phase.victory_reward();
            player.gain_hope(hope);
            player.ease_burden(burden);
            player.remember(format!("You faced and overcame {}.", battle.demon.name), hope);
            vec![
                battle.demon.defeat_message.clone(),
                format!("Hope increased by {hope}, burden decreased by {burden}"),
            ]
        }
        BattleOutcome::Defeat => {
            let cost = battle.phase.defeat_cost();
            player.lose_hope(cost);
            player.remember(
                format!("You fled from {}, but it lingers.", battle.demon.name),
                -cost,
            );
            vec![
                format!("{} overwhelms you.", battle.demon.name),
                "Sometimes, survival is victory enough.".to_string(),
                format!("Hope decreased by {cost}"),
            ]
        }
    }
}
