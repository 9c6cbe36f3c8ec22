use serde::{Deserialize, Serialize};

/// Narrative stage. Advances one way only, driven by hope.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Initial,
    Struggle,
    Insight,
    Growth,
    Resolution,
}

pub const PHASES: [Phase; 5] = [
    Phase::Initial,
    Phase::Struggle,
    Phase::Insight,
    Phase::Growth,
    Phase::Resolution,
];

impl Phase {
    pub fn index(&self) -> usize {
        match self {
            Phase::Initial => 0,
            Phase::Struggle => 1,
            Phase::Insight => 2,
            Phase::Growth => 3,
            Phase::Resolution => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Initial => "Rock Bottom",
            Phase::Struggle => "Struggle",
            Phase::Insight => "Realization",
            Phase::Growth => "Growth",
            Phase::Resolution => "Glory",
        }
    }

    pub fn next(self) -> Option<Self> {
        PHASES.get(self.index() + 1).copied()
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }

    /// Hope needed to leave this phase.
    pub fn advance_threshold(&self) -> Option<i32> {
        match self {
            Phase::Initial => Some(30),
            Phase::Struggle => Some(50),
            Phase::Insight => Some(70),
            Phase::Growth => Some(90),
            Phase::Resolution => None,
        }
    }

    /// Demon power multiplier, in percent.
    pub fn demon_power_percent(&self) -> i32 {
        [100, 120, 140, 160, 180][self.index()]
    }

    /// Hope gained and burden shed after beating a demon.
    pub fn victory_reward(&self) -> (i32, i32) {
        [(10, 10), (12, 12), (15, 15), (18, 18), (20, 20)][self.index()]
    }

    /// Hope lost after retreating from a demon; later phases cost less.
    pub fn defeat_cost(&self) -> i32 {
        [5, 5, 4, 3, 2][self.index()]
    }

    pub fn npc_bonus(&self) -> i32 {
        [0, 2, 4, 6, 8][self.index()]
    }

    /// Hope gained and burden shed at the mirror.
    pub fn mirror_reward(&self) -> (i32, i32) {
        [(5, 5), (7, 7), (8, 10), (10, 12), (15, 15)][self.index()]
    }
}
