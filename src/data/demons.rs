#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemonAttack {
    pub name: String,
    pub damage: i32,
    pub message: String,
}

impl DemonAttack {
    pub fn new(name: &str, damage: i32, message: &str) -> Self {
        Self {
            name: name.to_string(),
            damage,
            message: message.to_string(),
        }
    }
}

/// Immutable description of an inner demon. Encounters copy from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemonTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub power: i32,
    pub attacks: Vec<DemonAttack>,
    pub defeat_message: String,
}

impl DemonTemplate {
    pub fn new(
        id: &str,
        name: &str,
        description: &str,
        power: i32,
        attacks: Vec<DemonAttack>,
        defeat_message: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            power,
            attacks,
            defeat_message: defeat_message.to_string(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.power > 0
            && !self.attacks.is_empty()
            && self.attacks.iter().all(|attack| attack.damage >= 0)
    }
}

pub const FALLBACK_DEMON: &str = "self-doubt";

pub fn builtin_demons() -> Vec<DemonTemplate> {
    vec![
        DemonTemplate::new(
            "self-doubt",
            "The Voice of Doubt",
            "A shadow wearing your face, whispering every fear you have about yourself.",
            15,
            vec![
                DemonAttack::new("whisper", 3, "It whispers your failures, each word a dagger."),
                DemonAttack::new(
                    "mirror",
                    5,
                    "It shows you distorted reflections of your worst moments.",
                ),
            ],
            "The Voice quiets. It will return, but weaker each time you face it.",
        ),
        DemonTemplate::new(
            "regret",
            "The Shadow of Regret",
            "A heavy presence that drags behind you, made of all the paths not taken.",
            20,
            vec![
                DemonAttack::new(
                    "replay",
                    4,
                    "It forces you to relive moments you wish you could change.",
                ),
                DemonAttack::new(
                    "weight",
                    6,
                    "The weight of what-ifs crushes down on your shoulders.",
                ),
            ],
            "The Shadow loosens its grip. The past remains, but it no longer owns you.",
        ),
        DemonTemplate::new(
            "anxiety",
            "The Storm of Tomorrow",
            "A swirling vortex of what-ifs and worst-case scenarios.",
            18,
            vec![
                DemonAttack::new(
                    "overwhelm",
                    4,
                    "A thousand terrible futures flash before your eyes.",
                ),
                DemonAttack::new(
                    "paralyze",
                    3,
                    "The possibilities freeze you in place, unable to move forward.",
                ),
            ],
            "The Storm calms. The future is uncertain, but you can face it.",
        ),
        DemonTemplate::new(
            "shame",
            "The Weight of Shame",
            "A heavy cloak that makes every step feel exposed.",
            25,
            vec![
                DemonAttack::new("expose", 5, "It reveals your flaws to an invisible crowd."),
                DemonAttack::new("judgment", 4, "It whispers that you'll never be enough."),
            ],
            "The cloak lifts. You are more than your mistakes.",
        ),
        DemonTemplate::new(
            "loneliness",
            "The Void of Isolation",
            "A cold emptiness that swallows all warmth.",
            22,
            vec![
                DemonAttack::new("silence", 4, "The silence reminds you no one is there."),
                DemonAttack::new("abandon", 5, "It tells you everyone leaves in the end."),
            ],
            "The void shrinks. Connection is possible, even now.",
        ),
        DemonTemplate::new(
            "perfectionism",
            "The Measure of Perfection",
            "A figure with a ruler and clipboard, judging your every move.",
            24,
            vec![
                DemonAttack::new(
                    "compare",
                    5,
                    "It shows you others who are doing better, achieving more.",
                ),
                DemonAttack::new(
                    "standard",
                    6,
                    "It raises the bar just as you reach it, making success impossible.",
                ),
            ],
            "The measuring stops. Good enough becomes possible.",
        ),
        DemonTemplate::new(
            "anger",
            "The Flame of Rage",
            "A burning figure that threatens to consume everything in its path.",
            23,
            vec![
                DemonAttack::new(
                    "burn",
                    6,
                    "It sets your thoughts ablaze, making rational thought impossible.",
                ),
                DemonAttack::new(
                    "fuel",
                    4,
                    "It feeds on every slight, every injustice, growing hotter.",
                ),
            ],
            "The flames recede to a controlled burn, warming rather than destroying.",
        ),
        DemonTemplate::new(
            "apathy",
            "The Gray Nothing",
            "A fog that drains color and feeling from everything it touches.",
            20,
            vec![
                DemonAttack::new(
                    "numb",
                    5,
                    "It dulls your senses, making joy and pain equally distant.",
                ),
                DemonAttack::new(
                    "drain",
                    4,
                    "It saps your motivation, making effort seem pointless.",
                ),
            ],
            "The fog thins. Feeling returns, painful but vital.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_demons_are_valid_and_unique() {
        let demons = builtin_demons();
        assert_eq!(demons.len(), 8);
        assert!(demons.iter().all(DemonTemplate::is_valid));
        let mut ids: Vec<&str> = demons.iter().map(|d| d.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8);
        assert!(ids.contains(&FALLBACK_DEMON));
    }
}
