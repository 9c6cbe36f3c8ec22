use crate::game::Phase;
use crate::map::{NpcKind, RoomKind};

pub const INTRO: &str = "You don't remember how you got here. The last thing you recall is \
lying in bed, staring at the ceiling, wondering if tomorrow would be any different. It wasn't. \
And now you're here, in this place that feels both foreign and terrifyingly familiar.";

pub const HELP: &str = "Arrows move. l look, i inventory, t take, f face demon, k talk, \
x examine mirror, u undo, n nearest light, s save, o load, h help, q quit.";

pub const EPILOGUE: &str = "The dungeon fades. You wake up in your bed. The ceiling looks the \
same. But you don't. Tomorrow will come, and for the first time in so long, you're ready for it.";

pub const FALLBACK_LINE: &str = "The moment passes quietly, leaving something behind.";

pub const AMBIENT_MEMORIES: &[&str] = &[
    "A hand reaching out to help you up. You can't remember whose.",
    "The taste of your favorite meal. Someone made it just for you.",
    "A song that made you feel understood. The melody lingers.",
    "A place where you felt safe. It might still exist somewhere.",
    "Words someone said that made you feel seen. They meant it.",
    "A moment when you surprised yourself with your own strength.",
    "The first time you realized you could survive this darkness.",
    "A small act of kindness you once showed someone else.",
    "A time when you stood up for yourself, even though it was hard.",
    "A genuine smile that reached your eyes. It can happen again.",
];

pub const INNER_VOICES: &[&str] = &[
    "Keep going. This path has meaning.",
    "Every step is a choice to continue.",
    "The darkness isn't forever.",
    "You've survived every bad day so far.",
    "You are more than your darkest thoughts.",
    "Growth happens in these small moments.",
    "Healing isn't linear, but it is possible.",
    "Your story isn't over yet.",
];

pub const ENCOURAGEMENTS: &[&str] = &[
    "You're stronger than you know. Keep going.",
    "Every step forward is a victory, no matter how small.",
    "You've made it this far. That's something to be proud of.",
    "Healing isn't linear, but you're still making progress.",
    "Your journey matters. You matter.",
    "The darkness doesn't last forever. Hold on.",
    "Sometimes, survival itself is a triumph.",
    "You're doing the hardest work there is. Be gentle with yourself.",
];

pub fn demon_roster(phase: Phase) -> &'static [&'static str] {
    match phase {
        Phase::Initial | Phase::Struggle => {
            &["self-doubt", "regret", "anxiety", "shame", "loneliness"]
        }
        Phase::Insight => &["self-doubt", "regret", "anxiety", "perfectionism", "anger"],
        Phase::Growth => &["self-doubt", "regret", "perfectionism", "apathy", "anger"],
        Phase::Resolution => &["self-doubt", "shame", "apathy", "perfectionism", "anxiety"],
    }
}

pub fn phase_transition(phase: Phase) -> Option<&'static str> {
    let text = match phase {
        Phase::Initial => return None,
        Phase::Struggle => {
            "Something shifts. The weight is still there, crushing and real. But you're moving \
             despite it."
        }
        Phase::Insight => {
            "These walls aren't prison cells. They're parts of yourself. And parts can be healed."
        }
        Phase::Growth => {
            "The demons still speak, but their voices no longer drown out your own. You've found \
             yourself."
        }
        Phase::Resolution => {
            "You stand at the exit of the dungeon. Rock bottom isn't the end. It's a beginning."
        }
    };
    Some(text)
}

pub fn mirror_reflection(phase: Phase) -> &'static str {
    match phase {
        Phase::Initial => {
            "The reflection is hard to look at: a hunched figure bearing invisible weight. You \
             look anyway. That's courage."
        }
        Phase::Struggle => {
            "The mirror shows someone fighting. Battle-worn, exhausted, but standing."
        }
        Phase::Insight => {
            "The scars are still there, but they look less like wounds and more like a map."
        }
        Phase::Growth => {
            "The person in the mirror stands straighter and meets your gaze with steady clarity."
        }
        Phase::Resolution => {
            "Not perfect. But whole. You see yourself with compassion, and that changes \
             everything."
        }
    }
}

/// Phase-specific appearance and defeat lines; `None` falls back to the template.
pub fn demon_lines(phase: Phase, demon: &str) -> Option<(&'static str, &'static str)> {
    let lines = match (phase, demon) {
        (Phase::Initial, "self-doubt") => (
            "A figure emerges from the shadows. It looks exactly like you, but wrong. \"Why do \
             you even try?\" it whispers.",
            "The shadow dissipates, whispering \"I'll always be here.\" Maybe acknowledging the \
             doubt is the first step.",
        ),
        (Phase::Initial, "regret") => (
            "A specter forms from your memories, wearing the faces of everyone you've let down. \
             Including yourself.",
            "You can't change the past. But you're still here. Still capable of tomorrow.",
        ),
        (Phase::Initial, "anxiety") => (
            "A swirling storm of what-ifs surrounds you. \"You'll never be ready,\" it howls.",
            "Uncertainty doesn't have to mean catastrophe. It can also mean possibility.",
        ),
        (Phase::Initial, "shame") => (
            "A heavy cloak settles over you. \"They all see you for what you really are.\"",
            "The cloak lifts. Your flaws are real, but they don't define you.",
        ),
        (Phase::Initial, "loneliness") => (
            "A void opens before you, swallowing warmth. \"You're always alone,\" it whispers.",
            "The void shrinks. Even a single thread of connection is enough.",
        ),
        (Phase::Struggle, "self-doubt") => (
            "The shadow returns, but you expected it. \"This small progress means nothing.\" \
             You hear it as a voice now, not the truth.",
            "The shadow steps back, surprised. \"I'll be back.\" \"I know,\" you reply. \
             \"And I'll be ready.\"",
        ),
        (Phase::Struggle, "regret") => (
            "Old failures rise again. \"Look at all the time you've wasted.\" They are pieces \
             of your story, not the whole of it.",
            "The memories settle. Your past is not your future.",
        ),
        (Phase::Struggle, "anxiety") => (
            "The storm whirls faster, almost desperate. \"Think how far you'll fall if you dare \
             to hope!\"",
            "You stand in the center of the storm. You are learning to weather it.",
        ),
        (Phase::Struggle, "shame") => (
            "The cloak reaches for you again. \"Underneath, you're still broken.\" The weight \
             is familiar, and somehow bearable.",
            "You shrug it off. \"Yes, I am flawed.\" This time the admission doesn't crush you.",
        ),
        (Phase::Struggle, "loneliness") => (
            "The void is smaller now. \"In the end, everyone leaves.\"",
            "The void recedes. Some people stay, even when it's difficult.",
        ),
        (Phase::Insight, "self-doubt") => (
            "The shadow looks less like you, more like a caricature. \"Knowing makes no \
             difference.\" Its words sound rehearsed.",
            "It grows transparent. \"Sometimes you're right,\" you admit. \"Not always. I'm \
             learning the difference.\"",
        ),
        (Phase::Insight, "regret") => (
            "The memories return with their context: your youth, your fear. \"You should have \
             known better.\" Maybe you didn't.",
            "The specter turns to mist. You did the best you could with what you had.",
        ),
        (Phase::Insight, "anxiety") => (
            "You can see patterns in the storm now. \"But what if...\" \"What if things work \
             out?\" you interrupt.",
            "The storm grows predictable. You know its warning signs, and how to shelter.",
        ),
        (Phase::Insight, "perfectionism") => (
            "A figure with a ruler measures you coldly. \"Not nearly enough.\" The voice was \
             never yours.",
            "You snap the ruler in half. \"I define enough now.\"",
        ),
        (Phase::Insight, "anger") => (
            "A figure of flame rises. \"Why not burn it all down?\" The fire consumes the \
             wielder first.",
            "The flames gather into a torch. Anger is a tool now, not your master.",
        ),
        (Phase::Growth, "self-doubt") => (
            "The shadow is a wisp of what it was. \"You're still not good enough,\" it says, \
             out of habit.",
            "\"You kept me small to keep me safe. I don't need that kind of safety anymore.\"",
        ),
        (Phase::Growth, "regret") => (
            "You watch the memories from a distance. \"These moments defined you.\" \"They \
             shaped me. They don't confine me.\"",
            "\"Thank you,\" you tell them. Each mistake taught you something.",
        ),
        (Phase::Growth, "perfectionism") => (
            "The figure rebuilds its tools. \"Look how far you still have to go.\"",
            "\"Growth was the goal, not perfection. I'm not who I was. That's enough.\"",
        ),
        (Phase::Growth, "apathy") => (
            "A gray fog dulls everything. \"Wouldn't it be easier to stop caring?\"",
            "You walk through the fog. Feeling nothing hurts always. The fog parts.",
        ),
        (Phase::Growth, "anger") => (
            "The flame burns contained and focused. \"Don't let them take advantage of your \
             peace.\"",
            "You cup the flame in your hands. \"You have your place. Just not every place.\"",
        ),
        (Phase::Resolution, "self-doubt") => (
            "The shadow is a faint smudge. \"I'll never truly leave.\" \"I know. That's okay.\"",
            "You offer your hand and it takes it. \"You were protecting me. I can protect \
             myself now.\"",
        ),
        (Phase::Resolution, "shame") => (
            "The cloak is threadbare. \"You still have things to be ashamed of.\" \"Yes. I'm \
             still human.\"",
            "You fold the cloak away. Shame is a visitor now, not a resident.",
        ),
        (Phase::Resolution, "apathy") => (
            "The fog curls around your feet. \"Life will still hurt.\" \"It will. That's part \
             of being alive.\"",
            "The fog burns off. Whatever comes, you can face it.",
        ),
        (Phase::Resolution, "perfectionism") => (
            "The figure makes a last stand. \"Without me you'll become mediocre.\"",
            "\"Being without flaw was never possible. That's not complacency. That's \
             humanity.\"",
        ),
        (Phase::Resolution, "anxiety") => (
            "The storm is only a rain cloud now. \"What about the future?\" \"What about it?\"",
            "A gentle rain falls. Worry no longer stops you from living.",
        ),
        _ => return None,
    };
    Some(lines)
}

pub fn npc_greeting(npc: NpcKind) -> &'static str {
    match npc {
        NpcKind::Therapist => {
            "A figure sits nearby, calm and attentive. \"Would you like to talk about what you're \
             carrying?\""
        }
        NpcKind::LovedOne => {
            "Someone who knew you before the darkness waits ahead. \"I've been looking for you.\""
        }
        NpcKind::Stranger => {
            "A fellow traveler rests here, scars visible, eyes kind. \"Long road, isn't it?\""
        }
    }
}

pub fn npc_conversations(phase: Phase, npc: NpcKind) -> &'static [&'static str] {
    match (phase, npc) {
        (Phase::Initial | Phase::Struggle, NpcKind::Therapist) => &[
            "Right now, you're surviving. And that's enough for today.",
            "Depression lies. It says things will always feel this way. That isn't true.",
        ],
        (Phase::Initial | Phase::Struggle, NpcKind::LovedOne) => &[
            "You don't have to explain anything. I'm just glad you're here.",
            "I never stopped believing in you. Not once.",
        ],
        (Phase::Initial | Phase::Struggle, NpcKind::Stranger) => &[
            "I was where you are. It got better slowly, and then all at once.",
            "Nobody walks out of here alone. Take this bit of my strength.",
        ],
        (_, NpcKind::Therapist) => &[
            "Look at what you've done with the weight you carry. That's growth.",
            "You're learning to sit with the hard feelings instead of running. Notice that.",
        ],
        (_, NpcKind::LovedOne) => &[
            "I can see you again. The real you. Welcome back.",
            "Whatever comes next, we'll face it together.",
        ],
        (_, NpcKind::Stranger) => &[
            "You're further along than you think. I can see it in how you walk.",
            "Someday you'll be the one who tells a stranger it gets better.",
        ],
    }
}

pub const ORIGIN_ROOM_NAME: &str = "The Void of Beginning";

pub fn room_descriptions(room: RoomKind) -> &'static [&'static str] {
    match room {
        RoomKind::Wall => &["A solid wall blocks your path."],
        RoomKind::Empty => &[
            "The walls here whisper your failures.",
            "Empty. Like how you feel inside.",
            "The silence here is deafening.",
            "Shadows dance where memories once lived.",
        ],
        RoomKind::Memory => &["A fragment of your past glimmers here, painful but important."],
        RoomKind::Demon => {
            &["Something dark lurks here. A piece of yourself you've been running from."]
        }
        RoomKind::Item => &["A gentle warmth emanates from something in this room."],
        RoomKind::Mirror => &["A mirror stands before you. Do you dare look at yourself?"],
        RoomKind::Therapist => {
            &["Someone sits here patiently. Their presence feels safe, non-judgmental."]
        }
        RoomKind::LovedOne => {
            &["A familiar figure waits here. Someone who knows you, who cares for you."]
        }
        RoomKind::Stranger => {
            &["A fellow traveler rests here. Someone who understands the journey."]
        }
    }
}

/// Closer detail and the key that acts on it, for rooms that hold something.
pub fn room_insight(room: RoomKind) -> Option<(&'static str, &'static str)> {
    let insight = match room {
        RoomKind::Demon => (
            "You sense a presence here. Something you've been avoiding.",
            "Press 'f' to face it",
        ),
        RoomKind::Item => (
            "There's something here that might help you.",
            "Press 't' to take it",
        ),
        RoomKind::Mirror => (
            "The mirror reflects more than just your appearance.",
            "Press 'x' to examine it",
        ),
        RoomKind::Therapist => (
            "Someone waits patiently, offering a safe space to talk.",
            "Press 'k' to talk to them",
        ),
        RoomKind::LovedOne => (
            "A familiar presence. Someone who knows and accepts you.",
            "Press 'k' to connect with them",
        ),
        RoomKind::Stranger => (
            "A fellow traveler on their own journey. There's understanding in their eyes.",
            "Press 'k' to share experiences",
        ),
        RoomKind::Wall | RoomKind::Empty | RoomKind::Memory => return None,
    };
    Some(insight)
}
