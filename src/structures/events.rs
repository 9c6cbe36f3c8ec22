use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Priority {
    pub fn level(self) -> u8 {
        self as u8
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    MemorySurface { text: String, hope_delta: i32 },
    DemonPresence { demon: String },
    InnerVoice { message: String },
    Encouragement { message: String, hope_delta: i32 },
}

impl GameEvent {
    pub fn title(&self) -> &'static str {
        match self {
            GameEvent::MemorySurface { .. } => "A MEMORY SURFACES",
            GameEvent::DemonPresence { .. } => "PRESENCE FELT",
            GameEvent::InnerVoice { .. } => "A VOICE WITHIN",
            GameEvent::Encouragement { .. } => "A MOMENT OF CLARITY",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueuedEvent {
    pub event: GameEvent,
    pub priority: Priority,
}

/// Sorted-insertion queue: lowest priority level first, FIFO within a level.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    entries: Vec<QueuedEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, event: GameEvent, priority: Priority) {
        let at = self
            .entries
            .iter()
            .position(|queued| queued.priority > priority)
            .unwrap_or(self.entries.len());
        self.entries.insert(at, QueuedEvent { event, priority });
    }

    pub fn dequeue(&mut self) -> Option<QueuedEvent> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0))
        }
    }

    pub fn peek(&self) -> Option<&QueuedEvent> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(message: &str) -> GameEvent {
        GameEvent::InnerVoice {
            message: message.to_string(),
        }
    }

    #[test]
    fn dequeues_by_priority_then_insertion() {
        let mut queue = EventQueue::new();
        queue.enqueue(voice("a"), Priority::Low);
        queue.enqueue(voice("b"), Priority::High);
        queue.enqueue(voice("c"), Priority::Medium);
        queue.enqueue(voice("d"), Priority::High);

        let drained: Vec<(u8, GameEvent)> = std::iter::from_fn(|| queue.dequeue())
            .map(|queued| (queued.priority.level(), queued.event))
            .collect();
        assert_eq!(
            drained,
            vec![
                (1, voice("b")),
                (1, voice("d")),
                (2, voice("c")),
                (3, voice("a")),
            ]
        );
    }

    #[test]
    fn peek_does_not_remove() {
        let mut queue = EventQueue::new();
        assert!(queue.peek().is_none());
        queue.enqueue(voice("x"), Priority::Medium);
        assert_eq!(queue.peek().map(|q| q.priority), Some(Priority::Medium));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn empty_queue_dequeues_none() {
        let mut queue = EventQueue::new();
        assert!(queue.dequeue().is_none());
    }
}
