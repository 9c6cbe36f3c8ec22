pub mod events;
pub mod history;
pub mod journal;

pub use events::{EventQueue, GameEvent, Priority, QueuedEvent};
pub use history::MoveHistory;
pub use journal::{MemoryLog, MemoryRecord};
