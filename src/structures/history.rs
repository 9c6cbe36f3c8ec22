use std::collections::VecDeque;

use bracket_geometry::prelude::Point;

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Undo stack of previous positions. Once full, the oldest entry is dropped
/// to make room for the newest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveHistory {
    entries: VecDeque<Point>,
    capacity: usize,
}

impl Default for MoveHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl MoveHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, position: Point) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(position);
    }

    pub fn undo(&mut self) -> Option<Point> {
        self.entries.pop_back()
    }

    pub fn peek(&self) -> Option<Point> {
        self.entries.back().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_when_full() {
        let mut history = MoveHistory::default();
        for step in 0..=DEFAULT_HISTORY_CAPACITY as i32 {
            history.record(Point::new(step, 0));
        }
        assert_eq!(history.len(), DEFAULT_HISTORY_CAPACITY);
        assert_eq!(history.iter().next(), Some(&Point::new(1, 0)));
        assert_eq!(history.peek(), Some(Point::new(10, 0)));
    }

    #[test]
    fn undo_pops_most_recent() {
        let mut history = MoveHistory::with_capacity(3);
        history.record(Point::new(0, 0));
        history.record(Point::new(1, 0));
        assert_eq!(history.undo(), Some(Point::new(1, 0)));
        assert_eq!(history.undo(), Some(Point::new(0, 0)));
        assert_eq!(history.undo(), None);
        assert!(history.is_empty());
    }

    #[test]
    fn zero_capacity_still_keeps_latest() {
        let mut history = MoveHistory::with_capacity(0);
        history.record(Point::new(2, 2));
        history.record(Point::new(3, 2));
        assert_eq!(history.len(), 1);
        assert_eq!(history.undo(), Some(Point::new(3, 2)));
    }
}
