use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub text: String,
    pub hope_delta: i32,
    pub recorded_at: DateTime<Utc>,
}

impl MemoryRecord {
    pub fn now<S: Into<String>>(text: S, hope_delta: i32) -> Self {
        Self {
            text: text.into(),
            hope_delta,
            recorded_at: Utc::now(),
        }
    }
}

/// Append-only journal; records are only handed out by reference.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryLog {
    records: Vec<MemoryRecord>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<MemoryRecord>) -> Self {
        Self { records }
    }

    pub fn append(&mut self, record: MemoryRecord) {
        self.records.push(record);
    }

    /// Up to `n` records, newest first.
    pub fn get_recent(&self, n: usize) -> Vec<&MemoryRecord> {
        self.records.iter().rev().take(n).collect()
    }

    pub fn latest(&self) -> Option<&MemoryRecord> {
        self.records.last()
    }

    pub fn find_by_keyword(&self, keyword: &str) -> Vec<&MemoryRecord> {
        let needle = keyword.to_lowercase();
        self.records
            .iter()
            .filter(|record| record.text.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn all(&self) -> &[MemoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryLog {
        let mut log = MemoryLog::new();
        log.append(MemoryRecord::now("A song that made you feel understood.", 2));
        log.append(MemoryRecord::now("You faced and overcame The Voice of Doubt.", 10));
        log.append(MemoryRecord::now("A SONG from a summer long ago.", 0));
        log
    }

    #[test]
    fn recent_is_newest_first_and_bounded() {
        let log = sample();
        let recent = log.get_recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].text, "A SONG from a summer long ago.");
        assert_eq!(recent[1].hope_delta, 10);
        assert_eq!(log.get_recent(10).len(), 3);
    }

    #[test]
    fn keyword_search_ignores_case_and_keeps_order() {
        let log = sample();
        let hits = log.find_by_keyword("song");
        assert_eq!(hits.len(), 2);
        assert!(hits[0].text.starts_with("A song"));
        assert!(hits[1].text.starts_with("A SONG"));
        assert!(log.find_by_keyword("ocean").is_empty());
    }

    #[test]
    fn all_preserves_insertion_order() {
        let log = sample();
        let deltas: Vec<i32> = log.all().iter().map(|r| r.hope_delta).collect();
        assert_eq!(deltas, vec![2, 10, 0]);
        assert_eq!(log.latest().map(|r| r.hope_delta), Some(0));
    }
}
