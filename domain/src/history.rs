use std::collections::VecDeque;

use crate::fortune::FortuneRecord;

pub const HISTORY_LIMIT: usize = 50;

/// Bounded log of completed rounds, most recent first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryLedger {
    records: VecDeque<FortuneRecord>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a ledger from most-recent-first records, keeping the newest 50.
    pub fn from_records(records: Vec<FortuneRecord>) -> Self {
        let mut records: VecDeque<FortuneRecord> = records.into();
        records.truncate(HISTORY_LIMIT);
        Self { records }
    }

    pub fn append(&mut self, record: FortuneRecord) {
        self.records.push_front(record);
        self.records.truncate(HISTORY_LIMIT);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn all(&self) -> impl ExactSizeIterator<Item = &FortuneRecord> + '_ {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&FortuneRecord> {
        self.records.front()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_vec(&self) -> Vec<FortuneRecord> {
        self.records.iter().cloned().collect()
    }
}
