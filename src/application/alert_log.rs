use crate::domain::entities::alert_record::AlertRecord;
use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 100;

/// Bounded, newest-first log of alerts. Insertion order is authoritative:
/// records arrive already time-ordered from the feed and the log never
/// re-sorts on ingest. Capacity is the only eviction trigger.
#[derive(Debug, Clone)]
pub struct AlertLog {
    records: VecDeque<AlertRecord>,
    capacity: usize,
}

impl AlertLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity: capacity.max(1),
        }
    }

    /// Ingest one alert. A record with a known id replaces the stored one
    /// in place (feeds redeliver); otherwise the record is prepended and
    /// the oldest record is evicted once the log is over capacity.
    pub fn ingest(&mut self, record: AlertRecord) {
        if let Some(existing) = self.records.iter_mut().find(|r| r.id == record.id) {
            *existing = record;
            return;
        }
        self.records.push_front(record);
        while self.records.len() > self.capacity {
            self.records.pop_back();
        }
    }

    /// Replace the whole log with an initial snapshot, sorted newest-first
    /// and truncated to capacity.
    pub fn bulk_load(&mut self, mut records: Vec<AlertRecord>) {
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records.truncate(self.capacity);
        self.records = records.into();
    }

    /// Read-only copy of the current sequence, newest first.
    pub fn snapshot(&self) -> Vec<AlertRecord> {
        self.records.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for AlertLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
