// Bounded most-recent-first list of assessments, owned by the caller

use std::collections::VecDeque;

use crate::app_config::{config, DEFAULT_HISTORY_CAPACITY};
use crate::models::Assessment;

#[derive(Debug, Clone)]
pub struct CheckHistory {
    entries: VecDeque<Assessment>,
    capacity: usize,
}

impl Default for CheckHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl CheckHistory {
    /// A capacity of 0 is raised to 1
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Capacity taken from `SCAMGUARD_HISTORY_CAPACITY`
    pub fn from_config() -> Self {
        Self::with_capacity(config().history_capacity)
    }

    /// Prepend an assessment, dropping the oldest beyond capacity
    pub fn record(&mut self, assessment: Assessment) {
        self.entries.push_front(assessment);
        self.entries.truncate(self.capacity);
    }

    /// Most recent first
    pub fn iter(&self) -> impl Iterator<Item = &Assessment> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&Assessment> {
        self.entries.front()
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

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
