use crate::classifier::Verdict;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// One completed analysis. Never modified after it is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub input_text: String,
    pub verdict: Verdict,
    pub reasons: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Session log of classifications, most recent first.
///
/// Unbounded by default. With a capacity the oldest entry is dropped once the
/// log is full. A capacity of zero means unbounded, so a recorded entry is
/// always visible.
#[derive(Debug, Default)]
pub struct History {
    entries: Mutex<VecDeque<Classification>>,
    capacity: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: Option<usize>) -> Self {
        if capacity == Some(0) {
            log::warn!("History capacity of 0 ignored, keeping an unbounded log");
        }
        Self {
            entries: Mutex::new(VecDeque::new()),
            capacity: capacity.filter(|&c| c > 0),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Classification>> {
        // Entries are pushed whole; a poisoned lock still guards consistent data.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Timestamp the classification with the current time and put it first.
    pub fn record(&self, input_text: &str, verdict: Verdict, reasons: &[String]) {
        let entry = Classification {
            input_text: input_text.to_string(),
            verdict,
            reasons: reasons.to_vec(),
            timestamp: Utc::now(),
        };

        let mut entries = self.lock();
        entries.push_front(entry);
        if let Some(capacity) = self.capacity {
            while entries.len() > capacity {
                entries.pop_back();
            }
        }
        log::debug!("Recorded {} classification ({} in history)", verdict, entries.len());
    }

    /// Snapshot of all entries, most recent first.
    pub fn entries(&self) -> Vec<Classification> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
