//! In-memory feedback log for development and testing.
//!
//! Uses `RwLock::unwrap()` intentionally. Lock poisoning only occurs when
//! another thread panicked while holding the lock, which is an unrecoverable
//! state. For anything that must survive a restart, use the CSV log.

use footflow_core::error::Result;
use footflow_core::models::FeedbackEntry;
use footflow_core::ports::FeedbackLog;
use std::sync::{Arc, RwLock};

/// In-memory implementation of FeedbackLog
#[derive(Debug, Clone, Default)]
pub struct MemoryFeedbackLog {
    entries: Arc<RwLock<Vec<FeedbackEntry>>>,
}

impl MemoryFeedbackLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FeedbackLog for MemoryFeedbackLog {
    fn append(&self, entry: &FeedbackEntry) -> Result<()> {
        self.entries.write().unwrap().push(entry.clone());
        Ok(())
    }

    fn entries(&self) -> Result<Vec<FeedbackEntry>> {
        Ok(self.entries.read().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_read_back() {
        let log = MemoryFeedbackLog::new();
        let entry = FeedbackEntry {
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            comments: "ok".to_string(),
        };

        log.append(&entry).unwrap();
        log.append(&entry).unwrap();

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries().unwrap()[1], entry);
    }

    #[test]
    fn test_clones_share_entries() {
        let log = MemoryFeedbackLog::new();
        let shared = log.clone();
        shared
            .append(&FeedbackEntry {
                name: "B".to_string(),
                email: "b@c.com".to_string(),
                comments: "missing stop".to_string(),
            })
            .unwrap();

        assert!(!log.is_empty());
    }
}
