use std::collections::VecDeque;

use chrono::Local;

/// Bounded record of recent account activity.
///
/// Holds at most [`MiniStatement::LIMIT`] timestamped entries; recording an
/// entry at capacity evicts the oldest one first. Entries leave the structure
/// only as owned copies, never as a live view.
#[derive(Debug, Clone, Default)]
pub struct MiniStatement {
    entries: VecDeque<String>,
}

impl MiniStatement {
    pub const LIMIT: usize = 10;

    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(Self::LIMIT),
        }
    }

    /// Prefixes a capture-time timestamp and appends, evicting the oldest
    /// entry once the bound is reached.
    pub fn record(&mut self, text: &str) {
        if self.entries.len() == Self::LIMIT {
            self.entries.pop_front();
        }

        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        self.entries.push_back(format!("{stamp} | {text}"));
    }

    /// Owned copy of the entries, oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
