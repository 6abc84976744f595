use crate::analysis::{AnalysisBackend, AnalysisError, HistoryEntry};
use std::collections::HashSet;
use tracing::{info, warn};

/// In-memory mirror of the backend's recording history.
///
/// The list is replaced wholesale on every successful refresh, so it never
/// diverges from server truth; a failed refresh leaves the previous (stale)
/// list in place. Persistence is entirely the backend's job.
#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    expanded: HashSet<usize>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-fetch the authoritative list. On failure the stale entries are
    /// retained and the error is returned for logging.
    pub async fn refresh(&mut self, backend: &dyn AnalysisBackend) -> Result<(), AnalysisError> {
        match backend.fetch_history().await {
            Ok(entries) => {
                self.replace(entries);
                Ok(())
            }
            Err(e) => {
                warn!("History refresh failed, keeping {} stale entries", self.entries.len());
                Err(e)
            }
        }
    }

    /// Replace the local list wholesale. Expanded-detail flags for indices
    /// past the new end are dropped.
    pub fn replace(&mut self, entries: Vec<HistoryEntry>) {
        info!("History replaced: {} entries", entries.len());
        self.expanded.retain(|&i| i < entries.len());
        self.entries = entries;
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flip the expanded/collapsed detail flag for one session. Purely
    /// local; out-of-range indices are ignored.
    pub fn toggle_detail(&mut self, index: usize) {
        if index >= self.entries.len() {
            return;
        }
        if !self.expanded.insert(index) {
            self.expanded.remove(&index);
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: &str) -> HistoryEntry {
        HistoryEntry {
            date: date.to_string(),
            summary: None,
            details: None,
            chart_data: None,
        }
    }

    #[test]
    fn replace_is_wholesale() {
        let mut store = HistoryStore::new();
        store.replace(vec![entry("2026-08-01"), entry("2026-08-02")]);
        assert_eq!(store.len(), 2);

        store.replace(vec![entry("2026-08-03")]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.entries()[0].date, "2026-08-03");
    }

    #[test]
    fn double_toggle_restores_original_state() {
        let mut store = HistoryStore::new();
        store.replace(vec![entry("2026-08-01")]);

        assert!(!store.is_expanded(0));
        store.toggle_detail(0);
        assert!(store.is_expanded(0));
        store.toggle_detail(0);
        assert!(!store.is_expanded(0));
    }

    #[test]
    fn toggle_past_the_end_is_ignored() {
        let mut store = HistoryStore::new();
        store.toggle_detail(7);
        assert!(!store.is_expanded(7));
    }

    #[test]
    fn shrinking_replace_drops_dangling_toggles() {
        let mut store = HistoryStore::new();
        store.replace(vec![entry("a"), entry("b"), entry("c")]);
        store.toggle_detail(2);

        store.replace(vec![entry("d")]);
        assert!(!store.is_expanded(2));
    }
}
