//! In-process memory state behind the `/api/memory` routes.
//!
//! The store holds the memory toggle and a conversation list. Nothing in the
//! server records conversations, so the list stays empty; `clear` and the
//! conversation listing operate on it anyway so the routes behave as
//! documented once something starts appending.
//!
//! One [`MemoryStore`] lives in [`crate::AppState`]. Concurrent toggles are
//! last-write-wins.

use crate::types::ConversationEntry;
use crate::utils::time::iso_timestamp;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shown by the status route when nothing has toggled or cleared memory yet.
pub const NEVER_UPDATED: &str = "Never";

#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    #[error("memory state lock poisoned by a panicked writer")]
    Poisoned,
}

#[derive(Debug, Clone, Default)]
struct MemoryState {
    enabled: bool,
    conversations: Vec<ConversationEntry>,
    last_updated: Option<String>,
    total_interactions: u64,
}

/// Point-in-time copy of the memory state.
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySnapshot {
    pub enabled: bool,
    pub memory_size: usize,
    pub last_updated: Option<String>,
    pub total_interactions: u64,
}

impl MemorySnapshot {
    pub fn last_updated_or_never(&self) -> String {
        self.last_updated
            .clone()
            .unwrap_or_else(|| NEVER_UPDATED.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecentConversations {
    pub entries: Vec<ConversationEntry>,
    pub total: usize,
    pub enabled: bool,
}

#[derive(Debug)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MemoryStore {
    pub fn new(enabled: bool) -> Self {
        Self {
            state: RwLock::new(MemoryState {
                enabled,
                ..MemoryState::default()
            }),
        }
    }

    /// Sets the memory flag. Returns the new `last_updated` stamp.
    ///
    /// Unlike the other operations this refuses to write through a poisoned
    /// lock, so the caller can report the fault.
    pub fn toggle(&self, enabled: bool) -> Result<String, MemoryError> {
        let mut state = self.state.write().map_err(|_| MemoryError::Poisoned)?;
        let stamp = iso_timestamp();
        state.enabled = enabled;
        state.last_updated = Some(stamp.clone());
        Ok(stamp)
    }

    pub fn is_enabled(&self) -> bool {
        self.read().enabled
    }

    pub fn snapshot(&self) -> MemorySnapshot {
        let state = self.read();
        MemorySnapshot {
            enabled: state.enabled,
            memory_size: state.conversations.len(),
            last_updated: state.last_updated.clone(),
            total_interactions: state.total_interactions,
        }
    }

    /// Drops all conversations and resets the interaction counter.
    pub fn clear(&self) -> String {
        let mut state = self.write();
        let stamp = iso_timestamp();
        state.conversations.clear();
        state.total_interactions = 0;
        state.last_updated = Some(stamp.clone());
        stamp
    }

    /// Conversations selected like the tail slice `[-limit:]`, oldest first.
    ///
    /// `limit > 0` keeps the last `limit` entries, `0` keeps all of them and
    /// `limit < 0` drops the first `|limit|` entries.
    pub fn recent(&self, limit: i64) -> RecentConversations {
        let state = self.read();
        let total = state.conversations.len();
        let magnitude = usize::try_from(limit.unsigned_abs()).unwrap_or(usize::MAX);
        let skip = match limit.signum() {
            1 => total.saturating_sub(magnitude),
            -1 => magnitude.min(total),
            _ => 0,
        };
        RecentConversations {
            entries: state.conversations[skip..].to_vec(),
            total,
            enabled: state.enabled,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, MemoryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
impl MemoryStore {
    /// Panics on another thread while holding the write lock.
    pub(crate) fn poison(self: &std::sync::Arc<Self>) {
        let store = std::sync::Arc::clone(self);
        let _ = std::thread::spawn(move || {
            let _guard = store.state.write().unwrap();
            panic!("poison the memory lock");
        })
        .join();
    }
}

/// Human-readable confirmation for a toggle.
pub fn toggle_message(enabled: bool) -> String {
    if enabled {
        "Memory has been enabled successfully. I will now remember our conversations and learn from them.".to_string()
    } else {
        "Memory has been disabled successfully. I will not retain information from our conversations.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn entry(n: usize) -> ConversationEntry {
        ConversationEntry {
            user_message: format!("question {n}"),
            reply: format!("answer {n}"),
            timestamp: "2024-05-01T00:00:00.000000".to_string(),
        }
    }

    fn store_with_entries(n: usize) -> MemoryStore {
        let store = MemoryStore::default();
        store.write().conversations = (0..n).map(entry).collect();
        store
    }

    #[test]
    fn test_new_store_state() {
        let snapshot = MemoryStore::default().snapshot();
        assert!(snapshot.enabled);
        assert_eq!(snapshot.memory_size, 0);
        assert_eq!(snapshot.last_updated, None);
        assert_eq!(snapshot.last_updated_or_never(), "Never");
        assert_eq!(snapshot.total_interactions, 0);

        assert!(!MemoryStore::new(false).is_enabled());
    }

    #[test]
    fn test_toggle_updates_flag_and_stamp() {
        let store = MemoryStore::default();

        let stamp = store.toggle(false).unwrap();
        let snapshot = store.snapshot();
        assert!(!snapshot.enabled);
        assert_eq!(snapshot.last_updated.as_deref(), Some(stamp.as_str()));

        store.toggle(true).unwrap();
        assert!(store.is_enabled());
    }

    #[test]
    fn test_clear_resets_state() {
        let store = store_with_entries(3);
        store.write().total_interactions = 7;

        store.clear();
        let snapshot = store.snapshot();
        assert_eq!(snapshot.memory_size, 0);
        assert_eq!(snapshot.total_interactions, 0);
        assert!(snapshot.last_updated.is_some());
    }

    #[test]
    fn test_recent_on_empty_store() {
        let recent = MemoryStore::default().recent(10);
        assert!(recent.entries.is_empty());
        assert_eq!(recent.total, 0);
        assert!(recent.enabled);
    }

    #[test]
    fn test_recent_returns_tail() {
        let store = store_with_entries(5);

        let recent = store.recent(2);
        assert_eq!(recent.total, 5);
        assert_eq!(recent.entries, vec![entry(3), entry(4)]);

        assert_eq!(store.recent(50).entries.len(), 5);
        assert_eq!(store.recent(0).entries.len(), 5);
    }

    #[test]
    fn test_recent_negative_limit_skips_oldest() {
        let store = store_with_entries(5);

        let recent = store.recent(-2);
        assert_eq!(recent.total, 5);
        assert_eq!(recent.entries, vec![entry(2), entry(3), entry(4)]);

        assert!(store.recent(-5).entries.is_empty());
        assert!(store.recent(-50).entries.is_empty());
        assert!(store.recent(i64::MIN).entries.is_empty());
        assert_eq!(store.recent(i64::MAX).entries.len(), 5);
        assert!(MemoryStore::default().recent(-1).entries.is_empty());
    }

    #[test]
    fn test_toggle_fails_on_poisoned_lock() {
        let store = Arc::new(MemoryStore::default());
        store.poison();

        assert!(matches!(store.toggle(false), Err(MemoryError::Poisoned)));

        // Reads and clears still go through.
        assert!(store.snapshot().enabled);
        store.clear();
        assert_eq!(store.snapshot().memory_size, 0);
    }

    #[test]
    fn test_toggle_messages() {
        assert!(toggle_message(true).contains("enabled successfully"));
        assert!(toggle_message(true).contains("remember our conversations"));
        assert!(toggle_message(false).contains("disabled successfully"));
        assert!(toggle_message(false).contains("not retain"));
    }
}
