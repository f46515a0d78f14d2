use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::types::{ErrorKind, SessionMetrics, SessionType};

/// The one record persisted per completed session, keyed by user. Coaching
/// and reporting replay this append-only log; raw attempts never outlive
/// their session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub session_id: String,
    pub session_type: SessionType,
    pub metrics: SessionMetrics,
    pub phoneme_errors: Vec<ErrorKind>,
    pub duration_minutes: f64,
    pub completed_at: DateTime<Utc>,
}

/// Boundary to the external persistence collaborator.
pub trait MetricsStore: Send + Sync {
    fn append(&self, user_id: &str, record: SessionRecord);

    /// Full history in completion order (oldest first).
    fn history(&self, user_id: &str) -> Vec<SessionRecord>;

    fn history_since(&self, user_id: &str, since: DateTime<Utc>) -> Vec<SessionRecord> {
        self.history(user_id)
            .into_iter()
            .filter(|record| record.completed_at >= since)
            .collect()
    }
}

#[derive(Default)]
pub struct InMemoryMetricsStore {
    records: RwLock<HashMap<String, Vec<SessionRecord>>>,
}

impl InMemoryMetricsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetricsStore for InMemoryMetricsStore {
    fn append(&self, user_id: &str, record: SessionRecord) {
        self.records
            .write()
            .entry(user_id.to_string())
            .or_default()
            .push(record);
    }

    fn history(&self, user_id: &str) -> Vec<SessionRecord> {
        self.records.read().get(user_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(id: &str, completed_at: DateTime<Utc>) -> SessionRecord {
        SessionRecord {
            session_id: id.to_string(),
            session_type: SessionType::Pronunciation,
            metrics: SessionMetrics::zeroed(),
            phoneme_errors: vec![],
            duration_minutes: 5.0,
            completed_at,
        }
    }

    #[test]
    fn test_history_preserves_append_order() {
        let store = InMemoryMetricsStore::new();
        let now = Utc::now();
        store.append("u1", record("a", now - Duration::days(2)));
        store.append("u1", record("b", now - Duration::days(1)));
        let history = store.history("u1");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].session_id, "a");
        assert_eq!(history[1].session_id, "b");
    }

    #[test]
    fn test_history_since_filters_window() {
        let store = InMemoryMetricsStore::new();
        let now = Utc::now();
        store.append("u1", record("old", now - Duration::days(10)));
        store.append("u1", record("recent", now - Duration::days(1)));
        let window = store.history_since("u1", now - Duration::days(7));
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].session_id, "recent");
    }

    #[test]
    fn test_unknown_user_is_empty() {
        let store = InMemoryMetricsStore::new();
        assert!(store.history("nobody").is_empty());
    }
}
