use crate::storage::{
    RECENT_SEARCHES_KEY, SESSION_ID_KEY, Storage, VOICE_ANALYTICS_KEY, VOICE_DEDUP_KEY,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared::util::{new_id, now_millis};

pub const MAX_RECENT_SEARCHES: usize = 5;
pub const MAX_VOICE_EVENTS: usize = 100;

// ============================================================================
// Recent searches
// ============================================================================

/// Newest-first list of distinct queries
pub struct SearchHistory {
    storage: Storage,
    entries: Mutex<Vec<String>>,
}

impl SearchHistory {
    pub fn load(storage: Storage) -> Self {
        let mut entries: Vec<String> = storage.load_or_default(RECENT_SEARCHES_KEY);
        entries.truncate(MAX_RECENT_SEARCHES);
        Self {
            storage,
            entries: Mutex::new(entries),
        }
    }

    pub fn record(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        let mut entries = self.entries.lock();
        entries.retain(|e| !e.eq_ignore_ascii_case(query));
        entries.insert(0, query.to_string());
        entries.truncate(MAX_RECENT_SEARCHES);
        if let Err(e) = self.storage.save(RECENT_SEARCHES_KEY, &*entries) {
            tracing::warn!(error = %e, "Failed to persist recent searches");
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
        if let Err(e) = self.storage.remove(RECENT_SEARCHES_KEY) {
            tracing::warn!(error = %e, "Failed to clear recent searches");
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// Browsing session id, kept in session storage
#[derive(Debug, Clone)]
pub struct SearchSession {
    id: String,
}

impl SearchSession {
    pub fn load_or_create(session: &Storage) -> Self {
        if let Ok(Some(id)) = session.load::<String>(SESSION_ID_KEY) {
            return Self { id };
        }
        let id = new_id();
        if let Err(e) = session.save(SESSION_ID_KEY, &id) {
            tracing::warn!(error = %e, "Failed to store session id");
        }
        Self { id }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

// ============================================================================
// Voice analytics
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSearchEvent {
    pub session_id: String,
    pub transcript: String,
    pub keywords: Vec<String>,
    pub result_count: u64,
    pub success: bool,
    pub timestamp: i64,
}

/// Capped voice search log
///
/// Each transcript is recorded once per session. Failures here are logged
/// and never surface to the user.
pub struct VoiceAnalytics {
    device: Storage,
    session_storage: Storage,
    session: SearchSession,
}

impl VoiceAnalytics {
    pub fn new(device: Storage, session_storage: Storage) -> Self {
        let session = SearchSession::load_or_create(&session_storage);
        Self {
            device,
            session_storage,
            session,
        }
    }

    pub fn session_id(&self) -> &str {
        self.session.id()
    }

    pub fn record(&self, transcript: &str, keywords: &[String], result_count: u64, success: bool) {
        let dedup_key = transcript.trim().to_lowercase();
        let mut seen: Vec<String> = self.session_storage.load_or_default(VOICE_DEDUP_KEY);
        if seen.contains(&dedup_key) {
            tracing::debug!(transcript, "Voice search already recorded this session");
            return;
        }

        let event = VoiceSearchEvent {
            session_id: self.session.id().to_string(),
            transcript: transcript.trim().to_string(),
            keywords: keywords.to_vec(),
            result_count,
            success,
            timestamp: now_millis(),
        };
        let mut events: Vec<VoiceSearchEvent> = self.device.load_or_default(VOICE_ANALYTICS_KEY);
        events.push(event);
        if events.len() > MAX_VOICE_EVENTS {
            let excess = events.len() - MAX_VOICE_EVENTS;
            events.drain(..excess);
        }
        if let Err(e) = self.device.save(VOICE_ANALYTICS_KEY, &events) {
            tracing::warn!(error = %e, "Failed to record voice search analytics");
            return;
        }

        seen.push(dedup_key);
        if let Err(e) = self.session_storage.save(VOICE_DEDUP_KEY, &seen) {
            tracing::warn!(error = %e, "Failed to store voice search dedup key");
        }
    }

    pub fn events(&self) -> Vec<VoiceSearchEvent> {
        self.device.load_or_default(VOICE_ANALYTICS_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_searches_dedup_and_cap() {
        let storage = Storage::in_memory();
        let history = SearchHistory::load(storage.clone());
        for q in ["suya", "amala", "jollof", "Suya", "shawarma", "pepper soup", "ewa agoyin"] {
            history.record(q);
        }
        assert_eq!(
            history.entries(),
            vec!["ewa agoyin", "pepper soup", "shawarma", "Suya", "jollof"]
        );
        assert_eq!(SearchHistory::load(storage).entries().len(), MAX_RECENT_SEARCHES);
    }

    #[test]
    fn test_blank_query_not_recorded() {
        let history = SearchHistory::load(Storage::in_memory());
        history.record("   ");
        assert!(history.entries().is_empty());
    }

    #[test]
    fn test_session_id_is_stable() {
        let session = Storage::in_memory();
        let first = SearchSession::load_or_create(&session);
        let second = SearchSession::load_or_create(&session);
        assert_eq!(first.id(), second.id());
    }

    #[test]
    fn test_voice_events_dedup_per_session_and_cap() {
        let device = Storage::in_memory();
        let analytics = VoiceAnalytics::new(device.clone(), Storage::in_memory());
        analytics.record("jollof rice", &["jollof".into()], 3, true);
        analytics.record("Jollof rice ", &["jollof".into()], 3, true);
        assert_eq!(analytics.events().len(), 1);

        for i in 0..120 {
            analytics.record(&format!("query {}", i), &[], 0, false);
        }
        let events = analytics.events();
        assert_eq!(events.len(), MAX_VOICE_EVENTS);
        assert_eq!(events[MAX_VOICE_EVENTS - 1].transcript, "query 119");

        // New session, same device: the transcript may be recorded again
        let next = VoiceAnalytics::new(device, Storage::in_memory());
        assert_ne!(next.session_id(), analytics.session_id());
        next.record("jollof rice", &[], 3, true);
        assert_eq!(next.events().len(), MAX_VOICE_EVENTS);
        assert_eq!(next.events()[MAX_VOICE_EVENTS - 1].transcript, "jollof rice");
    }
}
