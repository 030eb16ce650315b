//! Business search panel
//!
//! Typed queries are debounced; each search takes a generation number and
//! only the newest search may publish results.

use super::history::{SearchHistory, VoiceAnalytics};
use super::keywords::KeywordStrategy;
use crate::error::SearchError;
use crate::notify::{Notification, Notifier};
use jara_client::{ClientError, SearchApi};
use parking_lot::Mutex;
use shared::models::{BusinessSearchQuery, BusinessSummary, SearchResponse};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub business_type: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub filters: SearchFilters,
    pub results: Vec<BusinessSummary>,
    pub total: u64,
    pub suggestions: Vec<String>,
    pub keywords: Vec<String>,
    pub is_searching: bool,
    pub error: Option<String>,
}

pub struct SearchPanel {
    api: Arc<dyn SearchApi>,
    strategy: Arc<dyn KeywordStrategy>,
    history: SearchHistory,
    analytics: VoiceAnalytics,
    notifier: Arc<dyn Notifier>,
    debounce: Duration,
    generation: AtomicU64,
    state: Mutex<SearchState>,
}

impl SearchPanel {
    pub fn new(
        api: Arc<dyn SearchApi>,
        strategy: Arc<dyn KeywordStrategy>,
        history: SearchHistory,
        analytics: VoiceAnalytics,
        notifier: Arc<dyn Notifier>,
        debounce: Duration,
    ) -> Self {
        Self {
            api,
            strategy,
            history,
            analytics,
            notifier,
            debounce,
            generation: AtomicU64::new(0),
            state: Mutex::new(SearchState::default()),
        }
    }

    pub fn state(&self) -> SearchState {
        self.state.lock().clone()
    }

    pub fn recent_searches(&self) -> Vec<String> {
        self.history.entries()
    }

    pub fn clear_recent_searches(&self) {
        self.history.clear();
    }

    pub fn set_filters(&self, filters: SearchFilters) {
        self.state.lock().filters = filters;
    }

    // ========== Text search ==========

    /// Debounced search as the user types
    ///
    /// Returns `None` when a newer keystroke superseded this one.
    pub async fn type_query(&self, text: &str) -> Option<Result<SearchResponse, SearchError>> {
        let generation = self.next_generation();
        {
            let mut state = self.state.lock();
            state.query = text.to_string();
            state.error = None;
            if text.trim().is_empty() {
                state.results.clear();
                state.suggestions.clear();
                state.keywords.clear();
                state.total = 0;
                state.is_searching = false;
                return None;
            }
        }

        tokio::time::sleep(self.debounce).await;
        if !self.is_current(generation) {
            return None;
        }
        self.run(generation, self.text_query(text), Vec::new()).await
    }

    /// Search immediately, e.g. on submit or when a recent search is picked
    pub async fn search_now(&self, text: &str) -> Result<SearchResponse, SearchError> {
        let generation = self.next_generation();
        self.state.lock().query = text.to_string();
        self.run(generation, self.text_query(text), Vec::new())
            .await
            .unwrap_or_else(|| Err(SearchError::Request("Search was superseded".into())))
    }

    fn text_query(&self, text: &str) -> BusinessSearchQuery {
        let filters = self.state.lock().filters.clone();
        BusinessSearchQuery {
            q: text.trim().to_string(),
            business_type: filters.business_type,
            city: filters.city,
            state: filters.state,
            ..Default::default()
        }
    }

    // ========== Voice search ==========

    /// Transcript → local keywords → backend-enhanced keywords → results
    pub async fn voice_search(&self, transcript: &str) -> Result<SearchResponse, SearchError> {
        let local = self.strategy.extract_local(transcript);
        if local.is_empty() {
            let err = SearchError::EmptyVoiceInput;
            self.report(&err);
            self.analytics.record(transcript, &[], 0, false);
            return Err(err);
        }

        let generation = self.next_generation();
        {
            let mut state = self.state.lock();
            state.query = local.join(" ");
            state.keywords = local.clone();
            state.is_searching = true;
            state.error = None;
        }

        let enhanced = match self.strategy.extract_remote(transcript, &local).await {
            Ok(enhanced) => enhanced,
            Err(e) => {
                tracing::warn!(error = %e, "Keyword enhancement failed, using local keywords");
                Default::default()
            }
        };
        let keywords = if enhanced.keywords.is_empty() {
            local
        } else {
            enhanced.keywords
        };

        let result = match enhanced.results {
            Some(response) => {
                if !self.is_current(generation) {
                    return Ok(response);
                }
                self.publish(generation, &keywords, Ok(response))
            }
            None => {
                let mut query = self.text_query(&keywords.join(" "));
                query.voice_search = true;
                query.original_query = Some(transcript.trim().to_string());
                query.keywords = keywords.clone();
                match self.run(generation, query, keywords.clone()).await {
                    Some(result) => result,
                    None => return Err(SearchError::Request("Search was superseded".into())),
                }
            }
        };

        match &result {
            Ok(response) => self.analytics.record(transcript, &keywords, response.total, true),
            Err(_) => self.analytics.record(transcript, &keywords, 0, false),
        }
        result
    }

    // ========== Internals ==========

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    async fn run(
        &self,
        generation: u64,
        query: BusinessSearchQuery,
        keywords: Vec<String>,
    ) -> Option<Result<SearchResponse, SearchError>> {
        self.state.lock().is_searching = true;
        tracing::debug!(q = %query.q, voice = query.voice_search, "Searching businesses");

        let result = self
            .api
            .search_businesses(&query)
            .await
            .map_err(|e| search_error(&e));
        if !self.is_current(generation) {
            tracing::debug!(generation, "Discarding stale search response");
            return None;
        }
        if result.is_ok() && !query.voice_search {
            self.history.record(&query.q);
        }
        Some(self.publish(generation, &keywords, result))
    }

    fn publish(
        &self,
        generation: u64,
        keywords: &[String],
        result: Result<SearchResponse, SearchError>,
    ) -> Result<SearchResponse, SearchError> {
        let mut state = self.state.lock();
        if !self.is_current(generation) {
            return result;
        }
        state.is_searching = false;
        match &result {
            Ok(response) => {
                state.results = response.businesses.clone();
                state.total = response.total;
                state.suggestions = response.suggestions.clone();
                state.keywords = keywords.to_vec();
                state.error = None;
            }
            Err(e) => {
                state.results.clear();
                state.total = 0;
                state.error = Some(e.to_string());
            }
        }
        drop(state);
        if let Err(e) = &result {
            self.report(e);
        }
        result
    }

    fn report(&self, error: &SearchError) {
        tracing::warn!(error = %error, "Search failed");
        self.notifier
            .notify(Notification::error(error.error_code(), error.to_string()));
    }
}

/// Distinct user-facing text per failure kind
fn search_error(error: &ClientError) -> SearchError {
    let message = match error {
        ClientError::Timeout => "Search is taking too long. Please try again".to_string(),
        ClientError::Network(_) => {
            "Can't reach the server. Please check your connection".to_string()
        }
        ClientError::RateLimited => "Too many searches. Please wait a moment".to_string(),
        ClientError::Http { status, .. } => {
            format!("Search failed (HTTP {}). Please try again", status)
        }
        other => other.user_message(),
    };
    SearchError::Request(message)
}
