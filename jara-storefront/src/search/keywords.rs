//! Keyword extraction for voice search
//!
//! Two tiers: a local stop-word filter that always works offline, and a
//! backend pass whose `voiceSearch` echo may refine the keywords.

use crate::error::SearchError;
use async_trait::async_trait;
use jara_client::SearchApi;
use shared::models::{BusinessSearchQuery, SearchResponse};
use std::sync::Arc;

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "any", "around", "buy", "can", "close", "could", "find", "for", "from",
    "get", "give", "i", "i'd", "i'm", "in", "is", "it", "like", "looking", "me", "my", "near",
    "nearby", "need", "of", "on", "order", "please", "show", "some", "the", "to", "want",
    "where", "with", "would", "you",
];

/// Keywords from the remote tier, plus the results of the request that
/// produced them when one was made
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnhancedKeywords {
    pub keywords: Vec<String>,
    pub results: Option<SearchResponse>,
}

#[async_trait]
pub trait KeywordStrategy: Send + Sync {
    /// Offline extraction
    fn extract_local(&self, text: &str) -> Vec<String>;

    /// Refine `local` keywords, possibly over the network
    async fn extract_remote(
        &self,
        text: &str,
        local: &[String],
    ) -> Result<EnhancedKeywords, SearchError>;
}

/// Lowercase, strip punctuation, drop stop words and duplicates
pub fn strip_stop_words(text: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for word in text.split_whitespace() {
        let word: String = word
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '\'' || *c == '-')
            .collect::<String>()
            .trim_matches(|c| c == '\'' || c == '-')
            .to_lowercase();
        if word.is_empty() || STOP_WORDS.contains(&word.as_str()) {
            continue;
        }
        if !keywords.contains(&word) {
            keywords.push(word);
        }
    }
    keywords
}

/// Local tier only
#[derive(Debug, Default, Clone, Copy)]
pub struct StopWordStrategy;

#[async_trait]
impl KeywordStrategy for StopWordStrategy {
    fn extract_local(&self, text: &str) -> Vec<String> {
        strip_stop_words(text)
    }

    async fn extract_remote(
        &self,
        _text: &str,
        local: &[String],
    ) -> Result<EnhancedKeywords, SearchError> {
        Ok(EnhancedKeywords {
            keywords: local.to_vec(),
            results: None,
        })
    }
}

/// Sends the local keywords as a voice search and adopts the keywords the
/// backend echoes back
pub struct BackendEnhancedStrategy {
    api: Arc<dyn SearchApi>,
}

impl BackendEnhancedStrategy {
    pub fn new(api: Arc<dyn SearchApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl KeywordStrategy for BackendEnhancedStrategy {
    fn extract_local(&self, text: &str) -> Vec<String> {
        strip_stop_words(text)
    }

    async fn extract_remote(
        &self,
        text: &str,
        local: &[String],
    ) -> Result<EnhancedKeywords, SearchError> {
        let query = BusinessSearchQuery {
            q: local.join(" "),
            voice_search: true,
            original_query: Some(text.trim().to_string()),
            keywords: local.to_vec(),
            ..Default::default()
        };
        let response = self
            .api
            .search_businesses(&query)
            .await
            .map_err(|e| SearchError::Request(e.user_message()))?;

        let echoed = response
            .voice_search
            .as_ref()
            .map(|v| v.keywords.clone())
            .unwrap_or_default();
        let keywords = if echoed.is_empty() {
            local.to_vec()
        } else {
            echoed
        };
        Ok(EnhancedKeywords {
            keywords,
            results: Some(response),
        })
    }
}
