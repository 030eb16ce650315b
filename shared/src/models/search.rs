//! Business search DTOs

use serde::{Deserialize, Serialize};

/// Query for `GET /businesses/search`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessSearchQuery {
    pub q: String,
    pub business_type: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub voice_search: bool,
    pub original_query: Option<String>,
    pub keywords: Vec<String>,
}

impl BusinessSearchQuery {
    pub fn text(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Default::default()
        }
    }

    /// Query string pairs, omitting unset parameters
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("q", self.q.clone())];
        if let Some(t) = &self.business_type {
            pairs.push(("businessType", t.clone()));
        }
        if let Some(c) = &self.city {
            pairs.push(("city", c.clone()));
        }
        if let Some(s) = &self.state {
            pairs.push(("state", s.clone()));
        }
        if self.voice_search {
            pairs.push(("voiceSearch", "true".to_string()));
        }
        if let Some(o) = &self.original_query {
            pairs.push(("originalQuery", o.clone()));
        }
        if !self.keywords.is_empty() {
            pairs.push(("keywords", self.keywords.join(",")));
        }
        pairs
    }
}

/// Business as listed in search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub business_type: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// Voice search echo returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSearchInfo {
    #[serde(default)]
    pub original_query: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub enhanced_query: Option<String>,
}

/// `GET /businesses/search` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub businesses: Vec<BusinessSummary>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub voice_search: Option<VoiceSearchInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_omit_unset() {
        let query = BusinessSearchQuery::text("amala");
        assert_eq!(query.to_pairs(), vec![("q", "amala".to_string())]);
    }

    #[test]
    fn test_pairs_voice() {
        let query = BusinessSearchQuery {
            q: "jollof rice".into(),
            voice_search: true,
            original_query: Some("I want jollof rice".into()),
            keywords: vec!["jollof".into(), "rice".into()],
            ..Default::default()
        };
        let pairs = query.to_pairs();
        assert!(pairs.contains(&("voiceSearch", "true".to_string())));
        assert!(pairs.contains(&("keywords", "jollof,rice".to_string())));
    }
}
