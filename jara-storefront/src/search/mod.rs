//! Business search with voice input

mod history;
mod keywords;
mod panel;

pub use history::{
    MAX_RECENT_SEARCHES, MAX_VOICE_EVENTS, SearchHistory, SearchSession, VoiceAnalytics,
    VoiceSearchEvent,
};
pub use keywords::{
    BackendEnhancedStrategy, EnhancedKeywords, KeywordStrategy, StopWordStrategy,
    strip_stop_words,
};
pub use panel::{SearchFilters, SearchPanel, SearchState};
