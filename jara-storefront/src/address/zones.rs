//! Hierarchical geography lookups with a short client cache

use dashmap::DashMap;
use jara_client::{ClientResult, LocationApi};
use shared::models::{GeoState, LocalGovernment, Locality};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

const STATES: &str = "states";
const ALL_LOCAL_GOVERNMENTS: &str = "local-governments";

#[derive(Clone)]
struct Cached<T> {
    fetched_at: Instant,
    value: T,
}

/// States, local governments and localities, cached for `ttl`
pub struct DeliveryLocations {
    api: Arc<dyn LocationApi>,
    ttl: Duration,
    states: DashMap<&'static str, Cached<Vec<GeoState>>>,
    local_governments: DashMap<String, Cached<Vec<LocalGovernment>>>,
    localities: DashMap<String, Cached<Vec<Locality>>>,
}

impl DeliveryLocations {
    pub fn new(api: Arc<dyn LocationApi>, ttl: Duration) -> Self {
        Self {
            api,
            ttl,
            states: DashMap::new(),
            local_governments: DashMap::new(),
            localities: DashMap::new(),
        }
    }

    fn fresh<T: Clone>(&self, entry: Option<&Cached<T>>) -> Option<T> {
        entry
            .filter(|c| c.fetched_at.elapsed() < self.ttl)
            .map(|c| c.value.clone())
    }

    pub async fn states(&self) -> ClientResult<Vec<GeoState>> {
        if let Some(hit) = self.fresh(self.states.get(STATES).as_deref()) {
            return Ok(hit);
        }
        let value = self.api.states().await?;
        tracing::debug!(count = value.len(), "Fetched states");
        self.states.insert(
            STATES,
            Cached {
                fetched_at: Instant::now(),
                value: value.clone(),
            },
        );
        Ok(value)
    }

    pub async fn local_governments_for_state(
        &self,
        state_id: &str,
    ) -> ClientResult<Vec<LocalGovernment>> {
        let key = format!("state:{}", state_id);
        if let Some(hit) = self.fresh(self.local_governments.get(&key).as_deref()) {
            return Ok(hit);
        }
        let value = self.api.local_governments_for_state(state_id).await?;
        self.local_governments.insert(
            key,
            Cached {
                fetched_at: Instant::now(),
                value: value.clone(),
            },
        );
        Ok(value)
    }

    pub async fn local_governments(&self) -> ClientResult<Vec<LocalGovernment>> {
        if let Some(hit) = self.fresh(self.local_governments.get(ALL_LOCAL_GOVERNMENTS).as_deref()) {
            return Ok(hit);
        }
        let value = self.api.local_governments().await?;
        self.local_governments.insert(
            ALL_LOCAL_GOVERNMENTS.to_string(),
            Cached {
                fetched_at: Instant::now(),
                value: value.clone(),
            },
        );
        Ok(value)
    }

    pub async fn localities(&self, local_government_id: &str) -> ClientResult<Vec<Locality>> {
        if let Some(hit) = self.fresh(self.localities.get(local_government_id).as_deref()) {
            return Ok(hit);
        }
        let value = self.api.localities(local_government_id).await?;
        self.localities.insert(
            local_government_id.to_string(),
            Cached {
                fetched_at: Instant::now(),
                value: value.clone(),
            },
        );
        Ok(value)
    }

    /// Find a local government id by name, case-insensitively
    pub async fn find_local_government_id(&self, name: &str) -> ClientResult<Option<String>> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return Ok(None);
        }
        Ok(self
            .local_governments()
            .await?
            .into_iter()
            .find(|lg| lg.name.trim().to_lowercase() == wanted)
            .map(|lg| lg.id))
    }

    pub fn invalidate(&self) {
        self.states.clear();
        self.local_governments.clear();
        self.localities.clear();
    }
}
