use crate::auth::AuthState;
use crate::storage::{RECENT_ADDRESSES_KEY, Storage};
use jara_client::RecentAddressApi;
use parking_lot::Mutex;
use shared::models::{AddressType, Coordinates, LocationDetails, RecentAddress};
use shared::util::{new_id, now_millis};
use std::sync::Arc;

/// Entries kept on the device
pub const MAX_RECENT_ADDRESSES: usize = 50;
/// Entries shown per address type
pub const RECENT_DISPLAY_LIMIT: usize = 10;

/// Copies recent addresses to the signed-in customer's account
#[derive(Clone)]
pub struct AccountSync {
    pub api: Arc<dyn RecentAddressApi>,
    pub auth: Arc<AuthState>,
}

/// Per-device recent address cache
///
/// Entries are unique by `(address, type)` and kept newest first. With an
/// [`AccountSync`] attached, entries also follow the customer across devices.
pub struct RecentAddressCache {
    storage: Storage,
    entries: Mutex<Vec<RecentAddress>>,
    account: Option<AccountSync>,
}

impl RecentAddressCache {
    pub fn load(storage: Storage) -> Self {
        let mut entries: Vec<RecentAddress> = storage.load_or_default(RECENT_ADDRESSES_KEY);
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries.truncate(MAX_RECENT_ADDRESSES);
        Self {
            storage,
            entries: Mutex::new(entries),
            account: None,
        }
    }

    pub fn with_account_sync(mut self, account: AccountSync) -> Self {
        self.account = Some(account);
        self
    }

    /// Insert or refresh an entry and move it to the front
    pub fn upsert(
        &self,
        address: &str,
        address_type: AddressType,
        details: &LocationDetails,
        coordinates: Option<Coordinates>,
    ) -> RecentAddress {
        let mut entries = self.entries.lock();
        let newest = entries.first().map(|e| e.created_at).unwrap_or(i64::MIN);
        // Strictly increasing so a refreshed entry always sorts first
        let created_at = now_millis().max(newest.saturating_add(1));

        let existing = entries
            .iter()
            .position(|e| e.address == address && e.address_type == address_type)
            .map(|i| entries.remove(i));
        // A re-pick without a fix keeps the last known position
        let coordinates = coordinates.or_else(|| existing.as_ref().and_then(|e| e.coordinates));
        let optional = |s: &str| (!s.trim().is_empty()).then(|| s.to_string());
        let entry = RecentAddress {
            id: existing.map(|e| e.id).unwrap_or_else(new_id),
            address: address.to_string(),
            address_type,
            created_at,
            state: optional(&details.state),
            local_government: optional(&details.local_government),
            locality: optional(&details.locality),
            coordinates,
        };
        entries.insert(0, entry.clone());
        entries.truncate(MAX_RECENT_ADDRESSES);
        self.persist(&entries);
        entry
    }

    fn persist(&self, entries: &[RecentAddress]) {
        if let Err(e) = self.storage.save(RECENT_ADDRESSES_KEY, entries) {
            tracing::warn!(error = %e, "Failed to persist recent addresses");
        }
    }

    // ========== Account sync ==========

    /// Save an entry to the signed-in customer's account
    ///
    /// Without a session or an attached [`AccountSync`] this does nothing.
    /// Failures are logged; the device copy is already saved.
    pub async fn push(&self, entry: &RecentAddress) {
        let Some(account) = &self.account else {
            return;
        };
        let Some(session) = account.auth.current() else {
            return;
        };
        if let Err(e) = account.api.save_recent_address(entry, &session.token).await {
            tracing::warn!(error = %e, address = %entry.address, "Failed to sync recent address");
        }
    }

    /// Merge the account's entries into the device cache
    ///
    /// For each `(address, type)` the newer entry wins. Returns how many
    /// entries changed.
    pub async fn pull(&self) -> usize {
        let Some(account) = &self.account else {
            return 0;
        };
        let Some(session) = account.auth.current() else {
            return 0;
        };
        let remote = match account.api.recent_addresses(&session.user.id, &session.token).await {
            Ok(remote) => remote,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load account recent addresses");
                return 0;
            }
        };

        let mut entries = self.entries.lock();
        let merged = merge_entries(&mut entries, remote);
        if merged > 0 {
            self.persist(&entries);
        }
        tracing::debug!(merged, total = entries.len(), "Merged account recent addresses");
        merged
    }

    /// Newest entries of one type, at most [`RECENT_DISPLAY_LIMIT`]
    pub fn for_type(&self, address_type: AddressType) -> Vec<RecentAddress> {
        self.entries
            .lock()
            .iter()
            .filter(|e| e.address_type == address_type)
            .take(RECENT_DISPLAY_LIMIT)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

fn merge_entries(entries: &mut Vec<RecentAddress>, remote: Vec<RecentAddress>) -> usize {
    let mut merged = 0;
    for entry in remote {
        match entries.iter().position(|e| e.same_place(&entry)) {
            Some(i) if entries[i].created_at >= entry.created_at => {}
            Some(i) => {
                let local = &mut entries[i];
                let coordinates = entry.coordinates.or(local.coordinates);
                *local = RecentAddress { coordinates, ..entry };
                merged += 1;
            }
            None => {
                entries.push(entry);
                merged += 1;
            }
        }
    }
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    entries.truncate(MAX_RECENT_ADDRESSES);
    merged
}
