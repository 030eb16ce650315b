use super::reducer::{CartAction, reduce};
use crate::storage::{CART_KEY, Storage};
use parking_lot::Mutex;
use shared::models::CartState;

/// Single owner of the cart
///
/// All mutation goes through [`CartStore::dispatch`], which holds the lock
/// for the whole reduce-and-persist step so concurrent handlers are
/// serialized.
pub struct CartStore {
    state: Mutex<CartState>,
    storage: Option<Storage>,
}

impl CartStore {
    /// Cart that lives only in memory
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CartState::default()),
            storage: None,
        }
    }

    /// Cart persisted under `jara_cart`, restored from any previous session
    pub fn with_storage(storage: Storage) -> Self {
        let restored: CartState = storage.load_or_default(CART_KEY);
        if !restored.is_empty() {
            tracing::info!(
                packs = restored.packs.len(),
                items = restored.item_count(),
                "Restored cart from storage"
            );
        }
        Self {
            state: Mutex::new(restored),
            storage: Some(storage),
        }
    }

    /// Apply an action and return the resulting snapshot
    pub fn dispatch(&self, action: CartAction) -> CartState {
        let mut state = self.state.lock();
        let name = action.name();
        let next = reduce(&state, action);
        if next == *state {
            return next;
        }
        *state = next.clone();

        if let Some(storage) = &self.storage {
            let result = if next.packs.is_empty() && next.brown_bag_quantity == 0 {
                storage.remove(CART_KEY)
            } else {
                storage.save(CART_KEY, &next)
            };
            if let Err(e) = result {
                tracing::warn!(action = name, error = %e, "Failed to persist cart");
            }
        }
        tracing::debug!(action = name, items = next.item_count(), "Cart updated");
        next
    }

    pub fn snapshot(&self) -> CartState {
        self.state.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().is_empty()
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}
