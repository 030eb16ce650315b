//! Signed-in customer session
//!
//! Login itself happens outside the core; the host signs the session in and
//! out and the checkout reads it at gate time.

use parking_lot::RwLock;
use shared::models::AuthSession;

#[derive(Debug, Default)]
pub struct AuthState {
    session: RwLock<Option<AuthSession>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(session: AuthSession) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }

    pub fn sign_in(&self, session: AuthSession) {
        tracing::debug!(user_id = %session.user.id, "Customer signed in");
        *self.session.write() = Some(session);
    }

    pub fn sign_out(&self) {
        *self.session.write() = None;
    }

    pub fn current(&self) -> Option<AuthSession> {
        self.session.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_some()
    }
}
