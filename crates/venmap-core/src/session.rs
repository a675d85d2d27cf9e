// ── Session identity ──
//
// Tracks who is logged in and coordinates forced logout. Concurrent
// fetches can all come back 401 when a token expires; the latch makes
// sure only the first one drives the logout-and-redirect sequence and
// the rest fall through silently.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::model::User;

#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn(Arc<User>),
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn(_))
    }

    pub fn user(&self) -> Option<&Arc<User>> {
        match self {
            Self::LoggedIn(user) => Some(user),
            Self::LoggedOut => None,
        }
    }
}

pub(crate) struct Session {
    state: watch::Sender<SessionState>,
    logging_out: AtomicBool,
}

impl Session {
    pub(crate) fn new() -> Self {
        let (state, _) = watch::channel(SessionState::LoggedOut);
        Self {
            state,
            logging_out: AtomicBool::new(false),
        }
    }

    pub(crate) fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub(crate) fn user(&self) -> Option<Arc<User>> {
        self.state.borrow().user().cloned()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Record a successful login and re-arm the logout latch.
    pub(crate) fn set_logged_in(&self, user: User) {
        self.logging_out.store(false, Ordering::SeqCst);
        self.state
            .send_modify(|s| *s = SessionState::LoggedIn(Arc::new(user)));
    }

    pub(crate) fn set_logged_out(&self) {
        self.state.send_modify(|s| *s = SessionState::LoggedOut);
    }

    /// Claim the logout sequence. Returns `true` for exactly one caller
    /// per session; later callers (other expired requests racing in)
    /// get `false` and must stand down.
    pub(crate) fn begin_logout(&self) -> bool {
        self.logging_out
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{UserId, UserRole};
    use chrono::Utc;
    use uuid::Uuid;

    fn user() -> User {
        User {
            id: UserId(Uuid::new_v4()),
            name: "Eva Manager".into(),
            email: "eva@example.com".into(),
            phone: None,
            signature_block: None,
            role: UserRole::EventManager,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn logout_latch_admits_exactly_one_caller() {
        let session = Session::new();
        session.set_logged_in(user());

        assert!(session.begin_logout());
        assert!(!session.begin_logout());
        assert!(!session.begin_logout());
    }

    #[test]
    fn login_rearms_the_latch() {
        let session = Session::new();
        session.set_logged_in(user());
        assert!(session.begin_logout());
        session.set_logged_out();

        session.set_logged_in(user());
        assert!(session.begin_logout());
    }

    #[test]
    fn state_reflects_login_and_logout() {
        let session = Session::new();
        assert!(!session.current().is_logged_in());

        session.set_logged_in(user());
        assert!(session.current().is_logged_in());
        assert_eq!(session.user().unwrap().email, "eva@example.com");

        session.set_logged_out();
        assert!(session.user().is_none());
    }
}
