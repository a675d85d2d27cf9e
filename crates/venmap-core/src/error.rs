// ── Core error types ──
//
// User-facing errors from venmap-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<venmap_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// The bearer token was rejected mid-session. The session drives
    /// a single logout when this surfaces; callers treat the operation
    /// as not having happened.
    #[error("Session expired -- logged out")]
    SessionExpired,

    #[error("Not logged in")]
    NotLoggedIn,

    /// The command channel is gone (workspace shut down).
    #[error("Session closed")]
    SessionClosed,

    #[error("Request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    /// Gallery attach actions require a project context. Raised
    /// client-side before any network call; the UI prompts and
    /// redirects to the project list.
    #[error("No active project -- open a project before attaching venues")]
    NoActiveProject,

    #[error("Operation failed: {message}")]
    OperationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether this error means the bearer token died mid-session.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, CoreError::SessionExpired)
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<venmap_api::Error> for CoreError {
    fn from(err: venmap_api::Error) -> Self {
        match err {
            venmap_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            venmap_api::Error::AuthExpired => CoreError::SessionExpired,
            venmap_api::Error::NotAuthenticated => CoreError::NotLoggedIn,
            venmap_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else if e.status().map(|s| s.as_u16()) == Some(404) {
                    CoreError::NotFound {
                        entity_type: "resource".into(),
                        identifier: e.url().map(|u| u.path().to_string()).unwrap_or_default(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            venmap_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            venmap_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            venmap_api::Error::Api { message, status } => match status {
                404 => CoreError::NotFound {
                    entity_type: "resource".into(),
                    identifier: message,
                },
                400 | 422 => CoreError::ValidationFailed { message },
                _ => CoreError::Api {
                    message,
                    status: Some(status),
                },
            },
            venmap_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn auth_expiry_maps_to_session_expired() {
        let err: CoreError = venmap_api::Error::AuthExpired.into();
        assert!(err.is_session_expired());
    }

    #[test]
    fn backend_422_maps_to_validation() {
        let err: CoreError = venmap_api::Error::Api {
            message: "capacity: must be positive".into(),
            status: 422,
        }
        .into();
        assert!(matches!(err, CoreError::ValidationFailed { .. }));
    }

    #[test]
    fn backend_404_maps_to_not_found() {
        let err: CoreError = venmap_api::Error::Api {
            message: "Venue not found".into(),
            status: 404,
        }
        .into();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }
}
