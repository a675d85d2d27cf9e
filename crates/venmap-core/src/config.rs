// ── Runtime connection configuration ──
//
// These types describe *how* to reach the backend. They carry
// credential data and connection tuning, but never touch disk.
// The CLI/TUI constructs a `BackendConfig` and hands it in.

use secrecy::SecretString;
use url::Url;

/// How to authenticate with the backend.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// Email + password login, exchanged for a bearer token on connect.
    Credentials {
        email: String,
        password: SecretString,
    },
    /// A pre-issued bearer token (e.g. from the environment); skips
    /// the login round-trip.
    Token(SecretString),
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed staging deployments).
    DangerAcceptInvalid,
}

impl PartialEq for TlsVerification {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::SystemDefaults, Self::SystemDefaults) => true,
            (Self::CustomCa(a), Self::CustomCa(b)) => a == b,
            (Self::DangerAcceptInvalid, Self::DangerAcceptInvalid) => true,
            _ => false,
        }
    }
}

impl Eq for TlsVerification {}

/// Configuration for connecting to one backend deployment.
///
/// Built by CLI/TUI, passed to `Workspace` -- core never reads config files.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Backend URL (e.g., `https://venmap.example.com`).
    pub url: Url,
    /// Authentication method and credentials.
    pub auth: AuthCredentials,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: std::time::Duration,
    /// How often to re-fetch the current view's data (seconds). 0 = never.
    pub refresh_interval_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000"
                .parse()
                .expect("default backend URL is valid"),
            auth: AuthCredentials::Credentials {
                email: String::new(),
                password: SecretString::from("".to_string()),
            },
            tls: TlsVerification::default(),
            timeout: std::time::Duration::from_secs(30),
            refresh_interval_secs: 300,
        }
    }
}
