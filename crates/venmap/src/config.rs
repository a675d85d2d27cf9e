//! CLI configuration -- thin wrapper around `venmap_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--server, --email, etc.).

use std::time::Duration;

use venmap_core::{AuthCredentials, BackendConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use venmap_config::{
    Config, Profile, config_path, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    venmap_config::active_profile_name(global.profile.as_deref(), config)
}

/// Translate a `Profile` + global flags into a `BackendConfig`.
///
/// CLI flag overrides take priority over profile values. The periodic
/// view refresh is disabled: CLI runs are single request-response
/// cycles.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<BackendConfig, CliError> {
    // 1. Backend URL (flag > env > profile)
    let url_str = global.server.as_deref().unwrap_or(&profile.server);
    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    // 2. Auth credentials (flag email overrides the profile's)
    let auth = if let Some(ref email) = global.email {
        let mut overridden = profile.clone();
        overridden.email = Some(email.clone());
        venmap_config::resolve_auth(&overridden, profile_name)?
    } else {
        venmap_config::resolve_auth(profile, profile_name)?
    };

    // 3. TLS verification
    let tls = if global.insecure || profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    // 4. Timeout (flag wins; the clap default matches the profile default)
    let timeout = Duration::from_secs(global.timeout);

    Ok(BackendConfig {
        url,
        auth,
        tls,
        timeout,
        refresh_interval_secs: 0,
    })
}

/// Build a `BackendConfig` from the config file, profile, and CLI
/// overrides -- or from flags/env alone when no profile exists.
pub fn build_backend_config(global: &GlobalOpts) -> Result<BackendConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, global);
    }

    // No profile found -- a --server flag plus env credentials still works.
    let url_str = global.server.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;

    let flag_profile = Profile {
        server: url_str.to_string(),
        email: global.email.clone(),
        password: None,
        password_env: None,
        ca_cert: None,
        insecure: Some(global.insecure),
        timeout: Some(global.timeout),
    };
    resolve_profile(&flag_profile, &profile_name, global)
}

/// Like [`build_backend_config`] but with explicit credentials, for
/// `venmap login` where nothing is stored yet.
pub fn build_login_config(
    global: &GlobalOpts,
    server: &str,
    email: String,
    password: secrecy::SecretString,
) -> Result<BackendConfig, CliError> {
    let url: url::Url = server.parse().map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {server}"),
    })?;

    let tls = if global.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(BackendConfig {
        url,
        auth: AuthCredentials::Credentials { email, password },
        tls,
        timeout: Duration::from_secs(global.timeout),
        refresh_interval_secs: 0,
    })
}
