//! `venmap-tui` — Terminal workspace for venue sourcing and proposals.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive data from
//! `venmap-core`'s [`EntityStream`](venmap_core::EntityStream). Screens are
//! navigable via number keys (1-3): Projects, Venues, and Clients, with
//! drill-down detail screens opened from the lists.
//!
//! Logs are written to a file (default `/tmp/venmap-tui.log`) to avoid
//! corrupting the terminal UI. A background data bridge task continuously
//! streams entity updates from the workspace into the TUI action loop.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use secrecy::SecretString;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use venmap_core::{AuthCredentials, BackendConfig, TlsVerification, Workspace};

use crate::app::{App, LoginPrefill};

/// Terminal workspace for venue sourcing and proposal management.
#[derive(Parser, Debug)]
#[command(name = "venmap-tui", version, about)]
struct Cli {
    /// Backend URL (e.g., https://venmap.example.com)
    #[arg(short = 's', long, env = "VENMAP_SERVER")]
    server: Option<String>,

    /// Login email
    #[arg(short = 'e', long, env = "VENMAP_EMAIL")]
    email: Option<String>,

    /// Skip TLS certificate verification (self-signed staging)
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Log file path (defaults to /tmp/venmap-tui.log)
    #[arg(long, default_value = "/tmp/venmap-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("venmap_tui={log_level}")));

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("venmap-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Build a [`Workspace`] from CLI args plus `VENMAP_TOKEN` /
/// `VENMAP_PASSWORD`, if enough was provided to authenticate.
fn build_workspace(cli: &Cli) -> Option<Workspace> {
    let url = cli.server.as_deref()?.parse().ok()?;

    let auth = if let Ok(token) = std::env::var("VENMAP_TOKEN") {
        AuthCredentials::Token(SecretString::from(token))
    } else {
        let email = cli.email.clone()?;
        let password = std::env::var("VENMAP_PASSWORD").ok()?;
        AuthCredentials::Credentials {
            email,
            password: SecretString::from(password),
        }
    };

    let config = BackendConfig {
        url,
        auth,
        tls: if cli.insecure {
            TlsVerification::DangerAcceptInvalid
        } else {
            TlsVerification::SystemDefaults
        },
        timeout: std::time::Duration::from_secs(30),
        refresh_interval_secs: 300,
    };

    Workspace::new(config).ok()
}

/// Try loading a workspace from the shared config file (default profile).
fn build_workspace_from_config() -> Option<Workspace> {
    let cfg = venmap_config::load_config().ok()?;
    let profile_name = cfg.default_profile.as_deref().unwrap_or("default");
    let profile = cfg.profiles.get(profile_name)?;
    let config = venmap_config::profile_to_backend_config(profile, profile_name).ok()?;
    Workspace::new(config).ok()
}

/// Values to pre-fill the login form with when no workspace could be
/// built: CLI flags take priority, then the saved default profile.
fn login_prefill(cli: &Cli) -> LoginPrefill {
    let mut prefill = LoginPrefill {
        server: cli.server.clone(),
        email: cli.email.clone(),
        insecure: cli.insecure,
    };
    if prefill.server.is_none() || prefill.email.is_none() {
        let cfg = venmap_config::load_config_or_default();
        let profile_name = cfg.default_profile.as_deref().unwrap_or("default");
        if let Some(profile) = cfg.profiles.get(profile_name) {
            if prefill.server.is_none() {
                prefill.server = Some(profile.server.clone());
            }
            if prefill.email.is_none() {
                prefill.email.clone_from(&profile.email);
            }
            if profile.insecure == Some(true) {
                prefill.insecure = true;
            }
        }
    }
    prefill
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    info!(
        server = cli.server.as_deref().unwrap_or("(not set)"),
        "starting venmap-tui"
    );

    // Priority: CLI flags > config file > interactive login
    let workspace = build_workspace(&cli).or_else(build_workspace_from_config);
    let prefill = login_prefill(&cli);
    let mut app = App::new(workspace, prefill);
    app.run().await?;

    Ok(())
}
