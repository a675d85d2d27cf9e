//! Auth command handlers: login, logout, whoami.

use std::io::Read;

use dialoguer::Input;
use secrecy::SecretString;

use venmap_core::Workspace;
use venmap_config::KEYRING_SERVICE;

use crate::cli::{GlobalOpts, LoginArgs, OutputFormat};
use crate::config::{self, Profile};
use crate::error::CliError;
use crate::output;

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

// ── login ───────────────────────────────────────────────────────────

/// Log in, verify the credentials against the backend, and persist the
/// profile. The password goes to the system keyring; only on keyring
/// failure does the user get the plaintext-config fallback offer.
pub async fn login(args: LoginArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);
    let existing = cfg.profiles.get(&profile_name);

    // 1. Server URL: flag > existing profile > prompt
    let server = match global.server.clone().or_else(|| existing.map(|p| p.server.clone())) {
        Some(s) => s,
        None => Input::new()
            .with_prompt("Backend URL")
            .default("http://localhost:8000".into())
            .interact_text()
            .map_err(prompt_err)?,
    };

    // 2. Email: flag > prompt
    let email: String = match args.email.or_else(|| global.email.clone()) {
        Some(e) => e,
        None => Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(prompt_err)?,
    };

    // 3. Password
    let password = if args.password_stdin {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf.truncate(buf.trim_end().len());
        buf
    } else {
        rpassword::prompt_password("Password: ").map_err(prompt_err)?
    };
    if email.is_empty() || password.is_empty() {
        return Err(CliError::Validation {
            field: "credentials".into(),
            reason: "email and password cannot be empty".into(),
        });
    }

    // 4. Verify against the backend before persisting anything.
    let backend = config::build_login_config(
        global,
        &server,
        email.clone(),
        SecretString::from(password.clone()),
    )?;
    let workspace = Workspace::new(backend)?;
    workspace.connect().await?;
    let user = workspace.current_user();
    workspace.disconnect().await;

    // 5. Store the password; keyring first, plaintext as last resort.
    let stored_plaintext = match keyring::Entry::new(
        KEYRING_SERVICE,
        &format!("{profile_name}/password"),
    )
    .and_then(|entry| entry.set_password(&password))
    {
        Ok(()) => {
            if !global.quiet {
                eprintln!("Password stored in system keyring");
            }
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "keyring unavailable -- falling back to config file");
            Some(password)
        }
    };

    cfg.profiles.insert(
        profile_name.clone(),
        Profile {
            server,
            email: Some(email),
            password: stored_plaintext,
            password_env: None,
            ca_cert: existing.and_then(|p| p.ca_cert.clone()),
            insecure: if global.insecure { Some(true) } else { existing.and_then(|p| p.insecure) },
            timeout: existing.and_then(|p| p.timeout),
        },
    );
    if cfg.default_profile.is_none() {
        cfg.default_profile = Some(profile_name.clone());
    }
    config::save_config(&cfg)?;

    if !global.quiet {
        let name = user.map(|u| u.name.clone()).unwrap_or_default();
        eprintln!("Logged in as {name} (profile '{profile_name}')");
    }
    Ok(())
}

// ── logout ──────────────────────────────────────────────────────────

/// Drop the stored password for the active profile. The backend has no
/// token-revocation endpoint; forgetting the credential is the logout.
pub fn logout(global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);

    if let Ok(entry) =
        keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password"))
    {
        let _ = entry.delete_credential();
    }

    if let Some(profile) = cfg.profiles.get_mut(&profile_name) {
        if profile.password.take().is_some() {
            config::save_config(&cfg)?;
        }
    }

    if !global.quiet {
        eprintln!("Credentials removed for profile '{profile_name}'");
    }
    Ok(())
}

// ── whoami ──────────────────────────────────────────────────────────

pub fn whoami(workspace: &Workspace, global: &GlobalOpts) -> Result<(), CliError> {
    let Some(user) = workspace.current_user() else {
        return Err(CliError::AuthFailed {
            profile: "current".into(),
        });
    };

    let out = match global.output {
        OutputFormat::Table => {
            let mut lines = vec![
                format!("Name:   {}", user.name),
                format!("Email:  {}", user.email),
                format!("Role:   {}", user.role),
                format!("Active: {}", user.is_active),
            ];
            if let Some(ref phone) = user.phone {
                lines.push(format!("Phone:  {phone}"));
            }
            lines.join("\n")
        }
        OutputFormat::Plain => user.email.clone(),
        _ => output::render_single(&global.output, &*user, |_| String::new(), |u| u.email.clone()),
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
