//! Shared helpers for command handlers.

use std::path::Path;
use std::str::FromStr;

use crate::error::CliError;

/// Parse a UUID-backed identifier, reporting the offending value.
pub fn parse_id<T>(raw: &str, resource_type: &str, list_command: &str) -> Result<T, CliError>
where
    T: FromStr<Err = uuid::Error>,
{
    raw.parse().map_err(|_| CliError::NotFound {
        resource_type: resource_type.into(),
        identifier: raw.into(),
        list_command: list_command.into(),
    })
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read a file into memory for upload flags.
pub fn read_file_bytes(path: &Path) -> Result<(String, Vec<u8>), CliError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::Validation {
            field: "file".into(),
            reason: format!("not a file path: {}", path.display()),
        })?;
    let bytes = std::fs::read(path)?;
    Ok((name, bytes))
}

/// Guess a photo MIME type from the file extension.
pub fn photo_mime(path: &Path) -> Result<String, CliError> {
    match path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("jpg" | "jpeg") => Ok("image/jpeg".into()),
        Some("png") => Ok("image/png".into()),
        Some("webp") => Ok("image/webp".into()),
        other => Err(CliError::Validation {
            field: "file".into(),
            reason: format!(
                "unsupported image type '{}' (expected jpg, png, or webp)",
                other.unwrap_or("")
            ),
        }),
    }
}

/// "-" placeholder for optional display fields.
pub fn dash(value: Option<&str>) -> String {
    value.filter(|s| !s.is_empty()).unwrap_or("-").to_string()
}

/// Format an optional EUR amount for tables.
pub fn eur(value: Option<f64>) -> String {
    value.map_or_else(|| "-".into(), |v| format!("{v:.2} EUR"))
}
