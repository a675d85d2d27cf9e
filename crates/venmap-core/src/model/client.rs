// ── Client (customer account) domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::ClientId;

/// A customer account that sourcing projects can be billed against.
///
/// Branding fields feed the AI description generator; they are opaque
/// free text here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub brand_tone: Option<String>,
    pub description_preferences: Option<String>,
    /// Recurring venue requirements applied as defaults to new projects.
    pub standard_requirements: serde_json::Map<String, serde_json::Value>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Requirement keys in insertion order, for table rendering.
    pub fn requirement_keys(&self) -> Vec<&str> {
        self.standard_requirements.keys().map(String::as_str).collect()
    }
}
