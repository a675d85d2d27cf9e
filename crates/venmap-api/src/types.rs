// Wire types for the Venue Mapping AI REST API.
//
// Shapes mirror the backend's JSON exactly (snake_case fields, lowercase
// enum values). Request bodies use `skip_serializing_if` so PATCH
// payloads only carry the fields the caller set.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Pagination envelope ──────────────────────────────────────────────

/// Paginated list envelope: `{ items, total, page, page_size }`.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

/// Marker returned by DELETE endpoints.
///
/// The backend answers `204 No Content`; this type makes "deleted" a
/// distinct success value rather than an absence of error detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deleted;

// ── Authentication ───────────────────────────────────────────────────

/// Login response: `{ access_token, token_type }`.
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    EventManager,
    Admin,
}

/// Account record from `/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub signature_block: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── Venue ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub url: String,
    #[serde(default)]
    pub caption: Option<String>,
    pub display_order: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub capacity: u32,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub event_types: Vec<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description_template: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

/// Server-side gallery filter, sent as repeated query parameters.
#[derive(Debug, Clone, Default)]
pub struct VenueQuery {
    pub city: Option<String>,
    pub min_capacity: Option<u32>,
    pub facilities: Vec<String>,
}

impl VenueQuery {
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(ref city) = self.city {
            pairs.push(("city", city.clone()));
        }
        if let Some(min) = self.min_capacity {
            pairs.push(("min_capacity", min.to_string()));
        }
        for facility in &self.facilities {
            pairs.push(("facilities", facility.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVenueRequest {
    pub name: String,
    pub city: String,
    pub capacity: u32,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub event_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateVenueRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facilities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Per-row failure from a CSV bulk upload.
#[derive(Debug, Clone, Deserialize)]
pub struct VenueUploadError {
    pub row: u32,
    #[serde(default)]
    pub field: Option<String>,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Outcome of `POST /venues/upload-csv`.
///
/// Created rows are committed even when other rows fail; the caller
/// renders `errors` per row rather than treating the call as failed.
#[derive(Debug, Clone, Deserialize)]
pub struct VenueUploadResult {
    pub total_rows: u32,
    pub successful: u32,
    pub failed: u32,
    #[serde(default)]
    pub created_venues: Vec<Venue>,
    #[serde(default)]
    pub errors: Vec<VenueUploadError>,
}

// ── Project ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Active,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    /// Wire value, as sent in query parameters.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(default)]
    pub client_id: Option<Uuid>,
    pub client_name: String,
    pub event_name: String,
    pub event_date_start: NaiveDate,
    pub event_date_end: NaiveDate,
    pub attendee_count: u32,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub location_preference: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub project_venues: Vec<ProjectVenueDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    pub client_name: String,
    pub event_name: String,
    pub event_date_start: NaiveDate,
    pub event_date_end: NaiveDate,
    pub attendee_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_preference: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date_end: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendee_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_preference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ── Project-venue association ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutreachStatus {
    Draft,
    Sent,
    Pending,
    Responded,
    Declined,
}

/// Junction record linking a venue to a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectVenue {
    pub id: Uuid,
    pub project_id: Uuid,
    pub venue_id: Uuid,
    #[serde(default)]
    pub catering_provider_id: Option<Uuid>,
    pub outreach_status: OutreachStatus,
    #[serde(default)]
    pub availability_dates: Option<String>,
    #[serde(default)]
    pub is_available: Option<bool>,
    #[serde(default)]
    pub quoted_price: Option<f64>,
    #[serde(default)]
    pub room_allocation: Option<String>,
    #[serde(default)]
    pub catering_description: Option<String>,
    #[serde(default)]
    pub pros: Option<String>,
    #[serde(default)]
    pub cons: Option<String>,
    #[serde(default)]
    pub ai_description: Option<String>,
    #[serde(default)]
    pub final_description: Option<String>,
    pub include_in_proposal: bool,
    /// Free-form context the AI generator consumes; opaque to us.
    #[serde(default)]
    pub ai_context: Option<serde_json::Value>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Association plus the embedded full venue record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectVenueDetail {
    #[serde(flatten)]
    pub link: ProjectVenue,
    pub venue: Venue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachVenueRequest {
    pub venue_id: Uuid,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectVenueRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outreach_status: Option<OutreachStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catering_provider_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_dates: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_allocation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catering_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pros: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cons: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_in_proposal: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_context: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Response from the AI description generator.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedDescription {
    pub success: bool,
    #[serde(default)]
    pub ai_description: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ── Client (customer account) ────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub brand_tone: Option<String>,
    #[serde(default)]
    pub description_preferences: Option<String>,
    #[serde(default)]
    pub standard_requirements: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClientRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_preferences: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_requirements: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateClientRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_preferences: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_requirements: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
