// ── Venue domain type ──

use serde::{Deserialize, Serialize};

use super::ids::{PhotoId, VenueId};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    pub venue_id: VenueId,
    pub url: String,
    pub caption: Option<String>,
    /// 0 = primary photo.
    pub display_order: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub city: String,
    /// Maximum number of attendees; always > 0.
    pub capacity: u32,
    pub facilities: Vec<String>,
    pub event_types: Vec<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    /// Fallback description used when an association carries neither a
    /// final nor an AI-generated description.
    pub description_template: Option<String>,
    pub notes: Option<String>,
    /// Sorted by `display_order`, primary first.
    pub photos: Vec<Photo>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Venue {
    pub fn primary_photo(&self) -> Option<&Photo> {
        self.photos.first()
    }

    /// Comma-joined facility list for table rendering.
    pub fn facilities_label(&self) -> String {
        self.facilities.join(", ")
    }
}
