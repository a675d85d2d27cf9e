// ── Project-venue association domain type ──
//
// A venue attached to a project, carrying the whole outreach workflow:
// contact status, quoted price, proposal inclusion, and the layered
// description fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ids::{LinkId, ProjectId, VenueId};
use super::venue::Venue;

/// Outreach progress for one attached venue.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutreachStatus {
    #[default]
    Draft,
    Sent,
    Pending,
    Responded,
    Declined,
}

impl OutreachStatus {
    /// Next status in the outreach cycle (wraps around).
    pub fn next(self) -> Self {
        match self {
            Self::Draft => Self::Sent,
            Self::Sent => Self::Pending,
            Self::Pending => Self::Responded,
            Self::Responded => Self::Declined,
            Self::Declined => Self::Draft,
        }
    }
}

/// Where a resolved outreach description came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionSource {
    /// Hand-edited final text on the association.
    Final,
    /// AI-generated text on the association.
    Ai,
    /// The venue's own description template.
    Template,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueLink {
    pub id: LinkId,
    pub project_id: ProjectId,
    pub venue_id: VenueId,
    pub outreach_status: OutreachStatus,
    pub availability_dates: Option<String>,
    pub is_available: Option<bool>,
    /// Quoted price in EUR; always > 0 when present.
    pub quoted_price: Option<f64>,
    pub room_allocation: Option<String>,
    pub catering_description: Option<String>,
    pub pros: Option<String>,
    pub cons: Option<String>,
    pub ai_description: Option<String>,
    pub final_description: Option<String>,
    pub include_in_proposal: bool,
    /// Free-form context consumed by the AI description generator.
    pub ai_context: Option<serde_json::Value>,
    pub notes: Option<String>,
    /// Full embedded venue record.
    pub venue: Venue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VenueLink {
    /// Resolve the outreach description with its provenance.
    ///
    /// Precedence: final over AI-generated over the venue's template.
    /// Blank strings count as absent; `None` means the caller renders
    /// its missing-description marker.
    pub fn resolved_description(&self) -> Option<(DescriptionSource, &str)> {
        fn present(s: &Option<String>) -> Option<&str> {
            s.as_deref().map(str::trim).filter(|s| !s.is_empty())
        }

        present(&self.final_description)
            .map(|s| (DescriptionSource::Final, s))
            .or_else(|| present(&self.ai_description).map(|s| (DescriptionSource::Ai, s)))
            .or_else(|| {
                present(&self.venue.description_template)
                    .map(|s| (DescriptionSource::Template, s))
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn link(final_d: Option<&str>, ai_d: Option<&str>, template: Option<&str>) -> VenueLink {
        let now = Utc::now();
        VenueLink {
            id: LinkId(Uuid::new_v4()),
            project_id: ProjectId(Uuid::new_v4()),
            venue_id: VenueId(Uuid::new_v4()),
            outreach_status: OutreachStatus::Draft,
            availability_dates: None,
            is_available: None,
            quoted_price: None,
            room_allocation: None,
            catering_description: None,
            pros: None,
            cons: None,
            ai_description: ai_d.map(Into::into),
            final_description: final_d.map(Into::into),
            include_in_proposal: false,
            ai_context: None,
            notes: None,
            venue: Venue {
                id: VenueId(Uuid::new_v4()),
                name: "Test Hall".into(),
                city: "Berlin".into(),
                capacity: 100,
                facilities: vec![],
                event_types: vec![],
                contact_email: None,
                contact_phone: None,
                website: None,
                address: None,
                description_template: template.map(Into::into),
                notes: None,
                photos: vec![],
                created_at: now,
                updated_at: now,
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn final_description_wins() {
        let l = link(Some("final"), Some("ai"), Some("template"));
        assert_eq!(
            l.resolved_description(),
            Some((DescriptionSource::Final, "final"))
        );
    }

    #[test]
    fn ai_description_beats_template() {
        let l = link(None, Some("ai"), Some("template"));
        assert_eq!(l.resolved_description(), Some((DescriptionSource::Ai, "ai")));
    }

    #[test]
    fn template_is_last_resort() {
        let l = link(None, None, Some("template"));
        assert_eq!(
            l.resolved_description(),
            Some((DescriptionSource::Template, "template"))
        );
    }

    #[test]
    fn all_absent_yields_none() {
        assert_eq!(link(None, None, None).resolved_description(), None);
    }

    #[test]
    fn blank_strings_fall_through() {
        let l = link(Some("   "), Some(""), Some("template"));
        assert_eq!(
            l.resolved_description(),
            Some((DescriptionSource::Template, "template"))
        );
    }

    #[test]
    fn outreach_cycle_wraps() {
        let mut status = OutreachStatus::Draft;
        for _ in 0..5 {
            status = status.next();
        }
        assert_eq!(status, OutreachStatus::Draft);
    }
}
