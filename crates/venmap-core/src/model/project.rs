// ── Project domain type ──

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ids::{ClientId, ProjectId, UserId};

/// Lifecycle state of a sourcing project.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProjectStatus {
    Active,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub user_id: UserId,
    pub client_id: Option<ClientId>,
    pub client_name: String,
    pub event_name: String,
    pub event_date_start: NaiveDate,
    pub event_date_end: NaiveDate,
    pub attendee_count: u32,
    /// Budget in EUR.
    pub budget: Option<f64>,
    pub location_preference: Option<String>,
    pub requirements: Vec<String>,
    pub notes: Option<String>,
    pub status: ProjectStatus,
    /// Number of venues attached (from the embedded association list;
    /// the associations themselves live in the link cache).
    pub venue_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Compact date range label, collapsing single-day events.
    pub fn date_range(&self) -> String {
        if self.event_date_start == self.event_date_end {
            self.event_date_start.format("%Y-%m-%d").to_string()
        } else {
            format!(
                "{} to {}",
                self.event_date_start.format("%Y-%m-%d"),
                self.event_date_end.format("%Y-%m-%d")
            )
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(
            ProjectStatus::from_str("Active").unwrap(),
            ProjectStatus::Active
        );
        assert_eq!(
            ProjectStatus::from_str("cancelled").unwrap(),
            ProjectStatus::Cancelled
        );
    }

    #[test]
    fn status_displays_lowercase() {
        assert_eq!(ProjectStatus::Completed.to_string(), "completed");
    }
}
