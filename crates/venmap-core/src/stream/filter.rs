// ── Gallery filter predicate ──
//
// Mirrors the backend's venue list filtering so cached snapshots can
// be narrowed without re-querying. City is an equality check with both
// sides lowercased, same as the server. Event-type filtering only
// exists here: the list endpoint has no such parameter, so it is
// always applied client-side over the cached gallery.

use venmap_api::types::VenueQuery;

use crate::model::Venue;

/// Conjunctive filter over the venue gallery.
///
/// An unset criterion matches everything. `city`, `min_capacity` and
/// `facilities` are also understood by the list endpoint; `event_types`
/// is local-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryFilter {
    /// City must equal this, compared case-insensitively.
    pub city: Option<String>,
    pub min_capacity: Option<u32>,
    /// Venue must offer every listed facility.
    pub facilities: Vec<String>,
    /// Venue must serve at least one listed event type.
    pub event_types: Vec<String>,
}

impl GalleryFilter {
    pub fn is_empty(&self) -> bool {
        self.city.is_none()
            && self.min_capacity.is_none()
            && self.facilities.is_empty()
            && self.event_types.is_empty()
    }

    pub fn matches(&self, venue: &Venue) -> bool {
        if let Some(ref city) = self.city {
            if venue.city.to_lowercase() != city.to_lowercase() {
                return false;
            }
        }

        if let Some(min) = self.min_capacity {
            if venue.capacity < min {
                return false;
            }
        }

        if !self
            .facilities
            .iter()
            .all(|f| venue.facilities.contains(f))
        {
            return false;
        }

        if !self.event_types.is_empty()
            && !self.event_types.iter().any(|t| venue.event_types.contains(t))
        {
            return false;
        }

        true
    }

    /// The server-side portion of this filter, for the list endpoint.
    pub fn server_query(&self) -> VenueQuery {
        VenueQuery {
            city: self.city.clone(),
            min_capacity: self.min_capacity,
            facilities: self.facilities.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::VenueId;
    use chrono::Utc;
    use uuid::Uuid;

    fn venue(city: &str, capacity: u32, facilities: &[&str], event_types: &[&str]) -> Venue {
        let now = Utc::now();
        Venue {
            id: VenueId(Uuid::new_v4()),
            name: "Test".into(),
            city: city.into(),
            capacity,
            facilities: facilities.iter().map(|s| s.to_string()).collect(),
            event_types: event_types.iter().map(|s| s.to_string()).collect(),
            contact_email: None,
            contact_phone: None,
            website: None,
            address: None,
            description_template: None,
            notes: None,
            photos: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = GalleryFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&venue("Berlin", 50, &[], &[])));
    }

    #[test]
    fn city_is_an_exact_match_ignoring_case() {
        let filter = GalleryFilter {
            city: Some("paris".into()),
            ..Default::default()
        };
        assert!(filter.matches(&venue("Paris", 100, &[], &[])));
        // A different city that merely contains the filter text stays out.
        assert!(!filter.matches(&venue("Paris-Saclay", 100, &[], &[])));
        assert!(!filter.matches(&venue("Hamburg", 100, &[], &[])));
    }

    #[test]
    fn capacity_is_a_lower_bound() {
        let filter = GalleryFilter {
            min_capacity: Some(200),
            ..Default::default()
        };
        assert!(filter.matches(&venue("Berlin", 200, &[], &[])));
        assert!(!filter.matches(&venue("Berlin", 199, &[], &[])));
    }

    #[test]
    fn all_facilities_required() {
        let filter = GalleryFilter {
            facilities: vec!["wifi".into(), "stage".into()],
            ..Default::default()
        };
        assert!(filter.matches(&venue("Berlin", 100, &["wifi", "stage", "bar"], &[])));
        assert!(!filter.matches(&venue("Berlin", 100, &["wifi"], &[])));
    }

    #[test]
    fn any_event_type_suffices() {
        let filter = GalleryFilter {
            event_types: vec!["conference".into(), "gala".into()],
            ..Default::default()
        };
        assert!(filter.matches(&venue("Berlin", 100, &[], &["gala"])));
        assert!(!filter.matches(&venue("Berlin", 100, &[], &["wedding"])));
    }

    #[test]
    fn server_query_excludes_event_types() {
        let filter = GalleryFilter {
            city: Some("Berlin".into()),
            min_capacity: Some(50),
            facilities: vec!["wifi".into()],
            event_types: vec!["conference".into()],
        };
        let query = filter.server_query();
        assert_eq!(query.city.as_deref(), Some("Berlin"));
        assert_eq!(query.min_capacity, Some(50));
        assert_eq!(query.facilities, vec!["wifi".to_string()]);
    }
}
