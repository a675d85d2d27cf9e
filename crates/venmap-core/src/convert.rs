// ── API-to-domain type conversions ──
//
// Bridges raw `venmap_api` wire types into canonical `venmap_core::model`
// domain types, and command request payloads back out to wire bodies.
// Each `From` impl swaps raw UUIDs for typed ids, maps enums, and
// normalizes ordering where the backend leaves it unspecified.

use venmap_api::types as wire;

use crate::command::{CsvImportReport, CsvRowError, GenerationOutcome};
use crate::command::requests;
use crate::model::{
    Client, ClientId, LinkId, OutreachStatus, Photo, PhotoId, Project, ProjectId, ProjectStatus,
    User, UserId, UserRole, Venue, VenueId, VenueLink,
};

// ── Enums ──────────────────────────────────────────────────────────

impl From<wire::ProjectStatus> for ProjectStatus {
    fn from(s: wire::ProjectStatus) -> Self {
        match s {
            wire::ProjectStatus::Active => Self::Active,
            wire::ProjectStatus::Completed => Self::Completed,
            wire::ProjectStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<ProjectStatus> for wire::ProjectStatus {
    fn from(s: ProjectStatus) -> Self {
        match s {
            ProjectStatus::Active => Self::Active,
            ProjectStatus::Completed => Self::Completed,
            ProjectStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<wire::OutreachStatus> for OutreachStatus {
    fn from(s: wire::OutreachStatus) -> Self {
        match s {
            wire::OutreachStatus::Draft => Self::Draft,
            wire::OutreachStatus::Sent => Self::Sent,
            wire::OutreachStatus::Pending => Self::Pending,
            wire::OutreachStatus::Responded => Self::Responded,
            wire::OutreachStatus::Declined => Self::Declined,
        }
    }
}

impl From<OutreachStatus> for wire::OutreachStatus {
    fn from(s: OutreachStatus) -> Self {
        match s {
            OutreachStatus::Draft => Self::Draft,
            OutreachStatus::Sent => Self::Sent,
            OutreachStatus::Pending => Self::Pending,
            OutreachStatus::Responded => Self::Responded,
            OutreachStatus::Declined => Self::Declined,
        }
    }
}

impl From<wire::UserRole> for UserRole {
    fn from(r: wire::UserRole) -> Self {
        match r {
            wire::UserRole::EventManager => Self::EventManager,
            wire::UserRole::Admin => Self::Admin,
        }
    }
}

// ── Venue ──────────────────────────────────────────────────────────

impl From<wire::Photo> for Photo {
    fn from(p: wire::Photo) -> Self {
        Photo {
            id: PhotoId(p.id),
            venue_id: VenueId(p.venue_id),
            url: p.url,
            caption: p.caption,
            display_order: p.display_order,
        }
    }
}

impl From<wire::Venue> for Venue {
    fn from(v: wire::Venue) -> Self {
        // The backend returns photos in insertion order; sort so the
        // primary photo (display_order 0) is always first.
        let mut photos: Vec<Photo> = v.photos.into_iter().map(Photo::from).collect();
        photos.sort_by_key(|p| p.display_order);

        Venue {
            id: VenueId(v.id),
            name: v.name,
            city: v.city,
            capacity: v.capacity,
            facilities: v.facilities,
            event_types: v.event_types,
            contact_email: v.contact_email,
            contact_phone: v.contact_phone,
            website: v.website,
            address: v.address,
            description_template: v.description_template,
            notes: v.notes,
            photos,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

// ── Project ────────────────────────────────────────────────────────

impl From<wire::Project> for Project {
    fn from(p: wire::Project) -> Self {
        Project {
            id: ProjectId(p.id),
            user_id: UserId(p.user_id),
            client_id: p.client_id.map(ClientId),
            client_name: p.client_name,
            event_name: p.event_name,
            event_date_start: p.event_date_start,
            event_date_end: p.event_date_end,
            attendee_count: p.attendee_count,
            budget: p.budget,
            location_preference: p.location_preference,
            requirements: p.requirements,
            notes: p.notes,
            status: p.status.into(),
            venue_count: p.project_venues.len(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

// ── Project-venue association ──────────────────────────────────────

impl From<wire::ProjectVenueDetail> for VenueLink {
    fn from(d: wire::ProjectVenueDetail) -> Self {
        let l = d.link;
        VenueLink {
            id: LinkId(l.id),
            project_id: ProjectId(l.project_id),
            venue_id: VenueId(l.venue_id),
            outreach_status: l.outreach_status.into(),
            availability_dates: l.availability_dates,
            is_available: l.is_available,
            quoted_price: l.quoted_price,
            room_allocation: l.room_allocation,
            catering_description: l.catering_description,
            pros: l.pros,
            cons: l.cons,
            ai_description: l.ai_description,
            final_description: l.final_description,
            include_in_proposal: l.include_in_proposal,
            ai_context: l.ai_context,
            notes: l.notes,
            venue: d.venue.into(),
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

// ── Client ─────────────────────────────────────────────────────────

impl From<wire::Client> for Client {
    fn from(c: wire::Client) -> Self {
        Client {
            id: ClientId(c.id),
            name: c.name,
            industry: c.industry,
            website: c.website,
            logo_url: c.logo_url,
            brand_tone: c.brand_tone,
            description_preferences: c.description_preferences,
            standard_requirements: c.standard_requirements,
            notes: c.notes,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

// ── User ───────────────────────────────────────────────────────────

impl From<wire::User> for User {
    fn from(u: wire::User) -> Self {
        User {
            id: UserId(u.id),
            name: u.name,
            email: u.email,
            phone: u.phone,
            signature_block: u.signature_block,
            role: u.role.into(),
            is_active: u.is_active,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

// ── Command outcomes ───────────────────────────────────────────────

impl From<wire::VenueUploadResult> for CsvImportReport {
    fn from(r: wire::VenueUploadResult) -> Self {
        CsvImportReport {
            total_rows: r.total_rows,
            successful: r.successful,
            failed: r.failed,
            created: r
                .created_venues
                .into_iter()
                .map(|v| std::sync::Arc::new(Venue::from(v)))
                .collect(),
            errors: r
                .errors
                .into_iter()
                .map(|e| CsvRowError {
                    row: e.row,
                    field: e.field,
                    message: e.message,
                })
                .collect(),
        }
    }
}

impl From<wire::GeneratedDescription> for GenerationOutcome {
    fn from(g: wire::GeneratedDescription) -> Self {
        GenerationOutcome {
            success: g.success,
            ai_description: g.ai_description,
            message: g.message,
        }
    }
}

// ── Request conversions (domain to wire) ───────────────────────────

impl From<requests::CreateProjectRequest> for wire::CreateProjectRequest {
    fn from(r: requests::CreateProjectRequest) -> Self {
        wire::CreateProjectRequest {
            client_id: r.client_id.map(|id| id.0),
            client_name: r.client_name,
            event_name: r.event_name,
            event_date_start: r.event_date_start,
            event_date_end: r.event_date_end,
            attendee_count: r.attendee_count,
            budget: r.budget,
            location_preference: r.location_preference,
            requirements: r.requirements,
            notes: r.notes,
        }
    }
}

impl From<requests::UpdateProjectRequest> for wire::UpdateProjectRequest {
    fn from(r: requests::UpdateProjectRequest) -> Self {
        wire::UpdateProjectRequest {
            client_id: r.client_id.map(|id| id.0),
            client_name: r.client_name,
            event_name: r.event_name,
            event_date_start: r.event_date_start,
            event_date_end: r.event_date_end,
            attendee_count: r.attendee_count,
            budget: r.budget,
            location_preference: r.location_preference,
            requirements: r.requirements,
            status: r.status.map(Into::into),
            notes: r.notes,
        }
    }
}

impl From<requests::CreateVenueRequest> for wire::CreateVenueRequest {
    fn from(r: requests::CreateVenueRequest) -> Self {
        wire::CreateVenueRequest {
            name: r.name,
            city: r.city,
            capacity: r.capacity,
            facilities: r.facilities,
            event_types: r.event_types,
            contact_email: r.contact_email,
            contact_phone: r.contact_phone,
            website: r.website,
            address: r.address,
            description_template: r.description_template,
            notes: r.notes,
        }
    }
}

impl From<requests::UpdateVenueRequest> for wire::UpdateVenueRequest {
    fn from(r: requests::UpdateVenueRequest) -> Self {
        wire::UpdateVenueRequest {
            name: r.name,
            city: r.city,
            capacity: r.capacity,
            facilities: r.facilities,
            event_types: r.event_types,
            contact_email: r.contact_email,
            contact_phone: r.contact_phone,
            website: r.website,
            address: r.address,
            description_template: r.description_template,
            notes: r.notes,
        }
    }
}

impl From<requests::UpdateLinkRequest> for wire::UpdateProjectVenueRequest {
    fn from(r: requests::UpdateLinkRequest) -> Self {
        wire::UpdateProjectVenueRequest {
            outreach_status: r.outreach_status.map(Into::into),
            catering_provider_id: None,
            availability_dates: r.availability_dates,
            is_available: r.is_available,
            quoted_price: r.quoted_price,
            room_allocation: r.room_allocation,
            catering_description: r.catering_description,
            pros: r.pros,
            cons: r.cons,
            ai_description: r.ai_description,
            final_description: r.final_description,
            include_in_proposal: r.include_in_proposal,
            ai_context: r.ai_context,
            notes: r.notes,
        }
    }
}

impl From<requests::CreateClientRequest> for wire::CreateClientRequest {
    fn from(r: requests::CreateClientRequest) -> Self {
        wire::CreateClientRequest {
            name: r.name,
            industry: r.industry,
            website: r.website,
            logo_url: r.logo_url,
            brand_tone: r.brand_tone,
            description_preferences: r.description_preferences,
            standard_requirements: r.standard_requirements,
            notes: r.notes,
        }
    }
}

impl From<requests::UpdateClientRequest> for wire::UpdateClientRequest {
    fn from(r: requests::UpdateClientRequest) -> Self {
        wire::UpdateClientRequest {
            name: r.name,
            industry: r.industry,
            website: r.website,
            logo_url: r.logo_url,
            brand_tone: r.brand_tone,
            description_preferences: r.description_preferences,
            standard_requirements: r.standard_requirements,
            notes: r.notes,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn wire_photo(order: u32) -> wire::Photo {
        wire::Photo {
            id: Uuid::new_v4(),
            venue_id: Uuid::new_v4(),
            url: format!("https://cdn.example/p{order}.jpg"),
            caption: None,
            display_order: order,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn wire_venue() -> wire::Venue {
        wire::Venue {
            id: Uuid::new_v4(),
            name: "Kongresshalle".into(),
            city: "Leipzig".into(),
            capacity: 800,
            facilities: vec!["wifi".into(), "stage".into()],
            event_types: vec!["conference".into()],
            contact_email: None,
            contact_phone: None,
            website: None,
            address: None,
            description_template: None,
            notes: None,
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            photos: vec![wire_photo(2), wire_photo(0), wire_photo(1)],
        }
    }

    #[test]
    fn venue_photos_sorted_primary_first() {
        let venue: Venue = wire_venue().into();
        let orders: Vec<u32> = venue.photos.iter().map(|p| p.display_order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(venue.primary_photo().unwrap().display_order, 0);
    }

    #[test]
    fn project_counts_embedded_associations() {
        let venue = wire_venue();
        let link = wire::ProjectVenue {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            venue_id: venue.id,
            catering_provider_id: None,
            outreach_status: wire::OutreachStatus::Draft,
            availability_dates: None,
            is_available: None,
            quoted_price: None,
            room_allocation: None,
            catering_description: None,
            pros: None,
            cons: None,
            ai_description: None,
            final_description: None,
            include_in_proposal: true,
            ai_context: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let project = wire::Project {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            client_id: None,
            client_name: "ACME".into(),
            event_name: "Kickoff".into(),
            event_date_start: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            event_date_end: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            attendee_count: 120,
            budget: None,
            location_preference: None,
            requirements: vec![],
            notes: None,
            status: wire::ProjectStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            project_venues: vec![wire::ProjectVenueDetail { link, venue }],
        };

        let domain: Project = project.into();
        assert_eq!(domain.venue_count, 1);
        assert_eq!(domain.status, ProjectStatus::Active);
    }

    #[test]
    fn link_detail_carries_embedded_venue() {
        let venue = wire_venue();
        let venue_id = venue.id;
        let detail = wire::ProjectVenueDetail {
            link: wire::ProjectVenue {
                id: Uuid::new_v4(),
                project_id: Uuid::new_v4(),
                venue_id,
                catering_provider_id: None,
                outreach_status: wire::OutreachStatus::Responded,
                availability_dates: Some("June 1-3".into()),
                is_available: Some(true),
                quoted_price: Some(4200.0),
                room_allocation: None,
                catering_description: None,
                pros: None,
                cons: None,
                ai_description: None,
                final_description: None,
                include_in_proposal: true,
                ai_context: None,
                notes: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            venue,
        };

        let link: VenueLink = detail.into();
        assert_eq!(link.venue.id, VenueId(venue_id));
        assert_eq!(link.outreach_status, OutreachStatus::Responded);
        assert_eq!(link.quoted_price, Some(4200.0));
    }

    #[test]
    fn outreach_status_round_trips() {
        for status in [
            OutreachStatus::Draft,
            OutreachStatus::Sent,
            OutreachStatus::Pending,
            OutreachStatus::Responded,
            OutreachStatus::Declined,
        ] {
            let wire_status: wire::OutreachStatus = status.into();
            assert_eq!(OutreachStatus::from(wire_status), status);
        }
    }

    #[test]
    fn update_link_request_preserves_unset_fields() {
        let req = requests::UpdateLinkRequest {
            outreach_status: Some(OutreachStatus::Sent),
            ..Default::default()
        };
        let wire_req: wire::UpdateProjectVenueRequest = req.into();
        assert_eq!(wire_req.outreach_status, Some(wire::OutreachStatus::Sent));
        assert!(wire_req.quoted_price.is_none());
        assert!(wire_req.final_description.is_none());

        let body = serde_json::to_value(&wire_req).unwrap();
        assert_eq!(body, serde_json::json!({ "outreach_status": "sent" }));
    }
}
