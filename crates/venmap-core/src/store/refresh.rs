// ── Cache application logic ──
//
// Folds wire responses into the DataStore: bulk replacements for view
// fetches, single-entity upserts for command results. Every mutation
// re-establishes the store invariants -- the active-project pointer
// only names a cached project, and the selection sets only hold ids
// that still resolve.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use venmap_api::types as wire;

use super::DataStore;
use crate::model::{Client, ClientId, LinkId, Project, ProjectId, Venue, VenueId, VenueLink};
use crate::view::View;

impl DataStore {
    // ── Bulk replacement (view fetches) ──────────────────────────────

    /// Replace the project cache with a fresh listing.
    pub(crate) fn apply_projects(&self, projects: Vec<wire::Project>) {
        let entries = projects
            .into_iter()
            .map(|p| (p.id, Project::from(p)))
            .collect();
        self.projects.replace_all(entries);
        self.validate_active_project();
    }

    /// Replace the venue gallery cache.
    pub(crate) fn apply_venues(&self, venues: Vec<wire::Venue>) {
        let entries = venues
            .into_iter()
            .map(|v| (v.id, Venue::from(v)))
            .collect();
        self.venues.replace_all(entries);
        self.prune_selections();
    }

    /// Replace the association cache with one project's listing.
    pub(crate) fn apply_links(&self, details: Vec<wire::ProjectVenueDetail>) {
        let entries = details
            .into_iter()
            .map(|d| (d.link.id, VenueLink::from(d)))
            .collect();
        self.links.replace_all(entries);
        self.prune_selections();
    }

    /// Replace the client cache.
    pub(crate) fn apply_clients(&self, clients: Vec<wire::Client>) {
        let entries = clients
            .into_iter()
            .map(|c| (c.id, Client::from(c)))
            .collect();
        self.clients.replace_all(entries);
    }

    // ── Single-entity upserts (command results) ──────────────────────

    pub(crate) fn apply_project(&self, project: wire::Project) -> Arc<Project> {
        let id = project.id;
        let stored = Arc::new(Project::from(project));
        self.projects.upsert_arc(id, stored.clone());
        stored
    }

    pub(crate) fn apply_venue(&self, venue: wire::Venue) -> Arc<Venue> {
        let id = venue.id;
        let domain = Venue::from(venue);

        // Cached associations embed a copy of the venue; keep them in
        // step so a photo upload or edit shows up on the proposal tab.
        let stale: Vec<Arc<VenueLink>> = self
            .links
            .snapshot()
            .iter()
            .filter(|l| l.venue_id.0 == id)
            .cloned()
            .collect();
        for link in stale {
            let mut updated = (*link).clone();
            updated.venue = domain.clone();
            self.links.upsert(updated.id.0, updated);
        }

        let stored = Arc::new(domain);
        self.venues.upsert_arc(id, stored.clone());
        stored
    }

    pub(crate) fn apply_client(&self, client: wire::Client) -> Arc<Client> {
        let id = client.id;
        let stored = Arc::new(Client::from(client));
        self.clients.upsert_arc(id, stored.clone());
        stored
    }

    /// Upsert a freshly attached association (with embedded venue).
    pub(crate) fn apply_link_detail(&self, detail: wire::ProjectVenueDetail) -> Arc<VenueLink> {
        let id = detail.link.id;
        let stored = Arc::new(VenueLink::from(detail));
        self.links.upsert_arc(id, stored.clone());
        stored
    }

    /// Fold an association PATCH response onto the cached record.
    ///
    /// The update endpoint returns the bare association without the
    /// embedded venue, so the cached venue copy is carried over.
    /// Returns `None` when the association is not cached (a stale
    /// response for a context we have since left).
    pub(crate) fn apply_link_patch(&self, patch: wire::ProjectVenue) -> Option<Arc<VenueLink>> {
        let existing = self.links.get(&patch.id)?;
        let mut updated = (*existing).clone();

        updated.outreach_status = patch.outreach_status.into();
        updated.availability_dates = patch.availability_dates;
        updated.is_available = patch.is_available;
        updated.quoted_price = patch.quoted_price;
        updated.room_allocation = patch.room_allocation;
        updated.catering_description = patch.catering_description;
        updated.pros = patch.pros;
        updated.cons = patch.cons;
        updated.ai_description = patch.ai_description;
        updated.final_description = patch.final_description;
        updated.include_in_proposal = patch.include_in_proposal;
        updated.ai_context = patch.ai_context;
        updated.notes = patch.notes;
        updated.updated_at = patch.updated_at;

        let stored = Arc::new(updated);
        self.links.upsert_arc(patch.id, stored.clone());
        Some(stored)
    }

    /// Record a generated description on the cached association.
    ///
    /// The generation endpoint returns only the text, not the updated
    /// record, so the cached copy is patched in place.
    pub(crate) fn apply_generated_description(
        &self,
        project_id: ProjectId,
        venue_id: VenueId,
        text: &str,
    ) -> Option<Arc<VenueLink>> {
        let existing = self.link_for_venue(project_id, venue_id)?;
        let mut updated = (*existing).clone();
        updated.ai_description = Some(text.to_owned());
        updated.updated_at = Utc::now();

        let stored = Arc::new(updated);
        self.links.upsert_arc(stored.id.0, stored.clone());
        Some(stored)
    }

    /// Add venues created by a CSV import to the gallery cache.
    pub(crate) fn absorb_venues(&self, venues: &[Arc<Venue>]) {
        for venue in venues {
            self.venues.upsert_arc(venue.id.0, venue.clone());
        }
    }

    // ── Removals ─────────────────────────────────────────────────────

    pub(crate) fn remove_project(&self, id: ProjectId) {
        self.projects.remove(&id.0);
        let dropped = self.links.remove_where(|l| l.project_id == id);
        if dropped > 0 {
            debug!(project = %id, count = dropped, "dropped cached associations of removed project");
        }
        self.validate_active_project();
        self.prune_selections();
    }

    pub(crate) fn remove_venue(&self, id: VenueId) {
        self.venues.remove(&id.0);
        self.links.remove_where(|l| l.venue_id == id);
        self.prune_selections();
    }

    /// Remove the cached association for `(project_id, venue_id)`.
    /// Returns the dropped association id if one was cached.
    pub(crate) fn remove_link_for_venue(
        &self,
        project_id: ProjectId,
        venue_id: VenueId,
    ) -> Option<LinkId> {
        let link = self.link_for_venue(project_id, venue_id)?;
        self.links.remove(&link.id.0);
        self.prune_selections();
        Some(link.id)
    }

    pub(crate) fn remove_client(&self, id: ClientId) {
        self.clients.remove(&id.0);
    }

    // ── Metadata ─────────────────────────────────────────────────────

    pub(crate) fn mark_refreshed(&self) {
        let _ = self.last_full_refresh.send(Some(Utc::now()));
    }

    // ── Invariant maintenance ────────────────────────────────────────

    /// The active-project pointer is a weak reference: clear it when
    /// the project it names is no longer cached, and fall back to the
    /// project list if the current view depended on it.
    fn validate_active_project(&self) {
        let Some(id) = self.active_project() else {
            return;
        };
        if self.projects.contains(&id.0) {
            return;
        }

        debug!(project = %id, "active project vanished from cache -- clearing pointer");
        self.set_active_project(None);

        match self.view() {
            View::ProjectDetails(view_id) | View::ProjectVenues(view_id) if view_id == id => {
                self.set_view(View::Projects);
            }
            _ => {}
        }
    }

    /// Drop selected ids that no longer resolve against the caches.
    fn prune_selections(&self) {
        self.selected_venues
            .send_modify(|set| set.retain(|id| self.venues.contains(&id.0)));
        self.selected_links
            .send_modify(|set| set.retain(|id| self.links.contains(&id.0)));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn wire_venue(id: Uuid) -> wire::Venue {
        wire::Venue {
            id,
            name: "Halle A".into(),
            city: "Munich".into(),
            capacity: 300,
            facilities: vec![],
            event_types: vec![],
            contact_email: None,
            contact_phone: None,
            website: None,
            address: None,
            description_template: None,
            notes: None,
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            photos: vec![],
        }
    }

    fn wire_project(id: Uuid) -> wire::Project {
        wire::Project {
            id,
            user_id: Uuid::new_v4(),
            client_id: None,
            client_name: "ACME".into(),
            event_name: "Offsite".into(),
            event_date_start: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            event_date_end: NaiveDate::from_ymd_opt(2025, 9, 3).unwrap(),
            attendee_count: 80,
            budget: None,
            location_preference: None,
            requirements: vec![],
            notes: None,
            status: wire::ProjectStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            project_venues: vec![],
        }
    }

    fn wire_detail(link_id: Uuid, project_id: Uuid, venue_id: Uuid) -> wire::ProjectVenueDetail {
        wire::ProjectVenueDetail {
            link: wire::ProjectVenue {
                id: link_id,
                project_id,
                venue_id,
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
            },
            venue: wire_venue(venue_id),
        }
    }

    #[test]
    fn refresh_clears_vanished_active_project() {
        let store = DataStore::new();
        let gone = Uuid::new_v4();
        store.apply_projects(vec![wire_project(gone)]);
        store.set_active_project(Some(ProjectId(gone)));
        store.set_view(View::ProjectVenues(ProjectId(gone)));

        // Next refresh no longer contains the project.
        store.apply_projects(vec![wire_project(Uuid::new_v4())]);

        assert_eq!(store.active_project(), None);
        assert_eq!(store.view(), View::Projects);
    }

    #[test]
    fn refresh_keeps_active_project_that_still_exists() {
        let store = DataStore::new();
        let id = Uuid::new_v4();
        store.apply_projects(vec![wire_project(id)]);
        store.set_active_project(Some(ProjectId(id)));

        store.apply_projects(vec![wire_project(id), wire_project(Uuid::new_v4())]);

        assert_eq!(store.active_project(), Some(ProjectId(id)));
        assert!(store.active_project_details().is_some());
    }

    #[test]
    fn venue_removal_cascades_to_links() {
        let store = DataStore::new();
        let venue_id = Uuid::new_v4();
        let project_id = Uuid::new_v4();
        store.apply_venues(vec![wire_venue(venue_id)]);
        store.apply_links(vec![wire_detail(Uuid::new_v4(), project_id, venue_id)]);
        assert_eq!(store.links_snapshot().len(), 1);

        store.remove_venue(VenueId(venue_id));

        assert!(store.venue_by_id(VenueId(venue_id)).is_none());
        assert!(store.links_snapshot().is_empty());
    }

    #[test]
    fn removed_link_is_pruned_from_selection() {
        let store = DataStore::new();
        let link_id = Uuid::new_v4();
        let project_id = Uuid::new_v4();
        let venue_id = Uuid::new_v4();
        store.apply_links(vec![wire_detail(link_id, project_id, venue_id)]);
        store.toggle_link_selection(LinkId(link_id));
        assert_eq!(store.selected_link_count(), 1);

        let removed = store.remove_link_for_venue(ProjectId(project_id), VenueId(venue_id));

        assert_eq!(removed, Some(LinkId(link_id)));
        assert!(store.link_by_id(LinkId(link_id)).is_none());
        assert_eq!(store.selected_link_count(), 0);
    }

    #[test]
    fn venue_refresh_prunes_stale_selection() {
        let store = DataStore::new();
        let kept = Uuid::new_v4();
        let dropped = Uuid::new_v4();
        store.apply_venues(vec![wire_venue(kept), wire_venue(dropped)]);
        store.toggle_venue_selection(VenueId(kept));
        store.toggle_venue_selection(VenueId(dropped));

        store.apply_venues(vec![wire_venue(kept)]);

        assert!(store.venue_selection_contains(VenueId(kept)));
        assert!(!store.venue_selection_contains(VenueId(dropped)));
    }

    #[test]
    fn link_patch_keeps_embedded_venue() {
        let store = DataStore::new();
        let link_id = Uuid::new_v4();
        let project_id = Uuid::new_v4();
        let venue_id = Uuid::new_v4();
        store.apply_links(vec![wire_detail(link_id, project_id, venue_id)]);

        let patch = wire::ProjectVenue {
            id: link_id,
            project_id,
            venue_id,
            catering_provider_id: None,
            outreach_status: wire::OutreachStatus::Responded,
            availability_dates: None,
            is_available: Some(true),
            quoted_price: Some(1500.0),
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

        let updated = store.apply_link_patch(patch).unwrap();
        assert_eq!(
            updated.outreach_status,
            crate::model::OutreachStatus::Responded
        );
        assert_eq!(updated.quoted_price, Some(1500.0));
        assert_eq!(updated.venue.id, VenueId(venue_id));
        assert_eq!(updated.venue.name, "Halle A");
    }

    #[test]
    fn link_patch_for_uncached_association_is_ignored() {
        let store = DataStore::new();
        let patch = wire::ProjectVenue {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            venue_id: Uuid::new_v4(),
            catering_provider_id: None,
            outreach_status: wire::OutreachStatus::Sent,
            availability_dates: None,
            is_available: None,
            quoted_price: None,
            room_allocation: None,
            catering_description: None,
            pros: None,
            cons: None,
            ai_description: None,
            final_description: None,
            include_in_proposal: false,
            ai_context: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(store.apply_link_patch(patch).is_none());
    }

    #[test]
    fn venue_update_refreshes_embedded_copies() {
        let store = DataStore::new();
        let venue_id = Uuid::new_v4();
        let link_id = Uuid::new_v4();
        store.apply_links(vec![wire_detail(link_id, Uuid::new_v4(), venue_id)]);

        let mut updated = wire_venue(venue_id);
        updated.name = "Halle A (renoviert)".into();
        store.apply_venue(updated);

        let link = store.link_by_id(LinkId(link_id)).unwrap();
        assert_eq!(link.venue.name, "Halle A (renoviert)");
    }
}
