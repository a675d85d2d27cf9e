// ── Central reactive data store ──
//
// Thread-safe storage for the entity caches plus the view-layer state
// the UIs share: current view, the weak active-project pointer, the
// busy flag, and the two selection sets. Mutations are broadcast to
// subscribers via `watch` channels.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use super::collection::EntityCollection;
use crate::model::{
    Client, ClientId, LinkId, Project, ProjectId, Venue, VenueId, VenueLink,
};
use crate::selection::SelectionSet;
use crate::stream::{EntityStream, GalleryFilter};
use crate::view::View;

/// Central reactive store for all cached entities and UI state.
///
/// All reads are wait-free; writes use fine-grained per-shard locks
/// within `DashMap`. Mutations are broadcast to subscribers via
/// `watch` channels.
pub struct DataStore {
    pub(crate) projects: EntityCollection<Project>,
    pub(crate) venues: EntityCollection<Venue>,
    pub(crate) links: EntityCollection<VenueLink>,
    pub(crate) clients: EntityCollection<Client>,

    pub(crate) view: watch::Sender<View>,
    pub(crate) active_project: watch::Sender<Option<ProjectId>>,
    pub(crate) busy: watch::Sender<bool>,

    pub(crate) selected_venues: watch::Sender<SelectionSet<VenueId>>,
    pub(crate) selected_links: watch::Sender<SelectionSet<LinkId>>,

    pub(crate) gallery_filter: watch::Sender<GalleryFilter>,

    pub(crate) last_full_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl DataStore {
    pub fn new() -> Self {
        let (view, _) = watch::channel(View::default());
        let (active_project, _) = watch::channel(None);
        let (busy, _) = watch::channel(false);
        let (selected_venues, _) = watch::channel(SelectionSet::new());
        let (selected_links, _) = watch::channel(SelectionSet::new());
        let (gallery_filter, _) = watch::channel(GalleryFilter::default());
        let (last_full_refresh, _) = watch::channel(None);

        Self {
            projects: EntityCollection::new(),
            venues: EntityCollection::new(),
            links: EntityCollection::new(),
            clients: EntityCollection::new(),
            view,
            active_project,
            busy,
            selected_venues,
            selected_links,
            gallery_filter,
            last_full_refresh,
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn projects_snapshot(&self) -> Arc<Vec<Arc<Project>>> {
        self.projects.snapshot()
    }

    pub fn venues_snapshot(&self) -> Arc<Vec<Arc<Venue>>> {
        self.venues.snapshot()
    }

    /// Associations of the most recently loaded project.
    pub fn links_snapshot(&self) -> Arc<Vec<Arc<VenueLink>>> {
        self.links.snapshot()
    }

    pub fn clients_snapshot(&self) -> Arc<Vec<Arc<Client>>> {
        self.clients.snapshot()
    }

    // ── Single-entity lookups ────────────────────────────────────────

    pub fn project_by_id(&self, id: ProjectId) -> Option<Arc<Project>> {
        self.projects.get(&id.0)
    }

    pub fn venue_by_id(&self, id: VenueId) -> Option<Arc<Venue>> {
        self.venues.get(&id.0)
    }

    pub fn link_by_id(&self, id: LinkId) -> Option<Arc<VenueLink>> {
        self.links.get(&id.0)
    }

    /// The cached association between `project_id` and `venue_id`, if
    /// that venue is attached.
    pub fn link_for_venue(
        &self,
        project_id: ProjectId,
        venue_id: VenueId,
    ) -> Option<Arc<VenueLink>> {
        self.links
            .find(|l| l.project_id == project_id && l.venue_id == venue_id)
    }

    pub fn client_by_id(&self, id: ClientId) -> Option<Arc<Client>> {
        self.clients.get(&id.0)
    }

    // ── Count accessors ──────────────────────────────────────────────

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn venue_count(&self) -> usize {
        self.venues.len()
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    pub fn has_projects(&self) -> bool {
        !self.projects.is_empty()
    }

    // ── View state ───────────────────────────────────────────────────

    pub fn view(&self) -> View {
        *self.view.borrow()
    }

    pub fn subscribe_view(&self) -> watch::Receiver<View> {
        self.view.subscribe()
    }

    pub(crate) fn set_view(&self, view: View) {
        self.view.send_modify(|v| *v = view);
    }

    /// The raw active-project pointer. May name a project that has
    /// since vanished from the cache; use
    /// [`active_project_details`](Self::active_project_details) when the
    /// record itself is needed.
    pub fn active_project(&self) -> Option<ProjectId> {
        *self.active_project.borrow()
    }

    /// Resolve the active-project pointer against the cache. Returns
    /// `None` when no pointer is set or the project is gone.
    pub fn active_project_details(&self) -> Option<Arc<Project>> {
        self.active_project().and_then(|id| self.project_by_id(id))
    }

    pub fn subscribe_active_project(&self) -> watch::Receiver<Option<ProjectId>> {
        self.active_project.subscribe()
    }

    pub(crate) fn set_active_project(&self, id: Option<ProjectId>) {
        self.active_project.send_modify(|p| *p = id);
    }

    /// Whether a view transition's fetch batch is outstanding.
    pub fn busy(&self) -> bool {
        *self.busy.borrow()
    }

    pub fn subscribe_busy(&self) -> watch::Receiver<bool> {
        self.busy.subscribe()
    }

    pub(crate) fn set_busy(&self, busy: bool) {
        self.busy.send_modify(|b| *b = busy);
    }

    // ── Selection sets ───────────────────────────────────────────────

    /// Flip a gallery venue in or out of the selection. Returns `true`
    /// if it is now selected.
    pub fn toggle_venue_selection(&self, id: VenueId) -> bool {
        let mut now_selected = false;
        self.selected_venues
            .send_modify(|set| now_selected = set.toggle(id));
        now_selected
    }

    pub fn venue_selection_contains(&self, id: VenueId) -> bool {
        self.selected_venues.borrow().contains(id)
    }

    pub fn selected_venue_ids(&self) -> Vec<VenueId> {
        self.selected_venues.borrow().to_vec()
    }

    pub fn selected_venue_count(&self) -> usize {
        self.selected_venues.borrow().len()
    }

    pub fn subscribe_venue_selection(&self) -> watch::Receiver<SelectionSet<VenueId>> {
        self.selected_venues.subscribe()
    }

    /// Flip an association in or out of the proposal-tab selection.
    pub fn toggle_link_selection(&self, id: LinkId) -> bool {
        let mut now_selected = false;
        self.selected_links
            .send_modify(|set| now_selected = set.toggle(id));
        now_selected
    }

    pub fn link_selection_contains(&self, id: LinkId) -> bool {
        self.selected_links.borrow().contains(id)
    }

    pub fn selected_link_ids(&self) -> Vec<LinkId> {
        self.selected_links.borrow().to_vec()
    }

    pub fn selected_link_count(&self) -> usize {
        self.selected_links.borrow().len()
    }

    pub fn subscribe_link_selection(&self) -> watch::Receiver<SelectionSet<LinkId>> {
        self.selected_links.subscribe()
    }

    /// Drop both selection sets. Runs on every view transition.
    pub(crate) fn clear_selections(&self) {
        self.selected_venues.send_modify(SelectionSet::clear);
        self.selected_links.send_modify(SelectionSet::clear);
    }

    // ── Gallery filter ───────────────────────────────────────────────

    pub fn gallery_filter(&self) -> GalleryFilter {
        self.gallery_filter.borrow().clone()
    }

    pub fn subscribe_gallery_filter(&self) -> watch::Receiver<GalleryFilter> {
        self.gallery_filter.subscribe()
    }

    pub(crate) fn set_gallery_filter(&self, filter: GalleryFilter) {
        self.gallery_filter.send_modify(|f| *f = filter);
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_projects(&self) -> EntityStream<Project> {
        EntityStream::new(self.projects.subscribe())
    }

    pub fn subscribe_venues(&self) -> EntityStream<Venue> {
        EntityStream::new(self.venues.subscribe())
    }

    pub fn subscribe_links(&self) -> EntityStream<VenueLink> {
        EntityStream::new(self.links.subscribe())
    }

    pub fn subscribe_clients(&self) -> EntityStream<Client> {
        EntityStream::new(self.clients.subscribe())
    }

    // ── Metadata ─────────────────────────────────────────────────────

    pub fn last_full_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_full_refresh.borrow()
    }

    /// How long ago the last refresh occurred, or `None` if never refreshed.
    pub fn data_age(&self) -> Option<chrono::Duration> {
        self.last_full_refresh().map(|t| Utc::now() - t)
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}
