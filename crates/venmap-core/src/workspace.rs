// ── Workspace ──
//
// Full lifecycle management for one logged-in session against the
// backend. Handles authentication, view transitions with their fetch
// batches, background refresh, command routing, and reactive data
// streaming through the DataStore.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::command::{
    AttachReport, Command, CommandEnvelope, CommandResult, CsvImportReport, GenerationOutcome,
};
use crate::config::{AuthCredentials, BackendConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::{Client, Project, User, Venue, VenueId, VenueLink};
use crate::session::{Session, SessionState};
use crate::store::DataStore;
use crate::stream::{EntityStream, GalleryFilter};
use crate::view::{plan_transition, ActiveProjectEffect, FetchKind, View};

use secrecy::SecretString;
use venmap_api::transport::{TlsMode, TransportConfig};
use venmap_api::types as wire;
use venmap_api::ApiClient;

const COMMAND_CHANNEL_SIZE: usize = 64;

// ── ConnectionState ──────────────────────────────────────────────

/// Connection state observable by consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

// ── Workspace ────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<WorkspaceInner>`. Manages the full
/// session lifecycle: authentication, view-driven data fetching,
/// command routing, and reactive entity streaming.
#[derive(Clone)]
pub struct Workspace {
    inner: Arc<WorkspaceInner>,
}

struct WorkspaceInner {
    config: BackendConfig,
    api: ApiClient,
    store: Arc<DataStore>,
    session: Session,
    connection_state: watch::Sender<ConnectionState>,
    /// Bumped at the start of every view transition. A fetch batch only
    /// applies if the counter still holds its value when the responses
    /// arrive; superseded batches are discarded wholesale.
    generation: AtomicU64,
    command_tx: mpsc::Sender<CommandEnvelope>,
    command_rx: Mutex<Option<mpsc::Receiver<CommandEnvelope>>>,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Workspace {
    /// Create a new Workspace from configuration. Does NOT authenticate --
    /// call [`connect()`](Self::connect) to log in and start background tasks.
    pub fn new(config: BackendConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let api = ApiClient::new(config.url.clone(), &transport)?;

        let store = Arc::new(DataStore::new());
        let (connection_state, _) = watch::channel(ConnectionState::Disconnected);
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
        let cancel = CancellationToken::new();

        Ok(Self {
            inner: Arc::new(WorkspaceInner {
                config,
                api,
                store,
                session: Session::new(),
                connection_state,
                generation: AtomicU64::new(0),
                command_tx,
                command_rx: Mutex::new(Some(command_rx)),
                cancel,
                task_handles: Mutex::new(Vec::new()),
            }),
        })
    }

    /// Access the workspace configuration.
    pub fn config(&self) -> &BackendConfig {
        &self.inner.config
    }

    /// Access the underlying DataStore.
    pub fn store(&self) -> &Arc<DataStore> {
        &self.inner.store
    }

    // ── Connection lifecycle ─────────────────────────────────────

    /// Connect using the credentials from the configuration.
    ///
    /// Authenticates, loads the initial project list, and spawns
    /// background tasks (periodic refresh, command processor).
    pub async fn connect(&self) -> Result<(), CoreError> {
        match self.inner.config.auth.clone() {
            AuthCredentials::Credentials { email, password } => {
                self.login(&email, &password).await
            }
            AuthCredentials::Token(token) => self.resume(token).await,
        }
    }

    /// Log in with explicit credentials (the TUI login screen).
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<(), CoreError> {
        let _ = self
            .inner
            .connection_state
            .send(ConnectionState::Connecting);

        if let Err(e) = self.inner.api.login(email, password).await {
            let _ = self.inner.connection_state.send(ConnectionState::Failed);
            return Err(e.into());
        }
        debug!("login successful");

        self.start_session().await
    }

    /// Adopt a pre-issued bearer token instead of logging in.
    async fn resume(&self, token: SecretString) -> Result<(), CoreError> {
        let _ = self
            .inner
            .connection_state
            .send(ConnectionState::Connecting);

        self.inner.api.set_token(token);
        debug!("using pre-issued token -- skipping login");

        self.start_session().await
    }

    /// Shared tail of both auth paths: identify the account (which also
    /// validates a pre-issued token), load the initial view, and spawn
    /// the background tasks.
    async fn start_session(&self) -> Result<(), CoreError> {
        let user = match self.inner.api.me().await {
            Ok(user) => user,
            Err(e) => {
                let _ = self.inner.connection_state.send(ConnectionState::Failed);
                return Err(e.into());
            }
        };
        debug!(email = %user.email, "authenticated");
        self.inner.session.set_logged_in(User::from(user));

        // Initial data load: the session always starts on the project list.
        if let Err(e) = self.load_view(View::Projects).await {
            let _ = self.inner.connection_state.send(ConnectionState::Failed);
            return Err(e);
        }

        // Background tasks survive logout/login cycles; the taken
        // receiver doubles as the spawn-once guard.
        let mut handles = self.inner.task_handles.lock().await;
        if let Some(rx) = self.inner.command_rx.lock().await.take() {
            let workspace = self.clone();
            handles.push(tokio::spawn(command_processor_task(workspace, rx)));

            let interval_secs = self.inner.config.refresh_interval_secs;
            if interval_secs > 0 {
                let workspace = self.clone();
                let cancel = self.inner.cancel.clone();
                handles.push(tokio::spawn(refresh_task(workspace, interval_secs, cancel)));
            }
        }
        drop(handles);

        let _ = self.inner.connection_state.send(ConnectionState::Connected);
        info!("connected to backend");
        Ok(())
    }

    /// Log out deliberately. The token is dropped client-side; the
    /// workspace stays usable for a fresh [`login()`](Self::login).
    pub fn logout(&self) {
        self.inner.api.logout();
        self.end_session();
        info!("logged out");
    }

    /// Shut down: cancels background tasks and ends the session.
    pub async fn disconnect(&self) {
        self.inner.cancel.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        drop(handles);

        if self.inner.session.current().is_logged_in() {
            self.inner.api.logout();
            self.end_session();
        }
        debug!("disconnected");
    }

    /// Forced logout after the backend rejected our token mid-session.
    ///
    /// Any number of in-flight requests can observe the same expiry
    /// concurrently; the session latch admits exactly one of them here,
    /// the rest return without side effects.
    fn force_logout(&self) {
        if !self.inner.session.begin_logout() {
            return;
        }
        warn!("session expired -- forcing logout");
        self.inner.api.clear_token();
        self.end_session();
    }

    /// Scrub the per-session state. Entity caches are left in place;
    /// the next login replaces them through the initial view load.
    fn end_session(&self) {
        self.inner.session.set_logged_out();
        let store = &self.inner.store;
        store.clear_selections();
        store.set_active_project(None);
        store.set_view(View::Projects);
        store.set_busy(false);
        let _ = self
            .inner
            .connection_state
            .send(ConnectionState::Disconnected);
    }

    // ── Session observation ──────────────────────────────────────

    /// Subscribe to connection state changes.
    pub fn connection_state(&self) -> watch::Receiver<ConnectionState> {
        self.inner.connection_state.subscribe()
    }

    /// Subscribe to login/logout transitions. A flip to `LoggedOut`
    /// while the UI is running is the redirect-to-login signal.
    pub fn session_state(&self) -> watch::Receiver<SessionState> {
        self.inner.session.subscribe()
    }

    pub fn current_user(&self) -> Option<Arc<User>> {
        self.inner.session.user()
    }

    // ── View transitions ─────────────────────────────────────────

    /// Navigate to `target`: plan the transition, run its fetches, and
    /// switch the view.
    ///
    /// Clears both selection sets up front. The fetch batch runs
    /// concurrently; individual failures keep the previous cache and
    /// the view still switches, but an expired session aborts the
    /// transition and forces a logout. If a later navigation starts
    /// while the batch is in flight, its results are discarded.
    pub async fn load_view(&self, target: View) -> Result<(), CoreError> {
        self.run_transition(target, true).await
    }

    /// Re-fetch the current view's data without touching the selection
    /// sets. Used by the periodic refresh and the manual reload key.
    pub async fn reload(&self) -> Result<(), CoreError> {
        let current = self.inner.store.view();
        self.run_transition(current, false).await
    }

    /// Drop the active-project pointer. Top-level navigation calls this
    /// before entering the gallery or client views; project-context
    /// links do not.
    pub fn clear_active_project(&self) {
        self.inner.store.set_active_project(None);
    }

    /// Store a new gallery filter and, when the gallery is showing,
    /// re-fetch it. The selection survives; ids that drop out of the
    /// filtered cache are pruned by the store.
    pub async fn apply_gallery_filter(&self, filter: GalleryFilter) -> Result<(), CoreError> {
        self.inner.store.set_gallery_filter(filter);
        if matches!(self.inner.store.view(), View::Venues) {
            self.run_transition(View::Venues, false).await
        } else {
            Ok(())
        }
    }

    async fn run_transition(&self, target: View, clear_selection: bool) -> Result<(), CoreError> {
        if !self.inner.session.current().is_logged_in() {
            return Err(CoreError::NotLoggedIn);
        }
        let store = &self.inner.store;

        // Claim a generation before the first await so later
        // navigations invalidate this one.
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        store.set_busy(true);
        if clear_selection {
            store.clear_selections();
        }

        let plan = plan_transition(target, store.active_project(), store.has_projects());
        match plan.active_project {
            ActiveProjectEffect::Clear => store.set_active_project(None),
            ActiveProjectEffect::Keep => {}
            ActiveProjectEffect::Set(id) => store.set_active_project(Some(id)),
        }

        let fetched = self.run_view_fetches(&plan.fetches).await;

        if !self.is_current(generation) {
            debug!(?target, generation, "discarding superseded view fetch");
            return Ok(());
        }

        match fetched {
            Ok(outcomes) => {
                for outcome in outcomes {
                    self.apply_outcome(outcome);
                }
                store.set_view(plan.view);
                store.mark_refreshed();
                store.set_busy(false);
                Ok(())
            }
            Err(e) => {
                store.set_busy(false);
                Err(e)
            }
        }
    }

    /// Run a transition's fetches concurrently.
    ///
    /// A failed fetch is logged and dropped from the batch so the view
    /// renders from whatever is cached -- except an expired session,
    /// which kills the whole transition.
    async fn run_view_fetches(
        &self,
        fetches: &[FetchKind],
    ) -> Result<Vec<FetchOutcome>, CoreError> {
        let results =
            futures_util::future::join_all(fetches.iter().map(|f| self.run_fetch(*f))).await;

        let mut outcomes = Vec::with_capacity(results.len());
        for (fetch, result) in fetches.iter().zip(results) {
            match result {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) if e.is_auth_expired() => {
                    self.force_logout();
                    return Err(CoreError::SessionExpired);
                }
                Err(e) => {
                    warn!(?fetch, error = %e, "view fetch failed -- keeping cached data");
                }
            }
        }
        Ok(outcomes)
    }

    async fn run_fetch(&self, fetch: FetchKind) -> Result<FetchOutcome, venmap_api::Error> {
        let api = &self.inner.api;
        match fetch {
            FetchKind::Projects => Ok(FetchOutcome::Projects(api.list_projects(None).await?)),
            FetchKind::Project(id) => Ok(FetchOutcome::Project(api.get_project(id.0).await?)),
            FetchKind::ProjectVenues(id) => {
                Ok(FetchOutcome::Links(api.list_project_venues(id.0).await?))
            }
            FetchKind::Venues => {
                let query = self.inner.store.gallery_filter().server_query();
                Ok(FetchOutcome::Venues(api.list_venues(&query).await?))
            }
            FetchKind::Clients => Ok(FetchOutcome::Clients(api.list_clients().await?)),
            FetchKind::Client(id) => Ok(FetchOutcome::Client(api.get_client(id.0).await?)),
        }
    }

    fn apply_outcome(&self, outcome: FetchOutcome) {
        let store = &self.inner.store;
        match outcome {
            FetchOutcome::Projects(projects) => store.apply_projects(projects),
            FetchOutcome::Project(project) => {
                store.apply_project(project);
            }
            FetchOutcome::Links(details) => store.apply_links(details),
            FetchOutcome::Venues(venues) => store.apply_venues(venues),
            FetchOutcome::Clients(clients) => store.apply_clients(clients),
            FetchOutcome::Client(client) => {
                store.apply_client(client);
            }
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.inner.generation.load(Ordering::SeqCst) == generation
    }

    // ── Command execution ────────────────────────────────────────

    /// Execute a command against the backend.
    ///
    /// Sends the command through the internal channel to the command
    /// processor task and awaits the result.
    pub async fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        if !self.inner.session.current().is_logged_in() {
            return Err(CoreError::NotLoggedIn);
        }

        let (tx, rx) = tokio::sync::oneshot::channel();

        self.inner
            .command_tx
            .send(CommandEnvelope {
                command: cmd,
                response_tx: tx,
            })
            .await
            .map_err(|_| CoreError::SessionClosed)?;

        rx.await.map_err(|_| CoreError::SessionClosed)?
    }

    /// Attach venues to the active project.
    ///
    /// Fails fast without touching the network when no active project
    /// is set, and redirects to the project list so the user can pick
    /// one. This is the gallery's "add to project" path.
    pub async fn attach_to_active(
        &self,
        venue_ids: Vec<VenueId>,
    ) -> Result<AttachReport, CoreError> {
        let Some(project) = self.inner.store.active_project_details() else {
            warn!("attach requested with no active project -- redirecting to project list");
            self.load_view(View::Projects).await?;
            return Err(CoreError::NoActiveProject);
        };
        if venue_ids.is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "No venues selected".into(),
            });
        }

        match self
            .execute(Command::AttachVenues {
                project_id: project.id,
                venue_ids,
            })
            .await?
        {
            CommandResult::Attach(report) => Ok(report),
            _ => Err(CoreError::Internal("unexpected attach result".into())),
        }
    }

    /// Attach the current gallery selection to the active project.
    pub async fn attach_selection(&self) -> Result<AttachReport, CoreError> {
        let selected = self.inner.store.selected_venue_ids();
        self.attach_to_active(selected).await
    }

    // ── One-shot convenience ─────────────────────────────────────

    /// One-shot: connect, run closure, disconnect.
    ///
    /// Optimized for CLI: disables the periodic refresh since we only
    /// need a single request-response cycle.
    pub async fn oneshot<F, Fut, T>(config: BackendConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Workspace) -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let mut cfg = config;
        cfg.refresh_interval_secs = 0;

        let workspace = Workspace::new(cfg)?;
        workspace.connect().await?;
        let result = f(workspace.clone()).await;
        workspace.disconnect().await;
        result
    }

    // ── Snapshot accessors (delegate to DataStore) ───────────────

    pub fn projects_snapshot(&self) -> Arc<Vec<Arc<Project>>> {
        self.inner.store.projects_snapshot()
    }

    pub fn venues_snapshot(&self) -> Arc<Vec<Arc<Venue>>> {
        self.inner.store.venues_snapshot()
    }

    pub fn links_snapshot(&self) -> Arc<Vec<Arc<VenueLink>>> {
        self.inner.store.links_snapshot()
    }

    pub fn clients_snapshot(&self) -> Arc<Vec<Arc<Client>>> {
        self.inner.store.clients_snapshot()
    }

    // ── Stream accessors (delegate to DataStore) ─────────────────

    pub fn projects(&self) -> EntityStream<Project> {
        self.inner.store.subscribe_projects()
    }

    pub fn venues(&self) -> EntityStream<Venue> {
        self.inner.store.subscribe_venues()
    }

    pub fn links(&self) -> EntityStream<VenueLink> {
        self.inner.store.subscribe_links()
    }

    pub fn clients(&self) -> EntityStream<Client> {
        self.inner.store.subscribe_clients()
    }
}

/// One transition fetch, fetched but not yet folded into the store.
///
/// Buffering instead of applying eagerly is what makes stale-batch
/// discard possible: nothing touches the caches until the whole batch
/// has passed the generation check.
enum FetchOutcome {
    Projects(Vec<wire::Project>),
    Project(wire::Project),
    Links(Vec<wire::ProjectVenueDetail>),
    Venues(Vec<wire::Venue>),
    Clients(Vec<wire::Client>),
    Client(wire::Client),
}

// ── Background tasks ─────────────────────────────────────────────

/// Periodically re-fetch the current view's data.
async fn refresh_task(workspace: Workspace, interval_secs: u64, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                if !workspace.inner.session.current().is_logged_in() {
                    continue;
                }
                if let Err(e) = workspace.reload().await {
                    warn!(error = %e, "periodic refresh failed");
                }
            }
        }
    }
}

/// Process commands from the mpsc channel, routing each to the
/// matching REST call.
async fn command_processor_task(workspace: Workspace, mut rx: mpsc::Receiver<CommandEnvelope>) {
    let cancel = workspace.inner.cancel.clone();

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            envelope = rx.recv() => {
                let Some(envelope) = envelope else { break };
                let result = route_command(&workspace, envelope.command).await;
                if let Err(ref e) = result {
                    if e.is_session_expired() {
                        workspace.force_logout();
                    }
                }
                let _ = envelope.response_tx.send(result);
            }
        }
    }
}

// ── Command routing ──────────────────────────────────────────────

/// Route a command to the backend and fold the response into the
/// store, so the caches stay current without a full view reload.
async fn route_command(workspace: &Workspace, cmd: Command) -> Result<CommandResult, CoreError> {
    let api = &workspace.inner.api;
    let store = &workspace.inner.store;

    match cmd {
        // ── Project CRUD ─────────────────────────────────────────

        Command::CreateProject(request) => {
            let project = api.create_project(&request.into()).await?;
            Ok(CommandResult::Project(store.apply_project(project)))
        }

        Command::UpdateProject { id, update } => {
            let project = api.update_project(id.0, &update.into()).await?;
            Ok(CommandResult::Project(store.apply_project(project)))
        }

        Command::DeleteProject { id } => {
            api.delete_project(id.0).await?;
            store.remove_project(id);
            Ok(CommandResult::Ok)
        }

        // ── Venue CRUD ───────────────────────────────────────────

        Command::CreateVenue(request) => {
            let venue = api.create_venue(&request.into()).await?;
            Ok(CommandResult::Venue(store.apply_venue(venue)))
        }

        Command::UpdateVenue { id, update } => {
            let venue = api.update_venue(id.0, &update.into()).await?;
            Ok(CommandResult::Venue(store.apply_venue(venue)))
        }

        Command::DeleteVenue { id } => {
            api.delete_venue(id.0).await?;
            store.remove_venue(id);
            Ok(CommandResult::Ok)
        }

        Command::ImportVenuesCsv { file_name, bytes } => {
            let result = api.upload_venues_csv(&file_name, bytes).await?;
            let report = CsvImportReport::from(result);
            store.absorb_venues(&report.created);
            info!(
                total = report.total_rows,
                successful = report.successful,
                failed = report.failed,
                "venue CSV import finished"
            );
            Ok(CommandResult::Import(report))
        }

        Command::DownloadCsvTemplate => {
            let template = api.venues_csv_template().await?;
            Ok(CommandResult::CsvTemplate(template))
        }

        Command::UploadPhoto {
            venue_id,
            file_name,
            mime,
            bytes,
            caption,
            display_order,
        } => {
            api.upload_photo(
                venue_id.0,
                &file_name,
                &mime,
                bytes,
                caption.as_deref(),
                display_order.unwrap_or(0),
            )
            .await?;
            // The photo response has no venue context; re-fetch the
            // venue so the cached photo list is authoritative.
            let venue = api.get_venue(venue_id.0).await?;
            Ok(CommandResult::Venue(store.apply_venue(venue)))
        }

        Command::DeletePhoto { venue_id, photo_id } => {
            api.delete_photo(venue_id.0, photo_id.0).await?;
            let venue = api.get_venue(venue_id.0).await?;
            Ok(CommandResult::Venue(store.apply_venue(venue)))
        }

        // ── Association workflow ─────────────────────────────────

        Command::AttachVenues {
            project_id,
            venue_ids,
        } => {
            let mut attached = Vec::new();
            let mut failed = Vec::new();
            for venue_id in venue_ids {
                match api.attach_venue(project_id.0, venue_id.0).await {
                    Ok(detail) => attached.push(store.apply_link_detail(detail)),
                    // Session death aborts the batch; everything else
                    // is per-venue.
                    Err(e) if e.is_auth_expired() => return Err(e.into()),
                    Err(e) => {
                        warn!(venue = %venue_id, error = %e, "attach failed");
                        failed.push((venue_id, e.into()));
                    }
                }
            }
            debug!(
                project = %project_id,
                attached = attached.len(),
                failed = failed.len(),
                "attach batch finished"
            );
            Ok(CommandResult::Attach(AttachReport { attached, failed }))
        }

        Command::DetachVenue {
            project_id,
            venue_id,
        } => {
            api.detach_venue(project_id.0, venue_id.0).await?;
            store.remove_link_for_venue(project_id, venue_id);
            Ok(CommandResult::Ok)
        }

        Command::UpdateLink {
            project_id,
            venue_id,
            update,
        } => {
            let patch = api
                .update_project_venue(project_id.0, venue_id.0, &update.into())
                .await?;
            match store.apply_link_patch(patch) {
                Some(link) => Ok(CommandResult::Link(link)),
                // Not cached (headless use); the write still happened.
                None => Ok(CommandResult::Ok),
            }
        }

        Command::GenerateDescription {
            project_id,
            venue_id,
        } => {
            let generated = api.generate_description(project_id.0, venue_id.0).await?;
            let outcome = GenerationOutcome::from(generated);
            if let Some(ref text) = outcome.ai_description {
                store.apply_generated_description(project_id, venue_id, text);
            }
            Ok(CommandResult::Generated(outcome))
        }

        // ── Proposal export ──────────────────────────────────────

        Command::ProposalPreview { project_id } => {
            let html = api.proposal_preview(project_id.0).await?;
            Ok(CommandResult::Html(html))
        }

        Command::ProposalPdf { project_id } => {
            let pdf = api.proposal_pdf(project_id.0).await?;
            Ok(CommandResult::Pdf(pdf))
        }

        // ── Client CRUD ──────────────────────────────────────────

        Command::CreateClient(request) => {
            let client = api.create_client(&request.into()).await?;
            Ok(CommandResult::Client(store.apply_client(client)))
        }

        Command::UpdateClient { id, update } => {
            let client = api.update_client(id.0, &update.into()).await?;
            Ok(CommandResult::Client(store.apply_client(client)))
        }

        Command::DeleteClient { id } => {
            api.delete_client(id.0).await?;
            store.remove_client(id);
            Ok(CommandResult::Ok)
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────

/// Build a [`TransportConfig`] from the workspace configuration.
fn build_transport(config: &BackendConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
