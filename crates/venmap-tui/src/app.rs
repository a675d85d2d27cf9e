//! Application core — event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use venmap_core::{Command, LinkId, UpdateLinkRequest, View, Workspace};

use crate::action::{Action, ConfirmAction, Notification};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::screens::login::LoginScreen;
use crate::theme;
use crate::tui::Tui;

/// Connection status as seen by the TUI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Values used to pre-fill the login form, sourced from CLI flags or
/// the saved profile.
#[derive(Debug, Clone, Default)]
pub struct LoginPrefill {
    pub server: Option<String>,
    pub email: Option<String>,
    pub insecure: bool,
}

/// Top-level application state and event loop.
pub struct App {
    /// Current active screen.
    active_screen: ScreenId,
    /// Previous screen for GoBack.
    previous_screen: Option<ScreenId>,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Connection status indicator.
    connection_status: ConnectionStatus,
    /// Signed-in user, shown in the status bar.
    current_user: Option<std::sync::Arc<venmap_core::User>>,
    /// Help overlay visibility.
    help_visible: bool,
    /// Whether a view load or command is in flight.
    busy: bool,
    /// Terminal size for responsive layout.
    terminal_size: (u16, u16),
    /// Action sender — components can dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Optional workspace for live data. None until login completes.
    workspace: Option<Workspace>,
    /// Login form pre-fill, kept current so re-login after a session
    /// expiry starts from the last known server and email.
    prefill: LoginPrefill,
    /// Cancellation token for the data bridge task.
    data_cancel: CancellationToken,
    /// Pending confirmation dialog (blocks other input while active).
    pending_confirm: Option<ConfirmAction>,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
}

impl App {
    /// Create a new App with all screens. Optionally accepts a [`Workspace`]
    /// for live data — if `None`, the TUI shows the login form.
    pub fn new(workspace: Option<Workspace>, prefill: LoginPrefill) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let mut screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens().into_iter().collect();

        // Without a workspace there is no session yet — show the login form
        let active_screen = if workspace.is_none() {
            screens.insert(
                ScreenId::Login,
                Box::new(LoginScreen::new(
                    prefill.server.clone(),
                    prefill.email.clone(),
                    prefill.insecure,
                )),
            );
            ScreenId::Login
        } else {
            ScreenId::Projects
        };

        Self {
            active_screen,
            previous_screen: None,
            screens,
            running: true,
            connection_status: ConnectionStatus::default(),
            current_user: None,
            help_visible: false,
            busy: false,
            terminal_size: (0, 0),
            action_tx,
            action_rx,
            workspace,
            prefill,
            data_cancel: CancellationToken::new(),
            pending_confirm: None,
            notification: None,
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        // Focus the initial screen
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.terminal_size = tui.size().unwrap_or((80, 24));
        self.init_screens()?;

        // Spawn data bridge if we already have a workspace
        if let Some(workspace) = self.workspace.clone() {
            let cancel = self.data_cancel.clone();
            let tx = self.action_tx.clone();
            tokio::spawn(async move {
                crate::data_bridge::spawn_data_bridge(workspace, tx, cancel).await;
            });
        }

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action(s)
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        // Cancel the data bridge and clean up
        self.data_cancel.cancel();
        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the active screen component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Login form captures all keys except Ctrl+C
        if self.active_screen == ScreenId::Login {
            if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
                return Ok(Some(Action::Quit));
            }
            if let Some(screen) = self.screens.get_mut(&ScreenId::Login) {
                return screen.handle_key_event(key);
            }
            return Ok(None);
        }

        // Confirmation dialog captures all input
        if self.pending_confirm.is_some() {
            return match key.code {
                KeyCode::Char('y' | 'Y') => Ok(Some(Action::ConfirmYes)),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Ok(Some(Action::ConfirmNo)),
                _ => Ok(None),
            };
        }

        if self.help_visible {
            // In help mode, Esc or ? closes help
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        // A screen editing text (e.g. the gallery filter) gets every key
        if self
            .screens
            .get(&self.active_screen)
            .is_some_and(|s| s.capturing_input())
        {
            if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
                return Ok(Some(Action::Quit));
            }
            if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                return screen.handle_key_event(key);
            }
            return Ok(None);
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            // Quit
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            // Help
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),

            // Sign out
            (KeyModifiers::SHIFT, KeyCode::Char('L')) => return Ok(Some(Action::Logout)),

            // Screen navigation via number keys
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='3')) => {
                #[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
                let n = c as u8 - b'0';
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            // Tab / Shift+Tab for screen cycling
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            // Esc — context-dependent back
            (KeyModifiers::NONE, KeyCode::Esc) => return Ok(Some(Action::GoBack)),

            _ => {}
        }

        // Delegate to active screen component
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    /// Handle mouse events (delegate to active screen).
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_mouse_event(mouse);
        }
        Ok(None)
    }

    /// Move focus to a screen without any view side effects.
    fn switch_focus(&mut self, target: ScreenId) {
        if target == self.active_screen {
            return;
        }
        debug!("switching screen: {} to {}", self.active_screen, target);
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(false);
        }
        self.previous_screen = Some(self.active_screen);
        self.active_screen = target;
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
    }

    /// Process a single action — update app state and propagate to components.
    #[allow(clippy::too_many_lines)]
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                self.terminal_size = (*w, *h);
            }

            // Top-level tab navigation leaves any project context behind
            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    self.switch_focus(*target);
                    if let Some(view) = Self::view_for_tab(*target) {
                        if let Some(ws) = &self.workspace {
                            ws.clear_active_project();
                        }
                        self.spawn_load(view);
                    }
                }
            }

            Action::GoBack => {
                if let Some(prev) = self.previous_screen.take() {
                    if prev != ScreenId::Login {
                        self.action_tx.send(Action::SwitchScreen(prev))?;
                    }
                } else if !ScreenId::ALL.contains(&self.active_screen) {
                    self.action_tx.send(Action::SwitchScreen(ScreenId::Projects))?;
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            // ── Drill-down navigation ─────────────────────────────────
            Action::OpenProject(id) => {
                self.switch_focus(ScreenId::ProjectDetail);
                self.spawn_load(View::ProjectDetails(*id));
            }

            Action::OpenClient(id) => {
                self.switch_focus(ScreenId::ClientDetail);
                if let Some(screen) = self.screens.get_mut(&ScreenId::ClientDetail) {
                    screen.update(action)?;
                }
                self.spawn_load(View::ClientDetails(*id));
            }

            Action::OpenGalleryForProject => {
                let active = self
                    .workspace
                    .as_ref()
                    .and_then(|ws| ws.store().active_project());
                if let Some(project_id) = active {
                    self.switch_focus(ScreenId::Venues);
                    self.spawn_load(View::ProjectVenues(project_id));
                }
            }

            // ── Connection / session ──────────────────────────────────
            Action::Connected(user) => {
                self.connection_status = ConnectionStatus::Connected;
                self.current_user = user.clone();
                // Fetch the data behind whatever view we are showing
                if let Some(ws) = &self.workspace {
                    self.spawn_load(ws.store().view());
                }
            }

            Action::Connecting => {
                self.connection_status = ConnectionStatus::Connecting;
            }

            Action::Disconnected(reason) => {
                self.connection_status = ConnectionStatus::Disconnected;
                self.action_tx
                    .send(Action::Notify(Notification::error(reason.clone())))?;
            }

            Action::Logout => {
                if let Some(ws) = &self.workspace {
                    ws.logout();
                }
            }

            // Token rejected or signed out — back to the login form
            Action::SessionEnded => {
                self.data_cancel.cancel();
                self.data_cancel = CancellationToken::new();
                self.workspace = None;
                self.connection_status = ConnectionStatus::Disconnected;
                self.current_user = None;

                let mut login = LoginScreen::new(
                    self.prefill.server.clone(),
                    self.prefill.email.clone(),
                    self.prefill.insecure,
                );
                login.init(self.action_tx.clone())?;
                login.update(action)?;
                self.screens.insert(ScreenId::Login, Box::new(login));
                self.switch_focus(ScreenId::Login);
                self.previous_screen = None;
            }

            // ── Login completion ──────────────────────────────────────
            Action::LoginComplete { config } => {
                self.prefill.server = Some(config.url.to_string());
                if let venmap_core::AuthCredentials::Credentials { email, .. } = &config.auth {
                    self.prefill.email = Some(email.clone());
                }

                match Workspace::new((**config).clone()) {
                    Ok(workspace) => {
                        self.workspace = Some(workspace.clone());
                        self.screens.remove(&ScreenId::Login);
                        self.active_screen = ScreenId::Projects;
                        self.previous_screen = None;
                        if let Some(screen) = self.screens.get_mut(&ScreenId::Projects) {
                            screen.set_focused(true);
                        }

                        let cancel = self.data_cancel.clone();
                        let tx = self.action_tx.clone();
                        tokio::spawn(async move {
                            crate::data_bridge::spawn_data_bridge(workspace, tx, cancel).await;
                        });

                        self.action_tx
                            .send(Action::Notify(Notification::success("Signed in")))?;
                    }
                    Err(e) => {
                        self.action_tx
                            .send(Action::Notify(Notification::error(format!("{e}"))))?;
                    }
                }
            }

            Action::LoginTestResult(_) => {
                // Forward to the login screen
                if let Some(screen) = self.screens.get_mut(&ScreenId::Login) {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            Action::Render => {}

            Action::Tick => {
                // Auto-dismiss notifications after 3 seconds
                if let Some((_, created)) = &self.notification {
                    if created.elapsed() > Duration::from_secs(3) {
                        self.notification = None;
                    }
                }
                // Forward ticks to the login screen for throbber animation
                if self.active_screen == ScreenId::Login {
                    if let Some(screen) = self.screens.get_mut(&ScreenId::Login) {
                        let _ = screen.update(action);
                    }
                }
            }

            // Data updates go to ALL screens so they stay in sync
            Action::ProjectsUpdated(_)
            | Action::VenuesUpdated(_)
            | Action::LinksUpdated(_)
            | Action::ClientsUpdated(_)
            | Action::ActiveProjectChanged(_)
            | Action::VenueSelectionChanged(_) => {
                for screen in self.screens.values_mut() {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            Action::BusyChanged(busy) => {
                self.busy = *busy;
            }

            // ── View pipeline ─────────────────────────────────────────
            Action::LoadView(view) => {
                self.spawn_load(view.clone());
            }

            Action::Reload => {
                if let Some(ws) = self.workspace.clone() {
                    let tx = self.action_tx.clone();
                    tokio::spawn(async move {
                        if let Err(e) = ws.reload().await {
                            warn!(error = %e, "reload failed");
                            let _ = tx.send(Action::Notify(Notification::error(format!("{e}"))));
                        }
                    });
                }
            }

            Action::ApplyGalleryFilter(filter) => {
                if let Some(ws) = self.workspace.clone() {
                    let filter = filter.clone();
                    let tx = self.action_tx.clone();
                    tokio::spawn(async move {
                        if let Err(e) = ws.apply_gallery_filter(filter).await {
                            warn!(error = %e, "gallery filter failed");
                            let _ = tx.send(Action::Notify(Notification::error(format!("{e}"))));
                        }
                    });
                }
            }

            // ── Gallery selection ─────────────────────────────────────
            Action::ToggleVenueSelection(id) => {
                if let Some(ws) = &self.workspace {
                    ws.store().toggle_venue_selection(*id);
                }
            }

            Action::AttachSelection => {
                self.attach_selection();
            }

            // ── Association commands ──────────────────────────────────
            Action::AdvanceOutreach(id) => {
                if let Some(link) = self.resolve_link(*id) {
                    let next = link.outreach_status.next();
                    self.execute_command(
                        Command::UpdateLink {
                            project_id: link.project_id,
                            venue_id: link.venue_id,
                            update: UpdateLinkRequest {
                                outreach_status: Some(next),
                                ..UpdateLinkRequest::default()
                            },
                        },
                        format!("Outreach set to {next}"),
                    );
                }
            }

            Action::ToggleIncludeInProposal(id) => {
                if let Some(link) = self.resolve_link(*id) {
                    let include = !link.include_in_proposal;
                    let msg = if include {
                        "Included in proposal"
                    } else {
                        "Excluded from proposal"
                    };
                    self.execute_command(
                        Command::UpdateLink {
                            project_id: link.project_id,
                            venue_id: link.venue_id,
                            update: UpdateLinkRequest {
                                include_in_proposal: Some(include),
                                ..UpdateLinkRequest::default()
                            },
                        },
                        msg.into(),
                    );
                }
            }

            Action::GenerateDescription(id) => {
                if let Some(link) = self.resolve_link(*id) {
                    self.execute_command(
                        Command::GenerateDescription {
                            project_id: link.project_id,
                            venue_id: link.venue_id,
                        },
                        "Description generated".into(),
                    );
                }
            }

            // Destructive commands go through the confirmation dialog
            Action::RequestDetachVenue(id) => {
                let name = self.resolve_link_venue_name(*id);
                self.action_tx
                    .send(Action::ShowConfirm(ConfirmAction::DetachVenue {
                        link: *id,
                        name,
                    }))?;
            }

            Action::RequestDeleteProject(id) => {
                let name = self
                    .workspace
                    .as_ref()
                    .and_then(|ws| ws.store().project_by_id(*id))
                    .map_or_else(|| id.to_string(), |p| p.event_name.clone());
                self.action_tx
                    .send(Action::ShowConfirm(ConfirmAction::DeleteProject {
                        id: *id,
                        name,
                    }))?;
            }

            Action::RequestDeleteClient(id) => {
                let name = self
                    .workspace
                    .as_ref()
                    .and_then(|ws| ws.store().client_by_id(*id))
                    .map_or_else(|| id.to_string(), |c| c.name.clone());
                self.action_tx
                    .send(Action::ShowConfirm(ConfirmAction::DeleteClient {
                        id: *id,
                        name,
                    }))?;
            }

            // ── Proposal export ───────────────────────────────────────
            Action::ProposalPreview => {
                self.export_proposal(false);
            }

            Action::ProposalPdf => {
                self.export_proposal(true);
            }

            // Confirmation dialog management
            Action::ShowConfirm(confirm) => {
                self.pending_confirm = Some(confirm.clone());
            }

            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    self.execute_confirm(confirm);
                }
            }

            Action::ConfirmNo => {
                self.pending_confirm = None;
            }

            // Notifications
            Action::Notify(n) => {
                self.notification = Some((n.clone(), Instant::now()));
            }

            Action::DismissNotification => {
                self.notification = None;
            }

            // Everything else goes to the active screen only
            other => {
                if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                    if let Some(follow_up) = screen.update(other)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// View loaded when switching to a top-level tab. Detail screens load
    /// their views through the Open* actions instead.
    fn view_for_tab(screen: ScreenId) -> Option<View> {
        match screen {
            ScreenId::Projects => Some(View::Projects),
            ScreenId::Venues => Some(View::Venues),
            ScreenId::Clients => Some(View::Clients),
            _ => None,
        }
    }

    // ── Entity resolution helpers ────────────────────────────────

    fn resolve_link(&self, id: LinkId) -> Option<std::sync::Arc<venmap_core::VenueLink>> {
        self.workspace.as_ref().and_then(|ws| ws.store().link_by_id(id))
    }

    fn resolve_link_venue_name(&self, id: LinkId) -> String {
        self.resolve_link(id)
            .map_or_else(|| id.to_string(), |link| link.venue.name.clone())
    }

    // ── Command execution ─────────────────────────────────────────

    /// Spawn a view load. Errors surface as a notification toast.
    fn spawn_load(&self, view: View) {
        let Some(ws) = self.workspace.clone() else {
            return;
        };
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = ws.load_view(view).await {
                warn!(error = %e, "view load failed");
                let _ = tx.send(Action::Notify(Notification::error(format!("{e}"))));
            }
        });
    }

    /// Spawn a command execution task. Sends a Notify action on completion.
    fn execute_command(&self, cmd: Command, success_msg: String) {
        let Some(ws) = self.workspace.clone() else {
            let _ = self
                .action_tx
                .send(Action::Notify(Notification::error("Not connected")));
            return;
        };
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match ws.execute(cmd).await {
                Ok(_) => {
                    let _ = tx.send(Action::Notify(Notification::success(success_msg)));
                }
                Err(e) => {
                    warn!(error = %e, "command execution failed");
                    let _ = tx.send(Action::Notify(Notification::error(format!("{e}"))));
                }
            }
        });
    }

    /// Map a confirmed action to its Command and execute it.
    fn execute_confirm(&self, action: ConfirmAction) {
        match action {
            ConfirmAction::DetachVenue { link, name } => {
                if let Some(link) = self.resolve_link(link) {
                    self.execute_command(
                        Command::DetachVenue {
                            project_id: link.project_id,
                            venue_id: link.venue_id,
                        },
                        format!("Removed {name}"),
                    );
                }
            }
            ConfirmAction::DeleteProject { id, name } => {
                self.execute_command(Command::DeleteProject { id }, format!("Deleted {name}"));
            }
            ConfirmAction::DeleteClient { id, name } => {
                self.execute_command(Command::DeleteClient { id }, format!("Deleted {name}"));
            }
        }
    }

    /// Attach the current gallery selection to the active project, then
    /// jump to the project workspace on success.
    fn attach_selection(&self) {
        let Some(ws) = self.workspace.clone() else {
            return;
        };
        // Fail fast without a network call: prompt and land on the
        // project list so the user can pick one.
        let Some(project_id) = ws.store().active_project() else {
            let _ = self.action_tx.send(Action::Notify(Notification::warning(
                "Open a project first to attach venues",
            )));
            let _ = self
                .action_tx
                .send(Action::SwitchScreen(ScreenId::Projects));
            return;
        };
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match ws.attach_selection().await {
                Ok(report) => {
                    let attached = report.attached.len();
                    if report.all_succeeded() {
                        let _ = tx.send(Action::Notify(Notification::success(format!(
                            "Attached {attached} venue{}",
                            if attached == 1 { "" } else { "s" }
                        ))));
                    } else {
                        let _ = tx.send(Action::Notify(Notification::warning(format!(
                            "Attached {attached}, {} failed",
                            report.failed.len()
                        ))));
                    }
                    let _ = tx.send(Action::OpenProject(project_id));
                }
                Err(e) => {
                    warn!(error = %e, "attach failed");
                    let _ = tx.send(Action::Notify(Notification::error(format!("{e}"))));
                }
            }
        });
    }

    /// Export the proposal for the active project to the working directory.
    fn export_proposal(&self, pdf: bool) {
        let Some(ws) = self.workspace.clone() else {
            return;
        };
        let Some(project_id) = ws.store().active_project() else {
            let _ = self.action_tx.send(Action::Notify(Notification::warning(
                "No active project to export",
            )));
            return;
        };
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let cmd = if pdf {
                Command::ProposalPdf { project_id }
            } else {
                Command::ProposalPreview { project_id }
            };
            let result = ws.execute(cmd).await;
            let written = match result {
                Ok(venmap_core::CommandResult::Html(html)) => {
                    tokio::fs::write("proposal.html", html)
                        .await
                        .map(|()| "proposal.html")
                }
                Ok(venmap_core::CommandResult::Pdf(bytes)) => {
                    tokio::fs::write("proposal.pdf", bytes)
                        .await
                        .map(|()| "proposal.pdf")
                }
                Ok(_) => return,
                Err(e) => {
                    warn!(error = %e, "proposal export failed");
                    let _ = tx.send(Action::Notify(Notification::error(format!("{e}"))));
                    return;
                }
            };
            match written {
                Ok(path) => {
                    let _ = tx.send(Action::Notify(Notification::success(format!(
                        "Proposal saved to {path}"
                    ))));
                }
                Err(e) => {
                    let _ = tx.send(Action::Notify(Notification::error(format!(
                        "Write failed: {e}"
                    ))));
                }
            }
        });
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // The login form gets the full frame — no tab bar or status bar
        if self.active_screen == ScreenId::Login {
            if let Some(screen) = self.screens.get(&ScreenId::Login) {
                screen.render(frame, area);
            }
            return;
        }

        // Layout: [screen content] [tab bar] [status bar]
        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        let content_area = layout[0];
        let tab_area = layout[1];
        let status_area = layout[2];

        // Render active screen
        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, content_area);
        }

        // Render tab bar
        self.render_tab_bar(frame, tab_area);

        // Render status bar
        self.render_status_bar(frame, status_area);

        // Render overlays on top (order matters: last = topmost)
        if let Some((ref notif, _)) = self.notification {
            self.render_notification(frame, area, notif);
        }

        if let Some(ref confirm) = self.pending_confirm {
            self.render_confirm_dialog(frame, area, confirm);
        }

        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    /// Render the bottom tab bar showing the three top-level screens.
    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);

        // Detail screens are not in the tab bar; show where we are
        if !ScreenId::ALL.contains(&self.active_screen) {
            let crumb = Span::styled(
                format!("▸ {} ", self.active_screen.label()),
                theme::tab_active(),
            );
            let line = Line::from(crumb).right_aligned();
            frame.render_widget(Paragraph::new(line), area);
        }
    }

    /// Render the bottom status bar with connection status and key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let connection_indicator = match &self.connection_status {
            ConnectionStatus::Connected => {
                Span::styled("● connected", Style::default().fg(theme::SUCCESS_GREEN))
            }
            ConnectionStatus::Disconnected => {
                Span::styled("○ disconnected", Style::default().fg(theme::ERROR_RED))
            }
            ConnectionStatus::Connecting => {
                Span::styled("◐ connecting", Style::default().fg(theme::BRAND_GOLD))
            }
        };

        let mut spans = vec![Span::raw(" "), connection_indicator];

        if let Some(user) = &self.current_user {
            spans.push(Span::styled(
                format!(" │ {}", user.email),
                Style::default().fg(theme::SOFT_TEAL),
            ));
        }

        if let Some(project) = self
            .workspace
            .as_ref()
            .and_then(|ws| ws.store().active_project_details())
        {
            spans.push(Span::styled(
                format!(" │ {}", project.event_name),
                Style::default().fg(theme::BRAND_GOLD),
            ));
        }

        if self.busy {
            spans.push(Span::styled(
                " │ syncing…",
                Style::default().fg(theme::BRAND_GOLD),
            ));
        }

        spans.push(Span::styled(
            " │ ? help  L sign out  q quit",
            theme::key_hint(),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Render the help overlay centered on screen.
    #[allow(clippy::unused_self)]
    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_width = 60u16.min(area.width.saturating_sub(4));
        let help_height = 24u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;

        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        // Clear the background
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let section = |name: &'static str| {
            Line::from(Span::styled(
                format!("  {name}"),
                Style::default().fg(theme::SOFT_TEAL),
            ))
        };
        let entry = |keys: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {keys:<10}"), theme::key_hint_key()),
                Span::styled(what, theme::key_hint()),
            ])
        };

        let help_text = vec![
            Line::from(""),
            section("Navigation"),
            Line::from(Span::styled("  ─────────", theme::key_hint())),
            entry("1-3", "Jump to screen"),
            entry("Tab", "Next screen"),
            entry("j/k ↑/↓", "Move up/down"),
            entry("Enter", "Open selected"),
            entry("Esc", "Back / close"),
            entry("g/G", "Top / bottom"),
            entry("Ctrl+d/u", "Page down / up"),
            Line::from(""),
            section("Workflow"),
            Line::from(Span::styled("  ────────", theme::key_hint())),
            entry("Space", "Select venue"),
            entry("a", "Attach selection"),
            entry("s", "Advance outreach"),
            entry("i", "Toggle proposal inclusion"),
            entry("e", "Generate description"),
            entry("f", "Gallery filter"),
            Line::from(""),
            section("Global"),
            Line::from(Span::styled("  ──────", theme::key_hint())),
            entry("r", "Reload view"),
            entry("L", "Sign out"),
            Line::from(""),
            Line::from(Span::styled(
                "                         Esc or ? to close",
                theme::key_hint(),
            )),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }

    /// Render a centered confirmation dialog.
    #[allow(clippy::unused_self)]
    fn render_confirm_dialog(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
        let width = 56u16.min(area.width.saturating_sub(4));
        let height = 5u16;

        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let dialog_area = Rect::new(area.x + x, area.y + y, width, height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            dialog_area,
        );

        let block = Block::default()
            .title(" Confirm ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::BRAND_GOLD));

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let text = vec![
            Line::from(Span::styled(
                format!("  {confirm}"),
                Style::default().fg(theme::DIM_WHITE),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  y ", theme::key_hint_key()),
                Span::styled("confirm    ", theme::key_hint()),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(text), inner);
    }

    /// Render a notification toast in the bottom-right corner.
    #[allow(clippy::unused_self)]
    fn render_notification(&self, frame: &mut Frame, area: Rect, notif: &Notification) {
        use crate::action::NotificationLevel;

        #[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
        let msg_len = notif.message.len() as u16;
        let width = (msg_len + 6).clamp(20, 60);
        let height = 3u16;

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 2); // above status bar
        let toast_area = Rect::new(area.x + x, area.y + y, width, height);

        let (border_color, icon) = match notif.level {
            NotificationLevel::Success => (theme::SUCCESS_GREEN, "✓"),
            NotificationLevel::Error => (theme::ERROR_RED, "✗"),
            NotificationLevel::Warning => (theme::BRAND_GOLD, "!"),
            NotificationLevel::Info => (theme::SOFT_TEAL, "·"),
        };

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            toast_area,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));

        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
            Span::styled(&notif.message, Style::default().fg(theme::DIM_WHITE)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}
