//! Data bridge — connects [`Workspace`] streams to TUI actions.
//!
//! Runs as a background task: subscribes to entity streams, session and
//! connection state from the workspace, forwarding every change as an
//! [`Action`] through the TUI's action channel.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use venmap_core::{ConnectionState, SessionState, Workspace};

use crate::action::Action;

/// Spawn the data bridge connecting [`Workspace`] reactive streams to the TUI.
///
/// Connects (authenticating with the configured credentials), sends initial
/// data snapshots, then loops forwarding every entity change, session flip,
/// and connection-state transition as an [`Action`]. Shuts down cleanly on
/// cancellation.
pub async fn spawn_data_bridge(
    workspace: Workspace,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let _ = action_tx.send(Action::Connecting);

    if let Err(e) = workspace.connect().await {
        warn!(error = %e, "failed to connect to backend");
        let _ = action_tx.send(Action::Disconnected(format!("{e}")));
        return;
    }

    let _ = action_tx.send(Action::Connected(workspace.current_user()));

    // Subscribe to entity streams and store watches
    let mut projects = workspace.projects();
    let mut venues = workspace.venues();
    let mut links = workspace.links();
    let mut clients = workspace.clients();
    let mut conn_state = workspace.connection_state();
    let mut session_state = workspace.session_state();
    let store = workspace.store().clone();
    let mut active_project = store.subscribe_active_project();
    let mut busy = store.subscribe_busy();
    let mut venue_selection = store.subscribe_venue_selection();

    // Push initial snapshots so screens have data immediately
    let _ = action_tx.send(Action::ProjectsUpdated(projects.current().clone()));
    let _ = action_tx.send(Action::VenuesUpdated(venues.current().clone()));
    let _ = action_tx.send(Action::LinksUpdated(links.current().clone()));
    let _ = action_tx.send(Action::ClientsUpdated(clients.current().clone()));
    let _ = action_tx.send(Action::ActiveProjectChanged(store.active_project()));

    // Stream loop — forward every change until cancelled
    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Some(p) = projects.changed() => {
                let _ = action_tx.send(Action::ProjectsUpdated(p));
            }
            Some(v) = venues.changed() => {
                let _ = action_tx.send(Action::VenuesUpdated(v));
            }
            Some(l) = links.changed() => {
                let _ = action_tx.send(Action::LinksUpdated(l));
            }
            Some(c) = clients.changed() => {
                let _ = action_tx.send(Action::ClientsUpdated(c));
            }
            Ok(()) = active_project.changed() => {
                let id = *active_project.borrow_and_update();
                let _ = action_tx.send(Action::ActiveProjectChanged(id));
            }
            Ok(()) = busy.changed() => {
                let is_busy = *busy.borrow_and_update();
                let _ = action_tx.send(Action::BusyChanged(is_busy));
            }
            Ok(()) = venue_selection.changed() => {
                let selection = venue_selection.borrow_and_update().clone();
                let _ = action_tx.send(Action::VenueSelectionChanged(selection));
            }
            Ok(()) = session_state.changed() => {
                let state = session_state.borrow_and_update().clone();
                match state {
                    SessionState::LoggedIn(user) => {
                        let _ = action_tx.send(Action::Connected(Some(user)));
                    }
                    // A flip to LoggedOut mid-run is the forced-logout
                    // redirect; a deliberate quit cancels us first.
                    SessionState::LoggedOut => {
                        let _ = action_tx.send(Action::SessionEnded);
                    }
                }
            }
            Ok(()) = conn_state.changed() => {
                let state = conn_state.borrow_and_update().clone();
                match state {
                    ConnectionState::Connected => {
                        let _ = action_tx.send(Action::Connected(workspace.current_user()));
                    }
                    ConnectionState::Disconnected => {
                        let _ = action_tx.send(Action::Disconnected("disconnected".into()));
                    }
                    ConnectionState::Failed => {
                        let _ = action_tx.send(Action::Disconnected("connection failed".into()));
                    }
                    ConnectionState::Connecting => {
                        let _ = action_tx.send(Action::Connecting);
                    }
                }
            }
        }
    }

    workspace.disconnect().await;
    debug!("data bridge shut down");
}
