//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;
use std::sync::Arc;

use venmap_core::{
    BackendConfig, Client, ClientId, GalleryFilter, LinkId, Project, ProjectId, SelectionSet,
    User, Venue, VenueId, VenueLink, View,
};

use crate::screen::ScreenId;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Warning,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Pending confirmation action.
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    DetachVenue { link: LinkId, name: String },
    DeleteProject { id: ProjectId, name: String },
    DeleteClient { id: ClientId, name: String },
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DetachVenue { name, .. } => {
                write!(f, "Remove {name} from this project? Outreach notes are lost.")
            }
            Self::DeleteProject { name, .. } => {
                write!(f, "Delete project {name}? This cannot be undone.")
            }
            Self::DeleteClient { name, .. } => {
                write!(f, "Delete client {name}? Projects keep the plain name.")
            }
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,
    OpenProject(ProjectId),
    OpenClient(ClientId),
    /// Jump to the venue gallery scoped to the active project.
    OpenGalleryForProject,

    // ── Data Events (from venmap-core streams) ────────────────────
    ProjectsUpdated(Arc<Vec<Arc<Project>>>),
    VenuesUpdated(Arc<Vec<Arc<Venue>>>),
    LinksUpdated(Arc<Vec<Arc<VenueLink>>>),
    ClientsUpdated(Arc<Vec<Arc<Client>>>),
    ActiveProjectChanged(Option<ProjectId>),
    VenueSelectionChanged(SelectionSet<VenueId>),
    BusyChanged(bool),

    // ── Connection / Session ──────────────────────────────────────
    Connected(Option<Arc<User>>),
    Connecting,
    Disconnected(String),
    /// The backend rejected our token mid-session; redirect to login.
    SessionEnded,
    Logout,

    // ── Login Screen ──────────────────────────────────────────────
    LoginTestResult(Result<(), String>),
    LoginComplete { config: Box<BackendConfig> },

    // ── View Pipeline ─────────────────────────────────────────────
    LoadView(View),
    Reload,
    ApplyGalleryFilter(GalleryFilter),

    // ── Gallery Selection ─────────────────────────────────────────
    ToggleVenueSelection(VenueId),
    AttachSelection,

    // ── Association Commands ──────────────────────────────────────
    AdvanceOutreach(LinkId),
    ToggleIncludeInProposal(LinkId),
    GenerateDescription(LinkId),
    RequestDetachVenue(LinkId),

    // ── Entity Commands ───────────────────────────────────────────
    RequestDeleteProject(ProjectId),
    RequestDeleteClient(ClientId),
    ProposalPreview,
    ProposalPdf,

    // ── Confirm Dialog ────────────────────────────────────────────
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_prompts_name_the_entity() {
        let confirm = ConfirmAction::DeleteProject {
            id: ProjectId(uuid::Uuid::nil()),
            name: "Spring Offsite".into(),
        };
        assert_eq!(
            confirm.to_string(),
            "Delete project Spring Offsite? This cannot be undone."
        );
    }

    #[test]
    fn notification_constructors_set_level() {
        assert_eq!(
            Notification::success("ok").level,
            NotificationLevel::Success
        );
        assert_eq!(Notification::error("bad").level, NotificationLevel::Error);
    }
}
