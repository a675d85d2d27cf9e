// ── Command API ──
//
// All write operations flow through a unified `Command` enum. The
// session routes each variant to the matching REST call, then folds
// the response back into the data store so caches stay current
// without a full reload.

pub mod requests;

use std::sync::Arc;

use crate::error::CoreError;
use crate::model::{Client, ClientId, PhotoId, Project, ProjectId, Venue, VenueId, VenueLink};

pub use requests::{
    CreateClientRequest, CreateProjectRequest, CreateVenueRequest, UpdateClientRequest,
    UpdateLinkRequest, UpdateProjectRequest, UpdateVenueRequest,
};

/// A command envelope sent through the command channel.
/// Contains the command and a oneshot response channel.
pub(crate) struct CommandEnvelope {
    pub command: Command,
    pub response_tx: tokio::sync::oneshot::Sender<Result<CommandResult, CoreError>>,
}

/// All possible write operations against the backend.
#[derive(Debug, Clone)]
pub enum Command {
    // ── Project CRUD ─────────────────────────────────────────────────
    CreateProject(CreateProjectRequest),
    UpdateProject {
        id: ProjectId,
        update: UpdateProjectRequest,
    },
    DeleteProject {
        id: ProjectId,
    },

    // ── Venue CRUD ───────────────────────────────────────────────────
    CreateVenue(CreateVenueRequest),
    UpdateVenue {
        id: VenueId,
        update: UpdateVenueRequest,
    },
    DeleteVenue {
        id: VenueId,
    },
    ImportVenuesCsv {
        file_name: String,
        bytes: Vec<u8>,
    },
    DownloadCsvTemplate,
    UploadPhoto {
        venue_id: VenueId,
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
        caption: Option<String>,
        display_order: Option<u32>,
    },
    DeletePhoto {
        venue_id: VenueId,
        photo_id: PhotoId,
    },

    // ── Association workflow ─────────────────────────────────────────
    /// Attach venues to a project one request at a time; a failed
    /// venue does not abort the remainder.
    AttachVenues {
        project_id: ProjectId,
        venue_ids: Vec<VenueId>,
    },
    DetachVenue {
        project_id: ProjectId,
        venue_id: VenueId,
    },
    UpdateLink {
        project_id: ProjectId,
        venue_id: VenueId,
        update: UpdateLinkRequest,
    },
    GenerateDescription {
        project_id: ProjectId,
        venue_id: VenueId,
    },

    // ── Proposal export ──────────────────────────────────────────────
    ProposalPreview {
        project_id: ProjectId,
    },
    ProposalPdf {
        project_id: ProjectId,
    },

    // ── Client CRUD ──────────────────────────────────────────────────
    CreateClient(CreateClientRequest),
    UpdateClient {
        id: ClientId,
        update: UpdateClientRequest,
    },
    DeleteClient {
        id: ClientId,
    },
}

/// Result of a command execution.
#[derive(Debug)]
pub enum CommandResult {
    Ok,
    Project(Arc<Project>),
    Venue(Arc<Venue>),
    Link(Arc<VenueLink>),
    Client(Arc<Client>),
    Attach(AttachReport),
    Import(CsvImportReport),
    Generated(GenerationOutcome),
    Html(String),
    CsvTemplate(String),
    Pdf(Vec<u8>),
}

/// Per-venue outcome of a bulk attach.
#[derive(Debug)]
pub struct AttachReport {
    pub attached: Vec<Arc<VenueLink>>,
    pub failed: Vec<(VenueId, CoreError)>,
}

impl AttachReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Outcome of a CSV venue import.
///
/// Successful rows are committed even when others fail; `errors`
/// carries one entry per rejected row.
#[derive(Debug, Clone)]
pub struct CsvImportReport {
    pub total_rows: u32,
    pub successful: u32,
    pub failed: u32,
    pub created: Vec<Arc<Venue>>,
    pub errors: Vec<CsvRowError>,
}

#[derive(Debug, Clone)]
pub struct CsvRowError {
    pub row: u32,
    pub field: Option<String>,
    pub message: String,
}

/// Outcome of an AI description generation.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub success: bool,
    pub ai_description: Option<String>,
    pub message: Option<String>,
}
