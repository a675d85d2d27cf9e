// venmap-core: Reactive data layer between venmap-api and consumers (CLI/TUI).

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod command;
pub mod selection;
pub mod session;
pub mod store;
pub mod stream;
pub mod view;
pub mod workspace;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{AuthCredentials, BackendConfig, TlsVerification};
pub use error::CoreError;
pub use workspace::{ConnectionState, Workspace};
pub use command::{
    AttachReport, Command, CommandResult, CsvImportReport, CsvRowError, GenerationOutcome,
};
pub use command::requests::*;
pub use selection::SelectionSet;
pub use session::SessionState;
pub use store::DataStore;
pub use stream::{EntityStream, GalleryFilter};
pub use view::View;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Core entities
    Client, Project, ProjectStatus, Venue, VenueLink,
    // Association workflow
    DescriptionSource, OutreachStatus,
    // Supporting types
    Photo, User, UserRole,
    // Identifiers
    ClientId, LinkId, PhotoId, ProjectId, UserId, VenueId,
};
