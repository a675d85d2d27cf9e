// ── Domain model ──
//
// Every type in this module is the canonical representation of a Venue
// Mapping entity. They are converted from the wire types once, at cache
// refresh, into the clean interface that consumers (CLI/TUI) depend on.

pub mod ids;

pub mod client;
pub mod link;
pub mod project;
pub mod user;
pub mod venue;

// ── Re-exports ──────────────────────────────────────────────────────
// Flat access: `use venmap_core::model::*` gives you everything.

// Typed identifiers
pub use ids::{ClientId, LinkId, PhotoId, ProjectId, UserId, VenueId};

// Venue
pub use venue::{Photo, Venue};

// Project
pub use project::{Project, ProjectStatus};

// Project-venue association
pub use link::{DescriptionSource, OutreachStatus, VenueLink};

// Client
pub use client::Client;

// User
pub use user::{User, UserRole};
