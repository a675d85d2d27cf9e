//! Clap derive structures for the `venmap` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// venmap -- CLI for the venue-sourcing and proposal platform
#[derive(Debug, Parser)]
#[command(
    name = "venmap",
    version,
    about = "Manage venue-sourcing projects from the command line",
    long_about = "A CLI for the venmap venue-sourcing and proposal platform.\n\n\
        Browse the venue gallery, attach venues to sourcing projects, track\n\
        outreach, and export proposal documents -- all against the same\n\
        backend the interactive TUI uses.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "VENMAP_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, short = 's', env = "VENMAP_SERVER", global = true)]
    pub server: Option<String>,

    /// Login email (overrides profile)
    #[arg(long, env = "VENMAP_EMAIL", global = true)]
    pub email: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "VENMAP_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "VENMAP_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "VENMAP_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store credentials for a profile
    Login(LoginArgs),

    /// Remove stored credentials for a profile
    Logout,

    /// Show the authenticated account
    Whoami,

    /// Manage sourcing projects and their attached venues
    #[command(alias = "proj", alias = "pr")]
    Projects(ProjectsArgs),

    /// Browse and manage the venue gallery
    #[command(alias = "ven", alias = "v")]
    Venues(VenuesArgs),

    /// Manage client (customer) accounts
    #[command(alias = "cl")]
    Clients(ClientsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AUTH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Login email (prompted if omitted)
    #[arg(long)]
    pub email: Option<String>,

    /// Read the password from stdin instead of prompting
    #[arg(long)]
    pub password_stdin: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PROJECTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ProjectsArgs {
    #[command(subcommand)]
    pub command: ProjectsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProjectsCommand {
    /// List sourcing projects
    #[command(alias = "ls")]
    List,

    /// Get project details
    Get {
        /// Project ID (UUID)
        project: String,
    },

    /// Create a sourcing project
    Create {
        /// Client display name
        #[arg(long)]
        client_name: String,

        /// Existing client account to bill against
        #[arg(long)]
        client_id: Option<String>,

        /// Event name
        #[arg(long)]
        event_name: String,

        /// First event day (YYYY-MM-DD)
        #[arg(long)]
        start: chrono::NaiveDate,

        /// Last event day (YYYY-MM-DD; defaults to the start day)
        #[arg(long)]
        end: Option<chrono::NaiveDate>,

        /// Expected number of attendees
        #[arg(long)]
        attendees: u32,

        /// Budget in EUR
        #[arg(long)]
        budget: Option<f64>,

        /// Preferred city or region
        #[arg(long)]
        location: Option<String>,

        /// Venue requirement (repeatable)
        #[arg(long = "requirement", short = 'r')]
        requirements: Vec<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Update a project
    Update {
        /// Project ID (UUID)
        project: String,

        #[arg(long)]
        client_name: Option<String>,

        #[arg(long)]
        event_name: Option<String>,

        #[arg(long)]
        start: Option<chrono::NaiveDate>,

        #[arg(long)]
        end: Option<chrono::NaiveDate>,

        #[arg(long)]
        attendees: Option<u32>,

        #[arg(long)]
        budget: Option<f64>,

        /// Lifecycle status: active, completed, cancelled
        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a project and its venue associations
    Delete {
        /// Project ID (UUID)
        project: String,
    },

    /// Manage the venues attached to a project
    Venues(ProjectVenuesArgs),

    /// Export proposal documents
    Proposal(ProposalArgs),
}

#[derive(Debug, Args)]
pub struct ProjectVenuesArgs {
    #[command(subcommand)]
    pub command: ProjectVenuesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProjectVenuesCommand {
    /// List venues attached to a project
    #[command(alias = "ls")]
    List {
        /// Project ID (UUID)
        project: String,
    },

    /// Attach venues to a project
    Add {
        /// Project ID (UUID)
        project: String,

        /// Venue IDs to attach
        #[arg(required = true)]
        venues: Vec<String>,
    },

    /// Detach a venue from a project
    Remove {
        /// Project ID (UUID)
        project: String,

        /// Venue ID (UUID)
        venue: String,
    },

    /// Set the outreach status of an attached venue
    SetStatus {
        /// Project ID (UUID)
        project: String,

        /// Venue ID (UUID)
        venue: String,

        /// One of: draft, sent, pending, responded, declined
        status: String,
    },

    /// Update outreach details of an attached venue
    Update {
        /// Project ID (UUID)
        project: String,

        /// Venue ID (UUID)
        venue: String,

        /// Quoted price in EUR
        #[arg(long)]
        price: Option<f64>,

        /// Availability note from the venue
        #[arg(long)]
        availability: Option<String>,

        /// Whether the venue confirmed availability
        #[arg(long)]
        available: Option<bool>,

        /// Room allocation notes
        #[arg(long)]
        rooms: Option<String>,

        /// Catering description
        #[arg(long)]
        catering: Option<String>,

        #[arg(long)]
        pros: Option<String>,

        #[arg(long)]
        cons: Option<String>,

        /// Hand-edited final description (overrides the AI text)
        #[arg(long)]
        description: Option<String>,

        /// Include this venue in the proposal document
        #[arg(long)]
        include: Option<bool>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Generate an AI outreach description for an attached venue
    Describe {
        /// Project ID (UUID)
        project: String,

        /// Venue ID (UUID)
        venue: String,
    },
}

#[derive(Debug, Args)]
pub struct ProposalArgs {
    #[command(subcommand)]
    pub command: ProposalCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProposalCommand {
    /// Render the proposal as HTML
    Preview {
        /// Project ID (UUID)
        project: String,

        /// Write the HTML to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Render the proposal as PDF
    Pdf {
        /// Project ID (UUID)
        project: String,

        /// Output file
        #[arg(long, default_value = "proposal.pdf")]
        out: PathBuf,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  VENUES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct VenuesArgs {
    #[command(subcommand)]
    pub command: VenuesCommand,
}

#[derive(Debug, Subcommand)]
pub enum VenuesCommand {
    /// List venues in the gallery
    #[command(alias = "ls")]
    List {
        /// Filter by city (exact match, case-insensitive)
        #[arg(long)]
        city: Option<String>,

        /// Minimum capacity
        #[arg(long)]
        min_capacity: Option<u32>,

        /// Required facility (repeatable; venue must offer all)
        #[arg(long = "facility", short = 'f')]
        facilities: Vec<String>,

        /// Event type (repeatable; venue must serve at least one)
        #[arg(long = "event-type", short = 'e')]
        event_types: Vec<String>,
    },

    /// Get venue details
    Get {
        /// Venue ID (UUID)
        venue: String,
    },

    /// Create a venue
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        city: String,

        /// Maximum number of attendees
        #[arg(long)]
        capacity: u32,

        /// Offered facility (repeatable)
        #[arg(long = "facility", short = 'f')]
        facilities: Vec<String>,

        /// Served event type (repeatable)
        #[arg(long = "event-type", short = 'e')]
        event_types: Vec<String>,

        #[arg(long)]
        contact_email: Option<String>,

        #[arg(long)]
        contact_phone: Option<String>,

        #[arg(long)]
        website: Option<String>,

        #[arg(long)]
        address: Option<String>,

        /// Fallback description used in proposals
        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Update a venue
    Update {
        /// Venue ID (UUID)
        venue: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        city: Option<String>,

        #[arg(long)]
        capacity: Option<u32>,

        /// Replace the facility list (repeatable)
        #[arg(long = "facility", short = 'f')]
        facilities: Vec<String>,

        /// Replace the event-type list (repeatable)
        #[arg(long = "event-type", short = 'e')]
        event_types: Vec<String>,

        #[arg(long)]
        contact_email: Option<String>,

        #[arg(long)]
        contact_phone: Option<String>,

        #[arg(long)]
        website: Option<String>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a venue
    Delete {
        /// Venue ID (UUID)
        venue: String,
    },

    /// Bulk-import venues from a CSV file
    Import {
        /// CSV file (see `venmap venues template`)
        file: PathBuf,
    },

    /// Download the CSV import template
    Template {
        /// Write the template to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Manage venue photos
    Photos(PhotosArgs),
}

#[derive(Debug, Args)]
pub struct PhotosArgs {
    #[command(subcommand)]
    pub command: PhotosCommand,
}

#[derive(Debug, Subcommand)]
pub enum PhotosCommand {
    /// Upload a photo
    Add {
        /// Venue ID (UUID)
        venue: String,

        /// Image file (JPEG or PNG)
        file: PathBuf,

        /// Photo caption
        #[arg(long)]
        caption: Option<String>,

        /// Display position (0 = primary)
        #[arg(long)]
        order: Option<u32>,
    },

    /// Delete a photo
    Remove {
        /// Venue ID (UUID)
        venue: String,

        /// Photo ID (UUID)
        photo: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CLIENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ClientsArgs {
    #[command(subcommand)]
    pub command: ClientsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ClientsCommand {
    /// List client accounts
    #[command(alias = "ls")]
    List,

    /// Get client details
    Get {
        /// Client ID (UUID)
        client: String,
    },

    /// Create a client account
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        industry: Option<String>,

        #[arg(long)]
        website: Option<String>,

        /// Brand tone fed to the AI description generator
        #[arg(long)]
        brand_tone: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Update a client account
    Update {
        /// Client ID (UUID)
        client: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        industry: Option<String>,

        #[arg(long)]
        website: Option<String>,

        #[arg(long)]
        brand_tone: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a client account
    Delete {
        /// Client ID (UUID)
        client: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Show the current configuration (secrets masked)
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name
        profile: String,
    },

    /// Store a profile password in the system keyring
    SetPassword {
        /// Profile name (defaults to the active profile)
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
