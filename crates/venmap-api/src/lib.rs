// venmap-api: Async Rust client for the Venue Mapping AI REST API

pub mod auth;
pub mod client;
pub mod clients;
pub mod error;
pub mod projects;
pub mod transport;
pub mod types;
pub mod venues;

pub use client::ApiClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
