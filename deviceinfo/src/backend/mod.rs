//! Client for the managed relational backend.
//!
//! The backend itself (tables, stored procedures, auth) is an external
//! collaborator; this module holds the thin HTTP handle the rest of the
//! crate talks through, plus the rental row type the expiry watcher
//! consumes.

pub mod client;
pub mod rentals;

pub use client::{configure_shared, shared, BackendClient};
pub use rentals::{Rental, RentalSource};

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Backend returned status {0}")]
    Status(u16),
    #[error("Shared client already configured")]
    AlreadyConfigured,
}
