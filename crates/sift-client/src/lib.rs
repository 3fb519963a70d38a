//! Sift remote canonicalization client.
//!
//! A locally normalized filter tree is only externally meaningful once the
//! remote authority has resolved its column and value references against the
//! live dataset schema. This crate provides the HTTP client for that
//! round-trip and the edit-sequence coordinator that discards responses for
//! superseded trees.

pub mod client;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod protocol;

pub use client::{CanonicalAuthority, CanonicalClient};
pub use config::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
pub use coordinator::CheckCoordinator;
pub use error::Error;
pub use protocol::{Rejection, RemoteIssue};
