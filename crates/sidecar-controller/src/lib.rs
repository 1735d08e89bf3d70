//! Sidecar Controller Client
//!
//! Tenant-scoped synchronization with the control service:
//!
//! - **Registration**: announce this sidecar, its credentials, and its
//!   proxy listen port
//! - **Proxy configuration**: change-driven conditional fetch keyed on a
//!   version timestamp
//! - **Credentials**: retrieval of rotating message-broker and
//!   artifact-registry secrets
//!
//! The client is a thin protocol layer: every operation is a single
//! request/response exchange with no retries, no caching, and no
//! background work. Callers own polling cadence and backoff.

pub mod client;
pub mod config;
pub mod credentials;

pub use client::{ConfigFetch, ControllerClient};
pub use config::Config;
pub use credentials::{Kafka, Registry, TenantCredentials};

use reqwest::StatusCode;
use thiserror::Error;

/// Controller client errors
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Tenant already registered: {detail}")]
    AlreadyRegistered { detail: String },

    #[error("Tenant not found: {detail}")]
    TenantNotFound { detail: String },

    #[error("Controller returned unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("Malformed controller response: {0}")]
    Decode(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ControllerError>;
