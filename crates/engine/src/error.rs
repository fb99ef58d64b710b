//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`InvalidArgument`] returned when a query parameter violates a
//!   constraint (bad period token, malformed date, inverted range, ...).
//! - [`KeyNotFound`] returned when the requested customer data is absent.
//! - The `Seed*` variants, returned only while loading the seed directory at
//!   startup.
//!
//!  [`InvalidArgument`]: EngineError::InvalidArgument
//!  [`KeyNotFound`]: EngineError::KeyNotFound
use std::path::PathBuf;

use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Seed directory or file not found: {0}")]
    SeedNotFound(PathBuf),
    #[error("Seed file is empty: {0}")]
    SeedEmpty(PathBuf),
    #[error("Invalid JSON in seed file: {path}. {source}")]
    SeedInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidArgument(a), Self::InvalidArgument(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::SeedNotFound(a), Self::SeedNotFound(b)) => a == b,
            (Self::SeedEmpty(a), Self::SeedEmpty(b)) => a == b,
            (Self::SeedInvalid { path: a, .. }, Self::SeedInvalid { path: b, .. }) => a == b,
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }
}
