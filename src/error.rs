//! Error types for Cairn operations.
//!
//! This module defines [`CairnError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `CairnError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `CairnError::Other`) for unexpected errors
//! - Compatibility failures carry the module identifier, the versions
//!   involved, and the remediation command; external tooling scrapes these
//!   messages, so their wording is stable

use semver::Version;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Cairn operations.
#[derive(Debug, Error)]
pub enum CairnError {
    /// Another vendoring run holds the module-cache lock.
    #[error("Another vendoring run is in progress (lock held at {path})")]
    Lock { path: PathBuf },

    /// Could not create the project scaffold.
    #[error("Failed to create project scaffold at {path}: {source}")]
    Scaffold {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Could not materialize the embedded bundle into staging.
    #[error("Failed to extract {path} from the module bundle: {source}")]
    Extract {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Could not swap a staged module into place.
    #[error("Failed to swap module '{module}' into place: {source}")]
    Swap {
        module: String,
        source: std::io::Error,
    },

    /// A vendored module has no version marker.
    #[error(
        "Module '{module}' is incompatible with this release of cairn \
         (requires {minimum} or newer). Run `cairn vendor` to refresh it"
    )]
    MissingVersionMarker { module: String, minimum: Version },

    /// A version marker exists but does not parse as a semantic version.
    #[error("Failed to parse version marker {path}: {message}")]
    MalformedVersion { path: PathBuf, message: String },

    /// A vendored module is older than this release requires.
    #[error(
        "Module '{module}' (version {vendored}) is incompatible with this release of cairn \
         (requires {minimum} or newer). Run `cairn vendor` to refresh it"
    )]
    IncompatibleModule {
        module: String,
        vendored: Version,
        minimum: Version,
    },

    /// A vendored module is newer than this release supports.
    #[error(
        "Module '{module}' requires cairn {vendored} or newer. \
         Run `cairn version --check` to check for the latest release"
    )]
    NeedsUpgrade { module: String, vendored: Version },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Cairn operations.
pub type Result<T> = std::result::Result<T, CairnError>;
