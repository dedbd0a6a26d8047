//! Release identity and update checking.
//!
//! This module provides:
//! - The running release's version constants
//! - Version checking against the latest published release

pub mod version;

pub use version::{
    check_for_updates, check_for_updates_fresh, clear_cache, UpdateInfo, DEVELOPMENT_VERSION,
    VERSION,
};
