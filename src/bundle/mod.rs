//! The embedded module bundle and its extraction.
//!
//! The canonical source for every built-in module ships inside the binary.
//! Access goes through the [`BundleSource`] trait so tests can substitute a
//! synthetic in-memory bundle for the embedded one.

mod builtin;
mod extract;
mod source;

pub use builtin::EmbeddedBundle;
pub use extract::extract;
pub use source::{BundleSource, MemoryBundle};
