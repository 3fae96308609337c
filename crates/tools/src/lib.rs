//! Developer Tooling: read-only globe inspection for CLIs and debug panels.
//!
//! # Invariants
//! - Tools never mutate the globe.

mod inspector;

pub use inspector::{GlobeInspector, GlobeSummary};
