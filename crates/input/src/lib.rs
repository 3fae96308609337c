//! Pointer input: per-tick drag snapshots for the rotation controller.
//!
//! # Invariants
//! - The core only sees `PointerInput` snapshots, never host events.
//! - Transient state (just pressed, motion delta) lives for exactly one tick.

pub mod pointer;

pub use pointer::{PointerInput, PointerTracker};
pub use voxglobe_common::PointerButton;
