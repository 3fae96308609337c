//! Globe kernel: the voxel shell aggregate and its rotation controller.
//!
//! # Invariants
//! - Exactly one spin mode is active on every tick.
//! - Rotation is always an incremental world-space delta scaled by tick time.
//! - A regenerated shell is published whole; no partial set is observable.

pub mod factory;
pub mod globe;
pub mod spin;

pub use factory::{PrimitiveFactory, PrimitiveHandle};
pub use globe::{Globe, GlobeEvent, voxel_hash};
pub use spin::{SpinMode, SpinPhase, SpinState, SpinStep, advance, rotation_delta};
