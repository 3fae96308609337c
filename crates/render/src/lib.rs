//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers cannot mutate the globe.
//! - Primitives are children of the globe; their model matrix is always
//!   composed with the globe transform at draw time.

mod primitives;
mod renderer;

pub use primitives::{Primitive, PrimitiveList};
pub use renderer::{DebugTextRenderer, RenderView, Renderer};
