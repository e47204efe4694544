//! # Graphics Module
//!
//! Everything between procedural geometry and the GPU upload boundary:
//!
//! - **Geometry** ([`geometry`]) - Mesh primitives and generators
//! - **Shading** ([`shading`]) - Per-mode normal computation and caching
//! - **Objects** ([`object`]) - Transform, color and GPU resources per model
//! - **Scene** ([`scene`]) - Flat object list with selection
//!
//! The renderer proper (pipelines, passes, window surface) lives outside
//! this crate; objects expose vertex/index buffers and a transform bind
//! group, and that is the whole contract.

pub mod geometry;
pub mod object;
pub mod scene;
pub mod shading;

// Re-export commonly used types
pub use object::{DrawObject, Model, Object};
pub use scene::Scene;
pub use shading::{ShadedMesh, ShadingCache, ShadingMode};
