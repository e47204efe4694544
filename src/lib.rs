// src/lib.rs
//! Geodome
//!
//! Procedural mesh generation for a 3D scene demo: a geodesic icosahedron
//! generator with recursive subdivision, a flat/smooth/none shading-mode
//! engine with per-mode caching, and a small object/scene model that hands
//! vertex and index buffers to a wgpu renderer.

pub mod error;
pub mod gfx;
pub mod prelude;

// Re-export main types for convenience
pub use error::GeometryError;
pub use gfx::geometry::Icosahedron;
pub use gfx::shading::ShadingMode;
