//! # Procedural Geometry
//!
//! Mesh primitives and the generators that fill them, eliminating the need
//! for external model files.
//!
//! ## Contents
//!
//! - **Vertex / Face / Mesh**: the indexed-triangle containers every
//!   generator emits into and the renderer uploads from
//! - **Icosahedron**: geodesic subdivision toward a sphere approximation
//! - **Cube / Pyramid**: fixed-topology primitives
//! - **Curves**: Bezier and polyline tessellation into line strips
//!
//! ## Usage
//!
//! ```
//! use geodome::gfx::geometry::Icosahedron;
//! use geodome::gfx::shading::ShadingMode;
//!
//! let mut ico = Icosahedron::new();
//! ico.subdivide(2);
//! ico.project_to_sphere();
//! ico.apply_shading(ShadingMode::Flat);
//!
//! // read-only views for GPU buffer upload
//! let vertices = ico.mesh().vertices();
//! let indices = ico.mesh().faces_as_indices();
//! assert_eq!(indices.len(), vertices.len());
//! ```

pub mod bounding_box;
pub mod curves;
pub mod icosahedron;
pub mod mesh;
pub mod primitives;
pub mod vertex;

pub use bounding_box::BoundingBox;
pub use curves::{BezierCurve, BezierKind, Polyline};
pub use icosahedron::{DepthOscillator, Icosahedron};
pub use mesh::Mesh;
pub use primitives::{Cube, Pyramid};
pub use vertex::{Face, PositionKey, Vertex};
