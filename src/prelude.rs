//! # Geodome Prelude
//!
//! A convenient way to import commonly used types and traits in one line:
//!
//! ```
//! use geodome::prelude::*;
//!
//! let mut scene = Scene::new();
//! let mut sphere = Object::new(Model::Icosahedron(Icosahedron::new()));
//! sphere.subdivide(3);
//! sphere.project_to_sphere();
//! sphere.apply_shading(ShadingMode::Smooth);
//! sphere.set_color(Vector4::new(0.8, 0.3, 0.2, 1.0));
//! scene.add_object(sphere);
//! ```

// Re-export geometry types
pub use crate::gfx::geometry::{
    BezierCurve, BezierKind, BoundingBox, Cube, DepthOscillator, Face, Icosahedron, Mesh,
    Polyline, Pyramid, Vertex,
};

// Re-export shading and scene types
pub use crate::gfx::object::{DrawObject, Model, Object};
pub use crate::gfx::scene::Scene;
pub use crate::gfx::shading::{ShadedMesh, ShadingCache, ShadingMode};

// Re-export the error type
pub use crate::error::GeometryError;

// Re-export common external dependencies
pub use cgmath::{Deg, InnerSpace, Matrix4, Vector3, Vector4};
