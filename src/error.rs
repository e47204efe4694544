//! Error types for mesh construction and curve tessellation.

use thiserror::Error;

/// Errors surfaced by checked geometry constructors.
///
/// Interior generation code treats broken topology as a programming error
/// and asserts instead; these variants cover the API boundary, where the
/// caller handed us bad inputs and can recover.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// A face refers to a vertex index the mesh does not contain.
    #[error("face index {index} out of range for mesh with {vertex_count} vertices")]
    FaceIndexOutOfRange { index: u32, vertex_count: usize },

    /// A quadratic Bezier curve takes exactly one control point.
    #[error("quadratic bezier curve takes exactly 1 control point, got {0}")]
    QuadraticControlPoints(usize),

    /// A cubic Bezier curve takes exactly two control points.
    #[error("cubic bezier curve takes exactly 2 control points, got {0}")]
    CubicControlPoints(usize),
}
