//! # Curve Tessellation
//!
//! Bezier curves and polylines evaluated into vertex-only meshes. Curves
//! have no faces; the renderer draws their vertex sequence as a line
//! strip, so no shading mode applies to them.

use cgmath::Vector3;

use super::mesh::Mesh;
use super::vertex::Vertex;
use crate::error::GeometryError;

/// Parameter step for Bezier evaluation; ~200 segments per curve.
const BEZIER_STEP: f32 = 0.005;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BezierKind {
    /// One control point: `B(t) = (1-t)^2 P0 + 2t(1-t) C0 + t^2 P1`
    Quadratic,
    /// Two control points:
    /// `B(t) = (1-t)^3 P0 + 3(1-t)^2 t C0 + 3(1-t) t^2 C1 + t^3 P1`
    Cubic,
}

/// A quadratic or cubic Bezier curve between two endpoints.
///
/// Control points are validated against the curve kind; tessellation is
/// explicit and idempotent.
#[derive(Debug, Clone)]
pub struct BezierCurve {
    kind: BezierKind,
    start: Vertex,
    end: Vertex,
    control_points: Vec<Vertex>,
    mesh: Mesh,
}

impl BezierCurve {
    pub fn new(kind: BezierKind, start: Vertex, end: Vertex) -> Self {
        Self {
            kind,
            start,
            end,
            control_points: Vec::new(),
            mesh: Mesh::new(),
        }
    }

    pub fn kind(&self) -> BezierKind {
        self.kind
    }

    pub fn start_point(&self) -> &Vertex {
        &self.start
    }

    pub fn end_point(&self) -> &Vertex {
        &self.end
    }

    /// Sets the control points, enforcing the arity the curve kind
    /// requires (one for quadratic, two for cubic). Any existing
    /// tessellation is discarded.
    pub fn set_control_points(&mut self, points: Vec<Vertex>) -> Result<(), GeometryError> {
        match self.kind {
            BezierKind::Quadratic if points.len() != 1 => {
                return Err(GeometryError::QuadraticControlPoints(points.len()))
            }
            BezierKind::Cubic if points.len() != 2 => {
                return Err(GeometryError::CubicControlPoints(points.len()))
            }
            _ => {}
        }
        self.control_points = points;
        self.mesh.clear();
        Ok(())
    }

    /// Evaluates the curve into its mesh at a fixed parameter step.
    /// A second call with an existing tessellation is a no-op.
    ///
    /// Fails if the control points for the curve kind have not been set.
    pub fn tessellate(&mut self) -> Result<(), GeometryError> {
        match self.kind {
            BezierKind::Quadratic if self.control_points.len() != 1 => {
                return Err(GeometryError::QuadraticControlPoints(
                    self.control_points.len(),
                ))
            }
            BezierKind::Cubic if self.control_points.len() != 2 => {
                return Err(GeometryError::CubicControlPoints(self.control_points.len()))
            }
            _ => {}
        }
        if !self.mesh.vertices().is_empty() {
            return Ok(());
        }
        self.mesh
            .reserve_vertices((1.0 / BEZIER_STEP) as usize + 1);
        let p0 = self.start.position_vec();
        let p1 = self.end.position_vec();
        let mut t = 0.0f32;
        while t <= 1.0 {
            let point = match self.kind {
                BezierKind::Quadratic => {
                    let c0 = self.control_points[0].position_vec();
                    p0 * ((1.0 - t) * (1.0 - t)) + c0 * (2.0 * t * (1.0 - t)) + p1 * (t * t)
                }
                BezierKind::Cubic => {
                    let c0 = self.control_points[0].position_vec();
                    let c1 = self.control_points[1].position_vec();
                    p0 * (1.0 - t).powi(3)
                        + c0 * (3.0 * (1.0 - t) * (1.0 - t) * t)
                        + c1 * (3.0 * (1.0 - t) * t * t)
                        + p1 * t.powi(3)
                }
            };
            self.mesh.append_vertex(Vertex::from_position(point));
            t += BEZIER_STEP;
        }
        Ok(())
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn mesh_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }
}

/// An ordered point sequence rendered as a connected line strip.
#[derive(Debug, Clone, Default)]
pub struct Polyline {
    mesh: Mesh,
}

impl Polyline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: impl IntoIterator<Item = Vector3<f32>>) -> Self {
        let mut polyline = Self::new();
        for point in points {
            polyline.push_point(point);
        }
        polyline
    }

    pub fn push_point(&mut self, point: Vector3<f32>) -> u32 {
        self.mesh.append_vertex(Vertex::from_position(point))
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn mesh_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    #[test]
    fn test_quadratic_rejects_wrong_control_count() {
        let mut curve = BezierCurve::new(
            BezierKind::Quadratic,
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(1.0, 0.0, 0.0),
        );
        let err = curve
            .set_control_points(vec![Vertex::new(0.0, 1.0, 0.0), Vertex::new(1.0, 1.0, 0.0)])
            .unwrap_err();
        assert!(matches!(err, GeometryError::QuadraticControlPoints(2)));
    }

    #[test]
    fn test_cubic_rejects_wrong_control_count() {
        let mut curve = BezierCurve::new(
            BezierKind::Cubic,
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(1.0, 0.0, 0.0),
        );
        let err = curve
            .set_control_points(vec![Vertex::new(0.5, 1.0, 0.0)])
            .unwrap_err();
        assert!(matches!(err, GeometryError::CubicControlPoints(1)));
    }

    #[test]
    fn test_quadratic_tessellation_starts_at_p0() {
        let mut curve = BezierCurve::new(
            BezierKind::Quadratic,
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(2.0, 0.0, 0.0),
        );
        curve
            .set_control_points(vec![Vertex::new(1.0, 2.0, 0.0)])
            .unwrap();
        curve.tessellate().unwrap();
        let vertices = curve.mesh().vertices();
        assert!(vertices.len() > 100);
        assert_eq!(vertices[0].position, [0.0, 0.0, 0.0]);
        // last sample is within one step of the endpoint
        let last = vertices.last().unwrap().position_vec();
        let end = Vector3::new(2.0, 0.0, 0.0);
        assert!((last - end).magnitude() < 0.05);
    }

    #[test]
    fn test_cubic_midpoint_matches_closed_form() {
        let mut curve = BezierCurve::new(
            BezierKind::Cubic,
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(3.0, 0.0, 0.0),
        );
        curve
            .set_control_points(vec![Vertex::new(1.0, 3.0, 0.0), Vertex::new(2.0, 3.0, 0.0)])
            .unwrap();
        curve.tessellate().unwrap();
        // B(0.5) = (P0 + 3 C0 + 3 C1 + P1) / 8
        let expected = Vector3::new(1.5, 2.25, 0.0);
        let nearest = curve
            .mesh()
            .vertices()
            .iter()
            .map(|v| (v.position_vec() - expected).magnitude())
            .fold(f32::INFINITY, f32::min);
        assert!(nearest < 0.05);
    }

    #[test]
    fn test_tessellate_is_idempotent() {
        let mut curve = BezierCurve::new(
            BezierKind::Quadratic,
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(1.0, 0.0, 0.0),
        );
        curve
            .set_control_points(vec![Vertex::new(0.5, 1.0, 0.0)])
            .unwrap();
        curve.tessellate().unwrap();
        let count = curve.mesh().vertices().len();
        curve.tessellate().unwrap();
        assert_eq!(curve.mesh().vertices().len(), count);
    }

    #[test]
    fn test_polyline_keeps_point_order() {
        let polyline = Polyline::from_points([
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
        ]);
        assert_eq!(polyline.mesh().vertices().len(), 3);
        assert_eq!(polyline.mesh().vertices()[2].position, [1.0, 1.0, 0.0]);
        assert!(polyline.mesh().faces().is_empty());
    }
}
