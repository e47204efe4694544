//! Axis-aligned bounding box over mesh positions.

use cgmath::Vector3;

use super::mesh::Mesh;

/// Min/max corners of a vertex set. An empty box has no extent and is
/// reported by [`BoundingBox::is_empty`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    min: Vector3<f32>,
    max: Vector3<f32>,
    empty: bool,
}

impl BoundingBox {
    pub fn new() -> Self {
        Self {
            min: Vector3::new(0.0, 0.0, 0.0),
            max: Vector3::new(0.0, 0.0, 0.0),
            empty: true,
        }
    }

    /// Folds every vertex position of the mesh into a box.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut bbox = Self::new();
        for vertex in mesh.vertices() {
            bbox.extend(vertex.position_vec());
        }
        bbox
    }

    pub fn extend(&mut self, point: Vector3<f32>) {
        if self.empty {
            self.min = point;
            self.max = point;
            self.empty = false;
            return;
        }
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn min(&self) -> Vector3<f32> {
        self.min
    }

    pub fn max(&self) -> Vector3<f32> {
        self.max
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) / 2.0
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::Vertex;

    #[test]
    fn test_empty_box() {
        let bbox = BoundingBox::new();
        assert!(bbox.is_empty());
    }

    #[test]
    fn test_from_mesh_bounds_and_center() {
        let mut mesh = Mesh::new();
        mesh.append_vertex(Vertex::new(-1.0, 2.0, 0.0));
        mesh.append_vertex(Vertex::new(3.0, -2.0, 4.0));
        mesh.append_vertex(Vertex::new(0.0, 0.0, 1.0));
        let bbox = BoundingBox::from_mesh(&mesh);
        assert!(!bbox.is_empty());
        assert_eq!(bbox.min(), Vector3::new(-1.0, -2.0, 0.0));
        assert_eq!(bbox.max(), Vector3::new(3.0, 2.0, 4.0));
        assert_eq!(bbox.center(), Vector3::new(1.0, 0.0, 2.0));
    }
}
