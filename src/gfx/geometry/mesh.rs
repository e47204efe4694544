//! Append-only mesh container: a vertex list plus triangle faces, with
//! index-buffer flattening for GPU upload.

use super::vertex::{Face, Vertex};
use crate::error::GeometryError;

/// An indexed triangle mesh.
///
/// Vertices keep their insertion order, so an index returned by
/// [`Mesh::append_vertex`] stays valid until the mesh is rebuilt. Every
/// face index must be smaller than the vertex count.
///
/// A mesh can be flagged *auxiliary*: an immutable template that is never
/// rendered (the geodesic generator keeps its 12-vertex base this way).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    auxiliary: bool,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a mesh from prepared vertex and face lists, validating that
    /// every face index is in range.
    pub fn from_parts(vertices: Vec<Vertex>, faces: Vec<Face>) -> Result<Self, GeometryError> {
        for face in &faces {
            for &index in &face.indices {
                if index as usize >= vertices.len() {
                    return Err(GeometryError::FaceIndexOutOfRange {
                        index,
                        vertex_count: vertices.len(),
                    });
                }
            }
        }
        Ok(Self {
            vertices,
            faces,
            auxiliary: false,
        })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertices_mut(&mut self) -> &mut Vec<Vertex> {
        &mut self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn faces_mut(&mut self) -> &mut Vec<Face> {
        &mut self.faces
    }

    pub fn is_auxiliary(&self) -> bool {
        self.auxiliary
    }

    pub fn set_auxiliary(&mut self, val: bool) {
        self.auxiliary = val;
    }

    pub fn reserve_vertices(&mut self, additional: usize) {
        self.vertices.reserve(additional);
    }

    pub fn reserve_faces(&mut self, additional: usize) {
        self.faces.reserve(additional);
    }

    /// Appends a vertex and returns its index. Indices are assigned
    /// monotonically in append order.
    pub fn append_vertex(&mut self, vertex: Vertex) -> u32 {
        self.vertices.push(vertex);
        (self.vertices.len() - 1) as u32
    }

    /// Appends a face. The indices must refer to already-appended vertices.
    pub fn append_face(&mut self, face: Face) -> usize {
        debug_assert!(
            face.indices
                .iter()
                .all(|&i| (i as usize) < self.vertices.len()),
            "face index out of range"
        );
        self.faces.push(face);
        self.faces.len() - 1
    }

    /// Drops all vertices and faces, keeping allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
    }

    /// Flattens all faces into one contiguous index sequence, in face
    /// insertion order. This is the view the renderer uploads as an index
    /// buffer.
    pub fn faces_as_indices(&self) -> Vec<u32> {
        let mut buffer = Vec::with_capacity(self.faces.len() * 3);
        for face in &self.faces {
            buffer.extend_from_slice(&face.indices);
        }
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_vertex_indices_are_monotonic() {
        let mut mesh = Mesh::new();
        assert_eq!(mesh.append_vertex(Vertex::new(0.0, 0.0, 0.0)), 0);
        assert_eq!(mesh.append_vertex(Vertex::new(1.0, 0.0, 0.0)), 1);
        assert_eq!(mesh.append_vertex(Vertex::new(0.0, 1.0, 0.0)), 2);
    }

    #[test]
    fn test_faces_as_indices_preserves_insertion_order() {
        let mut mesh = Mesh::new();
        for i in 0..4 {
            mesh.append_vertex(Vertex::new(i as f32, 0.0, 0.0));
        }
        mesh.append_face(Face::new(0, 1, 2));
        mesh.append_face(Face::new(2, 3, 0));
        assert_eq!(mesh.faces_as_indices(), vec![0, 1, 2, 2, 3, 0]);
    }

    #[test]
    fn test_from_parts_rejects_out_of_range_index() {
        let vertices = vec![Vertex::new(0.0, 0.0, 0.0), Vertex::new(1.0, 0.0, 0.0)];
        let faces = vec![Face::new(0, 1, 2)];
        let err = Mesh::from_parts(vertices, faces).unwrap_err();
        match err {
            GeometryError::FaceIndexOutOfRange {
                index,
                vertex_count,
            } => {
                assert_eq!(index, 2);
                assert_eq!(vertex_count, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_clear_empties_both_lists() {
        let mut mesh = Mesh::new();
        mesh.append_vertex(Vertex::new(0.0, 0.0, 0.0));
        mesh.append_vertex(Vertex::new(1.0, 0.0, 0.0));
        mesh.append_vertex(Vertex::new(0.0, 1.0, 0.0));
        mesh.append_face(Face::new(0, 1, 2));
        mesh.clear();
        assert!(mesh.vertices().is_empty());
        assert!(mesh.faces().is_empty());
    }
}
