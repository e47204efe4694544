//! # Primitive Shape Construction
//!
//! Fixed-topology shapes built vertex-by-vertex: a unit cube and a square
//! pyramid. Both carry a [`ShadedMesh`] so they go through the same
//! shading-mode engine as the geodesic sphere.

use super::mesh::Mesh;
use super::vertex::{Face, Vertex};
use crate::gfx::shading::{compute_normals, ShadedMesh, ShadingMode};

/// A unit cube spanning 0..1 on all axes.
///
/// The vertex list holds three copies of the eight corners, one ring per
/// axis pair of sides, so the two triangles of a side share corners with
/// each other but never with another side. That makes the construction-time
/// flat normals exact without any duplication pass.
#[derive(Debug, Clone)]
pub struct Cube {
    shaded: ShadedMesh,
}

impl Cube {
    pub fn new() -> Self {
        let mut mesh = Mesh::new();
        mesh.reserve_vertices(24);
        mesh.reserve_faces(12);
        for _ in 0..3 {
            mesh.append_vertex(Vertex::new(0.0, 0.0, 0.0));
            mesh.append_vertex(Vertex::new(1.0, 0.0, 0.0));
            mesh.append_vertex(Vertex::new(1.0, 1.0, 0.0));
            mesh.append_vertex(Vertex::new(0.0, 1.0, 0.0));
            mesh.append_vertex(Vertex::new(0.0, 0.0, 1.0));
            mesh.append_vertex(Vertex::new(1.0, 0.0, 1.0));
            mesh.append_vertex(Vertex::new(1.0, 1.0, 1.0));
            mesh.append_vertex(Vertex::new(0.0, 1.0, 1.0));
        }
        // back
        mesh.append_face(Face::new(1, 0, 3));
        mesh.append_face(Face::new(1, 3, 2));
        // front
        mesh.append_face(Face::new(4, 5, 6));
        mesh.append_face(Face::new(4, 6, 7));
        // bottom
        mesh.append_face(Face::new(8, 9, 13));
        mesh.append_face(Face::new(8, 13, 12));
        // top
        mesh.append_face(Face::new(15, 14, 10));
        mesh.append_face(Face::new(15, 10, 11));
        // left
        mesh.append_face(Face::new(16, 20, 23));
        mesh.append_face(Face::new(16, 23, 19));
        // right
        mesh.append_face(Face::new(21, 17, 18));
        mesh.append_face(Face::new(21, 18, 22));
        assign_face_uvs(&mut mesh);
        compute_normals(&mut mesh, ShadingMode::Flat);
        Self {
            shaded: ShadedMesh::new(mesh),
        }
    }

    pub fn mesh(&self) -> &Mesh {
        self.shaded.mesh()
    }

    pub fn shaded(&self) -> &ShadedMesh {
        &self.shaded
    }

    pub fn shaded_mut(&mut self) -> &mut ShadedMesh {
        &mut self.shaded
    }
}

impl Default for Cube {
    fn default() -> Self {
        Self::new()
    }
}

/// Alternating per-triangle texture coordinates: even triangles map
/// (0,0)-(1,0)-(1,1), odd ones (0,0)-(1,1)-(0,1), so each pair of
/// triangles covers the full unit UV square.
fn assign_face_uvs(mesh: &mut Mesh) {
    for face_index in 0..mesh.faces().len() {
        let indices = mesh.faces()[face_index].indices;
        let uvs: [[f32; 2]; 3] = if face_index % 2 == 0 {
            [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]
        } else {
            [[0.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
        };
        for (corner, uv) in indices.iter().zip(uvs) {
            mesh.vertices_mut()[*corner as usize].tex_coords = uv;
        }
    }
}

/// A square-based pyramid: unit base on the y = 0 plane, apex at
/// (0.5, 1, 0.5). Five vertices, six faces (two for the base, four sides).
///
/// Normals are left zeroed until a shading mode is applied.
#[derive(Debug, Clone)]
pub struct Pyramid {
    shaded: ShadedMesh,
}

impl Pyramid {
    pub fn new() -> Self {
        let mut mesh = Mesh::new();
        mesh.reserve_vertices(5);
        mesh.reserve_faces(6);
        mesh.append_vertex(Vertex::new(0.0, 0.0, 0.0));
        mesh.append_vertex(Vertex::new(1.0, 0.0, 0.0));
        mesh.append_vertex(Vertex::new(1.0, 0.0, 1.0));
        mesh.append_vertex(Vertex::new(0.0, 0.0, 1.0));
        mesh.append_vertex(Vertex::new(0.5, 1.0, 0.5));
        mesh.append_face(Face::new(0, 1, 2));
        mesh.append_face(Face::new(0, 2, 3));
        mesh.append_face(Face::new(0, 4, 1));
        mesh.append_face(Face::new(1, 4, 2));
        mesh.append_face(Face::new(2, 4, 3));
        mesh.append_face(Face::new(3, 4, 0));
        Self {
            shaded: ShadedMesh::new(mesh),
        }
    }

    pub fn mesh(&self) -> &Mesh {
        self.shaded.mesh()
    }

    pub fn shaded(&self) -> &ShadedMesh {
        &self.shaded
    }

    pub fn shaded_mut(&mut self) -> &mut ShadedMesh {
        &mut self.shaded
    }
}

impl Default for Pyramid {
    fn default() -> Self {
        Self::new()
    }
}
