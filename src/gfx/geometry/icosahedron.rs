//! # Geodesic Icosahedron Generator
//!
//! Builds the canonical 12-vertex/20-face icosahedron and recursively
//! subdivides it toward a sphere approximation. The base mesh is an
//! immutable template constructed once; every [`Icosahedron::subdivide`]
//! call rebuilds the working mesh from it at the requested depth.
//!
//! Callers compose the entry points in order:
//!
//! ```
//! use geodome::gfx::geometry::Icosahedron;
//! use geodome::gfx::shading::ShadingMode;
//!
//! let mut ico = Icosahedron::new();
//! ico.subdivide(3);
//! ico.project_to_sphere();
//! ico.apply_shading(ShadingMode::Smooth);
//! assert_eq!(ico.mesh().faces().len(), 20 * 4usize.pow(3));
//! ```

use std::collections::HashMap;
use std::time::Instant;

use cgmath::InnerSpace;
use log::debug;

use super::mesh::Mesh;
use super::vertex::{Face, PositionKey, Vertex};
use crate::gfx::shading::{ShadedMesh, ShadingMode};

/// Geodesic sphere generator: an immutable base icosahedron plus the
/// currently subdivided working mesh with its shading state.
#[derive(Debug, Clone)]
pub struct Icosahedron {
    /// The 12-vertex/20-face template. Auxiliary: never rendered, never
    /// mutated after construction. Depth 0 is a verbatim copy of it.
    base: Mesh,
    shaded: ShadedMesh,
}

impl Icosahedron {
    pub fn new() -> Self {
        let base = build_base_mesh();
        let mut initial = base.clone();
        initial.set_auxiliary(false);
        Self {
            base,
            shaded: ShadedMesh::new(initial),
        }
    }

    /// The immutable base template.
    pub fn base(&self) -> &Mesh {
        &self.base
    }

    /// The active (subdivided, possibly shaded) mesh.
    pub fn mesh(&self) -> &Mesh {
        self.shaded.mesh()
    }

    pub fn shading_mode(&self) -> ShadingMode {
        self.shaded.shading_mode()
    }

    pub fn shaded(&self) -> &ShadedMesh {
        &self.shaded
    }

    pub fn shaded_mut(&mut self) -> &mut ShadedMesh {
        &mut self.shaded
    }

    /// Number of faces a subdivision to `depth` produces: `20 * 4^depth`.
    pub fn face_count_after(&self, depth: u32) -> usize {
        self.base.faces().len() * 4usize.pow(depth)
    }

    /// Number of vertices a subdivision to `depth` carries once `mode` is
    /// applied: `3F` for flat shading (per-face-exclusive corners),
    /// otherwise `F/2 + 2` (shared corners on a closed triangulated
    /// sphere, by the Euler characteristic).
    pub fn vertex_count_after(&self, depth: u32, mode: ShadingMode) -> usize {
        let faces = self.face_count_after(depth);
        match mode {
            ShadingMode::Flat => faces * 3,
            ShadingMode::None | ShadingMode::Smooth => faces / 2 + 2,
        }
    }

    /// Rebuilds the working mesh from the base template at `depth`
    /// recursive 1-to-4 triangle splits.
    ///
    /// Depth 0 returns the unmodified base triangulation. Deeper requests
    /// reserve the exact final capacity up front, then recurse per base
    /// face; leaf corners are deduplicated by position, so the fresh mesh
    /// always carries shared topology with `F/2 + 2` vertices and zeroed
    /// normals.
    ///
    /// The shading cache is invalidated wholesale and the active mode
    /// resets to [`ShadingMode::None`]; re-apply the desired mode after
    /// projection.
    pub fn subdivide(&mut self, depth: u32) {
        let start = Instant::now();
        let working = if depth == 0 {
            let mut copy = self.base.clone();
            copy.set_auxiliary(false);
            copy
        } else {
            let face_count = self.face_count_after(depth);
            let vertex_count = self.vertex_count_after(depth, ShadingMode::Smooth);
            debug!("preallocating {vertex_count} vertices and {face_count} faces");
            let mut working = Mesh::new();
            working.reserve_vertices(vertex_count);
            working.reserve_faces(face_count);
            let mut seen: HashMap<PositionKey, u32> = HashMap::with_capacity(vertex_count);
            for face in self.base.faces() {
                let [i1, i2, i3] = face.indices;
                subdivide_face(
                    &mut working,
                    &mut seen,
                    depth,
                    self.base.vertices()[i1 as usize],
                    self.base.vertices()[i2 as usize],
                    self.base.vertices()[i3 as usize],
                );
            }
            working
        };
        self.shaded.reset(working);
        debug!(
            "subdivide({depth}) rebuilt {} faces in {:.3} ms",
            self.mesh().faces().len(),
            start.elapsed().as_secs_f64() * 1e3
        );
    }

    /// Projects every working-mesh vertex onto the unit sphere.
    ///
    /// A separate post-pass, applied once after the full subdivision;
    /// midpoints are *not* re-projected at intermediate levels. Cached
    /// shading variants hold pre-projection positions, so the cache is
    /// invalidated.
    pub fn project_to_sphere(&mut self) {
        for vertex in self.shaded.mesh_mut().vertices_mut() {
            vertex.position = vertex.position_vec().normalize().into();
        }
        self.shaded.invalidate();
    }

    /// Switches the shading mode of the working mesh; see
    /// [`ShadedMesh::apply_shading`] for the caching contract.
    pub fn apply_shading(&mut self, mode: ShadingMode) {
        self.shaded.apply_shading(mode);
    }
}

impl Default for Icosahedron {
    fn default() -> Self {
        Self::new()
    }
}

/// Recursive 1-to-4 split. The child order decides triangle winding and
/// with it the sign of every flat normal downstream; do not reorder.
fn subdivide_face(
    mesh: &mut Mesh,
    seen: &mut HashMap<PositionKey, u32>,
    level: u32,
    a: Vertex,
    b: Vertex,
    c: Vertex,
) {
    if level == 0 {
        let mut indices = [0u32; 3];
        for (slot, vertex) in indices.iter_mut().zip([a, b, c]) {
            let key = vertex.position_key();
            *slot = match seen.get(&key) {
                Some(&index) => index,
                None => {
                    let index = mesh.append_vertex(vertex);
                    seen.insert(key, index);
                    index
                }
            };
        }
        mesh.append_face(Face::from(indices));
        return;
    }
    // plain arithmetic midpoints; sphere projection is a separate pass
    let ab = Vertex::midpoint(&a, &b);
    let bc = Vertex::midpoint(&b, &c);
    let ac = Vertex::midpoint(&a, &c);
    subdivide_face(mesh, seen, level - 1, a, ab, ac);
    subdivide_face(mesh, seen, level - 1, b, bc, ab);
    subdivide_face(mesh, seen, level - 1, c, ac, bc);
    subdivide_face(mesh, seen, level - 1, ab, bc, ac);
}

/// The canonical base icosahedron: golden ratio `phi = (1 + sqrt(5)) / 2`,
/// edge constants `a = 1`, `b = 1 / phi`, 12 vertices and 20 consistently
/// wound faces.
fn build_base_mesh() -> Mesh {
    let phi = (1.0 + 5.0f32.sqrt()) * 0.5;
    let a = 1.0;
    let b = a / phi;
    let mut mesh = Mesh::new();
    mesh.set_auxiliary(true);
    mesh.reserve_vertices(12);
    mesh.reserve_faces(20);
    // 12 points
    mesh.append_vertex(Vertex::new(0.0, b, -a));
    mesh.append_vertex(Vertex::new(b, a, 0.0));
    mesh.append_vertex(Vertex::new(-b, a, 0.0));
    mesh.append_vertex(Vertex::new(0.0, b, a));
    mesh.append_vertex(Vertex::new(0.0, -b, a));
    mesh.append_vertex(Vertex::new(-a, 0.0, b));
    mesh.append_vertex(Vertex::new(0.0, -b, -a));
    mesh.append_vertex(Vertex::new(a, 0.0, -b));
    mesh.append_vertex(Vertex::new(a, 0.0, b));
    mesh.append_vertex(Vertex::new(-a, 0.0, -b));
    mesh.append_vertex(Vertex::new(b, -a, 0.0));
    mesh.append_vertex(Vertex::new(-b, -a, 0.0));
    // 20 faces, winding preserved exactly
    mesh.append_face(Face::new(2, 1, 0));
    mesh.append_face(Face::new(1, 2, 3));
    mesh.append_face(Face::new(5, 4, 3));
    mesh.append_face(Face::new(4, 8, 3));
    mesh.append_face(Face::new(7, 6, 0));
    mesh.append_face(Face::new(6, 9, 0));
    mesh.append_face(Face::new(11, 10, 4));
    mesh.append_face(Face::new(10, 11, 6));
    mesh.append_face(Face::new(9, 5, 2));
    mesh.append_face(Face::new(5, 9, 11));
    mesh.append_face(Face::new(8, 7, 1));
    mesh.append_face(Face::new(7, 8, 10));
    mesh.append_face(Face::new(2, 5, 3));
    mesh.append_face(Face::new(8, 1, 3));
    mesh.append_face(Face::new(9, 2, 0));
    mesh.append_face(Face::new(1, 7, 0));
    mesh.append_face(Face::new(11, 9, 6));
    mesh.append_face(Face::new(7, 10, 6));
    mesh.append_face(Face::new(5, 11, 4));
    mesh.append_face(Face::new(10, 8, 4));
    mesh
}

/// Bounces an integer value between a minimum and maximum, one step per
/// call. Drives the demo's subdivision-depth animation (0 up to 4 and back
/// down again).
#[derive(Debug, Clone)]
pub struct DepthOscillator {
    value: u32,
    min_value: u32,
    max_value: u32,
    increasing: bool,
}

impl DepthOscillator {
    /// Panics if `min_value > max_value`.
    pub fn new(min_value: u32, max_value: u32) -> Self {
        assert!(min_value <= max_value, "max value < min value");
        Self {
            value: min_value,
            min_value,
            max_value,
            increasing: true,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn min_value(&self) -> u32 {
        self.min_value
    }

    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    /// Steps once toward the current direction, reversing at the bounds.
    pub fn next_value(&mut self) -> u32 {
        if self.min_value == self.max_value {
            return self.value;
        }
        if (self.value == self.max_value && self.increasing)
            || (self.value == self.min_value && !self.increasing)
        {
            self.increasing = !self.increasing;
        }
        if self.increasing {
            self.value += 1;
        } else {
            self.value -= 1;
        }
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_oscillator_bounces_between_bounds() {
        let mut osc = DepthOscillator::new(0, 2);
        let values: Vec<u32> = (0..6).map(|_| osc.next_value()).collect();
        assert_eq!(values, vec![1, 2, 1, 0, 1, 2]);
    }

    #[test]
    fn test_depth_oscillator_fixed_range() {
        let mut osc = DepthOscillator::new(3, 3);
        assert_eq!(osc.next_value(), 3);
        assert_eq!(osc.next_value(), 3);
    }

    #[test]
    fn test_base_mesh_counts() {
        let ico = Icosahedron::new();
        assert_eq!(ico.base().vertices().len(), 12);
        assert_eq!(ico.base().faces().len(), 20);
        assert!(ico.base().is_auxiliary());
        assert!(!ico.mesh().is_auxiliary());
    }

    #[test]
    fn test_face_count_law() {
        let mut ico = Icosahedron::new();
        for depth in 0..=4 {
            ico.subdivide(depth);
            assert_eq!(ico.mesh().faces().len(), 20 * 4usize.pow(depth));
            assert_eq!(ico.face_count_after(depth), 20 * 4usize.pow(depth));
        }
    }

    #[test]
    fn test_depth_zero_round_trips_base_indices() {
        let mut ico = Icosahedron::new();
        ico.subdivide(0);
        let expected: Vec<u32> = vec![
            2, 1, 0, 1, 2, 3, 5, 4, 3, 4, 8, 3, 7, 6, 0, 6, 9, 0, 11, 10, 4, 10, 11, 6, 9, 5, 2,
            5, 9, 11, 8, 7, 1, 7, 8, 10, 2, 5, 3, 8, 1, 3, 9, 2, 0, 1, 7, 0, 11, 9, 6, 7, 10, 6,
            5, 11, 4, 10, 8, 4,
        ];
        assert_eq!(ico.mesh().faces_as_indices(), expected);
        assert_eq!(ico.mesh().vertices().len(), 12);
    }

    #[test]
    fn test_subdivision_emits_shared_topology() {
        let mut ico = Icosahedron::new();
        for depth in 1..=3 {
            ico.subdivide(depth);
            let faces = ico.mesh().faces().len();
            assert_eq!(ico.mesh().vertices().len(), faces / 2 + 2);
        }
    }

    #[test]
    fn test_subdivision_zeroes_normals_and_resets_mode() {
        let mut ico = Icosahedron::new();
        ico.subdivide(2);
        ico.apply_shading(ShadingMode::Smooth);
        ico.subdivide(2);
        assert_eq!(ico.shading_mode(), ShadingMode::None);
        assert!(ico.mesh().vertices().iter().all(|v| v.normal == [0.0; 3]));
        assert!(ico.shaded().cache().is_empty());
    }

    #[test]
    fn test_sphere_projection_normalizes_every_position() {
        let mut ico = Icosahedron::new();
        ico.subdivide(3);
        ico.project_to_sphere();
        for vertex in ico.mesh().vertices() {
            let len = vertex.position_vec().magnitude();
            assert!((len - 1.0).abs() < 1e-5, "|position| = {len}");
        }
    }

    #[test]
    fn test_vertex_count_invariants_per_mode() {
        let mut ico = Icosahedron::new();
        for depth in 0..=3 {
            ico.subdivide(depth);
            ico.project_to_sphere();
            let faces = ico.mesh().faces().len();

            ico.apply_shading(ShadingMode::Flat);
            assert_eq!(ico.mesh().vertices().len(), faces * 3);
            assert_eq!(
                ico.mesh().vertices().len(),
                ico.vertex_count_after(depth, ShadingMode::Flat)
            );

            ico.apply_shading(ShadingMode::Smooth);
            assert_eq!(ico.mesh().vertices().len(), faces / 2 + 2);
            assert_eq!(
                ico.mesh().vertices().len(),
                ico.vertex_count_after(depth, ShadingMode::Smooth)
            );
        }
    }

    #[test]
    fn test_flat_normal_sign_matches_winding() {
        let mut ico = Icosahedron::new();
        ico.subdivide(1);
        ico.project_to_sphere();
        ico.apply_shading(ShadingMode::Flat);
        let mesh = ico.mesh();
        for face in mesh.faces() {
            let [i1, i2, i3] = face.indices;
            let p1 = mesh.vertices()[i1 as usize].position_vec();
            let p2 = mesh.vertices()[i2 as usize].position_vec();
            let p3 = mesh.vertices()[i3 as usize].position_vec();
            let expected: [f32; 3] = (p2 - p1).cross(p3 - p1).normalize().into();
            for index in [i1, i2, i3] {
                assert_eq!(mesh.vertices()[index as usize].normal, expected);
            }
        }
    }

    #[test]
    fn test_resubdivision_drops_stale_cache() {
        let mut ico = Icosahedron::new();
        ico.subdivide(1);
        ico.apply_shading(ShadingMode::Flat);
        let old_count = ico.mesh().vertices().len();
        ico.subdivide(2);
        ico.apply_shading(ShadingMode::Flat);
        // counts reflect the new depth; no stale variant resurfaced
        assert_eq!(ico.mesh().vertices().len(), 20 * 4 * 4 * 3);
        assert_ne!(ico.mesh().vertices().len(), old_count);
    }
}
