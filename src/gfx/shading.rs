//! # Shading Mode Engine
//!
//! Computes per-vertex normals for a mesh under a shading mode, reshaping
//! the vertex/face layout as the mode requires:
//!
//! - [`ShadingMode::None`] zeroes every normal and leaves the topology
//!   untouched.
//! - [`ShadingMode::Flat`] gives every triangle three exclusive vertices so
//!   one uniform normal can cover the whole face. Shared corners are
//!   duplicated.
//! - [`ShadingMode::Smooth`] shares vertices between adjacent triangles so
//!   their face normals can be accumulated and interpolated. Duplicate
//!   corners are merged by position.
//!
//! [`ShadedMesh`] wraps a mesh with a per-mode cache: once a mode's variant
//! has been computed it is snapshotted, and switching back to that mode
//! reuses the snapshot instead of recomputing. The cache is invalidated
//! wholesale whenever the underlying topology is rebuilt.
//!
//! Deduplication is keyed on *position only* (see
//! [`Vertex::position_key`]): two vertices at the same position with
//! different colors still merge or duplicate together.
//!
//! Consistent face winding is a caller precondition. The engine computes
//! `cross(p2 - p1, p3 - p1)` per face and never checks whether the result
//! points outward; mixed CW/CCW input produces mixed normals with no
//! diagnostic.

use std::collections::HashMap;

use cgmath::InnerSpace;
use log::debug;

use super::geometry::{Mesh, PositionKey, Vertex};

/// How normals are produced and how vertices are laid out for them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShadingMode {
    /// No lighting: normals zeroed, topology untouched.
    None,
    /// One normal per face; faces own their corner vertices exclusively.
    Flat,
    /// Normals averaged over adjacent faces; corners shared by position.
    Smooth,
}

impl ShadingMode {
    /// Cache slot for this mode. `None`-mode variants are never cached:
    /// zeroing normals in place is cheaper than a snapshot.
    fn cache_slot(self) -> Option<usize> {
        match self {
            ShadingMode::None => None,
            ShadingMode::Flat => Some(0),
            ShadingMode::Smooth => Some(1),
        }
    }
}

/// Per-mode snapshots of previously computed mesh variants.
///
/// An entry, once stored for a mode, is reused verbatim until the
/// underlying topology changes, at which point the owner clears the whole
/// cache.
#[derive(Debug, Clone, Default)]
pub struct ShadingCache {
    entries: [Option<Mesh>; 2],
}

impl ShadingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, mode: ShadingMode) -> Option<&Mesh> {
        mode.cache_slot().and_then(|slot| self.entries[slot].as_ref())
    }

    pub fn insert(&mut self, mode: ShadingMode, mesh: Mesh) {
        if let Some(slot) = mode.cache_slot() {
            self.entries[slot] = Some(mesh);
        }
    }

    /// Drops every entry. Called whenever the base topology is rebuilt.
    pub fn clear(&mut self) {
        self.entries = [None, None];
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    fn vertices_mut(&mut self) -> impl Iterator<Item = &mut Vertex> {
        self.entries
            .iter_mut()
            .flatten()
            .flat_map(|mesh| mesh.vertices_mut().iter_mut())
    }
}

/// A mesh plus its shading state: active mode and per-mode variant cache.
///
/// This is the unit the object model owns for every surface shape. All
/// shading transitions go through [`ShadedMesh::apply_shading`]; topology
/// replacements go through [`ShadedMesh::reset`] so the cache can never
/// serve a variant of stale topology.
#[derive(Debug, Clone)]
pub struct ShadedMesh {
    mesh: Mesh,
    cache: ShadingCache,
    mode: ShadingMode,
}

impl ShadedMesh {
    /// Wraps a freshly built mesh. The initial mode is [`ShadingMode::None`];
    /// generators emit zeroed normals, which is exactly that state.
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            cache: ShadingCache::new(),
            mode: ShadingMode::None,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Mutable mesh access for attribute-level edits. After editing
    /// *positions*, call [`ShadedMesh::invalidate`]; cached variants hold
    /// the old positions.
    pub fn mesh_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }

    pub fn shading_mode(&self) -> ShadingMode {
        self.mode
    }

    pub fn cache(&self) -> &ShadingCache {
        &self.cache
    }

    /// Replaces the topology: the cache is cleared wholesale and the mode
    /// resets to `None` (a rebuilt mesh carries zeroed normals).
    pub fn reset(&mut self, mesh: Mesh) {
        self.mesh = mesh;
        self.cache.clear();
        self.mode = ShadingMode::None;
    }

    /// Clears cached variants without touching the active mesh. Use after
    /// in-place position edits such as sphere projection.
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    /// Switches the active shading mode.
    ///
    /// Requesting the mode that is already active is a no-op. A cached
    /// variant is swapped in without recomputation; otherwise the current
    /// topology is restructured for the target mode, normals are computed,
    /// and the result is snapshotted into the cache before activation.
    pub fn apply_shading(&mut self, mode: ShadingMode) {
        if mode == self.mode {
            return;
        }
        match mode {
            ShadingMode::None => zero_normals(&mut self.mesh),
            ShadingMode::Flat | ShadingMode::Smooth => {
                if let Some(cached) = self.cache.get(mode) {
                    debug!("shading cache hit for {mode:?}");
                    self.mesh = cached.clone();
                } else {
                    if mode == ShadingMode::Flat {
                        duplicate_shared_corners(&mut self.mesh);
                    } else {
                        merge_duplicate_corners(&mut self.mesh);
                    }
                    compute_normals(&mut self.mesh, mode);
                    self.cache.insert(mode, self.mesh.clone());
                }
            }
        }
        self.mode = mode;
    }

    /// Writes one color into every vertex, including cached variants so a
    /// later cache hit does not resurrect the old color.
    pub fn set_color(&mut self, color: [f32; 4]) {
        for vertex in self.mesh.vertices_mut() {
            vertex.color = color;
        }
        for vertex in self.cache.vertices_mut() {
            vertex.color = color;
        }
    }
}

/// Zeroes every vertex normal in place.
pub fn zero_normals(mesh: &mut Mesh) {
    for vertex in mesh.vertices_mut() {
        vertex.normal = [0.0; 3];
    }
}

/// Flat-shading restructure: every face ends up with three corner vertices
/// shared with no other face's identically-placed corner.
///
/// Walks faces in order; the first face to touch a position keeps the
/// existing vertex, every later face gets an appended duplicate. Starting
/// from shared topology this lands on exactly `3 * face_count` vertices
/// with none orphaned.
pub fn duplicate_shared_corners(mesh: &mut Mesh) {
    let face_count = mesh.faces().len();
    let exclusive_count = face_count * 3;
    if exclusive_count > mesh.vertices().len() {
        mesh.reserve_vertices(exclusive_count - mesh.vertices().len());
    }
    let mut seen: HashMap<PositionKey, u32> = HashMap::with_capacity(mesh.vertices().len());
    for face_index in 0..face_count {
        let mut indices = mesh.faces()[face_index].indices;
        for slot in &mut indices {
            let vertex = mesh.vertices()[*slot as usize];
            let key = vertex.position_key();
            if seen.contains_key(&key) {
                *slot = mesh.append_vertex(vertex);
            } else {
                seen.insert(key, *slot);
            }
        }
        mesh.faces_mut()[face_index].indices = indices;
    }
}

/// Smooth-shading restructure: collapses position-duplicate vertices down
/// to one vertex per distinct position, shared by every adjacent face.
///
/// The vertex list is rebuilt in first-touch order; face indices are
/// redirected as the walk goes. Unreferenced vertices are dropped.
pub fn merge_duplicate_corners(mesh: &mut Mesh) {
    let face_count = mesh.faces().len();
    let mut seen: HashMap<PositionKey, u32> = HashMap::with_capacity(face_count / 2 + 2);
    let mut unique: Vec<Vertex> = Vec::with_capacity(face_count / 2 + 2);
    for face_index in 0..face_count {
        let mut indices = mesh.faces()[face_index].indices;
        for slot in &mut indices {
            let vertex = mesh.vertices()[*slot as usize];
            let key = vertex.position_key();
            *slot = match seen.get(&key) {
                Some(&index) => index,
                None => {
                    unique.push(vertex);
                    let index = (unique.len() - 1) as u32;
                    seen.insert(key, index);
                    index
                }
            };
        }
        mesh.faces_mut()[face_index].indices = indices;
    }
    *mesh.vertices_mut() = unique;
}

/// Fills vertex normals from face cross products.
///
/// Per face `(i1, i2, i3)` the raw normal is
/// `cross(p2 - p1, p3 - p1)`. Flat mode overwrites all three corner
/// normals with it; smooth mode accumulates it into every touching
/// corner. A final pass normalizes each vertex whose accumulated normal is
/// non-zero; exact-zero normals (isolated or degenerate vertices) stay
/// zero.
pub fn compute_normals(mesh: &mut Mesh, mode: ShadingMode) {
    if mode == ShadingMode::None {
        return;
    }
    for vertex in mesh.vertices_mut() {
        vertex.normal = [0.0; 3];
    }
    for face_index in 0..mesh.faces().len() {
        let [i1, i2, i3] = mesh.faces()[face_index].indices;
        let p1 = mesh.vertices()[i1 as usize].position_vec();
        let p2 = mesh.vertices()[i2 as usize].position_vec();
        let p3 = mesh.vertices()[i3 as usize].position_vec();
        let normal = (p2 - p1).cross(p3 - p1);
        let vertices = mesh.vertices_mut();
        for index in [i1, i2, i3] {
            let slot = &mut vertices[index as usize].normal;
            if mode == ShadingMode::Smooth {
                slot[0] += normal.x;
                slot[1] += normal.y;
                slot[2] += normal.z;
            } else {
                *slot = normal.into();
            }
        }
    }
    for vertex in mesh.vertices_mut() {
        if vertex.normal != [0.0; 3] {
            vertex.normal = cgmath::Vector3::from(vertex.normal).normalize().into();
        }
    }
}
