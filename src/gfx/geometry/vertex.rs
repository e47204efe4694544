//! # Vertex Data Structures
//!
//! This module defines the vertex and face records used by every mesh in
//! geodome. The vertex format is GPU-compatible and matches the layout the
//! renderer uploads: position, normal, color and texture coordinates
//! interleaved as 12 floats (48 bytes) per vertex.

use cgmath::Vector3;

/// A single mesh vertex: position, normal, color and texture coordinates.
///
/// # Memory Layout
///
/// The `#[repr(C)]` attribute ensures the struct has a C-compatible memory
/// layout so whole vertex slices can be uploaded to GPU buffers with
/// [`bytemuck::cast_slice`].
///
/// # Equality
///
/// `Vertex` has two distinct notions of equality, used by different
/// consumers:
///
/// - `PartialEq` (derived) compares **all** attributes. Used by tests and
///   cache-identity checks.
/// - [`Vertex::position_key`] compares **position only**. The shading
///   engine's deduplication map merges or duplicates vertices purely by
///   where they sit in space, ignoring normal/color/texcoord differences.
///
/// Keep the two separate; collapsing them breaks vertex deduplication.
///
/// # Examples
///
/// ```
/// use geodome::gfx::geometry::Vertex;
///
/// let vertex = Vertex::new(0.0, 1.0, 0.0);
/// assert_eq!(vertex.position, [0.0, 1.0, 0.0]);
/// assert_eq!(vertex.color, [1.0, 1.0, 1.0, 1.0]);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// Normal vector [nx, ny, nz], zero until a shading pass fills it
    pub normal: [f32; 3],
    /// RGBA color, defaults to opaque white
    pub color: [f32; 4],
    /// Texture coordinates [u, v]
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a vertex at the given position with zeroed normal, white
    /// color and zeroed texture coordinates.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: [x, y, z],
            normal: [0.0; 3],
            color: [1.0, 1.0, 1.0, 1.0],
            tex_coords: [0.0; 2],
        }
    }

    /// Creates a vertex from a cgmath position vector.
    pub fn from_position(position: Vector3<f32>) -> Self {
        Self::new(position.x, position.y, position.z)
    }

    /// The position as a cgmath vector, for cross products and projection.
    pub fn position_vec(&self) -> Vector3<f32> {
        Vector3::from(self.position)
    }

    /// Arithmetic midpoint of two vertices.
    ///
    /// Only the position is interpolated; the normal is zeroed and color
    /// and texture coordinates take their defaults. Subdivision computes
    /// normals in a later shading pass, so carrying attributes through the
    /// midpoint would only be overwritten.
    pub fn midpoint(a: &Vertex, b: &Vertex) -> Self {
        Self::from_position((a.position_vec() + b.position_vec()) / 2.0)
    }

    /// Position-only equality, the second equality predicate.
    pub fn same_position(&self, other: &Vertex) -> bool {
        self.position_key() == other.position_key()
    }

    /// The hashable position key used by the deduplication map.
    pub fn position_key(&self) -> PositionKey {
        PositionKey::from(self.position)
    }

    /// Returns the vertex buffer layout for wgpu rendering.
    ///
    /// - Attribute 0: Position (Float32x3) at shader location 0
    /// - Attribute 1: Normal (Float32x3) at shader location 1
    /// - Attribute 2: Color (Float32x4) at shader location 2
    /// - Attribute 3: Texture coordinates (Float32x2) at shader location 3
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 10]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

/// Hashable position key for the vertex deduplication map.
///
/// Wraps the raw bit patterns of the position components so the key is
/// `Eq + Hash`. Negative zero is folded onto positive zero first; the two
/// compare equal as floats and must land in the same bucket. The map built
/// on this key stores vertex *indices* into the owning mesh, never
/// references, so vector reallocation during an append is harmless.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PositionKey([u32; 3]);

impl From<[f32; 3]> for PositionKey {
    fn from(position: [f32; 3]) -> Self {
        fn bits(v: f32) -> u32 {
            // -0.0 == 0.0, so both must produce the same key
            if v == 0.0 {
                0.0f32.to_bits()
            } else {
                v.to_bits()
            }
        }
        Self([bits(position[0]), bits(position[1]), bits(position[2])])
    }
}

/// A triangle face: three indices into the owning mesh's vertex list.
///
/// The arity is fixed in the type; every face in this crate is a triangle.
/// Winding order is significant: the shading engine computes
/// `cross(p2 - p1, p3 - p1)` per face, so the order the indices are listed
/// in decides which way the normal points. The engine neither detects nor
/// corrects inconsistent winding; callers must supply consistently wound
/// faces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Face {
    pub indices: [u32; 3],
}

impl Face {
    pub fn new(i0: u32, i1: u32, i2: u32) -> Self {
        Self {
            indices: [i0, i1, i2],
        }
    }
}

impl From<[u32; 3]> for Face {
    fn from(indices: [u32; 3]) -> Self {
        Self { indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_defaults() {
        let v = Vertex::new(1.0, 2.0, 3.0);
        assert_eq!(v.position, [1.0, 2.0, 3.0]);
        assert_eq!(v.normal, [0.0; 3]);
        assert_eq!(v.color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(v.tex_coords, [0.0; 2]);
    }

    #[test]
    fn test_vertex_stride_is_48_bytes() {
        assert_eq!(std::mem::size_of::<Vertex>(), 48);
    }

    #[test]
    fn test_midpoint_interpolates_position_only() {
        let mut a = Vertex::new(0.0, 0.0, 0.0);
        a.normal = [1.0, 0.0, 0.0];
        a.color = [1.0, 0.0, 0.0, 1.0];
        let b = Vertex::new(2.0, 4.0, -6.0);
        let mid = Vertex::midpoint(&a, &b);
        assert_eq!(mid.position, [1.0, 2.0, -3.0]);
        assert_eq!(mid.normal, [0.0; 3]);
        assert_eq!(mid.color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_dual_equality_predicates_disagree() {
        let mut a = Vertex::new(1.0, 2.0, 3.0);
        let mut b = Vertex::new(1.0, 2.0, 3.0);
        a.color = [1.0, 0.0, 0.0, 1.0];
        b.color = [0.0, 1.0, 0.0, 1.0];
        // Position-only equality merges them, full equality does not.
        assert!(a.same_position(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_position_key_folds_negative_zero() {
        let a = PositionKey::from([0.0, 1.0, -0.0]);
        let b = PositionKey::from([-0.0, 1.0, 0.0]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_position_key_distinguishes_positions() {
        let a = PositionKey::from([1.0, 2.0, 3.0]);
        let b = PositionKey::from([1.0, 2.0, 3.0000001]);
        assert_ne!(a, b);
    }
}
