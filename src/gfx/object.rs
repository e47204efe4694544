use std::ops::Range;

use cgmath::{Deg, Matrix4, SquareMatrix, Vector3, Vector4};
use wgpu::Device;

use super::geometry::{
    BezierCurve, BoundingBox, Cube, Icosahedron, Mesh, Polyline, Pyramid, Vertex,
};
use super::shading::ShadingMode;

/// Scale divisor for normal visualization line length.
const NORMAL_LINE_SCALER: f32 = 3.0;

/// The shape-specific state an [`Object`] wraps.
///
/// Surface shapes own a shaded mesh and participate in the shading-mode
/// engine; curves are vertex-only line strips and ignore shading.
#[derive(Debug, Clone)]
pub enum Model {
    Icosahedron(Icosahedron),
    Cube(Cube),
    Pyramid(Pyramid),
    Bezier(BezierCurve),
    Polyline(Polyline),
}

impl Model {
    pub fn name(&self) -> &'static str {
        match self {
            Model::Icosahedron(_) => "Icosahedron",
            Model::Cube(_) => "Cube",
            Model::Pyramid(_) => "Pyramid",
            Model::Bezier(_) => "Bezier curve",
            Model::Polyline(_) => "Polyline",
        }
    }

    /// Whether the model is a filled surface (triangles) rather than a
    /// line strip.
    pub fn has_surface(&self) -> bool {
        !matches!(self, Model::Bezier(_) | Model::Polyline(_))
    }

    pub fn mesh(&self) -> &Mesh {
        match self {
            Model::Icosahedron(ico) => ico.mesh(),
            Model::Cube(cube) => cube.mesh(),
            Model::Pyramid(pyramid) => pyramid.mesh(),
            Model::Bezier(curve) => curve.mesh(),
            Model::Polyline(polyline) => polyline.mesh(),
        }
    }

    pub fn shading_mode(&self) -> ShadingMode {
        match self {
            Model::Icosahedron(ico) => ico.shading_mode(),
            Model::Cube(cube) => cube.shaded().shading_mode(),
            Model::Pyramid(pyramid) => pyramid.shaded().shading_mode(),
            Model::Bezier(_) | Model::Polyline(_) => ShadingMode::None,
        }
    }

    /// Switches the shading mode on surface models; curves have no
    /// surface to shade and ignore the request.
    pub fn apply_shading(&mut self, mode: ShadingMode) {
        match self {
            Model::Icosahedron(ico) => ico.apply_shading(mode),
            Model::Cube(cube) => cube.shaded_mut().apply_shading(mode),
            Model::Pyramid(pyramid) => pyramid.shaded_mut().apply_shading(mode),
            Model::Bezier(_) | Model::Polyline(_) => {}
        }
    }

    pub fn set_color(&mut self, color: [f32; 4]) {
        match self {
            Model::Icosahedron(ico) => ico.shaded_mut().set_color(color),
            Model::Cube(cube) => cube.shaded_mut().set_color(color),
            Model::Pyramid(pyramid) => pyramid.shaded_mut().set_color(color),
            Model::Bezier(curve) => {
                for vertex in curve.mesh_mut().vertices_mut() {
                    vertex.color = color;
                }
            }
            Model::Polyline(polyline) => {
                for vertex in polyline.mesh_mut().vertices_mut() {
                    vertex.color = color;
                }
            }
        }
    }

    pub fn as_icosahedron_mut(&mut self) -> Option<&mut Icosahedron> {
        match self {
            Model::Icosahedron(ico) => Some(ico),
            _ => None,
        }
    }
}

// GPU resources struct to hold mesh buffers and the transform uniform
pub struct ObjectGpuResources {
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
    pub index_buffer: Option<wgpu::Buffer>,
    pub index_count: u32,
    pub transform_buffer: wgpu::Buffer,
    pub transform_bind_group: wgpu::BindGroup,
}

/// A renderable scene entry: a model plus transform, color and display
/// flags, with lazily created GPU resources.
pub struct Object {
    pub model: Model,
    pub transform: Matrix4<f32>, // cgmath 4x4 transformation matrix
    color: Vector4<f32>,
    pub selected: bool,
    pub rotating: bool,
    pub light_source: bool,
    pub visible_normals: bool,
    pub gpu_resources: Option<ObjectGpuResources>, // None until init_gpu_resources called
}

impl Object {
    /// Create a new Object with identity transformation and white color
    pub fn new(model: Model) -> Self {
        Self {
            model,
            transform: Matrix4::identity(),
            color: Vector4::new(1.0, 1.0, 1.0, 1.0),
            selected: false,
            rotating: false,
            light_source: false,
            visible_normals: false,
            gpu_resources: None,
        }
    }

    pub fn color(&self) -> Vector4<f32> {
        self.color
    }

    /// Sets the object color and pushes it into every vertex, cached
    /// shading variants included.
    pub fn set_color(&mut self, color: Vector4<f32>) {
        self.color = color;
        self.model.set_color(color.into());
    }

    /// Rebuilds an icosahedron model at the given subdivision depth and
    /// repaints it with the object color (a rebuild emits default-colored
    /// vertices). Returns false for models without a subdivision surface.
    pub fn subdivide(&mut self, depth: u32) -> bool {
        let color: [f32; 4] = self.color.into();
        match self.model.as_icosahedron_mut() {
            Some(ico) => {
                ico.subdivide(depth);
                self.model.set_color(color);
                true
            }
            None => false,
        }
    }

    /// Projects an icosahedron model onto the unit sphere. Returns false
    /// for other models.
    pub fn project_to_sphere(&mut self) -> bool {
        match self.model.as_icosahedron_mut() {
            Some(ico) => {
                ico.project_to_sphere();
                true
            }
            None => false,
        }
    }

    pub fn apply_shading(&mut self, mode: ShadingMode) {
        self.model.apply_shading(mode);
    }

    /// Set translation
    pub fn set_translation(&mut self, translation: Vector3<f32>) {
        self.transform = Matrix4::from_translation(translation);
    }

    /// Apply translation (multiplies with existing transform)
    pub fn translate(&mut self, translation: Vector3<f32>) {
        self.transform = self.transform * Matrix4::from_translation(translation);
    }

    /// Set uniform scale
    pub fn set_scale(&mut self, scale: f32) {
        self.transform = Matrix4::from_scale(scale);
    }

    /// Apply rotation around X axis
    pub fn rotate_x(&mut self, angle: Deg<f32>) {
        self.transform = self.transform * Matrix4::from_angle_x(angle);
    }

    /// Apply rotation around Y axis
    pub fn rotate_y(&mut self, angle: Deg<f32>) {
        self.transform = self.transform * Matrix4::from_angle_y(angle);
    }

    /// Apply rotation around Z axis
    pub fn rotate_z(&mut self, angle: Deg<f32>) {
        self.transform = self.transform * Matrix4::from_angle_z(angle);
    }

    /// Create a complete transform from translation, rotation, and scale
    pub fn set_transform_trs(
        &mut self,
        translation: Vector3<f32>,
        rotation_y: Deg<f32>,
        scale: f32,
    ) {
        let t = Matrix4::from_translation(translation);
        let r = Matrix4::from_angle_y(rotation_y);
        let s = Matrix4::from_scale(scale);
        self.transform = t * r * s; // Order matters: T * R * S
    }

    /// Reset to identity matrix
    pub fn reset_transform(&mut self) {
        self.transform = Matrix4::identity();
    }

    pub fn calculate_bbox(&self) -> BoundingBox {
        BoundingBox::from_mesh(self.model.mesh())
    }

    /// Model-space center of the object's bounding box.
    pub fn center(&self) -> Vector3<f32> {
        self.calculate_bbox().center()
    }

    /// Vertex pairs for a line-list visualization of the normals: one
    /// segment per vertex from its position along its normal, in cyan.
    ///
    /// Too slow to rebuild every frame on heavily subdivided meshes; cache
    /// the result until the mesh changes.
    pub fn normals_as_lines(&self) -> Vec<Vertex> {
        let mesh = self.model.mesh();
        let mut lines = Vec::with_capacity(mesh.vertices().len() * 2);
        for vertex in mesh.vertices() {
            let mut from = Vertex::from_position(vertex.position_vec());
            let mut to = Vertex::from_position(
                vertex.position_vec() + Vector3::from(vertex.normal) / NORMAL_LINE_SCALER,
            );
            from.color = [0.0, 1.0, 1.0, 1.0];
            to.color = [0.0, 1.0, 1.0, 1.0];
            lines.push(from);
            lines.push(to);
        }
        lines
    }

    /// Update the transformation matrix and sync to GPU if resources exist
    pub fn update_transform(&mut self, queue: &wgpu::Queue) {
        if let Some(gpu_resources) = &self.gpu_resources {
            // cgmath matrices are column-major, which is what GPU expects
            let transform_data: &[f32; 16] = self.transform.as_ref();

            queue.write_buffer(
                &gpu_resources.transform_buffer,
                0,
                bytemuck::cast_slice(transform_data),
            );
        }
    }

    /// Get the transform bind group for rendering
    pub fn get_transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources
            .as_ref()
            .map(|res| &res.transform_bind_group)
    }

    /// Re-uploads the mesh after a topology change (subdivision or a
    /// shading-mode switch). No-op until `init_gpu_resources` has run.
    pub fn upload_mesh(&mut self, device: &Device) {
        if self.gpu_resources.is_none() {
            return;
        }
        let (vertex_buffer, vertex_count, index_buffer, index_count) =
            create_mesh_buffers(device, self.model.mesh());
        let gpu_resources = self.gpu_resources.as_mut().unwrap();
        gpu_resources.vertex_buffer = vertex_buffer;
        gpu_resources.vertex_count = vertex_count;
        gpu_resources.index_buffer = index_buffer;
        gpu_resources.index_count = index_count;
    }

    pub fn init_gpu_resources(&mut self, device: &Device) {
        let (vertex_buffer, vertex_count, index_buffer, index_count) =
            create_mesh_buffers(device, self.model.mesh());

        // cgmath matrices are already column-major for GPU
        let transform_data: &[f32; 16] = self.transform.as_ref();

        let transform_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Transform Uniform Buffer"),
                contents: bytemuck::cast_slice(transform_data),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        let transform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Transform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Transform Bind Group"),
            layout: &transform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        });

        self.gpu_resources = Some(ObjectGpuResources {
            vertex_buffer,
            vertex_count,
            index_buffer,
            index_count,
            transform_buffer,
            transform_bind_group,
        });
    }
}

fn create_mesh_buffers(
    device: &Device,
    mesh: &Mesh,
) -> (wgpu::Buffer, u32, Option<wgpu::Buffer>, u32) {
    let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
        device,
        &wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(mesh.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        },
    );

    // curves carry no faces; they are drawn non-indexed as line strips
    let indices = mesh.faces_as_indices();
    let index_buffer = if indices.is_empty() {
        None
    } else {
        Some(wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Index Buffer"),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        ))
    };

    (
        vertex_buffer,
        mesh.vertices().len() as u32,
        index_buffer,
        indices.len() as u32,
    )
}

pub trait DrawObject<'a> {
    fn draw_object(&mut self, object: &'a Object);
    fn draw_object_instanced(&mut self, object: &'a Object, instances: Range<u32>);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_object(&mut self, object: &'b Object) {
        self.draw_object_instanced(object, 0..1);
    }

    fn draw_object_instanced(&mut self, object: &'b Object, instances: Range<u32>) {
        let gpu_resources = match &object.gpu_resources {
            Some(resources) => resources,
            None => return, // Skip drawing if not uploaded
        };

        self.set_vertex_buffer(0, gpu_resources.vertex_buffer.slice(..));
        match &gpu_resources.index_buffer {
            Some(index_buffer) => {
                self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                self.draw_indexed(0..gpu_resources.index_count, 0, instances);
            }
            None => self.draw(0..gpu_resources.vertex_count, instances),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_defaults() {
        let object = Object::new(Model::Cube(Cube::new()));
        assert_eq!(object.transform, Matrix4::identity());
        assert_eq!(object.color(), Vector4::new(1.0, 1.0, 1.0, 1.0));
        assert!(object.model.has_surface());
        assert!(object.gpu_resources.is_none());
    }

    #[test]
    fn test_set_color_reaches_vertices() {
        let mut object = Object::new(Model::Pyramid(Pyramid::new()));
        object.set_color(Vector4::new(0.2, 0.4, 0.6, 1.0));
        assert!(object
            .model
            .mesh()
            .vertices()
            .iter()
            .all(|v| v.color == [0.2, 0.4, 0.6, 1.0]));
    }

    #[test]
    fn test_subdivide_repaints_fresh_vertices() {
        let mut object = Object::new(Model::Icosahedron(Icosahedron::new()));
        object.set_color(Vector4::new(1.0, 0.0, 0.0, 1.0));
        assert!(object.subdivide(2));
        assert_eq!(object.model.mesh().faces().len(), 320);
        assert!(object
            .model
            .mesh()
            .vertices()
            .iter()
            .all(|v| v.color == [1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_subdivide_is_icosahedron_only() {
        let mut object = Object::new(Model::Cube(Cube::new()));
        assert!(!object.subdivide(1));
        assert!(!object.project_to_sphere());
    }

    #[test]
    fn test_curves_ignore_shading() {
        let mut object = Object::new(Model::Polyline(Polyline::new()));
        object.apply_shading(ShadingMode::Flat);
        assert_eq!(object.model.shading_mode(), ShadingMode::None);
        assert!(!object.model.has_surface());
    }

    #[test]
    fn test_center_of_unit_cube() {
        let object = Object::new(Model::Cube(Cube::new()));
        assert_eq!(object.center(), Vector3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_normals_as_lines_pairs() {
        let mut object = Object::new(Model::Cube(Cube::new()));
        object.apply_shading(ShadingMode::Smooth);
        let lines = object.normals_as_lines();
        let vertex_count = object.model.mesh().vertices().len();
        assert_eq!(lines.len(), vertex_count * 2);
        assert!(lines.iter().all(|v| v.color == [0.0, 1.0, 1.0, 1.0]));
    }

    #[test]
    fn test_transform_helpers_compose() {
        let mut object = Object::new(Model::Cube(Cube::new()));
        object.translate(Vector3::new(1.0, 0.0, 0.0));
        object.translate(Vector3::new(0.0, 2.0, 0.0));
        let pos = object.transform * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(pos, Vector4::new(1.0, 2.0, 0.0, 1.0));
        object.reset_transform();
        assert_eq!(object.transform, Matrix4::identity());
    }
}
