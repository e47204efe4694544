//! Geodesic sphere walkthrough: subdivides the icosahedron over a range of
//! depths, projects it onto the unit sphere, and cycles shading modes to
//! show the per-mode cache at work.
//!
//! Run with `RUST_LOG=debug` to see the generator's preallocation and
//! timing output.

use std::time::Instant;

use anyhow::Result;
use geodome::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let mut scene = Scene::new();

    let mut sphere = Object::new(Model::Icosahedron(Icosahedron::new()));
    sphere.set_color(Vector4::new(0.8, 0.3, 0.2, 1.0));
    let sphere_index = scene.add_object(sphere);

    let mut cube = Object::new(Model::Cube(Cube::new()));
    cube.translate(Vector3::new(3.0, 0.0, 0.0));
    scene.add_object(cube);

    let mut pyramid = Object::new(Model::Pyramid(Pyramid::new()));
    pyramid.translate(Vector3::new(-3.0, 0.0, 0.0));
    scene.add_object(pyramid);

    let mut arc = BezierCurve::new(
        BezierKind::Cubic,
        Vertex::new(-2.0, 2.0, 0.0),
        Vertex::new(2.0, 2.0, 0.0),
    );
    arc.set_control_points(vec![Vertex::new(-1.0, 4.0, 0.0), Vertex::new(1.0, 4.0, 0.0)])?;
    arc.tessellate()?;
    scene.add_object(Object::new(Model::Bezier(arc)));

    scene.select(Some(sphere_index));

    // bounce the subdivision depth 0 -> 4 -> 0
    let mut depth = DepthOscillator::new(0, 4);
    for _ in 0..8 {
        let d = depth.next_value();
        let sphere = scene.selected_object_mut().expect("sphere is selected");
        let start = Instant::now();
        sphere.subdivide(d);
        sphere.project_to_sphere();
        sphere.apply_shading(ShadingMode::Smooth);
        let built = start.elapsed();

        // second request for the same topology: flat computes once, then
        // both modes come straight from the cache
        sphere.apply_shading(ShadingMode::Flat);
        let start = Instant::now();
        sphere.apply_shading(ShadingMode::Smooth);
        sphere.apply_shading(ShadingMode::Flat);
        let cached = start.elapsed();

        let mesh = sphere.model.mesh();
        println!(
            "depth {d}: {:>5} faces, {:>5} vertices, built in {built:?}, mode round-trip {cached:?}",
            mesh.faces().len(),
            mesh.vertices().len(),
        );
    }

    for object in &scene.objects {
        let bbox = object.calculate_bbox();
        println!(
            "{:<14} {} vertices, bounds {:?} .. {:?}",
            object.model.name(),
            object.model.mesh().vertices().len(),
            bbox.min(),
            bbox.max(),
        );
    }

    Ok(())
}
