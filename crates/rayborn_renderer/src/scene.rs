//! Conversion from a scene description to renderable objects.

use std::path::Path;
use std::sync::Arc;

use rayborn_core::{
    load_obj, load_scene_description, MaterialDescription, ObjectDescription, SceneDescription,
    SceneError, ShapeDescription,
};
use rayborn_math::Vec3;

use crate::{
    default_material, Camera, Cube, HittableList, Lambertian, Material, Metal, Plane, Sphere,
    Triangle,
};

/// Build the flat object list for a scene description.
///
/// Objects without a material get [`default_material`]. Meshes that fail to
/// load are logged and left out.
pub fn build_world(scene: &SceneDescription) -> HittableList {
    let mut world = HittableList::new();

    for object in &scene.objects {
        add_object(&mut world, scene, object);
    }

    log::info!("Scene contains {} primitives", world.len());
    world
}

/// Load a scene file and return its camera and objects.
pub fn load_world<P: AsRef<Path>>(path: P) -> Result<(Camera, HittableList), SceneError> {
    let scene = load_scene_description(path)?;
    let camera = Camera::from(&scene.camera);
    Ok((camera, build_world(&scene)))
}

fn build_material(desc: Option<&MaterialDescription>) -> Arc<dyn Material> {
    match desc {
        Some(MaterialDescription::Lambertian { albedo }) => {
            Arc::new(Lambertian::new(Vec3::from_array(*albedo)))
        }
        Some(MaterialDescription::Metal { albedo }) => {
            Arc::new(Metal::new(Vec3::from_array(*albedo)))
        }
        None => default_material(),
    }
}

fn add_object(world: &mut HittableList, scene: &SceneDescription, object: &ObjectDescription) {
    let material = build_material(object.material.as_ref());

    match &object.shape {
        ShapeDescription::Sphere { center, radius } => {
            world.push(Sphere::new(Vec3::from_array(*center), *radius, material));
        }
        ShapeDescription::Cube { center, size } => {
            world.push(Cube::new(Vec3::from_array(*center), *size, material));
        }
        ShapeDescription::Plane { point, normal } => {
            world.push(Plane::new(
                Vec3::from_array(*point),
                Vec3::from_array(*normal),
                material,
            ));
        }
        ShapeDescription::Triangle { v0, v1, v2 } => {
            world.push(Triangle::new(
                Vec3::from_array(*v0),
                Vec3::from_array(*v1),
                Vec3::from_array(*v2),
                material,
            ));
        }
        ShapeDescription::Mesh {
            file,
            scale,
            origin,
        } => {
            let path = scene.resolve_path(file);
            match load_obj(&path, *scale, Vec3::from_array(*origin)) {
                Ok(mesh) => {
                    // Each face becomes its own primitive so the BVH can split meshes
                    for [v0, v1, v2] in mesh.extract_triangle_vertices() {
                        world.push(Triangle::new(v0, v1, v2, Arc::clone(&material)));
                    }
                }
                Err(e) => log::error!("Failed to load mesh {}: {}", path.display(), e),
            }
        }
    }
}
