//! Rayborn Core - renderer-agnostic scene input.
//!
//! This crate provides:
//!
//! - **Scene description**: the JSON scene format, decoded object by object so
//!   that one bad entry never sinks the whole file
//! - **Meshes**: OBJ loading into a flat triangle `Mesh`
//!
//! # Example
//!
//! ```ignore
//! use rayborn_core::load_scene_description;
//!
//! let description = load_scene_description("scene.json")?;
//! println!("Loaded {} objects", description.objects.len());
//! ```

pub mod mesh;
pub mod scene;

// Re-export commonly used types
pub use mesh::{load_obj, parse_obj, Mesh, MeshError};
pub use scene::{
    load_scene_description, parse_scene_description, CameraDescription, MaterialDescription,
    ObjectDescription, SceneDescription, SceneError, ShapeDescription,
};
