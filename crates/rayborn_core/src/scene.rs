//! JSON scene description.
//!
//! The document is a `camera` block plus a list of `objects`. Objects are
//! decoded one at a time: an entry with an unknown `type` or missing fields is
//! logged and dropped while the rest of the scene still loads. A material that
//! fails to decode is dropped the same way and its object keeps no material.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while reading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for scene loading operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Camera settings. Every field is optional in the JSON document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraDescription {
    pub aspect_ratio: f32,
    pub image_width: u32,
    pub origin: [f32; 3],
    /// Point the camera looks at (defaults to one unit down -Z from origin)
    pub look_at: Option<[f32; 3]>,
    pub vup: [f32; 3],
    /// Vertical field of view in degrees
    pub vfov: f32,
    pub focal_length: f32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            image_width: 1080,
            origin: [0.0, 0.0, 0.0],
            look_at: None,
            vup: [0.0, 1.0, 0.0],
            vfov: 90.0,
            focal_length: 1.0,
            samples_per_pixel: 10,
            max_depth: 50,
        }
    }
}

/// Surface material of an object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MaterialDescription {
    Lambertian { albedo: [f32; 3] },
    Metal { albedo: [f32; 3] },
}

fn default_scale() -> f32 {
    1.0
}

/// Geometry of an object, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeDescription {
    Sphere {
        center: [f32; 3],
        radius: f32,
    },
    Cube {
        center: [f32; 3],
        size: f32,
    },
    Plane {
        point: [f32; 3],
        normal: [f32; 3],
    },
    Triangle {
        v0: [f32; 3],
        v1: [f32; 3],
        v2: [f32; 3],
    },
    Mesh {
        file: PathBuf,
        #[serde(default = "default_scale")]
        scale: f32,
        #[serde(default)]
        origin: [f32; 3],
    },
}

/// One scene object: a shape and an optional material.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDescription {
    pub shape: ShapeDescription,
    pub material: Option<MaterialDescription>,
}

/// A decoded scene document.
#[derive(Debug, Clone, Default)]
pub struct SceneDescription {
    pub camera: CameraDescription,
    pub objects: Vec<ObjectDescription>,
    /// Directory that relative mesh paths are resolved against
    pub base_dir: PathBuf,
}

impl SceneDescription {
    /// Resolve a mesh path from the document against the scene directory.
    pub fn resolve_path(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.base_dir.join(file)
        }
    }
}

/// Top-level shape of the document before per-object decoding.
#[derive(Deserialize)]
struct RawScene {
    #[serde(default)]
    camera: Option<Value>,
    #[serde(default)]
    objects: Vec<Value>,
}

/// Load a scene description from a JSON file.
pub fn load_scene_description<P: AsRef<Path>>(path: P) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;

    let mut description = parse_scene_description(&text)?;
    description.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

    log::info!(
        "Loaded scene {}: {} objects",
        path.display(),
        description.objects.len()
    );
    Ok(description)
}

/// Parse a scene description from JSON text.
///
/// Fails only when the text is not a JSON document of the expected overall
/// shape; problems inside individual objects are logged and skipped.
pub fn parse_scene_description(text: &str) -> SceneResult<SceneDescription> {
    let raw: RawScene = serde_json::from_str(text)?;

    let camera = match raw.camera {
        Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            log::warn!("Invalid camera block ({}), using defaults", e);
            CameraDescription::default()
        }),
        None => CameraDescription::default(),
    };

    let total = raw.objects.len();
    let objects: Vec<ObjectDescription> = raw
        .objects
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| decode_object(index, value))
        .collect();

    if objects.len() < total {
        log::warn!("Skipped {} of {} scene objects", total - objects.len(), total);
    }

    Ok(SceneDescription {
        camera,
        objects,
        base_dir: PathBuf::new(),
    })
}

fn decode_object(index: usize, mut value: Value) -> Option<ObjectDescription> {
    let material = value
        .as_object_mut()
        .and_then(|fields| fields.remove("material"))
        .and_then(|m| decode_material(index, m));

    match serde_json::from_value::<ShapeDescription>(value) {
        Ok(shape) => {
            log::debug!("Object {}: {:?}", index, shape);
            Some(ObjectDescription { shape, material })
        }
        Err(e) => {
            log::warn!("Skipping object {}: {}", index, e);
            None
        }
    }
}

fn decode_material(index: usize, value: Value) -> Option<MaterialDescription> {
    serde_json::from_value(value)
        .map_err(|e| log::warn!("Ignoring material of object {}: {}", index, e))
        .ok()
}
