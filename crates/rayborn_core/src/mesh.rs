//! Triangle mesh geometry and OBJ loading.
//!
//! Meshes are kept renderer-agnostic: a list of positions and triangle
//! indices. The renderer turns every face into its own triangle primitive.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use rayborn_math::{Aabb, Vec3};
use thiserror::Error;

/// Errors that can occur while loading a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OBJ error: {0}")]
    Obj(#[from] tobj::LoadError),
}

/// A mesh consisting of vertex positions and triangle indices.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,

    /// Axis-aligned bounding box
    pub bounds: Aabb,
}

impl Mesh {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let bounds = Aabb::from_point_cloud(&positions);
        Self {
            positions,
            indices,
            bounds,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Extract triangle vertices as `[v0, v1, v2]` triplets.
    ///
    /// Faces referencing a vertex that does not exist are skipped.
    pub fn extract_triangle_vertices(&self) -> Vec<[Vec3; 3]> {
        let mut triangles = Vec::with_capacity(self.triangle_count());

        for chunk in self.indices.chunks_exact(3) {
            let i0 = chunk[0] as usize;
            let i1 = chunk[1] as usize;
            let i2 = chunk[2] as usize;

            if i0 >= self.positions.len()
                || i1 >= self.positions.len()
                || i2 >= self.positions.len()
            {
                log::warn!(
                    "Invalid triangle indices: [{}, {}, {}], vertex count: {}",
                    i0,
                    i1,
                    i2,
                    self.positions.len()
                );
                continue;
            }

            triangles.push([self.positions[i0], self.positions[i1], self.positions[i2]]);
        }

        triangles
    }
}

/// Load an OBJ file, scaling every vertex by `scale` then moving it by `origin`.
pub fn load_obj<P: AsRef<Path>>(path: P, scale: f32, origin: Vec3) -> Result<Mesh, MeshError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mesh = parse_obj(BufReader::new(file), scale, origin)?;

    log::info!(
        "Loaded mesh {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Parse OBJ text from a reader.
///
/// Only `v` and `f` records matter: texture and normal sub-indices of faces
/// are accepted and ignored, polygons are fan-triangulated, and every object
/// in the file is merged into one mesh. Faces that reference a missing
/// vertex are skipped with a warning; the rest of the mesh still loads.
pub fn parse_obj<R: BufRead>(mut reader: R, scale: f32, origin: Vec3) -> Result<Mesh, MeshError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let text = drop_invalid_faces(&text);

    let (models, _materials) = tobj::load_obj_buf(
        &mut text.as_bytes(),
        &tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ignore_points: true,
            ignore_lines: true,
            ..Default::default()
        },
        // Material libraries are not used
        |_| Ok(Default::default()),
    )?;

    if models.is_empty() {
        log::warn!("No geometry found in OBJ data");
    }

    let mut positions = Vec::new();
    let mut indices = Vec::new();

    for model in &models {
        let base = positions.len() as u32;
        positions.extend(
            model
                .mesh
                .positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2]) * scale + origin),
        );
        indices.extend(model.mesh.indices.iter().map(|i| base + i));
    }

    Ok(Mesh::new(positions, indices))
}

/// Remove face records tobj would reject for the whole file.
///
/// Kept faces are rewritten as bare, absolute position indices.
fn drop_invalid_faces(text: &str) -> String {
    let vertex_total = text
        .lines()
        .filter(|line| line.split_whitespace().next() == Some("v"))
        .count();

    let mut filtered = String::with_capacity(text.len());
    let mut vertices_seen = 0;

    for (number, line) in text.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => vertices_seen += 1,
            Some("f") => {
                let corners: Option<Vec<String>> = tokens
                    .take_while(|token| !token.starts_with('#'))
                    .map(|token| {
                        resolve_vertex_index(token, vertices_seen, vertex_total)
                            .map(|index| index.to_string())
                    })
                    .collect();

                match corners {
                    Some(corners) if corners.len() >= 3 => {
                        filtered.push_str("f ");
                        filtered.push_str(&corners.join(" "));
                        filtered.push('\n');
                    }
                    _ => log::warn!(
                        "Skipping face on line {} (vertex count: {}): {}",
                        number + 1,
                        vertex_total,
                        line.trim()
                    ),
                }
                continue;
            }
            _ => {}
        }
        filtered.push_str(line);
        filtered.push('\n');
    }

    filtered
}

/// Resolve one face corner to a 1-based position index.
///
/// Negative indices count back from the last vertex read so far.
fn resolve_vertex_index(token: &str, vertices_seen: usize, vertex_total: usize) -> Option<usize> {
    let index: i64 = token.split('/').next()?.parse().ok()?;

    if index > 0 {
        let index = usize::try_from(index).ok()?;
        (index <= vertex_total).then_some(index)
    } else if index < 0 {
        let back = usize::try_from(index.unsigned_abs()).ok()?;
        (back <= vertices_seen).then(|| vertices_seen - back + 1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
# unit quad in the XY plane
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
f 1 2 3 4
";

    #[test]
    fn test_mesh_creation() {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let mesh = Mesh::new(positions, vec![0, 1, 2]);

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!((mesh.bounds.x.max - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_extract_skips_out_of_range_faces() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        // Second face points past the vertex list
        let mesh = Mesh::new(positions.clone(), vec![0, 1, 2, 0, 1, 7]);
        let triangles = mesh.extract_triangle_vertices();

        assert_eq!(triangles.len(), 1);
        assert_eq!(triangles[0], [positions[0], positions[1], positions[2]]);
    }

    #[test]
    fn test_parse_obj_triangulates() {
        let mesh = parse_obj(QUAD.as_bytes(), 1.0, Vec3::ZERO).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_parse_obj_scale_then_translate() {
        let mesh = parse_obj(QUAD.as_bytes(), 2.0, Vec3::new(10.0, 0.0, -5.0)).unwrap();

        assert!(mesh.positions.contains(&Vec3::new(10.0, 0.0, -5.0)));
        assert!(mesh.positions.contains(&Vec3::new(12.0, 2.0, -5.0)));
        assert!((mesh.bounds.x.min - 10.0).abs() < 0.001);
        assert!((mesh.bounds.x.max - 12.0).abs() < 0.001);
    }

    #[test]
    fn test_parse_obj_ignores_texture_and_normal_indices() {
        let text = "\
v -1.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 0.5 1.0
vn 0.0 0.0 1.0
f 1/1/1 2/2/1 3/3/1
";
        let mesh = parse_obj(text.as_bytes(), 1.0, Vec3::ZERO).unwrap();
        let triangles = mesh.extract_triangle_vertices();

        assert_eq!(triangles.len(), 1);
        assert_eq!(triangles[0][0], Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(triangles[0][2], Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_parse_obj_skips_out_of_range_faces() {
        let text = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
f 1 2 9
f 0 1 2
";
        let mesh = parse_obj(text.as_bytes(), 1.0, Vec3::ZERO).unwrap();
        let triangles = mesh.extract_triangle_vertices();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(triangles.len(), 1);
        assert_eq!(triangles[0], [Vec3::ZERO, Vec3::X, Vec3::Y]);
    }

    #[test]
    fn test_parse_obj_relative_indices() {
        let text = "\
v 0 0 0
v 1 0 0
v 0 1 0
f -3 -2 -1
f -4 -2 -1
v 0 0 1
f 1 2 -1
";
        let mesh = parse_obj(text.as_bytes(), 1.0, Vec3::ZERO).unwrap();
        let triangles = mesh.extract_triangle_vertices();

        // `-4` reaches before the first vertex
        assert_eq!(triangles.len(), 2);
        assert!(triangles.contains(&[Vec3::ZERO, Vec3::X, Vec3::Y]));
        assert!(triangles.contains(&[Vec3::ZERO, Vec3::X, Vec3::Z]));
    }

    #[test]
    fn test_parse_obj_ignores_bad_texture_indices() {
        // No `vt` records, so the texture sub-indices point nowhere
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/4 2/5 3/6\n";
        let mesh = parse_obj(text.as_bytes(), 1.0, Vec3::ZERO).unwrap();

        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_load_obj_from_file() {
        let path = std::env::temp_dir().join(format!("rayborn_mesh_{}.obj", std::process::id()));
        std::fs::write(&path, QUAD).unwrap();

        let mesh = load_obj(&path, 1.0, Vec3::ZERO).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_load_obj_missing_file() {
        let result = load_obj("/nonexistent/rayborn/mesh.obj", 1.0, Vec3::ZERO);
        assert!(matches!(result, Err(MeshError::Io(_))));
    }
}
