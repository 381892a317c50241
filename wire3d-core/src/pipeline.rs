/// Per-frame vertex pass: rotate every model vertex and project it to screen space
///
/// Vertices are independent of each other, so the pass is a plain map from
/// the model buffer into an output buffer of the same length.
use rayon::prelude::*;

use crate::geometry::{Vertex2D, Vertex3D};
use crate::projection::Camera;
use crate::transform::{rotate_3d, RotationState};

/// Transform `vertices` into `out`, replacing its previous contents.
///
/// `focal_length` is taken by value so one frame sees a single zoom level.
pub fn project_vertices(
    vertices: &[Vertex3D],
    rotation: &RotationState,
    camera: &Camera,
    focal_length: f32,
    out: &mut Vec<Vertex2D>,
) {
    let r = *rotation;
    out.clear();
    out.extend(
        vertices
            .iter()
            .map(|v| camera.project(&rotate_3d(*v, r.x, r.y, r.z), focal_length)),
    );
}

/// Same as [`project_vertices`], spread across the rayon thread pool
pub fn par_project_vertices(
    vertices: &[Vertex3D],
    rotation: &RotationState,
    camera: &Camera,
    focal_length: f32,
    out: &mut Vec<Vertex2D>,
) {
    let r = *rotation;
    vertices
        .par_iter()
        .map(|v| camera.project(&rotate_3d(*v, r.x, r.y, r.z), focal_length))
        .collect_into_vec(out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Mesh;
    use crate::projection::project;

    #[test]
    fn test_matches_per_vertex_functions() {
        let mesh = Mesh::cube(2.0);
        let rotation = RotationState::new(0.4, 1.3, -0.7);
        let camera = Camera::new(1920, 1080);

        let mut out = Vec::new();
        project_vertices(mesh.vertices(), &rotation, &camera, 350.0, &mut out);
        assert_eq!(out.len(), mesh.vertex_count());

        for (v, p) in mesh.vertices().iter().zip(&out) {
            let rotated = rotate_3d(*v, rotation.x, rotation.y, rotation.z);
            assert_eq!(*p, project(&rotated, 4.0, 350.0, 1920.0, 1080.0));
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mesh = Mesh::cube(3.0);
        let rotation = RotationState::new(0.1, 0.2, 0.3);
        let camera = Camera::new(800, 600).with_distance(6.0);

        let mut sequential = Vec::new();
        let mut parallel = vec![Vertex2D::origin(); 3];
        project_vertices(mesh.vertices(), &rotation, &camera, 200.0, &mut sequential);
        par_project_vertices(mesh.vertices(), &rotation, &camera, 200.0, &mut parallel);

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_output_buffer_is_replaced() {
        let mut out = vec![Vertex2D::new(1.0, 1.0); 10];
        project_vertices(&[], &RotationState::zero(), &Camera::default(), 200.0, &mut out);
        assert!(out.is_empty());

        let vertices = [Vertex3D::origin()];
        project_vertices(&vertices, &RotationState::zero(), &Camera::default(), 200.0, &mut out);
        assert_eq!(out, vec![Vertex2D::new(960.0, 540.0)]);
    }
}
