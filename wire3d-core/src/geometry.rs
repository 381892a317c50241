/// Geometry primitives for wireframe rendering
use nalgebra::{Point2, Point3};
use std::collections::HashSet;
use thiserror::Error;

/// A point in model space
pub type Vertex3D = Point3<f32>;

/// A point in screen space, recomputed every frame
pub type Vertex2D = Point2<f32>;

/// A line between two vertices, stored as positions in the vertex sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    /// Unordered form of the edge, smaller index first
    pub fn key(&self) -> (usize, usize) {
        if self.a <= self.b {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("edge {edge} references vertex {index}, mesh has {vertex_count} vertices")]
    EdgeOutOfBounds {
        edge: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// Indexed wireframe: an ordered vertex sequence and the edges between them.
///
/// A mesh is read-only once built. Edges are not deduplicated, so a boundary
/// shared by two faces shows up once per face.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex3D>,
    edges: Vec<Edge>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mesh from raw parts, rejecting edges that point past the vertex sequence.
    pub fn from_parts(vertices: Vec<Vertex3D>, edges: Vec<Edge>) -> Result<Self, MeshError> {
        let vertex_count = vertices.len();
        for (i, edge) in edges.iter().enumerate() {
            for index in [edge.a, edge.b] {
                if index >= vertex_count {
                    return Err(MeshError::EdgeOutOfBounds {
                        edge: i,
                        index,
                        vertex_count,
                    });
                }
            }
        }
        Ok(Self { vertices, edges })
    }

    /// Caller guarantees every edge index is in bounds.
    pub(crate) fn from_validated(vertices: Vec<Vertex3D>, edges: Vec<Edge>) -> Self {
        debug_assert!(edges
            .iter()
            .all(|e| e.a < vertices.len() && e.b < vertices.len()));
        Self { vertices, edges }
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Copy of this mesh keeping only the first occurrence of each unordered vertex pair
    pub fn deduplicated(&self) -> Self {
        let mut seen = HashSet::with_capacity(self.edges.len());
        let edges = self
            .edges
            .iter()
            .filter(|edge| seen.insert(edge.key()))
            .copied()
            .collect();

        Self {
            vertices: self.vertices.clone(),
            edges,
        }
    }

    /// Axis-aligned bounding box as (min, max)
    pub fn bounds(&self) -> Option<(Vertex3D, Vertex3D)> {
        let first = *self.vertices.first()?;
        let bounds = self
            .vertices
            .iter()
            .fold((first, first), |(min, max), v| (min.inf(v), max.sup(v)));
        Some(bounds)
    }

    /// Create a wireframe cube centred on the origin.
    ///
    /// Each of the six quads contributes its own four edges, so every cube
    /// edge appears twice, the same as a parsed OBJ cube would.
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let vertices = vec![
            Point3::new(-half, -half, -half),
            Point3::new(half, -half, -half),
            Point3::new(half, half, -half),
            Point3::new(-half, half, -half),
            Point3::new(-half, -half, half),
            Point3::new(half, -half, half),
            Point3::new(half, half, half),
            Point3::new(-half, half, half),
        ];

        const QUADS: [[usize; 4]; 6] = [
            [4, 5, 6, 7], // front
            [1, 0, 3, 2], // back
            [3, 7, 6, 2], // top
            [0, 1, 5, 4], // bottom
            [1, 2, 6, 5], // right
            [0, 4, 7, 3], // left
        ];

        let edges = QUADS
            .iter()
            .flat_map(|quad| (0..4).map(move |i| Edge::new(quad[i], quad[(i + 1) % 4])))
            .collect();

        Self::from_validated(vertices, edges)
    }
}
