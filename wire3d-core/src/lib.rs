/// wire3d Core Library - OBJ wireframe parsing and the per-frame transform pipeline
///
/// This library holds everything that does not touch a screen: the bounded
/// OBJ parser, rotation and weak-perspective projection, the vertex pass run
/// once per frame, and the edge pass that feeds a line drawer.

pub mod bounded;
pub mod config;
pub mod geometry;
pub mod obj;
pub mod pipeline;
pub mod projection;
pub mod transform;
pub mod wireframe;

// Re-export commonly used types
pub use bounded::Bounded;
pub use config::{Config, ConfigError, ViewConfig};
pub use geometry::{Edge, Mesh, MeshError, Vertex2D, Vertex3D};
pub use obj::{load_obj, parse_obj, parse_obj_str, Diagnostic, ObjLimits, ParsedMesh, Resource};
pub use pipeline::{par_project_vertices, project_vertices};
pub use projection::{is_drawable, project, Camera, FocalLength};
pub use transform::{rotate_3d, RotationState};
pub use wireframe::{draw_wireframe, DrawStats, LineSink};
