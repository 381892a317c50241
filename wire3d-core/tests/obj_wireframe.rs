//! End-to-end checks: OBJ text on disk through to projected line segments.

use std::io::Write;

use tempfile::NamedTempFile;
use wire3d_core::{
    draw_wireframe, load_obj, parse_obj_str, project_vertices, Camera, Diagnostic, Edge,
    LineSink, ObjLimits, Resource, RotationState, Vertex2D,
};

const CUBE_OBJ: &str = "\
# unit cube
o cube
v -0.5 -0.5  0.5
v  0.5 -0.5  0.5
v  0.5  0.5  0.5
v -0.5  0.5  0.5
v -0.5 -0.5 -0.5
v  0.5 -0.5 -0.5
v  0.5  0.5 -0.5
v -0.5  0.5 -0.5
vt 0 0
vn 0 0 1
f 1/1/1 2/1/1 3/1/1 4/1/1
f 6 5 8 7
f 4 3 7 8
f 5 6 2 1
f 2 6 7 3
f 5 1 4 8
";

fn write_source(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

#[derive(Default)]
struct Segments(Vec<(Vertex2D, Vertex2D)>);

impl LineSink for Segments {
    fn draw_line(&mut self, from: Vertex2D, to: Vertex2D) {
        self.0.push((from, to));
    }
}

#[test]
fn cube_from_disk() {
    let file = write_source(CUBE_OBJ);
    let parsed = load_obj(file.path(), &ObjLimits::default());

    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
    assert_eq!(parsed.mesh.vertex_count(), 8);
    assert_eq!(parsed.mesh.edge_count(), 24);
    assert_eq!(&parsed.mesh.edges()[..4], &[
        Edge::new(0, 1),
        Edge::new(1, 2),
        Edge::new(2, 3),
        Edge::new(3, 0),
    ]);
    // each cube edge is shared by two quads
    assert_eq!(parsed.mesh.deduplicated().edge_count(), 12);
}

#[test]
fn missing_source_gives_empty_mesh() {
    let dir = tempfile::tempdir().expect("temp dir");
    let parsed = load_obj(dir.path().join("nope.obj"), &ObjLimits::default());

    assert!(parsed.is_fatal());
    assert_eq!(parsed.mesh.vertex_count(), 0);
    assert_eq!(parsed.mesh.edge_count(), 0);
    assert!(matches!(
        parsed.fatal(),
        Some(Diagnostic::SourceUnavailable { .. })
    ));
}

#[test]
fn truncated_mesh_is_still_usable() {
    let limits = ObjLimits {
        max_vertices: 6,
        ..ObjLimits::default()
    };
    let parsed = parse_obj_str(CUBE_OBJ, &limits);

    assert_eq!(parsed.mesh.vertex_count(), 6);
    assert_eq!(parsed.mesh.edge_count(), 0);
    assert!(matches!(
        parsed.truncation(),
        Some(Diagnostic::CapacityExceeded {
            resource: Resource::Vertices,
            vertex_count: 6,
            ..
        })
    ));
    assert!(!parsed.is_fatal());
}

#[test]
fn every_edge_becomes_a_segment() {
    let parsed = parse_obj_str(CUBE_OBJ, &ObjLimits::default());
    let camera = Camera::new(1920, 1080);

    let mut points = Vec::new();
    project_vertices(
        parsed.mesh.vertices(),
        &RotationState::new(0.2, 0.7, 0.0),
        &camera,
        200.0,
        &mut points,
    );

    let mut segments = Segments::default();
    let stats = draw_wireframe(parsed.mesh.edges(), &points, &mut segments);

    assert_eq!(stats.drawn, 24);
    assert_eq!(stats.culled, 0);
    for (from, to) in &segments.0 {
        for p in [from, to] {
            assert!(p.x > 0.0 && p.x < 1920.0);
            assert!(p.y > 0.0 && p.y < 1080.0);
        }
    }
}

#[test]
fn filling_edge_capacity_exactly_is_a_truncation() {
    let limits = ObjLimits {
        max_edges: 24,
        ..ObjLimits::default()
    };
    let parsed = parse_obj_str(&format!("{CUBE_OBJ}v 2 2 2\n"), &limits);

    assert_eq!(parsed.mesh.edge_count(), 24);
    assert_eq!(parsed.mesh.vertex_count(), 8);
    assert_eq!(
        parsed.truncation(),
        Some(&Diagnostic::CapacityExceeded {
            resource: Resource::Edges,
            limit: 24,
            vertex_count: 8,
            edge_count: 24,
            line: 18,
        })
    );
}

#[test]
fn face_truncation_keeps_closed_cycle() {
    let mut source = String::new();
    for i in 0..8 {
        let angle = i as f32 * std::f32::consts::TAU / 8.0;
        source.push_str(&format!("v {} {} 0\n", angle.cos(), angle.sin()));
    }
    source.push_str("f 1 2 3 4 5 6 7 8\n");

    let limits = ObjLimits {
        max_face_vertices: 5,
        ..ObjLimits::default()
    };
    let parsed = parse_obj_str(&source, &limits);

    let edges = parsed.mesh.edges();
    assert_eq!(edges.len(), 5);
    for (i, edge) in edges.iter().enumerate() {
        assert_eq!(edge.a, i);
        assert_eq!(edge.b, (i + 1) % 5);
    }
    assert!(parsed
        .diagnostics
        .contains(&Diagnostic::FaceTooLarge { line: 9, listed: 8, kept: 5 }));
}
