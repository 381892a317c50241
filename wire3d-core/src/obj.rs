/// Wavefront OBJ reader producing an indexed wireframe
///
/// Only `v` and `f` statements are read. Texture and normal data, groups,
/// materials and every other statement are skipped. Problems in the source
/// never abort the parse except when the source itself cannot be read; they
/// are collected as [`Diagnostic`]s next to whatever mesh could be built.
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::mem::{self, Discriminant};
use std::ops::ControlFlow;
use std::path::Path;
use std::str::SplitWhitespace;

use log::{debug, error, warn};
use nalgebra::Point3;
use nom::{
    character::complete::{char, i64 as integer},
    combinator::{all_consuming, opt, rest},
    number::complete::float,
    sequence::{preceded, terminated},
    IResult,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bounded::Bounded;
use crate::geometry::{Edge, Mesh, Vertex3D};

/// Capacities applied while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjLimits {
    pub max_vertices: usize,
    pub max_edges: usize,
    /// References kept per face; the rest of a longer face is dropped
    pub max_face_vertices: usize,
    /// Diagnostics of one kind kept in full; later ones are only counted
    pub max_diagnostics_per_kind: usize,
}

/// Characters of a malformed line quoted in its diagnostic
const MAX_QUOTED_CHARS: usize = 80;

impl Default for ObjLimits {
    fn default() -> Self {
        Self {
            max_vertices: 10_000,
            max_edges: 20_000,
            max_face_vertices: 12,
            max_diagnostics_per_kind: 32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Vertices,
    Edges,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Vertices => f.write_str("vertex"),
            Resource::Edges => f.write_str("edge"),
        }
    }
}

/// Something worth reporting about the source, found while parsing it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// The source could not be opened or read. The mesh is empty.
    #[error("mesh source unavailable: {reason}")]
    SourceUnavailable { reason: String },

    /// Parsing stopped at `line` because `resource` was full.
    #[error(
        "line {line}: {resource} capacity of {limit} reached, \
         stopped with {vertex_count} vertices and {edge_count} edges"
    )]
    CapacityExceeded {
        resource: Resource,
        limit: usize,
        vertex_count: usize,
        edge_count: usize,
        line: usize,
    },

    #[error("line {line}: malformed vertex statement `{content}`")]
    MalformedVertexLine { line: usize, content: String },

    #[error("line {line}: face lists {listed} references, only the first {kept} were used")]
    FaceTooLarge {
        line: usize,
        listed: usize,
        kept: usize,
    },

    /// The reference was dropped from its face.
    #[error(
        "line {line}: face reference {reference} does not name one of the \
         {vertex_count} vertices defined so far"
    )]
    DanglingFaceReference {
        line: usize,
        reference: i64,
        vertex_count: usize,
    },

    #[error("line {line}: face has {references} usable references, at least 2 are needed")]
    DegenerateFace { line: usize, references: usize },

    /// Diagnostics past the per-kind cap, counted but not kept
    #[error("{count} further diagnostics were suppressed")]
    Suppressed { count: usize },
}

impl Diagnostic {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Diagnostic::SourceUnavailable { .. })
    }
}

/// Result of a parse: the mesh plus everything noticed along the way
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMesh {
    pub mesh: Mesh,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedMesh {
    fn unavailable(reason: String) -> Self {
        let diagnostic = Diagnostic::SourceUnavailable { reason };
        error!("{diagnostic}");
        Self {
            mesh: Mesh::new(),
            diagnostics: vec![diagnostic],
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.fatal().is_some()
    }

    pub fn fatal(&self) -> Option<&Diagnostic> {
        self.diagnostics.iter().find(|d| d.is_fatal())
    }

    /// The capacity diagnostic, if the mesh was cut short
    pub fn truncation(&self) -> Option<&Diagnostic> {
        self.diagnostics
            .iter()
            .find(|d| matches!(d, Diagnostic::CapacityExceeded { .. }))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_fatal())
    }
}

/// Read an OBJ file from disk
pub fn load_obj<P: AsRef<Path>>(path: P, limits: &ObjLimits) -> ParsedMesh {
    let path = path.as_ref();
    match File::open(path) {
        Ok(file) => parse_obj(BufReader::new(file), limits),
        Err(e) => ParsedMesh::unavailable(format!("{}: {e}", path.display())),
    }
}

pub fn parse_obj_str(input: &str, limits: &ObjLimits) -> ParsedMesh {
    parse_obj(input.as_bytes(), limits)
}

/// Parse OBJ statements line by line until the input ends or a capacity is reached
pub fn parse_obj<R: BufRead>(mut reader: R, limits: &ObjLimits) -> ParsedMesh {
    let mut parser = ObjParser::new(limits);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                // Comments are free text, so invalid UTF-8 is tolerated
                let line = String::from_utf8_lossy(&buf);
                if parser.feed_line(&line).is_break() {
                    break;
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                return ParsedMesh::unavailable(format!(
                    "read failed after line {}: {e}",
                    parser.line
                ))
            }
        }
    }

    parser.finish()
}

struct ObjParser {
    vertices: Bounded<Vertex3D>,
    edges: Bounded<Edge>,
    face: Bounded<i64>,
    resolved: Vec<usize>,
    diagnostics: Vec<Diagnostic>,
    reported: HashMap<Discriminant<Diagnostic>, usize>,
    max_per_kind: usize,
    suppressed: usize,
    line: usize,
}

impl ObjParser {
    fn new(limits: &ObjLimits) -> Self {
        Self {
            vertices: Bounded::new(limits.max_vertices),
            edges: Bounded::new(limits.max_edges),
            face: Bounded::new(limits.max_face_vertices),
            resolved: Vec::with_capacity(limits.max_face_vertices),
            diagnostics: Vec::new(),
            reported: HashMap::new(),
            max_per_kind: limits.max_diagnostics_per_kind,
            suppressed: 0,
            line: 0,
        }
    }

    fn feed_line(&mut self, text: &str) -> ControlFlow<()> {
        self.line += 1;
        let mut tokens = text.split_whitespace();
        match tokens.next() {
            Some("v") => self.vertex_statement(text, tokens),
            Some("f") => self.face_statement(tokens),
            _ => ControlFlow::Continue(()),
        }
    }

    fn vertex_statement(&mut self, text: &str, mut tokens: SplitWhitespace<'_>) -> ControlFlow<()> {
        let mut position = [0.0f32; 3];
        for slot in &mut position {
            match tokens.next().and_then(coordinate) {
                Some(value) => *slot = value,
                None => {
                    self.report(Diagnostic::MalformedVertexLine {
                        line: self.line,
                        content: text.trim_end().chars().take(MAX_QUOTED_CHARS).collect(),
                    });
                    return ControlFlow::Continue(());
                }
            }
        }

        // Anything after z (w, vertex colours) is ignored
        let [x, y, z] = position;
        if self.vertices.try_push(Point3::new(x, y, z)).is_err() {
            return self.capacity_exceeded(Resource::Vertices);
        }
        self.check_capacity()
    }

    fn face_statement(&mut self, tokens: SplitWhitespace<'_>) -> ControlFlow<()> {
        self.face.clear();
        for token in tokens {
            let Some(reference) = face_reference(token) else {
                break;
            };
            // overflow is tallied by the buffer
            let _ = self.face.try_push(reference);
        }

        if self.face.rejected() > 0 {
            self.report(Diagnostic::FaceTooLarge {
                line: self.line,
                listed: self.face.len() + self.face.rejected(),
                kept: self.face.len(),
            });
        }

        let vertex_count = self.vertices.len();
        self.resolved.clear();
        for i in 0..self.face.len() {
            let reference = self.face.as_slice()[i];
            match resolve_reference(reference, vertex_count) {
                Some(index) => self.resolved.push(index),
                None => self.report(Diagnostic::DanglingFaceReference {
                    line: self.line,
                    reference,
                    vertex_count,
                }),
            }
        }

        let n = self.resolved.len();
        if n < 2 {
            self.report(Diagnostic::DegenerateFace {
                line: self.line,
                references: n,
            });
            return ControlFlow::Continue(());
        }

        for i in 0..n {
            let edge = Edge::new(self.resolved[i], self.resolved[(i + 1) % n]);
            // the rest of the face is dropped once the edge buffer fills
            if self.edges.try_push(edge).is_err() || self.edges.is_full() {
                return self.capacity_exceeded(Resource::Edges);
            }
        }
        ControlFlow::Continue(())
    }

    /// Halt as soon as either buffer is full
    fn check_capacity(&mut self) -> ControlFlow<()> {
        if self.vertices.is_full() {
            self.capacity_exceeded(Resource::Vertices)
        } else if self.edges.is_full() {
            self.capacity_exceeded(Resource::Edges)
        } else {
            ControlFlow::Continue(())
        }
    }

    fn capacity_exceeded(&mut self, resource: Resource) -> ControlFlow<()> {
        let limit = match resource {
            Resource::Vertices => self.vertices.limit(),
            Resource::Edges => self.edges.limit(),
        };
        let diagnostic = Diagnostic::CapacityExceeded {
            resource,
            limit,
            vertex_count: self.vertices.len(),
            edge_count: self.edges.len(),
            line: self.line,
        };
        // not subject to the per-kind cap
        warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
        ControlFlow::Break(())
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        let seen = self
            .reported
            .entry(mem::discriminant(&diagnostic))
            .or_insert(0);
        *seen += 1;
        if *seen > self.max_per_kind {
            if *seen == self.max_per_kind + 1 {
                debug!("line {}: further diagnostics of this kind are only counted", self.line);
            }
            self.suppressed += 1;
            return;
        }
        warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    fn finish(mut self) -> ParsedMesh {
        if self.suppressed > 0 {
            let diagnostic = Diagnostic::Suppressed {
                count: self.suppressed,
            };
            warn!("{diagnostic}");
            self.diagnostics.push(diagnostic);
        }

        debug!(
            "parsed {} lines into {} vertices and {} edges ({} diagnostics)",
            self.line,
            self.vertices.len(),
            self.edges.len(),
            self.diagnostics.len()
        );

        // Every stored edge was resolved against the vertices present at the time
        let mesh = Mesh::from_validated(self.vertices.into_vec(), self.edges.into_vec());
        ParsedMesh {
            mesh,
            diagnostics: self.diagnostics,
        }
    }
}

fn coordinate_token(input: &str) -> IResult<&str, f32> {
    all_consuming(float)(input)
}

/// A whole token that reads as a finite float
fn coordinate(token: &str) -> Option<f32> {
    let (_, value) = coordinate_token(token).ok()?;
    value.is_finite().then_some(value)
}

/// `index`, `index/vt`, `index//vn` or `index/vt/vn`
fn reference_token(input: &str) -> IResult<&str, i64> {
    all_consuming(terminated(integer, opt(preceded(char('/'), rest))))(input)
}

fn face_reference(token: &str) -> Option<i64> {
    reference_token(token).ok().map(|(_, reference)| reference)
}

/// Map a 1-based (or negative, relative) OBJ reference onto a vertex position
fn resolve_reference(reference: i64, vertex_count: usize) -> Option<usize> {
    let count = i64::try_from(vertex_count).ok()?;
    let index = if reference > 0 {
        reference - 1
    } else {
        count + reference
    };
    if (0..count).contains(&index) {
        usize::try_from(index).ok()
    } else {
        None
    }
}
