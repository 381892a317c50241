/// Edge pass: hand one line per edge to whatever draws lines
use log::trace;

use crate::geometry::{Edge, Vertex2D};
use crate::projection::is_drawable;

/// Line-drawing primitive supplied by the rendering back end
pub trait LineSink {
    fn draw_line(&mut self, from: Vertex2D, to: Vertex2D);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub drawn: usize,
    /// Edges skipped because an endpoint was missing or non-finite
    pub culled: usize,
}

/// Draw every edge between its two projected endpoints
pub fn draw_wireframe<S: LineSink + ?Sized>(
    edges: &[Edge],
    points: &[Vertex2D],
    sink: &mut S,
) -> DrawStats {
    let mut stats = DrawStats::default();

    for edge in edges {
        match (points.get(edge.a), points.get(edge.b)) {
            (Some(from), Some(to)) if is_drawable(from) && is_drawable(to) => {
                sink.draw_line(*from, *to);
                stats.drawn += 1;
            }
            _ => stats.culled += 1,
        }
    }

    if stats.culled > 0 {
        trace!("culled {} of {} edges", stats.culled, edges.len());
    }
    stats
}
