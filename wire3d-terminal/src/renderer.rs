/// ASCII line rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wire3d_core::{LineSink, Vertex2D};

const LINE_COLOR: Color = Color::Rgb {
    r: 255,
    g: 166,
    b: 0,
};

/// Draws projected lines into a grid of terminal cells.
///
/// Incoming coordinates are in the logical screen the camera projects onto;
/// they are scaled to the cell grid, so the picture keeps its framing when
/// the terminal is resized.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    logical_width: f32,
    logical_height: f32,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize, logical_width: f32, logical_height: f32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            logical_width,
            logical_height,
            char_buffer: vec![' '; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.char_buffer = vec![' '; self.width * self.height];
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.char_buffer
            .chunks(self.width)
            .map(|row| row.iter().collect())
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.queue(SetForegroundColor(LINE_COLOR))?;
        for (y, row) in self.rows().enumerate() {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            writer.queue(Print(row))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    fn to_cells(&self, p: Vertex2D) -> (f32, f32) {
        (
            p.x * self.width as f32 / self.logical_width,
            p.y * self.height as f32 / self.logical_height,
        )
    }

    fn plot(&mut self, x: f32, y: f32, glyph: char) {
        let (x, y) = (x.floor(), y.floor());
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.char_buffer[y * self.width + x] = glyph;
        }
    }
}

impl LineSink for AsciiRenderer {
    fn draw_line(&mut self, from: Vertex2D, to: Vertex2D) {
        let from = self.to_cells(from);
        let to = self.to_cells(to);
        let Some((a, b)) = clip_line(from, to, self.width as f32, self.height as f32) else {
            return;
        };

        let dx = b.0 - a.0;
        let dy = b.1 - a.1;
        let glyph = slope_glyph(dx, dy);

        // DDA walk, one plot per cell along the major axis
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.plot(a.0 + dx * t, a.1 + dy * t, glyph);
        }
    }
}

fn slope_glyph(dx: f32, dy: f32) -> char {
    if dy.abs() <= dx.abs() * 0.5 {
        '-'
    } else if dx.abs() < dy.abs() * 0.5 {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        // y grows downward
        '\\'
    } else {
        '/'
    }
}

/// Liang-Barsky clip of the segment `a`-`b` against `[0, width] x [0, height]`
fn clip_line(
    a: (f32, f32),
    b: (f32, f32),
    width: f32,
    height: f32,
) -> Option<((f32, f32), (f32, f32))> {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    for (p, q) in [(-dx, a.0), (dx, width - a.0), (-dy, a.1), (dy, height - a.1)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        (a.0 + t0 * dx, a.1 + t0 * dy),
        (a.0 + t1 * dx, a.1 + t1 * dy),
    ))
}
