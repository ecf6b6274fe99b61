//! Pixel surface the triangles are painted into.
//!
//! A terminal cell shows two pixels stacked vertically using the upper half
//! block: the foreground paints the top pixel, the background the bottom one.

use ratatui::{
    style::Style,
    text::{Line, Span},
};
use tessera_core::Rgb;

/// Glyph whose foreground covers the top half of a cell.
const UPPER_HALF: &str = "▀";

/// An RGB pixel buffer.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Surface {
    /// Create a surface filled with `color`.
    pub fn new(width: u32, height: u32, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resize the surface, discarding its contents.
    pub fn resize(&mut self, width: u32, height: u32, color: Rgb) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, color);
    }

    /// Fill every pixel with `color`.
    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Color of the pixel at `(x, y)`, if it is on the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Composite `color` over the pixel at `(x, y)`. Off-surface pixels are ignored.
    pub fn blend(&mut self, x: i32, y: i32, color: Rgb, alpha: f32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.over(self.pixels[i], alpha);
        }
    }

    /// Fill the triangle `a b c`, sampling at pixel centers.
    pub fn fill_triangle(
        &mut self,
        a: (i32, i32),
        b: (i32, i32),
        c: (i32, i32),
        color: Rgb,
        alpha: f32,
    ) {
        let area = edge(a, b, c);
        if area == 0 {
            return;
        }

        let min_x = a.0.min(b.0).min(c.0).max(0);
        let max_x = a.0.max(b.0).max(c.0).min(self.width as i32 - 1);
        let min_y = a.1.min(b.1).min(c.1).max(0);
        let max_y = a.1.max(b.1).max(c.1).min(self.height as i32 - 1);

        // Work in doubled coordinates so pixel centers stay integral
        let (a2, b2, c2) = (double(a), double(b), double(c));
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (2 * x + 1, 2 * y + 1);
                let w0 = edge(b2, c2, p);
                let w1 = edge(c2, a2, p);
                let w2 = edge(a2, b2, p);
                let inside = if area > 0 {
                    w0 >= 0 && w1 >= 0 && w2 >= 0
                } else {
                    w0 <= 0 && w1 <= 0 && w2 <= 0
                };
                if inside {
                    self.blend(x, y, color, alpha);
                }
            }
        }
    }

    /// Draw a line from `from` to `to`. A `width` of 2 doubles it downward.
    pub fn stroke_line(
        &mut self,
        from: (i32, i32),
        to: (i32, i32),
        width: u8,
        color: Rgb,
        alpha: f32,
    ) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.blend(x, y, color, alpha);
            if width > 1 {
                self.blend(x, y + 1, color, alpha);
            }
            if (x, y) == to {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Convert the surface into half-block terminal lines.
    ///
    /// Each line covers two pixel rows. An odd trailing row is paired with
    /// the background of the last cell.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        (0..self.height.div_ceil(2) as i32)
            .map(|row| {
                let spans: Vec<Span> = (0..self.width as i32)
                    .map(|x| {
                        let top = self.pixel(x, row * 2).unwrap_or_default();
                        let bottom = self.pixel(x, row * 2 + 1).unwrap_or(top);
                        Span::styled(
                            UPPER_HALF,
                            Style::new().fg(top.color()).bg(bottom.color()),
                        )
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

/// Twice the signed area of `a b p`.
fn edge(a: (i32, i32), b: (i32, i32), p: (i32, i32)) -> i64 {
    (b.0 - a.0) as i64 * (p.1 - a.1) as i64 - (b.1 - a.1) as i64 * (p.0 - a.0) as i64
}

fn double(p: (i32, i32)) -> (i32, i32) {
    (p.0 * 2, p.1 * 2)
}
