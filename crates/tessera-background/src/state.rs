//! Triangle background animation state.

use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Frame, widgets::Paragraph};
use tessera_core::BackgroundOptions;

use crate::grid::GridLayout;
use crate::point::Point;
use crate::surface::Surface;

/// Grid position `(col, row)` of a point.
pub type GridPos = (u32, u32);

/// Neighbors of a block center, clockwise from the top-left, closing the ring.
const RING: [(i32, i32); 9] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// The eight triangles fanning from the block center at `(c, r)`.
pub fn block_fan(c: u32, r: u32) -> [(GridPos, GridPos, GridPos); 8] {
    let at = |(dc, dr): (i32, i32)| ((c as i32 + dc) as u32, (r as i32 + dr) as u32);
    std::array::from_fn(|k| ((c, r), at(RING[k]), at(RING[k + 1])))
}

/// Animation controller for the triangle mesh.
///
/// Owns the grid, its points and the pixel surface, and keeps them in step
/// with the viewport size.
#[derive(Debug)]
pub struct TriangleBackground {
    options: BackgroundOptions,
    layout: GridLayout,
    /// Points stored column-major: `(cols + 1) x (rows + 1)`.
    points: Vec<Point>,
    surface: Surface,
    /// Pointer position in pixels.
    pointer: Option<(i32, i32)>,
    /// Last known terminal width.
    last_width: u16,
    /// Last known terminal height.
    last_height: u16,
    rng: StdRng,
}

impl TriangleBackground {
    /// Create a background seeded from the operating system.
    pub fn new(options: BackgroundOptions) -> Self {
        Self::with_rng(options, StdRng::from_entropy())
    }

    /// Create a background with a fixed seed.
    pub fn with_seed(options: BackgroundOptions, seed: u64) -> Self {
        Self::with_rng(options, StdRng::seed_from_u64(seed))
    }

    fn with_rng(options: BackgroundOptions, rng: StdRng) -> Self {
        Self {
            options,
            layout: GridLayout::default(),
            points: Vec::new(),
            surface: Surface::default(),
            pointer: None,
            last_width: 0,
            last_height: 0,
            rng,
        }
    }

    pub fn options(&self) -> &BackgroundOptions {
        &self.options
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn pointer(&self) -> Option<(i32, i32)> {
        self.pointer
    }

    /// Point at grid column `c`, row `r`.
    pub fn point(&self, c: u32, r: u32) -> Option<&Point> {
        if c as usize >= self.layout.point_cols() || r as usize >= self.layout.point_rows() {
            return None;
        }
        self.points.get(c as usize * self.layout.point_rows() + r as usize)
    }

    /// Lay out the grid for a `width x height` pixel surface and regenerate
    /// every point.
    pub fn resize(&mut self, width: u32, height: u32, now_ms: u64) {
        self.layout = GridLayout::new(width, height, &self.options);
        self.surface.resize(width, height, self.options.colors.background);

        let layout = self.layout;
        let mut points = Vec::with_capacity(layout.point_cols() * layout.point_rows());
        for c in 0..layout.point_cols() as u32 {
            for r in 0..layout.point_rows() as u32 {
                points.push(Point::random(
                    c,
                    r,
                    &layout,
                    &self.options,
                    now_ms,
                    &mut self.rng,
                ));
            }
        }
        self.points = points;

        tracing::debug!(
            width,
            height,
            cols = layout.cols,
            rows = layout.rows,
            points = self.points.len(),
            "regenerated triangle grid"
        );
    }

    /// Lay out the grid for a terminal area of `width x height` cells.
    pub fn resize_cells(&mut self, width: u16, height: u16, now_ms: u64) {
        self.last_width = width;
        self.last_height = height;
        self.resize(u32::from(width), u32::from(height) * 2, now_ms);
    }

    /// Record the pointer position in pixels.
    pub fn set_pointer(&mut self, x: i32, y: i32) {
        self.pointer = Some((x, y));
    }

    /// Forget the pointer, e.g. when it leaves the surface.
    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Advance every point by one frame.
    pub fn update(&mut self, now_ms: u64) {
        tracing::trace!(now_ms, pointer = ?self.pointer, "frame");
        let layout = self.layout;
        for point in &mut self.points {
            point.update(self.pointer, &layout, &self.options, now_ms, &mut self.rng);
        }
    }

    /// Clear the surface and paint every triangle.
    pub fn draw(&mut self) {
        self.surface.clear(self.options.colors.background);

        let layout = self.layout;
        for c in (1..layout.cols).step_by(2) {
            for r in (1..layout.rows).step_by(2) {
                for (center, a, b) in block_fan(c, r) {
                    let (Some(center), Some(a), Some(b)) = (
                        self.point(center.0, center.1),
                        self.point(a.0, a.1),
                        self.point(b.0, b.1),
                    ) else {
                        continue;
                    };
                    let (origin, p, q) = (center.pos, a.pos, b.pos);
                    let (alpha, fill, stroke, width) =
                        (center.opacity.current, a.fill, a.stroke, a.line_width);

                    self.surface.fill_triangle(origin, p, q, fill, alpha);
                    self.surface.stroke_line(origin, p, width, stroke, alpha);
                    self.surface.stroke_line(p, q, width, stroke, alpha);
                    self.surface.stroke_line(q, origin, width, stroke, alpha);
                }
            }
        }
    }

    /// Advance one frame and render the background to the frame.
    ///
    /// The grid is regenerated whenever the frame area changes size.
    pub fn render(&mut self, frame: &mut Frame, elapsed_ms: u64) {
        let area = frame.area();
        let width = area.width;
        let height = area.height;

        if width != self.last_width || height != self.last_height {
            self.resize_cells(width, height, elapsed_ms);
        }

        self.update(elapsed_ms);
        self.draw();

        frame.render_widget(Paragraph::new(self.surface.to_lines()), area);
    }
}
