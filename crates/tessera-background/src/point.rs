//! Grid points and their per-frame behavior.

use rand::Rng;
use tessera_core::{BackgroundOptions, Rgb};

use crate::grid::GridLayout;

/// Opacity of a point: the value it was created with and the one drawn now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opacity {
    pub base: f32,
    pub current: f32,
}

/// A grid vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Grid column.
    pub col: u32,
    /// Grid row.
    pub row: u32,
    /// Current position in pixels.
    pub pos: (i32, i32),
    /// Position the point is drifting toward.
    pub target: (i32, i32),
    pub fill: Rgb,
    pub stroke: Rgb,
    /// Stroke width in pixels (1 or 2).
    pub line_width: u8,
    pub opacity: Opacity,
    /// Start of the current highlight cycle, in animation milliseconds.
    pub created_at: u64,
    /// Last frame the point was highlighted, in animation milliseconds.
    pub updated_at: u64,
    /// Whether the point was inside the pointer radius last frame.
    pub highlighted: bool,
}

impl Point {
    /// Create a point with random position, target and appearance.
    pub fn random<R: Rng + ?Sized>(
        col: u32,
        row: u32,
        layout: &GridLayout,
        options: &BackgroundOptions,
        now_ms: u64,
        rng: &mut R,
    ) -> Self {
        let palette = &options.colors;
        let fill = if palette.fill.is_empty() {
            palette.stroke
        } else {
            palette.fill[rng.gen_range(0..palette.fill.len())]
        };
        let (min, max) = (options.opacity.min, options.opacity.max);
        let base = round3(rng.gen_range(min.min(max)..=max.max(min))).clamp(0.0, 1.0);

        Self {
            col,
            row,
            pos: layout.random_coords(col, row, rng),
            target: layout.random_coords(col, row, rng),
            fill,
            stroke: palette.stroke,
            line_width: rng.gen_range(1..=2),
            opacity: Opacity {
                base,
                current: base,
            },
            created_at: now_ms,
            updated_at: now_ms,
            highlighted: false,
        }
    }

    /// Advance the point by one frame.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        pointer: Option<(i32, i32)>,
        layout: &GridLayout,
        options: &BackgroundOptions,
        now_ms: u64,
        rng: &mut R,
    ) {
        self.stroke = options.colors.stroke;

        match pointer {
            Some(pointer) if self.distance_to(pointer) <= options.proximity => {
                self.highlight(options, now_ms);
            }
            _ => self.highlighted = false,
        }

        if self.pos == self.target {
            self.target = layout.random_coords(self.col, self.row, rng);
        } else {
            self.pos.0 += (self.target.0 - self.pos.0).signum();
            self.pos.1 += (self.target.1 - self.pos.1).signum();
        }
    }

    /// Distance to `(x, y)` rounded to the nearest pixel.
    pub fn distance_to(&self, (x, y): (i32, i32)) -> u32 {
        let dx = (x - self.pos.0) as f64;
        let dy = (y - self.pos.1) as f64;
        dx.hypot(dy).round() as u32
    }

    /// Step the highlight cycle.
    fn highlight(&mut self, options: &BackgroundOptions, now_ms: u64) {
        self.stroke = options.colors.highlight;

        if !self.highlighted {
            self.highlighted = true;
            self.created_at = now_ms;
            self.updated_at = now_ms;
        }

        let elapsed = self.updated_at.saturating_sub(self.created_at);
        self.updated_at = now_ms;
        self.opacity.current = cycle_opacity(self.opacity.base, elapsed, options.transition_ms);

        if elapsed >= options.transition_ms {
            self.created_at = self.updated_at;
        }
    }
}

/// Triangle wave from `base` up to 1 and back over `duration_ms`.
fn cycle_opacity(base: f32, elapsed_ms: u64, duration_ms: u64) -> f32 {
    let t = elapsed_ms as f32 / duration_ms.max(1) as f32;
    let mut alpha = base + (1.0 - base) * t * 2.0;
    if alpha > 1.0 {
        alpha = 2.0 - alpha;
    }
    round3(alpha).clamp(0.0, 1.0)
}

fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}
