//! Grid layout: how the surface is split into cells.

use rand::Rng;
use tessera_core::BackgroundOptions;

/// Grid geometry derived from the surface size and the base density.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridLayout {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Number of columns (always even).
    pub cols: u32,
    /// Number of rows (always even).
    pub rows: u32,
    pub cell_width: f32,
    pub cell_height: f32,
    /// Horizontal padding inside a cell, in pixels.
    pub padding_x: f32,
    /// Vertical padding inside a cell, in pixels.
    pub padding_y: f32,
}

impl GridLayout {
    /// Compute the layout for a `width x height` pixel surface.
    ///
    /// Small surfaces get proportionally more cells. A zero-sized surface
    /// produces an empty grid.
    pub fn new(width: u32, height: u32, options: &BackgroundOptions) -> Self {
        if width == 0 || height == 0 {
            return Self {
                width,
                height,
                ..Default::default()
            };
        }

        let cols = even_count(options.cols, width);
        let rows = even_count(options.rows, height);
        let cell_width = width as f32 / cols as f32;
        let cell_height = height as f32 / rows as f32;

        Self {
            width,
            height,
            cols,
            rows,
            cell_width,
            cell_height,
            padding_x: cell_width * options.cell_padding / 100.0,
            padding_y: cell_height * options.cell_padding / 100.0,
        }
    }

    /// Whether the layout has no cells.
    pub fn is_empty(&self) -> bool {
        self.cols == 0 || self.rows == 0
    }

    /// Number of point columns (`cols + 1`, or zero when empty).
    pub fn point_cols(&self) -> usize {
        if self.is_empty() { 0 } else { self.cols as usize + 1 }
    }

    /// Number of point rows (`rows + 1`, or zero when empty).
    pub fn point_rows(&self) -> usize {
        if self.is_empty() { 0 } else { self.rows as usize + 1 }
    }

    /// Pick random coordinates for the point at column `c`, row `r`.
    ///
    /// Interior points wander around their grid intersection, shrunk by the
    /// cell padding. Points on the border are pinned to it on the border axis.
    pub fn random_coords<R: Rng + ?Sized>(&self, c: u32, r: u32, rng: &mut R) -> (i32, i32) {
        let x = random_axis(c, self.cols, self.cell_width, self.padding_x, self.width, rng);
        let y = random_axis(r, self.rows, self.cell_height, self.padding_y, self.height, rng);
        (x, y)
    }
}

/// Upper bound on cells per axis, whatever the options say.
const MAX_CELLS: u32 = 512;

/// `ceil(base + base / extent * 100)`, bumped to the next even number and
/// capped at [`MAX_CELLS`].
fn even_count(base: u32, extent: u32) -> u32 {
    let base = base as f32;
    let count = (base + base / extent as f32 * 100.0)
        .ceil()
        .min(MAX_CELLS as f32) as u32;
    if count % 2 != 0 { count + 1 } else { count }
}

/// One coordinate of a point at grid `index` along an axis of `count` cells.
fn random_axis<R: Rng + ?Sized>(
    index: u32,
    count: u32,
    cell: f32,
    padding: f32,
    extent: u32,
    rng: &mut R,
) -> i32 {
    if index == 0 {
        return 0;
    }
    if index >= count {
        return extent as i32;
    }

    let line = index as f32 * cell;
    let min = line - cell + padding;
    let max = line + cell - padding;
    let value = if min < max {
        rng.gen_range(min..max).floor()
    } else {
        line.floor()
    };
    (value as i32).clamp(0, extent as i32)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_dimensions_are_even() {
        let options = BackgroundOptions::default();
        for width in 1..400 {
            for height in [1, 2, 7, 33, 48, 97, 200] {
                let layout = GridLayout::new(width, height, &options);
                assert_eq!(layout.cols % 2, 0, "cols for {width}x{height}");
                assert_eq!(layout.rows % 2, 0, "rows for {width}x{height}");
                assert!(layout.cols >= 2 && layout.rows >= 2);
            }
        }
    }

    #[test]
    fn test_density_formula() {
        let options = BackgroundOptions::default();
        // 4 + 4/80*100 = 9 -> 10, 3 + 3/48*100 = 9.25 -> 10
        let layout = GridLayout::new(80, 48, &options);
        assert_eq!((layout.cols, layout.rows), (10, 10));
        assert_eq!(layout.cell_width, 8.0);
        assert_eq!(layout.cell_height, 4.8);
        assert_eq!(layout.padding_x, 4.0);
        assert_eq!(layout.point_cols(), 11);
    }

    #[test]
    fn test_oversized_density_is_capped() {
        for base in [1_000_000, u32::MAX] {
            let options = BackgroundOptions {
                cols: base,
                rows: base,
                ..Default::default()
            };
            let layout = GridLayout::new(80, 48, &options);
            assert_eq!((layout.cols, layout.rows), (MAX_CELLS, MAX_CELLS));
        }
        // Tiny surfaces inflate the count but stay under the cap
        let layout = GridLayout::new(1, 1, &BackgroundOptions::default());
        assert_eq!((layout.cols, layout.rows), (404, 304));
    }

    #[test]
    fn test_zero_size_is_empty() {
        let options = BackgroundOptions::default();
        let layout = GridLayout::new(0, 40, &options);
        assert!(layout.is_empty());
        assert_eq!(layout.point_cols(), 0);
        assert_eq!(layout.point_rows(), 0);
    }

    #[test]
    fn test_random_coords_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for padding in [0.0, 25.0, 50.0, 80.0, 100.0] {
            let options = BackgroundOptions {
                cell_padding: padding,
                ..Default::default()
            };
            let layout = GridLayout::new(120, 60, &options);
            for c in 0..=layout.cols {
                for r in 0..=layout.rows {
                    let (x, y) = layout.random_coords(c, r, &mut rng);
                    assert!((0..=120).contains(&x), "x={x} c={c} padding={padding}");
                    assert!((0..=60).contains(&y), "y={y} r={r} padding={padding}");
                }
            }
        }
    }

    #[test]
    fn test_border_points_are_pinned() {
        let mut rng = StdRng::seed_from_u64(3);
        let layout = GridLayout::new(100, 50, &BackgroundOptions::default());
        for _ in 0..20 {
            assert_eq!(layout.random_coords(0, 0, &mut rng), (0, 0));
            assert_eq!(
                layout.random_coords(layout.cols, layout.rows, &mut rng),
                (100, 50)
            );
            assert_eq!(layout.random_coords(0, 3, &mut rng).0, 0);
            assert_eq!(layout.random_coords(2, layout.rows, &mut rng).1, 50);
        }
    }

    #[test]
    fn test_full_padding_collapses_to_intersection() {
        let mut rng = StdRng::seed_from_u64(11);
        let options = BackgroundOptions {
            cell_padding: 100.0,
            ..Default::default()
        };
        let layout = GridLayout::new(80, 48, &options);
        assert_eq!(layout.random_coords(3, 5, &mut rng), (24, 24));
    }
}
