//! Background options and their validation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Rgb;

/// Largest accepted base column or row density.
pub const MAX_DENSITY: u32 = 64;

/// Errors raised by invalid option values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionsError {
    #[error("invalid color `{0}`, expected #rrggbb or #rgb")]
    InvalidColor(String),
    #[error("fill palette must contain at least one color")]
    EmptyPalette,
    #[error("base grid density must be between 1x1 and {max}x{max}, got {cols}x{rows}", max = MAX_DENSITY)]
    GridDensity { cols: u32, rows: u32 },
    #[error("cell padding must be between 0 and 100 percent, got {0}")]
    CellPadding(f32),
    #[error("fps must be between 1 and 120, got {0}")]
    Fps(u32),
    #[error("transition duration must be positive")]
    Transition,
    #[error("opacity range must satisfy 0 <= min <= max <= 1, got {min}..{max}")]
    Opacity { min: f32, max: f32 },
}

/// Colors used to paint the triangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Triangle fill colors, one picked at random per point.
    pub fill: Vec<Rgb>,
    /// Triangle border color.
    pub stroke: Rgb,
    /// Border color of points near the pointer.
    pub highlight: Rgb,
    /// Color the surface is cleared to every frame.
    pub background: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            fill: vec![
                Rgb::new(0x46, 0x46, 0x46),
                Rgb::new(0x44, 0x44, 0x44),
                Rgb::new(0x42, 0x42, 0x42),
                Rgb::new(0x40, 0x40, 0x40),
                Rgb::new(0x3e, 0x3e, 0x3e),
                Rgb::new(0x3c, 0x3c, 0x3c),
                Rgb::new(0x3a, 0x3a, 0x3c),
            ],
            stroke: Rgb::new(0x11, 0x11, 0x11),
            highlight: Rgb::new(0xf3, 0x00, 0x61),
            background: Rgb::BLACK,
        }
    }
}

/// Range the base opacity of each point is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpacityRange {
    pub min: f32,
    pub max: f32,
}

impl Default for OpacityRange {
    fn default() -> Self {
        Self { min: 0.6, max: 0.6 }
    }
}

/// The full option set of the triangle background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundOptions {
    pub colors: Palette,
    /// Base column density; the actual column count grows on small viewports.
    pub cols: u32,
    /// Base row density.
    pub rows: u32,
    /// Padding inside each cell, in percent of the cell size.
    pub cell_padding: f32,
    /// Pointer highlight radius in pixels.
    pub proximity: u32,
    /// Target frame rate.
    pub fps: u32,
    /// Duration of one highlight cycle in milliseconds.
    pub transition_ms: u64,
    pub opacity: OpacityRange,
}

impl Default for BackgroundOptions {
    fn default() -> Self {
        Self {
            colors: Palette::default(),
            cols: 4,
            rows: 3,
            cell_padding: 50.0,
            proximity: 20,
            fps: 30,
            transition_ms: 2500,
            opacity: OpacityRange::default(),
        }
    }
}

impl BackgroundOptions {
    /// Check that every option is within its accepted range.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.colors.fill.is_empty() {
            return Err(OptionsError::EmptyPalette);
        }
        let density = 1..=MAX_DENSITY;
        if !density.contains(&self.cols) || !density.contains(&self.rows) {
            return Err(OptionsError::GridDensity {
                cols: self.cols,
                rows: self.rows,
            });
        }
        if !(0.0..=100.0).contains(&self.cell_padding) {
            return Err(OptionsError::CellPadding(self.cell_padding));
        }
        if !(1..=120).contains(&self.fps) {
            return Err(OptionsError::Fps(self.fps));
        }
        if self.transition_ms == 0 {
            return Err(OptionsError::Transition);
        }
        let OpacityRange { min, max } = self.opacity;
        if !(0.0..=1.0).contains(&min) || !(0.0..=1.0).contains(&max) || min > max {
            return Err(OptionsError::Opacity { min, max });
        }
        Ok(())
    }

    /// Time budget of a single frame.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = BackgroundOptions::default();
        assert_eq!(options.validate(), Ok(()));
        assert_eq!(options.colors.fill.len(), 7);
        assert_eq!(options.frame_interval(), Duration::from_millis(33));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut options = BackgroundOptions::default();
        options.colors.fill.clear();
        assert_eq!(options.validate(), Err(OptionsError::EmptyPalette));

        let options = BackgroundOptions {
            cols: 0,
            ..Default::default()
        };
        assert_eq!(
            options.validate(),
            Err(OptionsError::GridDensity { cols: 0, rows: 3 })
        );

        let options = BackgroundOptions {
            cols: 1_000_000,
            rows: 1_000_000,
            ..Default::default()
        };
        assert_eq!(
            options.validate(),
            Err(OptionsError::GridDensity {
                cols: 1_000_000,
                rows: 1_000_000
            })
        );

        let options = BackgroundOptions {
            rows: MAX_DENSITY + 1,
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(OptionsError::GridDensity { .. })
        ));

        let options = BackgroundOptions {
            cols: MAX_DENSITY,
            rows: MAX_DENSITY,
            ..Default::default()
        };
        assert_eq!(options.validate(), Ok(()));

        let options = BackgroundOptions {
            cell_padding: 150.0,
            ..Default::default()
        };
        assert_eq!(options.validate(), Err(OptionsError::CellPadding(150.0)));

        let options = BackgroundOptions {
            fps: 0,
            ..Default::default()
        };
        assert_eq!(options.validate(), Err(OptionsError::Fps(0)));

        let options = BackgroundOptions {
            transition_ms: 0,
            ..Default::default()
        };
        assert_eq!(options.validate(), Err(OptionsError::Transition));

        let options = BackgroundOptions {
            opacity: OpacityRange { min: 0.8, max: 0.2 },
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(OptionsError::Opacity { .. })
        ));
    }
}
