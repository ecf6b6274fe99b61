//! Animated triangle mesh background for the terminal.
//!
//! A grid of points sized to the viewport is connected into triangles. Each
//! point drifts one pixel per frame toward a random target inside its cell
//! and brightens while the pointer is close to it. The mesh is painted into
//! a half-block pixel surface and rendered as a Ratatui paragraph.

mod grid;
mod point;
mod state;
mod surface;

pub use grid::GridLayout;
pub use point::{Opacity, Point};
pub use state::{GridPos, TriangleBackground, block_fan};
pub use surface::Surface;
