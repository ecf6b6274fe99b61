//! Core types shared by the tessera crates.
//!
//! This crate holds the small, fixed option set of the triangle background
//! (palette, grid density, pointer proximity and timing) together with the
//! validation rules those options have to satisfy.

mod color;
mod options;

pub use color::Rgb;
pub use options::{BackgroundOptions, MAX_DENSITY, OpacityRange, OptionsError, Palette};
