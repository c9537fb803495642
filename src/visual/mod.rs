//! Consciousness-aware visualisation
//!
//! Frequencies are mapped to a fixed colour table, arranged as sacred
//! geometry and written out as PNG files with the `image` crate.

mod canvas;
pub mod geometry;
pub mod palette;
mod render;

pub use geometry::{flower_of_life, frequency_mandala, golden_spiral, SacredGeometry};
pub use palette::{frequency_to_color, FREQUENCY_COLORS};
pub use render::{
    gaussian_smooth, render_analysis_overview, sacred_spectrum, spectrum_bins, ReportInput,
    SacredVisualizer, DEFAULT_HEIGHT, DEFAULT_WIDTH,
};
