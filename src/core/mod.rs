//! Core data types and transformations.

pub mod colorscale;
pub mod dataset;
pub mod extremum;
pub mod grid;

pub use colorscale::ColorRange;
pub use dataset::{AxisSelection, DataFormatError, Dataset};
pub use extremum::{extract_minima, ExtremumSet};
pub use grid::{interpolate_grid, GeometryError, InterpolationGrid};
