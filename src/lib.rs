//! Plotting pipeline for whitespace-delimited simulation output.
//!
//! This crate provides tools for:
//! - Loading header-validated tabular data files into column-major form
//! - Extracting the minimum-value rows of a dataset for overlay display
//! - Interpolating scattered samples onto regular meshes for surface and
//!   pseudocolor rendering, with a shared color scale across datasets
//! - Rendering scatter, surface, and pseudocolor charts to image files
//!
//! # Example
//!
//! ```no_run
//! use simplot::core::dataset::{AxisSelection, Dataset};
//! use simplot::core::extremum::extract_minima;
//!
//! let data = Dataset::load("results.dat").unwrap();
//! let axes = AxisSelection { x: 0, y: 1, z: 3 };
//! let (minima, residual) = extract_minima(&data, &axes);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod visualization;

pub use config::PlotConfig;
pub use core::dataset::{AxisSelection, Dataset};
pub use core::grid::InterpolationGrid;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
