//! Configuration types for plot generation.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Mesh resolutions for the interpolating render modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshConfig {
    /// Surface mesh width (X samples)
    #[serde(default = "default_surface_width")]
    pub surface_width: usize,

    /// Surface mesh height (Y samples)
    #[serde(default = "default_surface_height")]
    pub surface_height: usize,

    /// Pseudocolor mesh width (X samples)
    #[serde(default = "default_pcolor_width")]
    pub pcolor_width: usize,

    /// Pseudocolor mesh height (Y samples)
    #[serde(default = "default_pcolor_height")]
    pub pcolor_height: usize,
}

fn default_surface_width() -> usize {
    100
}

fn default_surface_height() -> usize {
    100
}

fn default_pcolor_width() -> usize {
    500
}

fn default_pcolor_height() -> usize {
    300
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            surface_width: default_surface_width(),
            surface_height: default_surface_height(),
            pcolor_width: default_pcolor_width(),
            pcolor_height: default_pcolor_height(),
        }
    }
}

/// Figure dimensions in pixels, as a landscape page; portrait orientation
/// swaps them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureConfig {
    #[serde(default = "default_figure_width")]
    pub width: u32,

    #[serde(default = "default_figure_height")]
    pub height: u32,
}

fn default_figure_width() -> u32 {
    1024
}

fn default_figure_height() -> u32 {
    768
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: default_figure_width(),
            height: default_figure_height(),
        }
    }
}

/// Marker and text sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Scatter marker size in pixels
    #[serde(default = "default_point_size")]
    pub point_size: u32,

    /// Marker size for the minimum-value overlay
    #[serde(default = "default_minimum_point_size")]
    pub minimum_point_size: u32,

    /// Legend font size, overridable per run with --legfontsize
    #[serde(default = "default_legend_font_size")]
    pub legend_font_size: u32,
}

fn default_point_size() -> u32 {
    3
}

fn default_minimum_point_size() -> u32 {
    6
}

fn default_legend_font_size() -> u32 {
    12
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            point_size: default_point_size(),
            minimum_point_size: default_minimum_point_size(),
            legend_font_size: default_legend_font_size(),
        }
    }
}

/// Main plot configuration combining all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(default)]
    pub mesh: MeshConfig,

    #[serde(default)]
    pub figure: FigureConfig,

    #[serde(default)]
    pub style: StyleConfig,
}

impl PlotConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: PlotConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
