//! Rendering of prepared plot data with the plotters library.
//!
//! Everything numeric happens upstream; this module only turns residual
//! scatter sets, interpolation grids, and color ranges into chart
//! elements. Scatter and surface render into a 3D projection, pseudocolor
//! into a flat 2D mesh. Undefined grid cells (NaN) are skipped, which
//! leaves them blank.

pub mod mode;

use std::path::Path;

use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use thiserror::Error;

use crate::config::StyleConfig;
use crate::core::colorscale::ColorRange;
use crate::core::extremum::ExtremumSet;
use crate::core::grid::InterpolationGrid;
use self::mode::{LegendPosition, LegendSpec};

/// Errors that can occur during rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("plotting error: {0}")]
    Plotting(String),

    #[error("no defined cells to color")]
    NoDefinedCells,
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Supported output image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Bmp,
    Svg,
}

impl OutputFormat {
    /// Parse a format argument (case-insensitive); `None` for an unknown
    /// value.
    pub fn parse(s: &str) -> Option<OutputFormat> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "jpeg" | "jpg" => Some(OutputFormat::Jpeg),
            "bmp" => Some(OutputFormat::Bmp),
            "svg" => Some(OutputFormat::Svg),
            _ => None,
        }
    }

    /// The file extension used for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Svg => "svg",
        }
    }
}

/// Fixed color palette for datasets; one entry per concurrently plotted
/// file. The CLI rejects more input files than palette entries.
pub const PALETTE: &[(u8, u8, u8)] = &[
    (128, 0, 0),   // Maroon
    (255, 0, 0),   // Red
    (0, 0, 255),   // Blue
    (128, 128, 0), // Olive
    (255, 0, 255), // Magenta
    (0, 206, 209), // Turquoise
    (0, 128, 0),   // Green
    (0, 0, 0),     // Black
];

/// The palette color for dataset `index`.
#[inline]
fn palette_color(index: usize) -> RGBColor {
    let (r, g, b) = PALETTE[index % PALETTE.len()];
    RGBColor(r, g, b)
}

/// Colormap stops from low (dark blue) through cyan and yellow to dark
/// red, evaluated by linear interpolation between neighboring stops.
const COLORMAP_STOPS: &[(f64, (u8, u8, u8))] = &[
    (0.0, (0, 0, 128)),
    (0.125, (0, 0, 255)),
    (0.375, (0, 255, 255)),
    (0.625, (255, 255, 0)),
    (0.875, (255, 0, 0)),
    (1.0, (128, 0, 0)),
];

/// Map a normalized value in `[0, 1]` to a colormap color.
pub fn colormap(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);

    let mut prev = COLORMAP_STOPS[0];
    for &stop in &COLORMAP_STOPS[1..] {
        if t <= stop.0 {
            let (t0, (r0, g0, b0)) = prev;
            let (t1, (r1, g1, b1)) = stop;
            let f = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
            let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * f).round() as u8;
            return RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1));
        }
        prev = stop;
    }
    let (_, (r, g, b)) = COLORMAP_STOPS[COLORMAP_STOPS.len() - 1];
    RGBColor(r, g, b)
}

/// Resolved axis label texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisLabels {
    pub x: String,
    pub y: String,
    pub z: String,
}

/// One dataset's scatter data: the residual samples plus the optional
/// minimum-value overlay.
#[derive(Debug)]
pub struct ScatterSet<'a> {
    pub xs: &'a [f64],
    pub ys: &'a [f64],
    pub zs: &'a [f64],
    pub minima: Option<&'a ExtremumSet>,
}

/// Prepared content for one figure, matching the active render mode.
#[derive(Debug)]
pub enum PlotContent<'a> {
    Scatter {
        sets: Vec<ScatterSet<'a>>,
        legend: Option<&'a LegendSpec>,
    },
    Surface {
        grids: &'a [InterpolationGrid],
        range: ColorRange,
    },
    Pseudocolor {
        grid: &'a InterpolationGrid,
        x_extent: (f64, f64),
        y_extent: (f64, f64),
    },
}

/// Render prepared content to an image file.
pub fn render_plot(
    path: &Path,
    format: OutputFormat,
    size: (u32, u32),
    content: &PlotContent<'_>,
    labels: &AxisLabels,
    title: &str,
    draw_grid: bool,
    style: &StyleConfig,
) -> Result<()> {
    match format {
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw(&root, content, labels, title, draw_grid, style)?;
            root.present()
                .map_err(|e| RenderError::Plotting(e.to_string()))?;
        }
        _ => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw(&root, content, labels, title, draw_grid, style)?;
            root.present()
                .map_err(|e| RenderError::Plotting(e.to_string()))?;
        }
    }
    Ok(())
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    content: &PlotContent<'_>,
    labels: &AxisLabels,
    title: &str,
    draw_grid: bool,
    style: &StyleConfig,
) -> Result<()> {
    root.fill(&WHITE)
        .map_err(|e| RenderError::Plotting(e.to_string()))?;

    match content {
        PlotContent::Scatter { sets, legend } => {
            draw_scatter(root, sets, *legend, labels, title, draw_grid, style)
        }
        PlotContent::Surface { grids, range } => {
            draw_surface(root, grids, range, labels, title, draw_grid)
        }
        PlotContent::Pseudocolor {
            grid,
            x_extent,
            y_extent,
        } => draw_pseudocolor(root, grid, *x_extent, *y_extent, labels, title, draw_grid),
    }
}

/// 3D scattered plot: one cross series per dataset, plus filled circles
/// for each minimum-value overlay, plus an optional legend from proxy
/// rectangles.
fn draw_scatter<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    sets: &[ScatterSet<'_>],
    legend: Option<&LegendSpec>,
    labels: &AxisLabels,
    title: &str,
    draw_grid: bool,
    style: &StyleConfig,
) -> Result<()> {
    let (x_range, y_range, z_range) = scatter_bounds(sets);

    let mut builder = ChartBuilder::on(root);
    builder.margin(20);
    if !title.is_empty() {
        builder.caption(title, ("sans-serif", 24));
    }

    // plotters' 3D space is (x, vertical, depth): the value axis goes on
    // the vertical coordinate, the data y axis into the depth coordinate
    let mut chart = builder
        .build_cartesian_3d(
            x_range.0..x_range.1,
            z_range.0..z_range.1,
            y_range.0..y_range.1,
        )
        .map_err(|e| RenderError::Plotting(e.to_string()))?;

    chart
        .configure_axes()
        .max_light_lines(if draw_grid { 10 } else { 0 })
        .draw()
        .map_err(|e| RenderError::Plotting(e.to_string()))?;

    for (idx, set) in sets.iter().enumerate() {
        let color = palette_color(idx);
        let point_size = style.point_size as i32;

        let anno = chart
            .draw_series(
                set.xs
                    .iter()
                    .zip(set.ys)
                    .zip(set.zs)
                    .map(|((&x, &y), &z)| Cross::new((x, z, y), point_size, color.filled())),
            )
            .map_err(|e| RenderError::Plotting(e.to_string()))?;

        if let Some(spec) = legend {
            if let Some(label) = spec.labels.get(idx) {
                anno.label(label.as_str()).legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                });
            }
        }

        if let Some(minima) = set.minima {
            let marker = style.minimum_point_size as i32;
            chart
                .draw_series(
                    minima
                        .iter()
                        .map(|(x, y, z)| Circle::new((x, z, y), marker, color.filled())),
                )
                .map_err(|e| RenderError::Plotting(e.to_string()))?;
        }
    }

    if let Some(spec) = legend {
        chart
            .configure_series_labels()
            .position(series_label_position(spec.position))
            .label_font(("sans-serif", spec.font_size as i32))
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()
            .map_err(|e| RenderError::Plotting(e.to_string()))?;
    }

    draw_axis_annotation(root, labels)
}

/// 3D surface plot: each grid cell becomes a quad colored through the
/// shared color range; undefined cells are skipped. A color bar on the
/// right documents the shared scale.
fn draw_surface<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    grids: &[InterpolationGrid],
    range: &ColorRange,
    labels: &AxisLabels,
    title: &str,
    draw_grid: bool,
) -> Result<()> {
    let (w, _) = root.dim_in_pixel();
    let (main, bar) = root.split_horizontally(w as i32 - 70);

    let x_range = grids
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |acc, g| {
            (acc.0.min(g.xi[0]), acc.1.max(*g.xi.last().unwrap()))
        });
    let y_range = grids
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |acc, g| {
            (acc.0.min(g.yi[0]), acc.1.max(*g.yi.last().unwrap()))
        });

    let mut builder = ChartBuilder::on(&main);
    builder.margin(20);
    if !title.is_empty() {
        builder.caption(title, ("sans-serif", 24));
    }

    // a flat surface still needs a non-degenerate vertical axis
    let v_range = pad_bounds((range.min, range.max));

    let mut chart = builder
        .build_cartesian_3d(
            x_range.0..x_range.1,
            v_range.0..v_range.1,
            y_range.0..y_range.1,
        )
        .map_err(|e| RenderError::Plotting(e.to_string()))?;

    chart
        .configure_axes()
        .max_light_lines(if draw_grid { 10 } else { 0 })
        .draw()
        .map_err(|e| RenderError::Plotting(e.to_string()))?;

    for grid in grids {
        let mut cells = Vec::new();
        for row in 0..grid.height() - 1 {
            for col in 0..grid.width() - 1 {
                let z00 = grid.value(row, col);
                let z10 = grid.value(row, col + 1);
                let z11 = grid.value(row + 1, col + 1);
                let z01 = grid.value(row + 1, col);
                if z00.is_nan() || z10.is_nan() || z11.is_nan() || z01.is_nan() {
                    continue;
                }

                let (x0, x1) = (grid.xi[col], grid.xi[col + 1]);
                let (y0, y1) = (grid.yi[row], grid.yi[row + 1]);
                let mean = (z00 + z10 + z11 + z01) / 4.0;
                let color = colormap(range.normalize(mean));

                cells.push(Polygon::new(
                    vec![(x0, z00, y0), (x1, z10, y0), (x1, z11, y1), (x0, z01, y1)],
                    color.filled(),
                ));
            }
        }
        chart
            .draw_series(cells)
            .map_err(|e| RenderError::Plotting(e.to_string()))?;
    }

    draw_colorbar(&bar, range, &labels.z)?;
    draw_axis_annotation(&main, labels)
}

/// Flat 2D pseudocolor plot of a single grid. The view is clipped to the
/// observed data extent even when the mesh is padded beyond it.
fn draw_pseudocolor<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    grid: &InterpolationGrid,
    x_extent: (f64, f64),
    y_extent: (f64, f64),
    labels: &AxisLabels,
    title: &str,
    draw_grid: bool,
) -> Result<()> {
    let (lo, hi) = grid.finite_range().ok_or(RenderError::NoDefinedCells)?;
    let range = ColorRange { min: lo, max: hi };

    let (w, _) = root.dim_in_pixel();
    let (main, bar) = root.split_horizontally(w as i32 - 70);

    let mut builder = ChartBuilder::on(&main);
    builder
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60);
    if !title.is_empty() {
        builder.caption(title, ("sans-serif", 24));
    }

    let mut chart = builder
        .build_cartesian_2d(x_extent.0..x_extent.1, y_extent.0..y_extent.1)
        .map_err(|e| RenderError::Plotting(e.to_string()))?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(labels.x.as_str()).y_desc(labels.y.as_str());
    if !draw_grid {
        mesh.disable_x_mesh().disable_y_mesh();
    }
    mesh.draw()
        .map_err(|e| RenderError::Plotting(e.to_string()))?;

    let mut cells = Vec::new();
    for row in 0..grid.height() - 1 {
        for col in 0..grid.width() - 1 {
            let z = grid.value(row, col);
            if z.is_nan() {
                continue;
            }
            let color = colormap(range.normalize(z));
            cells.push(Rectangle::new(
                [
                    (grid.xi[col], grid.yi[row]),
                    (grid.xi[col + 1], grid.yi[row + 1]),
                ],
                color.filled(),
            ));
        }
    }
    chart
        .draw_series(cells)
        .map_err(|e| RenderError::Plotting(e.to_string()))?;

    draw_colorbar(&bar, &range, &labels.z)
}

/// Vertical gradient strip with the range bounds, drawn into its own
/// narrow area.
fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    range: &ColorRange,
    label: &str,
) -> Result<()> {
    let (_, h) = area.dim_in_pixel();
    let top = 40i32;
    let bottom = (h as i32 - 40).max(top + 1);
    let steps = bottom - top;

    for i in 0..steps {
        let t = 1.0 - i as f64 / steps as f64;
        area.draw(&Rectangle::new(
            [(10, top + i), (30, top + i + 1)],
            colormap(t).filled(),
        ))
        .map_err(|e| RenderError::Plotting(e.to_string()))?;
    }

    area.draw(&Text::new(
        format!("{:.3}", range.max),
        (6, top - 16),
        ("sans-serif", 12),
    ))
    .map_err(|e| RenderError::Plotting(e.to_string()))?;
    area.draw(&Text::new(
        format!("{:.3}", range.min),
        (6, bottom + 4),
        ("sans-serif", 12),
    ))
    .map_err(|e| RenderError::Plotting(e.to_string()))?;
    area.draw(&Text::new(label.to_string(), (6, 8), ("sans-serif", 12)))
        .map_err(|e| RenderError::Plotting(e.to_string()))?;

    Ok(())
}

/// One-line axis annotation along the bottom edge; the 3D charts have no
/// per-axis description areas.
fn draw_axis_annotation<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    labels: &AxisLabels,
) -> Result<()> {
    let (_, h) = area.dim_in_pixel();
    let text = format!("x: {}    y: {}    z: {}", labels.x, labels.y, labels.z);
    area.draw(&Text::new(text, (10, h as i32 - 18), ("sans-serif", 14)))
        .map_err(|e| RenderError::Plotting(e.to_string()))?;
    Ok(())
}

/// Bounding ranges over every sample and overlay in the scatter sets, with
/// a 5% margin; flat ranges are widened by one unit.
fn scatter_bounds(sets: &[ScatterSet<'_>]) -> ((f64, f64), (f64, f64), (f64, f64)) {
    let mut x = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y = (f64::INFINITY, f64::NEG_INFINITY);
    let mut z = (f64::INFINITY, f64::NEG_INFINITY);

    fn fold(bounds: &mut (f64, f64), v: f64) {
        bounds.0 = bounds.0.min(v);
        bounds.1 = bounds.1.max(v);
    }

    for set in sets {
        for &v in set.xs {
            fold(&mut x, v);
        }
        for &v in set.ys {
            fold(&mut y, v);
        }
        for &v in set.zs {
            fold(&mut z, v);
        }
        if let Some(minima) = set.minima {
            for (mx, my, mz) in minima.iter() {
                fold(&mut x, mx);
                fold(&mut y, my);
                fold(&mut z, mz);
            }
        }
    }

    (pad_bounds(x), pad_bounds(y), pad_bounds(z))
}

fn pad_bounds((min, max): (f64, f64)) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

fn series_label_position(position: LegendPosition) -> SeriesLabelPosition {
    match position {
        LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
        LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
        LegendPosition::Right | LegendPosition::CenterRight => SeriesLabelPosition::MiddleRight,
        LegendPosition::CenterLeft => SeriesLabelPosition::MiddleLeft,
        LegendPosition::LowerCenter => SeriesLabelPosition::LowerMiddle,
        LegendPosition::UpperCenter => SeriesLabelPosition::UpperMiddle,
        LegendPosition::Center => SeriesLabelPosition::MiddleMiddle,
        // 'best' placement is not computed; it and the default land in the
        // upper right corner ('unset' never reaches rendering)
        LegendPosition::Best | LegendPosition::UpperRight | LegendPosition::Unset => {
            SeriesLabelPosition::UpperRight
        }
    }
}
