//! Regular-mesh interpolation of scattered samples.
//!
//! Surface and pseudocolor modes need gridded data, while the input files
//! carry irregularly spaced (x, y, z) samples. This module lays a regular
//! mesh over the sample extent and fills each mesh point with the z value
//! of the nearest sample. Mesh points outside the convex hull of the
//! samples are left as `f64::NAN` so the renderer can leave them blank
//! instead of extrapolating. Row fills are independent and run in parallel.

use rayon::prelude::*;
use thiserror::Error;

/// Errors raised when the scattered input cannot support interpolation.
#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("interpolation needs at least 3 points, got {0}")]
    TooFewPoints(usize),

    #[error("all {0} input points are collinear")]
    CollinearPoints(usize),
}

/// Result type for interpolation operations.
pub type Result<T> = std::result::Result<T, GeometryError>;

/// A regular mesh of interpolated values.
///
/// `zi` is row-major with `yi.len()` rows of `xi.len()` cells; cells outside
/// the convex hull of the input samples hold `f64::NAN`.
#[derive(Debug, Clone)]
pub struct InterpolationGrid {
    /// Mesh X sample coordinates, ascending.
    pub xi: Vec<f64>,
    /// Mesh Y sample coordinates, ascending.
    pub yi: Vec<f64>,
    /// Interpolated values, row-major.
    pub zi: Vec<f64>,
}

impl InterpolationGrid {
    /// Mesh width (number of X samples).
    #[inline]
    pub fn width(&self) -> usize {
        self.xi.len()
    }

    /// Mesh height (number of Y samples).
    #[inline]
    pub fn height(&self) -> usize {
        self.yi.len()
    }

    /// The interpolated value at (`row`, `col`).
    #[inline]
    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.zi[row * self.xi.len() + col]
    }

    /// Minimum and maximum over the defined (non-NaN) cells, or `None` if
    /// every cell is undefined.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for &v in &self.zi {
            if v.is_nan() {
                continue;
            }
            range = Some(match range {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            });
        }
        range
    }
}

/// `n` evenly spaced values from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![start];
    }
    let step = (stop - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Interpolate scattered samples onto a `width` × `height` regular mesh.
///
/// Mesh coordinates span the observed sample extent; with `pad_by_spacing`
/// the extent is widened by one observed sample spacing on each side
/// (`|x[1] - x[0]|`, `|y[1] - y[0]|`), which pseudocolor rendering uses to
/// keep edge cells clear of the data boundary. Each mesh point inside the
/// convex hull of the samples takes the z value of its nearest sample;
/// points outside stay `NAN`.
///
/// # Errors
///
/// [`GeometryError`] when fewer than 3 points are given or all points are
/// collinear; nearest-neighbor interpolation over a degenerate hull is
/// undefined.
pub fn interpolate_grid(
    xs: &[f64],
    ys: &[f64],
    zs: &[f64],
    width: usize,
    height: usize,
    pad_by_spacing: bool,
) -> Result<InterpolationGrid> {
    debug_assert_eq!(xs.len(), ys.len(), "xs and ys must have same length");
    debug_assert_eq!(xs.len(), zs.len(), "xs and zs must have same length");

    // a mesh needs at least one cell per axis
    let width = width.max(2);
    let height = height.max(2);

    let n = xs.len();
    if n < 3 {
        return Err(GeometryError::TooFewPoints(n));
    }

    let points: Vec<(f64, f64)> = xs.iter().zip(ys).map(|(&x, &y)| (x, y)).collect();
    let hull = convex_hull(&points);
    if hull.len() < 3 {
        return Err(GeometryError::CollinearPoints(n));
    }

    let (x_min, x_max) = extent(xs);
    let (y_min, y_max) = extent(ys);

    let (pad_x, pad_y) = if pad_by_spacing {
        ((xs[1] - xs[0]).abs(), (ys[1] - ys[0]).abs())
    } else {
        (0.0, 0.0)
    };

    let xi = linspace(x_min - pad_x, x_max + pad_x, width);
    let yi = linspace(y_min - pad_y, y_max + pad_y, height);

    let rows: Vec<Vec<f64>> = yi
        .par_iter()
        .map(|&y| {
            xi.iter()
                .map(|&x| {
                    if point_in_hull((x, y), &hull) {
                        nearest_value(x, y, &points, zs)
                    } else {
                        f64::NAN
                    }
                })
                .collect()
        })
        .collect();

    let zi: Vec<f64> = rows.into_iter().flatten().collect();

    Ok(InterpolationGrid { xi, yi, zi })
}

fn extent(values: &[f64]) -> (f64, f64) {
    values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    })
}

/// The z value of the sample nearest to (`x`, `y`) in Euclidean distance.
fn nearest_value(x: f64, y: f64, points: &[(f64, f64)], zs: &[f64]) -> f64 {
    let mut best = 0;
    let mut best_d2 = f64::INFINITY;
    for (i, &(px, py)) in points.iter().enumerate() {
        let d2 = (px - x) * (px - x) + (py - y) * (py - y);
        if d2 < best_d2 {
            best_d2 = d2;
            best = i;
        }
    }
    zs[best]
}

/// Cross product of (a - o) × (b - o); positive when o→a→b turns left.
#[inline]
fn cross(o: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

/// Convex hull of a point set, counterclockwise, via Andrew's monotone
/// chain. Collinear input collapses to fewer than 3 vertices.
fn convex_hull(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    pts.dedup();

    if pts.len() < 3 {
        return pts;
    }

    let mut lower: Vec<(f64, f64)> = Vec::new();
    for &p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<(f64, f64)> = Vec::new();
    for &p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Whether `p` lies inside or on the boundary of a counterclockwise hull.
fn point_in_hull(p: (f64, f64), hull: &[(f64, f64)]) -> bool {
    for i in 0..hull.len() {
        let a = hull[i];
        let b = hull[(i + 1) % hull.len()];
        if cross(a, b, p) < 0.0 {
            return false;
        }
    }
    true
}
