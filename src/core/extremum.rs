//! Extraction of minimum-value rows from a dataset.
//!
//! Used by scatter mode to pull every row attaining the minimum along the
//! selected value axis into a separate overlay, leaving a residual dataset
//! without those rows. Ties are kept in full; equality against the minimum
//! is exact, so samples that coincide on a simulation grid all surface.

use crate::core::dataset::{AxisSelection, Dataset};

/// The rows of one dataset whose Z value equals the dataset minimum,
/// as parallel coordinate vectors in input row order.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtremumSet {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub zs: Vec<f64>,
}

impl ExtremumSet {
    /// Number of minimal rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Whether the set is empty. Never true for a loaded dataset; kept for
    /// symmetry with the other containers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Iterate the minimal rows as `(x, y, z)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.xs
            .iter()
            .zip(&self.ys)
            .zip(&self.zs)
            .map(|((&x, &y), &z)| (x, y, z))
    }
}

/// Split the rows attaining the minimum Z value out of a dataset.
///
/// Computes the minimum of the Z column, gathers every row whose Z value
/// equals it exactly, and returns those rows as an [`ExtremumSet`] together
/// with a residual dataset built from the remaining rows. The input dataset
/// is left untouched; the residual is a new value rather than an in-place
/// edit, so partially-removed state cannot be observed.
///
/// The axis selection must be valid for the dataset (the CLI validates all
/// selections up front) and the dataset is non-empty by construction, so a
/// minimum always exists.
pub fn extract_minima(data: &Dataset, axes: &AxisSelection) -> (ExtremumSet, Dataset) {
    let z_col = data.column(axes.z);

    let minval = z_col.iter().copied().fold(f64::INFINITY, f64::min);
    let selected: Vec<bool> = z_col.iter().map(|&z| z == minval).collect();

    let pick = |column: usize| -> Vec<f64> {
        data.column(column)
            .iter()
            .zip(&selected)
            .filter(|(_, &keep)| keep)
            .map(|(&v, _)| v)
            .collect()
    };

    let minima = ExtremumSet {
        xs: pick(axes.x),
        ys: pick(axes.y),
        zs: pick(axes.z),
    };

    let columns: Vec<Vec<f64>> = data
        .columns
        .iter()
        .map(|col| {
            col.iter()
                .zip(&selected)
                .filter(|(_, &keep)| !keep)
                .map(|(&v, _)| v)
                .collect()
        })
        .collect();

    let residual = Dataset {
        source: data.source.clone(),
        header: data.header.clone(),
        columns,
    };

    (minima, residual)
}
