//! Loading of whitespace-delimited simulation data files.
//!
//! A data file carries exactly one header line (one string token per
//! column) followed by numeric rows with the same token count. Rows are
//! transposed into column-major storage at load time.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while reading a data file.
#[derive(Error, Debug)]
pub enum DataFormatError {
    #[error("cannot read '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{0}' is an empty file")]
    EmptyFile(PathBuf),

    #[error("'{path}': header declares {header} column(s) but the data yields none")]
    NoData { path: PathBuf, header: usize },

    #[error("'{path}' line {line}: expected {expected} value(s), found {found}")]
    ColumnCountMismatch {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("'{path}' line {line}: '{token}' is not a number")]
    InvalidNumber {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("'{path}' line {line}: '{token}' is not finite")]
    NonFiniteNumber {
        path: PathBuf,
        line: usize,
        token: String,
    },
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, DataFormatError>;

/// The three column indices selecting which columns to plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSelection {
    /// X-axis column index.
    pub x: usize,
    /// Y-axis column index.
    pub y: usize,
    /// Z-axis (value) column index.
    pub z: usize,
}

impl Default for AxisSelection {
    fn default() -> Self {
        Self { x: 0, y: 1, z: 3 }
    }
}

impl AxisSelection {
    /// The largest column index referenced by this selection.
    #[inline]
    pub fn max_index(&self) -> usize {
        self.x.max(self.y).max(self.z)
    }
}

/// One loaded data file in column-major form.
///
/// Invariants established by [`Dataset::load`]: `header.len() ==
/// columns.len()`, every column has the same length, and every value is a
/// finite `f64`.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Path the dataset was loaded from.
    pub source: PathBuf,
    /// Column labels from the header line, in column order.
    pub header: Vec<String>,
    /// Column-major numeric data.
    pub columns: Vec<Vec<f64>>,
}

impl Dataset {
    /// Load a dataset from a whitespace-delimited data file.
    ///
    /// The first line is the header; every following line must tokenize
    /// into exactly as many finite floating-point values as the header has
    /// fields.
    ///
    /// # Errors
    ///
    /// Returns a [`DataFormatError`] naming the file when it is missing,
    /// empty, has a row whose token count disagrees with the header, or
    /// contains a token that does not parse as a finite number.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Dataset> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|source| DataFormatError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let size = file
            .metadata()
            .map_err(|source| DataFormatError::Unreadable {
                path: path.to_path_buf(),
                source,
            })?
            .len();
        if size == 0 {
            return Err(DataFormatError::EmptyFile(path.to_path_buf()));
        }

        let reader = BufReader::new(file);
        let mut lines = reader.lines().enumerate();

        let header: Vec<String> = match lines.next() {
            Some((_, line)) => line
                .map_err(|source| DataFormatError::Unreadable {
                    path: path.to_path_buf(),
                    source,
                })?
                .split_whitespace()
                .map(str::to_string)
                .collect(),
            None => return Err(DataFormatError::EmptyFile(path.to_path_buf())),
        };

        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); header.len()];

        for (idx, line) in lines {
            let line = line.map_err(|source| DataFormatError::Unreadable {
                path: path.to_path_buf(),
                source,
            })?;
            let line_no = idx + 1;

            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != header.len() {
                return Err(DataFormatError::ColumnCountMismatch {
                    path: path.to_path_buf(),
                    line: line_no,
                    expected: header.len(),
                    found: tokens.len(),
                });
            }

            for (col, token) in columns.iter_mut().zip(&tokens) {
                let value: f64 =
                    token
                        .parse()
                        .map_err(|_| DataFormatError::InvalidNumber {
                            path: path.to_path_buf(),
                            line: line_no,
                            token: token.to_string(),
                        })?;
                if !value.is_finite() {
                    return Err(DataFormatError::NonFiniteNumber {
                        path: path.to_path_buf(),
                        line: line_no,
                        token: token.to_string(),
                    });
                }
                col.push(value);
            }
        }

        // a header with no rows below it derives zero data columns, which
        // cannot agree with the header's field count
        if columns.first().map_or(true, |c| c.is_empty()) {
            return Err(DataFormatError::NoData {
                path: path.to_path_buf(),
                header: header.len(),
            });
        }

        Ok(Dataset {
            source: path.to_path_buf(),
            header,
            columns,
        })
    }

    /// Number of columns.
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows (all columns share this length).
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.len())
    }

    /// Borrow the column at `index`.
    ///
    /// Callers must have validated `index` against [`Dataset::num_columns`];
    /// the CLI rejects out-of-range axis selections before any data work.
    #[inline]
    pub fn column(&self, index: usize) -> &[f64] {
        &self.columns[index]
    }
}
