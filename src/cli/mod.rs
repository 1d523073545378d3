//! Command-line interface for simplot.
//!
//! Thin orchestration over the core pipeline: parse flags, validate the
//! option set, load every data file, run the mode-specific transformation,
//! and hand the prepared content to the renderer. All fatal errors are
//! reported through [`run`] with exit code 2; mode incompatibilities are
//! downgraded with a diagnostic during mode selection instead.

use std::path::PathBuf;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use thiserror::Error;

use crate::config::PlotConfig;
use crate::core::colorscale::ColorRange;
use crate::core::dataset::{AxisSelection, DataFormatError, Dataset};
use crate::core::extremum::{extract_minima, ExtremumSet};
use crate::core::grid::{interpolate_grid, GeometryError, InterpolationGrid};
use crate::visualization::mode::{LegendPosition, LegendSpec, RenderMode};
use crate::visualization::{
    render_plot, AxisLabels, OutputFormat, PlotContent, RenderError, ScatterSet, PALETTE,
};

#[derive(Parser)]
#[command(name = "simplot")]
#[command(about = "Plot whitespace-delimited simulation output", version)]
pub struct Cli {
    /// Data files to plot; each must contain exactly one header line
    #[arg(required = true, value_name = "DATAFILE")]
    files: Vec<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to YAML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Title of the plot
    #[arg(short, long, default_value = "")]
    title: String,

    /// X-axis column in DATAFILE
    #[arg(long = "x-axis", value_name = "COLUMN", default_value_t = 0)]
    x_axis: usize,

    /// Y-axis column in DATAFILE
    #[arg(long = "y-axis", value_name = "COLUMN", default_value_t = 1)]
    y_axis: usize,

    /// Z-axis column in DATAFILE
    #[arg(long = "z-axis", value_name = "COLUMN", default_value_t = 3)]
    z_axis: usize,

    /// Label of the x-axis (defaults to the first DATAFILE's header field)
    #[arg(long = "x-label")]
    x_label: Option<String>,

    /// Label of the y-axis
    #[arg(long = "y-label")]
    y_label: Option<String>,

    /// Label of the z-axis
    #[arg(long = "z-label")]
    z_label: Option<String>,

    /// Scattered plot (default)
    #[arg(long, conflicts_with_all = ["surface", "pcolor"])]
    scatter: bool,

    /// Surface plot
    #[arg(long, conflicts_with = "pcolor")]
    surface: bool,

    /// 2D pseudocolor plot of the first DATAFILE
    #[arg(long)]
    pcolor: bool,

    /// Mark the rows with the minimal z value (scattered plots only)
    #[arg(long = "min")]
    show_minimum: bool,

    /// Basename of the output file (defaults to the first DATAFILE's stem)
    #[arg(long)]
    outbase: Option<PathBuf>,

    /// Format of the output file: png, jpeg, jpg, bmp, svg
    #[arg(long, default_value = "png")]
    oformat: String,

    /// Overwrite the output file if existing
    #[arg(short, long)]
    overwrite: bool,

    /// Colon-separated legend labels, one per DATAFILE
    #[arg(long)]
    legend: Option<String>,

    /// Legend position ('unset' disables the legend)
    #[arg(long, default_value = "upper right")]
    legpos: String,

    /// Fontsize of legend text
    #[arg(long)]
    legfontsize: Option<u32>,

    /// Enable grid
    #[arg(short, long)]
    grid: bool,

    /// Orientation of the plot: portrait or landscape
    #[arg(long, default_value = "portrait")]
    orientation: String,
}

/// Errors in the option set, all detected before any rendering work.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("column index {index} is out of range for '{path}' ({columns} column(s))")]
    AxisOutOfRange {
        index: usize,
        path: PathBuf,
        columns: usize,
    },

    #[error("invalid number of legend arguments: expected {expected}, got {got}")]
    LegendCount { expected: usize, got: usize },

    #[error("invalid 'legpos' argument '{0}'")]
    InvalidLegendPosition(String),

    #[error("invalid 'orientation' argument '{0}'")]
    InvalidOrientation(String),

    #[error("invalid 'oformat' argument '{0}'")]
    InvalidFormat(String),

    #[error("'{0}' already exists (pass --overwrite to replace it)")]
    OutputExists(PathBuf),

    #[error("{got} data files exceed the {limit}-color palette")]
    TooManyDatasets { got: usize, limit: usize },
}

/// Any fatal pipeline error; [`run`] maps all of these to exit code 2.
#[derive(Error, Debug)]
pub enum PlotError {
    #[error(transparent)]
    Config(#[from] ConfigurationError),

    #[error(transparent)]
    Data(#[from] DataFormatError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Page orientation; the figure dimensions are swapped for portrait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    fn parse(s: &str) -> Option<Orientation> {
        match s {
            "portrait" => Some(Orientation::Portrait),
            "landscape" => Some(Orientation::Landscape),
            _ => None,
        }
    }
}

/// Create a spinner for indeterminate operations
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

pub fn run() -> i32 {
    let cli = Cli::parse();

    // Initialize logging based on verbosity (must come first)
    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .format_timestamp_secs()
        .init();

    // Load config
    let config = match &cli.config {
        Some(path) => match PlotConfig::from_yaml(path) {
            Ok(cfg) => {
                info!("Loaded config from: {}", path.display());
                cfg
            }
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}, using defaults",
                    path.display(),
                    e
                );
                PlotConfig::default()
            }
        },
        None => PlotConfig::default(),
    };

    match execute(&cli, &config) {
        Ok(path) => {
            info!("Saved plot to '{}'", path.display());
            0
        }
        Err(e) => {
            error!("{e}");
            2
        }
    }
}

/// The whole pipeline for one invocation: validate, load, transform,
/// render. Returns the written output path.
fn execute(cli: &Cli, config: &PlotConfig) -> Result<PathBuf, PlotError> {
    let orientation = Orientation::parse(&cli.orientation)
        .ok_or_else(|| ConfigurationError::InvalidOrientation(cli.orientation.clone()))?;
    let format = OutputFormat::parse(&cli.oformat)
        .ok_or_else(|| ConfigurationError::InvalidFormat(cli.oformat.clone()))?;

    let output = output_path(cli, format);
    if output.exists() && !cli.overwrite {
        return Err(ConfigurationError::OutputExists(output).into());
    }

    if cli.files.len() > PALETTE.len() {
        return Err(ConfigurationError::TooManyDatasets {
            got: cli.files.len(),
            limit: PALETTE.len(),
        }
        .into());
    }

    let legend_labels: Vec<String> = match &cli.legend {
        Some(arg) => {
            let labels: Vec<String> = arg.split(':').map(str::to_string).collect();
            if labels.len() != cli.files.len() {
                return Err(ConfigurationError::LegendCount {
                    expected: cli.files.len(),
                    got: labels.len(),
                }
                .into());
            }
            labels
        }
        None => cli.files.iter().map(|p| p.display().to_string()).collect(),
    };
    let position = LegendPosition::parse(&cli.legpos)
        .ok_or_else(|| ConfigurationError::InvalidLegendPosition(cli.legpos.clone()))?;
    let legend = LegendSpec {
        labels: legend_labels.clone(),
        position,
        font_size: cli.legfontsize.unwrap_or(config.style.legend_font_size),
    };

    // mode is fixed here, before any data is touched
    let mode = RenderMode::select(
        cli.surface,
        cli.pcolor,
        cli.show_minimum,
        Some(legend),
        cli.files.len(),
    );

    let spinner = create_spinner("Reading data files...");
    let loaded: Result<Vec<Dataset>, DataFormatError> = cli
        .files
        .iter()
        .map(|file| {
            info!("Reading file '{}' ...", file.display());
            Dataset::load(file)
        })
        .collect();
    spinner.finish_and_clear();
    let datasets = loaded?;

    let axes = AxisSelection {
        x: cli.x_axis,
        y: cli.y_axis,
        z: cli.z_axis,
    };
    for data in &datasets {
        for index in [axes.x, axes.y, axes.z] {
            if index >= data.num_columns() {
                return Err(ConfigurationError::AxisOutOfRange {
                    index,
                    path: data.source.clone(),
                    columns: data.num_columns(),
                }
                .into());
            }
        }
    }

    let labels = resolve_axis_labels(cli, &datasets[0], &axes);
    let size = match orientation {
        Orientation::Landscape => (config.figure.width, config.figure.height),
        Orientation::Portrait => (config.figure.height, config.figure.width),
    };

    match &mode {
        RenderMode::Scatter {
            show_minimum,
            legend,
        } => {
            info!("Generating scattered plot ...");
            let pairs = prepare_scatter(datasets, &axes, *show_minimum);

            if *show_minimum {
                for ((_, minima), label) in pairs.iter().zip(&legend_labels) {
                    if let Some(minima) = minima {
                        info!("Minimal values for '{}':", label);
                        for (x, y, z) in minima.iter() {
                            info!("({x:.6}, {y:.6}, {z:.6})");
                        }
                    }
                }
            }

            let sets: Vec<ScatterSet<'_>> = pairs
                .iter()
                .map(|(residual, minima)| ScatterSet {
                    xs: residual.column(axes.x),
                    ys: residual.column(axes.y),
                    zs: residual.column(axes.z),
                    minima: minima.as_ref(),
                })
                .collect();

            let content = PlotContent::Scatter {
                sets,
                legend: legend.as_ref(),
            };
            render_plot(
                &output,
                format,
                size,
                &content,
                &labels,
                &cli.title,
                cli.grid,
                &config.style,
            )?;
        }
        RenderMode::Surface => {
            info!("Generating surface plot ...");
            let spinner = create_spinner("Interpolating surfaces...");
            let interpolated: Result<Vec<InterpolationGrid>, GeometryError> = datasets
                .iter()
                .map(|data| {
                    interpolate_grid(
                        data.column(axes.x),
                        data.column(axes.y),
                        data.column(axes.z),
                        config.mesh.surface_width,
                        config.mesh.surface_height,
                        false,
                    )
                })
                .collect();
            spinner.finish_and_clear();
            let grids = interpolated?;

            // one color range shared by every surface: seeded from the
            // first dataset, only ever widened by the rest
            let mut range = match ColorRange::from_values(datasets[0].column(axes.z)) {
                Some(range) => range,
                None => return Err(RenderError::NoDefinedCells.into()),
            };
            for data in &datasets[1..] {
                range.widen_to_values(data.column(axes.z));
            }

            let content = PlotContent::Surface {
                grids: &grids,
                range,
            };
            render_plot(
                &output,
                format,
                size,
                &content,
                &labels,
                &cli.title,
                cli.grid,
                &config.style,
            )?;
        }
        RenderMode::Pseudocolor => {
            info!("Generating pcolor 2D plot ...");
            let data = &datasets[0];
            let xs = data.column(axes.x);
            let ys = data.column(axes.y);

            let spinner = create_spinner("Interpolating mesh...");
            let interpolated = interpolate_grid(
                xs,
                ys,
                data.column(axes.z),
                config.mesh.pcolor_width,
                config.mesh.pcolor_height,
                true,
            );
            spinner.finish_and_clear();
            let grid = interpolated?;

            let content = PlotContent::Pseudocolor {
                grid: &grid,
                x_extent: extent(xs),
                y_extent: extent(ys),
            };
            render_plot(
                &output,
                format,
                size,
                &content,
                &labels,
                &cli.title,
                cli.grid,
                &config.style,
            )?;
        }
    }

    Ok(output)
}

/// Split the minimum rows out of each dataset when requested; otherwise
/// pass the datasets through untouched.
fn prepare_scatter(
    datasets: Vec<Dataset>,
    axes: &AxisSelection,
    show_minimum: bool,
) -> Vec<(Dataset, Option<ExtremumSet>)> {
    datasets
        .into_iter()
        .map(|data| {
            if show_minimum {
                let (minima, residual) = extract_minima(&data, axes);
                (residual, Some(minima))
            } else {
                (data, None)
            }
        })
        .collect()
}

fn resolve_axis_labels(cli: &Cli, first: &Dataset, axes: &AxisSelection) -> AxisLabels {
    AxisLabels {
        x: cli
            .x_label
            .clone()
            .unwrap_or_else(|| first.header[axes.x].clone()),
        y: cli
            .y_label
            .clone()
            .unwrap_or_else(|| first.header[axes.y].clone()),
        z: cli
            .z_label
            .clone()
            .unwrap_or_else(|| first.header[axes.z].clone()),
    }
}

fn output_path(cli: &Cli, format: OutputFormat) -> PathBuf {
    let outbase = cli.outbase.clone().unwrap_or_else(|| {
        cli.files[0]
            .file_stem()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("plot"))
    });
    PathBuf::from(format!("{}.{}", outbase.display(), format.extension()))
}

fn extent(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_datafile(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", contents).unwrap();
        path
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_mode_flags_are_mutually_exclusive() {
        assert!(Cli::try_parse_from(["simplot", "--scatter", "--surface", "f.dat"]).is_err());
        assert!(Cli::try_parse_from(["simplot", "--surface", "--pcolor", "f.dat"]).is_err());
        assert!(Cli::try_parse_from(["simplot", "--scatter", "--pcolor", "f.dat"]).is_err());
    }

    #[test]
    fn test_axis_defaults() {
        let cli = parse(&["simplot", "f.dat"]);
        assert_eq!((cli.x_axis, cli.y_axis, cli.z_axis), (0, 1, 3));
    }

    #[test]
    fn test_requires_at_least_one_file() {
        assert!(Cli::try_parse_from(["simplot"]).is_err());
    }

    #[test]
    fn test_output_path_defaults_to_first_stem() {
        let cli = parse(&["simplot", "/data/run42.dat"]);
        let path = output_path(&cli, OutputFormat::Png);
        assert_eq!(path, PathBuf::from("run42.png"));

        let cli = parse(&["simplot", "--outbase", "/tmp/out", "f.dat"]);
        let path = output_path(&cli, OutputFormat::Svg);
        assert_eq!(path, PathBuf::from("/tmp/out.svg"));
    }

    #[test]
    fn test_invalid_orientation() {
        let dir = TempDir::new().unwrap();
        let file = write_datafile(&dir, "a.dat", "x y z\n1 2 3\n");
        let cli = parse(&[
            "simplot",
            "--orientation",
            "diagonal",
            file.to_str().unwrap(),
        ]);

        let err = execute(&cli, &PlotConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            PlotError::Config(ConfigurationError::InvalidOrientation(_))
        ));
    }

    #[test]
    fn test_invalid_output_format() {
        let dir = TempDir::new().unwrap();
        let file = write_datafile(&dir, "a.dat", "x y z\n1 2 3\n");
        let cli = parse(&["simplot", "--oformat", "ps", file.to_str().unwrap()]);

        let err = execute(&cli, &PlotConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            PlotError::Config(ConfigurationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_legend_count_mismatch() {
        let dir = TempDir::new().unwrap();
        let file = write_datafile(&dir, "a.dat", "x y z\n1 2 3\n");
        let out = dir.path().join("out");
        let cli = parse(&[
            "simplot",
            "--legend",
            "one:two",
            "--outbase",
            out.to_str().unwrap(),
            file.to_str().unwrap(),
        ]);

        let err = execute(&cli, &PlotConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            PlotError::Config(ConfigurationError::LegendCount {
                expected: 1,
                got: 2
            })
        ));
    }

    #[test]
    fn test_invalid_legend_position() {
        let dir = TempDir::new().unwrap();
        let file = write_datafile(&dir, "a.dat", "x y z\n1 2 3\n");
        let out = dir.path().join("out");
        let cli = parse(&[
            "simplot",
            "--legpos",
            "somewhere",
            "--outbase",
            out.to_str().unwrap(),
            file.to_str().unwrap(),
        ]);

        let err = execute(&cli, &PlotConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            PlotError::Config(ConfigurationError::InvalidLegendPosition(_))
        ));
    }

    #[test]
    fn test_too_many_datasets_for_palette() {
        let names: Vec<String> = (0..9).map(|i| format!("f{i}.dat")).collect();
        let mut args = vec!["simplot", "--outbase", "/tmp/never-written"];
        args.extend(names.iter().map(String::as_str));
        let cli = parse(&args);

        let err = execute(&cli, &PlotConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            PlotError::Config(ConfigurationError::TooManyDatasets { got: 9, limit: 8 })
        ));
    }

    #[test]
    fn test_axis_out_of_range_names_file() {
        let dir = TempDir::new().unwrap();
        // only 3 columns, but the default z axis is column 3
        let file = write_datafile(&dir, "narrow.dat", "x y z\n1 2 3\n");
        let out = dir.path().join("out");
        let cli = parse(&[
            "simplot",
            "--outbase",
            out.to_str().unwrap(),
            file.to_str().unwrap(),
        ]);

        let err = execute(&cli, &PlotConfig::default()).unwrap_err();
        match err {
            PlotError::Config(ConfigurationError::AxisOutOfRange { index, columns, .. }) => {
                assert_eq!(index, 3);
                assert_eq!(columns, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_file_aborts_without_output() {
        let dir = TempDir::new().unwrap();
        // header has 3 fields, data rows have 4 tokens
        let file = write_datafile(&dir, "bad.dat", "x y z\n1 2 3 4\n5 6 7 8\n");
        let out = dir.path().join("out");
        let cli = parse(&[
            "simplot",
            "--x-axis",
            "0",
            "--y-axis",
            "1",
            "--z-axis",
            "2",
            "--outbase",
            out.to_str().unwrap(),
            file.to_str().unwrap(),
        ]);

        let err = execute(&cli, &PlotConfig::default()).unwrap_err();
        match &err {
            PlotError::Data(data_err) => {
                assert!(data_err.to_string().contains("bad.dat"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!dir.path().join("out.png").exists());
    }

    #[test]
    fn test_existing_output_requires_overwrite() {
        let dir = TempDir::new().unwrap();
        let file = write_datafile(&dir, "a.dat", "x y z\n1 2 3\n");
        let out = dir.path().join("out");
        std::fs::write(dir.path().join("out.png"), b"old").unwrap();

        let cli = parse(&[
            "simplot",
            "--outbase",
            out.to_str().unwrap(),
            file.to_str().unwrap(),
        ]);
        let err = execute(&cli, &PlotConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            PlotError::Config(ConfigurationError::OutputExists(_))
        ));
    }

    #[test]
    fn test_prepare_scatter_splits_minima_per_dataset() {
        let dir = TempDir::new().unwrap();
        let a = write_datafile(&dir, "a.dat", "x y z\n0 0 5\n1 1 1\n2 2 1\n3 3 9\n4 4 6\n");
        let b = write_datafile(&dir, "b.dat", "x y z\n0 0 4\n1 1 3\n2 2 8\n3 3 2\n4 4 7\n");

        let datasets = vec![Dataset::load(&a).unwrap(), Dataset::load(&b).unwrap()];
        let axes = AxisSelection { x: 0, y: 1, z: 2 };

        let pairs = prepare_scatter(datasets, &axes, true);

        assert_eq!(pairs.len(), 2);
        // first file: tie at z = 1 -> two overlay rows, three residual rows
        assert_eq!(pairs[0].1.as_ref().unwrap().len(), 2);
        assert_eq!(pairs[0].0.num_rows(), 3);
        // second file: single minimum
        assert_eq!(pairs[1].1.as_ref().unwrap().zs, vec![2.0]);
        assert_eq!(pairs[1].0.num_rows(), 4);
    }

    #[test]
    fn test_prepare_scatter_without_minimum_keeps_rows() {
        let dir = TempDir::new().unwrap();
        let a = write_datafile(&dir, "a.dat", "x y z\n0 0 5\n1 1 1\n");
        let datasets = vec![Dataset::load(&a).unwrap()];
        let axes = AxisSelection { x: 0, y: 1, z: 2 };

        let pairs = prepare_scatter(datasets, &axes, false);

        assert!(pairs[0].1.is_none());
        assert_eq!(pairs[0].0.num_rows(), 2);
    }

    #[test]
    fn test_default_legend_labels_are_file_names() {
        let dir = TempDir::new().unwrap();
        let a = write_datafile(&dir, "a.dat", "x y z\n0 0 5\n");
        let b = write_datafile(&dir, "b.dat", "x y z\n0 0 4\n");
        let out = dir.path().join("legend-out");
        let cli = parse(&[
            "simplot",
            "--x-axis",
            "0",
            "--y-axis",
            "1",
            "--z-axis",
            "2",
            "--outbase",
            out.to_str().unwrap(),
            a.to_str().unwrap(),
            b.to_str().unwrap(),
        ]);

        // the default legend labels mirror the file arguments
        let labels: Vec<String> = cli.files.iter().map(|p| p.display().to_string()).collect();
        assert_eq!(labels[0], a.display().to_string());
        assert_eq!(labels[1], b.display().to_string());
    }

    #[test]
    fn test_resolve_axis_labels_falls_back_to_header() {
        let dir = TempDir::new().unwrap();
        let a = write_datafile(&dir, "a.dat", "time offset gain cost\n0 0 1 5\n");
        let data = Dataset::load(&a).unwrap();
        let axes = AxisSelection { x: 0, y: 1, z: 3 };

        let cli = parse(&["simplot", "--y-label", "shift", a.to_str().unwrap()]);
        let labels = resolve_axis_labels(&cli, &data, &axes);

        assert_eq!(labels.x, "time");
        assert_eq!(labels.y, "shift");
        assert_eq!(labels.z, "cost");
    }

    #[test]
    fn test_scatter_end_to_end_writes_output() {
        let dir = TempDir::new().unwrap();
        let a = write_datafile(&dir, "a.dat", "x y z\n0 0 5\n1 1 1\n2 0 3\n0 2 4\n2 2 6\n");
        let b = write_datafile(&dir, "b.dat", "x y z\n0 0 4\n1 1 3\n2 0 8\n0 2 2\n2 2 7\n");
        let out = dir.path().join("scatter-out");

        let cli = parse(&[
            "simplot",
            "--x-axis",
            "0",
            "--y-axis",
            "1",
            "--z-axis",
            "2",
            "--min",
            "--outbase",
            out.to_str().unwrap(),
            a.to_str().unwrap(),
            b.to_str().unwrap(),
        ]);

        let written = execute(&cli, &PlotConfig::default()).unwrap();
        assert_eq!(written, dir.path().join("scatter-out.png"));
        assert!(written.exists());
        assert!(std::fs::metadata(&written).unwrap().len() > 0);
    }

    #[test]
    fn test_pcolor_end_to_end_writes_output() {
        let dir = TempDir::new().unwrap();
        let a = write_datafile(
            &dir,
            "a.dat",
            "x y z\n0 0 1\n1 0 2\n2 0 3\n0 1 2\n1 1 4\n2 1 5\n0 2 3\n1 2 5\n2 2 6\n",
        );
        let out = dir.path().join("pcolor-out");

        // keep the mesh small so the test stays fast
        let mut config = PlotConfig::default();
        config.mesh.pcolor_width = 40;
        config.mesh.pcolor_height = 30;

        let cli = parse(&[
            "simplot",
            "--pcolor",
            "--x-axis",
            "0",
            "--y-axis",
            "1",
            "--z-axis",
            "2",
            "--outbase",
            out.to_str().unwrap(),
            a.to_str().unwrap(),
        ]);

        let written = execute(&cli, &config).unwrap();
        assert!(written.exists());
    }

    #[test]
    fn test_surface_end_to_end_collinear_data_fails() {
        let dir = TempDir::new().unwrap();
        // every sample on the x axis: no area to interpolate over
        let a = write_datafile(&dir, "line.dat", "x y z\n0 0 1\n1 0 2\n2 0 3\n3 0 4\n");
        let out = dir.path().join("surf-out");

        let cli = parse(&[
            "simplot",
            "--surface",
            "--x-axis",
            "0",
            "--y-axis",
            "1",
            "--z-axis",
            "2",
            "--outbase",
            out.to_str().unwrap(),
            a.to_str().unwrap(),
        ]);

        let err = execute(&cli, &PlotConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            PlotError::Geometry(GeometryError::CollinearPoints(_))
        ));
        assert!(!dir.path().join("surf-out.png").exists());
    }
}
