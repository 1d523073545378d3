//! Render mode selection and option compatibility rules.
//!
//! Exactly one of scatter, surface, or pseudocolor is active per run;
//! scatter is the default. Option combinations the other modes cannot
//! honor (`--min`, a legend) are dropped here with a diagnostic rather
//! than treated as errors, and the decision is made once before any data
//! is loaded.

use log::info;

/// Legend placement vocabulary. `Unset` disables the legend entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    Unset,
    Best,
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
    Right,
    CenterLeft,
    CenterRight,
    LowerCenter,
    UpperCenter,
    Center,
}

impl LegendPosition {
    /// Parse a position argument; `None` for an unknown value.
    pub fn parse(s: &str) -> Option<LegendPosition> {
        match s {
            "unset" => Some(LegendPosition::Unset),
            "best" => Some(LegendPosition::Best),
            "upper right" => Some(LegendPosition::UpperRight),
            "upper left" => Some(LegendPosition::UpperLeft),
            "lower left" => Some(LegendPosition::LowerLeft),
            "lower right" => Some(LegendPosition::LowerRight),
            "right" => Some(LegendPosition::Right),
            "center left" => Some(LegendPosition::CenterLeft),
            "center right" => Some(LegendPosition::CenterRight),
            "lower center" => Some(LegendPosition::LowerCenter),
            "upper center" => Some(LegendPosition::UpperCenter),
            "center" => Some(LegendPosition::Center),
            _ => None,
        }
    }
}

/// A resolved legend request: one label per dataset, already count-checked
/// against the input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendSpec {
    pub labels: Vec<String>,
    pub position: LegendPosition,
    pub font_size: u32,
}

/// The active render mode, carrying only the options it supports.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderMode {
    Scatter {
        show_minimum: bool,
        legend: Option<LegendSpec>,
    },
    Surface,
    Pseudocolor,
}

impl RenderMode {
    /// Resolve the mode from the CLI flags, applying the compatibility
    /// rules:
    ///
    /// - `--min` only survives in scatter mode; surface and pseudocolor
    ///   drop it with a diagnostic.
    /// - A legend only survives in scatter mode (surface gets a color bar,
    ///   pseudocolor a color bar and a single dataset); `unset` disables
    ///   it there too.
    /// - Pseudocolor plots only the first of several datasets, with a
    ///   diagnostic.
    ///
    /// The flags are mutually exclusive (enforced by the CLI parser);
    /// neither set means scatter.
    pub fn select(
        surface: bool,
        pcolor: bool,
        show_minimum: bool,
        legend: Option<LegendSpec>,
        dataset_count: usize,
    ) -> RenderMode {
        if surface || pcolor {
            if show_minimum {
                info!("surface or pcolor plot does not support option '--min'");
            }
            if legend.is_some() {
                info!("legend is only drawn for scattered plots");
            }
        }

        if pcolor {
            if dataset_count > 1 {
                info!("only plotting data of the first DATAFILE");
            }
            return RenderMode::Pseudocolor;
        }

        if surface {
            return RenderMode::Surface;
        }

        let legend = legend.filter(|spec| spec.position != LegendPosition::Unset);
        RenderMode::Scatter {
            show_minimum,
            legend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legend() -> LegendSpec {
        LegendSpec {
            labels: vec!["a".into(), "b".into()],
            position: LegendPosition::UpperRight,
            font_size: 12,
        }
    }

    #[test]
    fn test_scatter_is_default() {
        let mode = RenderMode::select(false, false, false, None, 1);
        assert_eq!(
            mode,
            RenderMode::Scatter {
                show_minimum: false,
                legend: None
            }
        );
    }

    #[test]
    fn test_scatter_keeps_minimum_and_legend() {
        let mode = RenderMode::select(false, false, true, Some(legend()), 2);
        match mode {
            RenderMode::Scatter {
                show_minimum,
                legend,
            } => {
                assert!(show_minimum);
                assert_eq!(legend.unwrap().labels.len(), 2);
            }
            other => panic!("unexpected mode: {other:?}"),
        }
    }

    #[test]
    fn test_surface_drops_minimum_and_legend() {
        let mode = RenderMode::select(true, false, true, Some(legend()), 2);
        assert_eq!(mode, RenderMode::Surface);
    }

    #[test]
    fn test_pcolor_drops_minimum() {
        let mode = RenderMode::select(false, true, true, None, 3);
        assert_eq!(mode, RenderMode::Pseudocolor);
    }

    #[test]
    fn test_unset_position_disables_legend() {
        let spec = LegendSpec {
            position: LegendPosition::Unset,
            ..legend()
        };
        let mode = RenderMode::select(false, false, false, Some(spec), 2);
        assert_eq!(
            mode,
            RenderMode::Scatter {
                show_minimum: false,
                legend: None
            }
        );
    }

    #[test]
    fn test_legend_position_parsing() {
        assert_eq!(
            LegendPosition::parse("upper right"),
            Some(LegendPosition::UpperRight)
        );
        assert_eq!(LegendPosition::parse("unset"), Some(LegendPosition::Unset));
        assert_eq!(LegendPosition::parse("center"), Some(LegendPosition::Center));
        assert_eq!(LegendPosition::parse("middle"), None);
        assert_eq!(LegendPosition::parse(""), None);
    }
}
