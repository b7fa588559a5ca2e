//! Positional argument parsing for line plots.
//!
//! Arguments are consumed in groups: two data arguments followed by an
//! optional format string. A group holding a single data argument is
//! plotted against its sample numbers.

use crate::colors::Color;
use crate::error::{PlotError, Result};
use crate::render::{LineDash, MarkerShape};
use crate::types::Series;

/// One positional argument to [`plot`](crate::AxesBackend::plot).
#[derive(Debug, Clone, PartialEq)]
pub enum PlotArg {
    /// Raw values.
    Values(Vec<f64>),
    /// A labeled series.
    Series(Series),
    /// A format string such as `"r--"` or `"ko"`.
    Format(String),
}

impl From<Vec<f64>> for PlotArg {
    fn from(values: Vec<f64>) -> Self {
        Self::Values(values)
    }
}

impl From<&[f64]> for PlotArg {
    fn from(values: &[f64]) -> Self {
        Self::Values(values.to_vec())
    }
}

impl From<&Vec<f64>> for PlotArg {
    fn from(values: &Vec<f64>) -> Self {
        Self::Values(values.clone())
    }
}

impl<const N: usize> From<[f64; N]> for PlotArg {
    fn from(values: [f64; N]) -> Self {
        Self::Values(values.to_vec())
    }
}

impl From<Series> for PlotArg {
    fn from(series: Series) -> Self {
        Self::Series(series)
    }
}

impl From<&Series> for PlotArg {
    fn from(series: &Series) -> Self {
        Self::Series(series.clone())
    }
}

impl From<&str> for PlotArg {
    fn from(fmt: &str) -> Self {
        Self::Format(fmt.to_owned())
    }
}

impl From<String> for PlotArg {
    fn from(fmt: String) -> Self {
        Self::Format(fmt)
    }
}

/// Build a `Vec<PlotArg>` from a list of convertible values.
///
/// ```
/// use gwplot::plot_args;
/// let args = plot_args![vec![0.0, 1.0], vec![2.0, 3.0], "r--"];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! plot_args {
    ($($arg:expr),* $(,)?) => {
        vec![$($crate::PlotArg::from($arg)),*]
    };
}

/// Decoded format string.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct FormatSpec {
    pub(crate) color: Option<Color>,
    pub(crate) linestyle: Option<LineDash>,
    pub(crate) marker: Option<MarkerShape>,
}

impl FormatSpec {
    /// Dash pattern to draw; a marker-only format draws no line.
    pub(crate) fn dash(&self) -> Option<LineDash> {
        match (self.linestyle, self.marker) {
            (Some(dash), _) => Some(dash),
            (None, Some(_)) => None,
            (None, None) => Some(LineDash::Solid),
        }
    }
}

/// One line worth of parsed arguments.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LineArgs {
    pub(crate) x: Vec<f64>,
    pub(crate) y: Vec<f64>,
    pub(crate) format: FormatSpec,
}

/// Split positional arguments into lines.
pub(crate) fn parse_plot_args(args: Vec<PlotArg>) -> Result<Vec<LineArgs>> {
    if args.is_empty() {
        return Err(PlotError::InvalidPlotArgs("no data to plot".to_owned()));
    }
    let mut lines = Vec::new();
    let mut remaining = args.into_iter().peekable();
    while remaining.peek().is_some() {
        let mut data = Vec::with_capacity(2);
        let mut format = None;
        while data.len() < 2 {
            match remaining.next_if(|arg| !matches!(arg, PlotArg::Format(_))) {
                Some(arg) => data.push(values_of(arg)),
                None => break,
            }
        }
        if let Some(PlotArg::Format(fmt)) = remaining.next_if(|arg| matches!(arg, PlotArg::Format(_))) {
            format = Some(fmt);
        }
        let format = match format {
            Some(fmt) => parse_format(&fmt)?,
            None => FormatSpec::default(),
        };
        let (x, y) = match data.len() {
            2 => {
                let y = data.pop().unwrap_or_default();
                let x = data.pop().unwrap_or_default();
                (x, y)
            }
            1 => {
                let y = data.pop().unwrap_or_default();
                ((0..y.len()).map(|i| i as f64).collect(), y)
            }
            _ => {
                return Err(PlotError::InvalidPlotArgs(
                    "format string given without data".to_owned(),
                ));
            }
        };
        if x.len() != y.len() {
            return Err(PlotError::LengthMismatch {
                what: "plot x and y",
                expected: x.len(),
                found: y.len(),
            });
        }
        lines.push(LineArgs { x, y, format });
    }
    Ok(lines)
}

fn values_of(arg: PlotArg) -> Vec<f64> {
    match arg {
        PlotArg::Values(values) => values,
        PlotArg::Series(series) => series.values().to_vec(),
        PlotArg::Format(_) => Vec::new(),
    }
}

/// Parse a matplotlib-style format string.
pub(crate) fn parse_format(fmt: &str) -> Result<FormatSpec> {
    let invalid = |what: String| PlotError::InvalidPlotArgs(format!("{what} in format string {fmt:?}"));
    let mut spec = FormatSpec::default();
    let chars: Vec<char> = fmt.chars().collect();
    let mut index = 0;
    while index < chars.len() {
        let current = chars[index];
        let next = chars.get(index + 1).copied();
        let (linestyle, width) = match (current, next) {
            ('-', Some('-')) => (Some(LineDash::Dashed), 2),
            ('-', Some('.')) => (Some(LineDash::DashDot), 2),
            ('-', _) => (Some(LineDash::Solid), 1),
            (':', _) => (Some(LineDash::Dotted), 1),
            _ => (None, 1),
        };
        if let Some(linestyle) = linestyle {
            if spec.linestyle.replace(linestyle).is_some() {
                return Err(invalid("two line styles".to_owned()));
            }
            index += width;
            continue;
        }
        if let Some(marker) = marker_for(current) {
            if spec.marker.replace(marker).is_some() {
                return Err(invalid("two markers".to_owned()));
            }
            index += 1;
            continue;
        }
        let color = match (current, next) {
            ('C', Some(digit)) if digit.is_ascii_digit() => {
                index += 1;
                Color::parse(&format!("C{digit}"))
            }
            _ if "bgrcmykw".contains(current) => Color::parse(&current.to_string()),
            _ => None,
        };
        let Some(color) = color else {
            return Err(invalid(format!("unrecognized character {current:?}")));
        };
        if spec.color.replace(color).is_some() {
            return Err(invalid("two colors".to_owned()));
        }
        index += 1;
    }
    Ok(spec)
}

fn marker_for(symbol: char) -> Option<MarkerShape> {
    match symbol {
        '.' => Some(MarkerShape::Point),
        'o' => Some(MarkerShape::Circle),
        's' => Some(MarkerShape::Square),
        'x' => Some(MarkerShape::Cross),
        '+' => Some(MarkerShape::Plus),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_array_uses_sample_numbers() {
        let lines = parse_plot_args(vec![PlotArg::from(vec![5.0, 6.0, 7.0])]).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].x, vec![0.0, 1.0, 2.0]);
        assert_eq!(lines[0].y, vec![5.0, 6.0, 7.0]);
    }

    #[test]
    fn groups_of_two_with_formats() {
        let args = crate::plot_args![vec![0.0, 1.0], vec![1.0, 2.0], "r--", vec![3.0, 4.0], "ko"];
        let lines = parse_plot_args(args).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].format.linestyle, Some(LineDash::Dashed));
        assert_eq!(lines[0].format.color, Color::parse("r"));
        assert_eq!(lines[1].x, vec![0.0, 1.0]);
        assert_eq!(lines[1].format.dash(), None);
        assert_eq!(lines[1].format.marker, Some(MarkerShape::Circle));
    }

    #[test]
    fn series_reaching_the_parser_is_its_values() {
        let series = Series::regular("s", 100.0, 1.0, vec![1.0, 2.0]);
        let lines = parse_plot_args(vec![PlotArg::from(series)]).unwrap();
        assert_eq!(lines[0].x, vec![0.0, 1.0]);
    }

    #[test]
    fn mismatched_lengths_fail() {
        let err = parse_plot_args(crate::plot_args![vec![0.0], vec![1.0, 2.0]]).unwrap_err();
        assert!(matches!(err, PlotError::LengthMismatch { .. }));
    }

    #[test]
    fn bad_format_fails() {
        assert!(parse_format("q").is_err());
        assert!(parse_format("--:").is_err());
        assert_eq!(parse_format("-.").unwrap().linestyle, Some(LineDash::DashDot));
        assert!(parse_format("C3").unwrap().color.is_some());
        assert!(parse_plot_args(crate::plot_args!["r-"]).is_err());
    }
}
