//! Axis configuration, scaling, ticks, and formatting.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{PlotError, Result};
use crate::gps::{GpsScale, GpsTransform};
use crate::view::Range;

/// Axis scale type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisScale {
    /// Linear scaling.
    Linear,
    /// Base-10 logarithmic scaling.
    Log10,
    /// GPS time scaling (mapped as linear values internally).
    Gps(GpsScale),
}

impl AxisScale {
    /// Registered name of the scale.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Log10 => "log",
            Self::Gps(scale) => scale.name(),
        }
    }

    /// Check whether this is one of the GPS scales.
    pub fn is_gps(&self) -> bool {
        matches!(self, Self::Gps(_))
    }

    /// Check whether this is a logarithmic scale.
    pub fn is_log(&self) -> bool {
        matches!(self, Self::Log10)
    }

    /// Map a value into axis space.
    pub fn map_value(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        match self {
            Self::Linear | Self::Gps(_) => Some(value),
            Self::Log10 => {
                if value <= 0.0 {
                    None
                } else {
                    Some(value.log10())
                }
            }
        }
    }

    /// Invert a value from axis space back into data space.
    pub fn invert_value(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        match self {
            Self::Linear | Self::Gps(_) => Some(value),
            Self::Log10 => Some(10_f64.powf(value)),
        }
    }

    /// Check whether a data range is valid for this scale.
    pub fn is_range_valid(&self, range: Range) -> bool {
        if !range.is_finite() {
            return false;
        }
        match self {
            Self::Linear | Self::Gps(_) => true,
            Self::Log10 => range.min > 0.0 && range.max > 0.0,
        }
    }
}

impl Default for AxisScale {
    fn default() -> Self {
        Self::Linear
    }
}

impl FromStr for AxisScale {
    type Err = PlotError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "linear" => Ok(Self::Linear),
            "log" => Ok(Self::Log10),
            other => GpsScale::from_name(other)
                .map(Self::Gps)
                .ok_or_else(|| PlotError::UnknownScale(other.to_owned())),
        }
    }
}

impl fmt::Display for AxisScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Formatter for axis tick labels.
#[derive(Clone, Default)]
pub enum AxisFormatter {
    /// Default formatter for the axis scale.
    #[default]
    Default,
    /// Custom formatter callback.
    Custom(Arc<dyn Fn(f64) -> String + Send + Sync>),
}

impl AxisFormatter {
    /// Format a tick value for display.
    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Default => format_number(value),
            Self::Custom(formatter) => formatter(value),
        }
    }
}

impl fmt::Debug for AxisFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "AxisFormatter::Default"),
            Self::Custom(_) => write!(f, "AxisFormatter::Custom(..)"),
        }
    }
}

/// Which of the two axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisId {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl AxisId {
    /// Lower-case axis name.
    pub fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

/// Resolved coordinate transform of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisTransform {
    /// Identity.
    Linear,
    /// Base-10 logarithm.
    Log10,
    /// GPS offset from an epoch.
    Gps(GpsTransform),
}

/// One axis of a rectangular axes: scale, label, limits and formatter.
#[derive(Debug, Clone)]
pub struct Axis {
    id: AxisId,
    scale: AxisScale,
    label: String,
    default_label: bool,
    limits: Option<Range>,
    formatter: AxisFormatter,
}

impl Axis {
    /// Create an autoscaled linear axis with an empty default label.
    pub fn new(id: AxisId) -> Self {
        Self {
            id,
            scale: AxisScale::default(),
            label: String::new(),
            default_label: true,
            limits: None,
            formatter: AxisFormatter::default(),
        }
    }

    /// Which axis this is.
    pub fn id(&self) -> AxisId {
        self.id
    }

    /// Access the axis scale.
    pub fn scale(&self) -> AxisScale {
        self.scale
    }

    /// Set the axis scale.
    pub fn set_scale(&mut self, scale: AxisScale) {
        self.scale = scale;
    }

    /// Access the label text.
    pub fn label_text(&self) -> &str {
        &self.label
    }

    /// Set the label text, marking the label as customized.
    pub fn set_label_text(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.default_label = false;
    }

    /// Whether the label still carries its default value.
    pub fn is_default_label(&self) -> bool {
        self.default_label
    }

    /// Set the default-label marker.
    pub fn set_default_label(&mut self, default: bool) {
        self.default_label = default;
    }

    /// Explicit limits, or `None` while autoscaling.
    pub fn limits(&self) -> Option<Range> {
        self.limits
    }

    /// Fix the limits, disabling autoscaling.
    pub fn set_limits(&mut self, limits: Range) {
        self.limits = Some(limits);
    }

    /// Re-enable autoscaling.
    pub fn clear_limits(&mut self) {
        self.limits = None;
    }

    /// Whether limits follow the data.
    pub fn is_autoscale(&self) -> bool {
        self.limits.is_none()
    }

    /// Access the tick formatter.
    pub fn formatter(&self) -> &AxisFormatter {
        &self.formatter
    }

    /// Set the tick formatter.
    pub fn set_formatter(&mut self, formatter: AxisFormatter) {
        self.formatter = formatter;
    }

    /// Resolve the scale transform against a view interval.
    pub fn transform(&self, view: Range) -> AxisTransform {
        match self.scale {
            AxisScale::Linear => AxisTransform::Linear,
            AxisScale::Log10 => AxisTransform::Log10,
            AxisScale::Gps(scale) => AxisTransform::Gps(scale.transform(view)),
        }
    }

    /// Resolve the GPS transform, failing on non-GPS scales.
    pub fn gps_transform(&self, view: Range) -> Result<GpsTransform> {
        match self.transform(view) {
            AxisTransform::Gps(transform) => Ok(transform),
            _ => Err(PlotError::NotGpsScale {
                axis: self.id.name(),
                scale: self.scale.name().to_owned(),
            }),
        }
    }

    /// Tick positions (in data space) for the given view.
    pub fn ticks(&self, view: Range) -> Vec<f64> {
        match self.transform(view) {
            AxisTransform::Linear => linear_ticks(view, TARGET_TICKS),
            AxisTransform::Log10 => log_ticks(view),
            AxisTransform::Gps(transform) => {
                let display = Range::new(
                    transform.to_display(view.min),
                    transform.to_display(view.max),
                );
                linear_ticks(display, TARGET_TICKS)
                    .into_iter()
                    .map(|tick| transform.from_display(tick))
                    .collect()
            }
        }
    }

    /// Tick label for a tick position.
    pub fn tick_label(&self, value: f64, view: Range) -> String {
        if let AxisFormatter::Custom(_) = self.formatter {
            return self.formatter.format(value);
        }
        match self.transform(view) {
            AxisTransform::Linear => format_number(value),
            AxisTransform::Log10 => format!("1e{}", value.log10().round()),
            AxisTransform::Gps(transform) => format_number(transform.to_display(value)),
        }
    }
}

const TARGET_TICKS: usize = 6;

/// "Nice" linear ticks covering the range.
pub(crate) fn linear_ticks(range: Range, target: usize) -> Vec<f64> {
    if !range.is_finite() || target == 0 {
        return Vec::new();
    }
    let span = range.span();
    if span <= 0.0 {
        return vec![range.min];
    }
    let raw = span / target as f64;
    let magnitude = 10_f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual < 1.5 {
        1.0
    } else if residual < 3.0 {
        2.0
    } else if residual < 7.0 {
        5.0
    } else {
        10.0
    };
    let step = nice * magnitude;
    let start = (range.min / step).ceil() as i64;
    let end = (range.max / step).floor() as i64;
    (start..=end).map(|index| index as f64 * step).collect()
}

/// Decade ticks covering a positive range.
pub(crate) fn log_ticks(range: Range) -> Vec<f64> {
    if range.min <= 0.0 || !range.is_finite() {
        return Vec::new();
    }
    let start = (range.min.log10() - 1e-9).ceil() as i32;
    let end = (range.max.log10() + 1e-9).floor() as i32;
    let decades = (end - start).max(0) as usize + 1;
    let stride = decades.div_ceil(TARGET_TICKS).max(1);
    (start..=end)
        .step_by(stride)
        .map(|exponent| 10_f64.powi(exponent))
        .collect()
}

/// Short numeric label: trims trailing zeros, switches to exponent form for
/// very large or very small magnitudes.
pub(crate) fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    let magnitude = value.abs();
    if !(1e-4..1e7).contains(&magnitude) {
        return format!("{value:.3e}");
    }
    let text = format!("{value:.6}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_owned()
    } else {
        text.to_owned()
    }
}
