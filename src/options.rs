//! Keyword options accepted by the plotting methods.
//!
//! Every field is optional; unset fields fall back to the rc parameters
//! when the artist is created.

use ndarray::Array2;

use crate::artist::{Aspect, ArtistId, Interpolation, LegendLoc, Origin};
use crate::colors::{Color, Colormap, NormOptions};
use crate::render::{LineDash, MarkerShape};
use crate::time::GpsInput;
use crate::types::Array2D;

/// Options for line plots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineOptions {
    /// Legend label.
    pub label: Option<String>,
    /// Line color; overrides format strings and the color cycle.
    pub color: Option<Color>,
    /// Line width in pixels.
    pub linewidth: Option<f32>,
    /// Opacity.
    pub alpha: Option<f32>,
    /// Dash pattern; overrides format strings.
    pub linestyle: Option<LineDash>,
    /// Vertex marker; overrides format strings.
    pub marker: Option<MarkerShape>,
    /// Rasterize in vector output.
    pub rasterized: Option<bool>,
}

impl LineOptions {
    /// Set the legend label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the line color.
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the line width.
    pub fn linewidth(mut self, width: f32) -> Self {
        self.linewidth = Some(width);
        self
    }

    /// Set the opacity.
    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = Some(alpha);
        self
    }
}

/// Options for [`fill_between`](crate::AxesBackend::fill_between).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillOptions {
    /// Legend label.
    pub label: Option<String>,
    /// Fill color.
    pub color: Option<Color>,
    /// Opacity.
    pub alpha: Option<f32>,
    /// Rasterize in vector output.
    pub rasterized: Option<bool>,
}

/// Color input of a scatter plot.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorArg {
    /// Numeric values mapped through a colormap.
    Values(Vec<f64>),
    /// One spec per point: numbers (mapped) or color specs (literal).
    Specs(Vec<String>),
    /// A single color spec for every point.
    Spec(String),
    /// A single color for every point.
    Color(Color),
}

impl ColorArg {
    /// Numeric color values, if the input is numeric.
    pub fn as_numeric(&self) -> Option<Vec<f64>> {
        match self {
            Self::Values(values) => Some(values.clone()),
            Self::Specs(specs) => specs
                .iter()
                .map(|spec| spec.trim().parse::<f64>().ok())
                .collect(),
            Self::Spec(_) | Self::Color(_) => None,
        }
    }

    /// Number of per-point entries, if the input has one entry per point.
    pub fn point_count(&self) -> Option<usize> {
        match self {
            Self::Values(values) => Some(values.len()),
            Self::Specs(specs) => Some(specs.len()),
            Self::Spec(_) | Self::Color(_) => None,
        }
    }
}

impl From<Vec<f64>> for ColorArg {
    fn from(values: Vec<f64>) -> Self {
        Self::Values(values)
    }
}

impl From<&[f64]> for ColorArg {
    fn from(values: &[f64]) -> Self {
        Self::Values(values.to_vec())
    }
}

impl From<&str> for ColorArg {
    fn from(spec: &str) -> Self {
        Self::Spec(spec.to_owned())
    }
}

impl From<Color> for ColorArg {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

/// Options for scatter plots.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterOptions {
    /// Point colors.
    pub c: Option<ColorArg>,
    /// Sort points by ascending numeric color before drawing.
    pub c_sort: bool,
    /// Legend label.
    pub label: Option<String>,
    /// Marker size in pixels.
    pub size: Option<f32>,
    /// Marker shape.
    pub marker: Option<MarkerShape>,
    /// Opacity.
    pub alpha: Option<f32>,
    /// Colormap for numeric colors.
    pub cmap: Option<Colormap>,
    /// Normalization for numeric colors.
    pub norm: NormOptions,
}

impl Default for ScatterOptions {
    fn default() -> Self {
        Self {
            c: None,
            c_sort: true,
            label: None,
            size: None,
            marker: None,
            alpha: None,
            cmap: None,
            norm: NormOptions::default(),
        }
    }
}

impl ScatterOptions {
    /// Set the point colors.
    pub fn c(mut self, c: impl Into<ColorArg>) -> Self {
        self.c = Some(c.into());
        self
    }

    /// Enable or disable sorting by color.
    pub fn c_sort(mut self, sort: bool) -> Self {
        self.c_sort = sort;
        self
    }
}

/// Data shown by [`imshow`](crate::AxesBackend::imshow).
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// Raw pixels shaped `(rows, cols)`.
    Grid(Array2<f64>),
    /// A 2-D array with its own X and Y spans.
    Array(Array2D),
}

impl From<Array2<f64>> for ImageSource {
    fn from(grid: Array2<f64>) -> Self {
        Self::Grid(grid)
    }
}

impl From<Array2D> for ImageSource {
    fn from(array: Array2D) -> Self {
        Self::Array(array)
    }
}

/// Options for images.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageOptions {
    /// `[left, right, bottom, top]` in data coordinates.
    pub extent: Option<[f64; 4]>,
    /// Row ordering.
    pub origin: Option<Origin>,
    /// Resampling.
    pub interpolation: Option<Interpolation>,
    /// Aspect handling.
    pub aspect: Option<Aspect>,
    /// Colormap.
    pub cmap: Option<Colormap>,
    /// Normalization.
    pub norm: NormOptions,
}

/// Positional arguments of [`pcolormesh`](crate::AxesBackend::pcolormesh).
#[derive(Debug, Clone, PartialEq)]
pub enum MeshArgs {
    /// Cell values only; edges are the integer grid.
    C(Array2<f64>),
    /// Corner coordinates and cell values.
    ///
    /// Coordinates are shaped `(rows + 1, cols + 1)`; an X row of shape
    /// `(1, cols + 1)` or a Y column of shape `(rows + 1, 1)` is broadcast.
    Xyc {
        /// Corner X coordinates.
        x: Array2<f64>,
        /// Corner Y coordinates.
        y: Array2<f64>,
        /// Cell values shaped `(rows, cols)`.
        c: Array2<f64>,
    },
    /// A 2-D array.
    Array(Array2D),
}

impl From<Array2D> for MeshArgs {
    fn from(array: Array2D) -> Self {
        Self::Array(array)
    }
}

impl From<Array2<f64>> for MeshArgs {
    fn from(c: Array2<f64>) -> Self {
        Self::C(c)
    }
}

/// Options for meshes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshOptions {
    /// Colormap.
    pub cmap: Option<Colormap>,
    /// Normalization.
    pub norm: NormOptions,
}

/// Options for legends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegendOptions {
    /// Frame opacity.
    pub alpha: Option<f32>,
    /// Width applied to every legend line sample.
    pub linewidth: Option<f32>,
    /// Placement.
    pub loc: Option<LegendLoc>,
    /// Title.
    pub title: Option<String>,
}

impl LegendOptions {
    /// Set the frame opacity.
    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Set the legend line width.
    pub fn linewidth(mut self, width: f32) -> Self {
        self.linewidth = Some(width);
        self
    }
}

/// Options for colorbars.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorbarOptions {
    /// Artist to map; defaults to the most recent mappable.
    pub mappable: Option<ArtistId>,
    /// Fraction of the parent width to steal.
    pub fraction: Option<f32>,
    /// Place the colorbar in a divider-managed slot instead of stealing.
    pub use_axesgrid: Option<bool>,
    /// Gap between parent and colorbar, as a fraction of the parent width.
    pub pad: Option<f32>,
    /// Colorbar label.
    pub label: Option<String>,
}

/// X-axis limits; either side may be left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XLim {
    /// Left limit.
    pub left: Option<GpsInput>,
    /// Right limit.
    pub right: Option<GpsInput>,
}

/// Y-axis limits, with the same shape as [`XLim`].
pub type YLim = XLim;

impl XLim {
    /// Both limits.
    pub fn new(left: impl Into<GpsInput>, right: impl Into<GpsInput>) -> Self {
        Self {
            left: Some(left.into()),
            right: Some(right.into()),
        }
    }

    /// Only the left limit.
    pub fn left(left: impl Into<GpsInput>) -> Self {
        Self {
            left: Some(left.into()),
            right: None,
        }
    }

    /// Only the right limit.
    pub fn right(right: impl Into<GpsInput>) -> Self {
        Self {
            left: None,
            right: Some(right.into()),
        }
    }
}

impl<A, B> From<(A, B)> for XLim
where
    A: Into<GpsInput>,
    B: Into<GpsInput>,
{
    fn from((left, right): (A, B)) -> Self {
        Self::new(left, right)
    }
}

impl<T: Into<GpsInput>> From<[T; 2]> for XLim {
    fn from([left, right]: [T; 2]) -> Self {
        Self::new(left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_specs_parse() {
        let specs = ColorArg::Specs(vec!["1".into(), "0.5".into()]);
        assert_eq!(specs.as_numeric(), Some(vec![1.0, 0.5]));
        let mixed = ColorArg::Specs(vec!["1".into(), "red".into()]);
        assert_eq!(mixed.as_numeric(), None);
        assert_eq!(ColorArg::from("red").as_numeric(), None);
    }

    #[test]
    fn scatter_sorts_by_default() {
        assert!(ScatterOptions::default().c_sort);
    }

    #[test]
    fn xlim_from_pair_and_array() {
        let pair = XLim::from(("2015-09-14", 1126259472.0));
        assert_eq!(pair.left, Some(GpsInput::Text("2015-09-14".into())));
        assert_eq!(pair.right, Some(GpsInput::Number(1126259472.0)));
        let array = XLim::from([1.0, 2.0]);
        assert_eq!(array, XLim::new(1.0, 2.0));
        assert_eq!(XLim::right(5.0).left, None);
    }
}
