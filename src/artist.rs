//! Drawn artifacts owned by an axes: lines, fills, scatter collections,
//! images, meshes, and the legend.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::colors::{Color, Colormap, Norm};
use crate::render::{LineDash, LineStyle, MarkerShape, MarkerStyle};
use crate::view::Range;

/// Handle to an artist, valid for the axes that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArtistId(pub(crate) usize);

impl ArtistId {
    /// Creation index of the artist within its axes.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Image row ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Row 0 at the top.
    #[default]
    Upper,
    /// Row 0 at the bottom.
    Lower,
}

/// Image aspect handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aspect {
    /// Fill the axes.
    Auto,
    /// Square pixels.
    #[default]
    Equal,
}

/// Image resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Draw cells as-is.
    None,
    /// Nearest neighbour.
    Nearest,
    /// Bilinear.
    Bilinear,
    /// Backend default anti-aliasing.
    #[default]
    Antialiased,
}

/// A polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Line2D {
    pub(crate) label: String,
    pub(crate) xdata: Vec<f64>,
    pub(crate) ydata: Vec<f64>,
    pub(crate) color: Color,
    pub(crate) linewidth: f32,
    pub(crate) alpha: Option<f32>,
    pub(crate) dash: Option<LineDash>,
    pub(crate) marker: Option<MarkerShape>,
    pub(crate) rasterized: bool,
}

impl Line2D {
    /// Legend label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// X coordinates.
    pub fn xdata(&self) -> &[f64] {
        &self.xdata
    }

    /// Y coordinates.
    pub fn ydata(&self) -> &[f64] {
        &self.ydata
    }

    /// Line color (without alpha applied).
    pub fn color(&self) -> Color {
        self.color
    }

    /// Line width in pixels.
    pub fn linewidth(&self) -> f32 {
        self.linewidth
    }

    /// Set the line width.
    pub fn set_linewidth(&mut self, width: f32) {
        self.linewidth = width;
    }

    /// Opacity, if set.
    pub fn alpha(&self) -> Option<f32> {
        self.alpha
    }

    /// Dash pattern; `None` draws markers only.
    pub fn dash(&self) -> Option<LineDash> {
        self.dash
    }

    /// Marker drawn at each vertex.
    pub fn marker(&self) -> Option<MarkerShape> {
        self.marker
    }

    /// Whether the line is rasterized by vector backends.
    pub fn is_rasterized(&self) -> bool {
        self.rasterized
    }

    pub(crate) fn stroke(&self) -> LineStyle {
        LineStyle {
            color: self.color.with_alpha(self.alpha.unwrap_or(1.0)),
            width: self.linewidth,
            dash: self.dash.unwrap_or_default(),
        }
    }
}

/// Region between two curves sharing an X array.
#[derive(Debug, Clone, PartialEq)]
pub struct FillBetween {
    pub(crate) label: String,
    pub(crate) x: Vec<f64>,
    pub(crate) y1: Vec<f64>,
    pub(crate) y2: Vec<f64>,
    pub(crate) color: Color,
    pub(crate) alpha: Option<f32>,
    pub(crate) rasterized: bool,
}

impl FillBetween {
    /// Legend label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Shared X coordinates.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// First boundary.
    pub fn y1(&self) -> &[f64] {
        &self.y1
    }

    /// Second boundary.
    pub fn y2(&self) -> &[f64] {
        &self.y2
    }

    /// Fill color (without alpha applied).
    pub fn color(&self) -> Color {
        self.color
    }

    /// Opacity, if set.
    pub fn alpha(&self) -> Option<f32> {
        self.alpha
    }

    /// Whether the fill is rasterized by vector backends.
    pub fn is_rasterized(&self) -> bool {
        self.rasterized
    }
}

/// Colors of a scatter collection.
#[derive(Debug, Clone, PartialEq)]
pub enum ScatterColors {
    /// One color for all points.
    Uniform(Color),
    /// One literal color per point.
    PerPoint(Vec<Color>),
    /// Values mapped through a norm and colormap.
    Mapped {
        /// One value per point.
        values: Vec<f64>,
        /// Normalization, limits filled from `values`.
        norm: Norm,
        /// Colormap.
        cmap: Colormap,
    },
}

/// Scatter plot markers.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCollection {
    pub(crate) label: String,
    pub(crate) x: Vec<f64>,
    pub(crate) y: Vec<f64>,
    pub(crate) colors: ScatterColors,
    pub(crate) size: f32,
    pub(crate) marker: MarkerShape,
    pub(crate) alpha: Option<f32>,
}

impl PathCollection {
    /// Legend label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// X coordinates, in drawing order.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Y coordinates, in drawing order.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Point colors.
    pub fn colors(&self) -> &ScatterColors {
        &self.colors
    }

    /// Mapped color values, if the colors are mapped.
    pub fn color_values(&self) -> Option<&[f64]> {
        match &self.colors {
            ScatterColors::Mapped { values, .. } => Some(values),
            _ => None,
        }
    }

    /// Marker size in pixels.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Marker shape.
    pub fn marker(&self) -> MarkerShape {
        self.marker
    }

    pub(crate) fn marker_style(&self) -> MarkerStyle {
        let color = match &self.colors {
            ScatterColors::Uniform(color) => *color,
            _ => Color::BLACK,
        };
        MarkerStyle {
            color: color.with_alpha(self.alpha.unwrap_or(1.0)),
            size: self.size,
            shape: self.marker,
        }
    }

    pub(crate) fn point_colors(&self) -> Option<Vec<Color>> {
        let alpha = self.alpha.unwrap_or(1.0);
        match &self.colors {
            ScatterColors::Uniform(_) => None,
            ScatterColors::PerPoint(colors) => {
                Some(colors.iter().map(|color| color.with_alpha(alpha)).collect())
            }
            ScatterColors::Mapped { values, norm, cmap } => Some(
                values
                    .iter()
                    .map(|value| match norm.normalize(*value) {
                        Some(scaled) => cmap.map(scaled).with_alpha(alpha),
                        None => Color::TRANSPARENT,
                    })
                    .collect(),
            ),
        }
    }
}

/// A raster image placed on a data-space extent.
#[derive(Debug, Clone, PartialEq)]
pub struct AxesImage {
    pub(crate) data: Array2<f64>,
    pub(crate) extent: [f64; 4],
    pub(crate) origin: Origin,
    pub(crate) interpolation: Interpolation,
    pub(crate) aspect: Aspect,
    pub(crate) norm: Norm,
    pub(crate) cmap: Colormap,
}

impl AxesImage {
    /// Pixel values shaped `(rows, cols)`.
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// `[left, right, bottom, top]` in data coordinates.
    pub fn extent(&self) -> [f64; 4] {
        self.extent
    }

    /// Row ordering.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Resampling mode.
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Aspect handling.
    pub fn aspect(&self) -> Aspect {
        self.aspect
    }

    /// Color normalization.
    pub fn norm(&self) -> Norm {
        self.norm
    }

    /// Colormap.
    pub fn cmap(&self) -> Colormap {
        self.cmap
    }
}

/// Quadrilateral mesh with one color value per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadMesh {
    pub(crate) x: Array2<f64>,
    pub(crate) y: Array2<f64>,
    pub(crate) c: Array2<f64>,
    pub(crate) norm: Norm,
    pub(crate) cmap: Colormap,
}

impl QuadMesh {
    /// Cell corner X coordinates shaped `(rows + 1, cols + 1)`.
    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    /// Cell corner Y coordinates shaped `(rows + 1, cols + 1)`.
    pub fn y(&self) -> &Array2<f64> {
        &self.y
    }

    /// Cell values shaped `(rows, cols)`.
    pub fn c(&self) -> &Array2<f64> {
        &self.c
    }

    /// Color normalization.
    pub fn norm(&self) -> Norm {
        self.norm
    }

    /// Colormap.
    pub fn cmap(&self) -> Colormap {
        self.cmap
    }
}

/// Any artist stored in an axes.
#[derive(Debug, Clone, PartialEq)]
pub enum Artist {
    /// Line plot.
    Line(Line2D),
    /// Filled band.
    Fill(FillBetween),
    /// Scatter markers.
    Scatter(PathCollection),
    /// Raster image.
    Image(AxesImage),
    /// Quadrilateral mesh.
    Mesh(QuadMesh),
}

impl Artist {
    /// Legend label, if the artist kind carries one.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Line(line) => Some(line.label()),
            Self::Fill(fill) => Some(fill.label()),
            Self::Scatter(scatter) => Some(scatter.label()),
            Self::Image(_) | Self::Mesh(_) => None,
        }
    }

    /// The line, if this is one.
    pub fn as_line(&self) -> Option<&Line2D> {
        match self {
            Self::Line(line) => Some(line),
            _ => None,
        }
    }

    /// The fill, if this is one.
    pub fn as_fill(&self) -> Option<&FillBetween> {
        match self {
            Self::Fill(fill) => Some(fill),
            _ => None,
        }
    }

    /// The scatter collection, if this is one.
    pub fn as_scatter(&self) -> Option<&PathCollection> {
        match self {
            Self::Scatter(scatter) => Some(scatter),
            _ => None,
        }
    }

    /// The image, if this is one.
    pub fn as_image(&self) -> Option<&AxesImage> {
        match self {
            Self::Image(image) => Some(image),
            _ => None,
        }
    }

    /// The mesh, if this is one.
    pub fn as_mesh(&self) -> Option<&QuadMesh> {
        match self {
            Self::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// Norm and colormap, for artists that map values to colors.
    pub fn mappable(&self) -> Option<(Norm, Colormap)> {
        match self {
            Self::Image(image) => Some((image.norm, image.cmap)),
            Self::Mesh(mesh) => Some((mesh.norm, mesh.cmap)),
            Self::Scatter(PathCollection {
                colors: ScatterColors::Mapped { norm, cmap, .. },
                ..
            }) => Some((*norm, *cmap)),
            _ => None,
        }
    }

    /// Data bounds and whether they should be used without margins.
    pub(crate) fn data_limits(&self) -> Option<(Range, Range, bool)> {
        match self {
            Self::Line(line) => Some((
                Range::from_values(line.xdata.iter().copied())?,
                Range::from_values(line.ydata.iter().copied())?,
                false,
            )),
            Self::Fill(fill) => Some((
                Range::from_values(fill.x.iter().copied())?,
                Range::from_values(fill.y1.iter().chain(&fill.y2).copied())?,
                false,
            )),
            Self::Scatter(scatter) => Some((
                Range::from_values(scatter.x.iter().copied())?,
                Range::from_values(scatter.y.iter().copied())?,
                false,
            )),
            Self::Image(image) => {
                let [left, right, bottom, top] = image.extent;
                Some((Range::new(left, right), Range::new(bottom, top), true))
            }
            Self::Mesh(mesh) => Some((
                Range::from_values(mesh.x.iter().copied())?,
                Range::from_values(mesh.y.iter().copied())?,
                true,
            )),
        }
    }
}

/// Sample drawn next to a legend label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LegendHandle {
    /// Line sample.
    Line(LineStyle),
    /// Filled patch.
    Patch(Color),
    /// Marker sample.
    Marker(MarkerStyle),
}

/// One legend row.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Label text.
    pub label: String,
    /// Sample.
    pub handle: LegendHandle,
}

/// Legend placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendLoc {
    /// Top right corner.
    #[default]
    UpperRight,
    /// Top left corner.
    UpperLeft,
    /// Bottom left corner.
    LowerLeft,
    /// Bottom right corner.
    LowerRight,
}

/// Legend frame styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendFrame {
    /// Frame opacity.
    pub alpha: f32,
    /// Border width.
    pub linewidth: f32,
    /// Background color.
    pub face: Color,
    /// Border color.
    pub edge: Color,
}

/// Legend attached to an axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub(crate) entries: Vec<LegendEntry>,
    pub(crate) frame: LegendFrame,
    pub(crate) loc: LegendLoc,
    pub(crate) title: Option<String>,
}

impl Legend {
    /// Legend rows.
    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    /// Frame styling.
    pub fn frame(&self) -> &LegendFrame {
        &self.frame
    }

    /// Frame styling, mutably.
    pub fn frame_mut(&mut self) -> &mut LegendFrame {
        &mut self.frame
    }

    /// Placement.
    pub fn loc(&self) -> LegendLoc {
        self.loc
    }

    /// Title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Line samples.
    pub fn lines(&self) -> impl Iterator<Item = &LineStyle> {
        self.entries.iter().filter_map(|entry| match &entry.handle {
            LegendHandle::Line(style) => Some(style),
            _ => None,
        })
    }

    /// Line samples, mutably.
    pub fn lines_mut(&mut self) -> impl Iterator<Item = &mut LineStyle> {
        self.entries
            .iter_mut()
            .filter_map(|entry| match &mut entry.handle {
                LegendHandle::Line(style) => Some(style),
                _ => None,
            })
    }
}
