//! The base rectangular axes.
//!
//! [`Rectilinear`] owns the axis state and the artists, parses plot
//! arguments, autoscales, builds legends, and draws itself into a
//! [`RenderList`](crate::render::RenderList). [`AxesBackend`] is the
//! capability interface shared by the base axes and anything wrapping it.

mod args;
mod draw;

use log::{debug, warn};
use ndarray::Array2;

use crate::artist::{
    Artist, ArtistId, AxesImage, FillBetween, Legend, LegendEntry, LegendFrame, LegendHandle,
    Line2D, Origin, PathCollection, QuadMesh, ScatterColors,
};
use crate::axis::{Axis, AxisId, AxisScale};
use crate::colorbar::Colorbar;
use crate::colors::{Color, Norm, NormOptions};
use crate::config::{RcParams, rc_params};
use crate::error::{PlotError, Result};
use crate::figure::FigureKind;
use crate::geom::FigureRect;
use crate::options::{
    ColorArg, FillOptions, ImageOptions, ImageSource, LegendOptions, LineOptions, MeshArgs,
    MeshOptions, ScatterOptions, XLim, YLim,
};
use crate::render::{MarkerShape, MarkerStyle, Renderer};
use crate::style::Theme;
use crate::time::GpsInput;
use crate::view::{Range, Viewport};

pub use args::PlotArg;

/// Capabilities of a rectangular axes.
///
/// Provided methods are written in terms of the required ones, so a
/// wrapper only forwards the required methods it does not override.
pub trait AxesBackend {
    /// Position in figure fractions.
    fn position(&self) -> FigureRect;

    /// Move the axes.
    fn set_position(&mut self, rect: FigureRect);

    /// Kind of figure the axes belongs to.
    fn figure_kind(&self) -> FigureKind;

    /// Record the kind of figure the axes belongs to.
    fn set_figure_kind(&mut self, kind: FigureKind);

    /// Colors for non-data elements.
    fn theme(&self) -> &Theme;

    /// Replace the theme.
    fn set_theme(&mut self, theme: Theme);

    /// The X axis.
    fn xaxis(&self) -> &Axis;

    /// The X axis, mutably.
    fn xaxis_mut(&mut self) -> &mut Axis;

    /// The Y axis.
    fn yaxis(&self) -> &Axis;

    /// The Y axis, mutably.
    fn yaxis_mut(&mut self) -> &mut Axis;

    /// Title text.
    fn title(&self) -> Option<&str>;

    /// Set the title text.
    fn set_title(&mut self, title: &str);

    /// Current view limits: explicit limits, or autoscaled from the data.
    fn viewport(&self) -> Viewport;

    /// Set the X limits; unset sides keep their current value.
    fn set_xlim(&mut self, lim: XLim) -> Result<(f64, f64)>;

    /// Set the Y limits; unset sides keep their current value.
    fn set_ylim(&mut self, lim: YLim) -> Result<(f64, f64)>;

    /// Drop explicit limits on both axes.
    fn autoscale(&mut self);

    /// Plot lines from positional arguments.
    fn plot(&mut self, args: Vec<PlotArg>, options: LineOptions) -> Result<Vec<ArtistId>>;

    /// Fill the region between two curves.
    fn fill_between(
        &mut self,
        x: &[f64],
        y1: &[f64],
        y2: &[f64],
        options: FillOptions,
    ) -> Result<ArtistId>;

    /// Scatter markers, optionally colored per point.
    fn scatter(&mut self, x: &[f64], y: &[f64], options: ScatterOptions) -> Result<ArtistId>;

    /// Show a raster image; the view limits snap to its extent.
    fn imshow(&mut self, source: ImageSource, options: ImageOptions) -> Result<ArtistId>;

    /// Show a quadrilateral mesh.
    fn pcolormesh(&mut self, args: MeshArgs, options: MeshOptions) -> Result<ArtistId>;

    /// All artists in creation order.
    fn artists(&self) -> &[Artist];

    /// An artist, mutably.
    fn artist_mut(&mut self, id: ArtistId) -> Option<&mut Artist>;

    /// Build a legend from the labeled artists.
    fn legend(&mut self, options: LegendOptions) -> Option<&Legend>;

    /// The current legend.
    fn get_legend(&self) -> Option<&Legend>;

    /// The current legend, mutably.
    fn get_legend_mut(&mut self) -> Option<&mut Legend>;

    /// Attach a colorbar.
    fn add_colorbar(&mut self, colorbar: Colorbar);

    /// Attached colorbars.
    fn colorbars(&self) -> &[Colorbar];

    /// Text for an X coordinate readout.
    fn format_xdata(&self, x: f64) -> String;

    /// Text for a Y coordinate readout.
    fn format_ydata(&self, y: f64) -> String;

    /// Draw the axes onto a renderer.
    fn draw(&mut self, renderer: &mut dyn Renderer) -> Result<()>;

    /// An artist by handle.
    fn artist(&self, id: ArtistId) -> Option<&Artist> {
        self.artists().get(id.index())
    }

    /// The X scale.
    fn get_xscale(&self) -> AxisScale {
        self.xaxis().scale()
    }

    /// Set the X scale.
    fn set_xscale(&mut self, scale: AxisScale) {
        self.xaxis_mut().set_scale(scale);
    }

    /// The Y scale.
    fn get_yscale(&self) -> AxisScale {
        self.yaxis().scale()
    }

    /// Set the Y scale.
    fn set_yscale(&mut self, scale: AxisScale) {
        self.yaxis_mut().set_scale(scale);
    }

    /// Current X limits.
    fn get_xlim(&self) -> (f64, f64) {
        let range = self.viewport().x;
        (range.min, range.max)
    }

    /// Current Y limits.
    fn get_ylim(&self) -> (f64, f64) {
        let range = self.viewport().y;
        (range.min, range.max)
    }

    /// Set the X label text.
    fn set_xlabel(&mut self, text: &str) {
        self.xaxis_mut().set_label_text(text);
    }

    /// Set the Y label text.
    fn set_ylabel(&mut self, text: &str) {
        self.yaxis_mut().set_label_text(text);
    }

    /// Most recently added artist that maps values to colors.
    fn last_mappable(&self) -> Option<ArtistId> {
        self.artists()
            .iter()
            .rposition(|artist| artist.mappable().is_some())
            .map(ArtistId)
    }
}

/// In-memory rectangular axes.
#[derive(Debug, Clone)]
pub struct Rectilinear {
    position: FigureRect,
    figure_kind: FigureKind,
    theme: Theme,
    xaxis: Axis,
    yaxis: Axis,
    title: Option<String>,
    artists: Vec<Artist>,
    legend: Option<Legend>,
    colorbars: Vec<Colorbar>,
    cycle_index: usize,
}

impl Rectilinear {
    /// Create empty axes at a figure position.
    pub fn new(position: FigureRect) -> Self {
        Self {
            position,
            figure_kind: FigureKind::default(),
            theme: Theme::default(),
            xaxis: Axis::new(AxisId::X),
            yaxis: Axis::new(AxisId::Y),
            title: None,
            artists: Vec::new(),
            legend: None,
            colorbars: Vec::new(),
            cycle_index: 0,
        }
    }

    fn axis(&self, id: AxisId) -> &Axis {
        match id {
            AxisId::X => &self.xaxis,
            AxisId::Y => &self.yaxis,
        }
    }

    fn axis_mut(&mut self, id: AxisId) -> &mut Axis {
        match id {
            AxisId::X => &mut self.xaxis,
            AxisId::Y => &mut self.yaxis,
        }
    }

    fn next_color(&mut self, rc: &RcParams) -> Color {
        let color = rc.cycle_color(self.cycle_index);
        self.cycle_index += 1;
        color
    }

    fn push(&mut self, artist: Artist) -> ArtistId {
        self.artists.push(artist);
        ArtistId(self.artists.len() - 1)
    }

    /// Data limits of one axis: loose artists padded by the margin, tight
    /// artists (images, meshes) as-is.
    fn autoscale_range(&self, id: AxisId) -> Range {
        let rc = rc_params();
        let scale = self.axis(id).scale();
        let mut loose: Option<Range> = None;
        let mut tight: Option<Range> = None;
        for artist in &self.artists {
            let Some((x, y, is_tight)) = artist.data_limits() else {
                continue;
            };
            let range = match id {
                AxisId::X => x,
                AxisId::Y => y,
            };
            let slot = if is_tight { &mut tight } else { &mut loose };
            *slot = Some(match *slot {
                None => range,
                Some(existing) => Range::union(existing, range).unwrap_or(existing),
            });
        }
        let margin = match id {
            AxisId::X => rc.axes_xmargin,
            AxisId::Y => rc.axes_ymargin,
        };
        let loose = loose.map(|range| {
            let range = positive_for_log(range, scale);
            if scale.is_log() {
                range.padded_log(margin)
            } else {
                range.padded(margin, 0.0)
            }
        });
        let range = match (loose, tight) {
            (Some(loose), Some(tight)) => Range::union(loose, tight).unwrap_or(loose),
            (loose, tight) => loose.or(tight).unwrap_or(Range::new(0.0, 1.0)),
        };
        nonsingular(positive_for_log(range, scale), scale)
    }

    fn resolve_limit(&self, value: Option<&GpsInput>, current: f64) -> Result<f64> {
        let Some(value) = value else {
            return Ok(current);
        };
        let parsed = match value {
            GpsInput::Number(number) => Some(*number),
            GpsInput::Gps(gps) => Some(gps.as_f64()),
            GpsInput::Text(text) => text.trim().parse::<f64>().ok(),
            GpsInput::DateTime(_) => None,
        };
        parsed
            .filter(|limit| limit.is_finite())
            .ok_or_else(|| PlotError::InvalidLimit {
                value: limit_text(value),
            })
    }

    fn set_lim(
        &mut self,
        id: AxisId,
        left: Option<&GpsInput>,
        right: Option<&GpsInput>,
    ) -> Result<(f64, f64)> {
        let current = match id {
            AxisId::X => self.viewport().x,
            AxisId::Y => self.viewport().y,
        };
        let min = self.resolve_limit(left, current.min)?;
        let max = self.resolve_limit(right, current.max)?;
        let range = Range::new(min, max);
        self.axis_mut(id).set_limits(range);
        Ok((range.min, range.max))
    }

    fn image_norm(options: &NormOptions, data: impl IntoIterator<Item = f64>) -> Norm {
        let mut norm = Norm::from_options(options);
        norm.autoscale_none(data);
        norm
    }
}

impl Default for Rectilinear {
    fn default() -> Self {
        Self::new(FigureRect::default())
    }
}

impl AxesBackend for Rectilinear {
    fn position(&self) -> FigureRect {
        self.position
    }

    fn set_position(&mut self, rect: FigureRect) {
        self.position = rect;
    }

    fn figure_kind(&self) -> FigureKind {
        self.figure_kind
    }

    fn set_figure_kind(&mut self, kind: FigureKind) {
        self.figure_kind = kind;
    }

    fn theme(&self) -> &Theme {
        &self.theme
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn xaxis(&self) -> &Axis {
        &self.xaxis
    }

    fn xaxis_mut(&mut self) -> &mut Axis {
        &mut self.xaxis
    }

    fn yaxis(&self) -> &Axis {
        &self.yaxis
    }

    fn yaxis_mut(&mut self) -> &mut Axis {
        &mut self.yaxis
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_owned());
    }

    fn viewport(&self) -> Viewport {
        let x = self
            .xaxis
            .limits()
            .unwrap_or_else(|| self.autoscale_range(AxisId::X));
        let y = self
            .yaxis
            .limits()
            .unwrap_or_else(|| self.autoscale_range(AxisId::Y));
        Viewport::new(x, y)
    }

    fn set_xlim(&mut self, lim: XLim) -> Result<(f64, f64)> {
        self.set_lim(AxisId::X, lim.left.as_ref(), lim.right.as_ref())
    }

    fn set_ylim(&mut self, lim: YLim) -> Result<(f64, f64)> {
        self.set_lim(AxisId::Y, lim.left.as_ref(), lim.right.as_ref())
    }

    fn autoscale(&mut self) {
        self.xaxis.clear_limits();
        self.yaxis.clear_limits();
    }

    fn plot(&mut self, args: Vec<PlotArg>, options: LineOptions) -> Result<Vec<ArtistId>> {
        let rc = rc_params();
        let lines = args::parse_plot_args(args)?;
        let mut ids = Vec::with_capacity(lines.len());
        for line in lines {
            let color = match options.color.or(line.format.color) {
                Some(color) => color,
                None => self.next_color(&rc),
            };
            let marker = options.marker.or(line.format.marker);
            let dash = match options.linestyle {
                Some(dash) => Some(dash),
                None if options.marker.is_some() && line.format.linestyle.is_none() => None,
                None => line.format.dash(),
            };
            let artist = Line2D {
                label: options.label.clone().unwrap_or_default(),
                xdata: line.x,
                ydata: line.y,
                color,
                linewidth: options.linewidth.unwrap_or(rc.lines_linewidth),
                alpha: options.alpha,
                dash,
                marker,
                rasterized: options.rasterized.unwrap_or(false),
            };
            ids.push(self.push(Artist::Line(artist)));
        }
        Ok(ids)
    }

    fn fill_between(
        &mut self,
        x: &[f64],
        y1: &[f64],
        y2: &[f64],
        options: FillOptions,
    ) -> Result<ArtistId> {
        for (what, other) in [("fill_between y1", y1), ("fill_between y2", y2)] {
            if other.len() != x.len() {
                return Err(PlotError::LengthMismatch {
                    what,
                    expected: x.len(),
                    found: other.len(),
                });
            }
        }
        let rc = rc_params();
        let color = match options.color {
            Some(color) => color,
            None => self.next_color(&rc),
        };
        Ok(self.push(Artist::Fill(FillBetween {
            label: options.label.unwrap_or_default(),
            x: x.to_vec(),
            y1: y1.to_vec(),
            y2: y2.to_vec(),
            color,
            alpha: options.alpha,
            rasterized: options.rasterized.unwrap_or(false),
        })))
    }

    fn scatter(&mut self, x: &[f64], y: &[f64], options: ScatterOptions) -> Result<ArtistId> {
        if x.len() != y.len() {
            return Err(PlotError::LengthMismatch {
                what: "scatter x and y",
                expected: x.len(),
                found: y.len(),
            });
        }
        let rc = rc_params();
        if let Some(found) = options.c.as_ref().and_then(ColorArg::point_count) {
            if found != x.len() {
                return Err(PlotError::LengthMismatch {
                    what: "scatter colors",
                    expected: x.len(),
                    found,
                });
            }
        }
        let colors = match &options.c {
            None => ScatterColors::Uniform(self.next_color(&rc)),
            Some(ColorArg::Color(color)) => ScatterColors::Uniform(*color),
            Some(ColorArg::Spec(spec)) => ScatterColors::Uniform(spec.parse()?),
            Some(c) => match c.as_numeric() {
                Some(values) => {
                    let norm = Self::image_norm(&options.norm, values.iter().copied());
                    ScatterColors::Mapped {
                        values,
                        norm,
                        cmap: options.cmap.unwrap_or(rc.image_cmap),
                    }
                }
                None => {
                    let ColorArg::Specs(specs) = c else {
                        return Err(PlotError::InvalidPlotArgs("invalid scatter colors".to_owned()));
                    };
                    ScatterColors::PerPoint(
                        specs
                            .iter()
                            .map(|spec| spec.parse::<Color>())
                            .collect::<Result<Vec<_>>>()?,
                    )
                }
            },
        };
        Ok(self.push(Artist::Scatter(PathCollection {
            label: options.label.unwrap_or_default(),
            x: x.to_vec(),
            y: y.to_vec(),
            colors,
            size: options.size.unwrap_or(rc.scatter_size),
            marker: options.marker.unwrap_or(MarkerShape::Circle),
            alpha: options.alpha,
        })))
    }

    fn imshow(&mut self, source: ImageSource, options: ImageOptions) -> Result<ArtistId> {
        let rc = rc_params();
        let data = match source {
            ImageSource::Grid(grid) => grid,
            ImageSource::Array(array) => array.values().to_owned(),
        };
        let (rows, cols) = data.dim();
        if rows == 0 || cols == 0 {
            return Err(PlotError::InvalidPlotArgs("cannot show an empty image".to_owned()));
        }
        let origin = options.origin.unwrap_or(rc.image_origin);
        let extent = options.extent.unwrap_or_else(|| {
            let (width, height) = (cols as f64 - 0.5, rows as f64 - 0.5);
            match origin {
                Origin::Upper => [-0.5, width, height, -0.5],
                Origin::Lower => [-0.5, width, -0.5, height],
            }
        });
        let norm = Self::image_norm(&options.norm, data.iter().copied());
        let [left, right, bottom, top] = extent;
        self.xaxis.set_limits(Range::new(left, right));
        self.yaxis.set_limits(Range::new(bottom, top));
        Ok(self.push(Artist::Image(AxesImage {
            data,
            extent,
            origin,
            interpolation: options.interpolation.unwrap_or(rc.image_interpolation),
            aspect: options.aspect.unwrap_or(rc.image_aspect),
            norm,
            cmap: options.cmap.unwrap_or(rc.image_cmap),
        })))
    }

    fn pcolormesh(&mut self, args: MeshArgs, options: MeshOptions) -> Result<ArtistId> {
        let rc = rc_params();
        let (x, y, c) = match args {
            MeshArgs::C(c) => integer_grid(c),
            MeshArgs::Array(array) => integer_grid(array.values().to_owned()),
            MeshArgs::Xyc { x, y, c } => {
                let (rows, cols) = c.dim();
                let shape = (rows + 1, cols + 1);
                (broadcast_corners(x, shape)?, broadcast_corners(y, shape)?, c)
            }
        };
        let norm = Self::image_norm(&options.norm, c.iter().copied());
        Ok(self.push(Artist::Mesh(QuadMesh {
            x,
            y,
            c,
            norm,
            cmap: options.cmap.unwrap_or(rc.image_cmap),
        })))
    }

    fn artists(&self) -> &[Artist] {
        &self.artists
    }

    fn artist_mut(&mut self, id: ArtistId) -> Option<&mut Artist> {
        self.artists.get_mut(id.index())
    }

    fn legend(&mut self, options: LegendOptions) -> Option<&Legend> {
        let rc = rc_params();
        let entries: Vec<LegendEntry> = self
            .artists
            .iter()
            .filter_map(|artist| {
                let label = artist.label()?;
                if label.is_empty() || label.starts_with('_') {
                    return None;
                }
                let handle = match artist {
                    Artist::Line(line) => match line.dash() {
                        Some(_) => LegendHandle::Line(line.stroke()),
                        None => LegendHandle::Marker(MarkerStyle {
                            color: line.stroke().color,
                            size: rc.scatter_size,
                            shape: line.marker().unwrap_or_default(),
                        }),
                    },
                    Artist::Fill(fill) => {
                        LegendHandle::Patch(fill.color().with_alpha(fill.alpha().unwrap_or(1.0)))
                    }
                    Artist::Scatter(scatter) => LegendHandle::Marker(scatter.marker_style()),
                    Artist::Image(_) | Artist::Mesh(_) => return None,
                };
                Some(LegendEntry {
                    label: label.to_owned(),
                    handle,
                })
            })
            .collect();
        if entries.is_empty() {
            warn!(
                "no artists with labels found to put in legend; artists whose label starts \
                 with an underscore are ignored"
            );
            self.legend = None;
            return None;
        }
        self.legend = Some(Legend {
            entries,
            frame: LegendFrame {
                alpha: options.alpha.unwrap_or(rc.legend_framealpha),
                linewidth: 1.0,
                face: self.theme.legend_bg,
                edge: self.theme.legend_border,
            },
            loc: options.loc.unwrap_or_default(),
            title: options.title,
        });
        self.legend.as_ref()
    }

    fn get_legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    fn get_legend_mut(&mut self) -> Option<&mut Legend> {
        self.legend.as_mut()
    }

    fn add_colorbar(&mut self, colorbar: Colorbar) {
        self.colorbars.push(colorbar);
    }

    fn colorbars(&self) -> &[Colorbar] {
        &self.colorbars
    }

    fn format_xdata(&self, x: f64) -> String {
        self.xaxis.formatter().format(x)
    }

    fn format_ydata(&self, y: f64) -> String {
        self.yaxis.formatter().format(y)
    }

    fn draw(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        let list = draw::build_render_list(self, renderer.bounds());
        debug!("drawing axes with {} render commands", list.commands().len());
        renderer.render(&list)
    }
}

fn limit_text(value: &GpsInput) -> String {
    match value {
        GpsInput::Number(number) => number.to_string(),
        GpsInput::Gps(gps) => gps.to_string(),
        GpsInput::DateTime(time) => time.to_rfc3339(),
        GpsInput::Text(text) => text.clone(),
    }
}

fn positive_for_log(range: Range, scale: AxisScale) -> Range {
    if !scale.is_log() || range.min > 0.0 {
        return range;
    }
    if range.max <= 0.0 {
        return Range::new(1.0, 10.0);
    }
    Range::new(range.max * 1e-3, range.max)
}

fn nonsingular(range: Range, scale: AxisScale) -> Range {
    if range.span() > 0.0 {
        return range;
    }
    let value = range.min;
    if scale.is_log() {
        return Range::new(value / 10.0, value * 10.0);
    }
    let half = if value == 0.0 { 0.05 } else { value.abs() * 0.05 };
    Range::new(value - half, value + half)
}

fn integer_grid(c: Array2<f64>) -> (Array2<f64>, Array2<f64>, Array2<f64>) {
    let (rows, cols) = c.dim();
    let x = Array2::from_shape_fn((rows + 1, cols + 1), |(_, col)| col as f64);
    let y = Array2::from_shape_fn((rows + 1, cols + 1), |(row, _)| row as f64);
    (x, y, c)
}

fn broadcast_corners(coords: Array2<f64>, shape: (usize, usize)) -> Result<Array2<f64>> {
    if coords.dim() == shape {
        return Ok(coords);
    }
    let (rows, cols) = coords.dim();
    coords
        .broadcast(shape)
        .map(|view| view.to_owned())
        .ok_or(PlotError::ShapeMismatch {
            rows,
            cols,
            expected_rows: shape.0,
            expected_cols: shape.1,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gps::GpsScale;
    use crate::render::RecordingRenderer;
    use ndarray::array;

    fn line_axes() -> Rectilinear {
        let mut axes = Rectilinear::default();
        axes.plot(crate::plot_args![vec![0.0, 10.0], vec![0.0, 1.0]], LineOptions::default())
            .unwrap();
        axes
    }

    #[test]
    fn autoscale_adds_margins() {
        let axes = line_axes();
        let (left, right) = axes.get_xlim();
        assert!((left + 0.5).abs() < 1e-9);
        assert!((right - 10.5).abs() < 1e-9);
    }

    #[test]
    fn empty_axes_default_to_unit_view() {
        let axes = Rectilinear::default();
        assert_eq!(axes.get_xlim(), (0.0, 1.0));
    }

    #[test]
    fn color_cycle_advances_only_for_implicit_colors() {
        let mut axes = Rectilinear::default();
        let ids = axes
            .plot(
                crate::plot_args![vec![1.0], vec![2.0], "r", vec![3.0], vec![4.0]],
                LineOptions::default(),
            )
            .unwrap();
        let first = axes.artist(ids[0]).and_then(Artist::as_line).unwrap();
        let second = axes.artist(ids[1]).and_then(Artist::as_line).unwrap();
        assert_eq!(first.color(), Color::parse("r").unwrap());
        assert_eq!(second.color(), rc_params().cycle_color(0));
    }

    #[test]
    fn set_xlim_parses_numeric_strings() {
        let mut axes = line_axes();
        assert_eq!(axes.set_xlim(XLim::new("2", 8.0)).unwrap(), (2.0, 8.0));
        assert_eq!(axes.set_xlim(XLim::left(4.0)).unwrap(), (4.0, 8.0));
        let err = axes.set_xlim(XLim::new("Sep 14 2015", 8.0)).unwrap_err();
        assert!(matches!(err, PlotError::InvalidLimit { .. }));
        axes.autoscale();
        assert!(axes.xaxis().is_autoscale());
    }

    #[test]
    fn imshow_fixes_limits_to_extent() {
        let mut axes = Rectilinear::default();
        axes.imshow(ImageSource::Grid(Array2::zeros((2, 4))), ImageOptions::default())
            .unwrap();
        assert_eq!(axes.get_xlim(), (-0.5, 3.5));
        assert_eq!(axes.get_ylim(), (-0.5, 1.5));
    }

    #[test]
    fn pcolormesh_broadcasts_sparse_edges() {
        let mut axes = Rectilinear::default();
        let x = array![[0.0, 1.0, 2.0]];
        let y = array![[10.0], [20.0], [30.0], [40.0]];
        let c = Array2::from_elem((3, 2), 1.0);
        let id = axes
            .pcolormesh(MeshArgs::Xyc { x, y, c }, MeshOptions::default())
            .unwrap();
        let mesh = axes.artist(id).and_then(Artist::as_mesh).unwrap();
        assert_eq!(mesh.x().dim(), (4, 3));
        assert_eq!(mesh.y()[[3, 2]], 40.0);
        assert_eq!(axes.get_ylim(), (10.0, 40.0));
    }

    #[test]
    fn pcolormesh_rejects_bad_edges() {
        let mut axes = Rectilinear::default();
        let err = axes
            .pcolormesh(
                MeshArgs::Xyc {
                    x: array![[0.0, 1.0]],
                    y: array![[0.0], [1.0]],
                    c: Array2::zeros((1, 3)),
                },
                MeshOptions::default(),
            )
            .unwrap_err();
        assert!(matches!(err, PlotError::ShapeMismatch { .. }));
    }

    #[test]
    fn legend_skips_unlabeled_artists() {
        let mut axes = line_axes();
        assert!(axes.legend(LegendOptions::default()).is_none());
        axes.plot(
            crate::plot_args![vec![0.0, 1.0]],
            LineOptions::default().label("_hidden"),
        )
        .unwrap();
        assert!(axes.legend(LegendOptions::default()).is_none());
        axes.plot(crate::plot_args![vec![0.0, 1.0]], LineOptions::default().label("h(t)"))
            .unwrap();
        let legend = axes.legend(LegendOptions::default()).unwrap();
        assert_eq!(legend.entries().len(), 1);
        assert_eq!(legend.frame().alpha, rc_params().legend_framealpha);
    }

    #[test]
    fn scatter_literal_and_numeric_colors() {
        let mut axes = Rectilinear::default();
        let literal = axes
            .scatter(
                &[0.0, 1.0],
                &[0.0, 1.0],
                ScatterOptions::default().c(ColorArg::Specs(vec!["red".into(), "blue".into()])),
            )
            .unwrap();
        assert!(matches!(
            axes.artist(literal).and_then(Artist::as_scatter).map(PathCollection::colors),
            Some(ScatterColors::PerPoint(_))
        ));
        let mapped = axes
            .scatter(&[0.0, 1.0], &[0.0, 1.0], ScatterOptions::default().c(vec![3.0, 1.0]))
            .unwrap();
        assert_eq!(axes.last_mappable(), Some(mapped));
        let err = axes
            .scatter(&[0.0], &[0.0], ScatterOptions::default().c(vec![1.0, 2.0]))
            .unwrap_err();
        assert!(matches!(err, PlotError::LengthMismatch { .. }));
    }

    #[test]
    fn gps_axis_draws_offset_ticks() {
        let mut axes = Rectilinear::default();
        axes.set_xscale(AxisScale::Gps(GpsScale::auto()));
        axes.plot(
            crate::plot_args![vec![1126259462.0, 1126259472.0], vec![0.0, 1.0]],
            LineOptions::default(),
        )
        .unwrap();
        axes.set_xlim(XLim::new(1126259462.0, 1126259472.0)).unwrap();
        let mut renderer = RecordingRenderer::default();
        axes.draw(&mut renderer).unwrap();
        assert!(renderer.texts().any(|text| text == "2"));
        assert!(!renderer.texts().any(|text| text.starts_with("Time")));
    }

    #[test]
    fn format_data_uses_axis_formatter() {
        let axes = Rectilinear::default();
        assert_eq!(axes.format_xdata(1.5), "1.5");
        assert_eq!(axes.format_ydata(0.0), "0");
    }

    #[test]
    fn single_point_view_is_nonsingular() {
        let mut axes = Rectilinear::default();
        axes.plot(crate::plot_args![vec![2.0]], LineOptions::default()).unwrap();
        let (bottom, top) = axes.get_ylim();
        assert!(bottom < 2.0 && top > 2.0);
    }
}
