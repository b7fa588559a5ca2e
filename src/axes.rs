//! Axes with GPS time support and series-aware plotting.
//!
//! [`Axes`] wraps a base axes and implements the same [`AxesBackend`]
//! interface. It overrides drawing (GPS axis labels), X limits (date
//! parsing), line plots (series unwrapping), legends, scatter plots (color
//! sorting), images and meshes (2-D arrays), and coordinate readouts. The
//! remaining methods are forwarded unchanged.

use log::debug;
use ndarray::Array2;

use crate::artist::{Artist, ArtistId, Aspect, Interpolation, Legend, Origin};
use crate::axis::{Axis, AxisId, AxisScale};
use crate::colorbar::{Colorbar, ColorbarPlacement, place_colorbar};
use crate::colors::format_norm;
use crate::config::rc_params;
use crate::error::{PlotError, Result};
use crate::figure::FigureKind;
use crate::geom::FigureRect;
use crate::gps::is_gps_scale;
use crate::options::{
    ColorArg, ColorbarOptions, FillOptions, ImageOptions, ImageSource, LegendOptions, LineOptions,
    MeshArgs, MeshOptions, ScatterOptions, XLim, YLim,
};
use crate::plot_args::PlotArgsProcessor;
use crate::rectilinear::{AxesBackend, PlotArg, Rectilinear};
use crate::render::Renderer;
use crate::style::Theme;
use crate::time::{GpsInput, LigoTimeGps, format_utc, to_gps};
use crate::types::{Array2D, Series};
use crate::view::Viewport;

/// Default legend frame opacity.
pub const LEGEND_ALPHA: f32 = 0.8;
/// Default width of legend line samples.
pub const LEGEND_LINEWIDTH: f32 = 8.0;
/// Default opacity of the band drawn by [`Axes::plot_mmm`].
pub const MMM_ALPHA: f32 = 0.1;

/// Extended axes wrapping a base axes `B`.
#[derive(Debug, Clone)]
pub struct Axes<B = Rectilinear> {
    base: B,
    args: PlotArgsProcessor,
}

impl Default for Axes<Rectilinear> {
    fn default() -> Self {
        Self::new(Rectilinear::default())
    }
}

impl Axes<Rectilinear> {
    /// Extended axes over a fresh base axes at `position`.
    pub fn at(position: FigureRect) -> Self {
        Self::new(Rectilinear::new(position))
    }
}

impl<B: AxesBackend> Axes<B> {
    /// Wrap a base axes.
    pub fn new(base: B) -> Self {
        Self {
            base,
            args: PlotArgsProcessor,
        }
    }

    /// The wrapped base axes.
    pub fn base(&self) -> &B {
        &self.base
    }

    /// The wrapped base axes, mutably.
    pub fn base_mut(&mut self) -> &mut B {
        &mut self.base
    }

    /// Unwrap into the base axes.
    pub fn into_inner(self) -> B {
        self.base
    }

    /// GPS readout of an X coordinate, or `None` if the X scale is not GPS.
    pub fn fmt_xdata(&self, x: f64) -> Option<String> {
        gps_readout(self.base.get_xscale(), x)
    }

    /// GPS readout of a Y coordinate, or `None` if the Y scale is not GPS.
    pub fn fmt_ydata(&self, y: f64) -> Option<String> {
        gps_readout(self.base.get_yscale(), y)
    }

    /// Fix the epoch of the current GPS X scale.
    ///
    /// Accepts anything [`to_gps`] understands.
    pub fn set_epoch(&mut self, epoch: impl Into<GpsInput>) -> Result<()> {
        let scale = self.base.get_xscale();
        let AxisScale::Gps(gps) = scale else {
            return Err(PlotError::NotGpsScale {
                axis: AxisId::X.name(),
                scale: scale.name().to_owned(),
            });
        };
        let epoch = to_gps(epoch)?.as_f64();
        debug!("setting {} epoch to {epoch}", scale.name());
        self.base.set_xscale(AxisScale::Gps(gps.epoch(Some(epoch))));
        Ok(())
    }

    /// Epoch of the current GPS X scale, resolved against the view.
    pub fn get_epoch(&self) -> Result<f64> {
        let view = self.base.viewport().x;
        Ok(self.base.xaxis().gps_transform(view)?.epoch())
    }

    /// Plot a series with a shaded band between optional lower and upper
    /// bounds.
    ///
    /// Returns the data line, the lower and upper lines when given, and the
    /// band, in that order. `options.alpha` sets the band opacity (default
    /// 0.1); the bound lines use twice that and half the data line width.
    pub fn plot_mmm(
        &mut self,
        data: &Series,
        lower: Option<&Series>,
        upper: Option<&Series>,
        mut options: LineOptions,
    ) -> Result<Vec<ArtistId>> {
        let alpha = options.alpha.take().unwrap_or(MMM_ALPHA);
        let primary = self.plot(vec![PlotArg::from(data)], options.clone())?;
        let line = primary
            .first()
            .and_then(|id| self.base.artist(*id))
            .and_then(Artist::as_line)
            .ok_or_else(|| PlotError::InvalidPlotArgs("no line drawn for data".to_owned()))?;
        let (color, width) = (line.color(), line.linewidth());

        let bounds = LineOptions {
            label: Some(String::new()),
            linewidth: Some(width / 2.0),
            color: Some(color),
            alpha: Some(alpha * 2.0),
            ..options.clone()
        };
        let mut artists = primary;
        let mut fill_lower = data.values();
        let mut fill_upper = data.values();
        if let Some(lower) = lower {
            artists.extend(self.plot(vec![PlotArg::from(lower)], bounds.clone())?);
            fill_lower = lower.values();
        }
        if let Some(upper) = upper {
            artists.extend(self.plot(vec![PlotArg::from(upper)], bounds)?);
            fill_upper = upper.values();
        }
        artists.push(self.base.fill_between(
            data.index(),
            fill_lower,
            fill_upper,
            FillOptions {
                label: None,
                color: Some(color),
                alpha: Some(alpha),
                rasterized: Some(options.rasterized.unwrap_or(true)),
            },
        )?);
        Ok(artists)
    }

    /// Attach a colorbar for `options.mappable`, or for the most recent
    /// image, mesh or color-mapped scatter plot.
    ///
    /// By default the colorbar goes in a divider slot beside the axes.
    /// Passing `use_axesgrid: Some(false)` steals `fraction` (default
    /// `rc.colorbar_fraction`) of the axes width instead.
    pub fn colorbar(&mut self, options: ColorbarOptions) -> Result<&Colorbar> {
        let rc = rc_params();
        let mut use_axesgrid = options.use_axesgrid;
        let mut fraction = options.fraction;
        if use_axesgrid.unwrap_or(true) {
            fraction.get_or_insert(0.0);
        }
        if fraction.unwrap_or(0.0) == 0.0 {
            use_axesgrid.get_or_insert(true);
        }
        let use_axesgrid = use_axesgrid.unwrap_or(false);

        let mappable = match options.mappable {
            Some(id) => id,
            None => self.base.last_mappable().ok_or(PlotError::NoMappable)?,
        };
        let (norm, cmap) = self
            .base
            .artist(mappable)
            .and_then(Artist::mappable)
            .ok_or(PlotError::NotMappable(mappable.index()))?;

        let placement = if use_axesgrid {
            ColorbarPlacement::AxesGrid {
                size: rc.colorbar_axesgrid_size,
                pad: options.pad.unwrap_or(rc.colorbar_axesgrid_pad),
            }
        } else {
            ColorbarPlacement::Steal {
                fraction: fraction.unwrap_or(rc.colorbar_fraction),
                pad: options.pad.unwrap_or(rc.colorbar_pad),
            }
        };
        let (parent, rect) = place_colorbar(self.base.position(), placement);
        self.base.set_position(parent);

        let mut colorbar = Colorbar::new(rect, mappable, norm, cmap);
        colorbar.fraction = match placement {
            ColorbarPlacement::Steal { fraction, .. } => fraction,
            ColorbarPlacement::AxesGrid { .. } => fraction.unwrap_or(0.0),
        };
        colorbar.use_axesgrid = use_axesgrid && self.base.figure_kind() != FigureKind::Plot;
        colorbar.label = options.label;
        self.base.add_colorbar(colorbar);
        self.base.colorbars().last().ok_or(PlotError::NoMappable)
    }

    fn imshow_array2d(&mut self, array: Array2D, mut options: ImageOptions) -> Result<ArtistId> {
        let (x0, x1) = array.xspan();
        let (y0, y1) = array.yspan();
        let mut extent = [x0, x1, y0, y1];
        if self.base.get_xscale().is_log() && extent[0] == 0.0 {
            extent[0] = 1e-300;
        }
        if self.base.get_yscale().is_log() && extent[2] == 0.0 {
            extent[2] = 1e-300;
        }
        options.extent.get_or_insert(extent);
        options.origin.get_or_insert(Origin::Lower);
        options.interpolation.get_or_insert(Interpolation::None);
        options.aspect.get_or_insert(Aspect::Auto);
        self.imshow(ImageSource::Grid(array.values().t().to_owned()), options)
    }
}

fn gps_readout(scale: AxisScale, value: f64) -> Option<String> {
    if !is_gps_scale(scale.name()) {
        return None;
    }
    LigoTimeGps::from_f64(value).map(|gps| gps.to_string())
}

/// Shortest float text that keeps a `.0` on whole numbers and writes
/// exponents signed with at least two digits: `1126259462.0`, `1e+16`,
/// `1.5e-05`.
fn float_repr(value: f64) -> String {
    let text = format!("{value:?}");
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    match exponent.parse::<i32>() {
        Ok(exponent) => {
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
        }
        Err(_) => text,
    }
}

fn axis_mut<B: AxesBackend>(base: &mut B, id: AxisId) -> &mut Axis {
    match id {
        AxisId::X => base.xaxis_mut(),
        AxisId::Y => base.yaxis_mut(),
    }
}

/// Sparse corner mesh for a 2-D array: an X row, a Y column, and the
/// transposed values.
pub(crate) fn array2d_mesh(array: &Array2D) -> MeshArgs {
    let mut x = array.xindex().to_vec();
    x.push(array.xspan().1);
    let mut y = array.yindex().to_vec();
    y.push(array.yspan().1);
    MeshArgs::Xyc {
        x: Array2::from_shape_fn((1, x.len()), |(_, col)| x[col]),
        y: Array2::from_shape_fn((y.len(), 1), |(row, _)| y[row]),
        c: array.values().t().to_owned(),
    }
}

/// Permutation sorting the points by ascending numeric color.
fn color_order(c: &ColorArg, points: usize) -> Option<Vec<usize>> {
    let values = c.as_numeric()?;
    if values.len() != points {
        return None;
    }
    let mut order: Vec<usize> = (0..points).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    Some(order)
}

fn reorder<T: Clone>(values: &[T], order: &[usize]) -> Vec<T> {
    order.iter().map(|&index| values[index].clone()).collect()
}

/// Restores GPS axis labels when dropped, so a failed draw leaves the
/// axes as it found them.
struct RestoreLabels<'a, B: AxesBackend> {
    base: &'a mut B,
    saved: Vec<(AxisId, String)>,
}

impl<B: AxesBackend> Drop for RestoreLabels<'_, B> {
    fn drop(&mut self) {
        for (id, text) in self.saved.drain(..) {
            let axis = axis_mut(self.base, id);
            axis.set_label_text(text);
            axis.set_default_label(true);
        }
    }
}

impl<B: AxesBackend> AxesBackend for Axes<B> {
    fn position(&self) -> FigureRect {
        self.base.position()
    }

    fn set_position(&mut self, rect: FigureRect) {
        self.base.set_position(rect);
    }

    fn figure_kind(&self) -> FigureKind {
        self.base.figure_kind()
    }

    fn set_figure_kind(&mut self, kind: FigureKind) {
        self.base.set_figure_kind(kind);
    }

    fn theme(&self) -> &Theme {
        self.base.theme()
    }

    fn set_theme(&mut self, theme: Theme) {
        self.base.set_theme(theme);
    }

    fn xaxis(&self) -> &Axis {
        self.base.xaxis()
    }

    fn xaxis_mut(&mut self) -> &mut Axis {
        self.base.xaxis_mut()
    }

    fn yaxis(&self) -> &Axis {
        self.base.yaxis()
    }

    fn yaxis_mut(&mut self) -> &mut Axis {
        self.base.yaxis_mut()
    }

    fn title(&self) -> Option<&str> {
        self.base.title()
    }

    fn set_title(&mut self, title: &str) {
        self.base.set_title(title);
    }

    fn viewport(&self) -> Viewport {
        self.base.viewport()
    }

    /// On a GPS X axis each bound goes through [`to_gps`] first, so dates
    /// and date strings are accepted. Bounds that do not convert are passed
    /// on unchanged.
    fn set_xlim(&mut self, lim: XLim) -> Result<(f64, f64)> {
        if !is_gps_scale(self.base.get_xscale().name()) {
            return self.base.set_xlim(lim);
        }
        let convert = |bound: GpsInput| match to_gps(bound.clone()) {
            Ok(gps) => GpsInput::Number(gps.as_f64()),
            Err(_) => bound,
        };
        self.base.set_xlim(XLim {
            left: lim.left.map(convert),
            right: lim.right.map(convert),
        })
    }

    fn set_ylim(&mut self, lim: YLim) -> Result<(f64, f64)> {
        self.base.set_ylim(lim)
    }

    fn autoscale(&mut self) {
        self.base.autoscale();
    }

    fn plot(&mut self, args: Vec<PlotArg>, options: LineOptions) -> Result<Vec<ArtistId>> {
        let args = self.args.grab_next_args(args);
        self.base.plot(args, options)
    }

    fn fill_between(
        &mut self,
        x: &[f64],
        y1: &[f64],
        y2: &[f64],
        options: FillOptions,
    ) -> Result<ArtistId> {
        self.base.fill_between(x, y1, y2, options)
    }

    fn scatter(&mut self, x: &[f64], y: &[f64], mut options: ScatterOptions) -> Result<ArtistId> {
        let order = match &options.c {
            Some(c) if options.c_sort && x.len() == y.len() => color_order(c, x.len()),
            _ => None,
        };
        let Some(order) = order else {
            return self.base.scatter(x, y, options);
        };
        options.c = options.c.take().map(|c| match c {
            ColorArg::Values(values) => ColorArg::Values(reorder(&values, &order)),
            ColorArg::Specs(specs) => ColorArg::Specs(reorder(&specs, &order)),
            single => single,
        });
        self.base
            .scatter(&reorder(x, &order), &reorder(y, &order), options)
    }

    fn imshow(&mut self, source: ImageSource, mut options: ImageOptions) -> Result<ArtistId> {
        options.norm = format_norm(&options.norm);
        match source {
            ImageSource::Array(array) => self.imshow_array2d(array, options),
            grid @ ImageSource::Grid(_) => {
                let image = self.base.imshow(grid, options)?;
                self.base.autoscale();
                Ok(image)
            }
        }
    }

    fn pcolormesh(&mut self, args: MeshArgs, mut options: MeshOptions) -> Result<ArtistId> {
        options.norm = format_norm(&options.norm);
        let args = match args {
            MeshArgs::Array(array) => array2d_mesh(&array),
            other => other,
        };
        self.base.pcolormesh(args, options)
    }

    fn artists(&self) -> &[Artist] {
        self.base.artists()
    }

    fn artist_mut(&mut self, id: ArtistId) -> Option<&mut Artist> {
        self.base.artist_mut(id)
    }

    /// Frame opacity defaults to 0.8 and line samples to width 8; the
    /// frame border takes `rc.axes_linewidth`.
    fn legend(&mut self, mut options: LegendOptions) -> Option<&Legend> {
        let alpha = options.alpha.take().unwrap_or(LEGEND_ALPHA);
        let linewidth = options.linewidth.take().unwrap_or(LEGEND_LINEWIDTH);
        self.base.legend(options)?;
        let frame_width = rc_params().axes_linewidth;
        let legend = self.base.get_legend_mut()?;
        let frame = legend.frame_mut();
        frame.alpha = alpha;
        frame.linewidth = frame_width;
        for line in legend.lines_mut() {
            line.width = linewidth;
        }
        Some(&*legend)
    }

    fn get_legend(&self) -> Option<&Legend> {
        self.base.get_legend()
    }

    fn get_legend_mut(&mut self) -> Option<&mut Legend> {
        self.base.get_legend_mut()
    }

    fn add_colorbar(&mut self, colorbar: Colorbar) {
        self.base.add_colorbar(colorbar);
    }

    fn colorbars(&self) -> &[Colorbar] {
        self.base.colorbars()
    }

    fn format_xdata(&self, x: f64) -> String {
        self.fmt_xdata(x)
            .unwrap_or_else(|| self.base.format_xdata(x))
    }

    fn format_ydata(&self, y: f64) -> String {
        self.fmt_ydata(y)
            .unwrap_or_else(|| self.base.format_ydata(y))
    }

    /// GPS axes still carrying their default label are drawn with
    /// `Time [{unit}] from {utc} UTC ({epoch})`; the label is restored
    /// afterwards whether or not drawing succeeds.
    fn draw(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        let view = self.base.viewport();
        let mut guard = RestoreLabels {
            base: &mut self.base,
            saved: Vec::new(),
        };
        for (id, range) in [(AxisId::X, view.x), (AxisId::Y, view.y)] {
            let axis = axis_mut(guard.base, id);
            if !is_gps_scale(axis.scale().name()) || !axis.is_default_label() {
                continue;
            }
            let Ok(transform) = axis.gps_transform(range) else {
                continue;
            };
            let epoch = transform.epoch();
            let utc = LigoTimeGps::from_f64(epoch)
                .and_then(format_utc)
                .unwrap_or_else(|| epoch.to_string());
            let label = format!(
                "Time [{}] from {utc} UTC ({})",
                transform.unit_name(),
                float_repr(epoch)
            );
            debug!("labelling {} axis {label:?}", id.name());
            guard.saved.push((id, axis.label_text().to_owned()));
            axis.set_label_text(label);
        }
        guard.base.draw(renderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gps::{GpsScale, GpsUnit};
    use crate::render::RecordingRenderer;
    use ndarray::array;

    #[test]
    fn fmt_data_only_on_gps_axes() {
        let mut axes = Axes::default();
        assert_eq!(axes.fmt_xdata(1.5), None);
        assert_eq!(axes.format_xdata(1.5), "1.5");
        axes.set_xscale(AxisScale::Gps(GpsScale::auto()));
        assert_eq!(axes.fmt_xdata(1126259462.5).as_deref(), Some("1126259462.5"));
        assert_eq!(axes.format_xdata(1126259462.0), "1126259462");
        assert_eq!(axes.fmt_ydata(1.0), None);
    }

    #[test]
    fn gps_readout_keeps_nanosecond_rounding() {
        let mut axes = Axes::default();
        axes.set_xscale(AxisScale::Gps(GpsScale::auto()));
        assert_eq!(
            axes.fmt_xdata(1126259462.4).as_deref(),
            Some("1126259462.400000095")
        );
        assert_eq!(
            axes.fmt_xdata(1126259462.1).as_deref(),
            Some("1126259462.099999905")
        );
        assert_eq!(axes.format_xdata(1126259462.4), "1126259462.400000095");
    }

    #[test]
    fn float_repr_signs_and_pads_exponents() {
        assert_eq!(float_repr(1126259462.0), "1126259462.0");
        assert_eq!(float_repr(0.25), "0.25");
        assert_eq!(float_repr(1e16), "1e+16");
        assert_eq!(float_repr(1.5e-5), "1.5e-05");
        assert_eq!(float_repr(-2.5e20), "-2.5e+20");
    }

    #[test]
    fn epoch_round_trip() {
        let mut axes = Axes::default();
        assert!(matches!(
            axes.set_epoch(0.0),
            Err(PlotError::NotGpsScale { axis: "x", .. })
        ));
        assert!(axes.get_epoch().is_err());
        axes.set_xscale(AxisScale::Gps(GpsScale::with_unit(GpsUnit::Hours)));
        axes.set_epoch("2015-09-14 09:50:45").unwrap();
        assert_eq!(axes.get_epoch().unwrap(), 1126259462.0);
        assert_eq!(axes.get_xscale().name(), "hours");
    }

    #[test]
    fn draw_relabels_then_restores() {
        let mut axes = Axes::default();
        axes.set_xscale(AxisScale::Gps(GpsScale::auto()));
        axes.plot(
            crate::plot_args![vec![1126259462.0, 1126259472.0], vec![0.0, 1.0]],
            LineOptions::default(),
        )
        .unwrap();
        axes.set_xlim(XLim::new(1126259462.0, 1126259472.0)).unwrap();
        let mut renderer = RecordingRenderer::default();
        axes.draw(&mut renderer).unwrap();
        assert!(renderer.texts().any(|text| {
            text == "Time [seconds] from 2015-09-14 09:50:45 UTC (1126259462.0)"
        }));
        assert_eq!(axes.xaxis().label_text(), "");
        assert!(axes.xaxis().is_default_label());
    }

    #[test]
    fn custom_label_is_not_replaced() {
        let mut axes = Axes::default();
        axes.set_xscale(AxisScale::Gps(GpsScale::auto()));
        axes.set_xlabel("GPS time");
        let mut renderer = RecordingRenderer::default();
        axes.draw(&mut renderer).unwrap();
        assert!(renderer.texts().any(|text| text == "GPS time"));
        assert!(!renderer.texts().any(|text| text.starts_with("Time [")));
        assert!(!axes.xaxis().is_default_label());
    }

    #[test]
    fn array2d_mesh_edges() {
        let array = Array2D::new(
            "spec",
            array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]],
            vec![0.0, 1.0, 2.0],
            vec![10.0, 20.0],
        )
        .unwrap();
        let MeshArgs::Xyc { x, y, c } = array2d_mesh(&array) else {
            panic!("expected explicit corners");
        };
        assert_eq!(x, array![[0.0, 1.0, 2.0, 3.0]]);
        assert_eq!(y, array![[10.0], [20.0], [30.0]]);
        assert_eq!(c, array![[1.0, 3.0, 5.0], [2.0, 4.0, 6.0]]);
    }

    #[test]
    fn color_order_is_stable() {
        let order = color_order(&ColorArg::Values(vec![2.0, 1.0, 2.0, 0.0]), 4).unwrap();
        assert_eq!(order, vec![3, 1, 0, 2]);
        assert!(color_order(&ColorArg::from("red"), 4).is_none());
        assert!(color_order(&ColorArg::Values(vec![1.0]), 4).is_none());
    }
}
