//! Figures holding one or more axes.

use log::debug;

use crate::axes::Axes;
use crate::error::{PlotError, Result};
use crate::geom::{FigureRect, ScreenPoint, ScreenRect};
use crate::projection::projection;
use crate::rectilinear::AxesBackend;
use crate::render::Renderer;
use crate::style::Theme;
use crate::transform::Transform;

/// Which kind of figure owns an axes.
///
/// Colorbars on a [`FigureKind::Plot`] figure never use a divider slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FigureKind {
    /// A plain figure.
    #[default]
    Standard,
    /// A figure created by the high-level plotting entry point.
    Plot,
}

/// A figure: an ordered set of axes sharing one canvas.
#[derive(Debug, Clone, Default)]
pub struct Figure {
    kind: FigureKind,
    theme: Theme,
    axes: Vec<Axes>,
}

impl Figure {
    /// Create an empty figure.
    pub fn new(kind: FigureKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Start building a figure.
    pub fn builder() -> FigureBuilder {
        FigureBuilder::default()
    }

    /// Figure kind.
    pub fn kind(&self) -> FigureKind {
        self.kind
    }

    /// Theme applied to new axes.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Add an axes filling the default subplot area.
    pub fn add_subplot(&mut self, projection: &str) -> Result<&mut Axes> {
        self.add_axes(projection, FigureRect::default())
    }

    /// Add an axes of the named projection at `rect`.
    pub fn add_axes(&mut self, name: &str, rect: FigureRect) -> Result<&mut Axes> {
        let factory = projection(name)?;
        let mut axes = factory(rect);
        axes.set_figure_kind(self.kind);
        axes.set_theme(self.theme);
        debug!("added {name} axes {} at {rect:?}", self.axes.len());
        self.axes.push(axes);
        let index = self.axes.len() - 1;
        self.axes_mut(index)
    }

    /// Axes by insertion order.
    pub fn axes(&self, index: usize) -> Result<&Axes> {
        self.axes.get(index).ok_or(PlotError::NoSuchAxes(index))
    }

    /// Axes by insertion order, mutably.
    pub fn axes_mut(&mut self, index: usize) -> Result<&mut Axes> {
        self.axes.get_mut(index).ok_or(PlotError::NoSuchAxes(index))
    }

    /// Every axes, in insertion order.
    pub fn all_axes(&self) -> &[Axes] {
        &self.axes
    }

    /// Coordinate readout for a cursor on a canvas, from the topmost axes
    /// under it.
    pub fn format_coord(&self, canvas: ScreenRect, cursor: ScreenPoint) -> Option<String> {
        self.axes.iter().rev().find_map(|axes| {
            let screen = axes.position().to_screen(canvas);
            if !screen.contains(cursor) {
                return None;
            }
            let transform = Transform::new(
                axes.viewport(),
                screen,
                axes.get_xscale(),
                axes.get_yscale(),
            )?;
            let point = transform.screen_to_data(cursor)?;
            Some(format!(
                "x={} y={}",
                axes.format_xdata(point.x),
                axes.format_ydata(point.y)
            ))
        })
    }

    /// Draw every axes in insertion order, stopping at the first failure.
    pub fn draw(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        for axes in &mut self.axes {
            axes.draw(renderer)?;
        }
        Ok(())
    }
}

/// Builder for [`Figure`].
#[derive(Debug, Clone, Default)]
pub struct FigureBuilder {
    kind: FigureKind,
    theme: Theme,
}

impl FigureBuilder {
    /// Set the figure kind.
    pub fn kind(mut self, kind: FigureKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the theme applied to new axes.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Build the figure.
    pub fn build(self) -> Figure {
        Figure {
            kind: self.kind,
            theme: self.theme,
            axes: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingRenderer;

    #[test]
    fn subplot_inherits_kind_and_theme() {
        let mut figure = Figure::builder()
            .kind(FigureKind::Plot)
            .theme(Theme::dark())
            .build();
        let axes = figure.add_subplot("rectilinear").unwrap();
        assert_eq!(axes.figure_kind(), FigureKind::Plot);
        assert_eq!(*axes.theme(), Theme::dark());
        assert_eq!(figure.all_axes().len(), 1);
    }

    #[test]
    fn missing_axes_and_projection() {
        let mut figure = Figure::new(FigureKind::Standard);
        assert_eq!(figure.axes(0).err(), Some(PlotError::NoSuchAxes(0)));
        assert!(matches!(
            figure.add_subplot("polar"),
            Err(PlotError::UnknownProjection(name)) if name == "polar"
        ));
    }

    #[test]
    fn coordinate_readout_uses_gps_format() {
        use crate::axis::AxisScale;
        use crate::gps::GpsScale;
        use crate::options::XLim;

        let mut figure = Figure::default();
        let axes = figure
            .add_axes("rectilinear", FigureRect::new(0.0, 0.0, 1.0, 1.0))
            .unwrap();
        axes.set_xscale(AxisScale::Gps(GpsScale::auto()));
        axes.set_xlim(XLim::new(1126259462.0, 1126259472.0)).unwrap();
        axes.set_ylim(XLim::new(0.0, 1.0)).unwrap();
        let canvas = ScreenRect::from_size(0.0, 0.0, 100.0, 100.0);
        assert_eq!(
            figure.format_coord(canvas, ScreenPoint::new(50.0, 50.0)).as_deref(),
            Some("x=1126259467 y=0.5")
        );
        assert_eq!(
            figure.format_coord(canvas, ScreenPoint::new(150.0, 50.0)),
            None
        );
    }

    #[test]
    fn draws_every_axes() {
        let mut figure = Figure::default();
        figure
            .add_axes("rectilinear", FigureRect::new(0.1, 0.55, 0.8, 0.35))
            .unwrap();
        figure
            .add_axes("rectilinear", FigureRect::new(0.1, 0.1, 0.8, 0.35))
            .unwrap();
        let mut renderer = RecordingRenderer::default();
        figure.draw(&mut renderer).unwrap();
        assert_eq!(renderer.lists().len(), 2);
    }
}
