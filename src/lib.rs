//! gwplot: plotting axes for gravitational-wave time series.
//!
//! [`Axes`] extends the base [`Rectilinear`] axes with GPS time scales that
//! label themselves against a UTC epoch, series-aware line plots, shaded
//! min/mean/max bands, color-sorted scatter plots, spectrogram-style 2-D
//! arrays, and colorbars. Everything draws into a [`RenderList`]; enable the
//! `gpui` feature for a window backend.

#![forbid(unsafe_code)]

pub mod artist;
pub mod axes;
pub mod axis;
pub mod colorbar;
pub mod colors;
pub mod config;
pub mod error;
pub mod figure;
pub mod geom;
pub mod gps;
pub mod options;
pub mod plot_args;
pub mod projection;
pub mod rectilinear;
pub mod render;
pub mod style;
pub mod time;
mod transform;
pub mod types;
pub mod view;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use artist::{Artist, ArtistId, Aspect, Interpolation, Legend, LegendLoc, Origin};
pub use axes::Axes;
pub use axis::{Axis, AxisFormatter, AxisId, AxisScale};
pub use colorbar::{Colorbar, ColorbarPlacement};
pub use colors::{Color, Colormap, Norm, NormKind, NormOptions, format_norm};
pub use config::{RcParams, rc_params, set_rc_params};
pub use error::{PlotError, Result};
pub use figure::{Figure, FigureBuilder, FigureKind};
pub use geom::{FigureRect, Point, ScreenPoint, ScreenRect};
pub use gps::{GpsScale, GpsTransform, GpsUnit, is_gps_scale};
pub use options::{
    ColorArg, ColorbarOptions, FillOptions, ImageOptions, ImageSource, LegendOptions, LineOptions,
    MeshArgs, MeshOptions, ScatterOptions, XLim, YLim,
};
pub use plot_args::PlotArgsProcessor;
pub use projection::{ProjectionFactory, projection, register_projection};
pub use rectilinear::{AxesBackend, PlotArg, Rectilinear};
pub use render::{
    LineDash, LineStyle, MarkerShape, MarkerStyle, RecordingRenderer, RenderCommand, RenderList,
    Renderer, TextStyle,
};
pub use style::Theme;
pub use time::{GpsInput, LigoTimeGps, format_utc, to_gps};
pub use types::{Array2D, Series};
pub use view::{Range, Viewport};
