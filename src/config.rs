//! Runtime configuration ("rc" parameters).
//!
//! Defaults can be overridden from a TOML file, either explicitly with
//! [`RcParams::from_path`] or at start-up through the `GWPLOT_RC`
//! environment variable.

use std::path::Path;
use std::sync::RwLock;

use log::{debug, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::artist::{Aspect, Interpolation, Origin};
use crate::colors::{Color, Colormap};
use crate::error::{PlotError, Result};

/// Environment variable naming an rc file loaded on first use.
pub const RC_ENV_VAR: &str = "GWPLOT_RC";

const TAB10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Plot-wide defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RcParams {
    /// Width of axes spines and legend frames.
    pub axes_linewidth: f32,
    /// Default line width.
    pub lines_linewidth: f32,
    /// Default legend frame opacity.
    pub legend_framealpha: f32,
    /// Relative X padding added around autoscaled data.
    pub axes_xmargin: f64,
    /// Relative Y padding added around autoscaled data.
    pub axes_ymargin: f64,
    /// Default image origin.
    pub image_origin: Origin,
    /// Default image aspect.
    pub image_aspect: Aspect,
    /// Default image interpolation.
    pub image_interpolation: Interpolation,
    /// Default colormap for images, meshes and mapped scatter plots.
    pub image_cmap: Colormap,
    /// Default scatter marker size in pixels.
    pub scatter_size: f32,
    /// Default fraction stolen from the parent axes by a colorbar.
    pub colorbar_fraction: f32,
    /// Gap between a space-stealing colorbar and its parent.
    pub colorbar_pad: f32,
    /// Width of a grid-managed colorbar, as a fraction of the parent.
    pub colorbar_axesgrid_size: f32,
    /// Gap between a grid-managed colorbar and its parent.
    pub colorbar_axesgrid_pad: f32,
    /// Text size in pixels.
    pub font_size: f32,
    /// Line color cycle, as hex strings.
    pub prop_cycle: Vec<String>,
}

impl Default for RcParams {
    fn default() -> Self {
        Self {
            axes_linewidth: 0.8,
            lines_linewidth: 1.5,
            legend_framealpha: 0.8,
            axes_xmargin: 0.05,
            axes_ymargin: 0.05,
            image_origin: Origin::Upper,
            image_aspect: Aspect::Equal,
            image_interpolation: Interpolation::Antialiased,
            image_cmap: Colormap::Viridis,
            scatter_size: 6.0,
            colorbar_fraction: 0.15,
            colorbar_pad: 0.05,
            colorbar_axesgrid_size: 0.03,
            colorbar_axesgrid_pad: 0.01,
            font_size: 10.0,
            prop_cycle: TAB10.iter().map(|color| (*color).to_owned()).collect(),
        }
    }
}

impl RcParams {
    /// Parse parameters from TOML; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| PlotError::Config(err.to_string()))
    }

    /// Load parameters from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| PlotError::Config(format!("{}: {err}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Color at position `index` of the color cycle.
    pub fn cycle_color(&self, index: usize) -> Color {
        if self.prop_cycle.is_empty() {
            return Color::BLACK;
        }
        let spec = &self.prop_cycle[index % self.prop_cycle.len()];
        Color::parse(spec).unwrap_or(Color::BLACK)
    }
}

static RC_PARAMS: Lazy<RwLock<RcParams>> = Lazy::new(|| RwLock::new(load_from_env()));

fn load_from_env() -> RcParams {
    let Ok(path) = std::env::var(RC_ENV_VAR) else {
        return RcParams::default();
    };
    match RcParams::from_path(&path) {
        Ok(params) => {
            debug!("loaded rc parameters from {path}");
            params
        }
        Err(err) => {
            warn!("ignoring {RC_ENV_VAR}={path}: {err}");
            RcParams::default()
        }
    }
}

/// Snapshot of the current global parameters.
pub fn rc_params() -> RcParams {
    match RC_PARAMS.read() {
        Ok(params) => params.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Replace the global parameters.
pub fn set_rc_params(params: RcParams) {
    match RC_PARAMS.write() {
        Ok(mut current) => *current = params,
        Err(poisoned) => *poisoned.into_inner() = params,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let params = RcParams::from_toml_str("axes_linewidth = 2.5\nimage_origin = \"lower\"\n")
            .expect("valid rc");
        assert_eq!(params.axes_linewidth, 2.5);
        assert_eq!(params.image_origin, Origin::Lower);
        assert_eq!(params.lines_linewidth, 1.5);
        assert_eq!(params.prop_cycle.len(), 10);
    }

    #[test]
    fn bad_toml_is_config_error() {
        let err = RcParams::from_toml_str("axes_linewidth = \"wide\"").unwrap_err();
        assert!(matches!(err, PlotError::Config(_)));
    }

    #[test]
    fn cycle_wraps() {
        let params = RcParams::default();
        assert_eq!(params.cycle_color(0), params.cycle_color(10));
        assert_ne!(params.cycle_color(0), params.cycle_color(1));
    }
}
