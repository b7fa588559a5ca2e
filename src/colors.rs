//! Colors, colormaps, and color normalization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::rc_params;
use crate::error::{PlotError, Result};

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Same color with a different alpha.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Parse a color spec.
    ///
    /// Accepts single-letter codes (`b`, `g`, `r`, `c`, `m`, `y`, `k`, `w`),
    /// common names, `tab:` names, cycle references `C0`..`C9`, hex
    /// `#rrggbb`/`#rrggbbaa`, and grey levels written as a number in `0..=1`.
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        if let Some(hex) = spec.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(index) = spec.strip_prefix('C') {
            if let Ok(index) = index.parse::<usize>() {
                return Some(rc_params().cycle_color(index));
            }
        }
        if let Ok(level) = spec.parse::<f32>() {
            return (0.0..=1.0)
                .contains(&level)
                .then(|| Self::new(level, level, level, 1.0));
        }
        let named = match spec.to_ascii_lowercase().as_str() {
            "b" | "blue" => Self::new(0.0, 0.0, 1.0, 1.0),
            "g" | "green" => Self::new(0.0, 0.5, 0.0, 1.0),
            "r" | "red" => Self::new(1.0, 0.0, 0.0, 1.0),
            "c" | "cyan" => Self::new(0.0, 0.75, 0.75, 1.0),
            "m" | "magenta" => Self::new(0.75, 0.0, 0.75, 1.0),
            "y" | "yellow" => Self::new(0.75, 0.75, 0.0, 1.0),
            "k" | "black" => Self::BLACK,
            "w" | "white" => Self::WHITE,
            "gray" | "grey" => Self::rgb8(128, 128, 128),
            "orange" => Self::rgb8(255, 165, 0),
            "purple" => Self::rgb8(128, 0, 128),
            "brown" => Self::rgb8(165, 42, 42),
            "pink" => Self::rgb8(255, 192, 203),
            "olive" => Self::rgb8(128, 128, 0),
            "none" | "transparent" => Self::TRANSPARENT,
            "tab:blue" => Self::rgb8(0x1f, 0x77, 0xb4),
            "tab:orange" => Self::rgb8(0xff, 0x7f, 0x0e),
            "tab:green" => Self::rgb8(0x2c, 0xa0, 0x2c),
            "tab:red" => Self::rgb8(0xd6, 0x27, 0x28),
            "tab:purple" => Self::rgb8(0x94, 0x67, 0xbd),
            "tab:brown" => Self::rgb8(0x8c, 0x56, 0x4b),
            "tab:pink" => Self::rgb8(0xe3, 0x77, 0xc2),
            "tab:gray" | "tab:grey" => Self::rgb8(0x7f, 0x7f, 0x7f),
            "tab:olive" => Self::rgb8(0xbc, 0xbd, 0x22),
            "tab:cyan" => Self::rgb8(0x17, 0xbe, 0xcf),
            _ => return None,
        };
        Some(named)
    }

    fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }
}

impl FromStr for Color {
    type Err = PlotError;

    fn from_str(spec: &str) -> Result<Self> {
        Self::parse(spec).ok_or_else(|| PlotError::InvalidPlotArgs(format!("invalid color {spec:?}")))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
        return None;
    }
    let channel = |index: usize| u8::from_str_radix(&hex[index..index + 2], 16).ok();
    let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
    Some(Color::rgb8(channel(0)?, channel(2)?, channel(4)?).with_alpha(alpha as f32 / 255.0))
}

/// Named colormap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    /// Perceptually uniform blue-green-yellow.
    #[default]
    Viridis,
    /// Perceptually uniform black-red-yellow.
    Inferno,
    /// Black to white.
    Gray,
}

const VIRIDIS: [Color; 5] = [
    Color::rgb8(0x44, 0x01, 0x54),
    Color::rgb8(0x3b, 0x52, 0x8b),
    Color::rgb8(0x21, 0x91, 0x8c),
    Color::rgb8(0x5e, 0xc9, 0x62),
    Color::rgb8(0xfd, 0xe7, 0x25),
];

const INFERNO: [Color; 5] = [
    Color::rgb8(0x00, 0x00, 0x04),
    Color::rgb8(0x57, 0x10, 0x6e),
    Color::rgb8(0xbc, 0x37, 0x54),
    Color::rgb8(0xf9, 0x8e, 0x09),
    Color::rgb8(0xfc, 0xff, 0xa4),
];

impl Colormap {
    /// Map a normalized value in `0..=1` to a color; out-of-range values clamp.
    pub fn map(self, value: f64) -> Color {
        let t = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0) as f32
        };
        match self {
            Self::Gray => Color::new(t, t, t, 1.0),
            Self::Viridis => interpolate(&VIRIDIS, t),
            Self::Inferno => interpolate(&INFERNO, t),
        }
    }

    /// Registered name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Viridis => "viridis",
            Self::Inferno => "inferno",
            Self::Gray => "gray",
        }
    }
}

impl FromStr for Colormap {
    type Err = PlotError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "viridis" => Ok(Self::Viridis),
            "inferno" => Ok(Self::Inferno),
            "gray" | "grey" => Ok(Self::Gray),
            other => Err(PlotError::UnknownColormap(other.to_owned())),
        }
    }
}

fn interpolate(anchors: &[Color], t: f32) -> Color {
    let segments = (anchors.len() - 1) as f32;
    let position = t * segments;
    let index = (position.floor() as usize).min(anchors.len() - 2);
    anchors[index].lerp(anchors[index + 1], position - index as f32)
}

/// Kind of color normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormKind {
    /// Linear mapping between `vmin` and `vmax`.
    #[default]
    Linear,
    /// Logarithmic mapping between positive `vmin` and `vmax`.
    Log,
}

impl FromStr for NormKind {
    type Err = PlotError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "linear" => Ok(Self::Linear),
            "log" => Ok(Self::Log),
            other => Err(PlotError::InvalidNorm(other.to_owned())),
        }
    }
}

impl fmt::Display for NormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::Log => f.write_str("log"),
        }
    }
}

/// Color normalization keywords.
///
/// `clim` and `clip` are convenience keywords understood by
/// [`format_norm`]; the base axes only read `norm`, `vmin` and `vmax`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormOptions {
    /// Normalization kind, linear when unset.
    pub norm: Option<NormKind>,
    /// Lower color limit.
    pub vmin: Option<f64>,
    /// Upper color limit.
    pub vmax: Option<f64>,
    /// Both color limits at once; overrides `vmin`/`vmax`.
    pub clim: Option<(Option<f64>, Option<f64>)>,
    /// Clip values outside the limits.
    pub clip: Option<bool>,
}

impl NormOptions {
    /// Logarithmic normalization.
    pub fn log() -> Self {
        Self {
            norm: Some(NormKind::Log),
            ..Self::default()
        }
    }
}

/// Resolve the convenience keywords into plain `norm`/`vmin`/`vmax`/`clip`.
pub fn format_norm(options: &NormOptions) -> NormOptions {
    let (vmin, vmax) = options.clim.unwrap_or((options.vmin, options.vmax));
    NormOptions {
        norm: Some(options.norm.unwrap_or_default()),
        vmin,
        vmax,
        clim: None,
        clip: options.clip,
    }
}

/// A color normalization with (possibly autoscaled) limits.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Norm {
    /// Normalization kind.
    pub kind: NormKind,
    /// Lower limit.
    pub vmin: Option<f64>,
    /// Upper limit.
    pub vmax: Option<f64>,
    /// Clip normalized values into `0..=1`.
    pub clip: bool,
}

impl Norm {
    /// Build a normalization from base keywords (`clim` is not consulted).
    pub fn from_options(options: &NormOptions) -> Self {
        Self {
            kind: options.norm.unwrap_or_default(),
            vmin: options.vmin,
            vmax: options.vmax,
            clip: options.clip.unwrap_or(false),
        }
    }

    /// Fill unset limits from the data.
    pub fn autoscale_none(&mut self, data: impl IntoIterator<Item = f64>) {
        if self.vmin.is_some() && self.vmax.is_some() {
            return;
        }
        let log = self.kind == NormKind::Log;
        let mut low = f64::INFINITY;
        let mut high = f64::NEG_INFINITY;
        for value in data {
            if !value.is_finite() || (log && value <= 0.0) {
                continue;
            }
            low = low.min(value);
            high = high.max(value);
        }
        if low <= high {
            self.vmin.get_or_insert(low);
            self.vmax.get_or_insert(high);
        }
    }

    /// Map a value into `0..=1` (before clipping); `None` if unmappable.
    pub fn normalize(&self, value: f64) -> Option<f64> {
        let (vmin, vmax) = (self.vmin?, self.vmax?);
        if !value.is_finite() {
            return None;
        }
        let scaled = match self.kind {
            NormKind::Linear => {
                if vmax == vmin {
                    0.0
                } else {
                    (value - vmin) / (vmax - vmin)
                }
            }
            NormKind::Log => {
                if value <= 0.0 || vmin <= 0.0 || vmax <= 0.0 {
                    return None;
                }
                if vmax == vmin {
                    0.0
                } else {
                    (value.log10() - vmin.log10()) / (vmax.log10() - vmin.log10())
                }
            }
        };
        Some(if self.clip {
            scaled.clamp(0.0, 1.0)
        } else {
            scaled
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_specs() {
        assert_eq!(Color::parse("r"), Some(Color::new(1.0, 0.0, 0.0, 1.0)));
        assert_eq!(Color::parse("#ff000080").map(|c| c.r), Some(1.0));
        assert_eq!(Color::parse("0.5"), Some(Color::new(0.5, 0.5, 0.5, 1.0)));
        assert!(Color::parse("2.0").is_none());
        assert!(Color::parse("chartreuse-ish").is_none());
        assert!(Color::parse("C1").is_some());
    }

    #[test]
    fn format_norm_prefers_clim() {
        let options = NormOptions {
            norm: Some(NormKind::Log),
            vmin: Some(1.0),
            clim: Some((Some(2.0), Some(20.0))),
            ..NormOptions::default()
        };
        let resolved = format_norm(&options);
        assert_eq!(resolved.norm, Some(NormKind::Log));
        assert_eq!(resolved.vmin, Some(2.0));
        assert_eq!(resolved.vmax, Some(20.0));
        assert_eq!(resolved.clim, None);
    }

    #[test]
    fn norm_names() {
        assert_eq!("log".parse::<NormKind>().unwrap(), NormKind::Log);
        assert!(matches!(
            "symlog".parse::<NormKind>(),
            Err(PlotError::InvalidNorm(_))
        ));
    }

    #[test]
    fn log_norm_autoscale_ignores_non_positive() {
        let mut norm = Norm {
            kind: NormKind::Log,
            ..Norm::default()
        };
        norm.autoscale_none([0.0, 1.0, 100.0, -5.0]);
        assert_eq!(norm.vmin, Some(1.0));
        assert_eq!(norm.vmax, Some(100.0));
        assert!((norm.normalize(10.0).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn colormap_endpoints() {
        assert_eq!(Colormap::Gray.map(0.0), Color::BLACK);
        let top = Colormap::Viridis.map(1.5);
        assert!((top.g - VIRIDIS[4].g).abs() < 1e-6);
        assert!((top.b - VIRIDIS[4].b).abs() < 1e-6);
    }
}
