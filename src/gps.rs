//! GPS time axis scales.
//!
//! A GPS scale maps data linearly (like a linear axis) but labels it as an
//! offset from a reference epoch, expressed in a chosen time unit.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;

use crate::view::Range;

/// Name of the GPS scale that picks its unit from the view span.
pub const AUTO_GPS: &str = "auto-gps";

/// Time unit of a GPS axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GpsUnit {
    /// 1e-9 s.
    Nanoseconds,
    /// 1e-6 s.
    Microseconds,
    /// 1e-3 s.
    Milliseconds,
    /// 1 s.
    Seconds,
    /// 60 s.
    Minutes,
    /// 3600 s.
    Hours,
    /// 86400 s.
    Days,
    /// 7 days.
    Weeks,
    /// Julian year, 365.25 days.
    Years,
}

impl GpsUnit {
    /// All units from smallest to largest.
    pub const ALL: [GpsUnit; 9] = [
        Self::Nanoseconds,
        Self::Microseconds,
        Self::Milliseconds,
        Self::Seconds,
        Self::Minutes,
        Self::Hours,
        Self::Days,
        Self::Weeks,
        Self::Years,
    ];

    /// Length of one unit in seconds.
    pub fn seconds(self) -> f64 {
        match self {
            Self::Nanoseconds => 1e-9,
            Self::Microseconds => 1e-6,
            Self::Milliseconds => 1e-3,
            Self::Seconds => 1.0,
            Self::Minutes => 60.0,
            Self::Hours => 3600.0,
            Self::Days => 86_400.0,
            Self::Weeks => 604_800.0,
            Self::Years => 31_557_600.0,
        }
    }

    /// Plural unit name, also used as the scale name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Nanoseconds => "nanoseconds",
            Self::Microseconds => "microseconds",
            Self::Milliseconds => "milliseconds",
            Self::Seconds => "seconds",
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Years => "years",
        }
    }

    /// Pick the largest unit that fits at least three times in `span`.
    pub fn for_span(span: f64) -> Self {
        let span = span.abs();
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|unit| span >= unit.seconds() * 3.0)
            .unwrap_or(Self::Nanoseconds)
    }
}

impl fmt::Display for GpsUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Registry of recognized GPS scale names.
///
/// `None` marks the automatic scale.
static GPS_SCALES: Lazy<BTreeMap<&'static str, Option<GpsUnit>>> = Lazy::new(|| {
    let mut scales = BTreeMap::new();
    scales.insert(AUTO_GPS, None);
    for unit in GpsUnit::ALL {
        scales.insert(unit.name(), Some(unit));
    }
    scales
});

/// Check whether a scale name is one of the GPS scales.
pub fn is_gps_scale(name: &str) -> bool {
    GPS_SCALES.contains_key(name)
}

/// Names of all GPS scales.
pub fn gps_scale_names() -> impl Iterator<Item = &'static str> {
    GPS_SCALES.keys().copied()
}

/// GPS scale configuration for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GpsScale {
    unit: Option<GpsUnit>,
    epoch: Option<f64>,
}

impl GpsScale {
    /// Scale with automatic unit and epoch.
    pub fn auto() -> Self {
        Self::default()
    }

    /// Scale with a fixed unit.
    pub fn with_unit(unit: GpsUnit) -> Self {
        Self {
            unit: Some(unit),
            epoch: None,
        }
    }

    /// Look up a scale by registered name.
    pub fn from_name(name: &str) -> Option<Self> {
        GPS_SCALES.get(name).map(|unit| Self {
            unit: *unit,
            epoch: None,
        })
    }

    /// Set a fixed epoch.
    pub fn epoch(mut self, epoch: Option<f64>) -> Self {
        self.epoch = epoch;
        self
    }

    /// Registered name of this scale.
    pub fn name(&self) -> &'static str {
        self.unit.map_or(AUTO_GPS, GpsUnit::name)
    }

    /// Fixed unit, if any.
    pub fn unit(&self) -> Option<GpsUnit> {
        self.unit
    }

    /// Explicit epoch, if any.
    pub fn explicit_epoch(&self) -> Option<f64> {
        self.epoch
    }

    /// Resolve unit and epoch against the current view interval.
    pub fn transform(&self, view: Range) -> GpsTransform {
        let unit = self
            .unit
            .unwrap_or_else(|| GpsUnit::for_span(view.span()));
        let epoch = self.epoch.unwrap_or_else(|| {
            if view.min.is_finite() {
                view.min.floor()
            } else {
                0.0
            }
        });
        GpsTransform { epoch, unit }
    }
}

/// Resolved GPS transform: data is shown as `(value - epoch) / unit`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsTransform {
    epoch: f64,
    unit: GpsUnit,
}

impl GpsTransform {
    /// Reference epoch in GPS seconds.
    pub fn epoch(&self) -> f64 {
        self.epoch
    }

    /// Display unit.
    pub fn unit(&self) -> GpsUnit {
        self.unit
    }

    /// Name of the display unit.
    pub fn unit_name(&self) -> &'static str {
        self.unit.name()
    }

    /// Convert a GPS time into the displayed offset.
    pub fn to_display(&self, value: f64) -> f64 {
        (value - self.epoch) / self.unit.seconds()
    }

    /// Convert a displayed offset back into GPS time.
    pub fn from_display(&self, value: f64) -> f64 {
        value * self.unit.seconds() + self.epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_knows_gps_names() {
        assert!(is_gps_scale("auto-gps"));
        assert!(is_gps_scale("seconds"));
        assert!(is_gps_scale("years"));
        assert!(!is_gps_scale("linear"));
        assert_eq!(gps_scale_names().count(), 10);
    }

    #[test]
    fn auto_unit_follows_span() {
        assert_eq!(GpsUnit::for_span(32.0), GpsUnit::Seconds);
        assert_eq!(GpsUnit::for_span(600.0), GpsUnit::Minutes);
        assert_eq!(GpsUnit::for_span(86_400.0 * 10.0), GpsUnit::Days);
        assert_eq!(GpsUnit::for_span(0.5), GpsUnit::Milliseconds);
    }

    #[test]
    fn transform_uses_view_start_as_epoch() {
        let scale = GpsScale::from_name("seconds").unwrap();
        let transform = scale.transform(Range::new(1126259462.4, 1126259494.4));
        assert_eq!(transform.epoch(), 1126259462.0);
        assert_eq!(transform.unit_name(), "seconds");
        assert!((transform.to_display(1126259472.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn explicit_epoch_wins() {
        let scale = GpsScale::auto().epoch(Some(100.0));
        let transform = scale.transform(Range::new(0.0, 7200.0));
        assert_eq!(transform.epoch(), 100.0);
        assert_eq!(transform.unit(), GpsUnit::Minutes);
    }
}
