//! Coordinate transforms between data and screen space.

use crate::axis::AxisScale;
use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::view::{Range, Viewport};

const MIN_SPAN: f64 = 1e-12;

/// Transform from data coordinates into the screen rectangle of an axes.
#[derive(Debug, Clone)]
pub(crate) struct Transform {
    screen: ScreenRect,
    x_scale: AxisScale,
    y_scale: AxisScale,
    x_axis: Range,
    y_axis: Range,
}

impl Transform {
    /// Create a transform for the given view limits and screen rectangle.
    ///
    /// Returns `None` when the screen is empty or a limit cannot be mapped
    /// by its scale (for example a non-positive bound on a log axis).
    pub(crate) fn new(
        viewport: Viewport,
        screen: ScreenRect,
        x_scale: AxisScale,
        y_scale: AxisScale,
    ) -> Option<Self> {
        if !screen.is_valid() {
            return None;
        }
        let x_axis = map_range(viewport.x, x_scale)?.with_min_span(MIN_SPAN);
        let y_axis = map_range(viewport.y, y_scale)?.with_min_span(MIN_SPAN);
        Some(Self {
            screen,
            x_scale,
            y_scale,
            x_axis,
            y_axis,
        })
    }

    /// Access the screen rectangle.
    pub(crate) fn screen(&self) -> ScreenRect {
        self.screen
    }

    /// Map a data X value to a screen X coordinate.
    pub(crate) fn map_x(&self, x: f64) -> Option<f32> {
        let x = self.x_scale.map_value(x)?;
        let norm = (x - self.x_axis.min) / self.x_axis.span();
        Some((self.screen.min.x as f64 + norm * self.screen.width() as f64) as f32)
    }

    /// Map a data Y value to a screen Y coordinate.
    pub(crate) fn map_y(&self, y: f64) -> Option<f32> {
        let y = self.y_scale.map_value(y)?;
        let norm = (y - self.y_axis.min) / self.y_axis.span();
        Some((self.screen.max.y as f64 - norm * self.screen.height() as f64) as f32)
    }

    /// Map a data point into screen space.
    pub(crate) fn data_to_screen(&self, point: Point) -> Option<ScreenPoint> {
        Some(ScreenPoint::new(self.map_x(point.x)?, self.map_y(point.y)?))
    }

    /// Map a screen point into data space.
    pub(crate) fn screen_to_data(&self, point: ScreenPoint) -> Option<Point> {
        let x_norm = (point.x as f64 - self.screen.min.x as f64) / self.screen.width() as f64;
        let y_norm = (self.screen.max.y as f64 - point.y as f64) / self.screen.height() as f64;
        let x_axis = self.x_axis.min + x_norm * self.x_axis.span();
        let y_axis = self.y_axis.min + y_norm * self.y_axis.span();
        let x = self.x_scale.invert_value(x_axis)?;
        let y = self.y_scale.invert_value(y_axis)?;
        Some(Point::new(x, y))
    }
}

fn map_range(range: Range, scale: AxisScale) -> Option<Range> {
    let min = scale.map_value(range.min)?;
    let max = scale.map_value(range.max)?;
    Some(Range::new(min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> ScreenRect {
        ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 100.0))
    }

    #[test]
    fn linear_roundtrip() {
        let viewport = Viewport::new(Range::new(0.0, 10.0), Range::new(0.0, 10.0));
        let transform = Transform::new(viewport, screen(), AxisScale::Linear, AxisScale::Linear)
            .expect("valid transform");
        let point = Point::new(5.0, 7.5);
        let screen_point = transform.data_to_screen(point).unwrap();
        assert_eq!(screen_point, ScreenPoint::new(50.0, 25.0));
        let roundtrip = transform.screen_to_data(screen_point).unwrap();
        assert!((roundtrip.x - point.x).abs() < 1e-9);
        assert!((roundtrip.y - point.y).abs() < 1e-9);
    }

    #[test]
    fn degenerate_range_keeps_center() {
        let viewport = Viewport::new(Range::new(3.0, 3.0), Range::new(0.0, 10.0));
        let transform =
            Transform::new(viewport, screen(), AxisScale::Linear, AxisScale::Linear).unwrap();
        let x = transform.map_x(3.0).unwrap();
        assert!((x - 50.0).abs() < 0.5);
    }

    #[test]
    fn y_axis_points_up() {
        let viewport = Viewport::new(Range::new(0.0, 1.0), Range::new(0.0, 1.0));
        let transform =
            Transform::new(viewport, screen(), AxisScale::Linear, AxisScale::Linear).unwrap();
        assert_eq!(transform.map_y(0.0), Some(100.0));
        assert_eq!(transform.map_y(1.0), Some(0.0));
    }

    #[test]
    fn log_rejects_non_positive_range() {
        let viewport = Viewport::new(Range::new(-1.0, 10.0), Range::new(1.0, 10.0));
        let transform = Transform::new(viewport, screen(), AxisScale::Log10, AxisScale::Linear);
        assert!(transform.is_none());
    }
}
