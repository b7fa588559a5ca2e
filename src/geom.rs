//! Geometric primitives used by the plotting pipeline.
//!
//! [`Point`] lives in data space, [`ScreenPoint`] and [`ScreenRect`] in
//! pixels, and [`FigureRect`] in fractions of the figure canvas.

/// A point in data space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X value in data coordinates.
    pub x: f64,
    /// Y value in data coordinates.
    pub y: f64,
}

impl Point {
    /// Create a new data point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in screen space (pixel coordinates, Y growing downwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// X value in screen pixels.
    pub x: f32,
    /// Y value in screen pixels.
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from an origin and a size.
    pub fn from_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(ScreenPoint::new(x, y), ScreenPoint::new(x + width, y + height))
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Check whether the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// Check whether the rectangle contains a point.
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// A rectangle in figure fractions: `left` and `bottom` from the lower-left
/// corner of the canvas, `width` and `height` as fractions of its size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureRect {
    /// Left edge.
    pub left: f32,
    /// Bottom edge.
    pub bottom: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl FigureRect {
    /// Create a figure rectangle.
    pub fn new(left: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            bottom,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Place the rectangle on a canvas.
    pub fn to_screen(&self, canvas: ScreenRect) -> ScreenRect {
        let width = canvas.width();
        let height = canvas.height();
        let x0 = canvas.min.x + self.left * width;
        let x1 = canvas.min.x + self.right() * width;
        let y1 = canvas.max.y - self.bottom * height;
        let y0 = canvas.max.y - (self.bottom + self.height) * height;
        ScreenRect::new(ScreenPoint::new(x0, y0), ScreenPoint::new(x1, y1))
    }
}

impl Default for FigureRect {
    /// The default subplot position.
    fn default() -> Self {
        Self::new(0.125, 0.11, 0.775, 0.77)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figure_rect_flips_y() {
        let canvas = ScreenRect::from_size(0.0, 0.0, 200.0, 100.0);
        let rect = FigureRect::new(0.5, 0.0, 0.5, 0.5).to_screen(canvas);
        assert_eq!(rect.min, ScreenPoint::new(100.0, 50.0));
        assert_eq!(rect.max, ScreenPoint::new(200.0, 100.0));
    }
}
