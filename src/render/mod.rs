//! Rendering primitives, render targets and clipping helpers.
//!
//! These types are backend-agnostic. The base axes turn their artists into a
//! [`RenderList`] and hand it to a [`Renderer`]; a windowing backend (such
//! as the GPUI backend) paints the commands.

use crate::error::Result;
use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::transform::Transform;

pub use crate::colors::Color;

/// Dash pattern of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineDash {
    /// `-`
    #[default]
    Solid,
    /// `--`
    Dashed,
    /// `:`
    Dotted,
    /// `-.`
    DashDot,
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
    /// Dash pattern.
    pub dash: LineDash,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            dash: LineDash::Solid,
        }
    }
}

/// Marker shape for scatter plots and line markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerShape {
    /// Circle marker.
    #[default]
    Circle,
    /// Square marker.
    Square,
    /// Cross marker.
    Cross,
    /// Plus marker.
    Plus,
    /// Small dot.
    Point,
}

/// Marker styling.
///
/// Marker sizes are expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Marker color.
    pub color: Color,
    /// Marker size in pixels.
    pub size: f32,
    /// Marker shape.
    pub shape: MarkerShape,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 4.0,
            shape: MarkerShape::Circle,
        }
    }
}

/// Rectangle styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    /// Fill color.
    pub fill: Color,
    /// Stroke color.
    pub stroke: Color,
    /// Stroke width.
    pub stroke_width: f32,
}

impl Default for RectStyle {
    fn default() -> Self {
        Self {
            fill: Color::TRANSPARENT,
            stroke: Color::BLACK,
            stroke_width: 1.0,
        }
    }
}

/// Horizontal text alignment relative to the text position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    /// Position is the left edge.
    #[default]
    Start,
    /// Position is the center.
    Middle,
    /// Position is the right edge.
    End,
}

/// Text styling.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
    /// Rotate by 90 degrees counter-clockwise.
    pub vertical: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 12.0,
            anchor: TextAnchor::Start,
            vertical: false,
        }
    }
}

/// A line segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Segment start.
    pub start: ScreenPoint,
    /// Segment end.
    pub end: ScreenPoint,
}

impl LineSegment {
    /// Create a new line segment.
    pub fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }
}

/// A single drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Start clipping to a rectangle.
    ClipRect(ScreenRect),
    /// End clipping.
    ClipEnd,
    /// Draw line segments.
    LineSegments {
        /// Segments to draw.
        segments: Vec<LineSegment>,
        /// Styling for the segments.
        style: LineStyle,
    },
    /// Draw markers.
    Points {
        /// Marker centers.
        points: Vec<ScreenPoint>,
        /// Marker styling.
        style: MarkerStyle,
    },
    /// Draw markers with one color per point.
    ColoredPoints {
        /// Marker centers.
        points: Vec<ScreenPoint>,
        /// One color per marker.
        colors: Vec<Color>,
        /// Marker styling (color ignored).
        style: MarkerStyle,
    },
    /// Fill a closed polygon.
    Polygon {
        /// Polygon vertices.
        points: Vec<ScreenPoint>,
        /// Fill color.
        fill: Color,
    },
    /// Draw a rectangle.
    Rect {
        /// Rectangle bounds.
        rect: ScreenRect,
        /// Rectangle styling.
        style: RectStyle,
    },
    /// Draw text.
    Text {
        /// Text position.
        position: ScreenPoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

/// Ordered list of render commands.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Iterate over every text string in the list.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            RenderCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Target that receives finished render lists.
pub trait Renderer {
    /// Canvas rectangle the figure is laid out on.
    fn bounds(&self) -> ScreenRect;

    /// Consume one render list.
    fn render(&mut self, list: &RenderList) -> Result<()>;
}

/// Renderer that keeps every list in memory.
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    bounds: ScreenRect,
    lists: Vec<RenderList>,
}

impl RecordingRenderer {
    /// Create a recorder for a canvas.
    pub fn new(bounds: ScreenRect) -> Self {
        Self {
            bounds,
            lists: Vec::new(),
        }
    }

    /// Create a recorder for a canvas of the given pixel size.
    pub fn with_size(width: f32, height: f32) -> Self {
        Self::new(ScreenRect::from_size(0.0, 0.0, width, height))
    }

    /// Lists recorded so far.
    pub fn lists(&self) -> &[RenderList] {
        &self.lists
    }

    /// Take the recorded lists.
    pub fn into_lists(self) -> Vec<RenderList> {
        self.lists
    }

    /// Iterate over every text string recorded so far.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lists.iter().flat_map(RenderList::texts)
    }
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::with_size(640.0, 480.0)
    }
}

impl Renderer for RecordingRenderer {
    fn bounds(&self) -> ScreenRect {
        self.bounds
    }

    fn render(&mut self, list: &RenderList) -> Result<()> {
        self.lists.push(list.clone());
        Ok(())
    }
}

/// Build clipped line segments from data points.
pub(crate) fn build_line_segments(
    points: &[Point],
    transform: &Transform,
    clip: ScreenRect,
    out: &mut Vec<LineSegment>,
) {
    out.clear();
    let screen: Vec<Option<ScreenPoint>> = points
        .iter()
        .map(|point| transform.data_to_screen(*point))
        .collect();
    out.extend(screen.windows(2).filter_map(|pair| {
        let (start, end) = clip_segment(pair[0]?, pair[1]?, clip)?;
        Some(LineSegment::new(start, end))
    }));
}

/// Build clipped scatter points from data points, remembering which input
/// index each surviving point came from.
pub(crate) fn build_scatter_points(
    points: &[Point],
    transform: &Transform,
    clip: ScreenRect,
    out: &mut Vec<(usize, ScreenPoint)>,
) {
    out.clear();
    out.extend(points.iter().enumerate().filter_map(|(index, point)| {
        transform
            .data_to_screen(*point)
            .filter(|screen| clip.contains(*screen))
            .map(|screen| (index, screen))
    }));
}

/// Clip a segment to `rect` with the Liang-Barsky parametric test.
fn clip_segment(
    start: ScreenPoint,
    end: ScreenPoint,
    rect: ScreenRect,
) -> Option<(ScreenPoint, ScreenPoint)> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let (mut enter, mut leave) = (0.0_f32, 1.0_f32);
    for (p, q) in [
        (-dx, start.x - rect.min.x),
        (dx, rect.max.x - start.x),
        (-dy, start.y - rect.min.y),
        (dy, rect.max.y - start.y),
    ] {
        if p == 0.0 {
            // parallel to this edge
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            enter = enter.max(t);
        } else {
            leave = leave.min(t);
        }
        if enter > leave {
            return None;
        }
    }
    let at = |t: f32| ScreenPoint::new(start.x + dx * t, start.y + dy * t);
    Some((at(enter), at(leave)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisScale;
    use crate::view::{Range, Viewport};

    #[test]
    fn clip_segment_inside() {
        let rect = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(10.0, 10.0));
        let start = ScreenPoint::new(2.0, 2.0);
        let end = ScreenPoint::new(8.0, 8.0);
        let clipped = clip_segment(start, end, rect).expect("segment should clip");
        assert_eq!(clipped.0, start);
        assert_eq!(clipped.1, end);
    }

    #[test]
    fn clip_segment_crossing_edge() {
        let rect = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(10.0, 10.0));
        let clipped = clip_segment(ScreenPoint::new(5.0, 5.0), ScreenPoint::new(15.0, 5.0), rect)
            .expect("segment should clip");
        assert_eq!(clipped.1, ScreenPoint::new(10.0, 5.0));
    }

    #[test]
    fn clip_segment_outside_and_diagonal() {
        let rect = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(10.0, 10.0));
        assert!(clip_segment(ScreenPoint::new(-5.0, 20.0), ScreenPoint::new(5.0, 20.0), rect).is_none());
        let (start, end) =
            clip_segment(ScreenPoint::new(-5.0, -5.0), ScreenPoint::new(15.0, 15.0), rect).unwrap();
        assert_eq!(start, ScreenPoint::new(0.0, 0.0));
        assert_eq!(end, ScreenPoint::new(10.0, 10.0));
    }

    #[test]
    fn build_segments_with_transform() {
        let viewport = Viewport::new(Range::new(0.0, 1.0), Range::new(0.0, 1.0));
        let rect = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(10.0, 10.0));
        let transform = Transform::new(viewport, rect, AxisScale::Linear, AxisScale::Linear)
            .expect("valid transform");
        let points = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        let mut out = Vec::new();
        build_line_segments(&points, &transform, rect, &mut out);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn recorder_collects_texts() {
        let mut recorder = RecordingRenderer::default();
        let mut list = RenderList::new();
        list.push(RenderCommand::Text {
            position: ScreenPoint::new(0.0, 0.0),
            text: "label".to_owned(),
            style: TextStyle::default(),
        });
        recorder.render(&list).unwrap();
        assert_eq!(recorder.texts().collect::<Vec<_>>(), vec!["label"]);
    }
}
