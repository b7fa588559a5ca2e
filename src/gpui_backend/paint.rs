use gpui::{
    App, BorderStyle, Bounds, ContentMask, Corners, Edges, PathBuilder, Pixels, TextRun, Window,
    font, point, px, quad,
};

use crate::error::Result;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{
    Color, LineDash, LineSegment, LineStyle, MarkerShape, MarkerStyle, RectStyle, RenderCommand,
    RenderList, Renderer, TextAnchor, TextStyle,
};

/// Paints render lists straight into a GPUI window.
pub(crate) struct GpuiRenderer<'a> {
    bounds: ScreenRect,
    window: &'a mut Window,
    cx: &'a mut App,
}

impl<'a> GpuiRenderer<'a> {
    pub(crate) fn new(bounds: Bounds<Pixels>, window: &'a mut Window, cx: &'a mut App) -> Self {
        Self {
            bounds: from_bounds(bounds),
            window,
            cx,
        }
    }
}

impl Renderer for GpuiRenderer<'_> {
    fn bounds(&self) -> ScreenRect {
        self.bounds
    }

    fn render(&mut self, list: &RenderList) -> Result<()> {
        let mut clip_stack: Vec<ContentMask<Pixels>> = Vec::new();
        for command in list.commands() {
            match command {
                RenderCommand::ClipRect(rect) => {
                    clip_stack.push(ContentMask {
                        bounds: to_bounds(*rect),
                    });
                }
                RenderCommand::ClipEnd => {
                    clip_stack.pop();
                }
                RenderCommand::LineSegments { segments, style } => {
                    with_clip(self.window, &clip_stack, |window| {
                        paint_lines(window, segments, *style);
                    });
                }
                RenderCommand::Points { points, style } => {
                    with_clip(self.window, &clip_stack, |window| {
                        for center in points {
                            paint_marker(window, *center, *style);
                        }
                    });
                }
                RenderCommand::ColoredPoints {
                    points,
                    colors,
                    style,
                } => {
                    with_clip(self.window, &clip_stack, |window| {
                        for (center, color) in points.iter().zip(colors) {
                            let style = MarkerStyle {
                                color: *color,
                                ..*style
                            };
                            paint_marker(window, *center, style);
                        }
                    });
                }
                RenderCommand::Polygon { points, fill } => {
                    with_clip(self.window, &clip_stack, |window| {
                        paint_polygon(window, points, *fill);
                    });
                }
                RenderCommand::Rect { rect, style } => {
                    with_clip(self.window, &clip_stack, |window| {
                        paint_rect(window, *rect, *style);
                    });
                }
                RenderCommand::Text {
                    position,
                    text,
                    style,
                } => {
                    let cx = &mut *self.cx;
                    with_clip(self.window, &clip_stack, |window| {
                        paint_text(window, cx, *position, text, style);
                    });
                }
            }
        }
        Ok(())
    }
}

fn paint_lines(window: &mut Window, segments: &[LineSegment], style: LineStyle) {
    if segments.is_empty() {
        return;
    }
    let width = style.width.max(0.5);
    let mut builder = PathBuilder::stroke(px(width));
    for segment in segments {
        for (start, end) in dash_pieces(*segment, style.dash, width) {
            builder.move_to(point(px(start.x), px(start.y)));
            builder.line_to(point(px(end.x), px(end.y)));
        }
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(style.color));
    }
}

/// On/off lengths of a dash pattern, in multiples of the line width.
fn dash_pattern(dash: LineDash) -> &'static [f32] {
    match dash {
        LineDash::Solid => &[],
        LineDash::Dashed => &[3.7, 1.6],
        LineDash::Dotted => &[1.0, 1.65],
        LineDash::DashDot => &[6.4, 1.6, 1.0, 1.6],
    }
}

/// Split one segment into the visible pieces of a dash pattern. The pattern
/// restarts on every segment.
fn dash_pieces(
    segment: LineSegment,
    dash: LineDash,
    width: f32,
) -> Vec<(ScreenPoint, ScreenPoint)> {
    let pattern = dash_pattern(dash);
    let dx = segment.end.x - segment.start.x;
    let dy = segment.end.y - segment.start.y;
    let length = (dx * dx + dy * dy).sqrt();
    if pattern.is_empty() || length <= f32::EPSILON {
        return vec![(segment.start, segment.end)];
    }
    let at = |distance: f32| {
        let t = (distance / length).min(1.0);
        ScreenPoint::new(segment.start.x + dx * t, segment.start.y + dy * t)
    };
    let mut pieces = Vec::new();
    let mut travelled = 0.0;
    for (index, step) in pattern.iter().cycle().enumerate() {
        if travelled >= length {
            break;
        }
        let next = travelled + step * width;
        if index % 2 == 0 {
            pieces.push((at(travelled), at(next)));
        }
        travelled = next;
    }
    pieces
}

fn paint_marker(window: &mut Window, center: ScreenPoint, style: MarkerStyle) {
    let size = style.size.max(2.0);
    let half = size * 0.5;
    match style.shape {
        MarkerShape::Circle | MarkerShape::Point => {
            let radius = if style.shape == MarkerShape::Point {
                half * 0.5
            } else {
                half
            };
            paint_square(window, center, radius, radius, style.color);
        }
        MarkerShape::Square => paint_square(window, center, half, 0.0, style.color),
        MarkerShape::Plus | MarkerShape::Cross => {
            let (a, b) = if style.shape == MarkerShape::Plus {
                ((half, 0.0), (0.0, half))
            } else {
                ((half, half), (half, -half))
            };
            let mut builder = PathBuilder::stroke(px(1.0));
            for (ox, oy) in [a, b] {
                builder.move_to(point(px(center.x - ox), px(center.y - oy)));
                builder.line_to(point(px(center.x + ox), px(center.y + oy)));
            }
            if let Ok(path) = builder.build() {
                window.paint_path(path, to_rgba(style.color));
            }
        }
    }
}

fn paint_square(window: &mut Window, center: ScreenPoint, half: f32, corner: f32, color: Color) {
    let bounds = Bounds::from_corners(
        point(px(center.x - half), px(center.y - half)),
        point(px(center.x + half), px(center.y + half)),
    );
    window.paint_quad(quad(
        bounds,
        Corners::all(px(corner)),
        to_rgba(color),
        Edges::all(px(0.0)),
        to_rgba(color),
        BorderStyle::default(),
    ));
}

fn paint_polygon(window: &mut Window, points: &[ScreenPoint], fill: Color) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    if rest.len() < 2 {
        return;
    }
    let mut builder = PathBuilder::fill();
    builder.move_to(point(px(first.x), px(first.y)));
    for vertex in rest {
        builder.line_to(point(px(vertex.x), px(vertex.y)));
    }
    builder.close();
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(fill));
    }
}

fn paint_rect(window: &mut Window, rect: ScreenRect, style: RectStyle) {
    let quad = quad(
        to_bounds(rect),
        Corners::all(px(0.0)),
        to_rgba(style.fill),
        Edges::all(px(style.stroke_width)),
        to_rgba(style.stroke),
        BorderStyle::default(),
    );
    window.paint_quad(quad);
}

fn paint_text(
    window: &mut Window,
    cx: &mut App,
    position: ScreenPoint,
    text: &str,
    style: &TextStyle,
) {
    if text.is_empty() {
        return;
    }
    if style.vertical {
        // GPUI cannot rotate text; stack the glyphs instead.
        let step = style.size * 1.1;
        let count = text.chars().count() as f32;
        let top = position.y - step * count * 0.5;
        let horizontal = TextStyle {
            vertical: false,
            anchor: TextAnchor::Middle,
            ..*style
        };
        for (index, glyph) in text.chars().enumerate() {
            let y = top + step * index as f32;
            let mut buffer = [0; 4];
            paint_text(
                window,
                cx,
                ScreenPoint::new(position.x, y),
                glyph.encode_utf8(&mut buffer),
                &horizontal,
            );
        }
        return;
    }
    let run = TextRun {
        len: text.len(),
        font: font(".SystemUIFont"),
        color: to_hsla(style.color),
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    let shaped = window
        .text_system()
        .shape_line(text.to_string().into(), px(style.size), &[run], None);
    let width = f32::from(shaped.width);
    let x = match style.anchor {
        TextAnchor::Start => position.x,
        TextAnchor::Middle => position.x - width * 0.5,
        TextAnchor::End => position.x - width,
    };
    let line_height = shaped.ascent + shaped.descent;
    let origin = point(px(x), px(position.y) - line_height * 0.5);
    let _ = shaped.paint(origin, line_height, window, cx);
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}

fn to_bounds(rect: ScreenRect) -> Bounds<Pixels> {
    Bounds::from_corners(
        point(px(rect.min.x), px(rect.min.y)),
        point(px(rect.max.x), px(rect.max.y)),
    )
}

pub(crate) fn from_bounds(bounds: Bounds<Pixels>) -> ScreenRect {
    ScreenRect::from_size(
        f32::from(bounds.origin.x),
        f32::from(bounds.origin.y),
        f32::from(bounds.size.width),
        f32::from(bounds.size.height),
    )
}

fn with_clip(window: &mut Window, stack: &[ContentMask<Pixels>], f: impl FnOnce(&mut Window)) {
    if let Some(mask) = stack.last() {
        window.with_content_mask(Some(mask.clone()), f);
    } else {
        f(window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(length: f32) -> LineSegment {
        LineSegment::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(length, 0.0))
    }

    #[test]
    fn solid_lines_stay_whole() {
        let pieces = dash_pieces(segment(10.0), LineDash::Solid, 1.0);
        assert_eq!(pieces.len(), 1);
    }

    #[test]
    fn dashes_cover_only_on_steps() {
        let pieces = dash_pieces(segment(10.0), LineDash::Dashed, 1.0);
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].0.x, 0.0);
        assert!((pieces[0].1.x - 3.7).abs() < 1e-5);
        assert!((pieces[1].0.x - 5.3).abs() < 1e-5);
        assert!((pieces[1].1.x - 9.0).abs() < 1e-5);
    }
}
