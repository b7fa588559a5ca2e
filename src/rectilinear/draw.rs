//! Render list construction for the base axes.

use log::debug;

use crate::artist::{Artist, AxesImage, Legend, LegendHandle, LegendLoc, Line2D, Origin, QuadMesh};
use crate::axis::{Axis, format_number, linear_ticks, log_ticks};
use crate::colorbar::Colorbar;
use crate::colors::{Color, Norm, NormKind};
use crate::config::{RcParams, rc_params};
use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::render::{
    LineSegment, LineStyle, MarkerStyle, RectStyle, RenderCommand, RenderList, TextAnchor,
    TextStyle, build_line_segments, build_scatter_points,
};
use crate::style::Theme;
use crate::transform::Transform;
use crate::view::Range;

use super::{AxesBackend, Rectilinear};

const TICK_LENGTH: f32 = 3.5;
const LABEL_PAD: f32 = 4.0;
const CHAR_WIDTH: f32 = 0.6;
const COLORBAR_STEPS: usize = 64;
const LINE_MARKER_SIZE: f32 = 6.0;

pub(super) fn build_render_list(axes: &Rectilinear, canvas: ScreenRect) -> RenderList {
    let rc = rc_params();
    let theme = *axes.theme();
    let plot_rect = axes.position().to_screen(canvas);
    let viewport = axes.viewport();
    let mut render = RenderList::new();

    render.push(RenderCommand::Rect {
        rect: plot_rect,
        style: RectStyle {
            fill: theme.background,
            stroke: Color::TRANSPARENT,
            stroke_width: 0.0,
        },
    });

    let transform = Transform::new(
        viewport,
        plot_rect,
        axes.get_xscale(),
        axes.get_yscale(),
    );
    match &transform {
        Some(transform) => {
            render.push(RenderCommand::ClipRect(plot_rect));
            for artist in axes.artists() {
                build_artist(&mut render, artist, transform, plot_rect);
            }
            render.push(RenderCommand::ClipEnd);
        }
        None => debug!("view limits {viewport:?} cannot be mapped; skipping artists"),
    }

    render.push(RenderCommand::Rect {
        rect: plot_rect,
        style: RectStyle {
            fill: Color::TRANSPARENT,
            stroke: theme.axis,
            stroke_width: rc.axes_linewidth,
        },
    });

    let mut y_label_width = 0.0_f32;
    if let Some(transform) = &transform {
        build_x_ticks(&mut render, axes.xaxis(), viewport.x, transform, &theme, &rc);
        y_label_width = build_y_ticks(&mut render, axes.yaxis(), viewport.y, transform, &theme, &rc);
    }
    build_axis_labels(&mut render, axes, plot_rect, y_label_width, &theme, &rc);

    if let Some(legend) = axes.get_legend() {
        build_legend(&mut render, legend, plot_rect, &theme, &rc);
    }
    for colorbar in axes.colorbars() {
        build_colorbar(&mut render, colorbar, colorbar.rect().to_screen(canvas), &theme, &rc);
    }
    render
}

fn build_artist(render: &mut RenderList, artist: &Artist, transform: &Transform, clip: ScreenRect) {
    match artist {
        Artist::Line(line) => build_line(render, line, transform, clip),
        Artist::Fill(fill) => {
            let forward = fill.x().iter().zip(fill.y1());
            let backward = fill.x().iter().zip(fill.y2()).rev();
            let points: Vec<ScreenPoint> = forward
                .chain(backward)
                .filter_map(|(&x, &y)| transform.data_to_screen(Point::new(x, y)))
                .collect();
            if points.len() >= 3 {
                render.push(RenderCommand::Polygon {
                    points,
                    fill: fill.color().with_alpha(fill.alpha().unwrap_or(1.0)),
                });
            }
        }
        Artist::Scatter(scatter) => {
            let data: Vec<Point> = scatter
                .x()
                .iter()
                .zip(scatter.y())
                .map(|(&x, &y)| Point::new(x, y))
                .collect();
            let mut placed = Vec::new();
            build_scatter_points(&data, transform, clip, &mut placed);
            if placed.is_empty() {
                return;
            }
            let style = scatter.marker_style();
            match scatter.point_colors() {
                Some(colors) => render.push(RenderCommand::ColoredPoints {
                    colors: placed
                        .iter()
                        .map(|(index, _)| colors.get(*index).copied().unwrap_or(Color::TRANSPARENT))
                        .collect(),
                    points: placed.into_iter().map(|(_, point)| point).collect(),
                    style,
                }),
                None => render.push(RenderCommand::Points {
                    points: placed.into_iter().map(|(_, point)| point).collect(),
                    style,
                }),
            }
        }
        Artist::Image(image) => build_image(render, image, transform),
        Artist::Mesh(mesh) => build_mesh(render, mesh, transform),
    }
}

fn build_line(render: &mut RenderList, line: &Line2D, transform: &Transform, clip: ScreenRect) {
    let points: Vec<Point> = line
        .xdata()
        .iter()
        .zip(line.ydata())
        .map(|(&x, &y)| Point::new(x, y))
        .collect();
    let stroke = line.stroke();
    if line.dash().is_some() {
        let mut segments = Vec::new();
        build_line_segments(&points, transform, clip, &mut segments);
        if !segments.is_empty() {
            render.push(RenderCommand::LineSegments {
                segments,
                style: stroke,
            });
        }
    }
    if let Some(shape) = line.marker() {
        let mut placed = Vec::new();
        build_scatter_points(&points, transform, clip, &mut placed);
        if !placed.is_empty() {
            render.push(RenderCommand::Points {
                points: placed.into_iter().map(|(_, point)| point).collect(),
                style: MarkerStyle {
                    color: stroke.color,
                    size: LINE_MARKER_SIZE,
                    shape,
                },
            });
        }
    }
}

fn build_image(render: &mut RenderList, image: &AxesImage, transform: &Transform) {
    let [left, right, bottom, top] = image.extent();
    let (rows, cols) = image.data().dim();
    let (start, end) = match image.origin() {
        Origin::Upper => (top, bottom),
        Origin::Lower => (bottom, top),
    };
    let norm = image.norm();
    for ((row, col), value) in image.data().indexed_iter() {
        let Some(scaled) = norm.normalize(*value) else {
            continue;
        };
        let x0 = left + (right - left) * col as f64 / cols as f64;
        let x1 = left + (right - left) * (col + 1) as f64 / cols as f64;
        let y0 = start + (end - start) * row as f64 / rows as f64;
        let y1 = start + (end - start) * (row + 1) as f64 / rows as f64;
        let (Some(a), Some(b)) = (
            transform.data_to_screen(Point::new(x0, y0)),
            transform.data_to_screen(Point::new(x1, y1)),
        ) else {
            continue;
        };
        render.push(RenderCommand::Rect {
            rect: ScreenRect::new(
                ScreenPoint::new(a.x.min(b.x), a.y.min(b.y)),
                ScreenPoint::new(a.x.max(b.x), a.y.max(b.y)),
            ),
            style: RectStyle {
                fill: image.cmap().map(scaled),
                stroke: Color::TRANSPARENT,
                stroke_width: 0.0,
            },
        });
    }
}

fn build_mesh(render: &mut RenderList, mesh: &QuadMesh, transform: &Transform) {
    let (x, y) = (mesh.x(), mesh.y());
    let norm = mesh.norm();
    for ((row, col), value) in mesh.c().indexed_iter() {
        let Some(scaled) = norm.normalize(*value) else {
            continue;
        };
        let corners = [(row, col), (row, col + 1), (row + 1, col + 1), (row + 1, col)];
        let points: Option<Vec<ScreenPoint>> = corners
            .iter()
            .map(|&index| transform.data_to_screen(Point::new(x[index], y[index])))
            .collect();
        if let Some(points) = points {
            render.push(RenderCommand::Polygon {
                points,
                fill: mesh.cmap().map(scaled),
            });
        }
    }
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * CHAR_WIDTH
}

fn build_x_ticks(
    render: &mut RenderList,
    axis: &Axis,
    view: Range,
    transform: &Transform,
    theme: &Theme,
    rc: &RcParams,
) {
    let plot_rect = transform.screen();
    let mut segments = Vec::new();
    for tick in axis.ticks(view) {
        if !view.contains(tick) {
            continue;
        }
        let Some(x) = transform.map_x(tick) else {
            continue;
        };
        segments.push(LineSegment::new(
            ScreenPoint::new(x, plot_rect.max.y),
            ScreenPoint::new(x, plot_rect.max.y + TICK_LENGTH),
        ));
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(x, plot_rect.max.y + TICK_LENGTH + LABEL_PAD),
            text: axis.tick_label(tick, view),
            style: TextStyle {
                color: theme.axis,
                size: rc.font_size,
                anchor: TextAnchor::Middle,
                vertical: false,
            },
        });
    }
    push_ticks(render, segments, theme, rc);
}

/// Returns the widest tick label, for placing the axis label.
fn build_y_ticks(
    render: &mut RenderList,
    axis: &Axis,
    view: Range,
    transform: &Transform,
    theme: &Theme,
    rc: &RcParams,
) -> f32 {
    let plot_rect = transform.screen();
    let mut segments = Vec::new();
    let mut widest = 0.0_f32;
    for tick in axis.ticks(view) {
        if !view.contains(tick) {
            continue;
        }
        let Some(y) = transform.map_y(tick) else {
            continue;
        };
        segments.push(LineSegment::new(
            ScreenPoint::new(plot_rect.min.x - TICK_LENGTH, y),
            ScreenPoint::new(plot_rect.min.x, y),
        ));
        let text = axis.tick_label(tick, view);
        widest = widest.max(text_width(&text, rc.font_size));
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(
                plot_rect.min.x - TICK_LENGTH - LABEL_PAD,
                y - rc.font_size * 0.5,
            ),
            text,
            style: TextStyle {
                color: theme.axis,
                size: rc.font_size,
                anchor: TextAnchor::End,
                vertical: false,
            },
        });
    }
    push_ticks(render, segments, theme, rc);
    widest
}

fn push_ticks(render: &mut RenderList, segments: Vec<LineSegment>, theme: &Theme, rc: &RcParams) {
    if segments.is_empty() {
        return;
    }
    render.push(RenderCommand::LineSegments {
        segments,
        style: LineStyle {
            color: theme.axis,
            width: rc.axes_linewidth,
            ..LineStyle::default()
        },
    });
}

fn build_axis_labels(
    render: &mut RenderList,
    axes: &Rectilinear,
    plot_rect: ScreenRect,
    y_label_width: f32,
    theme: &Theme,
    rc: &RcParams,
) {
    let center_x = (plot_rect.min.x + plot_rect.max.x) * 0.5;
    let center_y = (plot_rect.min.y + plot_rect.max.y) * 0.5;
    let xlabel = axes.xaxis().label_text();
    if !xlabel.is_empty() {
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(
                center_x,
                plot_rect.max.y + TICK_LENGTH + LABEL_PAD * 2.0 + rc.font_size,
            ),
            text: xlabel.to_owned(),
            style: TextStyle {
                color: theme.axis,
                size: rc.font_size,
                anchor: TextAnchor::Middle,
                vertical: false,
            },
        });
    }
    let ylabel = axes.yaxis().label_text();
    if !ylabel.is_empty() {
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(
                plot_rect.min.x - TICK_LENGTH - LABEL_PAD * 2.0 - y_label_width - rc.font_size,
                center_y,
            ),
            text: ylabel.to_owned(),
            style: TextStyle {
                color: theme.axis,
                size: rc.font_size,
                anchor: TextAnchor::Middle,
                vertical: true,
            },
        });
    }
    if let Some(title) = axes.title() {
        let size = rc.font_size * 1.2;
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(center_x, plot_rect.min.y - LABEL_PAD - size),
            text: title.to_owned(),
            style: TextStyle {
                color: theme.axis,
                size,
                anchor: TextAnchor::Middle,
                vertical: false,
            },
        });
    }
}

fn build_legend(
    render: &mut RenderList,
    legend: &Legend,
    plot_rect: ScreenRect,
    theme: &Theme,
    rc: &RcParams,
) {
    let font_size = rc.font_size;
    let line_height = font_size * 1.6;
    let padding = font_size * 0.5;
    let swatch_width = font_size * 2.0;
    let title_rows = usize::from(legend.title().is_some());
    let widest = legend
        .entries()
        .iter()
        .map(|entry| entry.label.as_str())
        .chain(legend.title())
        .map(|text| text_width(text, font_size))
        .fold(0.0_f32, f32::max);
    let width = padding * 3.0 + swatch_width + widest;
    let height = (legend.entries().len() + title_rows) as f32 * line_height + padding * 2.0;

    let left = match legend.loc() {
        LegendLoc::UpperLeft | LegendLoc::LowerLeft => plot_rect.min.x + padding,
        LegendLoc::UpperRight | LegendLoc::LowerRight => plot_rect.max.x - width - padding,
    };
    let top = match legend.loc() {
        LegendLoc::UpperLeft | LegendLoc::UpperRight => plot_rect.min.y + padding,
        LegendLoc::LowerLeft | LegendLoc::LowerRight => plot_rect.max.y - height - padding,
    };
    let frame = legend.frame();
    render.push(RenderCommand::Rect {
        rect: ScreenRect::from_size(left, top, width, height),
        style: RectStyle {
            fill: frame.face.with_alpha(frame.alpha),
            stroke: frame.edge.with_alpha(frame.alpha),
            stroke_width: frame.linewidth,
        },
    });

    let text_style = TextStyle {
        color: theme.axis,
        size: font_size,
        anchor: TextAnchor::Start,
        vertical: false,
    };
    let mut row_top = top + padding;
    if let Some(title) = legend.title() {
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(left + padding, row_top),
            text: title.to_owned(),
            style: text_style.clone(),
        });
        row_top += line_height;
    }
    for entry in legend.entries() {
        let center_y = row_top + line_height * 0.5;
        let swatch_start = ScreenPoint::new(left + padding, center_y);
        let swatch_end = ScreenPoint::new(swatch_start.x + swatch_width, center_y);
        match entry.handle {
            LegendHandle::Line(style) => render.push(RenderCommand::LineSegments {
                segments: vec![LineSegment::new(swatch_start, swatch_end)],
                style,
            }),
            LegendHandle::Patch(fill) => render.push(RenderCommand::Rect {
                rect: ScreenRect::from_size(
                    swatch_start.x,
                    center_y - font_size * 0.35,
                    swatch_width,
                    font_size * 0.7,
                ),
                style: RectStyle {
                    fill,
                    stroke: Color::TRANSPARENT,
                    stroke_width: 0.0,
                },
            }),
            LegendHandle::Marker(style) => render.push(RenderCommand::Points {
                points: vec![ScreenPoint::new(
                    (swatch_start.x + swatch_end.x) * 0.5,
                    center_y,
                )],
                style,
            }),
        }
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(swatch_end.x + padding, center_y - font_size * 0.5),
            text: entry.label.clone(),
            style: text_style.clone(),
        });
        row_top += line_height;
    }
}

fn build_colorbar(
    render: &mut RenderList,
    colorbar: &Colorbar,
    rect: ScreenRect,
    theme: &Theme,
    rc: &RcParams,
) {
    if !rect.is_valid() {
        return;
    }
    let step = rect.height() / COLORBAR_STEPS as f32;
    for index in 0..COLORBAR_STEPS {
        let value = (index as f64 + 0.5) / COLORBAR_STEPS as f64;
        let bottom = rect.max.y - index as f32 * step;
        render.push(RenderCommand::Rect {
            rect: ScreenRect::new(
                ScreenPoint::new(rect.min.x, bottom - step),
                ScreenPoint::new(rect.max.x, bottom),
            ),
            style: RectStyle {
                fill: colorbar.cmap().map(value),
                stroke: Color::TRANSPARENT,
                stroke_width: 0.0,
            },
        });
    }
    render.push(RenderCommand::Rect {
        rect,
        style: RectStyle {
            fill: Color::TRANSPARENT,
            stroke: theme.axis,
            stroke_width: rc.axes_linewidth,
        },
    });

    let norm = colorbar.norm();
    let mut label_width = 0.0_f32;
    if let (Some(vmin), Some(vmax)) = (norm.vmin, norm.vmax) {
        let range = Range::new(vmin, vmax);
        let ticks = match norm.kind {
            NormKind::Linear => linear_ticks(range, 5),
            NormKind::Log => log_ticks(range),
        };
        let unclipped = Norm { clip: false, ..norm };
        let mut segments = Vec::new();
        for tick in ticks {
            let Some(position) = unclipped.normalize(tick) else {
                continue;
            };
            if !(0.0..=1.0).contains(&position) {
                continue;
            }
            let y = rect.max.y - position as f32 * rect.height();
            segments.push(LineSegment::new(
                ScreenPoint::new(rect.max.x, y),
                ScreenPoint::new(rect.max.x + TICK_LENGTH, y),
            ));
            let text = format_number(tick);
            label_width = label_width.max(text_width(&text, rc.font_size));
            render.push(RenderCommand::Text {
                position: ScreenPoint::new(
                    rect.max.x + TICK_LENGTH + LABEL_PAD,
                    y - rc.font_size * 0.5,
                ),
                text,
                style: TextStyle {
                    color: theme.axis,
                    size: rc.font_size,
                    anchor: TextAnchor::Start,
                    vertical: false,
                },
            });
        }
        push_ticks(render, segments, theme, rc);
    }
    if let Some(label) = colorbar.label() {
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(
                rect.max.x + TICK_LENGTH + LABEL_PAD * 2.0 + label_width,
                (rect.min.y + rect.max.y) * 0.5,
            ),
            text: label.to_owned(),
            style: TextStyle {
                color: theme.axis,
                size: rc.font_size,
                anchor: TextAnchor::Middle,
                vertical: true,
            },
        });
    }
}
