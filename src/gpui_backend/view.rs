use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use gpui::prelude::*;
use gpui::{Bounds, MouseMoveEvent, Pixels, Window, canvas, div};
use log::warn;

use crate::figure::Figure;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{Color, RenderCommand, RenderList, Renderer, TextAnchor, TextStyle};

use super::paint::{GpuiRenderer, from_bounds, to_hsla};

const READOUT_MARGIN: f32 = 6.0;
const READOUT_SIZE: f32 = 12.0;

#[derive(Debug, Default)]
struct ViewState {
    canvas: Option<ScreenRect>,
    cursor: Option<ScreenPoint>,
}

/// A GPUI view that draws a [`Figure`] and shows a coordinate readout for
/// the cursor.
#[derive(Clone)]
pub struct FigureView {
    figure: Arc<RwLock<Figure>>,
    state: Arc<RwLock<ViewState>>,
}

impl FigureView {
    /// Create a view over a figure.
    pub fn new(figure: Figure) -> Self {
        Self {
            figure: Arc::new(RwLock::new(figure)),
            state: Arc::new(RwLock::new(ViewState::default())),
        }
    }

    /// Get a handle for mutating the figure from elsewhere.
    pub fn figure_handle(&self) -> FigureHandle {
        FigureHandle {
            figure: Arc::clone(&self.figure),
        }
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        let cursor = ScreenPoint::new(f32::from(ev.position.x), f32::from(ev.position.y));
        write_lock(&self.state).cursor = Some(cursor);
        cx.notify();
    }
}

impl Render for FigureView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let figure = Arc::clone(&self.figure);
        let state = Arc::clone(&self.state);
        let background = read_lock(&self.figure).theme().background;

        div()
            .size_full()
            .bg(to_hsla(background))
            .child(
                canvas(
                    |bounds: Bounds<Pixels>, _, _| bounds,
                    move |_, bounds, window, cx| {
                        let mut state = write_lock(&state);
                        state.canvas = Some(from_bounds(bounds));
                        let mut figure = write_lock(&figure);
                        let mut renderer = GpuiRenderer::new(bounds, window, cx);
                        if let Err(err) = figure.draw(&mut renderer) {
                            warn!("figure draw failed: {err}");
                        }
                        let readout = state
                            .canvas
                            .zip(state.cursor)
                            .and_then(|(canvas, cursor)| figure.format_coord(canvas, cursor));
                        if let Some(readout) = readout {
                            let list = readout_list(renderer.bounds(), readout, background);
                            if let Err(err) = renderer.render(&list) {
                                warn!("readout draw failed: {err}");
                            }
                        }
                    },
                )
                .size_full(),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }))
    }
}

fn readout_list(canvas: ScreenRect, readout: String, background: Color) -> RenderList {
    let mut list = RenderList::new();
    let foreground = if background.r + background.g + background.b > 1.5 {
        Color::BLACK
    } else {
        Color::WHITE
    };
    list.push(RenderCommand::Text {
        position: ScreenPoint::new(
            canvas.max.x - READOUT_MARGIN,
            canvas.max.y - READOUT_MARGIN - READOUT_SIZE * 0.5,
        ),
        text: readout,
        style: TextStyle {
            color: foreground,
            size: READOUT_SIZE,
            anchor: TextAnchor::End,
            vertical: false,
        },
    });
    list
}

/// A handle for mutating a [`Figure`] held inside a [`FigureView`].
///
/// The handle clones cheaply and can be moved into async tasks.
#[derive(Clone)]
pub struct FigureHandle {
    figure: Arc<RwLock<Figure>>,
}

impl FigureHandle {
    /// Read the figure; it stays locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&Figure) -> R) -> R {
        f(&read_lock(&self.figure))
    }

    /// Mutate the figure; it stays locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut Figure) -> R) -> R {
        f(&mut write_lock(&self.figure))
    }
}

fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
