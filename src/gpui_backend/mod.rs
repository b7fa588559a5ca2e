//! GPUI integration for gwplot.
//!
//! [`FigureView`] paints a [`Figure`](crate::Figure) into a GPUI window and
//! shows a coordinate readout (GPS-formatted on GPS axes) for the cursor.

mod paint;
mod view;

pub use view::{FigureHandle, FigureView};
