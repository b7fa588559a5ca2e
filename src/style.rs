//! Axes theming.

use crate::colors::Color;

/// Colors used for the non-data parts of an axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Axes background.
    pub background: Color,
    /// Spines, ticks and text.
    pub axis: Color,
    /// Legend background (frame alpha is applied on top).
    pub legend_bg: Color,
    /// Legend border.
    pub legend_border: Color,
}

impl Theme {
    /// Dark text on a white background.
    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            axis: Color::BLACK,
            legend_bg: Color::WHITE,
            legend_border: Color::rgb8(0xcc, 0xcc, 0xcc),
        }
    }

    /// Light text on a near-black background.
    pub fn dark() -> Self {
        Self {
            background: Color::rgb8(0x12, 0x12, 0x12),
            axis: Color::rgb8(0xdd, 0xdd, 0xdd),
            legend_bg: Color::rgb8(0x20, 0x20, 0x20),
            legend_border: Color::rgb8(0x55, 0x55, 0x55),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
