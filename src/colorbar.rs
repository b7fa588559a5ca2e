//! Colorbars and their placement next to a parent axes.

use log::debug;

use crate::artist::ArtistId;
use crate::colors::{Colormap, Norm};
use crate::geom::FigureRect;

/// How a colorbar obtained its space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorbarPlacement {
    /// A divider slot of fixed size appended to the parent's right side.
    AxesGrid {
        /// Slot width as a fraction of the parent width.
        size: f32,
        /// Gap as a fraction of the parent width.
        pad: f32,
    },
    /// A fraction of the parent width stolen from its right side.
    Steal {
        /// Fraction of the parent width given to the colorbar.
        fraction: f32,
        /// Gap as a fraction of the parent width.
        pad: f32,
    },
}

/// A colorbar attached to an axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Colorbar {
    pub(crate) rect: FigureRect,
    pub(crate) mappable: ArtistId,
    pub(crate) norm: Norm,
    pub(crate) cmap: Colormap,
    pub(crate) label: Option<String>,
    pub(crate) fraction: f32,
    pub(crate) use_axesgrid: bool,
}

impl Colorbar {
    /// Create a colorbar for a mappable artist.
    pub fn new(rect: FigureRect, mappable: ArtistId, norm: Norm, cmap: Colormap) -> Self {
        Self {
            rect,
            mappable,
            norm,
            cmap,
            label: None,
            fraction: 0.0,
            use_axesgrid: false,
        }
    }

    /// Colorbar position in figure fractions.
    pub fn rect(&self) -> FigureRect {
        self.rect
    }

    /// The artist whose colors this colorbar explains.
    pub fn mappable(&self) -> ArtistId {
        self.mappable
    }

    /// Normalization shared with the mappable.
    pub fn norm(&self) -> Norm {
        self.norm
    }

    /// Colormap shared with the mappable.
    pub fn cmap(&self) -> Colormap {
        self.cmap
    }

    /// Label drawn along the colorbar.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Set the label drawn along the colorbar.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    /// Fraction of the parent stolen for this colorbar.
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    /// Whether the colorbar is recorded as divider-managed.
    pub fn use_axesgrid(&self) -> bool {
        self.use_axesgrid
    }
}

/// Split `parent` into a shrunk parent and a colorbar rectangle.
pub fn place_colorbar(parent: FigureRect, placement: ColorbarPlacement) -> (FigureRect, FigureRect) {
    let (size, pad) = match placement {
        ColorbarPlacement::AxesGrid { size, pad } => (size, pad),
        ColorbarPlacement::Steal { fraction, pad } => (fraction, pad),
    };
    let colorbar_width = parent.width * size;
    let gap = parent.width * pad;
    let parent_width = (parent.width - colorbar_width - gap).max(0.0);
    let shrunk = FigureRect::new(parent.left, parent.bottom, parent_width, parent.height);
    let colorbar = FigureRect::new(
        parent.left + parent_width + gap,
        parent.bottom,
        colorbar_width,
        parent.height,
    );
    debug!("placed colorbar ({placement:?}): parent {shrunk:?}, colorbar {colorbar:?}");
    (shrunk, colorbar)
}
