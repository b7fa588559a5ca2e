//! Registry mapping projection names to axes factories.
//!
//! The extended [`Axes`] is registered as `rectilinear`, so every figure
//! created through [`Figure::add_subplot`](crate::Figure::add_subplot) gets
//! GPS support by default.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use log::debug;
use once_cell::sync::Lazy;

use crate::axes::Axes;
use crate::error::{PlotError, Result};
use crate::geom::FigureRect;

/// Name of the default projection.
pub const RECTILINEAR: &str = "rectilinear";

/// Creates an axes at a figure position.
pub type ProjectionFactory = Arc<dyn Fn(FigureRect) -> Axes + Send + Sync>;

static PROJECTIONS: Lazy<RwLock<HashMap<String, ProjectionFactory>>> = Lazy::new(|| {
    let mut projections: HashMap<String, ProjectionFactory> = HashMap::new();
    projections.insert(RECTILINEAR.to_owned(), Arc::new(Axes::at));
    RwLock::new(projections)
});

/// Register (or replace) a projection.
pub fn register_projection(
    name: impl Into<String>,
    factory: impl Fn(FigureRect) -> Axes + Send + Sync + 'static,
) {
    let name = name.into();
    let mut projections = PROJECTIONS
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if projections.insert(name.clone(), Arc::new(factory)).is_some() {
        debug!("replaced projection {name:?}");
    }
}

/// Look up a projection by name.
pub fn projection(name: &str) -> Result<ProjectionFactory> {
    PROJECTIONS
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .get(name)
        .cloned()
        .ok_or_else(|| PlotError::UnknownProjection(name.to_owned()))
}

/// Registered projection names, sorted.
pub fn projection_names() -> Vec<String> {
    let projections = PROJECTIONS
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let mut names: Vec<String> = projections.keys().cloned().collect();
    names.sort();
    names
}
