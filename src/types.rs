//! Labeled data containers: one-dimensional [`Series`] and two-dimensional
//! [`Array2D`].

use ndarray::{Array2, ArrayView2};

use crate::error::{PlotError, Result};
use crate::geom::Point;

/// One-dimensional values paired with an index (time or frequency).
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    index: Vec<f64>,
    values: Vec<f64>,
    unit: Option<String>,
}

impl Series {
    /// Create a series; index and values must have the same length.
    pub fn new(name: impl Into<String>, index: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        if index.len() != values.len() {
            return Err(PlotError::LengthMismatch {
                what: "series index",
                expected: values.len(),
                found: index.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            index,
            values,
            unit: None,
        })
    }

    /// Create a regularly sampled series starting at `x0` with step `dx`.
    pub fn regular(name: impl Into<String>, x0: f64, dx: f64, values: Vec<f64>) -> Self {
        let index = (0..values.len()).map(|i| x0 + dx * i as f64).collect();
        Self {
            name: name.into(),
            index,
            values,
            unit: None,
        }
    }

    /// Attach a unit to the values.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Series name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index values.
    pub fn index(&self) -> &[f64] {
        &self.index
    }

    /// Data values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Unit of the values, if known.
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Number of dimensions; a series is always one-dimensional.
    pub fn ndim(&self) -> usize {
        1
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Samples as `(index, value)` points.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.index
            .iter()
            .zip(&self.values)
            .map(|(&x, &y)| Point::new(x, y))
    }
}

/// Two-dimensional values with X and Y indices.
///
/// Values are shaped `(nx, ny)`: the first dimension runs along X.
#[derive(Debug, Clone, PartialEq)]
pub struct Array2D {
    name: String,
    values: Array2<f64>,
    xindex: Vec<f64>,
    yindex: Vec<f64>,
}

impl Array2D {
    /// Create an array; the value shape must be `(xindex.len(), yindex.len())`.
    pub fn new(
        name: impl Into<String>,
        values: Array2<f64>,
        xindex: Vec<f64>,
        yindex: Vec<f64>,
    ) -> Result<Self> {
        let (rows, cols) = values.dim();
        if rows != xindex.len() || cols != yindex.len() {
            return Err(PlotError::ShapeMismatch {
                rows,
                cols,
                expected_rows: xindex.len(),
                expected_cols: yindex.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            values,
            xindex,
            yindex,
        })
    }

    /// Create a regularly sampled array.
    pub fn regular(
        name: impl Into<String>,
        values: Array2<f64>,
        (x0, dx): (f64, f64),
        (y0, dy): (f64, f64),
    ) -> Self {
        let (rows, cols) = values.dim();
        Self {
            name: name.into(),
            xindex: (0..rows).map(|i| x0 + dx * i as f64).collect(),
            yindex: (0..cols).map(|j| y0 + dy * j as f64).collect(),
            values,
        }
    }

    /// Array name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Values shaped `(nx, ny)`.
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// X index.
    pub fn xindex(&self) -> &[f64] {
        &self.xindex
    }

    /// Y index.
    pub fn yindex(&self) -> &[f64] {
        &self.yindex
    }

    /// X extent `(start, end)`, the end one sample step past the last index.
    pub fn xspan(&self) -> (f64, f64) {
        span(&self.xindex)
    }

    /// Y extent `(start, end)`, the end one sample step past the last index.
    pub fn yspan(&self) -> (f64, f64) {
        span(&self.yindex)
    }
}

fn span(index: &[f64]) -> (f64, f64) {
    match index {
        [] => (0.0, 0.0),
        [only] => (*only, only + 1.0),
        [.., before, last] => (index[0], last + (last - before)),
    }
}
