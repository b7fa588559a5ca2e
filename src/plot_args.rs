//! Unwrapping of labeled series in line-plot arguments.

use crate::rectilinear::PlotArg;

/// Rewrites positional `plot` arguments before the base parser sees them.
///
/// Every one-dimensional [`Series`](crate::Series) becomes its index
/// followed by its values, so `plot(series)` draws against the series
/// index rather than sample numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlotArgsProcessor;

impl PlotArgsProcessor {
    /// Expand series arguments, keeping every other argument in place.
    pub fn grab_next_args(&self, args: Vec<PlotArg>) -> Vec<PlotArg> {
        let mut expanded = Vec::with_capacity(args.len() + 1);
        for arg in args {
            match arg {
                PlotArg::Series(series) if series.ndim() == 1 => {
                    expanded.push(PlotArg::Values(series.index().to_vec()));
                    expanded.push(PlotArg::Values(series.values().to_vec()));
                }
                other => expanded.push(other),
            }
        }
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Series;

    #[test]
    fn series_expands_to_index_and_values() {
        let series = Series::regular("h1", 100.0, 0.5, vec![1.0, 2.0]);
        let args = PlotArgsProcessor.grab_next_args(crate::plot_args![series, "r-"]);
        assert_eq!(
            args,
            vec![
                PlotArg::Values(vec![100.0, 100.5]),
                PlotArg::Values(vec![1.0, 2.0]),
                PlotArg::Format("r-".to_owned()),
            ]
        );
    }

    #[test]
    fn plain_arguments_pass_through() {
        let args = crate::plot_args![vec![1.0], vec![2.0], "k"];
        assert_eq!(PlotArgsProcessor.grab_next_args(args.clone()), args);
    }
}
