//! Missing-value imputation for time series.
//!
//! This module fills gaps (runs of missing observations) in a
//! [`TimeSeries`] and reports how much of a series is missing:
//!
//! - leading and trailing gaps are extended with the nearest observed
//!   value (backward / forward fill)
//! - interior gaps are interpolated, linearly or with a local quadratic
//! - columns of a multivariate series are processed independently

mod interpolate;

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::na::NA;
use crate::temporal::{Temporal, TimeSeries};

use self::interpolate::{linear_fill, quadratic_fill};

/// Interpolation family applied to interior gaps.
///
/// Leading and trailing gaps are always filled by constant extension of
/// the nearest observed value, whatever the method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMethod {
    /// Straight line between the gap anchors
    #[default]
    Linear,
    /// Local least-squares quadratic through the anchors and their
    /// observed neighbors
    Quadratic,
}

impl FromStr for FillMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linear" => Ok(FillMethod::Linear),
            "quadratic" => Ok(FillMethod::Quadratic),
            other => Err(Error::InvalidMethod(other.to_string())),
        }
    }
}

impl fmt::Display for FillMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillMethod::Linear => write!(f, "linear"),
            FillMethod::Quadratic => write!(f, "quadratic"),
        }
    }
}

/// A maximal run of missing observations within one column, bounded by
/// the nearest observed anchors where they exist.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Gap {
    /// First missing index
    start: usize,
    /// One past the last missing index
    end: usize,
    /// Observed (index, value) directly left of the run, if any
    left: Option<(usize, f64)>,
    /// Observed (index, value) directly right of the run, if any
    right: Option<(usize, f64)>,
}

/// Fills every missing observation in `series`, returning a new series of
/// identical shape on the same time axis.
///
/// Observed values pass through unchanged. Within a column each gap is
/// classified by its bounds: a run touching the start of the axis is
/// back-filled with the first observed value, a run touching the end is
/// forward-filled with the last observed value, and an interior run is
/// interpolated with `method` from its own local anchors.
///
/// Interpolation weights use index distance, which assumes a uniformly
/// spaced time axis; build the axis with [`date_range`] to guarantee
/// this.
///
/// Fails with [`Error::UnfillableGap`] when a column has no observed
/// value at all, and with [`Error::EmptyData`] on a series with no rows.
///
/// [`date_range`]: crate::temporal::date_range
pub fn fill_missing<T: Temporal>(
    series: &TimeSeries<T>,
    method: FillMethod,
) -> Result<TimeSeries<T>> {
    if series.is_empty() {
        return Err(Error::EmptyData(
            "Cannot fill a series with no rows".to_string(),
        ));
    }

    let missing = series.na_count();
    if missing == 0 {
        return Ok(series.clone());
    }

    let mut filled = Vec::with_capacity(series.n_columns());
    for (index, column) in series.columns().iter().enumerate() {
        filled.push(fill_column(column, index, method)?);
    }
    debug!(
        "filled {} missing observations across {} columns (method={})",
        missing,
        series.n_columns(),
        method
    );

    series.with_columns(filled)
}

/// Fraction of missing observations, averaged over columns.
///
/// Each column contributes its own missing fraction, so stacking a column
/// with itself leaves the ratio unchanged. Fails with
/// [`Error::EmptyData`] on a series with no rows.
pub fn missing_ratio<T: Temporal>(series: &TimeSeries<T>) -> Result<f64> {
    if series.is_empty() {
        return Err(Error::EmptyData(
            "Cannot compute a missing ratio for a series with no rows".to_string(),
        ));
    }

    let rows = series.len() as f64;
    let total: f64 = series
        .na_counts()
        .iter()
        .map(|&count| count as f64 / rows)
        .sum();
    Ok(total / series.n_columns() as f64)
}

fn fill_column(column: &[NA<f64>], index: usize, method: FillMethod) -> Result<Vec<NA<f64>>> {
    let gaps = scan_gaps(column);
    if gaps.is_empty() {
        return Ok(column.to_vec());
    }

    let observed = observed_points(column);
    if observed.is_empty() {
        return Err(Error::UnfillableGap { column: index });
    }

    let mut filled = column.to_vec();
    for gap in &gaps {
        match (gap.left, gap.right) {
            // Leading run: extend the first observed value backwards.
            (None, Some((_, value))) => extend_constant(&mut filled, gap, value),
            // Trailing run: extend the last observed value forwards.
            (Some((_, value)), None) => extend_constant(&mut filled, gap, value),
            (Some(left), Some(right)) => {
                let values = match method {
                    FillMethod::Linear => linear_fill(left, right, gap.start, gap.end),
                    FillMethod::Quadratic => {
                        let window = fit_window(&observed, left.0, right.0);
                        quadratic_fill(&window, gap.start, gap.end)
                            .unwrap_or_else(|| linear_fill(left, right, gap.start, gap.end))
                    }
                };
                for (offset, value) in values.into_iter().enumerate() {
                    filled[gap.start + offset] = NA::Value(value);
                }
            }
            (None, None) => return Err(Error::UnfillableGap { column: index }),
        }
    }
    Ok(filled)
}

/// Scans one column for maximal runs of missing observations.
fn scan_gaps(column: &[NA<f64>]) -> Vec<Gap> {
    let n = column.len();
    let mut gaps = Vec::new();
    let mut i = 0;

    while i < n {
        if column[i].is_value() {
            i += 1;
            continue;
        }
        let start = i;
        while i < n && column[i].is_na() {
            i += 1;
        }
        // Runs are maximal, so the positions next to them are observed.
        let left = if start > 0 {
            column[start - 1].value().map(|v| (start - 1, *v))
        } else {
            None
        };
        let right = if i < n {
            column[i].value().map(|v| (i, *v))
        } else {
            None
        };
        gaps.push(Gap {
            start,
            end: i,
            left,
            right,
        });
    }
    gaps
}

fn observed_points(column: &[NA<f64>]) -> Vec<(usize, f64)> {
    column
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.value().map(|x| (i, *x)))
        .collect()
}

/// The quadratic fit window: the two anchors plus up to two further
/// observed neighbors on each side.
fn fit_window(observed: &[(usize, f64)], left_index: usize, right_index: usize) -> Vec<(usize, f64)> {
    let left_pos = observed.partition_point(|&(i, _)| i < left_index);
    let right_pos = observed.partition_point(|&(i, _)| i < right_index);
    let from = left_pos.saturating_sub(2);
    let to = (right_pos + 3).min(observed.len());
    observed[from..to].to_vec()
}

fn extend_constant(column: &mut [NA<f64>], gap: &Gap, value: f64) {
    for slot in &mut column[gap.start..gap.end] {
        *slot = NA::Value(value);
    }
}
