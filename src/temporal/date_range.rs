use chrono::Duration;

use crate::error::{Error, Result};
use crate::temporal::{Frequency, Temporal};

/// Generates a strictly increasing grid of time points from `start` to
/// `end` stepping by `freq`.
///
/// With `closed = true` the end point is included when the grid lands on
/// it exactly; with `closed = false` the range is half-open.
pub fn date_range<T: Temporal>(start: T, end: T, freq: Frequency, closed: bool) -> Result<Vec<T>> {
    if start > end {
        return Err(Error::Consistency(format!(
            "Range start ({}) is after range end ({})",
            start.format(),
            end.format()
        )));
    }

    let step = freq.to_duration();
    if step <= Duration::zero() {
        return Err(Error::Consistency(format!(
            "Frequency {} has a non-positive step",
            freq
        )));
    }

    let mut points = Vec::new();
    let mut current = start;
    loop {
        let past_end = if closed { current > end } else { current >= end };
        if past_end {
            break;
        }
        let next = current.clone() + step;
        // Sub-day steps can be swallowed by date-only time points.
        if next <= current {
            return Err(Error::Consistency(format!(
                "Frequency {} does not advance the time axis at {}",
                freq,
                current.format()
            )));
        }
        points.push(current);
        current = next;
    }

    Ok(points)
}
