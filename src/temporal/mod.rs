//! Time axis utilities and the time series container.
//!
//! The container pairs a strictly increasing time axis with one or more
//! numeric columns. Missing observations are represented with [`NA`],
//! so downstream code never has to reason about NaN payloads directly.

mod date_range;
mod frequency;

use std::fmt::{self, Debug};
use std::ops::{Add, Sub};

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::na::NA;

pub use self::date_range::date_range;
pub use self::frequency::Frequency;

/// A point on a time axis.
///
/// Implemented for the chrono types a series is usually indexed by. The
/// arithmetic bounds let `date_range` step a grid without knowing the
/// concrete type.
pub trait Temporal:
    Clone
    + Debug
    + PartialOrd
    + Add<Duration, Output = Self>
    + Sub<Duration, Output = Self>
    + 'static
{
    /// Parses a time point from its canonical text form.
    fn parse(s: &str) -> Result<Self>;

    /// Renders the time point in its canonical text form.
    fn format(&self) -> String;
}

impl Temporal for NaiveDate {
    fn parse(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| Error::Format(format!("Cannot parse date '{}': {}", s, e)))
    }

    fn format(&self) -> String {
        NaiveDate::format(self, "%Y-%m-%d").to_string()
    }
}

impl Temporal for NaiveDateTime {
    fn parse(s: &str) -> Result<Self> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
            .map_err(|e| Error::Format(format!("Cannot parse datetime '{}': {}", s, e)))
    }

    fn format(&self) -> String {
        NaiveDateTime::format(self, "%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl Temporal for DateTime<Utc> {
    fn parse(s: &str) -> Result<Self> {
        s.parse::<DateTime<Utc>>()
            .map_err(|e| Error::Format(format!("Cannot parse timestamp '{}': {}", s, e)))
    }

    fn format(&self) -> String {
        self.to_rfc3339()
    }
}

/// A time-indexed collection of one or more numeric columns sharing one
/// time axis.
///
/// Instances are immutable: every operation hands back a new series and
/// leaves the input untouched. The time axis is validated to be strictly
/// increasing at construction, and every column must match its length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeries<T: Temporal> {
    /// Column-major observations
    columns: Vec<Vec<NA<f64>>>,
    /// Time axis shared by all columns
    timestamps: Vec<T>,
    /// Optional series name
    name: Option<String>,
    /// Sampling frequency hint
    #[serde(skip)]
    frequency: Option<Frequency>,
}

impl<T: Temporal> TimeSeries<T> {
    /// Creates a univariate series.
    pub fn new(values: Vec<NA<f64>>, timestamps: Vec<T>, name: Option<String>) -> Result<Self> {
        Self::from_columns(vec![values], timestamps, name)
    }

    /// Creates a series from one or more columns sharing `timestamps`.
    pub fn from_columns(
        columns: Vec<Vec<NA<f64>>>,
        timestamps: Vec<T>,
        name: Option<String>,
    ) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::EmptyData(
                "A time series needs at least one column".to_string(),
            ));
        }
        for column in &columns {
            if column.len() != timestamps.len() {
                return Err(Error::LengthMismatch {
                    expected: timestamps.len(),
                    actual: column.len(),
                });
            }
        }
        ensure_strictly_increasing(&timestamps)?;

        Ok(TimeSeries {
            columns,
            timestamps,
            name,
            frequency: None,
        })
    }

    /// Creates a univariate series from raw floats, treating NaN entries
    /// as missing observations.
    pub fn from_f64(values: Vec<f64>, timestamps: Vec<T>, name: Option<String>) -> Result<Self> {
        let values = values.into_iter().map(NA::from_f64).collect();
        Self::new(values, timestamps, name)
    }

    /// Creates a multivariate series from raw float columns, treating NaN
    /// entries as missing observations.
    pub fn from_f64_columns(
        columns: Vec<Vec<f64>>,
        timestamps: Vec<T>,
        name: Option<String>,
    ) -> Result<Self> {
        let columns = columns
            .into_iter()
            .map(|column| column.into_iter().map(NA::from_f64).collect())
            .collect();
        Self::from_columns(columns, timestamps, name)
    }

    /// Number of time points.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the series has no time points.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Number of value columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// The time axis.
    pub fn timestamps(&self) -> &[T] {
        &self.timestamps
    }

    /// The first (for a univariate series: the only) column.
    pub fn values(&self) -> &[NA<f64>] {
        &self.columns[0]
    }

    /// All columns in order.
    pub fn columns(&self) -> &[Vec<NA<f64>>] {
        &self.columns
    }

    /// A single column by position.
    pub fn column(&self, index: usize) -> Result<&[NA<f64>]> {
        self.columns
            .get(index)
            .map(Vec::as_slice)
            .ok_or(Error::IndexOutOfBounds {
                index,
                size: self.columns.len(),
            })
    }

    /// The series name.
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// Sets the series name.
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// The sampling frequency hint.
    pub fn frequency(&self) -> Option<&Frequency> {
        self.frequency.as_ref()
    }

    /// Sets the sampling frequency hint.
    pub fn with_frequency(mut self, freq: Frequency) -> Self {
        self.frequency = Some(freq);
        self
    }

    /// Concatenates the columns of two series sharing an identical time
    /// axis into one multivariate series.
    pub fn stack(&self, other: &TimeSeries<T>) -> Result<Self> {
        if self.timestamps != other.timestamps {
            return Err(Error::Consistency(
                "Cannot stack series with different time axes".to_string(),
            ));
        }

        let mut columns = self.columns.clone();
        columns.extend(other.columns.iter().cloned());

        Ok(TimeSeries {
            columns,
            timestamps: self.timestamps.clone(),
            name: self.name.clone(),
            frequency: self.frequency.clone(),
        })
    }

    /// Returns a copy with every observed value rounded to `digits`
    /// decimal digits. Missing observations stay missing.
    pub fn round_to(&self, digits: u32) -> Self {
        let factor = 10f64.powi(digits as i32);
        let columns = self
            .columns
            .iter()
            .map(|column| {
                column
                    .iter()
                    .map(|v| v.map(|x| (x * factor).round() / factor))
                    .collect()
            })
            .collect();

        TimeSeries {
            columns,
            timestamps: self.timestamps.clone(),
            name: self.name.clone(),
            frequency: self.frequency.clone(),
        }
    }

    /// Total number of missing observations across all columns.
    pub fn na_count(&self) -> usize {
        self.columns
            .iter()
            .flat_map(|column| column.iter())
            .filter(|v| v.is_na())
            .count()
    }

    /// Total number of observed values across all columns.
    pub fn value_count(&self) -> usize {
        self.len() * self.n_columns() - self.na_count()
    }

    /// Whether any observation is missing.
    pub fn has_na(&self) -> bool {
        self.columns
            .iter()
            .any(|column| column.iter().any(|v| v.is_na()))
    }

    /// Number of missing observations per column.
    pub fn na_counts(&self) -> Vec<usize> {
        self.columns
            .iter()
            .map(|column| column.iter().filter(|v| v.is_na()).count())
            .collect()
    }

    /// Per-column mean of the observed values; NA where a column has none.
    pub fn mean(&self) -> Vec<NA<f64>> {
        self.columns.iter().map(|c| column_mean(c)).collect()
    }

    /// Per-column minimum of the observed values; NA where a column has none.
    pub fn min(&self) -> Vec<NA<f64>> {
        self.columns
            .iter()
            .map(|c| column_fold(c, f64::INFINITY, f64::min))
            .collect()
    }

    /// Per-column maximum of the observed values; NA where a column has none.
    pub fn max(&self) -> Vec<NA<f64>> {
        self.columns
            .iter()
            .map(|c| column_fold(c, f64::NEG_INFINITY, f64::max))
            .collect()
    }

    /// Rebuilds the series with new columns, keeping axis and metadata.
    /// The column count and lengths must match the existing shape.
    pub(crate) fn with_columns(&self, columns: Vec<Vec<NA<f64>>>) -> Result<Self> {
        if columns.len() != self.columns.len() {
            return Err(Error::LengthMismatch {
                expected: self.columns.len(),
                actual: columns.len(),
            });
        }
        for column in &columns {
            if column.len() != self.timestamps.len() {
                return Err(Error::LengthMismatch {
                    expected: self.timestamps.len(),
                    actual: column.len(),
                });
            }
        }

        Ok(TimeSeries {
            columns,
            timestamps: self.timestamps.clone(),
            name: self.name.clone(),
            frequency: self.frequency.clone(),
        })
    }
}

// Equality is element-wise over the time axis and the observations; name
// and frequency metadata do not participate.
impl<T: Temporal> PartialEq for TimeSeries<T> {
    fn eq(&self, other: &Self) -> bool {
        self.timestamps == other.timestamps && self.columns == other.columns
    }
}

impl<T: Temporal> fmt::Display for TimeSeries<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            writeln!(f, "{}", name)?;
        }
        for (i, ts) in self.timestamps.iter().enumerate() {
            write!(f, "{}", ts.format())?;
            for column in &self.columns {
                write!(f, "\t{}", column[i])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn ensure_strictly_increasing<T: Temporal>(timestamps: &[T]) -> Result<()> {
    for pair in timestamps.windows(2) {
        if pair[0] >= pair[1] {
            return Err(Error::Consistency(format!(
                "Time axis must be strictly increasing; {} is not before {}",
                pair[0].format(),
                pair[1].format()
            )));
        }
    }
    Ok(())
}

fn column_mean(column: &[NA<f64>]) -> NA<f64> {
    let observed: Vec<f64> = column.iter().filter_map(|v| v.value().copied()).collect();
    if observed.is_empty() {
        return NA::NA;
    }

    let count: f64 = match num_traits::cast(observed.len()) {
        Some(n) => n,
        None => return NA::NA,
    };
    NA::Value(observed.iter().sum::<f64>() / count)
}

fn column_fold(column: &[NA<f64>], init: f64, f: fn(f64, f64) -> f64) -> NA<f64> {
    let mut any = false;
    let mut acc = init;
    for v in column {
        if let Some(x) = v.value() {
            any = true;
            acc = f(acc, *x);
        }
    }
    if any {
        NA::Value(acc)
    } else {
        NA::NA
    }
}
