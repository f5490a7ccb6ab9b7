use std::fmt::{self, Debug, Display};

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// A missing-capable value (NA, Not Available).
///
/// Observations in a time series are either present (`Value`) or missing
/// (`NA`). Unlike `Option`, two `NA`s compare equal, which is what
/// element-wise series equality needs.
#[derive(Clone, Copy)]
pub enum NA<T> {
    /// An observed value.
    Value(T),
    /// A missing observation.
    NA,
}

impl<T> NA<T> {
    /// Whether this observation is missing.
    pub fn is_na(&self) -> bool {
        matches!(self, NA::NA)
    }

    /// Whether this observation is present.
    pub fn is_value(&self) -> bool {
        !self.is_na()
    }

    /// The observed value, if present.
    pub fn value(&self) -> Option<&T> {
        match self {
            NA::Value(v) => Some(v),
            NA::NA => None,
        }
    }

    /// Applies `f` to the observed value, keeping NA as is.
    pub fn map<U, F>(&self, f: F) -> NA<U>
    where
        F: FnOnce(&T) -> U,
    {
        match self {
            NA::Value(v) => NA::Value(f(v)),
            NA::NA => NA::NA,
        }
    }
}

impl NA<f64> {
    /// Converts a raw float, treating NaN as the missing-value sentinel.
    ///
    /// This is the boundary between plain `f64` buffers (where a hole is a
    /// NaN) and the typed representation used everywhere else.
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            NA::NA
        } else {
            NA::Value(value)
        }
    }

    /// The observed value, or NaN when missing.
    pub fn to_f64(&self) -> f64 {
        match self {
            NA::Value(v) => *v,
            NA::NA => f64::NAN,
        }
    }
}

impl<T> From<T> for NA<T> {
    fn from(value: T) -> Self {
        NA::Value(value)
    }
}

impl<T> From<Option<T>> for NA<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => NA::Value(v),
            None => NA::NA,
        }
    }
}

impl<T> From<NA<T>> for Option<T> {
    fn from(na: NA<T>) -> Self {
        match na {
            NA::Value(v) => Some(v),
            NA::NA => None,
        }
    }
}

impl<T: Debug> Debug for NA<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NA::Value(v) => write!(f, "{:?}", v),
            NA::NA => write!(f, "NA"),
        }
    }
}

impl<T: Display> Display for NA<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NA::Value(v) => write!(f, "{}", v),
            NA::NA => write!(f, "NA"),
        }
    }
}

impl<T: PartialEq> PartialEq for NA<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NA::Value(a), NA::Value(b)) => a == b,
            (NA::NA, NA::NA) => true,
            _ => false,
        }
    }
}

// Missing observations serialize as JSON null, mirroring how pandas-style
// tooling emits NaN cells.
impl<T: Serialize> Serialize for NA<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            NA::Value(v) => serializer.serialize_some(v),
            NA::NA => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for NA<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(Option::<T>::deserialize(deserializer)?.into())
    }
}
