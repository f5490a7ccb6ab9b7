//! # temprs
//!
//! Time series analysis library for Rust with pandas-like missing-value
//! handling:
//!
//! - a validated, immutable [`TimeSeries`] container (univariate or
//!   multivariate, one shared time axis)
//! - the [`NA`] missing-value wrapper with a NaN sentinel boundary
//! - gap imputation via [`fill_missing`] (constant extension at the
//!   edges, linear or quadratic interpolation inside)
//! - missingness reporting via [`missing_ratio`]
//! - time-axis construction via [`date_range`]

pub mod error;
pub mod missing;
pub mod na;
pub mod temporal;

// Re-export commonly used types
pub use error::{Error, Result};
pub use missing::{fill_missing, missing_ratio, FillMethod};
pub use na::NA;
pub use temporal::{date_range, Frequency, Temporal, TimeSeries};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
