use core::fmt;

/// Rejected construction input.
///
/// Construction either succeeds completely or fails with this error leaving
/// nothing behind; there is no partially-initialized table state.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The load-factor window must satisfy `0 < lower < upper < 1`.
    InvalidLoadFactors {
        /// The rejected lower bound.
        lower: f64,
        /// The rejected upper bound.
        upper: f64,
    },
    /// Bulk construction was given key and value sequences of different
    /// lengths.
    LengthMismatch {
        /// Number of keys supplied.
        keys: usize,
        /// Number of values supplied.
        values: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLoadFactors { lower, upper } => {
                write!(f, "invalid load factors: ({lower}, {upper})")
            }
            ConfigError::LengthMismatch { keys, values } => {
                write!(f, "mismatched input lengths: {keys} keys, {values} values")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A keyed lookup (`at`, `bucket_size`) was made with a key that is not in
/// the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyNotFoundError;

impl fmt::Display for KeyNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("key not found in map")
    }
}

impl std::error::Error for KeyNotFoundError {}
