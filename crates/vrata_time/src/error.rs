//! Error types for time and zone handling.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from civil-time conversions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimeError {
    /// The IANA zone name is not in the bundled tz database.
    UnknownTimeZone(String),
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTimeZone(name) => write!(f, "unknown time zone: {name}"),
        }
    }
}

impl Error for TimeError {}
