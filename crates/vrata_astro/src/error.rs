//! Error types for astronomical calculations.

use std::error::Error;
use std::fmt::{Display, Formatter};

use vrata_time::JulDaysUt;

/// Failures from the ephemeris adapter.
///
/// Rise/set lookups fail at polar latitudes when the Sun does not cross
/// the horizon on the requested day.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum AstroError {
    /// No sunrise exists on the day containing the requested instant.
    NoSunrise(JulDaysUt),
    /// No sunset exists on the day containing the requested instant.
    NoSunset(JulDaysUt),
}

impl Display for AstroError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSunrise(t) => write!(f, "no sunrise after {t}"),
            Self::NoSunset(t) => write!(f, "no sunset after {t}"),
        }
    }
}

impl Error for AstroError {}
