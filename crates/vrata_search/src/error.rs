//! Error type for vrata calculation.

use std::error::Error;
use std::fmt::{Display, Formatter};

use vrata_astro::Tithi;
use vrata_time::JulDaysUt;

/// Why a vrata could not be resolved.
///
/// Every variant is a typed value returned across the resolver boundary;
/// nothing astronomical panics. The instants carried are the search
/// starting points, for diagnostics.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CalcError {
    /// The ephemeris found no sunrise after the given instant
    /// (polar latitudes).
    CantFindSunriseAfter(JulDaysUt),
    /// The ephemeris found no sunset after the given instant.
    CantFindSunsetAfter(JulDaysUt),
    /// The tithi-boundary iteration hit its cap without converging.
    CantFindTithiAfter(Tithi, JulDaysUt),
    /// The named location is not in the registry.
    CantFindLocation(String),
}

impl Display for CalcError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CantFindSunriseAfter(t) => write!(f, "can't find sunrise after {t}"),
            Self::CantFindSunsetAfter(t) => write!(f, "can't find sunset after {t}"),
            Self::CantFindTithiAfter(tithi, t) => {
                write!(f, "can't find {tithi} tithi after {t}")
            }
            Self::CantFindLocation(name) => write!(f, "can't find location '{name}'"),
        }
    }
}

impl Error for CalcError {}
