//! Astronomical base layer for the vrata engine.
//!
//! This crate provides:
//! - Apparent solar and lunar ecliptic longitudes (analytic series)
//! - Lahiri ayanāṁśa and sidereal solar longitude
//! - Tithi arithmetic on the Moon−Sun elongation
//! - Sunrise/sunset with selectable disc-centre/disc-edge horizon crossing
//! - Named observer locations and the built-in location registry
//! - The `Ephemeris` adapter the resolver consumes
//!
//! All implementations are clean-room, from standard published formulas
//! (Meeus, IERS, USNO).

pub mod ayanamsha;
pub mod ephemeris;
pub mod error;
pub mod location;
pub mod lunar;
pub mod riseset;
pub mod solar;
pub mod tithi;

pub use ayanamsha::lahiri_ayanamsha_deg;
pub use ephemeris::Ephemeris;
pub use error::AstroError;
pub use location::{CalcFlags, Location, LocationRegistry, SunLimb};
pub use lunar::moon_apparent_longitude_deg;
pub use riseset::{compute_rise_set, RiseSetEvent, RiseSetResult};
pub use solar::{
    mean_obliquity_deg, normalize_360, nutation_longitude_deg, sun_apparent_longitude_deg,
    sun_distance_au, sun_equatorial_rad,
};
pub use tithi::{Tithi, TITHI_SEGMENT_DEG};
