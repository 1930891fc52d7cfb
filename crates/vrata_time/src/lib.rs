//! Time quantities for the vrata engine.
//!
//! This crate provides:
//! - Julian Date ↔ Gregorian calendar conversions
//! - `JulDaysUt`, the UT Julian-day scalar, with typed day/hour durations
//! - Zoned wall-time conversion and ceiling/floor rounding via `chrono-tz`
//! - A ΔT (TT − UT) estimate for ephemeris evaluation
//! - Greenwich Mean Sidereal Time for the rise/set solver

pub mod delta_t;
pub mod error;
pub mod julian;
pub mod juldays;
pub mod sidereal;
pub mod zoned;

pub use delta_t::delta_t_seconds;
pub use error::TimeError;
pub use julian::{calendar_to_jd, jd_to_calendar, J2000_JD, SECONDS_PER_DAY};
pub use juldays::{
    proportional_time, DoubleDays, DoubleGhatikas, DoubleHours, JulDaysUt, JD_EPSILON,
};
pub use sidereal::{gmst_rad, local_sidereal_rad, SIDEREAL_RATE};
pub use zoned::locate_zone;
