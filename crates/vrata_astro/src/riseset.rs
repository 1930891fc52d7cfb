//! Sunrise and sunset for one solar day.
//!
//! Iterative hour-angle refinement from standard spherical astronomy
//! (Meeus, USNO): estimate the transit from the local sidereal time at
//! noon, offset by the semi-diurnal arc at the target depression, then
//! re-evaluate the Sun until the correction falls below the convergence
//! threshold. Polar days report `NeverRises`/`NeverSets` instead of an
//! event.

use std::f64::consts::{PI, TAU};

use vrata_time::{
    delta_t_seconds, local_sidereal_rad, DoubleDays, JulDaysUt, J2000_JD, SECONDS_PER_DAY,
    SIDEREAL_RATE,
};

use crate::location::{CalcFlags, Location, SunLimb};
use crate::solar::sun_equatorial_rad;

/// Maximum refinement iterations.
const MAX_ITERATIONS: usize = 8;

/// Convergence threshold in days (~0.086 s).
const CONVERGENCE_DAYS: f64 = 1.0e-6;

/// Atmospheric refraction at the horizon, arcminutes.
const REFRACTION_ARCMIN: f64 = 34.0;

/// Solar angular semidiameter, arcminutes.
const SEMIDIAMETER_ARCMIN: f64 = 16.0;

/// Sidereal rotation rate in radians per day.
const SIDEREAL_RATE_RAD: f64 = TAU * SIDEREAL_RATE;

/// Rise/set event selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiseSetEvent {
    Sunrise,
    Sunset,
}

/// Outcome for one solar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiseSetResult {
    /// The event occurs at the given UT instant.
    Event(JulDaysUt),
    /// The Sun stays below the horizon all day (polar night).
    NeverRises,
    /// The Sun stays above the horizon all day (midnight sun).
    NeverSets,
}

/// Horizon depression in degrees for the configured limb.
fn horizon_depression_deg(flags: CalcFlags) -> f64 {
    match flags.limb {
        SunLimb::DiscCenter => REFRACTION_ARCMIN / 60.0,
        SunLimb::DiscEdge => (REFRACTION_ARCMIN + SEMIDIAMETER_ARCMIN) / 60.0,
    }
}

/// TT Julian Date for a UT instant.
pub(crate) fn jd_tt(t: JulDaysUt) -> f64 {
    let year = 2000.0 + (t.raw() - J2000_JD) / 365.25;
    t.raw() + delta_t_seconds(year) / SECONDS_PER_DAY
}

/// Hour angle of the Sun at `t`, normalized to [−π, π].
fn sun_hour_angle_rad(t: JulDaysUt, ra: f64, longitude_deg: f64) -> f64 {
    let lst = local_sidereal_rad(t.raw(), longitude_deg.to_radians());
    let ha = (lst - ra).rem_euclid(TAU);
    if ha > PI {
        ha - TAU
    } else {
        ha
    }
}

/// Compute one sunrise or sunset for the solar day around `noon_guess`.
///
/// `noon_guess` should be the approximate local solar noon in UT
/// (`0h UT of the date + 0.5 − longitude/360`).
pub fn compute_rise_set(
    event: RiseSetEvent,
    location: &Location,
    flags: CalcFlags,
    noon_guess: JulDaysUt,
) -> RiseSetResult {
    let phi = location.latitude.to_radians();
    let h0_rad = (-horizon_depression_deg(flags)).to_radians();

    let (ra, dec) = sun_equatorial_rad(jd_tt(noon_guess));

    let cos_h = (h0_rad.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos());
    if cos_h > 1.0 {
        return RiseSetResult::NeverRises;
    }
    if cos_h < -1.0 {
        return RiseSetResult::NeverSets;
    }
    let semi_arc = cos_h.acos();

    // Transit: shift noon until the hour angle vanishes.
    let ha_noon = sun_hour_angle_rad(noon_guess, ra, location.longitude);
    let transit = noon_guess - DoubleDays(ha_noon / SIDEREAL_RATE_RAD);

    let offset = DoubleDays(semi_arc / SIDEREAL_RATE_RAD);
    let mut t = match event {
        RiseSetEvent::Sunrise => transit - offset,
        RiseSetEvent::Sunset => transit + offset,
    };

    for _ in 0..MAX_ITERATIONS {
        let (ra_i, dec_i) = sun_equatorial_rad(jd_tt(t));
        let cos_h_i = (h0_rad.sin() - phi.sin() * dec_i.sin()) / (phi.cos() * dec_i.cos());
        if cos_h_i > 1.0 {
            return RiseSetResult::NeverRises;
        }
        if cos_h_i < -1.0 {
            return RiseSetResult::NeverSets;
        }
        let ha_target = match event {
            RiseSetEvent::Sunrise => -cos_h_i.acos(),
            RiseSetEvent::Sunset => cos_h_i.acos(),
        };

        let mut dha = ha_target - sun_hour_angle_rad(t, ra_i, location.longitude);
        if dha > PI {
            dha -= TAU;
        } else if dha < -PI {
            dha += TAU;
        }

        let correction = dha / SIDEREAL_RATE_RAD;
        t += DoubleDays(correction);
        if correction.abs() < CONVERGENCE_DAYS {
            break;
        }
    }

    RiseSetResult::Event(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn noon_for(location: &Location, date: NaiveDate) -> JulDaysUt {
        JulDaysUt::from_date(date) + vrata_time::DoubleDays(0.5 - location.longitude / 360.0)
    }

    fn event_time(r: RiseSetResult) -> JulDaysUt {
        match r {
            RiseSetResult::Event(t) => t,
            other => panic!("expected an event, got {other:?}"),
        }
    }

    #[test]
    fn equator_equinox_half_day() {
        let loc = Location::new("equator", 0.0, 0.0, chrono_tz::UTC);
        let date = NaiveDate::from_ymd_opt(2020, 3, 20).unwrap();
        let noon = noon_for(&loc, date);
        let rise = event_time(compute_rise_set(
            RiseSetEvent::Sunrise,
            &loc,
            CalcFlags::default(),
            noon,
        ));
        let set = event_time(compute_rise_set(
            RiseSetEvent::Sunset,
            &loc,
            CalcFlags::default(),
            noon,
        ));
        assert!(rise < set);
        let day_hours = (set - rise).as_hours().0;
        assert!(
            (11.9..12.4).contains(&day_hours),
            "equinox day length {day_hours}h"
        );
    }

    #[test]
    fn udupi_winter_morning() {
        let loc = Location::new("Udupi", 13.3408, 74.7517, chrono_tz::Asia::Kolkata);
        let date = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        let rise = event_time(compute_rise_set(
            RiseSetEvent::Sunrise,
            &loc,
            CalcFlags::default(),
            noon_for(&loc, date),
        ));
        let local = rise.as_zoned(loc.time_zone);
        // Sunrise in Udupi on New Year is a little before 7 IST.
        assert_eq!(local.date_naive(), date);
        assert!(
            local.hour() == 6 && local.minute() >= 30,
            "Udupi sunrise at {local}"
        );
    }

    #[test]
    fn disc_edge_rises_earlier() {
        let loc = Location::new("London", 51.5074, -0.1278, chrono_tz::Europe::London);
        let noon = noon_for(&loc, NaiveDate::from_ymd_opt(2020, 6, 21).unwrap());
        let center = event_time(compute_rise_set(
            RiseSetEvent::Sunrise,
            &loc,
            CalcFlags::default(),
            noon,
        ));
        let edge = event_time(compute_rise_set(
            RiseSetEvent::Sunrise,
            &loc,
            CalcFlags::disc_edge(),
            noon,
        ));
        let gap_minutes = (center - edge).as_hours().0 * 60.0;
        assert!(
            (0.5..10.0).contains(&gap_minutes),
            "edge leads centre by {gap_minutes} min"
        );
    }

    #[test]
    fn murmansk_midnight_sun() {
        let loc = Location::new("Murmansk", 68.9585, 33.0827, chrono_tz::Europe::Moscow);
        let noon = noon_for(&loc, NaiveDate::from_ymd_opt(2020, 6, 3).unwrap());
        let r = compute_rise_set(RiseSetEvent::Sunset, &loc, CalcFlags::default(), noon);
        assert_eq!(r, RiseSetResult::NeverSets);
    }

    #[test]
    fn murmansk_polar_night() {
        let loc = Location::new("Murmansk", 68.9585, 33.0827, chrono_tz::Europe::Moscow);
        let noon = noon_for(&loc, NaiveDate::from_ymd_opt(2020, 12, 21).unwrap());
        let r = compute_rise_set(RiseSetEvent::Sunrise, &loc, CalcFlags::default(), noon);
        assert_eq!(r, RiseSetResult::NeverRises);
    }
}
