//! Tithi-boundary search.
//!
//! Locates the next instant at which the running tithi reaches a target
//! value, by fixed-point iteration with the mean tithi length as the
//! approximate Jacobian. The actual tithi length varies about ±10% around
//! the mean, so each step overshoots slightly; the step sequence contracts
//! until floating point stagnates at the root, which is the regular exit.

use vrata_astro::{Ephemeris, Tithi};
use vrata_time::{DoubleHours, JulDaysUt};

use crate::error::CalcError;

/// Mean tithi length: 23h 37m.
const AVERAGE_TITHI_HOURS: f64 = 23.0 + 37.0 / 60.0;

/// Hard cap on iterations; hitting it means the input is pathological.
const MAX_ITERATIONS: usize = 1_000;

/// Find the nearest instant at or after `from` where the tithi equals
/// `target`.
///
/// When the forward distance to `target` is 15 tithis or more, the
/// opposite-pakṣa boundary 15 tithis earlier is searched instead, so the
/// function finds the next instance of either half-cycle boundary.
pub fn find_tithi_start(
    eph: &Ephemeris,
    from: JulDaysUt,
    target: Tithi,
) -> Result<JulDaysUt, CalcError> {
    let average_tithi_length = DoubleHours(AVERAGE_TITHI_HOURS);

    let mut target = target;
    let mut delta = eph.tithi(from).positive_delta_until(target);
    if delta >= 15.0 {
        target += 15.0;
        delta -= 15.0;
    }

    let mut time = from + average_tithi_length * delta;
    let mut cur = eph.tithi(time);

    let mut prev_abs_delta = f64::MAX;
    let mut iteration = 0;

    while cur != target {
        let delta = cur.delta_to_nearest(target);
        time = time + average_tithi_length * delta;
        cur = eph.tithi(time);

        // Stagnation exit: the step stopped shrinking, so we are at the
        // root to machine precision.
        let abs_delta = delta.abs();
        if abs_delta >= prev_abs_delta {
            break;
        }
        prev_abs_delta = abs_delta;

        iteration += 1;
        if iteration >= MAX_ITERATIONS {
            return Err(CalcError::CantFindTithiAfter(target, from));
        }
    }
    Ok(time)
}
