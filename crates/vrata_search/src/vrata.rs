//! The vrata resolver.
//!
//! Finds the next ekādaśī fast on or after a civil date: locate the first
//! sunrise inside the ekādaśī tithi, test the preceding night's relevant
//! sub-aruṇodaya instant for daśamī (postponing one day when it is),
//! detect two-day atiriktā fasts, and derive the pāraṇam window.

use chrono::NaiveDate;
use vrata_astro::{Ephemeris, Tithi};
use vrata_time::{DoubleDays, DoubleHours, JulDaysUt};

use crate::error::CalcError;
use crate::masa::ekadashi_name_for_sunrise;
use crate::paran::{compute_atirikta_paran, compute_paran, Paran};
use crate::tithi_search::find_tithi_start;
use crate::vrata_types::{Vrata, VrataTimePoints, VrataType};

/// Skip just past a found event when asking for the next one (~86 s).
const NEXT_EVENT_STEP: DoubleDays = DoubleDays(0.001);

/// Local solar midnight preceding 0h UT of `date`, from the longitude
/// alone (one hour per 15° east).
fn astronomical_midnight(date: NaiveDate, longitude: f64) -> JulDaysUt {
    JulDaysUt::from_date(date) - DoubleDays(longitude / 360.0)
}

fn next_sunrise(eph: &Ephemeris, sunrise: JulDaysUt) -> Result<JulDaysUt, CalcError> {
    eph.find_sunrise(sunrise + NEXT_EVENT_STEP)
        .map_err(|_| CalcError::CantFindSunriseAfter(sunrise))
}

fn sunset_after(eph: &Ephemeris, t: JulDaysUt) -> Result<JulDaysUt, CalcError> {
    eph.find_sunset(t).map_err(|_| CalcError::CantFindSunsetAfter(t))
}

/// Sunset of the night that ends at `sunrise`.
fn sunset_before_sunrise(eph: &Ephemeris, sunrise: JulDaysUt) -> Result<JulDaysUt, CalcError> {
    sunset_after(eph, sunrise - DoubleDays(1.0))
}

/// Compute every ativṛddhādi reference instant of the night preceding
/// `sunrise1`, plus the four surrounding tithi boundaries.
///
/// The boundary searches are seeded inside the *previous* tithi so the
/// forward-only initial step of the solver lands on the correct boundary:
/// ekādaśī from 25h before sunrise, daśamī from 27h before that, and the
/// later boundaries an hour past the one before.
fn time_points_for_sunrise(
    eph: &Ephemeris,
    sunrise1: JulDaysUt,
) -> Result<VrataTimePoints, CalcError> {
    let sunset0 = sunset_before_sunrise(eph, sunrise1)?;

    let ekadashi_start =
        find_tithi_start(eph, sunrise1 - DoubleHours(25.0), Tithi::new(Tithi::EKADASHI))?;
    let dashami_start = find_tithi_start(
        eph,
        ekadashi_start - DoubleHours(27.0),
        Tithi::new(Tithi::DASHAMI),
    )?;
    let dvadashi_start = find_tithi_start(
        eph,
        ekadashi_start + DoubleHours(1.0),
        Tithi::new(Tithi::DVADASHI),
    )?;
    let trayodashi_start = find_tithi_start(
        eph,
        dvadashi_start + DoubleHours(1.0),
        Tithi::new(Tithi::TRAYODASHI),
    )?;

    // A sunrise-to-sunrise cycle is 60 ghaṭikās, so 54gh40v of the cycle
    // is 5gh20v before sunrise, counted in night-ghaṭikās (night / 30).
    let ghatika = (sunrise1 - sunset0) / 30.0;
    let vighatika = ghatika / 60.0;

    Ok(VrataTimePoints {
        sunset0,
        sunrise1,
        ativrddha_54gh_40vigh: sunrise1 - ghatika * 5.0 - vighatika * 20.0,
        vrddha_55gh: sunrise1 - ghatika * 5.0,
        samyam_55gh_50vigh: sunrise1 - ghatika * 4.0 - vighatika * 10.0,
        hrasva_55gh_55vigh: sunrise1 - ghatika * 4.0 - vighatika * 5.0,
        arunodaya: sunrise1 - ghatika * 4.0,
        dashami_start,
        ekadashi_start,
        dvadashi_start,
        trayodashi_start,
    })
}

/// Resolve the next ekādaśī vrata on or after `after` for the adapter's
/// location.
///
/// # Panics
///
/// Panics if the date sanity check demands a second restart in one call —
/// that cannot happen with a consistent ephemeris and indicates a logic
/// bug rather than bad astronomical input.
pub fn find_next_vrata(after: NaiveDate, eph: &Ephemeris) -> Result<Vrata, CalcError> {
    let location = eph.location();
    let midnight = astronomical_midnight(after, location.longitude);

    // Start three days early: on far-eastern longitudes the ekādaśī that
    // matters can begin late on the preceding civil days.
    let mut start_time = midnight - DoubleDays(3.0);
    let mut run_number = 0;

    loop {
        run_number += 1;
        if run_number > 2 {
            panic!(
                "{} after {after} ({start_time}): potential eternal loop detected",
                location.name
            );
        }

        let ekadashi_ut = find_tithi_start(eph, start_time, Tithi::new(Tithi::EKADASHI))?;
        let mut sunrise1 = eph
            .find_sunrise(ekadashi_ut)
            .map_err(|_| CalcError::CantFindSunriseAfter(ekadashi_ut))?;

        let mut times = time_points_for_sunrise(eph, sunrise1)?;
        let mut sunrise0 = None;
        if eph.tithi(times.relevant_instant()).is_dashami() {
            // Pūrva-viddhā: daśamī still runs at the test instant, so the
            // fast moves to the next sunrise. A daśamī reading there too
            // would be a contradiction, not a case.
            sunrise0 = Some(sunrise1);
            sunrise1 = next_sunrise(eph, sunrise1)?;
            times = time_points_for_sunrise(eph, sunrise1)?;
        }

        let vrata_date = sunrise1.local_date(location.time_zone);
        if vrata_date < after {
            // The three-day offset reached back into the previous
            // ekādaśī; redo the whole search from plain midnight.
            start_time = midnight;
            continue;
        }

        let ekadashi_name = ekadashi_name_for_sunrise(eph, sunrise1)?;

        let sunset1 = sunset_after(eph, sunrise1)?;
        let sunrise2 = next_sunrise(eph, sunrise1)?;
        let sunset2 = sunset_after(eph, sunrise2)?;
        let sunrise3 = next_sunrise(eph, sunrise2)?;

        let base_type = if eph.tithi(sunrise1).is_ekadashi() && eph.tithi(sunrise2).is_ekadashi() {
            VrataType::WithAtiriktaEkadashi
        } else if eph.tithi(sunrise2).is_dvadashi() && eph.tithi(sunrise3).is_dvadashi() {
            VrataType::WithAtiriktaDvadashi
        } else {
            VrataType::Ekadashi
        };
        let vrata_type = if sunrise0.is_some() {
            base_type.sandigdha()
        } else {
            base_type
        };

        let dvadashi_end = times.trayodashi_start;
        let (paran, sunrise3, sunset3) = if base_type == VrataType::Ekadashi {
            let paran = compute_paran(
                sunrise2,
                sunset2,
                times.dvadashi_start,
                dvadashi_end,
                location.time_zone,
            );
            (paran, None, None)
        } else {
            let sunset3 = sunset_after(eph, sunrise3)?;
            let paran =
                compute_atirikta_paran(sunrise3, sunset3, dvadashi_end, location.time_zone);
            (paran, Some(sunrise3), Some(sunset3))
        };

        return Ok(Vrata {
            vrata_type,
            ekadashi_name,
            date: vrata_date,
            location: location.clone(),
            sunrise0,
            sunset0: times.sunset0,
            sunrise1,
            sunset1,
            sunrise2,
            sunset2,
            sunrise3,
            sunset3,
            times,
            paran,
        });
    }
}
