//! Registry-wide calculation: latitude fallback, one-day back-off retry,
//! and the process-wide memo cache.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;

use vrata_astro::{CalcFlags, Ephemeris, Location, LocationRegistry};

use crate::error::CalcError;
use crate::vrata::find_next_vrata;
use crate::vrata_types::Vrata;

/// Result slot for one location.
pub type MaybeVrata = Result<Vrata, CalcError>;

/// Everything computed for one base date across the registry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VratasForDate {
    pub vratas: Vec<MaybeVrata>,
}

impl VratasForDate {
    pub fn len(&self) -> usize {
        self.vratas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vratas.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MaybeVrata> {
        self.vratas.iter()
    }

    fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.vratas.iter().filter_map(|v| v.as_ref().ok()).map(|v| v.date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// Earliest successful vrata date.
    pub fn min_date(&self) -> Option<NaiveDate> {
        self.date_range().map(|(lo, _)| lo)
    }

    /// Latest successful vrata date.
    pub fn max_date(&self) -> Option<NaiveDate> {
        self.date_range().map(|(_, hi)| hi)
    }

    /// True when every successful result falls on the same ekādaśī
    /// (civil dates within one day of each other — longitude alone can
    /// legitimately spread one ekādaśī over two dates).
    pub fn all_from_same_ekadashi(&self) -> bool {
        match self.date_range() {
            Some((lo, hi)) => (hi - lo).num_days() <= 1,
            None => true,
        }
    }
}

/// Retry with the latitude stepped down a degree at a time until the
/// needed sunrises and sunsets exist, or 60° is reached.
fn decrease_latitude_and_find(after: NaiveDate, location: &Location, flags: CalcFlags) -> MaybeVrata {
    let mut adjusted = location.clone();
    adjusted.latitude_adjusted = true;
    loop {
        adjusted.latitude -= 1.0;
        let vrata = find_next_vrata(after, &Ephemeris::new(adjusted.clone(), flags));
        if vrata.is_ok() || adjusted.latitude <= 60.0 {
            return vrata;
        }
    }
}

/// Resolve one location, falling back to lowered latitudes for polar
/// sunrise/sunset failures.
pub fn calc_one(after: NaiveDate, location: &Location, flags: CalcFlags) -> MaybeVrata {
    let vrata = find_next_vrata(after, &Ephemeris::new(location.clone(), flags));
    match vrata {
        Err(CalcError::CantFindSunriseAfter(_)) | Err(CalcError::CantFindSunsetAfter(_))
            if location.latitude > 60.0 =>
        {
            decrease_latitude_and_find(after, location, flags)
        }
        other => other,
    }
}

/// Resolve one location by registry name.
pub fn calc_one_named(after: NaiveDate, name: &str, flags: CalcFlags) -> MaybeVrata {
    match LocationRegistry::find(name) {
        Some(location) => calc_one(after, &location, flags),
        None => Err(CalcError::CantFindLocation(name.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CalcKey {
    date: NaiveDate,
    flags: CalcFlags,
}

static CACHE: Lazy<Mutex<HashMap<CalcKey, VratasForDate>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn try_calc_all(date: NaiveDate, flags: CalcFlags) -> VratasForDate {
    VratasForDate {
        vratas: LocationRegistry::all()
            .iter()
            .map(|location| calc_one(date, location, flags))
            .collect(),
    }
}

/// Resolve the whole registry for a base date.
///
/// When the result spans more than one civil day, eastern locations have
/// already moved on to the next ekādaśī; one retry from the previous day
/// realigns the set. Results are memoised per `(date, flags)` for the
/// life of the process; cached values are cloned out.
pub fn calc_all(date: NaiveDate, flags: CalcFlags) -> VratasForDate {
    let key = CalcKey { date, flags };
    {
        let cache = CACHE.lock().expect("vrata cache mutex poisoned");
        if let Some(found) = cache.get(&key) {
            return found.clone();
        }
    }

    let mut vratas = try_calc_all(date, flags);
    if !vratas.all_from_same_ekadashi() {
        vratas = try_calc_all(date - Duration::days(1), flags);
    }

    CACHE
        .lock()
        .expect("vrata cache mutex poisoned")
        .insert(key, vratas.clone());
    vratas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn unknown_location_is_typed_error() {
        let r = calc_one_named(date(2020, 1, 1), "Atlantis", CalcFlags::default());
        assert_eq!(r, Err(CalcError::CantFindLocation("Atlantis".into())));
    }

    #[test]
    fn murmansk_fallback_adjusts_latitude() {
        let r = calc_one_named(date(2020, 6, 3), "Murmansk", CalcFlags::default()).unwrap();
        assert!(r.location.latitude_adjusted);
        assert!(r.location_name().contains("adjusted"));
        assert!(r.location.latitude < 68.9585);
        assert!(r.location.latitude > 60.0);
        // Longitude and zone survive the adjustment.
        assert!((r.location.longitude - 33.0827).abs() < 1e-9);
        assert_eq!(r.location.time_zone, chrono_tz::Europe::Moscow);
    }

    #[test]
    fn empty_set_counts_as_aligned() {
        assert!(VratasForDate::default().all_from_same_ekadashi());
    }

    #[test]
    fn span_detection() {
        let a = calc_one_named(date(2020, 1, 1), "Udupi", CalcFlags::default());
        let b = calc_one_named(date(2020, 1, 1), "London", CalcFlags::default());
        let set = VratasForDate { vratas: vec![a, b] };
        assert!(set.all_from_same_ekadashi());
    }
}
