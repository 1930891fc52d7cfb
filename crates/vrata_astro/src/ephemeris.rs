//! The ephemeris adapter.
//!
//! Owns a [`Location`] and a [`CalcFlags`] set and exposes the capability
//! set the vrata resolver runs against: sun/moon longitudes, the running
//! tithi, and next-sunrise/next-sunset lookups. Longitude queries take UT
//! instants; ΔT is applied internally before evaluating the series.

use vrata_time::{DoubleDays, JulDaysUt};

use crate::ayanamsha::lahiri_ayanamsha_deg;
use crate::error::AstroError;
use crate::location::{CalcFlags, Location};
use crate::lunar::moon_apparent_longitude_deg;
use crate::riseset::{compute_rise_set, jd_tt, RiseSetEvent, RiseSetResult};
use crate::solar::{normalize_360, sun_apparent_longitude_deg};
use crate::tithi::Tithi;

/// How many solar days to probe when walking to the next event.
///
/// The first probe day starts one day before `after` to cover events
/// shortly after a far-eastern local midnight.
const EVENT_SEARCH_DAYS: i32 = 4;

/// Read-only ephemeris handle for one location.
#[derive(Debug, Clone)]
pub struct Ephemeris {
    location: Location,
    flags: CalcFlags,
}

impl Ephemeris {
    pub fn new(location: Location, flags: CalcFlags) -> Self {
        Self { location, flags }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn flags(&self) -> CalcFlags {
        self.flags
    }

    /// Apparent geocentric solar longitude in degrees at a UT instant.
    pub fn sun_longitude(&self, t: JulDaysUt) -> f64 {
        sun_apparent_longitude_deg(jd_tt(t))
    }

    /// Apparent geocentric lunar longitude in degrees at a UT instant.
    pub fn moon_longitude(&self, t: JulDaysUt) -> f64 {
        moon_apparent_longitude_deg(jd_tt(t))
    }

    /// Sidereal (Lahiri) solar longitude in degrees at a UT instant.
    ///
    /// Used for amānta month determination, where the month is named by
    /// the rashi the Sun occupies at a new moon.
    pub fn sun_sidereal_longitude(&self, t: JulDaysUt) -> f64 {
        let jd = jd_tt(t);
        normalize_360(sun_apparent_longitude_deg(jd) - lahiri_ayanamsha_deg(jd))
    }

    /// Running tithi at a UT instant.
    pub fn tithi(&self, t: JulDaysUt) -> Tithi {
        let jd = jd_tt(t);
        Tithi::from_longitudes(moon_apparent_longitude_deg(jd), sun_apparent_longitude_deg(jd))
    }

    /// Next sunrise at or after `after`.
    pub fn find_sunrise(&self, after: JulDaysUt) -> Result<JulDaysUt, AstroError> {
        self.find_event(RiseSetEvent::Sunrise, after)
    }

    /// Next sunset at or after `after`.
    pub fn find_sunset(&self, after: JulDaysUt) -> Result<JulDaysUt, AstroError> {
        self.find_event(RiseSetEvent::Sunset, after)
    }

    fn find_event(&self, event: RiseSetEvent, after: JulDaysUt) -> Result<JulDaysUt, AstroError> {
        let fail = || match event {
            RiseSetEvent::Sunrise => AstroError::NoSunrise(after),
            RiseSetEvent::Sunset => AstroError::NoSunset(after),
        };

        // 0h UT at or before `after`, then one approximate local solar
        // noon per probed day.
        let jd_0h = (after.raw() + 0.5).floor() - 0.5;
        for offset in -1..EVENT_SEARCH_DAYS {
            let noon = JulDaysUt::new(jd_0h + f64::from(offset))
                + DoubleDays(0.5 - self.location.longitude / 360.0);
            match compute_rise_set(event, &self.location, self.flags, noon) {
                RiseSetResult::Event(t) if t >= after => return Ok(t),
                RiseSetResult::Event(_) => {}
                RiseSetResult::NeverRises | RiseSetResult::NeverSets => return Err(fail()),
            }
        }
        Err(fail())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationRegistry;
    use chrono::NaiveDate;

    fn udupi() -> Ephemeris {
        Ephemeris::new(
            LocationRegistry::find("Udupi").unwrap(),
            CalcFlags::default(),
        )
    }

    fn jd(y: i32, m: u32, d: u32) -> JulDaysUt {
        JulDaysUt::from_date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn successive_sunrises_one_day_apart() {
        let eph = udupi();
        let s1 = eph.find_sunrise(jd(2019, 1, 1)).unwrap();
        let s2 = eph.find_sunrise(s1 + DoubleDays(0.001)).unwrap();
        let gap = (s2 - s1).0;
        assert!((0.95..1.05).contains(&gap), "sunrise gap {gap} days");
    }

    #[test]
    fn sunrise_is_at_or_after_request() {
        let eph = udupi();
        let after = jd(2019, 1, 1) + DoubleDays(0.7);
        let s = eph.find_sunrise(after).unwrap();
        assert!(s >= after);
    }

    #[test]
    fn sunset_follows_sunrise() {
        let eph = udupi();
        let rise = eph.find_sunrise(jd(2020, 11, 25)).unwrap();
        let set = eph.find_sunset(rise).unwrap();
        let daylight = (set - rise).as_hours().0;
        assert!((10.0..13.0).contains(&daylight), "daylight {daylight}h");
    }

    #[test]
    fn sidereal_lags_tropical_by_the_ayanamsha() {
        let eph = udupi();
        let t = jd(2020, 6, 1);
        let diff = (eph.sun_longitude(t) - eph.sun_sidereal_longitude(t)).rem_euclid(360.0);
        assert!((23.5..24.5).contains(&diff), "ayanamsha offset {diff}");
    }

    #[test]
    fn tithi_advances() {
        let eph = udupi();
        let t0 = eph.tithi(jd(2020, 1, 1));
        let t1 = eph.tithi(jd(2020, 1, 1) + DoubleDays(0.5));
        let step = t0.positive_delta_until(t1);
        assert!((0.3..0.7).contains(&step), "tithi advanced by {step}");
    }

    #[test]
    fn murmansk_summer_has_no_sunset() {
        let eph = Ephemeris::new(
            LocationRegistry::find("Murmansk").unwrap(),
            CalcFlags::default(),
        );
        let err = eph.find_sunset(jd(2020, 6, 3)).unwrap_err();
        assert!(matches!(err, AstroError::NoSunset(_)));
    }
}
