//! `JulDaysUt`: the UT Julian-day scalar used throughout the engine.
//!
//! A very compact value type — one `f64` of fractional days — with the
//! arithmetic the searches need, plus conversions to civil UTC and to
//! zoned wall time. Fractional days and fractional hours are distinct
//! typed durations so that call sites read unambiguously.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::julian::{calendar_to_jd, jd_to_calendar, SECONDS_PER_DAY};

/// Two Julian-day values closer than this are considered the same
/// instant (~86 ms).
pub const JD_EPSILON: f64 = 1.0e-6;

/// A span of fractional days.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DoubleDays(pub f64);

/// A span of fractional hours.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DoubleHours(pub f64);

/// A span of fractional ghaṭikās (1/60 of a civil day, 24 minutes).
///
/// Display unit for tithi lengths in the detail report.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DoubleGhatikas(pub f64);

impl DoubleDays {
    pub fn as_hours(self) -> DoubleHours {
        DoubleHours(self.0 * 24.0)
    }

    pub fn as_ghatikas(self) -> DoubleGhatikas {
        DoubleGhatikas(self.0 * 60.0)
    }
}

impl DoubleHours {
    pub fn as_days(self) -> DoubleDays {
        DoubleDays(self.0 / 24.0)
    }
}

impl Add for DoubleDays {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for DoubleDays {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<f64> for DoubleDays {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self(self.0 * rhs)
    }
}

impl Div<f64> for DoubleDays {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self(self.0 / rhs)
    }
}

impl Neg for DoubleDays {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<f64> for DoubleHours {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self(self.0 * rhs)
    }
}

/// Julian days referenced to UT.
///
/// Provides value semantics; ordering is the plain ordering of the raw
/// scalar, while [`JulDaysUt::approx_eq`] compares within [`JD_EPSILON`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct JulDaysUt(f64);

impl JulDaysUt {
    /// Wrap a raw Julian-day value.
    pub const fn new(raw: f64) -> Self {
        Self(raw)
    }

    /// 0h UT on the given calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_date_hours(date, DoubleHours(0.0))
    }

    /// The given calendar date plus a fractional-hours offset from 0h UT.
    pub fn from_date_hours(date: NaiveDate, hours: DoubleHours) -> Self {
        use chrono::Datelike;
        let day_frac = f64::from(date.day()) + hours.0 / 24.0;
        Self(calendar_to_jd(date.year(), date.month(), day_frac))
    }

    /// From a civil UTC timestamp.
    pub fn from_utc(t: NaiveDateTime) -> Self {
        use chrono::{Datelike, Timelike};
        let date = t.date();
        let hours = f64::from(t.hour())
            + f64::from(t.minute()) / 60.0
            + (f64::from(t.second()) + f64::from(t.nanosecond()) / 1e9) / 3600.0;
        let day_frac = f64::from(date.day()) + hours / 24.0;
        Self(calendar_to_jd(date.year(), date.month(), day_frac))
    }

    /// The raw fractional-days scalar.
    pub const fn raw(self) -> f64 {
        self.0
    }

    /// Equality within [`JD_EPSILON`] (~86 ms).
    pub fn approx_eq(self, other: Self) -> bool {
        (self.0 - other.0).abs() <= JD_EPSILON
    }

    /// Civil UTC timestamp (microsecond resolution).
    pub fn as_utc(self) -> NaiveDateTime {
        let (year, month, day_frac) = jd_to_calendar(self.0);
        let day = day_frac.floor();
        let micros = ((day_frac - day) * SECONDS_PER_DAY * 1e6).round() as i64;
        NaiveDate::from_ymd_opt(year, month, day as u32)
            .expect("calendar from Julian day is a valid date")
            .and_hms_opt(0, 0, 0)
            .expect("midnight is a valid time")
            + Duration::microseconds(micros)
    }

    /// UTC calendar date of this instant.
    pub fn date_utc(self) -> NaiveDate {
        self.as_utc().date()
    }

    /// Wall time in the given zone.
    pub fn as_zoned(self, tz: Tz) -> DateTime<Tz> {
        tz.from_utc_datetime(&self.as_utc())
    }

    /// Local civil date in the given zone.
    pub fn local_date(self, tz: Tz) -> NaiveDate {
        self.as_zoned(tz).date_naive()
    }

    /// Round up to the next whole minute of zoned wall time.
    pub fn round_to_minute_up(self, tz: Tz) -> DateTime<Tz> {
        round_zoned(self.as_zoned(tz), 60, true)
    }

    /// Round down to the previous whole minute of zoned wall time.
    pub fn round_to_minute_down(self, tz: Tz) -> DateTime<Tz> {
        round_zoned(self.as_zoned(tz), 60, false)
    }

    /// Round up to the next whole second of zoned wall time.
    pub fn round_to_second_up(self, tz: Tz) -> DateTime<Tz> {
        round_zoned(self.as_zoned(tz), 1, true)
    }

    /// Round down to the previous whole second of zoned wall time.
    pub fn round_to_second_down(self, tz: Tz) -> DateTime<Tz> {
        round_zoned(self.as_zoned(tz), 1, false)
    }
}

/// Snap a zoned instant to a whole multiple of `step` seconds, up or down.
///
/// Zone offsets are whole minutes, so snapping the underlying UTC instant
/// and the local wall clock agree for second and minute steps.
fn round_zoned(t: DateTime<Tz>, step: i64, up: bool) -> DateTime<Tz> {
    let utc = t.with_timezone(&Utc);
    let secs = utc.timestamp();
    let subsec = i64::from(utc.timestamp_subsec_nanos());
    let rem = secs.rem_euclid(step);
    let snapped = if up {
        if rem == 0 && subsec == 0 {
            secs
        } else {
            secs - rem + step
        }
    } else {
        secs - rem
    };
    Utc.timestamp_opt(snapped, 0)
        .single()
        .expect("snapped timestamp is in range")
        .with_timezone(&t.timezone())
}

/// Linear interpolation between two instants.
///
/// `proportion` 0.0 gives `t1`, 1.0 gives `t2`.
pub fn proportional_time(t1: JulDaysUt, t2: JulDaysUt, proportion: f64) -> JulDaysUt {
    t1 + (t2 - t1) * proportion
}

impl Add<DoubleDays> for JulDaysUt {
    type Output = Self;
    fn add(self, rhs: DoubleDays) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub<DoubleDays> for JulDaysUt {
    type Output = Self;
    fn sub(self, rhs: DoubleDays) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Add<DoubleHours> for JulDaysUt {
    type Output = Self;
    fn add(self, rhs: DoubleHours) -> Self {
        self + rhs.as_days()
    }
}

impl Sub<DoubleHours> for JulDaysUt {
    type Output = Self;
    fn sub(self, rhs: DoubleHours) -> Self {
        self - rhs.as_days()
    }
}

impl AddAssign<DoubleDays> for JulDaysUt {
    fn add_assign(&mut self, rhs: DoubleDays) {
        self.0 += rhs.0;
    }
}

impl SubAssign<DoubleDays> for JulDaysUt {
    fn sub_assign(&mut self, rhs: DoubleDays) {
        self.0 -= rhs.0;
    }
}

impl Sub for JulDaysUt {
    type Output = DoubleDays;
    fn sub(self, rhs: Self) -> DoubleDays {
        DoubleDays(self.0 - rhs.0)
    }
}

impl fmt::Display for JulDaysUt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} UTC", self.as_utc().format("%Y-%m-%d %H:%M:%S%.6f"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn from_date_is_midnight() {
        let t = JulDaysUt::from_date(date(2000, 1, 1));
        assert!((t.raw() - 2_451_544.5).abs() < 1e-9);
    }

    #[test]
    fn utc_roundtrip() {
        let dt = date(2020, 11, 26).and_hms_opt(15, 58, 14).unwrap();
        let t = JulDaysUt::from_utc(dt);
        let back = t.as_utc();
        assert_eq!(back.date(), dt.date());
        let diff = (back - dt).num_milliseconds().abs();
        assert!(diff <= 1, "roundtrip drift {diff} ms");
    }

    #[test]
    fn approx_eq_within_epsilon() {
        let a = JulDaysUt::new(2_451_545.0);
        let b = JulDaysUt::new(2_451_545.0 + 0.9e-6);
        let c = JulDaysUt::new(2_451_545.0 + 1.1e-5);
        assert!(a.approx_eq(b));
        assert!(!a.approx_eq(c));
    }

    #[test]
    fn ordering_and_arithmetic() {
        let a = JulDaysUt::new(2_451_545.0);
        let b = a + DoubleDays(1.0);
        assert!(a < b);
        assert!((b - a).0 - 1.0 < 1e-12);
        let c = a - DoubleHours(25.0);
        assert!(((a - c).0 - 25.0 / 24.0).abs() < 1e-12);
    }

    #[test]
    fn zoned_kolkata_offset() {
        // 2019-01-01 00:00 UT = 05:30 IST
        let t = JulDaysUt::from_date(date(2019, 1, 1));
        let zoned = t.as_zoned(chrono_tz::Asia::Kolkata);
        assert_eq!(zoned.hour(), 5);
        assert_eq!(zoned.minute(), 30);
        assert_eq!(t.local_date(chrono_tz::Asia::Kolkata), date(2019, 1, 1));
    }

    #[test]
    fn rounding_minute() {
        let dt = date(2020, 11, 26).and_hms_micro_opt(10, 28, 14, 76_468).unwrap();
        let t = JulDaysUt::from_utc(dt);
        let up = t.round_to_minute_up(chrono_tz::UTC);
        let down = t.round_to_minute_down(chrono_tz::UTC);
        assert_eq!(up.minute(), 29);
        assert_eq!(up.second(), 0);
        assert_eq!(down.minute(), 28);
        assert_eq!(down.second(), 0);
    }

    #[test]
    fn rounding_exact_minute_is_identity() {
        let dt = date(2020, 11, 26).and_hms_opt(10, 28, 0).unwrap();
        let t = JulDaysUt::from_utc(dt);
        let up = t.round_to_minute_up(chrono_tz::UTC);
        assert_eq!(up.minute(), 28);
        assert_eq!(up.second(), 0);
    }

    #[test]
    fn proportional_midpoint() {
        let a = JulDaysUt::new(2_451_545.0);
        let b = JulDaysUt::new(2_451_546.0);
        let mid = proportional_time(a, b, 0.5);
        assert!((mid.raw() - 2_451_545.5).abs() < 1e-12);
    }

    #[test]
    fn display_format() {
        let t = JulDaysUt::from_date(date(2019, 3, 19));
        assert_eq!(t.to_string(), "2019-03-19 00:00:00.000000 UTC");
    }

    #[test]
    fn ghatika_conversion() {
        // The mean tithi length 23h37m is just over 59 ghatikas.
        let len = DoubleHours(23.0 + 37.0 / 60.0).as_days().as_ghatikas();
        assert!((len.0 - 59.04).abs() < 0.01, "got {}gh", len.0);
    }
}
