//! Apparent solar position.
//!
//! Low-accuracy solar theory (Meeus, *Astronomical Algorithms*, ch. 25):
//! mean longitude + equation of centre, with the aberration/nutation
//! shortcut for the apparent longitude. Accuracy ~0.01°, which moves a
//! tithi boundary by under a minute.
//!
//! All functions take a TT Julian Date; callers apply ΔT first.

use vrata_time::J2000_JD;

/// Julian centuries of TT since J2000.0.
pub fn centuries(jd_tt: f64) -> f64 {
    (jd_tt - J2000_JD) / 36_525.0
}

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Mean obliquity of the ecliptic in degrees (Meeus 22.2).
pub fn mean_obliquity_deg(t: f64) -> f64 {
    23.0 + 26.0 / 60.0 + 21.448 / 3600.0
        - (46.8150 * t + 0.00059 * t * t - 0.001813 * t * t * t) / 3600.0
}

/// Nutation in longitude, degrees (principal terms of the 1980 theory).
pub fn nutation_longitude_deg(t: f64) -> f64 {
    let omega = (125.04452 - 1934.136_261 * t).to_radians();
    let l_sun = (280.4665 + 36_000.7698 * t).to_radians();
    let l_moon = (218.3165 + 481_267.8813 * t).to_radians();
    (-17.20 * omega.sin() - 1.32 * (2.0 * l_sun).sin() - 0.23 * (2.0 * l_moon).sin()
        + 0.21 * (2.0 * omega).sin())
        / 3600.0
}

/// Sun's mean anomaly in degrees.
fn mean_anomaly_deg(t: f64) -> f64 {
    357.52911 + 35_999.05029 * t - 0.0001537 * t * t
}

/// Equation of centre in degrees.
fn equation_of_centre_deg(t: f64, m_rad: f64) -> f64 {
    (1.914602 - 0.004817 * t - 0.000014 * t * t) * m_rad.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m_rad).sin()
        + 0.000289 * (3.0 * m_rad).sin()
}

/// Apparent geocentric ecliptic longitude of the Sun in degrees, [0, 360).
///
/// Includes aberration and nutation via the `−0.00569 − 0.00478 sin Ω`
/// shortcut (Meeus 25.8).
pub fn sun_apparent_longitude_deg(jd_tt: f64) -> f64 {
    let t = centuries(jd_tt);
    let l0 = 280.46646 + 36_000.76983 * t + 0.0003032 * t * t;
    let m = mean_anomaly_deg(t).to_radians();
    let true_longitude = l0 + equation_of_centre_deg(t, m);
    let omega = (125.04 - 1934.136 * t).to_radians();
    normalize_360(true_longitude - 0.00569 - 0.00478 * omega.sin())
}

/// Earth–Sun distance in astronomical units.
pub fn sun_distance_au(jd_tt: f64) -> f64 {
    let t = centuries(jd_tt);
    let m = mean_anomaly_deg(t).to_radians();
    let nu = m + equation_of_centre_deg(t, m).to_radians();
    let e = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_1267 * t * t;
    1.000_001_018 * (1.0 - e * e) / (1.0 + e * nu.cos())
}

/// Apparent right ascension and declination of the Sun, radians.
///
/// Uses the obliquity corrected for the apparent-longitude shortcut
/// (`ε + 0.00256 cos Ω`, Meeus 25.8).
pub fn sun_equatorial_rad(jd_tt: f64) -> (f64, f64) {
    let t = centuries(jd_tt);
    let lambda = sun_apparent_longitude_deg(jd_tt).to_radians();
    let omega = (125.04 - 1934.136 * t).to_radians();
    let eps = (mean_obliquity_deg(t) + 0.00256 * omega.cos()).to_radians();
    let ra = (eps.cos() * lambda.sin()).atan2(lambda.cos());
    let dec = (eps.sin() * lambda.sin()).asin();
    (ra.rem_euclid(std::f64::consts::TAU), dec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeus_25a() {
        // 1992-10-13 0h TT (JDE 2448908.5): apparent longitude 199.90895 deg
        let lon = sun_apparent_longitude_deg(2_448_908.5);
        assert!((lon - 199.90895).abs() < 0.002, "lon = {lon}");
        let r = sun_distance_au(2_448_908.5);
        assert!((r - 0.997_662).abs() < 0.0005, "R = {r}");
    }

    #[test]
    fn equinox_2020() {
        // 2020-03-20 03:50 UT (+~69s of Delta T, negligible at this tolerance)
        let jd = vrata_time::calendar_to_jd(2020, 3, 20.0 + 3.833 / 24.0);
        let lon = sun_apparent_longitude_deg(jd);
        let wrapped = if lon > 180.0 { lon - 360.0 } else { lon };
        assert!(wrapped.abs() < 0.05, "lon at equinox = {lon}");
    }

    #[test]
    fn solstice_2020() {
        // 2020-06-20 21:44 UT
        let jd = vrata_time::calendar_to_jd(2020, 6, 20.0 + 21.733 / 24.0);
        let lon = sun_apparent_longitude_deg(jd);
        assert!((lon - 90.0).abs() < 0.05, "lon at solstice = {lon}");
    }

    #[test]
    fn obliquity_j2000() {
        let eps = mean_obliquity_deg(0.0);
        assert!((eps - 23.439_291).abs() < 1e-5);
    }

    #[test]
    fn nutation_magnitude() {
        // |nutation| never exceeds ~0.0052 deg
        for i in 0..40 {
            let t = -1.0 + f64::from(i) * 0.05;
            assert!(nutation_longitude_deg(t).abs() < 0.006);
        }
    }

    #[test]
    fn declination_bounds() {
        for i in 0..366 {
            let jd = 2_458_849.5 + f64::from(i);
            let (_, dec) = sun_equatorial_rad(jd);
            assert!(dec.to_degrees().abs() < 23.5);
        }
    }
}
