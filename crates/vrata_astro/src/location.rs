//! Observer locations and calculation flags.

use chrono_tz::Tz;
use once_cell::sync::Lazy;

/// Which part of the solar disc defines the horizon crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SunLimb {
    /// Disc centre crosses the refracted horizon (34′ depression).
    #[default]
    DiscCenter,
    /// Upper edge crosses the refracted horizon (34′ + 16′ depression).
    /// The historical pañcāṅgam tables were computed this way.
    DiscEdge,
}

/// Calculation flags threaded through the resolver and used as part of
/// the batch-cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CalcFlags {
    pub limb: SunLimb,
}

impl CalcFlags {
    /// Disc-edge sunrise/sunset, matching the reference tables.
    pub const fn disc_edge() -> Self {
        Self {
            limb: SunLimb::DiscEdge,
        }
    }
}

/// A named observer location.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    /// Geodetic latitude in degrees, north positive.
    pub latitude: f64,
    /// Geodetic longitude in degrees, east positive.
    pub longitude: f64,
    pub time_zone: Tz,
    /// Set by the polar fallback when the latitude had to be lowered to
    /// find the needed sunrises/sunsets.
    pub latitude_adjusted: bool,
}

impl Location {
    pub fn new(name: &str, latitude: f64, longitude: f64, time_zone: Tz) -> Self {
        Self {
            name: name.to_string(),
            latitude,
            longitude,
            time_zone,
            latitude_adjusted: false,
        }
    }
}

static LOCATIONS: Lazy<Vec<Location>> = Lazy::new(|| {
    use chrono_tz::{Africa, America, Asia, Europe};
    vec![
        Location::new("Udupi", 13.3408, 74.7517, Asia::Kolkata),
        Location::new("Gokarna", 14.5500, 74.3167, Asia::Kolkata),
        Location::new("New Delhi", 28.6139, 77.2090, Asia::Kolkata),
        Location::new("Kolkata", 22.5726, 88.3639, Asia::Kolkata),
        Location::new("Dushanbe", 38.5358, 68.7791, Asia::Dushanbe),
        Location::new("Yerevan", 40.1792, 44.4991, Asia::Yerevan),
        Location::new("Tbilisi", 41.7151, 44.8271, Asia::Tbilisi),
        Location::new("Novosibirsk", 55.0084, 82.9357, Asia::Novosibirsk),
        Location::new("Vladivostok", 43.1155, 131.8855, Asia::Vladivostok),
        Location::new("Denpasar", -8.6705, 115.2126, Asia::Makassar),
        Location::new("Moscow", 55.7558, 37.6173, Europe::Moscow),
        Location::new("Saint Petersburg", 59.9343, 30.3351, Europe::Moscow),
        Location::new("Murmansk", 68.9585, 33.0827, Europe::Moscow),
        Location::new("Kiev", 50.4501, 30.5234, Europe::Kiev),
        Location::new("Minsk", 53.9006, 27.5590, Europe::Minsk),
        Location::new("Riga", 56.9496, 24.1052, Europe::Riga),
        Location::new("Vilnius", 54.6872, 25.2797, Europe::Vilnius),
        Location::new("Warsaw", 52.2297, 21.0122, Europe::Warsaw),
        Location::new("Vienna", 48.2082, 16.3738, Europe::Vienna),
        Location::new("Madrid", 40.4168, -3.7038, Europe::Madrid),
        Location::new("London", 51.5074, -0.1278, Europe::London),
        Location::new("Cairo", 30.0444, 31.2357, Africa::Cairo),
        Location::new("Fredericton", 45.9636, -66.6431, America::Moncton),
        Location::new("Toronto", 43.6532, -79.3832, America::Toronto),
        Location::new("Miami", 25.7617, -80.1918, America::New_York),
        Location::new("Cancun", 21.1619, -86.8515, America::Cancun),
        Location::new("Meadow Lake", 54.1242, -108.4358, America::Regina),
    ]
});

/// The built-in registry of calendar locations.
pub struct LocationRegistry;

impl LocationRegistry {
    /// All known locations, in presentation order.
    pub fn all() -> &'static [Location] {
        &LOCATIONS
    }

    /// Look up a location by its exact name.
    pub fn find(name: &str) -> Option<Location> {
        LOCATIONS.iter().find(|l| l.name == name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_use_disc_center() {
        assert_eq!(CalcFlags::default().limb, SunLimb::DiscCenter);
        assert_eq!(CalcFlags::disc_edge().limb, SunLimb::DiscEdge);
    }

    #[test]
    fn find_known_location() {
        let udupi = LocationRegistry::find("Udupi").unwrap();
        assert!((udupi.latitude - 13.3408).abs() < 1e-9);
        assert_eq!(udupi.time_zone, chrono_tz::Asia::Kolkata);
        assert!(!udupi.latitude_adjusted);
    }

    #[test]
    fn find_unknown_location() {
        assert!(LocationRegistry::find("Atlantis").is_none());
    }

    #[test]
    fn registry_is_non_trivial() {
        assert!(LocationRegistry::all().len() >= 20);
    }

    #[test]
    fn murmansk_is_polar() {
        let m = LocationRegistry::find("Murmansk").unwrap();
        assert!(m.latitude > 66.5);
    }
}
