//! IANA time-zone lookup.

use chrono_tz::Tz;

use crate::error::TimeError;

/// Resolve an IANA zone name (e.g. `Asia/Kolkata`) to a zone handle.
///
/// Legacy link names (e.g. `Europe/Kiev`) resolve to their targets.
pub fn locate_zone(name: &str) -> Result<Tz, TimeError> {
    name.parse()
        .map_err(|_| TimeError::UnknownTimeZone(name.to_string()))
}
