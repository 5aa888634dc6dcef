//! Local wall-clock time lookup from a canonical timezone name.

use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// The UTC offset currently in effect for a canonical timezone name, e.g.
/// "America/Bogota". Returns `None` for unknown names.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// The current wall-clock date and time in `canonical_timezone`.
///
/// The offset is resolved at call time so daylight saving transitions are
/// picked up without restarting the session.
///
/// # Errors
/// Returns [Error::InvalidTimezone] if the timezone name is unknown.
pub fn local_now(canonical_timezone: &str) -> Result<PrimitiveDateTime, Error> {
    let offset = get_local_offset(canonical_timezone)
        .ok_or_else(|| Error::InvalidTimezone(canonical_timezone.to_owned()))?;

    let now = OffsetDateTime::now_utc().to_offset(offset);

    Ok(PrimitiveDateTime::new(now.date(), now.time()))
}

#[cfg(test)]
mod tests {
    use super::{get_local_offset, local_now};

    #[test]
    fn known_timezones_resolve() {
        assert!(get_local_offset("America/Bogota").is_some());
        assert!(local_now("UTC").is_ok());
    }

    #[test]
    fn unknown_timezones_do_not_resolve() {
        assert!(get_local_offset("America/Springfield").is_none());
        assert!(local_now("America/Springfield").is_err());
    }
}
