use std::fmt;
use std::sync::Arc;

use crate::{
    DateTime, Error, ErrorKind, NaiveDateTime,
    clock::{Clock, SystemClock, Timestamp},
    offset::{FixedOffset, OffsetResolver, TimeZone},
    result::Result,
};

/// The zone of the host, or of whatever [`OffsetResolver`] it was built
/// with.
///
/// # Examples
///
/// ```
/// # use tempus::{Local, FixedOffset, FixedClock};
/// let local = Local::new(FixedOffset::east(9 * 3600).unwrap());
/// let now = local.now_from(&FixedClock::new(0, 0)).unwrap();
/// assert_eq!(now.to_string(), "1970-01-01 09:00:00 +09:00");
/// ```
#[derive(Clone)]
pub struct Local {
    resolver: Arc<dyn OffsetResolver>,
}

impl Local {
    pub fn new(resolver: impl OffsetResolver + 'static) -> Local {
        Local {
            resolver: Arc::new(resolver),
        }
    }

    pub fn from_arc(resolver: Arc<dyn OffsetResolver>) -> Local {
        Local { resolver }
    }

    /// Uses the operating system's zone database.
    pub fn host() -> Local {
        Local::new(HostOffsetResolver)
    }

    pub fn now(&self) -> Result<DateTime<Local>> {
        self.now_from(&SystemClock)
    }

    pub fn now_from(&self, clock: &dyn Clock) -> Result<DateTime<Local>> {
        let now = clock.now();
        self.timestamp(now.seconds, now.nanos)
    }
}

impl Default for Local {
    fn default() -> Local {
        Local::host()
    }
}

impl fmt::Debug for Local {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Local")
    }
}

impl TimeZone for Local {
    fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> Result<FixedOffset> {
        let offset = self
            .resolver
            .offset_at(utc.to_unix())
            .map_err(|e| match e.kind() {
                ErrorKind::OffsetResolution { .. } => e,
                _ => Error::offset_resolution(format!("offset at {utc} UTC: {e}")),
            })?;
        log::trace!("local offset at {utc} UTC is {offset}");
        Ok(offset)
    }
}

/// Resolves offsets through the C library's `localtime_r`.
///
/// Without the `host-offset` feature, or on targets whose `struct tm` has no
/// `tm_gmtoff`, every instant resolves to UTC.
#[derive(Copy, Clone, Debug, Default)]
pub struct HostOffsetResolver;

impl OffsetResolver for HostOffsetResolver {
    fn offset_at(&self, instant: Timestamp) -> Result<FixedOffset> {
        host::offset_at(instant)
    }
}

#[cfg(all(
    feature = "host-offset",
    any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
    )
))]
mod host {
    use crate::{Error, FixedOffset, Timestamp, result::Result};

    pub(super) fn offset_at(instant: Timestamp) -> Result<FixedOffset> {
        let time = libc::time_t::try_from(instant.seconds).map_err(|_| {
            Error::offset_resolution(format!("{} does not fit time_t", instant.seconds))
        })?;
        // SAFETY: `tm` is plain data and `localtime_r` writes only through the
        // two pointers it is given.
        let mut tm: libc::tm = unsafe { std::mem::zeroed() };
        let result = unsafe { libc::localtime_r(&time, &mut tm) };
        if result.is_null() {
            return Err(Error::offset_resolution(format!(
                "localtime_r failed for {}: {}",
                instant.seconds,
                std::io::Error::last_os_error()
            )));
        }
        let seconds = i32::try_from(tm.tm_gmtoff)
            .map_err(|_| Error::offset_resolution(format!("tm_gmtoff {}", tm.tm_gmtoff)))?;
        FixedOffset::east(seconds)
    }
}

#[cfg(not(all(
    feature = "host-offset",
    any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
    )
)))]
mod host {
    use crate::{FixedOffset, Timestamp, result::Result};

    pub(super) fn offset_at(_instant: Timestamp) -> Result<FixedOffset> {
        log::debug!("host offset lookup unavailable, using UTC");
        Ok(FixedOffset::UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::Local;
    use crate::{
        Error, ErrorKind, FixedClock, FixedOffset, NaiveDateTime, TimeZone, Timestamp,
        result::Result,
    };

    /// Offsets of a zone at +01:00 that moves to +02:00 at 2024-03-31T01:00Z.
    fn summer_time(instant: Timestamp) -> Result<FixedOffset> {
        let switch = NaiveDateTime::from_ymd_hms(2024, 3, 31, 1, 0, 0)?.timestamp();
        let hours = if instant.seconds >= switch { 2 } else { 1 };
        FixedOffset::east(hours * 3600)
    }

    #[test]
    fn test_local_with_injected_resolver() {
        let local = Local::new(summer_time);
        let before = local.timestamp(1_711_846_800 - 1, 0).unwrap();
        let after = local.timestamp(1_711_846_800, 0).unwrap();
        assert_eq!(before.offset().local_minus_utc(), 3600);
        assert_eq!(after.offset().local_minus_utc(), 7200);
        assert_eq!(before.to_string(), "2024-03-31 01:59:59 +01:00");
        assert_eq!(after.to_string(), "2024-03-31 03:00:00 +02:00");
    }

    #[test]
    fn test_local_from_local_datetime_two_pass() {
        let local = Local::new(summer_time);
        let noon = NaiveDateTime::from_ymd_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let dt = local.from_local_datetime(&noon).unwrap();
        assert_eq!(dt.naive_local(), noon);
        assert_eq!(dt.naive_utc(), NaiveDateTime::from_ymd_hms(2024, 6, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_local_resolver_failure() {
        let local = Local::new(|_: Timestamp| -> Result<FixedOffset> {
            Err(Error::offset_resolution("no zone database"))
        });
        let err = local.now_from(&FixedClock::new(0, 0)).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::OffsetResolution { .. }));

        let local = Local::new(|_: Timestamp| FixedOffset::east(90_000));
        let err = local.timestamp(0, 0).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::OffsetResolution { .. }));
    }

    #[test]
    fn test_host_offset_is_valid() {
        let now = Local::host().now().unwrap();
        assert!(now.offset().local_minus_utc().abs() < 86_400);
        assert_eq!(format!("{:?}", Local::host()), "Local");
    }
}
