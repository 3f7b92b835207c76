// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Calendar interop for the tick axis.
//!
//! The algebra computes exclusively on UTC instants. A `DateTime<Utc>` is
//! UTC by type and converts directly; a `DateTime<FixedOffset>` carries a
//! zone and is accepted only when its offset is zero. Anything else is a
//! contract violation reported through [`InstantConvertError`], never
//! converted silently.

use crate::num::floor::{floor_div, floor_mod};
use crate::time::instant::Instant;
use crate::time::span::TICKS_PER_SECOND;
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

const NANOS_PER_TICK: i64 = 100;

/// The error type for calendar-to-tick conversions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstantConvertError {
    /// The datetime carries a nonzero UTC offset. The payload is the
    /// offending offset in seconds east of UTC.
    NonUtc(i32),
    /// The datetime lies outside the representable tick axis.
    OutOfRange,
}

impl std::fmt::Display for InstantConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonUtc(offset_seconds) => write!(
                f,
                "expected a UTC datetime, got an offset of {} seconds",
                offset_seconds
            ),
            Self::OutOfRange => write!(f, "datetime is outside the representable tick axis"),
        }
    }
}

impl std::error::Error for InstantConvertError {}

impl Instant {
    /// Converts a UTC datetime to an instant.
    ///
    /// # Panics
    ///
    /// Panics if the datetime lies outside the representable tick axis.
    /// Use [`Instant::try_from_utc`] to handle that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_core::time::Instant;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let epoch = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
    /// assert_eq!(Instant::from_utc(epoch), Instant::UNIX_EPOCH);
    /// ```
    #[inline]
    pub fn from_utc(datetime: DateTime<Utc>) -> Instant {
        match Self::try_from_utc(datetime) {
            Some(instant) => instant,
            None => panic!(
                "called `Instant::from_utc` with a datetime outside the representable tick axis: {}",
                datetime
            ),
        }
    }

    /// Converts a UTC datetime to an instant, `None` when outside the axis.
    pub fn try_from_utc(datetime: DateTime<Utc>) -> Option<Instant> {
        let seconds = datetime.timestamp() as i128;
        // Sub-second nanos are always non-negative; truncate to tick resolution.
        let sub_ticks = (datetime.timestamp_subsec_nanos() as i128) / NANOS_PER_TICK as i128;
        let unix_ticks = seconds * TICKS_PER_SECOND as i128 + sub_ticks;
        let ticks = unix_ticks + Instant::UNIX_EPOCH.ticks() as i128;
        if ticks < i64::MIN as i128 || ticks > i64::MAX as i128 {
            return None;
        }
        Some(Instant::from_ticks(ticks as i64))
    }

    /// Converts the instant back to a UTC datetime.
    ///
    /// Returns `None` near the axis bounds, where the tick range exceeds
    /// what `chrono` can represent.
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        let unix_ticks = self.ticks() as i128 - Instant::UNIX_EPOCH.ticks() as i128;
        let seconds = floor_div(unix_ticks, TICKS_PER_SECOND as i128);
        let sub_ticks = floor_mod(unix_ticks, TICKS_PER_SECOND as i128);
        if seconds < i64::MIN as i128 || seconds > i64::MAX as i128 {
            return None;
        }
        let nanos = (sub_ticks as i64 * NANOS_PER_TICK) as u32;
        DateTime::from_timestamp(seconds as i64, nanos)
    }
}

impl TryFrom<DateTime<FixedOffset>> for Instant {
    type Error = InstantConvertError;

    /// Accepts only datetimes whose offset is exactly UTC.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_core::time::{Instant, InstantConvertError};
    /// use chrono::DateTime;
    ///
    /// let utc: DateTime<chrono::FixedOffset> =
    ///     DateTime::parse_from_rfc3339("2025-06-01T12:00:00+00:00").unwrap();
    /// assert!(Instant::try_from(utc).is_ok());
    ///
    /// let offset: DateTime<chrono::FixedOffset> =
    ///     DateTime::parse_from_rfc3339("2025-06-01T12:00:00+02:00").unwrap();
    /// assert_eq!(Instant::try_from(offset), Err(InstantConvertError::NonUtc(7200)));
    /// ```
    fn try_from(datetime: DateTime<FixedOffset>) -> Result<Instant, InstantConvertError> {
        let offset_seconds = datetime.offset().local_minus_utc();
        if offset_seconds != 0 {
            return Err(InstantConvertError::NonUtc(offset_seconds));
        }
        Instant::try_from_utc(datetime.with_timezone(&Utc)).ok_or(InstantConvertError::OutOfRange)
    }
}

impl std::fmt::Display for Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_utc() {
            Some(datetime) => write!(f, "{}", datetime.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            None => write!(f, "Instant({})", self.ticks()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_unix_epoch_round_trip() {
        let epoch = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        let instant = Instant::from_utc(epoch);
        assert_eq!(instant, Instant::UNIX_EPOCH);
        assert_eq!(instant.to_utc(), Some(epoch));
    }

    #[test]
    fn test_sub_second_resolution_round_trip() {
        let datetime = Utc
            .with_ymd_and_hms(2025, 6, 1, 12, 30, 45)
            .unwrap()
            .checked_add_signed(chrono::Duration::nanoseconds(1_234_500))
            .unwrap();
        let instant = Instant::from_utc(datetime);
        assert_eq!(instant.to_utc(), Some(datetime));
    }

    #[test]
    fn test_sub_tick_nanos_truncate() {
        // 150 ns is between ticks; conversion truncates to the tick below.
        let base = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let plus_150ns = base + chrono::Duration::nanoseconds(150);
        let expected = Instant::from_utc(base).checked_add(crate::time::TickSpan::TICK);
        assert_eq!(Some(Instant::from_utc(plus_150ns)), expected);
    }

    #[test]
    fn test_pre_epoch_datetime() {
        let datetime = Utc.with_ymd_and_hms(1912, 4, 15, 2, 20, 0).unwrap();
        let instant = Instant::from_utc(datetime);
        assert!(instant < Instant::UNIX_EPOCH);
        assert_eq!(instant.to_utc(), Some(datetime));
    }

    #[test]
    fn test_non_utc_offset_rejected() {
        let datetime = DateTime::parse_from_rfc3339("2025-01-01T00:00:00+05:30").unwrap();
        assert_eq!(
            Instant::try_from(datetime),
            Err(InstantConvertError::NonUtc(5 * 3600 + 30 * 60))
        );
    }

    #[test]
    fn test_zero_offset_accepted() {
        let datetime = DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z").unwrap();
        let instant = Instant::try_from(datetime).unwrap();
        assert_eq!(instant.to_utc().unwrap().to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_axis_bounds_convert() {
        // MIN/MAX are ~29k years from tick zero, inside chrono's window.
        assert!(Instant::MAX.to_utc().is_some());
        assert!(Instant::MIN.to_utc().is_some());
    }

    #[test]
    fn test_min_max_round_trip() {
        for instant in [Instant::MIN, Instant::MAX, Instant::from_ticks(0)] {
            let datetime = instant.to_utc().unwrap();
            assert_eq!(Instant::from_utc(datetime), instant);
        }
    }

    #[test]
    fn test_display_renders_rfc3339() {
        let rendered = format!("{}", Instant::UNIX_EPOCH);
        assert!(rendered.starts_with("1970-01-01T00:00:00"), "{rendered}");
    }
}
