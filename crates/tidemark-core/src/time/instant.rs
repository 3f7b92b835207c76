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

use crate::time::span::TickSpan;
use std::ops::{Add, Sub};

/// An absolute UTC point on the tick axis.
///
/// An `Instant` is a 64-bit count of 100 ns ticks. Tick zero is
/// `0001-01-01T00:00:00Z`; ticks before it are negative. The whole `i64`
/// range is valid, so [`Instant::MIN`] and [`Instant::MAX`] are themselves
/// ordinary instants that bound the representable axis.
///
/// Offsetting an instant past either bound is not an error of the type —
/// the checked operations report it as `None`, which the algebra reads as
/// "beyond the axis".
///
/// # Examples
///
/// ```rust
/// # use tidemark_core::time::{Instant, TickSpan};
/// let t = Instant::from_ticks(100);
/// assert_eq!(t.checked_add(TickSpan::ticks(5)), Some(Instant::from_ticks(105)));
/// assert_eq!(Instant::MAX.checked_add(TickSpan::TICK), None);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(i64);

impl Instant {
    /// The earliest representable instant.
    pub const MIN: Instant = Instant(i64::MIN);
    /// The latest representable instant.
    pub const MAX: Instant = Instant(i64::MAX);
    /// `1970-01-01T00:00:00Z` on the tick axis.
    pub const UNIX_EPOCH: Instant = Instant(621_355_968_000_000_000);

    /// Creates an instant from a raw tick count.
    #[inline]
    pub const fn from_ticks(ticks: i64) -> Self {
        Instant(ticks)
    }

    /// Returns the raw tick count.
    #[inline]
    pub const fn ticks(&self) -> i64 {
        self.0
    }

    /// Offsets the instant forward, `None` when the result would leave the axis.
    #[inline]
    pub const fn checked_add(self, span: TickSpan) -> Option<Instant> {
        match self.0.checked_add(span.get()) {
            Some(ticks) => Some(Instant(ticks)),
            None => None,
        }
    }

    /// Offsets the instant backward, `None` when the result would leave the axis.
    #[inline]
    pub const fn checked_sub(self, span: TickSpan) -> Option<Instant> {
        match self.0.checked_sub(span.get()) {
            Some(ticks) => Some(Instant(ticks)),
            None => None,
        }
    }

    /// Offsets the instant, clamping at the axis bounds instead of failing.
    #[inline]
    pub const fn saturating_add(self, span: TickSpan) -> Instant {
        Instant(self.0.saturating_add(span.get()))
    }

    /// Returns the signed span from `earlier` to `self`, `None` on overflow.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_core::time::{Instant, TickSpan};
    /// let a = Instant::from_ticks(10);
    /// let b = Instant::from_ticks(25);
    /// assert_eq!(b.ticks_since(a), Some(TickSpan::ticks(15)));
    /// assert_eq!(a.ticks_since(b), Some(TickSpan::ticks(-15)));
    /// assert_eq!(Instant::MAX.ticks_since(Instant::MIN), None);
    /// ```
    #[inline]
    pub const fn ticks_since(self, earlier: Instant) -> Option<TickSpan> {
        match self.0.checked_sub(earlier.0) {
            Some(ticks) => Some(TickSpan::ticks(ticks)),
            None => None,
        }
    }

    /// The instant one tick later, `None` at [`Instant::MAX`].
    #[inline]
    pub const fn next_tick(self) -> Option<Instant> {
        self.checked_add(TickSpan::TICK)
    }

    /// The instant one tick earlier, `None` at [`Instant::MIN`].
    #[inline]
    pub const fn previous_tick(self) -> Option<Instant> {
        self.checked_sub(TickSpan::TICK)
    }
}

/// Returns the earlier of two optional instants, ignoring `None`.
///
/// # Examples
///
/// ```rust
/// # use tidemark_core::time::{Instant, earliest};
/// let a = Some(Instant::from_ticks(5));
/// let b = Some(Instant::from_ticks(9));
/// assert_eq!(earliest(a, b), a);
/// assert_eq!(earliest(a, None), a);
/// assert_eq!(earliest::<Instant>(None, None), None);
/// ```
#[inline]
pub fn earliest<T: Ord>(a: Option<T>, b: Option<T>) -> Option<T> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) => Some(x),
        (None, Some(y)) => Some(y),
        (None, None) => None,
    }
}

/// Returns the later of two optional instants, ignoring `None`.
///
/// # Examples
///
/// ```rust
/// # use tidemark_core::time::{Instant, latest};
/// let a = Some(Instant::from_ticks(5));
/// let b = Some(Instant::from_ticks(9));
/// assert_eq!(latest(a, b), b);
/// assert_eq!(latest(None, b), b);
/// ```
#[inline]
pub fn latest<T: Ord>(a: Option<T>, b: Option<T>) -> Option<T> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (Some(x), None) => Some(x),
        (None, Some(y)) => Some(y),
        (None, None) => None,
    }
}

impl Add<TickSpan> for Instant {
    type Output = Instant;

    /// Panicking offset; use [`Instant::checked_add`] near the axis bounds.
    #[inline]
    fn add(self, rhs: TickSpan) -> Instant {
        Instant(self.0 + rhs.get())
    }
}

impl Sub<TickSpan> for Instant {
    type Output = Instant;

    /// Panicking offset; use [`Instant::checked_sub`] near the axis bounds.
    #[inline]
    fn sub(self, rhs: TickSpan) -> Instant {
        Instant(self.0 - rhs.get())
    }
}

impl std::fmt::Debug for Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instant({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_tick_ordering() {
        assert!(Instant::from_ticks(-5) < Instant::from_ticks(0));
        assert!(Instant::MIN < Instant::MAX);
        assert!(Instant::from_ticks(3) < Instant::from_ticks(4));
    }

    #[test]
    fn test_checked_add_at_bounds() {
        assert_eq!(Instant::MAX.checked_add(TickSpan::TICK), None);
        assert_eq!(Instant::MIN.checked_sub(TickSpan::TICK), None);
        assert_eq!(
            Instant::MAX.checked_add(TickSpan::ticks(-1)),
            Some(Instant::from_ticks(i64::MAX - 1))
        );
    }

    #[test]
    fn test_negative_span_offsets() {
        let t = Instant::from_ticks(100);
        assert_eq!(t.checked_add(TickSpan::ticks(-30)), Some(Instant::from_ticks(70)));
        assert_eq!(t.checked_sub(TickSpan::ticks(-30)), Some(Instant::from_ticks(130)));
        // Subtracting the most negative span overflows instead of wrapping.
        assert_eq!(t.checked_sub(TickSpan::ticks(i64::MIN)), None);
    }

    #[test]
    fn test_saturating_add_clamps() {
        assert_eq!(Instant::MAX.saturating_add(TickSpan::days(1)), Instant::MAX);
        assert_eq!(Instant::MIN.saturating_add(TickSpan::days(-1)), Instant::MIN);
    }

    #[test]
    fn test_tick_neighbors() {
        let t = Instant::from_ticks(0);
        assert_eq!(t.next_tick(), Some(Instant::from_ticks(1)));
        assert_eq!(t.previous_tick(), Some(Instant::from_ticks(-1)));
        assert_eq!(Instant::MAX.next_tick(), None);
        assert_eq!(Instant::MIN.previous_tick(), None);
    }

    #[test]
    fn test_earliest_latest_ignore_none() {
        let a = Some(Instant::from_ticks(1));
        let b = Some(Instant::from_ticks(2));
        assert_eq!(earliest(a, b), a);
        assert_eq!(latest(a, b), b);
        assert_eq!(earliest(None, b), b);
        assert_eq!(latest(a, None), a);
        assert_eq!(earliest::<Instant>(None, None), None);
    }
}
