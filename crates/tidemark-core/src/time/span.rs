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

use std::ops::{Add, Div, Mul, Neg, Sub};

/// Number of ticks in one microsecond. One tick is 100 nanoseconds.
pub const TICKS_PER_MICROSECOND: i64 = 10;
/// Number of ticks in one millisecond.
pub const TICKS_PER_MILLISECOND: i64 = 10_000;
/// Number of ticks in one second.
pub const TICKS_PER_SECOND: i64 = 10_000_000;
/// Number of ticks in one minute.
pub const TICKS_PER_MINUTE: i64 = 60 * TICKS_PER_SECOND;
/// Number of ticks in one hour.
pub const TICKS_PER_HOUR: i64 = 60 * TICKS_PER_MINUTE;
/// Number of ticks in one day.
pub const TICKS_PER_DAY: i64 = 24 * TICKS_PER_HOUR;

/// A signed duration on the tick axis.
///
/// A `TickSpan` is a plain count of 100 ns ticks and may be negative. It is
/// the argument type of every offset operation in the algebra.
///
/// # Examples
///
/// ```rust
/// # use tidemark_core::time::TickSpan;
/// let span = TickSpan::minutes(2) + TickSpan::seconds(30);
/// assert_eq!(span, TickSpan::seconds(150));
/// assert_eq!(-span, TickSpan::seconds(-150));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickSpan(i64);

impl TickSpan {
    /// The zero-length span.
    pub const ZERO: TickSpan = TickSpan(0);
    /// The smallest positive span: a single tick.
    pub const TICK: TickSpan = TickSpan(1);

    /// Creates a span from a raw tick count.
    #[inline]
    pub const fn ticks(ticks: i64) -> Self {
        TickSpan(ticks)
    }

    /// Creates a span of whole microseconds.
    ///
    /// # Panics
    ///
    /// Panics if the tick count overflows `i64`.
    #[inline]
    pub const fn microseconds(microseconds: i64) -> Self {
        Self::of(microseconds, TICKS_PER_MICROSECOND)
    }

    /// Creates a span of whole milliseconds.
    ///
    /// # Panics
    ///
    /// Panics if the tick count overflows `i64`.
    #[inline]
    pub const fn milliseconds(milliseconds: i64) -> Self {
        Self::of(milliseconds, TICKS_PER_MILLISECOND)
    }

    /// Creates a span of whole seconds.
    ///
    /// # Panics
    ///
    /// Panics if the tick count overflows `i64`.
    #[inline]
    pub const fn seconds(seconds: i64) -> Self {
        Self::of(seconds, TICKS_PER_SECOND)
    }

    /// Creates a span of whole minutes.
    ///
    /// # Panics
    ///
    /// Panics if the tick count overflows `i64`.
    #[inline]
    pub const fn minutes(minutes: i64) -> Self {
        Self::of(minutes, TICKS_PER_MINUTE)
    }

    /// Creates a span of whole hours.
    ///
    /// # Panics
    ///
    /// Panics if the tick count overflows `i64`.
    #[inline]
    pub const fn hours(hours: i64) -> Self {
        Self::of(hours, TICKS_PER_HOUR)
    }

    /// Creates a span of whole days.
    ///
    /// # Panics
    ///
    /// Panics if the tick count overflows `i64`.
    #[inline]
    pub const fn days(days: i64) -> Self {
        Self::of(days, TICKS_PER_DAY)
    }

    #[inline]
    const fn of(count: i64, unit: i64) -> Self {
        match count.checked_mul(unit) {
            Some(ticks) => TickSpan(ticks),
            None => panic!("called a `TickSpan` unit constructor with a value that overflows the tick axis"),
        }
    }

    /// Returns the raw tick count.
    #[inline]
    pub const fn get(&self) -> i64 {
        self.0
    }

    /// Returns the number of whole seconds, truncated toward zero.
    #[inline]
    pub const fn whole_seconds(&self) -> i64 {
        self.0 / TICKS_PER_SECOND
    }

    /// Returns `true` if the span is exactly zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the span is strictly negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns `true` if the span is strictly positive.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checked addition, `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: TickSpan) -> Option<TickSpan> {
        match self.0.checked_add(other.0) {
            Some(ticks) => Some(TickSpan(ticks)),
            None => None,
        }
    }

    /// Checked subtraction, `None` on overflow.
    #[inline]
    pub const fn checked_sub(self, other: TickSpan) -> Option<TickSpan> {
        match self.0.checked_sub(other.0) {
            Some(ticks) => Some(TickSpan(ticks)),
            None => None,
        }
    }

    /// Checked negation, `None` when negating the most negative span.
    #[inline]
    pub const fn checked_neg(self) -> Option<TickSpan> {
        match self.0.checked_neg() {
            Some(ticks) => Some(TickSpan(ticks)),
            None => None,
        }
    }

    /// Checked absolute value, `None` for the most negative span.
    #[inline]
    pub const fn checked_abs(self) -> Option<TickSpan> {
        match self.0.checked_abs() {
            Some(ticks) => Some(TickSpan(ticks)),
            None => None,
        }
    }
}

impl Add for TickSpan {
    type Output = TickSpan;

    #[inline]
    fn add(self, rhs: TickSpan) -> TickSpan {
        TickSpan(self.0 + rhs.0)
    }
}

impl Sub for TickSpan {
    type Output = TickSpan;

    #[inline]
    fn sub(self, rhs: TickSpan) -> TickSpan {
        TickSpan(self.0 - rhs.0)
    }
}

impl Neg for TickSpan {
    type Output = TickSpan;

    #[inline]
    fn neg(self) -> TickSpan {
        TickSpan(-self.0)
    }
}

impl Mul<i64> for TickSpan {
    type Output = TickSpan;

    #[inline]
    fn mul(self, rhs: i64) -> TickSpan {
        TickSpan(self.0 * rhs)
    }
}

impl Div<i64> for TickSpan {
    type Output = TickSpan;

    #[inline]
    fn div(self, rhs: i64) -> TickSpan {
        TickSpan(self.0 / rhs)
    }
}

impl std::fmt::Display for TickSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 % TICKS_PER_SECOND == 0 {
            write!(f, "{}s", self.0 / TICKS_PER_SECOND)
        } else {
            write!(f, "{} ticks", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_constructors() {
        assert_eq!(TickSpan::microseconds(1).get(), 10);
        assert_eq!(TickSpan::milliseconds(1).get(), 10_000);
        assert_eq!(TickSpan::seconds(1).get(), 10_000_000);
        assert_eq!(TickSpan::minutes(1), TickSpan::seconds(60));
        assert_eq!(TickSpan::hours(1), TickSpan::minutes(60));
        assert_eq!(TickSpan::days(1), TickSpan::hours(24));
    }

    #[test]
    fn test_negative_spans() {
        let span = TickSpan::seconds(-5);
        assert!(span.is_negative());
        assert!(!span.is_positive());
        assert_eq!(-span, TickSpan::seconds(5));
    }

    #[test]
    #[should_panic(expected = "overflows the tick axis")]
    fn test_unit_constructor_overflow_panics() {
        let _ = TickSpan::days(i64::MAX);
    }

    #[test]
    fn test_checked_arithmetic() {
        let near_max = TickSpan::ticks(i64::MAX - 1);
        assert_eq!(near_max.checked_add(TickSpan::TICK), Some(TickSpan::ticks(i64::MAX)));
        assert_eq!(near_max.checked_add(TickSpan::ticks(2)), None);
        assert_eq!(TickSpan::ticks(i64::MIN).checked_neg(), None);
        assert_eq!(TickSpan::ticks(i64::MIN).checked_abs(), None);
    }

    #[test]
    fn test_operators() {
        let a = TickSpan::seconds(90);
        let b = TickSpan::seconds(30);
        assert_eq!(a + b, TickSpan::minutes(2));
        assert_eq!(a - b, TickSpan::minutes(1));
        assert_eq!(b * 3, a);
        assert_eq!(a / 3, b);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", TickSpan::seconds(90)), "90s");
        assert_eq!(format!("{}", TickSpan::ticks(3)), "3 ticks");
    }

    #[test]
    fn test_whole_seconds_truncates() {
        assert_eq!(TickSpan::ticks(TICKS_PER_SECOND + 1).whole_seconds(), 1);
        assert_eq!(TickSpan::ticks(-TICKS_PER_SECOND - 1).whole_seconds(), -1);
    }
}
