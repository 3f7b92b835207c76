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

use smallvec::SmallVec;
use std::cmp::Ordering;
use tidemark_core::time::{Instant, TickSpan};

/// A half-open interval `[start, end)` on the tick axis.
///
/// Either bound may be absent: a `None` start means the period has always
/// begun, a `None` end that it never ends. Both absent is the whole axis.
/// Construction rejects an end before the start; equal bounds describe a
/// zero-length period that contains no instant.
///
/// # Ordering
///
/// Periods order by start with an absent start before every concrete one,
/// tie-broken by end with an absent end after every concrete one. Equal
/// bounds compare equal.
///
/// # Examples
///
/// ```rust
/// # use tidemark_model::Period;
/// # use tidemark_core::time::{Instant, TickSpan};
/// let p = Period::bounded(Instant::from_ticks(10), Instant::from_ticks(20));
/// assert!(p.contains_instant(Instant::from_ticks(10)));
/// assert!(!p.contains_instant(Instant::from_ticks(20)));
/// assert_eq!(p.duration(), Some(TickSpan::ticks(10)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Period {
    start: Option<Instant>,
    end: Option<Instant>,
}

/// The error type for period offsets that push the whole period off the axis.
///
/// A single trailing bound overflowing merely degrades to an unbounded side;
/// losing the leading bound as well would silently turn a finite period into
/// an infinite one, so that case is reported instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodOffsetError {
    /// The period the offset was applied to.
    pub period: Period,
    /// The offending offset.
    pub span: TickSpan,
}

impl std::fmt::Display for PeriodOffsetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "offsetting period {} by {} pushes it off the tick axis",
            self.period, self.span
        )
    }
}

impl std::error::Error for PeriodOffsetError {}

impl Period {
    /// Creates a new `Period`.
    ///
    /// # Panics
    ///
    /// Panics if both bounds are present and `end < start`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_model::Period;
    /// # use tidemark_core::time::Instant;
    /// let p = Period::new(Some(Instant::from_ticks(5)), None);
    /// assert_eq!(p.start(), Some(Instant::from_ticks(5)));
    /// assert_eq!(p.end(), None);
    /// ```
    #[inline]
    pub fn new(start: Option<Instant>, end: Option<Instant>) -> Self {
        assert!(
            !matches!((start, end), (Some(s), Some(e)) if e < s),
            "called `Period::new` with end before start"
        );
        Self { start, end }
    }

    /// Creates a new `Period` if the bounds are ordered.
    ///
    /// Returns `None` if both bounds are present and `end < start`.
    #[inline]
    pub fn try_new(start: Option<Instant>, end: Option<Instant>) -> Option<Self> {
        match (start, end) {
            (Some(s), Some(e)) if e < s => None,
            _ => Some(Self { start, end }),
        }
    }

    /// Creates a period with two concrete bounds.
    ///
    /// # Panics
    ///
    /// Panics if `end < start`.
    #[inline]
    pub fn bounded(start: Instant, end: Instant) -> Self {
        Self::new(Some(start), Some(end))
    }

    /// Creates the period `[start, +∞)`.
    #[inline]
    pub const fn starting_at(start: Instant) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// Creates the period `(-∞, end)`.
    #[inline]
    pub const fn ending_at(end: Instant) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// Creates the period covering the whole axis.
    #[inline]
    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Returns the start bound, `None` meaning "always begun".
    #[inline]
    pub const fn start(&self) -> Option<Instant> {
        self.start
    }

    /// Returns the end bound, `None` meaning "never ends".
    #[inline]
    pub const fn end(&self) -> Option<Instant> {
        self.end
    }

    /// Returns `end − start`.
    ///
    /// `None` when either bound is unbounded, or when the length exceeds
    /// the representable span range.
    #[inline]
    pub fn duration(&self) -> Option<TickSpan> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => end.ticks_since(start),
            _ => None,
        }
    }

    /// Returns `true` if the period contains no instant (`start == end`).
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!((self.start, self.end), (Some(s), Some(e)) if s == e)
    }

    /// Returns `true` if `t` lies in `[start, end)`.
    ///
    /// An unbounded side is always satisfied on that side.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_model::Period;
    /// # use tidemark_core::time::Instant;
    /// let open_ended = Period::starting_at(Instant::from_ticks(10));
    /// assert!(open_ended.contains_instant(Instant::MAX));
    /// assert!(!open_ended.contains_instant(Instant::from_ticks(9)));
    /// ```
    #[inline]
    pub fn contains_instant(&self, t: Instant) -> bool {
        let after_start = match self.start {
            Some(start) => start <= t,
            None => true,
        };
        let before_end = match self.end {
            Some(end) => t < end,
            None => true,
        };
        after_start && before_end
    }

    /// Returns `true` if the two periods share at least one boundary-free
    /// stretch, judged on bounds like the closed-open interval overlap test.
    ///
    /// Zero-length periods overlap nothing.
    #[inline]
    pub fn overlaps(&self, other: &Period) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && starts_before_end(self.start, other.end)
            && starts_before_end(other.start, self.end)
    }

    /// Returns `true` if the periods overlap or touch (`end == start`).
    #[inline]
    pub fn overlaps_or_touches(&self, other: &Period) -> bool {
        starts_at_or_before_end(self.start, other.end) && starts_at_or_before_end(other.start, self.end)
    }

    /// Calculates the intersection of two periods.
    ///
    /// Returns `None` if they are disjoint or touch without overlapping.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_model::Period;
    /// # use tidemark_core::time::Instant;
    /// let a = Period::bounded(Instant::from_ticks(0), Instant::from_ticks(10));
    /// let b = Period::starting_at(Instant::from_ticks(5));
    /// assert_eq!(
    ///     a.intersection(&b),
    ///     Some(Period::bounded(Instant::from_ticks(5), Instant::from_ticks(10)))
    /// );
    /// ```
    pub fn intersection(&self, other: &Period) -> Option<Period> {
        let start = later_start(self.start, other.start);
        let end = earlier_end(self.end, other.end);
        match Period::try_new(start, end) {
            Some(period) if !period.is_empty() => Some(period),
            _ => None,
        }
    }

    /// Calculates the union of two overlapping or touching periods.
    ///
    /// Returns `None` if a gap separates them, since the result would not
    /// be a single period.
    pub fn union(&self, other: &Period) -> Option<Period> {
        if self.overlaps_or_touches(other) {
            Some(Period {
                start: earlier_start(self.start, other.start),
                end: later_end(self.end, other.end),
            })
        } else {
            None
        }
    }

    /// Calculates the set difference `self \ other`.
    ///
    /// # Returns
    ///
    /// A vector of zero, one, or two periods: zero when `other` covers
    /// `self`, two when `other` punches a hole into `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_model::Period;
    /// # use tidemark_core::time::Instant;
    /// let base = Period::bounded(Instant::from_ticks(10), Instant::from_ticks(20));
    /// let hole = Period::bounded(Instant::from_ticks(12), Instant::from_ticks(14));
    /// let parts = base.subtract(&hole);
    /// assert_eq!(parts.len(), 2);
    /// assert_eq!(parts[0], Period::bounded(Instant::from_ticks(10), Instant::from_ticks(12)));
    /// assert_eq!(parts[1], Period::bounded(Instant::from_ticks(14), Instant::from_ticks(20)));
    /// ```
    pub fn subtract(&self, other: &Period) -> SmallVec<[Period; 2]> {
        if !self.overlaps(other) {
            return smallvec::smallvec![*self];
        }

        let mut result = SmallVec::new();
        // Left remainder: [self.start, other.start) when other starts inside.
        if cmp_start(self.start, other.start) == Ordering::Less {
            result.push(Period {
                start: self.start,
                end: other.start,
            });
        }
        // Right remainder: [other.end, self.end) when other ends inside.
        if cmp_end(other.end, self.end) == Ordering::Less {
            result.push(Period {
                start: other.end,
                end: self.end,
            });
        }
        result
    }

    /// Splits the period into two at `t`.
    ///
    /// Returns `None` unless `t` lies strictly inside the period.
    pub fn split_at(&self, t: Instant) -> Option<(Period, Period)> {
        if !self.contains_instant(t) || self.start == Some(t) {
            return None;
        }
        Some((
            Period {
                start: self.start,
                end: Some(t),
            },
            Period {
                start: Some(t),
                end: self.end,
            },
        ))
    }

    /// Shifts both bounds by `span`.
    ///
    /// A trailing bound that leaves the axis degrades to unbounded: the
    /// instants it bounded genuinely extend past the representable edge.
    /// A leading bound that leaves the axis means no instant of the period
    /// remains representable, which is reported as an error rather than
    /// inventing an infinite period.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_model::Period;
    /// # use tidemark_core::time::{Instant, TickSpan};
    /// let last = Period::bounded(
    ///     Instant::MAX.previous_tick().unwrap(),
    ///     Instant::MAX,
    /// );
    /// let shifted = last.offset(TickSpan::TICK).unwrap();
    /// assert_eq!(shifted, Period::starting_at(Instant::MAX));
    /// assert!(last.offset(TickSpan::ticks(2)).is_err());
    /// ```
    pub fn offset(&self, span: TickSpan) -> Result<Period, PeriodOffsetError> {
        let error = PeriodOffsetError {
            period: *self,
            span,
        };
        if span.is_negative() {
            let end = match self.end {
                Some(end) => match end.checked_add(span) {
                    Some(shifted) => Some(shifted),
                    None => return Err(error),
                },
                None => None,
            };
            let start = self.start.and_then(|start| start.checked_add(span));
            Ok(Period { start, end })
        } else {
            let start = match self.start {
                Some(start) => match start.checked_add(span) {
                    Some(shifted) => Some(shifted),
                    None => return Err(error),
                },
                None => None,
            };
            let end = self.end.and_then(|end| end.checked_add(span));
            Ok(Period { start, end })
        }
    }
}

/// Compares start bounds; an absent start sorts before every concrete one.
#[inline]
pub(crate) fn cmp_start(a: Option<Instant>, b: Option<Instant>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.cmp(&y),
    }
}

/// Compares end bounds; an absent end sorts after every concrete one.
#[inline]
pub(crate) fn cmp_end(a: Option<Instant>, b: Option<Instant>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => x.cmp(&y),
    }
}

#[inline]
fn earlier_start(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    if cmp_start(a, b) == Ordering::Greater { b } else { a }
}

#[inline]
fn later_start(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    if cmp_start(a, b) == Ordering::Less { b } else { a }
}

#[inline]
fn earlier_end(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    if cmp_end(a, b) == Ordering::Greater { b } else { a }
}

#[inline]
fn later_end(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    if cmp_end(a, b) == Ordering::Less { b } else { a }
}

/// `start < end` with a missing start as −∞ and a missing end as +∞.
#[inline]
fn starts_before_end(start: Option<Instant>, end: Option<Instant>) -> bool {
    match (start, end) {
        (Some(s), Some(e)) => s < e,
        _ => true,
    }
}

/// `start <= end` with a missing start as −∞ and a missing end as +∞.
#[inline]
fn starts_at_or_before_end(start: Option<Instant>, end: Option<Instant>) -> bool {
    match (start, end) {
        (Some(s), Some(e)) => s <= e,
        _ => true,
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_start(self.start, other.start).then_with(|| cmp_end(self.end, other.end))
    }
}

impl PartialOrd for Period {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.start {
            Some(start) => write!(f, "[{}, ", start)?,
            None => write!(f, "(-∞, ")?,
        }
        match self.end {
            Some(end) => write!(f, "{})", end),
            None => write!(f, "+∞)"),
        }
    }
}

impl From<Instant> for Period {
    /// The single-tick period `[t, t + 1 tick)`, saturating at the axis end.
    #[inline]
    fn from(t: Instant) -> Self {
        Period {
            start: Some(t),
            end: t.next_tick(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks(t: i64) -> Instant {
        Instant::from_ticks(t)
    }

    fn period(start: i64, end: i64) -> Period {
        Period::bounded(ticks(start), ticks(end))
    }

    #[test]
    fn test_construction_valid() {
        let p = period(10, 20);
        assert_eq!(p.start(), Some(ticks(10)));
        assert_eq!(p.end(), Some(ticks(20)));
        assert!(!p.is_empty());
    }

    #[test]
    #[should_panic(expected = "end before start")]
    fn test_construction_reversed_panics() {
        let _ = period(20, 10);
    }

    #[test]
    fn test_try_new() {
        assert!(Period::try_new(Some(ticks(5)), Some(ticks(10))).is_some());
        assert!(Period::try_new(Some(ticks(5)), Some(ticks(5))).is_some());
        assert!(Period::try_new(Some(ticks(10)), Some(ticks(5))).is_none());
        assert!(Period::try_new(None, None).is_some());
    }

    #[test]
    fn test_duration() {
        assert_eq!(period(10, 25).duration(), Some(TickSpan::ticks(15)));
        assert_eq!(Period::starting_at(ticks(10)).duration(), None);
        assert_eq!(Period::ending_at(ticks(10)).duration(), None);
        assert_eq!(Period::unbounded().duration(), None);
        // Longer than the span range: reported as absent, not wrapped.
        assert_eq!(Period::bounded(Instant::MIN, Instant::MAX).duration(), None);
    }

    #[test]
    fn test_contains_instant_half_open() {
        let p = period(10, 20);
        assert!(!p.contains_instant(ticks(9)));
        assert!(p.contains_instant(ticks(10)));
        assert!(p.contains_instant(ticks(19)));
        assert!(!p.contains_instant(ticks(20)));
    }

    #[test]
    fn test_contains_instant_unbounded_sides() {
        assert!(Period::unbounded().contains_instant(Instant::MIN));
        assert!(Period::unbounded().contains_instant(Instant::MAX));
        assert!(Period::ending_at(ticks(0)).contains_instant(Instant::MIN));
        assert!(!Period::ending_at(ticks(0)).contains_instant(ticks(0)));
    }

    #[test]
    fn test_zero_length_contains_nothing() {
        let p = period(5, 5);
        assert!(p.is_empty());
        assert!(!p.contains_instant(ticks(5)));
    }

    #[test]
    fn test_ordering_unbounded_start_first() {
        let mut periods = vec![
            period(5, 10),
            Period::ending_at(ticks(7)),
            Period::unbounded(),
            period(5, 8),
            Period::starting_at(ticks(5)),
        ];
        periods.sort();
        assert_eq!(
            periods,
            vec![
                Period::ending_at(ticks(7)),
                Period::unbounded(),
                period(5, 8),
                period(5, 10),
                Period::starting_at(ticks(5)),
            ]
        );
    }

    #[test]
    fn test_overlaps() {
        let p = period(0, 10);
        assert!(p.overlaps(&period(5, 15)));
        assert!(p.overlaps(&Period::unbounded()));
        assert!(!p.overlaps(&period(10, 20))); // touching
        assert!(!p.overlaps(&period(12, 20)));
        assert!(!p.overlaps(&period(5, 5))); // zero-length
    }

    #[test]
    fn test_intersection() {
        let a = period(0, 10);
        assert_eq!(a.intersection(&period(5, 15)), Some(period(5, 10)));
        assert_eq!(a.intersection(&Period::unbounded()), Some(a));
        assert_eq!(a.intersection(&period(10, 20)), None);
        assert_eq!(
            Period::ending_at(ticks(5)).intersection(&Period::starting_at(ticks(-5))),
            Some(period(-5, 5))
        );
    }

    #[test]
    fn test_union() {
        let a = period(0, 10);
        assert_eq!(a.union(&period(10, 20)), Some(period(0, 20)));
        assert_eq!(a.union(&period(5, 15)), Some(period(0, 15)));
        assert_eq!(a.union(&period(12, 20)), None);
        assert_eq!(
            a.union(&Period::starting_at(ticks(3))),
            Some(Period::starting_at(ticks(0)))
        );
    }

    #[test]
    fn test_subtract_disjoint_and_hole() {
        let base = period(10, 20);
        let untouched = base.subtract(&period(30, 40));
        assert_eq!(untouched.as_slice(), &[base]);

        let parts = base.subtract(&period(12, 14));
        assert_eq!(parts.as_slice(), &[period(10, 12), period(14, 20)]);

        let erased = base.subtract(&Period::unbounded());
        assert!(erased.is_empty());
    }

    #[test]
    fn test_subtract_clipping() {
        let base = period(10, 20);
        assert_eq!(base.subtract(&period(5, 12)).as_slice(), &[period(12, 20)]);
        assert_eq!(base.subtract(&period(18, 25)).as_slice(), &[period(10, 18)]);
        assert_eq!(
            base.subtract(&Period::starting_at(ticks(15))).as_slice(),
            &[period(10, 15)]
        );
    }

    #[test]
    fn test_split_at() {
        let p = period(10, 20);
        assert_eq!(p.split_at(ticks(15)), Some((period(10, 15), period(15, 20))));
        assert_eq!(p.split_at(ticks(10)), None);
        assert_eq!(p.split_at(ticks(20)), None);
        assert_eq!(
            Period::unbounded().split_at(ticks(0)),
            Some((Period::ending_at(ticks(0)), Period::starting_at(ticks(0))))
        );
    }

    #[test]
    fn test_offset_plain() {
        let p = period(10, 20);
        assert_eq!(p.offset(TickSpan::ticks(5)), Ok(period(15, 25)));
        assert_eq!(p.offset(TickSpan::ticks(-5)), Ok(period(5, 15)));
        assert_eq!(p.offset(TickSpan::ZERO), Ok(p));
    }

    #[test]
    fn test_offset_trailing_bound_degrades() {
        let last = Period::bounded(Instant::MAX.previous_tick().unwrap(), Instant::MAX);
        assert_eq!(
            last.offset(TickSpan::TICK),
            Ok(Period::starting_at(Instant::MAX))
        );

        let first = Period::bounded(Instant::MIN, Instant::MIN.next_tick().unwrap());
        assert_eq!(
            first.offset(-TickSpan::TICK),
            Ok(Period::ending_at(Instant::MIN))
        );
    }

    #[test]
    fn test_offset_collapse_is_error() {
        let last = Period::bounded(Instant::MAX.previous_tick().unwrap(), Instant::MAX);
        let err = last.offset(TickSpan::ticks(2)).unwrap_err();
        assert_eq!(err.period, last);
        assert_eq!(err.span, TickSpan::ticks(2));

        let first = Period::bounded(Instant::MIN, Instant::MIN.next_tick().unwrap());
        assert!(first.offset(TickSpan::ticks(-2)).is_err());
    }

    #[test]
    fn test_offset_half_bounded() {
        let open_end = Period::starting_at(Instant::MAX.previous_tick().unwrap());
        // The start is the leading bound for a positive offset.
        assert_eq!(open_end.offset(TickSpan::TICK), Ok(Period::starting_at(Instant::MAX)));
        assert!(open_end.offset(TickSpan::ticks(2)).is_err());

        let open_start = Period::ending_at(ticks(10));
        assert_eq!(
            open_start.offset(TickSpan::ticks(-5)),
            Ok(Period::ending_at(ticks(5)))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Period::unbounded()), "(-∞, +∞)");
        let rendered = format!("{}", Period::starting_at(Instant::UNIX_EPOCH));
        assert!(rendered.starts_with("[1970-01-01T00:00:00"), "{rendered}");
        assert!(rendered.ends_with("+∞)"), "{rendered}");
    }

    #[test]
    fn test_from_instant_is_single_tick() {
        let p = Period::from(ticks(5));
        assert!(p.contains_instant(ticks(5)));
        assert!(!p.contains_instant(ticks(6)));
        assert_eq!(p.duration(), Some(TickSpan::TICK));
    }
}
