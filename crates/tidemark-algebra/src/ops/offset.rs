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

use crate::timeline::{Timeline, TimelineHandle};
use std::ops::{Add, Sub};
use tidemark_core::time::{Instant, TickSpan};

/// Shifts every source instant by a fixed signed span.
///
/// Queries shift the query point by the inverse offset, delegate, and
/// shift the answer back. Source instants whose image would leave the
/// axis simply have no image; at the axis edges the queries short-circuit
/// to the nearest instant that still maps inside.
pub struct OffsetTimeline {
    source: TimelineHandle,
    offset: TickSpan,
}

impl OffsetTimeline {
    /// Creates a shifted view of `source`.
    #[inline]
    pub fn new(source: TimelineHandle, offset: TickSpan) -> Self {
        Self { source, offset }
    }
}

impl Timeline for OffsetTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "OffsetTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        match at.checked_sub(self.offset) {
            Some(shifted) => {
                let source_instant = self.source.previous(shifted)?;
                // An image below MIN means this and every earlier instant
                // have left the axis.
                source_instant.checked_add(self.offset)
            }
            None => {
                if self.offset.is_positive() {
                    // Every image lies at or above MIN + offset > at.
                    None
                } else {
                    // `at` is above every possible image; answer with the
                    // image of the last source instant.
                    let last = self.source.previous_or_at(Instant::MAX)?;
                    last.checked_add(self.offset)
                }
            }
        }
    }

    fn next(&self, at: Instant) -> Option<Instant> {
        match at.checked_sub(self.offset) {
            Some(shifted) => {
                let source_instant = self.source.next(shifted)?;
                // An image above MAX means this and every later instant
                // have left the axis.
                source_instant.checked_add(self.offset)
            }
            None => {
                if self.offset.is_positive() {
                    // `at` is below every possible image; answer with the
                    // image of the first source instant.
                    let first = self.source.next_or_at(Instant::MIN)?;
                    first.checked_add(self.offset)
                } else {
                    // Every image lies at or below MAX + offset < at.
                    None
                }
            }
        }
    }

    fn is_instant(&self, at: Instant) -> bool {
        match at.checked_sub(self.offset) {
            Some(shifted) => self.source.is_instant(shifted),
            None => false,
        }
    }
}

impl TimelineHandle {
    /// Shifts every instant by `offset`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_algebra::{Timeline, TimelineHandle};
    /// # use tidemark_core::time::{Instant, TickSpan};
    /// let base = TimelineHandle::from_instants([Instant::from_ticks(100)]);
    /// let shifted = base.offset(TickSpan::ticks(-30));
    /// assert!(shifted.is_instant(Instant::from_ticks(70)));
    /// assert_eq!(shifted.next(Instant::from_ticks(0)), Some(Instant::from_ticks(70)));
    /// ```
    #[inline]
    pub fn offset(&self, offset: TickSpan) -> TimelineHandle {
        TimelineHandle::new(OffsetTimeline::new(self.clone(), offset))
    }
}

impl Add<TickSpan> for TimelineHandle {
    type Output = TimelineHandle;

    /// Sugar for [`TimelineHandle::offset`].
    #[inline]
    fn add(self, rhs: TickSpan) -> TimelineHandle {
        self.offset(rhs)
    }
}

impl Sub<TickSpan> for TimelineHandle {
    type Output = TimelineHandle;

    /// Sugar for [`TimelineHandle::offset`] with the negated span.
    #[inline]
    fn sub(self, rhs: TickSpan) -> TimelineHandle {
        self.offset(-rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(values: &[i64]) -> TimelineHandle {
        TimelineHandle::from_instants(values.iter().map(|&t| Instant::from_ticks(t)))
    }

    #[test]
    fn test_shift_round_trip() {
        let base = handle(&[10, 20, 30]);
        let shifted = base.clone().offset(TickSpan::ticks(5)).offset(TickSpan::ticks(-5));
        for t in 5..35 {
            let t = Instant::from_ticks(t);
            assert_eq!(shifted.is_instant(t), base.is_instant(t));
            assert_eq!(shifted.next(t), base.next(t));
            assert_eq!(shifted.previous(t), base.previous(t));
        }
    }

    #[test]
    fn test_images_past_the_axis_vanish() {
        let base = handle(&[0]).union(&TimelineHandle::once(Instant::MAX));
        let shifted = base.offset(TickSpan::ticks(10));
        // MAX + 10 left the axis; only 0 + 10 remains.
        assert_eq!(shifted.next(Instant::from_ticks(5)), Some(Instant::from_ticks(10)));
        assert_eq!(shifted.next(Instant::from_ticks(10)), None);
        assert_eq!(shifted.previous(Instant::MAX), Some(Instant::from_ticks(10)));
    }

    #[test]
    fn test_query_point_below_every_image() {
        let base = handle(&[0, 50]);
        let shifted = base.offset(TickSpan::ticks(i64::MAX / 2));
        // `at - offset` underflows: the answer is the first image.
        assert_eq!(
            shifted.next(Instant::MIN),
            Some(Instant::from_ticks(i64::MAX / 2))
        );
        assert_eq!(shifted.previous(Instant::MIN), None);
    }

    #[test]
    fn test_query_point_above_every_image() {
        let base = handle(&[0, 50]);
        let shifted = base.offset(TickSpan::ticks(-(i64::MAX / 2)));
        // `at - offset` overflows: the answer is the last image.
        assert_eq!(
            shifted.previous(Instant::MAX),
            Some(Instant::from_ticks(50 - i64::MAX / 2))
        );
        assert_eq!(shifted.next(Instant::MAX), None);
    }

    #[test]
    fn test_operator_sugar() {
        let base = handle(&[100]);
        let forward = base.clone() + TickSpan::ticks(10);
        let backward = base - TickSpan::ticks(10);
        assert!(forward.is_instant(Instant::from_ticks(110)));
        assert!(backward.is_instant(Instant::from_ticks(90)));
    }
}
