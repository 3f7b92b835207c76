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

use crate::period_timeline::PeriodTimeline;
use crate::timeline::{Timeline, TimelineHandle};
use std::ops::Sub;
use std::sync::Arc;
use tidemark_core::time::{Instant, earliest, latest};

/// Shared operands of one subtraction: `base` minus `subtrahend`.
struct SubtractCore {
    base: PeriodTimeline,
    subtrahend: PeriodTimeline,
}

impl SubtractCore {
    /// A result start is a base start outside the subtrahend, or a
    /// subtrahend end landing inside a base period (which reopens the base
    /// after the removed stretch). A subtrahend end coinciding with its
    /// own next start removes nothing and spawns nothing, which the
    /// `contains` check covers.
    fn start_survives(&self, at: Instant) -> bool {
        (self.base.starts().is_instant(at) && !self.subtrahend.contains(at))
            || (self.subtrahend.ends().is_instant(at)
                && self.base.contains(at)
                && !self.subtrahend.contains(at))
    }

    /// A result end is a base end the subtrahend was not already covering,
    /// or a subtrahend start cutting into a base period. A cut at `MIN`
    /// closes nothing and is skipped.
    fn end_survives(&self, at: Instant) -> bool {
        (self.base.ends().is_instant(at) && !self.subtrahend.contains_before(at))
            || (at != Instant::MIN
                && self.subtrahend.starts().is_instant(at)
                && self.base.contains_before(at)
                && !self.subtrahend.contains_before(at))
    }
}

/// The starts of a subtracted period timeline.
pub struct SubtractedStartTimeline {
    core: Arc<SubtractCore>,
}

impl Timeline for SubtractedStartTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "SubtractedStartTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = latest(
                self.core.base.starts().previous(cursor),
                self.core.subtrahend.ends().previous(cursor),
            )?;
            if self.core.start_survives(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn next(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = earliest(
                self.core.base.starts().next(cursor),
                self.core.subtrahend.ends().next(cursor),
            )?;
            if self.core.start_survives(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn is_instant(&self, at: Instant) -> bool {
        self.core.start_survives(at)
    }
}

/// The ends of a subtracted period timeline.
pub struct SubtractedEndTimeline {
    core: Arc<SubtractCore>,
}

impl Timeline for SubtractedEndTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "SubtractedEndTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = latest(
                self.core.base.ends().previous(cursor),
                self.core.subtrahend.starts().previous(cursor),
            )?;
            if self.core.end_survives(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn next(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = earliest(
                self.core.base.ends().next(cursor),
                self.core.subtrahend.starts().next(cursor),
            )?;
            if self.core.end_survives(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn is_instant(&self, at: Instant) -> bool {
        self.core.end_survives(at)
    }
}

impl PeriodTimeline {
    /// Removes the stretches covered by `other` from `self`.
    ///
    /// A removed stretch strictly inside a base period splits it in two.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_algebra::PeriodTimeline;
    /// # use tidemark_core::time::Instant;
    /// # use tidemark_model::Period;
    /// let base = PeriodTimeline::from_period(&Period::bounded(
    ///     Instant::from_ticks(10),
    ///     Instant::from_ticks(20),
    /// ));
    /// let hole = PeriodTimeline::from_period(&Period::bounded(
    ///     Instant::from_ticks(12),
    ///     Instant::from_ticks(14),
    /// ));
    /// let split = base.subtract(&hole);
    /// assert_eq!(
    ///     split.sample_at(Instant::from_ticks(11)).period,
    ///     Period::bounded(Instant::from_ticks(10), Instant::from_ticks(12))
    /// );
    /// assert_eq!(
    ///     split.sample_at(Instant::from_ticks(15)).period,
    ///     Period::bounded(Instant::from_ticks(14), Instant::from_ticks(20))
    /// );
    /// ```
    pub fn subtract(&self, other: &PeriodTimeline) -> PeriodTimeline {
        let core = Arc::new(SubtractCore {
            base: self.clone(),
            subtrahend: other.clone(),
        });
        PeriodTimeline::from_boundaries(
            TimelineHandle::new(SubtractedStartTimeline { core: core.clone() }),
            TimelineHandle::new(SubtractedEndTimeline { core }),
        )
    }
}

impl Sub for PeriodTimeline {
    type Output = PeriodTimeline;

    /// Sugar for [`PeriodTimeline::subtract`].
    #[inline]
    fn sub(self, rhs: PeriodTimeline) -> PeriodTimeline {
        self.subtract(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidemark_model::Period;

    fn ticks(t: i64) -> Instant {
        Instant::from_ticks(t)
    }

    fn periods(list: &[(i64, i64)]) -> PeriodTimeline {
        PeriodTimeline::from_periods(
            list.iter()
                .map(|&(s, e)| Period::bounded(ticks(s), ticks(e))),
        )
    }

    fn boundaries(timeline: &PeriodTimeline) -> (Vec<i64>, Vec<i64>) {
        let collect = |tl: &TimelineHandle| {
            let mut out = Vec::new();
            let mut cursor = Instant::MIN;
            if tl.is_instant(cursor) {
                out.push(cursor.ticks());
            }
            while let Some(next) = tl.next(cursor) {
                out.push(next.ticks());
                cursor = next;
            }
            out
        };
        (collect(timeline.starts()), collect(timeline.ends()))
    }

    #[test]
    fn test_hole_splits_the_period() {
        let split = periods(&[(10, 20)]).subtract(&periods(&[(12, 14)]));
        assert_eq!(boundaries(&split), (vec![10, 14], vec![12, 20]));
        assert!(split.contains(ticks(11)));
        assert!(!split.contains(ticks(12)));
        assert!(!split.contains(ticks(13)));
        assert!(split.contains(ticks(14)));
        assert!(split.contains(ticks(19)));
    }

    #[test]
    fn test_overlap_trims_the_edges() {
        let trimmed = periods(&[(10, 20)]).subtract(&periods(&[(0, 12), (18, 30)]));
        assert_eq!(boundaries(&trimmed), (vec![12], vec![18]));
    }

    #[test]
    fn test_subtract_empty_is_identity() {
        let base = periods(&[(0, 5), (5, 10)]);
        let same = base.clone().subtract(&PeriodTimeline::empty());
        assert_eq!(boundaries(&same), boundaries(&base));
    }

    #[test]
    fn test_subtract_everything_is_empty() {
        let none = periods(&[(0, 10), (20, 30)]).subtract(&PeriodTimeline::full());
        assert!(none.is_empty());
        for t in [-5, 0, 5, 25, 40] {
            assert!(!none.contains(ticks(t)));
        }
    }

    #[test]
    fn test_touching_subtrahend_removes_nothing_extra() {
        // The subtrahend ends exactly where the base begins.
        let same = periods(&[(10, 20)]).subtract(&periods(&[(0, 10)]));
        assert_eq!(boundaries(&same), (vec![10], vec![20]));
    }

    #[test]
    fn test_result_is_disjoint_from_subtrahend() {
        let base = periods(&[(0, 30)]);
        let sub = periods(&[(5, 10), (15, 25)]);
        let difference = base.subtract(&sub);
        for t in -5..35 {
            assert!(
                !(difference.contains(ticks(t)) && sub.contains(ticks(t))),
                "difference and subtrahend both cover {t}"
            );
        }
    }

    #[test]
    fn test_subtract_and_intersect_reconstruct_the_base() {
        let base = periods(&[(0, 10), (20, 40)]);
        let other = periods(&[(5, 25), (30, 35)]);
        let reconstructed = base.subtract(&other).merge(&base.intersect(&other));
        for t in -5..45 {
            assert_eq!(
                reconstructed.contains(ticks(t)),
                base.contains(ticks(t)),
                "reconstruction differs from the base at {t}"
            );
        }
    }

    #[test]
    fn test_subtract_from_unbounded_base() {
        let difference = PeriodTimeline::full().subtract(&periods(&[(10, 20)]));
        assert!(difference.contains(ticks(5)));
        assert!(!difference.contains(ticks(15)));
        assert!(difference.contains(ticks(20)));
        assert_eq!(
            difference.sample_at(ticks(25)).period,
            Period::starting_at(ticks(20))
        );
    }

    #[test]
    fn test_subtract_operator_sugar() {
        let difference = periods(&[(0, 10)]) - periods(&[(4, 6)]);
        assert!(difference.contains(ticks(2)));
        assert!(!difference.contains(ticks(5)));
        assert!(difference.contains(ticks(8)));
    }

    #[test]
    fn test_base_internal_touching_boundary_preserved() {
        let base = periods(&[(0, 5), (5, 9)]);
        let difference = base.subtract(&periods(&[(20, 30)]));
        assert_eq!(boundaries(&difference), (vec![0, 5], vec![5, 9]));
    }
}
