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
use std::ops::BitAnd;
use std::sync::Arc;
use tidemark_core::time::{Instant, earliest, latest};

/// Shared operands of one intersection.
struct IntersectCore {
    a: PeriodTimeline,
    b: PeriodTimeline,
}

impl IntersectCore {
    /// A combined start is a start of one operand landing inside the
    /// other operand's period (the later of two overlapping starts).
    fn start_survives(&self, at: Instant) -> bool {
        (self.a.starts().is_instant(at) && self.b.contains(at))
            || (self.b.starts().is_instant(at) && self.a.contains(at))
    }

    /// A combined end is an end of one operand where the other operand
    /// was still inside immediately before it.
    fn end_survives(&self, at: Instant) -> bool {
        (self.a.ends().is_instant(at) && self.b.contains_before(at))
            || (self.b.ends().is_instant(at) && self.a.contains_before(at))
    }
}

/// The starts of an intersected period timeline.
pub struct IntersectedStartTimeline {
    core: Arc<IntersectCore>,
}

impl Timeline for IntersectedStartTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "IntersectedStartTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = latest(
                self.core.a.starts().previous(cursor),
                self.core.b.starts().previous(cursor),
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
                self.core.a.starts().next(cursor),
                self.core.b.starts().next(cursor),
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

/// The ends of an intersected period timeline.
pub struct IntersectedEndTimeline {
    core: Arc<IntersectCore>,
}

impl Timeline for IntersectedEndTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "IntersectedEndTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = latest(
                self.core.a.ends().previous(cursor),
                self.core.b.ends().previous(cursor),
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
                self.core.a.ends().next(cursor),
                self.core.b.ends().next(cursor),
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
    /// The intersection of two period timelines: the stretches covered by
    /// both operands at once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_algebra::PeriodTimeline;
    /// # use tidemark_core::time::Instant;
    /// # use tidemark_model::Period;
    /// let a = PeriodTimeline::from_period(&Period::bounded(
    ///     Instant::from_ticks(0),
    ///     Instant::from_ticks(10),
    /// ));
    /// let b = PeriodTimeline::from_period(&Period::starting_at(Instant::from_ticks(5)));
    /// let both = a.intersect(&b);
    /// assert_eq!(
    ///     both.sample_at(Instant::from_ticks(6)).period,
    ///     Period::bounded(Instant::from_ticks(5), Instant::from_ticks(10))
    /// );
    /// ```
    pub fn intersect(&self, other: &PeriodTimeline) -> PeriodTimeline {
        let core = Arc::new(IntersectCore {
            a: self.clone(),
            b: other.clone(),
        });
        PeriodTimeline::from_boundaries(
            TimelineHandle::new(IntersectedStartTimeline { core: core.clone() }),
            TimelineHandle::new(IntersectedEndTimeline { core }),
        )
    }
}

impl BitAnd for PeriodTimeline {
    type Output = PeriodTimeline;

    /// Sugar for [`PeriodTimeline::intersect`].
    #[inline]
    fn bitand(self, rhs: PeriodTimeline) -> PeriodTimeline {
        self.intersect(&rhs)
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

    #[test]
    fn test_partial_overlap() {
        let both = periods(&[(0, 10)]).intersect(&periods(&[(5, 20)]));
        assert!(!both.contains(ticks(4)));
        assert!(both.contains(ticks(5)));
        assert!(both.contains(ticks(9)));
        assert!(!both.contains(ticks(10)));
        assert_eq!(
            both.sample_at(ticks(7)).period,
            Period::bounded(ticks(5), ticks(10))
        );
    }

    #[test]
    fn test_disjoint_is_empty() {
        let none = periods(&[(0, 5)]).intersect(&periods(&[(10, 15)]));
        assert!(none.is_empty());
        assert!(!none.contains(ticks(3)));
        assert!(!none.contains(ticks(12)));
    }

    #[test]
    fn test_touching_is_empty() {
        let none = periods(&[(0, 5)]).intersect(&periods(&[(5, 10)]));
        assert!(none.is_empty());
    }

    #[test]
    fn test_multiple_fragments() {
        let both = periods(&[(0, 100)]).intersect(&periods(&[(10, 20), (30, 40)]));
        assert_eq!(
            both.sample_at(ticks(15)).period,
            Period::bounded(ticks(10), ticks(20))
        );
        assert_eq!(
            both.sample_at(ticks(35)).period,
            Period::bounded(ticks(30), ticks(40))
        );
        assert!(!both.contains(ticks(25)));
    }

    #[test]
    fn test_intersect_with_full_is_identity() {
        let base = periods(&[(0, 5), (9, 12)]);
        let same = base.clone() & PeriodTimeline::full();
        for t in -2..15 {
            assert_eq!(same.contains(ticks(t)), base.contains(ticks(t)));
        }
    }

    #[test]
    fn test_boundary_preserved_when_both_cross_it() {
        // A window cutting across A's internal touching boundary keeps it.
        let a = periods(&[(0, 10), (10, 20)]);
        let window = periods(&[(5, 15)]);
        let both = a.intersect(&window);
        assert!(both.starts().is_instant(ticks(10)));
        assert!(both.ends().is_instant(ticks(10)));
        assert_eq!(
            both.sample_at(ticks(7)).period,
            Period::bounded(ticks(5), ticks(10))
        );
        assert_eq!(
            both.sample_at(ticks(12)).period,
            Period::bounded(ticks(10), ticks(15))
        );
    }
}
