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
use std::ops::BitOr;
use std::sync::{Arc, OnceLock};
use tidemark_core::time::{Instant, earliest, latest};

/// Shared state of one merge: the operands and the one-time full-coverage
/// determination.
struct MergeCore {
    a: PeriodTimeline,
    b: PeriodTimeline,
    covers_axis: OnceLock<bool>,
}

impl MergeCore {
    /// A start survives unless the other operand was already inside just
    /// before it. An operand's own boundaries never absorb each other, so
    /// merging with the empty timeline is the identity; touching periods
    /// across operands coalesce.
    fn start_survives(&self, at: Instant) -> bool {
        (self.a.starts().is_instant(at) && !self.b.contains_before(at))
            || (self.b.starts().is_instant(at) && !self.a.contains_before(at))
    }

    /// An end survives unless it falls inside the other operand's period
    /// (which absorbs it into a larger merged period).
    fn end_survives(&self, at: Instant) -> bool {
        (self.a.ends().is_instant(at) && !self.b.contains(at))
            || (self.b.ends().is_instant(at) && !self.a.contains(at))
    }

    fn next_start(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = earliest(self.a.starts().next(cursor), self.b.starts().next(cursor))?;
            if self.start_survives(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn previous_start(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = latest(
                self.a.starts().previous(cursor),
                self.b.starts().previous(cursor),
            )?;
            if self.start_survives(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn next_end(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = earliest(self.a.ends().next(cursor), self.b.ends().next(cursor))?;
            if self.end_survives(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn previous_end(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = latest(self.a.ends().previous(cursor), self.b.ends().previous(cursor))?;
            if self.end_survives(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    /// A union that covers the whole axis has no surviving boundary to
    /// query; it is detected once and encoded as a sentinel start at
    /// `MIN`. The scan terminates whenever the operands' own queries do.
    fn covers_axis(&self) -> bool {
        *self.covers_axis.get_or_init(|| {
            (self.a.contains(Instant::MIN) || self.b.contains(Instant::MIN))
                && !self.start_survives(Instant::MIN)
                && self.next_start(Instant::MIN).is_none()
                && !self.end_survives(Instant::MIN)
                && self.next_end(Instant::MIN).is_none()
        })
    }
}

/// The starts of a merged period timeline.
pub struct MergedStartTimeline {
    core: Arc<MergeCore>,
}

impl Timeline for MergedStartTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "MergedStartTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        if self.core.covers_axis() {
            return (at > Instant::MIN).then_some(Instant::MIN);
        }
        self.core.previous_start(at)
    }

    fn next(&self, at: Instant) -> Option<Instant> {
        if self.core.covers_axis() {
            return None;
        }
        self.core.next_start(at)
    }

    fn is_instant(&self, at: Instant) -> bool {
        if self.core.covers_axis() {
            return at == Instant::MIN;
        }
        self.core.start_survives(at)
    }
}

/// The ends of a merged period timeline.
pub struct MergedEndTimeline {
    core: Arc<MergeCore>,
}

impl Timeline for MergedEndTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "MergedEndTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        if self.core.covers_axis() {
            return None;
        }
        self.core.previous_end(at)
    }

    fn next(&self, at: Instant) -> Option<Instant> {
        if self.core.covers_axis() {
            return None;
        }
        self.core.next_end(at)
    }

    fn is_instant(&self, at: Instant) -> bool {
        if self.core.covers_axis() {
            return false;
        }
        self.core.end_survives(at)
    }
}

impl PeriodTimeline {
    /// The union of two period timelines.
    ///
    /// Overlapping and touching periods across the operands coalesce into
    /// one; boundaries internal to a single operand are preserved, so
    /// merging with [`PeriodTimeline::empty`] changes nothing.
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
    /// let b = PeriodTimeline::from_period(&Period::bounded(
    ///     Instant::from_ticks(5),
    ///     Instant::from_ticks(20),
    /// ));
    /// let merged = a.merge(&b);
    /// assert_eq!(
    ///     merged.sample_at(Instant::from_ticks(7)).period,
    ///     Period::bounded(Instant::from_ticks(0), Instant::from_ticks(20))
    /// );
    /// ```
    pub fn merge(&self, other: &PeriodTimeline) -> PeriodTimeline {
        let core = Arc::new(MergeCore {
            a: self.clone(),
            b: other.clone(),
            covers_axis: OnceLock::new(),
        });
        PeriodTimeline::from_boundaries(
            TimelineHandle::new(MergedStartTimeline { core: core.clone() }),
            TimelineHandle::new(MergedEndTimeline { core }),
        )
    }
}

impl BitOr for PeriodTimeline {
    type Output = PeriodTimeline;

    /// Sugar for [`PeriodTimeline::merge`].
    #[inline]
    fn bitor(self, rhs: PeriodTimeline) -> PeriodTimeline {
        self.merge(&rhs)
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
    fn test_disjoint_operands_interleave() {
        let merged = periods(&[(0, 10)]).merge(&periods(&[(20, 30)]));
        assert_eq!(boundaries(&merged), (vec![0, 20], vec![10, 30]));
        assert!(merged.contains(ticks(5)));
        assert!(!merged.contains(ticks(15)));
        assert!(merged.contains(ticks(25)));
    }

    #[test]
    fn test_overlapping_operands_coalesce() {
        let merged = periods(&[(0, 10)]).merge(&periods(&[(5, 20)]));
        assert_eq!(boundaries(&merged), (vec![0], vec![20]));
    }

    #[test]
    fn test_touching_across_operands_coalesce() {
        let merged = periods(&[(0, 10)]).merge(&periods(&[(10, 20)]));
        assert_eq!(boundaries(&merged), (vec![0], vec![20]));
    }

    #[test]
    fn test_merge_with_empty_is_identity() {
        // Internal touching boundaries of one operand must be preserved.
        let base = periods(&[(0, 5), (5, 10)]);
        let merged = base.clone().merge(&PeriodTimeline::empty());
        assert_eq!(boundaries(&merged), boundaries(&base));
        for t in -2..12 {
            assert_eq!(merged.contains(ticks(t)), base.contains(ticks(t)));
        }
    }

    #[test]
    fn test_nested_operand_is_absorbed() {
        let merged = periods(&[(0, 100)]).merge(&periods(&[(10, 20), (30, 40)]));
        assert_eq!(boundaries(&merged), (vec![0], vec![100]));
    }

    #[test]
    fn test_full_axis_coverage_uses_min_sentinel() {
        let left = PeriodTimeline::from_period(&Period::ending_at(ticks(10)));
        let right = PeriodTimeline::from_period(&Period::starting_at(ticks(5)));
        let merged = left.merge(&right);

        // No ordinary boundary survives; the sentinel start at MIN stands
        // in for "always inside".
        assert!(merged.starts().is_instant(Instant::MIN));
        assert_eq!(merged.starts().next(Instant::MIN), None);
        assert_eq!(merged.starts().previous(ticks(0)), Some(Instant::MIN));
        assert_eq!(merged.ends().next(Instant::MIN), None);

        assert!(merged.contains(Instant::MIN));
        assert!(merged.contains(ticks(7)));
        assert!(merged.contains(Instant::MAX));
        assert_eq!(
            merged.sample_at(ticks(0)).period,
            Period::starting_at(Instant::MIN)
        );
    }

    #[test]
    fn test_merge_operator_sugar() {
        let merged = periods(&[(0, 5)]) | periods(&[(7, 9)]);
        assert!(merged.contains(ticks(8)));
        assert!(!merged.contains(ticks(6)));
    }

    #[test]
    fn test_merge_is_commutative_pointwise() {
        let a = periods(&[(0, 10), (20, 30)]);
        let b = periods(&[(5, 22)]);
        let ab = a.clone().merge(&b);
        let ba = b.merge(&a);
        for t in -5..35 {
            assert_eq!(ab.contains(ticks(t)), ba.contains(ticks(t)));
        }
        assert_eq!(boundaries(&ab), boundaries(&ba));
    }
}
