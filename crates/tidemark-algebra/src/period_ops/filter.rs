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

//! Whole-period filtering.
//!
//! A period is kept or dropped as a unit: a start survives when the
//! period it opens qualifies, an end when the period it closes does. The
//! containment combinators build on the same core with their own
//! predicates.

use crate::period_timeline::PeriodTimeline;
use crate::timeline::{Timeline, TimelineHandle};
use std::sync::Arc;
use tidemark_core::time::Instant;
use tidemark_model::Period;

/// A boolean predicate over whole periods, shared across combinator clones.
pub type PeriodPredicate = Arc<dyn Fn(&Period) -> bool + Send + Sync>;

/// Shared state of one period filter.
pub(crate) struct FilterPeriodsCore {
    source: PeriodTimeline,
    predicate: PeriodPredicate,
}

impl FilterPeriodsCore {
    pub(crate) fn new(source: PeriodTimeline, predicate: PeriodPredicate) -> Self {
        Self { source, predicate }
    }

    fn start_survives(&self, at: Instant) -> bool {
        self.source.starts().is_instant(at)
            && (self.predicate)(&self.source.period_opened_at(at))
    }

    fn end_survives(&self, at: Instant) -> bool {
        self.source.ends().is_instant(at)
            && self
                .source
                .period_closed_at(at)
                .is_some_and(|period| (self.predicate)(&period))
    }
}

/// The starts of a period-filtered timeline.
pub struct FilteredPeriodStartTimeline {
    core: Arc<FilterPeriodsCore>,
}

impl Timeline for FilteredPeriodStartTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "FilteredPeriodStartTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = self.core.source.starts().previous(cursor)?;
            if self.core.start_survives(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn next(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = self.core.source.starts().next(cursor)?;
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

/// The ends of a period-filtered timeline.
pub struct FilteredPeriodEndTimeline {
    core: Arc<FilterPeriodsCore>,
}

impl Timeline for FilteredPeriodEndTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "FilteredPeriodEndTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = self.core.source.ends().previous(cursor)?;
            if self.core.end_survives(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn next(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = self.core.source.ends().next(cursor)?;
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

pub(crate) fn filtered_from_core(core: FilterPeriodsCore) -> PeriodTimeline {
    let core = Arc::new(core);
    PeriodTimeline::from_boundaries(
        TimelineHandle::new(FilteredPeriodStartTimeline { core: core.clone() }),
        TimelineHandle::new(FilteredPeriodEndTimeline { core }),
    )
}

impl PeriodTimeline {
    /// Keeps the periods for which `predicate` holds, dropped or kept as
    /// whole units.
    ///
    /// The predicate runs on every query, never cached; with an expensive
    /// predicate or a sparse match set, boundary queries can scan many
    /// source periods.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_algebra::PeriodTimeline;
    /// # use tidemark_core::time::{Instant, TickSpan};
    /// # use tidemark_model::Period;
    /// let timeline = PeriodTimeline::from_periods([
    ///     Period::bounded(Instant::from_ticks(0), Instant::from_ticks(3)),
    ///     Period::bounded(Instant::from_ticks(10), Instant::from_ticks(30)),
    /// ]);
    /// let long = timeline.filter_periods(|p| {
    ///     p.duration().is_some_and(|d| d >= TickSpan::ticks(10))
    /// });
    /// assert!(!long.contains(Instant::from_ticks(1)));
    /// assert!(long.contains(Instant::from_ticks(20)));
    /// ```
    pub fn filter_periods<F>(&self, predicate: F) -> PeriodTimeline
    where
        F: Fn(&Period) -> bool + Send + Sync + 'static,
    {
        filtered_from_core(FilterPeriodsCore::new(self.clone(), Arc::new(predicate)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidemark_core::time::TickSpan;

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
    fn test_periods_dropped_as_whole_units() {
        let base = periods(&[(0, 3), (10, 30), (40, 41)]);
        let long = base.filter_periods(|p| {
            p.duration().is_some_and(|d| d >= TickSpan::ticks(10))
        });
        assert_eq!(boundaries(&long), (vec![10], vec![30]));
        assert!(!long.contains(ticks(1)));
        assert!(long.contains(ticks(15)));
        assert!(!long.contains(ticks(40)));
    }

    #[test]
    fn test_predicate_sees_real_bounds() {
        let base = PeriodTimeline::from_periods([
            Period::ending_at(ticks(0)),
            Period::bounded(ticks(10), ticks(20)),
        ]);
        let unbounded_only = base.filter_periods(|p| p.start().is_none());
        assert!(unbounded_only.contains(ticks(-5)));
        assert!(!unbounded_only.contains(ticks(15)));
        assert_eq!(
            unbounded_only.sample_at(ticks(-5)).period,
            Period::ending_at(ticks(0))
        );
    }

    #[test]
    fn test_rejecting_everything_is_empty() {
        let none = periods(&[(0, 10), (20, 30)]).filter_periods(|_| false);
        assert!(none.is_empty());
    }

    #[test]
    fn test_accepting_everything_is_identity() {
        let base = periods(&[(0, 5), (5, 10), (20, 30)]);
        let same = base.clone().filter_periods(|_| true);
        assert_eq!(boundaries(&same), boundaries(&base));
        for t in -2..32 {
            assert_eq!(same.contains(ticks(t)), base.contains(ticks(t)));
        }
    }

    #[test]
    fn test_touching_periods_filtered_independently() {
        // [0, 5) fails, [5, 9) passes: the shared boundary instant stays a
        // start but is no longer an end.
        let base = periods(&[(0, 5), (5, 9)]);
        let filtered = base.filter_periods(|p| {
            p.duration().is_some_and(|d| d < TickSpan::ticks(5))
        });
        assert_eq!(boundaries(&filtered), (vec![5], vec![9]));
        assert!(!filtered.contains(ticks(2)));
        assert!(filtered.contains(ticks(6)));
    }
}
