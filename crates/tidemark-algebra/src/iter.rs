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

//! Lazy iteration over timelines.
//!
//! The `previous`/`next` query pair is the generator primitive; an
//! iterator is just a cursor that replays it from a caller-supplied
//! starting point. Nothing is materialized, so iterating an infinite
//! timeline is fine as long as the consumer stops — `take`, a bounding
//! condition, or a finite timeline end the walk.

use crate::period_timeline::PeriodTimeline;
use crate::timeline::{Timeline, TimelineHandle};
use std::iter::FusedIterator;
use tidemark_core::time::Instant;
use tidemark_model::Period;

/// Walks a timeline's instants in ascending order.
///
/// Created by [`TimelineHandle::instants_after`].
#[derive(Clone, Debug)]
pub struct InstantsAfter {
    timeline: TimelineHandle,
    cursor: Option<Instant>,
}

impl Iterator for InstantsAfter {
    type Item = Instant;

    fn next(&mut self) -> Option<Instant> {
        let at = self.cursor?;
        let found = self.timeline.next(at);
        self.cursor = found;
        found
    }
}

impl FusedIterator for InstantsAfter {}

/// Walks a timeline's instants in descending order.
///
/// Created by [`TimelineHandle::instants_before`].
#[derive(Clone, Debug)]
pub struct InstantsBefore {
    timeline: TimelineHandle,
    cursor: Option<Instant>,
}

impl Iterator for InstantsBefore {
    type Item = Instant;

    fn next(&mut self) -> Option<Instant> {
        let at = self.cursor?;
        let found = self.timeline.previous(at);
        self.cursor = found;
        found
    }
}

impl FusedIterator for InstantsBefore {}

impl TimelineHandle {
    /// Iterates the instants strictly after `at`, ascending.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_algebra::TimelineHandle;
    /// # use tidemark_core::time::{Instant, TickSpan};
    /// let grid = TimelineHandle::periodic(Instant::from_ticks(0), TickSpan::ticks(10));
    /// let first_three: Vec<i64> = grid
    ///     .instants_after(Instant::from_ticks(0))
    ///     .take(3)
    ///     .map(|t| t.ticks())
    ///     .collect();
    /// assert_eq!(first_three, vec![10, 20, 30]);
    /// ```
    #[inline]
    pub fn instants_after(&self, at: Instant) -> InstantsAfter {
        InstantsAfter {
            timeline: self.clone(),
            cursor: Some(at),
        }
    }

    /// Iterates the instants strictly before `at`, descending.
    #[inline]
    pub fn instants_before(&self, at: Instant) -> InstantsBefore {
        InstantsBefore {
            timeline: self.clone(),
            cursor: Some(at),
        }
    }
}

/// Walks a period timeline's periods in ascending order.
///
/// Created by [`PeriodTimeline::periods_from`].
#[derive(Clone, Debug)]
pub struct PeriodsFrom {
    timeline: PeriodTimeline,
    cursor: Option<Instant>,
}

impl Iterator for PeriodsFrom {
    type Item = Period;

    fn next(&mut self) -> Option<Period> {
        let at = self.cursor.take()?;
        let sample = self.timeline.sample_at(at);
        let period = if sample.is_inside {
            sample.period
        } else {
            // In a gap; its end is the next period's start.
            let next_start = sample.period.end()?;
            self.timeline.sample_at(next_start).period
        };
        // At a period's end instant the sample already reports the next
        // period (touching) or the gap before it.
        self.cursor = period.end();
        Some(period)
    }
}

impl FusedIterator for PeriodsFrom {}

/// Walks a period timeline's periods in descending order.
///
/// Created by [`PeriodTimeline::periods_back_from`].
#[derive(Clone, Debug)]
pub struct PeriodsBackFrom {
    timeline: PeriodTimeline,
    cursor: Option<Instant>,
}

impl Iterator for PeriodsBackFrom {
    type Item = Period;

    fn next(&mut self) -> Option<Period> {
        let at = self.cursor.take()?;
        let sample = self.timeline.sample_at(at);
        let period = if sample.is_inside {
            sample.period
        } else {
            // In a gap; its start is the previous period's end.
            let previous_end = sample.period.start()?;
            self.timeline
                .sample_at(previous_end.previous_tick()?)
                .period
        };
        self.cursor = period.start().and_then(Instant::previous_tick);
        Some(period)
    }
}

impl FusedIterator for PeriodsBackFrom {}

impl PeriodTimeline {
    /// Iterates the periods enclosing or following `at`, ascending.
    ///
    /// When `at` lies inside a period, that period is yielded first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_algebra::PeriodTimeline;
    /// # use tidemark_core::time::Instant;
    /// # use tidemark_model::Period;
    /// let timeline = PeriodTimeline::from_periods([
    ///     Period::bounded(Instant::from_ticks(0), Instant::from_ticks(10)),
    ///     Period::bounded(Instant::from_ticks(20), Instant::from_ticks(30)),
    /// ]);
    /// let all: Vec<Period> = timeline.periods_from(Instant::MIN).collect();
    /// assert_eq!(all.len(), 2);
    /// assert_eq!(all[0], Period::bounded(Instant::from_ticks(0), Instant::from_ticks(10)));
    /// ```
    #[inline]
    pub fn periods_from(&self, at: Instant) -> PeriodsFrom {
        PeriodsFrom {
            timeline: self.clone(),
            cursor: Some(at),
        }
    }

    /// Iterates the periods enclosing or preceding `at`, descending.
    #[inline]
    pub fn periods_back_from(&self, at: Instant) -> PeriodsBackFrom {
        PeriodsBackFrom {
            timeline: self.clone(),
            cursor: Some(at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidemark_core::time::TickSpan;

    fn ticks(t: i64) -> Instant {
        Instant::from_ticks(t)
    }

    fn period(start: i64, end: i64) -> Period {
        Period::bounded(ticks(start), ticks(end))
    }

    #[test]
    fn test_instants_walk_both_directions() {
        let timeline = TimelineHandle::from_instants([1, 3, 5, 7].map(ticks));
        let forward: Vec<i64> = timeline
            .instants_after(ticks(2))
            .map(|t| t.ticks())
            .collect();
        assert_eq!(forward, vec![3, 5, 7]);
        let backward: Vec<i64> = timeline
            .instants_before(ticks(6))
            .map(|t| t.ticks())
            .collect();
        assert_eq!(backward, vec![5, 3, 1]);
    }

    #[test]
    fn test_instants_iterator_is_restartable() {
        let timeline = TimelineHandle::from_instants([1, 3, 5].map(ticks));
        let first: Vec<i64> = timeline
            .instants_after(Instant::MIN)
            .map(|t| t.ticks())
            .collect();
        let second: Vec<i64> = timeline
            .instants_after(Instant::MIN)
            .map(|t| t.ticks())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_infinite_timeline_bounded_by_take() {
        let grid = TimelineHandle::periodic(ticks(0), TickSpan::ticks(5));
        let window: Vec<i64> = grid
            .instants_after(ticks(-12))
            .take(4)
            .map(|t| t.ticks())
            .collect();
        assert_eq!(window, vec![-10, -5, 0, 5]);
    }

    #[test]
    fn test_empty_timeline_yields_nothing() {
        assert_eq!(TimelineHandle::empty().instants_after(Instant::MIN).count(), 0);
        assert_eq!(
            TimelineHandle::empty().instants_before(Instant::MAX).count(),
            0
        );
    }

    #[test]
    fn test_periods_forward_including_enclosing() {
        let timeline = PeriodTimeline::from_periods([period(0, 10), period(20, 30)]);
        let from_inside: Vec<Period> = timeline.periods_from(ticks(5)).collect();
        assert_eq!(from_inside, vec![period(0, 10), period(20, 30)]);
        let from_gap: Vec<Period> = timeline.periods_from(ticks(15)).collect();
        assert_eq!(from_gap, vec![period(20, 30)]);
    }

    #[test]
    fn test_periods_backward() {
        let timeline = PeriodTimeline::from_periods([period(0, 10), period(20, 30)]);
        let back: Vec<Period> = timeline.periods_back_from(ticks(25)).collect();
        assert_eq!(back, vec![period(20, 30), period(0, 10)]);
        let from_gap: Vec<Period> = timeline.periods_back_from(ticks(15)).collect();
        assert_eq!(from_gap, vec![period(0, 10)]);
    }

    #[test]
    fn test_periods_touching_chain_visits_each() {
        let timeline = PeriodTimeline::from_periods([period(0, 5), period(5, 9)]);
        let all: Vec<Period> = timeline.periods_from(Instant::MIN).collect();
        assert_eq!(all, vec![period(0, 5), period(5, 9)]);
    }

    #[test]
    fn test_periods_unbounded_ends_terminate_the_walk() {
        let timeline = PeriodTimeline::from_periods([
            Period::ending_at(ticks(0)),
            Period::starting_at(ticks(10)),
        ]);
        let forward: Vec<Period> = timeline.periods_from(Instant::MIN).collect();
        assert_eq!(
            forward,
            vec![Period::ending_at(ticks(0)), Period::starting_at(ticks(10))]
        );
        let backward: Vec<Period> = timeline.periods_back_from(Instant::MAX).collect();
        assert_eq!(
            backward,
            vec![Period::starting_at(ticks(10)), Period::ending_at(ticks(0))]
        );
    }

    #[test]
    fn test_periods_of_empty_timeline() {
        assert_eq!(PeriodTimeline::empty().periods_from(Instant::MIN).count(), 0);
        assert_eq!(
            PeriodTimeline::empty()
                .periods_back_from(Instant::MAX)
                .count(),
            0
        );
    }

    #[test]
    fn test_periods_of_full_timeline() {
        let all: Vec<Period> = PeriodTimeline::full().periods_from(Instant::MIN).collect();
        assert_eq!(all, vec![Period::starting_at(Instant::MIN)]);
    }
}
