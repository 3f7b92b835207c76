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

//! Anchored whole-period filters: keep the periods that hold at least one
//! anchor instant, or at least one anchor period under a containment mode.

use crate::period_ops::filter::{FilterPeriodsCore, filtered_from_core};
use crate::period_timeline::PeriodTimeline;
use crate::timeline::{Timeline, TimelineHandle};
use std::sync::Arc;
use tidemark_core::time::Instant;
use tidemark_model::{ContainmentMode, Period};

/// Whether `period` holds at least one instant of `anchor`.
fn period_holds_instant(period: &Period, anchor: &TimelineHandle) -> bool {
    let first = match period.start() {
        Some(start) => anchor.next_or_at(start),
        None => anchor.next_or_at(Instant::MIN),
    };
    match (first, period.end()) {
        (None, _) => false,
        (Some(found), Some(end)) => found < end,
        (Some(_), None) => true,
    }
}

/// Whether `period` contains at least one anchor period under `mode`.
///
/// Walks the anchor's periods from the first one not entirely before
/// `period` until one qualifies or the candidates have moved past it. For
/// an unbounded `period` over an infinite anchor with no qualifying
/// candidate the walk does not terminate; such compositions are the
/// caller's responsibility.
fn period_holds_period(
    period: &Period,
    anchor: &PeriodTimeline,
    mode: ContainmentMode,
) -> bool {
    let mut sample = match period.start() {
        Some(start) => anchor.sample_at(start),
        None => anchor.sample_at(Instant::MIN),
    };
    if !sample.is_inside {
        // In a gap; the gap's end is the next anchor start.
        match sample.period.end() {
            Some(next_start) => sample = anchor.sample_at(next_start),
            None => return false,
        }
    }
    loop {
        let candidate = sample.period;
        if let (Some(candidate_start), Some(end)) = (candidate.start(), period.end())
            && candidate_start >= end
        {
            return false;
        }
        if period.contains_period(&candidate, mode) {
            return true;
        }
        let Some(candidate_end) = candidate.end() else {
            return false;
        };
        // The next anchor period starts at or after this one's end.
        match anchor.starts().next_or_at(candidate_end) {
            Some(next_start) => sample = anchor.sample_at(next_start),
            None => return false,
        }
    }
}

impl PeriodTimeline {
    /// Keeps the periods holding at least one instant of `anchor`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_algebra::{PeriodTimeline, TimelineHandle};
    /// # use tidemark_core::time::Instant;
    /// # use tidemark_model::Period;
    /// let timeline = PeriodTimeline::from_periods([
    ///     Period::bounded(Instant::from_ticks(0), Instant::from_ticks(10)),
    ///     Period::bounded(Instant::from_ticks(20), Instant::from_ticks(30)),
    /// ]);
    /// let anchored = timeline.containing_instants(
    ///     &TimelineHandle::once(Instant::from_ticks(5)),
    /// );
    /// assert!(anchored.contains(Instant::from_ticks(5)));
    /// assert!(!anchored.contains(Instant::from_ticks(25)));
    /// ```
    pub fn containing_instants(&self, anchor: &TimelineHandle) -> PeriodTimeline {
        let anchor = anchor.clone();
        filtered_from_core(FilterPeriodsCore::new(
            self.clone(),
            Arc::new(move |period| period_holds_instant(period, &anchor)),
        ))
    }

    /// Keeps the periods containing at least one period of `anchor` under
    /// `mode`.
    pub fn containing_periods(
        &self,
        anchor: &PeriodTimeline,
        mode: ContainmentMode,
    ) -> PeriodTimeline {
        let anchor = anchor.clone();
        filtered_from_core(FilterPeriodsCore::new(
            self.clone(),
            Arc::new(move |period| period_holds_period(period, &anchor, mode)),
        ))
    }
}
