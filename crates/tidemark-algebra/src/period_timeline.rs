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

//! The paired start/end representation of period sequences.
//!
//! A [`PeriodTimeline`] is two correlated timelines: one of period starts,
//! one of period ends. In the normalized form the boundaries strictly
//! alternate; an end without any preceding start describes a period that
//! has always begun, a start without any following end one that never
//! ends. At a coincident instant an end applies before a start, so one
//! instant can close a period and open the next (touching periods).
//!
//! Full axis coverage has no queryable boundary, so it is encoded as a
//! single sentinel start at [`Instant::MIN`] — which is also simply the
//! period `[MIN, +∞)`, making the encoding consistent with ordinary
//! queries.

use crate::period_ops::normalize::{NormalizedEndTimeline, NormalizedStartTimeline};
use crate::timeline::{Timeline, TimelineHandle};
use std::sync::{Arc, OnceLock};
use tidemark_core::time::Instant;
use tidemark_model::Period;

/// The answer of [`PeriodTimeline::sample_at`]: the period around a point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeriodSample {
    /// The enclosing period when inside, the bounding gap when outside.
    pub period: Period,
    /// Whether the sampled instant lies inside a period.
    pub is_inside: bool,
}

/// A sorted sequence of non-overlapping periods, represented lazily as a
/// pair of boundary timelines.
///
/// # Examples
///
/// ```rust
/// # use tidemark_algebra::{PeriodTimeline, TimelineHandle};
/// # use tidemark_core::time::Instant;
/// let work = PeriodTimeline::between(
///     TimelineHandle::from_instants([Instant::from_ticks(10), Instant::from_ticks(20)]),
///     TimelineHandle::from_instants([Instant::from_ticks(15), Instant::from_ticks(25)]),
/// );
/// assert!(work.contains(Instant::from_ticks(12)));
/// assert!(!work.contains(Instant::from_ticks(17)));
/// ```
#[derive(Clone)]
pub struct PeriodTimeline {
    starts: TimelineHandle,
    ends: TimelineHandle,
    empty_memo: Arc<OnceLock<bool>>,
}

impl PeriodTimeline {
    /// Builds the normalized period timeline delimited by two raw boundary
    /// timelines.
    ///
    /// Caller-supplied starts and ends need not pair up; normalization
    /// lazily drops starts that fall inside an open period and ends that
    /// have nothing to close.
    pub fn between(starts: TimelineHandle, ends: TimelineHandle) -> Self {
        let normalized_starts =
            TimelineHandle::new(NormalizedStartTimeline::new(starts.clone(), ends.clone()));
        let normalized_ends = TimelineHandle::new(NormalizedEndTimeline::new(starts, ends));
        Self::from_boundaries(normalized_starts, normalized_ends)
    }

    /// Wraps boundary timelines that already satisfy the pairing
    /// invariants. Combinator outputs use this; they preserve the
    /// invariants by construction.
    pub(crate) fn from_boundaries(starts: TimelineHandle, ends: TimelineHandle) -> Self {
        Self {
            starts,
            ends,
            empty_memo: Arc::new(OnceLock::new()),
        }
    }

    /// The timeline with no periods.
    #[inline]
    pub fn empty() -> Self {
        Self::from_boundaries(TimelineHandle::empty(), TimelineHandle::empty())
    }

    /// The timeline covering the whole axis (sentinel start at `MIN`).
    #[inline]
    pub fn full() -> Self {
        Self::from_boundaries(TimelineHandle::once(Instant::MIN), TimelineHandle::empty())
    }

    /// The timeline holding exactly one period.
    ///
    /// A period that contains no instant yields the empty timeline.
    pub fn from_period(period: &Period) -> Self {
        if period.is_empty() || period.end() == Some(Instant::MIN) {
            return Self::empty();
        }
        match (period.start(), period.end()) {
            (None, None) => Self::full(),
            (start, end) => {
                let starts = match start {
                    Some(s) => TimelineHandle::once(s),
                    None => TimelineHandle::empty(),
                };
                let ends = match end {
                    Some(e) => TimelineHandle::once(e),
                    None => TimelineHandle::empty(),
                };
                Self::from_boundaries(starts, ends)
            }
        }
    }

    /// Builds a period timeline from concrete periods, merging overlaps.
    ///
    /// Touching periods stay separate (coalescing them is
    /// [`stitch`](Self::stitch)'s job); overlapping ones merge, the way
    /// a canonical disjoint interval set is built.
    pub fn from_periods<I>(periods: I) -> Self
    where
        I: IntoIterator<Item = Period>,
    {
        let mut sorted: Vec<Period> = periods
            .into_iter()
            .filter(|p| !p.is_empty() && p.end() != Some(Instant::MIN))
            .collect();
        sorted.sort_unstable();

        let mut merged: Vec<Period> = Vec::with_capacity(sorted.len());
        for period in sorted {
            match merged.last_mut() {
                Some(last) if last.overlaps(&period) => {
                    *last = last
                        .union(&period)
                        .expect("overlapping periods must union");
                }
                _ => merged.push(period),
            }
        }

        if merged.iter().any(|p| *p == Period::unbounded()) {
            return Self::full();
        }
        let starts = TimelineHandle::from_instants(merged.iter().filter_map(|p| p.start()));
        let ends = TimelineHandle::from_instants(merged.iter().filter_map(|p| p.end()));
        Self::from_boundaries(starts, ends)
    }

    /// The timeline of period starts.
    #[inline]
    pub fn starts(&self) -> &TimelineHandle {
        &self.starts
    }

    /// The timeline of period ends.
    #[inline]
    pub fn ends(&self) -> &TimelineHandle {
        &self.ends
    }

    /// Returns `true` if `at` lies inside one of the periods.
    pub fn contains(&self, at: Instant) -> bool {
        match (self.starts.previous_or_at(at), self.ends.previous_or_at(at)) {
            // A start with no later end keeps the period open through `at`.
            // A coincident end/start pair closes and reopens, so equality
            // still means inside.
            (Some(start), Some(end)) => end <= start,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            // No boundary at or before `at`: inside exactly when the first
            // upcoming boundary is an end (an always-begun period).
            (None, None) => match (self.starts.next(at), self.ends.next(at)) {
                (_, None) => false,
                (None, Some(_)) => true,
                (Some(start), Some(end)) => end <= start,
            },
        }
    }

    /// Returns `true` if the timeline is inside a period immediately
    /// before `at` (one tick below, or since forever at `MIN`).
    pub(crate) fn contains_before(&self, at: Instant) -> bool {
        match at.previous_tick() {
            Some(just_before) => self.contains(just_before),
            None => {
                let sample = self.sample_at(Instant::MIN);
                sample.is_inside && sample.period.start().is_none()
            }
        }
    }

    /// Reports the period enclosing `at`, or the gap period bounding it.
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
    /// let inside = timeline.sample_at(Instant::from_ticks(5));
    /// assert!(inside.is_inside);
    /// assert_eq!(inside.period, Period::bounded(Instant::from_ticks(0), Instant::from_ticks(10)));
    ///
    /// let gap = timeline.sample_at(Instant::from_ticks(15));
    /// assert!(!gap.is_inside);
    /// assert_eq!(gap.period, Period::bounded(Instant::from_ticks(10), Instant::from_ticks(20)));
    /// ```
    pub fn sample_at(&self, at: Instant) -> PeriodSample {
        if self.contains(at) {
            let start = match (self.starts.previous_or_at(at), self.ends.previous_or_at(at)) {
                (Some(start), Some(end)) if end <= start => Some(start),
                (Some(start), None) => Some(start),
                // Inside with no start at or before `at`: always begun.
                _ => None,
            };
            let end = self.ends.next(at);
            PeriodSample {
                period: Period::new(start, end),
                is_inside: true,
            }
        } else {
            let start = self.ends.previous_or_at(at);
            let end = self.starts.next(at);
            PeriodSample {
                period: Period::new(start, end),
                is_inside: false,
            }
        }
    }

    /// The period opened by the start boundary at `start`.
    pub(crate) fn period_opened_at(&self, start: Instant) -> Period {
        debug_assert!(
            self.starts.is_instant(start),
            "called `period_opened_at` on a non-start instant {start:?}"
        );
        self.sample_at(start).period
    }

    /// The period closed by the end boundary at `end`, `None` for an end
    /// at the minimum instant (which closes nothing).
    pub(crate) fn period_closed_at(&self, end: Instant) -> Option<Period> {
        let just_before = end.previous_tick()?;
        let sample = self.sample_at(just_before);
        sample.is_inside.then_some(sample.period)
    }

    /// Returns `true` if the timeline holds no period at all.
    ///
    /// Computed once per timeline and memoized; the computation is
    /// idempotent, so a racing first use merely recomputes it.
    pub fn is_empty(&self) -> bool {
        *self.empty_memo.get_or_init(|| {
            !self.contains(Instant::MIN) && self.starts.next_or_at(Instant::MIN).is_none()
        })
    }
}

impl std::fmt::Debug for PeriodTimeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PeriodTimeline(starts: {:?}, ends: {:?})",
            self.starts, self.ends
        )
    }
}

impl From<Period> for PeriodTimeline {
    #[inline]
    fn from(period: Period) -> Self {
        PeriodTimeline::from_period(&period)
    }
}
