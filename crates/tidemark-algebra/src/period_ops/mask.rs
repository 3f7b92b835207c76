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

//! Masking a period timeline by another one.
//!
//! `within` keeps the source periods completely contained in a mask
//! period; `outside` keeps the ones sharing no instant with the mask.
//! Both drop or keep whole periods. Start queries jump straight past
//! stretches where no candidate can qualify — outside every mask period
//! for `within`, inside one for `outside` — instead of stepping through
//! each rejected source start.

use crate::period_timeline::PeriodTimeline;
use crate::timeline::{Timeline, TimelineHandle};
use std::sync::Arc;
use tidemark_core::time::Instant;
use tidemark_model::{ContainmentMode, Period};

/// Which side of the mask the kept periods must lie on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MaskKind {
    Within,
    Outside,
}

/// Shared state of one mask filter.
struct MaskCore {
    source: PeriodTimeline,
    mask: PeriodTimeline,
    kind: MaskKind,
}

impl MaskCore {
    /// Whether a whole source period qualifies under the mask.
    fn period_qualifies(&self, period: &Period) -> bool {
        // Every instant of the period is at or after this anchor.
        let anchor = period.start().unwrap_or(Instant::MIN);
        match self.kind {
            MaskKind::Within => {
                let sample = self.mask.sample_at(anchor);
                sample.is_inside
                    && sample
                        .period
                        .contains_period(period, ContainmentMode::Complete)
            }
            MaskKind::Outside => {
                if self.mask.contains(anchor) {
                    return false;
                }
                // Overlap-free also means no mask period may begin before
                // this one ends.
                match (self.mask.starts().next(anchor), period.end()) {
                    (None, _) => true,
                    (Some(mask_start), Some(end)) => mask_start >= end,
                    (Some(_), None) => false,
                }
            }
        }
    }

    fn start_survives(&self, at: Instant) -> bool {
        self.source.starts().is_instant(at)
            && self.period_qualifies(&self.source.period_opened_at(at))
    }

    fn end_survives(&self, at: Instant) -> bool {
        self.source.ends().is_instant(at)
            && self
                .source
                .period_closed_at(at)
                .is_some_and(|period| self.period_qualifies(&period))
    }

    /// A forward cursor jump for a rejected start candidate, exclusive of
    /// the earliest instant where a qualifying start could sit.
    fn jump_forward(&self, rejected: Instant) -> Option<Option<Instant>> {
        match self.kind {
            // A qualifying start must lie inside a mask period.
            MaskKind::Within if !self.mask.contains(rejected) => {
                Some(match self.mask.starts().next(rejected) {
                    Some(mask_start) => mask_start.previous_tick(),
                    None => None,
                })
            }
            // A qualifying start must lie outside every mask period.
            MaskKind::Outside if self.mask.contains(rejected) => {
                Some(match self.mask.ends().next(rejected) {
                    Some(mask_end) => mask_end.previous_tick(),
                    None => None,
                })
            }
            _ => None,
        }
    }

    /// The backward counterpart of [`MaskCore::jump_forward`].
    fn jump_backward(&self, rejected: Instant) -> Option<Option<Instant>> {
        match self.kind {
            MaskKind::Within if !self.mask.contains(rejected) => {
                // Coverage below the rejected candidate stops at the
                // nearest mask end; a qualifying start sits below it.
                Some(self.mask.ends().previous_or_at(rejected))
            }
            MaskKind::Outside if self.mask.contains(rejected) => {
                Some(self.mask.starts().previous_or_at(rejected))
            }
            _ => None,
        }
    }
}

/// The starts of a masked period timeline.
pub struct MaskedStartTimeline {
    core: Arc<MaskCore>,
}

impl Timeline for MaskedStartTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "MaskedStartTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = self.core.source.starts().previous(cursor)?;
            if self.core.start_survives(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
            if let Some(jump) = self.core.jump_backward(candidate) {
                cursor = cursor.min(jump?);
            }
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
            if let Some(jump) = self.core.jump_forward(candidate) {
                cursor = cursor.max(jump?);
            }
        }
    }

    fn is_instant(&self, at: Instant) -> bool {
        self.core.start_survives(at)
    }
}

/// The ends of a masked period timeline.
pub struct MaskedEndTimeline {
    core: Arc<MaskCore>,
}

impl Timeline for MaskedEndTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "MaskedEndTimeline"
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

fn masked(source: &PeriodTimeline, mask: &PeriodTimeline, kind: MaskKind) -> PeriodTimeline {
    let core = Arc::new(MaskCore {
        source: source.clone(),
        mask: mask.clone(),
        kind,
    });
    PeriodTimeline::from_boundaries(
        TimelineHandle::new(MaskedStartTimeline { core: core.clone() }),
        TimelineHandle::new(MaskedEndTimeline { core }),
    )
}

impl PeriodTimeline {
    /// Keeps the periods completely contained in a mask period.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_algebra::PeriodTimeline;
    /// # use tidemark_core::time::Instant;
    /// # use tidemark_model::Period;
    /// let meetings = PeriodTimeline::from_periods([
    ///     Period::bounded(Instant::from_ticks(10), Instant::from_ticks(20)),
    ///     Period::bounded(Instant::from_ticks(45), Instant::from_ticks(55)),
    /// ]);
    /// let working_hours =
    ///     PeriodTimeline::from_period(&Period::bounded(Instant::from_ticks(0), Instant::from_ticks(50)));
    /// let kept = meetings.within(&working_hours);
    /// assert!(kept.contains(Instant::from_ticks(15)));
    /// assert!(!kept.contains(Instant::from_ticks(47))); // sticks out
    /// ```
    pub fn within(&self, mask: &PeriodTimeline) -> PeriodTimeline {
        masked(self, mask, MaskKind::Within)
    }

    /// Keeps the periods sharing no instant with the mask.
    pub fn outside(&self, mask: &PeriodTimeline) -> PeriodTimeline {
        masked(self, mask, MaskKind::Outside)
    }

    /// Drops the periods overlapping `excluded` at all.
    ///
    /// "Any overlap drops the period" and "keep only the overlap-free
    /// periods" select the same survivors, so this is
    /// [`outside`](Self::outside) under its other name.
    #[inline]
    pub fn without(&self, excluded: &PeriodTimeline) -> PeriodTimeline {
        self.outside(excluded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_within_keeps_contained_periods_only() {
        let source = periods(&[(10, 20), (45, 55), (70, 80)]);
        let mask = periods(&[(0, 50), (60, 100)]);
        let kept = source.within(&mask);
        // [45, 55) straddles the mask boundary at 50 and is dropped.
        assert_eq!(boundaries(&kept), (vec![10, 70], vec![20, 80]));
    }

    #[test]
    fn test_within_accepts_exact_fit() {
        let kept = periods(&[(10, 20)]).within(&periods(&[(10, 20)]));
        assert_eq!(boundaries(&kept), (vec![10], vec![20]));
    }

    #[test]
    fn test_outside_keeps_overlap_free_periods_only() {
        let source = periods(&[(0, 5), (8, 12), (20, 25)]);
        let mask = periods(&[(10, 15)]);
        let kept = source.outside(&mask);
        // [8, 12) overlaps the mask and is dropped whole.
        assert_eq!(boundaries(&kept), (vec![0, 20], vec![5, 25]));
    }

    #[test]
    fn test_outside_touching_mask_survives() {
        // Touching shares no instant: [5, 10) against mask [10, 20).
        let kept = periods(&[(5, 10), (15, 18)]).outside(&periods(&[(10, 20)]));
        assert_eq!(boundaries(&kept), (vec![5], vec![10]));
    }

    #[test]
    fn test_within_and_outside_partition_on_disjoint_cases() {
        // A period either qualifies for exactly one side or straddles and
        // qualifies for neither.
        let source = periods(&[(0, 5), (8, 12), (20, 30)]);
        let mask = periods(&[(7, 14), (18, 40)]);
        let inside = source.clone().within(&mask);
        let outside = source.outside(&mask);
        assert!(inside.contains(ticks(9)));
        assert!(!outside.contains(ticks(9)));
        assert!(outside.contains(ticks(2)));
        assert!(!inside.contains(ticks(2)));
    }

    #[test]
    fn test_within_jump_skips_far_gaps() {
        // Many source periods sit in the mask's gap; queries must still
        // find the kept one beyond it.
        let source = periods(&[(0, 2), (10, 12), (20, 22), (30, 32), (100, 110)]);
        let mask = periods(&[(90, 200)]);
        let kept = source.within(&mask);
        assert_eq!(kept.starts().next(Instant::MIN), Some(ticks(100)));
        assert_eq!(kept.starts().previous(Instant::MAX), Some(ticks(100)));
        assert_eq!(boundaries(&kept), (vec![100], vec![110]));
    }

    #[test]
    fn test_outside_jump_skips_covered_stretches() {
        let source = periods(&[(0, 2), (10, 12), (20, 22), (100, 110)]);
        let mask = periods(&[(5, 90)]);
        let kept = source.outside(&mask);
        assert_eq!(boundaries(&kept), (vec![0, 100], vec![2, 110]));
        assert_eq!(kept.starts().next(ticks(0)), Some(ticks(100)));
    }

    #[test]
    fn test_unbounded_source_period_against_mask() {
        let source = PeriodTimeline::from_periods([Period::starting_at(ticks(10))]);
        // Only an unbounded mask period can contain it completely.
        assert!(source.clone().within(&periods(&[(0, 100)])).is_empty());
        let open_mask = PeriodTimeline::from_periods([Period::starting_at(ticks(0))]);
        assert!(source.clone().within(&open_mask).contains(ticks(50)));
        // Outside: a mask start anywhere after 10 overlaps it.
        assert!(source.outside(&periods(&[(50, 60)])).is_empty());
    }

    #[test]
    fn test_without_is_outside() {
        let source = periods(&[(0, 5), (8, 12)]);
        let mask = periods(&[(10, 15)]);
        let a = source.clone().without(&mask);
        let b = source.outside(&mask);
        assert_eq!(boundaries(&a), boundaries(&b));
    }

    #[test]
    fn test_empty_mask_keeps_everything_outside_nothing_within() {
        let source = periods(&[(0, 5), (8, 12)]);
        assert!(source.clone().within(&PeriodTimeline::empty()).is_empty());
        assert_eq!(
            boundaries(&source.clone().outside(&PeriodTimeline::empty())),
            boundaries(&source)
        );
    }

    #[test]
    fn test_full_mask_keeps_everything_within_nothing_outside() {
        let source = periods(&[(0, 5), (8, 12)]);
        assert_eq!(
            boundaries(&source.clone().within(&PeriodTimeline::full())),
            boundaries(&source)
        );
        assert!(source.outside(&PeriodTimeline::full()).is_empty());
    }
}
