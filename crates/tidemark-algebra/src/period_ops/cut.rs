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
use std::sync::Arc;
use tidemark_core::time::{Instant, earliest, latest};

/// Shared operands of one cut: the source and the cutting instants.
struct CutCore {
    source: PeriodTimeline,
    cuts: TimelineHandle,
}

impl CutCore {
    /// A result start is a source start, or a cut instant inside a period
    /// (the reopening half of an inserted boundary pair). A cut at an
    /// existing start adds nothing; a cut in a gap or at a period end is
    /// skipped.
    fn start_survives(&self, at: Instant) -> bool {
        self.source.starts().is_instant(at)
            || (self.cuts.is_instant(at) && self.source.contains(at))
    }

    /// A result end is a source end, or a cut instant strictly inside a
    /// period (covered both at and just before it). A cut at `MIN` closes
    /// nothing and inserts no end.
    fn end_survives(&self, at: Instant) -> bool {
        self.source.ends().is_instant(at)
            || (at != Instant::MIN
                && self.cuts.is_instant(at)
                && self.source.contains(at)
                && self.source.contains_before(at))
    }
}

/// The starts of a cut period timeline.
pub struct CutStartTimeline {
    core: Arc<CutCore>,
}

impl Timeline for CutStartTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "CutStartTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = latest(
                self.core.source.starts().previous(cursor),
                self.core.cuts.previous(cursor),
            )?;
            if self.core.start_survives(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
            // A rejected cut in a gap: no boundary survives before the
            // period below ends, so skip the rest of the gap (the cuts
            // may be infinite there).
            if !self.core.source.contains(candidate) {
                let gap = self.core.source.sample_at(candidate);
                cursor = cursor.min(gap.period.start()?);
            }
        }
    }

    fn next(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = earliest(
                self.core.source.starts().next(cursor),
                self.core.cuts.next(cursor),
            )?;
            if self.core.start_survives(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
            if !self.core.source.contains(candidate) {
                let gap = self.core.source.sample_at(candidate);
                cursor = cursor.max(gap.period.end()?.previous_tick()?);
            }
        }
    }

    fn is_instant(&self, at: Instant) -> bool {
        self.core.start_survives(at)
    }
}

/// The ends of a cut period timeline.
pub struct CutEndTimeline {
    core: Arc<CutCore>,
}

impl Timeline for CutEndTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "CutEndTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = latest(
                self.core.source.ends().previous(cursor),
                self.core.cuts.previous(cursor),
            )?;
            if self.core.end_survives(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
            // A rejected cut in a gap: the nearest surviving end below is
            // the gap's own start (the period end that opened it).
            if !self.core.source.contains(candidate) && !self.core.source.contains_before(candidate)
            {
                let gap = self.core.source.sample_at(candidate);
                cursor = cursor.min(gap.period.start()?.next_tick()?);
            }
        }
    }

    fn next(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = earliest(
                self.core.source.ends().next(cursor),
                self.core.cuts.next(cursor),
            )?;
            if self.core.end_survives(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
            if !self.core.source.contains(candidate) && !self.core.source.contains_before(candidate)
            {
                let gap = self.core.source.sample_at(candidate);
                cursor = cursor.max(gap.period.end()?.previous_tick()?);
            }
        }
    }

    fn is_instant(&self, at: Instant) -> bool {
        self.core.end_survives(at)
    }
}

impl PeriodTimeline {
    /// Splits periods at every cut instant that lies inside one.
    ///
    /// Membership is unchanged; each effective cut replaces one period
    /// with two touching ones. Cut instants in gaps or on existing
    /// boundaries are ignored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_algebra::{PeriodTimeline, TimelineHandle};
    /// # use tidemark_core::time::Instant;
    /// # use tidemark_model::Period;
    /// let base = PeriodTimeline::from_period(&Period::bounded(
    ///     Instant::from_ticks(10),
    ///     Instant::from_ticks(20),
    /// ));
    /// let halves = base.cut(&TimelineHandle::once(Instant::from_ticks(15)));
    /// assert_eq!(
    ///     halves.sample_at(Instant::from_ticks(12)).period,
    ///     Period::bounded(Instant::from_ticks(10), Instant::from_ticks(15))
    /// );
    /// assert_eq!(
    ///     halves.sample_at(Instant::from_ticks(16)).period,
    ///     Period::bounded(Instant::from_ticks(15), Instant::from_ticks(20))
    /// );
    /// ```
    pub fn cut(&self, cuts: &TimelineHandle) -> PeriodTimeline {
        let core = Arc::new(CutCore {
            source: self.clone(),
            cuts: cuts.clone(),
        });
        PeriodTimeline::from_boundaries(
            TimelineHandle::new(CutStartTimeline { core: core.clone() }),
            TimelineHandle::new(CutEndTimeline { core }),
        )
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

    fn cuts(values: &[i64]) -> TimelineHandle {
        TimelineHandle::from_instants(values.iter().map(|&t| ticks(t)))
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
    fn test_cut_inside_splits_into_touching_halves() {
        let halves = periods(&[(10, 20)]).cut(&cuts(&[15]));
        assert_eq!(boundaries(&halves), (vec![10, 15], vec![15, 20]));
        assert!(halves.contains(ticks(15)));
    }

    #[test]
    fn test_cut_outside_and_on_boundaries_skipped() {
        let base = periods(&[(10, 20)]);
        // In the gap, on the start, on the end: all no-ops.
        let same = base.clone().cut(&cuts(&[5, 10, 20, 25]));
        assert_eq!(boundaries(&same), boundaries(&base));
    }

    #[test]
    fn test_multiple_cuts_across_periods() {
        let sliced = periods(&[(0, 10), (20, 30)]).cut(&cuts(&[4, 7, 25]));
        assert_eq!(
            boundaries(&sliced),
            (vec![0, 4, 7, 20, 25], vec![4, 7, 10, 25, 30])
        );
    }

    #[test]
    fn test_cut_preserves_membership() {
        let base = periods(&[(0, 10), (20, 30)]);
        let sliced = base.clone().cut(&cuts(&[4, 15, 25]));
        for t in -3..33 {
            assert_eq!(
                sliced.contains(ticks(t)),
                base.contains(ticks(t)),
                "cutting changed membership at {t}"
            );
        }
    }

    #[test]
    fn test_cut_always_begun_period() {
        let base = PeriodTimeline::from_period(&Period::ending_at(ticks(10)));
        let sliced = base.cut(&cuts(&[0]));
        assert_eq!(
            sliced.sample_at(ticks(-5)).period,
            Period::ending_at(ticks(0))
        );
        assert_eq!(
            sliced.sample_at(ticks(5)).period,
            Period::bounded(ticks(0), ticks(10))
        );
    }

    #[test]
    fn test_cut_with_periodic_instants() {
        let base = periods(&[(0, 30)]);
        let sliced = base.cut(&TimelineHandle::periodic(
            ticks(0),
            tidemark_core::time::TickSpan::ticks(10),
        ));
        // The cut at 0 coincides with the start; 10 and 20 split.
        assert_eq!(boundaries(&sliced), (vec![0, 10, 20], vec![10, 20, 30]));
    }
}
