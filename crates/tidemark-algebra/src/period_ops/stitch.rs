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
use std::sync::{Arc, OnceLock};
use tidemark_core::time::Instant;

/// Shared state of one stitch: the source and the one-time full-coverage
/// determination.
struct StitchCore {
    source: PeriodTimeline,
    covers_axis: OnceLock<bool>,
}

impl StitchCore {
    /// A start survives unless an end coincides with it — a coincident
    /// pair is an internal boundary of two touching periods, which is
    /// exactly what stitching removes.
    fn start_survives(&self, at: Instant) -> bool {
        self.source.starts().is_instant(at) && !self.source.ends().is_instant(at)
    }

    fn end_survives(&self, at: Instant) -> bool {
        self.source.ends().is_instant(at) && !self.source.starts().is_instant(at)
    }

    fn next_start(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = self.source.starts().next(cursor)?;
            if self.start_survives(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn previous_start(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = self.source.starts().previous(cursor)?;
            if self.start_survives(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn next_end(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = self.source.ends().next(cursor)?;
            if self.end_survives(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn previous_end(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = self.source.ends().previous(cursor)?;
            if self.end_survives(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    /// An unbroken chain of touching periods covering the whole axis
    /// loses every boundary to stitching; like
    /// [`merge`](PeriodTimeline::merge), the case is detected once and
    /// encoded as a sentinel start at `MIN`. The scan terminates whenever
    /// the source's own queries do.
    fn covers_axis(&self) -> bool {
        *self.covers_axis.get_or_init(|| {
            self.source.contains(Instant::MIN)
                && !self.start_survives(Instant::MIN)
                && self.next_start(Instant::MIN).is_none()
                && !self.end_survives(Instant::MIN)
                && self.next_end(Instant::MIN).is_none()
        })
    }
}

/// The starts of a stitched period timeline.
pub struct StitchedStartTimeline {
    core: Arc<StitchCore>,
}

impl Timeline for StitchedStartTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "StitchedStartTimeline"
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

/// The ends of a stitched period timeline.
pub struct StitchedEndTimeline {
    core: Arc<StitchCore>,
}

impl Timeline for StitchedEndTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "StitchedEndTimeline"
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
    /// Coalesces adjacent periods whose end coincides with the next start.
    ///
    /// Membership is unchanged at every instant except the dropped
    /// boundaries themselves, which were already inside (an end applies
    /// before a coincident start). Stitching only removes boundaries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_algebra::PeriodTimeline;
    /// # use tidemark_core::time::Instant;
    /// # use tidemark_model::Period;
    /// let shifts = PeriodTimeline::from_periods([
    ///     Period::bounded(Instant::from_ticks(0), Instant::from_ticks(8)),
    ///     Period::bounded(Instant::from_ticks(8), Instant::from_ticks(16)),
    /// ]);
    /// let day = shifts.stitch();
    /// assert_eq!(
    ///     day.sample_at(Instant::from_ticks(4)).period,
    ///     Period::bounded(Instant::from_ticks(0), Instant::from_ticks(16))
    /// );
    /// ```
    pub fn stitch(&self) -> PeriodTimeline {
        let core = Arc::new(StitchCore {
            source: self.clone(),
            covers_axis: OnceLock::new(),
        });
        PeriodTimeline::from_boundaries(
            TimelineHandle::new(StitchedStartTimeline { core: core.clone() }),
            TimelineHandle::new(StitchedEndTimeline { core }),
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
    fn test_touching_chain_coalesces() {
        let stitched = periods(&[(0, 5), (5, 9), (9, 12)]).stitch();
        assert_eq!(boundaries(&stitched), (vec![0], vec![12]));
        assert_eq!(
            stitched.sample_at(ticks(7)).period,
            Period::bounded(ticks(0), ticks(12))
        );
    }

    #[test]
    fn test_separated_periods_unchanged() {
        let base = periods(&[(0, 5), (7, 9)]);
        let stitched = base.clone().stitch();
        assert_eq!(boundaries(&stitched), boundaries(&base));
        for t in -2..12 {
            assert_eq!(stitched.contains(ticks(t)), base.contains(ticks(t)));
        }
    }

    #[test]
    fn test_mixed_chain_keeps_real_gaps() {
        let stitched = periods(&[(0, 5), (5, 9), (20, 25), (25, 30)]).stitch();
        assert_eq!(boundaries(&stitched), (vec![0, 20], vec![9, 30]));
        assert!(!stitched.contains(ticks(15)));
    }

    #[test]
    fn test_membership_is_preserved() {
        let base = periods(&[(0, 5), (5, 9), (12, 20)]);
        let stitched = base.clone().stitch();
        for t in -3..23 {
            assert_eq!(
                stitched.contains(ticks(t)),
                base.contains(ticks(t)),
                "stitching changed membership at {t}"
            );
        }
    }

    #[test]
    fn test_full_chain_collapses_to_min_sentinel() {
        // A raw coincident pair at 0 normalizes to (-inf, 0) and [0, +inf):
        // an unbroken chain covering the whole axis.
        let chain = PeriodTimeline::between(
            TimelineHandle::once(ticks(0)),
            TimelineHandle::once(ticks(0)),
        );
        let stitched = chain.stitch();
        assert!(stitched.starts().is_instant(Instant::MIN));
        assert_eq!(stitched.starts().next(Instant::MIN), None);
        assert_eq!(stitched.ends().next(Instant::MIN), None);
        assert!(stitched.contains(Instant::MIN));
        assert!(stitched.contains(ticks(0)));
        assert!(stitched.contains(Instant::MAX));
        assert_eq!(
            stitched.sample_at(ticks(42)).period,
            Period::starting_at(Instant::MIN)
        );
    }

    #[test]
    fn test_sentinel_source_passes_through() {
        let stitched = PeriodTimeline::full().stitch();
        assert!(stitched.starts().is_instant(Instant::MIN));
        assert!(stitched.contains(Instant::MAX));
    }
}
