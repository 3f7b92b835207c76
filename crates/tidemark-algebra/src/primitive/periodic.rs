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

use crate::timeline::{Timeline, TimelineHandle};
use tidemark_core::num::floor::{floor_div, floor_mod};
use tidemark_core::time::{Instant, TickSpan};

/// Every instant congruent to an origin modulo a strictly positive period.
///
/// The grid extends across the whole axis in both directions; only
/// multiples that leave the representable range are absent. Phase
/// arithmetic uses floored division so that instants before the origin
/// resolve correctly (truncating division would shift their phase).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeriodicTimeline {
    origin: Instant,
    period: TickSpan,
}

impl PeriodicTimeline {
    /// Creates a periodic timeline.
    ///
    /// # Panics
    ///
    /// Panics if `period` is not strictly positive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_algebra::primitive::periodic::PeriodicTimeline;
    /// # use tidemark_algebra::Timeline;
    /// # use tidemark_core::time::{Instant, TickSpan};
    /// let grid = PeriodicTimeline::new(Instant::from_ticks(0), TickSpan::ticks(3));
    /// assert!(grid.is_instant(Instant::from_ticks(6)));
    /// assert_eq!(grid.next(Instant::from_ticks(4)), Some(Instant::from_ticks(6)));
    /// assert_eq!(grid.previous(Instant::from_ticks(4)), Some(Instant::from_ticks(3)));
    /// ```
    #[inline]
    pub fn new(origin: Instant, period: TickSpan) -> Self {
        assert!(
            period.is_positive(),
            "called `PeriodicTimeline::new` with a non-positive period: {}",
            period
        );
        Self { origin, period }
    }

    /// Creates a periodic timeline if `period` is strictly positive.
    #[inline]
    pub fn try_new(origin: Instant, period: TickSpan) -> Option<Self> {
        if period.is_positive() {
            Some(Self { origin, period })
        } else {
            None
        }
    }

    /// Returns the origin instant.
    #[inline]
    pub const fn origin(&self) -> Instant {
        self.origin
    }

    /// Returns the period length.
    #[inline]
    pub const fn period(&self) -> TickSpan {
        self.period
    }

    /// Grid index of the last grid point at or before `at`, in i128 to
    /// stay exact across the whole axis.
    #[inline]
    fn index_at_or_before(&self, at: Instant) -> i128 {
        let diff = at.ticks() as i128 - self.origin.ticks() as i128;
        floor_div(diff, self.period.get() as i128)
    }

    /// The instant at grid index `index`, `None` when it leaves the axis.
    #[inline]
    fn at_index(&self, index: i128) -> Option<Instant> {
        let ticks = self.origin.ticks() as i128 + index * self.period.get() as i128;
        if ticks < i64::MIN as i128 || ticks > i64::MAX as i128 {
            None
        } else {
            Some(Instant::from_ticks(ticks as i64))
        }
    }
}

impl Timeline for PeriodicTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "PeriodicTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        let diff = at.ticks() as i128 - self.origin.ticks() as i128;
        let phase = floor_mod(diff, self.period.get() as i128);
        let index = self.index_at_or_before(at);
        if phase == 0 {
            self.at_index(index - 1)
        } else {
            self.at_index(index)
        }
    }

    fn next(&self, at: Instant) -> Option<Instant> {
        self.at_index(self.index_at_or_before(at) + 1)
    }

    fn is_instant(&self, at: Instant) -> bool {
        let diff = at.ticks() as i128 - self.origin.ticks() as i128;
        floor_mod(diff, self.period.get() as i128) == 0
    }
}

impl TimelineHandle {
    /// Every instant congruent to `origin` modulo `period`.
    ///
    /// # Panics
    ///
    /// Panics if `period` is not strictly positive.
    #[inline]
    pub fn periodic(origin: Instant, period: TickSpan) -> TimelineHandle {
        TimelineHandle::new(PeriodicTimeline::new(origin, period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(origin: i64, period: i64) -> PeriodicTimeline {
        PeriodicTimeline::new(Instant::from_ticks(origin), TickSpan::ticks(period))
    }

    #[test]
    fn test_origin_neighbors() {
        let g = grid(0, 3);
        assert_eq!(g.next(Instant::from_ticks(0)), Some(Instant::from_ticks(3)));
        assert_eq!(g.previous(Instant::from_ticks(0)), Some(Instant::from_ticks(-3)));
    }

    #[test]
    fn test_membership_before_origin() {
        let g = grid(0, 3);
        assert!(g.is_instant(Instant::from_ticks(-3)));
        assert!(g.is_instant(Instant::from_ticks(-6)));
        assert!(!g.is_instant(Instant::from_ticks(-1)));
        assert!(!g.is_instant(Instant::from_ticks(-2)));
    }

    #[test]
    fn test_neighbors_off_grid() {
        let g = grid(0, 3);
        assert_eq!(g.next(Instant::from_ticks(4)), Some(Instant::from_ticks(6)));
        assert_eq!(g.previous(Instant::from_ticks(4)), Some(Instant::from_ticks(3)));
        assert_eq!(g.next(Instant::from_ticks(-4)), Some(Instant::from_ticks(-3)));
        assert_eq!(g.previous(Instant::from_ticks(-4)), Some(Instant::from_ticks(-6)));
    }

    #[test]
    fn test_nonzero_origin_phase() {
        let g = grid(5, 10);
        assert!(g.is_instant(Instant::from_ticks(-5)));
        assert!(g.is_instant(Instant::from_ticks(15)));
        assert_eq!(g.next(Instant::from_ticks(6)), Some(Instant::from_ticks(15)));
        assert_eq!(g.previous(Instant::from_ticks(5)), Some(Instant::from_ticks(-5)));
    }

    #[test]
    fn test_duality_around_grid_points() {
        let g = grid(1, 4);
        for t in -10..=10 {
            let t = Instant::from_ticks(t);
            let by_next = t
                .previous_tick()
                .map(|below| g.next(below) == Some(t))
                .unwrap_or(false);
            assert_eq!(g.is_instant(t), by_next, "duality failed at {t:?}");
        }
    }

    #[test]
    fn test_axis_edges_terminate_grid() {
        let g = grid(0, 3);
        assert_eq!(g.next(Instant::MAX), None);
        assert!(g.previous(Instant::MAX).is_some());
        assert!(g.next(Instant::MIN).is_some());
        // The last multiple at or below MAX exists and is within 3 ticks.
        let last = g.previous(Instant::MAX).unwrap();
        assert!(Instant::MAX.ticks() - last.ticks() < 3);
    }

    #[test]
    #[should_panic(expected = "non-positive period")]
    fn test_zero_period_panics() {
        let _ = grid(0, 0);
    }
}
