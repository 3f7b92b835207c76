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
use tidemark_core::time::Instant;
use tidemark_model::Period;

/// Which instants of each mask period a [`MaskCountTimeline`] keeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaskCountMode {
    /// Drop the first `count` source instants of each mask period.
    SkipFirst,
    /// Keep only the first `count` source instants of each mask period.
    TakeFirst,
    /// Drop the last `count` source instants of each mask period.
    SkipLast,
    /// Keep only the last `count` source instants of each mask period.
    TakeLast,
}

/// Counts source instants per mask period and keeps or drops them by
/// their position within it.
///
/// Each mask period counts independently; a period holding fewer than
/// `count` instants keeps all of them under the take modes and drops all
/// of them under the skip modes. Source instants outside every mask
/// period are dropped, so the combinator is a mask-scoped view of its
/// source. Rank checks walk at most `count` source neighbors; neighbor
/// queries over a stretch outside the mask jump straight to the next
/// mask boundary.
pub struct MaskCountTimeline {
    source: TimelineHandle,
    mask: PeriodTimeline,
    mode: MaskCountMode,
    count: usize,
}

impl MaskCountTimeline {
    /// Creates a counting view of `source` scoped to `mask`.
    #[inline]
    pub fn new(
        source: TimelineHandle,
        mask: PeriodTimeline,
        mode: MaskCountMode,
        count: usize,
    ) -> Self {
        Self {
            source,
            mask,
            mode,
            count,
        }
    }

    /// Source instants of `period` strictly before `at`, counted up to `cap`.
    fn rank_before(&self, at: Instant, period: &Period, cap: usize) -> usize {
        let mut counted = 0;
        let mut cursor = at;
        while counted < cap {
            match self.source.previous(cursor) {
                Some(previous) if period.contains_instant(previous) => {
                    counted += 1;
                    cursor = previous;
                }
                _ => break,
            }
        }
        counted
    }

    /// Source instants of `period` strictly after `at`, counted up to `cap`.
    fn rank_after(&self, at: Instant, period: &Period, cap: usize) -> usize {
        let mut counted = 0;
        let mut cursor = at;
        while counted < cap {
            match self.source.next(cursor) {
                Some(next) if period.contains_instant(next) => {
                    counted += 1;
                    cursor = next;
                }
                _ => break,
            }
        }
        counted
    }

    /// Whether the source instant `at` survives within its mask period.
    fn qualifies(&self, at: Instant) -> bool {
        let sample = self.mask.sample_at(at);
        if !sample.is_inside {
            return false;
        }
        let period = sample.period;
        match self.mode {
            MaskCountMode::SkipFirst => self.rank_before(at, &period, self.count) >= self.count,
            MaskCountMode::TakeFirst => self.rank_before(at, &period, self.count) < self.count,
            MaskCountMode::SkipLast => self.rank_after(at, &period, self.count) >= self.count,
            MaskCountMode::TakeLast => self.rank_after(at, &period, self.count) < self.count,
        }
    }
}

impl Timeline for MaskCountTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "MaskCountTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = self.source.previous(cursor)?;
            if self.mask.contains(candidate) {
                if self.qualifies(candidate) {
                    return Some(candidate);
                }
                cursor = candidate;
            } else {
                // In a gap: everything down to the mask period below is
                // dropped, so resume just past its end.
                let gap = self.mask.sample_at(candidate);
                cursor = gap.period.start()?;
            }
        }
    }

    fn next(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = self.source.next(cursor)?;
            if self.mask.contains(candidate) {
                if self.qualifies(candidate) {
                    return Some(candidate);
                }
                cursor = candidate;
            } else {
                // In a gap: resume just below the next mask period, so
                // an instant on its first tick is still found.
                let gap = self.mask.sample_at(candidate);
                cursor = gap.period.end()?.previous_tick()?;
            }
        }
    }

    fn is_instant(&self, at: Instant) -> bool {
        self.source.is_instant(at) && self.qualifies(at)
    }
}

impl TimelineHandle {
    /// Drops the first `count` instants of `self` in each mask period.
    ///
    /// Instants outside every mask period are dropped as well; see
    /// [`MaskCountTimeline`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_algebra::{PeriodTimeline, Timeline, TimelineHandle};
    /// # use tidemark_core::time::Instant;
    /// # use tidemark_model::Period;
    /// let source = TimelineHandle::from_instants((0..5).map(Instant::from_ticks));
    /// let mask = PeriodTimeline::from_period(&Period::bounded(
    ///     Instant::from_ticks(0),
    ///     Instant::from_ticks(10),
    /// ));
    /// let late = source.skip_within(&mask, 2);
    /// assert_eq!(late.next(Instant::MIN), Some(Instant::from_ticks(2)));
    /// ```
    #[inline]
    pub fn skip_within(&self, mask: &PeriodTimeline, count: usize) -> TimelineHandle {
        TimelineHandle::new(MaskCountTimeline::new(
            self.clone(),
            mask.clone(),
            MaskCountMode::SkipFirst,
            count,
        ))
    }

    /// Keeps only the first `count` instants of `self` in each mask period.
    #[inline]
    pub fn take_within(&self, mask: &PeriodTimeline, count: usize) -> TimelineHandle {
        TimelineHandle::new(MaskCountTimeline::new(
            self.clone(),
            mask.clone(),
            MaskCountMode::TakeFirst,
            count,
        ))
    }

    /// Drops the last `count` instants of `self` in each mask period.
    #[inline]
    pub fn skip_last_within(&self, mask: &PeriodTimeline, count: usize) -> TimelineHandle {
        TimelineHandle::new(MaskCountTimeline::new(
            self.clone(),
            mask.clone(),
            MaskCountMode::SkipLast,
            count,
        ))
    }

    /// Keeps only the last `count` instants of `self` in each mask period.
    #[inline]
    pub fn take_last_within(&self, mask: &PeriodTimeline, count: usize) -> TimelineHandle {
        TimelineHandle::new(MaskCountTimeline::new(
            self.clone(),
            mask.clone(),
            MaskCountMode::TakeLast,
            count,
        ))
    }
}
