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
use std::ops::Not;
use std::sync::Arc;
use tidemark_core::time::Instant;

/// Shared operand of one inversion.
struct InvertCore {
    source: PeriodTimeline,
}

impl InvertCore {
    /// A source end becomes a gap start, unless a source start coincides
    /// with it — touching source periods leave no gap between them.
    fn start_survives(&self, at: Instant) -> bool {
        self.source.ends().is_instant(at) && !self.source.starts().is_instant(at)
    }

    /// A source start becomes a gap end, unless a source end coincides
    /// with it. A gap end at `MIN` would close a gap below the axis and is
    /// dropped.
    fn end_survives(&self, at: Instant) -> bool {
        at != Instant::MIN
            && self.source.starts().is_instant(at)
            && !self.source.ends().is_instant(at)
    }
}

/// The starts of an inverted period timeline.
pub struct InvertedStartTimeline {
    core: Arc<InvertCore>,
}

impl Timeline for InvertedStartTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "InvertedStartTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        // An empty source inverts to the whole axis, whose only queryable
        // boundary is the sentinel start at MIN.
        if self.core.source.is_empty() {
            return (at > Instant::MIN).then_some(Instant::MIN);
        }
        let mut cursor = at;
        loop {
            let candidate = self.core.source.ends().previous(cursor)?;
            if self.core.start_survives(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn next(&self, at: Instant) -> Option<Instant> {
        if self.core.source.is_empty() {
            return None;
        }
        let mut cursor = at;
        loop {
            let candidate = self.core.source.ends().next(cursor)?;
            if self.core.start_survives(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn is_instant(&self, at: Instant) -> bool {
        if self.core.source.is_empty() {
            return at == Instant::MIN;
        }
        self.core.start_survives(at)
    }
}

/// The ends of an inverted period timeline.
pub struct InvertedEndTimeline {
    core: Arc<InvertCore>,
}

impl Timeline for InvertedEndTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "InvertedEndTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        if self.core.source.is_empty() {
            return None;
        }
        let mut cursor = at;
        loop {
            let candidate = self.core.source.starts().previous(cursor)?;
            if self.core.end_survives(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn next(&self, at: Instant) -> Option<Instant> {
        if self.core.source.is_empty() {
            return None;
        }
        let mut cursor = at;
        loop {
            let candidate = self.core.source.starts().next(cursor)?;
            if self.core.end_survives(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn is_instant(&self, at: Instant) -> bool {
        if self.core.source.is_empty() {
            return false;
        }
        self.core.end_survives(at)
    }
}

impl PeriodTimeline {
    /// The complement: the gaps of `self` become periods and vice versa.
    ///
    /// An empty timeline inverts to the whole axis; a timeline covering
    /// the whole axis inverts to the empty one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_algebra::{PeriodTimeline, TimelineHandle};
    /// # use tidemark_core::time::Instant;
    /// # use tidemark_model::Period;
    /// let work = PeriodTimeline::between(
    ///     TimelineHandle::from_instants([Instant::from_ticks(10), Instant::from_ticks(20)]),
    ///     TimelineHandle::from_instants([Instant::from_ticks(15), Instant::from_ticks(25)]),
    /// );
    /// let off = work.invert();
    /// assert_eq!(
    ///     off.sample_at(Instant::from_ticks(0)).period,
    ///     Period::ending_at(Instant::from_ticks(10))
    /// );
    /// assert_eq!(
    ///     off.sample_at(Instant::from_ticks(17)).period,
    ///     Period::bounded(Instant::from_ticks(15), Instant::from_ticks(20))
    /// );
    /// assert_eq!(
    ///     off.sample_at(Instant::from_ticks(30)).period,
    ///     Period::starting_at(Instant::from_ticks(25))
    /// );
    /// ```
    pub fn invert(&self) -> PeriodTimeline {
        let core = Arc::new(InvertCore {
            source: self.clone(),
        });
        PeriodTimeline::from_boundaries(
            TimelineHandle::new(InvertedStartTimeline { core: core.clone() }),
            TimelineHandle::new(InvertedEndTimeline { core }),
        )
    }
}

impl Not for PeriodTimeline {
    type Output = PeriodTimeline;

    /// Sugar for [`PeriodTimeline::invert`].
    #[inline]
    fn not(self) -> PeriodTimeline {
        self.invert()
    }
}
