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

use crate::ops::randomize::{BoundaryClamp, RandomizedTimeline};
use crate::period_timeline::PeriodTimeline;
use crate::random::{RandomFunction, default_random};
use crate::timeline::TimelineHandle;
use std::sync::Arc;
use tidemark_core::time::TickSpan;

impl PeriodTimeline {
    /// Displaces every boundary by a deterministic jitter of up to
    /// `before` ticks backward and `after` ticks forward.
    ///
    /// The ends move first, clamped between their own start and the
    /// following original start; the starts then move, clamped between the
    /// already-randomized neighboring ends. Periods therefore never
    /// invert, overlap, or change count under any seed. A boundary shared
    /// by touching periods never crosses its partner: the end may move
    /// earlier and the start follows strictly after it, so touching
    /// periods can separate but never overlap.
    ///
    /// # Panics
    ///
    /// Panics if either deviation is negative.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_algebra::PeriodTimeline;
    /// # use tidemark_core::time::{Instant, TickSpan};
    /// # use tidemark_model::Period;
    /// let strict = PeriodTimeline::from_periods([
    ///     Period::bounded(Instant::from_ticks(100), Instant::from_ticks(200)),
    /// ]);
    /// let loose = strict.randomize(TickSpan::ticks(10), TickSpan::ticks(10), 7);
    /// let sampled = loose.sample_at(Instant::from_ticks(150)).period;
    /// let start = sampled.start().unwrap().ticks();
    /// let end = sampled.end().unwrap().ticks();
    /// assert!((90..=110).contains(&start));
    /// assert!((190..=210).contains(&end));
    /// assert!(start < end);
    /// ```
    #[inline]
    pub fn randomize(&self, before: TickSpan, after: TickSpan, seed: u64) -> PeriodTimeline {
        self.randomize_with(before, after, seed, Arc::new(default_random))
    }

    /// Like [`PeriodTimeline::randomize`] with a caller-supplied random
    /// function mapping a 64-bit key to a fraction in `[0, 1)`.
    pub fn randomize_with(
        &self,
        before: TickSpan,
        after: TickSpan,
        seed: u64,
        random: RandomFunction,
    ) -> PeriodTimeline {
        let ends = TimelineHandle::new(RandomizedTimeline::with_clamp(
            self.ends().clone(),
            before,
            after,
            seed,
            random.clone(),
            Some((self.starts().clone(), BoundaryClamp::Ends)),
        ));
        let starts = TimelineHandle::new(RandomizedTimeline::with_clamp(
            self.starts().clone(),
            before,
            after,
            seed,
            random,
            Some((ends.clone(), BoundaryClamp::Starts)),
        ));
        PeriodTimeline::from_boundaries(starts, ends)
    }
}
