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

use crate::random::{RandomFunction, default_random, instant_key, uniform_between};
use crate::timeline::{Timeline, TimelineHandle};
use std::sync::Arc;
use tidemark_core::num::floor::floor_div;
use tidemark_core::time::{Instant, TickSpan};

/// Which side of a period boundary pair a clamped randomization serves.
///
/// Period randomization wires two of these together: the ends move first,
/// clamped by the original starts, then the starts move, clamped by the
/// already-randomized ends. With both clamps in place no period can invert
/// or overlap under any seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BoundaryClamp {
    /// The source instants are period starts; the clamp timeline holds the
    /// randomized ends.
    Starts,
    /// The source instants are period ends; the clamp timeline holds the
    /// original starts.
    Ends,
}

/// Displaces every source instant inside a deterministic jitter window.
///
/// The window `[i − before, i + after]` shrinks so it never crosses the
/// weighted split point toward either source neighbor, which keeps the
/// images in source order and the instant count unchanged. The final
/// position interpolates the window by a fraction drawn from
/// `random(hash(i) XOR seed)`, so every query of the same combinator (or
/// of a rebuilt one with the same seed) sees the same displacement.
///
/// Neighbor queries inspect the images of up to three neighboring source
/// instants, since an image may precede or follow its source.
pub struct RandomizedTimeline {
    source: TimelineHandle,
    before: TickSpan,
    after: TickSpan,
    seed: u64,
    random: RandomFunction,
    clamp: Option<(TimelineHandle, BoundaryClamp)>,
}

impl RandomizedTimeline {
    /// Creates a jittered view of `source`.
    ///
    /// # Panics
    ///
    /// Panics if either deviation is negative.
    #[inline]
    pub fn new(
        source: TimelineHandle,
        before: TickSpan,
        after: TickSpan,
        seed: u64,
        random: RandomFunction,
    ) -> Self {
        Self::with_clamp(source, before, after, seed, random, None)
    }

    pub(crate) fn with_clamp(
        source: TimelineHandle,
        before: TickSpan,
        after: TickSpan,
        seed: u64,
        random: RandomFunction,
        clamp: Option<(TimelineHandle, BoundaryClamp)>,
    ) -> Self {
        assert!(
            !before.is_negative() && !after.is_negative(),
            "called `RandomizedTimeline` with a negative deviation"
        );
        Self {
            source,
            before,
            after,
            seed,
            random,
            clamp,
        }
    }

    /// The weighted split point between two adjacent source instants.
    ///
    /// `left`'s forward reach gets `after/(before+after)` of the gap,
    /// `right`'s backward reach the rest; the split is capped one tick
    /// below `right` so the two windows never meet.
    fn forward_split(&self, left: Instant, right: Instant) -> Instant {
        let gap = right.ticks() as i128 - left.ticks() as i128;
        let total = self.before.get() as i128 + self.after.get() as i128;
        let reach = floor_div(gap * self.after.get() as i128, total);
        let split = left.ticks() as i128 + reach;
        let cap = right.ticks() as i128 - 1;
        Instant::from_ticks(split.min(cap) as i64)
    }

    /// The randomized position of source instant `i`.
    ///
    /// Falls back to `i` itself when clamping empties the window; the
    /// original position always satisfies every clamp.
    fn image(&self, i: Instant) -> Instant {
        if self.before.is_zero() && self.after.is_zero() {
            return i;
        }
        let mut lower = i.checked_sub(self.before).unwrap_or(Instant::MIN);
        let mut upper = i.checked_add(self.after).unwrap_or(Instant::MAX);

        if let Some(prev) = self.source.previous(i)
            && let Some(first_allowed) = self.forward_split(prev, i).next_tick()
        {
            lower = lower.max(first_allowed);
        }
        if let Some(next) = self.source.next(i) {
            upper = upper.min(self.forward_split(i, next));
        }

        if let Some((clamp, role)) = &self.clamp {
            match role {
                BoundaryClamp::Ends => {
                    // Stay strictly after the owning start.
                    if let Some(own_start) = clamp.previous(i)
                        && let Some(first_allowed) = own_start.next_tick()
                    {
                        lower = lower.max(first_allowed);
                    }
                    // Never cross the following start; a start coincident
                    // with this end (touching periods) pins the window at it.
                    if clamp.is_instant(i) {
                        upper = upper.min(i);
                    } else if let Some(next_start) = clamp.next(i)
                        && let Some(last_allowed) = next_start.previous_tick()
                    {
                        upper = upper.min(last_allowed);
                    }
                }
                BoundaryClamp::Starts => {
                    // Never cross the preceding end; an end coincident with
                    // this start pins the window at it.
                    if clamp.is_instant(i) {
                        lower = lower.max(i);
                    } else if let Some(previous_end) = clamp.previous(i)
                        && let Some(first_allowed) = previous_end.next_tick()
                    {
                        lower = lower.max(first_allowed);
                    }
                    // Stay strictly before the owning end.
                    if let Some(own_end) = clamp.next(i)
                        && let Some(last_allowed) = own_end.previous_tick()
                    {
                        upper = upper.min(last_allowed);
                    }
                }
            }
        }

        if lower > upper {
            return i;
        }
        let fraction = (self.random)(instant_key(i, self.seed));
        uniform_between(lower, upper, fraction)
    }
}

impl Timeline for RandomizedTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "RandomizedTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        // Images may trail their source, so start one source instant above.
        let mut current = match self.source.next(at) {
            Some(above) => above,
            None => self.source.previous_or_at(at)?,
        };
        let mut steps = 0u32;
        loop {
            let image = self.image(current);
            if image < at {
                return Some(image);
            }
            current = self.source.previous(current)?;
            steps += 1;
            debug_assert!(steps <= 4, "randomized neighbor scan exceeded its bound");
        }
    }

    fn next(&self, at: Instant) -> Option<Instant> {
        // Images may precede their source, so start one source instant below.
        let mut current = match self.source.previous(at) {
            Some(below) => below,
            None => self.source.next_or_at(at)?,
        };
        let mut steps = 0u32;
        loop {
            let image = self.image(current);
            if image > at {
                return Some(image);
            }
            current = self.source.next(current)?;
            steps += 1;
            debug_assert!(steps <= 4, "randomized neighbor scan exceeded its bound");
        }
    }

    fn is_instant(&self, at: Instant) -> bool {
        let at_itself = if self.source.is_instant(at) {
            Some(at)
        } else {
            None
        };
        [self.source.previous(at), at_itself, self.source.next(at)]
            .into_iter()
            .flatten()
            .any(|candidate| self.image(candidate) == at)
    }
}

impl TimelineHandle {
    /// Displaces every instant by a deterministic jitter of up to `before`
    /// ticks backward and `after` ticks forward.
    ///
    /// The displacement never reorders instants or changes their count; see
    /// [`RandomizedTimeline`].
    ///
    /// # Panics
    ///
    /// Panics if either deviation is negative.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_algebra::{Timeline, TimelineHandle};
    /// # use tidemark_core::time::{Instant, TickSpan};
    /// let base = TimelineHandle::from_instants([Instant::from_ticks(100)]);
    /// let jittered = base.randomize(TickSpan::ticks(5), TickSpan::ticks(5), 42);
    /// let moved = jittered.next(Instant::from_ticks(0)).unwrap();
    /// assert!((95..=105).contains(&moved.ticks()));
    /// ```
    #[inline]
    pub fn randomize(&self, before: TickSpan, after: TickSpan, seed: u64) -> TimelineHandle {
        self.randomize_with(before, after, seed, Arc::new(default_random))
    }

    /// Like [`TimelineHandle::randomize`] with a caller-supplied random
    /// function mapping a 64-bit key to a fraction in `[0, 1)`.
    #[inline]
    pub fn randomize_with(
        &self,
        before: TickSpan,
        after: TickSpan,
        seed: u64,
        random: RandomFunction,
    ) -> TimelineHandle {
        TimelineHandle::new(RandomizedTimeline::new(
            self.clone(),
            before,
            after,
            seed,
            random,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_forward(timeline: &TimelineHandle, from: Instant) -> Vec<i64> {
        let mut out = Vec::new();
        let mut cursor = from;
        while let Some(next) = timeline.next(cursor) {
            out.push(next.ticks());
            cursor = next;
        }
        out
    }

    fn base() -> TimelineHandle {
        TimelineHandle::from_instants((0..=10).map(|k| Instant::from_ticks(k * 10)))
    }

    #[test]
    fn test_zero_deviation_is_identity() {
        let jittered = base().randomize(TickSpan::ZERO, TickSpan::ZERO, 99);
        assert_eq!(
            collect_forward(&jittered, Instant::MIN),
            collect_forward(&base(), Instant::MIN)
        );
    }

    #[test]
    fn test_count_and_order_preserved() {
        let jittered = base().randomize(TickSpan::ticks(4), TickSpan::ticks(4), 7);
        let images = collect_forward(&jittered, Instant::MIN);
        assert_eq!(images.len(), 11);
        for pair in images.windows(2) {
            assert!(pair[0] < pair[1], "images must stay strictly increasing");
        }
        for (source, image) in (0..=10).map(|k| k * 10).zip(&images) {
            assert!((source - 4..=source + 4).contains(image));
        }
    }

    #[test]
    fn test_same_seed_reproduces_everything() {
        let a = base().randomize(TickSpan::ticks(4), TickSpan::ticks(4), 1234);
        let b = base().randomize(TickSpan::ticks(4), TickSpan::ticks(4), 1234);
        assert_eq!(
            collect_forward(&a, Instant::MIN),
            collect_forward(&b, Instant::MIN)
        );
        // Repeated queries of the same combinator instance agree too.
        assert_eq!(
            collect_forward(&a, Instant::MIN),
            collect_forward(&a, Instant::MIN)
        );
    }

    #[test]
    fn test_queries_are_mutually_consistent() {
        let jittered = base().randomize(TickSpan::ticks(4), TickSpan::ticks(4), 5);
        let images = collect_forward(&jittered, Instant::MIN);
        for &image in &images {
            let image = Instant::from_ticks(image);
            assert!(jittered.is_instant(image));
            assert_eq!(
                jittered.next(image.previous_tick().unwrap()),
                Some(image),
                "duality failed at {image:?}"
            );
            assert_eq!(jittered.previous(image.next_tick().unwrap()), Some(image));
        }
        // Walking backward visits the same instants in reverse.
        let mut backward = Vec::new();
        let mut cursor = Instant::MAX;
        while let Some(previous) = jittered.previous(cursor) {
            backward.push(previous.ticks());
            cursor = previous;
        }
        backward.reverse();
        assert_eq!(backward, images);
    }

    #[test]
    fn test_window_floor_with_injected_fraction() {
        // A zero fraction lands every image on its window floor, which is
        // predictable: max(i − before, split toward the previous + 1).
        let source = TimelineHandle::from_instants(
            [0, 10, 20].map(Instant::from_ticks),
        );
        let jittered = source.randomize_with(
            TickSpan::ticks(3),
            TickSpan::ticks(3),
            0,
            Arc::new(|_| 0.0),
        );
        // Splits sit mid-gap (weights are equal): 5 and 15.
        assert_eq!(collect_forward(&jittered, Instant::MIN), vec![-3, 7, 17]);
    }

    #[test]
    fn test_axis_edge_clamps_window() {
        let source = TimelineHandle::once(Instant::MAX);
        let jittered = source.randomize_with(
            TickSpan::ticks(5),
            TickSpan::ticks(5),
            0,
            Arc::new(|_| 0.999_999),
        );
        // The forward half of the window is cut off at the axis edge.
        let image = jittered.previous(Instant::MAX).unwrap_or(Instant::MAX);
        assert!(image.ticks() >= i64::MAX - 5);
    }

    #[test]
    #[should_panic(expected = "negative deviation")]
    fn test_negative_deviation_panics() {
        let _ = base().randomize(TickSpan::ticks(-1), TickSpan::ZERO, 0);
    }
}
