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
use std::ops::BitAnd;
use tidemark_core::time::Instant;

/// Keeps the instants present in both the source and an anchor timeline.
///
/// Neighbor queries advance both operands simultaneously: each side jumps
/// to the other side's candidate until the candidates coincide or one side
/// runs out. The loop length is bounded by how interleaved the operands
/// are, not by the combinator.
pub struct IntersectionTimeline {
    source: TimelineHandle,
    anchor: TimelineHandle,
}

impl IntersectionTimeline {
    /// Creates the set intersection of `source` and `anchor`.
    #[inline]
    pub fn new(source: TimelineHandle, anchor: TimelineHandle) -> Self {
        Self { source, anchor }
    }
}

impl Timeline for IntersectionTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "IntersectionTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        let mut a = self.source.previous(at)?;
        let mut b = self.anchor.previous(at)?;
        loop {
            match a.cmp(&b) {
                std::cmp::Ordering::Equal => return Some(a),
                // Jump the later candidate down to the earlier one.
                std::cmp::Ordering::Greater => a = self.source.previous_or_at(b)?,
                std::cmp::Ordering::Less => b = self.anchor.previous_or_at(a)?,
            }
        }
    }

    fn next(&self, at: Instant) -> Option<Instant> {
        let mut a = self.source.next(at)?;
        let mut b = self.anchor.next(at)?;
        loop {
            match a.cmp(&b) {
                std::cmp::Ordering::Equal => return Some(a),
                // Jump the earlier candidate up to the later one.
                std::cmp::Ordering::Less => a = self.source.next_or_at(b)?,
                std::cmp::Ordering::Greater => b = self.anchor.next_or_at(a)?,
            }
        }
    }

    fn is_instant(&self, at: Instant) -> bool {
        self.source.is_instant(at) && self.anchor.is_instant(at)
    }
}

impl TimelineHandle {
    /// Keeps the instants of `self` that are also instants of `anchor`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_algebra::{Timeline, TimelineHandle};
    /// # use tidemark_core::time::{Instant, TickSpan};
    /// let twos = TimelineHandle::periodic(Instant::from_ticks(0), TickSpan::ticks(2));
    /// let threes = TimelineHandle::periodic(Instant::from_ticks(0), TickSpan::ticks(3));
    /// let sixes = twos.intersection(&threes);
    /// assert_eq!(sixes.next(Instant::from_ticks(0)), Some(Instant::from_ticks(6)));
    /// assert_eq!(sixes.previous(Instant::from_ticks(0)), Some(Instant::from_ticks(-6)));
    /// ```
    #[inline]
    pub fn intersection(&self, anchor: &TimelineHandle) -> TimelineHandle {
        TimelineHandle::new(IntersectionTimeline::new(self.clone(), anchor.clone()))
    }
}

impl BitAnd for TimelineHandle {
    type Output = TimelineHandle;

    /// Sugar for [`TimelineHandle::intersection`].
    #[inline]
    fn bitand(self, rhs: TimelineHandle) -> TimelineHandle {
        self.intersection(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(values: &[i64]) -> TimelineHandle {
        TimelineHandle::from_instants(values.iter().map(|&t| Instant::from_ticks(t)))
    }

    #[test]
    fn test_intersection_of_fixed_sets() {
        let shared = handle(&[1, 3, 5, 7]).intersection(&handle(&[2, 3, 6, 7]));
        assert_eq!(shared.next(Instant::from_ticks(0)), Some(Instant::from_ticks(3)));
        assert_eq!(shared.next(Instant::from_ticks(3)), Some(Instant::from_ticks(7)));
        assert_eq!(shared.previous(Instant::from_ticks(7)), Some(Instant::from_ticks(3)));
        assert!(shared.is_instant(Instant::from_ticks(3)));
        assert!(!shared.is_instant(Instant::from_ticks(5)));
    }

    #[test]
    fn test_disjoint_operands_are_empty() {
        let nothing = handle(&[1, 3]).intersection(&handle(&[2, 4]));
        assert_eq!(nothing.next(Instant::MIN), None);
        assert_eq!(nothing.previous(Instant::MAX), None);
    }

    #[test]
    fn test_one_side_exhausting_stops_the_search() {
        // The anchor has nothing above 2, so searching past it must stop.
        let shared = handle(&[1, 5, 9]).intersection(&handle(&[1, 2]));
        assert_eq!(shared.next(Instant::from_ticks(1)), None);
        assert_eq!(shared.previous(Instant::from_ticks(9)), Some(Instant::from_ticks(1)));
    }

    #[test]
    fn test_operator_sugar() {
        let shared = handle(&[4, 6]) & handle(&[6, 8]);
        assert!(shared.is_instant(Instant::from_ticks(6)));
        assert!(!shared.is_instant(Instant::from_ticks(4)));
    }
}
