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
use tidemark_core::time::Instant;

/// An explicit, finite collection of instants.
///
/// Input may arrive unsorted and with duplicates; construction sorts and
/// collapses it once so that every query is a binary search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FixedTimeline {
    instants: Vec<Instant>, // sorted, deduplicated
}

impl FixedTimeline {
    /// Creates a fixed timeline from any collection of instants.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_algebra::primitive::fixed::FixedTimeline;
    /// # use tidemark_algebra::Timeline;
    /// # use tidemark_core::time::Instant;
    /// let timeline = FixedTimeline::new([
    ///     Instant::from_ticks(9),
    ///     Instant::from_ticks(3),
    ///     Instant::from_ticks(9), // duplicates collapse
    /// ]);
    /// assert_eq!(timeline.len(), 2);
    /// assert_eq!(timeline.next(Instant::from_ticks(3)), Some(Instant::from_ticks(9)));
    /// ```
    pub fn new<I>(instants: I) -> Self
    where
        I: IntoIterator<Item = Instant>,
    {
        let mut instants: Vec<Instant> = instants.into_iter().collect();
        instants.sort_unstable();
        instants.dedup();
        Self { instants }
    }

    /// Returns the number of distinct instants.
    #[inline]
    pub fn len(&self) -> usize {
        self.instants.len()
    }

    /// Returns `true` if the timeline holds no instant.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instants.is_empty()
    }

    /// Returns the sorted instants.
    #[inline]
    pub fn as_slice(&self) -> &[Instant] {
        &self.instants
    }
}

impl Timeline for FixedTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "FixedTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        let index = self.instants.partition_point(|&i| i < at);
        if index > 0 {
            Some(self.instants[index - 1])
        } else {
            None
        }
    }

    fn next(&self, at: Instant) -> Option<Instant> {
        let index = self.instants.partition_point(|&i| i <= at);
        self.instants.get(index).copied()
    }

    fn is_instant(&self, at: Instant) -> bool {
        self.instants.binary_search(&at).is_ok()
    }
}

impl TimelineHandle {
    /// A timeline holding exactly the given instants.
    #[inline]
    pub fn from_instants<I>(instants: I) -> TimelineHandle
    where
        I: IntoIterator<Item = Instant>,
    {
        TimelineHandle::new(FixedTimeline::new(instants))
    }

    /// A timeline holding a single instant.
    #[inline]
    pub fn once(instant: Instant) -> TimelineHandle {
        TimelineHandle::from_instants([instant])
    }
}
