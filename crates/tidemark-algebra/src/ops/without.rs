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
use std::ops::Sub;
use tidemark_core::time::Instant;

/// Keeps the source instants that are absent from an exclusion timeline.
pub struct WithoutTimeline {
    source: TimelineHandle,
    excluded: TimelineHandle,
}

impl WithoutTimeline {
    /// Creates the set difference `source \ excluded`.
    #[inline]
    pub fn new(source: TimelineHandle, excluded: TimelineHandle) -> Self {
        Self { source, excluded }
    }
}

impl Timeline for WithoutTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "WithoutTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = self.source.previous(cursor)?;
            if !self.excluded.is_instant(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn next(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = self.source.next(cursor)?;
            if !self.excluded.is_instant(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn is_instant(&self, at: Instant) -> bool {
        self.source.is_instant(at) && !self.excluded.is_instant(at)
    }
}

impl TimelineHandle {
    /// Keeps the instants of `self` that are not instants of `excluded`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_algebra::{Timeline, TimelineHandle};
    /// # use tidemark_core::time::{Instant, TickSpan};
    /// let all = TimelineHandle::periodic(Instant::from_ticks(0), TickSpan::ticks(1));
    /// let thirds = TimelineHandle::periodic(Instant::from_ticks(0), TickSpan::ticks(3));
    /// let gaps = all.without(&thirds);
    /// assert_eq!(gaps.next(Instant::from_ticks(1)), Some(Instant::from_ticks(2)));
    /// assert_eq!(gaps.next(Instant::from_ticks(2)), Some(Instant::from_ticks(4)));
    /// ```
    #[inline]
    pub fn without(&self, excluded: &TimelineHandle) -> TimelineHandle {
        TimelineHandle::new(WithoutTimeline::new(self.clone(), excluded.clone()))
    }
}

impl Sub for TimelineHandle {
    type Output = TimelineHandle;

    /// Sugar for [`TimelineHandle::without`].
    #[inline]
    fn sub(self, rhs: TimelineHandle) -> TimelineHandle {
        self.without(&rhs)
    }
}
