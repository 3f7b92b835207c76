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
use std::ops::BitOr;
use tidemark_core::time::{Instant, earliest, latest};

/// The set union of any number of child timelines.
///
/// `next` is the earliest child `next`, `previous` the latest child
/// `previous`, membership any child's membership. Instants present in
/// several children count once, like any set union.
#[derive(Clone)]
pub struct CompositeTimeline {
    children: Vec<TimelineHandle>,
}

impl CompositeTimeline {
    /// Creates a union over the given children.
    #[inline]
    pub fn new(children: Vec<TimelineHandle>) -> Self {
        Self { children }
    }

    /// Returns the child timelines.
    #[inline]
    pub fn children(&self) -> &[TimelineHandle] {
        &self.children
    }
}

impl Timeline for CompositeTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "CompositeTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        self.children
            .iter()
            .fold(None, |best, child| latest(best, child.previous(at)))
    }

    fn next(&self, at: Instant) -> Option<Instant> {
        self.children
            .iter()
            .fold(None, |best, child| earliest(best, child.next(at)))
    }

    fn is_instant(&self, at: Instant) -> bool {
        self.children.iter().any(|child| child.is_instant(at))
    }
}

impl TimelineHandle {
    /// The set union of `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_algebra::{Timeline, TimelineHandle};
    /// # use tidemark_core::time::Instant;
    /// let a = TimelineHandle::from_instants([Instant::from_ticks(1), Instant::from_ticks(5)]);
    /// let b = TimelineHandle::from_instants([Instant::from_ticks(3), Instant::from_ticks(5)]);
    /// let both = a.union(&b);
    /// assert_eq!(both.next(Instant::from_ticks(1)), Some(Instant::from_ticks(3)));
    /// assert_eq!(both.next(Instant::from_ticks(3)), Some(Instant::from_ticks(5)));
    /// ```
    #[inline]
    pub fn union(&self, other: &TimelineHandle) -> TimelineHandle {
        TimelineHandle::new(CompositeTimeline::new(vec![self.clone(), other.clone()]))
    }

    /// The set union of any number of timelines.
    #[inline]
    pub fn union_of<I>(children: I) -> TimelineHandle
    where
        I: IntoIterator<Item = TimelineHandle>,
    {
        TimelineHandle::new(CompositeTimeline::new(children.into_iter().collect()))
    }
}

impl BitOr for TimelineHandle {
    type Output = TimelineHandle;

    /// Sugar for [`TimelineHandle::union`].
    #[inline]
    fn bitor(self, rhs: TimelineHandle) -> TimelineHandle {
        self.union(&rhs)
    }
}
