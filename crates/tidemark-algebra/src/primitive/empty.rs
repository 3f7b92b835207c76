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

/// The timeline with no instants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmptyTimeline;

impl Timeline for EmptyTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "EmptyTimeline"
    }

    #[inline]
    fn previous(&self, _at: Instant) -> Option<Instant> {
        None
    }

    #[inline]
    fn next(&self, _at: Instant) -> Option<Instant> {
        None
    }

    #[inline]
    fn is_instant(&self, _at: Instant) -> bool {
        false
    }
}

impl TimelineHandle {
    /// The timeline with no instants.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_algebra::{Timeline, TimelineHandle};
    /// # use tidemark_core::time::Instant;
    /// let empty = TimelineHandle::empty();
    /// assert_eq!(empty.next(Instant::MIN), None);
    /// assert_eq!(empty.previous(Instant::MAX), None);
    /// assert!(!empty.is_instant(Instant::from_ticks(0)));
    /// ```
    #[inline]
    pub fn empty() -> TimelineHandle {
        TimelineHandle::new(EmptyTimeline)
    }
}
