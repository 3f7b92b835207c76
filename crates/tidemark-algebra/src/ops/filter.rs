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
use std::sync::Arc;
use tidemark_core::time::Instant;

/// A boolean predicate over instants, shared across combinator clones.
pub type InstantPredicate = Arc<dyn Fn(Instant) -> bool + Send + Sync>;

/// Keeps the source instants for which a caller-supplied predicate holds.
///
/// The predicate is re-evaluated on every query, never cached; with an
/// expensive predicate or a sparse match set, neighbor queries can scan
/// many source instants. Wrap the result in
/// [`TimelineHandle::cached`](crate::ops::cached) when that matters.
pub struct FilteredTimeline {
    source: TimelineHandle,
    predicate: InstantPredicate,
}

impl FilteredTimeline {
    /// Creates a filtering view of `source`.
    #[inline]
    pub fn new(source: TimelineHandle, predicate: InstantPredicate) -> Self {
        Self { source, predicate }
    }
}

impl Timeline for FilteredTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "FilteredTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = self.source.previous(cursor)?;
            if (self.predicate)(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn next(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = self.source.next(cursor)?;
            if (self.predicate)(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn is_instant(&self, at: Instant) -> bool {
        self.source.is_instant(at) && (self.predicate)(at)
    }
}

impl TimelineHandle {
    /// Keeps only the instants for which `predicate` holds.
    ///
    /// The predicate runs on every query; see [`FilteredTimeline`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_algebra::{Timeline, TimelineHandle};
    /// # use tidemark_core::time::{Instant, TickSpan};
    /// let grid = TimelineHandle::periodic(Instant::from_ticks(0), TickSpan::ticks(1));
    /// let even = grid.filter(|t| t.ticks() % 2 == 0);
    /// assert_eq!(even.next(Instant::from_ticks(0)), Some(Instant::from_ticks(2)));
    /// assert!(!even.is_instant(Instant::from_ticks(3)));
    /// ```
    #[inline]
    pub fn filter<F>(&self, predicate: F) -> TimelineHandle
    where
        F: Fn(Instant) -> bool + Send + Sync + 'static,
    {
        TimelineHandle::new(FilteredTimeline::new(self.clone(), Arc::new(predicate)))
    }
}
