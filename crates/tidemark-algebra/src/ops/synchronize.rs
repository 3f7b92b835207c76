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
use std::sync::Mutex;
use tidemark_core::time::Instant;

/// Serializes all three queries of a wrapped timeline under a single lock.
///
/// Most combinators are pure and need no synchronization. This wrapper is
/// for the exceptions: a source backed by genuine external mutable state,
/// or a consumer that needs several queries to observe one consistent
/// view without another thread's query interleaving.
pub struct SynchronizedTimeline {
    source: TimelineHandle,
    lock: Mutex<()>,
}

impl SynchronizedTimeline {
    /// Creates a serializing wrapper around `source`.
    #[inline]
    pub fn new(source: TimelineHandle) -> Self {
        Self {
            source,
            lock: Mutex::new(()),
        }
    }
}

impl Timeline for SynchronizedTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "SynchronizedTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        let _guard = self.lock.lock().expect("timeline lock poisoned");
        self.source.previous(at)
    }

    fn next(&self, at: Instant) -> Option<Instant> {
        let _guard = self.lock.lock().expect("timeline lock poisoned");
        self.source.next(at)
    }

    fn is_instant(&self, at: Instant) -> bool {
        let _guard = self.lock.lock().expect("timeline lock poisoned");
        self.source.is_instant(at)
    }
}

impl TimelineHandle {
    /// Wraps the timeline so all queries are mutually exclusive.
    #[inline]
    pub fn synchronized(&self) -> TimelineHandle {
        TimelineHandle::new(SynchronizedTimeline::new(self.clone()))
    }
}
