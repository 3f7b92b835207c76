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

//! Normalization of raw boundary pairs.
//!
//! Validity is a local decision over the raw pair, equivalent to scanning
//! all boundary events in time order (ends before starts at ties) with an
//! open/closed state: a start is valid only when no earlier start is still
//! open, an end only when it is the first end after the last start before
//! it — or the very first event, which describes an always-begun period.

use crate::timeline::{Timeline, TimelineHandle};
use tidemark_core::time::Instant;

/// The valid starts of a raw start/end timeline pair.
pub struct NormalizedStartTimeline {
    starts: TimelineHandle,
    ends: TimelineHandle,
}

impl NormalizedStartTimeline {
    /// Creates the repaired start view of a raw pair.
    #[inline]
    pub fn new(starts: TimelineHandle, ends: TimelineHandle) -> Self {
        Self { starts, ends }
    }

    /// A raw start is valid when the nearest earlier start (if any) was
    /// closed by an end at or before this one.
    fn is_valid(&self, start: Instant) -> bool {
        match self.starts.previous(start) {
            None => true,
            Some(prior_start) => match self.ends.previous_or_at(start) {
                None => false,
                Some(end) => prior_start < end,
            },
        }
    }
}

impl Timeline for NormalizedStartTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "NormalizedStartTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = self.starts.previous(cursor)?;
            if self.is_valid(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn next(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = self.starts.next(cursor)?;
            if self.is_valid(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn is_instant(&self, at: Instant) -> bool {
        self.starts.is_instant(at) && self.is_valid(at)
    }
}

/// The valid ends of a raw start/end timeline pair.
pub struct NormalizedEndTimeline {
    starts: TimelineHandle,
    ends: TimelineHandle,
}

impl NormalizedEndTimeline {
    /// Creates the repaired end view of a raw pair.
    #[inline]
    pub fn new(starts: TimelineHandle, ends: TimelineHandle) -> Self {
        Self { starts, ends }
    }

    /// A raw end is valid when it is the first end after the last start
    /// strictly before it; with no start before it, it must be the first
    /// end overall (closing an always-begun period).
    fn is_valid(&self, end: Instant) -> bool {
        match self.starts.previous(end) {
            None => self.ends.previous(end).is_none(),
            Some(start) => match self.ends.previous(end) {
                None => true,
                Some(prior_end) => prior_end <= start,
            },
        }
    }
}

impl Timeline for NormalizedEndTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "NormalizedEndTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = self.ends.previous(cursor)?;
            if self.is_valid(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn next(&self, at: Instant) -> Option<Instant> {
        let mut cursor = at;
        loop {
            let candidate = self.ends.next(cursor)?;
            if self.is_valid(candidate) {
                return Some(candidate);
            }
            cursor = candidate;
        }
    }

    fn is_instant(&self, at: Instant) -> bool {
        self.ends.is_instant(at) && self.is_valid(at)
    }
}
