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
use rustc_hash::FxHashMap;
use std::sync::Mutex;
use tidemark_core::time::Instant;

/// Resolved queries for one query point.
#[derive(Clone, Copy, Debug, Default)]
struct CacheEntry {
    previous: Option<Option<Instant>>,
    next: Option<Option<Instant>>,
    membership: Option<bool>,
}

/// Memoizes resolved queries of an expensive timeline per query point.
///
/// Timelines are immutable, so cached answers stay valid forever and no
/// invalidation exists. The cache grows with the number of distinct query
/// points; wrap only timelines whose queries are genuinely expensive
/// (deep compositions, costly predicates).
pub struct CachedTimeline {
    source: TimelineHandle,
    cache: Mutex<FxHashMap<Instant, CacheEntry>>,
}

impl CachedTimeline {
    /// Creates a memoizing wrapper around `source`.
    #[inline]
    pub fn new(source: TimelineHandle) -> Self {
        Self {
            source,
            cache: Mutex::new(FxHashMap::default()),
        }
    }
}

impl Timeline for CachedTimeline {
    #[inline]
    fn name(&self) -> &'static str {
        "CachedTimeline"
    }

    fn previous(&self, at: Instant) -> Option<Instant> {
        {
            let cache = self.cache.lock().expect("timeline cache poisoned");
            if let Some(entry) = cache.get(&at)
                && let Some(resolved) = entry.previous
            {
                return resolved;
            }
        }
        let resolved = self.source.previous(at);
        let mut cache = self.cache.lock().expect("timeline cache poisoned");
        cache.entry(at).or_default().previous = Some(resolved);
        resolved
    }

    fn next(&self, at: Instant) -> Option<Instant> {
        {
            let cache = self.cache.lock().expect("timeline cache poisoned");
            if let Some(entry) = cache.get(&at)
                && let Some(resolved) = entry.next
            {
                return resolved;
            }
        }
        let resolved = self.source.next(at);
        let mut cache = self.cache.lock().expect("timeline cache poisoned");
        cache.entry(at).or_default().next = Some(resolved);
        resolved
    }

    fn is_instant(&self, at: Instant) -> bool {
        {
            let cache = self.cache.lock().expect("timeline cache poisoned");
            if let Some(entry) = cache.get(&at)
                && let Some(resolved) = entry.membership
            {
                return resolved;
            }
        }
        let resolved = self.source.is_instant(at);
        let mut cache = self.cache.lock().expect("timeline cache poisoned");
        cache.entry(at).or_default().membership = Some(resolved);
        resolved
    }
}

impl TimelineHandle {
    /// Memoizes resolved queries per query point.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_algebra::{Timeline, TimelineHandle};
    /// # use tidemark_core::time::Instant;
    /// let expensive = TimelineHandle::from_instants([Instant::from_ticks(2)])
    ///     .filter(|t| t.ticks() % 2 == 0)
    ///     .cached();
    /// assert_eq!(expensive.next(Instant::from_ticks(0)), Some(Instant::from_ticks(2)));
    /// // Served from the cache the second time.
    /// assert_eq!(expensive.next(Instant::from_ticks(0)), Some(Instant::from_ticks(2)));
    /// ```
    #[inline]
    pub fn cached(&self) -> TimelineHandle {
        TimelineHandle::new(CachedTimeline::new(self.clone()))
    }
}
