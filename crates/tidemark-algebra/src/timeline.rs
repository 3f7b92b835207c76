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

use std::sync::Arc;
use tidemark_core::time::Instant;

/// A lazily-queried, possibly infinite, possibly empty set of UTC instants.
///
/// A timeline is never enumerated eagerly; it is observed exclusively
/// through the three queries below, which must agree with each other:
/// `is_instant(t)` holds exactly when `next` from one tick below `t`
/// (where such a tick exists) lands on `t`, and symmetrically for
/// `previous`. All three are pure functions of the query point and the
/// timeline's fixed definition.
///
/// Implementations hold no observable mutable state; internal memoization
/// is permitted as long as it can never change a result.
pub trait Timeline: Send + Sync {
    /// A short name identifying the timeline kind, used for diagnostics.
    fn name(&self) -> &'static str;

    /// Returns the greatest instant strictly before `at`, or `None` if no
    /// instant of the timeline lies before it.
    fn previous(&self, at: Instant) -> Option<Instant>;

    /// Returns the least instant strictly after `at`, or `None` if no
    /// instant of the timeline lies after it.
    fn next(&self, at: Instant) -> Option<Instant>;

    /// Returns `true` if `at` is an instant of the timeline.
    fn is_instant(&self, at: Instant) -> bool;

    /// Returns `at` itself when it is an instant, the previous one otherwise.
    #[inline]
    fn previous_or_at(&self, at: Instant) -> Option<Instant> {
        if self.is_instant(at) { Some(at) } else { self.previous(at) }
    }

    /// Returns `at` itself when it is an instant, the next one otherwise.
    #[inline]
    fn next_or_at(&self, at: Instant) -> Option<Instant> {
        if self.is_instant(at) { Some(at) } else { self.next(at) }
    }
}

impl std::fmt::Debug for dyn Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timeline({})", self.name())
    }
}

impl std::fmt::Display for dyn Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timeline({})", self.name())
    }
}

/// A cheaply clonable shared handle to a timeline.
///
/// Combinators compose through handles: each combinator holds handles to
/// its operands (references, never copies), so a composition is a tree of
/// small immutable nodes reclaimed when the last handle drops.
///
/// The combinator constructors live in the `ops` modules as inherent
/// methods on this type; operator sugar (`|`, `&`, `-`, `+ span`) is a
/// thin layer over those named methods.
///
/// # Examples
///
/// ```rust
/// # use tidemark_algebra::TimelineHandle;
/// # use tidemark_core::time::{Instant, TickSpan};
/// # use tidemark_algebra::Timeline;
/// let every_minute = TimelineHandle::periodic(Instant::from_ticks(0), TickSpan::minutes(1));
/// let shifted = every_minute + TickSpan::seconds(20);
/// assert!(shifted.is_instant(Instant::from_ticks(0) + TickSpan::seconds(20)));
/// ```
#[derive(Clone)]
pub struct TimelineHandle {
    inner: Arc<dyn Timeline>,
}

impl TimelineHandle {
    /// Wraps a concrete timeline in a shared handle.
    #[inline]
    pub fn new<T>(timeline: T) -> Self
    where
        T: Timeline + 'static,
    {
        Self {
            inner: Arc::new(timeline),
        }
    }

    /// Returns the shared inner timeline.
    #[inline]
    pub fn as_dyn(&self) -> &dyn Timeline {
        self.inner.as_ref()
    }
}

impl Timeline for TimelineHandle {
    #[inline]
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    #[inline]
    fn previous(&self, at: Instant) -> Option<Instant> {
        self.inner.previous(at)
    }

    #[inline]
    fn next(&self, at: Instant) -> Option<Instant> {
        self.inner.next(at)
    }

    #[inline]
    fn is_instant(&self, at: Instant) -> bool {
        self.inner.is_instant(at)
    }
}

impl std::fmt::Debug for TimelineHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timeline({})", self.inner.name())
    }
}
