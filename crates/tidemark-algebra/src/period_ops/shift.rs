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

//! Lazy shifting of whole period timelines.
//!
//! Shifting the covered set moves both boundary timelines by the same
//! span. Boundaries whose image leaves the axis simply vanish, which is
//! exactly the set semantics: a period pushed partly past `MAX` keeps its
//! start and loses its end (it now "never ends" within the axis), one
//! pushed entirely past it vanishes with both boundaries. The eager
//! single-period counterpart with its collapse error is
//! [`Period::offset`](tidemark_model::Period::offset).

use crate::period_timeline::PeriodTimeline;
use tidemark_core::time::TickSpan;

impl PeriodTimeline {
    /// Shifts every period by `offset`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_algebra::PeriodTimeline;
    /// # use tidemark_core::time::{Instant, TickSpan};
    /// # use tidemark_model::Period;
    /// let base = PeriodTimeline::from_period(&Period::bounded(
    ///     Instant::from_ticks(10),
    ///     Instant::from_ticks(20),
    /// ));
    /// let later = base.offset(TickSpan::ticks(5));
    /// assert_eq!(
    ///     later.sample_at(Instant::from_ticks(18)).period,
    ///     Period::bounded(Instant::from_ticks(15), Instant::from_ticks(25))
    /// );
    /// ```
    pub fn offset(&self, offset: TickSpan) -> PeriodTimeline {
        PeriodTimeline::from_boundaries(self.starts().offset(offset), self.ends().offset(offset))
    }
}
