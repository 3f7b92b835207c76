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

//! Duration aggregation over period collections.

use crate::period_timeline::PeriodTimeline;
use tidemark_core::time::{Instant, TickSpan};
use tidemark_model::Period;

/// Sums the durations of a period collection.
///
/// Naive summation counts overlapping stretches once per period; with
/// `merge_overlapping` the collection is unioned into a disjoint period
/// timeline first, so every covered instant counts exactly once.
///
/// Returns `None` when any contributing period is unbounded or the sum
/// leaves the span range.
///
/// # Examples
///
/// ```rust
/// # use tidemark_algebra::aggregate::total_duration;
/// # use tidemark_core::time::{Instant, TickSpan};
/// # use tidemark_model::Period;
/// let overlapping = [
///     Period::bounded(Instant::from_ticks(0), Instant::from_ticks(10)),
///     Period::bounded(Instant::from_ticks(5), Instant::from_ticks(15)),
/// ];
/// assert_eq!(total_duration(overlapping, false), Some(TickSpan::ticks(20)));
/// assert_eq!(total_duration(overlapping, true), Some(TickSpan::ticks(15)));
/// ```
pub fn total_duration<I>(periods: I, merge_overlapping: bool) -> Option<TickSpan>
where
    I: IntoIterator<Item = Period>,
{
    let mut total = TickSpan::ZERO;
    if merge_overlapping {
        let merged = PeriodTimeline::from_periods(periods);
        for period in merged.periods_from(Instant::MIN) {
            total = total.checked_add(period.duration()?)?;
        }
    } else {
        for period in periods {
            total = total.checked_add(period.duration()?)?;
        }
    }
    Some(total)
}
