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

//! Combinators over a single instant timeline.
//!
//! All of them share one evaluation pattern: compute a candidate from the
//! operands' cheaper sub-queries, verify it against the combinator's own
//! predicate, and advance past a rejected candidate. The step count is
//! bounded by the structure of the operands, not by the combinator.

pub mod cached;
pub mod filter;
pub mod intersect;
pub mod mask_count;
pub mod offset;
pub mod randomize;
pub mod synchronize;
pub mod without;

pub use cached::CachedTimeline;
pub use filter::FilteredTimeline;
pub use intersect::IntersectionTimeline;
pub use mask_count::{MaskCountMode, MaskCountTimeline};
pub use offset::OffsetTimeline;
pub use randomize::RandomizedTimeline;
pub use synchronize::SynchronizedTimeline;
pub use without::WithoutTimeline;
