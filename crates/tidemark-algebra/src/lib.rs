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

//! # Tidemark Algebra
//!
//! The lazy query algebra over possibly-infinite sets of instants and the
//! periods they delimit. Nothing here materializes a set: a composition of
//! combinators is a tree of small immutable objects, and evaluation happens
//! only when a leaf query (`previous`, `next`, `is_instant`) reaches the
//! root and recurses through its operands.
//!
//! ## Modules
//!
//! - `timeline`: the [`Timeline`](timeline::Timeline) contract and the
//!   shared [`TimelineHandle`](timeline::TimelineHandle) every combinator
//!   composes through.
//! - `primitive`: the base timelines — empty, fixed collection, periodic,
//!   and composite union.
//! - `ops`: combinators over a single instant timeline (filter, exclude,
//!   intersect, offset, randomize, mask-scoped counting, synchronization,
//!   memoization).
//! - `period_timeline` / `period_ops`: the paired start/end representation
//!   of non-overlapping period sequences and its combinators (merge,
//!   intersect, subtract, invert, cut, stitch, masking, containment
//!   filters, randomize).
//! - `iter`: restartable lazy iteration over instants and periods.
//! - `random`: the deterministic jitter shared by both randomize
//!   combinators.
//! - `aggregate`: duration summation over period collections.
//!
//! ## Laziness and termination
//!
//! Combinator queries run candidate/verify/advance loops whose step count
//! is bounded by the structure of the operands, not by the combinator
//! itself. Well-formed compositions terminate; adversarial ones (such as
//! unioning infinitely many touching periods into full axis coverage) can
//! scan without bound, which the crate accepts by design.

pub mod aggregate;
pub mod iter;
pub mod ops;
pub mod period_ops;
pub mod period_timeline;
pub mod primitive;
pub mod random;
pub mod timeline;

pub use period_timeline::{PeriodSample, PeriodTimeline};
pub use timeline::{Timeline, TimelineHandle};
