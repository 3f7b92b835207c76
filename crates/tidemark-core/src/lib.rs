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

//! # Tidemark Core
//!
//! Foundational time-axis primitives for the Tidemark time-algebra
//! ecosystem. This crate defines the tick-resolution axis every higher
//! layer computes on, together with the numeric helpers that make
//! arithmetic on that axis safe near its edges.
//!
//! ## Modules
//!
//! - `time`: the [`Instant`](time::Instant) absolute UTC point (64-bit
//!   tick count, 100 ns resolution, valid `MIN`/`MAX` boundary values),
//!   the signed [`TickSpan`](time::TickSpan) duration, overflow-safe
//!   offset arithmetic, min/max-ignoring-absent helpers, and strict
//!   calendar interop that rejects non-UTC input.
//! - `num`: floor-division traits over signed primitives (rounding
//!   toward negative infinity, which truncating division does not do),
//!   required by periodic phase arithmetic.
//!
//! ## Purpose
//!
//! Timelines answer neighbor queries arbitrarily close to the ends of
//! the representable axis. Every operation here therefore either cannot
//! overflow or reports overflow through its return type, so callers
//! never have to reason about wrapping.

pub mod num;
pub mod time;
