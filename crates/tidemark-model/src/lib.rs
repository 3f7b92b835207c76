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

//! # Tidemark Model
//!
//! The interval model of the Tidemark time algebra: a [`Period`] is a
//! half-open interval `[start, end)` on the tick axis whose bounds may
//! individually be absent, meaning "always begun" and "never ends".
//!
//! ## Modules
//!
//! - `period`: the `Period` value type with validated construction, a
//!   total order that sorts unbounded starts first and unbounded ends
//!   last, duration, overflow-aware offsetting, and the eager set-style
//!   helpers (intersection, union, subtraction, splitting).
//! - `containment`: instant and period containment, including the
//!   four-mode [`ContainmentMode`](containment::ContainmentMode) enum
//!   threaded through every masking and filtering combinator.

pub mod containment;
pub mod period;

pub use containment::ContainmentMode;
pub use period::{Period, PeriodOffsetError};
