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

//! Period-in-period containment.
//!
//! Every masking and filtering combinator that asks "does this period
//! qualify" threads a [`ContainmentMode`] through to this predicate, so
//! the strictness of the question is a first-class parameter rather than
//! a family of near-duplicate methods.

use crate::period::Period;
use tidemark_core::time::Instant;

/// How much of the inner period must lie inside the outer one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContainmentMode {
    /// Both inner bounds must lie inside the outer period.
    #[default]
    Complete,
    /// The inner period may stick out at its start; its end must be inside.
    PartialStartAllowed,
    /// The inner period may stick out at its end; its start must be inside.
    PartialEndAllowed,
    /// Any overlap qualifies, including the inner period covering the outer.
    PartialAllowed,
}

impl std::fmt::Display for ContainmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complete => write!(f, "Complete"),
            Self::PartialStartAllowed => write!(f, "PartialStartAllowed"),
            Self::PartialEndAllowed => write!(f, "PartialEndAllowed"),
            Self::PartialAllowed => write!(f, "PartialAllowed"),
        }
    }
}

impl Period {
    /// Returns `true` if `inner` qualifies as contained in `self` under `mode`.
    ///
    /// Complete containment always qualifies under every mode, so the modes
    /// are monotone: `Complete` implies each partial mode, and each partial
    /// mode implies `PartialAllowed`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tidemark_model::{ContainmentMode, Period};
    /// # use tidemark_core::time::Instant;
    /// let outer = Period::bounded(Instant::from_ticks(0), Instant::from_ticks(100));
    /// let straddling = Period::bounded(Instant::from_ticks(-10), Instant::from_ticks(50));
    ///
    /// assert!(!outer.contains_period(&straddling, ContainmentMode::Complete));
    /// assert!(outer.contains_period(&straddling, ContainmentMode::PartialStartAllowed));
    /// assert!(outer.contains_period(&straddling, ContainmentMode::PartialAllowed));
    /// ```
    pub fn contains_period(&self, inner: &Period, mode: ContainmentMode) -> bool {
        let complete = start_inside_ordered(self, inner) && end_inside_ordered(self, inner);
        match mode {
            ContainmentMode::Complete => complete,
            ContainmentMode::PartialStartAllowed => complete || end_inside(self, inner),
            ContainmentMode::PartialEndAllowed => complete || start_inside(self, inner),
            ContainmentMode::PartialAllowed => {
                complete
                    || end_inside(self, inner)
                    || start_inside(self, inner)
                    || (start_inside_ordered(inner, self) && end_inside_ordered(inner, self))
            }
        }
    }
}

/// `outer.start <= inner.start`, with absent bounds as −∞.
#[inline]
fn start_inside_ordered(outer: &Period, inner: &Period) -> bool {
    match (outer.start(), inner.start()) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(o), Some(i)) => o <= i,
    }
}

/// `inner.end <= outer.end`, with absent bounds as +∞.
#[inline]
fn end_inside_ordered(outer: &Period, inner: &Period) -> bool {
    match (outer.end(), inner.end()) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(o), Some(i)) => i <= o,
    }
}

/// The inner start lies inside the outer period: ordered and before its end.
#[inline]
fn start_inside(outer: &Period, inner: &Period) -> bool {
    start_inside_ordered(outer, inner) && strictly_before_end(inner.start(), outer.end())
}

/// The inner end lies inside the outer period: ordered and after its start.
#[inline]
fn end_inside(outer: &Period, inner: &Period) -> bool {
    end_inside_ordered(outer, inner) && strictly_after_start(inner.end(), outer.start())
}

#[inline]
fn strictly_before_end(bound: Option<Instant>, end: Option<Instant>) -> bool {
    match (bound, end) {
        (Some(b), Some(e)) => b < e,
        _ => true,
    }
}

#[inline]
fn strictly_after_start(bound: Option<Instant>, start: Option<Instant>) -> bool {
    match (bound, start) {
        (Some(b), Some(s)) => b > s,
        _ => true,
    }
}
