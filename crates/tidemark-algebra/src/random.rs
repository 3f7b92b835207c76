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

//! Deterministic randomness for the jitter combinators.
//!
//! Randomized timelines must answer every query identically forever, so
//! "randomness" here is a pure function from an instant and a seed to a
//! uniform fraction. The default maps the key through a seeded RNG; tests
//! and callers can substitute any other `u64 -> [0, 1)` function.

use rand::{Rng, SeedableRng, rngs::StdRng};
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tidemark_core::time::Instant;

/// A pure pseudo-random function from a 64-bit key to a fraction in `[0, 1)`.
pub type RandomFunction = Arc<dyn Fn(u64) -> f64 + Send + Sync>;

/// The default random function: a fresh seeded RNG per key.
///
/// # Examples
///
/// ```rust
/// # use tidemark_algebra::random::default_random;
/// let fraction = default_random(42);
/// assert!((0.0..1.0).contains(&fraction));
/// assert_eq!(fraction, default_random(42)); // pure
/// ```
#[inline]
pub fn default_random(key: u64) -> f64 {
    StdRng::seed_from_u64(key).random::<f64>()
}

/// Derives the per-instant randomization key: `hash(instant) XOR seed`.
///
/// The hash is the deterministic `FxHasher`, so identical inputs with the
/// same seed reproduce the same jitter across runs and processes.
#[inline]
pub fn instant_key(instant: Instant, seed: u64) -> u64 {
    let mut hasher = FxHasher::default();
    instant.hash(&mut hasher);
    hasher.finish() ^ seed
}

/// Picks the instant `lower + fraction × width` inside `[lower, upper]`.
///
/// Both bounds are inclusive and must be ordered. The fraction is clamped
/// into the window, so floating-point rounding can never escape it.
///
/// # Panics
///
/// In debug builds, panics if `lower > upper`.
pub fn uniform_between(lower: Instant, upper: Instant, fraction: f64) -> Instant {
    debug_assert!(
        lower <= upper,
        "called `uniform_between` with an empty window: {:?} > {:?}",
        lower,
        upper
    );
    let width = (upper.ticks() as i128 - lower.ticks() as i128) + 1;
    let offset = (fraction * width as f64).floor() as i128;
    let offset = offset.clamp(0, width - 1);
    Instant::from_ticks((lower.ticks() as i128 + offset) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_default_random_is_pure_and_in_range() {
        for key in [0u64, 1, u64::MAX, 0xDEADBEEF] {
            let fraction = default_random(key);
            assert!((0.0..1.0).contains(&fraction));
            assert_eq!(fraction, default_random(key));
        }
    }

    #[test]
    fn test_instant_key_depends_on_seed_and_instant() {
        let t = Instant::from_ticks(100);
        assert_eq!(instant_key(t, 7), instant_key(t, 7));
        assert_ne!(instant_key(t, 7), instant_key(t, 8));
        assert_ne!(instant_key(t, 7), instant_key(Instant::from_ticks(101), 7));
    }

    #[test]
    fn test_uniform_between_stays_inside_window() {
        let lower = Instant::from_ticks(-5);
        let upper = Instant::from_ticks(5);
        for fraction in [0.0, 0.001, 0.5, 0.999] {
            let picked = uniform_between(lower, upper, fraction);
            assert!(picked >= lower && picked <= upper);
        }
        assert_eq!(uniform_between(lower, upper, 0.0), lower);
        // A fraction arbitrarily close to 1 still maps to the last cell.
        assert_eq!(uniform_between(lower, upper, 0.999_999_999), upper);
    }

    #[test]
    fn test_uniform_between_single_cell() {
        let t = Instant::from_ticks(9);
        assert_eq!(uniform_between(t, t, 0.73), t);
    }

    #[test]
    fn test_uniform_between_axis_bounds() {
        // The full-axis window must not overflow the interpolation.
        let picked = uniform_between(Instant::MIN, Instant::MAX, 0.5);
        assert!(picked >= Instant::MIN && picked <= Instant::MAX);
    }

    #[test]
    fn test_custom_random_function_compatible() {
        // Any seeded RNG makes a valid substitute for the default.
        let chacha: RandomFunction =
            Arc::new(|key| ChaCha8Rng::seed_from_u64(key).random::<f64>());
        let fraction = chacha(123);
        assert!((0.0..1.0).contains(&fraction));
        assert_eq!(fraction, chacha(123));
    }
}
