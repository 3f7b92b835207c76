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

use num_traits::{PrimInt, Signed};

/// Floored division: rounds the quotient toward negative infinity.
///
/// Truncating division (`/`) rounds toward zero, which is wrong for phase
/// arithmetic over a time axis: the phase of an instant *before* the origin
/// must still land in `[0, period)`.
///
/// # Panics
///
/// Panics if `divisor` is zero, like primitive division.
///
/// # Examples
///
/// ```rust
/// # use tidemark_core::num::floor::floor_div;
/// assert_eq!(floor_div(7i64, 3), 2);
/// assert_eq!(floor_div(-7i64, 3), -3); // truncating would give -2
/// assert_eq!(floor_div(7i64, -3), -3);
/// ```
#[inline]
pub fn floor_div<T>(dividend: T, divisor: T) -> T
where
    T: PrimInt + Signed,
{
    let quotient = dividend / divisor;
    let remainder = dividend % divisor;
    if remainder != T::zero() && (remainder.is_negative() != divisor.is_negative()) {
        quotient - T::one()
    } else {
        quotient
    }
}

/// Floored remainder: the result has the sign of the divisor (or is zero).
///
/// For a positive divisor the remainder is always in `[0, divisor)`, so
/// `floor_div` and `floor_mod` satisfy
/// `floor_div(a, b) * b + floor_mod(a, b) == a`.
///
/// # Panics
///
/// Panics if `divisor` is zero, like primitive remainder.
///
/// # Examples
///
/// ```rust
/// # use tidemark_core::num::floor::floor_mod;
/// assert_eq!(floor_mod(7i64, 3), 1);
/// assert_eq!(floor_mod(-7i64, 3), 2); // truncating `%` would give -1
/// ```
#[inline]
pub fn floor_mod<T>(dividend: T, divisor: T) -> T
where
    T: PrimInt + Signed,
{
    let remainder = dividend % divisor;
    if remainder != T::zero() && (remainder.is_negative() != divisor.is_negative()) {
        remainder + divisor
    } else {
        remainder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_div_positive_operands() {
        assert_eq!(floor_div(10i64, 3), 3);
        assert_eq!(floor_div(9i64, 3), 3);
        assert_eq!(floor_div(0i64, 3), 0);
    }

    #[test]
    fn test_floor_div_negative_dividend() {
        assert_eq!(floor_div(-1i64, 3), -1);
        assert_eq!(floor_div(-3i64, 3), -1);
        assert_eq!(floor_div(-4i64, 3), -2);
    }

    #[test]
    fn test_floor_div_negative_divisor() {
        assert_eq!(floor_div(7i64, -3), -3);
        assert_eq!(floor_div(-7i64, -3), 2);
    }

    #[test]
    fn test_floor_identity_exhaustive_small() {
        for a in -20i64..=20 {
            for b in [-7i64, -3, -1, 1, 3, 7] {
                let q = floor_div(a, b);
                let r = floor_mod(a, b);
                assert_eq!(q * b + r, a, "identity failed for {a}/{b}");
                if b > 0 {
                    assert!((0..b).contains(&r), "remainder {r} out of range for {a}/{b}");
                }
            }
        }
    }

    #[test]
    fn test_floor_mod_zero_remainder() {
        assert_eq!(floor_mod(9i64, 3), 0);
        assert_eq!(floor_mod(-9i64, 3), 0);
    }

    #[test]
    fn test_floor_i128_widening() {
        // The jitter interpolation widens to i128 before flooring.
        let gap: i128 = i64::MAX as i128 * 2;
        assert_eq!(floor_div(gap, 2), i64::MAX as i128);
        assert_eq!(floor_div(-gap - 1, gap), -2);
    }
}
