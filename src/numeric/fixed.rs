// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{ToPrimitive, Zero};

pub const FRACTION_BITS: u32 = 32;
const SCALE: f64 = (1u64 << FRACTION_BITS) as f64;

/// Signed Q31.32 fixed-point number stored in an `i64`.
///
/// Arithmetic wraps like the underlying integer; the predicates never use it
/// and work on [`Fixed::raw`] with widened integers instead.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(i64);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(1 << FRACTION_BITS);

    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        Fixed(raw)
    }

    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn from_int(v: i32) -> Self {
        Fixed((v as i64) << FRACTION_BITS)
    }

    /// Rounds to the nearest representable value, saturating at the range ends.
    #[inline]
    pub fn from_f64(v: f64) -> Self {
        Fixed((v * SCALE).round() as i64)
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / SCALE
    }
}

impl From<i32> for Fixed {
    fn from(v: i32) -> Self {
        Fixed::from_int(v)
    }
}

impl Add for Fixed {
    type Output = Fixed;
    #[inline]
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Fixed {
    type Output = Fixed;
    #[inline]
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_sub(rhs.0))
    }
}

impl Neg for Fixed {
    type Output = Fixed;
    #[inline]
    fn neg(self) -> Fixed {
        Fixed(self.0.wrapping_neg())
    }
}

impl Mul for Fixed {
    type Output = Fixed;
    #[inline]
    fn mul(self, rhs: Fixed) -> Fixed {
        let wide = (self.0 as i128 * rhs.0 as i128) >> FRACTION_BITS;
        Fixed(wide as i64)
    }
}

impl Zero for Fixed {
    #[inline]
    fn zero() -> Self {
        Fixed::ZERO
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl ToPrimitive for Fixed {
    fn to_i64(&self) -> Option<i64> {
        // truncate toward zero like the primitive casts
        let whole = self.0 / (1i64 << FRACTION_BITS);
        Some(whole)
    }

    fn to_u64(&self) -> Option<u64> {
        self.to_i64().and_then(|v| u64::try_from(v).ok())
    }

    fn to_f64(&self) -> Option<f64> {
        Some(Fixed::to_f64(*self))
    }
}

impl fmt::Debug for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed({})", Fixed::to_f64(*self))
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Fixed::to_f64(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_round_trip_on_dyadic_values() {
        let v = Fixed::from_f64(-2.75);
        assert_eq!(v.to_f64(), -2.75);
        assert_eq!(Fixed::from_int(3), Fixed::from_f64(3.0));
        assert_eq!(v.to_i64(), Some(-2));
    }

    #[test]
    fn formats_as_its_real_value() {
        assert_eq!(format!("{}", Fixed::from_f64(-2.75)), "-2.75");
        assert_eq!(format!("{:?}", Fixed::ONE), "Fixed(1)");
    }

    #[test]
    fn multiplication_keeps_fraction_bits() {
        let a = Fixed::from_f64(1.5);
        let b = Fixed::from_f64(-4.0);
        assert_eq!((a * b).to_f64(), -6.0);
        assert_eq!((a + b - Fixed::ONE).to_f64(), -3.5);
    }
}
