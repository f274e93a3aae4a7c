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

use std::marker::PhantomData;

use rug::Rational;

use crate::geometry::Point2;
use crate::kernel::kernel::{Kernel2, Sign, exact_incircle, exact_orient2d};
use crate::numeric::ball::Ball;

/// Filtered kernel for `f32`/`f64`: error-bounded `Ball` evaluation first,
/// exact `rug::Rational` evaluation when the sign is not certified.
pub struct FloatKernel<F>(PhantomData<F>);

fn orient_f64(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> Sign {
    let abx = Ball::from_f64(b[0]).sub(Ball::from_f64(a[0]));
    let aby = Ball::from_f64(b[1]).sub(Ball::from_f64(a[1]));
    let acx = Ball::from_f64(c[0]).sub(Ball::from_f64(a[0]));
    let acy = Ball::from_f64(c[1]).sub(Ball::from_f64(a[1]));
    let det = abx.mul(acy).sub(aby.mul(acx));

    match det.sign_if_certain() {
        Some(s) => Sign::from_i8(s),
        None => match (rational(a), rational(b), rational(c)) {
            (Some(a), Some(b), Some(c)) => exact_orient2d(&a, &b, &c),
            _ => Sign::Zero,
        },
    }
}

fn incircle_f64(a: [f64; 2], b: [f64; 2], c: [f64; 2], d: [f64; 2]) -> Sign {
    let adx = Ball::from_f64(a[0]).sub(Ball::from_f64(d[0]));
    let ady = Ball::from_f64(a[1]).sub(Ball::from_f64(d[1]));
    let bdx = Ball::from_f64(b[0]).sub(Ball::from_f64(d[0]));
    let bdy = Ball::from_f64(b[1]).sub(Ball::from_f64(d[1]));
    let cdx = Ball::from_f64(c[0]).sub(Ball::from_f64(d[0]));
    let cdy = Ball::from_f64(c[1]).sub(Ball::from_f64(d[1]));

    let alift = adx.square().add(ady.square());
    let blift = bdx.square().add(bdy.square());
    let clift = cdx.square().add(cdy.square());

    let bc = bdx.mul(cdy).sub(cdx.mul(bdy));
    let ca = cdx.mul(ady).sub(adx.mul(cdy));
    let ab = adx.mul(bdy).sub(bdx.mul(ady));

    let det = alift.mul(bc).add(blift.mul(ca)).add(clift.mul(ab));

    match det.sign_if_certain() {
        Some(s) => Sign::from_i8(s),
        None => match (rational(a), rational(b), rational(c), rational(d)) {
            (Some(a), Some(b), Some(c), Some(d)) => exact_incircle(&a, &b, &c, &d),
            _ => Sign::Zero,
        },
    }
}

#[inline]
fn rational(p: [f64; 2]) -> Option<[Rational; 2]> {
    Some([Rational::from_f64(p[0])?, Rational::from_f64(p[1])?])
}

impl Kernel2 for FloatKernel<f64> {
    type FT = f64;

    #[inline]
    fn orient2d(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> Sign {
        orient_f64([a.x, a.y], [b.x, b.y], [c.x, c.y])
    }

    #[inline]
    fn incircle(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>, d: &Point2<f64>) -> Sign {
        incircle_f64([a.x, a.y], [b.x, b.y], [c.x, c.y], [d.x, d.y])
    }
}

// f32 -> f64 is exact, so the f64 filter certifies f32 inputs as well
impl Kernel2 for FloatKernel<f32> {
    type FT = f32;

    #[inline]
    fn orient2d(a: &Point2<f32>, b: &Point2<f32>, c: &Point2<f32>) -> Sign {
        orient_f64(widen(a), widen(b), widen(c))
    }

    #[inline]
    fn incircle(a: &Point2<f32>, b: &Point2<f32>, c: &Point2<f32>, d: &Point2<f32>) -> Sign {
        incircle_f64(widen(a), widen(b), widen(c), widen(d))
    }
}

#[inline(always)]
fn widen(p: &Point2<f32>) -> [f64; 2] {
    [p.x as f64, p.y as f64]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_of_nearly_collinear_points_is_exact() {
        // c is one ulp above the line through a and b
        let a = [0.5, 0.5];
        let b = [12.0, 12.0];
        let c = [24.0, f64::from_bits(24.0f64.to_bits() + 1)];
        assert_eq!(orient_f64(a, b, c), Sign::Positive);
        assert_eq!(orient_f64(a, c, b), Sign::Negative);
        assert_eq!(orient_f64(a, b, [24.0, 24.0]), Sign::Zero);
    }

    #[test]
    fn cocircular_points_are_zero() {
        let s = incircle_f64([1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -1.0]);
        assert_eq!(s, Sign::Zero);
        let inside = incircle_f64([1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -0.999999999999]);
        assert_eq!(inside, Sign::Positive);
    }
}
