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

use rug::Integer;

use crate::geometry::Point2;
use crate::kernel::kernel::{Kernel2, Sign, exact_incircle, exact_orient2d};
use crate::numeric::fixed::Fixed;

/// Kernel for `i32` coordinates.
pub struct IntegerKernel;

/// Kernel for [`Fixed`] coordinates, evaluated on the raw `i64` values.
pub struct FixedKernel;

// Checked i128 evaluation; `None` means an intermediate overflowed.
fn orient_checked(a: [i64; 2], b: [i64; 2], c: [i64; 2]) -> Option<i128> {
    let abx = b[0] as i128 - a[0] as i128;
    let aby = b[1] as i128 - a[1] as i128;
    let acx = c[0] as i128 - a[0] as i128;
    let acy = c[1] as i128 - a[1] as i128;
    abx.checked_mul(acy)?.checked_sub(aby.checked_mul(acx)?)
}

fn incircle_checked(a: [i64; 2], b: [i64; 2], c: [i64; 2], d: [i64; 2]) -> Option<i128> {
    let adx = a[0] as i128 - d[0] as i128;
    let ady = a[1] as i128 - d[1] as i128;
    let bdx = b[0] as i128 - d[0] as i128;
    let bdy = b[1] as i128 - d[1] as i128;
    let cdx = c[0] as i128 - d[0] as i128;
    let cdy = c[1] as i128 - d[1] as i128;

    let lift = |x: i128, y: i128| x.checked_mul(x)?.checked_add(y.checked_mul(y)?);
    let cross = |x0: i128, y0: i128, x1: i128, y1: i128| {
        x0.checked_mul(y1)?.checked_sub(x1.checked_mul(y0)?)
    };

    let alift = lift(adx, ady)?;
    let blift = lift(bdx, bdy)?;
    let clift = lift(cdx, cdy)?;

    let bc = cross(bdx, bdy, cdx, cdy)?;
    let ca = cross(cdx, cdy, adx, ady)?;
    let ab = cross(adx, ady, bdx, bdy)?;

    alift
        .checked_mul(bc)?
        .checked_add(blift.checked_mul(ca)?)?
        .checked_add(clift.checked_mul(ab)?)
}

#[inline]
fn big(p: [i64; 2]) -> [Integer; 2] {
    [Integer::from(p[0]), Integer::from(p[1])]
}

fn orient_i64(a: [i64; 2], b: [i64; 2], c: [i64; 2]) -> Sign {
    match orient_checked(a, b, c) {
        Some(v) => Sign::from_i8(v.signum() as i8),
        None => exact_orient2d(&big(a), &big(b), &big(c)),
    }
}

fn incircle_i64(a: [i64; 2], b: [i64; 2], c: [i64; 2], d: [i64; 2]) -> Sign {
    match incircle_checked(a, b, c, d) {
        Some(v) => Sign::from_i8(v.signum() as i8),
        None => exact_incircle(&big(a), &big(b), &big(c), &big(d)),
    }
}

impl Kernel2 for IntegerKernel {
    type FT = i32;

    #[inline]
    fn orient2d(a: &Point2<i32>, b: &Point2<i32>, c: &Point2<i32>) -> Sign {
        orient_i64(int(a), int(b), int(c))
    }

    #[inline]
    fn incircle(a: &Point2<i32>, b: &Point2<i32>, c: &Point2<i32>, d: &Point2<i32>) -> Sign {
        incircle_i64(int(a), int(b), int(c), int(d))
    }
}

impl Kernel2 for FixedKernel {
    type FT = Fixed;

    #[inline]
    fn orient2d(a: &Point2<Fixed>, b: &Point2<Fixed>, c: &Point2<Fixed>) -> Sign {
        orient_i64(raw(a), raw(b), raw(c))
    }

    #[inline]
    fn incircle(
        a: &Point2<Fixed>,
        b: &Point2<Fixed>,
        c: &Point2<Fixed>,
        d: &Point2<Fixed>,
    ) -> Sign {
        incircle_i64(raw(a), raw(b), raw(c), raw(d))
    }
}

#[inline(always)]
fn int(p: &Point2<i32>) -> [i64; 2] {
    [p.x as i64, p.y as i64]
}

#[inline(always)]
fn raw(p: &Point2<Fixed>) -> [i64; 2] {
    [p.x.raw(), p.y.raw()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_path_reports_overflow() {
        let m = i32::MAX as i64;
        let n = i32::MIN as i64;
        assert!(orient_checked([n, n], [m, n], [n, m]).is_some());
        // lifted terms near 2^64 times crosses near 2^64 leave i128
        assert!(incircle_checked([n, n], [m, n], [m, m], [n, m - 1]).is_none());
        assert!(incircle_checked([0, 0], [1, 0], [1, 1], [0, 1]).is_some());
    }

    #[test]
    fn overflowing_incircle_takes_the_exact_path() {
        let m = i32::MAX as i64;
        let n = i32::MIN as i64;
        let d = [n, m - 1];
        assert!(incircle_checked([n, n], [m, n], [m, m], d).is_none());
        assert_eq!(incircle_i64([n, n], [m, n], [m, m], d), Sign::Positive);
        assert_eq!(incircle_i64([n, n], [m, m], [m, n], d), Sign::Negative);
    }

    #[test]
    fn fallback_signs_for_extreme_coordinates() {
        let m = i32::MAX as i64;
        let n = i32::MIN as i64;
        // d = origin is inside the circumcircle of three corners of the full square
        assert_eq!(incircle_i64([n, n], [m, n], [m, m], [0, 0]), Sign::Positive);
        assert_eq!(incircle_i64([n, n], [m, n], [m, m], [n, m]), Sign::Zero);
        assert_eq!(incircle_i64([0, 0], [1, 0], [1, 1], [0, 1]), Sign::Zero);
    }
}
