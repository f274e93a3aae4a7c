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

use crate::geometry::Point2;
use crate::kernel::kernel::{Kernel2, Sign};
use crate::numeric::scalar::Scalar;

#[inline]
pub fn orient2d<T: Scalar>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>) -> Sign {
    T::Kernel::orient2d(a, b, c)
}

#[inline]
pub fn incircle<T: Scalar>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>, d: &Point2<T>) -> Sign {
    T::Kernel::incircle(a, b, c, d)
}

#[inline]
pub fn are_collinear<T: Scalar>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>) -> bool {
    orient2d(a, b, c).is_zero()
}

/// `p` inside or on the boundary of the CCW triangle `(a, b, c)`.
pub fn point_in_or_on_triangle<T: Scalar>(
    p: &Point2<T>,
    a: &Point2<T>,
    b: &Point2<T>,
    c: &Point2<T>,
) -> bool {
    !orient2d(a, b, p).is_negative()
        && !orient2d(b, c, p).is_negative()
        && !orient2d(c, a, p).is_negative()
}

/// Segments `ab` and `cd` cross at a single point interior to both.
pub fn segments_cross<T: Scalar>(
    a: &Point2<T>,
    b: &Point2<T>,
    c: &Point2<T>,
    d: &Point2<T>,
) -> bool {
    let o1 = orient2d(a, b, c);
    let o2 = orient2d(a, b, d);
    if o1.is_zero() || o2.is_zero() || o1 == o2 {
        return false;
    }
    let o3 = orient2d(c, d, a);
    let o4 = orient2d(c, d, b);
    !o3.is_zero() && !o4.is_zero() && o3 != o4
}

/// `p` lies on segment `ab`, strictly between its endpoints.
pub fn is_point_on_open_segment<T: Scalar>(p: &Point2<T>, a: &Point2<T>, b: &Point2<T>) -> bool {
    if !are_collinear(a, b, p) || p == a || p == b {
        return false;
    }
    let between = |v: T, lo: T, hi: T| {
        if lo <= hi { lo <= v && v <= hi } else { hi <= v && v <= lo }
    };
    between(p.x, a.x, b.x) && between(p.y, a.y, b.y)
}
