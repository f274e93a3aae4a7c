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

use std::ops::{AddAssign, MulAssign, SubAssign};

use crate::{geometry::Point2, numeric::scalar::Scalar};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    #[inline]
    pub fn from_i8(s: i8) -> Self {
        match s {
            s if s > 0 => Sign::Positive,
            s if s < 0 => Sign::Negative,
            _ => Sign::Zero,
        }
    }

    #[inline]
    pub fn of<N: PartialOrd<i32>>(v: &N) -> Self {
        if *v > 0 {
            Sign::Positive
        } else if *v < 0 {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self == Sign::Positive
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self == Sign::Negative
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self == Sign::Zero
    }
}

/// Exact predicates for one coordinate kind.
pub trait Kernel2 {
    type FT: Scalar;

    // Sign of oriented area (CCW>0, CW<0, 0 if collinear)
    fn orient2d(a: &Point2<Self::FT>, b: &Point2<Self::FT>, c: &Point2<Self::FT>) -> Sign;

    // Positive iff d is strictly inside the circle through the CCW triangle (a, b, c)
    fn incircle(
        a: &Point2<Self::FT>,
        b: &Point2<Self::FT>,
        c: &Point2<Self::FT>,
        d: &Point2<Self::FT>,
    ) -> Sign;
}

/// Arbitrary-precision numbers the filtered kernels fall back to.
pub trait ExactNumber:
    Clone
    + PartialOrd<i32>
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
{
}

impl ExactNumber for rug::Integer {}
impl ExactNumber for rug::Rational {}

#[inline]
fn diff<N: ExactNumber>(x: &N, y: &N) -> N {
    let mut r = x.clone();
    r -= y;
    r
}

#[inline]
fn prod<N: ExactNumber>(x: &N, y: &N) -> N {
    let mut r = x.clone();
    r *= y;
    r
}

pub(crate) fn exact_orient2d<N: ExactNumber>(a: &[N; 2], b: &[N; 2], c: &[N; 2]) -> Sign {
    let abx = diff(&b[0], &a[0]);
    let aby = diff(&b[1], &a[1]);
    let acx = diff(&c[0], &a[0]);
    let acy = diff(&c[1], &a[1]);
    let det = diff(&prod(&abx, &acy), &prod(&aby, &acx));
    Sign::of(&det)
}

pub(crate) fn exact_incircle<N: ExactNumber>(
    a: &[N; 2],
    b: &[N; 2],
    c: &[N; 2],
    d: &[N; 2],
) -> Sign {
    let adx = diff(&a[0], &d[0]);
    let ady = diff(&a[1], &d[1]);
    let bdx = diff(&b[0], &d[0]);
    let bdy = diff(&b[1], &d[1]);
    let cdx = diff(&c[0], &d[0]);
    let cdy = diff(&c[1], &d[1]);

    let mut alift = prod(&adx, &adx);
    alift += &prod(&ady, &ady);
    let mut blift = prod(&bdx, &bdx);
    blift += &prod(&bdy, &bdy);
    let mut clift = prod(&cdx, &cdx);
    clift += &prod(&cdy, &cdy);

    let bc = diff(&prod(&bdx, &cdy), &prod(&cdx, &bdy));
    let ca = diff(&prod(&cdx, &ady), &prod(&adx, &cdy));
    let ab = diff(&prod(&adx, &bdy), &prod(&bdx, &ady));

    let mut det = prod(&alift, &bc);
    det += &prod(&blift, &ca);
    det += &prod(&clift, &ab);
    Sign::of(&det)
}
