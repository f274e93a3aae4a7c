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

#[derive(Copy, Clone, Debug)]
pub struct Ball {
    pub m: f64,
    pub r: f64,
} // value ∈ [m - r, m + r]

// Below this magnitude the error term of a product is no longer exact.
const UNDERFLOW_GUARD: f64 = 1e-280;

// Slack on the accumulated radius, which is itself rounded.
const RADIUS_SLACK: f64 = 1.0 + 1e-12;

#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    (s, err)
}

#[inline]
fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    // uses FMA when available (compile with -C target-cpu=native)
    let err = f64::mul_add(a, b, -p);
    if p.abs() < UNDERFLOW_GUARD && a != 0.0 && b != 0.0 {
        return (p, err.abs() + UNDERFLOW_GUARD);
    }
    (p, err)
}

impl Ball {
    #[inline]
    pub fn from_f64(x: f64) -> Self {
        Ball { m: x, r: 0.0 }
    }

    #[inline]
    pub fn add(self, o: Self) -> Self {
        let (s, e) = two_sum(self.m, o.m);
        Ball {
            m: s,
            r: self.r + o.r + e.abs(),
        }
    }

    #[inline]
    pub fn sub(self, o: Self) -> Self {
        self.add(Ball { m: -o.m, r: o.r })
    }

    #[inline]
    pub fn mul(self, o: Self) -> Self {
        let (p, e) = two_prod(self.m, o.m);
        Ball {
            m: p,
            r: self.m.abs() * o.r + o.m.abs() * self.r + self.r * o.r + e.abs(),
        }
    }

    #[inline]
    pub fn square(self) -> Self {
        self.mul(self)
    }

    /// Sign of every value in the ball, if they all agree.
    #[inline]
    pub fn sign_if_certain(self) -> Option<i8> {
        if !self.m.is_finite() || !self.r.is_finite() {
            return None;
        }
        let bound = self.r * RADIUS_SLACK;
        if self.m > bound {
            Some(1)
        } else if self.m < -bound {
            Some(-1)
        } else if self.m == 0.0 && self.r == 0.0 {
            Some(0)
        } else {
            None
        }
    }
}
