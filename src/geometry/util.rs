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

//! Approximate `f64` constructions. Decisions that must be exact go through
//! the kernel predicates instead.

pub type Real2 = [f64; 2];

#[inline(always)]
pub fn dist2(a: Real2, b: Real2) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}

#[inline(always)]
pub fn midpoint(a: Real2, b: Real2) -> Real2 {
    [0.5 * (a[0] + b[0]), 0.5 * (a[1] + b[1])]
}

/// Twice the signed area of `a, b, c`.
#[inline(always)]
pub fn cross(a: Real2, b: Real2, c: Real2) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

#[inline]
pub fn triangle_area(a: Real2, b: Real2, c: Real2) -> f64 {
    0.5 * cross(a, b, c).abs()
}

/// Squared circumradius, `f64::INFINITY` for degenerate triangles.
pub fn circumradius2(a: Real2, b: Real2, c: Real2) -> f64 {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let ex = c[0] - a[0];
    let ey = c[1] - a[1];

    let bl = dx * dx + dy * dy;
    let cl = ex * ex + ey * ey;
    let d = 0.5 / (dx * ey - dy * ex);

    let x = (ey * bl - dy * cl) * d;
    let y = (dx * cl - ex * bl) * d;
    let r = x * x + y * y;
    if r.is_finite() { r } else { f64::INFINITY }
}

pub fn circumcenter(a: Real2, b: Real2, c: Real2) -> Option<Real2> {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let ex = c[0] - a[0];
    let ey = c[1] - a[1];

    let bl = dx * dx + dy * dy;
    let cl = ex * ex + ey * ey;
    let det = dx * ey - dy * ex;
    if det == 0.0 {
        return None;
    }
    let d = 0.5 / det;

    let x = a[0] + (ey * bl - dy * cl) * d;
    let y = a[1] + (dx * cl - ex * bl) * d;
    (x.is_finite() && y.is_finite()).then_some([x, y])
}

/// Interior angle at `b` in radians.
#[inline]
pub fn angle_at(a: Real2, b: Real2, c: Real2) -> f64 {
    let u = [a[0] - b[0], a[1] - b[1]];
    let v = [c[0] - b[0], c[1] - b[1]];
    let dot = u[0] * v[0] + u[1] * v[1];
    let det = u[0] * v[1] - u[1] * v[0];
    det.abs().atan2(dot)
}

/// Smallest interior angle and the corner (0, 1 or 2) where it sits.
pub fn min_angle(p: [Real2; 3]) -> (f64, usize) {
    let mut best = (f64::INFINITY, 0);
    for i in 0..3 {
        let a = angle_at(p[(i + 2) % 3], p[i], p[(i + 1) % 3]);
        if a < best.0 {
            best = (a, i);
        }
    }
    best
}

// monotonically increases with real angle,
// but doesn't need expensive trigonometry
#[inline]
pub fn pseudo_angle(dx: f64, dy: f64) -> f64 {
    let p = dx / (dx.abs() + dy.abs());
    if dy > 0.0 {
        (3.0 - p) / 4.0
    } else {
        (1.0 + p) / 4.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_triangle_constructions() {
        let (a, b, c) = ([0.0, 0.0], [2.0, 0.0], [0.0, 2.0]);
        assert_eq!(circumcenter(a, b, c), Some([1.0, 1.0]));
        assert!((circumradius2(a, b, c) - 2.0).abs() < 1e-12);
        assert_eq!(triangle_area(a, b, c), 2.0);
        let (angle, corner) = min_angle([a, b, c]);
        assert!((angle - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
        assert_ne!(corner, 0);
    }

    #[test]
    fn collinear_has_no_circumcenter() {
        assert_eq!(circumcenter([0.0, 0.0], [1.0, 1.0], [2.0, 2.0]), None);
        assert_eq!(circumradius2([0.0, 0.0], [1.0, 1.0], [2.0, 2.0]), f64::INFINITY);
    }
}
