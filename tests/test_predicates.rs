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

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rug::Rational;

use triangulator::kernel::{
    Sign, are_collinear, incircle, is_point_on_open_segment, orient2d, point_in_or_on_triangle,
    segments_cross,
};
use triangulator::{Fixed, Point2};

fn q(v: f64) -> Rational {
    Rational::from_f64(v).unwrap()
}

fn sign(v: &Rational) -> Sign {
    match v.cmp0() {
        Ordering::Greater => Sign::Positive,
        Ordering::Less => Sign::Negative,
        Ordering::Equal => Sign::Zero,
    }
}

fn exact_orient(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> Sign {
    let abx = q(b[0]) - q(a[0]);
    let aby = q(b[1]) - q(a[1]);
    let acx = q(c[0]) - q(a[0]);
    let acy = q(c[1]) - q(a[1]);
    sign(&(abx * acy - aby * acx))
}

fn exact_incircle(a: [f64; 2], b: [f64; 2], c: [f64; 2], d: [f64; 2]) -> Sign {
    let rel = |p: [f64; 2]| (q(p[0]) - q(d[0]), q(p[1]) - q(d[1]));
    let (ax, ay) = rel(a);
    let (bx, by) = rel(b);
    let (cx, cy) = rel(c);
    let lift = |x: &Rational, y: &Rational| Rational::from(x * x) + Rational::from(y * y);
    let cross = |x0: &Rational, y0: &Rational, x1: &Rational, y1: &Rational| {
        Rational::from(x0 * y1) - Rational::from(x1 * y0)
    };
    let det = lift(&ax, &ay) * cross(&bx, &by, &cx, &cy)
        + lift(&bx, &by) * cross(&cx, &cy, &ax, &ay)
        + lift(&cx, &cy) * cross(&ax, &ay, &bx, &by);
    sign(&det)
}

fn p(x: f64, y: f64) -> Point2<f64> {
    Point2::new(x, y)
}

#[test]
fn test_orientation_basics() {
    assert_eq!(orient2d(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0)), Sign::Positive);
    assert_eq!(orient2d(&p(0.0, 0.0), &p(0.0, 1.0), &p(1.0, 0.0)), Sign::Negative);
    assert!(are_collinear(&p(0.0, 0.0), &p(1.0, 1.0), &p(2.0, 2.0)));
}

#[test]
fn test_near_collinear_matches_exact() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..2000 {
        let a = [rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)];
        let b = [rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)];
        let t: f64 = rng.random_range(0.0..1.0);
        let c = [a[0] + t * (b[0] - a[0]), a[1] + t * (b[1] - a[1])];
        let got = orient2d(&p(a[0], a[1]), &p(b[0], b[1]), &p(c[0], c[1]));
        assert_eq!(got, exact_orient(a, b, c), "{a:?} {b:?} {c:?}");
    }
}

#[test]
fn test_near_cocircular_matches_exact() {
    let mut rng = StdRng::seed_from_u64(12);
    for _ in 0..1000 {
        let on_circle = |angle: f64| [angle.cos(), angle.sin()];
        let mut angles: Vec<f64> = (0..4)
            .map(|_| rng.random_range(0.0..std::f64::consts::TAU))
            .collect();
        angles[..3].sort_by(f64::total_cmp);
        let [a, b, c, d] = [
            on_circle(angles[0]),
            on_circle(angles[1]),
            on_circle(angles[2]),
            on_circle(angles[3]),
        ];
        let got = incircle(&p(a[0], a[1]), &p(b[0], b[1]), &p(c[0], c[1]), &p(d[0], d[1]));
        assert_eq!(got, exact_incircle(a, b, c, d));
    }
}

#[test]
fn test_integer_extremes_do_not_overflow() {
    let m = i32::MAX;
    let a = Point2::<i32>::new(-m, -m);
    let b = Point2::new(m, -m);
    let c = Point2::new(m, m);
    let d = Point2::new(-m, m);
    assert_eq!(orient2d(&a, &b, &c), Sign::Positive);
    assert_eq!(incircle(&a, &b, &c, &d), Sign::Zero);
    assert_eq!(incircle(&a, &b, &c, &Point2::new(0, 0)), Sign::Positive);
    assert_eq!(incircle(&a, &b, &c, &Point2::new(m, m - 1)), Sign::Positive);
    assert!(are_collinear(&a, &Point2::new(0, 0), &c));
}

#[test]
fn test_fixed_point_predicates() {
    let a = Point2::<Fixed>::from_real(0.0, 0.0);
    let b = Point2::<Fixed>::from_real(1.5, 0.0);
    let c = Point2::<Fixed>::from_real(0.0, 1.5);
    assert_eq!(orient2d(&a, &b, &c), Sign::Positive);
    assert_eq!(
        incircle(&a, &b, &c, &Point2::<Fixed>::from_real(1.5, 1.5)),
        Sign::Zero
    );
    assert_eq!(
        incircle(&a, &b, &c, &Point2::<Fixed>::from_real(0.5, 0.5)),
        Sign::Positive
    );
}

#[test]
fn test_segment_predicates() {
    let (a, b) = (p(0.0, 0.0), p(2.0, 2.0));
    assert!(segments_cross(&a, &b, &p(0.0, 2.0), &p(2.0, 0.0)));
    // touching at an endpoint is not a crossing
    assert!(!segments_cross(&a, &b, &p(1.0, 1.0), &p(2.0, 0.0)));
    // collinear overlap is not a proper crossing either
    assert!(!segments_cross(&a, &b, &p(1.0, 1.0), &p(3.0, 3.0)));

    assert!(is_point_on_open_segment(&p(1.0, 1.0), &a, &b));
    assert!(!is_point_on_open_segment(&a, &a, &b));
    assert!(!is_point_on_open_segment(&p(3.0, 3.0), &a, &b));

    let (t0, t1, t2) = (p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0));
    assert!(point_in_or_on_triangle(&p(0.2, 0.2), &t0, &t1, &t2));
    assert!(point_in_or_on_triangle(&p(0.5, 0.0), &t0, &t1, &t2));
    assert!(!point_in_or_on_triangle(&p(0.6, 0.6), &t0, &t1, &t2));
}
