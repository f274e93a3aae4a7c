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

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use triangulator::kernel::incircle;
use triangulator::{
    BOUNDARY, Fixed, InputData, InputView, OutputData, Point2, Scalar, Status,
    TriangulationEngine, TriangulationSettings, run,
};

fn pts(raw: &[(f64, f64)]) -> Vec<Point2<f64>> {
    raw.iter().map(|&(x, y)| Point2::new(x, y)).collect()
}

fn settings() -> TriangulationSettings {
    TriangulationSettings::default().with_verbose(false)
}

fn triangle_sets(triangles: &[usize]) -> Vec<[usize; 3]> {
    let mut sets: Vec<[usize; 3]> = triangles
        .chunks_exact(3)
        .map(|t| {
            let mut s = [t[0], t[1], t[2]];
            s.sort_unstable();
            s
        })
        .collect();
    sets.sort_unstable();
    sets
}

fn assert_symmetric(out: &OutputData<impl Scalar>) {
    assert_eq!(out.triangles.len(), out.halfedges.len());
    assert_eq!(out.triangles.len(), out.constraint_states.len());
    for (h, &o) in out.halfedges.iter().enumerate() {
        if o != BOUNDARY {
            assert_eq!(out.halfedges[o], h, "halfedge {h} is not symmetric");
            assert_eq!(out.triangles[h], out.triangles[3 * (o / 3) + (o + 1) % 3]);
            assert_eq!(out.constraint_states[h], out.constraint_states[o]);
        }
    }
}

fn assert_delaunay<T: Scalar>(out: &OutputData<T>) {
    let p = &out.positions;
    for (h, &o) in out.halfedges.iter().enumerate() {
        if o == BOUNDARY {
            continue;
        }
        let t = 3 * (h / 3);
        let apex = out.triangles[3 * (o / 3) + (o + 2) % 3];
        let s = incircle(
            &p[out.triangles[t]],
            &p[out.triangles[t + 1]],
            &p[out.triangles[t + 2]],
            &p[apex],
        );
        assert!(!s.is_positive(), "edge {h} is not locally Delaunay");
    }
}

#[test]
fn test_unit_square() {
    let input = InputData::new(pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]));
    let out = run(&input, &settings());
    assert_eq!(out.status, Status::Ok);
    assert_eq!(triangle_sets(&out.triangles), vec![[0, 1, 2], [0, 2, 3]]);
    assert_eq!(out.positions, input.positions);
    assert_symmetric(&out);
}

#[test]
fn test_triangles_are_counter_clockwise() {
    let input = InputData::new(pts(&[
        (0.0, 0.0),
        (3.0, 0.5),
        (4.0, 3.0),
        (1.0, 4.0),
        (-1.0, 2.0),
        (1.5, 1.5),
    ]));
    let out = run(&input, &settings());
    for t in out.triangles.chunks_exact(3) {
        let p = &out.positions;
        assert!(triangulator::kernel::orient2d(&p[t[0]], &p[t[1]], &p[t[2]]).is_positive());
    }
}

#[test]
fn test_random_points_are_delaunay() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..5 {
        let positions: Vec<Point2<f64>> = (0..300)
            .map(|_| Point2::new(rng.random_range(-10.0..10.0), rng.random_range(-10.0..10.0)))
            .collect();
        let out = run(&InputData::new(positions), &settings());
        assert_eq!(out.status, Status::Ok);
        assert_symmetric(&out);
        assert_delaunay(&out);

        let boundary = out.halfedges.iter().filter(|&&o| o == BOUNDARY).count();
        // Euler: T = 2n - 2 - h
        assert_eq!(out.triangle_count(), 2 * 300 - 2 - boundary);
    }
}

#[test]
fn test_integer_grid_with_cocircular_points() {
    let positions: Vec<Point2<i32>> = (0..6)
        .flat_map(|y| (0..6).map(move |x| Point2::new(x * 1000, y * 1000)))
        .collect();
    let out = run(&InputData::new(positions), &settings());
    assert_eq!(out.status, Status::Ok);
    assert_eq!(out.triangle_count(), 50);
    assert_symmetric(&out);
    assert_delaunay(&out);
}

#[test]
fn test_large_integer_coordinates() {
    let m = i32::MAX - 1;
    let positions: Vec<Point2<i32>> = vec![
        Point2::new(-m, -m),
        Point2::new(m, -m),
        Point2::new(m, m),
        Point2::new(-m, m),
        Point2::new(1, 3),
        Point2::new(-7, 2),
    ];
    let out = run(&InputData::new(positions), &settings());
    assert_eq!(out.status, Status::Ok);
    assert_eq!(out.triangle_count(), 6);
    assert_delaunay(&out);
}

#[test]
fn test_single_and_fixed_precision() {
    let square = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.25, 0.5)];

    let f32_positions: Vec<Point2<f32>> = square
        .iter()
        .map(|&(x, y)| Point2::new(x as f32, y as f32))
        .collect();
    let out = run(&InputData::new(f32_positions), &settings());
    assert_eq!(out.status, Status::Ok);
    assert_eq!(out.triangle_count(), 4);

    let fixed_positions: Vec<Point2<Fixed>> =
        square.iter().map(|&(x, y)| Point2::from_real(x, y)).collect();
    let out = run(&InputData::new(fixed_positions), &settings());
    assert_eq!(out.status, Status::Ok);
    assert_eq!(out.triangle_count(), 4);
    assert_delaunay(&out);
}

#[test]
fn test_duplicates_without_validation_are_left_out() {
    let input = InputData::new(pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (0.0, 1.0)]));
    let out = run(&input, &settings().with_validation(false));
    assert_eq!(out.status, Status::Ok);
    assert_eq!(out.triangle_count(), 1);
    assert_eq!(out.positions.len(), 4);
}

#[test]
fn test_collinear_without_validation_is_degenerate() {
    let input = InputData::new(pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (5.0, 5.0)]));
    let out = run(&input, &settings().with_validation(false));
    assert_eq!(out.status, Status::DegenerateInput);
    assert!(out.triangles.is_empty());
}

#[test]
fn test_engine_reuses_buffers() {
    let mut engine = TriangulationEngine::new();
    let mut out = OutputData::default();
    let s = settings();

    let big: Vec<Point2<f64>> = (0..20)
        .flat_map(|i| (0..20).map(move |j| Point2::new(i as f64, j as f64 + 0.01 * i as f64)))
        .collect();
    assert_eq!(engine.triangulate_into(InputView::new(&big), &s, &mut out), Status::Ok);
    let capacity = out.triangles.capacity();
    let expected = run(&InputData::new(big.clone()), &s);
    assert_eq!(out.triangles, expected.triangles);
    assert_eq!(out.halfedges, expected.halfedges);

    let small = pts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
    assert_eq!(engine.triangulate_into(InputView::new(&small), &s, &mut out), Status::Ok);
    assert_eq!(out.triangle_count(), 1);
    assert_eq!(out.positions.len(), 3);
    assert_eq!(out.triangles.capacity(), capacity);
}
