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

use triangulator::{
    ConstraintType, InputData, Point2, Status, TriangulationSettings, run, validate,
};

fn pts(raw: &[(f64, f64)]) -> Vec<Point2<f64>> {
    raw.iter().map(|&(x, y)| Point2::new(x, y)).collect()
}

fn square() -> Vec<Point2<f64>> {
    pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
}

fn settings() -> TriangulationSettings {
    TriangulationSettings::default().with_verbose(false)
}

#[test]
fn test_too_few_positions() {
    let out = run(&InputData::new(pts(&[(0.0, 0.0), (0.0, 1.0)])), &settings());
    assert_eq!(out.status, Status::PositionsLengthLessThan3(2));
    assert!(out.positions.is_empty());
    assert!(out.triangles.is_empty());
    assert!(out.halfedges.is_empty());
    assert!(out.constraint_states.is_empty());
}

#[test]
fn test_duplicate_position() {
    let input = InputData::new(pts(&[(0.0, 0.0), (0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]));
    assert_eq!(run(&input, &settings()).status, Status::DuplicatePosition(0));
}

#[test]
fn test_non_finite_positions() {
    let mut positions = square();
    positions[1] = Point2::new(f64::NAN, 0.0);
    positions[3] = Point2::new(f64::INFINITY, 0.0);
    let status = validate(&InputData::new(positions), &settings());
    assert_eq!(status, Status::PositionsMustBeFinite(1));
}

#[test]
fn test_constraint_array_shape() {
    let odd = InputData::new(square()).with_constraints(vec![0, 1, 2]);
    assert_eq!(
        validate(&odd, &settings()),
        Status::ConstraintsLengthNotDivisibleBy2(3)
    );

    let mismatched = InputData::new(square())
        .with_constraints(vec![0, 1, 1, 2])
        .with_constraint_types(vec![ConstraintType::Constrained]);
    assert_eq!(
        validate(&mismatched, &settings()),
        Status::ConstraintArrayLengthMismatch {
            constraints: 2,
            types: 1
        }
    );
}

#[test]
fn test_bad_constraint_edges() {
    let duplicate = InputData::new(square()).with_constraints(vec![0, 1, 2, 3, 1, 0]);
    assert_eq!(validate(&duplicate, &settings()), Status::DuplicateConstraint(0, 2));

    let self_loop = InputData::new(square()).with_constraints(vec![0, 1, 2, 2]);
    assert_eq!(
        validate(&self_loop, &settings()),
        Status::ConstraintSelfLoop {
            index: 1,
            edge: (2, 2)
        }
    );

    let out_of_bounds = InputData::new(square()).with_constraints(vec![0, 7]);
    assert_eq!(
        validate(&out_of_bounds, &settings()),
        Status::ConstraintOutOfBounds {
            index: 0,
            edge: (0, 7),
            len: 4
        }
    );

    let crossing = InputData::new(square()).with_constraints(vec![0, 1, 0, 2, 1, 3]);
    assert_eq!(validate(&crossing, &settings()), Status::ConstraintIntersection(1, 2));
}

#[test]
fn test_first_crossing_in_edge_order_is_reported() {
    let mut positions: Vec<Point2<f64>> = (0..40)
        .flat_map(|i| [Point2::new(0.0, i as f64), Point2::new(1.0, i as f64)])
        .collect();
    positions.extend(pts(&[(0.25, 10.5), (0.25, 20.5), (0.75, 5.5), (0.75, 6.5)]));
    let mut edges: Vec<usize> = (0..80).collect();
    edges.extend([80, 81, 82, 83]);

    // edge 40 crosses rows 11 to 20, edge 41 crosses row 6 only
    let input = InputData::new(positions).with_constraints(edges);
    for _ in 0..4 {
        assert_eq!(validate(&input, &settings()), Status::ConstraintIntersection(6, 41));
    }
}

#[test]
fn test_touching_constraints_are_valid() {
    let mut positions = square();
    positions.push(Point2::new(0.5, 0.0));
    // 2-4 ends on 0-1; only proper crossings are rejected
    let input = InputData::new(positions).with_constraints(vec![0, 1, 2, 4]);
    assert_eq!(validate(&input, &settings()), Status::Ok);
}

#[test]
fn test_non_finite_hole_seed() {
    let input = InputData::new(square())
        .with_constraints(vec![0, 1, 1, 2, 2, 0])
        .with_hole_seeds(vec![Point2::new(0.1, 0.1), Point2::new(0.5, f64::NAN)]);
    assert_eq!(validate(&input, &settings()), Status::HoleMustBeFinite(1));
}

#[test]
fn test_degenerate_input() {
    let input = InputData::new(pts(&[(0.0, 0.0), (1.0, 1.0), (3.0, 3.0), (-2.0, -2.0)]));
    assert_eq!(validate(&input, &settings()), Status::DegenerateInput);
}

#[test]
fn test_settings_errors() {
    let input = InputData::new(square());
    let cases = [
        (settings().with_refinement(0.0, 0.1), Status::RefinementThresholdAreaMustBePositive),
        (settings().with_refinement(f64::NAN, 0.1), Status::RefinementThresholdAreaMustBePositive),
        (settings().with_refinement(1.0, -0.1), Status::RefinementThresholdAngleOutOfRange),
        (settings().with_refinement(1.0, 1.0), Status::RefinementThresholdAngleOutOfRange),
        (settings().with_max_constraint_iterations(0), Status::SloanMaxItersMustBePositive),
    ];
    for (s, expected) in cases {
        assert_eq!(validate(&input, &s), expected);
        assert!(expected.is_error());
        // settings are checked even without input validation
        assert_eq!(run(&input, &s.with_validation(false)).status, expected);
    }
}

#[test]
fn test_hole_warnings() {
    let auto = settings().with_auto_holes_and_boundary(true);
    let out = run(&InputData::new(square()), &auto);
    assert_eq!(out.status, Status::ConstraintEdgesMissingForAutoHolesAndBoundary);
    assert!(out.status.is_warning());
    assert_eq!(out.triangle_count(), 2);

    let restore = settings().with_restore_boundary(true);
    assert_eq!(
        validate(&InputData::new(square()), &restore),
        Status::ConstraintEdgesMissingForRestoreBoundary
    );

    let redundant = InputData::new(square())
        .with_constraints(vec![0, 1, 1, 2, 2, 3, 3, 0])
        .with_hole_seeds(vec![Point2::new(0.5, 0.5)]);
    let out = run(&redundant, &auto);
    assert_eq!(out.status, Status::RedundantHolesArray);
    assert_eq!(out.triangle_count(), 2, "auto mode ignores the seed");

    // the first warning wins
    let both = InputData::new(square()).with_hole_seeds(vec![Point2::new(0.5, 0.5)]);
    assert_eq!(
        validate(&both, &auto),
        Status::ConstraintEdgesMissingForAutoHolesAndBoundary
    );
}

#[test]
fn test_warnings_survive_disabled_validation() {
    let s = settings().with_restore_boundary(true).with_validation(false);
    let out = run(&InputData::new(square()), &s);
    assert_eq!(out.status, Status::ConstraintEdgesMissingForRestoreBoundary);
    assert_eq!(out.triangle_count(), 2);
}

#[test]
fn test_status_display() {
    assert!(!Status::Ok.to_string().is_empty());
    assert!(Status::DuplicatePosition(3).to_string().contains('3'));
    assert!(!Status::Ok.is_warning() && !Status::Ok.is_error());
    assert!(Status::SloanMaxItersExceeded.is_error());
}
