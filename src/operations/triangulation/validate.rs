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

use std::f64::consts::FRAC_PI_4;

use ahash::AHashMap;
use rayon::prelude::*;
use tracing::{error, warn};

use crate::kernel::predicates::{orient2d, segments_cross};
use crate::numeric::scalar::Scalar;
use crate::operations::triangulation::InputView;
use crate::settings::TriangulationSettings;
use crate::status::Status;

/// Checks the settings and, when `validate_input` is on, the input.
/// Warnings about settings the input cannot honour are always reported.
///
/// Returns the first error, else the first warning, else [`Status::Ok`].
/// Logs the outcome through `tracing` when `verbose` is on.
pub fn validate<T: Scalar>(input: &InputView<'_, T>, settings: &TriangulationSettings) -> Status {
    let status = check_settings::<T>(settings)
        .and_then(|()| {
            if settings.validate_input {
                check_input(input)
            } else {
                Ok(())
            }
        })
        .map(|()| check_warnings(input, settings));
    let status = status.unwrap_or_else(|e| e);

    if settings.verbose {
        if status.is_error() {
            error!("{status}");
        } else if status.is_warning() {
            warn!("{status}");
        }
    }
    status
}

/// Settings checks run even with input validation turned off.
pub fn check_settings<T: Scalar>(settings: &TriangulationSettings) -> Result<(), Status> {
    if settings.refine_mesh {
        if T::KIND.is_integer() {
            return Err(Status::RefinementNotSupportedForCoordinateType);
        }
        let area = settings.refinement_thresholds.area;
        if !(area.is_finite() && area > 0.0) {
            return Err(Status::RefinementThresholdAreaMustBePositive);
        }
        if !(0.0..=FRAC_PI_4).contains(&settings.refinement_thresholds.angle) {
            return Err(Status::RefinementThresholdAngleOutOfRange);
        }
    }
    if settings.max_constraint_iterations == 0 {
        return Err(Status::SloanMaxItersMustBePositive);
    }
    Ok(())
}

/// Input checks in reporting order.
fn check_input<T: Scalar>(input: &InputView<'_, T>) -> Result<(), Status> {
    let positions = input.positions;
    let edges = input.constraint_edges.unwrap_or_default();

    if positions.len() < 3 {
        return Err(Status::PositionsLengthLessThan3(positions.len()));
    }

    if T::KIND.can_be_non_finite() {
        if let Some(i) = positions.iter().position(|p| !p.is_finite()) {
            return Err(Status::PositionsMustBeFinite(i));
        }
    }

    if edges.len() % 2 != 0 {
        return Err(Status::ConstraintsLengthNotDivisibleBy2(edges.len()));
    }

    if let Some(types) = input.constraint_edge_types {
        if types.len() != edges.len() / 2 {
            return Err(Status::ConstraintArrayLengthMismatch {
                constraints: edges.len() / 2,
                types: types.len(),
            });
        }
    }

    let mut seen = AHashMap::with_capacity(positions.len());
    let mut duplicate: Option<usize> = None;
    for (i, p) in positions.iter().enumerate() {
        match seen.get(&p.key()) {
            Some(&first) => duplicate = Some(duplicate.map_or(first, |d: usize| d.min(first))),
            None => {
                seen.insert(p.key(), i);
            }
        }
    }
    if let Some(i) = duplicate {
        return Err(Status::DuplicatePosition(i));
    }

    let mut seen_edges = AHashMap::with_capacity(edges.len() / 2);
    for (i, e) in edges.chunks_exact(2).enumerate() {
        let key = (e[0].min(e[1]), e[0].max(e[1]));
        if let Some(&first) = seen_edges.get(&key) {
            return Err(Status::DuplicateConstraint(first, i));
        }
        seen_edges.insert(key, i);
    }

    for (index, e) in edges.chunks_exact(2).enumerate() {
        if e[0] == e[1] {
            return Err(Status::ConstraintSelfLoop {
                index,
                edge: (e[0], e[1]),
            });
        }
    }

    for (index, e) in edges.chunks_exact(2).enumerate() {
        if e[0] >= positions.len() || e[1] >= positions.len() {
            return Err(Status::ConstraintOutOfBounds {
                index,
                edge: (e[0], e[1]),
                len: positions.len(),
            });
        }
    }

    // rows are scanned in parallel; the first crossing in row order wins
    let pairs: Vec<&[usize]> = edges.chunks_exact(2).collect();
    let crossing = (0..pairs.len()).into_par_iter().find_map_first(|i| {
        let a = pairs[i];
        (i + 1..pairs.len())
            .find(|&j| {
                let b = pairs[j];
                !a.iter().any(|v| b.contains(v))
                    && segments_cross(
                        &positions[a[0]],
                        &positions[a[1]],
                        &positions[b[0]],
                        &positions[b[1]],
                    )
            })
            .map(|j| (i, j))
    });
    if let Some((i, j)) = crossing {
        return Err(Status::ConstraintIntersection(i, j));
    }

    let seeds = input.hole_seeds.unwrap_or_default();
    if T::KIND.can_be_non_finite() {
        if let Some(i) = seeds.iter().position(|s| !s.is_finite()) {
            return Err(Status::HoleMustBeFinite(i));
        }
    }

    let a = &positions[0];
    let spans_plane = positions.iter().find(|&b| b != a).is_some_and(|b| {
        positions.iter().any(|c| !orient2d(a, b, c).is_zero())
    });
    if !spans_plane {
        return Err(Status::DegenerateInput);
    }
    Ok(())
}

fn check_warnings<T: Scalar>(input: &InputView<'_, T>, settings: &TriangulationSettings) -> Status {
    let no_edges = input.constraint_edges.is_none_or(<[usize]>::is_empty);
    let has_seeds = input.hole_seeds.is_some_and(|s| !s.is_empty());

    let mut warning = Status::Ok;
    if settings.auto_holes_and_boundary && no_edges {
        warning = warning.merge(Status::ConstraintEdgesMissingForAutoHolesAndBoundary);
    }
    if settings.restore_boundary && no_edges {
        warning = warning.merge(Status::ConstraintEdgesMissingForRestoreBoundary);
    }
    if has_seeds && (settings.auto_holes_and_boundary || no_edges) {
        warning = warning.merge(Status::RedundantHolesArray);
    }
    warning
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point2;

    fn view<'a>(positions: &'a [Point2<f64>], edges: Option<&'a [usize]>) -> InputView<'a, f64> {
        InputView {
            positions,
            constraint_edges: edges,
            constraint_edge_types: None,
            hole_seeds: None,
        }
    }

    fn square() -> Vec<Point2<f64>> {
        [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
            .iter()
            .map(|&(x, y)| Point2::new(x, y))
            .collect()
    }

    #[test]
    fn duplicate_reports_lowest_index() {
        let mut p = square();
        p.push(Point2::new(1.0, 1.0));
        p.push(Point2::new(0.0, 1.0));
        let s = TriangulationSettings::default().with_verbose(false);
        assert_eq!(validate(&view(&p, None), &s), Status::DuplicatePosition(2));
    }

    #[test]
    fn intersection_and_shared_endpoints() {
        let p = square();
        let s = TriangulationSettings::default().with_verbose(false);
        let crossing = [0, 2, 1, 3];
        assert_eq!(
            validate(&view(&p, Some(&crossing[..])), &s),
            Status::ConstraintIntersection(0, 1)
        );
        let chain = [0, 1, 1, 2, 2, 0];
        assert_eq!(validate(&view(&p, Some(&chain[..])), &s), Status::Ok);
    }

    #[test]
    fn settings_checked_before_input() {
        let p = [Point2::new(0.0, 0.0)];
        let s = TriangulationSettings::default()
            .with_refinement(-1.0, 0.1)
            .with_verbose(false);
        assert_eq!(
            validate(&view(&p, None), &s),
            Status::RefinementThresholdAreaMustBePositive
        );
    }

    #[test]
    fn collinear_is_degenerate() {
        let p: Vec<Point2<f64>> = (0..5).map(|i| Point2::new(i as f64, 2.0 * i as f64)).collect();
        let s = TriangulationSettings::default().with_verbose(false);
        assert_eq!(validate(&view(&p, None), &s), Status::DegenerateInput);
    }
}
