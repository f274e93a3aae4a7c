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

use thiserror::Error;

/// Outcome of a triangulation run.
///
/// Errors halt the pipeline; warnings are reported but the run continues.
#[derive(Clone, Copy, Debug, Default, Error, PartialEq, Eq, Hash)]
pub enum Status {
    #[default]
    #[error("ok")]
    Ok,

    #[error("positions length is {0}, at least 3 positions are required")]
    PositionsLengthLessThan3(usize),
    #[error("position {0} does not have finite coordinates")]
    PositionsMustBeFinite(usize),
    #[error("constraint edges length {0} is not divisible by 2")]
    ConstraintsLengthNotDivisibleBy2(usize),
    #[error("{constraints} constraint edges but {types} constraint edge types")]
    ConstraintArrayLengthMismatch { constraints: usize, types: usize },
    #[error("position {0} is duplicated")]
    DuplicatePosition(usize),
    #[error("constraint edges {0} and {1} are duplicates")]
    DuplicateConstraint(usize, usize),
    #[error("constraint edge {index} ({}, {}) is a self loop", .edge.0, .edge.1)]
    ConstraintSelfLoop { index: usize, edge: (usize, usize) },
    #[error(
        "constraint edge {index} ({}, {}) is out of bounds for {len} positions",
        .edge.0, .edge.1
    )]
    ConstraintOutOfBounds {
        index: usize,
        edge: (usize, usize),
        len: usize,
    },
    #[error("constraint edges {0} and {1} intersect")]
    ConstraintIntersection(usize, usize),
    #[error("hole seed {0} does not have finite coordinates")]
    HoleMustBeFinite(usize),
    #[error("mesh refinement is not supported for integer coordinates")]
    RefinementNotSupportedForCoordinateType,
    #[error("refinement area threshold must be positive")]
    RefinementThresholdAreaMustBePositive,
    #[error("refinement angle threshold must be in [0, pi/4]")]
    RefinementThresholdAngleOutOfRange,
    #[error("max constraint iterations must be positive")]
    SloanMaxItersMustBePositive,
    #[error("input positions are degenerate (collinear or fewer than 3 distinct points)")]
    DegenerateInput,
    #[error(
        "constraint restoration exceeded the iteration limit; \
         try to pre-process the input or increase max_constraint_iterations"
    )]
    SloanMaxItersExceeded,

    #[error("hole seeds are ignored when holes and boundary are resolved automatically")]
    RedundantHolesArray,
    #[error("boundary restoration requested without constraint edges")]
    ConstraintEdgesMissingForRestoreBoundary,
    #[error("automatic holes and boundary requested without constraint edges")]
    ConstraintEdgesMissingForAutoHolesAndBoundary,
    #[error("refinement stopped at the iteration limit; the mesh is valid but not fully refined")]
    RefinementMaxItersExceeded,
    #[error("refinement left {0} triangles above the quality thresholds")]
    RefinementIncomplete(usize),
}

impl Status {
    #[inline]
    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }

    #[inline]
    pub fn is_warning(self) -> bool {
        matches!(
            self,
            Status::RedundantHolesArray
                | Status::ConstraintEdgesMissingForRestoreBoundary
                | Status::ConstraintEdgesMissingForAutoHolesAndBoundary
                | Status::RefinementMaxItersExceeded
                | Status::RefinementIncomplete(_)
        )
    }

    #[inline]
    pub fn is_error(self) -> bool {
        !self.is_ok() && !self.is_warning()
    }

    /// Keeps the first error, else the first warning.
    #[inline]
    pub(crate) fn merge(self, other: Status) -> Status {
        if self.is_error() || (self.is_warning() && !other.is_error()) {
            self
        } else if other.is_ok() {
            self
        } else {
            other
        }
    }
}
