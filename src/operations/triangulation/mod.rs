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

pub mod constraints;
pub mod delaunay;
pub mod holes;
pub mod preprocess;
pub mod refine;
pub mod validate;

use tracing::{debug, error};

use crate::geometry::Point2;
use crate::mesh::{ConstraintState, ConstraintType, HalfedgeMesh};
use crate::numeric::scalar::Scalar;
use crate::settings::{RefinementThresholds, TriangulationSettings};
use crate::status::Status;

use self::delaunay::SweepHull;
use self::preprocess::Transform;

/// Owned input of a triangulation.
#[derive(Clone, Debug)]
pub struct InputData<T: Scalar> {
    pub positions: Vec<Point2<T>>,
    /// Flat index pairs.
    pub constraint_edges: Option<Vec<usize>>,
    /// One tag per constraint edge; every edge is a hole boundary when absent.
    pub constraint_edge_types: Option<Vec<ConstraintType>>,
    pub hole_seeds: Option<Vec<Point2<T>>>,
}

impl<T: Scalar> Default for InputData<T> {
    fn default() -> Self {
        Self {
            positions: Vec::new(),
            constraint_edges: None,
            constraint_edge_types: None,
            hole_seeds: None,
        }
    }
}

impl<T: Scalar> InputData<T> {
    pub fn new(positions: Vec<Point2<T>>) -> Self {
        Self {
            positions,
            ..Self::default()
        }
    }

    pub fn with_constraints(mut self, edges: Vec<usize>) -> Self {
        self.constraint_edges = Some(edges);
        self
    }

    pub fn with_constraint_types(mut self, types: Vec<ConstraintType>) -> Self {
        self.constraint_edge_types = Some(types);
        self
    }

    pub fn with_hole_seeds(mut self, seeds: Vec<Point2<T>>) -> Self {
        self.hole_seeds = Some(seeds);
        self
    }

    pub fn view(&self) -> InputView<'_, T> {
        InputView {
            positions: &self.positions,
            constraint_edges: self.constraint_edges.as_deref(),
            constraint_edge_types: self.constraint_edge_types.as_deref(),
            hole_seeds: self.hole_seeds.as_deref(),
        }
    }
}

/// Borrowed input, for callers that own their buffers.
#[derive(Clone, Copy, Debug)]
pub struct InputView<'a, T: Scalar> {
    pub positions: &'a [Point2<T>],
    pub constraint_edges: Option<&'a [usize]>,
    pub constraint_edge_types: Option<&'a [ConstraintType]>,
    pub hole_seeds: Option<&'a [Point2<T>]>,
}

impl<'a, T: Scalar> InputView<'a, T> {
    pub fn new(positions: &'a [Point2<T>]) -> Self {
        Self {
            positions,
            constraint_edges: None,
            constraint_edge_types: None,
            hole_seeds: None,
        }
    }

    pub fn with_constraints(mut self, edges: &'a [usize]) -> Self {
        self.constraint_edges = Some(edges);
        self
    }

    pub fn with_constraint_types(mut self, types: &'a [ConstraintType]) -> Self {
        self.constraint_edge_types = Some(types);
        self
    }

    pub fn with_hole_seeds(mut self, seeds: &'a [Point2<T>]) -> Self {
        self.hole_seeds = Some(seeds);
        self
    }
}

/// Result buffers of a triangulation.
///
/// `positions` starts with the input positions, unchanged, followed by the
/// Steiner points added by refinement. Triangles are counter-clockwise and
/// `halfedges[h]` is the opposite of halfedge `h` or
/// [`BOUNDARY`](crate::mesh::BOUNDARY). `constraint_states` only marks edges
/// of input constraints, including the pieces of constraints split by
/// refinement.
#[derive(Clone, Debug)]
pub struct OutputData<T: Scalar> {
    pub status: Status,
    pub positions: Vec<Point2<T>>,
    pub triangles: Vec<usize>,
    pub halfedges: Vec<usize>,
    pub constraint_states: Vec<ConstraintState>,
}

impl<T: Scalar> Default for OutputData<T> {
    fn default() -> Self {
        Self {
            status: Status::Ok,
            positions: Vec::new(),
            triangles: Vec::new(),
            halfedges: Vec::new(),
            constraint_states: Vec::new(),
        }
    }
}

impl<T: Scalar> OutputData<T> {
    /// Empties every buffer, keeping the allocations.
    pub fn clear(&mut self) {
        self.status = Status::Ok;
        self.positions.clear();
        self.triangles.clear();
        self.halfedges.clear();
        self.constraint_states.clear();
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }
}

/// Scratch state of the pipeline, reused between runs.
#[derive(Clone, Debug)]
pub struct Workspace<T: Scalar> {
    positions: Vec<Point2<T>>,
    seeds: Vec<Point2<T>>,
    mesh: HalfedgeMesh,
    hull: SweepHull,
}

impl<T: Scalar> Default for Workspace<T> {
    fn default() -> Self {
        Self {
            positions: Vec::new(),
            seeds: Vec::new(),
            mesh: HalfedgeMesh::default(),
            hull: SweepHull::default(),
        }
    }
}

/// Runs the whole pipeline: validation, preprocessing, Delaunay
/// triangulation, constraint insertion, hole removal, refinement and the
/// inverse transform. The outcome is left in `output.status`.
pub fn triangulate<T: Scalar>(
    input: InputView<'_, T>,
    settings: &TriangulationSettings,
    ws: &mut Workspace<T>,
    output: &mut OutputData<T>,
) {
    output.clear();

    let mut status = validate::validate(&input, settings);
    if status.is_error() {
        output.status = status;
        return;
    }

    let transform = Transform::for_points(settings.preprocessor, input.positions);
    ws.positions.clear();
    ws.positions
        .extend(input.positions.iter().map(|p| transform.apply_point(p)));
    ws.seeds.clear();
    ws.seeds.extend(
        input
            .hole_seeds
            .unwrap_or_default()
            .iter()
            .map(|p| transform.apply_point(p)),
    );

    if let Err(e) = delaunay::build(&ws.positions, &mut ws.mesh, &mut ws.hull) {
        fail(output, e, settings.verbose);
        return;
    }

    let edges = input.constraint_edges.unwrap_or_default();
    if !edges.is_empty() {
        let inserted = constraints::insert_constraints(
            &ws.positions,
            &mut ws.mesh,
            edges,
            input.constraint_edge_types,
            settings.max_constraint_iterations,
            settings.verbose,
        );
        if let Err(e) = inserted {
            status = status.merge(e);
            if settings.verbose {
                error!("{e}");
            }
            write_output(input, &transform, ws, status, output);
            return;
        }

        if settings.auto_holes_and_boundary {
            holes::resolve_auto_holes(&mut ws.mesh);
        } else if settings.restore_boundary || !ws.seeds.is_empty() {
            holes::plant_holes(
                &ws.positions,
                &mut ws.mesh,
                &ws.seeds,
                settings.restore_boundary,
            );
        }
    }

    if settings.refine_mesh {
        let thresholds = RefinementThresholds {
            area: settings.refinement_thresholds.area * transform.area_scale(),
            angle: settings.refinement_thresholds.angle,
        };
        status = status.merge(refine::refine(
            &mut ws.positions,
            &mut ws.mesh,
            thresholds,
            settings.max_refinement_iterations,
            settings.verbose,
        ));
    }

    write_output(input, &transform, ws, status, output);
    debug!(
        ?status,
        positions = output.positions.len(),
        triangles = output.triangle_count(),
        "triangulation finished"
    );
}

fn fail<T: Scalar>(output: &mut OutputData<T>, status: Status, verbose: bool) {
    if verbose {
        error!("{status}");
    }
    output.status = status;
}

fn write_output<T: Scalar>(
    input: InputView<'_, T>,
    transform: &Transform,
    ws: &Workspace<T>,
    status: Status,
    output: &mut OutputData<T>,
) {
    let n = input.positions.len();
    output.status = status;
    output.positions.extend_from_slice(input.positions);
    output
        .positions
        .extend(ws.positions[n..].iter().map(|p| transform.inverse_point(p)));
    output.triangles.extend_from_slice(&ws.mesh.triangles);
    output.halfedges.extend_from_slice(&ws.mesh.halfedges);
    output
        .constraint_states
        .extend_from_slice(&ws.mesh.constraints);
}
