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

use std::collections::VecDeque;

use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::geometry::Point2;
use crate::kernel::predicates::{incircle, is_point_on_open_segment, orient2d, segments_cross};
use crate::mesh::{
    BOUNDARY, ConstraintState, ConstraintType, Flip, HalfedgeMesh, next_halfedge, prev_halfedge,
};
use crate::numeric::scalar::Scalar;
use crate::status::Status;

enum Segment {
    Inserted,
    /// An existing vertex lies on the open segment; insert both halves.
    Split(usize),
    /// The segment cannot be recovered without breaking another constraint.
    Blocked,
}

/// Forces constraint edges into a Delaunay mesh by flipping away the edges
/// they cross, then restores the Delaunay property around them.
pub struct ConstraintInserter<'a, T: Scalar> {
    points: &'a [Point2<T>],
    mesh: &'a mut HalfedgeMesh,
    out: Vec<usize>,
    max_iterations: usize,
    iterations: usize,
    queue: VecDeque<usize>,
    new_edges: Vec<usize>,
    crossings: Vec<usize>,
}

impl<'a, T: Scalar> ConstraintInserter<'a, T> {
    pub fn new(points: &'a [Point2<T>], mesh: &'a mut HalfedgeMesh, max_iterations: usize) -> Self {
        let out = mesh.vertex_halfedges(points.len());
        Self {
            points,
            mesh,
            out,
            max_iterations,
            iterations: 0,
            queue: VecDeque::new(),
            new_edges: Vec::new(),
            crossings: Vec::new(),
        }
    }

    /// Inserts every edge of the flat `edges` array in input order. Returns
    /// the number of constraints that could not be recovered.
    pub fn insert_all(
        &mut self,
        edges: &[usize],
        types: Option<&[ConstraintType]>,
        verbose: bool,
    ) -> Result<usize, Status> {
        let n = self.points.len();
        let mut skipped = 0;

        for (index, pair) in edges.chunks_exact(2).enumerate() {
            let (a, b) = (pair[0], pair[1]);
            let state: ConstraintState = types
                .and_then(|t| t.get(index))
                .copied()
                .unwrap_or_default()
                .into();

            if a >= n || b >= n || a == b {
                if verbose {
                    warn!(index, a, b, "ignoring invalid constraint edge");
                }
                skipped += 1;
                continue;
            }

            if !self.insert(a, b, state)? {
                if verbose {
                    warn!(index, a, b, "constraint edge could not be recovered");
                }
                skipped += 1;
            }
        }

        debug!(
            constraints = edges.len() / 2,
            skipped, "constraint edges inserted"
        );
        Ok(skipped)
    }

    /// Inserts the constraint `a`-`b`, splitting it at vertices that lie on it.
    pub fn insert(&mut self, a: usize, b: usize, state: ConstraintState) -> Result<bool, Status> {
        self.iterations = 0;
        let mut recovered = true;
        let mut pending: SmallVec<[(usize, usize); 4]> = SmallVec::new();
        pending.push((a, b));

        while let Some((u, v)) = pending.pop() {
            match self.insert_segment(u, v, state)? {
                Segment::Inserted => {}
                Segment::Split(w) => {
                    pending.push((w, v));
                    pending.push((u, w));
                }
                Segment::Blocked => recovered = false,
            }
        }
        Ok(recovered)
    }

    fn insert_segment(&mut self, u: usize, v: usize, state: ConstraintState) -> Result<Segment, Status> {
        if self.out[u] == BOUNDARY || self.out[v] == BOUNDARY {
            return Ok(Segment::Blocked);
        }
        if let Some(h) = self.mesh.find_undirected(&self.out, u, v) {
            self.mesh.set_constraint(h, state);
            return Ok(Segment::Inserted);
        }

        match self.collect_crossings(u, v) {
            Segment::Inserted => {}
            other => return Ok(other),
        }

        self.remove_crossings(u, v)?;

        let Some(h) = self.mesh.find_undirected(&self.out, u, v) else {
            return Ok(Segment::Blocked);
        };
        self.mesh.set_constraint(h, state);

        self.restore_delaunay()?;
        Ok(Segment::Inserted)
    }

    /// Walks from `u` toward `v` and records every edge the segment crosses,
    /// each oriented from its right endpoint to its left one.
    fn collect_crossings(&mut self, u: usize, v: usize) -> Segment {
        let p = self.points;
        self.crossings.clear();

        let mut first = None;
        for h in self.mesh.outgoing(self.out[u]) {
            let w = self.mesh.destination(h);
            let x = self.mesh.apex(h);
            if is_point_on_open_segment(&p[w], &p[u], &p[v]) {
                return Segment::Split(w);
            }
            if is_point_on_open_segment(&p[x], &p[u], &p[v]) {
                return Segment::Split(x);
            }
            if orient2d(&p[u], &p[w], &p[v]).is_positive()
                && orient2d(&p[u], &p[x], &p[v]).is_negative()
            {
                first = Some(next_halfedge(h));
                break;
            }
        }
        let Some(mut c) = first else {
            return Segment::Blocked;
        };

        loop {
            if self.mesh.constraints[c].is_constrained() {
                return Segment::Blocked;
            }
            self.crossings.push(c);

            let o = self.mesh.halfedges[c];
            if o == BOUNDARY {
                return Segment::Blocked;
            }
            let y = self.mesh.apex(o);
            if y == v {
                return Segment::Inserted;
            }
            let side = orient2d(&p[u], &p[v], &p[y]);
            if side.is_zero() {
                return if is_point_on_open_segment(&p[y], &p[u], &p[v]) {
                    Segment::Split(y)
                } else {
                    Segment::Blocked
                };
            }
            c = if side.is_positive() {
                next_halfedge(o)
            } else {
                prev_halfedge(o)
            };
        }
    }

    fn remove_crossings(&mut self, u: usize, v: usize) -> Result<(), Status> {
        let p = self.points;
        self.queue.clear();
        self.queue.extend(self.crossings.iter().copied());
        self.new_edges.clear();

        while let Some(e) = self.queue.pop_front() {
            self.tick()?;

            let o = self.mesh.halfedges[e];
            let pr = self.mesh.origin(e);
            let pl = self.mesh.destination(e);
            let p0 = self.mesh.apex(e);
            let p1 = self.mesh.apex(o);

            let convex = orient2d(&p[p1], &p[pl], &p[p0]).is_positive()
                && orient2d(&p[p0], &p[pr], &p[p1]).is_positive();
            if !convex {
                self.queue.push_back(e);
                continue;
            }

            let f = self.flip(e);
            if segments_cross(&p[u], &p[v], &p[p0], &p[p1]) {
                self.queue.push_back(f.diagonal);
            } else {
                self.new_edges.push(f.diagonal);
            }
        }
        Ok(())
    }

    fn restore_delaunay(&mut self) -> Result<(), Status> {
        let p = self.points;
        let mut swapped = true;
        while swapped {
            swapped = false;
            for k in 0..self.new_edges.len() {
                let e = self.new_edges[k];
                if self.mesh.constraints[e].is_constrained() {
                    continue;
                }
                let o = self.mesh.halfedges[e];
                if o == BOUNDARY {
                    continue;
                }
                let pr = self.mesh.origin(e);
                let pl = self.mesh.destination(e);
                let p0 = self.mesh.apex(e);
                let p1 = self.mesh.apex(o);

                if !incircle(&p[pr], &p[pl], &p[p0], &p[p1]).is_positive() {
                    continue;
                }
                let convex = orient2d(&p[p1], &p[pl], &p[p0]).is_positive()
                    && orient2d(&p[p0], &p[pr], &p[p1]).is_positive();
                if !convex {
                    continue;
                }

                self.tick()?;
                let f = self.flip(e);
                self.new_edges[k] = f.diagonal;
                swapped = true;
            }
        }
        Ok(())
    }

    #[inline]
    fn tick(&mut self) -> Result<(), Status> {
        self.iterations += 1;
        if self.iterations > self.max_iterations {
            return Err(Status::SloanMaxItersExceeded);
        }
        Ok(())
    }

    /// Flips `e`, keeps the vertex table valid and follows the moved edges in
    /// the work lists.
    fn flip(&mut self, e: usize) -> Flip {
        let f = self.mesh.flip(e);
        let b = f.moved[1].1;
        for h in [e, next_halfedge(e), prev_halfedge(e), b, next_halfedge(b), prev_halfedge(b)] {
            self.out[self.mesh.triangles[h]] = h;
        }

        let relocate = |x: &mut usize| {
            for (old, new) in f.moved {
                if *x == old {
                    *x = new;
                    break;
                }
            }
        };
        self.queue.iter_mut().for_each(relocate);
        self.new_edges.iter_mut().for_each(relocate);
        f
    }
}

/// Inserts the constraint edges of a flat index array into `mesh`.
pub fn insert_constraints<T: Scalar>(
    points: &[Point2<T>],
    mesh: &mut HalfedgeMesh,
    edges: &[usize],
    types: Option<&[ConstraintType]>,
    max_iterations: usize,
    verbose: bool,
) -> Result<usize, Status> {
    ConstraintInserter::new(points, mesh, max_iterations).insert_all(edges, types, verbose)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::triangulation::delaunay::{SweepHull, build};

    fn mesh_of(points: &[Point2<f64>]) -> HalfedgeMesh {
        let mut mesh = HalfedgeMesh::default();
        build(points, &mut mesh, &mut SweepHull::default()).unwrap();
        mesh
    }

    #[test]
    fn flips_in_the_missing_diagonal() {
        // the Delaunay diagonal of this rhombus is 1-3
        let points: Vec<Point2<f64>> = [(0.0, 0.0), (2.0, -1.0), (4.0, 0.0), (2.0, 1.0)]
            .iter()
            .map(|&(x, y)| Point2::new(x, y))
            .collect();
        let mut mesh = mesh_of(&points);
        let skipped = insert_constraints(&points, &mut mesh, &[0, 2], None, 100, false).unwrap();
        assert_eq!(skipped, 0);

        let out = mesh.vertex_halfedges(4);
        let h = mesh.find_undirected(&out, 0, 2).unwrap();
        assert_eq!(mesh.constraints[h], ConstraintState::ConstrainedAndHoleBoundary);
        assert_eq!(mesh.constraints[mesh.halfedges[h]], ConstraintState::ConstrainedAndHoleBoundary);
    }

    #[test]
    fn splits_at_collinear_vertex() {
        let points: Vec<Point2<f64>> = [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (1.0, 1.0), (1.0, -1.0)]
            .iter()
            .map(|&(x, y)| Point2::new(x, y))
            .collect();
        let mut mesh = mesh_of(&points);
        let types = [ConstraintType::Constrained];
        insert_constraints(&points, &mut mesh, &[0, 2], Some(&types), 100, false).unwrap();

        let out = mesh.vertex_halfedges(5);
        for (a, b) in [(0, 1), (1, 2)] {
            let h = mesh.find_undirected(&out, a, b).unwrap();
            assert_eq!(mesh.constraints[h], ConstraintState::Constrained);
        }
    }
}
