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
use crate::geometry::util::{Real2, circumcenter, midpoint, min_angle, triangle_area};
use crate::kernel::predicates::{incircle, orient2d};
use crate::mesh::{BOUNDARY, ConstraintState, HalfedgeMesh};
use crate::numeric::scalar::Scalar;
use crate::settings::RefinementThresholds;
use crate::status::Status;

/// Boundary edge of an insertion cavity, captured before the cavity is
/// overwritten.
#[derive(Clone, Copy, Debug)]
struct CavityEdge {
    from: usize,
    to: usize,
    outer: usize,
    state: ConstraintState,
    hull: bool,
}

/// Ruppert style refinement: splits encroached segments and inserts the
/// circumcenters of bad triangles until every triangle meets the thresholds.
pub struct Refiner<'a, T: Scalar> {
    points: &'a mut Vec<Point2<T>>,
    mesh: &'a mut HalfedgeMesh,
    area: f64,
    angle: f64,
    max_iterations: usize,
    iterations: usize,
    segments: VecDeque<usize>,
    bad: VecDeque<usize>,
    cavity: Vec<usize>,
    in_cavity: Vec<bool>,
    rim: Vec<CavityEdge>,
    rim_halfedges: Vec<usize>,
    /// Hull halfedges treated as segments while refining only.
    hull: Vec<bool>,
    skipped: usize,
}

impl<'a, T: Scalar> Refiner<'a, T> {
    pub fn new(
        points: &'a mut Vec<Point2<T>>,
        mesh: &'a mut HalfedgeMesh,
        thresholds: RefinementThresholds,
        max_iterations: usize,
    ) -> Self {
        Self {
            points,
            mesh,
            area: thresholds.area,
            angle: thresholds.angle,
            max_iterations,
            iterations: 0,
            segments: VecDeque::new(),
            bad: VecDeque::new(),
            cavity: Vec::new(),
            in_cavity: Vec::new(),
            rim: Vec::new(),
            rim_halfedges: Vec::new(),
            hull: Vec::new(),
            skipped: 0,
        }
    }

    /// Refines the mesh in place. Returns the number of Steiner points added.
    ///
    /// Fails with [`Status::RefinementMaxItersExceeded`] when the iteration
    /// cap stops the loop early, or with [`Status::RefinementIncomplete`]
    /// when some bad triangles could not be split. The mesh stays valid in
    /// both cases.
    pub fn refine(&mut self) -> Result<usize, Status> {
        let before = self.points.len();

        // hull edges act as segments
        self.hull.clear();
        self.hull.resize(self.mesh.halfedges.len(), false);
        for h in 0..self.mesh.halfedges.len() {
            if self.mesh.halfedges[h] == BOUNDARY && !self.mesh.constraints[h].is_constrained() {
                self.mesh.constraints[h] = ConstraintState::Constrained;
                self.hull[h] = true;
            }
        }

        for h in 0..self.mesh.halfedges.len() {
            let o = self.mesh.halfedges[h];
            if self.mesh.constraints[h].is_constrained() && (o == BOUNDARY || h < o) {
                self.segments.push_back(h);
            }
        }
        self.bad.extend(0..self.mesh.triangle_count());

        let result = self.drain_queues();
        let remaining = self.remaining_bad();
        self.release_hull();

        let added = self.points.len() - before;
        debug!(
            steiner_points = added,
            triangles = self.mesh.triangle_count(),
            iterations = self.iterations,
            skipped = self.skipped,
            remaining,
            "mesh refined"
        );
        result?;
        if remaining > 0 {
            return Err(Status::RefinementIncomplete(remaining));
        }
        Ok(added)
    }

    fn drain_queues(&mut self) -> Result<(), Status> {
        loop {
            if let Some(h) = self.next_encroached() {
                self.tick()?;
                if !self.split_segment(h) {
                    self.skipped += 1;
                }
                continue;
            }
            let Some(t) = self.bad.pop_front() else {
                return Ok(());
            };
            if t >= self.mesh.triangle_count() || !self.is_bad(t) {
                continue;
            }
            self.tick()?;
            if !self.split_triangle(t) {
                self.skipped += 1;
            }
        }
    }

    fn remaining_bad(&self) -> usize {
        (0..self.mesh.triangle_count())
            .filter(|&t| self.is_bad(t))
            .count()
    }

    /// Hull edges that came from no input constraint go back to unconstrained.
    fn release_hull(&mut self) {
        for (h, &marked) in self.hull.iter().enumerate() {
            if marked {
                self.mesh.constraints[h] = ConstraintState::Unconstrained;
            }
        }
        self.hull.clear();
    }

    #[inline]
    fn tick(&mut self) -> Result<(), Status> {
        self.iterations += 1;
        if self.iterations > self.max_iterations {
            return Err(Status::RefinementMaxItersExceeded);
        }
        Ok(())
    }

    #[inline]
    fn real(&self, v: usize) -> Real2 {
        self.points[v].to_real()
    }

    fn corners_real(&self, t: usize) -> [Real2; 3] {
        let [a, b, c] = self.mesh.corners(t);
        [self.real(a), self.real(b), self.real(c)]
    }

    fn is_bad(&self, t: usize) -> bool {
        let p = self.corners_real(t);
        if triangle_area(p[0], p[1], p[2]) > self.area {
            return true;
        }
        let (angle, corner) = min_angle(p);
        if angle >= self.angle {
            return false;
        }
        // a small angle between two segments cannot be improved
        let leaving = 3 * t + corner;
        let entering = 3 * t + (corner + 2) % 3;
        !(self.mesh.constraints[leaving].is_constrained()
            && self.mesh.constraints[entering].is_constrained())
    }

    /// `p` lies inside (or, with `inclusive`, on) the diametral circle of `h`.
    fn encroaches(&self, h: usize, p: Real2, inclusive: bool) -> bool {
        let a = self.real(self.mesh.origin(h));
        let b = self.real(self.mesh.destination(h));
        let dot = (a[0] - p[0]) * (b[0] - p[0]) + (a[1] - p[1]) * (b[1] - p[1]);
        if inclusive { dot <= 0.0 } else { dot < 0.0 }
    }

    fn next_encroached(&mut self) -> Option<usize> {
        while let Some(h) = self.segments.pop_front() {
            if h >= self.mesh.halfedges.len() || !self.mesh.constraints[h].is_constrained() {
                continue;
            }
            let o = self.mesh.halfedges[h];
            let apex = self.real(self.mesh.apex(h));
            if self.encroaches(h, apex, false) {
                return Some(h);
            }
            if o != BOUNDARY {
                let apex = self.real(self.mesh.apex(o));
                if self.encroaches(h, apex, false) {
                    return Some(h);
                }
            }
        }
        None
    }

    /// Inserts the midpoint of segment `h`. Returns false when the midpoint
    /// cannot be represented apart from the segment ends or the cavity around
    /// it is not star shaped.
    fn split_segment(&mut self, h: usize) -> bool {
        let a = self.mesh.origin(h);
        let b = self.mesh.destination(h);
        let [x, y] = midpoint(self.real(a), self.real(b));
        let m = Point2::from_real(x, y);
        if m == self.points[a] || m == self.points[b] {
            return false;
        }

        let mut seeds: SmallVec<[usize; 2]> = SmallVec::new();
        seeds.push(h / 3);
        let o = self.mesh.halfedges[h];
        if o != BOUNDARY {
            seeds.push(o / 3);
        }

        let split = (a, b, self.mesh.constraints[h], self.hull[h]);
        self.grow_cavity(&m, &seeds, Some(h));
        let inserted = self.is_star_shaped(&m, o == BOUNDARY);
        if inserted {
            self.commit(m, Some(split));
        }
        self.reset_cavity();
        inserted
    }

    /// Splits segment `h` in place of triangle `t`, which is queued again.
    fn split_instead(&mut self, h: usize, t: usize) -> bool {
        if !self.split_segment(h) {
            return false;
        }
        self.bad.push_back(t);
        true
    }

    /// Inserts the circumcenter of `t`, or splits the segment it crosses or
    /// encroaches. Returns false when neither is possible.
    fn split_triangle(&mut self, t: usize) -> bool {
        let [a, b, c] = self.corners_real(t);
        let Some([x, y]) = circumcenter(a, b, c) else {
            return false;
        };
        let center = Point2::from_real(x, y);

        // walk toward the circumcenter; a segment in the way is split instead
        let mut current = t;
        let mut steps = 0;
        loop {
            steps += 1;
            if steps > self.mesh.triangle_count() {
                return false;
            }
            let exit = (3 * current..3 * current + 3).find(|&h| {
                let from = &self.points[self.mesh.origin(h)];
                let to = &self.points[self.mesh.destination(h)];
                orient2d(from, to, &center).is_negative()
            });
            let Some(h) = exit else {
                break;
            };
            if self.mesh.constraints[h].is_constrained() || self.mesh.halfedges[h] == BOUNDARY {
                return self.split_instead(h, t);
            }
            current = self.mesh.halfedges[h] / 3;
        }

        if self
            .mesh
            .corners(current)
            .iter()
            .any(|&v| self.points[v] == center)
        {
            return false;
        }

        // a center on a segment of the rim encroaches it too
        self.grow_cavity(&center, &[current], None);
        let p = center.to_real();
        let encroached = self
            .rim_halfedges
            .iter()
            .copied()
            .filter(|&h| self.mesh.constraints[h].is_constrained() && self.encroaches(h, p, true))
            .min();
        if let Some(h) = encroached {
            self.reset_cavity();
            return self.split_instead(h, t);
        }

        let inserted = self.is_star_shaped(&center, false);
        if inserted {
            self.commit(center, None);
        }
        self.reset_cavity();
        inserted
    }

    /// Collects the triangles whose circumcircle holds `p`, without crossing
    /// segments, and the halfedges on the rim of that region.
    fn grow_cavity(&mut self, p: &Point2<T>, seeds: &[usize], split: Option<usize>) {
        let count = self.mesh.triangle_count();
        if self.in_cavity.len() < count {
            self.in_cavity.resize(count, false);
        }
        self.cavity.clear();
        self.rim_halfedges.clear();

        let split_twin = split.map(|h| self.mesh.halfedges[h]);
        let skip = |h: usize| Some(h) == split || Some(h) == split_twin;

        let mut stack: SmallVec<[usize; 16]> = seeds.iter().copied().collect();
        while let Some(t) = stack.pop() {
            if self.in_cavity[t] {
                continue;
            }
            self.in_cavity[t] = true;
            self.cavity.push(t);

            for h in 3 * t..3 * t + 3 {
                if skip(h) {
                    continue;
                }
                let o = self.mesh.halfedges[h];
                if o == BOUNDARY || self.mesh.constraints[h].is_constrained() {
                    continue;
                }
                let n = o / 3;
                if self.in_cavity[n] {
                    continue;
                }
                let [a, b, c] = self.mesh.corners(n);
                let pts = &self.points;
                if !incircle(&pts[a], &pts[b], &pts[c], p).is_negative() {
                    stack.push(n);
                }
            }
        }

        for &t in &self.cavity {
            for h in 3 * t..3 * t + 3 {
                if skip(h) {
                    continue;
                }
                let o = self.mesh.halfedges[h];
                if o == BOUNDARY || self.mesh.constraints[h].is_constrained() || !self.in_cavity[o / 3] {
                    self.rim_halfedges.push(h);
                }
            }
        }
    }

    fn reset_cavity(&mut self) {
        for &t in &self.cavity {
            self.in_cavity[t] = false;
        }
    }

    /// Every rim edge sees `p` on its left and the rim closes around the
    /// cavity (or, splitting a hull edge, runs between its two ends).
    fn is_star_shaped(&self, p: &Point2<T>, hull_split: bool) -> bool {
        let expected = self.cavity.len() + if hull_split { 1 } else { 2 };
        self.rim_halfedges.len() == expected
            && self.rim_halfedges.iter().all(|&h| {
                let a = &self.points[self.mesh.origin(h)];
                let b = &self.points[self.mesh.destination(h)];
                orient2d(a, b, p).is_positive()
            })
    }

    /// Replaces the cavity by the fan of triangles from the new vertex `p`.
    /// With `split`, the edges from `p` to the segment ends inherit its state
    /// and hull mark.
    fn commit(&mut self, p: Point2<T>, split: Option<(usize, usize, ConstraintState, bool)>) {
        let v = self.points.len();
        self.points.push(p);

        self.rim.clear();
        for &h in &self.rim_halfedges {
            self.rim.push(CavityEdge {
                from: self.mesh.origin(h),
                to: self.mesh.destination(h),
                outer: self.mesh.halfedges[h],
                state: self.mesh.constraints[h],
                hull: self.hull[h],
            });
        }

        self.cavity.sort_unstable();
        let mut slots: SmallVec<[usize; 16]> = self.cavity.iter().copied().collect();
        while slots.len() < self.rim.len() {
            slots.push(self.mesh.add_triangle(0, 0, 0, BOUNDARY, BOUNDARY, BOUNDARY) / 3);
        }
        self.hull.resize(self.mesh.halfedges.len(), false);

        for (e, &t) in self.rim.iter().zip(&slots) {
            let base = 3 * t;
            self.mesh.triangles[base..base + 3].copy_from_slice(&[e.from, e.to, v]);
            self.mesh.halfedges[base..base + 3].copy_from_slice(&[BOUNDARY; 3]);
            self.mesh.constraints[base..base + 3].copy_from_slice(&[
                e.state,
                ConstraintState::Unconstrained,
                ConstraintState::Unconstrained,
            ]);
            self.hull[base..base + 3].copy_from_slice(&[e.hull, false, false]);
            self.mesh.link(base, e.outer);
        }

        for (j, e) in self.rim.iter().enumerate() {
            if let Some(i) = self.rim.iter().position(|f| f.from == e.to) {
                self.mesh.link(3 * slots[j] + 1, 3 * slots[i] + 2);
            }
        }

        if let Some((a, b, state, hull)) = split {
            for (e, &t) in self.rim.iter().zip(&slots) {
                if e.to == a || e.to == b {
                    self.mesh.set_constraint(3 * t + 1, state);
                    self.hull[3 * t + 1] = hull;
                }
                if e.from == a || e.from == b {
                    self.mesh.set_constraint(3 * t + 2, state);
                    self.hull[3 * t + 2] = hull;
                }
            }
        }

        for &t in &slots {
            self.bad.push_back(t);
            for h in 3 * t..3 * t + 3 {
                if self.mesh.constraints[h].is_constrained() {
                    self.segments.push_back(h);
                }
            }
        }
    }
}

/// Refines `mesh` in place. The iteration cap and triangles left unsplit are
/// reported as warnings: the mesh stays valid but may still hold bad
/// triangles.
pub fn refine<T: Scalar>(
    points: &mut Vec<Point2<T>>,
    mesh: &mut HalfedgeMesh,
    thresholds: RefinementThresholds,
    max_iterations: usize,
    verbose: bool,
) -> Status {
    match Refiner::new(points, mesh, thresholds, max_iterations).refine() {
        Ok(_) => Status::Ok,
        Err(status) => {
            if verbose {
                warn!(max_iterations, "{status}");
            }
            status
        }
    }
}
