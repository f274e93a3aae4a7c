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

use tracing::debug;

use crate::geometry::Point2;
use crate::geometry::util::{Real2, circumcenter, circumradius2, dist2, pseudo_angle};
use crate::kernel::predicates::{incircle, orient2d};
use crate::mesh::{BOUNDARY, HalfedgeMesh, next_halfedge, prev_halfedge};
use crate::numeric::scalar::Scalar;
use crate::status::Status;

/// Advancing convex hull of the sweep plus the scratch buffers of a build.
/// Kept between builds so repeated runs reuse the allocations.
#[derive(Clone, Debug, Default)]
pub struct SweepHull {
    prev: Vec<usize>,
    next: Vec<usize>,
    tri: Vec<usize>,
    hash: Vec<usize>,
    start: usize,
    center: Real2,
    real: Vec<Real2>,
    order: Vec<(usize, f64)>,
    edge_stack: Vec<usize>,
}

impl SweepHull {
    fn reset(&mut self, n: usize, center: Real2) {
        let hash_len = ((n as f64).sqrt().ceil() as usize).max(1);

        self.prev.clear();
        self.prev.resize(n, 0);
        self.next.clear();
        self.next.resize(n, 0);
        self.tri.clear();
        self.tri.resize(n, BOUNDARY);
        self.hash.clear();
        self.hash.resize(hash_len, BOUNDARY);
        self.edge_stack.clear();
        self.center = center;
    }

    #[inline]
    fn hash_key(&self, p: Real2) -> usize {
        let angle = pseudo_angle(p[0] - self.center[0], p[1] - self.center[1]);
        let len = self.hash.len();
        let k = (angle * len as f64).floor();
        if k.is_finite() && k >= 0.0 {
            (k as usize) % len
        } else {
            0
        }
    }

    #[inline]
    fn hash_edge(&mut self, p: Real2, i: usize) {
        let key = self.hash_key(p);
        self.hash[key] = i;
    }

    /// First hull edge `e -> next[e]` that has `p` strictly on its outer side,
    /// and whether edges before it may be visible too.
    fn find_visible_edge<T: Scalar>(
        &self,
        p: &Point2<T>,
        key_point: Real2,
        points: &[Point2<T>],
    ) -> Option<(usize, bool)> {
        let len = self.hash.len();
        let key = self.hash_key(key_point);
        let mut start = self.start;
        for j in 0..len {
            let s = self.hash[(key + j) % len];
            if s != BOUNDARY && s != self.next[s] {
                start = s;
                break;
            }
        }

        start = self.prev[start];
        let mut e = start;
        loop {
            let q = self.next[e];
            if orient2d(&points[e], &points[q], p).is_negative() {
                return Some((e, e == start));
            }
            e = q;
            if e == start {
                return None;
            }
        }
    }
}

/// Builds the Delaunay triangulation of `points` into `mesh`.
///
/// Exact duplicates are left out of the mesh. Fails with
/// [`Status::DegenerateInput`] when no three points span a triangle.
pub fn build<T: Scalar>(
    points: &[Point2<T>],
    mesh: &mut HalfedgeMesh,
    hull: &mut SweepHull,
) -> Result<(), Status> {
    mesh.clear();
    let n = points.len();
    if n < 3 {
        return Err(Status::DegenerateInput);
    }

    hull.real.clear();
    hull.real.extend(points.iter().map(Point2::to_real));

    let (i0, i1, i2) = find_seed_triangle(points, &hull.real).ok_or(Status::DegenerateInput)?;
    let (r0, r1, r2) = (hull.real[i0], hull.real[i1], hull.real[i2]);
    let center = circumcenter(r0, r1, r2).unwrap_or([
        (r0[0] + r1[0] + r2[0]) / 3.0,
        (r0[1] + r1[1] + r2[1]) / 3.0,
    ]);

    hull.reset(n, center);

    let mut order = std::mem::take(&mut hull.order);
    order.clear();
    order.extend(
        hull.real
            .iter()
            .enumerate()
            .map(|(i, &r)| (i, dist2(r, center))),
    );
    order.sort_unstable_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

    let cap = 2 * n;
    mesh.triangles.reserve(3 * cap);
    mesh.halfedges.reserve(3 * cap);
    mesh.constraints.reserve(3 * cap);

    // seed stored as (i1, i2, i0): halfedge 0 is i1 -> i2, 1 is i2 -> i0, 2 is i0 -> i1
    mesh.add_triangle(i1, i2, i0, BOUNDARY, BOUNDARY, BOUNDARY);

    hull.start = i0;
    hull.next[i0] = i1;
    hull.prev[i2] = i1;
    hull.next[i1] = i2;
    hull.prev[i0] = i2;
    hull.next[i2] = i0;
    hull.prev[i1] = i0;

    hull.tri[i1] = 0;
    hull.tri[i2] = 1;
    hull.tri[i0] = 2;

    hull.hash_edge(r0, i0);
    hull.hash_edge(r1, i1);
    hull.hash_edge(r2, i2);

    let mut skipped = 0usize;

    for &(i, _) in &order {
        if i == i0 || i == i1 || i == i2 {
            continue;
        }
        let p = &points[i];
        let pr = hull.real[i];

        let Some((mut e, walk_back)) = hull.find_visible_edge(p, pr, points) else {
            // duplicate of an inserted point
            skipped += 1;
            continue;
        };

        let t = mesh.add_triangle(e, i, hull.next[e], BOUNDARY, BOUNDARY, hull.tri[e]);
        hull.tri[i] = legalize(mesh, points, hull, t + 2);
        hull.tri[e] = t;

        let mut next = hull.next[e];
        loop {
            let q = hull.next[next];
            if !orient2d(&points[next], &points[q], p).is_negative() {
                break;
            }
            let t = mesh.add_triangle(next, i, q, hull.tri[i], BOUNDARY, hull.tri[next]);
            hull.tri[i] = legalize(mesh, points, hull, t + 2);
            hull.next[next] = next;
            next = q;
        }

        if walk_back {
            loop {
                let q = hull.prev[e];
                if !orient2d(&points[q], &points[e], p).is_negative() {
                    break;
                }
                let t = mesh.add_triangle(q, i, e, BOUNDARY, hull.tri[e], hull.tri[q]);
                legalize(mesh, points, hull, t + 2);
                hull.tri[q] = t;
                hull.next[e] = e;
                e = q;
            }
        }

        hull.prev[i] = e;
        hull.next[e] = i;
        hull.prev[next] = i;
        hull.next[i] = next;
        hull.start = e;

        hull.hash_edge(pr, i);
        let re = hull.real[e];
        hull.hash_edge(re, e);
    }

    hull.order = order;

    debug!(
        points = n,
        triangles = mesh.triangle_count(),
        skipped,
        "delaunay triangulation built"
    );
    Ok(())
}

/// Flips `a` and the edges behind it until every one of them is locally
/// Delaunay. Returns the halfedge that now holds the edge leaving the new point.
fn legalize<T: Scalar>(
    mesh: &mut HalfedgeMesh,
    points: &[Point2<T>],
    hull: &mut SweepHull,
    a: usize,
) -> usize {
    let mut a = a;
    let mut ar;
    hull.edge_stack.clear();

    loop {
        let b = mesh.halfedges[a];
        ar = prev_halfedge(a);

        if b == BOUNDARY {
            match hull.edge_stack.pop() {
                Some(next) => {
                    a = next;
                    continue;
                }
                None => break,
            }
        }

        let al = next_halfedge(a);
        let bl = prev_halfedge(b);

        let p0 = mesh.triangles[ar];
        let pr = mesh.triangles[a];
        let pl = mesh.triangles[al];
        let p1 = mesh.triangles[bl];

        if incircle(&points[p0], &points[pr], &points[pl], &points[p1]).is_positive() {
            if mesh.halfedges[bl] == BOUNDARY {
                // the hull edge held by bl moves to a
                let mut e = hull.start;
                loop {
                    if hull.tri[e] == bl {
                        hull.tri[e] = a;
                        break;
                    }
                    e = hull.prev[e];
                    if e == hull.start {
                        break;
                    }
                }
            }
            mesh.flip(a);
            hull.edge_stack.push(next_halfedge(b));
        } else {
            match hull.edge_stack.pop() {
                Some(next) => a = next,
                None => break,
            }
        }
    }

    ar
}

fn find_seed_triangle<T: Scalar>(
    points: &[Point2<T>],
    real: &[Real2],
) -> Option<(usize, usize, usize)> {
    let mut min = [f64::INFINITY; 2];
    let mut max = [f64::NEG_INFINITY; 2];
    for r in real.iter().filter(|r| r[0].is_finite() && r[1].is_finite()) {
        min = [min[0].min(r[0]), min[1].min(r[1])];
        max = [max[0].max(r[0]), max[1].max(r[1])];
    }
    let center = [0.5 * (min[0] + max[0]), 0.5 * (min[1] + max[1])];

    let closest = |to: Real2, skip: &dyn Fn(usize) -> bool| {
        let mut best = (f64::INFINITY, None);
        for (i, &r) in real.iter().enumerate() {
            if skip(i) {
                continue;
            }
            let d = dist2(r, to);
            if d < best.0 {
                best = (d, Some(i));
            }
        }
        best.1
    };

    let i0 = closest(center, &|_| false)?;
    let i1 = closest(real[i0], &|i| points[i] == points[i0])?;

    let mut best: Option<(f64, usize)> = None;
    for (i, p) in points.iter().enumerate() {
        if i == i0 || i == i1 || orient2d(&points[i0], &points[i1], p).is_zero() {
            continue;
        }
        let r = circumradius2(real[i0], real[i1], real[i]);
        if best.is_none_or(|(b, _)| r < b) {
            best = Some((r, i));
        }
    }
    let (_, i2) = best?;

    if orient2d(&points[i0], &points[i1], &points[i2]).is_negative() {
        Some((i0, i2, i1))
    } else {
        Some((i0, i1, i2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point2<f64>> {
        raw.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn unit_square_uses_diagonal_0_2() {
        let points = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let mut mesh = HalfedgeMesh::default();
        build(&points, &mut mesh, &mut SweepHull::default()).unwrap();
        assert_eq!(mesh.triangles, vec![1, 2, 0, 2, 3, 0]);
        assert_eq!(mesh.halfedges, vec![BOUNDARY, 5, BOUNDARY, BOUNDARY, BOUNDARY, 1]);
    }

    #[test]
    fn collinear_points_are_degenerate() {
        let points = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        let mut mesh = HalfedgeMesh::default();
        let r = build(&points, &mut mesh, &mut SweepHull::default());
        assert_eq!(r, Err(Status::DegenerateInput));
    }

    #[test]
    fn duplicates_are_skipped() {
        let points = pts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 0.0), (0.3, 0.3)]);
        let mut mesh = HalfedgeMesh::default();
        build(&points, &mut mesh, &mut SweepHull::default()).unwrap();
        assert_eq!(mesh.triangle_count(), 3);
        let uses_both = mesh.triangles.contains(&1) && mesh.triangles.contains(&3);
        assert!(!uses_both);
    }
}
