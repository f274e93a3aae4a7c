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

use tracing::debug;

use crate::geometry::Point2;
use crate::kernel::predicates::point_in_or_on_triangle;
use crate::mesh::{BOUNDARY, HalfedgeMesh};
use crate::numeric::scalar::Scalar;

/// First triangle containing `p`, if any.
pub fn locate<T: Scalar>(points: &[Point2<T>], mesh: &HalfedgeMesh, p: &Point2<T>) -> Option<usize> {
    if !p.is_finite() {
        return None;
    }
    (0..mesh.triangle_count()).find(|&t| {
        let [a, b, c] = mesh.corners(t);
        point_in_or_on_triangle(p, &points[a], &points[b], &points[c])
    })
}

/// Removes the regions reached from the hole seeds (and, with
/// `restore_boundary`, from the convex hull) without crossing a hole boundary.
pub fn plant_holes<T: Scalar>(
    points: &[Point2<T>],
    mesh: &mut HalfedgeMesh,
    seeds: &[Point2<T>],
    restore_boundary: bool,
) {
    let mut stack: Vec<usize> = seeds
        .iter()
        .filter_map(|s| locate(points, mesh, s))
        .collect();

    if restore_boundary {
        stack.extend(
            (0..mesh.halfedges.len())
                .filter(|&h| {
                    mesh.halfedges[h] == BOUNDARY && !mesh.constraints[h].is_hole_boundary()
                })
                .map(|h| h / 3),
        );
    }

    let mut removed = vec![false; mesh.triangle_count()];
    while let Some(t) = stack.pop() {
        if removed[t] {
            continue;
        }
        removed[t] = true;
        for h in 3 * t..3 * t + 3 {
            if mesh.constraints[h].is_hole_boundary() {
                continue;
            }
            let o = mesh.halfedges[h];
            if o != BOUNDARY && !removed[o / 3] {
                stack.push(o / 3);
            }
        }
    }

    let keep: Vec<bool> = removed.iter().map(|r| !r).collect();
    let before = mesh.triangle_count();
    mesh.retain_triangles(&keep);
    debug!(
        seeds = seeds.len(),
        restore_boundary,
        removed = before - mesh.triangle_count(),
        "holes planted"
    );
}

/// Keeps the triangles enclosed by an odd number of hole boundaries.
///
/// Nesting depth is a 0-1 breadth first search from outside the hull: stepping
/// over a hole boundary edge costs one, any other edge is free.
pub fn resolve_auto_holes(mesh: &mut HalfedgeMesh) {
    let count = mesh.triangle_count();
    let mut depth = vec![usize::MAX; count];
    let mut queue = VecDeque::new();

    for h in 0..mesh.halfedges.len() {
        if mesh.halfedges[h] != BOUNDARY {
            continue;
        }
        let t = h / 3;
        let d = usize::from(mesh.constraints[h].is_hole_boundary());
        if d < depth[t] {
            depth[t] = d;
            if d == 0 {
                queue.push_front(t);
            } else {
                queue.push_back(t);
            }
        }
    }

    while let Some(t) = queue.pop_front() {
        for h in 3 * t..3 * t + 3 {
            let o = mesh.halfedges[h];
            if o == BOUNDARY {
                continue;
            }
            let w = usize::from(mesh.constraints[h].is_hole_boundary());
            let n = o / 3;
            let d = depth[t] + w;
            if d < depth[n] {
                depth[n] = d;
                if w == 0 {
                    queue.push_front(n);
                } else {
                    queue.push_back(n);
                }
            }
        }
    }

    let keep: Vec<bool> = depth.iter().map(|&d| d != usize::MAX && d % 2 == 1).collect();
    mesh.retain_triangles(&keep);
    debug!(
        removed = count - mesh.triangle_count(),
        "holes and boundary resolved from constraint types"
    );
}
