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

use smallvec::SmallVec;

use crate::mesh::half_edge::{BOUNDARY, ConstraintState, next_halfedge, prev_halfedge};

/// Triangle mesh stored as flat index arrays.
///
/// Triangle `t` owns halfedges `3t`, `3t + 1` and `3t + 2`; halfedge `h` starts
/// at `triangles[h]` and ends at `triangles[next_halfedge(h)]`. `halfedges[h]`
/// is the opposite halfedge or [`BOUNDARY`], and `constraints[h]` the state of
/// the undirected edge.
#[derive(Clone, Debug, Default)]
pub struct HalfedgeMesh {
    pub triangles: Vec<usize>,
    pub halfedges: Vec<usize>,
    pub constraints: Vec<ConstraintState>,
}

/// Where the two edges moved by [`HalfedgeMesh::flip`] now live, plus the new
/// diagonal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Flip {
    /// New diagonal, from the apex of the first triangle to the apex of the second.
    pub diagonal: usize,
    /// Opposite halfedge of `diagonal`.
    pub diagonal_twin: usize,
    /// `(old, new)` halfedge slots of the two edges that changed place.
    pub moved: [(usize, usize); 2],
}

impl HalfedgeMesh {
    pub fn clear(&mut self) {
        self.triangles.clear();
        self.halfedges.clear();
        self.constraints.clear();
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    #[inline]
    pub fn origin(&self, h: usize) -> usize {
        self.triangles[h]
    }

    #[inline]
    pub fn destination(&self, h: usize) -> usize {
        self.triangles[next_halfedge(h)]
    }

    #[inline]
    pub fn apex(&self, h: usize) -> usize {
        self.triangles[prev_halfedge(h)]
    }

    #[inline]
    pub fn corners(&self, t: usize) -> [usize; 3] {
        [
            self.triangles[3 * t],
            self.triangles[3 * t + 1],
            self.triangles[3 * t + 2],
        ]
    }

    /// Pairs `a` and `b` as opposites; `b` may be [`BOUNDARY`].
    #[inline]
    pub fn link(&mut self, a: usize, b: usize) {
        self.halfedges[a] = b;
        if b != BOUNDARY {
            self.halfedges[b] = a;
        }
    }

    /// Appends triangle `(i0, i1, i2)` and links its halfedges to `a`, `b`, `c`.
    /// Returns the index of its first halfedge.
    pub fn add_triangle(
        &mut self,
        i0: usize,
        i1: usize,
        i2: usize,
        a: usize,
        b: usize,
        c: usize,
    ) -> usize {
        let t = self.triangles.len();
        self.triangles.extend_from_slice(&[i0, i1, i2]);
        self.halfedges.extend_from_slice(&[BOUNDARY; 3]);
        self.constraints
            .extend_from_slice(&[ConstraintState::Unconstrained; 3]);
        self.link(t, a);
        self.link(t + 1, b);
        self.link(t + 2, c);
        t
    }

    /// Sets the constraint of the undirected edge containing `h`.
    #[inline]
    pub fn set_constraint(&mut self, h: usize, state: ConstraintState) {
        self.constraints[h] = state;
        let o = self.halfedges[h];
        if o != BOUNDARY {
            self.constraints[o] = state;
        }
    }

    /// Replaces the diagonal shared by the triangles of `a` and its opposite.
    ///
    /// With `a: pr -> pl` in `(pr, pl, p0)` and its opposite in `(pl, pr, p1)`,
    /// the triangles become `(p1, pl, p0)` and `(p0, pr, p1)` in the same
    /// slots. The caller checks that the quadrilateral is strictly convex.
    pub fn flip(&mut self, a: usize) -> Flip {
        let b = self.halfedges[a];
        debug_assert_ne!(b, BOUNDARY);

        let ar = prev_halfedge(a);
        let bl = prev_halfedge(b);

        let p0 = self.triangles[ar];
        let p1 = self.triangles[bl];

        let hbl = self.halfedges[bl];
        let har = self.halfedges[ar];
        let cbl = self.constraints[bl];
        let car = self.constraints[ar];

        self.triangles[a] = p1;
        self.triangles[b] = p0;

        self.link(a, hbl);
        self.link(b, har);
        self.link(ar, bl);

        self.constraints[a] = cbl;
        self.constraints[b] = car;
        self.constraints[ar] = ConstraintState::Unconstrained;
        self.constraints[bl] = ConstraintState::Unconstrained;

        Flip {
            diagonal: ar,
            diagonal_twin: bl,
            moved: [(bl, a), (ar, b)],
        }
    }

    /// One outgoing halfedge per vertex, [`BOUNDARY`] for vertices in no triangle.
    pub fn vertex_halfedges(&self, vertex_count: usize) -> Vec<usize> {
        let mut out = vec![BOUNDARY; vertex_count];
        for (h, &v) in self.triangles.iter().enumerate() {
            if out[v] == BOUNDARY {
                out[v] = h;
            }
        }
        out
    }

    /// Outgoing halfedges of the vertex `triangles[start]`, counter-clockwise
    /// from `start` and then clockwise if the fan is open.
    pub fn outgoing(&self, start: usize) -> SmallVec<[usize; 12]> {
        let mut fan: SmallVec<[usize; 12]> = SmallVec::new();
        fan.push(start);

        let mut h = start;
        loop {
            let o = self.halfedges[prev_halfedge(h)];
            if o == BOUNDARY {
                break;
            }
            if o == start {
                return fan;
            }
            fan.push(o);
            h = o;
        }

        let mut h = start;
        loop {
            let o = self.halfedges[h];
            if o == BOUNDARY {
                break;
            }
            let n = next_halfedge(o);
            fan.push(n);
            h = n;
        }
        fan
    }

    /// Halfedge from `a` to `b`, if it exists.
    pub fn find_edge(&self, out: &[usize], a: usize, b: usize) -> Option<usize> {
        let start = *out.get(a)?;
        if start == BOUNDARY {
            return None;
        }
        self.outgoing(start)
            .into_iter()
            .find(|&h| self.destination(h) == b)
    }

    /// Some halfedge of the undirected edge `a`-`b`, if it exists.
    pub fn find_undirected(&self, out: &[usize], a: usize, b: usize) -> Option<usize> {
        self.find_edge(out, a, b)
            .or_else(|| self.find_edge(out, b, a))
    }

    /// Drops every triangle with `keep[t] == false`, preserving the order of
    /// the survivors. Neighbours of dropped triangles become boundary.
    pub fn retain_triangles(&mut self, keep: &[bool]) {
        let mut remap = vec![BOUNDARY; keep.len()];
        let mut kept = 0;
        for (t, &k) in keep.iter().enumerate() {
            if k {
                remap[t] = kept;
                kept += 1;
            }
        }
        if kept == keep.len() {
            return;
        }

        let mut w = 0;
        for (t, &k) in keep.iter().enumerate() {
            if !k {
                continue;
            }
            for i in 0..3 {
                let h = 3 * t + i;
                let o = self.halfedges[h];
                let mapped = if o == BOUNDARY || remap[o / 3] == BOUNDARY {
                    BOUNDARY
                } else {
                    3 * remap[o / 3] + o % 3
                };
                self.triangles[w] = self.triangles[h];
                self.halfedges[w] = mapped;
                self.constraints[w] = self.constraints[h];
                w += 1;
            }
        }
        self.triangles.truncate(w);
        self.halfedges.truncate(w);
        self.constraints.truncate(w);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> HalfedgeMesh {
        // (0,0) (1,0) (1,1) (0,1), diagonal 0-2
        let mut m = HalfedgeMesh::default();
        m.add_triangle(1, 2, 0, BOUNDARY, BOUNDARY, BOUNDARY);
        m.add_triangle(2, 3, 0, BOUNDARY, BOUNDARY, 1);
        m
    }

    #[test]
    fn flip_swaps_diagonal_and_keeps_symmetry() {
        let mut m = square();
        m.set_constraint(0, ConstraintState::Constrained);
        let f = m.flip(1);

        assert_eq!(m.origin(f.diagonal), 1);
        assert_eq!(m.destination(f.diagonal), 3);
        assert_eq!(m.halfedges[f.diagonal], f.diagonal_twin);
        for (h, &o) in m.halfedges.iter().enumerate() {
            if o != BOUNDARY {
                assert_eq!(m.halfedges[o], h);
            }
        }
        // the constrained edge 1-2 moved with its slot
        let out = m.vertex_halfedges(4);
        let h = m.find_edge(&out, 1, 2).unwrap();
        assert_eq!(m.constraints[h], ConstraintState::Constrained);
    }

    #[test]
    fn retain_remaps_opposites() {
        let mut m = square();
        m.retain_triangles(&[false, true]);
        assert_eq!(m.triangles, vec![2, 3, 0]);
        assert_eq!(m.halfedges, vec![BOUNDARY; 3]);
    }

    #[test]
    fn outgoing_fan_of_boundary_vertex() {
        let m = square();
        let out = m.vertex_halfedges(4);
        let fan = m.outgoing(out[0]);
        let mut ends: Vec<usize> = fan.iter().map(|&h| m.destination(h)).collect();
        ends.sort_unstable();
        // 0-3 only exists as the incoming boundary halfedge 3 -> 0
        assert_eq!(ends, vec![1, 2]);
        assert_eq!(m.find_undirected(&out, 0, 3), Some(4));
    }
}
