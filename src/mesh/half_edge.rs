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

/// Opposite of a halfedge on the mesh boundary.
pub const BOUNDARY: usize = usize::MAX;

#[inline(always)]
pub fn next_halfedge(h: usize) -> usize {
    if h % 3 == 2 { h - 2 } else { h + 1 }
}

#[inline(always)]
pub fn prev_halfedge(h: usize) -> usize {
    if h % 3 == 0 { h + 2 } else { h - 1 }
}

/// Constraint carried by an undirected mesh edge (both halfedges agree).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ConstraintState {
    #[default]
    Unconstrained,
    Constrained,
    ConstrainedAndHoleBoundary,
}

impl ConstraintState {
    #[inline]
    pub fn is_constrained(self) -> bool {
        self != ConstraintState::Unconstrained
    }

    #[inline]
    pub fn is_hole_boundary(self) -> bool {
        self == ConstraintState::ConstrainedAndHoleBoundary
    }
}

/// Tag of an input constraint edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConstraintType {
    /// Forced into the mesh, ignored by hole resolution.
    Constrained,
    /// Forced into the mesh and separates kept from removed regions.
    #[default]
    ConstrainedAndHoleBoundary,
}

impl From<ConstraintType> for ConstraintState {
    fn from(t: ConstraintType) -> Self {
        match t {
            ConstraintType::Constrained => ConstraintState::Constrained,
            ConstraintType::ConstrainedAndHoleBoundary => {
                ConstraintState::ConstrainedAndHoleBoundary
            }
        }
    }
}
