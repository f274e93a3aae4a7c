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

//! Constrained Delaunay triangulation of planar point sets with exact
//! predicates, generic over `f32`, `f64`, `i32` and [`Fixed`] coordinates.
//!
//! The pipeline validates the input, optionally moves it into a local frame,
//! builds a Delaunay triangulation, inserts constraint edges, removes holes
//! and refines the result until it meets area and angle thresholds.

pub mod geometry;
pub mod kernel;
pub mod mesh;
pub mod numeric;
pub mod operations;
pub mod settings;
pub mod status;
pub mod triangulator;

pub use geometry::Point2;
pub use mesh::{BOUNDARY, ConstraintState, ConstraintType};
pub use numeric::{CoordinateKind, Fixed, Scalar};
pub use operations::triangulation::{InputData, InputView, OutputData};
pub use settings::{Preprocessor, RefinementThresholds, TriangulationSettings};
pub use status::Status;
pub use triangulator::{
    Dependency, Handle, TriangulationEngine, Triangulator, run, schedule, triangulate_into,
    validate,
};
