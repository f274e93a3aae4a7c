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

/// Coordinate transform applied before triangulation and undone afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Preprocessor {
    #[default]
    None,
    /// Translate the centroid of the positions to the origin.
    CenterOfMass,
    /// Translate to the centroid, rotate onto the principal axes and scale
    /// into `[-1, 1]`.
    Pca,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefinementThresholds {
    /// Largest allowed triangle area.
    pub area: f64,
    /// Smallest allowed interior angle in radians, within `[0, pi/4]`.
    pub angle: f64,
}

impl Default for RefinementThresholds {
    fn default() -> Self {
        Self {
            area: 1.0,
            angle: 5f64.to_radians(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangulationSettings {
    pub refine_mesh: bool,
    pub restore_boundary: bool,
    pub auto_holes_and_boundary: bool,
    pub validate_input: bool,
    pub preprocessor: Preprocessor,
    pub refinement_thresholds: RefinementThresholds,
    pub max_constraint_iterations: usize,
    pub max_refinement_iterations: usize,
    /// Log warnings and errors through `tracing`.
    pub verbose: bool,
}

impl Default for TriangulationSettings {
    fn default() -> Self {
        Self {
            refine_mesh: false,
            restore_boundary: false,
            auto_holes_and_boundary: false,
            validate_input: true,
            preprocessor: Preprocessor::None,
            refinement_thresholds: RefinementThresholds::default(),
            max_constraint_iterations: 1_000_000,
            max_refinement_iterations: 1_000_000,
            verbose: true,
        }
    }
}

impl TriangulationSettings {
    pub fn with_refinement(mut self, area: f64, angle: f64) -> Self {
        self.refine_mesh = true;
        self.refinement_thresholds = RefinementThresholds { area, angle };
        self
    }

    pub fn with_restore_boundary(mut self, on: bool) -> Self {
        self.restore_boundary = on;
        self
    }

    pub fn with_auto_holes_and_boundary(mut self, on: bool) -> Self {
        self.auto_holes_and_boundary = on;
        self
    }

    pub fn with_validation(mut self, on: bool) -> Self {
        self.validate_input = on;
        self
    }

    pub fn with_preprocessor(mut self, preprocessor: Preprocessor) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    pub fn with_max_constraint_iterations(mut self, n: usize) -> Self {
        self.max_constraint_iterations = n;
        self
    }

    pub fn with_max_refinement_iterations(mut self, n: usize) -> Self {
        self.max_refinement_iterations = n;
        self
    }

    pub fn with_verbose(mut self, on: bool) -> Self {
        self.verbose = on;
        self
    }
}
