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
use crate::geometry::util::Real2;
use crate::numeric::scalar::Scalar;
use crate::settings::Preprocessor;

/// Similarity transform `p -> scale * R * (p - center)` applied to the input
/// before triangulation and undone on the Steiner points afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    center: Real2,
    /// Rows are the new axes.
    rotation: [Real2; 2],
    scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        center: [0.0, 0.0],
        rotation: [[1.0, 0.0], [0.0, 1.0]],
        scale: 1.0,
    };

    /// Transform selected by `preprocessor`. Integer coordinates are never
    /// transformed since the rounding would move the input.
    pub fn for_points<T: Scalar>(preprocessor: Preprocessor, points: &[Point2<T>]) -> Self {
        if T::KIND.is_integer() || points.is_empty() {
            return Self::IDENTITY;
        }
        let transform = match preprocessor {
            Preprocessor::None => Self::IDENTITY,
            Preprocessor::CenterOfMass => Self::center_of_mass(points),
            Preprocessor::Pca => Self::pca(points),
        };
        debug!(?preprocessor, ?transform, "preprocessing transform");
        transform
    }

    pub fn center_of_mass<T: Scalar>(points: &[Point2<T>]) -> Self {
        Self {
            center: centroid(points),
            ..Self::IDENTITY
        }
    }

    /// Centers on the centroid, rotates onto the eigenvectors of the
    /// covariance matrix and scales uniformly into `[-1, 1]`.
    pub fn pca<T: Scalar>(points: &[Point2<T>]) -> Self {
        let center = centroid(points);
        let n = points.len() as f64;

        let (mut cxx, mut cxy, mut cyy) = (0.0, 0.0, 0.0);
        for p in points {
            let [x, y] = p.to_real();
            let (dx, dy) = (x - center[0], y - center[1]);
            cxx += dx * dx;
            cxy += dx * dy;
            cyy += dy * dy;
        }
        let (cxx, cxy, cyy) = (cxx / n, cxy / n, cyy / n);

        let theta = 0.5 * (2.0 * cxy).atan2(cxx - cyy);
        let (sin, cos) = theta.sin_cos();
        let rotation = [[cos, sin], [-sin, cos]];

        let mut t = Self {
            center,
            rotation,
            scale: 1.0,
        };
        let extent = points
            .iter()
            .map(|p| {
                let [x, y] = t.apply(p.to_real());
                x.abs().max(y.abs())
            })
            .fold(0.0, f64::max);
        if extent > 0.0 && extent.is_finite() {
            t.scale = 1.0 / extent;
        }
        t
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Factor by which areas grow under the transform.
    #[inline]
    pub fn area_scale(&self) -> f64 {
        self.scale * self.scale
    }

    #[inline]
    pub fn apply(&self, p: Real2) -> Real2 {
        let d = [p[0] - self.center[0], p[1] - self.center[1]];
        let [r0, r1] = self.rotation;
        [
            self.scale * (r0[0] * d[0] + r0[1] * d[1]),
            self.scale * (r1[0] * d[0] + r1[1] * d[1]),
        ]
    }

    #[inline]
    pub fn inverse(&self, p: Real2) -> Real2 {
        let q = [p[0] / self.scale, p[1] / self.scale];
        let [r0, r1] = self.rotation;
        [
            r0[0] * q[0] + r1[0] * q[1] + self.center[0],
            r0[1] * q[0] + r1[1] * q[1] + self.center[1],
        ]
    }

    pub fn apply_point<T: Scalar>(&self, p: &Point2<T>) -> Point2<T> {
        if self.is_identity() {
            return *p;
        }
        let [x, y] = self.apply(p.to_real());
        Point2::from_real(x, y)
    }

    pub fn inverse_point<T: Scalar>(&self, p: &Point2<T>) -> Point2<T> {
        if self.is_identity() {
            return *p;
        }
        let [x, y] = self.inverse(p.to_real());
        Point2::from_real(x, y)
    }
}

fn centroid<T: Scalar>(points: &[Point2<T>]) -> Real2 {
    let n = points.len().max(1) as f64;
    let [sx, sy] = points.iter().fold([0.0, 0.0], |[sx, sy], p| {
        let [x, y] = p.to_real();
        [sx + x, sy + y]
    });
    [sx / n, sy / n]
}
