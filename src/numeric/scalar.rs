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

use std::fmt::Debug;

use num_traits::{ToPrimitive, Zero};

use crate::kernel::{FixedKernel, FloatKernel, IntegerKernel, Kernel2};
use crate::numeric::fixed::Fixed;

/// Storage representation of a coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CoordinateKind {
    Float32,
    Float64,
    Int32,
    FixedPoint,
}

impl CoordinateKind {
    /// Integer kinds cannot host Steiner points and are never preprocessed.
    #[inline]
    pub fn is_integer(self) -> bool {
        matches!(self, CoordinateKind::Int32)
    }

    /// Only the float kinds can carry NaN or infinities.
    #[inline]
    pub fn can_be_non_finite(self) -> bool {
        matches!(self, CoordinateKind::Float32 | CoordinateKind::Float64)
    }
}

pub trait Scalar:
    Copy + Debug + PartialEq + PartialOrd + Zero + ToPrimitive + Send + Sync + 'static
{
    type Kernel: Kernel2<FT = Self>;

    const KIND: CoordinateKind;

    /// Nearest representable value; saturates for integer kinds.
    fn from_real(v: f64) -> Self;

    #[inline]
    fn to_real(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }

    #[inline]
    fn is_finite_value(self) -> bool {
        true
    }

    /// Equal values map to equal keys (`-0.0` and `0.0` included).
    fn key(self) -> u64;
}

impl Scalar for f64 {
    type Kernel = FloatKernel<f64>;
    const KIND: CoordinateKind = CoordinateKind::Float64;

    #[inline]
    fn from_real(v: f64) -> Self {
        v
    }

    #[inline]
    fn is_finite_value(self) -> bool {
        self.is_finite()
    }

    #[inline]
    fn key(self) -> u64 {
        if self == 0.0 { 0 } else { self.to_bits() }
    }
}

impl Scalar for f32 {
    type Kernel = FloatKernel<f32>;
    const KIND: CoordinateKind = CoordinateKind::Float32;

    #[inline]
    fn from_real(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn is_finite_value(self) -> bool {
        self.is_finite()
    }

    #[inline]
    fn key(self) -> u64 {
        if self == 0.0 { 0 } else { self.to_bits() as u64 }
    }
}

impl Scalar for i32 {
    type Kernel = IntegerKernel;
    const KIND: CoordinateKind = CoordinateKind::Int32;

    #[inline]
    fn from_real(v: f64) -> Self {
        // `as` saturates and maps NaN to zero
        v.round() as i32
    }

    #[inline]
    fn key(self) -> u64 {
        self as u32 as u64
    }
}

impl Scalar for Fixed {
    type Kernel = FixedKernel;
    const KIND: CoordinateKind = CoordinateKind::FixedPoint;

    #[inline]
    fn from_real(v: f64) -> Self {
        Fixed::from_f64(v)
    }

    #[inline]
    fn to_real(self) -> f64 {
        Fixed::to_f64(self)
    }

    #[inline]
    fn key(self) -> u64 {
        self.raw() as u64
    }
}
