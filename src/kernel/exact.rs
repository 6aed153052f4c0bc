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

use std::cmp::Ordering;
use std::ops::{Add, Mul, Sub};

use rug::Rational;

use crate::geometry::Point3d;

/// Arbitrary-precision rational backed by GMP. Every finite `f64` converts
/// without rounding, so sign tests on it are exact.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct ExactRational(pub Rational);

impl ExactRational {
    pub fn from_f64(v: f64) -> Option<Self> {
        Rational::from_f64(v).map(ExactRational)
    }

    pub fn sign(&self) -> Ordering {
        self.0.cmp0()
    }

    pub fn is_zero(&self) -> bool {
        self.sign() == Ordering::Equal
    }
}

impl<'a, 'b> Add<&'b ExactRational> for &'a ExactRational {
    type Output = ExactRational;

    fn add(self, rhs: &'b ExactRational) -> ExactRational {
        let mut result = self.0.clone();
        result += &rhs.0;
        ExactRational(result)
    }
}

impl<'a, 'b> Sub<&'b ExactRational> for &'a ExactRational {
    type Output = ExactRational;

    fn sub(self, rhs: &'b ExactRational) -> ExactRational {
        let mut result = self.0.clone();
        result -= &rhs.0;
        ExactRational(result)
    }
}

impl<'a, 'b> Mul<&'b ExactRational> for &'a ExactRational {
    type Output = ExactRational;

    fn mul(self, rhs: &'b ExactRational) -> ExactRational {
        let mut result = self.0.clone();
        result *= &rhs.0;
        ExactRational(result)
    }
}

type ExactVec = [ExactRational; 3];

fn exact_point(p: &Point3d) -> Option<ExactVec> {
    Some([
        ExactRational::from_f64(p.x)?,
        ExactRational::from_f64(p.y)?,
        ExactRational::from_f64(p.z)?,
    ])
}

fn sub(a: &ExactVec, b: &ExactVec) -> ExactVec {
    [&a[0] - &b[0], &a[1] - &b[1], &a[2] - &b[2]]
}

fn cross(u: &ExactVec, w: &ExactVec) -> ExactVec {
    [
        &(&u[1] * &w[2]) - &(&u[2] * &w[1]),
        &(&u[2] * &w[0]) - &(&u[0] * &w[2]),
        &(&u[0] * &w[1]) - &(&u[1] * &w[0]),
    ]
}

/// Exact normal `(b - a) × (c - a)`; `None` if a coordinate is not finite.
fn exact_normal(a: &Point3d, b: &Point3d, c: &Point3d) -> Option<ExactVec> {
    let (a, b, c) = (exact_point(a)?, exact_point(b)?, exact_point(c)?);
    Some(cross(&sub(&b, &a), &sub(&c, &a)))
}

/// Whether the three points are exactly collinear (zero-area triangle).
/// `None` when a coordinate is NaN or infinite.
pub fn is_degenerate(a: &Point3d, b: &Point3d, c: &Point3d) -> Option<bool> {
    let n = exact_normal(a, b, c)?;
    Some(n.iter().all(ExactRational::is_zero))
}
