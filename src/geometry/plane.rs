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

use num_traits::Float;

use crate::geometry::{point_3::Point3, vector_3::Vector3};

/// Plane `n · x + d = 0`. The normal is not normalized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane<T: Float> {
    pub normal: Vector3<T>,
    pub d: T,
}

impl<T: Float> Plane<T> {
    pub fn new(normal: Vector3<T>, d: T) -> Self {
        Plane { normal, d }
    }

    /// Plane through three points, with normal `(p2 - p1) × (p3 - p1)`.
    pub fn from_points(p1: &Point3<T>, p2: &Point3<T>, p3: &Point3<T>) -> Self {
        let u = *p2 - *p1;
        let w = *p3 - *p1;
        let normal = u.cross(&w);
        let d = -normal.dot(&p1.as_vector());
        Plane::new(normal, d)
    }

    /// True when the normal has zero length and the plane is undefined.
    pub fn is_degenerate(&self) -> bool {
        self.normal.norm_squared().is_zero()
    }

    /// `A·x + B·y + C·z + D` for the point, unscaled.
    pub fn evaluate(&self, p: &Point3<T>) -> T {
        self.normal.dot(&p.as_vector()) + self.d
    }

    /// Signed perpendicular distance, or `None` for a degenerate plane.
    pub fn signed_distance(&self, p: &Point3<T>) -> Option<T> {
        let len = self.normal.norm();
        if len.is_zero() {
            return None;
        }
        Some(self.evaluate(p) / len)
    }

    pub fn distance(&self, p: &Point3<T>) -> Option<T> {
        self.signed_distance(p).map(|s| s.abs())
    }
}
