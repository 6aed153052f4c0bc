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

use crate::{
    geometry::{Plane, Point3d},
    kernel,
};

/// One surface facet of the boundary mesh.
///
/// Side lengths and area are derived once at construction; the record is
/// immutable afterwards. `degenerate` is decided with exact arithmetic, so a
/// sliver whose float normal underflows is still told apart from a truly
/// collinear triple.
#[derive(Clone, Debug, PartialEq)]
pub struct Triangle {
    pub id: u64,
    pub v1: Point3d,
    pub v2: Point3d,
    pub v3: Point3d,
    /// `|v1 - v2|`
    pub a: f64,
    /// `|v1 - v3|`
    pub b: f64,
    /// `|v2 - v3|`
    pub c: f64,
    pub area: f64,
    pub degenerate: bool,
}

impl Triangle {
    pub fn new(id: u64, v1: Point3d, v2: Point3d, v3: Point3d) -> Self {
        let a = v1.distance_to(&v2);
        let b = v1.distance_to(&v3);
        let c = v2.distance_to(&v3);
        let area = heron_area(a, b, c);
        let degenerate = kernel::is_degenerate(&v1, &v2, &v3).unwrap_or(false);
        Triangle {
            id,
            v1,
            v2,
            v3,
            a,
            b,
            c,
            area,
            degenerate,
        }
    }

    /// Rebuilds a triangle from its flat `[v1.x, v1.y, v1.z, v2.x, ..., v3.z]` layout.
    pub fn from_coordinates(id: u64, coords: &[f64; 9]) -> Self {
        Triangle::new(
            id,
            Point3d::new(coords[0], coords[1], coords[2]),
            Point3d::new(coords[3], coords[4], coords[5]),
            Point3d::new(coords[6], coords[7], coords[8]),
        )
    }

    /// Flat nine-double layout used on disk.
    pub fn coordinates(&self) -> [f64; 9] {
        [
            self.v1.x, self.v1.y, self.v1.z, self.v2.x, self.v2.y, self.v2.z, self.v3.x,
            self.v3.y, self.v3.z,
        ]
    }

    pub fn vertices(&self) -> [&Point3d; 3] {
        [&self.v1, &self.v2, &self.v3]
    }

    /// Supporting plane, with normal `(v2 - v1) × (v3 - v1)`.
    pub fn plane(&self) -> Plane<f64> {
        Plane::from_points(&self.v1, &self.v2, &self.v3)
    }

    pub fn is_finite(&self) -> bool {
        self.v1.is_finite() && self.v2.is_finite() && self.v3.is_finite()
    }
}

/// Heron's formula; a negative radicand from rounding is clamped to zero.
pub fn heron_area(a: f64, b: f64, c: f64) -> f64 {
    let s = (a + b + c) / 2.0;
    let radicand = s * (s - a) * (s - b) * (s - c);
    if radicand > 0.0 { radicand.sqrt() } else { 0.0 }
}
