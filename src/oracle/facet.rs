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
    error::Result,
    geometry::util::closest_point_on_triangle,
    mesh::Triangle,
    oracle::{Oracle, check_inputs, within},
    particle::Particle,
};

/// Sphere versus closed triangle: overlap when the nearest point of the
/// facet (interior, edge or vertex) lies within the radius.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacetOracle;

impl Oracle for FacetOracle {
    fn overlaps(&self, particle: &Particle, triangle: &Triangle) -> Result<bool> {
        check_inputs(particle, triangle)?;
        if triangle.degenerate || triangle.plane().is_degenerate() {
            return Ok(false);
        }
        let c = &particle.position;
        let q = closest_point_on_triangle(c, &triangle.v1, &triangle.v2, &triangle.v3);
        within(c.distance_to(&q), particle, triangle)
    }
}
