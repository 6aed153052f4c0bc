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
    mesh::Triangle,
    oracle::{Oracle, check_inputs, within},
    particle::Particle,
};

/// Plane-distance test.
///
/// With `n = (v2 - v1) × (v3 - v1)` and `D = -n · v1`, the particle overlaps
/// when `|n · c + D| / |n| <= radius`. Tangential contact counts. A particle
/// crossing the plane's extension outside the triangle is still a hit.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaneOracle;

impl Oracle for PlaneOracle {
    fn overlaps(&self, particle: &Particle, triangle: &Triangle) -> Result<bool> {
        check_inputs(particle, triangle)?;
        if triangle.degenerate {
            return Ok(false);
        }
        match triangle.plane().distance(&particle.position) {
            // |n| == 0 in floating point
            None => Ok(false),
            Some(dist) => within(dist, particle, triangle),
        }
    }
}
