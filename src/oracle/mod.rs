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

//! Intersection oracles: "does this particle currently touch this triangle?"
//!
//! [`PlaneOracle`] is the engine's defining notion of a hit. It compares the
//! perpendicular distance to the triangle's infinite supporting plane with the
//! radius. [`FacetOracle`] only counts contact with the closed triangle itself.
//! Both report `false` for degenerate triangles and fail with
//! [`Error::Simulation`] on non-finite input.

pub mod facet;
pub mod plane;

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    mesh::Triangle,
    particle::Particle,
};

pub use facet::FacetOracle;
pub use plane::PlaneOracle;

pub trait Oracle {
    fn overlaps(&self, particle: &Particle, triangle: &Triangle) -> Result<bool>;
}

/// Oracle selection, as named in run configurations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleKind {
    #[default]
    Plane,
    Facet,
}

impl OracleKind {
    pub fn name(&self) -> &'static str {
        match self {
            OracleKind::Plane => "plane",
            OracleKind::Facet => "facet",
        }
    }
}

impl std::str::FromStr for OracleKind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "plane" => Ok(OracleKind::Plane),
            "facet" => Ok(OracleKind::Facet),
            other => Err(Error::InvalidParam(format!("unknown oracle '{other}'"))),
        }
    }
}

impl Oracle for OracleKind {
    fn overlaps(&self, particle: &Particle, triangle: &Triangle) -> Result<bool> {
        match self {
            OracleKind::Plane => PlaneOracle.overlaps(particle, triangle),
            OracleKind::Facet => FacetOracle.overlaps(particle, triangle),
        }
    }
}

/// Shared input validation: corrupt geometry aborts the run.
pub(crate) fn check_inputs(particle: &Particle, triangle: &Triangle) -> Result<()> {
    if !particle.position.is_finite() {
        return Err(Error::Simulation(format!(
            "particle {} has a non-finite position",
            particle.id
        )));
    }
    if !triangle.is_finite() {
        return Err(Error::Simulation(format!(
            "triangle {} has non-finite coordinates",
            triangle.id
        )));
    }
    Ok(())
}

/// Turns a computed distance into a verdict; NaN is corrupt geometry.
pub(crate) fn within(dist: f64, particle: &Particle, triangle: &Triangle) -> Result<bool> {
    if dist.is_nan() {
        return Err(Error::Simulation(format!(
            "distance from particle {} to triangle {} is undefined",
            particle.id, triangle.id
        )));
    }
    Ok(dist <= particle.radius)
}
