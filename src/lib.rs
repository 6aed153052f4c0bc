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

//! Particle deposition on triangulated surfaces.
//!
//! Loads a surface mesh into a [`TriangleTable`], drifts a population of
//! spherical particles through it in fixed time steps, settles each particle
//! on the first triangle it touches, and persists per-triangle hit counts to
//! HDF5.

pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod io;
pub mod kernel;
pub mod mesh;
pub mod oracle;
pub mod particle;
pub mod results;

pub use config::RunConfig;
pub use engine::{RunSummary, SettlementEvent, Simulation, simulate, simulate_with};
pub use error::{Error, ErrorKind, Result};
pub use io::load_mesh;
pub use mesh::{Triangle, TriangleTable};
pub use oracle::{FacetOracle, Oracle, OracleKind, PlaneOracle};
pub use particle::{Particle, ParticleCloud, ParticleStore, write_particles};
pub use results::{HeatMap, TriangleRecord, read, write_settled, write_snapshot};
