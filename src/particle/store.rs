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

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::info;

use crate::{
    error::{Error, Result},
    geometry::{Point3d, Vector3d},
    io::read_bytes,
    particle::particle::Particle,
};

/// Number of values per particle record: `x y z vx vy vz r`.
pub const RECORD_LEN: usize = 7;

/// The in-flight particle population, in input order.
///
/// The engine never keeps indices into the store across steps, so removal may
/// shift elements freely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    pub fn new(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    /// Load particles from a text file of `x y z vx vy vz r` records.
    ///
    /// Errors:
    /// - [`Error::InputNotFound`] if the file cannot be opened or read.
    /// - [`Error::ParticleFormat`] on any malformed line, including bytes that
    ///   are not UTF-8. Only trailing blank lines are tolerated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = String::from_utf8(read_bytes(path)?).map_err(|e| {
            let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
            Error::ParticleFormat {
                line: valid.iter().filter(|&&b| b == b'\n').count() + 1,
                reason: "invalid UTF-8".into(),
            }
        })?;
        let store = Self::parse(&text)?;
        info!("loaded {} particles from {}", store.len(), path.display());
        Ok(store)
    }

    /// Parse the textual particle format.
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().collect();
        let last = lines
            .iter()
            .rposition(|l| !l.trim().is_empty())
            .map_or(0, |i| i + 1);

        let mut particles = Vec::with_capacity(last);
        for (i, line) in lines[..last].iter().enumerate() {
            particles.push(parse_record(particles.len(), line, i + 1)?);
        }
        Ok(Self { particles })
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// Advance every particle by `dt`. No clipping against the geometry.
    pub fn advance(&mut self, dt: f64) {
        for p in &mut self.particles {
            p.advance(dt);
        }
    }

    /// Removes the particle with the given id, if present. O(n).
    pub fn remove(&mut self, id: usize) -> Option<Particle> {
        let pos = self.particles.iter().position(|p| p.id == id)?;
        Some(self.particles.remove(pos))
    }

    /// Keeps exactly the particles whose `keep` flag is set, preserving order.
    ///
    /// `keep` is indexed by current store position.
    pub fn retain_flagged(&mut self, keep: &[bool]) {
        debug_assert_eq!(keep.len(), self.particles.len());
        let mut flags = keep.iter();
        self.particles.retain(|_| flags.next().copied().unwrap_or(true));
    }

    pub fn into_inner(self) -> Vec<Particle> {
        self.particles
    }
}

impl From<Vec<Particle>> for ParticleStore {
    fn from(particles: Vec<Particle>) -> Self {
        Self::new(particles)
    }
}

fn parse_record(id: usize, line: &str, line_no: usize) -> Result<Particle> {
    let bad = |reason: String| Error::ParticleFormat {
        line: line_no,
        reason,
    };

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != RECORD_LEN {
        return Err(bad(format!(
            "expected {RECORD_LEN} values, found {}",
            tokens.len()
        )));
    }

    let mut v = [0.0f64; RECORD_LEN];
    for (slot, tok) in v.iter_mut().zip(&tokens) {
        *slot = tok
            .parse()
            .map_err(|_| bad(format!("'{tok}' is not a number")))?;
        if !slot.is_finite() {
            return Err(bad(format!("'{tok}' is not finite")));
        }
    }
    if v[6] <= 0.0 {
        return Err(bad(format!("radius must be > 0, got {}", v[6])));
    }

    Particle::new(
        id,
        Point3d::new(v[0], v[1], v[2]),
        Vector3d::new(v[3], v[4], v[5]),
        v[6],
    )
    .map_err(|e| bad(e.to_string()))
}

/// Write particles in the input text format, one record per line.
///
/// Values use round-trip float formatting, so [`ParticleStore::load`] reads
/// back identical particles.
pub fn write_particles<P: AsRef<Path>>(path: P, particles: &[Particle]) -> Result<()> {
    let file = File::create(path.as_ref())
        .map_err(|e| Error::Output(format!("{}: {e}", path.as_ref().display())))?;
    let mut out = BufWriter::new(file);
    for p in particles {
        let r = p.record();
        writeln!(
            out,
            "{:?} {:?} {:?} {:?} {:?} {:?} {:?}",
            r[0], r[1], r[2], r[3], r[4], r[5], r[6]
        )?;
    }
    out.flush()?;
    Ok(())
}
