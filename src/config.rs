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
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    oracle::OracleKind,
};

/// A complete simulation run, as read from a TOML file.
///
/// ```toml
/// mesh = "tank.msh"
/// particles = "particles.txt"
/// output = "settled.h5"
/// dt = 0.01
/// t_end = 2.0
/// oracle = "plane"          # or "facet"
/// snapshot = "mesh.h5"      # optional
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub mesh: PathBuf,
    pub particles: PathBuf,
    pub output: PathBuf,

    /// Time step in seconds
    pub dt: f64,
    /// End time in seconds
    pub t_end: f64,

    #[serde(default)]
    pub oracle: OracleKind,

    /// Also write a snapshot of the mesh here
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
}

impl RunConfig {
    /// Reads, resolves and validates a config file. Relative paths are taken
    /// relative to the file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::not_found(path, e))?;
        let mut config = Self::from_toml(&text)?;
        if let Some(base) = path.parent() {
            config.resolve(base);
        }
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: RunConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn resolve(&mut self, base: &Path) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        join(&mut self.mesh);
        join(&mut self.particles);
        join(&mut self.output);
        if let Some(s) = self.snapshot.as_mut() {
            join(s);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(Error::InvalidParam(format!("dt must be > 0, got {}", self.dt)));
        }
        if !self.t_end.is_finite() || self.t_end < self.dt {
            return Err(Error::InvalidParam(format!(
                "t_end must be >= dt, got {}",
                self.t_end
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
mesh = "m.msh"
particles = "p.txt"
output = "out.h5"
dt = 0.1
t_end = 1.0
"#;

    #[test]
    fn defaults_and_resolution() {
        let mut cfg = RunConfig::from_toml(MINIMAL).unwrap();
        assert_eq!(cfg.oracle, OracleKind::Plane);
        assert!(cfg.snapshot.is_none());
        cfg.resolve(Path::new("/runs/a"));
        assert_eq!(cfg.mesh, PathBuf::from("/runs/a/m.msh"));
        assert_eq!(cfg.output, PathBuf::from("/runs/a/out.h5"));
    }

    #[test]
    fn facet_oracle_selected() {
        let text = format!("{MINIMAL}oracle = \"facet\"\nsnapshot = \"/abs/s.h5\"\n");
        let mut cfg = RunConfig::from_toml(&text).unwrap();
        assert_eq!(cfg.oracle, OracleKind::Facet);
        cfg.resolve(Path::new("/runs/a"));
        assert_eq!(cfg.snapshot, Some(PathBuf::from("/abs/s.h5")));
    }

    #[test]
    fn bad_times_rejected() {
        let text = MINIMAL.replace("t_end = 1.0", "t_end = 0.05");
        assert!(matches!(
            RunConfig::from_toml(&text),
            Err(Error::InvalidParam(_))
        ));
        let text = MINIMAL.replace("dt = 0.1", "dt = 0.0");
        assert!(RunConfig::from_toml(&text).is_err());
    }

    #[test]
    fn unknown_oracle_rejected() {
        let text = format!("{MINIMAL}oracle = \"sphere\"\n");
        assert!(matches!(RunConfig::from_toml(&text), Err(Error::Config(_))));
    }
}
