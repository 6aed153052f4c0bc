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

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of failures, as surfaced on the invocation channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InputNotFound,
    InputFormatError,
    GeometryError,
    SimulationError,
    OutputError,
}

/// Errors raised while loading inputs, running the engine or persisting results.
#[derive(Debug, Error)]
pub enum Error {
    /// A mesh, particle or HDF5 path is missing or unreadable.
    #[error("cannot open {path}: {source}")]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The mesh file could not be interpreted (bad syntax, missing nodes, no triangles).
    #[error("mesh format error: {0}")]
    MeshFormat(String),

    /// A particle record is malformed. `line` is 1-based.
    #[error("particle format error at line {line}: {reason}")]
    ParticleFormat { line: usize, reason: String },

    /// The file is not a readable HDF5 container.
    #[error("{path} is not a valid HDF5 file: {reason}")]
    Hdf5InvalidOrEmpty { path: PathBuf, reason: String },

    /// An HDF5 group does not follow the expected layout.
    #[error("unexpected HDF5 structure: {0}")]
    Hdf5Structure(String),

    /// Degenerate geometry where a well-defined plane is required.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Fatal failure inside the settlement loop.
    #[error("simulation error: {0}")]
    Simulation(String),

    /// Results could not be written.
    #[error("output error: {0}")]
    Output(String),

    /// Invalid run parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    #[error("invalid run configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InputNotFound { .. } => ErrorKind::InputNotFound,
            Error::MeshFormat(_)
            | Error::ParticleFormat { .. }
            | Error::Hdf5InvalidOrEmpty { .. }
            | Error::Hdf5Structure(_)
            | Error::InvalidParam(_)
            | Error::Config(_) => ErrorKind::InputFormatError,
            Error::Geometry(_) => ErrorKind::GeometryError,
            Error::Simulation(_) => ErrorKind::SimulationError,
            Error::Output(_) | Error::Io(_) => ErrorKind::OutputError,
        }
    }

    /// Wraps an `open` failure, keeping the offending path.
    pub(crate) fn not_found(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::InputNotFound {
            path: path.into(),
            source,
        }
    }
}
