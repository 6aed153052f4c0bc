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

use std::{fs, path::Path};

use log::info;

use crate::{
    error::{Error, Result},
    mesh::Triangle,
};

/// One HDF5 group read back from a snapshot or settled file.
#[derive(Clone, Debug, PartialEq)]
pub struct TriangleRecord {
    pub id: u64,
    /// Suffix of a settled group name; `None` for snapshot groups.
    pub occurrence: Option<u64>,
    pub coordinates: [f64; 9],
    pub area: f64,
    pub counter: Option<i64>,
}

impl TriangleRecord {
    pub fn triangle(&self) -> Triangle {
        Triangle::from_coordinates(self.id, &self.coordinates)
    }

    /// Hit count this record stands for: the counter if present, else the
    /// occurrence, else zero.
    pub fn count(&self) -> u64 {
        match (self.counter, self.occurrence) {
            (Some(c), _) => c.max(0) as u64,
            (None, Some(o)) => o,
            (None, None) => 0,
        }
    }
}

/// Splits `Triangle_<id>` or `Triangle_<id>_<occurrence>`.
pub fn parse_group_name(name: &str) -> Option<(u64, Option<u64>)> {
    fn digits(s: &str) -> Option<u64> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse().ok()
    }

    let rest = name.strip_prefix("Triangle_")?;
    match rest.split_once('_') {
        Some((id, occ)) => Some((digits(id)?, Some(digits(occ)?))),
        None => Some((digits(rest)?, None)),
    }
}

/// Reads every `Triangle_*` group, sorted by `(id, occurrence)`.
///
/// Errors:
/// - [`Error::InputNotFound`] if `path` does not exist.
/// - [`Error::Hdf5InvalidOrEmpty`] if it is not an HDF5 file.
/// - [`Error::Hdf5Structure`] for a misnamed member or a group lacking
///   `Coordinates` or `Area`.
pub fn read<P: AsRef<Path>>(path: P) -> Result<Vec<TriangleRecord>> {
    let path = path.as_ref();
    fs::metadata(path).map_err(|e| Error::not_found(path, e))?;
    let invalid = |e: hdf5::Error| Error::Hdf5InvalidOrEmpty {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let file = hdf5::File::open(path).map_err(invalid)?;
    let names = file.member_names().map_err(invalid)?;

    let mut records = Vec::with_capacity(names.len());
    for name in names {
        let (id, occurrence) = parse_group_name(&name)
            .ok_or_else(|| Error::Hdf5Structure(format!("unexpected member '{name}'")))?;
        let group = file
            .group(&name)
            .map_err(|e| Error::Hdf5Structure(format!("'{name}' is not a group: {e}")))?;
        records.push(read_group(&group, &name, id, occurrence)?);
    }
    records.sort_by_key(|r| (r.id, r.occurrence));
    info!("read {} triangle groups from {}", records.len(), path.display());
    Ok(records)
}

/// Reads a snapshot file; counters, if any, are ignored.
pub fn read_snapshot<P: AsRef<Path>>(path: P) -> Result<Vec<TriangleRecord>> {
    let mut records = read(path)?;
    for r in &mut records {
        r.counter = None;
    }
    Ok(records)
}

/// Reads a settled file; every group must carry a `Counter`.
pub fn read_settled<P: AsRef<Path>>(path: P) -> Result<Vec<TriangleRecord>> {
    let records = read(path)?;
    if let Some(r) = records.iter().find(|r| r.counter.is_none()) {
        return Err(Error::Hdf5Structure(format!(
            "group for triangle {} has no Counter",
            r.id
        )));
    }
    Ok(records)
}

fn read_group(
    group: &hdf5::Group,
    name: &str,
    id: u64,
    occurrence: Option<u64>,
) -> Result<TriangleRecord> {
    let structure = |what: &str, e: hdf5::Error| {
        Error::Hdf5Structure(format!("{name}/{what}: {e}"))
    };
    for required in ["Coordinates", "Area"] {
        if !group.link_exists(required) {
            return Err(Error::Hdf5Structure(format!("{name} lacks {required}")));
        }
    }

    let raw: Vec<f64> = group
        .dataset("Coordinates")
        .and_then(|d| d.read_raw::<f64>())
        .map_err(|e| structure("Coordinates", e))?;
    let coordinates: [f64; 9] = raw.as_slice().try_into().map_err(|_| {
        Error::Hdf5Structure(format!(
            "{name}/Coordinates has {} values, expected 9",
            raw.len()
        ))
    })?;
    let area = group
        .dataset("Area")
        .and_then(|d| d.read_scalar::<f64>())
        .map_err(|e| structure("Area", e))?;
    let counter = if group.link_exists("Counter") {
        let c = group
            .dataset("Counter")
            .and_then(|d| d.read_scalar::<i64>())
            .map_err(|e| structure("Counter", e))?;
        Some(c)
    } else {
        None
    };

    Ok(TriangleRecord {
        id,
        occurrence,
        coordinates,
        area,
        counter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_names() {
        assert_eq!(parse_group_name("Triangle_17"), Some((17, None)));
        assert_eq!(parse_group_name("Triangle_17_2"), Some((17, Some(2))));
        assert_eq!(parse_group_name("Triangle_"), None);
        assert_eq!(parse_group_name("Triangle_1_"), None);
        assert_eq!(parse_group_name("Triangle_1_2_3"), None);
        assert_eq!(parse_group_name("Triangle_-1"), None);
        assert_eq!(parse_group_name("triangle_1"), None);
    }
}
