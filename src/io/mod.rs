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

//! Mesh readers.
//!
//! Every reader produces a tagged [`Mesh`]; [`load_mesh`] resolves it into the
//! canonical [`TriangleTable`]. Gmsh files keep their element tags as triangle
//! ids. The other formats have no tags, so ids are assigned 1-based in file order.

pub mod msh;
pub mod obj;
pub mod off;
pub mod stl;

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
    str::FromStr,
};

use log::info;

use crate::{
    error::{Error, Result},
    geometry::Point3d,
    mesh::{Mesh, TriangleTable},
};

pub use msh::read_msh;
pub use obj::read_obj;
pub use off::read_off;
pub use stl::read_stl;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFileFormat {
    Gmsh,
    Stl,
    Obj,
    Off,
}

impl MeshFileFormat {
    /// Detects the format from the file extension, case-insensitively.
    pub fn detect<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "msh" => Some(MeshFileFormat::Gmsh),
            "stl" => Some(MeshFileFormat::Stl),
            "obj" => Some(MeshFileFormat::Obj),
            "off" => Some(MeshFileFormat::Off),
            _ => None,
        }
    }
}

/// Reads a mesh file into its tagged, unresolved form.
pub fn read_mesh<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    let format = MeshFileFormat::detect(path).ok_or_else(|| {
        Error::MeshFormat(format!("unrecognized mesh extension: {}", path.display()))
    })?;
    match format {
        MeshFileFormat::Gmsh => read_msh(path),
        MeshFileFormat::Stl => read_stl(path),
        MeshFileFormat::Obj => read_obj(path),
        MeshFileFormat::Off => read_off(path),
    }
}

/// Loads a surface mesh and builds its triangle table in canonical order.
pub fn load_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleTable> {
    let path = path.as_ref();
    let mesh = read_mesh(path)?;
    let nodes = mesh.node_count();
    let table = mesh.into_table()?;
    info!(
        "loaded {} triangles ({} nodes, total area {:.6}) from {}",
        table.len(),
        nodes,
        table.total_area(),
        path.display()
    );
    Ok(table)
}

/// Opens an input file, reporting a missing or unreadable path as
/// [`Error::InputNotFound`].
pub(crate) fn open_input(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| Error::not_found(path, e))
}

pub(crate) fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    open_input(path)?
        .read_to_end(&mut buf)
        .map_err(|e| Error::not_found(path, e))?;
    Ok(buf)
}

/// Parses the next whitespace token, naming `what` in the error.
pub(crate) fn parse_next<'a, T, I>(it: &mut I, fmt: &str, what: &str) -> Result<T>
where
    T: FromStr,
    I: Iterator<Item = &'a str>,
{
    let tok = it
        .next()
        .ok_or_else(|| Error::MeshFormat(format!("{fmt}: missing {what}")))?;
    tok.parse()
        .map_err(|_| Error::MeshFormat(format!("{fmt}: bad {what} '{tok}'")))
}

/// Parses three coordinate tokens into a point.
pub(crate) fn parse_point<'a, I>(it: &mut I, fmt: &str) -> Result<Point3d>
where
    I: Iterator<Item = &'a str>,
{
    let x: f64 = parse_next(it, fmt, "x coordinate")?;
    let y: f64 = parse_next(it, fmt, "y coordinate")?;
    let z: f64 = parse_next(it, fmt, "z coordinate")?;
    finite_point(x, y, z, fmt)
}

/// Rejects `nan` and `inf` coordinates.
pub(crate) fn finite_point(x: f64, y: f64, z: f64, fmt: &str) -> Result<Point3d> {
    if !(x.is_finite() && y.is_finite() && z.is_finite()) {
        return Err(Error::MeshFormat(format!(
            "{fmt}: non-finite coordinate ({x}, {y}, {z})"
        )));
    }
    Ok(Point3d::new(x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_detection() {
        assert_eq!(MeshFileFormat::detect("box.msh"), Some(MeshFileFormat::Gmsh));
        assert_eq!(MeshFileFormat::detect("a/b/PART.STL"), Some(MeshFileFormat::Stl));
        assert_eq!(MeshFileFormat::detect("m.obj"), Some(MeshFileFormat::Obj));
        assert_eq!(MeshFileFormat::detect("m.off"), Some(MeshFileFormat::Off));
        assert_eq!(MeshFileFormat::detect("m.vtk"), None);
        assert_eq!(MeshFileFormat::detect("noext"), None);
    }

    #[test]
    fn non_finite_coordinates_rejected() {
        let mut it = "1 nan 0".split_whitespace();
        assert!(matches!(parse_point(&mut it, "t"), Err(Error::MeshFormat(_))));
        let mut it = "1 2 -inf".split_whitespace();
        assert!(parse_point(&mut it, "t").is_err());
        let mut it = "1 2 3.5".split_whitespace();
        assert_eq!(parse_point(&mut it, "t").unwrap(), Point3d::new(1.0, 2.0, 3.5));
    }
}
