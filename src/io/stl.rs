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

use std::path::Path;

use crate::{
    error::{Error, Result},
    io::{finite_point, parse_point, read_bytes},
    mesh::Mesh,
};

const BINARY_HEADER: usize = 80;
const BINARY_FACET: usize = 50;

/// Read a mesh from STL, ASCII or binary.
///
/// Facet vertices are not welded: every facet contributes three fresh nodes.
/// Triangles get 1-based ids in file order.
pub fn read_stl<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let bytes = read_bytes(path.as_ref())?;
    if looks_ascii(&bytes) {
        parse_ascii_stl(&String::from_utf8_lossy(&bytes))
    } else {
        parse_binary_stl(&bytes)
    }
}

/// Binary files may also start with "solid", so require a facet keyword too.
fn looks_ascii(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let text = String::from_utf8_lossy(head);
    text.trim_start().starts_with("solid") && text.contains("facet")
}

/// Parse ASCII STL:
///   solid <name>
///   facet normal nx ny nz
///     outer loop
///       vertex x y z
///       vertex x y z
///       vertex x y z
///     endloop
///   endfacet
///   endsolid <name>
pub fn parse_ascii_stl(text: &str) -> Result<Mesh> {
    let mut mesh = Mesh::new();
    let mut vertices = Vec::with_capacity(3);

    for (i, line) in text.lines().enumerate() {
        let mut parts = line.split_whitespace();
        let fmt = format!("STL line {}", i + 1);
        match parts.next() {
            Some("facet") => {
                // normal is ignored during reading
                vertices.clear();
            }
            Some("vertex") => {
                vertices.push(mesh.add_vertex(parse_point(&mut parts, &fmt)?));
            }
            Some("endfacet") => {
                if vertices.len() != 3 {
                    return Err(Error::MeshFormat(format!(
                        "{fmt}: facet has {} vertices, expected 3",
                        vertices.len()
                    )));
                }
                mesh.add_triangle(vertices[0], vertices[1], vertices[2]);
                vertices.clear();
            }
            Some("endsolid") => break,
            _ => {
                // solid, outer loop, endloop
            }
        }
    }

    Ok(mesh)
}

/// Parse binary STL: 80-byte header, little-endian u32 facet count, then
/// 50-byte records (normal, three vertices as f32 triples, attribute word).
pub fn parse_binary_stl(bytes: &[u8]) -> Result<Mesh> {
    if bytes.len() < BINARY_HEADER + 4 {
        return Err(Error::MeshFormat("STL: file too short".into()));
    }
    let count = u32::from_le_bytes(read4(bytes, BINARY_HEADER)) as usize;
    let expected = BINARY_HEADER + 4 + count * BINARY_FACET;
    if bytes.len() < expected {
        return Err(Error::MeshFormat(format!(
            "STL: header announces {count} facets but file holds {} bytes",
            bytes.len()
        )));
    }

    let mut mesh = Mesh::new();
    for f in 0..count {
        let base = BINARY_HEADER + 4 + f * BINARY_FACET + 12;
        let mut ids = [0u64; 3];
        for (k, id) in ids.iter_mut().enumerate() {
            let off = base + k * 12;
            let x = f32::from_le_bytes(read4(bytes, off)) as f64;
            let y = f32::from_le_bytes(read4(bytes, off + 4)) as f64;
            let z = f32::from_le_bytes(read4(bytes, off + 8)) as f64;
            let p = finite_point(x, y, z, &format!("STL facet {}", f + 1))?;
            *id = mesh.add_vertex(p);
        }
        mesh.add_triangle(ids[0], ids[1], ids[2]);
    }
    Ok(mesh)
}

fn read4(bytes: &[u8], at: usize) -> [u8; 4] {
    [bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point3d;

    #[test]
    fn binary_single_facet() {
        let mut bytes = vec![0u8; BINARY_HEADER];
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 12]);
        for v in [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
            for c in v {
                bytes.extend_from_slice(&c.to_le_bytes());
            }
        }
        bytes.extend_from_slice(&[0u8; 2]);

        let mesh = parse_binary_stl(&bytes).unwrap();
        assert_eq!(mesh.elements().len(), 1);
        assert_eq!(mesh.node(2), Some(&Point3d::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn binary_nan_vertex_is_rejected() {
        let mut bytes = vec![0u8; BINARY_HEADER];
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 12]);
        for c in [0.0f32, f32::NAN, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0] {
            bytes.extend_from_slice(&c.to_le_bytes());
        }
        bytes.extend_from_slice(&[0u8; 2]);
        assert!(matches!(parse_binary_stl(&bytes), Err(Error::MeshFormat(_))));
    }

    #[test]
    fn truncated_binary_is_rejected() {
        let mut bytes = vec![0u8; BINARY_HEADER];
        bytes.extend_from_slice(&2u32.to_le_bytes());
        assert!(parse_binary_stl(&bytes).is_err());
    }
}
