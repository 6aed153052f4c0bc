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

use log::debug;

use crate::{
    error::{Error, Result},
    io::{parse_point, read_bytes},
    mesh::Mesh,
};

/// Read a mesh from a Wavefront OBJ file.
/// Only `v x y z` and triangular `f i j k` lines are used; faces may carry
/// `i/t/n` references and negative (relative) indices. Polygons with more than
/// three corners are skipped.
pub fn read_obj<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let bytes = read_bytes(path.as_ref())?;
    let text = String::from_utf8_lossy(&bytes);
    let mut mesh = Mesh::new();
    let mut vertex_count: i64 = 0;
    let mut skipped = 0usize;

    for (i, l) in text.lines().enumerate() {
        let fmt = format!("OBJ line {}", i + 1);
        let mut parts = l.split_whitespace();
        match parts.next() {
            Some("v") => {
                mesh.add_vertex(parse_point(&mut parts, &fmt)?);
                vertex_count += 1;
            }
            Some("f") => {
                let refs: Vec<&str> = parts.collect();
                if refs.len() != 3 {
                    skipped += 1;
                    continue;
                }
                let mut corners = [0u64; 3];
                for (slot, r) in corners.iter_mut().zip(&refs) {
                    *slot = resolve_index(r, vertex_count, &fmt)?;
                }
                mesh.add_triangle(corners[0], corners[1], corners[2]);
            }
            _ => {
                // ignore comments, normals, etc.
            }
        }
    }

    if skipped > 0 {
        debug!("OBJ: skipped {skipped} non-triangular faces");
    }
    Ok(mesh)
}

/// OBJ indices are 1-based; negative values count back from the last vertex.
fn resolve_index(r: &str, vertex_count: i64, fmt: &str) -> Result<u64> {
    let head = r.split('/').next().unwrap_or(r);
    let idx: i64 = head
        .parse()
        .map_err(|_| Error::MeshFormat(format!("{fmt}: bad face index '{r}'")))?;
    let resolved = if idx < 0 { vertex_count + 1 + idx } else { idx };
    if resolved < 1 || resolved > vertex_count {
        return Err(Error::MeshFormat(format!(
            "{fmt}: face index {idx} out of range"
        )));
    }
    Ok(resolved as u64)
}
