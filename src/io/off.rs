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
    io::{parse_next, parse_point, read_bytes},
    mesh::Mesh,
};

/// Read a mesh from OFF.
/// Supports:
///   OFF
///   <V> <F> <E>
///   V lines of "x y z"
///   F lines of "k i j k [ ... ]" (only k==3 is accepted; others are skipped)
///
/// Zero-based OFF vertex indices become 1-based node tags.
pub fn read_off<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let bytes = read_bytes(path.as_ref())?;
    parse_off(&String::from_utf8_lossy(&bytes))
}

pub fn parse_off(text: &str) -> Result<Mesh> {
    // Tokens across lines, comments stripped
    let toks: Vec<&str> = text
        .lines()
        .map(|l| l.split('#').next().unwrap_or("").trim())
        .filter(|l| !l.is_empty())
        .flat_map(str::split_whitespace)
        .collect();
    let mut it = toks.into_iter();

    // Header token must be OFF
    let header = it
        .next()
        .ok_or_else(|| Error::MeshFormat("OFF: empty file".into()))?;
    if header != "OFF" {
        return Err(Error::MeshFormat(format!(
            "OFF: expected 'OFF', got '{header}'"
        )));
    }

    let vcount: usize = parse_next(&mut it, "OFF", "vertex count")?;
    let fcount: usize = parse_next(&mut it, "OFF", "face count")?;
    let _ecount: usize = parse_next(&mut it, "OFF", "edge count")?;

    let mut mesh = Mesh::new();
    for _ in 0..vcount {
        mesh.add_vertex(parse_point(&mut it, "OFF")?);
    }

    let mut skipped = 0usize;
    for _ in 0..fcount {
        let poly_size: usize = parse_next(&mut it, "OFF", "face vertex count")?;
        if poly_size != 3 {
            for _ in 0..poly_size {
                let _: usize = parse_next(&mut it, "OFF", "face index")?;
            }
            skipped += 1;
            continue;
        }
        let mut corners = [0u64; 3];
        for slot in &mut corners {
            let idx: usize = parse_next(&mut it, "OFF", "face index")?;
            if idx >= vcount {
                return Err(Error::MeshFormat(format!(
                    "OFF: face index {idx} out of range ({vcount} vertices)"
                )));
            }
            *slot = idx as u64 + 1;
        }
        mesh.add_triangle(corners[0], corners[1], corners[2]);
    }

    if skipped > 0 {
        debug!("OFF: skipped {skipped} non-triangular faces");
    }
    Ok(mesh)
}
