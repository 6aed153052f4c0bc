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

//! Gmsh MSH reader (ASCII, format versions 2.x and 4.1).
//!
//! Only node coordinates and type-2 elements (3-node triangles) are used;
//! every other section and element type is skipped.

use std::{path::Path, str::SplitWhitespace};

use log::debug;

use crate::{
    error::{Error, Result},
    io::{parse_next, parse_point, read_bytes},
    mesh::Mesh,
};

/// Gmsh element type for a 3-node triangle.
pub const TRIANGLE_3: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Version {
    V2,
    V41,
}

/// Line cursor that skips blank lines and remembers 1-based line numbers.
struct Cursor<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
        }
    }

    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        for (i, l) in self.lines.by_ref() {
            let t = l.trim();
            if !t.is_empty() {
                return Some((i + 1, t));
            }
        }
        None
    }

    fn expect_line(&mut self, what: &str) -> Result<(usize, &'a str)> {
        self.next_line()
            .ok_or_else(|| Error::MeshFormat(format!("MSH: unexpected end of file in {what}")))
    }

    fn tokens(&mut self, what: &str) -> Result<(usize, SplitWhitespace<'a>)> {
        let (n, l) = self.expect_line(what)?;
        Ok((n, l.split_whitespace()))
    }

    /// Advances past the `$End<name>` marker.
    fn skip_section(&mut self, name: &str) -> Result<()> {
        let end = format!("$End{name}");
        loop {
            let (_, l) = self.expect_line(name)?;
            if l == end {
                return Ok(());
            }
        }
    }

    fn expect_end(&mut self, name: &str) -> Result<()> {
        let (n, l) = self.expect_line(name)?;
        if l != format!("$End{name}") {
            return Err(Error::MeshFormat(format!(
                "MSH line {n}: expected $End{name}, found '{l}'"
            )));
        }
        Ok(())
    }
}

fn fmt_at(line: usize) -> String {
    format!("MSH line {line}")
}

/// Read a Gmsh mesh file.
pub fn read_msh<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let bytes = read_bytes(path.as_ref())?;
    let text = String::from_utf8_lossy(&bytes);
    parse_msh(&text)
}

/// Parse the textual content of a Gmsh mesh file.
pub fn parse_msh(text: &str) -> Result<Mesh> {
    let mut cur = Cursor::new(text);
    let mut mesh = Mesh::new();
    let mut version: Option<Version> = None;
    let mut seen_nodes = false;

    while let Some((n, line)) = cur.next_line() {
        let Some(name) = line.strip_prefix('$') else {
            return Err(Error::MeshFormat(format!(
                "MSH line {n}: expected a section header, found '{line}'"
            )));
        };
        match name {
            "MeshFormat" => {
                version = Some(parse_format(&mut cur)?);
                cur.expect_end("MeshFormat")?;
            }
            "Nodes" => {
                let v = version.ok_or_else(|| {
                    Error::MeshFormat("MSH: $Nodes before $MeshFormat".into())
                })?;
                match v {
                    Version::V2 => parse_nodes_v2(&mut cur, &mut mesh)?,
                    Version::V41 => parse_nodes_v41(&mut cur, &mut mesh)?,
                }
                cur.expect_end("Nodes")?;
                seen_nodes = true;
            }
            "Elements" => {
                let v = version.ok_or_else(|| {
                    Error::MeshFormat("MSH: $Elements before $MeshFormat".into())
                })?;
                match v {
                    Version::V2 => parse_elements_v2(&mut cur, &mut mesh)?,
                    Version::V41 => parse_elements_v41(&mut cur, &mut mesh)?,
                }
                cur.expect_end("Elements")?;
            }
            other => {
                debug!("MSH: skipping section ${other}");
                cur.skip_section(other)?;
            }
        }
    }

    if version.is_none() {
        return Err(Error::MeshFormat("MSH: missing $MeshFormat".into()));
    }
    if !seen_nodes {
        return Err(Error::MeshFormat("MSH: missing $Nodes".into()));
    }
    Ok(mesh)
}

fn parse_format(cur: &mut Cursor<'_>) -> Result<Version> {
    let (n, mut it) = cur.tokens("MeshFormat")?;
    let fmt = fmt_at(n);
    let version: String = parse_next(&mut it, &fmt, "version")?;
    let file_type: u32 = parse_next(&mut it, &fmt, "file type")?;
    if file_type != 0 {
        return Err(Error::MeshFormat(
            "MSH: binary mesh files are not supported; re-export as ASCII".into(),
        ));
    }
    if version.starts_with("2.") || version == "2" {
        Ok(Version::V2)
    } else if version == "4.1" {
        Ok(Version::V41)
    } else {
        Err(Error::MeshFormat(format!(
            "MSH: unsupported format version {version}"
        )))
    }
}

fn parse_nodes_v2(cur: &mut Cursor<'_>, mesh: &mut Mesh) -> Result<()> {
    let (n, mut it) = cur.tokens("Nodes")?;
    let count: usize = parse_next(&mut it, &fmt_at(n), "node count")?;
    for _ in 0..count {
        let (n, mut it) = cur.tokens("Nodes")?;
        let fmt = fmt_at(n);
        let tag: u64 = parse_next(&mut it, &fmt, "node tag")?;
        let p = parse_point(&mut it, &fmt)?;
        mesh.add_node(tag, p);
    }
    Ok(())
}

fn parse_nodes_v41(cur: &mut Cursor<'_>, mesh: &mut Mesh) -> Result<()> {
    let (n, mut it) = cur.tokens("Nodes")?;
    let fmt = fmt_at(n);
    let blocks: usize = parse_next(&mut it, &fmt, "entity block count")?;
    let _total: usize = parse_next(&mut it, &fmt, "node count")?;

    for _ in 0..blocks {
        let (n, mut it) = cur.tokens("Nodes")?;
        let fmt = fmt_at(n);
        let _dim: u32 = parse_next(&mut it, &fmt, "entity dimension")?;
        let _entity: i64 = parse_next(&mut it, &fmt, "entity tag")?;
        let _parametric: u32 = parse_next(&mut it, &fmt, "parametric flag")?;
        let in_block: usize = parse_next(&mut it, &fmt, "block node count")?;

        let mut tags = Vec::new();
        for _ in 0..in_block {
            let (n, mut it) = cur.tokens("Nodes")?;
            let tag: u64 = parse_next(&mut it, &fmt_at(n), "node tag")?;
            tags.push(tag);
        }
        // Parametric coordinates, if any, trail x y z and are ignored.
        for tag in tags {
            let (n, mut it) = cur.tokens("Nodes")?;
            let p = parse_point(&mut it, &fmt_at(n))?;
            mesh.add_node(tag, p);
        }
    }
    Ok(())
}

fn parse_elements_v2(cur: &mut Cursor<'_>, mesh: &mut Mesh) -> Result<()> {
    let (n, mut it) = cur.tokens("Elements")?;
    let count: usize = parse_next(&mut it, &fmt_at(n), "element count")?;
    let mut skipped = 0usize;
    for _ in 0..count {
        let (n, mut it) = cur.tokens("Elements")?;
        let fmt = fmt_at(n);
        let tag: u64 = parse_next(&mut it, &fmt, "element tag")?;
        let kind: u32 = parse_next(&mut it, &fmt, "element type")?;
        if kind != TRIANGLE_3 {
            skipped += 1;
            continue;
        }
        let ntags: usize = parse_next(&mut it, &fmt, "tag count")?;
        for _ in 0..ntags {
            let _: i64 = parse_next(&mut it, &fmt, "element tag list")?;
        }
        let nodes = parse_triangle_nodes(&mut it, &fmt)?;
        mesh.add_element(tag, nodes);
    }
    if skipped > 0 {
        debug!("MSH: skipped {skipped} non-triangle elements");
    }
    Ok(())
}

fn parse_elements_v41(cur: &mut Cursor<'_>, mesh: &mut Mesh) -> Result<()> {
    let (n, mut it) = cur.tokens("Elements")?;
    let fmt = fmt_at(n);
    let blocks: usize = parse_next(&mut it, &fmt, "entity block count")?;
    let _total: usize = parse_next(&mut it, &fmt, "element count")?;
    let mut skipped = 0usize;

    for _ in 0..blocks {
        let (n, mut it) = cur.tokens("Elements")?;
        let fmt = fmt_at(n);
        let _dim: u32 = parse_next(&mut it, &fmt, "entity dimension")?;
        let _entity: i64 = parse_next(&mut it, &fmt, "entity tag")?;
        let kind: u32 = parse_next(&mut it, &fmt, "element type")?;
        let in_block: usize = parse_next(&mut it, &fmt, "block element count")?;

        for _ in 0..in_block {
            let (n, mut it) = cur.tokens("Elements")?;
            if kind != TRIANGLE_3 {
                skipped += 1;
                continue;
            }
            let fmt = fmt_at(n);
            let tag: u64 = parse_next(&mut it, &fmt, "element tag")?;
            let nodes = parse_triangle_nodes(&mut it, &fmt)?;
            mesh.add_element(tag, nodes);
        }
    }
    if skipped > 0 {
        debug!("MSH: skipped {skipped} non-triangle elements");
    }
    Ok(())
}

fn parse_triangle_nodes<'a>(it: &mut impl Iterator<Item = &'a str>, fmt: &str) -> Result<[u64; 3]> {
    Ok([
        parse_next(it, fmt, "triangle node")?,
        parse_next(it, fmt, "triangle node")?,
        parse_next(it, fmt, "triangle node")?,
    ])
}
