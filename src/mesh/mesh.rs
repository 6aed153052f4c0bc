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

use std::collections::HashMap;

use log::warn;

use crate::{
    error::{Error, Result},
    geometry::Point3d,
    mesh::{table::TriangleTable, triangle::Triangle},
};

/// A 3-node surface element referencing nodes by tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Element {
    pub tag: u64,
    pub nodes: [u64; 3],
}

/// Indexed surface mesh as read from disk: tagged nodes plus triangle
/// elements in file order. Resolved into a [`TriangleTable`] once complete.
#[derive(Debug)]
pub struct Mesh {
    nodes: HashMap<u64, Point3d>,
    elements: Vec<Element>,
    next_node: u64,
    next_element: u64,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            elements: Vec::new(),
            next_node: 1,
            next_element: 1,
        }
    }

    /// Registers a node under an explicit tag. A repeated tag overwrites.
    pub fn add_node(&mut self, tag: u64, position: Point3d) {
        self.nodes.insert(tag, position);
        self.next_node = self.next_node.max(tag + 1);
    }

    /// Adds a node under the next free 1-based tag and returns it.
    pub fn add_vertex(&mut self, position: Point3d) -> u64 {
        let tag = self.next_node;
        self.add_node(tag, position);
        tag
    }

    /// Adds a triangle element with an explicit tag.
    pub fn add_element(&mut self, tag: u64, nodes: [u64; 3]) {
        self.elements.push(Element { tag, nodes });
        self.next_element = self.next_element.max(tag + 1);
    }

    /// Adds a triangle under the next free 1-based element tag and returns it.
    pub fn add_triangle(&mut self, v0: u64, v1: u64, v2: u64) -> u64 {
        let tag = self.next_element;
        self.add_element(tag, [v0, v1, v2]);
        tag
    }

    pub fn node(&self, tag: u64) -> Option<&Point3d> {
        self.nodes.get(&tag)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Resolves every element against the node table, in element order.
    ///
    /// Errors with [`Error::MeshFormat`] if an element references an unknown
    /// node or if the mesh holds no triangles at all.
    pub fn into_table(self) -> Result<TriangleTable> {
        if self.elements.is_empty() {
            return Err(Error::MeshFormat("no 3-node triangles in mesh".into()));
        }
        let mut triangles = Vec::with_capacity(self.elements.len());
        for el in &self.elements {
            let mut corners = [Point3d::origin(); 3];
            for (slot, tag) in corners.iter_mut().zip(el.nodes) {
                *slot = *self.nodes.get(&tag).ok_or_else(|| {
                    Error::MeshFormat(format!(
                        "element {} references unknown node {}",
                        el.tag, tag
                    ))
                })?;
            }
            triangles.push(Triangle::new(el.tag, corners[0], corners[1], corners[2]));
        }

        let table = TriangleTable::new(triangles);
        let degenerate = table.degenerate_count();
        if degenerate > 0 {
            warn!("{degenerate} degenerate triangle(s) in mesh; they never register hits");
        }
        Ok(table)
    }
}
