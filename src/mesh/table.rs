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

use std::ops::Index;

use crate::{
    geometry::{Aabb, Point3d},
    mesh::triangle::Triangle,
};

/// Ordered sequence of facets as returned by the mesh loader.
///
/// The order is canonical: the settlement engine scans triangles in it and
/// the first overlapping triangle wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleTable {
    triangles: Vec<Triangle>,
}

impl TriangleTable {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }

    pub fn as_slice(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Linear lookup by element id.
    pub fn find(&self, id: u64) -> Option<&Triangle> {
        self.triangles.iter().find(|t| t.id == id)
    }

    pub fn total_area(&self) -> f64 {
        self.triangles.iter().map(|t| t.area).sum()
    }

    pub fn degenerate_count(&self) -> usize {
        self.triangles.iter().filter(|t| t.degenerate).count()
    }

    /// Bounding box of every vertex, or `None` for an empty table.
    pub fn bounds(&self) -> Option<Aabb<f64>> {
        Aabb::enclosing(self.triangles.iter().flat_map(|t| t.vertices()))
    }

    pub fn into_inner(self) -> Vec<Triangle> {
        self.triangles
    }
}

impl Index<usize> for TriangleTable {
    type Output = Triangle;
    fn index(&self, i: usize) -> &Triangle {
        &self.triangles[i]
    }
}

impl<'a> IntoIterator for &'a TriangleTable {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;
    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}

impl From<Vec<Triangle>> for TriangleTable {
    fn from(triangles: Vec<Triangle>) -> Self {
        Self::new(triangles)
    }
}
