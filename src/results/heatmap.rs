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

use std::collections::BTreeMap;

use crate::results::reader::TriangleRecord;

#[derive(Clone, Debug, PartialEq)]
pub struct HeatCell {
    pub id: u64,
    pub coordinates: [f64; 9],
    pub area: f64,
    pub count: u64,
    /// `count / max_count`, in `[0, 1]`.
    pub intensity: f64,
}

/// Per-triangle deposit counts ready for rendering, sorted by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeatMap {
    cells: Vec<HeatCell>,
    max_count: u64,
}

impl HeatMap {
    /// Merges an optional snapshot (every triangle, count 0) with settled
    /// records, taking the largest counter seen per id.
    pub fn build(snapshot: Option<&[TriangleRecord]>, settled: &[TriangleRecord]) -> Self {
        let mut by_id: BTreeMap<u64, HeatCell> = BTreeMap::new();
        for r in snapshot.unwrap_or(&[]) {
            by_id.entry(r.id).or_insert_with(|| cell(r, 0));
        }
        for r in settled {
            let count = r.count();
            by_id
                .entry(r.id)
                .and_modify(|c| c.count = c.count.max(count))
                .or_insert_with(|| cell(r, count));
        }

        let max_count = by_id.values().map(|c| c.count).max().unwrap_or(0);
        let mut cells: Vec<HeatCell> = by_id.into_values().collect();
        if max_count > 0 {
            for c in &mut cells {
                c.intensity = c.count as f64 / max_count as f64;
            }
        }
        Self { cells, max_count }
    }

    pub fn cells(&self) -> &[HeatCell] {
        &self.cells
    }

    pub fn max_count(&self) -> u64 {
        self.max_count
    }

    /// Sum of counts over all triangles.
    pub fn total_count(&self) -> u64 {
        self.cells.iter().map(|c| c.count).sum()
    }

    pub fn get(&self, id: u64) -> Option<&HeatCell> {
        self.cells
            .binary_search_by_key(&id, |c| c.id)
            .ok()
            .map(|i| &self.cells[i])
    }

    /// `(id, coordinates, area, count)` per triangle.
    pub fn rows(&self) -> impl Iterator<Item = (u64, [f64; 9], f64, u64)> + '_ {
        self.cells
            .iter()
            .map(|c| (c.id, c.coordinates, c.area, c.count))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

fn cell(r: &TriangleRecord, count: u64) -> HeatCell {
    HeatCell {
        id: r.id,
        coordinates: r.coordinates,
        area: r.area,
        count,
        intensity: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: u64, occurrence: Option<u64>) -> TriangleRecord {
        TriangleRecord {
            id,
            occurrence,
            coordinates: [0.0; 9],
            area: 0.5,
            counter: occurrence.map(|o| o as i64),
        }
    }

    #[test]
    fn merges_snapshot_and_counts() {
        let snapshot = [rec(3, None), rec(17, None), rec(42, None)];
        let settled = [rec(17, Some(1)), rec(17, Some(2)), rec(42, Some(1))];
        let map = HeatMap::build(Some(&snapshot[..]), &settled);

        let counts: Vec<(u64, u64)> = map.rows().map(|(id, _, _, n)| (id, n)).collect();
        assert_eq!(counts, vec![(3, 0), (17, 2), (42, 1)]);
        assert_eq!(map.max_count(), 2);
        assert_eq!(map.total_count(), 3);
        assert_eq!(map.get(42).map(|c| c.intensity), Some(0.5));
        assert_eq!(map.get(3).map(|c| c.intensity), Some(0.0));
    }

    #[test]
    fn nothing_settled() {
        let map = HeatMap::build(Some(&[rec(1, None)][..]), &[]);
        assert_eq!(map.max_count(), 0);
        assert_eq!(map.cells()[0].intensity, 0.0);
    }
}
