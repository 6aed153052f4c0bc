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

use std::collections::{BTreeMap, HashSet};

use crate::{engine::SettlementEvent, mesh::Triangle};

/// One persisted hit: the triangle and its 1-based occurrence number.
#[derive(Clone, Debug, PartialEq)]
pub struct Deposit {
    pub triangle: Triangle,
    pub occurrence: u64,
}

impl Deposit {
    /// HDF5 group name, `Triangle_<id>_<occurrence>`.
    pub fn group_name(&self) -> String {
        format!("Triangle_{}_{}", self.triangle.id, self.occurrence)
    }
}

/// Numbers events per triangle in the order they are consumed.
///
/// A `(particle, triangle)` pair is only counted once; the engine never emits
/// such a repeat, but hand-assembled event lists may.
#[derive(Debug, Default)]
pub struct Aggregator {
    seen: HashSet<(usize, u64)>,
    counts: BTreeMap<u64, u64>,
    deposits: Vec<Deposit>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events(events: &[SettlementEvent]) -> Self {
        let mut agg = Self::new();
        agg.extend(events);
        agg
    }

    /// Returns `false` if the event repeats an already counted pair.
    pub fn push(&mut self, event: &SettlementEvent) -> bool {
        if !self.seen.insert((event.particle_id, event.triangle.id)) {
            return false;
        }
        let count = self.counts.entry(event.triangle.id).or_insert(0);
        *count += 1;
        self.deposits.push(Deposit {
            triangle: event.triangle.clone(),
            occurrence: *count,
        });
        true
    }

    pub fn extend<'a, I: IntoIterator<Item = &'a SettlementEvent>>(&mut self, events: I) {
        for e in events {
            self.push(e);
        }
    }

    /// Deposits in event order.
    pub fn deposits(&self) -> &[Deposit] {
        &self.deposits
    }

    /// Final hit count per triangle id.
    pub fn counts(&self) -> &BTreeMap<u64, u64> {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.deposits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deposits.is_empty()
    }
}
