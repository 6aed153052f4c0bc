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

//! Persisting and reading back settlement results.
//!
//! Two HDF5 layouts share one group scheme: a snapshot holds one
//! `Triangle_<id>` group per mesh triangle, a settled file one
//! `Triangle_<id>_<occurrence>` group per event. Every group has a
//! `Coordinates` (9 doubles) and an `Area` dataset; settled groups add an
//! integer `Counter`.

pub mod aggregate;
pub mod heatmap;
pub mod reader;
pub mod writer;

pub use aggregate::{Aggregator, Deposit};
pub use heatmap::{HeatCell, HeatMap};
pub use reader::{TriangleRecord, parse_group_name, read, read_settled, read_snapshot};
pub use writer::{staging_path, write_aggregated, write_run, write_settled, write_snapshot};
