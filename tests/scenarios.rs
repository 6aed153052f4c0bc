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
use std::fs;
use std::path::{Path, PathBuf};

use depomap::engine::SettlementEvent;
use depomap::error::{ErrorKind, Result};
use depomap::geometry::Point3d;
use depomap::io::load_mesh;
use depomap::mesh::Triangle;
use depomap::particle::ParticleStore;
use depomap::results::{read, read_settled, write_settled};
use depomap::simulate;

/// The single triangle {(0,0,0), (1,0,0), (0,1,0)}, element tag 1.
const SINGLE_TRIANGLE: &str = "\
$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
3
1 0 0 0
2 1 0 0
3 0 1 0
$EndNodes
$Elements
1
1 2 2 0 1 1 2 3
$EndElements
";

struct Case {
    _dir: tempfile::TempDir,
    mesh: PathBuf,
    particles: PathBuf,
    output: PathBuf,
}

fn case(particles: &str) -> Case {
    let dir = tempfile::tempdir().unwrap();
    let mesh = dir.path().join("triangle.msh");
    let parts = dir.path().join("particles.txt");
    fs::write(&mesh, SINGLE_TRIANGLE).unwrap();
    fs::write(&parts, particles).unwrap();
    let output = dir.path().join("settled.h5");
    Case {
        _dir: dir,
        mesh,
        particles: parts,
        output,
    }
}

/// Load, simulate, persist.
fn run(
    mesh: &Path,
    particles: &Path,
    dt: f64,
    t_end: f64,
    output: &Path,
) -> Result<Vec<SettlementEvent>> {
    let table = load_mesh(mesh)?;
    let store = ParticleStore::load(particles)?;
    let events = simulate(store, table.as_slice(), dt, t_end)?;
    write_settled(&events, output)?;
    Ok(events)
}

fn max_counters(path: &Path) -> BTreeMap<u64, i64> {
    let mut max = BTreeMap::new();
    for r in read_settled(path).unwrap() {
        let c = r.counter.unwrap();
        let slot = max.entry(r.id).or_insert(0);
        *slot = c.max(*slot);
    }
    max
}

#[test]
fn s1_no_hit() {
    let c = case("0.5 0.5 10 0 0 0 0.1\n");
    let events = run(&c.mesh, &c.particles, 0.1, 0.3, &c.output).unwrap();
    assert!(events.is_empty());
    assert!(read(&c.output).unwrap().is_empty());
}

#[test]
fn s2_tangential_contact_at_step_zero() {
    let c = case("0.1 0.1 0.1 0 0 0 0.1\n");
    let events = run(&c.mesh, &c.particles, 0.1, 0.1, &c.output).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].step, 0);
    assert_eq!(events[0].triangle.id, 1);

    let file = hdf5::File::open(&c.output).unwrap();
    assert_eq!(file.member_names().unwrap(), vec!["Triangle_1_1".to_string()]);
    drop(file);
    let records = read_settled(&c.output).unwrap();
    assert_eq!(records[0].counter, Some(1));
    assert!((records[0].area - 0.5).abs() < 1e-12);
}

#[test]
fn s3_settlement_after_motion() {
    let c = case("0.2 0.2 1.0 0 0 -1 0.05\n");
    let events = run(&c.mesh, &c.particles, 0.1, 1.2, &c.output).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].step, 10);
    assert!((events[0].time - 1.0).abs() < 1e-12);
}

#[test]
fn s4_two_particles_same_triangle() {
    let c = case("0.25 0.25 0.5 0 0 -1 0.05\n0.3 0.3 0.8 0 0 -1 0.05\n");
    let events = run(&c.mesh, &c.particles, 0.1, 1.0, &c.output).unwrap();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.triangle.id == 1));
    assert_eq!(max_counters(&c.output), BTreeMap::from([(1, 2)]));
}

#[test]
fn s5_occurrences_persisted_distinctly() {
    let t17 = Triangle::new(
        17,
        Point3d::new(0.0, 0.0, 0.0),
        Point3d::new(1.0, 0.0, 0.0),
        Point3d::new(0.0, 1.0, 0.0),
    );
    let t42 = Triangle::new(
        42,
        Point3d::new(0.0, 0.0, 1.0),
        Point3d::new(1.0, 0.0, 1.0),
        Point3d::new(0.0, 1.0, 1.0),
    );
    let events: Vec<SettlementEvent> = [&t17, &t17, &t42]
        .into_iter()
        .enumerate()
        .map(|(i, t)| SettlementEvent {
            step: 0,
            time: 0.0,
            particle_id: i,
            triangle: t.clone(),
        })
        .collect();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s5.h5");
    write_settled(&events, &path).unwrap();

    let file = hdf5::File::open(&path).unwrap();
    let mut names = file.member_names().unwrap();
    names.sort();
    assert_eq!(names, ["Triangle_17_1", "Triangle_17_2", "Triangle_42_1"]);
    drop(file);

    assert_eq!(read(&path).unwrap().len(), 3);
    assert_eq!(max_counters(&path), BTreeMap::from([(17, 2), (42, 1)]));
}

#[test]
fn s6_malformed_particle() {
    let c = case("0.1 0.1 0.1 0 0 0 0.1\n0.1 0.1 0.1 0 0 0\n");
    let err = run(&c.mesh, &c.particles, 0.1, 0.3, &c.output).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputFormatError);
    assert!(!c.output.exists());
}
