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

use depomap::engine::SettlementEvent;
use depomap::error::{Error, ErrorKind};
use depomap::geometry::Point3d;
use depomap::mesh::Triangle;
use depomap::results::{
    HeatMap, read, read_settled, read_snapshot, staging_path, write_run, write_settled,
    write_snapshot,
};

fn tri(id: u64, dz: f64) -> Triangle {
    Triangle::new(
        id,
        Point3d::new(0.0, 0.0, dz),
        Point3d::new(2.0, 0.0, dz),
        Point3d::new(0.0, 1.0, dz),
    )
}

fn event(particle_id: usize, triangle: &Triangle) -> SettlementEvent {
    SettlementEvent {
        step: particle_id,
        time: particle_id as f64 * 0.1,
        particle_id,
        triangle: triangle.clone(),
    }
}

#[test]
fn test_snapshot_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mesh.h5");
    let tris = [tri(3, 0.0), tri(12, 1.5), tri(7, -2.0)];
    write_snapshot(&tris, &path).unwrap();
    assert!(!staging_path(&path).exists());

    let records = read_snapshot(&path).unwrap();
    let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 7, 12]);
    for r in &records {
        let original = tris.iter().find(|t| t.id == r.id).unwrap();
        assert_eq!(r.coordinates, original.coordinates());
        assert_eq!(r.area, original.area);
        assert_eq!(r.occurrence, None);
        assert_eq!(r.counter, None);
        assert_eq!(r.triangle().v2, original.v2);
    }
}

#[test]
fn test_settled_max_counter_equals_event_count() {
    let a = tri(5, 0.0);
    let b = tri(9, 1.0);
    let events = vec![
        event(0, &a),
        event(1, &b),
        event(2, &a),
        event(3, &a),
        event(4, &b),
    ];
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settled.h5");
    write_settled(&events, &path).unwrap();

    let records = read_settled(&path).unwrap();
    assert_eq!(records.len(), 5);
    let mut max: BTreeMap<u64, i64> = BTreeMap::new();
    for r in &records {
        let c = r.counter.unwrap();
        assert_eq!(Some(c as u64), r.occurrence);
        let slot = max.entry(r.id).or_insert(0);
        *slot = (*slot).max(c);
    }
    let mut expected: BTreeMap<u64, i64> = BTreeMap::new();
    for e in &events {
        *expected.entry(e.triangle.id).or_insert(0) += 1;
    }
    assert_eq!(max, expected);

    // sorted by (id, occurrence)
    let keys: Vec<(u64, Option<u64>)> = records.iter().map(|r| (r.id, r.occurrence)).collect();
    assert_eq!(
        keys,
        vec![(5, Some(1)), (5, Some(2)), (5, Some(3)), (9, Some(1)), (9, Some(2))]
    );
}

#[test]
fn test_duplicate_pair_is_written_once() {
    let a = tri(5, 0.0);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dup.h5");
    write_settled(&[event(0, &a), event(0, &a)], &path).unwrap();
    assert_eq!(read(&path).unwrap().len(), 1);
}

#[test]
fn test_heat_map_from_files() {
    let tris = [tri(1, 0.0), tri(2, 0.0), tri(3, 0.0)];
    let dir = tempfile::tempdir().unwrap();
    let snap = dir.path().join("snap.h5");
    let settled = dir.path().join("settled.h5");
    write_snapshot(&tris, &snap).unwrap();
    write_settled(
        &[event(0, &tris[2]), event(1, &tris[0]), event(2, &tris[2])],
        &settled,
    )
    .unwrap();

    let snapshot = read_snapshot(&snap).unwrap();
    let map = HeatMap::build(Some(snapshot.as_slice()), &read_settled(&settled).unwrap());
    let rows: Vec<(u64, u64)> = map.rows().map(|(id, _, _, n)| (id, n)).collect();
    assert_eq!(rows, vec![(1, 1), (2, 0), (3, 2)]);
    assert_eq!(map.max_count(), 2);
    assert_eq!(map.get(1).unwrap().intensity, 0.5);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = read(dir.path().join("nothing.h5")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputNotFound);
}

#[test]
fn test_not_an_hdf5_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fake.h5");
    fs::write(&path, b"definitely not hdf5").unwrap();
    assert!(matches!(read(&path), Err(Error::Hdf5InvalidOrEmpty { .. })));

    let empty = dir.path().join("empty.h5");
    fs::write(&empty, b"").unwrap();
    assert!(matches!(read(&empty), Err(Error::Hdf5InvalidOrEmpty { .. })));
}

#[test]
fn test_group_without_area() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.h5");
    {
        let file = hdf5::File::create(&path).unwrap();
        let g = file.create_group("Triangle_4").unwrap();
        g.new_dataset::<f64>()
            .shape(9)
            .create("Coordinates")
            .unwrap()
            .write_raw(&[0.0f64; 9][..])
            .unwrap();
    }
    let err = read(&path).unwrap_err();
    assert!(matches!(err, Error::Hdf5Structure(_)));
    assert!(err.to_string().contains("Area"));
}

#[test]
fn test_misnamed_group() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("odd.h5");
    {
        let file = hdf5::File::create(&path).unwrap();
        file.create_group("Facet_4").unwrap();
    }
    assert!(matches!(read(&path), Err(Error::Hdf5Structure(_))));
}

#[test]
fn test_snapshot_is_not_a_settled_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mesh.h5");
    write_snapshot(&[tri(1, 0.0)], &path).unwrap();
    assert!(matches!(read_settled(&path), Err(Error::Hdf5Structure(_))));
}

#[test]
fn test_failed_write_leaves_nothing_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("out.h5");
    let err = write_settled(&[event(0, &tri(1, 0.0))], &path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutputError);
    assert!(!path.exists());
    assert!(!staging_path(&path).exists());
}

#[test]
fn test_run_writes_snapshot_and_settled() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.h5");
    let snap = dir.path().join("mesh.h5");
    let mesh = [tri(1, 0.0), tri(2, 1.0)];
    write_run(&mesh, &[event(0, &mesh[1])], &out, Some(snap.as_path())).unwrap();
    assert_eq!(read_snapshot(&snap).unwrap().len(), 2);
    assert_eq!(read_settled(&out).unwrap().len(), 1);
}

#[test]
fn test_failed_run_write_removes_the_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("no_such_dir").join("out.h5");
    let snap = dir.path().join("mesh.h5");
    let mesh = [tri(1, 0.0)];
    let err = write_run(&mesh, &[event(0, &mesh[0])], &out, Some(snap.as_path())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutputError);
    assert!(!snap.exists());
    assert!(!out.exists());
}

#[test]
fn test_failed_snapshot_skips_the_settled_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.h5");
    let snap = dir.path().join("no_such_dir").join("mesh.h5");
    let mesh = [tri(1, 0.0)];
    assert!(write_run(&mesh, &[event(0, &mesh[0])], &out, Some(snap.as_path())).is_err());
    assert!(!out.exists());
}

#[test]
fn test_rewrite_replaces_previous_results() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.h5");
    let a = tri(1, 0.0);
    write_settled(&[event(0, &a), event(1, &a)], &path).unwrap();
    write_settled(&[event(0, &a)], &path).unwrap();
    assert_eq!(read(&path).unwrap().len(), 1);
}
