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

use depomap::geometry::util::closest_point_on_triangle;
use depomap::geometry::{Aabb, Plane, Point3d, Vector3d};
use depomap::kernel::is_degenerate;
use depomap::mesh::{Triangle, heron_area};

#[test]
fn test_plane_distance_is_unsigned() {
    let plane = Plane::from_points(
        &Point3d::new(0.0, 0.0, 0.0),
        &Point3d::new(1.0, 0.0, 0.0),
        &Point3d::new(0.0, 1.0, 0.0),
    );
    assert_eq!(plane.normal, Vector3d::new(0.0, 0.0, 1.0));
    assert_eq!(plane.signed_distance(&Point3d::new(3.0, -2.0, -0.5)), Some(-0.5));
    assert_eq!(plane.distance(&Point3d::new(3.0, -2.0, -0.5)), Some(0.5));
    assert_eq!(plane.distance(&Point3d::new(0.2, 0.2, 2.0)), Some(2.0));
}

#[test]
fn test_plane_of_collinear_points_has_no_distance() {
    let plane = Plane::from_points(
        &Point3d::new(0.0, 0.0, 0.0),
        &Point3d::new(1.0, 1.0, 1.0),
        &Point3d::new(2.0, 2.0, 2.0),
    );
    assert!(plane.is_degenerate());
    assert_eq!(plane.distance(&Point3d::new(5.0, 0.0, 0.0)), None);
}

#[test]
fn test_triangle_sides_are_non_negative() {
    let t = Triangle::new(
        1,
        Point3d::new(0.0, 0.0, 0.0),
        Point3d::new(1.0, 0.0, 0.0),
        Point3d::new(0.0, 1.0, 0.0),
    );
    assert_eq!(t.a, 1.0);
    assert_eq!(t.b, 1.0);
    assert!((t.c - 2.0_f64.sqrt()).abs() < 1e-15);
    assert!((t.area - 0.5).abs() < 1e-12);
    assert!(heron_area(t.a, t.b, t.c) >= 0.0);
}

#[test]
fn test_exact_degeneracy_beats_float_underflow() {
    let t = Triangle::new(
        1,
        Point3d::new(0.0, 0.0, 0.0),
        Point3d::new(1e-200, 0.0, 0.0),
        Point3d::new(0.0, 1e-200, 0.0),
    );
    // The float normal underflows to zero; the rational one does not.
    assert!(t.plane().is_degenerate());
    assert!(!t.degenerate);

    let p = Point3d::new(1.0, 2.0, 3.0);
    assert_eq!(is_degenerate(&p, &p, &Point3d::new(0.0, 0.0, 1.0)), Some(true));
    assert_eq!(
        is_degenerate(&p, &Point3d::new(f64::NAN, 0.0, 0.0), &p),
        None
    );
}

#[test]
fn test_closest_point_regions() {
    let a = Point3d::new(0.0, 0.0, 0.0);
    let b = Point3d::new(1.0, 0.0, 0.0);
    let c = Point3d::new(0.0, 1.0, 0.0);

    // interior projects straight down
    let q = closest_point_on_triangle(&Point3d::new(0.25, 0.25, 3.0), &a, &b, &c);
    assert_eq!(q, Point3d::new(0.25, 0.25, 0.0));
    // beyond vertex b
    let q = closest_point_on_triangle(&Point3d::new(2.0, -1.0, 0.0), &a, &b, &c);
    assert_eq!(q, b);
    // facing edge bc
    let q = closest_point_on_triangle(&Point3d::new(1.0, 1.0, 0.0), &a, &b, &c);
    assert!((q.x - 0.5).abs() < 1e-12 && (q.y - 0.5).abs() < 1e-12);
}

#[test]
fn test_aabb_enclosing() {
    let pts = [
        Point3d::new(1.0, -1.0, 0.0),
        Point3d::new(-2.0, 4.0, 0.5),
        Point3d::new(0.0, 0.0, -3.0),
    ];
    let bb = Aabb::enclosing(pts.iter()).unwrap();
    assert_eq!(bb.min, Point3d::new(-2.0, -1.0, -3.0));
    assert_eq!(bb.max, Point3d::new(1.0, 4.0, 0.5));
    assert!(bb.contains(&Point3d::new(0.0, 0.0, 0.0)));
    assert!(!bb.contains(&Point3d::new(0.0, 5.0, 0.0)));
    assert!(Aabb::<f64>::enclosing(std::iter::empty()).is_none());
}
