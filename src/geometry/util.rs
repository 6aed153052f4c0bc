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

use num_traits::Float;

use crate::geometry::point_3::Point3;

/// Barycentric weights `(u, v, w)` of `p` with respect to `abc`, so that
/// `a·u + b·v + c·w` is the projection of `p` onto the triangle's plane.
/// `None` for a degenerate triangle.
pub fn barycentric_coords<T: Float>(
    p: &Point3<T>,
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
) -> Option<(T, T, T)> {
    let v0 = *b - *a;
    let v1 = *c - *a;
    let v2 = *p - *a;

    let d00 = v0.dot(&v0);
    let d01 = v0.dot(&v1);
    let d11 = v1.dot(&v1);
    let d20 = v2.dot(&v0);
    let d21 = v2.dot(&v1);

    let denom = d00 * d11 - d01 * d01;
    if denom.is_zero() {
        return None;
    }

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    Some((T::one() - v - w, v, w))
}

/// Closest point to `p` on the segment `ab`.
pub fn closest_point_on_segment<T: Float>(
    p: &Point3<T>,
    a: &Point3<T>,
    b: &Point3<T>,
) -> Point3<T> {
    let ab = *b - *a;
    let len2 = ab.dot(&ab);
    if len2.is_zero() {
        return *a;
    }
    let t = (ab.dot(&(*p - *a)) / len2).max(T::zero()).min(T::one());
    *a + ab.scale(t)
}

/// Closest point to `p` on the closed triangle `abc`.
///
/// Inside the prism over the triangle this is the plane projection; otherwise
/// it lies on the nearest edge. Degenerate triangles are treated as their edges.
pub fn closest_point_on_triangle<T: Float>(
    p: &Point3<T>,
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
) -> Point3<T> {
    if let Some((u, v, w)) = barycentric_coords(p, a, b, c) {
        if u >= T::zero() && v >= T::zero() && w >= T::zero() {
            return *a + (*b - *a).scale(v) + (*c - *a).scale(w);
        }
    }

    let mut best = closest_point_on_segment(p, a, b);
    let mut best_d2 = (*p - best).norm_squared();
    for q in [closest_point_on_segment(p, b, c), closest_point_on_segment(p, c, a)] {
        let d2 = (*p - q).norm_squared();
        if d2 < best_d2 {
            best = q;
            best_d2 = d2;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> (Point3<f64>, Point3<f64>, Point3<f64>) {
        (
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn closest_point_inside_is_projection() {
        let (a, b, c) = unit_triangle();
        let q = closest_point_on_triangle(&Point3::new(0.25, 0.5, 5.0), &a, &b, &c);
        assert_eq!(q, Point3::new(0.25, 0.5, 0.0));
    }

    #[test]
    fn barycentric_weights() {
        let (a, b, c) = unit_triangle();
        let (u, v, w) = barycentric_coords(&Point3::new(0.25, 0.5, -2.0), &a, &b, &c).unwrap();
        assert_eq!((u, v, w), (0.25, 0.25, 0.5));
        let flat = Point3::new(2.0, 0.0, 0.0);
        assert!(barycentric_coords(&c, &a, &b, &flat).is_none());
    }

    #[test]
    fn segment_clamps_to_endpoints() {
        let (a, b, _) = unit_triangle();
        assert_eq!(closest_point_on_segment(&Point3::new(-3.0, 1.0, 0.0), &a, &b), a);
        let q = closest_point_on_segment(&Point3::new(0.5, 4.0, 0.0), &a, &b);
        assert_eq!(q, Point3::new(0.5, 0.0, 0.0));
        assert_eq!(closest_point_on_segment(&b, &a, &a), a);
    }

    #[test]
    fn closest_point_outside_hits_edge_or_vertex() {
        let (a, b, c) = unit_triangle();
        let q = closest_point_on_triangle(&Point3::new(2.0, -1.0, 0.0), &a, &b, &c);
        assert_eq!(q, b);
        let q = closest_point_on_triangle(&Point3::new(1.0, 1.0, 0.0), &a, &b, &c);
        assert!((q.x - 0.5).abs() < 1e-12 && (q.y - 0.5).abs() < 1e-12);
    }
}
