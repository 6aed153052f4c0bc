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

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    error::{Error, Result},
    geometry::{Aabb, Point3d, Vector3d},
    particle::{particle::Particle, store::ParticleStore},
};

/// Seeded description of a random particle population.
///
/// Positions are uniform inside `region`; each velocity component is uniform
/// in the matching `velocity_min..=velocity_max` range. The same seed always
/// yields the same population.
#[derive(Debug, Clone)]
pub struct ParticleCloud {
    pub count: usize,
    pub seed: u64,
    pub radius: f64,
    pub region: Aabb<f64>,
    pub velocity_min: Vector3d,
    pub velocity_max: Vector3d,
}

impl ParticleCloud {
    /// Motionless particles of one radius spread over `region`.
    pub fn new(count: usize, seed: u64, radius: f64, region: Aabb<f64>) -> Self {
        Self {
            count,
            seed,
            radius,
            region,
            velocity_min: Vector3d::zero(),
            velocity_max: Vector3d::zero(),
        }
    }

    pub fn with_velocity_range(mut self, min: Vector3d, max: Vector3d) -> Self {
        self.velocity_min = min;
        self.velocity_max = max;
        self
    }

    pub fn generate(&self) -> Result<ParticleStore> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        let (lo, hi) = (self.region.min.coords(), self.region.max.coords());
        let (vlo, vhi) = (self.velocity_min.coords(), self.velocity_max.coords());
        for k in 0..3 {
            if !(lo[k].is_finite() && hi[k].is_finite() && lo[k] <= hi[k]) {
                return Err(Error::InvalidParam(format!(
                    "region bounds on axis {k} must be finite and ordered"
                )));
            }
            if !(vlo[k].is_finite() && vhi[k].is_finite() && vlo[k] <= vhi[k]) {
                return Err(Error::InvalidParam(format!(
                    "velocity range on axis {k} must be finite and ordered"
                )));
            }
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut particles = Vec::new();
        for id in 0..self.count {
            let mut r = [0.0_f64; 3];
            for (k, r_k) in r.iter_mut().enumerate() {
                *r_k = rng.random_range(lo[k]..=hi[k]);
            }
            let mut v = [0.0_f64; 3];
            for (k, v_k) in v.iter_mut().enumerate() {
                *v_k = rng.random_range(vlo[k]..=vhi[k]);
            }
            particles.push(Particle::new(
                id,
                Point3d::from_vals(r),
                Vector3d::new(v[0], v[1], v[2]),
                self.radius,
            )?);
        }
        Ok(ParticleStore::new(particles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb<f64> {
        Aabb::new(Point3d::new(0.0, 0.0, 0.0), Point3d::new(1.0, 2.0, 3.0))
    }

    #[test]
    fn same_seed_same_cloud() -> Result<()> {
        let cloud = ParticleCloud::new(32, 99, 0.05, unit_box()).with_velocity_range(
            Vector3d::new(-1.0, -1.0, -1.0),
            Vector3d::new(1.0, 1.0, 1.0),
        );
        let a = cloud.generate()?;
        let b = cloud.generate()?;
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
        for p in a.iter() {
            assert!(unit_box().contains(&p.position));
            assert!(p.velocity.x.abs() <= 1.0);
        }
        Ok(())
    }

    #[test]
    fn inverted_region_rejected() {
        let region = Aabb::new(Point3d::new(1.0, 0.0, 0.0), Point3d::new(0.0, 1.0, 1.0));
        assert!(ParticleCloud::new(1, 0, 0.1, region).generate().is_err());
    }
}
