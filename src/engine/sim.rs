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

use log::{debug, info};

use crate::{
    engine::event::SettlementEvent,
    error::{Error, Result},
    mesh::Triangle,
    oracle::{Oracle, PlaneOracle},
    particle::ParticleStore,
};

/// Slack when dividing `T` by `dt`, so that e.g. `0.3 / 0.1` does not round
/// up to an extra step.
const STEP_EPS: f64 = 1e-9;

/// Index of the last evaluated step: evaluations happen at `k·dt` for
/// `k = 0..=last_step(dt, T)`, i.e. `⌈T/dt⌉ + 1` evaluations in total.
pub fn last_step(dt: f64, t_end: f64) -> usize {
    let ratio = t_end / dt;
    (ratio - STEP_EPS).ceil().max(0.0) as usize
}

/// Outcome of a finished run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Steps actually evaluated (the run stops early once the store is empty).
    pub steps_evaluated: usize,
    pub initial_particles: usize,
    pub settled: usize,
    pub in_flight: usize,
    /// Simulated time of the last evaluated step.
    pub final_time: f64,
}

/// Time-stepped settlement loop over a borrowed triangle table.
///
/// Per step, every particle still in flight scans the triangles in canonical
/// order; the first overlapping triangle settles it. Settled particles are
/// dropped, then the survivors advance by `dt`.
#[derive(Debug)]
pub struct Simulation<'a, O: Oracle> {
    triangles: &'a [Triangle],
    store: ParticleStore,
    oracle: O,
    dt: f64,
    last_step: usize,
    next_step: usize,
    initial_particles: usize,
    events: Vec<SettlementEvent>,
}

impl<'a, O: Oracle> Simulation<'a, O> {
    /// Errors with [`Error::InvalidParam`] unless `dt > 0`, `t_end ≥ dt` and
    /// both are finite.
    pub fn new(
        store: ParticleStore,
        triangles: &'a [Triangle],
        dt: f64,
        t_end: f64,
        oracle: O,
    ) -> Result<Self> {
        validate_times(dt, t_end)?;
        let initial_particles = store.len();
        Ok(Self {
            triangles,
            store,
            oracle,
            dt,
            last_step: last_step(dt, t_end),
            next_step: 0,
            initial_particles,
            events: Vec::new(),
        })
    }

    /// Particles still in flight.
    pub fn particles(&self) -> &ParticleStore {
        &self.store
    }

    /// Events emitted so far, in emission order.
    pub fn events(&self) -> &[SettlementEvent] {
        &self.events
    }

    pub fn is_finished(&self) -> bool {
        self.next_step > self.last_step || self.store.is_empty()
    }

    /// Evaluates one step. Returns the number of particles settled in it, or
    /// `None` once the run is over.
    pub fn step(&mut self) -> Result<Option<usize>> {
        if self.is_finished() {
            return Ok(None);
        }
        let step = self.next_step;
        let time = step as f64 * self.dt;

        let mut keep = Vec::with_capacity(self.store.len());
        let before = self.events.len();
        for particle in self.store.iter() {
            let mut hit = None;
            for triangle in self.triangles {
                if self.oracle.overlaps(particle, triangle)? {
                    hit = Some(triangle);
                    break;
                }
            }
            match hit {
                Some(triangle) => {
                    self.events.push(SettlementEvent {
                        step,
                        time,
                        particle_id: particle.id,
                        triangle: triangle.clone(),
                    });
                    keep.push(false);
                }
                None => keep.push(true),
            }
        }

        let settled = self.events.len() - before;
        if settled > 0 {
            self.store.retain_flagged(&keep);
            debug!(
                "step {step} (t={time:.6}): {settled} settled, {} in flight",
                self.store.len()
            );
        }
        self.store.advance(self.dt);
        self.next_step += 1;
        Ok(Some(settled))
    }

    /// Runs to `T` and returns the event stream with a summary.
    pub fn run(mut self) -> Result<(Vec<SettlementEvent>, RunSummary)> {
        while self.step()?.is_some() {}

        let steps_evaluated = self.next_step;
        let summary = RunSummary {
            steps_evaluated,
            initial_particles: self.initial_particles,
            settled: self.events.len(),
            in_flight: self.store.len(),
            final_time: steps_evaluated.saturating_sub(1) as f64 * self.dt,
        };
        info!(
            "simulation finished: {} of {} particles settled over {} steps ({} in flight)",
            summary.settled, summary.initial_particles, summary.steps_evaluated, summary.in_flight
        );
        Ok((self.events, summary))
    }
}

fn validate_times(dt: f64, t_end: f64) -> Result<()> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(Error::InvalidParam(format!(
            "time step must be finite and > 0, got {dt}"
        )));
    }
    if !t_end.is_finite() || t_end < dt {
        return Err(Error::InvalidParam(format!(
            "end time must be finite and >= dt ({dt}), got {t_end}"
        )));
    }
    Ok(())
}

/// Runs the settlement loop with the plane-distance oracle.
pub fn simulate(
    particles: ParticleStore,
    triangles: &[Triangle],
    dt: f64,
    t_end: f64,
) -> Result<Vec<SettlementEvent>> {
    simulate_with(particles, triangles, dt, t_end, PlaneOracle)
}

/// Runs the settlement loop with any oracle.
pub fn simulate_with<O: Oracle>(
    particles: ParticleStore,
    triangles: &[Triangle],
    dt: f64,
    t_end: f64,
    oracle: O,
) -> Result<Vec<SettlementEvent>> {
    let (events, _) = Simulation::new(particles, triangles, dt, t_end, oracle)?.run()?;
    Ok(events)
}
