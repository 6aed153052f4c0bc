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

use std::{fmt::Display, path::Path, str::FromStr};

use anyhow::{Context, Result, anyhow, bail};
use log::info;

use depomap::{
    Oracle, OracleKind, ParticleCloud, ParticleStore, RunConfig, Simulation, TriangleTable,
    geometry::{Aabb, Point3d, Vector3d},
    io::load_mesh,
    results::{self, HeatMap},
    write_particles,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_help();
        std::process::exit(2);
    }
    let rest = &args[2..];
    match args[1].as_str() {
        "run" => run_config(rest),
        "simulate" => run_simulate(rest),
        "snapshot" => run_snapshot(rest),
        "generate" => run_generate(rest),
        "report" => run_report(rest),
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_help();
            std::process::exit(2);
        }
    }
}

fn print_help() {
    println!("depomap - particle deposition on triangulated surfaces");
    println!();
    println!("USAGE:");
    println!("  depomap run <config.toml>");
    println!("  depomap simulate <mesh> <particles> <dt> <T> <output.h5>");
    println!("  depomap snapshot <mesh> <output.h5>");
    println!("  depomap generate <count> <seed> <radius> <output.txt> [--mesh <mesh>] [--speed <v>]");
    println!("  depomap report <results.h5> [--mesh-snapshot <snapshot.h5>]");
    println!();
    println!("Meshes: .msh (Gmsh 2.2 / 4.1 ASCII), .stl, .obj, .off");
    println!("Log level: RUST_LOG (default info)");
}

fn positional<T>(args: &[String], i: usize, name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = args
        .get(i)
        .ok_or_else(|| anyhow!("missing argument <{name}>"))?;
    raw.parse()
        .map_err(|e| anyhow!("invalid <{name}> '{raw}': {e}"))
}

/// Value following `--flag`, if the flag is present.
fn option<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>> {
    match args.iter().position(|a| a == flag) {
        None => Ok(None),
        Some(i) => args
            .get(i + 1)
            .map(|v| Some(v.as_str()))
            .ok_or_else(|| anyhow!("{flag} needs a value")),
    }
}

fn load_table(path: &Path) -> Result<TriangleTable> {
    load_mesh(path).with_context(|| format!("loading mesh {}", path.display()))
}

fn load_particles(path: &Path) -> Result<ParticleStore> {
    ParticleStore::load(path).with_context(|| format!("loading particles {}", path.display()))
}

/// Simulates and writes the settled file. Nothing is written unless both
/// inputs load and the run completes.
fn simulate_to<O: Oracle>(
    table: &TriangleTable,
    store: ParticleStore,
    dt: f64,
    t_end: f64,
    oracle: O,
    output: &Path,
    snapshot: Option<&Path>,
) -> Result<()> {
    let (events, summary) = Simulation::new(store, table.as_slice(), dt, t_end, oracle)?
        .run()
        .context("simulation aborted")?;
    results::write_run(table.as_slice(), &events, output, snapshot)
        .with_context(|| format!("writing {}", output.display()))?;
    info!(
        "{} settled, {} still in flight at t={:.6}",
        summary.settled, summary.in_flight, summary.final_time
    );
    Ok(())
}

fn run_config(args: &[String]) -> Result<()> {
    let path: String = positional(args, 0, "config.toml")?;
    let config = RunConfig::load(&path).with_context(|| format!("reading config {path}"))?;
    info!("running {path} with the {} oracle", config.oracle.name());

    let table = load_table(&config.mesh)?;
    let store = load_particles(&config.particles)?;
    simulate_to(
        &table,
        store,
        config.dt,
        config.t_end,
        config.oracle,
        &config.output,
        config.snapshot.as_deref(),
    )
}

fn run_simulate(args: &[String]) -> Result<()> {
    let mesh: String = positional(args, 0, "mesh")?;
    let particles: String = positional(args, 1, "particles")?;
    let dt: f64 = positional(args, 2, "dt")?;
    let t_end: f64 = positional(args, 3, "T")?;
    let output: String = positional(args, 4, "output.h5")?;

    let table = load_table(Path::new(&mesh))?;
    let store = load_particles(Path::new(&particles))?;
    simulate_to(
        &table,
        store,
        dt,
        t_end,
        OracleKind::Plane,
        Path::new(&output),
        None,
    )
}

fn run_snapshot(args: &[String]) -> Result<()> {
    let mesh: String = positional(args, 0, "mesh")?;
    let output: String = positional(args, 1, "output.h5")?;
    let table = load_table(Path::new(&mesh))?;
    results::write_snapshot(table.as_slice(), &output)
        .with_context(|| format!("writing {output}"))?;
    Ok(())
}

fn run_generate(args: &[String]) -> Result<()> {
    let count: usize = positional(args, 0, "count")?;
    let seed: u64 = positional(args, 1, "seed")?;
    let radius: f64 = positional(args, 2, "radius")?;
    let output: String = positional(args, 3, "output.txt")?;

    let region = match option(args, "--mesh")? {
        Some(mesh) => load_table(Path::new(mesh))?
            .bounds()
            .ok_or_else(|| anyhow!("mesh {mesh} has no vertices"))?,
        None => Aabb::new(Point3d::new(0.0, 0.0, 0.0), Point3d::new(1.0, 1.0, 1.0)),
    };
    let speed: f64 = match option(args, "--speed")? {
        Some(v) => v.parse().map_err(|e| anyhow!("invalid --speed '{v}': {e}"))?,
        None => 0.0,
    };
    if !speed.is_finite() || speed < 0.0 {
        bail!("--speed must be a finite value >= 0");
    }

    let cloud = ParticleCloud::new(count, seed, radius, region).with_velocity_range(
        Vector3d::new(-speed, -speed, -speed),
        Vector3d::new(speed, speed, speed),
    );
    let store = cloud.generate()?;
    write_particles(&output, store.as_slice()).with_context(|| format!("writing {output}"))?;
    info!("wrote {} particles to {output}", store.len());
    Ok(())
}

fn run_report(args: &[String]) -> Result<()> {
    let path: String = positional(args, 0, "results.h5")?;
    let settled = results::read_settled(&path).with_context(|| format!("reading {path}"))?;
    let snapshot = match option(args, "--mesh-snapshot")? {
        Some(s) => Some(results::read_snapshot(s).with_context(|| format!("reading {s}"))?),
        None => None,
    };

    let map = HeatMap::build(snapshot.as_deref(), &settled);
    println!("{:>10} {:>14} {:>8} {:>9}", "triangle", "area", "count", "intensity");
    for cell in map.cells() {
        println!(
            "{:>10} {:>14.6e} {:>8} {:>9.3}",
            cell.id, cell.area, cell.count, cell.intensity
        );
    }
    println!(
        "{} triangles, {} deposits, max {} per triangle",
        map.len(),
        map.total_count(),
        map.max_count()
    );
    Ok(())
}
