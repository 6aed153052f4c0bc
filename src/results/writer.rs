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

use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use log::{info, warn};

use crate::{
    engine::SettlementEvent,
    error::{Error, Result},
    mesh::Triangle,
    results::aggregate::Aggregator,
};

/// Snapshot layout: one `Triangle_<id>` group per triangle with
/// `Coordinates` and `Area`.
pub fn write_snapshot<P: AsRef<Path>>(triangles: &[Triangle], path: P) -> Result<()> {
    let path = path.as_ref();
    staged(path, |file| {
        for t in triangles {
            let group = file.create_group(&format!("Triangle_{}", t.id))?;
            write_geometry(&group, t)?;
        }
        Ok(())
    })?;
    info!("wrote snapshot of {} triangles to {}", triangles.len(), path.display());
    Ok(())
}

/// Settled layout: one `Triangle_<id>_<occurrence>` group per event, adding a
/// `Counter` dataset equal to the occurrence.
pub fn write_settled<P: AsRef<Path>>(events: &[SettlementEvent], path: P) -> Result<()> {
    write_aggregated(&Aggregator::from_events(events), path)
}

pub fn write_aggregated<P: AsRef<Path>>(aggregator: &Aggregator, path: P) -> Result<()> {
    let path = path.as_ref();
    staged(path, |file| {
        for deposit in aggregator.deposits() {
            let group = file.create_group(&deposit.group_name())?;
            write_geometry(&group, &deposit.triangle)?;
            let counter = i64::try_from(deposit.occurrence).unwrap_or(i64::MAX);
            group
                .new_dataset::<i64>()
                .shape(())
                .create("Counter")?
                .write_scalar(&counter)?;
        }
        Ok(())
    })?;
    info!(
        "wrote {} deposits on {} triangles to {}",
        aggregator.len(),
        aggregator.counts().len(),
        path.display()
    );
    Ok(())
}

/// Writes the settled results and, when asked, the mesh snapshot of one run.
///
/// The snapshot goes first. If the settled file then fails, the fresh snapshot
/// is removed again so a failed run leaves neither file behind.
pub fn write_run(
    triangles: &[Triangle],
    events: &[SettlementEvent],
    output: &Path,
    snapshot: Option<&Path>,
) -> Result<()> {
    if let Some(snapshot) = snapshot {
        write_snapshot(triangles, snapshot)?;
    }
    let result = write_settled(events, output);
    if let (Err(_), Some(snapshot)) = (&result, snapshot) {
        if let Err(e) = fs::remove_file(snapshot) {
            warn!("could not remove {}: {e}", snapshot.display());
        }
    }
    result
}

fn write_geometry(group: &hdf5::Group, t: &Triangle) -> hdf5::Result<()> {
    let coords = t.coordinates();
    group
        .new_dataset::<f64>()
        .shape(coords.len())
        .create("Coordinates")?
        .write_raw(&coords[..])?;
    group
        .new_dataset::<f64>()
        .shape(())
        .create("Area")?
        .write_scalar(&t.area)?;
    Ok(())
}

/// `<path>.partial`, next to the target.
pub fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".partial");
    PathBuf::from(name)
}

/// Writes into a staging file, then renames it over `path`. On any failure the
/// staging file is removed and `path` is left untouched.
fn staged<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&hdf5::File) -> hdf5::Result<()>,
{
    let tmp = staging_path(path);
    let written = hdf5::File::create(&tmp).and_then(|file| {
        fill(&file)?;
        file.flush()
    });
    // The handle is closed once `file` drops inside the closure above.
    let result = match written {
        Ok(()) => fs::rename(&tmp, path)
            .map_err(|e| Error::Output(format!("cannot move results to {}: {e}", path.display()))),
        Err(e) => Err(Error::Output(format!("{}: {e}", path.display()))),
    };
    if result.is_err() && tmp.exists() {
        if let Err(e) = fs::remove_file(&tmp) {
            warn!("could not remove {}: {e}", tmp.display());
        }
    }
    result
}
