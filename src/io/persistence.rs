//! Snapshot files keyed by a run name
//!
//! A snapshot is stored as `<dir>/<name>_points.bin`, a bincode dump of the
//! label grid and its side length. There is no checksum or version tag.

use crate::io::configuration::SNAPSHOT_SUFFIX;
use crate::io::error::{LozengeError, Result};
use crate::lattice::tiling::Snapshot;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Path of the snapshot file for `name` inside `dir`
pub fn snapshot_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}{SNAPSHOT_SUFFIX}"))
}

/// Write a snapshot to `<dir>/<name>_points.bin`
///
/// Returns the path that was written.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or the
/// snapshot cannot be encoded
pub fn save_snapshot(dir: &Path, name: &str, snapshot: &Snapshot) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| LozengeError::FileSystem {
        path: dir.to_path_buf(),
        operation: "create directory",
        source: e,
    })?;

    let path = snapshot_path(dir, name);
    let file = File::create(&path).map_err(|e| LozengeError::FileSystem {
        path: path.clone(),
        operation: "create file",
        source: e,
    })?;

    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, snapshot).map_err(|e| LozengeError::Snapshot {
        path: path.clone(),
        source: e,
    })?;
    writer.flush().map_err(|e| LozengeError::FileSystem {
        path: path.clone(),
        operation: "write file",
        source: e,
    })?;

    Ok(path)
}

/// Read the snapshot stored under `name` in `dir`
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_snapshot(dir: &Path, name: &str) -> Result<Snapshot> {
    let path = snapshot_path(dir, name);
    let file = File::open(&path).map_err(|e| LozengeError::FileSystem {
        path: path.clone(),
        operation: "open file",
        source: e,
    })?;

    bincode::deserialize_from(BufReader::new(file))
        .map_err(|e| LozengeError::Snapshot { path, source: e })
}
