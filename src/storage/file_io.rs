//! File I/O helpers
//!
//! Reads snapshot and settings files as JSON or YAML depending on extension,
//! and writes files atomically so a failed write never leaves a half-written
//! file behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{EmDiaError, EmDiaResult};

/// True for `.yaml` / `.yml` paths
pub fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Read JSON from a file that must exist
pub fn read_json<T, P>(path: P) -> EmDiaResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = open(path)?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| EmDiaError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Read YAML from a file that must exist
pub fn read_yaml<T, P>(path: P) -> EmDiaResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = open(path)?;

    serde_yaml::from_reader(BufReader::new(file))
        .map_err(|e| EmDiaError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Read JSON or YAML, chosen by the file extension
pub fn read_structured<T, P>(path: P) -> EmDiaResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if is_yaml(path) {
        read_yaml(path)
    } else {
        read_json(path)
    }
}

fn open(path: &Path) -> EmDiaResult<File> {
    if !path.exists() {
        return Err(EmDiaError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }

    File::open(path)
        .map_err(|e| EmDiaError::Storage(format!("Failed to open {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> EmDiaResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_atomic(path, |writer| {
        serde_json::to_writer_pretty(writer, data)
            .map_err(|e| EmDiaError::Storage(format!("Failed to serialize data: {}", e)))
    })
}

/// Write a file atomically, producing its contents with `fill`
///
/// The temp file lives in the target directory so the final rename stays on
/// one filesystem.
pub fn write_atomic<P, F>(path: P, fill: F) -> EmDiaResult<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> EmDiaResult<()>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            EmDiaError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = std::path::PathBuf::from(temp_name);

    let file = File::create(&temp_path)
        .map_err(|e| EmDiaError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    let written = fill(&mut writer).and_then(|_| {
        writer
            .flush()
            .map_err(|e| EmDiaError::Storage(format!("Failed to flush data: {}", e)))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| EmDiaError::Storage(format!("Failed to sync data: {}", e)))
    });

    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        EmDiaError::Storage(format!("Failed to rename temp file: {}", e))
    })
}
