//! YAML Export functionality
//!
//! Same snapshot as the JSON export, in a form that is easier to edit by hand
//! before feeding it back with `--data`.

use std::io::Write;

use crate::error::{EmDiaError, EmDiaResult};
use crate::storage::Storage;

/// Export every record as YAML with a short header comment
pub fn export_yaml<W: Write>(storage: &Storage, writer: &mut W) -> EmDiaResult<()> {
    let snapshot = storage.snapshot();
    let export_err = |e: std::io::Error| EmDiaError::Export(e.to_string());

    writeln!(writer, "# EmDia data export").map_err(export_err)?;
    if let Some(at) = snapshot.exported_at {
        writeln!(writer, "# Generated: {}", at).map_err(export_err)?;
    }
    writeln!(writer, "# Load it again with: emdia --data <this file> ...").map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &snapshot).map_err(|e| EmDiaError::Export(e.to_string()))
}
