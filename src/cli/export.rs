//! Export CLI commands

use std::io;
use std::path::PathBuf;

use clap::Subcommand;

use crate::error::{EmDiaError, EmDiaResult};
use crate::export::{export_ledger_csv, ExportFormat};
use crate::ledger::{filter_by_status, StatusFilter};
use crate::session::Session;
use crate::storage::write_atomic;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export everything as a JSON snapshot
    Json {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export everything as a YAML snapshot
    Yaml {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export the billing ledger as CSV
    Csv {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Only export charges with this status
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,
    },
}

/// Handle an export command
pub fn handle_export_command(session: &Session, cmd: ExportCommands) -> EmDiaResult<()> {
    let storage = &session.storage;

    match cmd {
        ExportCommands::Json { output } => write_snapshot(session, ExportFormat::Json, output),
        ExportCommands::Yaml { output } => write_snapshot(session, ExportFormat::Yaml, output),
        ExportCommands::Csv { output, status } => {
            let records = filter_by_status(storage.billings.all(), status);
            match output {
                Some(path) => {
                    let count = records.len();
                    write_atomic(&path, |writer| export_ledger_csv(records, writer))?;
                    println!("Exported {} charges to {}", count, path.display());
                    Ok(())
                }
                None => export_ledger_csv(records, io::stdout().lock()),
            }
        }
    }
}

fn write_snapshot(
    session: &Session,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> EmDiaResult<()> {
    match output {
        Some(path) => {
            format.write_to_path(&session.storage, &path)?;
            println!(
                "Exported {} records as {} to {}",
                session.storage.snapshot().record_count(),
                format,
                path.display()
            );
            Ok(())
        }
        None => {
            let mut stdout = io::stdout().lock();
            format.write(&session.storage, &mut stdout)?;
            io::Write::flush(&mut stdout)
                .map_err(|e| EmDiaError::Export(format!("Failed to flush output: {}", e)))
        }
    }
}
