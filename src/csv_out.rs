use crate::errors::AppError;
use crate::model::{TargetRecord, CHIRP_COLUMNS};
use csv::{Terminator, WriterBuilder};
use log::info;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

/// Write the CHIRP table to a new file. Fails rather than overwrite.
pub fn write_chirp_csv(records: &[TargetRecord], out_path: &Path) -> Result<(), AppError> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(out_path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => AppError::OutputExists(out_path.to_path_buf()),
            _ => AppError::IO(format!("open out csv '{}': {}", out_path.display(), e)),
        })?;
    write_chirp(records, file)?;
    info!("Output file written: {}", out_path.display());
    Ok(())
}

/// Header once, then one line per memory. The header is written even for an
/// empty table so CHIRP still recognises the file.
pub fn write_chirp<W: Write>(records: &[TargetRecord], out: W) -> Result<(), AppError> {
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);

    wtr.write_record(CHIRP_COLUMNS)
        .map_err(|e| AppError::Csv(format!("csv write header: {}", e)))?;

    for r in records {
        wtr.write_record(r.to_row())
            .map_err(|e| AppError::Csv(format!("csv write row {}: {}", r.location, e)))?;
    }

    wtr.flush().map_err(|e| AppError::IO(format!("csv flush: {}", e)))?;
    Ok(())
}
