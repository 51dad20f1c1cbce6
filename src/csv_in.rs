use crate::errors::AppError;
use crate::model::{SourceRecord, WWARA_COLUMNS};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, trace, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub fn read_wwara_file(path: &Path) -> Result<Vec<SourceRecord>, AppError> {
    let f = File::open(path).map_err(|e| AppError::IO(format!("open {}: {}", path.display(), e)))?;
    read_wwara_reader(BufReader::new(f))
}

/// Read a WWARA export. Line 1 is a `DATA_SPEC_VERSION=...` style metadata
/// line and is always skipped, whatever its encoding; line 2 is the header.
/// Short rows are padded with empty cells, extra cells are dropped.
pub fn read_wwara_reader<R: BufRead>(mut reader: R) -> Result<Vec<SourceRecord>, AppError> {
    let mut meta = Vec::new();
    if reader.read_until(b'\n', &mut meta)? == 0 {
        warn!("input is empty; no metadata line, no header");
        return Ok(Vec::new());
    }
    debug!("skipping metadata line: {}", String::from_utf8_lossy(&meta).trim_end());

    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let missing: Vec<&str> = WWARA_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        warn!("header lacks {} WWARA columns, read as empty: {}", missing.len(), missing.join(","));
    }

    let mut out: Vec<SourceRecord> = Vec::new();
    let mut rec = StringRecord::new();
    let mut row = 0usize;
    loop {
        match rdr.read_record(&mut rec) {
            Ok(false) => break,
            Ok(true) => row += 1,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                row += 1;
                warn!("discarding row {}: {}", row, e);
                continue;
            }
        }

        if rec.len() != headers.len() {
            trace!("row {}: {} cells for {} columns", row, rec.len(), headers.len());
            rec.truncate(headers.len());
            while rec.len() < headers.len() {
                rec.push_field("");
            }
        }

        match rec.deserialize::<SourceRecord>(Some(&headers)) {
            Ok(src) => {
                trace!("row {}: {:?}", row, src);
                out.push(src);
            }
            Err(e) => warn!("discarding row {}: {}", row, e),
        }
    }

    if out.is_empty() {
        warn!("input produced 0 records");
    }
    Ok(out)
}
