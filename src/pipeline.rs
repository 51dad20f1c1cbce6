use crate::csv_in::read_wwara_file;
use crate::csv_out::write_chirp_csv;
use crate::errors::{AppError, Violation};
use crate::mapper::{map_row, ChannelCounter};
use crate::model::{SourceRecord, TargetRecord};
use crate::validator::{check_input_file, check_output_file, check_row};
use log::{debug, error, info};
use std::path::Path;
use std::str::FromStr;

/// Whether a rejected row uses up a memory location.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IndexPolicy {
    /// Locations advance only for accepted rows; the output has no gaps.
    #[default]
    AcceptedOnly,
    /// Every mapped row takes a location, leaving gaps for rejected rows.
    EveryRow,
}

impl FromStr for IndexPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accepted" => Ok(IndexPolicy::AcceptedOnly),
            "every-row" => Ok(IndexPolicy::EveryRow),
            other => Err(AppError::Other(format!(
                "unknown index policy '{other}' (expected accepted|every-row)"
            ))),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConvertOptions {
    pub index_policy: IndexPolicy,
}

/// A mapped row that failed validation.
#[derive(Clone, Debug)]
pub struct Rejected {
    /// 1-based position in the slice handed to `convert`; rows the reader
    /// discarded are not counted.
    pub row_number: usize,
    pub record: TargetRecord,
    pub violation: Violation,
}

#[derive(Clone, Debug, Default)]
pub struct Conversion {
    pub accepted: Vec<TargetRecord>,
    pub rejected: Vec<Rejected>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub read: usize,
    pub written: usize,
    pub rejected: usize,
}

/// Convert rows in input order with a fresh counter.
pub fn convert(rows: &[SourceRecord], opts: &ConvertOptions) -> Conversion {
    let mut counter = ChannelCounter::new();
    convert_with(rows, &mut counter, opts)
}

/// Convert rows, drawing locations from a caller-owned counter so several
/// batches can continue one numbering.
pub fn convert_with(
    rows: &[SourceRecord],
    counter: &mut ChannelCounter,
    opts: &ConvertOptions,
) -> Conversion {
    let mut out = Conversion::default();

    for (i, src) in rows.iter().enumerate() {
        let record = map_row(src, counter);
        match check_row(&record) {
            Ok(()) => {
                counter.advance();
                out.accepted.push(record);
            }
            Err(violation) => {
                error!("Invalid row data: {} ({}): {}", record.location, record.name, violation);
                if opts.index_policy == IndexPolicy::EveryRow {
                    counter.advance();
                }
                out.rejected.push(Rejected { row_number: i + 1, record, violation });
            }
        }
    }

    debug!(
        "converted {} rows: {} accepted, {} rejected",
        rows.len(),
        out.accepted.len(),
        out.rejected.len()
    );
    out
}

/// Full file-to-file run. Path preconditions are checked before any row is
/// read; row failures are logged and skipped.
pub fn run(input: &Path, output: &Path, opts: &ConvertOptions) -> Result<RunSummary, AppError> {
    check_input_file(input)?;
    check_output_file(output)?;

    debug!("Reading input file: {}", input.display());
    let rows = read_wwara_file(input)?;
    info!("Number of memory channels read: {}", rows.len());

    let conversion = convert(&rows, opts);
    write_chirp_csv(&conversion.accepted, output)?;

    let summary = RunSummary {
        read: rows.len(),
        written: conversion.accepted.len(),
        rejected: conversion.rejected.len(),
    };
    info!(
        "Number of memory channels written: {} of {} ({} rejected)",
        summary.written, summary.read, summary.rejected
    );
    Ok(summary)
}
