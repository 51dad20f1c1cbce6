//! CHIRP field constraints.
//!
//! Each `validate_*` predicate logs an error and returns `false` on failure.
//! `check_row` applies them in a fixed order and stops at the first failure.

use crate::chirp;
use crate::errors::{AppError, Violation};
use crate::model::{TargetRecord, ToneMode};
use log::{error, warn};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

pub const CHANNEL_MIN: usize = 0;
pub const CHANNEL_MAX: usize = 499;
pub const FREQUENCY_MIN: f64 = 10.0;
pub const FREQUENCY_MAX: f64 = 1300.0;
pub const OFFSET_MIN: f64 = 0.0;
pub const OFFSET_MAX: f64 = 9999.9;
pub const NAME_MAX: usize = 16;
pub const COMMENT_MAX: usize = 255;

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?$").expect("decimal pattern"));
static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w\s-]+$").expect("name pattern"));

/// Unsigned decimal text within `[min, max]`.
fn decimal_in_range(s: &str, min: f64, max: f64) -> bool {
    if !DECIMAL.is_match(s) {
        return false;
    }
    match s.parse::<f64>() {
        Ok(v) => v >= min && v <= max,
        Err(_) => false,
    }
}

pub fn validate_location(location: usize) -> bool {
    if !(CHANNEL_MIN..=CHANNEL_MAX).contains(&location) {
        error!("Invalid memory location: {}", location);
        return false;
    }
    true
}

pub fn validate_frequency(frequency: &str) -> bool {
    if !decimal_in_range(frequency, FREQUENCY_MIN, FREQUENCY_MAX) {
        error!("Invalid frequency: {}", frequency);
        return false;
    }
    true
}

pub fn validate_duplex(duplex: &str) -> bool {
    if !matches!(duplex, "+" | "-" | "") {
        error!("Invalid duplex setting: {}", duplex);
        return false;
    }
    true
}

pub fn validate_offset(offset: &str) -> bool {
    if offset.is_empty() {
        return true;
    }
    if !decimal_in_range(offset, OFFSET_MIN, OFFSET_MAX) {
        error!("Invalid offset: {}", offset);
        return false;
    }
    true
}

/// Tone column: a CHIRP tone frequency, a tone mode, or empty.
pub fn validate_tone(tone: &str) -> bool {
    let is_tone_freq = tone.parse::<f64>().map(chirp::is_tone).unwrap_or(false);
    if !is_tone_freq && !matches!(tone, "Tone" | "DTCS" | "") {
        error!("Invalid tone: {}", tone);
        return false;
    }
    true
}

pub fn validate_tone_mode(tone_mode: &str) -> bool {
    if !matches!(tone_mode, "Tone" | "DTCS" | "") {
        error!("Invalid tone mode: {}", tone_mode);
        return false;
    }
    true
}

/// `023` and `23` name the same code.
pub fn validate_dtcs_code(dtcs_code: &str) -> bool {
    let known = dtcs_code.trim().parse::<u16>().map(chirp::is_dtcs_code).unwrap_or(false);
    if !known {
        error!("Invalid DTCS code: {}", dtcs_code);
        return false;
    }
    true
}

pub fn validate_dtcs_polarity(dtcs_polarity: &str) -> bool {
    if !matches!(dtcs_polarity, "NN" | "NR" | "RN" | "RR") {
        error!("Invalid DTCS polarity: {}", dtcs_polarity);
        return false;
    }
    true
}

pub fn validate_mode(mode: &str) -> bool {
    if !mode.is_empty() && !chirp::is_mode(mode) {
        error!("Invalid mode: {}", mode);
        return false;
    }
    true
}

pub fn validate_name(name: &str) -> bool {
    if name.chars().count() > NAME_MAX {
        error!("Invalid name length: {}", name);
        return false;
    }
    if !NAME.is_match(name) {
        error!("Invalid characters in name: {}", name);
        return false;
    }
    true
}

pub fn validate_comment(comment: &str) -> bool {
    if comment.chars().count() > COMMENT_MAX {
        error!("Invalid comment length: {}", comment);
        return false;
    }
    true
}

/// Validate a whole memory, reporting the first field that fails.
pub fn check_row(row: &TargetRecord) -> Result<(), Violation> {
    if !validate_location(row.location) {
        return Err(Violation::Location(row.location));
    }
    if !validate_frequency(&row.frequency) {
        return Err(Violation::Frequency(row.frequency.clone()));
    }
    let duplex = row.duplex.as_str();
    if !validate_duplex(duplex) {
        return Err(Violation::Duplex(duplex.to_string()));
    }
    if !duplex.is_empty() && !validate_offset(&row.offset) {
        return Err(Violation::Offset(row.offset.clone()));
    }
    let tone = row.tone.as_str();
    if !validate_tone(tone) {
        return Err(Violation::Tone(tone.to_string()));
    }
    if row.tone == ToneMode::Dtcs {
        if !validate_dtcs_code(&row.dtcs_code) {
            return Err(Violation::DtcsCode(row.dtcs_code.clone()));
        }
        let polarity = row.dtcs_polarity.as_str();
        if !validate_dtcs_polarity(polarity) {
            return Err(Violation::DtcsPolarity(polarity.to_string()));
        }
    }
    let mode = row.mode_str();
    if !validate_mode(mode) {
        return Err(Violation::Mode(mode.to_string()));
    }
    if !validate_name(&row.name) {
        return Err(Violation::Name(row.name.clone()));
    }
    if !validate_comment(&row.comment) {
        return Err(Violation::Comment(row.comment.chars().count()));
    }
    Ok(())
}

pub fn validate(row: &TargetRecord) -> bool {
    check_row(row).is_ok()
}

/// Run precondition: the WWARA export must exist.
pub fn check_input_file(path: &Path) -> Result<(), AppError> {
    if !path.is_file() {
        error!("Input file not found: {}", path.display());
        return Err(AppError::InputNotFound(path.to_path_buf()));
    }
    Ok(())
}

/// Run precondition: never overwrite an existing output.
pub fn check_output_file(path: &Path) -> Result<(), AppError> {
    if path.exists() {
        warn!("Output file already exists: {}", path.display());
        return Err(AppError::OutputExists(path.to_path_buf()));
    }
    Ok(())
}
