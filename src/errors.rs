use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("output file already exists: {}", .0.display())]
    OutputExists(PathBuf),
    #[error("IO error: {0}")]
    IO(String),
    #[error("csv error: {0}")]
    Csv(String),
    #[error("other: {0}")]
    Other(String),
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self { AppError::IO(format!("{}", e)) }
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self { AppError::Csv(format!("{}", e)) }
}

/// First failing field of a CHIRP row. Carries the offending value for the log.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    #[error("invalid memory location: {0}")]
    Location(usize),
    #[error("invalid frequency: {0}")]
    Frequency(String),
    #[error("invalid duplex setting: {0}")]
    Duplex(String),
    #[error("invalid offset: {0}")]
    Offset(String),
    #[error("invalid tone: {0}")]
    Tone(String),
    #[error("invalid DTCS code: {0}")]
    DtcsCode(String),
    #[error("invalid DTCS polarity: {0}")]
    DtcsPolarity(String),
    #[error("invalid mode: {0}")]
    Mode(String),
    #[error("invalid name: {0}")]
    Name(String),
    #[error("invalid comment length: {0} chars")]
    Comment(usize),
}
