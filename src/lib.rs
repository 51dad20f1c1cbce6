//! Convert a WWARA repeater directory export into a CHIRP memory import CSV.
//!
//! The pipeline maps each WWARA listing to a CHIRP memory ([`map_row`]),
//! checks it against CHIRP's field constraints ([`validate`]) and keeps the
//! accepted rows in input order ([`convert`]). [`run`] wraps the same steps
//! for a file-to-file conversion.

pub mod chirp;
pub mod csv_in;
pub mod csv_out;
pub mod errors;
pub mod mapper;
pub mod model;
pub mod pipeline;
pub mod validator;

pub use errors::{AppError, Violation};
pub use mapper::{map_row, ChannelCounter};
pub use model::{SourceRecord, TargetRecord};
pub use pipeline::{convert, convert_with, run, ConvertOptions, Conversion, IndexPolicy, Rejected, RunSummary};
pub use validator::{check_row, validate};
