use thiserror::Error;

use crate::models::resource::UnknownResource;
use crate::providers::ProviderError;

/// The unified error type for one day's fetch/decompress/aggregate pipeline.
///
/// Anything in here fails the day it occurred in; the caller decides whether
/// that is isolated (per-day processing) or fatal (it never is, today).
#[derive(Debug, Error)]
pub enum Error {
    /// The remote archive could not be fetched.
    #[error("archive fetch failed: {0}")]
    Fetch(#[from] ProviderError),

    /// The downloaded bytes were not a readable zip archive.
    #[error("archive decompression failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The decompressed stream was not well-formed CSV.
    #[error("archive CSV is malformed: {0}")]
    Csv(#[from] csv::Error),

    /// A consumed field inside an otherwise well-formed row was malformed.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// A field-level decoding failure inside a qualifying trade row.
///
/// These are deliberately day-fatal: a malformed price or quantity must never
/// be silently skipped or treated as zero.
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("malformed {field} value {value:?}")]
    Field { field: &'static str, value: String },

    #[error(transparent)]
    UnknownResource(#[from] UnknownResource),

    /// The combined archive stream had no rows, so no header could be read.
    #[error("archive contained no header row")]
    MissingHeader,
}
