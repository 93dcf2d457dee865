//! Streaming archive decoding: zip bytes in, one aggregate row out.
//!
//! An archive may legitimately hold more than one CSV file. All file entries
//! are treated as a single logical row stream in entry order: the first row of
//! the combined stream is the header, and every later row is decoded against
//! it. Rows stream straight into the aggregator one at a time; the decoded
//! trades are never collected.

use std::io::Cursor;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use tracing::trace;
use zip::ZipArchive;

use crate::aggregate::DayAggregator;
use crate::errors::{DecodeError, Error};
use crate::models::day_row::DayRow;
use crate::models::trade::RawTrade;

/// Decompresses `bytes`, folds every trade row through a [`DayAggregator`]
/// for `target_day`, and returns the finished aggregate row.
pub fn aggregate_archive(bytes: &[u8], target_day: NaiveDate) -> Result<DayRow, Error> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut aggregator = DayAggregator::new(target_day);
    let mut header: Option<StringRecord> = None;

    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        trace!(entry = %entry.name(), "decoding archive entry");

        // Header handling is done by hand because the header belongs to the
        // combined stream, not to each entry.
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(entry);

        for record in reader.into_records() {
            let record = record?;
            if let Some(columns) = &header {
                let trade: RawTrade = record.deserialize(Some(columns))?;
                aggregator.consume(&trade)?;
            } else {
                header = Some(record);
            }
        }
    }

    if header.is_none() {
        return Err(DecodeError::MissingHeader.into());
    }
    Ok(aggregator.finish())
}
