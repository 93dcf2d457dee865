//! The persistent per-day aggregate table.
//!
//! What this module provides:
//! - [`CacheTable::load`]: reads the persisted CSV if present, otherwise an
//!   empty table. A missing file is a normal first run, never an error.
//! - [`CacheTable::merge`]: insert-or-overwrite one day's row in memory.
//! - [`CacheTable::persist`]: writes the whole table back, rows in ascending
//!   date order so repeated runs over the same input produce a byte-identical
//!   file.
//!
//! The file is both the load and the save format; round-trip fidelity for
//! dates and two-decimal price text is covered by tests.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

use trade_ingestor::models::day_row::DayRow;

/// Errors while loading or persisting the cache file. Load errors other than
/// a missing file, and every persist error, are fatal for the run.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cache file I/O failed")]
    Io(#[from] std::io::Error),

    #[error("cache file is malformed: {0}")]
    Csv(#[from] csv::Error),
}

/// In-memory mapping from day to aggregate row, keys unique.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CacheTable {
    rows: IndexMap<NaiveDate, DayRow>,
}

impl CacheTable {
    /// Loads the persisted table, or an empty one when `path` does not exist.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "no cache file yet, starting empty");
            return Ok(Self::default());
        }

        let mut reader = csv::Reader::from_path(path)?;
        let mut rows = IndexMap::new();
        for row in reader.deserialize::<DayRow>() {
            let row = row?;
            rows.insert(row.date, row);
        }
        Ok(Self { rows })
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.rows.contains_key(&day)
    }

    pub fn get(&self, day: NaiveDate) -> Option<&DayRow> {
        self.rows.get(&day)
    }

    /// Inserts or overwrites the row for its day.
    pub fn merge(&mut self, row: DayRow) {
        self.rows.insert(row.date, row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serializes the full table to `path`, overwriting any prior version.
    ///
    /// Rows are written in ascending date order regardless of merge order, so
    /// the output is deterministic for a given set of days.
    pub fn persist(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut days: Vec<NaiveDate> = self.rows.keys().copied().collect();
        days.sort_unstable();

        let mut writer = csv::Writer::from_path(path)?;
        for day in days {
            writer.serialize(&self.rows[&day])?;
        }
        writer.flush()?;
        Ok(())
    }
}
