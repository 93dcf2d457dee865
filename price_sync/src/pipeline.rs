//! The per-day processor and the batch run that drives it.
//!
//! One candidate is one *archive* date. The archive published on a date
//! contains the trades accepted the day before, so the cache is keyed and
//! checked under `archive date - 1` while the fetch is named by the archive
//! date itself. That off-by-one is the contract of the remote source, not a
//! convenience.
//!
//! Failure isolation: everything that can go wrong for a single day (fetch,
//! decompression, field decoding) is caught here, logged with the offending
//! archive date, and turned into "no row". The day stays out of the cache so
//! a later run retries it. Only discovery and persistence failures, which the
//! caller owns, can end a run.

use std::time::Instant;

use chrono::NaiveDate;
use shared_utils::concurrency::run_bounded;
use shared_utils::dates::{add_days, day_stamp};
use tracing::{info, warn};

use trade_ingestor::decode::aggregate_archive;
use trade_ingestor::errors::Error;
use trade_ingestor::models::day_row::DayRow;
use trade_ingestor::providers::ArchiveProvider;

use crate::store::CacheTable;

/// What processing one candidate produced.
#[derive(Debug)]
pub enum DayOutcome {
    /// The target day is already in the cache; no network I/O happened.
    AlreadyCached,
    /// A fresh aggregate row, ready to merge.
    Aggregated(DayRow),
}

/// Counts for one batch, one candidate in exactly one bucket.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Processes one candidate archive date against the current table.
pub async fn process_day(
    provider: &dyn ArchiveProvider,
    table: &CacheTable,
    archive_date: NaiveDate,
) -> Result<DayOutcome, Error> {
    let target_day = add_days(archive_date, -1);
    if table.contains(target_day) {
        return Ok(DayOutcome::AlreadyCached);
    }

    let bytes = provider.fetch_archive(archive_date).await?;
    let row = aggregate_archive(&bytes, target_day)?;
    Ok(DayOutcome::Aggregated(row))
}

/// Runs the day processor over all candidates with at most `ceiling` fetches
/// in flight, then merges every produced row into `table`.
///
/// Workers only read the table; merging happens after the batch drains, so no
/// mutation is reachable from concurrent code.
pub async fn run(
    provider: &dyn ArchiveProvider,
    candidates: Vec<NaiveDate>,
    ceiling: usize,
    table: &mut CacheTable,
) -> RunSummary {
    let outcomes = {
        let snapshot: &CacheTable = table;
        run_bounded(candidates, ceiling, |archive_date| async move {
            let started = Instant::now();
            match process_day(provider, snapshot, archive_date).await {
                Ok(DayOutcome::Aggregated(row)) => {
                    info!(
                        day = %day_stamp(row.date),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "processed archive"
                    );
                    Ok(Some(row))
                }
                Ok(DayOutcome::AlreadyCached) => Ok(None),
                Err(error) => {
                    warn!(
                        archive = %day_stamp(archive_date),
                        %error,
                        "day failed, left un-cached for a future run"
                    );
                    Err(error)
                }
            }
        })
        .await
    };

    let mut summary = RunSummary::default();
    for outcome in outcomes {
        match outcome {
            Some(Some(row)) => {
                table.merge(row);
                summary.processed += 1;
            }
            Some(None) => summary.skipped += 1,
            None => summary.failed += 1,
        }
    }
    summary
}
