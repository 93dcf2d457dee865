//! Candidate discovery: which archive dates does the remote source publish?
//!
//! The index page is plain directory-listing HTML whose anchors link to
//! `trades-YYYY-MM-DD.csv.zip` files. The date is parsed out of that
//! well-defined file-name pattern rather than by slicing the href at fixed
//! offsets, so layout changes around the links cannot silently corrupt dates.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use snafu::{Backtrace, ResultExt, Snafu, ensure};
use tracing::debug;

static ARCHIVE_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"trades-(\d{4}-\d{2}-\d{2})\.csv\.zip").expect("static pattern"));

/// Errors raised while building the candidate list. All of them are fatal for
/// a run: without the index there is nothing to schedule.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum DiscoveryError {
    #[snafu(display("Index request failed: {source}"))]
    IndexRequest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    #[snafu(display("Index server returned {status} for {url}"))]
    IndexStatus {
        status: reqwest::StatusCode,
        url: String,
        backtrace: Backtrace,
    },

    #[snafu(display("Failed to read index body: {source}"))]
    IndexBody {
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}

/// Fetches the archive index page and returns the published archive dates,
/// deduplicated and ascending.
pub async fn discover_archive_dates(
    client: &Client,
    index_url: &str,
) -> Result<Vec<NaiveDate>, DiscoveryError> {
    let response = client
        .get(index_url)
        .send()
        .await
        .context(IndexRequestSnafu)?;
    ensure!(
        response.status().is_success(),
        IndexStatusSnafu {
            status: response.status(),
            url: index_url,
        }
    );
    let html = response.text().await.context(IndexBodySnafu)?;

    let dates = parse_archive_dates(&html);
    debug!(candidates = dates.len(), "discovered archive links");
    Ok(dates)
}

/// Extracts every archive date named in the document, deduplicated, ascending.
pub fn parse_archive_dates(html: &str) -> Vec<NaiveDate> {
    let mut dates = BTreeSet::new();
    for capture in ARCHIVE_LINK.captures_iter(html) {
        // The pattern guarantees the shape; out-of-range dates (month 13 etc.)
        // are still rejected by chrono and skipped.
        if let Ok(date) = NaiveDate::parse_from_str(&capture[1], "%Y-%m-%d") {
            dates.insert(date);
        }
    }
    dates.into_iter().collect()
}
