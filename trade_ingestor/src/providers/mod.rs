//! Provider abstraction for daily trade archives.
//!
//! This module defines the [`ArchiveProvider`] trait, the unified interface
//! for fetching one published day's compressed trade archive. The production
//! implementation ([`pnw::PnwArchiveProvider`]) talks HTTP; tests substitute
//! in-memory implementations, which the trait's dynamic dispatch makes cheap.

pub mod pnw;

use async_trait::async_trait;
use chrono::NaiveDate;
use snafu::{Backtrace, Snafu};

/// Fetches the raw bytes of one day's published trade archive.
///
/// `archive_date` is the date embedded in the remote file name, which is one
/// day *after* the trading day the archive covers. Providers only name and
/// fetch; the off-by-one mapping belongs to the caller.
#[async_trait]
pub trait ArchiveProvider: Send + Sync {
    async fn fetch_archive(&self, archive_date: NaiveDate) -> Result<Vec<u8>, ProviderError>;
}

/// Errors that can occur while constructing a provider instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// failed to build the reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within an [`ArchiveProvider`] implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// The archive request could not be sent or the connection failed.
    #[snafu(display("Archive request failed: {source}"))]
    Request {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The archive server answered with a non-success status.
    #[snafu(display("Archive server returned {status} for {url}"))]
    Status {
        status: reqwest::StatusCode,
        url: String,
        backtrace: Backtrace,
    },

    /// The response body could not be read to completion.
    #[snafu(display("Failed to read archive body: {source}"))]
    Body {
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}
