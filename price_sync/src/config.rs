//! Run configuration.
//!
//! There is deliberately no CLI or environment surface here: the tool takes no
//! flags and keeps no state beyond the one cache file. Everything the pipeline
//! tunes comes through this one value so tests can swap in local endpoints and
//! paths instead of patching constants.

use std::path::PathBuf;

use trade_ingestor::providers::pnw;

/// Index page listing the published daily archives, sorted oldest-first.
pub const INDEX_URL: &str = "https://politicsandwar.com/data/trades/?C=M;O=A";

#[derive(Debug, Clone)]
pub struct Config {
    /// Page whose anchors name the candidate archives.
    pub index_url: String,
    /// Base URL the per-day archive names are appended to.
    pub archive_base_url: String,
    /// Location of the persisted aggregate table.
    pub cache_path: PathBuf,
    /// Maximum simultaneous in-flight day fetches.
    pub concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_url: INDEX_URL.to_string(),
            archive_base_url: pnw::BASE_URL.to_string(),
            cache_path: PathBuf::from("static/data.csv"),
            concurrency: 10,
        }
    }
}
