use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use shared_utils::dates::day_stamp;
use snafu::{ResultExt, ensure};
use tracing::debug;

use crate::providers::{
    ArchiveProvider, BodySnafu, ClientBuildSnafu, ProviderError, ProviderInitError, RequestSnafu,
    StatusSnafu,
};

/// Production base URL for the Politics & War daily trade archives.
pub const BASE_URL: &str = "https://politicsandwar.com/data/trades";

/// Archive provider backed by the Politics & War data endpoint.
///
/// Archives are named `trades-YYYY-MM-DD.csv.zip` under a fixed base URL; the
/// base is injectable so tests can point at a local mock server.
pub struct PnwArchiveProvider {
    client: Client,
    base_url: String,
}

impl PnwArchiveProvider {
    /// Creates a provider with its own HTTP client and the production base URL.
    pub fn new() -> Result<Self, ProviderInitError> {
        let client = Client::builder().build().context(ClientBuildSnafu)?;
        Ok(Self::with_client(client, BASE_URL))
    }

    /// Creates a provider over an existing client and base URL (no trailing slash).
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// The HTTP client, shared with discovery so a run uses one connection pool.
    pub fn client(&self) -> &Client {
        &self.client
    }

    fn archive_url(&self, archive_date: NaiveDate) -> String {
        format!("{}/trades-{}.csv.zip", self.base_url, day_stamp(archive_date))
    }
}

#[async_trait]
impl ArchiveProvider for PnwArchiveProvider {
    async fn fetch_archive(&self, archive_date: NaiveDate) -> Result<Vec<u8>, ProviderError> {
        let url = self.archive_url(archive_date);
        debug!(%url, "fetching trade archive");

        let response = self.client.get(&url).send().await.context(RequestSnafu)?;
        ensure!(
            response.status().is_success(),
            StatusSnafu {
                status: response.status(),
                url,
            }
        );

        let bytes = response.bytes().await.context(BodySnafu)?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_url_is_named_by_the_archive_date() {
        let provider = PnwArchiveProvider::with_client(Client::new(), "http://localhost:9");
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(
            provider.archive_url(date),
            "http://localhost:9/trades-2024-03-05.csv.zip"
        );
    }
}
