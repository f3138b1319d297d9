//! Raw board retrieval.
//!
//! Fetches each enabled station's live board page and stores the raw body
//! on disk for the generate step to read. Stations are fetched one at a
//! time, each to completion before the next. A failed fetch writes an
//! empty placeholder file instead, so the generator sees a valid board
//! with no services and the run carries on.

use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::{Settings, train_html_filename};
use crate::domain::Crs;

/// Default base URL for the live board site.
const DEFAULT_BASE_URL: &str = "https://www.realtimetrains.co.uk/search/simple";

/// Default per-request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Error from board fetching.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Site returned a non-success status
    #[error("unexpected status {status}")]
    Status { status: u16 },

    /// Board file could not be written
    #[error("failed to write board file: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration for the board fetcher.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Base URL for the board site (overridable for tests)
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl FetchConfig {
    /// Create a config with the production defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for station board pages.
#[derive(Debug, Clone)]
pub struct BoardFetcher {
    http: reqwest::Client,
    base_url: String,
}

impl BoardFetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch the raw board page for one station.
    pub async fn fetch_board(&self, crs: &Crs) -> Result<String, FetchError> {
        let url = format!("{}/gb-nr:{}", self.base_url, crs);

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Fetch every enabled station's board into `data_path`.
///
/// Disabled stations are not fetched at all. Per-station failures are
/// downgraded to an empty placeholder file and a warning; only a failure
/// to write the file itself aborts. Returns the number of boards fetched
/// successfully.
pub async fn fetch_all_boards(
    fetcher: &BoardFetcher,
    settings: &Settings,
    data_path: &Path,
) -> Result<usize, FetchError> {
    let mut fetched = 0;

    for station in &settings.train_stations {
        let Some(crs) = station.enabled_crs() else {
            continue;
        };

        let path = data_path.join(train_html_filename(&crs));

        match fetcher.fetch_board(&crs).await {
            Ok(body) => {
                fs::write(&path, body)?;
                fetched += 1;
                info!(%crs, station = %station.name, "fetched board");
            }
            Err(e) => {
                warn!(%crs, station = %station.name, error = %e, "fetch failed, writing empty board");
                fs::write(&path, "")?;
            }
        }
    }

    Ok(fetched)
}
