use crate::error::SiftError;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client identity and limits for page fetches.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Trait for page retrieval backends.
pub trait PageFetcher: Send + Sync {
    /// Fetch the raw markup at `url`.
    fn fetch(&self, url: &str) -> Result<String, SiftError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Blocking HTTP fetcher. One GET per call, no retries.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, SiftError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(SiftError::HttpClient)?;
        Ok(HttpFetcher { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, SiftError> {
        info!(url, "fetching job page");

        let response = self.client.get(url).send().map_err(|source| {
            warn!(url, error = ?source, "job page request failed");
            SiftError::Fetch {
                url: url.to_string(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "job page returned error status");
            return Err(SiftError::FetchStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|source| SiftError::Fetch {
            url: url.to_string(),
            source,
        })
    }

    fn backend_name(&self) -> &str {
        "http"
    }
}
