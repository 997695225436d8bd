//! Page fetching from URLs, files, and stdin.
//!
//! The engine treats "fetch the page" as an injected capability: anything
//! implementing [`Fetcher`] can feed it. [`HttpFetcher`] is the reqwest-backed
//! implementation; it issues one GET (optionally preceded by a HEAD check)
//! with a fixed User-Agent, never retries, and reports every failure as a
//! [`FetchOutcome::Failed`] value instead of an error.

use std::fs;
use std::future::Future;
use std::path::PathBuf;

use url::Url;

use crate::{QuarryError, Result};

/// Client signature sent with every request unless overridden.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User-Agent header value.
    pub user_agent: String,
    /// Request timeout in seconds. `None` keeps the transport default.
    pub timeout: Option<u64>,
    /// Issue a HEAD request first and stop unless it answers 200.
    pub head_check: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { user_agent: DEFAULT_USER_AGENT.to_string(), timeout: None, head_check: false }
    }
}

/// Result of one fetch attempt.
///
/// A body exists only for a successful fetch and a failure reason only for a
/// failed one. `http_status` is 0 when no response was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page answered 200 and its body was read.
    Fetched { http_status: u16, body: String },
    /// Transport failure or a non-200 status.
    Failed { http_status: u16, reason: String },
}

impl FetchOutcome {
    /// Builds a failed outcome from an error.
    pub fn from_error(http_status: u16, err: &QuarryError) -> Self {
        FetchOutcome::Failed { http_status, reason: err.to_string() }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self, FetchOutcome::Fetched { .. })
    }

    pub fn http_status(&self) -> u16 {
        match self {
            FetchOutcome::Fetched { http_status, .. } | FetchOutcome::Failed { http_status, .. } => *http_status,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            FetchOutcome::Fetched { body, .. } => Some(body),
            FetchOutcome::Failed { .. } => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            FetchOutcome::Fetched { .. } => None,
            FetchOutcome::Failed { reason, .. } => Some(reason),
        }
    }
}

/// Capability that turns a validated URL into a [`FetchOutcome`].
///
/// Implementations must not retry; one failed attempt is terminal.
pub trait Fetcher {
    fn fetch(&self, url: &Url) -> impl Future<Output = FetchOutcome> + Send;
}

/// Validates a caller-supplied URL.
///
/// The URL must be absolute and use the `http` or `https` scheme.
///
/// # Errors
///
/// Returns [`QuarryError::InvalidUrl`] otherwise.
pub fn validate_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url.trim()).map_err(|e| QuarryError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(QuarryError::InvalidUrl(format!(
            "unsupported scheme '{}' (must start with http:// or https://)",
            other
        ))),
    }
}

#[cfg(feature = "fetch")]
pub use http::HttpFetcher;

#[cfg(feature = "fetch")]
mod http {
    use std::time::Duration;

    use reqwest::header::USER_AGENT;
    use reqwest::{Client, StatusCode};
    use url::Url;

    use super::{FetchConfig, FetchOutcome, Fetcher};
    use crate::{QuarryError, Result};

    /// reqwest-backed [`Fetcher`].
    ///
    /// The client is built once and reused, so one `HttpFetcher` can serve
    /// many concurrent invocations.
    #[derive(Debug, Clone)]
    pub struct HttpFetcher {
        client: Client,
        config: FetchConfig,
    }

    impl HttpFetcher {
        /// Builds a fetcher from its configuration.
        ///
        /// # Errors
        ///
        /// Returns [`QuarryError::Http`] if the TLS backend cannot be initialised.
        pub fn new(config: FetchConfig) -> Result<Self> {
            let mut builder = Client::builder();
            if let Some(secs) = config.timeout {
                builder = builder.timeout(Duration::from_secs(secs));
            }
            let client = builder.build()?;

            Ok(Self { client, config })
        }

        pub fn config(&self) -> &FetchConfig {
            &self.config
        }

        /// Human-readable reason for a request that produced no response.
        fn transport_reason(&self, err: reqwest::Error) -> String {
            match self.config.timeout {
                Some(timeout) if err.is_timeout() => QuarryError::Timeout { timeout }.to_string(),
                _ => err.to_string(),
            }
        }

        /// Returns a failed outcome when the HEAD check rejects the page.
        async fn head_check(&self, url: &Url) -> Option<FetchOutcome> {
            tracing::debug!(%url, "sending HEAD check");
            match self.client.head(url.clone()).header(USER_AGENT, &self.config.user_agent).send().await {
                Ok(response) if response.status() == StatusCode::OK => None,
                Ok(response) => {
                    let status = response.status().as_u16();
                    Some(FetchOutcome::from_error(status, &QuarryError::PreflightRejected { status }))
                }
                Err(e) => Some(FetchOutcome::Failed { http_status: 0, reason: self.transport_reason(e) }),
            }
        }
    }

    impl Fetcher for HttpFetcher {
        async fn fetch(&self, url: &Url) -> FetchOutcome {
            if self.config.head_check
                && let Some(rejected) = self.head_check(url).await
            {
                tracing::warn!(%url, status = rejected.http_status(), "HEAD check failed");
                return rejected;
            }

            tracing::debug!(%url, "sending GET");
            let response =
                match self.client.get(url.clone()).header(USER_AGENT, &self.config.user_agent).send().await {
                    Ok(response) => response,
                    Err(e) => {
                        let reason = self.transport_reason(e);
                        tracing::warn!(%url, %reason, "transport failure");
                        return FetchOutcome::Failed { http_status: 0, reason };
                    }
                };

            let status = response.status();
            if status != StatusCode::OK {
                tracing::warn!(%url, status = status.as_u16(), "non-success status");
                return FetchOutcome::from_error(status.as_u16(), &QuarryError::NonSuccessStatus {
                    status: status.as_u16(),
                });
            }

            match response.text().await {
                Ok(body) => {
                    tracing::debug!(%url, bytes = body.len(), "page fetched");
                    FetchOutcome::Fetched { http_status: status.as_u16(), body }
                }
                Err(e) => FetchOutcome::Failed { http_status: status.as_u16(), reason: e.to_string() },
            }
        }
    }
}

/// Reads HTML content from a local file.
///
/// Callers should validate and sanitize the path when accepting user input.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(QuarryError::FileNotFound(path_buf))
    } else {
        let bytes = fs::read(&path_buf)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Reads HTML content from standard input.
///
/// This function reads all available input from stdin until EOF.
/// Useful for piping content from other commands.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
