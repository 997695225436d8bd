//! Main extraction API.
//!
//! The [`Engine`] composes a [`Fetcher`], the mode-specific extractor and the
//! outcome assembler behind a single entry point,
//! [`Engine::run_extraction`]. Every failure comes back as data inside the
//! returned [`Outcome`], so callers can persist failed attempts too.
//!
//! # Example
//!
//! ```rust,no_run
//! use quarry_core::Engine;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = Engine::builder().timeout(10).build()?;
//! let outcome = engine.run_extraction("https://quotes.toscrape.com/", "quotes").await;
//! println!("{}", outcome.to_json_pretty()?);
//! # Ok(())
//! # }
//! ```

use url::Url;

use crate::extract::extract;
use crate::fetch::{Fetcher, validate_url};
use crate::outcome::{Outcome, assemble};
use crate::ExtractionMode;

#[cfg(feature = "fetch")]
use crate::QuarryError;
#[cfg(feature = "fetch")]
use crate::fetch::{FetchConfig, HttpFetcher};
#[cfg(feature = "fetch")]
use std::time::Duration;

/// Fetch-extract-assemble pipeline over an injected [`Fetcher`].
///
/// The engine holds no per-request state, so one instance can serve any
/// number of concurrent invocations.
#[derive(Debug, Clone)]
pub struct Engine<F> {
    fetcher: F,
}

impl<F: Fetcher> Engine<F> {
    /// Creates an engine around a custom fetcher.
    ///
    /// # Example
    ///
    /// ```rust
    /// use quarry_core::{Engine, FetchOutcome, Fetcher};
    /// use url::Url;
    ///
    /// struct Fixture;
    ///
    /// impl Fetcher for Fixture {
    ///     async fn fetch(&self, _url: &Url) -> FetchOutcome {
    ///         FetchOutcome::Fetched { http_status: 200, body: "<h1>Hi</h1>".into() }
    ///     }
    /// }
    ///
    /// let engine = Engine::with_fetcher(Fixture);
    /// ```
    pub fn with_fetcher(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Runs one extraction from caller-supplied strings.
    ///
    /// The mode is validated first and the URL second; either rejection
    /// returns an error outcome with status code 0 without touching the
    /// network.
    pub async fn run_extraction(&self, url: &str, mode: &str) -> Outcome {
        let mode = match mode.parse::<ExtractionMode>() {
            Ok(mode) => mode,
            Err(e) => {
                tracing::warn!(%mode, "rejected extraction mode");
                return Outcome::rejected(&e);
            }
        };

        let url = match validate_url(url) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(%url, "rejected URL");
                return Outcome::rejected(&e);
            }
        };

        self.run(&url, mode).await
    }

    /// Runs one extraction for an already validated URL and mode.
    pub async fn run(&self, url: &Url, mode: ExtractionMode) -> Outcome {
        tracing::debug!(%url, %mode, "running extraction");
        let fetch = self.fetcher.fetch(url).await;
        let outcome = assemble(fetch, |body| extract(body, mode));
        tracing::debug!(%url, status = %outcome.status, code = outcome.http_status, "extraction complete");
        outcome
    }

    /// Runs [`run_extraction`](Self::run_extraction) under a deadline.
    ///
    /// When the deadline expires the in-flight request is dropped and the
    /// outcome reports a timeout with status code 0.
    #[cfg(feature = "fetch")]
    pub async fn run_extraction_with_deadline(&self, url: &str, mode: &str, deadline: Duration) -> Outcome {
        match tokio::time::timeout(deadline, self.run_extraction(url, mode)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!(%url, ?deadline, "deadline expired");
                Outcome::rejected(&QuarryError::Timeout { timeout: deadline.as_secs_f64().ceil() as u64 })
            }
        }
    }
}

#[cfg(feature = "fetch")]
impl Engine<HttpFetcher> {
    /// Creates an engine with the default HTTP fetcher.
    ///
    /// # Errors
    ///
    /// Returns [`QuarryError::Http`] if the HTTP client cannot be built.
    pub fn new() -> crate::Result<Self> {
        Self::builder().build()
    }

    /// Creates a new builder for the HTTP-backed engine.
    ///
    /// # Example
    ///
    /// ```rust
    /// use quarry_core::Engine;
    ///
    /// let engine = Engine::builder()
    ///     .user_agent("my-crawler/1.0")
    ///     .head_check(true)
    ///     .build()
    ///     .unwrap();
    /// assert!(engine.fetcher().config().head_check);
    /// ```
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }
}

/// Builder for an HTTP-backed [`Engine`].
#[cfg(feature = "fetch")]
pub struct EngineBuilder {
    config: FetchConfig,
}

#[cfg(feature = "fetch")]
impl EngineBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: FetchConfig::default() }
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.user_agent = value.into();
        self
    }

    /// Sets the request timeout in seconds.
    pub fn timeout(mut self, secs: u64) -> Self {
        self.config.timeout = Some(secs);
        self
    }

    /// Sets whether a HEAD request precedes the GET.
    pub fn head_check(mut self, value: bool) -> Self {
        self.config.head_check = value;
        self
    }

    /// Replaces the whole fetch configuration.
    pub fn fetch_config(mut self, config: FetchConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the engine.
    pub fn build(self) -> crate::Result<Engine<HttpFetcher>> {
        Ok(Engine::with_fetcher(HttpFetcher::new(self.config)?))
    }
}

#[cfg(feature = "fetch")]
impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch a page and extract `mode` from it with default settings.
///
/// This is a shortcut for `Engine::new()?.run_extraction(url, mode)`; a
/// client construction failure is reported inside the outcome.
#[cfg(feature = "fetch")]
pub async fn run_extraction(url: &str, mode: &str) -> Outcome {
    match Engine::new() {
        Ok(engine) => engine.run_extraction(url, mode).await,
        Err(e) => Outcome::rejected(&e),
    }
}
