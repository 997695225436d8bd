pub mod engine;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod mode;
pub mod outcome;
pub mod preprocess;
pub mod quotes;
pub mod scan;

#[cfg(feature = "fetch")]
pub use engine::{EngineBuilder, run_extraction};
pub use engine::Engine;
pub use error::{QuarryError, Result};
pub use extract::{ExtractionResult, extract, extract_with_mode_str};
#[doc(hidden)]
pub use extract::{extract_headings, extract_links, extract_quotes};
#[cfg(feature = "fetch")]
pub use fetch::HttpFetcher;
pub use fetch::{DEFAULT_USER_AGENT, FetchConfig, FetchOutcome, Fetcher, validate_url};
pub use fetch::{fetch_file, fetch_stdin};
pub use mode::ExtractionMode;
pub use outcome::{Outcome, OutcomeStatus, assemble};
pub use preprocess::{plain_text, visible_markup};
pub use quotes::{QuoteRecord, UNKNOWN_AUTHOR};
pub use scan::{Capture, Target, scan};
