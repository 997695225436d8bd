//! The uniform success/error envelope returned to callers.
//!
//! An [`Outcome`] is binary: either the fetch and the extraction both
//! succeeded, or the first failure is recorded as text. Finding zero items
//! is still a success.

use std::fmt;

use serde::Serialize;

use crate::fetch::FetchOutcome;
use crate::{ExtractionResult, QuarryError, Result};

/// Outcome status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Error,
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeStatus::Success => f.write_str("success"),
            OutcomeStatus::Error => f.write_str("error"),
        }
    }
}

/// Result envelope of one engine invocation.
///
/// Serializes with the column names the history store uses:
/// `status`, `status_code`, `result_data` and `error_message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub status: OutcomeStatus,
    #[serde(rename = "status_code")]
    pub http_status: u16,
    #[serde(rename = "result_data")]
    pub payload: Option<ExtractionResult>,
    pub error_message: Option<String>,
}

impl Outcome {
    /// Successful outcome carrying a payload.
    pub fn success(http_status: u16, payload: ExtractionResult) -> Self {
        Self { status: OutcomeStatus::Success, http_status, payload: Some(payload), error_message: None }
    }

    /// Failed outcome carrying only a message.
    pub fn failure(http_status: u16, message: impl Into<String>) -> Self {
        Self { status: OutcomeStatus::Error, http_status, payload: None, error_message: Some(message.into()) }
    }

    /// Failed outcome for an error raised before any response was obtained.
    pub fn rejected(err: &QuarryError) -> Self {
        Self::failure(0, err.to_string())
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }

    /// Serializes the outcome as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the outcome as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Combines a fetch outcome with the extraction of its body.
///
/// `extract` runs only when the fetch succeeded. A failed fetch keeps its
/// status code and reason; a failed extraction keeps the fetch status code
/// and reports the extraction error.
pub fn assemble<E>(fetch: FetchOutcome, extract: E) -> Outcome
where
    E: FnOnce(&str) -> Result<ExtractionResult>,
{
    match fetch {
        FetchOutcome::Failed { http_status, reason } => Outcome::failure(http_status, reason),
        FetchOutcome::Fetched { http_status, body } => match extract(&body) {
            Ok(payload) => Outcome::success(http_status, payload),
            Err(e) => Outcome::failure(http_status, e.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::QuoteRecord;

    #[test]
    fn test_fetch_failure_wins() {
        let fetch = FetchOutcome::Failed { http_status: 503, reason: "HTTP 503: Unable to fetch the webpage".into() };
        let outcome = assemble(fetch, |_| panic!("extraction must not run"));

        assert_eq!(outcome, Outcome {
            status: OutcomeStatus::Error,
            http_status: 503,
            payload: None,
            error_message: Some("HTTP 503: Unable to fetch the webpage".into()),
        });
    }

    #[test]
    fn test_extraction_failure_keeps_status() {
        let fetch = FetchOutcome::Fetched { http_status: 200, body: "<p>x</p>".into() };
        let outcome = assemble(fetch, |_| Err(QuarryError::InvalidMode("pdf".into())));

        assert_eq!(outcome.status, OutcomeStatus::Error);
        assert_eq!(outcome.http_status, 200);
        assert!(outcome.payload.is_none());
        assert_eq!(outcome.error_message.as_deref(), Some("Invalid extraction mode: pdf"));
    }

    #[test]
    fn test_success_with_empty_payload() {
        let fetch = FetchOutcome::Fetched { http_status: 200, body: String::new() };
        let outcome = assemble(fetch, |_| Ok(ExtractionResult::Links(Vec::new())));

        assert!(outcome.is_success());
        assert_eq!(outcome.payload, Some(ExtractionResult::Links(Vec::new())));
        assert_eq!(outcome.error_message, None);
    }

    #[test]
    fn test_extract_sees_body() {
        let fetch = FetchOutcome::Fetched { http_status: 200, body: "raw".into() };
        let outcome = assemble(fetch, |body| Ok(ExtractionResult::Markup(body.to_uppercase())));

        assert_eq!(outcome.payload, Some(ExtractionResult::Markup("RAW".into())));
    }

    #[test]
    fn test_rejected_has_zero_status() {
        let outcome = Outcome::rejected(&QuarryError::InvalidUrl("relative URL without a base".into()));
        assert_eq!(outcome.http_status, 0);
        assert_eq!(outcome.status.to_string(), "error");
    }

    #[test]
    fn test_json_shape() {
        let payload = ExtractionResult::Quotes(vec![QuoteRecord {
            quote: "q".into(),
            author: "a".into(),
            tags: vec!["t".into()],
        }]);
        let json: serde_json::Value = serde_json::from_str(&Outcome::success(200, payload).to_json().unwrap()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "status": "success",
                "status_code": 200,
                "result_data": [{"quote": "q", "author": "a", "tags": ["t"]}],
                "error_message": null,
            })
        );
    }
}
