//! The closed set of extraction modes.
//!
//! A mode selects one "view" over a fetched document. Callers usually
//! arrive with a string (a form value, a CLI flag, a menu choice); the
//! [`FromStr`] implementation maps that vocabulary onto [`ExtractionMode`]
//! and rejects everything else with [`QuarryError::InvalidMode`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::QuarryError;

/// Output shape requested from the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtractionMode {
    /// The fetched body, byte for byte.
    #[serde(rename = "html")]
    FullMarkup,
    /// Visible text with tags removed and whitespace collapsed.
    #[serde(rename = "text")]
    PlainText,
    /// Text of every `<h1>`, then every `<h2>`.
    #[serde(rename = "headings")]
    Headings,
    /// `href` value of every anchor.
    #[serde(rename = "links")]
    Links,
    /// Quote/author/tags records.
    #[serde(rename = "quotes")]
    Quotes,
}

impl ExtractionMode {
    /// Every mode, in menu order.
    pub const ALL: [ExtractionMode; 5] = [
        ExtractionMode::FullMarkup,
        ExtractionMode::PlainText,
        ExtractionMode::Headings,
        ExtractionMode::Links,
        ExtractionMode::Quotes,
    ];

    /// Canonical wire name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMode::FullMarkup => "html",
            ExtractionMode::PlainText => "text",
            ExtractionMode::Headings => "headings",
            ExtractionMode::Links => "links",
            ExtractionMode::Quotes => "quotes",
        }
    }

    /// Short human description, used by the CLI help and verbose output.
    pub fn description(&self) -> &'static str {
        match self {
            ExtractionMode::FullMarkup => "Full HTML code",
            ExtractionMode::PlainText => "All text content",
            ExtractionMode::Headings => "H1 and H2 headings",
            ExtractionMode::Links => "All anchor URLs",
            ExtractionMode::Quotes => "Quotes with authors and tags",
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractionMode {
    type Err = QuarryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "html" | "full" | "markup" | "1" | "one" => Ok(Self::FullMarkup),
            "text" | "plain" | "2" | "two" => Ok(Self::PlainText),
            "headings" | "3" | "three" => Ok(Self::Headings),
            "links" | "4" | "four" => Ok(Self::Links),
            "quotes" | "5" | "five" => Ok(Self::Quotes),
            _ => Err(QuarryError::InvalidMode(s.to_string())),
        }
    }
}
