//! Mode-specific extraction over a fetched document.
//!
//! Each [`ExtractionMode`] is an independent view over the same body:
//!
//! - FullMarkup returns the body untouched.
//! - PlainText works on the visible markup (scripts, styles and comments
//!   removed), see [`crate::preprocess::plain_text`].
//! - Headings, Links and Quotes scan the original body and report values as
//!   they appear in the source, see [`crate::scan`].
//!
//! Malformed markup never fails: the selections simply come back shorter.

use serde::Serialize;

use crate::preprocess::{plain_text, remove_tags};
use crate::quotes::{QuoteRecord, assemble_quotes, decode_quote_entities};
use crate::scan::{Capture, Target, scan};
use crate::{ExtractionMode, Result};

/// Heading tags, in output group order.
const HEADING_TAGS: [&str; 2] = ["h1", "h2"];

const HREF: &str = "href";

const LINK_SELECTOR: &str = "a[href]";
const QUOTE_SELECTOR: &str = "span.text";
const AUTHOR_SELECTOR: &str = "small.author";
const TAG_BLOCK_SELECTOR: &str = "div.tags";
const TAG_SELECTOR: &str = "a.tag";

/// Payload produced by one extraction.
///
/// Serializes untagged: text modes become a JSON string, list modes a JSON
/// array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExtractionResult {
    /// FullMarkup payload.
    Markup(String),
    /// PlainText payload.
    Text(String),
    /// Headings payload, all h1 then all h2.
    Headings(Vec<String>),
    /// Links payload in document order.
    Links(Vec<String>),
    /// Quotes payload in document order.
    Quotes(Vec<QuoteRecord>),
}

impl ExtractionResult {
    /// Mode that produced this payload.
    pub fn mode(&self) -> ExtractionMode {
        match self {
            ExtractionResult::Markup(_) => ExtractionMode::FullMarkup,
            ExtractionResult::Text(_) => ExtractionMode::PlainText,
            ExtractionResult::Headings(_) => ExtractionMode::Headings,
            ExtractionResult::Links(_) => ExtractionMode::Links,
            ExtractionResult::Quotes(_) => ExtractionMode::Quotes,
        }
    }

    /// Number of items for list payloads, character count for text payloads.
    pub fn item_count(&self) -> usize {
        match self {
            ExtractionResult::Markup(s) | ExtractionResult::Text(s) => s.chars().count(),
            ExtractionResult::Headings(items) | ExtractionResult::Links(items) => items.len(),
            ExtractionResult::Quotes(records) => records.len(),
        }
    }

    /// Whether the payload holds nothing.
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}

/// Extract the requested view from a document body.
///
/// # Errors
///
/// Only fails on an internal selector error; markup shape is never an error.
///
/// # Example
///
/// ```rust
/// use quarry_core::{ExtractionMode, ExtractionResult, extract};
///
/// let result = extract("<h2>B</h2><h1>A</h1>", ExtractionMode::Headings).unwrap();
/// assert_eq!(result, ExtractionResult::Headings(vec!["A".into(), "B".into()]));
/// ```
pub fn extract(body: &str, mode: ExtractionMode) -> Result<ExtractionResult> {
    let result = match mode {
        ExtractionMode::FullMarkup => ExtractionResult::Markup(body.to_string()),
        ExtractionMode::PlainText => ExtractionResult::Text(plain_text(body)),
        ExtractionMode::Headings => ExtractionResult::Headings(extract_headings(body)?),
        ExtractionMode::Links => ExtractionResult::Links(extract_links(body)?),
        ExtractionMode::Quotes => ExtractionResult::Quotes(extract_quotes(body)?),
    };

    tracing::debug!(mode = %mode, items = result.item_count(), "extraction finished");
    Ok(result)
}

/// Extract with a caller-supplied mode string.
///
/// # Errors
///
/// Returns [`crate::QuarryError::InvalidMode`] if `mode` is outside the
/// supported vocabulary.
pub fn extract_with_mode_str(body: &str, mode: &str) -> Result<ExtractionResult> {
    extract(body, mode.parse()?)
}

/// Text of every h1 in document order, then every h2.
///
/// Nested markup is removed, text is trimmed and empty headings are skipped.
/// Entities are left as written.
pub fn extract_headings(body: &str) -> Result<Vec<String>> {
    let groups = scan(body, &HEADING_TAGS.map(Target::Inner))?;

    Ok(groups
        .iter()
        .flatten()
        .map(|heading| remove_tags(&heading.value).trim().to_string())
        .filter(|text| !text.is_empty())
        .collect())
}

/// The `href` of every anchor, in document order, skipping empty values.
///
/// Values are returned exactly as written in the source.
pub fn extract_links(body: &str) -> Result<Vec<String>> {
    let mut found = scan(body, &[Target::Attribute(LINK_SELECTOR, HREF)])?;

    Ok(found
        .pop()
        .unwrap_or_default()
        .into_iter()
        .map(|anchor| anchor.value)
        .filter(|href| !href.is_empty())
        .collect())
}

/// Quote records paired by index across quote, author and tag selections.
///
/// Quote text only has `&quot;` and `&#39;` decoded; authors and tags keep
/// their source text.
pub fn extract_quotes(body: &str) -> Result<Vec<QuoteRecord>> {
    let found = scan(body, &[
        Target::Inner(QUOTE_SELECTOR),
        Target::Inner(AUTHOR_SELECTOR),
        Target::Inner(TAG_BLOCK_SELECTOR),
        Target::Inner(TAG_SELECTOR),
    ])?;
    let [quotes, authors, blocks, tags] = <[Vec<Capture>; 4]>::try_from(found).unwrap_or_default();

    let quotes: Vec<String> = quotes
        .iter()
        .map(|span| decode_quote_entities(&span.value).trim().to_string())
        .collect();

    let authors: Vec<String> = authors.iter().map(|author| author.value.trim().to_string()).collect();

    let tag_blocks: Vec<Vec<String>> = blocks
        .iter()
        .map(|block| {
            tags.iter()
                .filter(|tag| block.contains(tag))
                .map(|tag| tag.value.trim().to_string())
                .collect()
        })
        .collect();

    Ok(assemble_quotes(quotes, authors, tag_blocks))
}
