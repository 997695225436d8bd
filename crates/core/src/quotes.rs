//! Quote records and their positional assembly.
//!
//! Quote pages list three independent sequences: quote spans, author spans
//! and tag blocks. They are paired by index, with the quote sequence
//! driving the count.

use serde::{Deserialize, Serialize};

/// Author used when a quote has no matching author span.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// A (quote, author, tags) tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub quote: String,
    pub author: String,
    pub tags: Vec<String>,
}

/// Zip quotes with authors and tag lists.
///
/// Produces exactly one record per quote. Missing (or blank) authors fall
/// back to [`UNKNOWN_AUTHOR`], missing tag blocks to an empty list, and
/// surplus authors or tag blocks are ignored.
pub fn assemble_quotes(quotes: Vec<String>, authors: Vec<String>, tag_blocks: Vec<Vec<String>>) -> Vec<QuoteRecord> {
    let mut authors = authors.into_iter();
    let mut tag_blocks = tag_blocks.into_iter();

    quotes
        .into_iter()
        .map(|quote| {
            let author = authors
                .next()
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
            let tags = tag_blocks.next().unwrap_or_default();
            QuoteRecord { quote, author, tags }
        })
        .collect()
}

/// Decode the two entities quote spans are allowed to carry.
pub fn decode_quote_entities(text: &str) -> String {
    text.replace("&quot;", "\"").replace("&#39;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_equal_lengths_pair_by_index() {
        let records = assemble_quotes(
            strings(&["q1", "q2"]),
            strings(&["a1", "a2"]),
            vec![strings(&["t1"]), strings(&["t2", "t3"])],
        );

        assert_eq!(
            records,
            vec![
                QuoteRecord { quote: "q1".into(), author: "a1".into(), tags: strings(&["t1"]) },
                QuoteRecord { quote: "q2".into(), author: "a2".into(), tags: strings(&["t2", "t3"]) },
            ]
        );
    }

    #[test]
    fn test_shortfall_falls_back() {
        let records = assemble_quotes(strings(&["q1", "q2"]), strings(&["Ada"]), Vec::new());

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].author, "Ada");
        assert!(records[0].tags.is_empty());
        assert_eq!(records[1].author, UNKNOWN_AUTHOR);
        assert!(records[1].tags.is_empty());
    }

    #[test]
    fn test_surplus_is_ignored() {
        let records = assemble_quotes(
            strings(&["only"]),
            strings(&["a1", "a2", "a3"]),
            vec![strings(&["t1"]), strings(&["t2"])],
        );

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].author, "a1");
        assert_eq!(records[0].tags, strings(&["t1"]));
    }

    #[test]
    fn test_blank_author_is_unknown() {
        let records = assemble_quotes(strings(&["q"]), strings(&[""]), Vec::new());
        assert_eq!(records[0].author, UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_no_quotes_no_records() {
        let records = assemble_quotes(Vec::new(), strings(&["a"]), vec![strings(&["t"])]);
        assert!(records.is_empty());
    }

    #[test]
    fn test_decode_quote_entities() {
        assert_eq!(decode_quote_entities("He said &quot;hi&#39;"), "He said \"hi'");
        assert_eq!(decode_quote_entities("fish &amp; chips"), "fish &amp; chips");
    }
}
