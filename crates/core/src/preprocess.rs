use std::sync::LazyLock;

use regex::Regex;

static COMMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^<>]*>").unwrap());
static WHITESPACE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Visible markup of a document
///
/// Script and style elements are dropped with their content, then HTML
/// comments. Everything else is kept as written.
pub fn visible_markup(html: &str) -> String {
    remove_comments(&remove_scripts_and_styles(html))
}

/// Remove script and style elements, content included
///
/// The rewriter tokenizes the input as HTML, so raw-text bodies such as
/// `if (a < b)` inside a script never leak out as markup.
fn remove_scripts_and_styles(html: &str) -> String {
    let mut output = Vec::with_capacity(html.len());
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: vec![lol_html::element!("script, style", |el| {
                el.remove();
                Ok(())
            })],
            strict: false,
            ..Default::default()
        },
        |c: &[u8]| {
            output.extend_from_slice(c);
        },
    );

    if rewriter.write(html.as_bytes()).is_err() {
        tracing::debug!("rewriter rejected input, keeping original markup");
        return html.to_string();
    }

    if rewriter.end().is_err() {
        tracing::debug!("rewriter failed to finish, keeping original markup");
        return html.to_string();
    }

    String::from_utf8_lossy(&output).into_owned()
}

/// Remove HTML comments from the document
fn remove_comments(html: &str) -> String {
    COMMENT_PATTERN.replace_all(html, "").into_owned()
}

/// Replace every `<...>` token with a single space
///
/// A token never spans another `<`, so `a < b</p>` keeps its comparison.
pub fn strip_tags(markup: &str) -> String {
    TAG_PATTERN.replace_all(markup, " ").into_owned()
}

/// Delete every `<...>` token, joining the text around it
pub(crate) fn remove_tags(markup: &str) -> String {
    TAG_PATTERN.replace_all(markup, "").into_owned()
}

/// Escape angle brackets left behind by unterminated tags
fn escape_stray_brackets(text: &str) -> String {
    if !text.contains(['<', '>']) {
        return text.to_string();
    }
    text.replace('<', "&lt;").replace('>', "&gt;")
}

/// Collapse every whitespace run to one space and trim both ends
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_PATTERN.replace_all(text, " ").trim().to_string()
}

/// Plain text of a document: visible markup, tags removed, whitespace collapsed
pub fn plain_text(html: &str) -> String {
    let visible = visible_markup(html);
    normalize_whitespace(&escape_stray_brackets(&strip_tags(&visible)))
}
