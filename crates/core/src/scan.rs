//! Source-level element scanning.
//!
//! Headings, Links and Quotes report markup as it was written in the
//! fetched body. Instead of building a tree and serializing it back, the
//! scanner streams the body through `lol_html` and records byte ranges of
//! the matching elements, so every captured value is a slice of the input.
//!
//! `<noscript>` content is tokenized as raw text by the rewriter. The
//! scanner rescans each noscript body as markup so elements inside it are
//! found like any other.

use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

use lol_html::html_content::{Element, EndTag};
use lol_html::{HtmlRewriter, Selector, Settings, element};

use crate::{QuarryError, Result};

/// What to capture for each element matching a selector.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    /// Markup between the start tag and its end tag. Elements that are
    /// never closed are skipped.
    Inner(&'a str),
    /// Value of the named attribute, entities left as written. Elements
    /// without the attribute are skipped.
    Attribute(&'a str, &'a str),
}

impl Target<'_> {
    fn selector(&self) -> &str {
        match self {
            Target::Inner(selector) | Target::Attribute(selector, _) => selector,
        }
    }
}

/// One matched element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// Byte range of the element in the body, start tag through end tag
    /// (start tag only for attribute captures).
    pub span: Range<usize>,
    /// Captured source text.
    pub value: String,
}

impl Capture {
    /// Whether `other` starts inside this element.
    pub fn contains(&self, other: &Capture) -> bool {
        self.span.start < other.span.start && other.span.start < self.span.end
    }
}

/// Raw positions collected during one rewriter pass.
#[derive(Debug, Clone)]
enum Found {
    Inner { span: Range<usize>, inner: Range<usize> },
    Attribute { span: Range<usize>, value: String },
}

/// Scan `body` once for every target.
///
/// Returns one capture list per target, in target order, each sorted by
/// position in the body.
///
/// # Errors
///
/// Returns [`QuarryError::HtmlParseError`] if a selector is not valid.
pub fn scan(body: &str, targets: &[Target<'_>]) -> Result<Vec<Vec<Capture>>> {
    for target in targets {
        target
            .selector()
            .parse::<Selector>()
            .map_err(|e| QuarryError::HtmlParseError(format!("{}: {}", target.selector(), e)))?;
    }

    let mut captures = vec![Vec::new(); targets.len()];
    scan_into(body, 0, targets, &mut captures);

    for list in &mut captures {
        list.sort_by_key(|capture| capture.span.start);
    }

    Ok(captures)
}

fn scan_into(body: &str, base: usize, targets: &[Target<'_>], captures: &mut [Vec<Capture>]) {
    let found: Rc<RefCell<Vec<Vec<Found>>>> = Rc::new(RefCell::new(vec![Vec::new(); targets.len()]));
    let noscript: Rc<RefCell<Vec<Range<usize>>>> = Rc::default();

    let mut handlers = Vec::with_capacity(targets.len() + 1);

    for (index, target) in targets.iter().copied().enumerate() {
        let found = Rc::clone(&found);
        handlers.push(match target {
            Target::Inner(selector) => element!(selector, move |el: &mut Element| {
                let start_tag = el.source_location().bytes();
                let found = Rc::clone(&found);
                if let Some(end_tag_handlers) = el.end_tag_handlers() {
                    end_tag_handlers.push(Box::new(move |end: &mut EndTag<'_>| {
                        let end_tag = end.source_location().bytes();
                        found.borrow_mut()[index]
                            .push(Found::Inner { span: start_tag.start..end_tag.end, inner: start_tag.end..end_tag.start });
                        Ok(())
                    }));
                }
                Ok(())
            }),
            Target::Attribute(selector, name) => element!(selector, move |el: &mut Element| {
                if let Some(value) = el.get_attribute(name) {
                    found.borrow_mut()[index].push(Found::Attribute { span: el.source_location().bytes(), value });
                }
                Ok(())
            }),
        });
    }

    {
        let noscript = Rc::clone(&noscript);
        handlers.push(element!("noscript", move |el: &mut Element| {
            let start = el.source_location().bytes().end;
            let noscript = Rc::clone(&noscript);
            if let Some(end_tag_handlers) = el.end_tag_handlers() {
                end_tag_handlers.push(Box::new(move |end: &mut EndTag<'_>| {
                    noscript.borrow_mut().push(start..end.source_location().bytes().start);
                    Ok(())
                }));
            }
            Ok(())
        }));
    }

    let mut rewriter = HtmlRewriter::new(
        Settings { element_content_handlers: handlers, strict: false, ..Default::default() },
        |_: &[u8]| {},
    );

    let finished = rewriter.write(body.as_bytes()).and_then(|()| rewriter.end());
    if let Err(e) = finished {
        tracing::debug!(error = %e, "scan stopped early, keeping partial matches");
    }

    for (list, found) in captures.iter_mut().zip(found.take()) {
        list.extend(found.into_iter().filter_map(|found| match found {
            Found::Inner { span, inner } => body.get(inner).map(|value| Capture {
                span: span.start + base..span.end + base,
                value: value.to_string(),
            }),
            Found::Attribute { span, value } => Some(Capture { span: span.start + base..span.end + base, value }),
        }));
    }

    for range in noscript.take() {
        if let Some(inner) = body.get(range.clone()) {
            scan_into(inner, base + range.start, targets, captures);
        }
    }
}
