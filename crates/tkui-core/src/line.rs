//! Line classifier: widget declarations vs. properties.
//!
//! ```text
//! Label @ GridLayout:     declaration  (class, optional layout token)
//! text: Hello             property     (key, value)
//! ```
//!
//! A line is a declaration when it ends with `:` and nothing before that
//! final colon is another colon. Everything else must be `key: value` with
//! exactly one colon.

use winnow::combinator::{opt, preceded, terminated};
use winnow::prelude::*;
use winnow::token::{rest, take_till};

/// A classified, trimmed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `Class[ @ Layout]:`. The layout token is returned unvalidated.
    Node { class: &'a str, layout: Option<&'a str> },
    /// `key: value`
    Property { key: &'a str, value: &'a str },
}

/// Why a line could not be classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineIssue {
    MalformedNode(String),
    MalformedProperty(String),
}

/// Classify the trimmed content of one filtered line.
pub fn classify(content: &str) -> Result<LineKind<'_>, LineIssue> {
    match content.strip_suffix(':') {
        Some(body) if !body.contains(':') => classify_node(body),
        _ => classify_property(content),
    }
}

fn classify_node(body: &str) -> Result<LineKind<'_>, LineIssue> {
    let mut input = body;
    let (class, layout) = node_body
        .parse_next(&mut input)
        .map_err(|e| LineIssue::MalformedNode(format!("unreadable widget declaration: {e}")))?;

    if class.is_empty() {
        return Err(LineIssue::MalformedNode(
            "widget declaration is missing a class name".to_string(),
        ));
    }
    if layout.is_some_and(|l| l.contains('@')) {
        return Err(LineIssue::MalformedNode(
            "widget declaration has more than one `@`".to_string(),
        ));
    }
    Ok(LineKind::Node { class, layout })
}

fn classify_property(content: &str) -> Result<LineKind<'_>, LineIssue> {
    let mut input = content;
    let Ok((key, value)) = property.parse_next(&mut input) else {
        // No colon at all: a declaration that lost its terminator reads better
        // as such when it names a layout.
        return Err(if content.contains('@') {
            LineIssue::MalformedNode("widget declaration must end with `:`".to_string())
        } else {
            LineIssue::MalformedProperty("expected `key: value`".to_string())
        });
    };

    if value.contains(':') {
        return Err(LineIssue::MalformedProperty(
            "property line must contain exactly one `:`".to_string(),
        ));
    }
    if key.is_empty() {
        return Err(LineIssue::MalformedProperty(
            "property is missing a key".to_string(),
        ));
    }
    Ok(LineKind::Property { key, value })
}

// ─── Low-level parsers ──────────────────────────────────────────────────

/// `Class[@Layout]` with the trailing colon already removed.
fn node_body<'a>(input: &mut &'a str) -> ModalResult<(&'a str, Option<&'a str>)> {
    let class: &'a str = take_till(0.., '@').parse_next(input)?;
    let layout: Option<&'a str> = opt(preceded('@', rest)).parse_next(input)?;
    Ok((class.trim(), layout.map(str::trim)))
}

/// `key:value`, splitting on the first colon.
fn property<'a>(input: &mut &'a str) -> ModalResult<(&'a str, &'a str)> {
    let key: &'a str = terminated(take_till(0.., ':'), ':').parse_next(input)?;
    let value: &'a str = rest.parse_next(input)?;
    Ok((key.trim(), value.trim()))
}
