//! Parse and load errors.
//!
//! Every structural problem aborts the parse. A `ParseError` remembers the
//! 0-based index of the offending line in the raw input and carries a
//! rendered excerpt of the surrounding lines, so callers can report it
//! without keeping the source around.

use std::path::PathBuf;
use thiserror::Error;

/// Lines of context shown before and after the offending line.
const EXCERPT_CONTEXT: usize = 2;

// ─── Parse errors ────────────────────────────────────────────────────────

/// What went wrong while turning DSL text into a widget tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Nothing but comments and blank lines.
    EmptyDocument,
    /// The line after the root declaration is not indented.
    MissingRootIndentation,
    /// Indentation is not a multiple of the unit, skips a level, or does not
    /// match the widget a property belongs to.
    InvalidIndentation,
    /// A second widget was declared at level 0.
    DuplicateRoot,
    /// The class name is not in the widget catalog.
    UnknownWidgetClass,
    /// The token after `@` is not `PackLayout`, `GridLayout` or `PlaceLayout`.
    InvalidLayoutMode,
    /// A property line without exactly one `:`.
    MalformedPropertyLine,
    /// A widget declaration that cannot be read as `Class[ @ Layout]:`.
    MalformedNodeLine,
    /// A property whose value has the wrong shape (e.g. a grid index).
    InvalidPropertyValue,
}

impl ParseErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyDocument => "empty document",
            Self::MissingRootIndentation => "missing root indentation",
            Self::InvalidIndentation => "invalid indentation",
            Self::DuplicateRoot => "duplicate root widget",
            Self::UnknownWidgetClass => "unknown widget class",
            Self::InvalidLayoutMode => "invalid layout mode",
            Self::MalformedPropertyLine => "malformed property line",
            Self::MalformedNodeLine => "malformed widget line",
            Self::InvalidPropertyValue => "invalid property value",
        }
    }
}

/// A structural error, positioned in the raw input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Parser: File \"{filename}\", line {line_number}:\n{excerpt}\n{message}",
    line_number = .line + 1
)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// 0-based index of the offending line in the raw input.
    pub line: usize,
    /// Source file name, or the configured placeholder for in-memory input.
    pub filename: String,
    /// Rendered context: two lines either side, offending line marked `>>`.
    pub excerpt: String,
    pub message: String,
}

/// The raw input a parse runs over, used to position errors.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SourceContext<'a> {
    pub filename: &'a str,
    pub raw: &'a [String],
}

impl<'a> SourceContext<'a> {
    pub fn new(filename: &'a str, raw: &'a [String]) -> Self {
        Self { filename, raw }
    }

    pub fn error(&self, kind: ParseErrorKind, line: usize, message: impl Into<String>) -> ParseError {
        ParseError {
            kind,
            line,
            filename: self.filename.to_string(),
            excerpt: render_excerpt(self.raw, line),
            message: message.into(),
        }
    }
}

/// Render the lines around `line` (0-based), numbering them 1-based.
///
/// ```text
/// ...
///       1:Frame:
/// >>    2:    Widget123:
///       3:        text: hi
/// ...
/// ```
pub fn render_excerpt(raw: &[String], line: usize) -> String {
    let start = line.saturating_sub(EXCERPT_CONTEXT);
    let stop = raw.len().min(line + EXCERPT_CONTEXT + 1);

    let mut rows = vec!["...".to_string()];
    for (n, text) in raw.iter().enumerate().take(stop).skip(start) {
        let marker = if n == line { ">>" } else { "  " };
        rows.push(format!("{marker} {:>4}:{text}", n + 1));
    }
    rows.push("...".to_string());
    rows.join("\n")
}

// ─── Load errors ─────────────────────────────────────────────────────────

/// Failure to read, decode or parse a `.tkui` file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported encoding `{0}`")]
    UnsupportedEncoding(String),

    #[error("{path} is not valid {encoding}")]
    Decode { path: PathBuf, encoding: String },

    #[error(transparent)]
    Parse(#[from] ParseError),
}
