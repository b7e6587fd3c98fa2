//! Source filter: raw text → significant lines.
//!
//! Strips line endings and comments, expands tabs, drops blank lines. Each
//! surviving line keeps the index it had in the raw input so errors point
//! at the right place.

/// A non-blank line after filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 0-based index in the raw input.
    pub number: usize,
    /// Tab-expanded, comment-stripped text, leading indentation kept.
    pub text: String,
}

impl SourceLine {
    /// Width of the leading indentation, in spaces.
    pub fn indentation(&self) -> usize {
        self.text.len() - self.text.trim_start_matches(' ').len()
    }

    /// The line without indentation or trailing whitespace.
    pub fn content(&self) -> &str {
        self.text.trim()
    }
}

/// Remove a trailing `\n` / `\r\n`.
pub fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Filter raw lines down to the ones the parser looks at.
///
/// A `#` starts a comment anywhere except the very first column: a line
/// beginning with `#` is kept whole.
pub fn filter_source<S: AsRef<str>>(lines: &[S], tab_width: usize) -> Vec<SourceLine> {
    let tab = " ".repeat(tab_width);
    lines
        .iter()
        .enumerate()
        .filter_map(|(number, raw)| {
            let expanded = strip_line_ending(raw.as_ref()).replace('\t', &tab);
            let text = match expanded.find('#') {
                Some(pos) if pos > 0 => expanded[..pos].to_string(),
                _ => expanded,
            };
            if text.trim().is_empty() {
                None
            } else {
                Some(SourceLine { number, text })
            }
        })
        .collect()
}

// ─── Decoding ────────────────────────────────────────────────────────────

/// Encodings `decode` understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Latin1,
    Ascii,
}

impl Encoding {
    /// Resolve a user-facing label (`"utf-8"`, `"UTF8"`, `"latin_1"`, ...).
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_ascii_lowercase().replace('_', "-");
        match label.as_str() {
            "utf-8" | "utf8" | "utf-8-sig" => Some(Self::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" | "l1" => Some(Self::Latin1),
            "ascii" | "us-ascii" => Some(Self::Ascii),
            _ => None,
        }
    }

    /// Decode `bytes`; `None` when they are not valid in this encoding.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => {
                let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                String::from_utf8(bytes.to_vec()).ok()
            }
            Self::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Ascii => bytes
                .is_ascii()
                .then(|| bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}
