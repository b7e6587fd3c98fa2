//! Indentation analysis.
//!
//! The indentation unit is whatever the line after the root declaration
//! uses. Every indented line must then be an exact multiple of it, and the
//! multiple is the line's level.

use crate::error::{ParseError, ParseErrorKind, SourceContext};
use crate::source::SourceLine;

/// Width of one nesting level, in spaces. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentUnit(usize);

impl IndentUnit {
    /// Derive the unit from the second filtered line.
    ///
    /// A document with a single line has no unit (`Ok(None)`); one whose
    /// second line is flush left has no root container.
    pub(crate) fn detect(lines: &[SourceLine], ctx: &SourceContext<'_>) -> Result<Option<Self>, ParseError> {
        let Some(second) = lines.get(1) else {
            return Ok(None);
        };
        match second.indentation() {
            0 => Err(ctx.error(
                ParseErrorKind::MissingRootIndentation,
                second.number,
                "Code should be inside one root container, either a Frame or LabelFrame",
            )),
            width => Ok(Some(Self(width))),
        }
    }

    pub fn width(&self) -> usize {
        self.0
    }

    /// Level of `line`, or an error if its indentation is not a multiple of the unit.
    pub(crate) fn level_of(&self, line: &SourceLine, ctx: &SourceContext<'_>) -> Result<usize, ParseError> {
        let indentation = line.indentation();
        if indentation % self.0 != 0 {
            return Err(ctx.error(
                ParseErrorKind::InvalidIndentation,
                line.number,
                format!("Invalid indentation, should be a multiple of {} spaces", self.0),
            ));
        }
        Ok(indentation / self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::filter_source;

    fn lines(src: &[&str]) -> (Vec<String>, Vec<SourceLine>) {
        let raw: Vec<String> = src.iter().map(|s| s.to_string()).collect();
        let filtered = filter_source(&raw, 4);
        (raw, filtered)
    }

    #[test]
    fn unit_comes_from_the_second_line() {
        let (raw, filtered) = lines(&["Frame:", "  Label:", "    text: hi"]);
        let ctx = SourceContext::new("<inline>", &raw);
        let unit = IndentUnit::detect(&filtered, &ctx).unwrap().unwrap();
        assert_eq!(unit.width(), 2);
        assert_eq!(unit.level_of(&filtered[2], &ctx).unwrap(), 2);
    }

    #[test]
    fn single_line_has_no_unit() {
        let (raw, filtered) = lines(&["Frame:"]);
        let ctx = SourceContext::new("<inline>", &raw);
        assert_eq!(IndentUnit::detect(&filtered, &ctx).unwrap(), None);
    }

    #[test]
    fn flush_second_line_is_missing_root_indentation() {
        let (raw, filtered) = lines(&["Frame:", "", "Label:"]);
        let ctx = SourceContext::new("<inline>", &raw);
        let err = IndentUnit::detect(&filtered, &ctx).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingRootIndentation);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn odd_indentation_is_rejected_at_its_line() {
        let (raw, filtered) = lines(&["Frame:", "    Label:", "      text: hi"]);
        let ctx = SourceContext::new("<inline>", &raw);
        let unit = IndentUnit::detect(&filtered, &ctx).unwrap().unwrap();
        let err = unit.level_of(&filtered[2], &ctx).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidIndentation);
        assert_eq!(err.line, 2);
    }
}
