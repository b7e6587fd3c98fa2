//! Parser for the `.tkui` widget DSL → `WidgetTree`.
//!
//! ```text
//! Frame @ GridLayout:
//!     grid_columnconfigure: 0
//!     Label @ GridLayout:
//!         text: Name
//!         row: 0
//!     TEntry @ GridLayout:
//!         name: name_entry
//!         background: white
//!         row: 1
//! ```
//!
//! The pipeline is filter → indentation unit → line classification →
//! tree builder. Any structural problem aborts with a positioned
//! [`ParseError`]; nothing is partially returned.

use crate::builder::TreeBuilder;
use crate::catalog::{TkCatalog, WidgetCatalog};
use crate::error::{LoadError, ParseError, SourceContext};
use crate::model::{MountPoint, WidgetTree};
use crate::source::{Encoding, filter_source};
use std::path::Path;

/// Encoding assumed by [`parse_file`] when the caller has no preference.
pub const DEFAULT_ENCODING: &str = "utf-8";

// ─── Config ───────────────────────────────────────────────────────────────

/// Knobs for [`Parser`].
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Spaces a tab expands to before indentation is measured. Default: **4**.
    pub tab_width: usize,

    /// Deepest nesting level accepted; the root is level 0. Default: **64**.
    pub max_depth: usize,

    /// File name reported in errors for in-memory input. Default: `<inline>`.
    pub placeholder_filename: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            tab_width: 4,
            max_depth: 64,
            placeholder_filename: "<inline>".to_string(),
        }
    }
}

// ─── Parser ───────────────────────────────────────────────────────────────

/// A reusable parser bound to a widget catalog.
#[derive(Debug, Clone, Default)]
pub struct Parser<C = TkCatalog> {
    catalog: C,
    config: ParserConfig,
}

impl Parser<TkCatalog> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: WidgetCatalog> Parser<C> {
    /// Parse against a custom set of widget classes.
    pub fn with_catalog(catalog: C) -> Self {
        Self {
            catalog,
            config: ParserConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Parse a sequence of raw lines (with or without line terminators).
    ///
    /// # Errors
    /// Returns the first structural problem found, positioned by its index in `lines`.
    pub fn parse_text<S: AsRef<str>>(&self, lines: &[S], mount: MountPoint) -> Result<WidgetTree, ParseError> {
        let filename = self.config.placeholder_filename.clone();
        self.parse_named(lines, mount, &filename)
    }

    /// Parse a whole document held in memory.
    pub fn parse_str(&self, source: &str, mount: MountPoint) -> Result<WidgetTree, ParseError> {
        let lines: Vec<&str> = source.lines().collect();
        self.parse_text(&lines, mount)
    }

    /// Read `path` in `encoding` and parse it. Errors name the file.
    pub fn parse_file(
        &self,
        path: impl AsRef<Path>,
        mount: MountPoint,
        encoding: &str,
    ) -> Result<WidgetTree, LoadError> {
        let path = path.as_ref();
        let decoder =
            Encoding::from_label(encoding).ok_or_else(|| LoadError::UnsupportedEncoding(encoding.to_string()))?;
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = decoder.decode(&bytes).ok_or_else(|| LoadError::Decode {
            path: path.to_path_buf(),
            encoding: encoding.to_string(),
        })?;
        log::debug!("loaded {} ({} bytes, {encoding})", path.display(), bytes.len());

        let lines: Vec<&str> = text.lines().collect();
        let tree = self.parse_named(&lines, mount, &path.display().to_string())?;
        Ok(tree)
    }

    fn parse_named<S: AsRef<str>>(
        &self,
        lines: &[S],
        mount: MountPoint,
        filename: &str,
    ) -> Result<WidgetTree, ParseError> {
        let raw: Vec<String> = lines
            .iter()
            .map(|l| crate::source::strip_line_ending(l.as_ref()).to_string())
            .collect();
        let filtered = filter_source(&raw, self.config.tab_width);
        log::trace!("{filename}: {} raw lines, {} significant", raw.len(), filtered.len());

        let ctx = SourceContext::new(filename, &raw);
        let tree = TreeBuilder::new(&self.catalog, ctx, mount, self.config.max_depth).build(&filtered)?;
        log::debug!(
            "{filename}: parsed {} widgets, {} names, {} styles",
            tree.node_count(),
            tree.names.len(),
            tree.styles.len()
        );
        Ok(tree)
    }
}

// ─── Convenience entry points ─────────────────────────────────────────────

/// Parse raw lines against the Tk catalog with default settings.
#[must_use = "parsing result should be used"]
pub fn parse_text<S: AsRef<str>>(lines: &[S], mount: MountPoint) -> Result<WidgetTree, ParseError> {
    Parser::new().parse_text(lines, mount)
}

/// Parse an in-memory document against the Tk catalog with default settings.
#[must_use = "parsing result should be used"]
pub fn parse_str(source: &str, mount: MountPoint) -> Result<WidgetTree, ParseError> {
    Parser::new().parse_str(source, mount)
}

/// Read and parse a `.tkui` file against the Tk catalog.
#[must_use = "parsing result should be used"]
pub fn parse_file(path: impl AsRef<Path>, mount: MountPoint, encoding: &str) -> Result<WidgetTree, LoadError> {
    Parser::new().parse_file(path, mount, encoding)
}
