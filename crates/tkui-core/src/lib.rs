mod builder;
pub mod catalog;
pub mod classify;
pub mod emitter;
pub mod error;
pub mod indent;
pub mod line;
pub mod lint;
pub mod model;
pub mod parser;
pub mod realize;
pub mod source;
pub mod testing;
pub mod toolkit;

pub use catalog::{ClassTable, TkCatalog, WidgetCatalog, WidgetClass};
pub use emitter::emit_document;
pub use error::{LoadError, ParseError, ParseErrorKind};
pub use lint::{LintDiagnostic, LintSeverity, lint_tree};
pub use model::*;
pub use parser::{DEFAULT_ENCODING, Parser, ParserConfig, parse_file, parse_str, parse_text};
pub use realize::realize;
pub use toolkit::{Toolkit, ToolkitError};

// Re-export petgraph types so downstream crates don't need a direct dependency
pub use petgraph::graph::NodeIndex;
