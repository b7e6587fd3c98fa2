//! Lint diagnostics for parsed widget trees.
//!
//! Reports things the parser accepts but a toolkit would ignore or a reader
//! would trip over. Never modifies the tree.

use crate::classify::accepts;
use crate::model::{LayoutMode, WidgetTree};
use petgraph::graph::NodeIndex;

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// Likely a mistake.
    Warning,
    /// Informational.
    Info,
}

/// A single lint diagnostic for a widget.
#[derive(Debug, Clone)]
pub struct LintDiagnostic {
    /// The widget this diagnostic refers to.
    pub node: NodeIndex,
    /// 0-based line of the widget's declaration.
    pub line: usize,
    pub message: String,
    pub severity: LintSeverity,
    /// Short rule identifier (e.g. "layout-arg-mode").
    pub rule: &'static str,
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Run all lint rules over the tree, in declaration order.
#[must_use]
pub fn lint_tree(tree: &WidgetTree) -> Vec<LintDiagnostic> {
    let mut diags = Vec::new();
    for idx in tree.depth_first() {
        lint_layout_args(tree, idx, &mut diags);
        lint_ignored_grid_configure(tree, idx, &mut diags);
        lint_shadowed_name(tree, idx, &mut diags);
    }
    diags
}

// ─── Rules ────────────────────────────────────────────────────────────────

/// Warn on layout arguments the widget's own geometry manager does not take
/// (e.g. `side` on a grid widget).
fn lint_layout_args(tree: &WidgetTree, idx: NodeIndex, diags: &mut Vec<LintDiagnostic>) {
    let node = &tree[idx];
    for key in node.layout_args.keys() {
        if !accepts(node.layout, key) {
            diags.push(LintDiagnostic {
                node: idx,
                line: node.line,
                message: format!(
                    "`{key}` is not a {} argument; `{}` will reject it.",
                    node.layout.as_token(),
                    node.class
                ),
                severity: LintSeverity::Warning,
                rule: "layout-arg-mode",
            });
        }
    }
}

/// Warn when a weight request sits on a widget that is not grid-managed.
fn lint_ignored_grid_configure(tree: &WidgetTree, idx: NodeIndex, diags: &mut Vec<LintDiagnostic>) {
    let node = &tree[idx];
    if node.layout == LayoutMode::Grid {
        return;
    }
    for (axis, _) in node.grid_requests() {
        diags.push(LintDiagnostic {
            node: idx,
            line: node.line,
            message: format!(
                "`{}` on `{}` is ignored: the widget uses {}, not GridLayout.",
                axis.property(),
                node.class,
                node.layout.as_token()
            ),
            severity: LintSeverity::Warning,
            rule: "ignored-grid-configure",
        });
    }
}

/// Info when a later widget took over one of this widget's names.
fn lint_shadowed_name(tree: &WidgetTree, idx: NodeIndex, diags: &mut Vec<LintDiagnostic>) {
    let node = &tree[idx];
    for name in &node.names {
        let Some(holder) = tree.index_of_name(name).filter(|holder| *holder != idx) else {
            continue;
        };
        let winner = &tree[holder];
        diags.push(LintDiagnostic {
            node: idx,
            line: node.line,
            message: format!(
                "Name `{name}` is reassigned to `{}` on line {}; this `{}` no longer answers to it.",
                winner.class,
                winner.line + 1,
                node.class
            ),
            severity: LintSeverity::Info,
            rule: "shadowed-name",
        });
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
