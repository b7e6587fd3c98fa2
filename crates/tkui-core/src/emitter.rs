//! Emitter: WidgetTree → `.tkui` text.
//!
//! Produces canonical output that re-parses to an equivalent tree: four
//! spaces per level, ` @ <Mode>` only when the mode is not the default, and
//! each widget's properties in a fixed order before its children.

use crate::model::{AttrMap, LayoutMode, WidgetNode, WidgetTree};
use petgraph::graph::NodeIndex;
use std::fmt::Write;

const INDENT: &str = "    ";

/// Emit a `WidgetTree` as a `.tkui` document.
#[must_use]
pub fn emit_document(tree: &WidgetTree) -> String {
    let mut out = String::with_capacity(64 * tree.node_count());
    emit_node(&mut out, tree, tree.root, 0);
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn emit_node(out: &mut String, tree: &WidgetTree, idx: NodeIndex, depth: usize) {
    let node = &tree[idx];

    indent(out, depth);
    out.push_str(&node.class);
    if node.layout != LayoutMode::Pack {
        let _ = write!(out, " @ {}", node.layout.as_token());
    }
    out.push_str(":\n");

    emit_properties(out, node, depth + 1);

    for child in tree.children(idx) {
        emit_node(out, tree, child, depth + 1);
    }
}

/// Name, configuration, style attributes, layout arguments, grid weights.
fn emit_properties(out: &mut String, node: &WidgetNode, depth: usize) {
    for name in &node.names {
        emit_prop(out, "name", name, depth);
    }
    emit_attrs(out, &node.config, depth);
    emit_attrs(out, &node.style_attrs, depth);
    emit_attrs(out, &node.layout_args, depth);
    for (axis, index) in node.grid_requests() {
        emit_prop(out, axis.property(), &index.to_string(), depth);
    }
}

fn emit_attrs(out: &mut String, attrs: &AttrMap, depth: usize) {
    for (key, value) in attrs {
        emit_prop(out, key, &value.to_string(), depth);
    }
}

fn emit_prop(out: &mut String, key: &str, value: &str, depth: usize) {
    indent(out, depth);
    let _ = writeln!(out, "{key}: {value}");
}
