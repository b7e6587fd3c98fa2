//! JSON rendering of a parsed widget tree.

use serde_json::{Value, json};
use tkui_core::{NodeIndex, WidgetTree};

/// The whole document: mount, nested widgets, names and styles.
pub fn tree_to_json(tree: &WidgetTree) -> Value {
    let names: serde_json::Map<String, Value> = tree
        .names
        .iter()
        .map(|(name, idx)| (name.clone(), json!({ "class": tree[*idx].class, "line": tree[*idx].line + 1 })))
        .collect();

    let styles: serde_json::Map<String, Value> = tree
        .styles
        .iter()
        .map(|(id, attrs)| (id.to_string(), json!(attrs)))
        .collect();

    json!({
        "mount": tree.mount.as_str(),
        "root": collect_node_tree(tree, tree.root),
        "names": names,
        "styles": styles,
    })
}

/// Recursively collect nodes into a serializable tree structure.
fn collect_node_tree(tree: &WidgetTree, idx: NodeIndex) -> Value {
    let node = &tree[idx];
    let children: Vec<Value> = tree
        .children(idx)
        .into_iter()
        .map(|child_idx| collect_node_tree(tree, child_idx))
        .collect();

    let mut obj = json!({
        "class": node.class,
        "line": node.line + 1,
        "layout": node.layout.as_token(),
    });
    if let Some(name) = node.name() {
        obj["name"] = Value::String(name.to_string());
    }
    if !node.layout_args.is_empty() {
        obj["layout_args"] = json!(node.layout_args);
    }
    if !node.config.is_empty() {
        obj["config"] = json!(node.config);
    }
    if let Some(style) = &node.style {
        obj["style"] = Value::String(style.to_string());
    }
    let weights: Vec<Value> = node
        .grid_requests()
        .map(|(axis, index)| json!({ "axis": axis, "index": index }))
        .collect();
    if !weights.is_empty() {
        obj["grid_weights"] = Value::Array(weights);
    }
    if !children.is_empty() {
        obj["children"] = Value::Array(children);
    }
    obj
}
