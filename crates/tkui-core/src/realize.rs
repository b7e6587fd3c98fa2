//! Realization: drive a [`Toolkit`] over a parsed tree.
//!
//! Widgets are visited parents first, siblings in declaration order, which
//! is the order their declarations were closed in. For each widget:
//!
//! 1. create it under its parent's handle (the mount for the root),
//! 2. apply its configuration,
//! 3. register its style the first time the id is seen, then apply it,
//! 4. place it with its own layout mode, even with no arguments,
//! 5. for grid widgets, give the requested parent row/column weight 1.

use crate::model::{LayoutMode, StyleId, WidgetTree};
use crate::toolkit::{Toolkit, ToolkitError};
use petgraph::graph::NodeIndex;
use std::collections::{BTreeMap, HashMap};

/// Realize `tree` under `mount`. Returns the handles of named widgets.
///
/// # Errors
/// Stops at the first toolkit failure; widgets created so far are left to
/// the toolkit.
pub fn realize<T: Toolkit>(
    tree: &WidgetTree,
    toolkit: &mut T,
    mount: &T::Widget,
) -> Result<HashMap<String, T::Widget>, ToolkitError> {
    let mut handles: HashMap<NodeIndex, T::Widget> = HashMap::with_capacity(tree.node_count());
    let mut styles: BTreeMap<StyleId, T::Style> = BTreeMap::new();

    let mut stack: Vec<(NodeIndex, T::Widget)> = vec![(tree.root, mount.clone())];
    while let Some((idx, parent)) = stack.pop() {
        let node = &tree[idx];
        let widget = toolkit.create_widget(&node.class, &parent)?;

        if !node.config.is_empty() {
            toolkit.apply_config(&widget, &node.config)?;
        }

        if let Some(id) = &node.style {
            if !styles.contains_key(id) {
                let attrs = tree.styles.get(id).unwrap_or(&node.style_attrs);
                let style = toolkit.register_style(id, attrs)?;
                styles.insert(id.clone(), style);
            }
            if let Some(style) = styles.get(id) {
                toolkit.apply_style(&widget, style)?;
            }
        }

        toolkit.apply_layout(&widget, node.layout, &node.layout_args)?;

        if node.layout == LayoutMode::Grid {
            for (axis, index) in node.grid_requests() {
                toolkit.configure_grid_weight(&parent, axis, index)?;
            }
        }

        log::trace!("realized {} (line {})", node.class, node.line);
        stack.extend(tree.children(idx).into_iter().rev().map(|child| (child, widget.clone())));
        handles.insert(idx, widget);
    }

    let named = tree
        .names
        .iter()
        .filter_map(|(name, idx)| handles.get(idx).map(|w| (name.clone(), w.clone())))
        .collect();
    Ok(named)
}
