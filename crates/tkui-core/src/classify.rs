//! Property classifier.
//!
//! Every `key: value` line belongs to the widget currently open and is
//! routed by key: geometry-manager arguments, themed style attributes,
//! plain configuration, the name registry, or a grid weight request.
//! Values stay strings; only padding and `font` are split into lists.

use crate::catalog::WidgetClass;
use crate::model::{AttrMap, AttrValue, GridAxis, LayoutMode, WidgetTree};
use petgraph::graph::NodeIndex;
use smallvec::SmallVec;

// ─── Key sets ────────────────────────────────────────────────────────────

/// Arguments understood by the pack manager.
pub const PACK_ARGS: &[&str] = &[
    "side", "fill", "expand", "anchor", "before", "after", "padx", "pady", "ipadx", "ipady",
];

/// Arguments understood by the grid manager.
pub const GRID_ARGS: &[&str] = &[
    "row", "column", "rowspan", "columnspan", "sticky", "padx", "pady", "ipadx", "ipady",
];

/// Arguments understood by the place manager.
pub const PLACE_ARGS: &[&str] = &[
    "x", "y", "relx", "rely", "width", "height", "relwidth", "relheight", "anchor", "bordermode",
];

/// Place arguments that are ordinary configuration on pack/grid widgets.
pub const PLACE_GEOMETRY: &[&str] = &["width", "height"];

/// Layout arguments whose value may be an asymmetric `before, after` pair.
pub const PADDING_KEYS: &[&str] = &["padx", "pady", "ipadx", "ipady"];

/// Visual attributes that themed widgets take through their style.
pub const STYLE_KEYS: &[&str] = &[
    "background",
    "bg",
    "foreground",
    "fg",
    "font",
    "borderwidth",
    "bd",
    "relief",
    "bordercolor",
    "lightcolor",
    "darkcolor",
    "highlightbackground",
    "highlightcolor",
    "highlightthickness",
    "activebackground",
    "activeforeground",
    "disabledforeground",
    "selectbackground",
    "selectforeground",
    "insertbackground",
    "fieldbackground",
    "troughcolor",
    "arrowcolor",
    "indicatorcolor",
];

/// Keys parsed as comma-separated lists wherever they land.
pub const LIST_KEYS: &[&str] = &["font"];

/// Whether `mode`'s geometry manager understands `key`.
pub fn accepts(mode: LayoutMode, key: &str) -> bool {
    let args = match mode {
        LayoutMode::Pack => PACK_ARGS,
        LayoutMode::Grid => GRID_ARGS,
        LayoutMode::Place => PLACE_ARGS,
    };
    args.contains(&key)
}

/// Whether `key` is a layout argument on a widget declared with `mode`.
///
/// `width`/`height` only count as layout for placed widgets.
pub fn is_layout_key(key: &str, mode: LayoutMode) -> bool {
    if PLACE_GEOMETRY.contains(&key) {
        return mode == LayoutMode::Place;
    }
    LayoutMode::ALL.iter().any(|m| accepts(*m, key))
}

// ─── Routing ─────────────────────────────────────────────────────────────

/// Where a property ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Layout,
    Style,
    Config,
    Name,
    GridConfigure(GridAxis),
}

/// Route `key` for a widget that is (or isn't) themed and declared with `mode`.
pub fn destination(key: &str, themed: bool, mode: LayoutMode) -> Destination {
    match key {
        "name" => Destination::Name,
        "grid_rowconfigure" => Destination::GridConfigure(GridAxis::Row),
        "grid_columnconfigure" => Destination::GridConfigure(GridAxis::Column),
        _ if STYLE_KEYS.contains(&key) && themed => Destination::Style,
        _ if is_layout_key(key, mode) => Destination::Layout,
        _ => Destination::Config,
    }
}

/// Parse `value` the way `key` wants it stored at `dest`.
pub fn parse_value(key: &str, value: &str, dest: Destination) -> AttrValue {
    let is_list = match dest {
        Destination::Layout => PADDING_KEYS.contains(&key) && value.contains(','),
        _ => LIST_KEYS.contains(&key),
    };
    if is_list {
        AttrValue::parse_list(value)
    } else {
        AttrValue::scalar(value)
    }
}

/// A grid weight value that is not a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidGridIndex(pub String);

// ─── In-progress node ────────────────────────────────────────────────────

/// The widget whose property block is being read.
///
/// Accumulates everything until the node is closed, at which point it is
/// written into the tree in one go.
#[derive(Debug)]
pub(crate) struct PendingNode {
    pub index: NodeIndex,
    pub level: usize,
    pub class: WidgetClass,
    pub layout: LayoutMode,
    layout_args: AttrMap,
    style_attrs: AttrMap,
    config: AttrMap,
    names: SmallVec<[String; 1]>,
    grid_row: Option<u32>,
    grid_column: Option<u32>,
}

impl PendingNode {
    pub fn new(index: NodeIndex, level: usize, class: WidgetClass, layout: LayoutMode) -> Self {
        Self {
            index,
            level,
            class,
            layout,
            layout_args: AttrMap::new(),
            style_attrs: AttrMap::new(),
            config: AttrMap::new(),
            names: SmallVec::new(),
            grid_row: None,
            grid_column: None,
        }
    }

    /// Route one property. Returns where it went.
    ///
    /// Names are returned for the caller to register immediately; the
    /// node keeps all of them in order.
    pub fn add_property(&mut self, key: &str, value: &str) -> Result<Destination, InvalidGridIndex> {
        let dest = destination(key, self.class.is_themed(), self.layout);
        match dest {
            Destination::Name => self.names.push(value.to_string()),
            Destination::GridConfigure(axis) => {
                let index = value
                    .parse::<u32>()
                    .map_err(|_| InvalidGridIndex(value.to_string()))?;
                match axis {
                    GridAxis::Row => self.grid_row = Some(index),
                    GridAxis::Column => self.grid_column = Some(index),
                }
            }
            Destination::Layout => {
                self.layout_args.insert(key.to_string(), parse_value(key, value, dest));
            }
            Destination::Style => {
                self.style_attrs.insert(key.to_string(), parse_value(key, value, dest));
            }
            Destination::Config => {
                self.config.insert(key.to_string(), parse_value(key, value, dest));
            }
        }
        log::trace!("{}: `{key}` → {dest:?}", self.class.name());
        Ok(dest)
    }

    /// Finalise the node: write accumulated attributes into the tree and
    /// register its style.
    pub fn close(self, tree: &mut WidgetTree) {
        let style = match (self.style_attrs.is_empty(), self.class.style_class()) {
            (false, Some(style_class)) => Some(tree.styles.register(style_class, self.style_attrs.clone())),
            _ => None,
        };

        if self.layout != LayoutMode::Grid && (self.grid_row.is_some() || self.grid_column.is_some()) {
            log::warn!(
                "{} is placed with {}; grid weight request ignored",
                self.class.name(),
                self.layout
            );
        }

        log::debug!(
            "close {} ({}, {} layout args, {} config, style {:?})",
            self.class.name(),
            self.layout,
            self.layout_args.len(),
            self.config.len(),
            style.as_ref().map(|s| s.as_str())
        );

        let node = tree.node_mut(self.index);
        node.layout_args = self.layout_args;
        node.style_attrs = self.style_attrs;
        node.config = self.config;
        node.style = style;
        node.names = self.names;
        node.grid_row_configure = self.grid_row;
        node.grid_column_configure = self.grid_column;
    }
}
