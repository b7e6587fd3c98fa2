//! Widget tree data model.
//!
//! A parsed document is a tree of `WidgetNode` values stored in a
//! `StableDiGraph`; edges go parent → child in declaration order. The tree
//! also owns the name registry built from `name:` properties and the style
//! table built from themed style attributes. Nothing here refers to a real
//! toolkit: realization happens later through the `Toolkit` trait.

use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

// ─── Layout modes ────────────────────────────────────────────────────────

/// The geometry manager that places a widget inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayoutMode {
    #[default]
    Pack,
    Grid,
    Place,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 3] = [LayoutMode::Pack, LayoutMode::Grid, LayoutMode::Place];

    /// Parse the DSL token written after `@` (`PackLayout`, `GridLayout`, `PlaceLayout`).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "PackLayout" => Some(Self::Pack),
            "GridLayout" => Some(Self::Grid),
            "PlaceLayout" => Some(Self::Place),
            _ => None,
        }
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            Self::Pack => "PackLayout",
            Self::Grid => "GridLayout",
            Self::Place => "PlaceLayout",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

// ─── Attribute values ────────────────────────────────────────────────────

/// A property value: either kept verbatim or split on commas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Scalar(String),
    List(SmallVec<[String; 4]>),
}

impl AttrValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    /// Split `raw` on commas into trimmed tokens (`"Arial, 12"` → `["Arial", "12"]`).
    pub fn parse_list(raw: &str) -> Self {
        Self::List(raw.split(',').map(|t| t.trim().to_string()).collect())
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Scalar(_) => None,
            Self::List(items) => Some(items),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(s) => f.write_str(s),
            Self::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::scalar(value)
    }
}

/// Attribute maps are ordered by key so emission and comparisons are stable.
pub type AttrMap = BTreeMap<String, AttrValue>;

/// Row or column of a grid master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridAxis {
    Row,
    Column,
}

impl GridAxis {
    /// The DSL property that requests an equal-weight resize on this axis.
    pub fn property(&self) -> &'static str {
        match self {
            Self::Row => "grid_rowconfigure",
            Self::Column => "grid_columnconfigure",
        }
    }
}

// ─── Styles ──────────────────────────────────────────────────────────────

/// A synthesized style name, `<stamp>.<style class>` (e.g. `3.TCombobox`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StyleId(String);

impl StyleId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric stamp before the first `.`.
    pub fn stamp(&self) -> Option<u64> {
        self.0.split_once('.').and_then(|(stamp, _)| stamp.parse().ok())
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Style table built during one parse.
///
/// Stamps come from a per-registry counter, so two parses never share state
/// and identifiers stay unique even for repeated classes. Iteration follows
/// the numeric stamp, i.e. registration order.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    styles: BTreeMap<u64, (StyleId, AttrMap)>,
    next_stamp: u64,
}

impl StyleRegistry {
    /// Register `attrs` under a fresh identifier derived from `style_class`.
    pub fn register(&mut self, style_class: &str, attrs: AttrMap) -> StyleId {
        self.next_stamp += 1;
        let id = StyleId(format!("{}.{style_class}", self.next_stamp));
        self.styles.insert(self.next_stamp, (id.clone(), attrs));
        id
    }

    pub fn get(&self, id: &StyleId) -> Option<&AttrMap> {
        self.styles
            .get(&id.stamp()?)
            .filter(|(registered, _)| registered == id)
            .map(|(_, attrs)| attrs)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StyleId, &AttrMap)> {
        self.styles.values().map(|(id, attrs)| (id, attrs))
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// The caller's container that the root widget is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MountPoint(String);

impl MountPoint {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MountPoint {
    fn default() -> Self {
        Self(".".to_string())
    }
}

impl From<&str> for MountPoint {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for MountPoint {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl fmt::Display for MountPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One declared widget.
///
/// Created when its declaration line is read; its attributes are filled in
/// when the node is closed and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetNode {
    /// Class name as written in the DSL (`Label`, `TFrame`, `Combobox`).
    pub class: String,
    /// Whether the class takes visual attributes through a style.
    pub themed: bool,
    /// Nesting depth; the root is level 0.
    pub level: usize,
    /// 0-based line index of the declaration in the raw input.
    pub line: usize,
    pub layout: LayoutMode,
    pub layout_args: AttrMap,
    pub style_attrs: AttrMap,
    pub config: AttrMap,
    /// Style registered for `style_attrs`, if any were given.
    pub style: Option<StyleId>,
    /// Every `name:` given to this node, in declaration order.
    pub names: SmallVec<[String; 1]>,
    pub grid_row_configure: Option<u32>,
    pub grid_column_configure: Option<u32>,
}

impl WidgetNode {
    pub fn new(class: impl Into<String>, themed: bool, level: usize, line: usize, layout: LayoutMode) -> Self {
        Self {
            class: class.into(),
            themed,
            level,
            line,
            layout,
            layout_args: AttrMap::new(),
            style_attrs: AttrMap::new(),
            config: AttrMap::new(),
            style: None,
            names: SmallVec::new(),
            grid_row_configure: None,
            grid_column_configure: None,
        }
    }

    /// The last name given to this node.
    pub fn name(&self) -> Option<&str> {
        self.names.last().map(String::as_str)
    }

    /// Pending equal-weight requests, rows first.
    pub fn grid_requests(&self) -> impl Iterator<Item = (GridAxis, u32)> + '_ {
        [
            (GridAxis::Row, self.grid_row_configure),
            (GridAxis::Column, self.grid_column_configure),
        ]
        .into_iter()
        .filter_map(|(axis, index)| index.map(|i| (axis, i)))
    }
}

// ─── Widget tree ─────────────────────────────────────────────────────────

/// Name → node, last assignment wins.
pub type NameRegistry = HashMap<String, NodeIndex>;

/// The result of a parse: a single-rooted tree of widgets.
#[derive(Debug, Clone)]
pub struct WidgetTree {
    /// The underlying directed graph, parent → child edges.
    pub graph: StableDiGraph<WidgetNode, ()>,

    /// The root widget index.
    pub root: NodeIndex,

    /// Container the root is attached to.
    pub mount: MountPoint,

    /// Named widgets (`name: greeting`).
    pub names: NameRegistry,

    /// Styles synthesized for themed widgets.
    pub styles: StyleRegistry,
}

impl WidgetTree {
    /// Create a tree holding only `root`, mounted under `mount`.
    #[must_use]
    pub fn new(mount: MountPoint, root: WidgetNode) -> Self {
        let mut graph = StableDiGraph::new();
        let root = graph.add_node(root);
        Self {
            graph,
            root,
            mount,
            names: NameRegistry::new(),
            styles: StyleRegistry::default(),
        }
    }

    /// Add a node as the last child of `parent`. Returns the new node's index.
    pub fn add_node(&mut self, parent: NodeIndex, node: WidgetNode) -> NodeIndex {
        let idx = self.graph.add_node(node);
        self.graph.add_edge(parent, idx, ());
        idx
    }

    /// Point `name` at `idx`, replacing any earlier holder.
    pub fn register_name(&mut self, name: impl Into<String>, idx: NodeIndex) -> Option<NodeIndex> {
        self.names.insert(name.into(), idx)
    }

    pub fn node(&self, idx: NodeIndex) -> &WidgetNode {
        &self.graph[idx]
    }

    pub fn node_mut(&mut self, idx: NodeIndex) -> &mut WidgetNode {
        &mut self.graph[idx]
    }

    pub fn root_node(&self) -> &WidgetNode {
        &self.graph[self.root]
    }

    /// Look up a node by its registered name.
    pub fn get_by_name(&self, name: &str) -> Option<&WidgetNode> {
        self.names.get(name).map(|idx| &self.graph[*idx])
    }

    pub fn index_of_name(&self, name: &str) -> Option<NodeIndex> {
        self.names.get(name).copied()
    }

    /// Get the parent index of a node; `None` for the root.
    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .next()
    }

    /// Get children of a node in declaration order.
    ///
    /// Nodes are never removed, so index order is insertion order.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .collect();
        children.sort();
        children
    }

    /// All nodes, parents before children, siblings in declaration order.
    pub fn depth_first(&self) -> Vec<NodeIndex> {
        let mut order = Vec::with_capacity(self.graph.node_count());
        let mut stack = vec![self.root];
        while let Some(idx) = stack.pop() {
            order.push(idx);
            stack.extend(self.children(idx).into_iter().rev());
        }
        order
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}

impl std::ops::Index<NodeIndex> for WidgetTree {
    type Output = WidgetNode;

    fn index(&self, idx: NodeIndex) -> &WidgetNode {
        &self.graph[idx]
    }
}
