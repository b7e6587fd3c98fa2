//! Tree builder: the level-indexed widget stack.
//!
//! One pass over the filtered lines. A declaration line closes the widget
//! that is still open, then opens a new one under the most recent widget one
//! level up. Property lines feed the open widget. The last widget is closed
//! at end of input.

use crate::catalog::WidgetCatalog;
use crate::classify::{Destination, InvalidGridIndex, PendingNode};
use crate::error::{ParseError, ParseErrorKind, SourceContext};
use crate::indent::IndentUnit;
use crate::line::{LineIssue, LineKind, classify};
use crate::model::{LayoutMode, MountPoint, WidgetNode, WidgetTree};
use crate::source::SourceLine;
use petgraph::graph::NodeIndex;
use std::cmp::Ordering;

pub(crate) struct TreeBuilder<'a, C: WidgetCatalog + ?Sized> {
    catalog: &'a C,
    ctx: SourceContext<'a>,
    max_depth: usize,
    unit: Option<IndentUnit>,
    mount: Option<MountPoint>,
    tree: Option<WidgetTree>,
    /// Most recent widget at each level; `levels[n]` is the open ancestor at depth `n`.
    levels: Vec<NodeIndex>,
    current: Option<PendingNode>,
    previous_level: usize,
}

impl<'a, C: WidgetCatalog + ?Sized> TreeBuilder<'a, C> {
    pub fn new(catalog: &'a C, ctx: SourceContext<'a>, mount: MountPoint, max_depth: usize) -> Self {
        Self {
            catalog,
            ctx,
            max_depth,
            unit: None,
            mount: Some(mount),
            tree: None,
            levels: Vec::new(),
            current: None,
            previous_level: 0,
        }
    }

    pub fn build(mut self, lines: &[SourceLine]) -> Result<WidgetTree, ParseError> {
        let Some(first) = lines.first() else {
            return Err(self.ctx.error(
                ParseErrorKind::EmptyDocument,
                0,
                "Document declares no widgets",
            ));
        };
        if first.indentation() != 0 {
            return Err(self.ctx.error(
                ParseErrorKind::InvalidIndentation,
                first.number,
                "The root widget must not be indented",
            ));
        }

        self.unit = IndentUnit::detect(lines, &self.ctx)?;
        for line in lines {
            self.feed(line)?;
        }
        self.close_current();

        match self.tree {
            Some(tree) => Ok(tree),
            None => Err(self.ctx.error(
                ParseErrorKind::MalformedNodeLine,
                first.number,
                "Document must start with a root widget declaration",
            )),
        }
    }

    fn feed(&mut self, line: &SourceLine) -> Result<(), ParseError> {
        let level = self.level_of(line)?;
        match classify(line.content()) {
            Ok(LineKind::Node { class, layout }) => self.open_node(line, level, class, layout),
            Ok(LineKind::Property { key, value }) => self.add_property(line, level, key, value),
            Err(LineIssue::MalformedNode(msg)) => {
                Err(self.ctx.error(ParseErrorKind::MalformedNodeLine, line.number, msg))
            }
            Err(LineIssue::MalformedProperty(msg)) => {
                Err(self.ctx.error(ParseErrorKind::MalformedPropertyLine, line.number, msg))
            }
        }
    }

    fn level_of(&self, line: &SourceLine) -> Result<usize, ParseError> {
        let level = match &self.unit {
            Some(unit) => unit.level_of(line, &self.ctx)?,
            None => 0,
        };
        if level > self.max_depth {
            return Err(self.ctx.error(
                ParseErrorKind::InvalidIndentation,
                line.number,
                format!("Nesting deeper than {} levels", self.max_depth),
            ));
        }
        Ok(level)
    }

    /// Finalise the open widget, if any.
    fn close_current(&mut self) {
        if let (Some(pending), Some(tree)) = (self.current.take(), self.tree.as_mut()) {
            pending.close(tree);
        }
    }

    fn open_node(
        &mut self,
        line: &SourceLine,
        level: usize,
        class_name: &str,
        layout_token: Option<&str>,
    ) -> Result<(), ParseError> {
        self.close_current();

        let Some(class) = self.catalog.lookup(class_name) else {
            return Err(self.ctx.error(
                ParseErrorKind::UnknownWidgetClass,
                line.number,
                format!("Invalid class name `{class_name}`, should be a widget class known to the toolkit"),
            ));
        };

        let token = layout_token.unwrap_or(LayoutMode::Pack.as_token());
        let Some(layout) = LayoutMode::from_token(token) else {
            return Err(self.ctx.error(
                ParseErrorKind::InvalidLayoutMode,
                line.number,
                format!("Invalid layout management '{token}' used, should be PackLayout, GridLayout or PlaceLayout"),
            ));
        };

        let node = WidgetNode::new(class.name(), class.is_themed(), level, line.number, layout);
        let index = match self.tree.as_mut() {
            None => {
                let mount = self.mount.take().unwrap_or_default();
                let tree = WidgetTree::new(mount, node);
                let root = tree.root;
                self.tree = Some(tree);
                root
            }
            Some(tree) => {
                let parent = match (level, level.cmp(&self.previous_level)) {
                    (0, _) => {
                        return Err(self.ctx.error(
                            ParseErrorKind::DuplicateRoot,
                            line.number,
                            "Only one root widget may be declared; indent this widget under the root",
                        ));
                    }
                    // Descending: the widget just closed is the parent.
                    (_, Ordering::Greater) if level == self.previous_level + 1 => self.levels[self.previous_level],
                    (_, Ordering::Greater) => {
                        return Err(self.ctx.error(
                            ParseErrorKind::InvalidIndentation,
                            line.number,
                            format!(
                                "Widget is nested {} levels below the previous widget; expected at most one",
                                level - self.previous_level
                            ),
                        ));
                    }
                    // Siblings and dedents both hang off the most recent widget one level up.
                    (_, Ordering::Equal | Ordering::Less) => self.levels[level - 1],
                };
                tree.add_node(parent, node)
            }
        };

        self.levels.truncate(level);
        self.levels.push(index);
        self.previous_level = level;

        log::debug!("open {class_name} @ {layout} at level {level} (line {})", line.number);
        self.current = Some(PendingNode::new(index, level, class, layout));
        Ok(())
    }

    fn add_property(&mut self, line: &SourceLine, level: usize, key: &str, value: &str) -> Result<(), ParseError> {
        let (Some(pending), Some(tree)) = (self.current.as_mut(), self.tree.as_mut()) else {
            return Err(self.ctx.error(
                ParseErrorKind::MalformedNodeLine,
                line.number,
                "Document must start with a root widget declaration",
            ));
        };

        if level != pending.level + 1 {
            return Err(self.ctx.error(
                ParseErrorKind::InvalidIndentation,
                line.number,
                format!(
                    "Property of `{}` must be indented exactly one level below it",
                    pending.class.name()
                ),
            ));
        }

        match pending.add_property(key, value) {
            Ok(Destination::Name) => {
                tree.register_name(value, pending.index);
                Ok(())
            }
            Ok(_) => Ok(()),
            Err(InvalidGridIndex(value)) => Err(self.ctx.error(
                ParseErrorKind::InvalidPropertyValue,
                line.number,
                format!("`{key}` expects a non-negative row/column index, got `{value}`"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TkCatalog;
    use crate::source::filter_source;

    fn build(src: &str) -> Result<WidgetTree, ParseError> {
        let raw: Vec<String> = src.lines().map(str::to_string).collect();
        let lines = filter_source(&raw, 4);
        let ctx = SourceContext::new("<inline>", &raw);
        TreeBuilder::new(&TkCatalog, ctx, MountPoint::default(), 64).build(&lines)
    }

    fn classes(tree: &WidgetTree, idx: NodeIndex) -> Vec<String> {
        tree.children(idx).into_iter().map(|c| tree[c].class.clone()).collect()
    }

    #[test]
    fn siblings_share_a_parent() {
        let tree = build("Frame:\n    Label:\n    Button:\n    Entry:\n").unwrap();
        assert_eq!(classes(&tree, tree.root), vec!["Label", "Button", "Entry"]);
    }

    #[test]
    fn dedent_returns_to_the_right_ancestor() {
        let src = "\
Frame:
    LabelFrame:
        Frame:
            Label:
        Button:
    Entry:
";
        let tree = build(src).unwrap();
        let outer = tree.children(tree.root);
        assert_eq!(classes(&tree, tree.root), vec!["LabelFrame", "Entry"]);
        assert_eq!(classes(&tree, outer[0]), vec!["Frame", "Button"]);
        let inner = tree.children(outer[0]);
        assert_eq!(classes(&tree, inner[0]), vec!["Label"]);
    }

    #[test]
    fn properties_attach_to_the_open_widget() {
        let src = "Frame:\n    bg: red\n    Label:\n        text: hi\n";
        let tree = build(src).unwrap();
        assert_eq!(tree.root_node().config.get("bg").map(|v| v.to_string()), Some("red".into()));
        let label = tree.children(tree.root)[0];
        assert_eq!(tree[label].config.get("text").map(|v| v.to_string()), Some("hi".into()));
    }

    #[test]
    fn property_after_children_at_wrong_depth_is_rejected() {
        let src = "Frame:\n    Label:\n        text: hi\n    bg: red\n";
        let err = build(src).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidIndentation);
        assert_eq!(err.line, 3);
    }

    #[test]
    fn fluctuating_property_block_is_rejected() {
        let src = "Frame:\n    Label:\n        text: hi\n            fg: red\n";
        let err = build(src).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidIndentation);
        assert_eq!(err.line, 3);
    }

    #[test]
    fn skipping_a_level_is_rejected() {
        let err = build("Frame:\n    Frame:\n            Label:\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidIndentation);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn second_root_is_rejected() {
        let err = build("Frame:\n    Label:\nFrame:\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::DuplicateRoot);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn invalid_layout_points_at_the_declaration() {
        let err = build("Frame:\n    Label @ FlexLayout:\n        text: a\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidLayoutMode);
        assert_eq!(err.line, 1);
    }

    #[test]
    fn first_line_must_declare_a_widget() {
        let err = build("text: hi\n    Label:\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MalformedNodeLine);
        assert_eq!(err.line, 0);
    }

    #[test]
    fn indented_root_is_rejected() {
        let err = build("    Frame:\n        Label:\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidIndentation);
        assert_eq!(err.line, 0);
    }

    #[test]
    fn root_only_document() {
        let tree = build("Frame:\n").unwrap();
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.root_node().class, "Frame");
    }

    #[test]
    fn bad_grid_index_is_an_invalid_value() {
        let err = build("Frame @ GridLayout:\n    grid_rowconfigure: x\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidPropertyValue);
        assert_eq!(err.line, 1);
    }

    #[test]
    fn max_depth_is_enforced() {
        let raw: Vec<String> = ["Frame:", "    Frame:", "        Frame:"].iter().map(|s| s.to_string()).collect();
        let lines = filter_source(&raw, 4);
        let ctx = SourceContext::new("<inline>", &raw);
        let err = TreeBuilder::new(&TkCatalog, ctx, MountPoint::default(), 1)
            .build(&lines)
            .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidIndentation);
        assert_eq!(err.line, 2);
    }
}
