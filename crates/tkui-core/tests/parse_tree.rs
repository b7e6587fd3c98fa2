//! Integration tests: DSL text → WidgetTree.
//!
//! Exercises the structural guarantees of the parser on fixtures and small
//! hand-written documents.

use pretty_assertions::assert_eq;
use rstest::rstest;
use tkui_core::model::*;
use tkui_core::{NodeIndex, ParseErrorKind, parse_str};

fn parse(input: &str) -> WidgetTree {
    parse_str(input, MountPoint::new("app")).expect("parse failed")
}

fn class_of(tree: &WidgetTree, idx: NodeIndex) -> &str {
    &tree[idx].class
}

// ─── Tree shape ──────────────────────────────────────────────────────────

#[test]
fn minimal_document_matches_expected_tree() {
    let tree = parse(include_str!("fixtures/minimal.tkui"));

    assert_eq!(tree.node_count(), 2);
    assert_eq!(tree.mount.as_str(), "app");
    assert_eq!(tree.root_node().class, "Frame");

    let label = tree.index_of_name("greeting").expect("greeting registered");
    assert_eq!(tree.parent(label), Some(tree.root));

    let node = &tree[label];
    assert_eq!(node.layout, LayoutMode::Grid);
    assert_eq!(node.config.get("text"), Some(&AttrValue::scalar("Hello")));
    assert_eq!(
        node.layout_args.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["column", "row"]
    );
    assert_eq!(node.layout_args.get("row"), Some(&AttrValue::scalar("0")));
    assert_eq!(node.name(), Some("greeting"));
}

#[test]
fn depth_first_order_is_declaration_order() {
    let input = include_str!("fixtures/login_form.tkui");
    let tree = parse(input);

    let declared: Vec<String> = input
        .lines()
        .filter_map(|l| l.split('#').next())
        .map(str::trim)
        .filter_map(|l| l.strip_suffix(':'))
        .filter(|l| !l.contains(':'))
        .map(|l| l.split('@').next().unwrap_or(l).trim().to_string())
        .collect();
    let walked: Vec<String> = tree
        .depth_first()
        .into_iter()
        .map(|idx| tree[idx].class.clone())
        .collect();
    assert_eq!(walked, declared);
}

#[test]
fn parent_is_most_recent_widget_one_level_up() {
    let tree = parse(include_str!("fixtures/settings.tkui"));
    for idx in tree.depth_first() {
        let node = &tree[idx];
        match tree.parent(idx) {
            None => assert_eq!(idx, tree.root),
            Some(parent) => {
                let parent_node = &tree[parent];
                assert_eq!(parent_node.level + 1, node.level, "{} under {}", node.class, parent_node.class);
                // No widget between the parent's declaration and this one sits at the parent's level.
                let between = tree
                    .depth_first()
                    .into_iter()
                    .filter(|i| tree[*i].line > parent_node.line && tree[*i].line < node.line)
                    .any(|i| tree[i].level <= parent_node.level);
                assert!(!between, "{} at line {} has a stale parent", node.class, node.line);
            }
        }
    }
}

#[test]
fn tabs_count_as_four_spaces() {
    let tree = parse(include_str!("fixtures/settings.tkui"));
    let children: Vec<&str> = tree.children(tree.root).into_iter().map(|c| class_of(&tree, c)).collect();
    assert_eq!(children, vec!["LabelFrame", "Notebook", "Separator", "Combobox"]);

    let volume = tree.index_of_name("volume").expect("volume registered");
    assert_eq!(tree[volume].level, 3);
}

// ─── Classification ──────────────────────────────────────────────────────

#[rstest]
#[case("Combobox", "background", true)]
#[case("TLabel", "foreground", true)]
#[case("Label", "background", false)]
#[case("Button", "font", false)]
fn style_attrs_only_for_themed_classes(#[case] class: &str, #[case] key: &str, #[case] styled: bool) {
    let tree = parse(&format!("Frame:\n    {class}:\n        {key}: white\n"));
    let node = &tree[tree.children(tree.root)[0]];
    assert_eq!(node.style_attrs.contains_key(key), styled);
    assert_eq!(node.config.contains_key(key), !styled);
    assert_eq!(node.style.is_some(), styled);
}

#[rstest]
#[case("padx: 4,8", AttrValue::parse_list("4,8"))]
#[case("pady: 1, 2", AttrValue::parse_list("1,2"))]
#[case("ipadx: 4", AttrValue::scalar("4"))]
fn padding_lists(#[case] line: &str, #[case] expected: AttrValue) {
    let tree = parse(&format!("Frame:\n    Label:\n        {line}\n"));
    let node = &tree[tree.children(tree.root)[0]];
    let key = line.split(':').next().unwrap_or_default();
    assert_eq!(node.layout_args.get(key), Some(&expected));
}

#[test]
fn themed_font_is_a_style_list() {
    let tree = parse(include_str!("fixtures/settings.tkui"));
    let theme = tree.get_by_name("theme").expect("theme registered");
    assert_eq!(
        theme.style_attrs.get("font").and_then(AttrValue::as_list),
        Some(&["Courier".to_string(), "10".to_string(), "bold".to_string()][..])
    );
    assert_eq!(theme.layout_args.get("side"), Some(&AttrValue::scalar("bottom")));
    assert_eq!(theme.config.get("values"), Some(&AttrValue::scalar("default clam alt")));
}

#[test]
fn width_is_layout_only_when_placed() {
    let tree = parse(include_str!("fixtures/settings.tkui"));
    let bar = tree
        .depth_first()
        .into_iter()
        .find(|i| tree[*i].class == "Progressbar")
        .expect("progressbar");
    assert_eq!(tree[bar].layout, LayoutMode::Place);
    assert_eq!(tree[bar].layout_args.get("width"), Some(&AttrValue::scalar("200")));
    assert_eq!(tree[bar].config.get("length"), Some(&AttrValue::scalar("180")));

    let tree = parse("Frame:\n    Button:\n        width: 10\n");
    let button = &tree[tree.children(tree.root)[0]];
    assert_eq!(button.config.get("width"), Some(&AttrValue::scalar("10")));
}

#[test]
fn styles_get_sequential_ids() {
    let tree = parse(include_str!("fixtures/login_form.tkui"));
    let ids: Vec<&str> = tree.styles.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["1.TEntry", "2.TEntry"]);
    assert_eq!(
        tree.get_by_name("password").and_then(|n| n.style.as_ref()).map(StyleId::as_str),
        Some("2.TEntry")
    );
}

#[test]
fn styles_iterate_in_registration_order_past_nine() {
    let mut doc = String::from("Frame:\n");
    for _ in 0..11 {
        doc.push_str("    TEntry:\n        background: white\n");
    }
    let tree = parse(&doc);
    let ids: Vec<String> = tree.styles.iter().map(|(id, _)| id.to_string()).collect();
    let expected: Vec<String> = (1..=11).map(|n| format!("{n}.TEntry")).collect();
    assert_eq!(ids, expected);
}

#[test]
fn later_name_wins() {
    let tree = parse("Frame:\n    Label:\n        name: x\n    Entry:\n        name: x\n");
    assert_eq!(tree.names.len(), 1);
    assert_eq!(tree.get_by_name("x").map(|n| n.class.as_str()), Some("Entry"));
}

#[test]
fn grid_weight_requests_are_recorded() {
    let tree = parse(include_str!("fixtures/login_form.tkui"));
    let root = tree.root_node();
    assert_eq!(root.grid_column_configure, Some(1));
    assert_eq!(root.grid_requests().collect::<Vec<_>>(), vec![(GridAxis::Column, 1)]);
}

// ─── Errors ──────────────────────────────────────────────────────────────

#[rstest]
#[case::odd_indent("Frame:\n    Label:\n      text: a\n", ParseErrorKind::InvalidIndentation, 2)]
#[case::flush_second_line("Frame:\nLabel:\n", ParseErrorKind::MissingRootIndentation, 1)]
#[case::unknown_class("Frame:\n    Widget123:\n", ParseErrorKind::UnknownWidgetClass, 1)]
#[case::bad_layout("Frame @ FlowLayout:\n    Label:\n", ParseErrorKind::InvalidLayoutMode, 0)]
#[case::two_colons("Frame:\n    text: a: b\n", ParseErrorKind::MalformedPropertyLine, 1)]
#[case::no_colon("Frame:\n    Label @ GridLayout\n", ParseErrorKind::MalformedNodeLine, 1)]
#[case::second_root("Frame:\n    Label:\nFrame:\n", ParseErrorKind::DuplicateRoot, 2)]
#[case::blank_lines_kept_in_numbering("Frame:\n\n\n    Label:\n   # x\n      bad: 1\n", ParseErrorKind::InvalidIndentation, 5)]
fn errors_point_at_the_offending_line(#[case] input: &str, #[case] kind: ParseErrorKind, #[case] line: usize) {
    let err = parse_str(input, MountPoint::default()).unwrap_err();
    assert_eq!((err.kind, err.line), (kind, line), "{err}");
}

#[test]
fn error_message_renders_excerpt() {
    let input = "Frame:\n    Label:\n        text: a\n    Widget123:\n        text: b\n    Button:\n";
    let err = parse_str(input, MountPoint::default()).unwrap_err();
    let expected = "\
Parser: File \"<inline>\", line 4:
...
      2:    Label:
      3:        text: a
>>    4:    Widget123:
      5:        text: b
      6:    Button:
...
Invalid class name `Widget123`, should be a widget class known to the toolkit";
    assert_eq!(err.to_string(), expected);
}
