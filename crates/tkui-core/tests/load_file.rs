//! Integration tests: reading `.tkui` files from disk.

use std::io::Write;
use tempfile::NamedTempFile;
use tkui_core::{DEFAULT_ENCODING, LoadError, MountPoint, ParseErrorKind, parse_file};

fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(bytes).expect("write temp file");
    file
}

#[test]
fn loads_utf8_file() {
    let file = write_temp(include_str!("fixtures/login_form.tkui").as_bytes());
    let tree = parse_file(file.path(), MountPoint::new("root"), DEFAULT_ENCODING).unwrap();
    assert_eq!(tree.node_count(), 8);
    assert!(tree.get_by_name("login").is_some());
}

#[test]
fn strips_bom_and_crlf() {
    let file = write_temp(b"\xEF\xBB\xBFFrame:\r\n    Label:\r\n        text: hi\r\n");
    let tree = parse_file(file.path(), MountPoint::default(), "utf-8-sig").unwrap();
    let label = tree.children(tree.root)[0];
    assert_eq!(tree[label].config.get("text").map(ToString::to_string).as_deref(), Some("hi"));
}

#[test]
fn latin1_file_decodes() {
    let file = write_temp(b"Frame:\n    Label:\n        text: caf\xE9\n");
    let tree = parse_file(file.path(), MountPoint::default(), "latin-1").unwrap();
    let label = tree.children(tree.root)[0];
    assert_eq!(tree[label].config.get("text").map(ToString::to_string).as_deref(), Some("café"));
}

#[test]
fn invalid_utf8_is_a_decode_error() {
    let file = write_temp(b"Frame:\n    Label:\n        text: caf\xE9\n");
    let err = parse_file(file.path(), MountPoint::default(), DEFAULT_ENCODING).unwrap_err();
    assert!(matches!(err, LoadError::Decode { .. }), "{err}");
}

#[test]
fn unknown_encoding_is_rejected() {
    let file = write_temp(b"Frame:\n");
    let err = parse_file(file.path(), MountPoint::default(), "ebcdic").unwrap_err();
    assert!(matches!(err, LoadError::UnsupportedEncoding(ref e) if e == "ebcdic"));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = parse_file(dir.path().join("absent.tkui"), MountPoint::default(), DEFAULT_ENCODING).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }), "{err}");
}

#[test]
fn parse_errors_name_the_file() {
    let file = write_temp(b"Frame:\n    Widget123:\n");
    let err = parse_file(file.path(), MountPoint::default(), DEFAULT_ENCODING).unwrap_err();
    let LoadError::Parse(err) = err else {
        panic!("expected a parse error, got {err}");
    };
    assert_eq!(err.kind, ParseErrorKind::UnknownWidgetClass);
    assert_eq!(err.line, 1);
    assert_eq!(err.filename, file.path().display().to_string());
    assert!(err.to_string().contains(&format!("File \"{}\", line 2:", file.path().display())));
}
