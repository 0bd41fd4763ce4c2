//! Integration tests for loading documents from files and readers.

use std::fs;
use std::io::Write;

use richdoc::{
    parse_bytes_with_options, parse_file, parse_file_with_options, parse_reader, parse_str,
    BlockNode, DocumentParser, Error, ParseOptions, RichDoc,
};
use tempfile::{tempdir, NamedTempFile};

const DESCRIPTION: &str = r#"{
    "type": "doc",
    "content": [
        {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "Details"}]},
        {"type": "paragraph", "content": [{"type": "text", "text": "100% linen."}]}
    ]
}"#;

#[test]
fn test_parse_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(DESCRIPTION.as_bytes()).unwrap();

    let doc = parse_file(file.path()).unwrap();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.content[1], BlockNode::paragraph("100% linen."));
}

#[test]
fn test_parse_missing_file() {
    let dir = tempdir().unwrap();
    let result = parse_file(dir.path().join("missing.json"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_parse_legacy_text_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("legacy.txt");
    fs::write(&path, "Soft linen.\r\n\r\nMachine washable.\r\n").unwrap();

    assert!(matches!(parse_file(&path), Err(Error::Json(_))));

    let doc = parse_file_with_options(&path, ParseOptions::new().lenient()).unwrap();
    assert_eq!(
        doc.content,
        vec![
            BlockNode::paragraph("Soft linen."),
            BlockNode::paragraph("Machine washable.")
        ]
    );
}

#[test]
fn test_parse_reader() {
    let doc = parse_reader(DESCRIPTION.as_bytes()).unwrap();
    assert_eq!(doc.len(), 2);
}

#[test]
fn test_double_encoded_document() {
    let encoded = serde_json::to_string(DESCRIPTION).unwrap();
    assert!(encoded.starts_with('"'));

    let doc = parse_str(&encoded).unwrap();
    assert_eq!(doc.len(), 2);
}

#[test]
fn test_product_export_with_pointer() {
    let export = format!(
        r#"[{{"sku": "A1", "description": {}}}, {{"sku": "B2", "description": "Plain words"}}]"#,
        DESCRIPTION
    );

    let options = ParseOptions::new().lenient().with_pointer("/description");
    let docs = DocumentParser::from_str_with_options(&export, options)
        .parse_many()
        .unwrap();

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].len(), 2);
    assert_eq!(docs[1].content, vec![BlockNode::paragraph("Plain words")]);
}

#[test]
fn test_lenient_invalid_utf8() {
    let data = b"Caf\xE9 au lait";
    assert!(parse_bytes_with_options(data, ParseOptions::default()).is_err());

    let doc = parse_bytes_with_options(data, ParseOptions::new().lenient()).unwrap();
    assert_eq!(doc.len(), 1);
}

#[test]
fn test_builder_parse_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(DESCRIPTION.as_bytes()).unwrap();

    let result = RichDoc::new().parse_file(file.path()).unwrap();
    assert_eq!(result.to_html(), "<h2>Details</h2>\n<p>100% linen.</p>");
    assert_eq!(result.to_markdown(), "## Details\n\n100% linen.");
    assert_eq!(result.to_text(), "Details\n\n100% linen.");
    assert_eq!(result.excerpt(8), "Details\u{2026}");
}
