//! Resource document parsing
//!
//! Reads the `<dimen>` children of a values document's root element. Nested
//! `<dimen>` elements and every other element are ignored.

use crate::dimension::{DimensionEntry, DimensionSet};
use crate::error::{ParseError, Result, ScalerError};
use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

/// Tag of a dimension declaration
pub const DIMEN_TAG: &str = "dimen";

/// Attribute holding the dimension's name
pub const NAME_ATTRIBUTE: &str = "name";

/// Parse the dimensions declared in a resource file
pub fn parse_file(path: &Path) -> Result<DimensionSet> {
    let source = std::fs::read_to_string(path).map_err(|source| ScalerError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_document(&source).map_err(|source| ScalerError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse the dimensions declared in a resource document
pub fn parse_document(source: &str) -> std::result::Result<DimensionSet, ParseError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let tree = parse_tree(source)?;
    let document = tree.root_node();

    if document.has_error() {
        let (line, column) = first_error(document)
            .map(|node| {
                let position = node.start_position();
                (position.row + 1, position.column + 1)
            })
            .unwrap_or((1, 1));
        return Err(ParseError::Malformed { line, column });
    }

    let root = child_of_kind(document, "element")
        .ok_or(ParseError::Malformed { line: 1, column: 1 })?;

    let mut dimensions = DimensionSet::new();
    let Some(content) = child_of_kind(root, "content") else {
        return Ok(dimensions);
    };

    let mut cursor = content.walk();
    for element in content
        .children(&mut cursor)
        .filter(|child| child.kind() == "element")
    {
        let Some(tag) = start_tag(element) else {
            continue;
        };
        if tag_name(tag, source) != Some(DIMEN_TAG) {
            continue;
        }

        let name = attribute(tag, NAME_ATTRIBUTE, source).ok_or_else(|| ParseError::MissingName {
            line: element.start_position().row + 1,
        })?;

        let mut value = String::new();
        text_content(element, source, &mut value);

        dimensions.insert(DimensionEntry::new(name, value));
    }

    Ok(dimensions)
}

fn parse_tree(source: &str) -> std::result::Result<Tree, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_xml::LANGUAGE_XML.into())
        .map_err(|e| ParseError::Grammar(e.to_string()))?;

    parser
        .parse(source, None)
        .ok_or(ParseError::Malformed { line: 1, column: 1 })
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error())
        .find_map(first_error)
}

fn child_of_kind<'tree>(node: Node<'tree>, kind: &str) -> Option<Node<'tree>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|child| child.kind() == kind);
    found
}

fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    &source[node.byte_range()]
}

/// The `STag` or `EmptyElemTag` of an element
fn start_tag(element: Node<'_>) -> Option<Node<'_>> {
    child_of_kind(element, "STag").or_else(|| child_of_kind(element, "EmptyElemTag"))
}

fn tag_name<'s>(tag: Node<'_>, source: &'s str) -> Option<&'s str> {
    child_of_kind(tag, "Name").map(|name| node_text(name, source))
}

fn attribute(tag: Node<'_>, wanted: &str, source: &str) -> Option<String> {
    let mut cursor = tag.walk();
    let attributes: Vec<_> = tag
        .children(&mut cursor)
        .filter(|child| child.kind() == "Attribute")
        .collect();

    attributes.into_iter().find_map(|attr| {
        let name = child_of_kind(attr, "Name")?;
        if node_text(name, source) != wanted {
            return None;
        }
        let raw = node_text(child_of_kind(attr, "AttValue")?, source);
        Some(decode_references(strip_quotes(raw)))
    })
}

fn strip_quotes(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = raw
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    raw
}

/// Concatenated character data of an element and its descendants
fn text_content(element: Node<'_>, source: &str, out: &mut String) {
    let Some(content) = child_of_kind(element, "content") else {
        return;
    };

    let mut cursor = content.walk();
    for child in content.children(&mut cursor) {
        match child.kind() {
            "CharData" => out.push_str(node_text(child, source)),
            "EntityRef" | "CharRef" => out.push_str(&decode_references(node_text(child, source))),
            "CDSect" => {
                if let Some(data) = child_of_kind(child, "CData") {
                    out.push_str(node_text(data, source));
                }
            }
            "element" => text_content(child, source, out),
            _ => {}
        }
    }
}

/// Decode predefined entity and character references
///
/// Unknown entities are kept verbatim.
pub fn decode_references(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];

        let decoded = candidate
            .find(';')
            .and_then(|end| decode_reference(&candidate[1..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &candidate[end + 1..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DIMENS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <!-- spacing -->
    <dimen name="margin_small">8dp</dimen>
    <dimen name="text_body">14.5sp</dimen>
    <string name="app_name">Example</string>
    <dimen name="icon">24px</dimen>
</resources>
"#;

    fn values(set: &DimensionSet) -> Vec<(&str, &str)> {
        set.iter()
            .map(|e| (e.name.as_str(), e.value.as_str()))
            .collect()
    }

    #[test]
    fn test_parses_top_level_dimens_only() {
        let set = parse_document(DIMENS).unwrap();
        assert_eq!(
            values(&set),
            vec![
                ("margin_small", "8dp"),
                ("text_body", "14.5sp"),
                ("icon", "24px"),
            ]
        );
    }

    #[test]
    fn test_nested_dimen_ignored() {
        let doc = r#"<resources><group><dimen name="inner">1dp</dimen></group><dimen name="outer">2dp</dimen></resources>"#;
        let set = parse_document(doc).unwrap();
        assert_eq!(values(&set), vec![("outer", "2dp")]);
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let doc = r#"<resources><dimen name="a">1dp</dimen><dimen name="a">5dp</dimen></resources>"#;
        let set = parse_document(doc).unwrap();
        assert_eq!(values(&set), vec![("a", "5dp")]);
    }

    #[test]
    fn test_no_dimens_is_empty_not_error() {
        let doc = r#"<resources><string name="x">y</string></resources>"#;
        assert!(parse_document(doc).unwrap().is_empty());
        assert!(parse_document("<resources/>").unwrap().is_empty());
    }

    #[test]
    fn test_references_and_single_quotes() {
        let doc = r#"<resources><dimen name='a&amp;b'>1&#46;5dp</dimen></resources>"#;
        let set = parse_document(doc).unwrap();
        assert_eq!(values(&set), vec![("a&b", "1.5dp")]);
    }

    #[test]
    fn test_missing_name_attribute() {
        let doc = "<resources>\n<dimen>1dp</dimen>\n</resources>";
        match parse_document(doc) {
            Err(ParseError::MissingName { line }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_document() {
        for doc in [
            "<resources><dimen name=\"a\">1dp</resources>",
            "not xml at all",
            "",
        ] {
            assert!(
                matches!(parse_document(doc), Err(ParseError::Malformed { .. })),
                "{doc:?} parsed"
            );
        }
    }

    #[test]
    fn test_parse_file_read_error() {
        let dir = TempDir::new().unwrap();
        let err = parse_file(&dir.path().join("missing.xml")).unwrap_err();
        assert!(matches!(err, ScalerError::Read { .. }));
    }

    #[test]
    fn test_parse_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dimens.xml");
        fs::write(&path, DIMENS).unwrap();

        let set = parse_file(&path).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.get("text_body").unwrap().value, "14.5sp");
    }

    #[test]
    fn test_decode_references() {
        assert_eq!(decode_references("a &lt; b &amp;&amp; c"), "a < b && c");
        assert_eq!(decode_references("&#x41;&#66;"), "AB");
        assert_eq!(decode_references("&custom; & done"), "&custom; & done");
    }
}
