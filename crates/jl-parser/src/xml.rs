use std::collections::BTreeMap;

use jl_core::ConvertError;
use roxmltree::{Document, Node, NodeType};

#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    pub root: XmlElementNode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElementNode),
    Text(XmlTextNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct XmlElementNode {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<XmlNode>,
    /// 1-based line of the opening tag.
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct XmlTextNode {
    pub value: String,
}

impl XmlElementNode {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

pub fn parse_xml_document(source: &str) -> Result<XmlDocument, ConvertError> {
    let document = Document::parse(source)
        .map_err(|error| ConvertError::new("XML_PARSE_ERROR", error.to_string()))?;

    let Some(root) = document.root().children().find(|node| node.is_element()) else {
        return Err(ConvertError::new(
            "XML_PARSE_ERROR",
            "XML document must contain a root element.",
        ));
    };

    Ok(XmlDocument {
        root: parse_element(&document, root),
    })
}

fn parse_element(document: &Document<'_>, node: Node<'_, '_>) -> XmlElementNode {
    let mut attributes = BTreeMap::new();
    for attribute in node.attributes() {
        attributes.insert(attribute.name().to_string(), attribute.value().to_string());
    }

    let mut children = Vec::new();
    for child in node.children() {
        match child.node_type() {
            NodeType::Element => children.push(XmlNode::Element(parse_element(document, child))),
            NodeType::Text => {
                let value = child.text().unwrap_or_default().to_string();
                if value.is_empty() {
                    continue;
                }
                children.push(XmlNode::Text(XmlTextNode { value }));
            }
            _ => {}
        }
    }

    XmlElementNode {
        name: node.tag_name().name().to_string(),
        attributes,
        children,
        line: document.text_pos_at(node.range().start).row as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_xml_document_builds_tree_with_attributes_and_text() {
        let source = r#"<jmeterTestPlan version="1.2"><stringProp name="k">v</stringProp></jmeterTestPlan>"#;
        let document = parse_xml_document(source).expect("xml should parse");
        assert_eq!(document.root.name, "jmeterTestPlan");
        assert_eq!(document.root.attr("version"), Some("1.2"));
        assert_eq!(document.root.children.len(), 1);

        let XmlNode::Element(prop) = &document.root.children[0] else {
            panic!("expected element child");
        };
        assert!(prop.is("stringProp"));
        assert_eq!(prop.attr("name"), Some("k"));

        let XmlNode::Text(text) = &prop.children[0] else {
            panic!("expected text child");
        };
        assert_eq!(text.value, "v");
        assert_eq!(document.root.line, 1);
    }

    #[test]
    fn parse_xml_document_unescapes_entities() {
        let source = r#"<p><stringProp name="body">{&quot;k&quot;:&quot;${v}&quot;}</stringProp></p>"#;
        let document = parse_xml_document(source).expect("xml should parse");
        let XmlNode::Element(prop) = &document.root.children[0] else {
            panic!("expected element child");
        };
        let XmlNode::Text(text) = &prop.children[0] else {
            panic!("expected text child");
        };
        assert_eq!(text.value, r#"{"k":"${v}"}"#);
    }

    #[test]
    fn parse_xml_document_skips_comments_and_empty_cdata() {
        let source = r#"<hashTree><!--c--><a/><b><![CDATA[]]></b></hashTree>"#;
        let document = parse_xml_document(source).expect("xml should parse");
        assert_eq!(document.root.children.len(), 2);
        let XmlNode::Element(b) = &document.root.children[1] else {
            panic!("expected element child");
        };
        assert!(b.children.is_empty());
    }

    #[test]
    fn parse_xml_document_records_element_lines() {
        let source = "<root>\n  <hashTree/>\n</root>";
        let document = parse_xml_document(source).expect("xml should parse");
        let XmlNode::Element(tree) = &document.root.children[1] else {
            panic!("expected element after whitespace text");
        };
        assert_eq!(tree.line, 2);
    }

    #[test]
    fn parse_xml_document_returns_parse_error_for_invalid_xml() {
        let error = parse_xml_document("<jmeterTestPlan>").expect_err("invalid xml should fail");
        assert_eq!(error.code, "XML_PARSE_ERROR");
    }

    #[test]
    fn parse_xml_document_returns_parse_error_when_root_element_is_missing() {
        let error = parse_xml_document("<?xml version=\"1.0\"?><!---->")
            .expect_err("missing root element should fail");
        assert_eq!(error.code, "XML_PARSE_ERROR");
    }
}
