//! Lookups over JMeter's property elements (`stringProp`, `boolProp`,
//! `elementProp`, `collectionProp`), all keyed by their `name` attribute.

use crate::xml::{XmlElementNode, XmlNode};

pub const STRING_PROP: &str = "stringProp";
pub const BOOL_PROP: &str = "boolProp";
pub const ELEMENT_PROP: &str = "elementProp";
pub const COLLECTION_PROP: &str = "collectionProp";

pub fn element_children(node: &XmlElementNode) -> impl Iterator<Item = &XmlElementNode> {
    node.children.iter().filter_map(|entry| match entry {
        XmlNode::Element(element) => Some(element),
        XmlNode::Text(_) => None,
    })
}

/// Concatenated text of the node and all of its descendants.
pub fn text_content(node: &XmlElementNode) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &XmlElementNode, out: &mut String) {
    for entry in &node.children {
        match entry {
            XmlNode::Text(text) => out.push_str(&text.value),
            XmlNode::Element(element) => collect_text(element, out),
        }
    }
}

/// Every element below `node`, in document order.
pub fn descendants(node: &XmlElementNode) -> Vec<&XmlElementNode> {
    let mut out = Vec::new();
    let mut stack = element_children(node).collect::<Vec<_>>();
    stack.reverse();
    while let Some(element) = stack.pop() {
        out.push(element);
        let mut children = element_children(element).collect::<Vec<_>>();
        children.reverse();
        stack.extend(children);
    }
    out
}

fn named_child<'a>(
    node: &'a XmlElementNode,
    kind: &'a str,
    key: &'a str,
) -> impl Iterator<Item = &'a XmlElementNode> {
    element_children(node).filter(move |child| child.is(kind) && child.attr("name") == Some(key))
}

/// Text of the first direct `stringProp` child whose `name` equals `key`.
pub fn string_prop(node: &XmlElementNode, key: &str) -> Option<String> {
    named_child(node, STRING_PROP, key).next().map(text_content)
}

/// Like [`string_prop`], but blank values count as absent.
pub fn non_blank_string_prop(node: &XmlElementNode, key: &str) -> Option<String> {
    string_prop(node, key).filter(|value| !value.trim().is_empty())
}

/// `true` only for a direct `boolProp` whose trimmed text is `true`, ignoring case.
pub fn bool_prop(node: &XmlElementNode, key: &str) -> bool {
    named_child(node, BOOL_PROP, key)
        .next()
        .map(|prop| text_content(prop).trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

pub fn element_prop<'a>(
    node: &'a XmlElementNode,
    key: &'a str,
    element_type: &'a str,
) -> impl Iterator<Item = &'a XmlElementNode> {
    named_child(node, ELEMENT_PROP, key)
        .filter(move |child| child.attr("elementType") == Some(element_type))
}

pub fn collection_prop<'a>(
    node: &'a XmlElementNode,
    key: &'a str,
) -> impl Iterator<Item = &'a XmlElementNode> {
    named_child(node, COLLECTION_PROP, key)
}

#[cfg(test)]
mod props_tests {
    use super::*;
    use crate::parse_xml_document;

    fn root(source: &str) -> XmlElementNode {
        parse_xml_document(source).expect("xml should parse").root
    }

    #[test]
    fn string_prop_matches_name_attribute_on_direct_children() {
        let node = root(
            r#"<HTTPSamplerProxy>
  <stringProp name="HTTPSampler.domain">example.com</stringProp>
  <elementProp name="nested"><stringProp name="HTTPSampler.path">/deep</stringProp></elementProp>
</HTTPSamplerProxy>"#,
        );
        assert_eq!(
            string_prop(&node, "HTTPSampler.domain"),
            Some("example.com".to_string())
        );
        assert_eq!(string_prop(&node, "HTTPSampler.path"), None);
    }

    #[test]
    fn empty_string_prop_is_present_but_blank() {
        let node = root(r#"<x><stringProp name="HTTPSampler.port"></stringProp></x>"#);
        assert_eq!(string_prop(&node, "HTTPSampler.port"), Some(String::new()));
        assert_eq!(non_blank_string_prop(&node, "HTTPSampler.port"), None);
    }

    #[test]
    fn bool_prop_trims_and_ignores_case() {
        let node = root(
            r#"<x><boolProp name="HTTPSampler.postBodyRaw"> TRUE </boolProp><boolProp name="other">false</boolProp></x>"#,
        );
        assert!(bool_prop(&node, "HTTPSampler.postBodyRaw"));
        assert!(!bool_prop(&node, "other"));
        assert!(!bool_prop(&node, "missing"));
    }

    #[test]
    fn descendants_walk_in_document_order() {
        let node = root("<r><a><b/><c/></a><d/></r>");
        let names = descendants(&node)
            .into_iter()
            .map(|element| element.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn element_prop_requires_name_and_element_type() {
        let node = root(
            r#"<x>
  <elementProp name="HTTPsampler.Arguments" elementType="Other"/>
  <elementProp name="HTTPsampler.Arguments" elementType="Arguments">
    <collectionProp name="Arguments.arguments"/>
  </elementProp>
</x>"#,
        );
        let found = element_prop(&node, "HTTPsampler.Arguments", "Arguments").collect::<Vec<_>>();
        assert_eq!(found.len(), 1);
        assert_eq!(collection_prop(found[0], "Arguments.arguments").count(), 1);
    }

    #[test]
    fn text_content_concatenates_nested_text() {
        let node = root("<x>a<y>b</y>c</x>");
        assert_eq!(text_content(&node), "abc");
    }
}
