//! JMeter encodes nesting positionally: a structural element is followed by a
//! sibling `hashTree` holding its children. The plan tree pairs them once so
//! the rest of the converter works on a conventional tree.

use jl_parser::{element_children, XmlElementNode};

pub const HASH_TREE: &str = "hashTree";
pub const THREAD_GROUP: &str = "ThreadGroup";
pub const HTTP_SAMPLER: &str = "HTTPSamplerProxy";
pub const TRANSACTION_CONTROLLER: &str = "TransactionController";
pub const REGEX_EXTRACTOR: &str = "RegexExtractor";
pub const JSON_EXTRACTOR: &str = "JSONPostProcessor";
pub const CSV_DATA_SET: &str = "CSVDataSet";

#[derive(Debug, Clone)]
pub struct PlanNode<'a> {
    pub element: &'a XmlElementNode,
    pub scope: Option<PlanScope<'a>>,
}

/// The elements of one `hashTree`, each paired with its own scope.
#[derive(Debug, Clone)]
pub struct PlanScope<'a> {
    pub container: &'a XmlElementNode,
    pub nodes: Vec<PlanNode<'a>>,
}

impl<'a> PlanNode<'a> {
    pub fn kind(&self) -> &'a str {
        self.element.name.as_str()
    }

    /// Trimmed `testname`, or `None` when blank.
    pub fn display_name(&self) -> Option<&'a str> {
        self.element
            .attr("testname")
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn children(&self) -> &[PlanNode<'a>] {
        self.scope
            .as_ref()
            .map(|scope| scope.nodes.as_slice())
            .unwrap_or(&[])
    }
}

impl<'a> PlanScope<'a> {
    /// Pairs the element children of `container`, recursing into every
    /// scope found along the way.
    pub fn build(container: &'a XmlElementNode) -> Self {
        let elements = element_children(container).collect::<Vec<_>>();
        let mut nodes = Vec::with_capacity(elements.len());
        let mut index = 0;

        while index < elements.len() {
            let element = elements[index];
            if element.is(HASH_TREE) {
                // unowned container, e.g. the plan's top-level tree
                nodes.push(PlanNode {
                    element,
                    scope: Some(PlanScope::build(element)),
                });
                index += 1;
                continue;
            }

            match elements.get(index + 1) {
                Some(next) if next.is(HASH_TREE) => {
                    nodes.push(PlanNode {
                        element,
                        scope: Some(PlanScope::build(next)),
                    });
                    index += 2;
                }
                _ => {
                    nodes.push(PlanNode {
                        element,
                        scope: None,
                    });
                    index += 1;
                }
            }
        }

        Self { container, nodes }
    }

    /// Every `ThreadGroup` reachable through the tree, in document order.
    pub fn thread_groups(&self) -> Vec<&PlanNode<'a>> {
        let mut groups = Vec::new();
        collect_kind(&self.nodes, THREAD_GROUP, &mut groups);
        groups
    }
}

fn collect_kind<'t, 'a>(nodes: &'t [PlanNode<'a>], kind: &str, out: &mut Vec<&'t PlanNode<'a>>) {
    for node in nodes {
        if node.kind() == kind {
            out.push(node);
        }
        collect_kind(node.children(), kind, out);
    }
}
