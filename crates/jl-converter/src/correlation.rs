use jl_core::{ActionStatement, Correlation};
use jl_parser::string_prop;

use crate::pairing::{PlanNode, JSON_EXTRACTOR, REGEX_EXTRACTOR};
use crate::transform::rewrite_variables;

const REGEX_REFNAME: &str = "RegexExtractor.refname";
const REGEX_PATTERN: &str = "RegexExtractor.regex";
const JSON_REFNAME: &str = "JSONPostProcessor.referenceName";
const JSON_PATH: &str = "JSONPostProcessor.jsonPathExpr";

/// Extractors declared directly in a sampler's own scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SamplerCorrelations {
    pub regex: Vec<Correlation>,
    pub json: Vec<Correlation>,
}

impl SamplerCorrelations {
    pub fn is_empty(&self) -> bool {
        self.regex.is_empty() && self.json.is_empty()
    }

    /// Regex captures first, then JSON ones.
    pub fn into_statements(self) -> impl Iterator<Item = ActionStatement> {
        self.regex
            .into_iter()
            .chain(self.json)
            .map(ActionStatement::from)
    }
}

/// Scans only the sampler's direct scope; extractors nested any deeper
/// belong to other elements. Extractors missing either property are dropped.
/// `${var}` references inside patterns and paths are rewritten; parameter
/// names are kept as declared.
pub fn extract_correlations(sampler: &PlanNode<'_>) -> SamplerCorrelations {
    let mut correlations = SamplerCorrelations::default();

    for child in sampler.children() {
        let element = child.element;
        match child.kind() {
            REGEX_EXTRACTOR => {
                if let Some((param_name, pattern)) = required_pair(
                    string_prop(element, REGEX_REFNAME),
                    string_prop(element, REGEX_PATTERN),
                ) {
                    correlations.regex.push(Correlation::Regex {
                        param_name,
                        pattern,
                    });
                }
            }
            JSON_EXTRACTOR => {
                if let Some((param_name, query)) = required_pair(
                    string_prop(element, JSON_REFNAME),
                    string_prop(element, JSON_PATH),
                ) {
                    correlations
                        .json
                        .push(Correlation::JsonPath { param_name, query });
                }
            }
            _ => {}
        }
    }

    correlations
}

fn required_pair(name: Option<String>, expression: Option<String>) -> Option<(String, String)> {
    let name = name.filter(|value| !value.trim().is_empty())?;
    let expression = expression.filter(|value| !value.trim().is_empty())?;
    Some((name.trim().to_string(), rewrite_variables(&expression)))
}
