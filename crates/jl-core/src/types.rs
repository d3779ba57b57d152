use serde::{Deserialize, Serialize};

pub const DEFAULT_METHOD: &str = "GET";
pub const DEFAULT_DELIMITER: &str = ",";

/// One name/value pair of a sampler's argument collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpArgument {
    pub name: String,
    pub value: String,
}

impl HttpArgument {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSpec {
    pub name: String,
    pub method: String,
    pub base_url: String,
    pub arguments: Vec<HttpArgument>,
    pub raw_body: bool,
}

impl RequestSpec {
    pub fn is_get(&self) -> bool {
        self.method.eq_ignore_ascii_case(DEFAULT_METHOD)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Correlation {
    Regex { param_name: String, pattern: String },
    JsonPath { param_name: String, query: String },
}

/// A tabular data source materialized into a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSet {
    pub source_file: String,
    pub data_file: String,
    pub variables: Vec<String>,
    pub delimiter: String,
}

impl ParameterSet {
    /// Yields `(column, variable)` with 1-based columns.
    pub fn columns(&self) -> impl Iterator<Item = (usize, &str)> {
        self.variables
            .iter()
            .enumerate()
            .map(|(index, name)| (index + 1, name.as_str()))
    }

    pub fn effective_delimiter(&self) -> &str {
        if self.delimiter.is_empty() {
            DEFAULT_DELIMITER
        } else {
            &self.delimiter
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormItem {
    pub name: String,
    pub value: String,
}

/// Statement of the generated action body.
///
/// Text fields hold target-syntax values that are not yet escaped for a
/// C string literal; escaping happens when the statement is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ActionStatement {
    StartTransaction {
        name: String,
    },
    EndTransaction {
        name: String,
    },
    SaveParamRegex {
        param_name: String,
        pattern: String,
    },
    SaveParamJson {
        param_name: String,
        query: String,
    },
    WebUrl {
        name: String,
        url: String,
    },
    WebCustomRequest {
        name: String,
        url: String,
        method: String,
        body: Option<String>,
    },
    WebSubmitData {
        name: String,
        action: String,
        method: String,
        items: Vec<FormItem>,
    },
}

impl ActionStatement {
    pub fn is_request(&self) -> bool {
        matches!(
            self,
            ActionStatement::WebUrl { .. }
                | ActionStatement::WebCustomRequest { .. }
                | ActionStatement::WebSubmitData { .. }
        )
    }

    pub fn is_correlation(&self) -> bool {
        matches!(
            self,
            ActionStatement::SaveParamRegex { .. } | ActionStatement::SaveParamJson { .. }
        )
    }
}

impl From<Correlation> for ActionStatement {
    fn from(value: Correlation) -> Self {
        match value {
            Correlation::Regex {
                param_name,
                pattern,
            } => ActionStatement::SaveParamRegex {
                param_name,
                pattern,
            },
            Correlation::JsonPath { param_name, query } => {
                ActionStatement::SaveParamJson { param_name, query }
            }
        }
    }
}

#[cfg(test)]
mod types_tests {
    use super::*;

    #[test]
    fn request_spec_matches_get_case_insensitively() {
        let mut request = RequestSpec {
            name: "home".to_string(),
            method: "get".to_string(),
            base_url: "http://localhost".to_string(),
            arguments: Vec::new(),
            raw_body: false,
        };
        assert!(request.is_get());
        request.method = "POST".to_string();
        assert!(!request.is_get());
    }

    #[test]
    fn parameter_set_columns_are_one_based() {
        let set = ParameterSet {
            source_file: "users.csv".to_string(),
            data_file: "users.dat".to_string(),
            variables: vec!["user".to_string(), "pass".to_string()],
            delimiter: String::new(),
        };
        let columns = set.columns().collect::<Vec<_>>();
        assert_eq!(columns, vec![(1, "user"), (2, "pass")]);
        assert_eq!(set.effective_delimiter(), ",");
    }

    #[test]
    fn correlation_converts_into_matching_statement() {
        let statement = ActionStatement::from(Correlation::JsonPath {
            param_name: "token".to_string(),
            query: "$.token".to_string(),
        });
        assert!(statement.is_correlation());
        assert!(!statement.is_request());
    }

    #[test]
    fn statements_serialize_with_kind_tag() {
        let statement = ActionStatement::StartTransaction {
            name: "login".to_string(),
        };
        let json = serde_json::to_value(&statement).expect("statement should serialize");
        assert_eq!(json["kind"], "startTransaction");
        assert_eq!(json["name"], "login");
    }
}
