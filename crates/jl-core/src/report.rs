use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::ParameterSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningKind {
    NoGroups,
    GroupWithoutChildren,
    TransactionWithoutChildren,
    DataSetWithoutFilename,
    DataFileMissing,
    DataFileCopyFailed,
}

impl WarningKind {
    pub fn code(self) -> &'static str {
        match self {
            WarningKind::NoGroups => "NO_GROUPS",
            WarningKind::GroupWithoutChildren => "GROUP_WITHOUT_CHILDREN",
            WarningKind::TransactionWithoutChildren => "TRANSACTION_WITHOUT_CHILDREN",
            WarningKind::DataSetWithoutFilename => "DATA_SET_WITHOUT_FILENAME",
            WarningKind::DataFileMissing => "DATA_FILE_MISSING",
            WarningKind::DataFileCopyFailed => "DATA_FILE_COPY_FAILED",
        }
    }
}

/// A non-fatal problem; the run keeps going after recording it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionWarning {
    pub kind: WarningKind,
    pub message: String,
}

impl ConversionWarning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.code(), self.message)
    }
}

/// What was produced for one thread group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleReport {
    pub group_name: String,
    pub directory: PathBuf,
    pub parameter_sets: Vec<ParameterSet>,
    pub statement_count: usize,
    pub warnings: Vec<ConversionWarning>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReport {
    pub bundles: Vec<BundleReport>,
    pub warnings: Vec<ConversionWarning>,
}

impl ConversionReport {
    /// Document-level warnings first, then each bundle's in group order.
    pub fn all_warnings(&self) -> impl Iterator<Item = &ConversionWarning> {
        self.warnings
            .iter()
            .chain(self.bundles.iter().flat_map(|bundle| bundle.warnings.iter()))
    }

    pub fn is_clean(&self) -> bool {
        self.all_warnings().next().is_none()
    }
}

#[cfg(test)]
mod report_tests {
    use super::*;

    fn bundle(name: &str, warnings: Vec<ConversionWarning>) -> BundleReport {
        BundleReport {
            group_name: name.to_string(),
            directory: PathBuf::from(format!("out/Script_{}", name)),
            parameter_sets: Vec::new(),
            statement_count: 0,
            warnings,
        }
    }

    #[test]
    fn all_warnings_lists_document_then_bundle_warnings() {
        let report = ConversionReport {
            bundles: vec![
                bundle("a", Vec::new()),
                bundle(
                    "b",
                    vec![ConversionWarning::new(
                        WarningKind::DataFileMissing,
                        "users.csv",
                    )],
                ),
            ],
            warnings: vec![ConversionWarning::new(WarningKind::NoGroups, "none")],
        };
        let kinds = report
            .all_warnings()
            .map(|warning| warning.kind)
            .collect::<Vec<_>>();
        assert_eq!(kinds, vec![WarningKind::NoGroups, WarningKind::DataFileMissing]);
        assert!(!report.is_clean());
    }

    #[test]
    fn report_without_warnings_is_clean() {
        let report = ConversionReport {
            bundles: vec![bundle("a", Vec::new())],
            warnings: Vec::new(),
        };
        assert!(report.is_clean());
    }

    #[test]
    fn warning_display_uses_kind_code() {
        let warning = ConversionWarning::new(
            WarningKind::TransactionWithoutChildren,
            "Transaction 'login' has no hashTree.",
        );
        assert_eq!(
            warning.to_string(),
            "TRANSACTION_WITHOUT_CHILDREN: Transaction 'login' has no hashTree."
        );
    }
}
