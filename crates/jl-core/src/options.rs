use serde::{Deserialize, Serialize};

/// Knobs for a single conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConvertOptions {
    /// Translate regex/JSON extractors into `web_reg_save_param_*` calls.
    pub enable_correlation: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            enable_correlation: true,
        }
    }
}
