use std::fmt::Display;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct ConvertError {
    pub code: String,
    pub message: String,
}

impl ConvertError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Builds an error whose message names the path it failed on.
    pub fn at_path(code: impl Into<String>, path: &Path, error: impl Display) -> Self {
        Self {
            code: code.into(),
            message: format!("{}: {}", path.display(), error),
        }
    }
}
