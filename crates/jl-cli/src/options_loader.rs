use std::fs;

use jl_core::{ConvertError, ConvertOptions};

use crate::cli_args::ConvertArgs;
use crate::error_map::{map_options_invalid, map_options_read};

pub(crate) fn read_options_file(path: &str) -> Result<ConvertOptions, ConvertError> {
    let text = fs::read_to_string(path).map_err(map_options_read)?;
    serde_json::from_str(&text).map_err(map_options_invalid)
}

/// File options first, then flag overrides.
pub(crate) fn resolve_options(args: &ConvertArgs) -> Result<ConvertOptions, ConvertError> {
    let mut options = match &args.options {
        Some(path) => read_options_file(path)?,
        None => ConvertOptions::default(),
    };
    if args.no_correlation {
        options.enable_correlation = false;
    }
    Ok(options)
}
