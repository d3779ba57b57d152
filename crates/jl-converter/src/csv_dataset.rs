//! `CSVDataSet` resolution. Each referenced file is copied into the bundle
//! with a `.dat` twin. A set whose file is missing or fails to copy is
//! reported as a warning and left out of `default.cfg` and `parameters.prm`,
//! so every parameter entry points at a file present in the bundle.

use std::fs;
use std::path::{Path, PathBuf};

use jl_core::{ConversionWarning, ParameterSet, WarningKind, DEFAULT_DELIMITER};
use jl_parser::{descendants, non_blank_string_prop, string_prop, XmlElementNode};
use tracing::debug;

use crate::pairing::CSV_DATA_SET;
use crate::push_warning;

const FILENAME_PROP: &str = "filename";
const VARIABLE_NAMES_PROP: &str = "variableNames";
const DELIMITER_PROP: &str = "delimiter";
const DATA_FILE_EXTENSION: &str = "dat";

#[derive(Debug, Clone, Default)]
pub struct DataSetResolution {
    pub parameter_sets: Vec<ParameterSet>,
    pub warnings: Vec<ConversionWarning>,
}

/// Copies every `CSVDataSet` file referenced anywhere in the document into
/// `bundle_dir`, next to a `.dat` twin, and returns the column mappings.
/// Missing or uncopyable files are recorded as warnings and skipped.
pub fn resolve_parameter_sets(
    document_root: &XmlElementNode,
    input_dir: &Path,
    bundle_dir: &Path,
) -> DataSetResolution {
    let mut resolution = DataSetResolution::default();

    for declaration in descendants(document_root)
        .into_iter()
        .filter(|element| element.is(CSV_DATA_SET))
    {
        let resolved = resolve_one(declaration, input_dir, bundle_dir, &mut resolution.warnings);
        if let Some(set) = resolved {
            debug!(
                source = %set.source_file,
                data = %set.data_file,
                variables = set.variables.len(),
                "resolved parameter set"
            );
            resolution.parameter_sets.push(set);
        }
    }

    resolution
}

fn resolve_one(
    declaration: &XmlElementNode,
    input_dir: &Path,
    bundle_dir: &Path,
    warnings: &mut Vec<ConversionWarning>,
) -> Option<ParameterSet> {
    let Some(filename) = non_blank_string_prop(declaration, FILENAME_PROP) else {
        push_warning(
            warnings,
            WarningKind::DataSetWithoutFilename,
            format!(
                "CSVDataSet '{}' (line {}) has no filename.",
                declaration.attr("testname").unwrap_or_default(),
                declaration.line
            ),
        );
        return None;
    };

    let source = resolve_source_path(filename.trim(), input_dir);
    let file_name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    let (Some(file_name), true) = (file_name, source.is_file()) else {
        push_warning(
            warnings,
            WarningKind::DataFileMissing,
            format!("CSV file not found: {}", source.display()),
        );
        return None;
    };

    let csv_target = bundle_dir.join(&file_name);
    if let Err(error) = fs::copy(&source, &csv_target) {
        push_warning(
            warnings,
            WarningKind::DataFileCopyFailed,
            format!(
                "Failed to copy {} to {}: {}",
                source.display(),
                csv_target.display(),
                error
            ),
        );
        return None;
    }

    let data_file = data_file_name(&file_name);
    if data_file != file_name {
        let dat_target = bundle_dir.join(&data_file);
        if let Err(error) = fs::copy(&csv_target, &dat_target) {
            push_warning(
                warnings,
                WarningKind::DataFileCopyFailed,
                format!(
                    "Failed to create {} from {}: {}",
                    dat_target.display(),
                    csv_target.display(),
                    error
                ),
            );
            return None;
        }
    }

    Some(ParameterSet {
        source_file: file_name,
        data_file,
        variables: split_variable_names(
            string_prop(declaration, VARIABLE_NAMES_PROP)
                .as_deref()
                .unwrap_or_default(),
        ),
        delimiter: string_prop(declaration, DELIMITER_PROP)
            .filter(|delimiter| !delimiter.is_empty())
            .unwrap_or_else(|| DEFAULT_DELIMITER.to_string()),
    })
}

fn resolve_source_path(filename: &str, input_dir: &Path) -> PathBuf {
    let path = PathBuf::from(filename);
    if path.is_absolute() {
        path
    } else {
        input_dir.join(path)
    }
}

/// `users.csv` -> `users.dat`; names without an extension get `.dat` appended.
pub fn data_file_name(file_name: &str) -> String {
    Path::new(file_name)
        .with_extension(DATA_FILE_EXTENSION)
        .to_string_lossy()
        .into_owned()
}

pub fn split_variable_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
