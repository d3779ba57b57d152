use std::fs;
use std::path::{Path, PathBuf};

use jl_core::{ActionStatement, ConversionWarning, ConvertError, ParameterSet};

use crate::render::render_statements;
use crate::transform::sanitize_name;

pub const BUNDLE_DIR_PREFIX: &str = "Script_";
pub const VUSER_INIT_FILE: &str = "vuser_init.c";
pub const VUSER_END_FILE: &str = "vuser_end.c";
pub const ACTION_FILE: &str = "Action.c";
pub const DEFAULT_CFG_FILE: &str = "default.cfg";
pub const PARAMETERS_FILE: &str = "parameters.prm";
pub const CONVERSION_LOG_FILE: &str = "conversion.log";

const C_INCLUDES: &str = "#include \"lrun.h\"\n#include \"web_api.h\"\n#include \"lrw_custom_body.h\"\n\n";

/// Writes the generated files of one bundle directory.
#[derive(Debug, Clone)]
pub struct BundleWriter {
    directory: PathBuf,
}

impl BundleWriter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn write(&self, file_name: &str, contents: &str) -> Result<(), ConvertError> {
        let path = self.directory.join(file_name);
        fs::write(&path, contents)
            .map_err(|error| ConvertError::at_path("BUNDLE_WRITE", &path, error))
    }
}

pub fn render_lifecycle_stub(function_name: &str, hint: &str) -> String {
    format!(
        "{C_INCLUDES}{function_name}()\n{{\n    // {hint}\n    return 0;\n}}\n"
    )
}

pub fn render_vuser_init() -> String {
    render_lifecycle_stub("vuser_init", "Add login / init steps here if needed")
}

pub fn render_vuser_end() -> String {
    render_lifecycle_stub("vuser_end", "Add logout / cleanup steps here if needed")
}

pub fn render_action(statements: &[ActionStatement]) -> String {
    format!(
        "{C_INCLUDES}Action()\n{{\n    int rc = 0;\n\n{}\n    return 0;\n}}\n",
        render_statements(statements)
    )
}

/// Yields `(set, column, variable)` for every generated parameter.
fn parameters(sets: &[ParameterSet]) -> impl Iterator<Item = (&ParameterSet, usize, &str)> {
    sets.iter()
        .flat_map(|set| set.columns().map(move |(column, name)| (set, column, name)))
}

pub fn render_default_cfg(sets: &[ParameterSet]) -> String {
    let mut out = String::from(
        "[General]\nDefaultRunLogic=Action\n\n\
         [Actions]\nvuser_init=vuser_init.c\nAction=Action.c\nvuser_end=vuser_end.c\n\n\
         [Parameters]\n\n",
    );
    for (set, column, name) in parameters(sets) {
        out.push_str(&format!(
            "[{}]\nType=File\nFileName={}\nColumn={}\nDelimiter={}\nSelectNextRow=Sequential\nWhenOutOfRange=Continue\n\n",
            sanitize_name(name),
            set.data_file,
            column,
            set.effective_delimiter()
        ));
    }
    out
}

pub fn render_parameters_prm(sets: &[ParameterSet]) -> String {
    let mut out = String::from(
        "; Parameter mapping generated from JMeter CSV Data Set Config\n\
         ; Open in VuGen and refine for your LoadRunner version.\n\n",
    );
    for (set, column, name) in parameters(sets) {
        out.push_str(&format!(
            "[Parameter]\nName={}\nType=File\nFileName={}\nColumn={}\nColumnDelimiter={}\nUpdateMode=Sequential\nWhenOutOfRange=Continue\n\n",
            sanitize_name(name),
            set.data_file,
            column,
            set.effective_delimiter()
        ));
    }
    out
}

pub struct LogSummary<'a> {
    pub group_name: &'a str,
    pub directory: &'a Path,
    pub parameter_sets: &'a [ParameterSet],
    pub warnings: &'a [ConversionWarning],
    pub correlation_enabled: bool,
}

pub fn render_conversion_log(summary: &LogSummary<'_>) -> String {
    let mut out = format!(
        "ThreadGroup: {}\nScript folder: {}\n\nCSV/DAT Parameters:\n",
        summary.group_name,
        summary.directory.display()
    );
    if summary.parameter_sets.is_empty() {
        out.push_str("  (none)\n");
    }
    for set in summary.parameter_sets {
        out.push_str(&format!(
            "  CSV: {}  DAT: {}  Vars: [{}]\n",
            set.source_file,
            set.data_file,
            set.variables.join(", ")
        ));
    }

    out.push_str("\nWarnings:\n");
    if summary.warnings.is_empty() {
        out.push_str("  (none)\n");
    }
    for warning in summary.warnings {
        out.push_str(&format!("  - {}\n", warning));
    }

    out.push_str("\nNotes:\n");
    if summary.correlation_enabled {
        out.push_str("  - Correlations (Regex, JSON) have been converted to web_reg_save_param_ex/web_reg_save_param_json.\n");
    } else {
        out.push_str("  - Correlation conversion was disabled; extractors were not translated.\n");
    }
    out.push_str("  - Parameters reference .dat files in default.cfg and parameters.prm.\n");
    out.push_str("  - Open this script in VuGen and check parameters & correlations.\n");
    out
}
