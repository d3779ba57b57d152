//! JMeter `.jmx` plan to LoadRunner Web/HTTP script converter.
//!
//! [`convert`] produces one script bundle per `ThreadGroup`. Directory
//! creation failures abort the run; anything else degrades into
//! [`ConversionWarning`]s on the returned report.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use jl_core::{
    BundleReport, ConversionReport, ConversionWarning, ConvertError, ConvertOptions, WarningKind,
};
use jl_parser::{parse_xml_document, XmlDocument};
use tracing::{debug, info, warn};

pub mod arguments;
pub mod correlation;
pub mod csv_dataset;
pub mod emitter;
pub mod pairing;
pub mod render;
pub mod request;
pub mod transform;
pub mod walker;

use crate::csv_dataset::resolve_parameter_sets;
use crate::emitter::{
    render_action, render_conversion_log, render_default_cfg, render_parameters_prm,
    render_vuser_end, render_vuser_init, BundleWriter, LogSummary, ACTION_FILE,
    BUNDLE_DIR_PREFIX, CONVERSION_LOG_FILE, DEFAULT_CFG_FILE, PARAMETERS_FILE, VUSER_END_FILE,
    VUSER_INIT_FILE,
};
use crate::pairing::{PlanNode, PlanScope};
use crate::transform::sanitize_name;
use crate::walker::{ActionBuilder, FallbackNames};

/// Converts the plan at `input` into bundles under `output_root`.
pub fn convert(
    input: &Path,
    output_root: &Path,
    options: &ConvertOptions,
) -> Result<ConversionReport, ConvertError> {
    if !input.exists() {
        return Err(ConvertError::new(
            "INPUT_NOT_FOUND",
            format!("JMX file does not exist: {}", input.display()),
        ));
    }
    fs::create_dir_all(output_root)
        .map_err(|error| ConvertError::at_path("OUTPUT_DIR_CREATE", output_root, error))?;

    let source = fs::read_to_string(input)
        .map_err(|error| ConvertError::at_path("INPUT_READ", input, error))?;
    let document = parse_xml_document(&source)?;
    let input_dir = input.parent().unwrap_or_else(|| Path::new(""));

    convert_document(&document, input_dir, output_root, options)
}

/// Converts an already parsed plan. Relative data file paths resolve
/// against `input_dir`; `output_root` must exist.
pub fn convert_document(
    document: &XmlDocument,
    input_dir: &Path,
    output_root: &Path,
    options: &ConvertOptions,
) -> Result<ConversionReport, ConvertError> {
    let plan = PlanScope::build(&document.root);
    let groups = plan.thread_groups();
    let mut report = ConversionReport::default();

    if groups.is_empty() {
        push_warning(
            &mut report.warnings,
            WarningKind::NoGroups,
            "No ThreadGroup elements found in JMX.",
        );
    }

    let mut run = ConversionRun {
        document,
        input_dir,
        output_root,
        options,
        names: FallbackNames::default(),
        claimed_dirs: BTreeSet::new(),
    };
    for (index, group) in groups.into_iter().enumerate() {
        report.bundles.push(run.convert_group(group, index)?);
    }

    info!(bundles = report.bundles.len(), "conversion finished");
    Ok(report)
}

/// State shared by all groups of a single `convert` call.
struct ConversionRun<'a> {
    document: &'a XmlDocument,
    input_dir: &'a Path,
    output_root: &'a Path,
    options: &'a ConvertOptions,
    names: FallbackNames,
    claimed_dirs: BTreeSet<String>,
}

impl ConversionRun<'_> {
    fn convert_group(
        &mut self,
        group: &PlanNode<'_>,
        index: usize,
    ) -> Result<BundleReport, ConvertError> {
        let group_name = group
            .display_name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("ThreadGroup_{}", index + 1));
        let bundle_dir = self.output_root.join(self.claim_directory(&group_name));
        fs::create_dir_all(&bundle_dir)
            .map_err(|error| ConvertError::at_path("BUNDLE_DIR_CREATE", &bundle_dir, error))?;
        let bundle_dir = fs::canonicalize(&bundle_dir).unwrap_or(bundle_dir);
        info!(group = %group_name, dir = %bundle_dir.display(), "converting thread group");

        let data_sets = resolve_parameter_sets(&self.document.root, self.input_dir, &bundle_dir);
        let mut warnings = data_sets.warnings;
        let parameter_sets = data_sets.parameter_sets;

        let writer = BundleWriter::new(&bundle_dir);
        writer.write(VUSER_INIT_FILE, &render_vuser_init())?;
        writer.write(VUSER_END_FILE, &render_vuser_end())?;
        writer.write(DEFAULT_CFG_FILE, &render_default_cfg(&parameter_sets))?;
        writer.write(PARAMETERS_FILE, &render_parameters_prm(&parameter_sets))?;

        let mut builder = ActionBuilder::new(self.options, &mut self.names);
        builder.walk_group(group, &group_name);
        let (statements, action_warnings) = builder.finish();
        warnings.extend(action_warnings);
        writer.write(ACTION_FILE, &render_action(&statements))?;
        debug!(
            requests = statements.iter().filter(|statement| statement.is_request()).count(),
            captures = statements.iter().filter(|statement| statement.is_correlation()).count(),
            "rendered action"
        );

        writer.write(
            CONVERSION_LOG_FILE,
            &render_conversion_log(&LogSummary {
                group_name: &group_name,
                directory: &bundle_dir,
                parameter_sets: &parameter_sets,
                warnings: &warnings,
                correlation_enabled: self.options.enable_correlation,
            }),
        )?;
        info!(
            dir = %writer.directory().display(),
            warnings = warnings.len(),
            "bundle written"
        );

        Ok(BundleReport {
            group_name,
            directory: bundle_dir,
            parameter_sets,
            statement_count: statements.len(),
            warnings,
        })
    }

    /// `Script_<name>`, suffixed `_2`, `_3`, ... when an earlier group of
    /// this run already took the name.
    fn claim_directory(&mut self, group_name: &str) -> String {
        let base = format!("{}{}", BUNDLE_DIR_PREFIX, sanitize_name(group_name));
        let mut candidate = base.clone();
        let mut suffix = 2;
        while !self.claimed_dirs.insert(candidate.clone()) {
            candidate = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        candidate
    }
}

pub(crate) fn push_warning(
    warnings: &mut Vec<ConversionWarning>,
    kind: WarningKind,
    message: impl Into<String>,
) {
    let warning = ConversionWarning::new(kind, message);
    warn!(code = warning.kind.code(), "{}", warning.message);
    warnings.push(warning);
}
