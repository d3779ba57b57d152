use super::*;
use jl_core::{BundleReport, ConversionWarning, WarningKind};
use jl_test_example::fixture_plan;
use std::fs;
use std::path::PathBuf;

fn convert_args(options: Option<String>, no_correlation: bool) -> ConvertArgs {
    ConvertArgs {
        input: "plan.jmx".to_string(),
        output_dir: "out".to_string(),
        options,
        no_correlation,
        verbose: false,
    }
}

#[test]
fn cli_parses_convert_flags() {
    let cli = Cli::try_parse_from([
        "jl-cli",
        "convert",
        "--input",
        "plan.jmx",
        "--output-dir",
        "out",
        "--no-correlation",
        "--verbose",
    ])
    .expect("args should parse");
    let Mode::Convert(args) = cli.command;
    assert_eq!(args.input, "plan.jmx");
    assert_eq!(args.output_dir, "out");
    assert!(args.options.is_none());
    assert!(args.no_correlation);
    assert!(args.verbose);
}

#[test]
fn cli_requires_input_and_output() {
    assert!(Cli::try_parse_from(["jl-cli", "convert", "--input", "plan.jmx"]).is_err());
    assert_ne!(run_cli_from_args(["jl-cli", "convert"]), 0);
}

#[test]
fn options_default_without_file() {
    let options = resolve_options(&convert_args(None, false)).expect("defaults");
    assert!(options.enable_correlation);
}

#[test]
fn flag_overrides_options_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("options.json");
    fs::write(&path, r#"{"enableCorrelation":true}"#).expect("options file");

    let file_options = read_options_file(path.to_string_lossy().as_ref()).expect("file options");
    assert!(file_options.enable_correlation);

    let args = convert_args(Some(path.to_string_lossy().into_owned()), true);
    let options = resolve_options(&args).expect("options");
    assert!(!options.enable_correlation);
}

#[test]
fn options_file_errors_carry_codes() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("missing.json");
    let error = read_options_file(missing.to_string_lossy().as_ref())
        .expect_err("missing file should fail");
    assert_eq!(error.code, "OPTIONS_READ");

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{").expect("broken file");
    let error = read_options_file(broken.to_string_lossy().as_ref())
        .expect_err("broken json should fail");
    assert_eq!(error.code, "OPTIONS_INVALID");
}

#[test]
fn verbose_filter_is_debug() {
    assert!(build_filter(true).to_string().contains("debug"));
}

#[test]
fn report_lines_follow_line_protocol() {
    let report = ConversionReport {
        bundles: vec![BundleReport {
            group_name: "Users".to_string(),
            directory: PathBuf::from("/out/Script_Users"),
            parameter_sets: Vec::new(),
            statement_count: 3,
            warnings: vec![ConversionWarning::new(
                WarningKind::DataFileMissing,
                "CSV file not found: /x/users.csv",
            )],
        }],
        warnings: Vec::new(),
    };
    assert_eq!(
        report_lines(&report),
        vec![
            "RESULT:OK".to_string(),
            "BUNDLE:/out/Script_Users".to_string(),
            "WARNING:DATA_FILE_MISSING:CSV file not found: /x/users.csv".to_string(),
        ]
    );
}

#[test]
fn run_converts_fixture_in_process() {
    let output = tempfile::tempdir().expect("output dir");
    let plan = fixture_plan("01-get-basic");
    let code = run_cli_from_args([
        "jl-cli".to_string(),
        "convert".to_string(),
        "--input".to_string(),
        plan.to_string_lossy().into_owned(),
        "--output-dir".to_string(),
        output.path().to_string_lossy().into_owned(),
    ]);
    assert_eq!(code, 0);
    assert!(output.path().join("Script_Smoke").join("Action.c").is_file());
}

#[test]
fn run_reports_missing_input_as_error() {
    let output = tempfile::tempdir().expect("output dir");
    let code = run_cli_from_args([
        "jl-cli".to_string(),
        "convert".to_string(),
        "--input".to_string(),
        "/definitely/not/here.jmx".to_string(),
        "--output-dir".to_string(),
        output.path().to_string_lossy().into_owned(),
    ]);
    assert_eq!(code, 1);
}
