use std::ffi::OsString;
use std::path::Path;

use clap::Parser;
use jl_converter::convert;
use jl_core::{ConversionReport, ConvertError};
use tracing::debug;

mod cli_args;
mod error_map;
mod logging;
mod options_loader;

pub(crate) use cli_args::{Cli, ConvertArgs, Mode};
pub(crate) use error_map::emit_error;
pub(crate) use logging::init_logging;
pub(crate) use options_loader::resolve_options;
#[cfg(test)]
pub(crate) use logging::build_filter;
#[cfg(test)]
pub(crate) use options_loader::read_options_file;

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, ConvertError> {
    match cli.command {
        Mode::Convert(args) => run_convert(args),
    }
}

fn run_convert(args: ConvertArgs) -> Result<i32, ConvertError> {
    init_logging(args.verbose);
    let options = resolve_options(&args)?;
    debug!(?options, input = %args.input, "starting conversion");

    let report = convert(Path::new(&args.input), Path::new(&args.output_dir), &options)?;
    for line in report_lines(&report) {
        println!("{}", line);
    }
    Ok(0)
}

/// `RESULT:OK`, then one `BUNDLE:` line per bundle and one `WARNING:` line
/// per warning, document-level warnings first.
pub(crate) fn report_lines(report: &ConversionReport) -> Vec<String> {
    let mut lines = vec!["RESULT:OK".to_string()];
    lines.extend(
        report
            .bundles
            .iter()
            .map(|bundle| format!("BUNDLE:{}", bundle.directory.display())),
    );
    lines.extend(report.all_warnings().map(|warning| {
        format!(
            "WARNING:{}:{}",
            warning.kind.code(),
            warning.message.replace('\n', " ")
        )
    }));
    lines
}

#[cfg(test)]
mod tests;
