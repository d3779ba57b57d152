use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "jl-cli")]
#[command(about = "Convert JMeter plans into LoadRunner script bundles")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    Convert(ConvertArgs),
}

#[derive(Debug, Args)]
pub(crate) struct ConvertArgs {
    #[arg(long = "input")]
    pub(crate) input: String,
    #[arg(long = "output-dir")]
    pub(crate) output_dir: String,
    /// JSON file with `ConvertOptions` fields.
    #[arg(long = "options")]
    pub(crate) options: Option<String>,
    #[arg(long = "no-correlation")]
    pub(crate) no_correlation: bool,
    #[arg(long = "verbose")]
    pub(crate) verbose: bool,
}
