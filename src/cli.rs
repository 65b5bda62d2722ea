use std::path::PathBuf;

use clap::Parser;

use generate_license_file::{LineEnding, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "generate-license-file",
    about = "Collect the licenses of a project's production dependencies into one file",
    version
)]
pub struct Cli {
    /// Project directory containing package.json
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub input: PathBuf,

    /// Output file [default: third-party-licenses.txt, or .json with --json]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write JSON instead of plain text
    #[arg(long)]
    pub json: bool,

    /// Line endings of the generated file [default: platform native]
    #[arg(long, value_name = "EOL")]
    pub eol: Option<EolArg>,

    /// Replace the output file if it already exists
    #[arg(long)]
    pub overwrite: bool,

    /// Config file [default: ./.generate-license-file/config.toml, fallback ~/.config/generate-license-file/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Leave a package out of the report (repeatable)
    #[arg(long = "exclude", value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Print a table of every distinct license
    #[arg(short, long)]
    pub verbose: bool,

    /// No spinner or summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn format(&self, config_json: bool) -> OutputFormat {
        if self.json || config_json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum EolArg {
    Lf,
    Crlf,
}

impl From<&EolArg> for LineEnding {
    fn from(arg: &EolArg) -> Self {
        match arg {
            EolArg::Lf => LineEnding::Lf,
            EolArg::Crlf => LineEnding::Crlf,
        }
    }
}

/// Output path used when neither the command line nor the config names one.
pub fn default_output(format: OutputFormat) -> PathBuf {
    match format {
        OutputFormat::Text => PathBuf::from("third-party-licenses.txt"),
        OutputFormat::Json => PathBuf::from("third-party-licenses.json"),
    }
}
