//! tkui-inspect: parse a `.tkui` file and print what the parser built.
//!
//! Usage:
//!   tkui-inspect `<path>` [--format json|tkui] [--encoding <label>] [--mount <label>] [--lint] [--verbose]

mod dump;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tkui_core::{LintSeverity, MountPoint, emit_document, lint_tree};

/// Print the widget tree of a .tkui document
#[derive(Parser, Debug)]
#[command(name = "tkui-inspect")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the .tkui file
    path: PathBuf,

    /// Character encoding of the file
    #[arg(short, long, default_value = tkui_core::DEFAULT_ENCODING)]
    encoding: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Label of the container the root widget is mounted in
    #[arg(short, long, default_value = ".")]
    mount: String,

    /// Report lint findings on stderr
    #[arg(short, long)]
    lint: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Nested JSON objects
    Json,
    /// Canonical .tkui text
    Tkui,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let tree = tkui_core::parse_file(&cli.path, MountPoint::new(cli.mount.as_str()), &cli.encoding)?;

    let output = match cli.format {
        Format::Json => serde_json::to_string_pretty(&dump::tree_to_json(&tree))?,
        Format::Tkui => emit_document(&tree),
    };
    println!("{}", output.trim_end());

    if cli.lint {
        for diag in lint_tree(&tree) {
            let severity = match diag.severity {
                LintSeverity::Warning => "warning",
                LintSeverity::Info => "info",
            };
            eprintln!(
                "{}:{}: {severity}[{}]: {}",
                cli.path.display(),
                diag.line + 1,
                diag.rule,
                diag.message
            );
        }
    }
    Ok(())
}
