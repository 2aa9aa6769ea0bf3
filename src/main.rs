// deadstore: dead-store analyzer for a tiny while-language

use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::Parser;
use crossterm::style::Stylize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use deadstore::analyzer::Analyzer;
use deadstore::parser::{self as source, ParserConfig};
use deadstore::printer::Printer;
use deadstore::ui::theme::DEFAULT_THEME;
use deadstore::ui::Report;

/// Find assignments whose value is never read
#[derive(Debug, Parser)]
#[command(name = "deadstore", version, about)]
struct Cli {
    /// Source file to analyze
    file: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Ignore unparseable text after the last statement instead of failing
    #[arg(long)]
    allow_trailing: bool,

    /// Print `end` after every `if`/`while` body so the listing parses again
    #[arg(long)]
    terminators: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let color = !cli.no_color && io::stdout().is_terminal();

    let text = match fs::read_to_string(&cli.file) {
        Ok(text) => text,
        Err(e) => {
            report_error(&format!("cannot read '{}': {}", cli.file.display(), e), color);
            std::process::exit(1);
        }
    };

    info!(file = %cli.file.display(), "parsing");
    let config = ParserConfig {
        allow_trailing_input: cli.allow_trailing,
    };
    let program = match source::Parser::with_config(&text, config).parse_program() {
        Ok(program) => program,
        Err(e) => {
            report_error(&e.to_string(), color);
            std::process::exit(1);
        }
    };

    info!("analyzing");
    let unused = Analyzer::new().find_unused_assignments(&program);
    debug!(count = unused.len(), "unused assignments found");

    let report = Report::new(&program, &unused)
        .with_printer(Printer::new().with_terminators(cli.terminators))
        .with_color(color);
    print!("{}", report.render());

    Ok(())
}

fn report_error(message: &str, color: bool) {
    if color {
        eprintln!("{} {}", "error:".with(DEFAULT_THEME.error).bold(), message);
    } else {
        eprintln!("error: {}", message);
    }
}
