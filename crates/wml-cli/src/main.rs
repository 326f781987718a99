use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::io::Read;
use std::path::Path;

use wml_parser::{BoundaryPolicy, ParseOptions, RecoveryMode};
use wml_render::Format;

#[derive(Parser)]
#[command(name = "wml")]
#[command(about = "Parse line-oriented WordprocessingML markup into an element tree")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a markup file and print its element tree
    Parse {
        /// Input file, or `-` for stdin
        path: String,

        /// Number of partitions parsed in parallel
        #[arg(short = 'j', long, default_value_t = 1)]
        partitions: usize,

        /// Only cut partitions between top-level elements
        #[arg(long)]
        align_roots: bool,

        /// Fail on the first markup that would be dropped
        #[arg(long)]
        strict: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Outline)]
        format: OutputFormat,
    },

    /// Check a markup file for content that a tolerant parse would drop
    Check {
        /// Input file, or `-` for stdin
        path: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Outline,
    Json,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Outline => Format::Outline,
            OutputFormat::Json => Format::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Command::Parse {
            path,
            partitions,
            align_roots,
            strict,
            format,
        } => {
            let options = ParseOptions::new()
                .with_partitions(partitions)
                .with_mode(if strict {
                    RecoveryMode::Strict
                } else {
                    RecoveryMode::Tolerant
                })
                .with_boundaries(if align_roots {
                    BoundaryPolicy::RootAligned
                } else {
                    BoundaryPolicy::Positional
                });
            cmd_parse(&path, &options, format.into())
        }
        Command::Check { path } => cmd_check(&path),
    }
}

/// `RUST_LOG` overrides the level picked from `-v`.
fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn read_source(path: &str) -> String {
    if path == "-" {
        let mut source = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut source) {
            eprintln!("Error reading stdin: {e}");
            std::process::exit(1);
        }
        return source;
    }

    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        std::process::exit(1);
    }
    match std::fs::read_to_string(p) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_parse(path: &str, options: &ParseOptions, format: Format) {
    let source = read_source(path);
    let lines = wml_lexer::normalize(&source);
    log::info!("{path}: {} markup line(s)", lines.len());

    let nodes = match wml_parser::parse_with(&lines, options) {
        Ok(nodes) => nodes,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    match wml_render::render(&nodes, format) {
        Ok(output) if output.is_empty() => eprintln!("No elements in {path}"),
        Ok(output) if output.ends_with('\n') => print!("{output}"),
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn cmd_check(path: &str) {
    let source = read_source(path);
    let options = ParseOptions::new().strict();

    match wml_parser::parse_source(&source, &options) {
        Ok(nodes) => eprintln!("OK: {path} ({} root element(s))", nodes.len()),
        Err(e) => {
            eprintln!("{path}: {e}");
            std::process::exit(1);
        }
    }
}
