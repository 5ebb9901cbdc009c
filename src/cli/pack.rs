//! Default command: scan inputs and write the context document

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use super::utils::parse_csv;
use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::{OutputFormat, Settings};
use crate::render::{render, RenderOptions};
use crate::scan::Scanner;

#[derive(Args)]
pub struct PackArgs {
    /// Files or directories to include (defaults to the current directory)
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Write the result to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Only include files matching these globs (comma-separated, e.g. '*.py,src/')
    #[arg(long, value_name = "GLOBS")]
    pub include: Option<String>,

    /// Exclude files matching these globs (comma-separated)
    #[arg(long, value_name = "GLOBS")]
    pub exclude: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Append an estimated token count
    #[arg(short, long)]
    pub tokens: bool,

    /// Only include files modified in the last DAYS days
    #[arg(
        short,
        long,
        value_name = "DAYS",
        num_args = 0..=1,
        default_missing_value = "7",
        require_equals = true
    )]
    pub recent: Option<u64>,

    /// Keep only the first LINES lines of each file
    #[arg(short, long, value_name = "LINES")]
    pub preview: Option<usize>,

    /// Prefix each line with its line number
    #[arg(short, long)]
    pub line_numbers: bool,

    /// Truncate files larger than this (bytes, default 16384)
    #[arg(long, value_name = "BYTES")]
    pub max_file_size: Option<u64>,

    /// Honor .gitignore rules
    #[arg(long, overrides_with = "no_gitignore")]
    pub gitignore: bool,

    /// Ignore .gitignore rules
    #[arg(long, overrides_with = "gitignore")]
    pub no_gitignore: bool,

    /// Draw the directory tree with ASCII characters
    #[arg(long)]
    pub ascii_tree: bool,

    /// Path to a TOML config file (default: discovered in the current directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl PackArgs {
    fn overrides(&self) -> CliOverrides {
        let use_gitignore = if self.gitignore {
            Some(true)
        } else if self.no_gitignore {
            Some(false)
        } else {
            None
        };

        CliOverrides {
            output: self.output.clone(),
            include: parse_csv(self.include.as_deref()),
            exclude: parse_csv(self.exclude.as_deref()),
            use_gitignore,
            max_file_size: self.max_file_size,
            format: self.format,
            tokens: self.tokens.then_some(true),
            recent_days: self.recent,
            line_numbers: self.line_numbers.then_some(true),
            preview: self.preview,
            ascii_tree: self.ascii_tree.then_some(true),
        }
    }
}

pub fn run(args: PackArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let file_config = load_config(&cwd, args.config.as_deref())?;
    let settings = merge_cli_with_config(args.overrides(), file_config);
    tracing::debug!(?settings, "resolved settings");

    let paths = if args.paths.is_empty() { vec![PathBuf::from(".")] } else { args.paths };

    let now = Utc::now();
    let scanner = Scanner::new(&settings, now)?;
    let Some(snapshot) = scanner.scan_all(&paths) else {
        tracing::warn!("No results to output");
        return Ok(());
    };

    let document = render(&snapshot, &RenderOptions::from_settings(&settings, now))?;
    write_output(&settings, &document)
}

fn write_output(settings: &Settings, document: &str) -> Result<()> {
    match &settings.output {
        Some(path) => {
            fs::write(path, document)
                .with_context(|| format!("Failed to write output file {}", path.display()))?;
            tracing::info!("Output written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_bytes()).context("Failed to write to stdout")?;
            if !document.ends_with('\n') {
                stdout.write_all(b"\n").context("Failed to write to stdout")?;
            }
            stdout.flush().context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
