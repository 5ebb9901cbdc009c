//! Command-line interface for share-my-repo

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod pack;
mod utils;

/// Package a repository into a single LLM-friendly context document
#[derive(Parser)]
#[command(name = "share-my-repo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pack: pack::PackArgs,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose);

    pack::run(cli.pack)
}

/// RUST_LOG in the environment takes precedence; otherwise INFO (DEBUG with
/// `--verbose`) for this crate and WARN for dependencies.
fn init_logging(verbose: bool) {
    let fallback = if verbose { "share_my_repo=debug,warn" } else { "share_my_repo=info,warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
