//! Layering of CLI values over config file values over defaults.

use super::loader::FileConfig;
use crate::domain::{OutputFormat, Settings, TreeStyle};
use std::path::PathBuf;

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub output: Option<PathBuf>,
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub use_gitignore: Option<bool>,
    pub max_file_size: Option<u64>,
    pub format: Option<OutputFormat>,
    pub tokens: Option<bool>,
    pub recent_days: Option<u64>,
    pub line_numbers: Option<bool>,
    pub preview: Option<usize>,
    pub ascii_tree: Option<bool>,
}

pub fn merge_cli_with_config(cli: CliOverrides, file: Option<FileConfig>) -> Settings {
    let file = file.unwrap_or_default();
    let defaults = Settings::default();

    let ascii_tree = cli.ascii_tree.or(file.ascii_tree).unwrap_or(false);

    Settings {
        output: cli.output.or(file.output).or(defaults.output),
        include: cli.include.or(file.include).unwrap_or(defaults.include),
        exclude: cli.exclude.or(file.exclude).unwrap_or(defaults.exclude),
        use_gitignore: cli.use_gitignore.or(file.use_gitignore).unwrap_or(defaults.use_gitignore),
        max_file_size: cli.max_file_size.or(file.max_file_size).unwrap_or(defaults.max_file_size),
        format: cli.format.or(file.format).unwrap_or(defaults.format),
        show_tokens: cli.tokens.or(file.tokens).unwrap_or(defaults.show_tokens),
        recent_days: cli.recent_days.or(file.recent_days).or(defaults.recent_days),
        line_numbers: cli.line_numbers.or(file.line_numbers).unwrap_or(defaults.line_numbers),
        // A zero-line preview would hide every file; treat it as "no preview".
        preview: cli.preview.or(file.preview).filter(|&n| n > 0).or(defaults.preview),
        tree_style: if ascii_tree { TreeStyle::Ascii } else { defaults.tree_style },
    }
}
