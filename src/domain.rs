//! Core data types shared across the pipeline.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default byte limit above which file content is truncated.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 16 * 1024;

/// Default recency window when `--recent` is given without a value.
pub const DEFAULT_RECENT_DAYS: u64 = 7;

/// Location label used when several inputs are merged into one snapshot.
pub const COMBINED_LOCATION: &str = "Multiple paths processed";

/// Serialization produced by the formatter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "json" => Some(OutputFormat::Json),
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Characters used to draw the directory tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TreeStyle {
    #[default]
    Unicode,
    Ascii,
}

/// Fully resolved settings for one run (defaults < config file < CLI).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub output: Option<PathBuf>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub use_gitignore: bool,
    pub max_file_size: u64,
    pub format: OutputFormat,
    pub show_tokens: bool,
    pub recent_days: Option<u64>,
    pub line_numbers: bool,
    pub preview: Option<usize>,
    pub tree_style: TreeStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: None,
            include: Vec::new(),
            exclude: Vec::new(),
            use_gitignore: false,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            format: OutputFormat::Markdown,
            show_tokens: false,
            recent_days: None,
            line_numbers: false,
            preview: None,
            tree_style: TreeStyle::Unicode,
        }
    }
}

/// How a record's content was shortened, if at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Truncation {
    #[default]
    None,
    /// Content was cut at `max_file_size` bytes.
    Size,
    /// Content was cut to the first `preview` lines.
    Preview,
}

impl Truncation {
    pub fn is_none(&self) -> bool {
        matches!(self, Truncation::None)
    }
}

/// A single file that survived filtering, with its loaded content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub relative_path: String,
    pub absolute_path: PathBuf,
    pub size_bytes: u64,
    pub modified: DateTime<Utc>,
    pub is_binary: bool,
    pub lines: usize,
    pub truncated: Truncation,
    pub content: String,
}

/// A file that was discovered but could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub relative_path: String,
    pub reason: String,
}

/// Metadata about the HEAD commit of the scanned repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitMetadata {
    pub commit: String,
    pub branch: String,
    pub author: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotStats {
    pub total_files: usize,
    pub total_lines: usize,
    pub total_bytes: u64,
    pub truncated_files: usize,
    pub binary_files: usize,
    pub skipped_files: usize,
}

impl SnapshotStats {
    pub fn from_records(files: &[FileRecord], skipped: &[SkippedFile]) -> Self {
        let mut stats = SnapshotStats { skipped_files: skipped.len(), ..Default::default() };
        for file in files {
            stats.total_files += 1;
            stats.total_lines += file.lines;
            stats.total_bytes += file.size_bytes;
            if !file.truncated.is_none() {
                stats.truncated_files += 1;
            }
            if file.is_binary {
                stats.binary_files += 1;
            }
        }
        stats
    }

    fn absorb(&mut self, other: &SnapshotStats) {
        self.total_files += other.total_files;
        self.total_lines += other.total_lines;
        self.total_bytes += other.total_bytes;
        self.truncated_files += other.truncated_files;
        self.binary_files += other.binary_files;
        self.skipped_files += other.skipped_files;
    }
}

/// The processed view of one input path (or several, once combined).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoSnapshot {
    pub location: String,
    pub git: Option<GitMetadata>,
    pub structure: String,
    pub files: Vec<FileRecord>,
    pub skipped: Vec<SkippedFile>,
    pub stats: SnapshotStats,
}

impl RepoSnapshot {
    pub fn new(
        location: String,
        git: Option<GitMetadata>,
        structure: String,
        files: Vec<FileRecord>,
        skipped: Vec<SkippedFile>,
    ) -> Self {
        let stats = SnapshotStats::from_records(&files, &skipped);
        Self { location, git, structure, files, skipped, stats }
    }

    /// Merge snapshots from several inputs, preserving input order.
    ///
    /// A single snapshot is returned unchanged.
    pub fn combine(mut snapshots: Vec<RepoSnapshot>) -> Option<RepoSnapshot> {
        if snapshots.len() <= 1 {
            return snapshots.pop();
        }

        let mut structures = Vec::with_capacity(snapshots.len());
        let mut files = Vec::new();
        let mut skipped = Vec::new();
        let mut stats = SnapshotStats::default();

        for snapshot in snapshots {
            let root_name = std::path::Path::new(&snapshot.location)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(&snapshot.location)
                .to_string();
            if snapshot.structure.is_empty() {
                structures.push(format!("{root_name}/"));
            } else {
                structures.push(format!("{root_name}/\n{}", snapshot.structure));
            }
            stats.absorb(&snapshot.stats);
            files.extend(snapshot.files);
            skipped.extend(snapshot.skipped);
        }

        Some(RepoSnapshot {
            location: COMBINED_LOCATION.to_string(),
            git: None,
            structure: structures.join("\n\n"),
            files,
            skipped,
            stats,
        })
    }
}
