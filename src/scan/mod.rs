//! Walk → filter → load pipeline producing [`RepoSnapshot`]s.

use crate::domain::{RepoSnapshot, Settings, TreeStyle};
use crate::error::{Result, ShareError};
use crate::git::read_git_metadata;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

pub mod filter;
pub mod loader;
pub mod tree;
pub mod walker;

pub use filter::{Decision, ExclusionReason, FilterEngine};
pub use loader::{ContentLoader, Loaded};
pub use tree::render_tree;
pub use walker::{Candidate, FileWalker};

/// Per-walk counters, logged at debug level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files_seen: usize,
    pub files_kept: usize,
    pub files_excluded_pattern: usize,
    pub files_excluded_recent: usize,
    pub files_flagged_size: usize,
}

/// Runs the pipeline for each input path.
pub struct Scanner {
    filter: FilterEngine,
    loader: ContentLoader,
    use_gitignore: bool,
    tree_style: TreeStyle,
}

impl Scanner {
    /// Build a scanner from resolved settings. Fails on invalid glob patterns.
    pub fn new(settings: &Settings, now: DateTime<Utc>) -> Result<Self> {
        let filter = FilterEngine::new(
            &settings.include,
            &settings.exclude,
            settings.max_file_size,
            settings.recent_days,
            now,
        )?;
        let loader = ContentLoader::new(settings.max_file_size)
            .line_numbers(settings.line_numbers)
            .preview(settings.preview);

        Ok(Self {
            filter,
            loader,
            use_gitignore: settings.use_gitignore,
            tree_style: settings.tree_style,
        })
    }

    /// Scan every input and combine the results.
    ///
    /// Inputs that fail are logged and left out. Returns `None` when nothing
    /// could be scanned.
    pub fn scan_all(&self, paths: &[PathBuf]) -> Option<RepoSnapshot> {
        let mut snapshots = Vec::with_capacity(paths.len());
        for path in paths {
            match self.scan(path) {
                Ok(snapshot) => snapshots.push(snapshot),
                Err(err) => tracing::error!("Error processing {}: {}", path.display(), err),
            }
        }
        RepoSnapshot::combine(snapshots)
    }

    /// Scan a single file or directory.
    pub fn scan(&self, path: &Path) -> Result<RepoSnapshot> {
        let resolved = path.canonicalize().map_err(|_| ShareError::PathNotFound(path.to_path_buf()))?;

        if resolved.is_file() {
            self.scan_file(&resolved)
        } else if resolved.is_dir() {
            Ok(self.scan_directory(&resolved))
        } else {
            Err(ShareError::NotFileOrDirectory(resolved))
        }
    }

    /// An explicitly named file bypasses pattern and recency filters but
    /// still honors the size limit.
    fn scan_file(&self, path: &Path) -> Result<RepoSnapshot> {
        let candidate = walker::single_file_candidate(path).map_err(|e| ShareError::io(path, e))?;
        let parent = path.parent().unwrap_or(path);
        let truncate = self.filter.exceeds_size_limit(candidate.size_bytes);

        let (files, skipped) = match self.loader.load(&candidate, truncate) {
            Loaded::Record(record) => (vec![record], Vec::new()),
            Loaded::Skipped(note) => (Vec::new(), vec![note]),
        };

        Ok(RepoSnapshot::new(
            parent.display().to_string(),
            read_git_metadata(parent),
            candidate.relative_path,
            files,
            skipped,
        ))
    }

    fn scan_directory(&self, root: &Path) -> RepoSnapshot {
        let candidates =
            FileWalker::new(root.to_path_buf()).use_gitignore(self.use_gitignore).walk();

        let mut stats = ScanStats { files_seen: candidates.len(), ..Default::default() };
        let mut files = Vec::new();
        let mut skipped = Vec::new();

        for candidate in &candidates {
            match self.filter.decide(&candidate.relative_path, candidate.size_bytes, candidate.modified)
            {
                Decision::Exclude(reason) => {
                    match reason {
                        ExclusionReason::TooOld => stats.files_excluded_recent += 1,
                        ExclusionReason::Excluded | ExclusionReason::NotIncluded => {
                            stats.files_excluded_pattern += 1
                        }
                    }
                    tracing::debug!(path = %candidate.relative_path, ?reason, "filtered out");
                }
                Decision::Keep { truncate } => {
                    stats.files_kept += 1;
                    if truncate {
                        stats.files_flagged_size += 1;
                    }
                    match self.loader.load(candidate, truncate) {
                        Loaded::Record(record) => files.push(record),
                        Loaded::Skipped(note) => skipped.push(note),
                    }
                }
            }
        }

        tracing::debug!(root = %root.display(), ?stats, "scan finished");

        let structure = render_tree(files.iter().map(|f| f.relative_path.as_str()), self.tree_style);
        RepoSnapshot::new(root.display().to_string(), read_git_metadata(root), structure, files, skipped)
    }
}
