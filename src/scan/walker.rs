//! Directory traversal with ignore-rule support

use crate::utils::relative_path;
use chrono::{DateTime, Utc};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Directory names that are never descended into.
const SKIPPED_DIRS: &[&str] = &[
    ".git",
    "__pycache__",
    "node_modules",
    ".venv",
    "venv",
    ".env",
    "env",
    "build",
    "dist",
    ".pytest_cache",
];

/// A file found by the walker, before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub relative_path: String,
    pub size_bytes: u64,
    pub modified: DateTime<Utc>,
}

impl Candidate {
    /// Build a candidate from filesystem metadata.
    pub fn from_metadata(path: PathBuf, relative_path: String, metadata: &std::fs::Metadata) -> Self {
        let modified = metadata.modified().unwrap_or(UNIX_EPOCH);
        Self { path, relative_path, size_bytes: metadata.len(), modified: DateTime::<Utc>::from(modified) }
    }
}

/// Walks a directory tree and yields files in deterministic order.
pub struct FileWalker {
    root_path: PathBuf,
    use_gitignore: bool,
}

impl FileWalker {
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path, use_gitignore: false }
    }

    /// Set whether `.gitignore`, `.ignore` and `.git/info/exclude` rules apply
    pub fn use_gitignore(mut self, enabled: bool) -> Self {
        self.use_gitignore = enabled;
        self
    }

    /// Collect all candidate files, sorted by relative path.
    ///
    /// Entries that cannot be read are logged and skipped.
    pub fn walk(&self) -> Vec<Candidate> {
        let mut builder = WalkBuilder::new(&self.root_path);
        builder
            .standard_filters(false)
            .git_ignore(self.use_gitignore)
            .git_exclude(self.use_gitignore)
            .ignore(self.use_gitignore)
            .parents(self.use_gitignore)
            .require_git(false)
            .follow_links(false)
            .hidden(false)
            .filter_entry(|entry| {
                if entry.depth() == 0 {
                    return true;
                }
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                !(is_dir && should_skip_dir(&entry.file_name().to_string_lossy()))
            });

        let mut candidates = Vec::new();
        for entry_result in builder.build() {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    tracing::warn!("skipping unreadable entry: {}", err);
                    continue;
                }
            };

            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }

            let path = entry.path();
            let Some(rel_path) = relative_path(&self.root_path, path) else {
                continue;
            };

            match entry.metadata() {
                Ok(metadata) => {
                    candidates.push(Candidate::from_metadata(path.to_path_buf(), rel_path, &metadata))
                }
                Err(err) => tracing::warn!("skipping {}: {}", rel_path, err),
            }
        }

        // Sort by relative path for deterministic ordering
        candidates.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        tracing::debug!(root = %self.root_path.display(), files = candidates.len(), "walk finished");
        candidates
    }
}

/// Whether a directory is pruned from the walk.
pub fn should_skip_dir(name: &str) -> bool {
    SKIPPED_DIRS.contains(&name) || name.ends_with(".egg-info")
}

/// Candidate for a single explicitly named file.
pub fn single_file_candidate(path: &Path) -> std::io::Result<Candidate> {
    let metadata = path.metadata()?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Candidate::from_metadata(path.to_path_buf(), name, &metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn rel_paths(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.relative_path.as_str()).collect()
    }

    #[test]
    fn test_walk_sorted_and_relative() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("src/nested")).unwrap();
        fs::write(root.join("src/nested/deep.rs"), "x").unwrap();
        fs::write(root.join("src/lib.rs"), "x").unwrap();
        fs::write(root.join("README.md"), "# hi").unwrap();

        let files = FileWalker::new(root.to_path_buf()).walk();
        assert_eq!(rel_paths(&files), ["README.md", "src/lib.rs", "src/nested/deep.rs"]);
        assert_eq!(files[0].size_bytes, 4);
    }

    #[test]
    fn test_noise_dirs_skipped() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();

        for noise_dir in ["node_modules", "__pycache__", ".venv", "venv", "dist", "pkg.egg-info"] {
            fs::create_dir_all(root.join(noise_dir)).unwrap();
            fs::write(root.join(noise_dir).join("file.py"), "# noise").unwrap();
        }
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join(".git/config"), "# git config").unwrap();
        fs::create_dir_all(root.join("src/build")).unwrap();
        fs::write(root.join("src/build/out.py"), "# nested noise").unwrap();

        fs::write(root.join("main.py"), "print('hello')").unwrap();

        let files = FileWalker::new(root.to_path_buf()).walk();
        assert_eq!(rel_paths(&files), ["main.py"]);
    }

    #[test]
    fn test_hidden_files_are_kept() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join(".github/workflows")).unwrap();
        fs::write(root.join(".github/workflows/ci.yml"), "on: push").unwrap();
        fs::write(root.join(".editorconfig"), "root = true").unwrap();

        let files = FileWalker::new(root.to_path_buf()).walk();
        assert_eq!(rel_paths(&files), [".editorconfig", ".github/workflows/ci.yml"]);
    }

    #[test]
    fn test_gitignore_is_opt_in() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join(".gitignore"), "*.log\nsecret/\n").unwrap();
        fs::write(root.join("app.log"), "noise").unwrap();
        fs::create_dir_all(root.join("secret")).unwrap();
        fs::write(root.join("secret/key.txt"), "k").unwrap();
        fs::write(root.join("main.rs"), "fn main() {}").unwrap();

        let all = FileWalker::new(root.to_path_buf()).walk();
        assert_eq!(rel_paths(&all), [".gitignore", "app.log", "main.rs", "secret/key.txt"]);

        let filtered = FileWalker::new(root.to_path_buf()).use_gitignore(true).walk();
        assert_eq!(rel_paths(&filtered), [".gitignore", "main.rs"]);
    }

    #[test]
    fn test_nested_gitignore_applies() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("pkg")).unwrap();
        fs::write(root.join("pkg/.gitignore"), "generated.rs\n").unwrap();
        fs::write(root.join("pkg/generated.rs"), "x").unwrap();
        fs::write(root.join("pkg/lib.rs"), "x").unwrap();

        let files = FileWalker::new(root.to_path_buf()).use_gitignore(true).walk();
        assert_eq!(rel_paths(&files), ["pkg/.gitignore", "pkg/lib.rs"]);
    }

    #[test]
    fn test_should_skip_dir() {
        assert!(should_skip_dir("node_modules"));
        assert!(should_skip_dir("share_my_repo.egg-info"));
        assert!(!should_skip_dir("src"));
        assert!(!should_skip_dir(".github"));
    }

    #[test]
    fn test_single_file_candidate_uses_file_name() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();

        let candidate = single_file_candidate(&path).unwrap();
        assert_eq!(candidate.relative_path, "notes.txt");
        assert_eq!(candidate.size_bytes, 5);
    }
}
