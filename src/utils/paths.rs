//! Path normalization

use std::path::Path;

pub fn normalize_path(path: &str) -> String {
    // Convert backslashes to forward slashes and normalize
    path.replace('\\', "/")
}

/// Path of `path` relative to `root`, with forward slashes.
///
/// Returns `None` when `path` is not under `root`.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let rel = normalize_path(&rel.to_string_lossy());
    if rel.is_empty() {
        None
    } else {
        Some(rel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_backslashes() {
        assert_eq!(normalize_path(r"src\cli\mod.rs"), "src/cli/mod.rs");
    }

    #[test]
    fn relative_path_under_root() {
        let root = Path::new("/project");
        assert_eq!(
            relative_path(root, Path::new("/project/src/main.py")),
            Some("src/main.py".to_string())
        );
        assert_eq!(relative_path(root, Path::new("/tmp/outside.txt")), None);
        assert_eq!(relative_path(root, root), None);
    }
}
