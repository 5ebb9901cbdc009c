//! Config file discovery and parsing

use crate::domain::{OutputFormat, DEFAULT_RECENT_DAYS};
use crate::error::{Result, ShareError};
use globset::Glob;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Table name under which settings may be nested.
const SECTION: &str = "share-my-repo";

/// Name patterns searched in the working directory, in priority order.
const DISCOVERY_PATTERNS: &[&str] = &[".share-my-repo*.toml", ".*config.toml"];

/// Values read from a TOML config file. Unset keys stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    pub source: PathBuf,
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

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PatternList {
    Csv(String),
    List(Vec<String>),
}

impl PatternList {
    fn into_patterns(self) -> Vec<String> {
        let parts: Vec<String> = match self {
            PatternList::Csv(s) => s.split(',').map(str::to_string).collect(),
            PatternList::List(items) => items,
        };
        parts.into_iter().map(|p| p.trim().to_string()).filter(|p| !p.is_empty()).collect()
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    output: Option<String>,
    include: Option<PatternList>,
    exclude: Option<PatternList>,
    use_gitignore: Option<bool>,
    max_file_size: Option<toml::Value>,
    format: Option<String>,
    output_format: Option<String>,
    tokens: Option<bool>,
    recent: Option<toml::Value>,
    line_numbers: Option<bool>,
    preview: Option<toml::Value>,
    ascii_tree: Option<bool>,
}

/// Load the config file, either the explicit one or one discovered in `cwd`.
///
/// Returns `Ok(None)` when no file is found. A file that exists but cannot be
/// parsed is always an error.
pub fn load_config(cwd: &Path, explicit: Option<&Path>) -> Result<Option<FileConfig>> {
    let path = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(ShareError::PathNotFound(path.to_path_buf()));
            }
            path.to_path_buf()
        }
        None => match discover_config(cwd) {
            Some(path) => path,
            None => return Ok(None),
        },
    };

    let content = fs::read_to_string(&path).map_err(|e| ShareError::io(&path, e))?;
    let config = parse_config(&content, &path)?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(Some(config))
}

/// Parse TOML config text, accepting keys at top level or under `[share-my-repo]`.
pub fn parse_config(content: &str, path: &Path) -> Result<FileConfig> {
    let config_err = |source| ShareError::Config { path: path.to_path_buf(), source };

    let raw: toml::Value = toml::from_str(content).map_err(config_err)?;
    let section = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };
    let raw: RawConfig = section.try_into().map_err(config_err)?;

    let format = match raw.format.or(raw.output_format) {
        Some(value) => match OutputFormat::parse(&value) {
            Some(format) => Some(format),
            None => {
                tracing::warn!(
                    "unknown format '{}' in {}; using default",
                    value,
                    path.display()
                );
                None
            }
        },
        None => None,
    };

    Ok(FileConfig {
        source: path.to_path_buf(),
        output: raw.output.filter(|s| !s.trim().is_empty()).map(PathBuf::from),
        include: raw.include.map(PatternList::into_patterns),
        exclude: raw.exclude.map(PatternList::into_patterns),
        use_gitignore: raw.use_gitignore,
        max_file_size: raw.max_file_size.and_then(|v| lenient_uint("max_file_size", &v, path)),
        format,
        tokens: raw.tokens,
        recent_days: raw.recent.and_then(|v| recent_days(&v, path)),
        line_numbers: raw.line_numbers,
        preview: raw
            .preview
            .and_then(|v| lenient_uint("preview", &v, path))
            .map(|n| n as usize),
        ascii_tree: raw.ascii_tree,
    })
}

/// Read a non-negative integer, accepting integer strings. Anything else is
/// ignored with a warning.
fn lenient_uint(key: &str, value: &toml::Value, path: &Path) -> Option<u64> {
    let parsed = match value {
        toml::Value::Integer(n) => u64::try_from(*n).ok(),
        toml::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    if parsed.is_none() {
        tracing::warn!(
            "'{}' in {} is not a non-negative integer; ignoring",
            key,
            path.display()
        );
    }
    parsed
}

fn recent_days(value: &toml::Value, path: &Path) -> Option<u64> {
    match value {
        toml::Value::Boolean(true) => Some(DEFAULT_RECENT_DAYS),
        toml::Value::Boolean(false) => None,
        other => lenient_uint("recent", other, path),
    }
}

fn discover_config(cwd: &Path) -> Option<PathBuf> {
    let mut names: Vec<String> = fs::read_dir(cwd)
        .ok()?
        .filter_map(|entry| {
            let entry = entry.ok()?;
            if !entry.file_type().ok()?.is_file() {
                return None;
            }
            entry.file_name().to_str().map(str::to_string)
        })
        .collect();
    names.sort();

    for pattern in DISCOVERY_PATTERNS {
        let Ok(glob) = Glob::new(pattern) else {
            continue;
        };
        let matcher = glob.compile_matcher();
        if let Some(name) = names.iter().find(|name| matcher.is_match(name.as_str())) {
            return Some(cwd.join(name));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_no_config_returns_none() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("Cargo.toml"), "[package]\n").expect("write");
        assert!(load_config(tmp.path(), None).expect("load").is_none());
    }

    #[test]
    fn test_discovers_dotfile_config() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join(".share-my-repo.toml"),
            "format = 'json'\ntokens = true\ninclude = '*.rs, *.toml'\n",
        )
        .expect("write");

        let cfg = load_config(tmp.path(), None).expect("load").expect("found");
        assert_eq!(cfg.format, Some(OutputFormat::Json));
        assert_eq!(cfg.tokens, Some(true));
        assert_eq!(cfg.include, Some(vec!["*.rs".to_string(), "*.toml".to_string()]));
        assert!(cfg.source.ends_with(".share-my-repo.toml"));
    }

    #[test]
    fn test_share_my_repo_pattern_wins_over_generic_config() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join(".a-config.toml"), "preview = 1\n").expect("write");
        fs::write(tmp.path().join(".share-my-repo.local.toml"), "preview = 2\n").expect("write");

        let cfg = load_config(tmp.path(), None).expect("load").expect("found");
        assert_eq!(cfg.preview, Some(2));
    }

    #[test]
    fn test_generic_dot_config_is_discovered() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join(".myconfig.toml"), "line_numbers = true\n").expect("write");

        let cfg = load_config(tmp.path(), None).expect("load").expect("found");
        assert_eq!(cfg.line_numbers, Some(true));
    }

    #[test]
    fn test_nested_section_is_used() {
        let cfg = parse_config(
            "[share-my-repo]\nexclude = ['target/', '*.lock']\nmax_file_size = 2048\n",
            Path::new("cfg.toml"),
        )
        .expect("parse");
        assert_eq!(cfg.exclude, Some(vec!["target/".to_string(), "*.lock".to_string()]));
        assert_eq!(cfg.max_file_size, Some(2048));
    }

    #[test]
    fn test_malformed_toml_is_fatal() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join(".share-my-repo.toml"), "format = [unclosed\n").expect("write");

        let err = load_config(tmp.path(), None).unwrap_err();
        assert!(matches!(err, ShareError::Config { .. }));
        assert!(err.to_string().contains(".share-my-repo.toml"));
    }

    #[test]
    fn test_wrong_type_for_bool_is_fatal() {
        let err = parse_config("tokens = 'yes'\n", Path::new("cfg.toml")).unwrap_err();
        assert!(matches!(err, ShareError::Config { .. }));
    }

    #[test]
    fn test_non_integer_sizes_are_ignored() {
        let cfg = parse_config("max_file_size = 'big'\npreview = -3\n", Path::new("cfg.toml"))
            .expect("parse");
        assert_eq!(cfg.max_file_size, None);
        assert_eq!(cfg.preview, None);
    }

    #[test]
    fn test_integer_strings_are_accepted() {
        let cfg = parse_config("max_file_size = '4096'\n", Path::new("cfg.toml")).expect("parse");
        assert_eq!(cfg.max_file_size, Some(4096));
    }

    #[test]
    fn test_unknown_format_is_ignored() {
        let cfg = parse_config("format = 'xml'\n", Path::new("cfg.toml")).expect("parse");
        assert_eq!(cfg.format, None);
    }

    #[test]
    fn test_output_format_alias() {
        let cfg = parse_config("output_format = 'yaml'\n", Path::new("cfg.toml")).expect("parse");
        assert_eq!(cfg.format, Some(OutputFormat::Yaml));
    }

    #[test]
    fn test_recent_accepts_bool_or_days() {
        let on = parse_config("recent = true\n", Path::new("c.toml")).expect("parse");
        assert_eq!(on.recent_days, Some(DEFAULT_RECENT_DAYS));
        let off = parse_config("recent = false\n", Path::new("c.toml")).expect("parse");
        assert_eq!(off.recent_days, None);
        let days = parse_config("recent = 30\n", Path::new("c.toml")).expect("parse");
        assert_eq!(days.recent_days, Some(30));
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let tmp = TempDir::new().expect("tmp");
        let missing = tmp.path().join("nope.toml");
        let err = load_config(tmp.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, ShareError::PathNotFound(_)));
    }
}
