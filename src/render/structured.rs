//! JSON and YAML rendering

use crate::domain::{FileRecord, GitMetadata, RepoSnapshot, SkippedFile, SnapshotStats};
use crate::error::Result;
use crate::utils::estimate_tokens;
use serde::Serialize;

/// Serialized layout shared by the JSON and YAML outputs.
#[derive(Serialize)]
struct Document<'a> {
    location: &'a str,
    git_info: Option<&'a GitMetadata>,
    structure: &'a str,
    files: &'a [FileRecord],
    #[serde(skip_serializing_if = "no_skipped_files")]
    skipped: &'a [SkippedFile],
    summary: &'a SnapshotStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    token_estimate: Option<usize>,
}

fn no_skipped_files(skipped: &&[SkippedFile]) -> bool {
    skipped.is_empty()
}

impl<'a> Document<'a> {
    fn new(snapshot: &'a RepoSnapshot, show_tokens: bool) -> Self {
        let token_estimate = show_tokens.then(|| {
            let contents: String = snapshot.files.iter().map(|f| f.content.as_str()).collect();
            estimate_tokens(&contents)
        });

        Self {
            location: &snapshot.location,
            git_info: snapshot.git.as_ref(),
            structure: &snapshot.structure,
            files: &snapshot.files,
            skipped: &snapshot.skipped,
            summary: &snapshot.stats,
            token_estimate,
        }
    }
}

pub fn render_json(snapshot: &RepoSnapshot, show_tokens: bool) -> Result<String> {
    Ok(serde_json::to_string_pretty(&Document::new(snapshot, show_tokens))?)
}

pub fn render_yaml(snapshot: &RepoSnapshot, show_tokens: bool) -> Result<String> {
    Ok(serde_yaml::to_string(&Document::new(snapshot, show_tokens))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::record;
    use crate::domain::Truncation;
    use serde_json::{json, Value};

    fn snapshot() -> RepoSnapshot {
        let mut big = record("src/big.rs", "x".repeat(40).as_str());
        big.truncated = Truncation::Size;
        RepoSnapshot::new(
            "/repo".into(),
            Some(GitMetadata {
                commit: "abc123".into(),
                branch: "main".into(),
                author: "Me <me@example.com>".into(),
                date: "Thu Nov 13 10:00:00 2025 +0000".into(),
            }),
            "├── README.md\n└── src/\n    └── big.rs".into(),
            vec![record("README.md", "# Demo\n"), big],
            vec![],
        )
    }

    #[test]
    fn json_has_expected_shape() {
        let out = render_json(&snapshot(), false).unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(v["location"], json!("/repo"));
        assert_eq!(v["git_info"]["branch"], json!("main"));
        assert_eq!(v["files"][0]["relative_path"], json!("README.md"));
        assert_eq!(v["files"][1]["truncated"], json!("size"));
        assert_eq!(v["files"][0]["truncated"], json!("none"));
        assert_eq!(v["summary"]["total_files"], json!(2));
        assert!(v.get("token_estimate").is_none());
        assert!(v.get("skipped").is_none());
    }

    #[test]
    fn json_token_estimate_counts_file_contents() {
        let out = render_json(&snapshot(), true).unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();
        // "# Demo\n" (7) + 40 chars = 47 chars
        assert_eq!(v["token_estimate"], json!(11));
    }

    #[test]
    fn json_without_git_is_null() {
        let mut snap = snapshot();
        snap.git = None;
        let v: Value = serde_json::from_str(&render_json(&snap, false).unwrap()).unwrap();
        assert!(v["git_info"].is_null());
    }

    #[test]
    fn yaml_round_trips_key_fields() {
        let mut snap = snapshot();
        snap.skipped.push(SkippedFile { relative_path: "locked.txt".into(), reason: "denied".into() });
        let out = render_yaml(&snap, true).unwrap();
        let v: serde_yaml::Value = serde_yaml::from_str(&out).unwrap();

        assert_eq!(v["location"].as_str(), Some("/repo"));
        assert_eq!(v["files"][1]["relative_path"].as_str(), Some("src/big.rs"));
        assert_eq!(v["skipped"][0]["reason"].as_str(), Some("denied"));
        assert_eq!(v["token_estimate"].as_u64(), Some(11));
    }
}
