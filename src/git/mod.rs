//! HEAD commit metadata via libgit2

use crate::domain::GitMetadata;
use chrono::{FixedOffset, TimeZone};
use git2::Repository;
use std::path::Path;

/// Same layout as git's default `log` date format.
const GIT_DATE_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

/// Read commit, branch, author and date of HEAD for the repository that
/// contains `path`.
///
/// Returns `None` when `path` is not inside a repository or HEAD has no
/// commit yet.
pub fn read_git_metadata(path: &Path) -> Option<GitMetadata> {
    let repo = match Repository::discover(path) {
        Ok(repo) => repo,
        Err(err) => {
            tracing::debug!("no git repository at {}: {}", path.display(), err.message());
            return None;
        }
    };

    let head = match repo.head() {
        Ok(head) => head,
        Err(err) => {
            tracing::debug!("unreadable HEAD in {}: {}", path.display(), err.message());
            return None;
        }
    };
    let commit = head.peel_to_commit().ok()?;

    let branch = if repo.head_detached().unwrap_or(false) {
        "HEAD".to_string()
    } else {
        head.shorthand().unwrap_or("HEAD").to_string()
    };

    let signature = commit.author();
    let author = format!(
        "{} <{}>",
        signature.name().unwrap_or("Unknown"),
        signature.email().unwrap_or("")
    );

    let time = commit.time();
    let date = FixedOffset::east_opt(time.offset_minutes() * 60)
        .and_then(|offset| offset.timestamp_opt(time.seconds(), 0).single())
        .map(|dt| dt.format(GIT_DATE_FORMAT).to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    Some(GitMetadata { commit: commit.id().to_string(), branch, author, date })
}
