//! Include/exclude, size and recency filtering

use crate::error::{Result, ShareError};
use chrono::{DateTime, TimeDelta, Utc};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Outcome of filtering a single candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Keep the file; `truncate` is set when it exceeds the size limit.
    Keep { truncate: bool },
    Exclude(ExclusionReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionReason {
    /// Matched an exclude pattern.
    Excluded,
    /// Include patterns were given and none matched.
    NotIncluded,
    /// Modified before the recency window.
    TooOld,
}

/// Compiled set of user patterns.
///
/// A pattern matches when it matches the file name or the whole relative
/// path. A pattern ending in `/` names a directory and matches any file below
/// a directory of that name.
#[derive(Debug, Clone)]
struct PatternSet {
    globs: GlobSet,
    dir_names: Vec<String>,
}

impl PatternSet {
    fn new(patterns: &[String]) -> Result<Option<Self>> {
        let mut builder = GlobSetBuilder::new();
        let mut dir_names = Vec::new();
        let mut count = 0usize;

        for raw in patterns {
            let pattern = raw.trim();
            let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
            if pattern.is_empty() {
                continue;
            }
            count += 1;

            if let Some(dir) = pattern.strip_suffix('/') {
                dir_names.push(dir.to_lowercase());
                continue;
            }

            let glob = GlobBuilder::new(pattern)
                .case_insensitive(true)
                .literal_separator(false)
                .build()
                .map_err(|source| ShareError::Pattern { pattern: raw.clone(), source })?;
            builder.add(glob);
        }

        if count == 0 {
            return Ok(None);
        }

        let globs = builder
            .build()
            .map_err(|source| ShareError::Pattern { pattern: patterns.join(","), source })?;
        Ok(Some(Self { globs, dir_names }))
    }

    fn is_match(&self, relative_path: &str) -> bool {
        let file_name = relative_path.rsplit('/').next().unwrap_or(relative_path);
        if self.globs.is_match(file_name) || self.globs.is_match(relative_path) {
            return true;
        }

        if self.dir_names.is_empty() {
            return false;
        }
        let mut components: Vec<&str> = relative_path.split('/').collect();
        components.pop();
        components.iter().any(|component| {
            let component = component.to_lowercase();
            self.dir_names.iter().any(|dir| *dir == component)
        })
    }
}

/// Pure keep/drop predicate over candidate files.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    include: Option<PatternSet>,
    exclude: Option<PatternSet>,
    max_file_size: u64,
    recent_cutoff: Option<DateTime<Utc>>,
}

impl FilterEngine {
    /// Compile the patterns. Invalid glob syntax is an error.
    ///
    /// `recent_days` is measured back from `now`.
    pub fn new(
        include: &[String],
        exclude: &[String],
        max_file_size: u64,
        recent_days: Option<u64>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let recent_cutoff = recent_days.and_then(|days| {
            let days = i64::try_from(days).ok()?;
            now.checked_sub_signed(TimeDelta::try_days(days)?)
        });

        Ok(Self {
            include: PatternSet::new(include)?,
            exclude: PatternSet::new(exclude)?,
            max_file_size,
            recent_cutoff,
        })
    }

    /// True when a file of `size_bytes` must be cut at the size limit.
    pub fn exceeds_size_limit(&self, size_bytes: u64) -> bool {
        size_bytes > self.max_file_size
    }

    /// Decide whether a file is kept.
    ///
    /// Exclude patterns win over include patterns. The size limit never drops
    /// a file; it only flags it for truncation.
    pub fn decide(&self, relative_path: &str, size_bytes: u64, modified: DateTime<Utc>) -> Decision {
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(relative_path) {
                return Decision::Exclude(ExclusionReason::Excluded);
            }
        }

        if let Some(include) = &self.include {
            if !include.is_match(relative_path) {
                return Decision::Exclude(ExclusionReason::NotIncluded);
            }
        }

        if let Some(cutoff) = self.recent_cutoff {
            if modified < cutoff {
                return Decision::Exclude(ExclusionReason::TooOld);
            }
        }

        Decision::Keep { truncate: self.exceeds_size_limit(size_bytes) }
    }
}
