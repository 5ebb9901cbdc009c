//! Output rendering (Markdown, JSON, YAML)

use crate::domain::{OutputFormat, RepoSnapshot, Settings};
use crate::error::Result;
use chrono::{DateTime, Utc};

pub mod markdown;
pub mod structured;

pub use markdown::render_markdown;
pub use structured::{render_json, render_yaml};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Append an approximate token count.
    pub show_tokens: bool,
    /// Active recency window, shown in Markdown headings.
    pub recent_days: Option<u64>,
    /// Reference time for "modified N days ago".
    pub now: DateTime<Utc>,
}

impl RenderOptions {
    pub fn from_settings(settings: &Settings, now: DateTime<Utc>) -> Self {
        Self {
            format: settings.format,
            show_tokens: settings.show_tokens,
            recent_days: settings.recent_days,
            now,
        }
    }
}

/// Serialize a snapshot in the requested format.
pub fn render(snapshot: &RepoSnapshot, options: &RenderOptions) -> Result<String> {
    match options.format {
        OutputFormat::Markdown => Ok(render_markdown(snapshot, options)),
        OutputFormat::Json => render_json(snapshot, options.show_tokens),
        OutputFormat::Yaml => render_yaml(snapshot, options.show_tokens),
    }
}
