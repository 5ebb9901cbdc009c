//! File content loading: binary detection, decoding, truncation and preview

use super::walker::Candidate;
use crate::domain::{FileRecord, SkippedFile, Truncation};
use crate::utils::encoding::DEFAULT_SAMPLE_SIZE;
use crate::utils::{decode_text, is_binary_sample};
use std::fs::File;
use std::io::{self, Read};

/// Extensions treated as binary without reading the file.
const BINARY_EXTENSIONS: &[&str] = &[
    // images
    "jpg", "jpeg", "png", "gif", "bmp", "svg", "ico", "webp",
    // documents
    "pdf", "doc", "docx", "xls", "xlsx",
    // executables and libraries
    "exe", "dll", "so", "dylib",
    // archives
    "zip", "tar", "gz", "rar", "7z",
    // media
    "mp3", "mp4", "avi", "mov",
    // compiled artifacts
    "pyc", "pyo", "class", "egg",
];

/// Result of loading one candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded {
    Record(FileRecord),
    Skipped(SkippedFile),
}

/// Reads candidate files into [`FileRecord`]s.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    max_file_size: u64,
    line_numbers: bool,
    preview: Option<usize>,
}

impl ContentLoader {
    pub fn new(max_file_size: u64) -> Self {
        Self { max_file_size, line_numbers: false, preview: None }
    }

    /// Prefix every line with its 1-based number
    pub fn line_numbers(mut self, enabled: bool) -> Self {
        self.line_numbers = enabled;
        self
    }

    /// Keep only the first `lines` lines of each file
    pub fn preview(mut self, lines: Option<usize>) -> Self {
        self.preview = lines;
        self
    }

    /// Load a candidate. I/O failures produce a [`Loaded::Skipped`] note.
    ///
    /// `truncate` is the filter's size decision. Only then is the read
    /// bounded to the size limit.
    pub fn load(&self, candidate: &Candidate, truncate: bool) -> Loaded {
        match self.try_load(candidate, truncate) {
            Ok(record) => Loaded::Record(record),
            Err(err) => {
                tracing::warn!("skipping {}: {}", candidate.relative_path, err);
                Loaded::Skipped(SkippedFile {
                    relative_path: candidate.relative_path.clone(),
                    reason: err.to_string(),
                })
            }
        }
    }

    fn try_load(&self, candidate: &Candidate, truncate: bool) -> io::Result<FileRecord> {
        let binary_record = || FileRecord {
            relative_path: candidate.relative_path.clone(),
            absolute_path: candidate.path.clone(),
            size_bytes: candidate.size_bytes,
            modified: candidate.modified,
            is_binary: true,
            lines: 0,
            truncated: Truncation::None,
            content: String::new(),
        };

        if has_binary_extension(&candidate.relative_path) {
            return Ok(binary_record());
        }

        let mut bytes = Vec::new();
        let mut file = File::open(&candidate.path)?;
        if truncate {
            // One byte past the limit confirms the file is still oversized.
            let limit = self.max_file_size.saturating_add(1).max(DEFAULT_SAMPLE_SIZE as u64);
            file.by_ref().take(limit).read_to_end(&mut bytes)?;
        } else {
            file.read_to_end(&mut bytes)?;
        }

        if is_binary_sample(&bytes) {
            return Ok(binary_record());
        }

        let cut = truncate && bytes.len() as u64 > self.max_file_size;
        if cut {
            bytes.truncate(self.max_file_size as usize);
        }

        let (text, encoding) = decode_text(&bytes, cut);
        if encoding != "utf-8" {
            tracing::debug!("decoded {} as {}", candidate.relative_path, encoding);
        }

        let shaped = shape_text(text, cut, self.line_numbers, self.preview);
        Ok(FileRecord {
            relative_path: candidate.relative_path.clone(),
            absolute_path: candidate.path.clone(),
            size_bytes: candidate.size_bytes,
            modified: candidate.modified,
            is_binary: false,
            lines: shaped.lines,
            truncated: shaped.truncated,
            content: shaped.content,
        })
    }
}

/// Text after line numbering and preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedText {
    pub content: String,
    pub lines: usize,
    pub truncated: Truncation,
}

/// Apply line numbers and preview to already size-bounded text.
///
/// `lines` counts the size-bounded text, before preview. Preview takes
/// precedence over size truncation when it drops lines.
pub fn shape_text(
    text: String,
    size_truncated: bool,
    line_numbers: bool,
    preview: Option<usize>,
) -> ShapedText {
    let mut content = if line_numbers && !text.is_empty() {
        text.lines()
            .enumerate()
            .map(|(idx, line)| format!("{}: {}", idx + 1, line))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        text
    };

    let lines = content.lines().count();
    let mut truncated = if size_truncated { Truncation::Size } else { Truncation::None };

    if let Some(keep) = preview {
        if lines > keep {
            let mut kept = content.lines().take(keep).collect::<Vec<_>>().join("\n");
            kept.push_str(&format!("\n[... Preview truncated after {keep} lines ...]"));
            content = kept;
            truncated = Truncation::Preview;
        }
    }

    ShapedText { content, lines, truncated }
}

fn has_binary_extension(relative_path: &str) -> bool {
    let name = relative_path.rsplit('/').next().unwrap_or(relative_path);
    match name.rsplit_once('.') {
        Some((_, ext)) => BINARY_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => false,
    }
}
