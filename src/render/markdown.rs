//! Markdown context document

use super::RenderOptions;
use crate::domain::{FileRecord, RepoSnapshot, Truncation};
use crate::utils::{estimate_tokens, fence_language};

const SIZE_TRUNCATION_NOTE: &str = "[... File truncated due to size limit ...]";

pub fn render_markdown(snapshot: &RepoSnapshot, options: &RenderOptions) -> String {
    let mut out = String::new();

    out.push_str("# Repository Context\n\n");

    out.push_str("## File System Location\n\n");
    out.push_str(&format!("{}\n\n", snapshot.location));

    out.push_str("## Git Info\n\n");
    match &snapshot.git {
        Some(git) => {
            out.push_str(&format!("- Commit: {}\n", git.commit));
            out.push_str(&format!("- Branch: {}\n", git.branch));
            out.push_str(&format!("- Author: {}\n", git.author));
            out.push_str(&format!("- Date: {}\n\n", git.date));
        }
        None => out.push_str("- Not a git repository\n\n"),
    }

    out.push_str("## Structure\n\n");
    let structure =
        if snapshot.structure.is_empty() { "No files found" } else { snapshot.structure.as_str() };
    let fence = fence_for(structure);
    out.push_str(&format!("{fence}\n{structure}\n{fence}\n\n"));

    if !snapshot.files.is_empty() {
        match options.recent_days {
            Some(days) => out.push_str(&format!("## Recent Changes (Last {} Days)\n\n", days)),
            None => out.push_str("## File Contents\n\n"),
        }
        for file in &snapshot.files {
            write_file_section(&mut out, file, options);
        }
    }

    if !snapshot.skipped.is_empty() {
        out.push_str("## Skipped Files\n\n");
        for note in &snapshot.skipped {
            out.push_str(&format!("- {}: {}\n", note.relative_path, note.reason));
        }
        out.push('\n');
    }

    out.push_str("## Summary\n\n");
    out.push_str(&format!("- Total files: {}\n", snapshot.stats.total_files));
    out.push_str(&format!("- Total lines: {}", snapshot.stats.total_lines));

    if options.show_tokens {
        // Estimated over the document rendered so far
        let tokens = estimate_tokens(&out);
        out.push_str(&format!("\n- Estimated tokens: {}", tokens));
    }

    out
}

fn write_file_section(out: &mut String, file: &FileRecord, options: &RenderOptions) {
    match options.recent_days {
        Some(_) => {
            let days_ago = (options.now - file.modified).num_days().max(0);
            out.push_str(&format!(
                "### File: {} (modified {} days ago)\n\n",
                file.relative_path, days_ago
            ));
        }
        None => out.push_str(&format!("### File: {}\n\n", file.relative_path)),
    }

    if file.is_binary {
        out.push_str(&format!("_Binary file ({} bytes), content omitted._\n\n", file.size_bytes));
        return;
    }

    let fence = fence_for(&file.content);
    out.push_str(&format!("{}{}\n", fence, fence_language(&file.relative_path)));
    out.push_str(&file.content);
    if !file.content.ends_with('\n') {
        out.push('\n');
    }
    if file.truncated == Truncation::Size {
        out.push_str(SIZE_TRUNCATION_NOTE);
        out.push('\n');
    }
    out.push_str(&format!("{}\n\n", fence));
}

/// A backtick fence longer than any backtick run inside `content`.
fn fence_for(content: &str) -> String {
    let mut longest = 0usize;
    let mut run = 0usize;
    for ch in content.chars() {
        if ch == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}
