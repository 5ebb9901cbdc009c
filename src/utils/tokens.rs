//! Token estimation

/// Average number of characters per token assumed by the estimate.
pub const CHARS_PER_TOKEN: usize = 4;

/// Estimate tokens using a simple heuristic (chars / 4).
///
/// Counts Unicode code points, not bytes: byte length over-counts for
/// multi-byte UTF-8 content (e.g. CJK text, emoji). The result is approximate
/// and only meant for sizing a prompt.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / CHARS_PER_TOKEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(estimate_tokens("abcdefgh"), 2);
        assert_eq!(estimate_tokens("🚀🚀🚀🚀"), 1);
        assert_eq!(estimate_tokens("abc"), 0);
    }
}
