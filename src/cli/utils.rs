//! Shared CLI utilities.

/// Split a comma-separated pattern list, trimming whitespace and dropping
/// empty segments. Returns `None` when `value` is `None`.
pub fn parse_csv(value: Option<&str>) -> Option<Vec<String>> {
    value.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims() {
        assert_eq!(
            parse_csv(Some(" *.py, src/ ,,*.md")),
            Some(vec!["*.py".to_string(), "src/".to_string(), "*.md".to_string()])
        );
    }

    #[test]
    fn absent_stays_absent() {
        assert_eq!(parse_csv(None), None);
        assert_eq!(parse_csv(Some("")), Some(vec![]));
    }
}
