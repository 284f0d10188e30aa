//! Display title lookup.

/// Title used when a document has no level-1 heading.
pub const UNTITLED: &str = "Untitled";

/// Return the text of the first `# ` heading, or [`UNTITLED`].
///
/// Headings inside fenced code blocks are not treated specially.
pub fn extract_title(body: &str) -> String {
    body.trim()
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .unwrap_or_else(|| UNTITLED.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_heading_wins() {
        let body = "intro\n# First\n## Sub\n# Second\n";
        assert_eq!(extract_title(body), "First");
    }

    #[test]
    fn test_title_is_trimmed() {
        assert_eq!(extract_title("#   Padded Title   \r\n"), "Padded Title");
    }

    #[test]
    fn test_lower_levels_do_not_count() {
        assert_eq!(extract_title("## Only a subheading\n### deeper"), UNTITLED);
    }

    #[test]
    fn test_hash_without_space_is_not_a_heading() {
        assert_eq!(extract_title("#hashtag\n"), UNTITLED);
    }

    #[test]
    fn test_leading_blank_lines() {
        assert_eq!(extract_title("\n\n   # Indented first line"), "Indented first line");
    }

    #[test]
    fn test_code_blocks_are_not_excluded() {
        let body = "```sh\n# comment in code\n```\n# Real\n";
        assert_eq!(extract_title(body), "comment in code");
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(extract_title(""), UNTITLED);
    }
}
