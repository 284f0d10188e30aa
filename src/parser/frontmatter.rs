//! YAML frontmatter splitting.

use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::sync::OnceLock;

const BOM: char = '\u{feff}';

fn frontmatter_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)")
            .expect("frontmatter pattern is valid")
    })
}

/// Split a document into its frontmatter mapping and the remaining body.
///
/// The block must open on the very first line with `---` and close with
/// another `---` line. When there is no such block, or its content is not
/// valid YAML, the mapping is empty and the body is the full input.
///
/// ```
/// use mdtoc::parser::extract_frontmatter;
///
/// let (meta, body) = extract_frontmatter("---\ncategories: Linux\n---\n# Kernel\n");
/// assert_eq!(meta.get("categories").and_then(|v| v.as_str()), Some("Linux"));
/// assert_eq!(body, "# Kernel\n");
/// ```
pub fn extract_frontmatter(content: &str) -> (Mapping, &str) {
    let text = content.strip_prefix(BOM).unwrap_or(content);

    let Some(captures) = frontmatter_regex().captures(text) else {
        return (Mapping::new(), content);
    };
    let block = captures.get(1).map_or("", |m| m.as_str());
    let body_start = captures.get(0).map_or(0, |m| m.end());

    match serde_yaml::from_str::<Value>(block) {
        Ok(Value::Mapping(mapping)) => (mapping, &text[body_start..]),
        Ok(Value::Null) => (Mapping::new(), &text[body_start..]),
        Ok(other) => {
            log::debug!("ignoring non-mapping frontmatter: {:?}", other);
            (Mapping::new(), &text[body_start..])
        }
        Err(e) => {
            log::debug!("frontmatter is not valid YAML: {}", e);
            (Mapping::new(), content)
        }
    }
}
