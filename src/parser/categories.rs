//! Normalization of the `categories` frontmatter value.
//!
//! Frontmatter is schema-less, so a document may declare its categories as a
//! single string, a list of strings, or a list mixing strings and
//! single-key mappings (`Linux: Security` or `Linux: [Security, Kernel]`).
//! Everything is converted to [`CategoryDeclaration`] here so the organizer
//! never has to look at raw YAML.

use crate::error::{Error, Result};
use crate::model::CategoryDeclaration;
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Frontmatter key holding category declarations.
pub const CATEGORIES_KEY: &str = "categories";

/// Read and normalize the categories declared in a frontmatter mapping.
///
/// A missing key yields no declarations. `path` is only used for error
/// context.
pub fn categories_from_frontmatter(
    frontmatter: &Mapping,
    path: &Path,
) -> Result<Vec<CategoryDeclaration>> {
    match frontmatter.get(CATEGORIES_KEY) {
        Some(value) => normalize_categories(value, path),
        None => Ok(Vec::new()),
    }
}

/// Normalize a decoded `categories` value.
pub fn normalize_categories(value: &Value, path: &Path) -> Result<Vec<CategoryDeclaration>> {
    let invalid = |reason: String| Error::InvalidCategories {
        path: path.to_path_buf(),
        reason,
    };

    match value {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => {
            let mut declarations = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Null => {}
                    Value::Mapping(mapping) => {
                        declarations.extend(nested_declarations(mapping).map_err(invalid)?)
                    }
                    other => {
                        let name = scalar_name(other).ok_or_else(|| {
                            invalid(format!("unsupported list entry {}", describe(other)))
                        })?;
                        declarations.push(CategoryDeclaration::simple(name));
                    }
                }
            }
            Ok(declarations)
        }
        // A bare mapping is read as a list of its keys; values are ignored.
        Value::Mapping(mapping) => mapping
            .keys()
            .map(|key| {
                scalar_name(key)
                    .map(CategoryDeclaration::simple)
                    .ok_or_else(|| invalid(format!("unsupported category key {}", describe(key))))
            })
            .collect(),
        other => scalar_name(other)
            .map(|name| vec![CategoryDeclaration::simple(name)])
            .ok_or_else(|| invalid(format!("unsupported value {}", describe(other)))),
    }
}

/// One declaration per `main: subcategories` entry.
fn nested_declarations(
    mapping: &Mapping,
) -> std::result::Result<Vec<CategoryDeclaration>, String> {
    let mut declarations = Vec::with_capacity(mapping.len());

    for (key, value) in mapping {
        let main = scalar_name(key)
            .ok_or_else(|| format!("unsupported category key {}", describe(key)))?;

        let declaration = match value {
            // `- Linux:` with nothing after the colon
            Value::Null => CategoryDeclaration::simple(main),
            Value::Sequence(subs) => {
                let subs = subs
                    .iter()
                    .map(|sub| {
                        scalar_name(sub).ok_or_else(|| {
                            format!("unsupported subcategory {} under {}", describe(sub), main)
                        })
                    })
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                CategoryDeclaration::nested_list(main, subs)
            }
            other => {
                let sub = scalar_name(other).ok_or_else(|| {
                    format!("unsupported subcategory {} under {}", describe(other), main)
                })?;
                CategoryDeclaration::nested(main, sub)
            }
        };
        declarations.push(declaration);
    }

    Ok(declarations)
}

/// Category name for a scalar YAML value.
fn scalar_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<Vec<CategoryDeclaration>> {
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        normalize_categories(&value, Path::new("test.md"))
    }

    #[test]
    fn test_single_string() {
        assert_eq!(
            parse("Networking").unwrap(),
            vec![CategoryDeclaration::simple("Networking")]
        );
    }

    #[test]
    fn test_list_of_strings() {
        assert_eq!(
            parse("[Linux, Tools]").unwrap(),
            vec![
                CategoryDeclaration::simple("Linux"),
                CategoryDeclaration::simple("Tools"),
            ]
        );
    }

    #[test]
    fn test_mixed_list() {
        let yaml = "- Tools\n- Linux: Security\n- Cloud:\n    - AWS\n    - GCP\n";
        assert_eq!(
            parse(yaml).unwrap(),
            vec![
                CategoryDeclaration::simple("Tools"),
                CategoryDeclaration::nested("Linux", "Security"),
                CategoryDeclaration::nested_list("Cloud", ["AWS", "GCP"]),
            ]
        );
    }

    #[test]
    fn test_top_level_mapping_uses_keys() {
        assert_eq!(
            parse("{Linux: Security, Cloud: [AWS]}").unwrap(),
            vec![
                CategoryDeclaration::simple("Linux"),
                CategoryDeclaration::simple("Cloud"),
            ]
        );
    }

    #[test]
    fn test_multi_key_mapping_entry() {
        let yaml = "- {Linux: Security, Cloud: AWS}\n";
        assert_eq!(
            parse(yaml).unwrap(),
            vec![
                CategoryDeclaration::nested("Linux", "Security"),
                CategoryDeclaration::nested("Cloud", "AWS"),
            ]
        );
    }

    #[test]
    fn test_null_subcategory_is_flat() {
        assert_eq!(
            parse("- Linux:\n").unwrap(),
            vec![CategoryDeclaration::simple("Linux")]
        );
    }

    #[test]
    fn test_scalars_become_names() {
        assert_eq!(
            parse("[2024, true]").unwrap(),
            vec![
                CategoryDeclaration::simple("2024"),
                CategoryDeclaration::simple("true"),
            ]
        );
    }

    #[test]
    fn test_null_and_missing() {
        assert!(parse("~").unwrap().is_empty());
        assert!(parse("[~, ~]").unwrap().is_empty());
        assert!(categories_from_frontmatter(&Mapping::new(), Path::new("x.md"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_nested_sequence_is_rejected() {
        let err = parse("[[Linux, Tools]]").unwrap_err();
        assert!(matches!(err, Error::InvalidCategories { .. }));
        assert!(err.to_string().contains("sequence"));
    }

    #[test]
    fn test_mapping_subcategory_is_rejected() {
        let err = parse("- Linux:\n    Security: Hardening\n").unwrap_err();
        assert!(err.to_string().contains("under Linux"));
    }
}
