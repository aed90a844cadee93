//! Snippet records - the structured output returned by the model.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("expected a JSON array of groups")]
    NotAnArray,
    #[error("group {0} is missing a title or snippet list")]
    MalformedGroup(usize),
}

/// A single self-contained piece of code extracted from the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    /// Function, class or short title
    pub title: String,
    /// One-sentence explanation
    pub description: String,
    /// Language tag as reported by the model
    pub language: String,
    /// Complete code, including imports and comments
    pub code: String,
}

impl Snippet {
    /// Language tag normalised for syntax highlighting
    pub fn highlight_language(&self) -> String {
        self.language
            .to_lowercase()
            .replacen("typescript", "ts", 1)
            .replacen("javascript", "js", 1)
    }
}

/// Related snippets grouped by purpose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetGroup {
    pub group_title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub group_description: String,
    pub snippets: Vec<Snippet>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Validate and decode the model's JSON text into snippet groups.
///
/// The root must be an array whose every element carries a non-empty
/// `groupTitle` and a `snippets` array. Order is preserved.
pub fn parse_groups(text: &str) -> Result<Vec<SnippetGroup>, ShapeError> {
    let value: Value = serde_json::from_str(text)?;

    let groups = value.as_array().ok_or(ShapeError::NotAnArray)?;
    for (index, group) in groups.iter().enumerate() {
        let has_title = group
            .get("groupTitle")
            .and_then(Value::as_str)
            .is_some_and(|title| !title.is_empty());
        let has_snippets = group.get("snippets").is_some_and(Value::is_array);
        if !has_title || !has_snippets {
            return Err(ShapeError::MalformedGroup(index));
        }
    }

    Ok(serde_json::from_value(value)?)
}

/// 1-based `GROUP.SNIPPET` address of a snippet, e.g. `2.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnippetRef {
    pub group: usize,
    pub snippet: usize,
}

impl SnippetRef {
    /// Look up the referenced snippet
    pub fn resolve<'a>(&self, groups: &'a [SnippetGroup]) -> Option<&'a Snippet> {
        groups
            .get(self.group.checked_sub(1)?)?
            .snippets
            .get(self.snippet.checked_sub(1)?)
    }
}

impl std::str::FromStr for SnippetRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (group, snippet) = s
            .split_once('.')
            .ok_or_else(|| format!("expected GROUP.SNIPPET, got '{}'", s))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| format!("'{}' is not a positive index", part))
        };
        Ok(Self {
            group: parse(group)?,
            snippet: parse(snippet)?,
        })
    }
}

impl std::fmt::Display for SnippetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.group, self.snippet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"[
        {
            "groupTitle": "Utility Functions",
            "groupDescription": "Small helpers.",
            "snippets": [
                {"title": "add", "description": "Adds numbers.", "language": "TypeScript", "code": "const add = (a, b) => a + b;"}
            ]
        }
    ]"#;

    #[test]
    fn parses_valid_groups() {
        let groups = parse_groups(VALID).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group_title, "Utility Functions");
        assert_eq!(groups[0].snippets[0].title, "add");
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_groups("[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_non_array_root() {
        let err = parse_groups(r#"{"groupTitle": "x", "snippets": []}"#).unwrap_err();
        assert!(matches!(err, ShapeError::NotAnArray));
    }

    #[test]
    fn rejects_group_without_title() {
        let err = parse_groups(r#"[{"groupTitle": "", "snippets": []}]"#).unwrap_err();
        assert!(matches!(err, ShapeError::MalformedGroup(0)));
    }

    #[test]
    fn rejects_group_without_snippets() {
        let text = r#"[{"groupTitle": "A", "snippets": []}, {"groupTitle": "B"}]"#;
        assert!(matches!(
            parse_groups(text).unwrap_err(),
            ShapeError::MalformedGroup(1)
        ));
    }

    #[test]
    fn missing_group_description_defaults_to_empty() {
        let groups = parse_groups(r#"[{"groupTitle": "A", "snippets": []}]"#).unwrap();
        assert_eq!(groups[0].group_description, "");
    }

    #[test]
    fn null_group_description_becomes_empty() {
        let text = r#"[{"groupTitle": "A", "groupDescription": null, "snippets": []}]"#;
        let groups = parse_groups(text).unwrap();
        assert_eq!(groups[0].group_title, "A");
        assert_eq!(groups[0].group_description, "");
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            parse_groups("not json").unwrap_err(),
            ShapeError::InvalidJson(_)
        ));
    }

    #[test]
    fn highlight_language_is_normalised() {
        let mut snippet = parse_groups(VALID).unwrap().remove(0).snippets.remove(0);
        assert_eq!(snippet.highlight_language(), "ts");
        snippet.language = "JavaScript".into();
        assert_eq!(snippet.highlight_language(), "js");
        snippet.language = "Python".into();
        assert_eq!(snippet.highlight_language(), "python");
    }

    #[test]
    fn snippet_ref_parses_and_resolves() {
        let groups = parse_groups(VALID).unwrap();
        let r: SnippetRef = "1.1".parse().unwrap();
        assert_eq!(r.resolve(&groups).unwrap().title, "add");
        assert!("1.2".parse::<SnippetRef>().unwrap().resolve(&groups).is_none());
        assert!("0.1".parse::<SnippetRef>().is_err());
        assert!("3".parse::<SnippetRef>().is_err());
    }
}
