//! Markdown export of extracted snippets.

use crate::snippet::SnippetGroup;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("nothing to export")]
    Empty,
    #[error("refusing to overwrite existing file: {0}")]
    Exists(String),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Render all groups as a single Markdown document.
///
/// Returns `None` when there are no groups.
pub fn to_markdown(groups: &[SnippetGroup]) -> Option<String> {
    if groups.is_empty() {
        return None;
    }

    let mut out = String::from("# Extracted Code Snippets\n\n");
    for group in groups {
        out.push_str(&format!(
            "## {}\n\n{}\n\n",
            group.group_title, group.group_description
        ));
        for snippet in &group.snippets {
            out.push_str(&format!(
                "### {}\n\n*{}*\n\n```{}\n{}\n```\n\n",
                snippet.title,
                snippet.description,
                snippet.language.to_lowercase(),
                snippet.code
            ));
        }
        out.push_str("---\n\n");
    }

    Some(out.trim().to_string())
}

/// Write the Markdown export to `path`
pub fn save(path: &Path, groups: &[SnippetGroup], overwrite: bool) -> Result<(), ExportError> {
    let markdown = to_markdown(groups).ok_or(ExportError::Empty)?;
    if path.exists() && !overwrite {
        return Err(ExportError::Exists(path.display().to_string()));
    }
    std::fs::write(path, markdown)?;
    tracing::info!(path = %path.display(), "saved markdown export");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snippet::Snippet;

    fn sample() -> Vec<SnippetGroup> {
        vec![SnippetGroup {
            group_title: "Helpers".into(),
            group_description: "Small helpers.".into(),
            snippets: vec![Snippet {
                title: "add".into(),
                description: "Adds two numbers.".into(),
                language: "Python".into(),
                code: "def add(a, b):\n    return a + b".into(),
            }],
        }]
    }

    #[test]
    fn renders_expected_document() {
        let expected = "# Extracted Code Snippets\n\n\
## Helpers\n\n\
Small helpers.\n\n\
### add\n\n\
*Adds two numbers.*\n\n\
```python\n\
def add(a, b):\n    return a + b\n\
```\n\n\
---";
        assert_eq!(to_markdown(&sample()).unwrap(), expected);
    }

    #[test]
    fn separator_follows_every_group() {
        let mut groups = sample();
        groups.push(SnippetGroup {
            group_title: "Models".into(),
            group_description: "Data types.".into(),
            snippets: Vec::new(),
        });
        let md = to_markdown(&groups).unwrap();
        assert_eq!(md.matches("\n---").count(), 2);
        assert!(md.ends_with("## Models\n\nData types.\n\n---"));
    }

    #[test]
    fn nothing_to_export() {
        assert!(to_markdown(&[]).is_none());
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            save(&dir.path().join("out.md"), &[], false),
            Err(ExportError::Empty)
        ));
    }
}
