//! Reading source code from a file, stdin or the user's editor.

use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File extensions the upload path is meant for
pub const ACCEPTED_EXTENSIONS: &[&str] = &[
    "js", "ts", "tsx", "jsx", "py", "java", "go", "rs", "html", "css", "json", "md",
];

const EDITOR_TEMPLATE: &str = "";

#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    File {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to read stdin: {0}")]
    Stdin(std::io::Error),
    #[error("editor failed: {0}")]
    Editor(std::io::Error),
}

/// Where the code to analyze comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Stdin,
    Editor,
}

impl Source {
    /// Pick a source: an explicit file, piped stdin, or the editor
    pub fn detect(file: Option<PathBuf>) -> Self {
        match file {
            Some(path) if path.as_os_str() == "-" => Source::Stdin,
            Some(path) => Source::File(path),
            None if atty::isnt(atty::Stream::Stdin) => Source::Stdin,
            None => Source::Editor,
        }
    }

    pub fn read(&self) -> Result<String, InputError> {
        match self {
            Source::File(path) => read_file(path),
            Source::Stdin => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(InputError::Stdin)?;
                Ok(buf)
            }
            Source::Editor => edit::edit(EDITOR_TEMPLATE).map_err(InputError::Editor),
        }
    }
}

/// Whether the file has one of the accepted source extensions
pub fn is_accepted(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Read an uploaded file as text
pub fn read_file(path: &Path) -> Result<String, InputError> {
    if !is_accepted(path) {
        tracing::warn!(path = %path.display(), "file type is not a recognised source extension");
    }
    std::fs::read_to_string(path).map_err(|source| InputError::File {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_extensions() {
        assert!(is_accepted(Path::new("src/main.rs")));
        assert!(is_accepted(Path::new("App.TSX")));
        assert!(!is_accepted(Path::new("photo.png")));
        assert!(!is_accepted(Path::new("Makefile")));
    }

    #[test]
    fn dash_means_stdin() {
        assert_eq!(Source::detect(Some(PathBuf::from("-"))), Source::Stdin);
        assert_eq!(
            Source::detect(Some(PathBuf::from("a.py"))),
            Source::File(PathBuf::from("a.py"))
        );
    }

    #[test]
    fn reads_uploaded_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("util.py");
        std::fs::write(&path, "print('hi')\n").unwrap();
        assert_eq!(Source::File(path).read().unwrap(), "print('hi')\n");
    }

    #[test]
    fn missing_file_is_reported() {
        let err = read_file(Path::new("/definitely/not/here.rs")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.rs"));
    }
}
