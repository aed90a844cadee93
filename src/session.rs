//! Transient state for a single analysis: input text, loading flag, error and result.

use crate::agent::{self, Model};
use crate::snippet::SnippetGroup;

/// Shown when analysis is requested with blank input
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter some code to analyze.";

/// The single message shown for every adapter failure
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to analyze code. The model may be unable to parse this input or there might be an API issue. Please try again.";

#[derive(Debug, Default)]
pub struct Session {
    pub code: String,
    pub groups: Option<Vec<SnippetGroup>>,
    pub loading: bool,
    pub error: Option<String>,
}

/// What the display should show for the current state
#[derive(Debug, PartialEq, Eq)]
pub enum View<'a> {
    Loading,
    Failed(&'a str),
    Idle { has_code: bool },
    Empty,
    Results(&'a [SnippetGroup]),
}

impl View<'_> {
    /// Whether the process should report failure for this outcome
    pub fn is_failure(&self) -> bool {
        matches!(self, View::Failed(_))
    }
}

impl Session {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn has_code(&self) -> bool {
        !self.code.trim().is_empty()
    }

    /// Run one analysis round trip and record its outcome
    pub async fn analyze<M: Model>(&mut self, model: &M) {
        if !self.has_code() {
            self.error = Some(EMPTY_INPUT_MESSAGE.to_string());
            return;
        }

        self.loading = true;
        self.error = None;
        self.groups = None;

        match agent::analyze(model, &self.code).await {
            Ok(groups) => self.groups = Some(groups),
            Err(_) => self.error = Some(ANALYSIS_FAILED_MESSAGE.to_string()),
        }

        self.loading = false;
    }

    pub fn view(&self) -> View<'_> {
        if self.loading {
            return View::Loading;
        }
        if let Some(error) = &self.error {
            return View::Failed(error);
        }
        match &self.groups {
            None => View::Idle {
                has_code: self.has_code(),
            },
            Some(groups) if groups.is_empty() => View::Empty,
            Some(groups) => View::Results(groups),
        }
    }
}
