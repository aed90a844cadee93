//! # snipx
//!
//! Turns a source file into titled, grouped, self-contained code snippets using an LLM.
//!
//! ## Features
//!
//! - **Structured Output**: Gemini is called with a fixed JSON response schema and the
//!   returned array of `SnippetGroup`s is validated before use
//! - **Markdown Export**: all snippets in one document, ready to drop into notes
//! - **Snippet Browser**: a ratatui view with clipboard copy

pub mod agent;
pub mod clipboard;
pub mod config;
pub mod export;
pub mod input;
pub mod logging;
pub mod prompt;
pub mod render;
pub mod session;
pub mod snippet;
pub mod ui;

pub use agent::{GeminiClient, Model};
pub use config::Config;
pub use session::{Session, View};
pub use snippet::{Snippet, SnippetGroup, SnippetRef};
