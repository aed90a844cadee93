//! LLM agent module for structured snippet extraction.
//!
//! Talks to the Gemini `generateContent` endpoint with a fixed response schema
//! and validates the shape of the JSON that comes back.

pub use crate::snippet::SnippetGroup;

use crate::config::{Config, ConfigError};
use crate::prompt;
use crate::snippet::{self, ShapeError};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use thiserror::Error;

/// User-Agent string sent with API requests
const USER_AGENT: &str = concat!("snipx/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("malformed API response: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error("response contained no candidates")]
    EmptyResponse,
    #[error("failed to parse response: {0}")]
    ParseError(#[from] ShapeError),
    #[error("configuration error: {0}")]
    ConfigError(#[from] ConfigError),
}

/// A generative model that answers a prompt with JSON text shaped by `schema`.
pub trait Model {
    fn generate(
        &self,
        prompt: &str,
        schema: &Value,
    ) -> impl Future<Output = Result<String, AgentError>> + Send;
}

/// Gemini REST client
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
}

impl GeminiClient {
    /// Build a client from configuration; fails early when no API key is set
    pub fn from_config(config: &Config) -> Result<Self, AgentError> {
        let api_key = config.api_key()?.to_string();
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            endpoint: config.agent.endpoint.trim_end_matches('/').to_string(),
            model: config.agent.model.clone(),
            api_key,
            temperature: config.agent.temperature,
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl Model for GeminiClient {
    async fn generate(&self, prompt: &str, schema: &Value) -> Result<String, AgentError> {
        let body = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
                temperature: self.temperature,
            },
        };

        tracing::info!(model = %self.model, "requesting snippet extraction");
        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        decode(status, &text)
    }
}

/// Turn a `generateContent` reply into the model's text.
///
/// Non-2xx statuses surface the API's `error.message`, falling back to the raw body.
/// Text of every part of the first candidate is concatenated.
fn decode(status: StatusCode, body: &str) -> Result<String, AgentError> {
    if !status.is_success() {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .map(|body| body.error.message)
            .unwrap_or_else(|_| body.to_string());
        return Err(AgentError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let parsed: GenerateResponse = serde_json::from_str(body)?;
    let content = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .ok_or(AgentError::EmptyResponse)?;

    Ok(content.parts.into_iter().map(|part| part.text).collect())
}

/// Run the extraction agent on the provided source code
pub async fn analyze<M: Model>(model: &M, code: &str) -> Result<Vec<SnippetGroup>, AgentError> {
    let prompt = prompt::build(code);
    let schema = prompt::response_schema();

    let result = async {
        let text = model.generate(&prompt, &schema).await?;
        tracing::debug!(bytes = text.len(), "received model response");

        // Clean the response (strip markdown code blocks if present)
        let cleaned = strip_markdown_json(&text);
        Ok::<_, AgentError>(snippet::parse_groups(cleaned)?)
    }
    .await;

    match &result {
        Ok(groups) => tracing::info!(groups = groups.len(), "extraction finished"),
        Err(e) => tracing::error!(error = %e, "error calling Gemini API"),
    }
    result
}

/// Strip markdown code block wrappers from JSON response
fn strip_markdown_json(text: &str) -> &str {
    let trimmed = text.trim();

    // Remove ```json ... ``` or ``` ... ```
    if let Some(rest) = trimmed.strip_prefix("```") {
        let without_prefix = rest.strip_prefix("json").unwrap_or(rest);
        if let Some(end_idx) = without_prefix.rfind("```") {
            return without_prefix[..end_idx].trim();
        }
    }

    trimmed
}
