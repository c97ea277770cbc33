//! Gemini-backed summarizer adapter.
//!
//! Calls the `generateContent` REST endpoint with a prompt asking for a
//! one-line, professional and actionable summary of the task description.

use async_trait::async_trait;
use minijinja::{Environment, context};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::task::ports::{Summarizer, SummarizerError, SummarizerResult};

/// Default Gemini model used for task summaries.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Default Gemini REST endpoint.
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

const SUMMARY_PROMPT_TEMPLATE: &str = "\
Analyze the following task description and write a one-line summary \
with a professional, actionable tone.

Description: \"{{ description }}\"

One-line summary:";

/// Gemini summarizer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiSummarizerConfig {
    /// API key. Without one every call fails with
    /// [`SummarizerError::NotConfigured`].
    pub api_key: Option<String>,
    /// Model name.
    pub model: String,
    /// Base endpoint URL.
    pub endpoint: String,
    /// Transport-level request timeout.
    pub request_timeout: Duration,
}

impl Default for GeminiSummarizerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_owned(),
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_owned(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Summarizer backed by the Gemini `generateContent` API.
#[derive(Debug, Clone)]
pub struct GeminiSummarizer {
    client: reqwest::Client,
    config: GeminiSummarizerConfig,
}

impl GeminiSummarizer {
    /// Creates a Gemini summarizer.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizerError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(config: GeminiSummarizerConfig) -> SummarizerResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(SummarizerError::transport)?;
        Ok(Self { client, config })
    }

    /// Returns `true` when an API key is available.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

/// Renders the summarization prompt for a task description.
///
/// # Errors
///
/// Returns [`SummarizerError::MalformedResponse`] if the template cannot be
/// rendered.
pub fn render_summary_prompt(description: &str) -> SummarizerResult<String> {
    let environment = Environment::new();
    environment
        .render_str(SUMMARY_PROMPT_TEMPLATE, context! { description })
        .map_err(|err| SummarizerError::MalformedResponse(format!("prompt rendering: {err}")))
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Extracts the first text part from a raw `generateContent` reply.
fn parse_reply(body: &str) -> SummarizerResult<String> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|err| SummarizerError::MalformedResponse(err.to_string()))?;

    if let Some(error) = parsed.error {
        return Err(SummarizerError::Upstream(error.message));
    }

    parsed
        .candidates
        .into_iter()
        .flatten()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .find_map(|part| part.text)
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| SummarizerError::MalformedResponse("no text in response".to_owned()))
}

#[async_trait]
impl Summarizer for GeminiSummarizer {
    async fn summarize(&self, text: &str) -> SummarizerResult<String> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            SummarizerError::NotConfigured("GEMINI_API_KEY is not set".to_owned())
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(api_key).map_err(SummarizerError::transport)?,
        );

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: render_summary_prompt(text)?,
                }],
            }],
        };

        let response = self
            .client
            .post(self.url())
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    SummarizerError::Timeout(self.config.request_timeout)
                } else {
                    SummarizerError::transport(err)
                }
            })?;

        let status = response.status();
        let raw = response.text().await.map_err(SummarizerError::transport)?;
        if !status.is_success() {
            return Err(SummarizerError::Upstream(format!("HTTP {status}: {raw}")));
        }

        parse_reply(&raw)
    }
}
