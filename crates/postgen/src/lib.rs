//! Keyword-driven social media post generator.
//!
//! `postgen` turns a handful of keywords, a target platform (LinkedIn or
//! Facebook) and a length budget into a short Markdown marketing post, using a
//! hosted chat-completion endpoint (the Hugging Face inference router by
//! default). The result lives in an explicit per-session
//! [`SessionState`](session::SessionState) and can be edited and exported as a
//! plain-text file.
//!
//! # Getting started
//!
//! ```ignore
//! use postgen::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), PostError> {
//!     let config = AppConfig::from_env();
//!     let client = config.build_client()?;
//!
//!     let request = PostRequest::new(
//!         KeywordSet::new(["IA", "innovation", "productivité"])?,
//!         Platform::LinkedIn,
//!         LengthBudget::default(),
//!     );
//!
//!     let mut session = SessionState::new();
//!     session.generate(&client, &request, config.temperature).await?;
//!     println!("{}", session.get());
//!     Ok(())
//! }
//! ```
//!
//! # Where to find things
//!
//! - **Prompt text:** [`prompt::build_prompt`], plus the validated input types
//!   [`Platform`](prompt::Platform), [`KeywordSet`](prompt::KeywordSet) and
//!   [`LengthBudget`](prompt::LengthBudget).
//! - **Calling the model:** the [`Generator`](generation::Generator) trait,
//!   implemented by [`InferenceClient`]. Swap in a stub for tests.
//! - **Session state and the pipeline:** [`session`].
//! - **Download file:** [`export`].
//! - **Driving it from a UI:** the [`Presenter`](ui::Presenter) trait and
//!   [`run_turn`](ui::run_turn).
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`prompt`] | Platform, keyword and length types; prompt template |
//! | [`generation`] | `Generator` seam over the chat-completion call |
//! | [`session`] | Per-session generated post and the generation pipeline |
//! | [`export`] | Plain-text export named after the platform |
//! | [`config`] | Process-wide settings read once at startup |
//! | [`ui`] | Presentation capability trait and single-action driver |

pub mod config;
pub mod error;
pub mod export;
pub mod generation;
pub mod prelude;
pub mod prompt;
pub mod session;
pub mod ui;

pub use error::PostError;

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, trace};

// ── Constants ──────────────────────────────────────────────────────

/// OpenAI-compatible chat completions endpoint of the Hugging Face router.
pub const HF_ROUTER_URL: &str = "https://router.huggingface.co/v1/chat/completions";

/// Model used for every generation.
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.1-8B-Instruct:novita";

/// Sampling temperature for post generation.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "HF_TOKEN";

// ── Request types ──────────────────────────────────────────────────

/// Chat completion request body.
#[derive(Serialize, Debug, Default)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
}

// ── Message types ──────────────────────────────────────────────────

/// Role of a message in the conversation. A post is a single user turn.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
}

/// A message in the conversation.
#[derive(Serialize, Clone, Debug)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

// ── Response types ─────────────────────────────────────────────────

/// Raw API response (internal deserialization target).
#[derive(Deserialize, Debug)]
struct RawChatResponse {
    choices: Option<Vec<RawChoice>>,
    error: Option<ApiErrorResponse>,
    #[serde(default)]
    usage: Option<RawUsage>,
}

#[derive(Deserialize, Debug)]
struct RawChoice {
    message: RawResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawResponseMessage {
    content: Option<String>,
}

/// Providers disagree on the error shape: some send `{"error": "text"}`,
/// others `{"error": {"message": "text"}}`.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum ApiErrorResponse {
    Text(String),
    Object { message: String },
}

impl ApiErrorResponse {
    fn message(&self) -> &str {
        match self {
            ApiErrorResponse::Text(m) | ApiErrorResponse::Object { message: m } => m,
        }
    }
}

/// Token usage statistics. Only logged.
#[derive(Deserialize, Debug)]
struct RawUsage {
    prompt_tokens: Option<u32>,
    completion_tokens: Option<u32>,
    total_tokens: Option<u32>,
}

/// Clean return type from [`InferenceClient::chat()`].
#[derive(Debug)]
pub struct ChatCompletion {
    /// First choice's message content, if the provider sent one.
    pub content: Option<String>,
}

/// Turn an HTTP status and body into a [`ChatCompletion`].
///
/// Non-2xx statuses, unparsable bodies and API error objects all become
/// [`PostError::Generation`]. A response with no choices yields an empty
/// completion; callers decide whether missing content is an error.
pub fn parse_chat_response(
    status: reqwest::StatusCode,
    text: &str,
) -> Result<ChatCompletion, PostError> {
    if !status.is_success() {
        return Err(PostError::Generation(format!(
            "inference API HTTP {status}: {text}"
        )));
    }

    let parsed: RawChatResponse = serde_json::from_str(text)
        .map_err(|e| PostError::Generation(format!("failed to parse response: {e}")))?;

    if let Some(err) = parsed.error {
        return Err(PostError::Generation(format!(
            "inference API error: {}",
            err.message()
        )));
    }

    if let Some(ref usage) = parsed.usage {
        debug!(
            "Token usage: prompt={}, completion={}, total={}",
            usage.prompt_tokens.unwrap_or(0),
            usage.completion_tokens.unwrap_or(0),
            usage.total_tokens.unwrap_or(0),
        );
    }

    match parsed.choices.and_then(|c| c.into_iter().next()) {
        Some(c) => {
            debug!(
                "LLM output: {} chars, finish_reason={}",
                c.message.content.as_ref().map_or(0, |s| s.len()),
                c.finish_reason.as_deref().unwrap_or("(none)"),
            );
            Ok(ChatCompletion {
                content: c.message.content,
            })
        }
        None => {
            debug!("LLM output: empty (no choices)");
            Ok(ChatCompletion { content: None })
        }
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// Async HTTP client for an OpenAI-compatible chat completions endpoint.
///
/// No timeout is configured beyond reqwest's defaults, and nothing is
/// retried.
pub struct InferenceClient {
    pub(crate) client: reqwest::Client,
    pub(crate) api_token: Option<String>,
    pub(crate) endpoint: String,
    pub(crate) model: String,
}

impl InferenceClient {
    /// Create a client for the Hugging Face router with the default model.
    pub fn new(api_token: Option<String>) -> Result<Self, PostError> {
        Self::with_endpoint(api_token, HF_ROUTER_URL, DEFAULT_MODEL)
    }

    /// Create a client for a custom endpoint and model.
    pub fn with_endpoint(
        api_token: Option<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, PostError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("postgen/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PostError::Generation(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_token,
            endpoint: endpoint.into(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a chat completion request.
    pub async fn chat(&self, body: &ChatRequest) -> Result<ChatCompletion, PostError> {
        debug!(
            "LLM request: model={}, messages={}, max_tokens={}, temp={}",
            body.model,
            body.messages.len(),
            body.max_tokens,
            body.temperature,
        );
        trace!(
            "Request payload size: {} bytes",
            serde_json::to_string(body).map_or(0, |s| s.len())
        );

        let start = Instant::now();

        let mut req = self.client.post(&self.endpoint).json(body);
        if let Some(token) = &self.api_token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| PostError::Generation(format!("request failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| PostError::Generation(format!("failed to read response: {e}")))?;

        debug!(
            "LLM response: HTTP {} in {:.1}s ({} bytes)",
            status,
            start.elapsed().as_secs_f64(),
            text.len()
        );

        parse_chat_response(status, &text)
    }
}
