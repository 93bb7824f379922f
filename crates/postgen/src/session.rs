//! Per-session generated post and the generation pipeline.
//!
//! A [`SessionState`] is constructed once per interactive session and passed
//! by reference to whatever presents it. It holds exactly one value, the most
//! recently generated post, and changes only when a generation succeeds.
//!
//! ```text
//! Empty ──successful generate──▶ HasContent ──successful generate──▶ HasContent
//!   ▲                               │
//!   └── failed generate (no-op)     └── failed generate (no-op)
//! ```

use serde::Serialize;
use tracing::{info, warn};

use crate::error::PostError;
use crate::generation::Generator;
use crate::prompt::{KeywordSet, LengthBudget, Platform, build_prompt};

// ── Request ────────────────────────────────────────────────────────

/// A validated generation request assembled from form input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostRequest {
    pub keywords: KeywordSet,
    pub platform: Platform,
    pub length: LengthBudget,
}

impl PostRequest {
    pub fn new(keywords: KeywordSet, platform: Platform, length: LengthBudget) -> Self {
        Self {
            keywords,
            platform,
            length,
        }
    }

    /// The prompt for this request. Rebuilt on every call, never stored.
    pub fn prompt(&self) -> Result<String, PostError> {
        build_prompt(self.keywords.as_slice(), self.platform, self.length)
    }
}

/// Build the prompt for `request` and run it through `generator`.
///
/// The length budget becomes the request's maximum output tokens. Blank
/// output counts as a failed generation.
pub async fn generate_post<G: Generator + ?Sized>(
    generator: &G,
    request: &PostRequest,
    temperature: f32,
) -> Result<String, PostError> {
    let prompt = request.prompt()?;
    info!(
        platform = %request.platform,
        keywords = request.keywords.len(),
        max_tokens = request.length.tokens(),
        "generating post"
    );

    match generator
        .generate(&prompt, request.length.tokens(), temperature)
        .await
    {
        Ok(text) if text.trim().is_empty() => {
            warn!("generator returned a blank post");
            Err(PostError::Generation("generated post is empty".into()))
        }
        Ok(text) => {
            info!(chars = text.len(), "post generated");
            Ok(text)
        }
        Err(e) => {
            warn!("post generation failed: {e}");
            Err(e)
        }
    }
}

// ── State ──────────────────────────────────────────────────────────

/// Observable phase of a session.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PostPhase {
    /// Nothing generated yet.
    Empty,
    /// At least one generation succeeded.
    HasContent,
}

/// The generated post for one session. Empty string means "no content yet".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    post: String,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &str {
        &self.post
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.post = text.into();
    }

    pub fn has_content(&self) -> bool {
        !self.post.is_empty()
    }

    pub fn phase(&self) -> PostPhase {
        if self.has_content() {
            PostPhase::HasContent
        } else {
            PostPhase::Empty
        }
    }

    /// Run the pipeline and store the result on success.
    ///
    /// On any error the current post is left exactly as it was.
    pub async fn generate<G: Generator + ?Sized>(
        &mut self,
        generator: &G,
        request: &PostRequest,
        temperature: f32,
    ) -> Result<&str, PostError> {
        let text = generate_post(generator, request, temperature).await?;
        self.set(text);
        Ok(self.get())
    }
}
