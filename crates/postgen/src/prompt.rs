//! Prompt construction for post generation.
//!
//! Turns the form inputs (keywords, platform, length budget) into the single
//! user message sent to the model. Everything here is pure: the same inputs
//! always produce the same prompt, byte for byte.
//!
//! The length budget deliberately does not appear in the prompt text. It
//! bounds the request through `max_tokens` instead (see
//! [`generate_post`](crate::session::generate_post)).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PostError;

/// Maximum number of keywords accepted from the form.
pub const MAX_KEYWORDS: usize = 4;

/// Smallest accepted length budget, in tokens.
pub const MIN_LENGTH: u32 = 150;
/// Largest accepted length budget, in tokens.
pub const MAX_LENGTH: u32 = 500;
/// Length budget used when the user does not pick one.
pub const DEFAULT_LENGTH: u32 = 350;

// ── Platform ───────────────────────────────────────────────────────

/// Target social network. Determines the tone of the post.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Platform {
    #[default]
    LinkedIn,
    Facebook,
}

impl Platform {
    /// All selectable platforms, in display order.
    pub const ALL: [Platform; 2] = [Platform::LinkedIn, Platform::Facebook];

    /// Display name, also used in prompts and export file names.
    pub fn name(self) -> &'static str {
        match self {
            Platform::LinkedIn => "LinkedIn",
            Platform::Facebook => "Facebook",
        }
    }

    /// Tone instruction for this platform.
    pub fn tone(self) -> &'static str {
        match self {
            Platform::LinkedIn => "professional",
            Platform::Facebook => "friendly and engaging",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = PostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linkedin" => Ok(Platform::LinkedIn),
            "facebook" => Ok(Platform::Facebook),
            _ => Err(PostError::UnsupportedPlatform(s.to_string())),
        }
    }
}

// ── Keywords ───────────────────────────────────────────────────────

/// Ordered set of 1 to [`MAX_KEYWORDS`] non-empty keywords.
///
/// Blank entries are dropped on construction. Duplicates are kept; they only
/// repeat a word in the prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Result<Self, PostError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();

        if keywords.is_empty() {
            return Err(PostError::InvalidInput("please enter keywords".into()));
        }
        if keywords.len() > MAX_KEYWORDS {
            return Err(PostError::InvalidInput(format!(
                "at most {MAX_KEYWORDS} keywords allowed, got {}",
                keywords.len()
            )));
        }
        Ok(Self(keywords))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; construction rejects empty sets.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ── Length budget ──────────────────────────────────────────────────

/// Maximum output tokens for one generation, within
/// [`MIN_LENGTH`]..=[`MAX_LENGTH`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct LengthBudget(u32);

impl LengthBudget {
    pub fn new(tokens: u32) -> Result<Self, PostError> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&tokens) {
            return Err(PostError::InvalidInput(format!(
                "length must be between {MIN_LENGTH} and {MAX_LENGTH} tokens, got {tokens}"
            )));
        }
        Ok(Self(tokens))
    }

    pub fn tokens(self) -> u32 {
        self.0
    }
}

impl Default for LengthBudget {
    fn default() -> Self {
        Self(DEFAULT_LENGTH)
    }
}

// ── Builder ────────────────────────────────────────────────────────

/// Build the generation prompt.
///
/// Fails with [`PostError::InvalidInput`] when `keywords` is empty. The
/// budget is accepted for symmetry with the request but is not written into
/// the text; the model is bounded by `max_tokens` alone.
pub fn build_prompt<S: AsRef<str>>(
    keywords: &[S],
    platform: Platform,
    _budget: LengthBudget,
) -> Result<String, PostError> {
    if keywords.is_empty() {
        return Err(PostError::InvalidInput("please enter keywords".into()));
    }

    let joined = keywords
        .iter()
        .map(|k| k.as_ref())
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!(
        "
Generate a {platform} post from the keywords:
{joined}

Constraints:
- Tone: {tone}
- Fluent, optimized text
- Markdown format
- Structured text (paragraphs, lists if useful)
- Light emojis if relevant
- Add 3 to 5 hashtags
",
        tone = platform.tone(),
    ))
}
