//! Serializable projection of [`SessionState`] for the REST API.
//!
//! Besides the post itself, the snapshot carries the form's limits so the
//! page never hard-codes them.

use postgen::prompt::{DEFAULT_LENGTH, MAX_KEYWORDS, MAX_LENGTH, MIN_LENGTH, Platform};
use postgen::session::{PostPhase, SessionState};
use postgen::ui::DEFAULT_KEYWORDS;
use serde::Serialize;

use crate::preview::render_preview;

/// Slider bounds for the length budget.
#[derive(Debug, Serialize)]
pub struct LengthBounds {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

/// Serializable view of the session returned by `GET /api/state`.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    // ── Session ──
    pub post: String,
    /// `post` rendered from Markdown for the preview pane.
    pub preview_html: String,
    pub phase: PostPhase,
    pub has_content: bool,
    /// `true` while a generation request is in flight.
    pub generating: bool,

    // ── Form limits ──
    pub platforms: Vec<&'static str>,
    pub length: LengthBounds,
    pub max_keywords: usize,
    pub default_keywords: Vec<&'static str>,
}

impl SessionSnapshot {
    /// Build a snapshot. Call while holding the session lock.
    pub fn capture(state: &SessionState, generating: bool) -> Self {
        Self {
            post: state.get().to_string(),
            preview_html: render_preview(state.get()),
            phase: state.phase(),
            has_content: state.has_content(),
            generating,
            platforms: Platform::ALL.iter().map(|p| p.name()).collect(),
            length: LengthBounds {
                min: MIN_LENGTH,
                max: MAX_LENGTH,
                default: DEFAULT_LENGTH,
            },
            max_keywords: MAX_KEYWORDS,
            default_keywords: DEFAULT_KEYWORDS.to_vec(),
        }
    }
}
