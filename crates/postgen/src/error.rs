//! Error kinds surfaced by the post generation pipeline.
//!
//! Every failure is terminal for the request in flight. Nothing retries, and
//! no partial result is ever written to [`SessionState`](crate::session::SessionState).

/// Errors produced while validating input, generating, or exporting a post.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostError {
    /// The form input cannot be turned into a request (no keywords, too many
    /// keywords, length out of range, nothing to export).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A platform value outside the known set. Never silently defaulted.
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),
    /// Any failure from the remote inference call: network, auth, HTTP
    /// status, or a malformed response.
    #[error("generation failed: {0}")]
    Generation(String),
}

impl PostError {
    /// Whether the error was caused by user input rather than the remote
    /// service. Presenters show these as warnings.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            PostError::InvalidInput(_) | PostError::UnsupportedPlatform(_)
        )
    }
}
