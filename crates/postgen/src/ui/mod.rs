//! Form input and the single-action driver shared by every frontend.
//!
//! ```text
//! Presenter::render_input ──▶ FormInput ──into_request──▶ PostRequest
//!        │                                                   │
//!        │                        Presenter::on_generating ◀─┤
//!        │                          SessionState::generate ◀─┘
//!        ▼
//! Presenter::render_editor(session post) ──▶ edited text ──▶ export
//! ```
//!
//! Edited text is handed back to the caller for export. It never replaces the
//! generated post held by [`SessionState`].

mod traits;

pub use traits::Presenter;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::PostError;
use crate::generation::Generator;
use crate::prompt::{DEFAULT_LENGTH, KeywordSet, LengthBudget, Platform};
use crate::session::{PostRequest, SessionState};

/// Keywords pre-filled in a fresh form.
pub const DEFAULT_KEYWORDS: [&str; 3] = ["IA", "innovation", "productivité"];

// ── Form input ────────────────────────────────────────────────────────

/// Raw values from a form, before validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default = "default_length")]
    pub length: u32,
}

fn default_platform() -> String {
    Platform::default().name().to_string()
}

fn default_length() -> u32 {
    DEFAULT_LENGTH
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            platform: default_platform(),
            length: default_length(),
        }
    }
}

impl FormInput {
    /// Validate into a [`PostRequest`].
    ///
    /// Keywords are checked first so an empty form always reports the
    /// "enter keywords" warning.
    pub fn into_request(self) -> Result<PostRequest, PostError> {
        let keywords = KeywordSet::new(&self.keywords)?;
        let platform: Platform = self.platform.parse()?;
        let length = LengthBudget::new(self.length)?;
        Ok(PostRequest::new(keywords, platform, length))
    }
}

// ── Driver ────────────────────────────────────────────────────────────

/// Result of one completed user action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    pub platform: Platform,
    /// Text left in the editor; what gets exported.
    pub edited: String,
}

/// Run one user action end to end.
///
/// Any error aborts the turn before the editor is shown, and the session
/// keeps its previous post.
pub async fn run_turn<P, G>(
    presenter: &mut P,
    session: &mut SessionState,
    generator: &G,
    temperature: f32,
) -> Result<TurnOutcome, PostError>
where
    P: Presenter + ?Sized,
    G: Generator + ?Sized,
{
    let request = match presenter.render_input().into_request() {
        Ok(r) => r,
        Err(e) => {
            warn!("rejected form input: {e}");
            return Err(e);
        }
    };

    presenter.on_generating(&request);
    session.generate(generator, &request, temperature).await?;
    let edited = presenter.render_editor(session.get());

    Ok(TurnOutcome {
        platform: request.platform,
        edited,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::GenerateFuture;

    struct Scripted {
        input: FormInput,
        edit_suffix: &'static str,
        editor_shown: bool,
        generating: Vec<Platform>,
    }

    impl Presenter for Scripted {
        fn render_input(&mut self) -> FormInput {
            self.input.clone()
        }

        fn render_editor(&mut self, text: &str) -> String {
            self.editor_shown = true;
            format!("{text}{}", self.edit_suffix)
        }

        fn on_generating(&mut self, request: &PostRequest) {
            self.generating.push(request.platform);
        }
    }

    struct Fixed(&'static str);

    impl Generator for Fixed {
        fn generate(&self, _prompt: &str, _max: u32, _temp: f32) -> GenerateFuture<'_> {
            let out = self.0.to_string();
            Box::pin(async move { Ok(out) })
        }
    }

    fn scripted(input: FormInput) -> Scripted {
        Scripted {
            input,
            edit_suffix: " (edited)",
            editor_shown: false,
            generating: Vec::new(),
        }
    }

    #[test]
    fn default_form_is_valid() {
        let request = FormInput::default().into_request().unwrap();
        assert_eq!(request.platform, Platform::LinkedIn);
        assert_eq!(request.length.tokens(), 350);
        assert_eq!(request.keywords.len(), 3);
    }

    #[test]
    fn form_deserializes_with_defaults() {
        let input: FormInput = serde_json::from_str(r#"{"keywords":["IA"]}"#).unwrap();
        assert_eq!(input.platform, "LinkedIn");
        assert_eq!(input.length, 350);
    }

    #[test]
    fn empty_keywords_reported_before_platform() {
        let input = FormInput {
            keywords: vec![],
            platform: "Myspace".into(),
            length: 350,
        };
        assert!(matches!(
            input.into_request(),
            Err(PostError::InvalidInput(_))
        ));
    }

    #[test]
    fn unsupported_platform_rejected() {
        let input = FormInput {
            platform: "Myspace".into(),
            ..Default::default()
        };
        assert_eq!(
            input.into_request().unwrap_err(),
            PostError::UnsupportedPlatform("Myspace".into())
        );
    }

    #[tokio::test]
    async fn turn_generates_then_edits() {
        let mut presenter = scripted(FormInput {
            platform: "Facebook".into(),
            ..Default::default()
        });
        let mut session = SessionState::new();

        let outcome = run_turn(&mut presenter, &mut session, &Fixed("Hello #IA"), 0.7)
            .await
            .unwrap();

        assert_eq!(presenter.generating, vec![Platform::Facebook]);
        assert_eq!(outcome.platform, Platform::Facebook);
        assert_eq!(outcome.edited, "Hello #IA (edited)");
        assert_eq!(session.get(), "Hello #IA", "edits must not overwrite the session");
    }

    #[tokio::test]
    async fn invalid_turn_skips_generation_and_editor() {
        let mut presenter = scripted(FormInput {
            keywords: vec![],
            ..Default::default()
        });
        let mut session = SessionState::new();
        session.set("previous");

        let err = run_turn(&mut presenter, &mut session, &Fixed("new"), 0.7)
            .await
            .unwrap_err();

        assert!(err.is_user_error());
        assert!(presenter.generating.is_empty(), "no loading state for invalid input");
        assert!(!presenter.editor_shown);
        assert_eq!(session.get(), "previous");
    }
}
