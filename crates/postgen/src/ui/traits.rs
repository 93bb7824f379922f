//! Presentation capability the core depends on.
//!
//! Any frontend (terminal, web form, test script) implements [`Presenter`].
//! The core never touches a UI toolkit directly.

use super::FormInput;
use crate::session::PostRequest;

/// What the pipeline needs from a user interface.
///
/// Both render methods are infallible: a frontend that cannot show its
/// editor hands the text back unchanged.
///
/// # Example
///
/// ```
/// use postgen::ui::{FormInput, Presenter};
///
/// struct Scripted;
///
/// impl Presenter for Scripted {
///     fn render_input(&mut self) -> FormInput {
///         FormInput::default()
///     }
///     fn render_editor(&mut self, text: &str) -> String {
///         format!("{text}\n\n(edited)")
///     }
/// }
/// ```
pub trait Presenter {
    /// Collect the raw form values. Validation happens afterwards in
    /// [`FormInput::into_request`].
    fn render_input(&mut self) -> FormInput;

    /// Show `text` for editing and return what the user left in the editor.
    /// Returning `text` unchanged is a valid "no edit".
    fn render_editor(&mut self, text: &str) -> String;

    /// Called once the form has validated, right before the model call.
    /// Frontends use it for their loading state.
    fn on_generating(&mut self, _request: &PostRequest) {}
}
