//! Convenience re-exports for common postgen types.
//!
//! ```ignore
//! use postgen::prelude::*;
//! ```

pub use crate::config::AppConfig;
pub use crate::error::PostError;
pub use crate::export::{Export, export_post};
pub use crate::generation::{GenerateFuture, Generator};
pub use crate::prompt::{KeywordSet, LengthBudget, Platform, build_prompt};
pub use crate::session::{PostPhase, PostRequest, SessionState, generate_post};
pub use crate::ui::{FormInput, Presenter, TurnOutcome, run_turn};
pub use crate::{DEFAULT_MODEL, DEFAULT_TEMPERATURE, InferenceClient};
