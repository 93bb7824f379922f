//! The generation seam: one prompt in, one completion out.
//!
//! [`Generator`] is the only thing the pipeline knows about the model. The
//! production implementation is [`InferenceClient`]; tests and demos plug in
//! stubs.

use std::future::Future;
use std::pin::Pin;

use tracing::warn;

use crate::error::PostError;
use crate::{ChatRequest, InferenceClient, Message};

/// Boxed future returned by [`Generator::generate`].
pub type GenerateFuture<'a> = Pin<Box<dyn Future<Output = Result<String, PostError>> + Send + 'a>>;

/// Something that can turn a prompt into generated text.
///
/// One call is one outbound request. Implementations must not cache or
/// retry; every failure maps to [`PostError::Generation`]. `Ok` always holds
/// non-blank text.
///
/// # Example
///
/// ```
/// use postgen::generation::{GenerateFuture, Generator};
///
/// struct Echo;
///
/// impl Generator for Echo {
///     fn generate(&self, prompt: &str, _max: u32, _temp: f32) -> GenerateFuture<'_> {
///         let out = prompt.to_uppercase();
///         Box::pin(async move { Ok(out) })
///     }
/// }
/// ```
pub trait Generator: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
        max_output_tokens: u32,
        temperature: f32,
    ) -> GenerateFuture<'_>;
}

impl Generator for InferenceClient {
    fn generate(
        &self,
        prompt: &str,
        max_output_tokens: u32,
        temperature: f32,
    ) -> GenerateFuture<'_> {
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![Message::user(prompt)],
            max_tokens: max_output_tokens,
            temperature,
        };
        Box::pin(async move {
            let completion = self.chat(&body).await?;
            match completion.content {
                Some(text) if !text.trim().is_empty() => Ok(text),
                _ => {
                    warn!("completion carried no message content");
                    Err(PostError::Generation(
                        "response contained no completion content".into(),
                    ))
                }
            }
        })
    }
}

impl<G: Generator + ?Sized> Generator for std::sync::Arc<G> {
    fn generate(
        &self,
        prompt: &str,
        max_output_tokens: u32,
        temperature: f32,
    ) -> GenerateFuture<'_> {
        (**self).generate(prompt, max_output_tokens, temperature)
    }
}
