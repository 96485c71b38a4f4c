//! The engine-side model interface
//!
//! A [`Model`] is the loaded inference engine as the rest of hearth sees
//! it: a prompt string and sampling parameters in, a [`Completion`] out.
//! How tokens are produced (batching, KV-cache management, device
//! placement) belongs to the backend crate implementing the trait.

use crate::{Result, SamplingParams};

/// Why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// Model produced the end-of-sequence token.
    Stop,
    /// Reached the maximum number of tokens.
    Length,
}

/// One finished generation.
#[derive(Debug, Clone)]
pub struct Completion {
    /// Generated text, not including the prompt.
    pub text: String,
    /// Number of tokens in the prompt.
    pub prompt_tokens: usize,
    /// Number of tokens generated.
    pub completion_tokens: usize,
    pub finish_reason: FinishReason,
}

/// A loaded model ready to generate.
///
/// Generation takes `&mut self`: the KV cache is internal state, so one
/// request runs at a time. The runtime crate's engine handle owns the
/// model on a worker thread and serializes requests for the callers.
pub trait Model: Send {
    /// Generate a completion for `prompt`.
    ///
    /// # Errors
    /// Returns an error if tokenization or a forward pass fails.
    fn complete(&mut self, prompt: &str, params: &SamplingParams) -> Result<Completion>;

    /// The context length the model was loaded with.
    fn max_model_len(&self) -> usize;
}
