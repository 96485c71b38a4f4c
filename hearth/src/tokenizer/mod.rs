//! Tokenizer integration
//!
//! Defines the [`Tokenizer`] trait and the Hugging Face implementation.
//! Backends use the trait to turn prompt text into token ids and decoded
//! completions back into text.

mod hf;

use crate::Result;

pub use hf::HfTokenizer;

/// Converts between text and token ids.
pub trait Tokenizer: Send + Sync {
    /// Encode text to token ids.
    ///
    /// # Errors
    /// Returns an error if encoding fails.
    fn encode(&self, text: &str, add_bos: bool) -> Result<Vec<u32>>;

    /// Decode token ids to text, skipping special tokens.
    ///
    /// # Errors
    /// Returns an error if decoding fails.
    fn decode(&self, ids: &[u32]) -> Result<String>;

    /// The end-of-sequence token id.
    fn eos_token_id(&self) -> u32;
}
