//! Hugging Face tokenizer backed by the `tokenizers` crate

use std::path::Path;

use crate::{Error, Result, Tokenizer};

/// Candidate special tokens, checked in order, covering the model families
/// the services deploy (Llama 3, Qwen/ChatML, Mistral, DeepSeek).
const BOS_CANDIDATES: &[&str] = &["<|begin_of_text|>", "<s>", "<|im_start|>"];
const EOS_CANDIDATES: &[&str] = &[
    "<|end_of_text|>",
    "<|eot_id|>",
    "<|im_end|>",
    "</s>",
    "<｜end▁of▁sentence｜>",
];

/// Wrapper around a `tokenizer.json` fast tokenizer.
pub struct HfTokenizer {
    tokenizer: tokenizers::Tokenizer,
    bos_token_id: Option<u32>,
    eos_token_id: u32,
}

impl HfTokenizer {
    /// Load a tokenizer from a `tokenizer.json` file.
    ///
    /// # Errors
    /// Returns [`Error::Tokenizer`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let tokenizer = tokenizers::Tokenizer::from_file(path)
            .map_err(|e| Error::Tokenizer(format!("{}: {e}", path.display())))?;

        let bos_token_id = BOS_CANDIDATES
            .iter()
            .find_map(|t| tokenizer.token_to_id(t));
        let eos_token_id = EOS_CANDIDATES
            .iter()
            .find_map(|t| tokenizer.token_to_id(t))
            .unwrap_or(2);

        Ok(Self {
            tokenizer,
            bos_token_id,
            eos_token_id,
        })
    }

    /// Vocabulary size, including added special tokens.
    #[must_use]
    pub fn vocab_size(&self) -> usize {
        self.tokenizer.get_vocab_size(true)
    }
}

impl Tokenizer for HfTokenizer {
    fn encode(&self, text: &str, add_bos: bool) -> Result<Vec<u32>> {
        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| Error::Tokenizer(e.to_string()))?;

        let mut ids: Vec<u32> = encoding.get_ids().to_vec();
        if add_bos {
            if let Some(bos) = self.bos_token_id {
                if ids.first() != Some(&bos) {
                    ids.insert(0, bos);
                }
            }
        }
        Ok(ids)
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        self.tokenizer
            .decode(ids, true)
            .map_err(|e| Error::Tokenizer(e.to_string()))
    }

    fn eos_token_id(&self) -> u32 {
        self.eos_token_id
    }
}
