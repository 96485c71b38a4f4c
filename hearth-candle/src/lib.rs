//! Candle-based model backend
//!
//! Implements [`ModelProvider`] over the candle ecosystem: GGUF weights
//! loaded through `candle-transformers`, artifacts resolved through
//! `hf-hub`, tokenization through the core [`HfTokenizer`].
//!
//! The provider performs its feasibility checks against the GGUF metadata
//! *before* touching the weights, so an infeasible configuration fails in
//! milliseconds and the loader's retry ladder gets a structured error to
//! classify.

mod artifacts;
mod model;

pub use artifacts::ModelArtifacts;
pub use model::CandleModel;

use std::fs::File;

use candle_core::quantized::gguf_file;
use candle_core::Device;
use tracing::info;

use hearth::{EngineConfig, Error, HfTokenizer, ModelProvider, Result};

/// Architectures `quantized_llama` is known to handle. Anything else needs
/// the remote-code opt-in to be attempted at all.
const SUPPORTED_ARCHITECTURES: &[&str] = &["llama", "mistral"];

/// Context length assumed when the GGUF metadata does not declare one.
const DEFAULT_CONTEXT_LENGTH: usize = 4096;

/// Reject architectures outside the supported set unless the config opts
/// in.
fn check_architecture(architecture: &str, trust_remote_code: bool) -> Result<()> {
    if SUPPORTED_ARCHITECTURES.contains(&architecture) || trust_remote_code {
        return Ok(());
    }
    Err(Error::UnsupportedArchitecture(format!(
        "general.architecture \"{architecture}\" is not in the supported set \
         {SUPPORTED_ARCHITECTURES:?}; set trust_remote_code to attempt it anyway"
    )))
}

/// Clamp the requested context length against the model's trained maximum.
///
/// Requesting more than the model was trained for is the same
/// infeasibility an engine reports when the KV cache cannot cover the
/// requested sequence length, so it gets the same failure class.
fn check_context_length(requested: Option<usize>, trained: usize) -> Result<usize> {
    match requested {
        Some(requested) if requested > trained => Err(Error::KvCacheCapacity(format!(
            "requested max_model_len {requested} exceeds the model's trained \
             context length {trained}"
        ))),
        Some(requested) => Ok(requested),
        None => Ok(trained),
    }
}

/// [`ModelProvider`] over candle.
pub struct CandleProvider {
    device: Device,
}

impl CandleProvider {
    /// Create a provider on the CPU device.
    #[must_use]
    pub fn new() -> Self {
        Self {
            device: Device::Cpu,
        }
    }

    /// Create a provider on an explicit device.
    #[must_use]
    pub fn with_device(device: Device) -> Self {
        Self { device }
    }
}

impl Default for CandleProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelProvider for CandleProvider {
    type Model = CandleModel;
    type Tokenizer = HfTokenizer;

    fn load_model(&self, config: &EngineConfig) -> Result<CandleModel> {
        if config.tensor_parallel_size != 1 {
            return Err(Error::Config(format!(
                "candle backend is single-device; tensor_parallel_size {} is not supported",
                config.tensor_parallel_size
            )));
        }

        let artifacts = artifacts::resolve(&config.model)?;
        let mut file = File::open(&artifacts.weights)?;
        let content = gguf_file::Content::read(&mut file)
            .map_err(|e| Error::Engine(format!("{}: {e}", artifacts.weights.display())))?;

        let architecture = content
            .metadata
            .get("general.architecture")
            .and_then(|v| v.to_string().ok())
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());
        check_architecture(&architecture, config.trust_remote_code)?;

        let trained_len = content
            .metadata
            .get(&format!("{architecture}.context_length"))
            .and_then(|v| v.to_u32().ok())
            .map_or(DEFAULT_CONTEXT_LENGTH, |v| v as usize);
        let max_model_len = check_context_length(config.max_model_len, trained_len)?;

        let tokenizer = HfTokenizer::from_file(&artifacts.tokenizer)?;

        info!(
            model = %config.model,
            architecture = %architecture,
            max_model_len,
            "loading GGUF weights"
        );
        let weights =
            candle_transformers::models::quantized_llama::ModelWeights::from_gguf(
                content,
                &mut file,
                &self.device,
            )
            .map_err(|e| Error::Engine(e.to_string()))?;

        Ok(CandleModel::new(
            weights,
            tokenizer,
            self.device.clone(),
            max_model_len,
        ))
    }

    fn load_tokenizer(&self, config: &EngineConfig) -> Result<HfTokenizer> {
        let artifacts = artifacts::resolve(&config.model)?;
        HfTokenizer::from_file(&artifacts.tokenizer)
    }
}
