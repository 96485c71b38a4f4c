//! Deployment presets
//!
//! Each deployed service is one model with a fixed endpoint, port, engine
//! configuration, and sampling defaults. A [`Preset`] collects those
//! constants; the per-model crates each export one, and the generic
//! service assembles one from the environment.

use crate::{EngineConfig, FallbackPolicy, SamplingParams, ServerConfig};

/// The deployment constants for one service instance.
#[derive(Debug, Clone)]
pub struct Preset {
    /// Model identifier (Hugging Face repo id or local directory).
    pub model: String,
    /// Human-readable service title, used in startup logs.
    pub api_title: String,
    /// Route path for the generate endpoint, without the leading slash.
    pub endpoint: String,
    /// Default port for this deployment.
    pub port: u16,
    pub gpu_memory_utilization: f32,
    pub max_model_len: Option<usize>,
    pub trust_remote_code: bool,
    /// Reduction targets for the ResourceExhaustion retry. `None` means
    /// this deployment has no smaller configuration to fall back to.
    pub fallback: Option<FallbackPolicy>,
    /// Deployment sampling defaults; requests may override a subset.
    pub sampling: SamplingParams,
    /// Fixed system message prepended to every conversation.
    pub system_prompt: Option<String>,
}

impl Preset {
    /// Create a preset with the generic-deployment defaults.
    #[must_use]
    pub fn new(model: impl Into<String>, endpoint: impl Into<String>, port: u16) -> Self {
        let model = model.into();
        let api_title = match model.rsplit_once('/') {
            Some((_, name)) => format!("{name} API"),
            None => format!("{model} API"),
        };
        Self {
            model,
            api_title,
            endpoint: endpoint.into(),
            port,
            gpu_memory_utilization: 0.85,
            max_model_len: Some(4096),
            trust_remote_code: false,
            fallback: Some(FallbackPolicy::default()),
            sampling: SamplingParams::default(),
            system_prompt: None,
        }
    }

    #[must_use]
    pub fn with_api_title(mut self, api_title: impl Into<String>) -> Self {
        self.api_title = api_title.into();
        self
    }

    #[must_use]
    pub fn with_gpu_memory_utilization(mut self, fraction: f32) -> Self {
        self.gpu_memory_utilization = fraction;
        self
    }

    #[must_use]
    pub fn with_max_model_len(mut self, max_model_len: Option<usize>) -> Self {
        self.max_model_len = max_model_len;
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: Option<FallbackPolicy>) -> Self {
        self.fallback = fallback;
        self
    }

    #[must_use]
    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    #[must_use]
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    /// The preferred engine configuration for this deployment.
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            model: self.model.clone(),
            tensor_parallel_size: 1,
            gpu_memory_utilization: self.gpu_memory_utilization,
            max_model_len: self.max_model_len,
            trust_remote_code: self.trust_remote_code,
        }
    }

    /// The default server binding for this deployment.
    #[must_use]
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            port: self.port,
            ..ServerConfig::default()
        }
    }
}
