//! Engine and server configuration
//!
//! An [`EngineConfig`] describes one load attempt. It is immutable once
//! built: the loader derives new configurations for its retries
//! ([`EngineConfig::with_reduced_resources`],
//! [`EngineConfig::with_trust_remote_code`]) instead of mutating the one
//! that failed.

use crate::{Error, Result};

/// Configuration for a single engine load attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Model identifier (Hugging Face repo id or local directory).
    pub model: String,
    /// Tensor-parallel width. The deployed services always run 1.
    pub tensor_parallel_size: usize,
    /// Fraction of accelerator memory the engine may claim, in (0, 1].
    pub gpu_memory_utilization: f32,
    /// Maximum context length. `None` lets the engine use the model's
    /// trained maximum.
    pub max_model_len: Option<usize>,
    /// Opt into architectures outside the known-supported set.
    pub trust_remote_code: bool,
}

impl EngineConfig {
    /// Create a configuration for `model` with the generic-deployment
    /// defaults.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            tensor_parallel_size: 1,
            gpu_memory_utilization: 0.85,
            max_model_len: Some(4096),
            trust_remote_code: false,
        }
    }

    /// Set the memory utilization fraction.
    #[must_use]
    pub fn with_gpu_memory_utilization(mut self, fraction: f32) -> Self {
        self.gpu_memory_utilization = fraction;
        self
    }

    /// Set (or clear) the maximum context length.
    #[must_use]
    pub fn with_max_model_len(mut self, max_model_len: Option<usize>) -> Self {
        self.max_model_len = max_model_len;
        self
    }

    /// Derive a configuration identical to this one except for the
    /// remote-code flag.
    #[must_use]
    pub fn with_trust_remote_code(&self, trust: bool) -> Self {
        let mut config = self.clone();
        config.trust_remote_code = trust;
        config
    }

    /// Derive the reduced-resource configuration for a ResourceExhaustion
    /// retry.
    ///
    /// Each knob is clamped to the policy target, never raised above the
    /// current value. Returns `None` when nothing would shrink; the loader
    /// treats that as "no retry available" rather than re-attempting an
    /// identical configuration.
    #[must_use]
    pub fn with_reduced_resources(&self, policy: &FallbackPolicy) -> Option<Self> {
        let gpu = policy.gpu_memory_utilization.min(self.gpu_memory_utilization);
        let len = match self.max_model_len {
            Some(current) => policy.max_model_len.min(current),
            None => policy.max_model_len,
        };

        let gpu_shrank = gpu < self.gpu_memory_utilization;
        let len_shrank = self.max_model_len.is_none_or(|current| len < current);
        if !gpu_shrank && !len_shrank {
            return None;
        }

        let mut config = self.clone();
        config.gpu_memory_utilization = gpu;
        config.max_model_len = Some(len);
        Some(config)
    }

    /// Check the configuration before the first load attempt.
    ///
    /// # Errors
    /// Returns [`Error::Config`] for an empty model id, a zero
    /// tensor-parallel width, a memory fraction outside (0, 1], or a zero
    /// context length.
    pub fn validate(&self) -> Result<()> {
        if self.model.is_empty() {
            return Err(Error::Config("model identifier is empty".into()));
        }
        if self.tensor_parallel_size == 0 {
            return Err(Error::Config("tensor_parallel_size must be at least 1".into()));
        }
        if !(self.gpu_memory_utilization > 0.0 && self.gpu_memory_utilization <= 1.0) {
            return Err(Error::Config(format!(
                "gpu_memory_utilization must be in (0, 1], got {}",
                self.gpu_memory_utilization
            )));
        }
        if self.max_model_len == Some(0) {
            return Err(Error::Config("max_model_len must be positive".into()));
        }
        Ok(())
    }
}

/// Reduction targets for the ResourceExhaustion retry.
///
/// The deployed services hardcode their fallback values rather than
/// computing them; each preset carries its own policy.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackPolicy {
    /// Context length to retry with.
    pub max_model_len: usize,
    /// Memory fraction to retry with.
    pub gpu_memory_utilization: f32,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            max_model_len: 2048,
            gpu_memory_utilization: 0.7,
        }
    }
}

/// Where the HTTP server binds.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// The `host:port` string handed to the TCP listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}
