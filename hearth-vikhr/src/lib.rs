//! Vikhr-Nemo deployment for hearth
//!
//! Serves `Vikhrmodels/Vikhr-Nemo-12B-Instruct-R-21-09-24` (Mistral-Nemo
//! based). Tight context, no fallback, and the top-k the model authors
//! ship in their examples.

mod chat_templates;

pub use chat_templates::MistralTemplate;

use hearth::{Preset, SamplingParams};

/// Deployment constants for the Vikhr service.
#[must_use]
pub fn preset() -> Preset {
    Preset::new(
        "Vikhrmodels/Vikhr-Nemo-12B-Instruct-R-21-09-24",
        "generate_vikhr",
        8082,
    )
    .with_gpu_memory_utilization(0.9)
    .with_max_model_len(Some(1024))
    .with_fallback(None)
    .with_sampling(SamplingParams {
        top_k: Some(42),
        max_tokens: 1024,
        ..SamplingParams::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_matches_the_deployment() {
        let preset = preset();
        assert_eq!(preset.endpoint, "generate_vikhr");
        assert_eq!(preset.port, 8082);
        assert!(preset.fallback.is_none());
        assert_eq!(preset.sampling.top_k, Some(42));
    }
}
