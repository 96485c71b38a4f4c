//! `DeepSeek` R1 deployment for hearth
//!
//! Serves `deepseek-ai/DeepSeek-R1-0528-Qwen3-8B`. R1 distills can produce
//! long reasoning traces, so this deployment runs a larger context and
//! output budget than the others, with a reduced-resource fallback.

mod chat_templates;

pub use chat_templates::DeepSeekTemplate;

use hearth::{FallbackPolicy, Preset, SamplingParams};

/// Deployment constants for the `DeepSeek` service.
#[must_use]
pub fn preset() -> Preset {
    Preset::new("deepseek-ai/DeepSeek-R1-0528-Qwen3-8B", "generate_deepseek", 8085)
        .with_gpu_memory_utilization(0.85)
        .with_max_model_len(Some(8192))
        .with_fallback(Some(FallbackPolicy {
            max_model_len: 4096,
            gpu_memory_utilization: 0.75,
        }))
        .with_sampling(SamplingParams {
            max_tokens: 2048,
            ..SamplingParams::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_matches_the_deployment() {
        let preset = preset();
        assert_eq!(preset.endpoint, "generate_deepseek");
        assert_eq!(preset.port, 8085);
        assert_eq!(preset.max_model_len, Some(8192));
        assert_eq!(preset.sampling.max_tokens, 2048);

        let fallback = preset.fallback.unwrap();
        assert_eq!(fallback.max_model_len, 4096);
        assert!((fallback.gpu_memory_utilization - 0.75).abs() < f32::EPSILON);
    }
}
