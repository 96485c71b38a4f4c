//! gpt-oss distill deployment for hearth
//!
//! Serves `TeichAI/gpt-oss-20b-claude-4.5-sonnet-high-reasoning-distill`.
//! A 20B model on the shared GPUs: the memory fraction and context start
//! low, with a further reduction to fall back to.

mod chat_templates;

pub use chat_templates::HarmonyTemplate;

use hearth::{FallbackPolicy, Preset, SamplingParams};

/// Deployment constants for the gpt-oss service.
#[must_use]
pub fn preset() -> Preset {
    Preset::new(
        "TeichAI/gpt-oss-20b-claude-4.5-sonnet-high-reasoning-distill",
        "generate_gptoss",
        8084,
    )
    .with_gpu_memory_utilization(0.75)
    .with_max_model_len(Some(4096))
    .with_fallback(Some(FallbackPolicy {
        max_model_len: 2048,
        gpu_memory_utilization: 0.7,
    }))
    .with_sampling(SamplingParams {
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
        assert_eq!(preset.endpoint, "generate_gptoss");
        assert_eq!(preset.port, 8084);
        assert!((preset.gpu_memory_utilization - 0.75).abs() < f32::EPSILON);
        assert_eq!(preset.max_model_len, Some(4096));
        assert_eq!(preset.fallback.unwrap().max_model_len, 2048);
    }
}
