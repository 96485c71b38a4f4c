//! T-lite deployment for hearth
//!
//! Serves `t-tech/T-lite-it-1.0` (Qwen2.5-based) as the in-house dialogue
//! assistant: a fixed Russian system prompt, a tight context, and the
//! sampling the model card recommends. No reduced-resource fallback; the
//! context is already at the floor.

mod chat_templates;

pub use chat_templates::ChatMLTemplate;

use hearth::{Preset, SamplingParams};

/// System message every conversation starts with.
pub const SYSTEM_PROMPT: &str = "Ты T-lite, виртуальный ассистент в Weyland-Yutani. \
     Твоя задача — быть полезным диалоговым ассистентом.";

/// Deployment constants for the T-lite service.
#[must_use]
pub fn preset() -> Preset {
    Preset::new("t-tech/T-lite-it-1.0", "generate_tlite", 8083)
        .with_gpu_memory_utilization(0.9)
        .with_max_model_len(Some(1024))
        .with_fallback(None)
        .with_sampling(SamplingParams {
            top_p: 0.8,
            top_k: Some(70),
            repetition_penalty: 1.05,
            max_tokens: 1024,
            ..SamplingParams::default()
        })
        .with_system_prompt(SYSTEM_PROMPT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_matches_the_deployment() {
        let preset = preset();
        assert_eq!(preset.endpoint, "generate_tlite");
        assert_eq!(preset.port, 8083);
        assert!(preset.fallback.is_none());
        assert_eq!(preset.sampling.top_k, Some(70));
        assert!((preset.sampling.repetition_penalty - 1.05).abs() < f32::EPSILON);
        assert!(preset.system_prompt.as_deref().unwrap().starts_with("Ты T-lite"));
    }
}
