//! `YandexGPT` deployment for hearth
//!
//! Serves `yandex/YandexGPT-5-Lite-8B-instruct`. The context length is
//! left to the model's own maximum (the deployment never overrode it) and
//! top-k filtering is disabled; nucleus sampling only, the way the
//! service ran it.

mod chat_templates;

pub use chat_templates::YandexGptTemplate;

use hearth::{Preset, SamplingParams};

/// Deployment constants for the `YandexGPT` service.
#[must_use]
pub fn preset() -> Preset {
    Preset::new("yandex/YandexGPT-5-Lite-8B-instruct", "generate_yagpt", 8081)
        .with_api_title("YandexGPT-8B-Lite-Instruct service")
        .with_gpu_memory_utilization(0.9)
        .with_max_model_len(None)
        .with_fallback(None)
        .with_sampling(SamplingParams {
            top_k: None,
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
        assert_eq!(preset.endpoint, "generate_yagpt");
        assert_eq!(preset.port, 8081);
        assert_eq!(preset.max_model_len, None);
        assert!(preset.fallback.is_none());
        assert_eq!(preset.sampling.top_k, None);
        assert_eq!(preset.api_title, "YandexGPT-8B-Lite-Instruct service");
    }
}
