//! Sampling parameters for text generation

/// Generation-time knobs passed to the engine with every request.
///
/// The shape follows the engine interface the services were written
/// against: temperature plus nucleus/top-k filtering, an optional
/// repetition penalty, and the output-token budget.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingParams {
    /// Temperature for logit scaling. Values at or below `f32::EPSILON`
    /// select greedy (argmax) decoding.
    pub temperature: f32,
    /// Nucleus probability threshold in (0, 1].
    pub top_p: f32,
    /// Keep only the `k` most likely tokens before nucleus filtering.
    /// `None` disables the filter.
    pub top_k: Option<usize>,
    /// Penalty factor for recently generated tokens. 1.0 disables it.
    pub repetition_penalty: f32,
    /// Maximum number of new tokens to generate.
    pub max_tokens: usize,
    /// Seed for the PRNG. Same seed + same input → same output.
    pub seed: u64,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            top_p: 0.9,
            top_k: Some(50),
            repetition_penalty: 1.0,
            max_tokens: 1024,
            seed: 42,
        }
    }
}

impl SamplingParams {
    /// Whether greedy decoding should be used instead of sampling.
    #[must_use]
    pub fn is_greedy(&self) -> bool {
        self.temperature <= f32::EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_temperature_is_greedy() {
        let params = SamplingParams {
            temperature: 0.0,
            ..SamplingParams::default()
        };
        assert!(params.is_greedy());
        assert!(!SamplingParams::default().is_greedy());
    }
}
