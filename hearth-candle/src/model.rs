//! Generation over quantized GGUF weights

use candle_core::{Device, Tensor};
use candle_transformers::generation::{LogitsProcessor, Sampling};
use candle_transformers::models::quantized_llama::ModelWeights;

use hearth::{Completion, Error, FinishReason, HfTokenizer, Model, Result, SamplingParams};
use hearth::Tokenizer as _;

/// Window of recent tokens the repetition penalty looks back over.
const REPEAT_LAST_N: usize = 64;

/// A loaded quantized model plus its tokenizer.
pub struct CandleModel {
    weights: ModelWeights,
    tokenizer: HfTokenizer,
    device: Device,
    max_model_len: usize,
}

impl CandleModel {
    pub(crate) fn new(
        weights: ModelWeights,
        tokenizer: HfTokenizer,
        device: Device,
        max_model_len: usize,
    ) -> Self {
        Self {
            weights,
            tokenizer,
            device,
            max_model_len,
        }
    }

    fn sampling_for(params: &SamplingParams) -> Sampling {
        if params.is_greedy() {
            return Sampling::ArgMax;
        }
        let temperature = f64::from(params.temperature);
        let p = f64::from(params.top_p);
        match params.top_k {
            Some(k) => Sampling::TopKThenTopP { k, p, temperature },
            None => Sampling::TopP { p, temperature },
        }
    }
}

impl Model for CandleModel {
    fn complete(&mut self, prompt: &str, params: &SamplingParams) -> Result<Completion> {
        let input_ids = self.tokenizer.encode(prompt, true)?;
        let prompt_tokens = input_ids.len();
        if prompt_tokens >= self.max_model_len {
            return Err(Error::Engine(format!(
                "prompt is {prompt_tokens} tokens, max_model_len is {}",
                self.max_model_len
            )));
        }

        let eos_token_id = self.tokenizer.eos_token_id();
        let mut processor =
            LogitsProcessor::from_sampling(params.seed, Self::sampling_for(params));

        // Prefill: run the whole prompt in one pass.
        let input = Tensor::new(input_ids.as_slice(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| Error::Engine(e.to_string()))?;
        let mut logits = self
            .weights
            .forward(&input, 0)
            .and_then(|t| t.squeeze(0))
            .map_err(|e| Error::Engine(e.to_string()))?;

        let mut generated: Vec<u32> = Vec::new();
        let mut index_pos = prompt_tokens;
        let mut finish_reason = FinishReason::Length;

        for _ in 0..params.max_tokens {
            let penalized = if (params.repetition_penalty - 1.0).abs() < f32::EPSILON {
                logits.clone()
            } else {
                let start = generated.len().saturating_sub(REPEAT_LAST_N);
                candle_transformers::utils::apply_repeat_penalty(
                    &logits,
                    params.repetition_penalty,
                    &generated[start..],
                )
                .map_err(|e| Error::Engine(e.to_string()))?
            };

            let next = processor
                .sample(&penalized)
                .map_err(|e| Error::Engine(e.to_string()))?;
            if next == eos_token_id {
                finish_reason = FinishReason::Stop;
                break;
            }
            generated.push(next);

            if index_pos + 1 >= self.max_model_len {
                break;
            }

            let input = Tensor::new(&[next], &self.device)
                .and_then(|t| t.unsqueeze(0))
                .map_err(|e| Error::Engine(e.to_string()))?;
            logits = self
                .weights
                .forward(&input, index_pos)
                .and_then(|t| t.squeeze(0))
                .map_err(|e| Error::Engine(e.to_string()))?;
            index_pos += 1;
        }

        let text = self.tokenizer.decode(&generated)?;
        Ok(Completion {
            text,
            prompt_tokens,
            completion_tokens: generated.len(),
            finish_reason,
        })
    }

    fn max_model_len(&self) -> usize {
        self.max_model_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greedy_when_temperature_is_zero() {
        let params = SamplingParams {
            temperature: 0.0,
            ..SamplingParams::default()
        };
        assert!(matches!(CandleModel::sampling_for(&params), Sampling::ArgMax));
    }

    #[test]
    fn top_k_selects_the_combined_filter() {
        let params = SamplingParams {
            top_k: Some(50),
            ..SamplingParams::default()
        };
        assert!(matches!(
            CandleModel::sampling_for(&params),
            Sampling::TopKThenTopP { k: 50, .. }
        ));

        let params = SamplingParams {
            top_k: None,
            ..SamplingParams::default()
        };
        assert!(matches!(CandleModel::sampling_for(&params), Sampling::TopP { .. }));
    }
}
