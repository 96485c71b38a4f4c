//! Wire types for the generate endpoint
//!
//! Hand-rolled serde structs matching the services' JSON-in/JSON-out
//! contract: a prompt plus optional sampling overrides in, the completion
//! text out.

use serde::{Deserialize, Serialize};

use hearth::SamplingParams;

/// `POST /{endpoint}` request body.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    /// Defaults to 0.3 when the field is absent.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default)]
    pub max_tokens: Option<usize>,
    #[serde(default)]
    pub top_p: Option<f32>,
    #[serde(default)]
    pub top_k: Option<usize>,
}

fn default_temperature() -> f32 {
    0.3
}

impl GenerateRequest {
    /// Merge the request's overrides over the deployment defaults.
    #[must_use]
    pub fn sampling(&self, defaults: &SamplingParams) -> SamplingParams {
        let mut params = defaults.clone();
        params.temperature = self.temperature;
        if let Some(max_tokens) = self.max_tokens {
            params.max_tokens = max_tokens;
        }
        if let Some(top_p) = self.top_p {
            params.top_p = top_p;
        }
        if let Some(top_k) = self.top_k {
            params.top_k = Some(top_k);
        }
        params
    }
}

/// `POST /{endpoint}` response body.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub response: String,
}

/// Error response body, any status.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_defaults_when_absent() {
        let request: GenerateRequest = serde_json::from_str(r#"{"prompt": "hi"}"#).unwrap();
        assert!((request.temperature - 0.3).abs() < f32::EPSILON);
        assert!(request.max_tokens.is_none());
    }

    #[test]
    fn overrides_replace_only_the_given_fields() {
        let request: GenerateRequest =
            serde_json::from_str(r#"{"prompt": "hi", "max_tokens": 16, "top_k": 5}"#).unwrap();

        let defaults = SamplingParams {
            top_p: 0.8,
            top_k: Some(70),
            max_tokens: 1024,
            ..SamplingParams::default()
        };
        let params = request.sampling(&defaults);

        assert_eq!(params.max_tokens, 16);
        assert_eq!(params.top_k, Some(5));
        // Untouched defaults survive.
        assert!((params.top_p - 0.8).abs() < f32::EPSILON);
    }
}
