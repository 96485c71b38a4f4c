//! Resilient model loading
//!
//! Startup is the only phase where the services recover from anything:
//! a load attempt that fails for a *recoverable* reason is retried exactly
//! once with a derived configuration, everything else aborts the process
//! before the listener binds.
//!
//! The ladder, per [`FailureClass`]:
//!
//! - `ResourceExhaustion` → one retry with strictly reduced resources
//!   ([`EngineConfig::with_reduced_resources`]).
//! - `UnsupportedArchitecture` → one retry with `trust_remote_code` forced
//!   true, unless it already was.
//! - `Other` → fatal immediately.
//!
//! Tokenizer loading follows its own shorter ladder: any failure gets one
//! retry with `trust_remote_code` forced true, and the effective trust
//! value is handed back so callers can carry it into the engine load.
//!
//! The loader never swaps in a different model identifier and never makes
//! more than two attempts per ladder.

use tracing::{info, warn};

use crate::{EngineConfig, Error, FailureClass, FallbackPolicy, Result};

/// A backend that can construct models and tokenizers from an
/// [`EngineConfig`].
///
/// The loader is generic over this trait so the retry ladder can be
/// exercised without a real engine.
pub trait ModelProvider {
    type Model;
    type Tokenizer;

    /// Attempt one engine load. Must not retry internally.
    ///
    /// # Errors
    /// Returns structured [`Error`] variants where possible; free-text
    /// engine errors are classified by message pattern as a fallback.
    fn load_model(&self, config: &EngineConfig) -> Result<Self::Model>;

    /// Attempt one tokenizer load. Must not retry internally.
    ///
    /// # Errors
    /// Returns an error if the tokenizer cannot be constructed.
    fn load_tokenizer(&self, config: &EngineConfig) -> Result<Self::Tokenizer>;
}

/// Load the tokenizer, retrying once with `trust_remote_code` forced true.
///
/// Returns the tokenizer together with the effective trust value, which
/// callers propagate into the engine configuration (a model whose
/// tokenizer needed the opt-in will need it for the engine too).
///
/// # Errors
/// Returns the second failure unchanged; there is no further fallback.
pub fn load_tokenizer<P: ModelProvider>(
    provider: &P,
    config: &EngineConfig,
) -> Result<(P::Tokenizer, bool)> {
    info!(model = %config.model, trust_remote_code = config.trust_remote_code, "loading tokenizer");
    match provider.load_tokenizer(config) {
        Ok(tokenizer) => Ok((tokenizer, config.trust_remote_code)),
        Err(e) if !config.trust_remote_code => {
            warn!(error = %e, "tokenizer load failed, retrying with trust_remote_code=true");
            let trusted = config.with_trust_remote_code(true);
            let tokenizer = provider.load_tokenizer(&trusted)?;
            Ok((tokenizer, true))
        }
        Err(e) => Err(e),
    }
}

/// Load the engine, degrading the configuration once on a recoverable
/// failure.
///
/// `fallback` carries the deployment's reduction targets; deployments
/// without one (`None`) fail fatally on the first ResourceExhaustion,
/// matching services that were never given a smaller configuration to
/// fall back to.
///
/// Returns the model handle together with the configuration that actually
/// succeeded.
///
/// # Errors
/// Returns the final failure once the ladder is exhausted. A second
/// `UnsupportedArchitecture` failure is annotated with the library-support
/// requirement so the operator knows an upgrade, not a retry, is needed.
pub fn load_model<P: ModelProvider>(
    provider: &P,
    preferred: &EngineConfig,
    fallback: Option<&FallbackPolicy>,
) -> Result<(P::Model, EngineConfig)> {
    preferred.validate()?;

    info!(
        model = %preferred.model,
        gpu_memory_utilization = preferred.gpu_memory_utilization,
        max_model_len = ?preferred.max_model_len,
        trust_remote_code = preferred.trust_remote_code,
        "loading model"
    );

    let first_failure = match provider.load_model(preferred) {
        Ok(model) => {
            info!(model = %preferred.model, "model loaded");
            return Ok((model, preferred.clone()));
        }
        Err(e) => e,
    };

    match first_failure.failure_class() {
        FailureClass::ResourceExhaustion => {
            // Retry with reduced resources, but never with a configuration
            // that is not strictly smaller than the one that just failed.
            let Some(reduced) = fallback.and_then(|p| preferred.with_reduced_resources(p)) else {
                return Err(first_failure);
            };
            warn!(
                error = %first_failure,
                max_model_len = ?reduced.max_model_len,
                gpu_memory_utilization = reduced.gpu_memory_utilization,
                "load failed, retrying with reduced resources"
            );
            let model = provider.load_model(&reduced)?;
            info!(model = %reduced.model, "model loaded with reduced resources");
            Ok((model, reduced))
        }
        FailureClass::UnsupportedArchitecture if !preferred.trust_remote_code => {
            warn!(
                error = %first_failure,
                "load failed, retrying with trust_remote_code=true"
            );
            let trusted = preferred.with_trust_remote_code(true);
            match provider.load_model(&trusted) {
                Ok(model) => {
                    info!(model = %trusted.model, "model loaded with trust_remote_code=true");
                    Ok((model, trusted))
                }
                Err(e) => Err(Error::UnsupportedArchitecture(format!(
                    "{e}; the model's architecture is not supported even with \
                     trust_remote_code=true; a newer release of the engine/tokenizer \
                     libraries with support for this architecture is required"
                ))),
            }
        }
        _ => Err(first_failure),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;

    /// Provider that replays a scripted sequence of results and records
    /// the configuration of every attempt.
    struct ScriptedProvider {
        model_results: RefCell<VecDeque<Result<u32>>>,
        model_calls: RefCell<Vec<EngineConfig>>,
        tokenizer_results: RefCell<VecDeque<Result<u32>>>,
        tokenizer_calls: RefCell<Vec<EngineConfig>>,
    }

    impl ScriptedProvider {
        fn new(model_results: Vec<Result<u32>>, tokenizer_results: Vec<Result<u32>>) -> Self {
            Self {
                model_results: RefCell::new(model_results.into()),
                model_calls: RefCell::new(Vec::new()),
                tokenizer_results: RefCell::new(tokenizer_results.into()),
                tokenizer_calls: RefCell::new(Vec::new()),
            }
        }

        fn model_calls(&self) -> Vec<EngineConfig> {
            self.model_calls.borrow().clone()
        }

        fn tokenizer_calls(&self) -> Vec<EngineConfig> {
            self.tokenizer_calls.borrow().clone()
        }
    }

    impl ModelProvider for ScriptedProvider {
        type Model = u32;
        type Tokenizer = u32;

        fn load_model(&self, config: &EngineConfig) -> Result<u32> {
            self.model_calls.borrow_mut().push(config.clone());
            self.model_results
                .borrow_mut()
                .pop_front()
                .expect("more load attempts than the ladder allows")
        }

        fn load_tokenizer(&self, config: &EngineConfig) -> Result<u32> {
            self.tokenizer_calls.borrow_mut().push(config.clone());
            self.tokenizer_results
                .borrow_mut()
                .pop_front()
                .expect("more tokenizer attempts than the ladder allows")
        }
    }

    fn preferred() -> EngineConfig {
        EngineConfig::new("org/model")
            .with_gpu_memory_utilization(0.85)
            .with_max_model_len(Some(8192))
    }

    fn policy() -> FallbackPolicy {
        FallbackPolicy {
            max_model_len: 4096,
            gpu_memory_utilization: 0.75,
        }
    }

    #[test]
    fn kv_cache_failure_retries_once_with_reduced_config() {
        let provider = ScriptedProvider::new(
            vec![Err(Error::KvCacheCapacity("needs 31 GiB".into())), Ok(7)],
            vec![],
        );

        let (model, used) = load_model(&provider, &preferred(), Some(&policy())).unwrap();
        assert_eq!(model, 7);
        assert_eq!(used.max_model_len, Some(4096));
        assert!((used.gpu_memory_utilization - 0.75).abs() < f32::EPSILON);

        let calls = provider.model_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].max_model_len, Some(8192));
        assert_eq!(calls[1].max_model_len, Some(4096));
    }

    #[test]
    fn unrecognized_architecture_retries_with_trust() {
        let provider = ScriptedProvider::new(
            vec![
                Err(Error::UnsupportedArchitecture("exotic_moe".into())),
                Ok(1),
            ],
            vec![],
        );

        let (_, used) = load_model(&provider, &preferred(), Some(&policy())).unwrap();
        assert!(used.trust_remote_code);

        let calls = provider.model_calls();
        assert_eq!(calls.len(), 2);
        assert!(!calls[0].trust_remote_code);
        assert!(calls[1].trust_remote_code);
    }

    #[test]
    fn repeated_resource_exhaustion_is_fatal_after_two_attempts() {
        let provider = ScriptedProvider::new(
            vec![
                Err(Error::KvCacheCapacity("too big".into())),
                Err(Error::KvCacheCapacity("still too big".into())),
            ],
            vec![],
        );

        let err = load_model(&provider, &preferred(), Some(&policy())).unwrap_err();
        assert_eq!(err.failure_class(), FailureClass::ResourceExhaustion);
        assert_eq!(provider.model_calls().len(), 2);
    }

    #[test]
    fn second_failure_is_terminal_regardless_of_class() {
        // A differently-classed second failure must not start a new ladder.
        let provider = ScriptedProvider::new(
            vec![
                Err(Error::KvCacheCapacity("too big".into())),
                Err(Error::UnsupportedArchitecture("exotic".into())),
            ],
            vec![],
        );

        assert!(load_model(&provider, &preferred(), Some(&policy())).is_err());
        assert_eq!(provider.model_calls().len(), 2);
    }

    #[test]
    fn unclassified_failure_is_fatal_immediately() {
        let provider = ScriptedProvider::new(
            vec![Err(Error::Engine("weights file truncated".into()))],
            vec![],
        );

        assert!(load_model(&provider, &preferred(), Some(&policy())).is_err());
        assert_eq!(provider.model_calls().len(), 1);
    }

    #[test]
    fn no_retry_when_nothing_would_shrink() {
        let config = EngineConfig::new("org/model")
            .with_gpu_memory_utilization(0.7)
            .with_max_model_len(Some(2048));
        let provider = ScriptedProvider::new(
            vec![Err(Error::KvCacheCapacity("too big".into()))],
            vec![],
        );

        assert!(load_model(&provider, &config, Some(&FallbackPolicy::default())).is_err());
        assert_eq!(provider.model_calls().len(), 1);
    }

    #[test]
    fn architecture_failure_with_trust_already_set_is_fatal() {
        let config = preferred().with_trust_remote_code(true);
        let provider = ScriptedProvider::new(
            vec![Err(Error::UnsupportedArchitecture("exotic".into()))],
            vec![],
        );

        assert!(load_model(&provider, &config, Some(&policy())).is_err());
        assert_eq!(provider.model_calls().len(), 1);
    }

    #[test]
    fn second_architecture_failure_names_the_support_requirement() {
        let provider = ScriptedProvider::new(
            vec![
                Err(Error::UnsupportedArchitecture("exotic".into())),
                Err(Error::UnsupportedArchitecture("exotic".into())),
            ],
            vec![],
        );

        let err = load_model(&provider, &preferred(), Some(&policy())).unwrap_err();
        assert!(err.to_string().contains("newer release"));
    }

    #[test]
    fn invalid_config_fails_before_any_attempt() {
        let provider = ScriptedProvider::new(vec![], vec![]);
        let config = EngineConfig::new("");

        assert!(load_model(&provider, &config, Some(&policy())).is_err());
        assert!(provider.model_calls().is_empty());
    }

    #[test]
    fn tokenizer_retry_reports_effective_trust() {
        let provider = ScriptedProvider::new(
            vec![],
            vec![Err(Error::Tokenizer("no tokenizer.json".into())), Ok(3)],
        );

        let (tokenizer, trust) = load_tokenizer(&provider, &preferred()).unwrap();
        assert_eq!(tokenizer, 3);
        assert!(trust);

        let calls = provider.tokenizer_calls();
        assert_eq!(calls.len(), 2);
        assert!(!calls[0].trust_remote_code);
        assert!(calls[1].trust_remote_code);
    }

    #[test]
    fn tokenizer_success_keeps_configured_trust() {
        let provider = ScriptedProvider::new(vec![], vec![Ok(3)]);

        let (_, trust) = load_tokenizer(&provider, &preferred()).unwrap();
        assert!(!trust);
        assert_eq!(provider.tokenizer_calls().len(), 1);
    }

    #[test]
    fn tokenizer_double_failure_is_fatal() {
        let provider = ScriptedProvider::new(
            vec![],
            vec![
                Err(Error::Tokenizer("bad".into())),
                Err(Error::Tokenizer("still bad".into())),
            ],
        );

        assert!(load_tokenizer(&provider, &preferred()).is_err());
        assert_eq!(provider.tokenizer_calls().len(), 2);
    }
}
