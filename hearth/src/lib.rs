//! Hearth: single-model LLM inference services with resilient startup
//!
//! This crate provides the core types shared by every hearth service:
//! engine configuration, structured load-failure classification, the
//! resilient model loader, sampling parameters, and the traits that the
//! backend and serving crates plug into.
//!
//! Backend-specific model loading lives in separate crates; each deployed
//! model gets its own preset crate on top of this one.

pub mod chat_template;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod preset;
pub mod sampling;
pub mod tokenizer;

pub use chat_template::{ChatMessage, ChatTemplate, RawTemplate};
pub use config::{EngineConfig, FallbackPolicy, ServerConfig};
pub use error::{Error, FailureClass, Result};
pub use loader::{load_model, load_tokenizer, ModelProvider};
pub use model::{Completion, FinishReason, Model};
pub use preset::Preset;
pub use sampling::SamplingParams;
pub use tokenizer::{HfTokenizer, Tokenizer};
