//! Error types for hearth

use thiserror::Error;

/// Result type alias using hearth's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for hearth operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("KV cache capacity: {0}")]
    KvCacheCapacity(String),

    #[error("unsupported architecture: {0}")]
    UnsupportedArchitecture(String),

    #[error("engine error: {0}")]
    Engine(String),

    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// How a failed load attempt should be handled by the loader.
///
/// Exactly one bounded retry exists per recoverable class; `Other` is
/// always fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Context/KV-cache sizing is infeasible under the current memory budget.
    ResourceExhaustion,
    /// The engine or tokenizer does not recognize the model's architecture
    /// without the remote-code opt-in.
    UnsupportedArchitecture,
    /// Anything else; not retried.
    Other,
}

impl FailureClass {
    /// Classify an error message by pattern matching its text.
    ///
    /// This is the fallback path for errors that originate outside hearth's
    /// structured taxonomy (backend libraries surfacing free-text messages).
    /// Matching against another library's message strings is brittle across
    /// versions; backends should return the structured variants instead
    /// whenever they can.
    #[must_use]
    pub fn from_message(message: &str) -> Self {
        let message = message.to_lowercase();
        if message.contains("max seq len") || message.contains("kv cache") {
            Self::ResourceExhaustion
        } else if message.contains("model type") || message.contains("architecture") {
            Self::UnsupportedArchitecture
        } else {
            Self::Other
        }
    }
}

impl Error {
    /// Classify this error for the loader's retry ladder.
    ///
    /// Structured variants win; `Engine` and `Other` payloads fall back to
    /// message-pattern classification.
    #[must_use]
    pub fn failure_class(&self) -> FailureClass {
        match self {
            Self::KvCacheCapacity(_) => FailureClass::ResourceExhaustion,
            Self::UnsupportedArchitecture(_) => FailureClass::UnsupportedArchitecture,
            Self::Engine(msg) | Self::Other(msg) => FailureClass::from_message(msg),
            _ => FailureClass::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_variants_classify_directly() {
        let e = Error::KvCacheCapacity("needs 24 GiB".into());
        assert_eq!(e.failure_class(), FailureClass::ResourceExhaustion);

        let e = Error::UnsupportedArchitecture("exotic_moe".into());
        assert_eq!(e.failure_class(), FailureClass::UnsupportedArchitecture);

        let e = Error::Config("bad fraction".into());
        assert_eq!(e.failure_class(), FailureClass::Other);
    }

    #[test]
    fn engine_messages_fall_back_to_pattern_matching() {
        let e = Error::Engine("The model's max seq len (8192) is larger than allowed".into());
        assert_eq!(e.failure_class(), FailureClass::ResourceExhaustion);

        let e = Error::Engine("KV cache does not fit in the remaining budget".into());
        assert_eq!(e.failure_class(), FailureClass::ResourceExhaustion);

        let e = Error::Engine("unrecognized model type 'exotic'".into());
        assert_eq!(e.failure_class(), FailureClass::UnsupportedArchitecture);

        let e = Error::Engine("weights file truncated".into());
        assert_eq!(e.failure_class(), FailureClass::Other);
    }
}
