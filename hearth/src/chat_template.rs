//! Chat templates for converting messages to model prompts
//!
//! The [`ChatTemplate`] trait turns a sequence of role-tagged
//! [`ChatMessage`]s into the prompt string a model family expects. Each
//! deployment crate provides the concrete template for its model; the
//! serve crate only ever calls `template.apply(messages)`.

/// A role-tagged chat message.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// `"system"`, `"user"`, or `"assistant"`.
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Converts role-tagged messages into a model-ready prompt string.
pub trait ChatTemplate: Send + Sync {
    /// Apply the template, producing a prompt that ends with the model's
    /// generation cue.
    fn apply(&self, messages: &[ChatMessage]) -> String;
}

impl ChatTemplate for Box<dyn ChatTemplate> {
    fn apply(&self, messages: &[ChatMessage]) -> String {
        (**self).apply(messages)
    }
}

/// Fallback template: concatenates message contents with no special tokens.
///
/// Used by the generic service when the model family is unknown, and by
/// tests.
pub struct RawTemplate;

impl ChatTemplate for RawTemplate {
    fn apply(&self, messages: &[ChatMessage]) -> String {
        messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_template_joins_contents() {
        let msgs = vec![ChatMessage::user("Hello"), ChatMessage::assistant("Hi!")];
        assert_eq!(RawTemplate.apply(&msgs), "Hello\nHi!");
    }

    #[test]
    fn message_constructors_set_roles() {
        assert_eq!(ChatMessage::system("x").role, "system");
        assert_eq!(ChatMessage::user("x").role, "user");
        assert_eq!(ChatMessage::assistant("x").role, "assistant");
    }
}
