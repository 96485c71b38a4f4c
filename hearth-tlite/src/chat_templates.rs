//! `ChatML` template for Qwen-derived models

use hearth::{ChatMessage, ChatTemplate};

/// `ChatML` template used by Qwen2/2.5 derivatives such as T-lite.
///
/// ```text
/// <|im_start|>system
/// {content}<|im_end|>
/// <|im_start|>user
/// {content}<|im_end|>
/// <|im_start|>assistant
/// ```
pub struct ChatMLTemplate;

impl ChatTemplate for ChatMLTemplate {
    fn apply(&self, messages: &[ChatMessage]) -> String {
        let mut prompt = String::new();
        for msg in messages {
            prompt.push_str("<|im_start|>");
            prompt.push_str(&msg.role);
            prompt.push('\n');
            prompt.push_str(&msg.content);
            prompt.push_str("<|im_end|>\n");
        }
        prompt.push_str("<|im_start|>assistant\n");
        prompt
    }
}
