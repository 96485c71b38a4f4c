//! Chat template for the `DeepSeek` R1 family

use hearth::{ChatMessage, ChatTemplate};

/// `DeepSeek` R1 chat template (shared with V3).
///
/// ```text
/// {system content}
///
/// <｜User｜>{content}
/// <｜Assistant｜>{content}<｜end▁of▁sentence｜><｜User｜>...
/// <｜Assistant｜>
/// ```
///
/// The role markers use fullwidth vertical lines (`｜`, U+FF5C) and the
/// lower one-eighth block (`▁`, U+2581); plain ASCII pipes will not match
/// the tokenizer's special tokens.
pub struct DeepSeekTemplate;

impl ChatTemplate for DeepSeekTemplate {
    fn apply(&self, messages: &[ChatMessage]) -> String {
        let mut prompt = String::new();
        for msg in messages {
            match msg.role.as_str() {
                "system" => {
                    prompt.push_str(&msg.content);
                    prompt.push_str("\n\n");
                }
                "assistant" => {
                    prompt.push_str("<｜Assistant｜>");
                    prompt.push_str(&msg.content);
                    prompt.push_str("<｜end▁of▁sentence｜>");
                }
                // user and anything unrecognized
                _ => {
                    prompt.push_str("<｜User｜>");
                    prompt.push_str(&msg.content);
                    prompt.push('\n');
                }
            }
        }
        prompt.push_str("<｜Assistant｜>");
        prompt
    }
}
