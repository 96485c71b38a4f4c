//! Chat template for `YandexGPT` instruct models

use hearth::{ChatMessage, ChatTemplate};

/// `YandexGPT` 5 instruct chat template.
///
/// ```text
/// {system content}
///
///  Пользователь: {content}
///
///  Ассистент: {content}
///
///  Пользователь: {content}
///
///  Ассистент:[SEP]
/// ```
///
/// Role labels are Russian and carry a leading space, matching the
/// tokenizer's vocabulary; the final assistant label is followed by the
/// `[SEP]` generation cue.
pub struct YandexGptTemplate;

impl ChatTemplate for YandexGptTemplate {
    fn apply(&self, messages: &[ChatMessage]) -> String {
        let mut prompt = String::new();
        for msg in messages {
            match msg.role.as_str() {
                "system" => {
                    prompt.push_str(&msg.content);
                    prompt.push_str("\n\n");
                }
                "assistant" => {
                    prompt.push_str(" Ассистент: ");
                    prompt.push_str(&msg.content);
                    prompt.push_str("\n\n");
                }
                _ => {
                    prompt.push_str(" Пользователь: ");
                    prompt.push_str(&msg.content);
                    prompt.push_str("\n\n");
                }
            }
        }
        prompt.push_str(" Ассистент:[SEP]");
        prompt
    }
}
