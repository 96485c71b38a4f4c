//! Harmony chat template for the gpt-oss family

use hearth::{ChatMessage, ChatTemplate};

/// Harmony template used by gpt-oss models.
///
/// ```text
/// <|start|>system<|message|>{content}<|end|>
/// <|start|>user<|message|>{content}<|end|>
/// <|start|>assistant
/// ```
///
/// (Rendered without the line breaks; the tokens abut each other.)
pub struct HarmonyTemplate;

impl ChatTemplate for HarmonyTemplate {
    fn apply(&self, messages: &[ChatMessage]) -> String {
        let mut prompt = String::new();
        for msg in messages {
            prompt.push_str("<|start|>");
            prompt.push_str(&msg.role);
            prompt.push_str("<|message|>");
            prompt.push_str(&msg.content);
            prompt.push_str("<|end|>");
        }
        prompt.push_str("<|start|>assistant");
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_user_turn() {
        let prompt = HarmonyTemplate.apply(&[ChatMessage::user("Hello")]);
        assert_eq!(prompt, "<|start|>user<|message|>Hello<|end|><|start|>assistant");
    }

    #[test]
    fn system_and_user_turns_keep_their_roles() {
        let prompt = HarmonyTemplate.apply(&[
            ChatMessage::system("You are helpful."),
            ChatMessage::user("Hi"),
        ]);
        assert_eq!(
            prompt,
            concat!(
                "<|start|>system<|message|>You are helpful.<|end|>",
                "<|start|>user<|message|>Hi<|end|>",
                "<|start|>assistant",
            )
        );
    }
}
