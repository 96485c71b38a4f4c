//! Mistral instruct template

use hearth::{ChatMessage, ChatTemplate};

/// Mistral instruct chat template (v1/v2/v3, also Nemo derivatives).
///
/// ```text
/// [INST] {system + user content} [/INST]{assistant content}</s>
/// ```
///
/// A system message is folded into the following user turn; the format
/// has no separate system slot.
pub struct MistralTemplate;

impl ChatTemplate for MistralTemplate {
    fn apply(&self, messages: &[ChatMessage]) -> String {
        let mut prompt = String::new();
        let mut pending_system: Option<&str> = None;

        for msg in messages {
            match msg.role.as_str() {
                "system" => pending_system = Some(&msg.content),
                "assistant" => {
                    prompt.push_str(&msg.content);
                    prompt.push_str("</s>");
                }
                _ => {
                    prompt.push_str("[INST] ");
                    if let Some(system) = pending_system.take() {
                        prompt.push_str(system);
                        prompt.push('\n');
                    }
                    prompt.push_str(&msg.content);
                    prompt.push_str(" [/INST]");
                }
            }
        }
        prompt
    }
}
