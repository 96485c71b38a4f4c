//! Chat-level inference runtime
//!
//! The [`Runtime`] wraps an [`Engine`] and a chat template, turning a
//! user prompt into a templated model prompt and a trimmed completion.
//! Each runtime serves exactly one model.

use hearth::{ChatMessage, ChatTemplate, Completion, Result, SamplingParams};

use crate::Engine;

/// Chat-level inference runtime for one deployed model.
pub struct Runtime {
    engine: Engine,
    template: Box<dyn ChatTemplate>,
    defaults: SamplingParams,
    system_prompt: Option<String>,
}

impl Runtime {
    /// Create a runtime from a loaded engine, the deployment's chat
    /// template, and its default sampling parameters.
    #[must_use]
    pub fn new(engine: Engine, template: Box<dyn ChatTemplate>, defaults: SamplingParams) -> Self {
        Self {
            engine,
            template,
            defaults,
            system_prompt: None,
        }
    }

    /// Prepend a fixed system message to every conversation.
    #[must_use]
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    /// The deployment's default sampling parameters.
    #[must_use]
    pub fn defaults(&self) -> &SamplingParams {
        &self.defaults
    }

    /// Get a reference to the underlying engine.
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Run one chat turn: template the prompt, generate, trim the output.
    ///
    /// # Errors
    /// Returns an error if generation fails.
    pub fn chat(&self, prompt: &str, params: &SamplingParams) -> Result<Completion> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system_prompt {
            messages.push(ChatMessage::system(system.clone()));
        }
        messages.push(ChatMessage::user(prompt));

        let prompt_text = self.template.apply(&messages);
        let mut completion = self.engine.generate(&prompt_text, params)?;
        completion.text = completion.text.trim().to_string();
        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use hearth::{Error, FinishReason, Model, RawTemplate};

    use super::*;

    /// Records the prompts it is asked to complete.
    struct RecordingModel {
        prompts: Arc<Mutex<Vec<String>>>,
    }

    impl Model for RecordingModel {
        fn complete(&mut self, prompt: &str, _params: &SamplingParams) -> Result<Completion> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(Completion {
                text: "  padded output \n".to_string(),
                prompt_tokens: 1,
                completion_tokens: 1,
                finish_reason: FinishReason::Stop,
            })
        }

        fn max_model_len(&self) -> usize {
            1024
        }
    }

    struct FailingModel;

    impl Model for FailingModel {
        fn complete(&mut self, _prompt: &str, _params: &SamplingParams) -> Result<Completion> {
            Err(Error::Engine("out of luck".into()))
        }

        fn max_model_len(&self) -> usize {
            1024
        }
    }

    #[test]
    fn chat_templates_the_prompt_and_trims_the_output() {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let model = RecordingModel {
            prompts: prompts.clone(),
        };
        let runtime = Runtime::new(
            Engine::new(model),
            Box::new(RawTemplate),
            SamplingParams::default(),
        );

        let completion = runtime.chat("hello", &SamplingParams::default()).unwrap();
        assert_eq!(completion.text, "padded output");
        assert_eq!(prompts.lock().unwrap().as_slice(), ["hello"]);
    }

    #[test]
    fn system_prompt_is_prepended() {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let model = RecordingModel {
            prompts: prompts.clone(),
        };
        let runtime = Runtime::new(
            Engine::new(model),
            Box::new(RawTemplate),
            SamplingParams::default(),
        )
        .with_system_prompt("You are concise.");

        runtime.chat("hi", &SamplingParams::default()).unwrap();
        assert_eq!(prompts.lock().unwrap().as_slice(), ["You are concise.\nhi"]);
    }

    #[test]
    fn engine_errors_surface_unchanged() {
        let runtime = Runtime::new(
            Engine::new(FailingModel),
            Box::new(RawTemplate),
            SamplingParams::default(),
        );
        assert!(runtime.chat("hi", &SamplingParams::default()).is_err());
    }
}
