//! The engine handle
//!
//! Wraps a loaded [`Model`] in a long-lived worker thread. Models need
//! `&mut self` to generate (the KV cache is internal state), so the worker
//! owns the model outright and processes requests sequentially; callers
//! block on a per-request response channel.

use std::sync::mpsc;
use std::sync::Mutex;
use std::thread::{self, JoinHandle};

use hearth::{Completion, Error, Model, Result, SamplingParams};

/// A generation request submitted to the worker thread.
struct GenerationRequest {
    prompt: String,
    params: SamplingParams,
    response_tx: mpsc::Sender<Result<Completion>>,
}

/// Handle to the engine's worker thread.
///
/// The sender sits behind a mutex so the handle can be shared across
/// threads; it is held only long enough to enqueue a request, never for
/// the duration of generation. Dropping the handle closes the channel,
/// which ends the worker loop.
pub struct Engine {
    request_tx: Mutex<mpsc::Sender<GenerationRequest>>,
    max_model_len: usize,
    _worker: JoinHandle<()>,
}

impl Engine {
    /// Spawn the worker thread and hand it the model.
    pub fn new<M: Model + 'static>(model: M) -> Self {
        let max_model_len = model.max_model_len();
        let (request_tx, request_rx) = mpsc::channel::<GenerationRequest>();

        let worker = thread::spawn(move || {
            worker_loop(model, request_rx);
        });

        Self {
            request_tx: Mutex::new(request_tx),
            max_model_len,
            _worker: worker,
        }
    }

    /// The context length the model was loaded with.
    #[must_use]
    pub fn max_model_len(&self) -> usize {
        self.max_model_len
    }

    /// Generate a completion, blocking until the worker finishes.
    ///
    /// # Errors
    /// Returns the model's error, or [`Error::Engine`] if the worker
    /// thread is gone (it panicked, or the process is shutting down).
    pub fn generate(&self, prompt: &str, params: &SamplingParams) -> Result<Completion> {
        let (response_tx, response_rx) = mpsc::channel();
        let request = GenerationRequest {
            prompt: prompt.to_string(),
            params: params.clone(),
            response_tx,
        };

        self.request_tx
            .lock()
            .map_err(|_| Error::Engine("engine request channel poisoned".into()))?
            .send(request)
            .map_err(|_| Error::Engine("engine worker has shut down".into()))?;
        response_rx
            .recv()
            .map_err(|_| Error::Engine("engine worker dropped the request".into()))?
    }
}

/// The worker thread's main loop. Processes requests sequentially.
fn worker_loop<M: Model>(mut model: M, request_rx: mpsc::Receiver<GenerationRequest>) {
    while let Ok(request) = request_rx.recv() {
        let result = model.complete(&request.prompt, &request.params);
        // The caller may have given up waiting; nothing to do then.
        let _ = request.response_tx.send(result);
    }
}

#[cfg(test)]
mod tests {
    use hearth::FinishReason;

    use super::*;

    struct EchoModel;

    impl Model for EchoModel {
        fn complete(&mut self, prompt: &str, params: &SamplingParams) -> Result<Completion> {
            if prompt == "fail" {
                return Err(Error::Engine("scripted failure".into()));
            }
            Ok(Completion {
                text: format!("echo: {prompt}"),
                prompt_tokens: prompt.split_whitespace().count(),
                completion_tokens: params.max_tokens.min(3),
                finish_reason: FinishReason::Stop,
            })
        }

        fn max_model_len(&self) -> usize {
            2048
        }
    }

    #[test]
    fn generate_round_trips_through_the_worker() {
        let engine = Engine::new(EchoModel);
        let completion = engine
            .generate("hello world", &SamplingParams::default())
            .unwrap();
        assert_eq!(completion.text, "echo: hello world");
        assert_eq!(completion.prompt_tokens, 2);
        assert_eq!(engine.max_model_len(), 2048);
    }

    #[test]
    fn worker_survives_a_failed_request() {
        let engine = Engine::new(EchoModel);
        assert!(engine.generate("fail", &SamplingParams::default()).is_err());
        // The worker must still be serving afterwards.
        assert!(engine.generate("ok", &SamplingParams::default()).is_ok());
    }
}
