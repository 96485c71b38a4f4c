//! Hearth runtime: the process-wide engine handle
//!
//! ```text
//! Runtime        ← chat in, completion out (owns Engine + ChatTemplate)
//!   └── Engine   ← prompt in, completion out (owns the Model)
//!         └── M: Model  ← one generation at a time
//! ```
//!
//! The [`Engine`] is constructed exactly once during startup, after the
//! resilient loader has produced a model, and is shared behind `Arc` for
//! the life of the process. Its worker thread is the single writer; every
//! HTTP handler is a reader submitting requests over a channel.

mod engine;
mod runtime;

pub use engine::Engine;
pub use runtime::Runtime;
