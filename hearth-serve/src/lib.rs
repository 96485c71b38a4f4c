//! Hearth serve: the HTTP layer for single-model inference services
//!
//! This crate is a **library** plus the six service binaries. Each binary
//! performs the startup phase (tokenizer ladder, engine ladder, runtime
//! construction) and hands the runtime to [`Server`], which exposes one
//! POST route.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use hearth_runtime::{Engine, Runtime};
//! use hearth_serve::Server;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let runtime = /* startup phase: load model, build Runtime */;
//!
//!     Server::builder(Arc::new(runtime))
//!         .endpoint("generate")
//!         .bind("0.0.0.0:8080")
//!         .build()
//!         .run()
//!         .await
//! }
//! ```

#[cfg(feature = "candle")]
pub mod bootstrap;
mod server;
pub mod types;

pub use server::{Server, ServerBuilder};
