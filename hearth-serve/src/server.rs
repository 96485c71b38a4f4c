//! HTTP server implementation
//!
//! One server serves one model: a single POST route whose path is the
//! deployment's endpoint name. The runtime is shared state; generation
//! hops to the blocking pool and serializes at the engine's request
//! channel.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::signal;

use hearth_runtime::Runtime;

use crate::types::{ErrorResponse, GenerateRequest, GenerateResponse};

/// The HTTP server for one deployed model.
pub struct Server {
    endpoint: String,
    bind_addr: String,
    runtime: Arc<Runtime>,
}

/// Builder for constructing a [`Server`].
pub struct ServerBuilder {
    endpoint: String,
    bind_addr: String,
    runtime: Arc<Runtime>,
}

impl Server {
    /// Create a server builder around a loaded runtime.
    #[must_use]
    pub fn builder(runtime: Arc<Runtime>) -> ServerBuilder {
        ServerBuilder {
            endpoint: "generate".to_string(),
            bind_addr: "0.0.0.0:8080".to_string(),
            runtime,
        }
    }

    /// Bind the listener and serve until shutdown.
    ///
    /// # Errors
    /// Returns an error if the address cannot be bound or the server
    /// fails while running.
    pub async fn run(self) -> std::io::Result<()> {
        let listener = TcpListener::bind(&self.bind_addr).await?;
        tracing::info!(addr = %self.bind_addr, endpoint = %self.endpoint, "listening");
        self.run_on(listener).await
    }

    /// Serve on an already-bound listener (tests bind port 0 themselves).
    ///
    /// # Errors
    /// Returns an error if the server fails while running.
    pub async fn run_on(self, listener: TcpListener) -> std::io::Result<()> {
        let app = Router::new()
            .route(&format!("/{}", self.endpoint), post(generate))
            .with_state(self.runtime);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

impl ServerBuilder {
    /// Set the route path (without the leading slash).
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the address to bind the server to.
    #[must_use]
    pub fn bind(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = addr.into();
        self
    }

    /// Build the server.
    #[must_use]
    pub fn build(self) -> Server {
        Server {
            endpoint: self.endpoint,
            bind_addr: self.bind_addr,
            runtime: self.runtime,
        }
    }
}

/// Error returned to HTTP clients.
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// The generate handler: template, generate, respond.
async fn generate(
    State(runtime): State<Arc<Runtime>>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    if request.prompt.trim().is_empty() {
        return Err(ApiError::bad_request("prompt must not be empty"));
    }

    let params = request.sampling(runtime.defaults());
    let prompt = request.prompt.clone();
    let runtime = runtime.clone();

    let completion = tokio::task::spawn_blocking(move || runtime.chat(&prompt, &params))
        .await
        .map_err(|e| ApiError::internal(format!("generation task failed: {e}")))?
        .map_err(|e| {
            tracing::error!(error = %e, "generation failed");
            ApiError::internal(e.to_string())
        })?;

    tracing::info!(
        prompt_tokens = completion.prompt_tokens,
        completion_tokens = completion.completion_tokens,
        "request served"
    );

    Ok(Json(GenerateResponse {
        response: completion.text,
    }))
}

/// Resolve on ctrl-c or SIGTERM so in-flight requests finish first.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("signal received, starting graceful shutdown");
}
