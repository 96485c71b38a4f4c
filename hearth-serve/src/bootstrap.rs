//! Shared startup for the service binaries
//!
//! Every service goes through the same phases, in order: parse
//! environment overrides, run the tokenizer ladder, run the engine ladder
//! (carrying the tokenizer's effective trust flag forward), construct the
//! runtime, bind the server. A failure anywhere before the bind aborts
//! the process; the service never comes up without its model.

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hearth::{ChatTemplate, Preset, Result};
use hearth_candle::CandleProvider;
use hearth_runtime::{Engine, Runtime};

use crate::Server;

/// Environment overrides shared by every service.
///
/// Each maps to one of the deployment environment variables; unset means
/// "use the preset value".
#[derive(clap::Args, Debug, Default)]
pub struct ServiceArgs {
    /// Fraction of accelerator memory the engine may claim, in (0, 1]
    #[arg(long, env = "GPU_MEMORY_UTILIZATION")]
    pub gpu_memory_utilization: Option<f32>,

    /// Maximum context length
    #[arg(long, env = "MAX_MODEL_LEN")]
    pub max_model_len: Option<usize>,

    /// Attempt architectures outside the known-supported set
    #[arg(long, env = "TRUST_REMOTE_CODE")]
    pub trust_remote_code: Option<bool>,

    /// Interface to bind
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,
}

#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    common: ServiceArgs,
}

/// Fold environment overrides into the deployment preset.
#[must_use]
pub fn apply_overrides(mut preset: Preset, args: &ServiceArgs) -> Preset {
    if let Some(fraction) = args.gpu_memory_utilization {
        preset.gpu_memory_utilization = fraction;
    }
    if let Some(max_model_len) = args.max_model_len {
        preset.max_model_len = Some(max_model_len);
    }
    if let Some(trust) = args.trust_remote_code {
        preset.trust_remote_code = trust;
    }
    if let Some(port) = args.port {
        preset.port = port;
    }
    preset
}

/// Install the fmt subscriber, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Parse the standard arguments and run the service to completion.
///
/// # Errors
/// Returns an error if any startup phase fails; the binary exits nonzero
/// without ever binding the listener.
pub async fn run(preset: Preset, template: Box<dyn ChatTemplate>) -> Result<()> {
    let cli = Cli::parse();
    run_with_args(preset, template, &cli.common).await
}

/// Run the service with already-parsed arguments (the generic binary
/// parses an extended set itself).
///
/// # Errors
/// Returns an error if any startup phase fails.
pub async fn run_with_args(
    preset: Preset,
    template: Box<dyn ChatTemplate>,
    args: &ServiceArgs,
) -> Result<()> {
    init_tracing();
    let preset = apply_overrides(preset, args);

    info!(
        title = %preset.api_title,
        model = %preset.model,
        gpu_memory_utilization = preset.gpu_memory_utilization,
        max_model_len = ?preset.max_model_len,
        endpoint = %preset.endpoint,
        "starting service"
    );

    let provider = CandleProvider::new();
    let mut config = preset.engine_config();

    // Startup phase. Blocking is fine here: the listener is not up yet and
    // nothing else is running.
    let fallback = preset.fallback.clone();
    let (model, used_config) = tokio::task::spawn_blocking(move || {
        let (_tokenizer, effective_trust) = hearth::load_tokenizer(&provider, &config)?;
        if effective_trust {
            config = config.with_trust_remote_code(true);
        }
        hearth::load_model(&provider, &config, fallback.as_ref())
    })
    .await
    .map_err(|e| hearth::Error::Engine(format!("startup task failed: {e}")))??;

    info!(
        max_model_len = ?used_config.max_model_len,
        trust_remote_code = used_config.trust_remote_code,
        "startup complete"
    );

    let engine = Engine::new(model);
    let mut runtime = Runtime::new(engine, template, preset.sampling.clone());
    if let Some(system) = &preset.system_prompt {
        runtime = runtime.with_system_prompt(system.clone());
    }

    let mut server_config = preset.server_config();
    if let Some(host) = &args.host {
        server_config.host.clone_from(host);
    }

    Server::builder(Arc::new(runtime))
        .endpoint(&preset.endpoint)
        .bind(server_config.bind_addr())
        .build()
        .run()
        .await
        .map_err(hearth::Error::Io)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_the_given_fields() {
        let preset = hearth::Preset::new("org/model", "generate", 8080);
        let args = ServiceArgs {
            max_model_len: Some(2048),
            port: Some(9000),
            ..ServiceArgs::default()
        };

        let preset = apply_overrides(preset, &args);
        assert_eq!(preset.max_model_len, Some(2048));
        assert_eq!(preset.port, 9000);
        // Untouched preset values survive.
        assert!((preset.gpu_memory_utilization - 0.85).abs() < f32::EPSILON);
        assert!(!preset.trust_remote_code);
    }

    #[test]
    fn env_backed_args_parse_from_the_command_line() {
        let cli = Cli::parse_from([
            "serve",
            "--gpu-memory-utilization",
            "0.7",
            "--trust-remote-code",
            "true",
        ]);
        assert_eq!(cli.common.gpu_memory_utilization, Some(0.7));
        assert_eq!(cli.common.trust_remote_code, Some(true));
        assert!(cli.common.port.is_none());
    }
}
