//! Generic service: serve any model named by `MODEL_NAME`
//!
//! The per-model binaries carry their deployment constants; this one
//! assembles a preset from the environment instead and picks a chat
//! template from the model id, falling back to raw concatenation for
//! unknown families.
//!
//! ```text
//! MODEL_NAME=org/model cargo run --bin serve-generic --features candle
//!
//! curl http://localhost:8080/generate \
//!   -H "Content-Type: application/json" \
//!   -d '{"prompt": "Hello!", "temperature": 0.3}'
//! ```

use clap::Parser;

use hearth::{ChatTemplate, Preset, RawTemplate};
use hearth_deepseek::DeepSeekTemplate;
use hearth_gptoss::HarmonyTemplate;
use hearth_serve::bootstrap::{self, ServiceArgs};
use hearth_tlite::ChatMLTemplate;
use hearth_vikhr::MistralTemplate;
use hearth_yagpt::YandexGptTemplate;

/// Serve one model behind one generate endpoint
#[derive(Parser, Debug)]
#[command(name = "serve-generic", version)]
struct Cli {
    /// Model to load (Hugging Face repo id or local directory)
    #[arg(long, env = "MODEL_NAME")]
    model: String,

    /// Route path for the generate endpoint, without the leading slash
    #[arg(long, env = "ENDPOINT_NAME", default_value = "generate")]
    endpoint: String,

    /// Service title used in startup logs
    #[arg(long, env = "API_TITLE")]
    api_title: Option<String>,

    #[command(flatten)]
    common: ServiceArgs,
}

/// Pick a chat template from the model id.
fn select_template(model: &str) -> Box<dyn ChatTemplate> {
    let id = model.to_lowercase();
    if id.contains("deepseek") {
        Box::new(DeepSeekTemplate)
    } else if id.contains("gpt-oss") {
        Box::new(HarmonyTemplate)
    } else if id.contains("qwen") || id.contains("t-lite") {
        Box::new(ChatMLTemplate)
    } else if id.contains("mistral") || id.contains("nemo") || id.contains("vikhr") {
        Box::new(MistralTemplate)
    } else if id.contains("yandexgpt") {
        Box::new(YandexGptTemplate)
    } else {
        Box::new(RawTemplate)
    }
}

#[tokio::main]
async fn main() -> hearth::Result<()> {
    let cli = Cli::parse();

    let template = select_template(&cli.model);
    let mut preset = Preset::new(cli.model, cli.endpoint, 8080);
    if let Some(api_title) = cli.api_title {
        preset = preset.with_api_title(api_title);
    }

    bootstrap::run_with_args(preset, template, &cli.common).await
}
