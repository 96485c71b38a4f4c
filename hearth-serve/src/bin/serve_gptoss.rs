//! gpt-oss distill service
//!
//! ```text
//! cargo run --bin serve-gptoss --features candle
//!
//! curl http://localhost:8084/generate_gptoss \
//!   -H "Content-Type: application/json" \
//!   -d '{"prompt": "Hello!", "temperature": 0.3}'
//! ```

use hearth_gptoss::HarmonyTemplate;
use hearth_serve::bootstrap;

#[tokio::main]
async fn main() -> hearth::Result<()> {
    bootstrap::run(hearth_gptoss::preset(), Box::new(HarmonyTemplate)).await
}
