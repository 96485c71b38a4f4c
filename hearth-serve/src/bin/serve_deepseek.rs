//! `DeepSeek` R1 service
//!
//! ```text
//! cargo run --bin serve-deepseek --features candle
//!
//! curl http://localhost:8085/generate_deepseek \
//!   -H "Content-Type: application/json" \
//!   -d '{"prompt": "Привет!", "temperature": 0.3}'
//! ```

use hearth_deepseek::DeepSeekTemplate;
use hearth_serve::bootstrap;

#[tokio::main]
async fn main() -> hearth::Result<()> {
    bootstrap::run(hearth_deepseek::preset(), Box::new(DeepSeekTemplate)).await
}
