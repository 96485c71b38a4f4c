//! Vikhr-Nemo service
//!
//! ```text
//! cargo run --bin serve-vikhr --features candle
//!
//! curl http://localhost:8082/generate_vikhr \
//!   -H "Content-Type: application/json" \
//!   -d '{"prompt": "Привет!", "temperature": 0.3}'
//! ```

use hearth_serve::bootstrap;
use hearth_vikhr::MistralTemplate;

#[tokio::main]
async fn main() -> hearth::Result<()> {
    bootstrap::run(hearth_vikhr::preset(), Box::new(MistralTemplate)).await
}
