//! T-lite service
//!
//! ```text
//! cargo run --bin serve-tlite --features candle
//!
//! curl http://localhost:8083/generate_tlite \
//!   -H "Content-Type: application/json" \
//!   -d '{"prompt": "Привет!", "temperature": 0.3}'
//! ```

use hearth_tlite::ChatMLTemplate;
use hearth_serve::bootstrap;

#[tokio::main]
async fn main() -> hearth::Result<()> {
    bootstrap::run(hearth_tlite::preset(), Box::new(ChatMLTemplate)).await
}
