//! `YandexGPT` service
//!
//! ```text
//! cargo run --bin serve-yagpt --features candle
//!
//! curl http://localhost:8081/generate_yagpt \
//!   -H "Content-Type: application/json" \
//!   -d '{"prompt": "Привет!", "temperature": 0.3}'
//! ```

use hearth_serve::bootstrap;
use hearth_yagpt::YandexGptTemplate;

#[tokio::main]
async fn main() -> hearth::Result<()> {
    bootstrap::run(hearth_yagpt::preset(), Box::new(YandexGptTemplate)).await
}
