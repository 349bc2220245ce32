use serde::{Deserialize, Serialize};

/// Public market-data host; serves spot klines without an API key.
pub const DEFAULT_BASE_URL: &str = "https://data-api.binance.vision";

/// Configuration for BinanceSpotClient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinanceSpotClientConfig {
    /// Base URL for API endpoints
    pub base_url: String,
}

impl Default for BinanceSpotClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}
