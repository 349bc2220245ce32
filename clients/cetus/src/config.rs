use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api-sui.cetus.zone/v2/sui";

/// Configuration for CetusClient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CetusClientConfig {
    /// Base URL for API endpoints, without the trailing `/statistics_pools`
    pub base_url: String,
}

impl Default for CetusClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}
