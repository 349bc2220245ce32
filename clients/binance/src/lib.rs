mod config;
mod query;
mod spot;
mod types;

pub use config::BinanceSpotClientConfig;
pub use spot::BinanceSpotClient;
pub use types::parse_klines;
