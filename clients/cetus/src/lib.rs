mod config;
mod pools;
mod types;

pub use config::CetusClientConfig;
pub use pools::CetusClient;
pub use types::{PoolSnapshot, PoolStat};
