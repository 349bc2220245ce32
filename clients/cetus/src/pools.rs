use anyhow::{anyhow, bail, Context, Result};
use tracing::debug;

use crate::config::CetusClientConfig;
use crate::types::{PoolSnapshot, StatisticsPoolsResponse};

/// Provider success code embedded in the response body.
const SUCCESS_CODE: i64 = 200;

/// Client for the Cetus pool statistics API.
pub struct CetusClient {
    client: reqwest::Client,
    base_url: String,
}

impl CetusClient {
    pub fn new(client: reqwest::Client, config: CetusClientConfig) -> Self {
        Self {
            client,
            base_url: config.base_url,
        }
    }

    /// Fetches all pools ordered by descending volume.
    ///
    /// Fails on a non-200 HTTP status, an unparsable body, or a body whose
    /// `code` is not 200.
    pub async fn get_statistics_pools(&self) -> Result<PoolSnapshot> {
        let url = url::Url::parse_with_params(
            &format!("{}/statistics_pools", self.base_url.trim_end_matches('/')),
            &[("order_by", "-vol")],
        )?;
        debug!(%url, "GET statistics_pools");
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        debug!(%status, "statistics_pools response");
        if status != reqwest::StatusCode::OK {
            bail!("net error: code:{} resp:{}", status.as_u16(), body);
        }

        let parsed: StatisticsPoolsResponse =
            serde_json::from_str(&body).context("statistics_pools body is malformed")?;
        if parsed.code != SUCCESS_CODE {
            bail!(
                "statistics_pools returned code {}: {}",
                parsed.code,
                parsed.msg.unwrap_or_default()
            );
        }
        parsed
            .data
            .ok_or_else(|| anyhow!("statistics_pools returned code 200 without data"))
    }
}
