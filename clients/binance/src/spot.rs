use anyhow::{bail, Result};
use tracing::debug;
use utils::Candle;

use crate::config::BinanceSpotClientConfig;
use crate::query;
use crate::types::parse_klines;

/// Client for the public Binance spot market-data API.
pub struct BinanceSpotClient {
    client: reqwest::Client,
    base_url: String,
}

impl BinanceSpotClient {
    pub fn new(client: reqwest::Client, config: BinanceSpotClientConfig) -> Self {
        Self {
            client,
            base_url: config.base_url,
        }
    }

    /// Fetches the latest `limit` candles for `symbol` at `interval`, oldest first.
    ///
    /// A non-200 response is returned as an error carrying the status and body.
    pub async fn get_klines(
        &self,
        symbol: &str,
        interval: &str,
        limit: u16,
    ) -> Result<Vec<Candle>> {
        let url = query::klines_url(&self.base_url, symbol, interval, limit);
        debug!(%url, "GET klines");
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        debug!(%status, "klines response");
        if status != reqwest::StatusCode::OK {
            bail!("klines request failed: code:{} resp:{}", status.as_u16(), body);
        }
        parse_klines(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> BinanceSpotClient {
        BinanceSpotClient::new(
            reqwest::Client::new(),
            BinanceSpotClientConfig {
                base_url: server.url(),
            },
        )
    }

    #[tokio::test]
    async fn get_klines_sends_query_and_parses_rows() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v3/klines")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("symbol".into(), "ETHUSDT".into()),
                Matcher::UrlEncoded("interval".into(), "1d".into()),
                Matcher::UrlEncoded("limit".into(), "30".into()),
            ]))
            .with_status(200)
            .with_body(r#"[[1700000000000,"1","2","0.5","1.5","42",1700086399999]]"#)
            .create_async()
            .await;

        let candles = client_for(&server)
            .get_klines("ETHUSDT", "1d", 30)
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].close, 1.5);
        assert_eq!(candles[0].volume, 42.0);
    }

    #[tokio::test]
    async fn non_200_is_an_error_with_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v3/klines")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"code":-1121,"msg":"Invalid symbol."}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .get_klines("NOPE", "1d", 30)
            .await
            .unwrap_err();
        let text = err.to_string();
        assert!(text.contains("400"));
        assert!(text.contains("Invalid symbol"));
    }
}
