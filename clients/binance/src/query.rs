use url::form_urlencoded;

/// Encode params as query string (URL-encoded).
pub(crate) fn build_query(params: &[(&str, String)]) -> String {
    let mut ser = form_urlencoded::Serializer::new(String::new());
    for (k, v) in params {
        ser.append_pair(k, v);
    }
    ser.finish()
}

/// Full klines URL: `{base_url}/api/v3/klines?symbol=..&interval=..&limit=..`.
pub(crate) fn klines_url(base_url: &str, symbol: &str, interval: &str, limit: u16) -> String {
    let params: Vec<(&str, String)> = vec![
        ("symbol", symbol.to_string()),
        ("interval", interval.to_string()),
        ("limit", limit.to_string()),
    ];
    format!(
        "{}/api/v3/klines?{}",
        base_url.trim_end_matches('/'),
        build_query(&params)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn klines_url_encodes_params_in_order() {
        let url = klines_url("https://data-api.binance.vision/", "BTCUSDT", "4h", 30);
        assert_eq!(
            url,
            "https://data-api.binance.vision/api/v3/klines?symbol=BTCUSDT&interval=4h&limit=30"
        );
    }
}
