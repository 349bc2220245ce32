use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope returned by `/statistics_pools`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StatisticsPoolsResponse {
    /// Provider status code; 200 on success
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<PoolSnapshot>,
}

/// One poll of the pool statistics endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolSnapshot {
    #[serde(default)]
    pub pools: Vec<PoolStat>,
}

/// Statistics for one liquidity pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolStat {
    /// Pool symbol, e.g. "SUI-USDC"
    pub symbol: String,
    /// Total APR as a fraction (0.12 = 12%)
    #[serde(deserialize_with = "de_lenient_f64")]
    pub total_apr: f64,
    /// Per-rewarder APR as percent strings, e.g. ["5.2%", "0%"]
    #[serde(default, deserialize_with = "de_lenient_strings")]
    pub rewarder_apr: Vec<String>,
}

/// Accepts a JSON number or a numeric string.
fn de_lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom(format!("number out of range: {}", n))),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| de::Error::custom(format!("invalid number {:?}: {}", s, e))),
        other => Err(de::Error::custom(format!("expected number, got {}", other))),
    }
}

/// Accepts null (as empty), or an array whose entries are strings, numbers or null.
fn de_lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .map(|v| match v {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_accepts_string_apr_and_null_rewarders() {
        let pool: PoolStat = serde_json::from_str(
            r#"{"symbol":"SUI-USDC","total_apr":"0.1234","rewarder_apr":null,"vol":"1"}"#,
        )
        .unwrap();
        assert_eq!(pool.total_apr, 0.1234);
        assert!(pool.rewarder_apr.is_empty());
    }

    #[test]
    fn rewarder_entries_are_normalised_to_strings() {
        let pool: PoolStat = serde_json::from_str(
            r#"{"symbol":"A","total_apr":0.5,"rewarder_apr":["5%",null,3]}"#,
        )
        .unwrap();
        assert_eq!(pool.rewarder_apr, vec!["5%", "", "3"]);
    }

    #[test]
    fn missing_rewarder_field_is_empty() {
        let pool: PoolStat = serde_json::from_str(r#"{"symbol":"A","total_apr":0.5}"#).unwrap();
        assert!(pool.rewarder_apr.is_empty());
    }
}
