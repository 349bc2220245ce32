use anyhow::{anyhow, bail, Context, Result};
use serde_json::Value;
use utils::Candle;

/// Parses a klines response body.
///
/// Each row is `[open_time, open, high, low, close, volume, ...]`; prices and
/// volume may be JSON numbers or numeric strings. Trailing fields are ignored.
pub fn parse_klines(body: &str) -> Result<Vec<Candle>> {
    let rows: Vec<Vec<Value>> =
        serde_json::from_str(body).context("klines body is not an array of arrays")?;
    rows.iter()
        .enumerate()
        .map(|(i, row)| parse_row(row).with_context(|| format!("malformed kline at row {}", i)))
        .collect()
}

fn parse_row(row: &[Value]) -> Result<Candle> {
    if row.len() < 6 {
        bail!("expected at least 6 fields, got {}", row.len());
    }
    let open_time = match &row[0] {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| anyhow!("open_time is not an integer: {}", n))?,
        Value::String(s) => s.parse::<i64>()?,
        other => bail!("open_time has unexpected type: {}", other),
    };
    Ok(Candle {
        open_time,
        open: as_f64(&row[1], "open")?,
        high: as_f64(&row[2], "high")?,
        low: as_f64(&row[3], "low")?,
        close: as_f64(&row[4], "close")?,
        volume: as_f64(&row[5], "volume")?,
    })
}

fn as_f64(value: &Value, field: &str) -> Result<f64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| anyhow!("{} is not representable as f64", field)),
        Value::String(s) => s
            .parse::<f64>()
            .map_err(|e| anyhow!("Failed to parse {}: {}", field, e)),
        other => bail!("{} has unexpected type: {}", field, other),
    }
}
