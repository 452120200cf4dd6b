pub mod cleanup;
pub mod entry;
pub mod maintain;
pub mod stats;

use acumba_cache_domain::Parameters;
use serde_json::Value;

/// Parses `key=value`. The value is taken as JSON when it parses (numbers,
/// booleans, arrays, objects) and as a plain string otherwise.
pub fn parse_param(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty parameter name in '{raw}'"));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

pub fn to_parameters(pairs: Vec<(String, Value)>) -> Parameters {
    pairs.into_iter().collect()
}
