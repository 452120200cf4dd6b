use acumba_cache_domain::{CacheError, Parameters};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt::Write;

/// Endpoint names are logical operation names such as `get_subscribers`.
pub fn validate_endpoint_name(endpoint_name: &str) -> Result<(), CacheError> {
    if endpoint_name.is_empty() {
        return Err(CacheError::InvalidInput(
            "endpoint name cannot be empty".to_string(),
        ));
    }
    if endpoint_name
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(CacheError::InvalidInput(format!(
            "endpoint name contains whitespace or control characters: {:?}",
            endpoint_name
        )));
    }
    Ok(())
}

/// Stable JSON text for a value: object keys sorted at every depth, no
/// insignificant whitespace. Independent of serde_json's map ordering.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

pub fn canonicalize_parameters(parameters: &Parameters) -> String {
    let mut out = String::from("{");
    for (i, (key, value)) in parameters.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_key(key, &mut out);
        write_canonical(value, &mut out);
    }
    out.push('}');
    out
}

/// SHA-256 over the endpoint name and the canonical parameters, as 64
/// lowercase hex characters.
pub fn fingerprint(endpoint_name: &str, parameters: &Parameters) -> Result<String, CacheError> {
    validate_endpoint_name(endpoint_name)?;

    let mut hasher = Sha256::new();
    hasher.update(endpoint_name.as_bytes());
    hasher.update(b"\n");
    hasher.update(canonicalize_parameters(parameters).as_bytes());
    let digest = hasher.finalize();

    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest.iter() {
        let _ = write!(hex, "{:02x}", byte);
    }
    Ok(hex)
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_key(key, out);
                write_canonical(&map[key], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

fn write_key(key: &str, out: &mut String) {
    out.push_str(&Value::from(key).to_string());
    out.push(':');
}
