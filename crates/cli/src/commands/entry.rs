use super::to_parameters;
use crate::di::UseCases;
use serde_json::Value;
use std::time::Duration;

pub async fn get(
    use_cases: &UseCases,
    endpoint: &str,
    params: Vec<(String, Value)>,
) -> anyhow::Result<()> {
    let parameters = to_parameters(params);

    match use_cases
        .response_cache
        .get::<Value>(endpoint, &parameters)
        .await?
    {
        Some(data) => println!("{}", serde_json::to_string_pretty(&data)?),
        None => eprintln!("Cache miss for {endpoint}"),
    }
    Ok(())
}

pub async fn set(
    use_cases: &UseCases,
    endpoint: &str,
    params: Vec<(String, Value)>,
    data: &str,
    ttl_secs: Option<u64>,
) -> anyhow::Result<()> {
    let parameters = to_parameters(params);
    let payload: Value = serde_json::from_str(data)
        .map_err(|e| anyhow::anyhow!("--data is not valid JSON: {e}"))?;

    use_cases
        .response_cache
        .put(
            endpoint,
            &parameters,
            &payload,
            ttl_secs.map(Duration::from_secs),
        )
        .await?;
    println!("Stored response for {endpoint}");
    Ok(())
}
