use color_eyre::{Result, eyre};
use serde_json::Value;

/// Embeds one text. The pipeline embeds queries, full texts, and summaries
/// one at a time, so the request carries a single input string and the
/// response is expected to hold exactly one vector.
pub async fn embed(cfg: &docqa_config::EmbeddingProviderConfig, text: &str) -> Result<Vec<f32>> {
	let client = crate::provider_client(&cfg.api_key, &cfg.default_headers, cfg.timeout_ms)?;
	let body = serde_json::json!({
		"model": cfg.model,
		"input": text,
		"dimensions": cfg.dimensions,
	});
	let json: Value = client
		.post(format!("{}{}", cfg.api_base, cfg.path))
		.json(&body)
		.send()
		.await?
		.error_for_status()?
		.json()
		.await?;

	parse_embedding(&json)
}

fn parse_embedding(json: &Value) -> Result<Vec<f32>> {
	let entry = json
		.get("data")
		.and_then(Value::as_array)
		.and_then(|data| data.first())
		.ok_or_else(|| eyre::eyre!("Embedding response carries no data entries."))?;
	let components = entry
		.get("embedding")
		.and_then(Value::as_array)
		.ok_or_else(|| eyre::eyre!("Embedding entry has no embedding array."))?;

	components
		.iter()
		.map(|component| {
			component
				.as_f64()
				.map(|value| value as f32)
				.ok_or_else(|| eyre::eyre!("Embedding component is not numeric."))
		})
		.collect()
}
