use color_eyre::{Result, eyre};
use serde_json::Value;

pub async fn summarize(
	cfg: &docqa_config::SummarizerProviderConfig,
	text: &str,
	src_lang: &str,
	max_length: u32,
	min_length: u32,
) -> Result<String> {
	let client = crate::provider_client(&cfg.api_key, &cfg.default_headers, cfg.timeout_ms)?;
	let body = serde_json::json!({
		"model": cfg.model,
		"inputs": text,
		"parameters": {
			"src_lang": src_lang,
			"max_length": max_length,
			"min_length": min_length,
		},
	});
	let json: Value = client
		.post(format!("{}{}", cfg.api_base, cfg.path))
		.json(&body)
		.send()
		.await?
		.error_for_status()?
		.json()
		.await?;

	parse_summary_response(json)
}

fn parse_summary_response(json: Value) -> Result<String> {
	// Summarization endpoints return either a bare object or a one-element
	// array of objects carrying summary_text.
	let object = match &json {
		Value::Array(items) => items.first(),
		other => Some(other),
	};
	let summary = object
		.and_then(|item| item.get("summary_text"))
		.and_then(|v| v.as_str())
		.ok_or_else(|| eyre::eyre!("Summarizer response is missing summary_text."))?;

	Ok(summary.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_array_shaped_response() {
		let json = serde_json::json!([{ "summary_text": "Short." }]);
		let parsed = parse_summary_response(json).expect("parse failed");
		assert_eq!(parsed, "Short.");
	}

	#[test]
	fn parses_object_shaped_response() {
		let json = serde_json::json!({ "summary_text": "Short." });
		assert_eq!(parse_summary_response(json).expect("parse failed"), "Short.");
	}

	#[test]
	fn rejects_missing_summary() {
		assert!(parse_summary_response(serde_json::json!({})).is_err());
	}
}
