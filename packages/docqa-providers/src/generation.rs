use color_eyre::{Result, eyre};
use serde_json::Value;

pub async fn generate(
	cfg: &docqa_config::GenerationProviderConfig,
	question: &str,
	context: &str,
) -> Result<String> {
	let client = crate::provider_client(&cfg.api_key, &cfg.default_headers, cfg.timeout_ms)?;
	let body = serde_json::json!({
		"model": cfg.model,
		"input": format!("question: {question} context: {context}"),
		"max_tokens": cfg.max_answer_tokens,
	});
	let json: Value = client
		.post(format!("{}{}", cfg.api_base, cfg.path))
		.json(&body)
		.send()
		.await?
		.error_for_status()?
		.json()
		.await?;

	parse_generation_response(json)
}

fn parse_generation_response(json: Value) -> Result<String> {
	if let Some(answer) = json.get("answer").and_then(|v| v.as_str()) {
		return Ok(answer.to_string());
	}
	if let Some(text) = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("text"))
		.and_then(|v| v.as_str())
	{
		return Ok(text.to_string());
	}

	Err(eyre::eyre!("Generation response is missing answer text."))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_answer_field() {
		let json = serde_json::json!({ "answer": "The sky is blue." });
		assert_eq!(parse_generation_response(json).expect("parse failed"), "The sky is blue.");
	}

	#[test]
	fn parses_completion_choices() {
		let json = serde_json::json!({ "choices": [{ "text": "Blue." }] });
		assert_eq!(parse_generation_response(json).expect("parse failed"), "Blue.");
	}

	#[test]
	fn rejects_empty_payload() {
		assert!(parse_generation_response(serde_json::json!({})).is_err());
	}
}
