use toml::Value;

use docqa_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn sample_config() -> Value {
	toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.")
}

fn section<'a>(value: &'a mut Value, path: &[&str]) -> &'a mut toml::value::Table {
	let mut current = value;

	for key in path {
		current = current
			.get_mut(*key)
			.unwrap_or_else(|| panic!("Sample config must include [{key}]."));
	}

	current.as_table_mut().expect("Section must be a table.")
}

fn config_from(value: Value) -> Config {
	let rendered = toml::to_string(&value).expect("Failed to render config.");

	toml::from_str(&rendered).expect("Rendered config must deserialize.")
}

fn assert_rejected(value: Value) {
	let cfg = config_from(value);

	assert!(matches!(docqa_config::validate(&cfg), Err(Error::Validation { .. })));
}

#[test]
fn sample_config_passes_validation() {
	let cfg = config_from(sample_config());

	docqa_config::validate(&cfg).expect("Sample config must validate.");
}

#[test]
fn rejects_non_convex_ranking_weights() {
	let mut value = sample_config();

	section(&mut value, &["ranking"])
		.insert("lexical_weight".to_string(), Value::Float(0.9));

	// 0.9 + 0.5 does not sum to 1.0.
	assert_rejected(value);
}

#[test]
fn rejects_out_of_range_weight() {
	let mut value = sample_config();
	let ranking = section(&mut value, &["ranking"]);

	ranking.insert("lexical_weight".to_string(), Value::Float(1.5));
	ranking.insert("embedding_weight".to_string(), Value::Float(-0.5));

	assert_rejected(value);
}

#[test]
fn rejects_zero_embedding_dimensions() {
	let mut value = sample_config();

	section(&mut value, &["providers", "embedding"])
		.insert("dimensions".to_string(), Value::Integer(0));

	assert_rejected(value);
}

#[test]
fn rejects_inverted_summary_lengths() {
	let mut value = sample_config();
	let summary = section(&mut value, &["summary"]);

	summary.insert("max_length".to_string(), Value::Integer(20));
	summary.insert("min_length".to_string(), Value::Integer(30));

	assert_rejected(value);
}

#[test]
fn rejects_zero_top_k_passages() {
	let mut value = sample_config();

	section(&mut value, &["ranking"])
		.insert("top_k_passages".to_string(), Value::Integer(0));

	assert_rejected(value);
}

#[test]
fn rejects_out_of_range_score_cutoffs() {
	let mut value = sample_config();

	section(&mut value, &["ranking"])
		.insert("min_document_score".to_string(), Value::Float(1.5));

	assert_rejected(value);

	let mut value = sample_config();

	section(&mut value, &["ranking"])
		.insert("min_passage_score".to_string(), Value::Float(-0.1));

	assert_rejected(value);
}

#[test]
fn rejects_blank_bind_address_and_empty_pool() {
	let mut value = sample_config();

	section(&mut value, &["service"])
		.insert("http_bind".to_string(), Value::String("  ".to_string()));

	assert_rejected(value);

	let mut value = sample_config();

	section(&mut value, &["storage", "postgres"])
		.insert("pool_max_conns".to_string(), Value::Integer(0));

	assert_rejected(value);
}

#[test]
fn rejects_blank_provider_api_key() {
	let mut value = sample_config();

	section(&mut value, &["providers", "generation"])
		.insert("api_key".to_string(), Value::String(String::new()));

	assert_rejected(value);
}

#[test]
fn rejects_zero_summary_chunk_size() {
	let mut value = sample_config();

	section(&mut value, &["summary"])
		.insert("max_chunk_chars".to_string(), Value::Integer(0));

	assert_rejected(value);
}
