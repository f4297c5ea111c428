pub mod embedding;
pub mod generation;
pub mod summarizer;

use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::{
	Client,
	header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue},
};
use serde_json::{Map, Value};

/// Builds a client with the provider's bearer token, extra headers, and
/// timeout baked in, so the call sites only shape the request body.
pub(crate) fn provider_client(
	api_key: &str,
	default_headers: &Map<String, Value>,
	timeout_ms: u64,
) -> Result<Client> {
	let mut headers = HeaderMap::new();
	let mut auth: HeaderValue = format!("Bearer {api_key}").parse()?;

	auth.set_sensitive(true);
	headers.insert(AUTHORIZATION, auth);

	for (name, value) in default_headers {
		let raw = value
			.as_str()
			.ok_or_else(|| eyre::eyre!("Default header {name} must be a string."))?;

		headers.insert(HeaderName::from_bytes(name.as_bytes())?, raw.parse()?);
	}

	Ok(Client::builder()
		.default_headers(headers)
		.timeout(Duration::from_millis(timeout_ms))
		.build()?)
}
