//! Text codec for embedding columns. Vectors are stored as a bracketed,
//! comma-separated float list, e.g. `[0.1,0.2]`; both the service and the
//! worker write and read this shape through here.

use crate::{Error, Result};

pub fn to_vector_text(vector: &[f32]) -> String {
	let mut out = String::with_capacity(vector.len() * 8);
	out.push('[');

	for (i, value) in vector.iter().enumerate() {
		if i > 0 {
			out.push(',');
		}
		out.push_str(&value.to_string());
	}

	out.push(']');

	out
}

pub fn parse_vector_text(text: &str) -> Result<Vec<f32>> {
	let trimmed = text.trim();
	let without_brackets = trimmed
		.strip_prefix('[')
		.and_then(|s| s.strip_suffix(']'))
		.ok_or_else(|| Error::VectorFormat("Vector text is not bracketed.".to_string()))?;

	if without_brackets.trim().is_empty() {
		return Ok(Vec::new());
	}

	let mut vector = Vec::new();

	for part in without_brackets.split(',') {
		let value: f32 = part.trim().parse().map_err(|_| {
			Error::VectorFormat("Vector text contains a non-numeric value.".to_string())
		})?;
		vector.push(value);
	}

	Ok(vector)
}
