use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{DocqaService, ServiceError, ServiceResult};
use docqa_domain::normalize;
use docqa_storage::{documents, vector};

#[derive(Debug, Default, Deserialize)]
pub struct SummarizeRequest {
	#[serde(default)]
	pub max_length: Option<u32>,
	#[serde(default)]
	pub min_length: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
	pub document_id: i64,
	pub summary: String,
}

/// Summarizes a document chunk by chunk and stores the joined summary with
/// its own embedding, so summary-scoped retrieval works immediately.
///
/// Long texts are split on character boundaries before summarization
/// because the summarizer has a bounded input window.
pub async fn summarize_document(
	service: &DocqaService,
	document_id: i64,
	request: SummarizeRequest,
) -> ServiceResult<SummarizeResponse> {
	let summary_cfg = &service.cfg.summary;
	let max_length = request.max_length.unwrap_or(summary_cfg.max_length);
	let min_length = request.min_length.unwrap_or(summary_cfg.min_length);

	if max_length <= min_length {
		return Err(ServiceError::InvalidRequest {
			message: format!(
				"max_length ({max_length}) must be greater than min_length ({min_length})."
			),
		});
	}

	let Some(record) = documents::get_document(&service.db.pool, document_id).await? else {
		return Err(ServiceError::NotFound {
			message: format!("Document {document_id} does not exist."),
		});
	};
	let Some(full_text) = record.full_text.filter(|text| !text.trim().is_empty()) else {
		return Err(ServiceError::InvalidRequest {
			message: format!("Document {document_id} has no full text to summarize."),
		});
	};
	let src_lang = normalize::detect_language(&full_text);
	let chunks = chunk_text(&full_text, summary_cfg.max_chunk_chars as usize);
	let mut parts = Vec::with_capacity(chunks.len());

	for chunk in &chunks {
		let part = service
			.providers
			.summarizer
			.summarize(
				&service.cfg.providers.summarizer,
				chunk,
				src_lang,
				max_length,
				min_length,
			)
			.await?;

		parts.push(part);
	}

	let summary = parts.join(" ");

	if summary.trim().is_empty() {
		return Err(ServiceError::Provider {
			message: "Summarizer returned an empty summary.".to_string(),
		});
	}

	let embedded =
		service.providers.embedding.embed(&service.cfg.providers.embedding, &summary).await?;
	let vector_text = vector::to_vector_text(&embedded);
	let version = service.cfg.embedding_version();

	documents::update_summary(
		&service.db.pool,
		document_id,
		&summary,
		&vector_text,
		&version,
		embedded.len() as i32,
		OffsetDateTime::now_utc(),
	)
	.await?;

	tracing::info!(document_id, chunks = chunks.len(), "Summarized document.");

	Ok(SummarizeResponse { document_id, summary })
}

/// Splits text into chunks of at most `max_chars` characters, never inside
/// a UTF-8 code point.
pub(crate) fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
	if max_chars == 0 {
		return vec![text.to_string()];
	}

	let mut chunks = Vec::new();
	let mut current = String::new();
	let mut count = 0_usize;

	for ch in text.chars() {
		current.push(ch);
		count += 1;

		if count == max_chars {
			chunks.push(std::mem::take(&mut current));

			count = 0;
		}
	}

	if !current.is_empty() {
		chunks.push(current);
	}

	chunks
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn short_text_is_a_single_chunk() {
		assert_eq!(chunk_text("short", 1_024), vec!["short".to_string()]);
	}

	#[test]
	fn chunks_cover_text_without_loss() {
		let text = "a".repeat(2_500);
		let chunks = chunk_text(&text, 1_024);

		assert_eq!(chunks.len(), 3);
		assert_eq!(chunks.iter().map(String::len).sum::<usize>(), 2_500);
		assert_eq!(chunks.concat(), text);
	}

	#[test]
	fn chunking_counts_characters_not_bytes() {
		let text = "é".repeat(10);
		let chunks = chunk_text(&text, 4);

		assert_eq!(chunks.len(), 3);
		assert_eq!(chunks[0].chars().count(), 4);
		assert_eq!(chunks.concat(), text);
	}
}
