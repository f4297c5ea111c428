pub mod ranking;
pub mod tfidf;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{DocqaService, ServiceError, ServiceResult, search::ranking::CandidateDocument};
use docqa_domain::normalize;
use docqa_storage::{documents, models::DocumentRecord};

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
	pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
	pub results: Vec<SearchResult>,
}

#[derive(Debug, Serialize)]
pub struct SearchResult {
	pub document_id: i64,
	pub title: String,
	pub score: f32,
	pub lexical_score: f32,
	pub embedding_score: f32,
}

/// Ranks the whole corpus against the query and returns documents whose
/// fused score clears the corpus-wide relevance cutoff.
pub async fn search_documents(
	service: &DocqaService,
	request: SearchRequest,
) -> ServiceResult<SearchResponse> {
	let query = request.query.trim();

	if query.is_empty() {
		return Err(ServiceError::InvalidRequest { message: "Query must not be empty.".into() });
	}

	let lang = normalize::detect_language(query);
	let normalized_query = normalize::normalize(query, lang);
	let query_vector = service
		.providers
		.embedding
		.embed(&service.cfg.providers.embedding, &normalized_query)
		.await?;
	let records = documents::list_documents(&service.db.pool).await?;
	let titles: HashMap<i64, String> = records
		.iter()
		.map(|record| (record.document_id, record.title.clone()))
		.collect();
	let candidates = collect_candidates(&records);
	let ranking = &service.cfg.ranking;
	let ranked = ranking::rank_documents(ranking, &normalized_query, &query_vector, candidates);
	let results = ranked
		.into_iter()
		.filter(|doc| doc.score >= ranking.min_document_score)
		.map(|doc| SearchResult {
			document_id: doc.document_id,
			title: titles.get(&doc.document_id).cloned().unwrap_or_default(),
			score: doc.score,
			lexical_score: doc.lexical_score,
			embedding_score: doc.embedding_score,
		})
		.collect();

	Ok(SearchResponse { results })
}

/// Keeps only documents with both a non-blank full text and its stored
/// vector. Ranking always runs on full texts; the context type chosen for
/// answering only affects which text the passages come from later.
pub(crate) fn collect_candidates(records: &[DocumentRecord]) -> Vec<CandidateDocument> {
	let mut candidates = Vec::new();

	for record in records {
		let Some((text, vector_text)) =
			record.full_text.as_deref().zip(record.full_text_vector.as_deref())
		else {
			continue;
		};

		if text.trim().is_empty() {
			continue;
		}

		candidates.push(CandidateDocument {
			document_id: record.document_id,
			text: text.to_string(),
			vector_text: vector_text.to_string(),
		});
	}

	candidates
}

#[cfg(test)]
mod tests {
	use time::OffsetDateTime;

	use super::*;

	fn record(document_id: i64, full_text: Option<&str>, vector: Option<&str>) -> DocumentRecord {
		DocumentRecord {
			document_id,
			title: format!("doc {document_id}"),
			author: None,
			comment: None,
			original_file_name: None,
			status: "ready".to_string(),
			full_text: full_text.map(str::to_string),
			summary: None,
			full_text_vector: vector.map(str::to_string),
			summary_vector: None,
			embedding_version: None,
			vector_dim: None,
			uploaded_at: OffsetDateTime::UNIX_EPOCH,
			updated_at: OffsetDateTime::UNIX_EPOCH,
		}
	}

	#[test]
	fn candidates_require_full_text_and_vector() {
		let records = vec![
			record(1, Some("has both"), Some("[1.0]")),
			record(2, Some("no vector"), None),
			record(3, None, Some("[1.0]")),
			record(4, Some("   "), Some("[1.0]")),
		];
		let candidates = collect_candidates(&records);

		assert_eq!(candidates.len(), 1);
		assert_eq!(candidates[0].document_id, 1);
	}

	#[test]
	fn summary_fields_do_not_make_a_document_rankable() {
		let mut summary_only = record(5, None, None);

		summary_only.summary = Some("a summary".to_string());
		summary_only.summary_vector = Some("[0.5]".to_string());

		assert!(collect_candidates(&[summary_only]).is_empty());
	}
}
