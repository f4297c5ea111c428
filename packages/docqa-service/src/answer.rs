use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
	DocqaService, ServiceError, ServiceResult,
	search::{
		self,
		ranking::{self, ScoredPassage},
	},
};
use docqa_domain::{normalize, passages};
use docqa_storage::{documents, history};

/// Terminal answer when no passage clears the relevance cutoff. Returned
/// verbatim so clients can detect the state without parsing prose.
pub const NO_CONTEXT_ANSWER: &str = "No relevant context found to answer the question.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextType {
	#[default]
	FullText,
	Summary,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
	pub question: String,
	/// Restricts retrieval to these documents. `None` ranks the whole
	/// corpus and applies the corpus-wide score cutoff.
	#[serde(default)]
	pub search_scope: Option<Vec<i64>>,
	#[serde(default)]
	pub context_type: ContextType,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
	pub relevant_document_ids: Vec<i64>,
	pub answer: String,
}

/// Answers a question over the stored corpus.
///
/// Documents are always ranked on their full text and its stored vector;
/// `context_type` only decides whether the passages handed to the
/// generation provider come from the full text or the summary. Every query
/// is recorded in the history log, including the no-context outcome.
pub async fn answer_question(
	service: &DocqaService,
	request: AnswerRequest,
) -> ServiceResult<AnswerResponse> {
	let question = request.question.trim();

	if question.is_empty() {
		return Err(ServiceError::InvalidRequest { message: "Question must not be empty.".into() });
	}
	if let Some(scope) = request.search_scope.as_deref()
		&& scope.is_empty()
	{
		return Err(ServiceError::InvalidRequest {
			message: "Search scope must name at least one document.".into(),
		});
	}

	let lang = normalize::detect_language(question);
	let normalized_question = normalize::normalize(question, lang);
	let question_vector = service
		.providers
		.embedding
		.embed(&service.cfg.providers.embedding, &normalized_question)
		.await?;
	let records = match request.search_scope.as_deref() {
		Some(scope) => documents::list_documents_by_ids(&service.db.pool, scope).await?,
		None => documents::list_documents(&service.db.pool).await?,
	};
	let scoped = request.search_scope.is_some();
	let context_texts = context_texts(&records, request.context_type);
	let candidates = search::collect_candidates(&records);
	let ranking_cfg = &service.cfg.ranking;
	let mut ranked = ranking::rank_documents(
		ranking_cfg,
		&normalized_question,
		&question_vector,
		candidates,
	);

	// An explicit scope is the caller's relevance call. The corpus cutoff
	// only applies when we picked the documents ourselves.
	if !scoped {
		ranked.retain(|doc| doc.score >= ranking_cfg.min_document_score);
	}

	if ranked.is_empty() {
		return no_context(service, question, Vec::new()).await;
	}

	let relevant_document_ids: Vec<i64> = ranked.iter().map(|doc| doc.document_id).collect();
	let mut windows = Vec::new();

	for doc in &ranked {
		let Some(text) = context_texts.get(&doc.document_id) else {
			tracing::warn!(
				document_id = doc.document_id,
				"Skipping ranked document without the requested context text.",
			);

			continue;
		};

		windows.extend(passages::sentence_windows(text));
	}

	let scored = ranking::score_passages(question, windows, ranking_cfg.min_passage_score);
	let selected = ranking::select_top_diverse(scored, ranking_cfg.top_k_passages as usize);

	if selected.is_empty() {
		return no_context(service, question, relevant_document_ids).await;
	}

	let context = join_passages(&selected);
	let answer = service
		.providers
		.generation
		.generate(&service.cfg.providers.generation, question, &context)
		.await?;

	history::insert_entry(
		&service.db.pool,
		relevant_document_ids.first().copied(),
		question,
		&answer,
	)
	.await?;

	tracing::info!(
		relevant = relevant_document_ids.len(),
		passages = selected.len(),
		"Answered question from retrieved context.",
	);

	Ok(AnswerResponse { relevant_document_ids, answer })
}

/// The text each document contributes passages from, keyed by document id.
fn context_texts(
	records: &[docqa_storage::models::DocumentRecord],
	context_type: ContextType,
) -> HashMap<i64, String> {
	let mut texts = HashMap::new();

	for record in records {
		let text = match context_type {
			ContextType::FullText => record.full_text.as_deref(),
			ContextType::Summary => record.summary.as_deref(),
		};

		if let Some(text) = text.filter(|text| !text.trim().is_empty()) {
			texts.insert(record.document_id, text.to_string());
		}
	}

	texts
}

async fn no_context(
	service: &DocqaService,
	question: &str,
	relevant_document_ids: Vec<i64>,
) -> ServiceResult<AnswerResponse> {
	history::insert_entry(
		&service.db.pool,
		relevant_document_ids.first().copied(),
		question,
		NO_CONTEXT_ANSWER,
	)
	.await?;

	tracing::info!(
		relevant = relevant_document_ids.len(),
		"No passage cleared the relevance cutoff.",
	);

	Ok(AnswerResponse { relevant_document_ids, answer: NO_CONTEXT_ANSWER.to_string() })
}

fn join_passages(selected: &[ScoredPassage]) -> String {
	let mut out = String::new();

	for (idx, passage) in selected.iter().enumerate() {
		if idx > 0 {
			out.push(' ');
		}

		out.push_str(&passage.text);
	}

	out
}
