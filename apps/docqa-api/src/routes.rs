use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{delete, get, post},
};
use serde::Serialize;

use crate::state::AppState;
use docqa_service::{
	AnswerRequest, AnswerResponse, HistoryListRequest, HistoryListResponse, IngestRequest,
	IngestResponse, SearchRequest, SearchResponse, ServiceError, SummarizeRequest,
	SummarizeResponse, VectorizeResponse, answer, history, ingest, search, summarize, vectorize,
};

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/documents", post(ingest_document))
		.route("/v1/documents/{document_id}/vector", post(vectorize_document))
		.route("/v1/documents/{document_id}/summary", post(summarize_document))
		.route("/v1/search", post(search_documents))
		.route("/v1/answer", post(answer_question))
		.route("/v1/history", post(record_history).get(list_history))
		.route("/v1/history/{history_id}", delete(delete_history))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn ingest_document(
	State(state): State<AppState>,
	Json(payload): Json<IngestRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
	let response = ingest::ingest_document(&state.service, payload).await?;
	Ok(Json(response))
}

async fn vectorize_document(
	State(state): State<AppState>,
	Path(document_id): Path<i64>,
) -> Result<Json<VectorizeResponse>, ApiError> {
	let response = vectorize::vectorize_document(&state.service, document_id).await?;
	Ok(Json(response))
}

async fn summarize_document(
	State(state): State<AppState>,
	Path(document_id): Path<i64>,
	Json(payload): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, ApiError> {
	let response = summarize::summarize_document(&state.service, document_id, payload).await?;
	Ok(Json(response))
}

async fn search_documents(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
	let response = search::search_documents(&state.service, payload).await?;
	Ok(Json(response))
}

async fn answer_question(
	State(state): State<AppState>,
	Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
	let response = answer::answer_question(&state.service, payload).await?;
	Ok(Json(response))
}

async fn record_history(
	State(state): State<AppState>,
	Json(payload): Json<history::RecordHistoryRequest>,
) -> Result<Json<RecordHistoryResponse>, ApiError> {
	let history_id = history::record_entry(&state.service, payload).await?;
	Ok(Json(RecordHistoryResponse { history_id }))
}

async fn list_history(
	State(state): State<AppState>,
	Query(payload): Query<HistoryListRequest>,
) -> Result<Json<HistoryListResponse>, ApiError> {
	let response = history::list_entries(&state.service, payload).await?;
	Ok(Json(response))
}

async fn delete_history(
	State(state): State<AppState>,
	Path(history_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
	history::delete_entry(&state.service, history_id).await?;
	Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
struct RecordHistoryResponse {
	history_id: i64,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let message = err.to_string();
		let (status, error_code) = match err {
			ServiceError::InvalidRequest { .. } => (StatusCode::BAD_REQUEST, "invalid_request"),
			ServiceError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
			ServiceError::Provider { .. } => (StatusCode::BAD_GATEWAY, "provider_error"),
			ServiceError::VectorFormat { .. } | ServiceError::Storage { .. } =>
				(StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
		};

		Self { status, error_code: error_code.to_string(), message }
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
