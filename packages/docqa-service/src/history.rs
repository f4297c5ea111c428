use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{DocqaService, ServiceError, ServiceResult};
use docqa_storage::history;

const DEFAULT_LIST_LIMIT: i64 = 50;
const MAX_LIST_LIMIT: i64 = 500;

#[derive(Debug, Deserialize)]
pub struct RecordHistoryRequest {
	#[serde(default)]
	pub document_id: Option<i64>,
	pub query: String,
	pub response: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryListRequest {
	#[serde(default)]
	pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct HistoryListResponse {
	pub items: Vec<HistoryItem>,
}

#[derive(Debug, Serialize)]
pub struct HistoryItem {
	pub history_id: i64,
	pub document_id: Option<i64>,
	pub query: String,
	pub response: String,
	#[serde(with = "time::serde::rfc3339")]
	pub ts: OffsetDateTime,
}

pub async fn record_entry(
	service: &DocqaService,
	request: RecordHistoryRequest,
) -> ServiceResult<i64> {
	if request.query.trim().is_empty() {
		return Err(ServiceError::InvalidRequest { message: "Query must not be empty.".into() });
	}

	let history_id = history::insert_entry(
		&service.db.pool,
		request.document_id,
		&request.query,
		&request.response,
	)
	.await?;

	Ok(history_id)
}

pub async fn list_entries(
	service: &DocqaService,
	request: HistoryListRequest,
) -> ServiceResult<HistoryListResponse> {
	let limit = request.limit.unwrap_or(DEFAULT_LIST_LIMIT);

	if limit <= 0 || limit > MAX_LIST_LIMIT {
		return Err(ServiceError::InvalidRequest {
			message: format!("Limit must be between 1 and {MAX_LIST_LIMIT}."),
		});
	}

	let items = history::list_entries(&service.db.pool, limit)
		.await?
		.into_iter()
		.map(|entry| HistoryItem {
			history_id: entry.history_id,
			document_id: entry.document_id,
			query: entry.query,
			response: entry.response,
			ts: entry.ts,
		})
		.collect();

	Ok(HistoryListResponse { items })
}

pub async fn delete_entry(service: &DocqaService, history_id: i64) -> ServiceResult<()> {
	let deleted = history::delete_entry(&service.db.pool, history_id).await?;

	if !deleted {
		return Err(ServiceError::NotFound {
			message: format!("History entry {history_id} does not exist."),
		});
	}

	Ok(())
}
