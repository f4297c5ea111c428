use serde::{Deserialize, Serialize};

use crate::{DocqaService, ServiceError, ServiceResult};
use docqa_storage::{documents, documents::NewDocument, outbox};

pub use docqa_storage::documents::{STATUS_PROCESSING, STATUS_READY};

#[derive(Debug, Deserialize)]
pub struct IngestRequest {
	pub title: String,
	#[serde(default)]
	pub author: Option<String>,
	#[serde(default)]
	pub comment: Option<String>,
	#[serde(default)]
	pub original_file_name: Option<String>,
	pub full_text: String,
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
	pub document_id: i64,
	pub status: String,
}

/// Stores a new document and queues its vectorization. The insert and the
/// queue entry commit together, so a stored document always has a pending
/// job until a worker picks it up.
pub async fn ingest_document(
	service: &DocqaService,
	request: IngestRequest,
) -> ServiceResult<IngestResponse> {
	let title = request.title.trim();

	if title.is_empty() {
		return Err(ServiceError::InvalidRequest { message: "Title must not be empty.".into() });
	}
	if request.full_text.trim().is_empty() {
		return Err(ServiceError::InvalidRequest {
			message: "Full text must not be empty.".into(),
		});
	}

	let mut tx = service.db.pool.begin().await?;
	let document_id = documents::insert_document(
		&mut *tx,
		&NewDocument {
			title,
			author: request.author.as_deref(),
			comment: request.comment.as_deref(),
			original_file_name: request.original_file_name.as_deref(),
			status: STATUS_PROCESSING,
			full_text: Some(&request.full_text),
		},
	)
	.await?;

	outbox::enqueue_vectorize(&mut *tx, document_id).await?;
	tx.commit().await?;

	tracing::info!(document_id, "Stored document and queued vectorization.");

	Ok(IngestResponse { document_id, status: STATUS_PROCESSING.to_string() })
}
