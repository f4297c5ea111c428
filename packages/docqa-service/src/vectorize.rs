use serde::Serialize;
use time::OffsetDateTime;

use crate::{DocqaService, ServiceError, ServiceResult, ingest::STATUS_READY};
use docqa_domain::normalize;
use docqa_storage::{documents, vector};

#[derive(Debug, Serialize)]
pub struct VectorizeResponse {
	pub document_id: i64,
	pub vector_dim: i32,
	pub status: String,
}

/// Embeds the normalized full text and stores the vector alongside the
/// embedding version and dimension, then marks the document ready. The
/// query side of retrieval is normalized the same way, so the two vectors
/// live in the same space.
pub async fn vectorize_document(
	service: &DocqaService,
	document_id: i64,
) -> ServiceResult<VectorizeResponse> {
	let Some(record) = documents::get_document(&service.db.pool, document_id).await? else {
		return Err(ServiceError::NotFound {
			message: format!("Document {document_id} does not exist."),
		});
	};
	let Some(full_text) = record.full_text.filter(|text| !text.trim().is_empty()) else {
		return Err(ServiceError::InvalidRequest {
			message: format!("Document {document_id} has no full text to vectorize."),
		});
	};
	let lang = normalize::detect_language(&full_text);
	let normalized = normalize::normalize(&full_text, lang);
	let vector = service
		.providers
		.embedding
		.embed(&service.cfg.providers.embedding, &normalized)
		.await?;
	let expected_dim = service.cfg.providers.embedding.dimensions as usize;

	if vector.len() != expected_dim {
		return Err(ServiceError::Provider {
			message: format!(
				"Embedding provider returned dimension {} instead of {expected_dim}.",
				vector.len()
			),
		});
	}

	let vector_text = vector::to_vector_text(&vector);
	let version = service.cfg.embedding_version();
	let vector_dim = vector.len() as i32;
	let now = OffsetDateTime::now_utc();
	let mut tx = service.db.pool.begin().await?;

	documents::update_full_text_vector(
		&mut *tx,
		document_id,
		&vector_text,
		&version,
		vector_dim,
		now,
	)
	.await?;
	documents::update_status(&mut *tx, document_id, STATUS_READY, now).await?;
	tx.commit().await?;

	tracing::info!(document_id, vector_dim, "Vectorized document full text.");

	Ok(VectorizeResponse { document_id, vector_dim, status: STATUS_READY.to_string() })
}
