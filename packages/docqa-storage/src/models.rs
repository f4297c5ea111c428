use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DocumentRecord {
	pub document_id: i64,
	pub title: String,
	pub author: Option<String>,
	pub comment: Option<String>,
	pub original_file_name: Option<String>,
	pub status: String,
	pub full_text: Option<String>,
	pub summary: Option<String>,
	pub full_text_vector: Option<String>,
	pub summary_vector: Option<String>,
	pub embedding_version: Option<String>,
	pub vector_dim: Option<i32>,
	pub uploaded_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct QueryHistoryEntry {
	pub history_id: i64,
	pub document_id: Option<i64>,
	pub query: String,
	pub response: String,
	pub ts: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct VectorizeOutboxEntry {
	pub outbox_id: Uuid,
	pub document_id: i64,
	pub status: String,
	pub attempts: i32,
	pub last_error: Option<String>,
	pub available_at: OffsetDateTime,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}
