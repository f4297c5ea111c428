use sqlx::PgExecutor;
use time::OffsetDateTime;

use crate::{Result, models::DocumentRecord};

pub const STATUS_PROCESSING: &str = "processing";
pub const STATUS_READY: &str = "ready";

const DOCUMENT_COLUMNS: &str = "\
	document_id,
	title,
	author,
	comment,
	original_file_name,
	status,
	full_text,
	summary,
	full_text_vector,
	summary_vector,
	embedding_version,
	vector_dim,
	uploaded_at,
	updated_at";

pub struct NewDocument<'a> {
	pub title: &'a str,
	pub author: Option<&'a str>,
	pub comment: Option<&'a str>,
	pub original_file_name: Option<&'a str>,
	pub status: &'a str,
	pub full_text: Option<&'a str>,
}

pub async fn insert_document<'e, E>(executor: E, doc: &NewDocument<'_>) -> Result<i64>
where
	E: PgExecutor<'e>,
{
	let document_id: i64 = sqlx::query_scalar(
		"\
INSERT INTO documents (title, author, comment, original_file_name, status, full_text)
VALUES ($1, $2, $3, $4, $5, $6)
RETURNING document_id",
	)
	.bind(doc.title)
	.bind(doc.author)
	.bind(doc.comment)
	.bind(doc.original_file_name)
	.bind(doc.status)
	.bind(doc.full_text)
	.fetch_one(executor)
	.await?;

	Ok(document_id)
}

pub async fn get_document<'e, E>(executor: E, document_id: i64) -> Result<Option<DocumentRecord>>
where
	E: PgExecutor<'e>,
{
	let row = sqlx::query_as::<_, DocumentRecord>(&format!(
		"\
SELECT
{DOCUMENT_COLUMNS}
FROM documents
WHERE document_id = $1
LIMIT 1",
	))
	.bind(document_id)
	.fetch_optional(executor)
	.await?;

	Ok(row)
}

pub async fn list_documents<'e, E>(executor: E) -> Result<Vec<DocumentRecord>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, DocumentRecord>(&format!(
		"\
SELECT
{DOCUMENT_COLUMNS}
FROM documents
ORDER BY document_id ASC",
	))
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

pub async fn list_documents_by_ids<'e, E>(
	executor: E,
	document_ids: &[i64],
) -> Result<Vec<DocumentRecord>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, DocumentRecord>(&format!(
		"\
SELECT
{DOCUMENT_COLUMNS}
FROM documents
WHERE document_id = ANY($1)
ORDER BY document_id ASC",
	))
	.bind(document_ids)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

pub async fn update_full_text_vector<'e, E>(
	executor: E,
	document_id: i64,
	vector: &str,
	embedding_version: &str,
	vector_dim: i32,
	now: OffsetDateTime,
) -> Result<()>
where
	E: PgExecutor<'e>,
{
	sqlx::query(
		"\
UPDATE documents
SET full_text_vector = $1,
	embedding_version = $2,
	vector_dim = $3,
	updated_at = $4
WHERE document_id = $5",
	)
	.bind(vector)
	.bind(embedding_version)
	.bind(vector_dim)
	.bind(now)
	.bind(document_id)
	.execute(executor)
	.await?;

	Ok(())
}

pub async fn update_summary<'e, E>(
	executor: E,
	document_id: i64,
	summary: &str,
	summary_vector: &str,
	embedding_version: &str,
	vector_dim: i32,
	now: OffsetDateTime,
) -> Result<()>
where
	E: PgExecutor<'e>,
{
	sqlx::query(
		"\
UPDATE documents
SET summary = $1,
	summary_vector = $2,
	embedding_version = $3,
	vector_dim = $4,
	updated_at = $5
WHERE document_id = $6",
	)
	.bind(summary)
	.bind(summary_vector)
	.bind(embedding_version)
	.bind(vector_dim)
	.bind(now)
	.bind(document_id)
	.execute(executor)
	.await?;

	Ok(())
}

pub async fn update_status<'e, E>(
	executor: E,
	document_id: i64,
	status: &str,
	now: OffsetDateTime,
) -> Result<()>
where
	E: PgExecutor<'e>,
{
	sqlx::query(
		"\
UPDATE documents
SET status = $1, updated_at = $2
WHERE document_id = $3",
	)
	.bind(status)
	.bind(now)
	.bind(document_id)
	.execute(executor)
	.await?;

	Ok(())
}
