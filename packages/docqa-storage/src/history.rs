use sqlx::PgExecutor;

use crate::{Result, models::QueryHistoryEntry};

pub async fn insert_entry<'e, E>(
	executor: E,
	document_id: Option<i64>,
	query: &str,
	response: &str,
) -> Result<i64>
where
	E: PgExecutor<'e>,
{
	let history_id: i64 = sqlx::query_scalar(
		"\
INSERT INTO query_history (document_id, query, response)
VALUES ($1, $2, $3)
RETURNING history_id",
	)
	.bind(document_id)
	.bind(query)
	.bind(response)
	.fetch_one(executor)
	.await?;

	Ok(history_id)
}

pub async fn list_entries<'e, E>(executor: E, limit: i64) -> Result<Vec<QueryHistoryEntry>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, QueryHistoryEntry>(
		"\
SELECT history_id, document_id, query, response, ts
FROM query_history
ORDER BY ts DESC, history_id DESC
LIMIT $1",
	)
	.bind(limit)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

pub async fn delete_entry<'e, E>(executor: E, history_id: i64) -> Result<bool>
where
	E: PgExecutor<'e>,
{
	let result = sqlx::query("DELETE FROM query_history WHERE history_id = $1")
		.bind(history_id)
		.execute(executor)
		.await?;

	Ok(result.rows_affected() > 0)
}
