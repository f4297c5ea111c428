use sqlx::{PgExecutor, PgPool};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::{Result, models::VectorizeOutboxEntry};

pub async fn enqueue_vectorize<'e, E>(executor: E, document_id: i64) -> Result<Uuid>
where
	E: PgExecutor<'e>,
{
	let outbox_id = Uuid::new_v4();

	sqlx::query(
		"\
INSERT INTO vectorize_outbox (outbox_id, document_id)
VALUES ($1, $2)",
	)
	.bind(outbox_id)
	.bind(document_id)
	.execute(executor)
	.await?;

	Ok(outbox_id)
}

/// Claims the next due job and leases it so concurrent workers skip it.
///
/// The claim and the lease bump happen in one transaction with
/// `FOR UPDATE SKIP LOCKED`, so two workers never process the same job.
pub async fn claim_next_job(
	pool: &PgPool,
	lease: Duration,
	now: OffsetDateTime,
) -> Result<Option<VectorizeOutboxEntry>> {
	let mut tx = pool.begin().await?;
	let entry = sqlx::query_as::<_, VectorizeOutboxEntry>(
		"\
SELECT
	outbox_id,
	document_id,
	status,
	attempts,
	last_error,
	available_at,
	created_at,
	updated_at
FROM vectorize_outbox
WHERE status = 'PENDING' AND available_at <= $1
ORDER BY available_at ASC
LIMIT 1
FOR UPDATE SKIP LOCKED",
	)
	.bind(now)
	.fetch_optional(&mut *tx)
	.await?;
	let Some(entry) = entry else {
		tx.commit().await?;

		return Ok(None);
	};

	sqlx::query(
		"\
UPDATE vectorize_outbox
SET attempts = attempts + 1, available_at = $1, updated_at = $2
WHERE outbox_id = $3",
	)
	.bind(now + lease)
	.bind(now)
	.bind(entry.outbox_id)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(Some(entry))
}

pub async fn mark_done<'e, E>(executor: E, outbox_id: Uuid, now: OffsetDateTime) -> Result<()>
where
	E: PgExecutor<'e>,
{
	sqlx::query(
		"\
UPDATE vectorize_outbox
SET status = 'DONE', last_error = NULL, updated_at = $1
WHERE outbox_id = $2",
	)
	.bind(now)
	.bind(outbox_id)
	.execute(executor)
	.await?;

	Ok(())
}

/// Dead-letters a job that exhausted its retries. It stays in the table
/// for inspection but is never polled again.
pub async fn mark_dead<'e, E>(
	executor: E,
	outbox_id: Uuid,
	error: &str,
	now: OffsetDateTime,
) -> Result<()>
where
	E: PgExecutor<'e>,
{
	sqlx::query(
		"\
UPDATE vectorize_outbox
SET status = 'FAILED', last_error = $1, updated_at = $2
WHERE outbox_id = $3",
	)
	.bind(error)
	.bind(now)
	.bind(outbox_id)
	.execute(executor)
	.await?;

	Ok(())
}

pub async fn mark_failed<'e, E>(
	executor: E,
	outbox_id: Uuid,
	error: &str,
	retry_at: OffsetDateTime,
	now: OffsetDateTime,
) -> Result<()>
where
	E: PgExecutor<'e>,
{
	sqlx::query(
		"\
UPDATE vectorize_outbox
SET status = 'PENDING', last_error = $1, available_at = $2, updated_at = $3
WHERE outbox_id = $4",
	)
	.bind(error)
	.bind(retry_at)
	.bind(now)
	.bind(outbox_id)
	.execute(executor)
	.await?;

	Ok(())
}
