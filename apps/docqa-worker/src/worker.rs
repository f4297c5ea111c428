use std::time::Duration as StdDuration;

use time::{Duration, OffsetDateTime};

use crate::{Error, Result};
use docqa_domain::normalize;
use docqa_providers::embedding;
use docqa_storage::{
	db::Db,
	documents,
	documents::STATUS_READY,
	models::VectorizeOutboxEntry,
	outbox, vector,
};

const POLL_INTERVAL_MS: i64 = 500;
const LEASE_SECONDS: i64 = 30;
const BASE_BACKOFF_MS: i64 = 500;
const MAX_BACKOFF_MS: i64 = 60_000;
const MAX_ATTEMPTS: i32 = 8;
const MAX_OUTBOX_ERROR_CHARS: usize = 500;

pub struct WorkerState {
	pub db: Db,
	pub cfg: docqa_config::Config,
}

pub async fn run_worker(state: WorkerState) -> color_eyre::Result<()> {
	loop {
		if let Err(err) = process_outbox_once(&state).await {
			tracing::error!(error = %err, "Vectorize outbox processing failed.");
		}

		tokio::time::sleep(to_std_duration(Duration::milliseconds(POLL_INTERVAL_MS))).await;
	}
}

/// Claims one due job, runs it, and settles its outcome. A job that keeps
/// failing backs off exponentially and is dead-lettered after
/// `MAX_ATTEMPTS`.
async fn process_outbox_once(state: &WorkerState) -> Result<()> {
	let now = OffsetDateTime::now_utc();
	let Some(job) =
		outbox::claim_next_job(&state.db.pool, Duration::seconds(LEASE_SECONDS), now).await?
	else {
		return Ok(());
	};

	match vectorize_job(state, &job).await {
		Ok(vector_dim) => {
			outbox::mark_done(&state.db.pool, job.outbox_id, OffsetDateTime::now_utc()).await?;

			tracing::info!(
				document_id = job.document_id,
				vector_dim,
				"Vectorized document from outbox.",
			);
		},
		Err(err) => {
			let now = OffsetDateTime::now_utc();
			// `claim_next_job` already bumped the stored counter.
			let attempts = job.attempts + 1;
			let error_text = sanitize_outbox_error(&err.to_string());

			if attempts >= MAX_ATTEMPTS {
				outbox::mark_dead(&state.db.pool, job.outbox_id, &error_text, now).await?;

				tracing::error!(
					document_id = job.document_id,
					attempts,
					error = %err,
					"Vectorize job dead-lettered.",
				);
			} else {
				let retry_at = now + backoff_for_attempt(attempts);

				outbox::mark_failed(&state.db.pool, job.outbox_id, &error_text, retry_at, now)
					.await?;

				tracing::warn!(
					document_id = job.document_id,
					attempts,
					error = %err,
					"Vectorize job failed; will retry.",
				);
			}
		},
	}

	Ok(())
}

async fn vectorize_job(state: &WorkerState, job: &VectorizeOutboxEntry) -> Result<i32> {
	let Some(record) = documents::get_document(&state.db.pool, job.document_id).await? else {
		return Err(Error::Message(format!("Document {} no longer exists.", job.document_id)));
	};
	let Some(full_text) = record.full_text.filter(|text| !text.trim().is_empty()) else {
		return Err(Error::Message(format!("Document {} has no full text.", job.document_id)));
	};
	let embedding_cfg = &state.cfg.providers.embedding;
	// The query side embeds normalized text; stored vectors must match.
	let lang = normalize::detect_language(&full_text);
	let normalized = normalize::normalize(&full_text, lang);
	let embedded = embedding::embed(embedding_cfg, &normalized).await?;

	if embedded.len() != embedding_cfg.dimensions as usize {
		return Err(Error::Message(format!(
			"Embedding provider returned dimension {} instead of {}.",
			embedded.len(),
			embedding_cfg.dimensions
		)));
	}

	let vector_text = vector::to_vector_text(&embedded);
	let version = state.cfg.embedding_version();
	let vector_dim = embedded.len() as i32;
	let now = OffsetDateTime::now_utc();
	let mut tx = state.db.pool.begin().await?;

	documents::update_full_text_vector(
		&mut *tx,
		job.document_id,
		&vector_text,
		&version,
		vector_dim,
		now,
	)
	.await?;
	documents::update_status(&mut *tx, job.document_id, STATUS_READY, now).await?;
	tx.commit().await?;

	Ok(vector_dim)
}

fn sanitize_outbox_error(text: &str) -> String {
	let mut parts = Vec::new();
	let mut redact_next = false;

	for raw in text.split_whitespace() {
		let mut word = raw.to_string();

		if redact_next {
			word = "[REDACTED]".to_string();
			redact_next = false;
		}
		if raw.eq_ignore_ascii_case("bearer") {
			redact_next = true;
		}

		let lowered = raw.to_ascii_lowercase();

		for key in ["api_key", "apikey", "password", "secret", "token"] {
			if lowered.contains(key) && (lowered.contains('=') || lowered.contains(':')) {
				let sep = if raw.contains('=') { '=' } else { ':' };
				let prefix = match raw.split(sep).next() {
					Some(prefix) => prefix,
					None => raw,
				};

				word = format!("{prefix}{sep}[REDACTED]");

				break;
			}
		}

		parts.push(word);
	}

	let mut out = parts.join(" ");

	if out.chars().count() > MAX_OUTBOX_ERROR_CHARS {
		out = out.chars().take(MAX_OUTBOX_ERROR_CHARS).collect();
		out.push_str("...");
	}

	out
}

fn backoff_for_attempt(attempt: i32) -> Duration {
	let attempts = attempt.max(1) as u32;
	let exp = attempts.saturating_sub(1).min(6);
	let base = BASE_BACKOFF_MS.saturating_mul(1 << exp);
	let capped = base.min(MAX_BACKOFF_MS);

	Duration::milliseconds(capped)
}

fn to_std_duration(duration: Duration) -> StdDuration {
	let millis = duration.whole_milliseconds();

	if millis <= 0 {
		return StdDuration::from_millis(0);
	}

	StdDuration::from_millis(millis as u64)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn backoff_grows_exponentially_and_caps() {
		assert_eq!(backoff_for_attempt(1), Duration::milliseconds(500));
		assert_eq!(backoff_for_attempt(2), Duration::milliseconds(1_000));
		assert_eq!(backoff_for_attempt(3), Duration::milliseconds(2_000));
		assert_eq!(backoff_for_attempt(7), Duration::milliseconds(32_000));
		assert_eq!(backoff_for_attempt(100), Duration::milliseconds(32_000));
		assert_eq!(backoff_for_attempt(0), Duration::milliseconds(500));
	}

	#[test]
	fn sanitize_redacts_bearer_and_key_values() {
		let sanitized = sanitize_outbox_error("Authorization: Bearer abc123 api_key=hunter2");

		assert!(sanitized.contains("Bearer [REDACTED]"));
		assert!(sanitized.contains("api_key=[REDACTED]"));
		assert!(!sanitized.contains("abc123"));
		assert!(!sanitized.contains("hunter2"));
	}

	#[test]
	fn sanitize_truncates_long_errors() {
		let sanitized = sanitize_outbox_error(&"word ".repeat(400));

		assert!(sanitized.chars().count() <= MAX_OUTBOX_ERROR_CHARS + 3);
		assert!(sanitized.ends_with("..."));
	}
}
