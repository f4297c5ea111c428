use std::{cmp::Ordering, collections::HashSet};

use docqa_config::Ranking;

use crate::search::tfidf;
use docqa_storage::vector;

/// A document eligible for ranking: its raw full text and the stored
/// full-text vector.
pub struct CandidateDocument {
	pub document_id: i64,
	pub text: String,
	pub vector_text: String,
}

pub struct RankedDocument {
	pub document_id: i64,
	pub lexical_score: f32,
	pub embedding_score: f32,
	pub score: f32,
}

pub struct ScoredPassage {
	pub text: String,
	pub score: f32,
}

pub fn cosine_similarity(lhs: &[f32], rhs: &[f32]) -> Option<f32> {
	if lhs.is_empty() || lhs.len() != rhs.len() {
		return None;
	}

	let mut dot = 0.0_f32;
	let mut lhs_norm = 0.0_f32;
	let mut rhs_norm = 0.0_f32;

	for (l, r) in lhs.iter().zip(rhs.iter()) {
		dot += l * r;
		lhs_norm += l * l;
		rhs_norm += r * r;
	}

	if lhs_norm <= f32::EPSILON || rhs_norm <= f32::EPSILON {
		return None;
	}

	Some((dot / (lhs_norm.sqrt() * rhs_norm.sqrt())).clamp(-1.0, 1.0))
}

pub fn cmp_f32_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}

/// Fuses lexical and embedding similarity for every candidate and returns
/// them in descending fused order. The lexical side fits one matrix over
/// the normalized query plus the raw candidate texts; the sort is stable,
/// so candidates that tie keep their fetch order.
///
/// Candidates with an unreadable stored vector or a zero-norm vector pair
/// are logged and left out rather than failing the whole query.
pub fn rank_documents(
	ranking: &Ranking,
	normalized_query: &str,
	query_vector: &[f32],
	candidates: Vec<CandidateDocument>,
) -> Vec<RankedDocument> {
	if candidates.is_empty() {
		return Vec::new();
	}

	let mut texts = Vec::with_capacity(candidates.len() + 1);

	texts.push(normalized_query.to_string());

	for candidate in &candidates {
		texts.push(candidate.text.clone());
	}

	let matrix = tfidf::fit_transform(&texts);
	let mut ranked = Vec::with_capacity(candidates.len());

	for (idx, candidate) in candidates.into_iter().enumerate() {
		let parsed = match vector::parse_vector_text(&candidate.vector_text) {
			Ok(parsed) => parsed,
			Err(err) => {
				tracing::warn!(
					document_id = candidate.document_id,
					error = %err,
					"Skipping document with unreadable stored vector.",
				);

				continue;
			},
		};
		let Some(embedding_score) = cosine_similarity(query_vector, &parsed) else {
			tracing::warn!(
				document_id = candidate.document_id,
				"Skipping document with degenerate embedding.",
			);

			continue;
		};
		let lexical_score = matrix.row_similarity(0, idx + 1);
		let score =
			ranking.lexical_weight * lexical_score + ranking.embedding_weight * embedding_score;

		ranked.push(RankedDocument {
			document_id: candidate.document_id,
			lexical_score,
			embedding_score,
			score,
		});
	}

	ranked.sort_by(|a, b| cmp_f32_desc(a.score, b.score));

	ranked
}

/// Scores each passage against the question in its own two-text TF-IDF fit
/// and keeps those strictly above `min_score`, best first.
pub fn score_passages(question: &str, passages: Vec<String>, min_score: f32) -> Vec<ScoredPassage> {
	let mut scored = Vec::new();

	for passage in passages {
		let score = tfidf::pairwise_similarity(question, &passage);

		if score > min_score {
			scored.push(ScoredPassage { text: passage, score });
		}
	}

	scored.sort_by(|a, b| cmp_f32_desc(a.score, b.score));

	scored
}

/// Takes up to `top_k` passages, skipping exact duplicates of an already
/// selected passage so repeated boilerplate does not crowd out context.
pub fn select_top_diverse(scored: Vec<ScoredPassage>, top_k: usize) -> Vec<ScoredPassage> {
	let mut seen = HashSet::new();
	let mut selected = Vec::new();

	for passage in scored {
		if selected.len() >= top_k {
			break;
		}
		if !seen.insert(passage.text.clone()) {
			continue;
		}

		selected.push(passage);
	}

	selected
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ranking() -> Ranking {
		Ranking::default()
	}

	fn candidate(document_id: i64, text: &str, vector_text: &str) -> CandidateDocument {
		CandidateDocument {
			document_id,
			text: text.to_string(),
			vector_text: vector_text.to_string(),
		}
	}

	#[test]
	fn cosine_of_identical_vectors_is_one() {
		let similarity = cosine_similarity(&[1.0, 2.0], &[1.0, 2.0]).unwrap();

		assert!((similarity - 1.0).abs() < 1e-6);
	}

	#[test]
	fn cosine_rejects_zero_norm_and_length_mismatch() {
		assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]).is_none());
		assert!(cosine_similarity(&[1.0], &[1.0, 2.0]).is_none());
		assert!(cosine_similarity(&[], &[]).is_none());
	}

	#[test]
	fn rank_orders_by_fused_score() {
		let candidates = vec![
			candidate(1, "cats and dogs", "[0.0,1.0]"),
			candidate(2, "the sky is blue", "[1.0,0.0]"),
		];
		let ranked = rank_documents(&ranking(), "sky blue", &[1.0, 0.0], candidates);

		assert_eq!(ranked.len(), 2);
		assert_eq!(ranked[0].document_id, 2);
		assert!(ranked[0].score > ranked[1].score);
	}

	#[test]
	fn rank_skips_unreadable_vector() {
		let candidates = vec![
			candidate(1, "the sky is blue", "not-a-vector"),
			candidate(2, "the sky is blue", "[1.0,0.0]"),
		];
		let ranked = rank_documents(&ranking(), "sky blue", &[1.0, 0.0], candidates);

		assert_eq!(ranked.len(), 1);
		assert_eq!(ranked[0].document_id, 2);
	}

	#[test]
	fn rank_skips_zero_norm_vector() {
		let candidates = vec![candidate(1, "the sky is blue", "[0.0,0.0]")];
		let ranked = rank_documents(&ranking(), "sky blue", &[1.0, 0.0], candidates);

		assert!(ranked.is_empty());
	}

	#[test]
	fn rank_ties_keep_fetch_order() {
		let candidates = vec![
			candidate(7, "the sky is blue", "[1.0,0.0]"),
			candidate(3, "the sky is blue", "[1.0,0.0]"),
		];
		let ranked = rank_documents(&ranking(), "sky blue", &[1.0, 0.0], candidates);

		assert_eq!(ranked[0].document_id, 7);
		assert_eq!(ranked[1].document_id, 3);
	}

	#[test]
	fn passages_below_cutoff_are_dropped() {
		let passages = vec![
			"The sky is blue today.".to_string(),
			"Bananas are yellow fruit.".to_string(),
		];
		let scored = score_passages("sky blue", passages, 0.1);

		assert_eq!(scored.len(), 1);
		assert!(scored[0].text.contains("sky"));
	}

	#[test]
	fn passage_score_is_independent_of_the_batch() {
		let alone = score_passages("sky blue", vec!["The sky is blue today.".to_string()], 0.1);
		let with_noise = score_passages(
			"sky blue",
			vec![
				"The sky is blue today.".to_string(),
				"Bananas are yellow fruit.".to_string(),
				"Trains run on rails.".to_string(),
			],
			0.1,
		);
		let in_batch =
			with_noise.iter().find(|passage| passage.text.contains("sky")).unwrap();

		assert_eq!(alone.len(), 1);
		assert_eq!(in_batch.score, alone[0].score);
	}

	#[test]
	fn diverse_selection_dedups_exact_text() {
		let scored = vec![
			ScoredPassage { text: "repeated".to_string(), score: 0.9 },
			ScoredPassage { text: "repeated".to_string(), score: 0.8 },
			ScoredPassage { text: "fresh".to_string(), score: 0.7 },
		];
		let selected = select_top_diverse(scored, 3);

		assert_eq!(selected.len(), 2);
		assert_eq!(selected[0].text, "repeated");
		assert_eq!(selected[1].text, "fresh");
	}

	#[test]
	fn diverse_selection_respects_top_k() {
		let scored = (0..5)
			.map(|i| ScoredPassage { text: format!("passage {i}"), score: 1.0 - i as f32 * 0.1 })
			.collect();
		let selected = select_top_diverse(scored, 3);

		assert_eq!(selected.len(), 3);
	}
}
