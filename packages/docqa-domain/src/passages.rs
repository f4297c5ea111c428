use unicode_segmentation::UnicodeSegmentation;

/// Sentences per retrieval window. Two sentences balance context sufficiency
/// against granularity; the window size is a policy constant, not
/// configuration.
pub const WINDOW_SENTENCES: usize = 2;

/// Splits `text` into non-overlapping windows of [`WINDOW_SENTENCES`]
/// consecutive sentences: {s0,s1},{s2,s3},... The final window may hold a
/// single sentence. Windows are trimmed and empty windows dropped, so N
/// sentences yield exactly ceil(N/2) windows.
pub fn sentence_windows(text: &str) -> Vec<String> {
	let sentences: Vec<&str> = text
		.unicode_sentences()
		.map(|sentence| sentence.trim())
		.filter(|sentence| !sentence.is_empty())
		.collect();
	let mut out = Vec::with_capacity(sentences.len().div_ceil(WINDOW_SENTENCES));

	for window in sentences.chunks(WINDOW_SENTENCES) {
		let joined = window.join(" ");
		let trimmed = joined.trim();

		if !trimmed.is_empty() {
			out.push(trimmed.to_string());
		}
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pairs_consecutive_sentences() {
		let windows = sentence_windows("One. Two. Three. Four.");

		assert_eq!(windows, vec!["One. Two.", "Three. Four."]);
	}

	#[test]
	fn odd_sentence_count_keeps_trailing_single() {
		let windows = sentence_windows("One. Two. Three.");

		assert_eq!(windows, vec!["One. Two.", "Three."]);
	}

	#[test]
	fn window_count_is_ceil_half() {
		for n in 0_usize..9 {
			let text = (0..n).map(|i| format!("Sentence {i}. ")).collect::<String>();
			let windows = sentence_windows(&text);

			assert_eq!(windows.len(), n.div_ceil(2));
		}
	}

	#[test]
	fn empty_text_yields_no_windows() {
		assert!(sentence_windows("").is_empty());
		assert!(sentence_windows("   \n ").is_empty());
	}
}
