use unicode_normalization::UnicodeNormalization;

use crate::stopwords;

/// Lowercases, strips punctuation, and drops stop-words for `lang` (ISO 639-1
/// code). Tokens are rejoined with single spaces. Languages without a bundled
/// stop-word table keep every token.
pub fn normalize(text: &str, lang: &str) -> String {
	let mut cleaned = String::with_capacity(text.len());

	for ch in text.nfc() {
		if ch.is_alphanumeric() {
			for lowered in ch.to_lowercase() {
				cleaned.push(lowered);
			}
		} else {
			cleaned.push(' ');
		}
	}

	let stop_words = stopwords::for_language(lang);
	let mut out = String::with_capacity(cleaned.len());

	for token in cleaned.split_whitespace() {
		if let Some(stop_words) = stop_words
			&& stop_words.contains(token)
		{
			continue;
		}

		if !out.is_empty() {
			out.push(' ');
		}

		out.push_str(token);
	}

	out
}

/// Detects the dominant language of `text` and maps it to a stop-word table
/// key. Unrecognized or ambiguous text defaults to English.
pub fn detect_language(text: &str) -> &'static str {
	match whatlang::detect_lang(text) {
		Some(whatlang::Lang::Ukr) => "uk",
		Some(whatlang::Lang::Eng) | None => "en",
		Some(_) => "other",
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lowercases_and_strips_punctuation() {
		assert_eq!(normalize("Hello, World!", "other"), "hello world");
	}

	#[test]
	fn removes_english_stop_words() {
		assert_eq!(normalize("What color is the sky?", "en"), "color sky");
	}

	#[test]
	fn unknown_language_keeps_all_tokens() {
		assert_eq!(normalize("the sky is blue", "xx"), "the sky is blue");
	}

	#[test]
	fn empty_input_passes_through() {
		assert_eq!(normalize("", "en"), "");
	}

	#[test]
	fn detects_english() {
		assert_eq!(detect_language("What color is the sky above the ocean?"), "en");
	}
}
