use std::{collections::HashSet, sync::LazyLock};

static ENGLISH: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
	[
		"a", "about", "above", "after", "again", "all", "am", "an", "and", "any", "are", "as",
		"at", "be", "because", "been", "before", "being", "below", "between", "both", "but", "by",
		"can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
		"from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him",
		"his", "how", "i", "if", "in", "into", "is", "it", "its", "just", "me", "more", "most",
		"my", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other", "our",
		"ours", "out", "over", "own", "same", "she", "should", "so", "some", "such", "than",
		"that", "the", "their", "theirs", "them", "then", "there", "these", "they", "this",
		"those", "through", "to", "too", "under", "until", "up", "very", "was", "we", "were",
		"what", "when", "where", "which", "while", "who", "whom", "why", "will", "with", "you",
		"your", "yours",
	]
	.into_iter()
	.collect()
});

static UKRAINIAN: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
	[
		"а", "але", "б", "без", "би", "був", "була", "були", "було", "бути", "в", "вам", "вас",
		"весь", "вже", "ви", "від", "він", "вона", "вони", "воно", "все", "всі", "де", "для",
		"до", "є", "з", "за", "і", "із", "її", "їх", "й", "його", "коли", "ли", "лише", "між",
		"на", "нам", "нас", "не", "нею", "ним", "них", "ні", "об", "один", "під", "по", "при",
		"про", "саме", "сам", "собі", "та", "так", "також", "те", "ти", "тим", "то", "той",
		"тут", "у", "хто", "це", "цей", "ці", "чи", "чого", "що", "щоб", "як", "яка", "які",
		"якщо",
	]
	.into_iter()
	.collect()
});

/// Stop-word table for an ISO 639-1 language code. `None` means the language
/// has no bundled table and normalization keeps every token.
pub fn for_language(lang: &str) -> Option<&'static HashSet<&'static str>> {
	match lang {
		"en" => Some(&ENGLISH),
		"uk" => Some(&UKRAINIAN),
		_ => None,
	}
}
