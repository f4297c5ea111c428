use std::collections::HashMap;

/// Dense TF-IDF rows over a shared vocabulary, one row per input text.
///
/// Term frequency is the raw token count and the inverse document frequency
/// is smoothed, `ln((1 + n) / (1 + df)) + 1`, so a term present in every
/// text still contributes. Rows are L2-normalized at build time, which makes
/// cosine similarity a plain dot product.
pub struct TfidfMatrix {
	rows: Vec<Vec<f32>>,
}

impl TfidfMatrix {
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Cosine similarity between two rows. Zero when either row has no
	/// tokens, since an all-zero row has no direction.
	pub fn row_similarity(&self, a: usize, b: usize) -> f32 {
		let (Some(lhs), Some(rhs)) = (self.rows.get(a), self.rows.get(b)) else {
			return 0.0;
		};

		lhs.iter().zip(rhs.iter()).map(|(l, r)| l * r).sum::<f32>().clamp(-1.0, 1.0)
	}
}

/// Cosine similarity of a matrix fit over exactly the two texts. Fitting
/// per pair keeps the score a function of the pair alone, so a passage's
/// relevance never shifts with whatever else is in the batch.
pub fn pairwise_similarity(a: &str, b: &str) -> f32 {
	let matrix = fit_transform(&[a.to_string(), b.to_string()]);

	matrix.row_similarity(0, 1)
}

pub fn fit_transform(texts: &[String]) -> TfidfMatrix {
	let token_rows: Vec<Vec<String>> = texts.iter().map(|text| tokenize(text)).collect();
	let mut vocab: HashMap<&str, usize> = HashMap::new();

	for tokens in &token_rows {
		for token in tokens {
			let next = vocab.len();

			vocab.entry(token.as_str()).or_insert(next);
		}
	}

	let n = token_rows.len() as f32;
	let mut document_frequency = vec![0_u32; vocab.len()];

	for tokens in &token_rows {
		let mut seen = vec![false; vocab.len()];

		for token in tokens {
			let term = vocab[token.as_str()];

			if !seen[term] {
				seen[term] = true;
				document_frequency[term] += 1;
			}
		}
	}

	let idf: Vec<f32> = document_frequency
		.iter()
		.map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
		.collect();
	let rows = token_rows
		.iter()
		.map(|tokens| {
			let mut row = vec![0.0_f32; vocab.len()];

			for token in tokens {
				row[vocab[token.as_str()]] += 1.0;
			}

			for (value, idf) in row.iter_mut().zip(idf.iter()) {
				*value *= idf;
			}

			let norm = row.iter().map(|value| value * value).sum::<f32>().sqrt();

			if norm > 0.0 {
				for value in &mut row {
					*value /= norm;
				}
			}

			row
		})
		.collect();

	TfidfMatrix { rows }
}

// Single-character tokens are kept on purpose: short queries like "x" must
// still match a document that mentions "x".
fn tokenize(text: &str) -> Vec<String> {
	text.split(|ch: char| !ch.is_alphanumeric())
		.filter(|token| !token.is_empty())
		.map(|token| token.to_lowercase())
		.collect()
}
