use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub ranking: Ranking,
	#[serde(default)]
	pub summary: Summary,
}

impl Config {
	/// Identifies which embedding produced a stored vector. Vectors written
	/// under a different version are not comparable.
	pub fn embedding_version(&self) -> String {
		format!(
			"{}:{}:{}",
			self.providers.embedding.provider_id,
			self.providers.embedding.model,
			self.providers.embedding.dimensions
		)
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
	pub summarizer: SummarizerProviderConfig,
	pub generation: GenerationProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummarizerProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub max_answer_tokens: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

/// Relevance policy. The defaults mirror the documented design constants:
/// an even lexical/embedding split, a 0.2 cutoff when ranking the whole
/// corpus, a 0.1 passage-relevance cutoff, and three context passages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Ranking {
	pub lexical_weight: f32,
	pub embedding_weight: f32,
	pub min_document_score: f32,
	pub min_passage_score: f32,
	pub top_k_passages: u32,
}
impl Default for Ranking {
	fn default() -> Self {
		Self {
			lexical_weight: 0.5,
			embedding_weight: 0.5,
			min_document_score: 0.2,
			min_passage_score: 0.1,
			top_k_passages: 3,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Summary {
	pub max_chunk_chars: u32,
	pub max_length: u32,
	pub min_length: u32,
}
impl Default for Summary {
	fn default() -> Self {
		Self { max_chunk_chars: 1_024, max_length: 100, min_length: 30 }
	}
}
