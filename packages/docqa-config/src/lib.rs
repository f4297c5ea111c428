mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, EmbeddingProviderConfig, GenerationProviderConfig, Postgres, Providers, Ranking,
	Service, Storage, SummarizerProviderConfig, Summary,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}

	for (label, weight) in [
		("ranking.lexical_weight", cfg.ranking.lexical_weight),
		("ranking.embedding_weight", cfg.ranking.embedding_weight),
	] {
		if !weight.is_finite() {
			return Err(Error::Validation {
				message: format!("{label} must be a finite number."),
			});
		}
		if !(0.0..=1.0).contains(&weight) {
			return Err(Error::Validation {
				message: format!("{label} must be in the range 0.0-1.0."),
			});
		}
	}

	let weight_sum = cfg.ranking.lexical_weight + cfg.ranking.embedding_weight;

	if (weight_sum - 1.0).abs() > 1e-6 {
		return Err(Error::Validation {
			message: "ranking.lexical_weight and ranking.embedding_weight must sum to 1.0."
				.to_string(),
		});
	}
	if !(0.0..=1.0).contains(&cfg.ranking.min_document_score) {
		return Err(Error::Validation {
			message: "ranking.min_document_score must be in the range 0.0-1.0.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&cfg.ranking.min_passage_score) {
		return Err(Error::Validation {
			message: "ranking.min_passage_score must be in the range 0.0-1.0.".to_string(),
		});
	}
	if cfg.ranking.top_k_passages == 0 {
		return Err(Error::Validation {
			message: "ranking.top_k_passages must be greater than zero.".to_string(),
		});
	}
	if cfg.summary.max_chunk_chars == 0 {
		return Err(Error::Validation {
			message: "summary.max_chunk_chars must be greater than zero.".to_string(),
		});
	}
	if cfg.summary.max_length <= cfg.summary.min_length {
		return Err(Error::Validation {
			message: "summary.max_length must be greater than summary.min_length.".to_string(),
		});
	}

	for (label, key) in [
		("embedding", &cfg.providers.embedding.api_key),
		("summarizer", &cfg.providers.summarizer.api_key),
		("generation", &cfg.providers.generation.api_key),
	] {
		if key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
	}

	Ok(())
}
