#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read config at {path}: {source}")]
	ReadConfig { path: std::path::PathBuf, source: std::io::Error },
	#[error("Failed to parse config at {path}: {source}")]
	ParseConfig { path: std::path::PathBuf, source: toml::de::Error },
	#[error("Invalid config: {message}")]
	Validation { message: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
