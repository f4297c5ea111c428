pub mod answer;
pub mod history;
pub mod ingest;
pub mod search;
pub mod summarize;
pub mod vectorize;

use std::{future::Future, pin::Pin, sync::Arc};

pub use answer::{AnswerRequest, AnswerResponse, ContextType, NO_CONTEXT_ANSWER};
use docqa_config::{
	Config, EmbeddingProviderConfig, GenerationProviderConfig, SummarizerProviderConfig,
};
use docqa_providers::{embedding, generation, summarizer};
use docqa_storage::db::Db;
pub use history::{HistoryItem, HistoryListRequest, HistoryListResponse, RecordHistoryRequest};
pub use ingest::{IngestRequest, IngestResponse};
pub use search::{SearchRequest, SearchResponse, SearchResult};
pub use summarize::{SummarizeRequest, SummarizeResponse};
pub use vectorize::VectorizeResponse;

pub type ServiceResult<T> = Result<T, ServiceError>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		text: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Vec<f32>>>;
}

pub trait SummarizerProvider
where
	Self: Send + Sync,
{
	fn summarize<'a>(
		&'a self,
		cfg: &'a SummarizerProviderConfig,
		text: &'a str,
		src_lang: &'a str,
		max_length: u32,
		min_length: u32,
	) -> BoxFuture<'a, color_eyre::Result<String>>;
}

pub trait GenerationProvider
where
	Self: Send + Sync,
{
	fn generate<'a>(
		&'a self,
		cfg: &'a GenerationProviderConfig,
		question: &'a str,
		context: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<String>>;
}

#[derive(Debug)]
pub enum ServiceError {
	InvalidRequest { message: String },
	NotFound { message: String },
	VectorFormat { message: String },
	Provider { message: String },
	Storage { message: String },
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub summarizer: Arc<dyn SummarizerProvider>,
	pub generation: Arc<dyn GenerationProvider>,
}

pub struct DocqaService {
	pub cfg: Config,
	pub db: Db,
	pub providers: Providers,
}

struct DefaultProviders;

impl std::fmt::Display for ServiceError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::InvalidRequest { message } => write!(f, "Invalid request: {message}"),
			Self::NotFound { message } => write!(f, "Not found: {message}"),
			Self::VectorFormat { message } => write!(f, "Vector format error: {message}"),
			Self::Provider { message } => write!(f, "Provider error: {message}"),
			Self::Storage { message } => write!(f, "Storage error: {message}"),
		}
	}
}

impl std::error::Error for ServiceError {}

impl From<sqlx::Error> for ServiceError {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

impl From<color_eyre::Report> for ServiceError {
	fn from(err: color_eyre::Report) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

impl From<docqa_storage::Error> for ServiceError {
	fn from(err: docqa_storage::Error) -> Self {
		match err {
			docqa_storage::Error::NotFound(message) => Self::NotFound { message },
			docqa_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			docqa_storage::Error::VectorFormat(message) => Self::VectorFormat { message },
			docqa_storage::Error::Sqlx(err) => Self::Storage { message: err.to_string() },
		}
	}
}

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		text: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Vec<f32>>> {
		Box::pin(embedding::embed(cfg, text))
	}
}

impl SummarizerProvider for DefaultProviders {
	fn summarize<'a>(
		&'a self,
		cfg: &'a SummarizerProviderConfig,
		text: &'a str,
		src_lang: &'a str,
		max_length: u32,
		min_length: u32,
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(summarizer::summarize(cfg, text, src_lang, max_length, min_length))
	}
}

impl GenerationProvider for DefaultProviders {
	fn generate<'a>(
		&'a self,
		cfg: &'a GenerationProviderConfig,
		question: &'a str,
		context: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(generation::generate(cfg, question, context))
	}
}

impl Providers {
	pub fn new(
		embedding: Arc<dyn EmbeddingProvider>,
		summarizer: Arc<dyn SummarizerProvider>,
		generation: Arc<dyn GenerationProvider>,
	) -> Self {
		Self { embedding, summarizer, generation }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);
		Self { embedding: provider.clone(), summarizer: provider.clone(), generation: provider }
	}
}

impl DocqaService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, db: Db, providers: Providers) -> Self {
		Self { cfg, db, providers }
	}
}
