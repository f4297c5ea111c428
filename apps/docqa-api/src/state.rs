use std::sync::Arc;

use docqa_service::DocqaService;
use docqa_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<DocqaService>,
}
impl AppState {
	pub async fn new(config: docqa_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let service = DocqaService::new(config, db);

		Ok(Self { service: Arc::new(service) })
	}
}
