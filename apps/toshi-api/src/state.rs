use std::sync::Arc;

use toshi_service::ToshiService;
use toshi_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<ToshiService>,
}
impl AppState {
	/// Connects to Postgres and makes sure the `users` table exists before serving.
	pub async fn new(config: toshi_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::from_service(ToshiService::new(config, db)))
	}

	pub fn from_service(service: ToshiService) -> Self {
		Self { service: Arc::new(service) }
	}
}
