pub mod search;
pub mod tracking;

mod error;

use std::sync::Arc;

use toshi_config::Config;
use toshi_storage::db::Db;

pub use error::{ServiceError, ServiceResult};
pub use search::{SearchResponse, UserProfile};
pub use tracking::{LogTracking, NoopTracking, TrackingEvent, TrackingSink};

pub struct ToshiService {
	pub cfg: Config,
	pub db: Db,
	pub tracking: Arc<dyn TrackingSink>,
}
impl ToshiService {
	/// Service that reports searches to the log.
	pub fn new(cfg: Config, db: Db) -> Self {
		Self::with_tracking(cfg, db, Arc::new(LogTracking))
	}

	pub fn with_tracking(cfg: Config, db: Db, tracking: Arc<dyn TrackingSink>) -> Self {
		Self { cfg, db, tracking }
	}
}
