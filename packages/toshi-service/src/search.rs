pub mod assembler;
pub mod predicate;
pub mod profile;
pub mod ranking;

use toshi_domain::RawSearchParams;
use toshi_storage::models::UserRecord;

use crate::{ServiceResult, ToshiService, search::assembler::SearchPlan, tracking::TrackingEvent};
pub use profile::UserProfile;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchResponse {
	pub results: Vec<UserProfile>,
}

impl ToshiService {
	/// Validates `raw`, runs one parameterized read and maps the rows. Nothing is tracked unless
	/// the read succeeds.
	pub async fn search_users(&self, raw: &RawSearchParams) -> ServiceResult<SearchResponse> {
		let query = toshi_domain::validate(raw, &self.cfg.search).inspect_err(|err| {
			tracing::debug!(param = err.param(), error = %err, "Rejected search parameters.");
		})?;
		let plan = SearchPlan::from_query(&query);
		let mut builder = plan.assemble()?;
		let records: Vec<UserRecord> =
			builder.build_query_as().fetch_all(&self.db.pool).await.inspect_err(|err| {
				tracing::warn!(error = %err, "User search query failed.");
			})?;
		let results: Vec<UserProfile> = records.into_iter().map(UserProfile::from).collect();

		if self.cfg.tracking.enabled {
			self.tracking.track(TrackingEvent::search_performed(&query, results.len()));
		}

		Ok(SearchResponse { results })
	}
}
