use toshi_domain::{AppsFilter, SearchQuery};

/// Events handed to the analytics collaborator. Delivery is best effort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingEvent {
	SearchPerformed {
		query: Option<String>,
		identifier_count: usize,
		by_payment_address: bool,
		apps: Option<bool>,
		public_only: bool,
		top: bool,
		result_count: usize,
	},
}
impl TrackingEvent {
	pub fn search_performed(query: &SearchQuery, result_count: usize) -> Self {
		Self::SearchPerformed {
			query: query.text.clone(),
			identifier_count: query.toshi_ids.len(),
			by_payment_address: query.payment_address.is_some(),
			apps: match query.apps {
				AppsFilter::OnlyApps => Some(true),
				AppsFilter::ExcludeApps => Some(false),
				AppsFilter::Any => None,
			},
			public_only: query.public_only,
			top: query.top,
			result_count,
		}
	}

	pub fn name(&self) -> &'static str {
		match self {
			Self::SearchPerformed { .. } => "search_performed",
		}
	}
}

/// Fire-and-forget sink. Implementations must return without waiting on I/O.
pub trait TrackingSink
where
	Self: Send + Sync,
{
	fn track(&self, event: TrackingEvent);
}

/// Writes events to the `toshi_service::tracking` log target.
pub struct LogTracking;
impl TrackingSink for LogTracking {
	fn track(&self, event: TrackingEvent) {
		let name = event.name();

		match event {
			TrackingEvent::SearchPerformed {
				query,
				identifier_count,
				by_payment_address,
				apps,
				public_only,
				top,
				result_count,
			} => tracing::info!(
				target: "toshi_service::tracking",
				event = name,
				query = query.as_deref(),
				identifier_count,
				by_payment_address,
				apps,
				public_only,
				top,
				result_count,
				"Tracked event."
			),
		}
	}
}

pub struct NoopTracking;
impl TrackingSink for NoopTracking {
	fn track(&self, _event: TrackingEvent) {}
}
