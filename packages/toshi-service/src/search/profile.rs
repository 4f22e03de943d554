use toshi_storage::models::UserRecord;

/// Public view of a user. Account state and bookkeeping columns stay behind.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UserProfile {
	pub toshi_id: String,
	pub username: Option<String>,
	pub name: Option<String>,
	pub payment_address: Option<String>,
	pub avatar: Option<String>,
	pub about: Option<String>,
	pub location: Option<String>,
	pub is_app: bool,
	pub public: bool,
	pub reputation_score: Option<f64>,
	pub review_count: i32,
}
impl From<UserRecord> for UserProfile {
	fn from(record: UserRecord) -> Self {
		Self {
			toshi_id: record.toshi_id,
			username: record.username,
			name: record.name,
			payment_address: record.payment_address,
			avatar: record.avatar,
			about: record.about,
			location: record.location,
			is_app: record.is_app,
			public: record.is_public,
			reputation_score: record.reputation_score,
			review_count: record.review_count,
		}
	}
}
