use time::OffsetDateTime;

/// One row of `users`. The search core only ever reads these.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
	pub toshi_id: String,
	pub payment_address: Option<String>,
	pub username: Option<String>,
	pub name: Option<String>,
	pub avatar: Option<String>,
	pub about: Option<String>,
	pub location: Option<String>,
	pub is_app: bool,
	pub is_public: bool,
	pub active: bool,
	pub reputation_score: Option<f64>,
	pub review_count: i32,
	pub created: OffsetDateTime,
	pub updated: OffsetDateTime,
}

/// Column list matching [`UserRecord`], for queries that alias `users` as `u`.
pub const USER_COLUMNS: &str = "\
u.toshi_id, u.payment_address, u.username, u.name, u.avatar, u.about, u.location, u.is_app, \
u.is_public, u.active, u.reputation_score, u.review_count, u.created, u.updated";

/// Fields a fixture or importer supplies; everything else takes the column default.
#[derive(Debug, Clone)]
pub struct NewUser {
	pub toshi_id: String,
	pub username: Option<String>,
	pub name: Option<String>,
	pub payment_address: Option<String>,
	pub is_app: bool,
	pub is_public: bool,
	pub active: bool,
	pub reputation_score: Option<f64>,
	pub review_count: i32,
}
impl NewUser {
	pub fn new(toshi_id: impl Into<String>) -> Self {
		Self {
			toshi_id: toshi_id.into(),
			username: None,
			name: None,
			payment_address: None,
			is_app: false,
			is_public: false,
			active: true,
			reputation_score: None,
			review_count: 0,
		}
	}

	pub fn username(mut self, username: impl Into<String>) -> Self {
		self.username = Some(username.into());

		self
	}

	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());

		self
	}

	pub fn payment_address(mut self, payment_address: impl Into<String>) -> Self {
		self.payment_address = Some(payment_address.into());

		self
	}

	pub fn app(mut self, is_app: bool) -> Self {
		self.is_app = is_app;

		self
	}

	pub fn public(mut self, is_public: bool) -> Self {
		self.is_public = is_public;

		self
	}

	pub fn active(mut self, active: bool) -> Self {
		self.active = active;

		self
	}

	pub fn reputation(mut self, score: Option<f64>, review_count: i32) -> Self {
		self.reputation_score = score;
		self.review_count = review_count;

		self
	}
}
