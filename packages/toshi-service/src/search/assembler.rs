use sqlx::{Postgres, QueryBuilder};
use toshi_domain::SearchQuery;
use toshi_storage::models::USER_COLUMNS;

use crate::{
	ServiceError, ServiceResult,
	search::{
		predicate::{self, Predicate},
		ranking::{self, SortKey},
	},
};

/// Everything one search needs before it touches the store.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchPlan {
	pub predicates: Vec<Predicate>,
	pub ordering: Vec<SortKey>,
	pub limit: u32,
	pub offset: u32,
}
impl SearchPlan {
	pub fn from_query(query: &SearchQuery) -> Self {
		Self {
			predicates: predicate::build_predicates(query),
			ordering: ranking::resolve(query),
			limit: query.limit,
			offset: query.offset,
		}
	}

	/// Builds the single SELECT for this plan. Only clause shapes are written as text; every
	/// value, limit and offset included, is a bind parameter.
	pub fn assemble(&self) -> ServiceResult<QueryBuilder<'_, Postgres>> {
		self.check()?;

		let mut builder = QueryBuilder::new("SELECT ");

		builder.push(USER_COLUMNS);
		builder.push(" FROM users u");

		for predicate in self.predicates.iter().filter(|p| p.is_join()) {
			predicate.push_join(&mut builder);
		}

		builder.push(" WHERE ");

		for (idx, predicate) in self.predicates.iter().filter(|p| !p.is_join()).enumerate() {
			if idx > 0 {
				builder.push(" AND ");
			}

			predicate.push_sql(&mut builder);
		}

		builder.push(" ORDER BY ");

		for (idx, key) in self.ordering.iter().enumerate() {
			if idx > 0 {
				builder.push(", ");
			}

			key.push_sql(&mut builder);
		}

		builder.push(" LIMIT ");
		builder.push_bind(i64::from(self.limit));
		builder.push(" OFFSET ");
		builder.push_bind(i64::from(self.offset));

		Ok(builder)
	}

	fn check(&self) -> ServiceResult<()> {
		if !self.predicates.contains(&Predicate::Active) {
			return Err(internal("Search plan is missing the active filter."));
		}
		if self.ordering.is_empty() {
			return Err(internal("Search plan has no ordering."));
		}

		for key in &self.ordering {
			match key {
				SortKey::NameMatch(_)
					if !self.predicates.iter().any(|p| matches!(p, Predicate::Text(_))) =>
				{
					return Err(internal("Name ranking requires a text filter."));
				},
				SortKey::IdentifierPosition
					if !self.predicates.iter().any(|p| matches!(p, Predicate::ToshiIdIn(_))) =>
				{
					return Err(internal("Identifier ordering requires an identifier filter."));
				},
				_ => {},
			}
		}

		Ok(())
	}
}

fn internal(message: &str) -> ServiceError {
	ServiceError::Internal { message: message.to_string() }
}
