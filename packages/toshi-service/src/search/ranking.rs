use sqlx::{Postgres, QueryBuilder};
use toshi_domain::SearchQuery;

use crate::search::predicate::TextPattern;

/// One key of the composite ORDER BY. Keys are applied in order; the last key is always unique
/// per row, so every ordering is total.
#[derive(Clone, Debug, PartialEq)]
pub enum SortKey {
	/// Display-name hits (rank 0) before username-only hits (rank 1).
	NameMatch(TextPattern),
	/// Position within the requested identifier list, read from the identifier join.
	IdentifierPosition,
	/// Absent scores sort after every present score.
	ReputationDesc,
	ReviewCountDesc,
	UsernameAsc,
	ToshiIdAsc,
}
impl SortKey {
	pub(crate) fn push_sql<'args>(&'args self, builder: &mut QueryBuilder<'args, Postgres>) {
		match self {
			Self::NameMatch(pattern) => {
				builder.push("CASE WHEN ");
				pattern.push_name_match(builder);
				builder.push(" THEN 0 ELSE 1 END ASC");
			},
			Self::IdentifierPosition => {
				builder.push("ids.position ASC");
			},
			Self::ReputationDesc => {
				builder.push("u.reputation_score DESC NULLS LAST");
			},
			Self::ReviewCountDesc => {
				builder.push("u.review_count DESC");
			},
			Self::UsernameAsc => {
				builder.push("u.username ASC NULLS LAST");
			},
			Self::ToshiIdAsc => {
				builder.push("u.toshi_id ASC");
			},
		}
	}
}

/// Ordering for `query`.
///
/// Identifier lookups come back in request order whatever else is asked. Text searches rank
/// display-name hits first, then fall through to the reputation keys. Everything else, `top`
/// included, is ordered by reputation.
pub fn resolve(query: &SearchQuery) -> Vec<SortKey> {
	if query.has_identifiers() {
		return vec![SortKey::IdentifierPosition, SortKey::ToshiIdAsc];
	}

	let mut keys = Vec::with_capacity(5);

	if let Some(text) = query.text.as_deref() {
		keys.push(SortKey::NameMatch(TextPattern::new(text)));
	}

	keys.extend([
		SortKey::ReputationDesc,
		SortKey::ReviewCountDesc,
		SortKey::UsernameAsc,
		SortKey::ToshiIdAsc,
	]);

	keys
}
