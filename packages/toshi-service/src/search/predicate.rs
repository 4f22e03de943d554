use sqlx::{Postgres, QueryBuilder};
use toshi_domain::{AppsFilter, SearchQuery};

/// LIKE patterns for one free-text term. Both are escaped, so `_`, `%` and `\` in the term only
/// ever match themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextPattern {
	/// Matches values starting with the term.
	pub prefix: String,
	/// Matches values with a later word starting with the term.
	pub word_prefix: String,
}
impl TextPattern {
	pub fn new(term: &str) -> Self {
		let escaped = escape_like(term);

		Self { prefix: format!("{escaped}%"), word_prefix: format!("% {escaped}%") }
	}

	pub(crate) fn push_name_match<'args>(&'args self, builder: &mut QueryBuilder<'args, Postgres>) {
		builder.push("(lower(u.name) LIKE lower(");
		builder.push_bind(self.prefix.as_str());
		builder.push(") OR lower(u.name) LIKE lower(");
		builder.push_bind(self.word_prefix.as_str());
		builder.push("))");
	}
}

/// One filter of the search. Values travel as bind parameters; only the clause shape is text.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
	/// Username starts with the term, or a display-name word does.
	Text(TextPattern),
	/// Exact, case-sensitive membership in one bound array, joined rather than filtered.
	ToshiIdIn(Vec<String>),
	PaymentAddress(String),
	IsApp(bool),
	/// Human accounts marked public. Apps never qualify, whatever their flag says.
	Public,
	Active,
}
impl Predicate {
	/// Identifier sets filter through a join, so the one bound array also yields each row's
	/// request position. Every other predicate is a WHERE clause.
	pub(crate) fn is_join(&self) -> bool {
		matches!(self, Self::ToshiIdIn(_))
	}

	pub(crate) fn push_join<'args>(&'args self, builder: &mut QueryBuilder<'args, Postgres>) {
		let Self::ToshiIdIn(toshi_ids) = self else {
			return;
		};

		// Duplicates collapse to their first position so each user appears once.
		builder.push(
			" JOIN (SELECT requested.toshi_id, min(requested.position) AS position FROM unnest(",
		);
		builder.push_bind(toshi_ids.as_slice());
		builder.push(
			"::text[]) WITH ORDINALITY AS requested(toshi_id, position) \
			 GROUP BY requested.toshi_id) ids ON ids.toshi_id = u.toshi_id",
		);
	}

	pub(crate) fn push_sql<'args>(&'args self, builder: &mut QueryBuilder<'args, Postgres>) {
		match self {
			Self::Text(pattern) => {
				builder.push("(lower(u.username) LIKE lower(");
				builder.push_bind(pattern.prefix.as_str());
				builder.push(") OR ");
				pattern.push_name_match(builder);
				builder.push(")");
			},
			// Rendered by `push_join`.
			Self::ToshiIdIn(_) => {},
			Self::PaymentAddress(address) => {
				builder.push("u.payment_address = ");
				builder.push_bind(address.as_str());
			},
			Self::IsApp(is_app) => {
				builder.push("u.is_app = ");
				builder.push_bind(*is_app);
			},
			Self::Public => {
				builder.push("(u.is_public AND NOT u.is_app)");
			},
			Self::Active => {
				builder.push("u.active");
			},
		}
	}
}

/// Filters for `query`, joined with AND at assembly. Absent parameters add nothing; the active
/// filter is always last.
pub fn build_predicates(query: &SearchQuery) -> Vec<Predicate> {
	let mut predicates = Vec::with_capacity(6);

	if let Some(text) = query.text.as_deref() {
		predicates.push(Predicate::Text(TextPattern::new(text)));
	}
	if query.has_identifiers() {
		predicates.push(Predicate::ToshiIdIn(query.toshi_ids.clone()));
	}
	if let Some(address) = query.payment_address.as_deref() {
		predicates.push(Predicate::PaymentAddress(address.to_string()));
	}

	match query.apps {
		AppsFilter::OnlyApps => predicates.push(Predicate::IsApp(true)),
		AppsFilter::ExcludeApps => predicates.push(Predicate::IsApp(false)),
		AppsFilter::Any => {},
	}

	if query.public_only {
		predicates.push(Predicate::Public);
	}

	predicates.push(Predicate::Active);

	predicates
}

/// Escapes LIKE metacharacters with the default `\` escape.
pub fn escape_like(term: &str) -> String {
	let mut out = String::with_capacity(term.len());

	for ch in term.chars() {
		if matches!(ch, '\\' | '%' | '_') {
			out.push('\\');
		}

		out.push(ch);
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::search::ranking::tests::query;

	fn kind(predicate: &Predicate) -> &'static str {
		match predicate {
			Predicate::Text(_) => "text",
			Predicate::ToshiIdIn(_) => "toshi_id_in",
			Predicate::PaymentAddress(_) => "payment_address",
			Predicate::IsApp(_) => "is_app",
			Predicate::Public => "public",
			Predicate::Active => "active",
		}
	}

	#[test]
	fn escapes_like_metacharacters() {
		assert_eq!(escape_like("wager_we"), "wager\\_we");
		assert_eq!(escape_like("100%"), "100\\%");
		assert_eq!(escape_like("a\\b"), "a\\\\b");
		assert_eq!(escape_like("bobsmith"), "bobsmith");
	}

	#[test]
	fn text_patterns_anchor_on_words() {
		let pattern = TextPattern::new("bob_smi");

		assert_eq!(pattern.prefix, "bob\\_smi%");
		assert_eq!(pattern.word_prefix, "% bob\\_smi%");
	}

	#[test]
	fn empty_query_only_filters_active() {
		assert_eq!(build_predicates(&query()), vec![Predicate::Active]);
	}

	#[test]
	fn every_filter_is_emitted_in_order() {
		let query = SearchQuery {
			text: Some("bob".to_string()),
			toshi_ids: vec!["0x01".to_string()],
			payment_address: Some("0x02".to_string()),
			apps: AppsFilter::ExcludeApps,
			public_only: true,
			..query()
		};
		let kinds: Vec<_> = build_predicates(&query).iter().map(kind).collect();

		assert_eq!(kinds, vec!["text", "toshi_id_in", "payment_address", "is_app", "public", "active"]);
	}

	#[test]
	fn apps_filter_maps_to_is_app_value() {
		let only = build_predicates(&SearchQuery { apps: AppsFilter::OnlyApps, ..query() });
		let exclude = build_predicates(&SearchQuery { apps: AppsFilter::ExcludeApps, ..query() });

		assert_eq!(only[0], Predicate::IsApp(true));
		assert_eq!(exclude[0], Predicate::IsApp(false));
	}
}
