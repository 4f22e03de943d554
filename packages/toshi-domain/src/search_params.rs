use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

static TOSHI_ID_RE: LazyLock<Option<Regex>> =
	LazyLock::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").ok());

/// Query-string parameters of a user search, still undecoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSearchParams {
	pub query: Option<String>,
	pub toshi_ids: Vec<String>,
	pub payment_address: Option<String>,
	pub apps: Option<String>,
	pub public: Option<String>,
	pub top: Option<String>,
	pub limit: Option<String>,
	pub offset: Option<String>,
}
impl RawSearchParams {
	/// Collects decoded `key=value` pairs. `toshi_id` repeats; for every other key the last
	/// occurrence wins. Unknown keys are ignored.
	pub fn from_pairs<I>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (String, String)>,
	{
		let mut params = Self::default();

		for (key, value) in pairs {
			match key.as_str() {
				"query" => params.query = Some(value),
				"toshi_id" => params.toshi_ids.push(value),
				"payment_address" => params.payment_address = Some(value),
				"apps" => params.apps = Some(value),
				"public" => params.public = Some(value),
				"top" => params.top = Some(value),
				"limit" => params.limit = Some(value),
				"offset" => params.offset = Some(value),
				_ => {},
			}
		}

		params
	}

	/// Summed byte length of every value, the quantity bounded by `search.max_param_bytes`.
	pub fn byte_len(&self) -> u64 {
		let scalars = [
			&self.query,
			&self.payment_address,
			&self.apps,
			&self.public,
			&self.top,
			&self.limit,
			&self.offset,
		];
		let scalar_bytes: usize =
			scalars.iter().filter_map(|value| value.as_deref()).map(str::len).sum();
		let id_bytes: usize = self.toshi_ids.iter().map(String::len).sum();

		(scalar_bytes + id_bytes) as u64
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppsFilter {
	OnlyApps,
	ExcludeApps,
	#[default]
	Any,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
	/// Trimmed free-text term; never empty.
	pub text: Option<String>,
	/// Identifiers in request order, duplicates kept.
	pub toshi_ids: Vec<String>,
	pub payment_address: Option<String>,
	pub apps: AppsFilter,
	pub public_only: bool,
	pub top: bool,
	pub limit: u32,
	pub offset: u32,
}
impl SearchQuery {
	pub fn has_identifiers(&self) -> bool {
		!self.toshi_ids.is_empty()
	}
}

/// Turns raw parameters into a [`SearchQuery`], rejecting anything malformed before a query is
/// built. Checks run cheapest first so oversized payloads are refused without scanning them.
pub fn validate(raw: &RawSearchParams, cfg: &toshi_config::Search) -> Result<SearchQuery> {
	if raw.byte_len() > cfg.max_param_bytes {
		return Err(Error::PayloadTooLarge { max: cfg.max_param_bytes });
	}
	if raw.toshi_ids.len() > cfg.max_identifiers as usize {
		return Err(Error::TooManyIdentifiers { max: cfg.max_identifiers });
	}

	for (index, toshi_id) in raw.toshi_ids.iter().enumerate() {
		if !is_toshi_id(toshi_id) {
			return Err(Error::InvalidIdentifier { index });
		}
	}

	let offset = parse_u32("offset", raw.offset.as_deref())?.unwrap_or(0);
	let limit = match parse_u32("limit", raw.limit.as_deref())? {
		Some(limit) if limit > cfg.max_limit => {
			return Err(Error::LimitTooLarge { max: cfg.max_limit });
		},
		Some(limit) => limit,
		// Contact-list lookups return every match unless paged explicitly.
		None if !raw.toshi_ids.is_empty() => raw.toshi_ids.len() as u32,
		None => cfg.default_limit,
	};
	let text = parse_text("query", raw.query.as_deref(), cfg.max_query_chars)?;
	let payment_address =
		parse_text("payment_address", raw.payment_address.as_deref(), cfg.max_query_chars)?;
	let apps = match parse_bool("apps", raw.apps.as_deref())? {
		Some(true) => AppsFilter::OnlyApps,
		Some(false) => AppsFilter::ExcludeApps,
		None => AppsFilter::Any,
	};
	let public_only = parse_bool("public", raw.public.as_deref())?.unwrap_or(false);
	let top = parse_bool("top", raw.top.as_deref())?.unwrap_or(false);

	Ok(SearchQuery {
		text,
		toshi_ids: raw.toshi_ids.clone(),
		payment_address,
		apps,
		public_only,
		top,
		limit,
		offset,
	})
}

/// `0x` followed by 20 hex-encoded bytes. Anything else, including query fragments smuggled
/// through the list parameter, fails.
pub fn is_toshi_id(value: &str) -> bool {
	TOSHI_ID_RE.as_ref().is_some_and(|re| re.is_match(value))
}

fn parse_u32(param: &'static str, raw: Option<&str>) -> Result<Option<u32>> {
	let Some(raw) = raw else {
		return Ok(None);
	};

	// `str::parse` would also take a leading `+`.
	if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
		return Err(Error::InvalidInteger { param });
	}

	raw.parse::<u32>().map(Some).map_err(|_| Error::InvalidInteger { param })
}

fn parse_bool(param: &'static str, raw: Option<&str>) -> Result<Option<bool>> {
	let Some(raw) = raw else {
		return Ok(None);
	};

	match raw.trim().to_ascii_lowercase().as_str() {
		"true" | "1" => Ok(Some(true)),
		"false" | "0" => Ok(Some(false)),
		_ => Err(Error::InvalidBool { param }),
	}
}

fn parse_text(param: &'static str, raw: Option<&str>, max_chars: u32) -> Result<Option<String>> {
	let Some(trimmed) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
		return Ok(None);
	};

	if trimmed.chars().count() > max_chars as usize {
		return Err(Error::TooLong { param, max: max_chars });
	}
	if trimmed.chars().any(char::is_control) {
		return Err(Error::ControlCharacters { param });
	}

	Ok(Some(trimmed.to_string()))
}
