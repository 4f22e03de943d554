use serde::Deserialize;

/// Upper bound for `search.max_param_bytes`. Parameters travel in the request target, which the
/// HTTP parser caps just under 64 KiB; the rest is left for the path and parameter names.
pub const MAX_PARAM_BYTES_LIMIT: u64 = 61_440;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub tracking: Tracking,
	pub security: Security,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

/// Bounds applied to `/v1/search/user` parameters before any query is built.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Page size used when the request carries no `limit`.
	pub default_limit: u32,
	/// Explicit limits above this are rejected rather than clamped.
	pub max_limit: u32,
	pub max_identifiers: u32,
	/// Ceiling on the summed byte length of every parameter value in one request.
	pub max_param_bytes: u64,
	/// Ceiling on `query` and `payment_address`, in characters.
	pub max_query_chars: u32,
}
impl Default for Search {
	fn default() -> Self {
		Self {
			default_limit: 10,
			max_limit: 100,
			max_identifiers: 1_255,
			max_param_bytes: MAX_PARAM_BYTES_LIMIT,
			max_query_chars: 256,
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Tracking {
	pub enabled: bool,
}
impl Default for Tracking {
	fn default() -> Self {
		Self { enabled: true }
	}
}

#[derive(Debug, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
}
