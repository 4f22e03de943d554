mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, MAX_PARAM_BYTES_LIMIT, Postgres, Search, Security, Service, Storage, Tracking,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.is_empty() {
		return Err(Error::validation("service.http_bind", "must be non-empty."));
	}
	if cfg.storage.postgres.dsn.is_empty() {
		return Err(Error::validation("storage.postgres.dsn", "must be non-empty."));
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::validation(
			"storage.postgres.pool_max_conns",
			"must be greater than zero.",
		));
	}

	validate_search(&cfg.search)
}

pub fn validate_search(search: &Search) -> Result<()> {
	for (field, value) in [
		("search.default_limit", u64::from(search.default_limit)),
		("search.max_limit", u64::from(search.max_limit)),
		("search.max_identifiers", u64::from(search.max_identifiers)),
		("search.max_param_bytes", search.max_param_bytes),
		("search.max_query_chars", u64::from(search.max_query_chars)),
	] {
		if value == 0 {
			return Err(Error::validation(field, "must be greater than zero."));
		}
	}

	if search.max_param_bytes > MAX_PARAM_BYTES_LIMIT {
		return Err(Error::validation(
			"search.max_param_bytes",
			format!("must be at most {MAX_PARAM_BYTES_LIMIT} to fit in a request target."),
		));
	}
	if search.default_limit > search.max_limit {
		return Err(Error::validation(
			"search.default_limit",
			"must be less than or equal to search.max_limit.",
		));
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.service.http_bind = cfg.service.http_bind.trim().to_string();
	cfg.storage.postgres.dsn = cfg.storage.postgres.dsn.trim().to_string();

	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
