pub type ServiceResult<T, E = ServiceError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
	#[error("Invalid request: {message}")]
	InvalidRequest { field: String, message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Internal error: {message}")]
	Internal { message: String },
}
impl From<sqlx::Error> for ServiceError {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

impl From<toshi_storage::Error> for ServiceError {
	fn from(err: toshi_storage::Error) -> Self {
		match err {
			toshi_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			toshi_storage::Error::Conflict(message) => Self::Storage { message },
		}
	}
}

impl From<toshi_domain::Error> for ServiceError {
	fn from(err: toshi_domain::Error) -> Self {
		Self::InvalidRequest { field: err.param().to_string(), message: err.to_string() }
	}
}
