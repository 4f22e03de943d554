pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("{param} must be a non-negative integer.")]
	InvalidInteger { param: &'static str },
	#[error("limit must be {max} or less.")]
	LimitTooLarge { max: u32 },
	#[error("{param} must be true or false.")]
	InvalidBool { param: &'static str },
	#[error("toshi_id at position {index} is not a valid identifier.")]
	InvalidIdentifier { index: usize },
	#[error("At most {max} toshi_id values are accepted.")]
	TooManyIdentifiers { max: u32 },
	#[error("Search parameters exceed {max} bytes.")]
	PayloadTooLarge { max: u64 },
	#[error("{param} must be {max} characters or less.")]
	TooLong { param: &'static str, max: u32 },
	#[error("{param} must not contain control characters.")]
	ControlCharacters { param: &'static str },
}
impl Error {
	/// Name of the request parameter the error refers to.
	pub fn param(&self) -> &'static str {
		match self {
			Self::InvalidInteger { param }
			| Self::InvalidBool { param }
			| Self::TooLong { param, .. }
			| Self::ControlCharacters { param } => param,
			Self::LimitTooLarge { .. } => "limit",
			Self::InvalidIdentifier { .. } | Self::TooManyIdentifiers { .. } => "toshi_id",
			Self::PayloadTooLarge { .. } => "$",
		}
	}
}
