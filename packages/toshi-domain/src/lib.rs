pub mod search_params;

mod error;

pub use error::{Error, Result};
pub use search_params::{AppsFilter, RawSearchParams, SearchQuery, validate};
