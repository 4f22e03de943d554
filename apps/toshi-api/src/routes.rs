use axum::{
	Json, Router,
	extract::{Query, State, rejection::QueryRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::Serialize;

use toshi_domain::RawSearchParams;
use toshi_service::{SearchResponse, ServiceError};

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { field, message } => {
				Self::new(StatusCode::BAD_REQUEST, "BAD_ARGUMENTS", message, Some(vec![field]))
			},
			ServiceError::Storage { message } => {
				tracing::warn!(%message, "Search store unavailable.");

				Self::new(
					StatusCode::SERVICE_UNAVAILABLE,
					"STORAGE_UNAVAILABLE",
					"User directory is unavailable.",
					None,
				)
			},
			ServiceError::Internal { message } => {
				tracing::error!(%message, "Search plan rejected.");

				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", "Internal error.", None)
			},
		}
	}
}
impl From<QueryRejection> for ApiError {
	fn from(err: QueryRejection) -> Self {
		Self::new(StatusCode::BAD_REQUEST, "BAD_ARGUMENTS", err.body_text(), None)
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/search/user", get(search_users))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

/// Pairs rather than a struct: `toshi_id` may repeat and its order is significant.
async fn search_users(
	State(state): State<AppState>,
	query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
	let Query(pairs) = query?;
	let raw = RawSearchParams::from_pairs(pairs);
	let response = state.service.search_users(&raw).await?;

	Ok(Json(response))
}
