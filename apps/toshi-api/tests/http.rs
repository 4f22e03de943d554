use std::{
	io::{Read, Write},
	net::{SocketAddr, TcpStream},
	sync::Arc,
	time::Duration,
};

use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower::util::ServiceExt;

use toshi_api::{routes, state::AppState};
use toshi_config::{Config, Postgres, Search, Security, Service, Storage, Tracking};
use toshi_service::{NoopTracking, ToshiService};
use toshi_storage::{db::Db, models::NewUser, queries};
use toshi_testkit::TestDatabase;

const UNREACHABLE_DSN: &str = "postgres://toshi@127.0.0.1:1/toshi-id";

fn test_config(dsn: &str) -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		storage: Storage { postgres: Postgres { dsn: dsn.to_string(), pool_max_conns: 1 } },
		search: Search::default(),
		tracking: Tracking { enabled: false },
		security: Security { bind_localhost_only: true },
	}
}

/// Router over a pool that never connects. Anything that reaches the store fails fast.
fn offline_app() -> Router {
	let pool = PgPoolOptions::new()
		.max_connections(1)
		.acquire_timeout(Duration::from_millis(500))
		.connect_lazy(UNREACHABLE_DSN)
		.expect("Failed to build lazy pool.");
	let service = ToshiService::with_tracking(
		test_config(UNREACHABLE_DSN),
		Db::from_pool(pool),
		Arc::new(NoopTracking),
	);

	routes::router(AppState::from_service(service))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
	let response = app
		.oneshot(Request::builder().uri(uri).body(Body::empty()).expect("Failed to build request."))
		.await
		.expect("Failed to call router.");
	let status = response.status();
	let body = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json = if body.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&body).expect("Failed to parse response.")
	};

	(status, json)
}

/// Serves [`offline_app`] on a loopback socket so requests pass through the real HTTP parser.
async fn serve_offline() -> SocketAddr {
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind listener.");
	let addr = listener.local_addr().expect("Failed to read listener address.");

	tokio::spawn(async move { axum::serve(listener, offline_app()).await });

	addr
}

async fn get_over_socket(addr: SocketAddr, target: String) -> (u16, Value) {
	tokio::task::spawn_blocking(move || {
		let mut stream = TcpStream::connect(addr).expect("Failed to connect.");

		write!(stream, "GET {target} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
			.expect("Failed to write request.");

		let mut response = String::new();

		stream.read_to_string(&mut response).expect("Failed to read response.");

		let status = response
			.split_whitespace()
			.nth(1)
			.and_then(|code| code.parse().ok())
			.expect("Failed to parse status line.");
		let body = response.split_once("\r\n\r\n").map(|(_, body)| body).unwrap_or_default();
		let json = serde_json::from_str(body).unwrap_or(Value::Null);

		(status, json)
	})
	.await
	.expect("Socket client panicked.")
}

fn toshi_id(seed: usize) -> String {
	format!("0x{seed:040x}")
}

#[tokio::test]
async fn health_ok() {
	let (status, body) = get(offline_app(), "/health").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn non_numeric_limit_and_offset_are_bad_arguments() {
	for (uri, field) in [
		("/v1/search/user?query=bobsm&offset=x", "offset"),
		("/v1/search/user?query=bobsm&limit=x", "limit"),
		("/v1/search/user?limit=-1", "limit"),
	] {
		let (status, body) = get(offline_app(), uri).await;

		assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
		assert_eq!(body["error_code"], "BAD_ARGUMENTS");
		assert_eq!(body["fields"][0], field);
	}
}

#[tokio::test]
async fn crafted_identifier_is_rejected_before_the_store() {
	let uri = format!(
		"/v1/search/user?toshi_id={}&toshi_id={}",
		toshi_id(1),
		"0%27%29%29%20AS%20a%20%28id%29%3B%20DELETE%20FROM%20users%3B%20--"
	);
	let (status, body) = get(offline_app(), &uri).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["fields"][0], "toshi_id");
}

#[tokio::test]
async fn limit_above_ceiling_and_bad_booleans_are_rejected() {
	let (status, body) = get(offline_app(), "/v1/search/user?limit=101").await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["fields"][0], "limit");

	let (status, body) = get(offline_app(), "/v1/search/user?apps=maybe").await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["fields"][0], "apps");
}

#[tokio::test]
async fn parameter_ceilings_are_reached_before_the_uri_limit() {
	let addr = serve_offline().await;
	let target = |ids: usize, extra: &str| {
		let mut target = "/v1/search/user?".to_string();

		for seed in 0..ids {
			target.push_str(&format!("toshi_id={}&", toshi_id(seed)));
		}

		target.push_str(extra);

		target
	};

	// The largest accepted identifier set validates and goes on to the store.
	let (status, _) = get_over_socket(addr, target(1_255, "limit=10")).await;

	assert_eq!(status, 503);

	let (status, body) = get_over_socket(addr, target(1_256, "limit=10")).await;

	assert_eq!(status, 400);
	assert_eq!(body["fields"][0], "toshi_id");

	let address = "a".repeat(61_441);
	let (status, body) =
		get_over_socket(addr, target(1, &format!("payment_address={address}"))).await;

	assert_eq!(status, 400);
	assert_eq!(body["fields"][0], "$");
}

#[tokio::test]
async fn unreachable_store_is_service_unavailable() {
	let (status, body) = get(offline_app(), "/v1/search/user?query=bob").await;

	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
	assert_eq!(body["error_code"], "STORAGE_UNAVAILABLE");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set TOSHI_PG_DSN to run."]
async fn search_returns_profiles_as_json() {
	let Some(test_db) =
		TestDatabase::from_env("HTTP").await.expect("Failed to create test database.")
	else {
		return;
	};
	let state =
		AppState::new(test_config(test_db.dsn())).await.expect("Failed to initialize app state.");

	queries::insert_users(&state.service.db, &[
		NewUser::new(toshi_id(1)).username("bobsmith").name("Bob Smith").public(true),
		NewUser::new(toshi_id(2)).username("bobsbot").app(true).reputation(Some(4.0), 2),
	])
	.await
	.expect("Failed to insert users.");

	let app = routes::router(state.clone());
	let uri = format!("/v1/search/user?toshi_id={}&toshi_id={}", toshi_id(2), toshi_id(1));
	let (status, body) = get(app.clone(), &uri).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["results"][0]["username"], "bobsbot");
	assert_eq!(body["results"][0]["is_app"], true);
	assert_eq!(body["results"][0]["reputation_score"], 4.0);
	assert_eq!(body["results"][1]["toshi_id"], toshi_id(1));
	assert_eq!(body["results"][1]["public"], true);

	let (status, body) = get(app, "/v1/search/user?query=nancy").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, serde_json::json!({ "results": [] }));

	state.service.db.pool.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
