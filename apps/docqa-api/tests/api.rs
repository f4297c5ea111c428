//! HTTP surface tests against a throwaway database. Set `DOCQA_PG_DSN` to
//! run them. Provider-backed routes are covered in the service tests; here
//! we exercise routing, JSON shapes, and error mapping.

use axum::{
	Router,
	body::{Body, to_bytes},
	http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use docqa_api::{routes, state::AppState};
use docqa_testkit::TestDatabase;

async fn test_router() -> Option<(TestDatabase, Router)> {
	let base_dsn = docqa_testkit::env_dsn()?;
	let db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let config = test_config(db.dsn());
	let state = AppState::new(config).await.expect("Failed to build app state.");

	Some((db, routes::router(state)))
}

fn test_config(dsn: &str) -> docqa_config::Config {
	let toml = format!(
		r#"
[service]
http_bind = "127.0.0.1:0"
log_level = "info"

[storage.postgres]
dsn            = "{dsn}"
pool_max_conns = 2

[providers.embedding]
provider_id = "test"
api_base    = "http://127.0.0.1:1"
api_key     = "test-key"
path        = "/"
model       = "test"
dimensions  = 2
timeout_ms  = 1000

[providers.summarizer]
provider_id = "test"
api_base    = "http://127.0.0.1:1"
api_key     = "test-key"
path        = "/"
model       = "test"
timeout_ms  = 1000

[providers.generation]
provider_id       = "test"
api_base          = "http://127.0.0.1:1"
api_key           = "test-key"
path              = "/"
model             = "test"
max_answer_tokens = 256
timeout_ms        = 1000
"#
	);

	toml::from_str(&toml).expect("Test config should parse.")
}

async fn json_response(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
	let response = router.clone().oneshot(request).await.unwrap();
	let status = response.status();
	let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
	let value = if bytes.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&bytes).unwrap()
	};

	(status, value)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
	Request::builder()
		.method("POST")
		.uri(uri)
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from(body.to_string()))
		.unwrap()
}

#[tokio::test]
async fn health_is_ok() {
	let Some((db, router)) = test_router().await else { return };
	let response = router
		.clone()
		.oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);

	db.cleanup().await.unwrap();
}

#[tokio::test]
async fn ingest_returns_processing_document() {
	let Some((db, router)) = test_router().await else { return };
	let (status, body) = json_response(
		&router,
		post_json("/v1/documents", json!({ "title": "Sky", "full_text": "The sky is blue." })),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["status"], "processing");
	assert!(body["document_id"].as_i64().unwrap() > 0);

	db.cleanup().await.unwrap();
}

#[tokio::test]
async fn blank_title_maps_to_bad_request() {
	let Some((db, router)) = test_router().await else { return };
	let (status, body) = json_response(
		&router,
		post_json("/v1/documents", json!({ "title": " ", "full_text": "text" })),
	)
	.await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error_code"], "invalid_request");

	db.cleanup().await.unwrap();
}

#[tokio::test]
async fn vectorize_unknown_document_maps_to_not_found() {
	let Some((db, router)) = test_router().await else { return };
	let (status, body) =
		json_response(&router, post_json("/v1/documents/9999/vector", json!({}))).await;

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body["error_code"], "not_found");

	db.cleanup().await.unwrap();
}

#[tokio::test]
async fn answer_with_empty_scope_maps_to_bad_request() {
	let Some((db, router)) = test_router().await else { return };
	let (status, body) = json_response(
		&router,
		post_json("/v1/answer", json!({ "question": "Anything?", "search_scope": [] })),
	)
	.await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error_code"], "invalid_request");

	db.cleanup().await.unwrap();
}

#[tokio::test]
async fn history_round_trip_over_http() {
	let Some((db, router)) = test_router().await else { return };
	let (status, recorded) = json_response(
		&router,
		post_json("/v1/history", json!({ "query": "q", "response": "r" })),
	)
	.await;

	assert_eq!(status, StatusCode::OK);

	let history_id = recorded["history_id"].as_i64().unwrap();
	let (status, listed) = json_response(
		&router,
		Request::builder().uri("/v1/history").body(Body::empty()).unwrap(),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(listed["items"].as_array().unwrap().len(), 1);
	assert_eq!(listed["items"][0]["query"], "q");

	let delete_request = Request::builder()
		.method("DELETE")
		.uri(format!("/v1/history/{history_id}"))
		.body(Body::empty())
		.unwrap();
	let response = router.clone().oneshot(delete_request).await.unwrap();

	assert_eq!(response.status(), StatusCode::NO_CONTENT);

	let (status, body) = json_response(
		&router,
		Request::builder()
			.method("DELETE")
			.uri(format!("/v1/history/{history_id}"))
			.body(Body::empty())
			.unwrap(),
	)
	.await;

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body["error_code"], "not_found");

	db.cleanup().await.unwrap();
}
