#![cfg(feature = "server")]

mod common;

// std
use std::sync::Arc;
// crates.io
use axum::{
	Router,
	body::{self, Body},
	http::{Method, Request, StatusCode},
};
use httpmock::prelude::*;
use serde_json::Value;
use tower::ServiceExt;
// self
use common::{ACCESS_KEY, SECRET_KEY, fast_policy, status_body};
use video_relay::{
	client::ReqwestGenerationClient,
	provider::ServiceDescriptor,
	server::{self as relay, ACCESS_KEY_HEADER, AppState, SECRET_KEY_HEADER},
};

const SUBMIT_PATH: &str = "/v1/videos/text2video";

fn build_router(server: &MockServer) -> Router {
	let descriptor = ServiceDescriptor::from_base_url(&server.base_url())
		.expect("Mock descriptor should build successfully.");
	let client = ReqwestGenerationClient::new(descriptor);

	relay::router(AppState::new(Arc::new(client)).with_policy(fast_policy()))
}

fn generate_request(body: &str, with_keys: bool) -> Request<Body> {
	let mut builder = Request::builder()
		.method(Method::POST)
		.uri("/generate_video")
		.header("content-type", "application/json");

	if with_keys {
		builder = builder.header(ACCESS_KEY_HEADER, ACCESS_KEY).header(SECRET_KEY_HEADER, SECRET_KEY);
	}

	builder.body(Body::from(body.to_owned())).expect("Test request should build.")
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
	let response = router.oneshot(request).await.expect("Router should be infallible.");
	let status = response.status();
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Response body should be readable.");

	(status, bytes.to_vec())
}

fn json(bytes: &[u8]) -> Value {
	serde_json::from_slice(bytes).expect("Response body should be JSON.")
}

#[tokio::test]
async fn root_greets() {
	let server = MockServer::start_async().await;
	let request = Request::builder().uri("/").body(Body::empty()).expect("Request should build.");
	let (status, bytes) = send(build_router(&server), request).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json(&bytes)["message"], "Hello, World!");
}

#[tokio::test]
async fn root_answers_head() {
	let server = MockServer::start_async().await;
	let request = Request::builder()
		.method(Method::HEAD)
		.uri("/")
		.body(Body::empty())
		.expect("Request should build.");
	let (status, bytes) = send(build_router(&server), request).await;

	assert_eq!(status, StatusCode::OK);
	assert!(bytes.is_empty());
}

#[tokio::test]
async fn missing_keys_are_rejected_without_upstream_calls() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(SUBMIT_PATH);
			then.status(200).body("{\"data\":{\"task_id\":\"t-unexpected\"}}");
		})
		.await;
	let (status, bytes) =
		send(build_router(&server), generate_request("{\"prompt\":\"a cat\"}", false)).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert!(
		json(&bytes)["error"]
			.as_str()
			.is_some_and(|error| error.starts_with("Missing API keys in headers"))
	);

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn empty_key_counts_as_missing() {
	let server = MockServer::start_async().await;
	let request = Request::builder()
		.method(Method::POST)
		.uri("/generate_video")
		.header(ACCESS_KEY_HEADER, "")
		.header(SECRET_KEY_HEADER, SECRET_KEY)
		.body(Body::empty())
		.expect("Request should build.");
	let (status, _) = send(build_router(&server), request).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn generate_video_relays_until_url() {
	let server = MockServer::start_async().await;
	let submit = server
		.mock_async(|when, then| {
			when.method(POST).path(SUBMIT_PATH).json_body(serde_json::json!({
				"prompt": "a cat",
				"duration": 3,
				"resolution": "720p",
				"frame_rate": 24,
				"style": "cinematic",
			}));
			then.status(200).body("{\"code\":0,\"data\":{\"task_id\":\"t1\"}}");
		})
		.await;
	let status = server
		.mock_async(|when, then| {
			when.method(GET).path(format!("{SUBMIT_PATH}/t1"));
			then.status(200).body(status_body("succeed", Some("https://cdn/x.mp4")));
		})
		.await;
	let (code, bytes) = send(
		build_router(&server),
		generate_request("{\"prompt\":\"a cat\",\"duration\":3}", true),
	)
	.await;
	let body = json(&bytes);

	assert_eq!(code, StatusCode::OK);
	assert_eq!(body["message"], "Video generation complete");
	assert_eq!(body["video_url"], "https://cdn/x.mp4");

	submit.assert_calls_async(1).await;
	status.assert_calls_async(1).await;
}

#[tokio::test]
async fn submission_failure_is_a_server_error() {
	let server = MockServer::start_async().await;
	let submit = server
		.mock_async(|when, then| {
			when.method(POST).path(SUBMIT_PATH);
			then.status(500).body("{\"message\":\"upstream broke\"}");
		})
		.await;
	let (status, bytes) = send(build_router(&server), generate_request("", true)).await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert!(json(&bytes)["error"].as_str().is_some_and(|error| error.contains("upstream broke")));

	submit.assert_calls_async(1).await;
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
	let server = MockServer::start_async().await;
	let (status, bytes) = send(build_router(&server), generate_request("{not json", true)).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert!(json(&bytes)["error"].is_string());
}

#[tokio::test]
async fn shutdown_cancels_inflight_polls() {
	let server = MockServer::start_async().await;
	let _submit = server
		.mock_async(|when, then| {
			when.method(POST).path(SUBMIT_PATH);
			then.status(200).body("{\"data\":{\"task_id\":\"t-long\"}}");
		})
		.await;
	let _status = server
		.mock_async(|when, then| {
			when.method(GET).path(format!("{SUBMIT_PATH}/t-long"));
			then.status(200).body(status_body("processing", None));
		})
		.await;
	let descriptor = ServiceDescriptor::from_base_url(&server.base_url())
		.expect("Mock descriptor should build successfully.");
	let state = AppState::new(Arc::new(ReqwestGenerationClient::new(descriptor)))
		.with_policy(fast_policy().with_max_wait(time::Duration::minutes(5)));
	let shutdown = state.shutdown.clone();

	tokio::spawn(async move {
		tokio::time::sleep(std::time::Duration::from_millis(200)).await;
		shutdown.cancel();
	});

	let (status, bytes) = send(relay::router(state), generate_request("{}", true)).await;

	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
	assert!(json(&bytes)["error"].as_str().is_some_and(|error| error.contains("cancelled")));
}
