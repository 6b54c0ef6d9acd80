#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use common::pinned_token;
use video_relay::{
	client::ReqwestGenerationClient,
	error::{Error, SubmissionError},
	provider::ServiceDescriptor,
	task::GenerationRequest,
	transport::ReqwestHttpClient,
};

const SUBMIT_PATH: &str = "/v1/videos/text2video";

fn build_client(server: &MockServer) -> ReqwestGenerationClient {
	let descriptor = ServiceDescriptor::from_base_url(&server.base_url())
		.expect("Mock descriptor should build successfully.");

	ReqwestGenerationClient::new(descriptor)
}

#[tokio::test]
async fn submit_returns_task_handle() {
	let server = MockServer::start_async().await;
	let token = pinned_token();
	let bearer = format!("Bearer {}", token.expose());
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(SUBMIT_PATH)
				.header("authorization", bearer.as_str())
				.header("content-type", "application/json")
				.json_body(json!({
					"prompt": "a cat on a skateboard",
					"duration": 3,
					"resolution": "720p",
					"frame_rate": 24,
					"style": "cinematic",
				}));
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"code\":0,\"data\":{\"task_id\":\"t1\"}}");
		})
		.await;
	let request = GenerationRequest::new("a cat on a skateboard").with_duration(3);
	let task = build_client(&server)
		.submit(&token, &request)
		.await
		.expect("Submission should return the task handle.");

	assert_eq!(task.as_str(), "t1");

	mock.assert_async().await;
}

#[tokio::test]
async fn submit_rejection_keeps_status_and_body() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(SUBMIT_PATH);
			then.status(500).body("{\"message\":\"quota exceeded\"}");
		})
		.await;
	let err = build_client(&server)
		.submit(&pinned_token(), &GenerationRequest::default())
		.await
		.expect_err("A 500 submission should fail.");

	match err {
		Error::Submission(SubmissionError::Rejected { status, body }) => {
			assert_eq!(status, 500);
			assert!(body.contains("quota exceeded"));
		},
		other => panic!("Unexpected error: {other:?}"),
	}

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn submit_without_task_id_fails() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(SUBMIT_PATH);
			then.status(200).body("{\"code\":1200,\"message\":\"invalid\",\"data\":null}");
		})
		.await;
	let err = build_client(&server)
		.submit(&pinned_token(), &GenerationRequest::default())
		.await
		.expect_err("A 200 without data.task_id should fail.");

	assert!(matches!(err, Error::Submission(SubmissionError::MissingTaskId { .. })));

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
	let descriptor = ServiceDescriptor::from_base_url("http://127.0.0.1:9")
		.expect("Loopback descriptor should build.");
	let err = ReqwestGenerationClient::new(descriptor)
		.submit(&pinned_token(), &GenerationRequest::default())
		.await
		.expect_err("Nothing listens on the discard port.");

	assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn submit_timeout_is_a_transport_error() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(SUBMIT_PATH);
			then.status(200)
				.delay(std::time::Duration::from_secs(3))
				.body("{\"data\":{\"task_id\":\"t-late\"}}");
		})
		.await;
	let descriptor = ServiceDescriptor::from_base_url(&server.base_url())
		.expect("Mock descriptor should build successfully.");
	let http_client = ReqwestHttpClient::with_timeout(time::Duration::seconds(1))
		.expect("Timed reqwest client should build.");
	let err = ReqwestGenerationClient::with_http_client(descriptor, http_client)
		.submit(&pinned_token(), &GenerationRequest::default())
		.await
		.expect_err("A submission slower than the client timeout should fail.");

	assert!(matches!(err, Error::Transport(_)), "unexpected error: {err:?}");

	mock.assert_calls_async(1).await;
}
