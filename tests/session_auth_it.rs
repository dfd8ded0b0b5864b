mod common;

// crates.io
use httpmock::prelude::*;
use parcel_client::{
	auth::Credentials,
	config::ClientConfig,
	error::{Error, FailureCause},
	session::{ReqwestSession, SessionState},
	translate::{ErrorCode, ErrorSource},
};
use serde_json::json;
// self
use common::*;

#[tokio::test]
async fn token_request_uses_password_grant_json() {
	let server = MockServer::start_async().await;
	let token = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(TOKEN_PATH)
				.header("content-type", "application/json")
				.header("cache-control", "no-store, private")
				.json_body(password_grant_body());
			then.status(200)
				.header("content-type", "application/json")
				.json_body(token_body("t-1"));
		})
		.await;
	let session = session(&server);
	let minted = session.authenticate().await.expect("Password grant should succeed.");

	assert_eq!(minted.access_token(), "t-1");
	assert_eq!(minted.refresh_token(), "t-1-refresh");
	assert_eq!(minted.token_type(), "bearer");
	assert_eq!(minted.scope(), "user");
	assert!(minted.remaining().whole_seconds() > 3600);
	assert_eq!(session.state(), SessionState::Authenticated);

	token.assert_async().await;
}

#[tokio::test]
async fn calls_share_one_exchange_while_token_is_valid() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server, "t-shared").await;
	let providers = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/provider").header("authorization", "Bearer t-shared");
			then.status(200).json_body(json!([{ "id": 1, "name": "PostNL" }]));
		})
		.await;
	let session = session(&server);

	for _ in 0..3 {
		session.providers().await.expect("Provider listing should succeed.");
	}

	let (a, b) = tokio::join!(session.providers(), session.webhook_events());

	a.expect("Concurrent provider listing should succeed.");
	assert!(matches!(b, Err(Error::Request { .. })), "Unmocked endpoint should fail.");

	token.assert_calls_async(1).await;
	providers.assert_calls_async(4).await;
	assert_eq!(session.auth_metrics().attempts(), 1);
}

#[tokio::test]
async fn oauth_style_rejection_becomes_authentication_error() {
	let server = MockServer::start_async().await;
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(400).header("content-type", "application/json").json_body(json!({
				"error": "invalid_grant",
				"error_description": "Invalid username and password combination",
			}));
		})
		.await;
	let api = server
		.mock_async(|when, then| {
			when.path("/api/provider");
			then.status(200).json_body(json!([]));
		})
		.await;
	let session = session(&server);
	let err = session.providers().await.expect_err("Rejected credentials must surface.");

	assert!(err.is_authentication_failure());

	let Error::Authentication { error, cause } = &err else {
		panic!("Unexpected error: {err:?}");
	};

	assert_eq!(error.source, ErrorSource::OAuth);
	assert_eq!(error.message, "invalid_grant, Invalid username and password combination");
	assert_eq!(error.code, ErrorCode::Number(400));
	assert_eq!(cause.status(), Some(400));
	assert_eq!(session.state(), SessionState::Unauthenticated);
	assert_eq!(
		session.last_response().map(|response| response.status.as_u16()),
		Some(400)
	);
	assert_eq!(session.auth_metrics().failures(), 1);

	token.assert_async().await;
	api.assert_calls_async(0).await;
}

#[tokio::test]
async fn failed_exchange_is_retried_on_the_next_call() {
	let server = MockServer::start_async().await;
	let mut rejection = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(500).body("upstream exploded");
		})
		.await;
	let session = session(&server);
	let err = session.valid_token().await.expect_err("A 500 must surface.");

	assert_eq!(err.structured().map(|e| e.source), Some(ErrorSource::Fallback));
	assert!(
		err.structured().is_some_and(|e| e.message.contains("resulted in HTTP 500")),
		"Fallback message should describe the failed call: {err}."
	);

	rejection.delete_async().await;

	let token = mock_token(&server, "t-retry").await;
	let minted = session.valid_token().await.expect("Second attempt should succeed.");

	assert_eq!(minted.access_token(), "t-retry");

	token.assert_async().await;
}

#[tokio::test]
async fn incomplete_token_payload_is_malformed() {
	let server = MockServer::start_async().await;
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200).json_body(json!({
				"access_token": "t-1",
				"refresh_token": "r-1",
				"token_type": "bearer",
				"expires_in": 3600,
			}));
		})
		.await;
	let api = server
		.mock_async(|when, then| {
			when.path("/api/webhook/events");
			then.status(200).json_body(json!([]));
		})
		.await;
	let session = session(&server);
	let err = session.webhook_events().await.expect_err("A token without scope must be rejected.");

	assert!(matches!(err, Error::MalformedToken(_)));
	assert!(err.is_authentication_failure());
	assert!(session.token().is_none());

	token.assert_async().await;
	api.assert_calls_async(0).await;
}

#[tokio::test]
async fn unreachable_server_yields_transport_cause() {
	let config = ClientConfig::parse("http://127.0.0.1:9/")
		.expect("Loopback base URL should be accepted.")
		.with_timeout(std::time::Duration::from_secs(5));
	let session = ReqwestSession::new(config, Credentials::new("u", "p", "k", "s"))
		.expect("Reqwest session should build.");
	let err = session.authenticate().await.expect_err("Nothing listens on the discard port.");
	let Error::Authentication { error, cause } = &err else {
		panic!("Unexpected error: {err:?}");
	};

	assert!(matches!(cause, FailureCause::Transport(_)));
	assert_eq!(error.source, ErrorSource::Fallback);
	assert_eq!(error.code, ErrorCode::Number(0));
	assert!(session.last_response().is_none());
}
