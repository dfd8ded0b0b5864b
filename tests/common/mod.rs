//! Shared helpers for httpmock-backed integration tests.

#![allow(dead_code)]

// crates.io
use httpmock::{Mock, prelude::*};
use parcel_client::{
	auth::{AccountId, Credentials},
	config::ClientConfig,
	session::ReqwestSession,
};
use serde_json::{Value, json};

pub const USERNAME: &str = "jane@example.com";
pub const PASSWORD: &str = "hunter2";
pub const CLIENT_ID: &str = "api-key";
pub const CLIENT_SECRET: &str = "api-secret";
pub const ACCOUNT: &str = "acc-1";
pub const TOKEN_PATH: &str = "/oauth/v2/token";

/// Token endpoint payload minting `access_token` for one hour.
pub fn token_body(access_token: &str) -> Value {
	json!({
		"access_token": access_token,
		"refresh_token": format!("{access_token}-refresh"),
		"token_type": "bearer",
		"scope": "user",
		"expires_in": 3600,
	})
}

/// Password-grant body the session is expected to post.
pub fn password_grant_body() -> Value {
	json!({
		"grant_type": "password",
		"username": USERNAME,
		"password": PASSWORD,
		"client_id": CLIENT_ID,
		"client_secret": CLIENT_SECRET,
	})
}

pub fn credentials() -> Credentials {
	Credentials::new(USERNAME, PASSWORD, CLIENT_ID, CLIENT_SECRET)
}

/// Reqwest-backed session pointed at the mock server.
pub fn session(server: &MockServer) -> ReqwestSession {
	let config = ClientConfig::parse(&server.base_url())
		.expect("Mock server base URL should be a valid client base URL.");

	ReqwestSession::new(config, credentials()).expect("Reqwest session should build.")
}

/// Session already bound to [`ACCOUNT`].
pub fn scoped_session(server: &MockServer) -> ReqwestSession {
	session(server)
		.with_account_id(AccountId::new(ACCOUNT).expect("Fixture account id should be valid."))
		.expect("Account scope should bind on a fresh session.")
}

/// Token endpoint mock answering every exchange with `access_token`.
pub async fn mock_token<'a>(server: &'a MockServer, access_token: &str) -> Mock<'a> {
	let body = token_body(access_token);

	server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200).header("content-type", "application/json").json_body(body);
		})
		.await
}
