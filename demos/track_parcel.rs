//! Walks through onboarding an account and tracking a parcel against a local mock of the API.
//!
//! The flow creates an account, binds it as the session's account scope, stores carrier
//! credentials, starts tracking a parcel, and subscribes a webhook. Every call after the first
//! reuses the token minted by the initial password-grant exchange.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use parcel_client::{
	auth::{AccountId, Credentials, ResourceId},
	config::ClientConfig,
	resources::{NewAccount, NewParcel, NewProviderCredential, NewWebhook, WebhookEvent},
	session::ReqwestSession,
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/v2/token");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"access_token": "demo-access",
				"refresh_token": "demo-refresh",
				"token_type": "bearer",
				"scope": "user",
				"expires_in": 3600,
			}));
		})
		.await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/account");
			then.status(201).json_body(json!({ "id": 41, "name": "account name" }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/provider");
			then.status(200).json_body(json!([{ "id": 1, "name": "PostNL" }]));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/account/41/provider/credential");
			then.status(201).json_body(json!({ "id": 12, "provider": 1 }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/account/41/parcel");
			then.status(201).json_body(json!({ "id": 5, "status": "registered" }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/account/41/parcel/5");
			then.status(200).json_body(json!({ "id": 5, "status": "in_transit" }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/account/41/webhook");
			then.status(201).json_body(json!({ "id": 9, "event": "on_parcel_change" }));
		})
		.await;

	let config = ClientConfig::parse(&server.base_url())?.with_user_agent("parcel-client-demo");
	let session = ReqwestSession::new(
		config,
		Credentials::new("username", "password", "api_key", "api_secret"),
	)?;
	let account = session.create_account(&NewAccount::new("account name")).await?;

	session.set_account_id(AccountId::from_json(&account["id"])?)?;

	let providers = session.providers().await?;
	let provider = ResourceId::from_json(&providers[0]["id"])?;
	let credential = session
		.create_provider_credential(&NewProviderCredential::new(
			provider,
			"test_api_key",
			"test_api_secret",
		))
		.await?;
	let parcel = session
		.create_parcel(
			&NewParcel::new(ResourceId::from_json(&credential["id"])?, "S10000000000000")
				.with_postalcode("1000AA"),
		)
		.await?;
	let parcel = session.parcel(ResourceId::from_json(&parcel["id"])?).await?;

	println!("Parcel {} is {}.", parcel["id"], parcel["status"].as_str().unwrap_or("unknown"));

	let webhook = session
		.create_webhook(&NewWebhook::new(
			WebhookEvent::OnParcelChange,
			Url::parse("https://www.example.com/")?,
		))
		.await?;

	println!("Webhook {} listens for {}.", webhook["id"], webhook["event"].as_str().unwrap_or("?"));
	println!("Password-grant exchanges performed: {}.", session.auth_metrics().attempts());

	token_mock.assert_calls_async(1).await;

	Ok(())
}
