mod common;

// crates.io
use httpmock::prelude::*;
use parcel_client::{
	auth::{AccountId, ResourceId},
	error::Error,
	query::Query,
	resources::{
		NewAccount, NewParcel, NewProviderCredential, NewWebhook, ProviderCredentialPatch,
		WebhookEvent,
	},
	session::ReqwestSession,
	url::Url,
};
use serde_json::{Value, json};
// self
use common::*;

async fn expect_account_not_set<F>(call: F, operation: &str)
where
	F: Future<Output = Result<Value, Error>>,
{
	match call.await {
		Err(Error::AccountNotSet { operation: reported }) => assert_eq!(reported, operation),
		other => panic!("`{operation}` should require the account scope, got {other:?}."),
	}
}

#[tokio::test]
async fn every_account_scoped_operation_requires_the_scope() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server, "t-unscoped").await;
	let session = session(&server);
	let body = json!({ "name": "x" });

	expect_account_not_set(session.provider_credentials(None), "provider_credentials").await;
	expect_account_not_set(session.provider_credential("1"), "provider_credential").await;
	expect_account_not_set(session.create_provider_credential(&body), "create_provider_credential")
		.await;
	expect_account_not_set(
		session.update_provider_credential("1", &body),
		"update_provider_credential",
	)
	.await;
	expect_account_not_set(session.delete_provider_credential("1"), "delete_provider_credential")
		.await;
	expect_account_not_set(session.create_pickup_location(&body), "create_pickup_location").await;
	expect_account_not_set(session.parcels(None), "parcels").await;
	expect_account_not_set(session.parcel("1"), "parcel").await;
	expect_account_not_set(session.create_parcel(&body), "create_parcel").await;
	expect_account_not_set(session.delete_parcel("1"), "delete_parcel").await;
	expect_account_not_set(session.shipments(None), "shipments").await;
	expect_account_not_set(session.shipment("1"), "shipment").await;
	expect_account_not_set(session.create_shipment(&body), "create_shipment").await;
	expect_account_not_set(session.delete_shipment("1"), "delete_shipment").await;
	expect_account_not_set(session.webhooks(None), "webhooks").await;
	expect_account_not_set(session.create_webhook(&body), "create_webhook").await;
	expect_account_not_set(session.delete_webhook("1"), "delete_webhook").await;

	token.assert_calls_async(0).await;
}

#[tokio::test]
async fn missing_scope_is_reported_before_argument_validation() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server, "t-order").await;
	let session = session(&server);
	let not_an_object = json!([1]);

	expect_account_not_set(session.parcel("a/b"), "parcel").await;
	expect_account_not_set(session.delete_shipment(""), "delete_shipment").await;
	expect_account_not_set(session.delete_webhook("x y"), "delete_webhook").await;
	expect_account_not_set(
		session.update_provider_credential("1?2", &not_an_object),
		"update_provider_credential",
	)
	.await;
	expect_account_not_set(session.create_parcel(&not_an_object), "create_parcel").await;
	expect_account_not_set(session.create_pickup_location("x"), "create_pickup_location").await;

	token.assert_calls_async(0).await;
}

#[tokio::test]
async fn unscoped_operations_work_without_the_scope() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server, "t-unscoped").await;
	let accounts = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/account").query_param("limit", "10");
			then.status(200).json_body(json!([]));
		})
		.await;
	let create = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/account").json_body(json!({ "name": "account name" }));
			then.status(201).json_body(json!({ "id": 77, "name": "account name" }));
		})
		.await;
	let delete = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/api/account/77");
			then.status(204);
		})
		.await;
	let providers = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/provider");
			then.status(200).json_body(json!([]));
		})
		.await;
	let events = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/webhook/events");
			then.status(200).json_body(json!(["on_parcel_change"]));
		})
		.await;
	let session = session(&server);

	session.accounts(Some(&Query::new().with("limit", 10))).await.expect("Accounts should list.");

	let account = session
		.create_account(&NewAccount::new("account name"))
		.await
		.expect("Account creation should succeed.");
	let account_id =
		AccountId::from_json(&account["id"]).expect("Created account id should be usable.");

	session.set_account_id(account_id.clone()).expect("Fresh session should accept the scope.");

	assert_eq!(session.account_id(), Some(&account_id));

	session.providers().await.expect("Providers should list.");
	session.webhook_events().await.expect("Webhook events should list.");
	session.delete_account(&account_id).await.expect("Account deletion should succeed.");

	accounts.assert_async().await;
	create.assert_async().await;
	delete.assert_async().await;
	providers.assert_async().await;
	events.assert_async().await;
}

#[tokio::test]
async fn scoped_endpoint_table() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server, "t-table").await;
	let routes = [
		(GET, "/api/account/acc-1/provider/credential"),
		(POST, "/api/account/acc-1/provider/credential"),
		(GET, "/api/account/acc-1/provider/credential/3"),
		(PATCH, "/api/account/acc-1/provider/credential/3"),
		(DELETE, "/api/account/acc-1/provider/credential/3"),
		(POST, "/api/account/acc-1/pickup/location"),
		(GET, "/api/account/acc-1/parcel"),
		(POST, "/api/account/acc-1/parcel"),
		(GET, "/api/account/acc-1/parcel/5"),
		(DELETE, "/api/account/acc-1/parcel/5"),
		(GET, "/api/account/acc-1/shipment"),
		(POST, "/api/account/acc-1/shipment"),
		(GET, "/api/account/acc-1/shipment/8"),
		(DELETE, "/api/account/acc-1/shipment/8"),
		(GET, "/api/account/acc-1/webhook"),
		(POST, "/api/account/acc-1/webhook"),
		(DELETE, "/api/account/acc-1/webhook/9"),
	];
	let mut mocks = Vec::new();

	for (method, path) in routes {
		mocks.push(
			server
				.mock_async(|when, then| {
					when.method(method).path(path).header("authorization", "Bearer t-table");
					then.status(200).json_body(json!({ "ok": true }));
				})
				.await,
		);
	}

	let session = scoped_session(&server);

	run_scoped_operations(&session).await;

	for mock in &mocks {
		mock.assert_async().await;
	}
}

async fn run_scoped_operations(session: &ReqwestSession) {
	let provider = ResourceId::new("7").expect("Fixture provider id should be valid.");
	let credential = ResourceId::new("3").expect("Fixture credential id should be valid.");
	let callback = Url::parse("https://www.example.com/").expect("Fixture callback should parse.");

	session.provider_credentials(None).await.expect("provider_credentials");
	session
		.create_provider_credential(&NewProviderCredential::new(provider, "key", "secret"))
		.await
		.expect("create_provider_credential");
	session.provider_credential(&credential).await.expect("provider_credential");
	session
		.update_provider_credential(
			&credential,
			&ProviderCredentialPatch::default().with_api_key("rotated"),
		)
		.await
		.expect("update_provider_credential");
	session.delete_provider_credential(&credential).await.expect("delete_provider_credential");
	session
		.create_pickup_location(&json!({ "name": "Depot", "postalcode": "1000AA" }))
		.await
		.expect("create_pickup_location");
	session.parcels(None).await.expect("parcels");
	session
		.create_parcel(&NewParcel::new(credential, "S10000000000000").with_postalcode("1000AA"))
		.await
		.expect("create_parcel");
	session.parcel("5").await.expect("parcel");
	session.delete_parcel("5").await.expect("delete_parcel");
	session.shipments(None).await.expect("shipments");
	session.create_shipment(&json!({ "parcel": 5 })).await.expect("create_shipment");
	session.shipment("8").await.expect("shipment");
	session.delete_shipment("8").await.expect("delete_shipment");
	session.webhooks(None).await.expect("webhooks");
	session
		.create_webhook(&NewWebhook::new(WebhookEvent::OnParcelChange, callback))
		.await
		.expect("create_webhook");
	session.delete_webhook("9").await.expect("delete_webhook");
}

#[tokio::test]
async fn invalid_identifiers_and_bodies_are_rejected_locally() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server, "t-local").await;
	let session = scoped_session(&server);

	assert!(matches!(session.parcel("5/../../account").await, Err(Error::InvalidIdentifier(_))));
	assert!(matches!(session.delete_webhook("").await, Err(Error::InvalidIdentifier(_))));
	assert!(matches!(
		session.create_parcel(&json!(["not", "an", "object"])).await,
		Err(Error::InvalidBody { operation: "create_parcel" })
	));
	assert!(matches!(
		session.create_account("name").await,
		Err(Error::InvalidBody { operation: "create_account" })
	));

	token.assert_calls_async(0).await;
}
