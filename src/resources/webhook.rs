// self
use crate::{
	_prelude::*,
	http::ApiHttpClient,
	query::Query,
	resources,
	session::{Session, Verb},
};

/// Event a webhook subscription listens for.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEvent {
	/// A tracked parcel changed status.
	OnParcelChange,
	/// Event name not known to this crate; see [`Session::webhook_events`].
	#[serde(untagged)]
	Other(String),
}

/// Body for [`Session::create_webhook`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWebhook {
	/// Event to subscribe to.
	pub event: WebhookEvent,
	/// URL the signed callback is posted to.
	pub callback: Url,
}
impl NewWebhook {
	/// Subscribes `callback` to `event`.
	pub fn new(event: WebhookEvent, callback: Url) -> Self {
		Self { event, callback }
	}
}

impl<C> Session<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Lists the event names webhooks can subscribe to.
	pub async fn webhook_events(&self) -> Result<Value> {
		self.dispatch("webhook_events", Verb::Get, "/api/webhook/events", None, None).await
	}

	/// Lists webhook subscriptions of the bound account.
	pub async fn webhooks(&self, query: Option<&Query>) -> Result<Value> {
		const OPERATION: &str = "webhooks";

		let path = self.scoped_path(OPERATION, "webhook")?;

		self.dispatch(OPERATION, Verb::Get, &path, None, query).await
	}

	/// Subscribes a callback URL to an event.
	pub async fn create_webhook<B>(&self, body: &B) -> Result<Value>
	where
		B: ?Sized + Serialize,
	{
		const OPERATION: &str = "create_webhook";

		let path = self.scoped_path(OPERATION, "webhook")?;
		let body = resources::object_body(OPERATION, body)?;

		self.dispatch(OPERATION, Verb::Post, &path, Some(&body), None).await
	}

	/// Removes a webhook subscription.
	pub async fn delete_webhook(&self, id: impl AsRef<str>) -> Result<Value> {
		const OPERATION: &str = "delete_webhook";

		let scope = self.scoped_path(OPERATION, "webhook")?;
		let id = resources::resource_id(id)?;
		let path = format!("{scope}/{id}");

		self.dispatch(OPERATION, Verb::Delete, &path, None, None).await
	}
}
