// self
use crate::{
	_prelude::*,
	http::ApiHttpClient,
	query::Query,
	resources,
	session::{Session, Verb},
};

/// Body for [`Session::create_account`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
	/// Display name of the account.
	pub name: String,
}
impl NewAccount {
	/// Creates a body for an account named `name`.
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into() }
	}
}

impl<C> Session<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Lists accounts visible to the authenticated user.
	pub async fn accounts(&self, query: Option<&Query>) -> Result<Value> {
		self.dispatch("accounts", Verb::Get, "/api/account", None, query).await
	}

	/// Creates an account. The response carries the `id` to pass to [`Session::set_account_id`].
	pub async fn create_account<B>(&self, body: &B) -> Result<Value>
	where
		B: ?Sized + Serialize,
	{
		const OPERATION: &str = "create_account";

		let body = resources::object_body(OPERATION, body)?;

		self.dispatch(OPERATION, Verb::Post, "/api/account", Some(&body), None).await
	}

	/// Deletes an account.
	pub async fn delete_account(&self, id: impl AsRef<str>) -> Result<Value> {
		let id = resources::resource_id(id)?;

		self.dispatch("delete_account", Verb::Delete, &format!("/api/account/{id}"), None, None)
			.await
	}
}
