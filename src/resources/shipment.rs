// self
use crate::{
	_prelude::*,
	http::ApiHttpClient,
	query::Query,
	resources,
	session::{Session, Verb},
};

impl<C> Session<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Lists shipments of the bound account.
	pub async fn shipments(&self, query: Option<&Query>) -> Result<Value> {
		const OPERATION: &str = "shipments";

		let path = self.scoped_path(OPERATION, "shipment")?;

		self.dispatch(OPERATION, Verb::Get, &path, None, query).await
	}

	/// Fetches one shipment.
	pub async fn shipment(&self, id: impl AsRef<str>) -> Result<Value> {
		const OPERATION: &str = "shipment";

		let scope = self.scoped_path(OPERATION, "shipment")?;
		let id = resources::resource_id(id)?;
		let path = format!("{scope}/{id}");

		self.dispatch(OPERATION, Verb::Get, &path, None, None).await
	}

	/// Creates a shipment.
	pub async fn create_shipment<B>(&self, body: &B) -> Result<Value>
	where
		B: ?Sized + Serialize,
	{
		const OPERATION: &str = "create_shipment";

		let path = self.scoped_path(OPERATION, "shipment")?;
		let body = resources::object_body(OPERATION, body)?;

		self.dispatch(OPERATION, Verb::Post, &path, Some(&body), None).await
	}

	/// Deletes a shipment.
	pub async fn delete_shipment(&self, id: impl AsRef<str>) -> Result<Value> {
		const OPERATION: &str = "delete_shipment";

		let scope = self.scoped_path(OPERATION, "shipment")?;
		let id = resources::resource_id(id)?;
		let path = format!("{scope}/{id}");

		self.dispatch(OPERATION, Verb::Delete, &path, None, None).await
	}
}
