// self
use crate::{
	_prelude::*,
	http::ApiHttpClient,
	resources,
	session::{Session, Verb},
};

impl<C> Session<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Registers a pickup location for shipments of the bound account.
	pub async fn create_pickup_location<B>(&self, body: &B) -> Result<Value>
	where
		B: ?Sized + Serialize,
	{
		const OPERATION: &str = "create_pickup_location";

		let path = self.scoped_path(OPERATION, "pickup/location")?;
		let body = resources::object_body(OPERATION, body)?;

		self.dispatch(OPERATION, Verb::Post, &path, Some(&body), None).await
	}
}
