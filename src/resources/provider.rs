// self
use crate::{
	_prelude::*,
	http::ApiHttpClient,
	session::{Session, Verb},
};

impl<C> Session<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Lists the carriers parcels can be tracked with.
	pub async fn providers(&self) -> Result<Value> {
		self.dispatch("providers", Verb::Get, "/api/provider", None, None).await
	}
}
