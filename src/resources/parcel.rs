// self
use crate::{
	_prelude::*,
	auth::ResourceId,
	http::ApiHttpClient,
	query::Query,
	resources,
	session::{Session, Verb},
};

/// Body for [`Session::create_parcel`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewParcel {
	/// Stored carrier credential used to track the parcel.
	pub provider_credential: ResourceId,
	/// Carrier tracking number.
	pub tracking_id: String,
	/// Destination postal code, required by carriers that verify it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub postalcode: Option<String>,
}
impl NewParcel {
	/// Tracks `tracking_id` through `provider_credential`.
	pub fn new(provider_credential: ResourceId, tracking_id: impl Into<String>) -> Self {
		Self { provider_credential, tracking_id: tracking_id.into(), postalcode: None }
	}

	/// Sets the destination postal code.
	pub fn with_postalcode(mut self, postalcode: impl Into<String>) -> Self {
		self.postalcode = Some(postalcode.into());

		self
	}
}

impl<C> Session<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Lists parcels tracked by the bound account.
	pub async fn parcels(&self, query: Option<&Query>) -> Result<Value> {
		const OPERATION: &str = "parcels";

		let path = self.scoped_path(OPERATION, "parcel")?;

		self.dispatch(OPERATION, Verb::Get, &path, None, query).await
	}

	/// Fetches one parcel with its latest tracking state.
	pub async fn parcel(&self, id: impl AsRef<str>) -> Result<Value> {
		const OPERATION: &str = "parcel";

		let scope = self.scoped_path(OPERATION, "parcel")?;
		let id = resources::resource_id(id)?;
		let path = format!("{scope}/{id}");

		self.dispatch(OPERATION, Verb::Get, &path, None, None).await
	}

	/// Starts tracking a parcel.
	pub async fn create_parcel<B>(&self, body: &B) -> Result<Value>
	where
		B: ?Sized + Serialize,
	{
		const OPERATION: &str = "create_parcel";

		let path = self.scoped_path(OPERATION, "parcel")?;
		let body = resources::object_body(OPERATION, body)?;

		self.dispatch(OPERATION, Verb::Post, &path, Some(&body), None).await
	}

	/// Stops tracking a parcel.
	pub async fn delete_parcel(&self, id: impl AsRef<str>) -> Result<Value> {
		const OPERATION: &str = "delete_parcel";

		let scope = self.scoped_path(OPERATION, "parcel")?;
		let id = resources::resource_id(id)?;
		let path = format!("{scope}/{id}");

		self.dispatch(OPERATION, Verb::Delete, &path, None, None).await
	}
}
