// self
use crate::{
	_prelude::*,
	auth::{ResourceId, Secret},
	http::ApiHttpClient,
	query::Query,
	resources,
	session::{Session, Verb},
};

/// Body for [`Session::create_provider_credential`].
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct NewProviderCredential {
	/// Provider the credential belongs to.
	pub provider: ResourceId,
	/// Carrier API key.
	pub api_key: String,
	/// Carrier API secret.
	#[serde(serialize_with = "expose_secret")]
	pub api_secret: Secret,
}
impl NewProviderCredential {
	/// Bundles carrier API credentials for `provider`.
	pub fn new(
		provider: ResourceId,
		api_key: impl Into<String>,
		api_secret: impl Into<String>,
	) -> Self {
		Self { provider, api_key: api_key.into(), api_secret: Secret::new(api_secret) }
	}
}
impl Debug for NewProviderCredential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("NewProviderCredential")
			.field("provider", &self.provider)
			.field("api_key", &self.api_key)
			.field("api_secret", &self.api_secret)
			.finish()
	}
}

/// Partial update for [`Session::update_provider_credential`]; unset fields are left untouched.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProviderCredentialPatch {
	/// Replacement carrier API key.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub api_key: Option<String>,
	/// Replacement carrier API secret.
	#[serde(skip_serializing_if = "Option::is_none", serialize_with = "expose_optional_secret")]
	pub api_secret: Option<Secret>,
}
impl ProviderCredentialPatch {
	/// Replaces the API key.
	pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
		self.api_key = Some(api_key.into());

		self
	}

	/// Replaces the API secret.
	pub fn with_api_secret(mut self, api_secret: impl Into<String>) -> Self {
		self.api_secret = Some(Secret::new(api_secret));

		self
	}
}
impl Debug for ProviderCredentialPatch {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ProviderCredentialPatch")
			.field("api_key", &self.api_key)
			.field("api_secret", &self.api_secret)
			.finish()
	}
}

impl<C> Session<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Lists carrier credentials stored for the bound account.
	pub async fn provider_credentials(&self, query: Option<&Query>) -> Result<Value> {
		const OPERATION: &str = "provider_credentials";

		let path = self.scoped_path(OPERATION, "provider/credential")?;

		self.dispatch(OPERATION, Verb::Get, &path, None, query).await
	}

	/// Fetches one stored carrier credential.
	pub async fn provider_credential(&self, id: impl AsRef<str>) -> Result<Value> {
		const OPERATION: &str = "provider_credential";

		let scope = self.scoped_path(OPERATION, "provider/credential")?;
		let id = resources::resource_id(id)?;
		let path = format!("{scope}/{id}");

		self.dispatch(OPERATION, Verb::Get, &path, None, None).await
	}

	/// Stores carrier credentials for the bound account.
	pub async fn create_provider_credential<B>(&self, body: &B) -> Result<Value>
	where
		B: ?Sized + Serialize,
	{
		const OPERATION: &str = "create_provider_credential";

		let path = self.scoped_path(OPERATION, "provider/credential")?;
		let body = resources::object_body(OPERATION, body)?;

		self.dispatch(OPERATION, Verb::Post, &path, Some(&body), None).await
	}

	/// Partially updates a stored carrier credential.
	pub async fn update_provider_credential<B>(
		&self,
		id: impl AsRef<str>,
		body: &B,
	) -> Result<Value>
	where
		B: ?Sized + Serialize,
	{
		const OPERATION: &str = "update_provider_credential";

		let scope = self.scoped_path(OPERATION, "provider/credential")?;
		let id = resources::resource_id(id)?;
		let path = format!("{scope}/{id}");
		let body = resources::object_body(OPERATION, body)?;

		self.dispatch(OPERATION, Verb::Patch, &path, Some(&body), None).await
	}

	/// Deletes a stored carrier credential.
	pub async fn delete_provider_credential(&self, id: impl AsRef<str>) -> Result<Value> {
		const OPERATION: &str = "delete_provider_credential";

		let scope = self.scoped_path(OPERATION, "provider/credential")?;
		let id = resources::resource_id(id)?;
		let path = format!("{scope}/{id}");

		self.dispatch(OPERATION, Verb::Delete, &path, None, None).await
	}
}

fn expose_secret<S>(secret: &Secret, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
	S: serde::Serializer,
{
	serializer.serialize_str(secret.expose())
}

fn expose_optional_secret<S>(
	secret: &Option<Secret>,
	serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
	S: serde::Serializer,
{
	match secret {
		Some(secret) => serializer.serialize_some(secret.expose()),
		None => serializer.serialize_none(),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn credential_bodies_expose_secrets_only_on_the_wire() {
		let provider = ResourceId::new("7").expect("Fixture provider id should be valid.");
		let body = NewProviderCredential::new(provider, "test_api_key", "test_api_secret");

		assert_eq!(
			serde_json::to_value(&body).expect("Credential body should serialize."),
			serde_json::json!({
				"provider": "7",
				"api_key": "test_api_key",
				"api_secret": "test_api_secret",
			})
		);
		assert!(!format!("{body:?}").contains("test_api_secret"));
	}

	#[test]
	fn patches_skip_unset_fields() {
		let patch = ProviderCredentialPatch::default().with_api_secret("rotated");

		assert_eq!(
			serde_json::to_value(&patch).expect("Patch should serialize."),
			serde_json::json!({ "api_secret": "rotated" })
		);
		assert_eq!(
			serde_json::to_value(ProviderCredentialPatch::default())
				.expect("Empty patch should serialize."),
			serde_json::json!({})
		);
	}
}
