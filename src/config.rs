//! Session configuration: API base URL and transport tuning.

// self
use crate::{_prelude::*, error::ConfigError};

/// Production API base used by [`ClientConfig::production`].
pub const DEFAULT_BASE_URL: &str = "https://onetotrack.nujob.nl/";

/// Connection settings shared by every call a session makes.
///
/// The base URL always ends with `/`, so endpoint paths join beneath any path prefix it carries
/// (`https://proxy.example.com/tracking/` + `api/parcel` keeps `/tracking`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawClientConfig")]
pub struct ClientConfig {
	base_url: Url,
	#[serde(skip_serializing_if = "Option::is_none")]
	timeout: Option<std::time::Duration>,
	#[serde(skip_serializing_if = "Option::is_none")]
	user_agent: Option<String>,
}
impl ClientConfig {
	/// Creates a configuration for `base_url` after validating it.
	pub fn new(base_url: Url) -> Result<Self, ConfigError> {
		Ok(Self { base_url: normalize_base_url(base_url)?, timeout: None, user_agent: None })
	}

	/// Configuration for the production API at [`DEFAULT_BASE_URL`].
	pub fn production() -> Result<Self, ConfigError> {
		Self::parse(DEFAULT_BASE_URL)
	}

	/// Parses and validates `base_url`.
	pub fn parse(base_url: &str) -> Result<Self, ConfigError> {
		let url = Url::parse(base_url).map_err(|_| ConfigError::InvalidBaseUrl {
			url: base_url.to_owned(),
			reason: "not an absolute URL",
		})?;

		Self::new(url)
	}

	/// Sets the per-call transport timeout.
	pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Sets the `User-Agent` header sent by the built-in transport.
	pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());

		self
	}

	/// Validated base URL, always ending with `/`.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Per-call transport timeout, if any.
	pub fn timeout(&self) -> Option<std::time::Duration> {
		self.timeout
	}

	/// Custom user agent, if any.
	pub fn user_agent(&self) -> Option<&str> {
		self.user_agent.as_deref()
	}

	/// Resolves a server-relative endpoint path against the base URL.
	///
	/// The result must stay on the base URL's origin and beneath its path, so absolute URLs and
	/// `..` segments that climb out of the prefix are rejected.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		let url = self
			.base_url
			.join(path.trim_start_matches('/'))
			.map_err(|source| ConfigError::InvalidEndpoint { path: path.to_owned(), source })?;

		let contained = url.origin() == self.base_url.origin()
			&& url.path().starts_with(self.base_url.path());

		if !contained {
			return Err(ConfigError::EndpointOutsideBase { path: path.to_owned() });
		}

		Ok(url)
	}
}

#[derive(Deserialize)]
struct RawClientConfig {
	#[serde(default)]
	base_url: Option<Url>,
	#[serde(default)]
	timeout: Option<std::time::Duration>,
	#[serde(default)]
	user_agent: Option<String>,
}
impl TryFrom<RawClientConfig> for ClientConfig {
	type Error = ConfigError;

	fn try_from(raw: RawClientConfig) -> Result<Self, Self::Error> {
		let config = match raw.base_url {
			Some(base_url) => Self::new(base_url)?,
			None => Self::production()?,
		};

		Ok(Self { timeout: raw.timeout, user_agent: raw.user_agent, ..config })
	}
}

fn normalize_base_url(mut url: Url) -> Result<Url, ConfigError> {
	let reject = |url: &Url, reason| ConfigError::InvalidBaseUrl { url: url.to_string(), reason };

	if !matches!(url.scheme(), "http" | "https") {
		return Err(reject(&url, "scheme must be http or https"));
	}
	if url.cannot_be_a_base() {
		return Err(reject(&url, "URL cannot be used as a base"));
	}
	if url.query().is_some() || url.fragment().is_some() {
		return Err(reject(&url, "query and fragment are not allowed"));
	}
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	Ok(url)
}
