//! Authenticated session that owns credentials, the current bearer token, and the account scope.

mod authenticate;
mod metrics;
mod request;

pub use metrics::*;
pub use request::*;

// std
use std::sync::OnceLock;
// crates.io
use oauth2::{HttpResponse, http::Method};
// self
use crate::{
	_prelude::*,
	auth::{AccountId, Credentials, Token},
	config::ClientConfig,
	error::FailureCause,
	http::{ApiHttpClient, FailedResponse, LastResponseSlot},
	translate::{self, StructuredError},
};
#[cfg(feature = "reqwest")]
use crate::{error::ConfigError, http::ReqwestHttpClient};

#[cfg(feature = "reqwest")]
/// Session specialized for the crate's default reqwest transport.
pub type ReqwestSession = Session<ReqwestHttpClient>;

/// Token lifecycle state observed by [`Session::state`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
	/// No token has been minted yet, or the last exchange failed before one existed.
	Unauthenticated,
	/// A token is present and has not reached its expiry instant.
	Authenticated,
	/// A token is present but expired; the next call re-authenticates.
	Expired,
}

/// Authenticated requester for the parcel API.
///
/// Each call checks the cached [`Token`] first and runs the password-grant exchange when it is
/// missing or expired. A single async guard serializes exchanges, so concurrent callers that
/// observe an expired token wait for one exchange instead of each minting their own. The token
/// slot is replaced wholesale, never mutated, so in-flight calls see either the old or the new
/// token.
///
/// Clones share the token, account scope, last failed response, and metrics.
pub struct Session<C>
where
	C: ?Sized + ApiHttpClient,
{
	http_client: Arc<C>,
	config: ClientConfig,
	credentials: Arc<Credentials>,
	account: Arc<OnceLock<AccountId>>,
	token: Arc<RwLock<Option<Arc<Token>>>>,
	auth_guard: Arc<AsyncMutex<()>>,
	last_response: LastResponseSlot,
	auth_metrics: Arc<AuthMetrics>,
}
impl<C> Session<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a session that sends every call through the caller-provided transport.
	pub fn with_http_client(
		config: ClientConfig,
		credentials: Credentials,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			config,
			credentials: Arc::new(credentials),
			account: Default::default(),
			token: Default::default(),
			auth_guard: Default::default(),
			last_response: Default::default(),
			auth_metrics: Default::default(),
		}
	}

	/// Binds the account scope and returns the session.
	pub fn with_account_id(self, account_id: AccountId) -> Result<Self> {
		self.set_account_id(account_id)?;

		Ok(self)
	}

	/// Binds the account scope used by account-scoped endpoints.
	///
	/// The scope can be set once per session. Setting the same identifier again is a no-op;
	/// a different identifier fails with [`Error::AccountAlreadySet`].
	pub fn set_account_id(&self, account_id: AccountId) -> Result<()> {
		let current = self.account.get_or_init(|| account_id.clone());

		if current == &account_id {
			Ok(())
		} else {
			Err(Error::AccountAlreadySet { current: current.clone() })
		}
	}

	/// Account scope, if set.
	pub fn account_id(&self) -> Option<&AccountId> {
		self.account.get()
	}

	/// Returns the account scope or fails with [`Error::AccountNotSet`] naming `operation`.
	pub fn require_account_id(&self, operation: &'static str) -> Result<&AccountId> {
		self.account.get().ok_or(Error::AccountNotSet { operation })
	}

	/// Session configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Underlying transport.
	pub fn http_client(&self) -> &C {
		&self.http_client
	}

	/// Current token snapshot, expired or not.
	pub fn token(&self) -> Option<Arc<Token>> {
		self.token.read().clone()
	}

	/// Token lifecycle state at the current instant.
	pub fn state(&self) -> SessionState {
		match self.token.read().as_deref() {
			None => SessionState::Unauthenticated,
			Some(token) if token.has_expired() => SessionState::Expired,
			Some(_) => SessionState::Authenticated,
		}
	}

	/// Most recent non-2xx response received by this session.
	pub fn last_response(&self) -> Option<FailedResponse> {
		self.last_response.get()
	}

	/// Takes the most recent non-2xx response, leaving the slot empty.
	pub fn take_last_response(&self) -> Option<FailedResponse> {
		self.last_response.take()
	}

	/// Password-grant counters for this session.
	pub fn auth_metrics(&self) -> &AuthMetrics {
		&self.auth_metrics
	}

	fn unexpired_token(&self, now: OffsetDateTime) -> Option<Arc<Token>> {
		self.token.read().as_ref().filter(|token| !token.has_expired_at(now)).cloned()
	}

	fn store_token(&self, token: Arc<Token>) {
		*self.token.write() = Some(token);
	}

	// Records a received non-2xx response and classifies it.
	fn reject(
		&self,
		method: Method,
		url: &Url,
		response: &HttpResponse,
	) -> (StructuredError, FailureCause) {
		let status = response.status().as_u16();
		let cause = FailureCause::Status { method, url: url.to_string(), status };
		let body = Some(response.body().as_slice());
		let error = translate::translate(Some(status), body, &cause.to_string(), status.into());

		self.last_response.store(FailedResponse::from_response(response));

		(error, cause)
	}
}
#[cfg(feature = "reqwest")]
impl Session<ReqwestHttpClient> {
	/// Creates a session backed by a reqwest client built from `config`.
	///
	/// The client honors the configured timeout and user agent and never follows redirects, so
	/// bearer headers are only ever sent to the configured API host.
	pub fn new(config: ClientConfig, credentials: Credentials) -> Result<Self> {
		let mut builder = ReqwestClient::builder().redirect(reqwest::redirect::Policy::none());

		if let Some(timeout) = config.timeout() {
			builder = builder.timeout(timeout);
		}
		if let Some(user_agent) = config.user_agent() {
			builder = builder.user_agent(user_agent.to_owned());
		}

		let client = builder.build().map_err(ConfigError::from)?;

		Ok(Self::with_http_client(config, credentials, ReqwestHttpClient::with_client(client)))
	}
}
impl<C> Clone for Session<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			config: self.config.clone(),
			credentials: self.credentials.clone(),
			account: self.account.clone(),
			token: self.token.clone(),
			auth_guard: self.auth_guard.clone(),
			last_response: self.last_response.clone(),
			auth_metrics: self.auth_metrics.clone(),
		}
	}
}
impl<C> Debug for Session<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Session")
			.field("base_url", &self.config.base_url().as_str())
			.field("credentials", &self.credentials)
			.field("account_id", &self.account.get())
			.field("state", &self.state())
			.finish()
	}
}
