//! Password-grant exchange with singleflight re-authentication.

// crates.io
use oauth2::http::{
	Method, Request,
	header::{ACCEPT, CACHE_CONTROL, CONNECTION, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	auth::Token,
	error::{ConfigError, FailureCause, TransportError},
	http::ApiHttpClient,
	obs::{self, CallKind, CallOutcome, CallSpan},
	session::Session,
	translate::{self, ErrorCode},
};

const TOKEN_ENDPOINT: &str = "oauth/v2/token";

impl<C> Session<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Returns an unexpired token, running the password-grant exchange first when needed.
	///
	/// Callers that find the token missing or expired queue behind one guard; after acquiring it
	/// the check is repeated, so only the first of them contacts the token endpoint.
	pub async fn valid_token(&self) -> Result<Arc<Token>> {
		if let Some(token) = self.unexpired_token(OffsetDateTime::now_utc()) {
			return Ok(token);
		}

		let _singleflight = self.auth_guard.lock().await;

		if let Some(token) = self.unexpired_token(OffsetDateTime::now_utc()) {
			return Ok(token);
		}

		self.exchange_password().await
	}

	/// Runs the password-grant exchange unconditionally and stores the new token.
	pub async fn authenticate(&self) -> Result<Arc<Token>> {
		let _singleflight = self.auth_guard.lock().await;

		self.exchange_password().await
	}

	async fn exchange_password(&self) -> Result<Arc<Token>> {
		const KIND: CallKind = CallKind::Authenticate;

		let span = CallSpan::new(KIND, "authenticate");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);
		self.auth_metrics.record_attempt();

		let result = span.instrument(self.request_token()).await;

		obs::record_call_outcome(KIND, CallOutcome::of(&result));

		match &result {
			Ok(token) => {
				self.auth_metrics.record_success();
				self.store_token(token.clone());
			},
			Err(_) => self.auth_metrics.record_failure(),
		}

		result
	}

	async fn request_token(&self) -> Result<Arc<Token>> {
		let url = self.config.endpoint(TOKEN_ENDPOINT)?;
		let body = serde_json::to_vec(&self.credentials.password_grant()).map_err(Error::Encode)?;
		let request = Request::builder()
			.method(Method::POST)
			.uri(url.as_str())
			.header(CACHE_CONTROL, "no-store, private")
			.header(CONNECTION, "close")
			.header(CONTENT_TYPE, "application/json")
			.header(ACCEPT, "application/json")
			.body(body)
			.map_err(ConfigError::from)?;
		let requested_at = OffsetDateTime::now_utc();
		let response = match self.http_client.execute(request).await {
			Ok(response) => response,
			Err(e) => {
				let cause = FailureCause::Transport(TransportError::from(e));
				let error =
					translate::translate(None, None, &cause.to_string(), ErrorCode::Number(0));

				return Err(Error::Authentication { error, cause });
			},
		};

		if !response.status().is_success() {
			let (error, cause) = self.reject(Method::POST, &url, &response);

			return Err(Error::Authentication { error, cause });
		}

		Ok(Arc::new(Token::from_slice(response.body(), requested_at)?))
	}
}
