//! Authenticated resource requests.

// crates.io
use oauth2::{
	HttpResponse,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION, CACHE_CONTROL, CONNECTION, CONTENT_TYPE},
	},
};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, FailureCause, TransportError},
	http::ApiHttpClient,
	obs::{self, CallKind, CallOutcome, CallSpan},
	query::Query,
	session::Session,
	translate::{self, ErrorCode},
};

/// HTTP methods accepted by [`Session::request`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `PATCH`
	Patch,
	/// `DELETE`
	Delete,
}
impl Verb {
	/// Returns the method name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Verb::Get => "GET",
			Verb::Post => "POST",
			Verb::Put => "PUT",
			Verb::Patch => "PATCH",
			Verb::Delete => "DELETE",
		}
	}

	/// Returns `true` for methods that carry a JSON body.
	pub const fn allows_body(self) -> bool {
		matches!(self, Verb::Post | Verb::Put | Verb::Patch)
	}

	/// Converts into the `http` crate method.
	pub fn method(self) -> Method {
		match self {
			Verb::Get => Method::GET,
			Verb::Post => Method::POST,
			Verb::Put => Method::PUT,
			Verb::Patch => Method::PATCH,
			Verb::Delete => Method::DELETE,
		}
	}
}
impl Display for Verb {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

impl<C> Session<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Sends an authenticated request and decodes the JSON response.
	///
	/// `path` is resolved against the configured base URL. `body` is attached only for
	/// `POST`/`PUT`/`PATCH`; `query` is appended when non-empty. An empty response body decodes
	/// to [`Value::Null`]. Non-2xx responses are recorded in [`Session::last_response`] and raised
	/// as [`Error::Request`].
	pub async fn request(
		&self,
		verb: Verb,
		path: &str,
		body: Option<&Value>,
		query: Option<&Query>,
	) -> Result<Value> {
		self.dispatch("request", verb, path, body, query).await
	}

	/// Like [`Session::request`], decoding the response into `T`.
	pub async fn request_as<T>(
		&self,
		verb: Verb,
		path: &str,
		body: Option<&Value>,
		query: Option<&Query>,
	) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.dispatch("request", verb, path, body, query).await
	}

	pub(crate) async fn dispatch<T>(
		&self,
		operation: &'static str,
		verb: Verb,
		path: &str,
		body: Option<&Value>,
		query: Option<&Query>,
	) -> Result<T>
	where
		T: DeserializeOwned,
	{
		const KIND: CallKind = CallKind::Request;

		let span = CallSpan::new(KIND, operation);

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let response = self.send(verb, path, body, query).await?;

				decode(&response)
			})
			.await;

		obs::record_call_outcome(KIND, CallOutcome::of(&result));

		result
	}

	async fn send(
		&self,
		verb: Verb,
		path: &str,
		body: Option<&Value>,
		query: Option<&Query>,
	) -> Result<HttpResponse> {
		let mut url = self.config.endpoint(path)?;

		if let Some(query) = query {
			query.apply_to(&mut url);
		}

		let payload = match body.filter(|_| verb.allows_body()) {
			Some(body) => serde_json::to_vec(body).map_err(Error::Encode)?,
			None => Vec::new(),
		};
		let token = self.valid_token().await?;
		let request = Request::builder()
			.method(verb.method())
			.uri(url.as_str())
			.header(CACHE_CONTROL, "no-cache")
			.header(CONNECTION, "close")
			.header(CONTENT_TYPE, "application/json")
			.header(ACCEPT, "application/json")
			.header(AUTHORIZATION, format!("Bearer {}", token.access_token()))
			.body(payload)
			.map_err(ConfigError::from)?;
		let response = match self.http_client.execute(request).await {
			Ok(response) => response,
			Err(e) => {
				let cause = FailureCause::Transport(TransportError::from(e));
				let error =
					translate::translate(None, None, &cause.to_string(), ErrorCode::Number(0));

				return Err(Error::Request { error, cause });
			},
		};

		if !response.status().is_success() {
			let (error, cause) = self.reject(verb.method(), &url, &response);

			return Err(Error::Request { error, cause });
		}

		Ok(response)
	}
}

fn decode<T>(response: &HttpResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	let status = response.status().as_u16();
	let body = response.body();
	let decoded = if body.iter().all(u8::is_ascii_whitespace) {
		serde_path_to_error::deserialize(Value::Null)
	} else {
		serde_path_to_error::deserialize(&mut serde_json::Deserializer::from_slice(body))
	};

	decoded.map_err(|source| Error::Decode { status, source })
}
