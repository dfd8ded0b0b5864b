//! Transport primitives for API calls.
//!
//! The module exposes [`ApiHttpClient`] so downstream crates can plug in custom HTTP stacks, plus
//! [`FailedResponse`] and [`LastResponseSlot`], which keep the most recent non-2xx response
//! around for inspection after an error has been raised. Requests and responses use the `http`
//! crate types re-exported by `oauth2` so transports never depend on this crate's internals.

pub use oauth2::{HttpClientError, HttpRequest, HttpResponse};

// crates.io
use oauth2::http::{HeaderMap, StatusCode};
// self
use crate::_prelude::*;

/// Boxed future returned by [`ApiHttpClient::execute`].
pub type TransportFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, HttpClientError<E>>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing API requests.
///
/// The trait is the session's only dependency on an HTTP stack. Implementations must return
/// `Ok` for every response that was received, whatever its status; the session classifies
/// non-2xx statuses itself. `Err` is reserved for failures where no response exists (DNS,
/// TCP, TLS, timeouts). Implementations must be `Send + Sync + 'static` so a single session can
/// be shared across tasks.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and resolves with the full response.
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError>;
}

/// Non-2xx response captured for caller inspection.
#[derive(Clone, Debug)]
pub struct FailedResponse {
	/// HTTP status returned by the server.
	pub status: StatusCode,
	/// Response headers.
	pub headers: HeaderMap,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl FailedResponse {
	/// Copies the parts of `response` worth keeping.
	pub fn from_response(response: &HttpResponse) -> Self {
		Self {
			status: response.status(),
			headers: response.headers().clone(),
			body: response.body().clone(),
		}
	}

	/// Body decoded as UTF-8, replacing invalid sequences.
	pub fn body_text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Body decoded as JSON, if it parses.
	pub fn json(&self) -> Option<Value> {
		serde_json::from_slice(&self.body).ok()
	}
}

/// Thread-safe slot holding the most recent [`FailedResponse`].
///
/// Only responses that were actually received are stored; network failures leave the previous
/// value in place. Successful calls never clear it.
#[derive(Clone, Debug, Default)]
pub struct LastResponseSlot(Arc<Mutex<Option<FailedResponse>>>);
impl LastResponseSlot {
	/// Replaces the stored response.
	pub fn store(&self, response: FailedResponse) {
		*self.0.lock() = Some(response);
	}

	/// Returns a copy of the stored response.
	pub fn get(&self) -> Option<FailedResponse> {
		self.0.lock().clone()
	}

	/// Returns the stored response, consuming it from the slot.
	pub fn take(&self) -> Option<FailedResponse> {
		self.0.lock().take()
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// [`crate::session::Session::new`] builds one with redirects disabled; configure any custom
/// [`ReqwestClient`] the same way so bearer headers are never replayed against another URI.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client
				.execute(request.try_into().map_err(Box::new)?)
				.await
				.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn slot_keeps_latest_response_until_taken() {
		let slot = LastResponseSlot::default();
		let mut response = HttpResponse::new(br#"{"message":"gone","code":410}"#.to_vec());

		*response.status_mut() = StatusCode::GONE;
		slot.store(FailedResponse::from_response(&response));

		let stored = slot.get().expect("Slot should hold the stored response.");

		assert_eq!(stored.status, StatusCode::GONE);
		assert_eq!(stored.json().and_then(|v| v.get("code").cloned()), Some(410.into()));
		assert!(stored.body_text().contains("gone"));
		assert!(slot.take().is_some());
		assert!(slot.get().is_none());
	}
}
