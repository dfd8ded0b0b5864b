//! Demonstrates plugging a non-reqwest transport into a session.
//!
//! 1. Implement [`ApiHttpClient`], returning `Ok` for every response that was received and `Err`
//!    only when nothing came back.
//! 2. Pass the transport to [`Session::with_http_client`].
//! 3. Inspect how transport failures and non-2xx answers surface as [`Error`] values.

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
};
// crates.io
use color_eyre::Result;
// self
use parcel_client::{
	auth::{AccountId, Credentials},
	config::ClientConfig,
	error::{Error, FailureCause},
	http::{ApiHttpClient, HttpClientError, HttpRequest, HttpResponse, TransportFuture},
	http_types::StatusCode,
	session::Session,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let credentials = Credentials::new("username", "password", "api_key", "api_secret");
	let session = Session::<CannedHttpClient>::with_http_client(
		ClientConfig::production()?,
		credentials.clone(),
		CannedHttpClient::Healthy,
	)
	.with_account_id(AccountId::new("41")?)?;
	let parcels = session.parcels(None).await?;

	println!("Canned parcel listing: {parcels}.");

	match session.parcel("404").await {
		Ok(_) => println!("The canned transport unexpectedly found parcel 404."),
		Err(e) => println!(
			"Missing parcel surfaced as `{e}` with code {:?}.",
			e.structured().map(|error| error.code.to_string())
		),
	}

	let offline = Session::<CannedHttpClient>::with_http_client(
		ClientConfig::production()?,
		credentials,
		CannedHttpClient::Offline { host: "onetotrack.nujob.nl" },
	);

	match offline.providers().await {
		Err(Error::Authentication { cause: FailureCause::Transport(e), .. }) =>
			println!("Offline transport failed before any response: {e}."),
		other => println!("Unexpected result from the offline transport: {other:?}."),
	}

	Ok(())
}

#[derive(Debug)]
struct DnsFailure {
	host: &'static str,
}
impl Display for DnsFailure {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "DNS lookup failed for {}", self.host)
	}
}
impl StdError for DnsFailure {}

enum CannedHttpClient {
	Healthy,
	Offline { host: &'static str },
}
impl ApiHttpClient for CannedHttpClient {
	type TransportError = DnsFailure;

	fn execute(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError> {
		Box::pin(async move {
			if let Self::Offline { host } = self {
				// The `Reqwest` variant carries any boxed transport error.
				return Err(HttpClientError::Reqwest(Box::new(DnsFailure { host: *host })));
			}

			let (status, body) = match request.uri().path() {
				"/oauth/v2/token" => (
					StatusCode::OK,
					r#"{"access_token":"canned","refresh_token":"canned","token_type":"bearer","scope":"user","expires_in":3600}"#,
				),
				"/api/account/41/parcel" => (StatusCode::OK, r#"[{"id":5,"status":"in_transit"}]"#),
				_ => (StatusCode::NOT_FOUND, r#"{"message":"Parcel not found","code":404}"#),
			};
			let mut response = HttpResponse::new(body.as_bytes().to_vec());

			*response.status_mut() = status;

			Ok(response)
		})
	}
}
