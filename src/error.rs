//! Client-level error types shared across the session, resources, and transports.

// crates.io
use oauth2::{HttpClientError, http::Method};
// self
use crate::{
	_prelude::*,
	auth::{AccountId, IdentifierError, MalformedTokenError},
	translate::StructuredError,
};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// The password-grant exchange failed.
	#[error("Authentication failed: {error}.")]
	Authentication {
		/// Translated error extracted from the token endpoint response.
		error: StructuredError,
		/// Original failure reported by the transport or server.
		#[source]
		cause: FailureCause,
	},
	/// The token endpoint answered 2xx but the payload lacked required fields.
	#[error("Authentication failed: {0}")]
	MalformedToken(#[from] MalformedTokenError),
	/// A resource call returned a non-2xx response or never reached the server.
	#[error("Request failed: {error}.")]
	Request {
		/// Translated error extracted from the response body.
		error: StructuredError,
		/// Original failure reported by the transport or server.
		#[source]
		cause: FailureCause,
	},
	/// An account-scoped operation ran before the account scope was set.
	#[error("Account scope must be set before calling `{operation}`.")]
	AccountNotSet {
		/// Operation that required the account scope.
		operation: &'static str,
	},
	/// The account scope was already set to a different identifier.
	#[error("Account scope is already set to `{current}`.")]
	AccountAlreadySet {
		/// Identifier currently bound to the session.
		current: AccountId,
	},
	/// A path identifier failed validation.
	#[error(transparent)]
	InvalidIdentifier(#[from] IdentifierError),
	/// The request body did not serialize to a JSON object.
	#[error("Request body for `{operation}` must be a JSON object.")]
	InvalidBody {
		/// Operation that rejected the body.
		operation: &'static str,
	},
	/// The request body could not be serialized.
	#[error("Request body could not be encoded as JSON.")]
	Encode(#[source] serde_json::Error),
	/// A successful response body could not be decoded.
	#[error("Response body with HTTP status {status} could not be decoded.")]
	Decode {
		/// HTTP status of the undecodable response.
		status: u16,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl Error {
	/// Returns the translated server error carried by authentication and request failures.
	pub fn structured(&self) -> Option<&StructuredError> {
		match self {
			Self::Authentication { error, .. } | Self::Request { error, .. } => Some(error),
			_ => None,
		}
	}

	/// Returns `true` when the failure originated from the password-grant exchange.
	pub fn is_authentication_failure(&self) -> bool {
		matches!(self, Self::Authentication { .. } | Self::MalformedToken(_))
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Base URL is unusable.
	#[error("Base URL `{url}` is invalid: {reason}.")]
	InvalidBaseUrl {
		/// Offending URL.
		url: String,
		/// Why the URL was rejected.
		reason: &'static str,
	},
	/// Endpoint path could not be joined onto the base URL.
	#[error("Endpoint `{path}` cannot be joined onto the base URL.")]
	InvalidEndpoint {
		/// Offending endpoint path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint path resolves outside the configured base URL.
	#[error("Endpoint `{path}` resolves outside the base URL.")]
	EndpointOutsideBase {
		/// Offending endpoint path.
		path: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO) where no response was received.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API: {source}")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API: {0}")]
	Io(#[from] std::io::Error),
	/// The transport rejected the request as malformed HTTP.
	#[error("HTTP error occurred while calling the API: {0}")]
	Http(#[from] oauth2::http::Error),
	/// Transport-specific failure without a typed source.
	#[error("HTTP client error occurred while calling the API: {message}")]
	Other {
		/// Transport-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl<E> From<HttpClientError<E>> for TransportError
where
	E: 'static + Send + Sync + std::error::Error,
{
	fn from(e: HttpClientError<E>) -> Self {
		match e {
			HttpClientError::Reqwest(inner) => Self::network(*inner),
			HttpClientError::Http(inner) => Self::Http(inner),
			HttpClientError::Io(inner) => Self::Io(inner),
			HttpClientError::Other(message) => Self::Other { message },
			other => Self::Other { message: other.to_string() },
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Original failure behind an authentication or request error.
#[derive(Debug, ThisError)]
pub enum FailureCause {
	/// The server answered with a non-2xx status.
	#[error("`{method} {url}` resulted in HTTP {status}")]
	Status {
		/// Method of the failed request.
		method: Method,
		/// Absolute URL of the failed request.
		url: String,
		/// HTTP status returned by the server.
		status: u16,
	},
	/// No response was received.
	#[error(transparent)]
	Transport(#[from] TransportError),
}
impl FailureCause {
	/// HTTP status of the failure, if a response was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			Self::Transport(_) => None,
		}
	}
}
