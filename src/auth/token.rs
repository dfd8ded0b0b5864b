//! Immutable bearer token minted by the password-grant exchange.

// self
use crate::{_prelude::*, auth::Secret};

/// Errors produced when a 2xx token endpoint payload cannot become a [`Token`].
#[derive(Debug, ThisError)]
pub enum MalformedTokenError {
	/// A required field was absent or had the wrong type.
	#[error("Token endpoint response is malformed at `{}`.", source.path())]
	Payload {
		/// Structured parsing failure naming the offending field.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Token endpoint returned an excessively large `expires_in`.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
}

#[derive(Deserialize)]
struct TokenPayload {
	access_token: String,
	refresh_token: String,
	token_type: String,
	scope: String,
	expires_in: u64,
}

/// OAuth2 bearer token paired with its absolute expiry instant.
///
/// The expiry is `requested_at + expires_in + 300s`. Tokens are never mutated; a new
/// exchange replaces the whole value.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
	access_token: Secret,
	refresh_token: Secret,
	token_type: String,
	scope: String,
	issued_at: OffsetDateTime,
	expires_at: OffsetDateTime,
}
impl Token {
	/// Margin added to the server-reported lifetime.
	pub const SAFETY_MARGIN: Duration = Duration::seconds(300);

	/// Parses a raw token endpoint payload received for a request sent at `requested_at`.
	pub fn from_slice(
		payload: &[u8],
		requested_at: OffsetDateTime,
	) -> Result<Self, MalformedTokenError> {
		let de = &mut serde_json::Deserializer::from_slice(payload);
		let payload: TokenPayload = serde_path_to_error::deserialize(de)
			.map_err(|source| MalformedTokenError::Payload { source })?;

		Self::from_payload(payload, requested_at)
	}

	/// Builds a token from an already decoded JSON value.
	pub fn from_value(
		value: Value,
		requested_at: OffsetDateTime,
	) -> Result<Self, MalformedTokenError> {
		let payload: TokenPayload = serde_path_to_error::deserialize(value)
			.map_err(|source| MalformedTokenError::Payload { source })?;

		Self::from_payload(payload, requested_at)
	}

	fn from_payload(
		payload: TokenPayload,
		requested_at: OffsetDateTime,
	) -> Result<Self, MalformedTokenError> {
		let lifetime = i64::try_from(payload.expires_in)
			.map(Duration::seconds)
			.map_err(|_| MalformedTokenError::ExpiresInOutOfRange)?;
		let expires_at = requested_at
			.checked_add(lifetime)
			.and_then(|instant| instant.checked_add(Self::SAFETY_MARGIN))
			.ok_or(MalformedTokenError::ExpiresInOutOfRange)?;

		Ok(Self {
			access_token: Secret::new(payload.access_token),
			refresh_token: Secret::new(payload.refresh_token),
			token_type: payload.token_type,
			scope: payload.scope,
			issued_at: requested_at,
			expires_at,
		})
	}

	/// Access token sent as the bearer credential. Callers must avoid logging it.
	pub fn access_token(&self) -> &str {
		self.access_token.expose()
	}

	/// Refresh token issued alongside the access token.
	pub fn refresh_token(&self) -> &str {
		self.refresh_token.expose()
	}

	/// Token type reported by the server (normally `bearer`).
	pub fn token_type(&self) -> &str {
		&self.token_type
	}

	/// Scope string reported by the server.
	pub fn scope(&self) -> &str {
		&self.scope
	}

	/// Instant the exchange was requested.
	pub fn issued_at(&self) -> OffsetDateTime {
		self.issued_at
	}

	/// Absolute expiry instant.
	pub fn expires_at(&self) -> OffsetDateTime {
		self.expires_at
	}

	/// Returns `true` once `now` reaches the expiry instant.
	pub fn has_expired_at(&self, now: OffsetDateTime) -> bool {
		now >= self.expires_at
	}

	/// Checks expiry against the current UTC clock.
	pub fn has_expired(&self) -> bool {
		self.has_expired_at(OffsetDateTime::now_utc())
	}

	/// Remaining lifetime at `now`, clamped to zero.
	pub fn remaining_at(&self, now: OffsetDateTime) -> Duration {
		let remaining = self.expires_at - now;

		if remaining.is_negative() { Duration::ZERO } else { remaining }
	}

	/// Remaining lifetime relative to the current UTC clock.
	pub fn remaining(&self) -> Duration {
		self.remaining_at(OffsetDateTime::now_utc())
	}
}
impl Debug for Token {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Token")
			.field("access_token", &self.access_token)
			.field("refresh_token", &self.refresh_token)
			.field("token_type", &self.token_type)
			.field("scope", &self.scope)
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}
