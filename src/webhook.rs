//! Verification of HMAC-signed webhook callbacks.
//!
//! The sender posts `{"content":<payload>,"authentication":"<hex>"}` where `<hex>` is the
//! lowercase HMAC-SHA256 of the exact `<payload>` bytes keyed by the API secret. The payload is
//! sliced out of the raw body instead of being re-serialized, because key order and whitespace
//! would not survive a decode/encode cycle. Reply with [`acknowledgement_status`]; any non-200
//! answer makes the sender retry up to five more times with increasing delay.

// crates.io
use hmac::{Hmac, Mac};
use sha2::Sha256;
// self
use crate::_prelude::*;

type HmacSha256 = Hmac<Sha256>;

const PREFIX: &[u8] = br#"{"content":"#;
const MARKER: &[u8] = br#","authentication":""#;
const SUFFIX: &[u8] = br#""}"#;
const SIGNATURE_HEX_LEN: usize = 64;

/// Errors produced by [`signature`] and [`WebhookVerifier::open`].
#[derive(Debug, ThisError)]
pub enum WebhookError {
	/// The body did not match the envelope or the signature was wrong.
	#[error("Webhook signature is missing or invalid.")]
	InvalidSignature,
	/// The secret could not be used as an HMAC key.
	#[error("Webhook secret is not a usable HMAC key.")]
	InvalidKey,
	/// The verified payload could not be decoded into the requested type.
	#[error("Webhook payload could not be decoded.")]
	Payload {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Returns `true` when `raw_body` is a correctly signed envelope for `secret`.
///
/// Never fails: malformed envelopes and mismatched signatures both yield `false`.
pub fn authenticate(raw_body: &[u8], secret: &str) -> bool {
	split_envelope(raw_body).is_some_and(|(payload, signature)| verify(payload, signature, secret))
}

/// Lowercase hex HMAC-SHA256 of `payload` keyed by `secret`.
pub fn signature(payload: &[u8], secret: &str) -> Result<String, WebhookError> {
	let mac = keyed(secret).ok_or(WebhookError::InvalidKey)?;

	Ok(hex::encode(mac.chain_update(payload).finalize().into_bytes()))
}

/// HTTP status to answer a webhook delivery with.
pub const fn acknowledgement_status(verified: bool) -> u16 {
	if verified { 200 } else { 400 }
}

/// Secret-holding verifier for inbound webhook deliveries.
#[derive(Clone)]
pub struct WebhookVerifier {
	secret: crate::auth::Secret,
}
impl WebhookVerifier {
	/// Creates a verifier for the shared API secret.
	pub fn new(secret: impl Into<String>) -> Self {
		Self { secret: crate::auth::Secret::new(secret) }
	}

	/// See [`authenticate`].
	pub fn verify(&self, raw_body: &[u8]) -> bool {
		authenticate(raw_body, self.secret.expose())
	}

	/// Verifies the envelope and decodes its `content` payload.
	pub fn open<T>(&self, raw_body: &[u8]) -> Result<T, WebhookError>
	where
		T: DeserializeOwned,
	{
		let (payload, signature) = split_envelope(raw_body).ok_or(WebhookError::InvalidSignature)?;

		if !verify(payload, signature, self.secret.expose()) {
			return Err(WebhookError::InvalidSignature);
		}

		let de = &mut serde_json::Deserializer::from_slice(payload);

		serde_path_to_error::deserialize(de).map_err(|source| WebhookError::Payload { source })
	}
}
impl Debug for WebhookVerifier {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("WebhookVerifier").field("secret", &self.secret).finish()
	}
}

// Payload spans from the first `{"content":` to the last `,"authentication":"`.
fn split_envelope(raw_body: &[u8]) -> Option<(&[u8], &[u8])> {
	let body = raw_body
		.strip_suffix(b"\r\n")
		.or_else(|| raw_body.strip_suffix(b"\n"))
		.unwrap_or(raw_body);
	let inner = body.strip_prefix(PREFIX)?.strip_suffix(SUFFIX)?;
	let marker_at = inner.windows(MARKER.len()).rposition(|window| window == MARKER)?;
	let (payload, rest) = inner.split_at(marker_at);
	let signature = &rest[MARKER.len()..];

	if payload.is_empty() {
		return None;
	}

	Some((payload, signature))
}

fn verify(payload: &[u8], signature: &[u8], secret: &str) -> bool {
	if signature.len() != SIGNATURE_HEX_LEN
		|| !signature.iter().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(b))
	{
		return false;
	}

	let (Ok(expected), Some(mac)) = (hex::decode(signature), keyed(secret)) else {
		return false;
	};

	mac.chain_update(payload).verify_slice(&expected).is_ok()
}

fn keyed(secret: &str) -> Option<HmacSha256> {
	<HmacSha256 as Mac>::new_from_slice(secret.as_bytes()).ok()
}
