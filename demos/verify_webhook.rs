//! Shows how a webhook receiver verifies a delivery and picks the status code to answer with.
//!
//! The sender signs the exact `content` bytes, so the receiver must hand the raw request body to
//! the verifier before any JSON parsing happens.

// crates.io
use color_eyre::Result;
use serde::Deserialize;
// self
use parcel_client::webhook::{self, WebhookVerifier};

#[derive(Debug, Deserialize)]
struct ParcelChange {
	id: u64,
	status: String,
}

fn main() -> Result<()> {
	color_eyre::install()?;

	let secret = "api_secret";
	let payload = r#"{"id":5,"status":"delivered"}"#;
	let signature = webhook::signature(payload.as_bytes(), secret)?;
	let body = format!(r#"{{"content":{payload},"authentication":"{signature}"}}"#);
	let tampered = body.replace("delivered", "returned");
	let verifier = WebhookVerifier::new(secret);
	let change: ParcelChange = verifier.open(body.as_bytes())?;

	println!("Parcel {} is now {}.", change.id, change.status);

	for (label, raw) in [("original", body.as_bytes()), ("tampered", tampered.as_bytes())] {
		let status = webhook::acknowledgement_status(verifier.verify(raw));

		println!("The {label} delivery is answered with HTTP {status}.");
	}

	Ok(())
}
