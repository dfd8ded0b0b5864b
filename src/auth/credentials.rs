//! Password-grant credentials supplied once per session.

// self
use crate::{_prelude::*, auth::Secret};

/// Resource-owner and client credentials used to mint bearer tokens.
///
/// Credentials are immutable after construction and only feed the password-grant exchange.
/// They intentionally do not implement [`Serialize`]; [`Debug`] output redacts every secret.
#[derive(Clone)]
pub struct Credentials {
	username: String,
	password: Secret,
	client_id: String,
	client_secret: Secret,
}
impl Credentials {
	/// Bundles the username/password pair with the API client key and secret.
	pub fn new(
		username: impl Into<String>,
		password: impl Into<String>,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Self {
		Self {
			username: username.into(),
			password: Secret::new(password),
			client_id: client_id.into(),
			client_secret: Secret::new(client_secret),
		}
	}

	/// Account username.
	pub fn username(&self) -> &str {
		&self.username
	}

	/// API client key sent as `client_id`.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	pub(crate) fn password_grant(&self) -> PasswordGrant<'_> {
		PasswordGrant {
			grant_type: "password",
			username: &self.username,
			password: self.password.expose(),
			client_id: &self.client_id,
			client_secret: self.client_secret.expose(),
		}
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("username", &"<redacted>")
			.field("password", &self.password)
			.field("client_id", &"<redacted>")
			.field("client_secret", &self.client_secret)
			.finish()
	}
}

/// JSON body posted to the token endpoint.
#[derive(Serialize)]
pub(crate) struct PasswordGrant<'a> {
	grant_type: &'static str,
	username: &'a str,
	password: &'a str,
	client_id: &'a str,
	client_secret: &'a str,
}
