//! Per-resource endpoints layered on [`Session`].
//!
//! Account-scoped methods check the scope before anything else, then validate their identifier and
//! body, build a fixed path, and delegate to the session. Paths:
//!
//! | Resource | Verbs | Path |
//! | --- | --- | --- |
//! | accounts | `GET`, `POST` / `DELETE` | `/api/account` / `/api/account/{id}` |
//! | providers | `GET` | `/api/provider` |
//! | provider credentials | `GET`, `POST` / `GET`, `PATCH`, `DELETE` | `/api/account/{a}/provider/credential[/{id}]` |
//! | pickup locations | `POST` | `/api/account/{a}/pickup/location` |
//! | parcels | `GET`, `POST` / `GET`, `DELETE` | `/api/account/{a}/parcel[/{id}]` |
//! | shipments | `GET`, `POST` / `GET`, `DELETE` | `/api/account/{a}/shipment[/{id}]` |
//! | webhook events | `GET` | `/api/webhook/events` |
//! | webhooks | `GET`, `POST` / `DELETE` | `/api/account/{a}/webhook[/{id}]` |

mod account;
mod credential;
mod parcel;
mod pickup;
mod provider;
mod shipment;
mod webhook;

pub use account::*;
pub use credential::*;
pub use parcel::*;
pub use webhook::*;

// self
use crate::{_prelude::*, auth::ResourceId, http::ApiHttpClient, session::Session};

impl<C> Session<C>
where
	C: ?Sized + ApiHttpClient,
{
	// `/api/account/{a}/{suffix}` for the bound account scope.
	fn scoped_path(&self, operation: &'static str, suffix: &str) -> Result<String> {
		let account = self.require_account_id(operation)?;

		Ok(format!("/api/account/{account}/{suffix}"))
	}
}

fn resource_id(id: impl AsRef<str>) -> Result<ResourceId> {
	Ok(ResourceId::new(id)?)
}

// Bodies must serialize to a JSON object.
fn object_body<B>(operation: &'static str, body: &B) -> Result<Value>
where
	B: ?Sized + Serialize,
{
	match serde_json::to_value(body).map_err(Error::Encode)? {
		value @ Value::Object(_) => Ok(value),
		_ => Err(Error::InvalidBody { operation }),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn bodies_must_be_objects() {
		assert!(object_body("create_parcel", &serde_json::json!({ "tracking_id": "S1" })).is_ok());

		for body in [serde_json::json!([1, 2]), serde_json::json!("x"), Value::Null] {
			assert!(matches!(
				object_body("create_parcel", &body),
				Err(Error::InvalidBody { operation: "create_parcel" })
			));
		}
	}

	#[test]
	fn identifiers_cannot_escape_their_path_segment() {
		assert!(resource_id("42").is_ok());

		for id in ["", "1/2", "a b", "x?y", "#"] {
			assert!(
				matches!(resource_id(id), Err(Error::InvalidIdentifier(_))),
				"`{id}` should be rejected."
			);
		}
	}
}
