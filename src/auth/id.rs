//! Strongly typed identifiers interpolated into endpoint paths.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				validate_view($kind, view)?;

				Ok(Self(view.to_owned()))
			}

			/// Reads an identifier from a decoded JSON value (string or integer).
			pub fn from_json(value: &Value) -> Result<Self, IdentifierError> {
				match value {
					Value::String(s) => Self::new(s),
					Value::Number(n) => Self::new(n.to_string()),
					_ => Err(IdentifierError::NotScalar { kind: $kind }),
				}
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 128;
const RESERVED: [char; 3] = ['/', '?', '#'];

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (account, resource).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (account, resource).
		kind: &'static str,
	},
	/// The identifier contains a character that would alter the endpoint path.
	#[error("{kind} identifier contains the reserved character `{character}`.")]
	ReservedCharacter {
		/// Kind of identifier (account, resource).
		kind: &'static str,
		/// Offending character.
		character: char,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (account, resource).
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
	/// The JSON value was neither a string nor a number.
	#[error("{kind} identifier must be a JSON string or number.")]
	NotScalar {
		/// Kind of identifier (account, resource).
		kind: &'static str,
	},
}

def_id! { AccountId, "Server-side account identifier that scopes most resource paths.", "Account" }
def_id! { ResourceId, "Identifier of a resource addressed by an endpoint path.", "Resource" }

fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if let Some(character) = view.chars().find(|c| RESERVED.contains(c)) {
		return Err(IdentifierError::ReservedCharacter { kind, character });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;

	#[test]
	fn identifiers_reject_whitespace_and_path_characters() {
		assert!(AccountId::new(" 42").is_err(), "Leading whitespace must be rejected.");
		assert!(ResourceId::new("").is_err());
		assert_eq!(
			ResourceId::new("../admin"),
			Err(IdentifierError::ReservedCharacter { kind: "Resource", character: '/' })
		);
		assert!(ResourceId::new("abc?x=1").is_err());

		let account = AccountId::new("acc-123").expect("Account fixture should be valid.");

		assert_eq!(account.as_ref(), "acc-123");
		assert_eq!(format!("{account:?}"), "Account(acc-123)");
	}

	#[test]
	fn from_json_accepts_strings_and_numbers() {
		assert_eq!(
			AccountId::from_json(&serde_json::json!(17)).expect("Numeric ids should convert."),
			AccountId::new("17").expect("Account fixture should be valid.")
		);
		assert_eq!(
			ResourceId::from_json(&serde_json::json!("p-9")).expect("String ids should convert.")
				.as_ref(),
			"p-9"
		);
		assert_eq!(
			AccountId::from_json(&serde_json::json!({ "id": 1 })),
			Err(IdentifierError::NotScalar { kind: "Account" })
		);
	}

	#[test]
	fn length_limits_are_enforced() {
		let exact = "a".repeat(IDENTIFIER_MAX_LEN);

		ResourceId::new(&exact).expect("Exact length should succeed.");

		let too_long = "a".repeat(IDENTIFIER_MAX_LEN + 1);

		assert!(ResourceId::new(&too_long).is_err());
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let id: ResourceId =
			serde_json::from_str("\"parcel-42\"").expect("Id should deserialize successfully.");

		assert_eq!(id.as_ref(), "parcel-42");
		assert!(serde_json::from_str::<ResourceId>("\"with space\"").is_err());
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<AccountId, u8> = HashMap::from_iter([(
			AccountId::new("acc-1").expect("Account used for lookup should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("acc-1"), Some(&7));
	}
}
