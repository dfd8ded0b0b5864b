//! Translation of failed response bodies into [`StructuredError`] values.
//!
//! Extraction rules are applied in priority order and the first match wins:
//!
//! 1. A form-validation tree (`errors.children`) is flattened into dotted field paths.
//! 2. A `message` + `code` pair is used verbatim.
//! 3. An OAuth2 `error` + `error_description` pair becomes `"{error}, {error_description}"`.
//! 4. Anything else falls back to the transport-level description and the HTTP status.
//!
//! [`translate`] only classifies; the session decides which [`Error`] variant to raise.

// self
use crate::_prelude::*;

/// Numeric or textual error code reported by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
	/// Integer code (HTTP status or an application-specific number).
	Number(i64),
	/// Non-integer code as reported by the server.
	Text(String),
}
impl ErrorCode {
	fn from_json(value: &Value) -> Self {
		match value {
			Value::Number(n) => n.as_i64().map_or_else(|| Self::Text(n.to_string()), Self::Number),
			Value::String(s) => Self::Text(s.clone()),
			other => Self::Text(other.to_string()),
		}
	}
}
impl From<u16> for ErrorCode {
	fn from(status: u16) -> Self {
		Self::Number(status.into())
	}
}
impl Display for ErrorCode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Number(n) => write!(f, "{n}"),
			Self::Text(s) => f.write_str(s),
		}
	}
}

/// Which extraction rule produced a [`StructuredError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSource {
	/// Nested `errors.children` validation tree.
	Validation,
	/// `message` + `code` pair.
	MessageCode,
	/// OAuth2 `error` + `error_description` pair.
	OAuth,
	/// Transport description and HTTP status.
	Fallback,
}

/// Translated server error with optional per-field validation messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructuredError {
	/// Human-readable message; for validation failures this is the serialized report.
	pub message: String,
	/// Server or HTTP code.
	pub code: ErrorCode,
	/// Rule that produced this error.
	pub source: ErrorSource,
	/// Top-level summary message of a validation failure.
	pub summary: Option<String>,
	/// Form-level errors not tied to a field.
	pub global: Vec<String>,
	/// Field path (dot-separated for nested forms) to ordered messages.
	pub fields: BTreeMap<String, Vec<String>>,
}
impl StructuredError {
	/// Creates an error without validation details.
	pub fn new(message: impl Into<String>, code: ErrorCode, source: ErrorSource) -> Self {
		Self {
			message: message.into(),
			code,
			source,
			summary: None,
			global: Vec::new(),
			fields: BTreeMap::new(),
		}
	}

	/// Returns `true` when field-level validation messages are present.
	pub fn has_field_errors(&self) -> bool {
		!self.fields.is_empty()
	}

	/// Messages recorded for a dotted field path.
	pub fn field(&self, path: &str) -> Option<&[String]> {
		self.fields.get(path).map(Vec::as_slice)
	}
}
impl Display for StructuredError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{} (code {})", self.message, self.code)
	}
}

#[derive(Serialize)]
struct ValidationReport<'a> {
	#[serde(skip_serializing_if = "Option::is_none")]
	message: Option<&'a str>,
	#[serde(skip_serializing_if = "<[String]>::is_empty")]
	errors: &'a [String],
	fields: &'a BTreeMap<String, Vec<String>>,
}

/// Maps a failed response into a [`StructuredError`].
///
/// `status` and `body` are absent when no response was received; only rule 4 applies then.
pub fn translate(
	status: Option<u16>,
	body: Option<&[u8]>,
	fallback_message: &str,
	fallback_code: ErrorCode,
) -> StructuredError {
	let status_code = status.map(ErrorCode::from).unwrap_or_else(|| fallback_code.clone());
	let Some(Value::Object(map)) =
		body.and_then(|bytes| serde_json::from_slice::<Value>(bytes).ok())
	else {
		return StructuredError::new(fallback_message, fallback_code, ErrorSource::Fallback);
	};

	if let Some(children) = map
		.get("errors")
		.and_then(|errors| errors.get("children"))
		.filter(|children| children.is_object() || children.is_array())
	{
		return validation_error(&map, children, status_code);
	}
	if let (Some(message), Some(code)) = (present(&map, "message"), present(&map, "code")) {
		return StructuredError::new(
			message_text(message),
			ErrorCode::from_json(code),
			ErrorSource::MessageCode,
		);
	}
	if let (Some(error), Some(description)) =
		(present(&map, "error"), present(&map, "error_description"))
	{
		return StructuredError::new(
			format!("{}, {}", message_text(error), message_text(description)),
			status_code,
			ErrorSource::OAuth,
		);
	}

	StructuredError::new(fallback_message, fallback_code, ErrorSource::Fallback)
}

fn validation_error(
	map: &Map<String, Value>,
	children: &Value,
	status: ErrorCode,
) -> StructuredError {
	let mut fields = BTreeMap::new();

	collect_children(children, None, &mut fields);

	let summary = present(map, "message").map(message_text);
	let global: Vec<String> = map
		.get("errors")
		.and_then(|errors| errors.get("errors"))
		.and_then(Value::as_array)
		.map(|messages| messages.iter().map(message_text).collect())
		.unwrap_or_default();
	let code = present(map, "code").map(ErrorCode::from_json).unwrap_or(status);
	let report = ValidationReport { message: summary.as_deref(), errors: &global, fields: &fields };
	let message = serde_json::to_string(&report)
		.unwrap_or_else(|_| summary.clone().unwrap_or_else(|| "Validation failed".into()));

	StructuredError { message, code, source: ErrorSource::Validation, summary, global, fields }
}

// Records direct messages and descends into nested children; both levels are kept.
fn collect_children(
	children: &Value,
	prefix: Option<&str>,
	fields: &mut BTreeMap<String, Vec<String>>,
) {
	let entries: Vec<(String, &Value)> = match children {
		Value::Object(map) => map.iter().map(|(name, node)| (name.clone(), node)).collect(),
		Value::Array(items) =>
			items.iter().enumerate().map(|(idx, node)| (idx.to_string(), node)).collect(),
		_ => return,
	};

	for (name, node) in entries {
		let path = match prefix {
			Some(parent) => format!("{parent}.{name}"),
			None => name,
		};

		if let Some(messages) =
			node.get("errors").and_then(Value::as_array).filter(|messages| !messages.is_empty())
		{
			fields.entry(path.clone()).or_default().extend(messages.iter().map(message_text));
		}
		if let Some(nested) = node.get("children") {
			collect_children(nested, Some(&path), fields);
		}
	}
}

fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
	map.get(key).filter(|value| !value.is_null())
}

fn message_text(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}
