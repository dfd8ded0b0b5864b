//! Query-string parameters appended to resource URLs.

// self
use crate::_prelude::*;

/// Scalar value accepted as a query parameter.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryValue {
	/// Text value.
	Text(String),
	/// Boolean rendered as `true` or `false`.
	Bool(bool),
	/// Signed integer.
	Int(i64),
	/// Unsigned integer.
	UInt(u64),
	/// Floating-point number.
	Float(f64),
}
impl Display for QueryValue {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Text(s) => f.write_str(s),
			Self::Bool(b) => write!(f, "{b}"),
			Self::Int(n) => write!(f, "{n}"),
			Self::UInt(n) => write!(f, "{n}"),
			Self::Float(n) => write!(f, "{n}"),
		}
	}
}
impl From<&str> for QueryValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}
impl From<String> for QueryValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}
impl From<bool> for QueryValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}
impl From<i32> for QueryValue {
	fn from(value: i32) -> Self {
		Self::Int(value.into())
	}
}
impl From<i64> for QueryValue {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}
impl From<u32> for QueryValue {
	fn from(value: u32) -> Self {
		Self::UInt(value.into())
	}
}
impl From<u64> for QueryValue {
	fn from(value: u64) -> Self {
		Self::UInt(value)
	}
}
impl From<f64> for QueryValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

/// Ordered set of query parameters; later inserts replace earlier ones with the same key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query(BTreeMap<String, QueryValue>);
impl Query {
	/// Creates an empty query.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds or replaces a parameter.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
		self.insert(key, value);

		self
	}

	/// Adds or replaces a parameter in place.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
		self.0.insert(key.into(), value.into());
	}

	/// Returns `true` if no parameters are set.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates over parameters in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value))
	}

	/// Appends every parameter to `url`, leaving it untouched when the query is empty.
	pub fn apply_to(&self, url: &mut Url) {
		if self.is_empty() {
			return;
		}

		let mut pairs = url.query_pairs_mut();

		for (key, value) in self.iter() {
			pairs.append_pair(key, &value.to_string());
		}
	}
}
impl<K, V> FromIterator<(K, V)> for Query
where
	K: Into<String>,
	V: Into<QueryValue>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}
}
