//! Property lookup on serializable values, and filling templates in JSON data.
//!
//! [`Properties`] turns any [`Serialize`] value into a [`ValueMap`],
//! so that templates can refer to its fields by name:
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use bracefill::json::Properties;
//! use bracefill::DisplayFormatter;
//!
//! #[derive(serde::Serialize)]
//! struct Order {
//!     id: u32,
//!     customer: Customer,
//!     items: Vec<&'static str>,
//! }
//!
//! #[derive(serde::Serialize)]
//! struct Customer {
//!     name: String,
//! }
//!
//! let order = Order {
//!     id: 17,
//!     customer: Customer { name: "Ada".into() },
//!     items: vec!["tea", "scones"],
//! };
//! let properties = Properties::new(&order)?;
//! assert_eq!(
//!     bracefill::fill("#{id,-4}{customer.name}: {items.1}", &properties, &DisplayFormatter)?,
//!     "#17  Ada: scones",
//! );
//! # Ok(())
//! # }
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{Formatter, Options, ValueMap};

/// A [`ValueMap`] that looks up the properties of a serialized value.
///
/// Keys are paths of property names separated by dots, like `customer.name`.
/// A path segment that is a number selects an element of an array.
#[derive(Debug, Clone, PartialEq)]
pub struct Properties {
	root: serde_json::Value,
}

impl Properties {
	/// Serialize a value to look up its properties.
	pub fn new<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
		Ok(Self::from_value(serde_json::to_value(value)?))
	}

	/// Look up properties in an already serialized value.
	pub fn from_value(root: serde_json::Value) -> Self {
		Self { root }
	}

	/// Get the serialized value.
	pub fn value(&self) -> &serde_json::Value {
		&self.root
	}

	/// Get the property at the given dotted path.
	pub fn lookup(&self, path: &str) -> Option<&serde_json::Value> {
		path.split('.').try_fold(&self.root, |value, segment| match value {
			serde_json::Value::Object(map) => map.get(segment),
			serde_json::Value::Array(seq) => seq.get(segment.parse::<usize>().ok()?),
			_ => None,
		})
	}
}

impl<'a> ValueMap<'a> for Properties {
	type Value = Property<'a>;

	fn get(&'a self, key: &str) -> Option<Self::Value> {
		self.lookup(key).map(Property)
	}
}

/// A property found by [`Properties`].
///
/// Displays strings without quotes and `null` as an empty string.
/// Other values display as JSON.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Property<'a>(pub &'a serde_json::Value);

impl std::fmt::Display for Property<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.0 {
			serde_json::Value::Null => Ok(()),
			serde_json::Value::String(x) => f.write_str(x),
			other => std::fmt::Display::fmt(other, f),
		}
	}
}

/// Parse a struct from JSON data, after filling templates in all string values.
///
/// This function first parses the data into a [`serde_json::Value`],
/// then fills all string values with the default [`Options`],
/// and then parses it further into the desired type.
pub fn from_slice<'a, T: DeserializeOwned, M, F>(data: &[u8], values: &'a M, formatter: &F) -> Result<T, Error>
where
	M: ValueMap<'a> + ?Sized,
	F: Formatter<M::Value> + ?Sized,
{
	let mut value: serde_json::Value = serde_json::from_slice(data)?;
	fill_string_values(&mut value, values, formatter, &Options::default())?;
	Ok(T::deserialize(value)?)
}

/// Parse a struct from JSON data, after filling templates in all string values.
///
/// This function first parses the data into a [`serde_json::Value`],
/// then fills all string values with the default [`Options`],
/// and then parses it further into the desired type.
pub fn from_str<'a, T: DeserializeOwned, M, F>(data: &str, values: &'a M, formatter: &F) -> Result<T, Error>
where
	M: ValueMap<'a> + ?Sized,
	F: Formatter<M::Value> + ?Sized,
{
	let mut value: serde_json::Value = serde_json::from_str(data)?;
	fill_string_values(&mut value, values, formatter, &Options::default())?;
	Ok(T::deserialize(value)?)
}

/// Fill templates in all string values of a JSON value.
///
/// Object keys are left alone.
pub fn fill_string_values<'a, M, F>(
	value: &mut serde_json::Value,
	values: &'a M,
	formatter: &F,
	options: &Options,
) -> Result<(), crate::Error>
where
	M: ValueMap<'a> + ?Sized,
	F: Formatter<M::Value> + ?Sized,
{
	visit_string_values(value, |value| {
		*value = crate::fill_with(value.as_str(), values, formatter, options)?;
		Ok(())
	})
}

/// Error for parsing JSON with template filling.
#[derive(Debug)]
pub enum Error {
	/// An error occurred while parsing JSON.
	Json(serde_json::Error),

	/// An error occurred while filling a template.
	Fill(crate::Error),
}

impl From<serde_json::Error> for Error {
	#[inline]
	fn from(other: serde_json::Error) -> Self {
		Self::Json(other)
	}
}

impl From<crate::Error> for Error {
	#[inline]
	fn from(other: crate::Error) -> Self {
		Self::Fill(other)
	}
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Json(e) => std::fmt::Display::fmt(e, f),
			Self::Fill(e) => std::fmt::Display::fmt(e, f),
		}
	}
}

/// Recursively apply a function to all string values in a JSON value.
fn visit_string_values<F, E>(value: &mut serde_json::Value, fun: F) -> Result<(), E>
where
	F: Copy + Fn(&mut String) -> Result<(), E>,
{
	match value {
		serde_json::Value::Null => Ok(()),
		serde_json::Value::Bool(_) => Ok(()),
		serde_json::Value::Number(_) => Ok(()),
		serde_json::Value::String(val) => fun(val),
		serde_json::Value::Array(seq) => {
			for value in seq {
				visit_string_values(value, fun)?;
			}
			Ok(())
		},
		serde_json::Value::Object(map) => {
			for value in map.values_mut() {
				visit_string_values(value, fun)?;
			}
			Ok(())
		},
	}
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use std::collections::HashMap;

	use super::*;
	use crate::DisplayFormatter;
	use assert2::{assert, check, let_assert};

	#[derive(Debug, serde::Deserialize)]
	struct Endpoint {
		url: String,
		label: String,
	}

	#[test]
	fn test_properties() {
		#[derive(serde::Serialize)]
		struct Inner {
			flag: bool,
			missing: Option<u8>,
		}

		#[derive(serde::Serialize)]
		struct Outer {
			name: &'static str,
			count: u32,
			inner: Inner,
			list: Vec<f64>,
		}

		let outer = Outer {
			name: "thing",
			count: 3,
			inner: Inner { flag: true, missing: None },
			list: vec![0.5, 1.5],
		};
		let_assert!(Ok(properties) = Properties::new(&outer));
		check!(let Ok("thing/3") = crate::fill("{name}/{count}", &properties, &DisplayFormatter).as_deref());
		check!(let Ok("true[]") = crate::fill("{inner.flag}[{inner.missing}]", &properties, &DisplayFormatter).as_deref());
		check!(let Ok("  1.5") = crate::fill("{list.1,5}", &properties, &DisplayFormatter).as_deref());
		check!(properties.lookup("list.2").is_none());
		check!(properties.lookup("name.first").is_none());
		check!(properties.lookup("list.x").is_none());

		let_assert!(Err(e) = crate::fill("{inner.other}", &properties, &DisplayFormatter));
		assert!(e.to_string() == r#"No value for key: "inner.other""#);
	}

	#[test]
	fn test_from_str() {
		let mut values = HashMap::new();
		values.insert("host", "example.com");
		values.insert("port", "8080");
		let_assert!(Ok(parsed) = from_str(r#"
			{
				"url": "https://{host}:{port}/",
				"label": "{host,-12}|"
			}"#,
			&values,
			&DisplayFormatter,
		));

		let parsed: Endpoint = parsed;
		assert!(parsed.url == "https://example.com:8080/");
		assert!(parsed.label == "example.com |");
	}

	#[test]
	fn test_from_str_no_substitution() {
		let_assert!(Ok(parsed) = from_str(r#"
			{
				"url": "https://example.com/{{id}}",
				"label": "plain"
			}"#,
			&crate::NoValues,
			&DisplayFormatter,
		));

		let parsed: Endpoint = parsed;
		assert!(parsed.url == "https://example.com/{id}");
		assert!(parsed.label == "plain");
	}

	#[test]
	fn test_json_in_value_is_not_parsed() {
		let mut values = HashMap::new();
		values.insert("url", "\", \"label\": \"injected");
		values.insert("label", "real");
		let_assert!(Ok(parsed) = from_slice(br#"{"url": "{url}", "label": "{label}"}"#, &values, &DisplayFormatter));

		let parsed: Endpoint = parsed;
		assert!(parsed.url == "\", \"label\": \"injected");
		assert!(parsed.label == "real");
	}

	#[test]
	fn test_fill_error() {
		let values: HashMap<&str, &str> = HashMap::new();
		let_assert!(Err(Error::Fill(_)) = from_str::<Endpoint, _, _>(r#"{"url": "{url}", "label": ""}"#, &values, &DisplayFormatter));
	}
}
