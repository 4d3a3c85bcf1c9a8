//! Support for filling templates in TOML data.

use serde::de::DeserializeOwned;

use crate::{Formatter, Options, ValueMap};

/// Parse a struct from TOML data, after filling templates in all string values.
///
/// This function first parses the data into a [`toml::Value`],
/// then fills all string values with the default [`Options`],
/// and then parses it further into the desired type.
pub fn from_slice<'a, T: DeserializeOwned, M, F>(data: &[u8], values: &'a M, formatter: &F) -> Result<T, Error>
where
	M: ValueMap<'a> + ?Sized,
	F: Formatter<M::Value> + ?Sized,
{
	from_str(std::str::from_utf8(data)?, values, formatter)
}

/// Parse a struct from TOML data, after filling templates in all string values.
///
/// This function first parses the data into a [`toml::Value`],
/// then fills all string values with the default [`Options`],
/// and then parses it further into the desired type.
pub fn from_str<'a, T: DeserializeOwned, M, F>(data: &str, values: &'a M, formatter: &F) -> Result<T, Error>
where
	M: ValueMap<'a> + ?Sized,
	F: Formatter<M::Value> + ?Sized,
{
	let mut value: toml::Value = toml::from_str(data)?;
	fill_string_values(&mut value, values, formatter, &Options::default())?;
	Ok(T::deserialize(value)?)
}

/// Fill templates in all string values of a TOML value.
///
/// Table keys are left alone.
pub fn fill_string_values<'a, M, F>(
	value: &mut toml::Value,
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

/// Error for parsing TOML with template filling.
#[derive(Debug)]
pub enum Error {
	/// The input contains invalid UTF-8.
	InvalidUtf8(std::str::Utf8Error),

	/// An error occurred while parsing TOML.
	Toml(toml::de::Error),

	/// An error occurred while filling a template.
	Fill(crate::Error),
}

impl From<std::str::Utf8Error> for Error {
	#[inline]
	fn from(other: std::str::Utf8Error) -> Self {
		Self::InvalidUtf8(other)
	}
}

impl From<toml::de::Error> for Error {
	#[inline]
	fn from(other: toml::de::Error) -> Self {
		Self::Toml(other)
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
			Self::InvalidUtf8(e) => std::fmt::Display::fmt(e, f),
			Self::Toml(e) => std::fmt::Display::fmt(e, f),
			Self::Fill(e) => std::fmt::Display::fmt(e, f),
		}
	}
}

/// Recursively apply a function to all string values in a TOML value.
fn visit_string_values<F, E>(value: &mut toml::Value, fun: F) -> Result<(), E>
where
	F: Copy + Fn(&mut String) -> Result<(), E>,
{
	match value {
		toml::Value::Boolean(_) => Ok(()),
		toml::Value::Integer(_) => Ok(()),
		toml::Value::Float(_) => Ok(()),
		toml::Value::Datetime(_) => Ok(()),
		toml::Value::String(val) => fun(val),
		toml::Value::Array(seq) => {
			for value in seq {
				visit_string_values(value, fun)?;
			}
			Ok(())
		},
		toml::Value::Table(map) => {
			for (_key, value) in map.iter_mut() {
				visit_string_values(value, fun)?;
			}
			Ok(())
		},
	}
}
