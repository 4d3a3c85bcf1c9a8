//! Support for filling templates in YAML data.

use serde::de::DeserializeOwned;

use crate::{Formatter, Options, ValueMap};

/// Parse a struct from YAML data, after filling templates in all string values.
///
/// This function first parses the data into a [`serde_yaml::Value`],
/// then fills all string values with the default [`Options`],
/// and then parses it further into the desired type.
pub fn from_slice<'a, T: DeserializeOwned, M, F>(data: &[u8], values: &'a M, formatter: &F) -> Result<T, Error>
where
	M: ValueMap<'a> + ?Sized,
	F: Formatter<M::Value> + ?Sized,
{
	let mut value: serde_yaml::Value = serde_yaml::from_slice(data)?;
	fill_string_values(&mut value, values, formatter, &Options::default())?;
	Ok(serde_yaml::from_value(value)?)
}

/// Parse a struct from YAML data, after filling templates in all string values.
///
/// This function first parses the data into a [`serde_yaml::Value`],
/// then fills all string values with the default [`Options`],
/// and then parses it further into the desired type.
pub fn from_str<'a, T: DeserializeOwned, M, F>(data: &str, values: &'a M, formatter: &F) -> Result<T, Error>
where
	M: ValueMap<'a> + ?Sized,
	F: Formatter<M::Value> + ?Sized,
{
	let mut value: serde_yaml::Value = serde_yaml::from_str(data)?;
	fill_string_values(&mut value, values, formatter, &Options::default())?;
	Ok(serde_yaml::from_value(value)?)
}

/// Fill templates in all string values of a YAML value.
///
/// Mapping keys are left alone.
pub fn fill_string_values<'a, M, F>(
	value: &mut serde_yaml::Value,
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

/// Error for parsing YAML with template filling.
#[derive(Debug)]
pub enum Error {
	/// An error occurred while parsing YAML.
	Yaml(serde_yaml::Error),

	/// An error occurred while filling a template.
	Fill(crate::Error),
}

impl From<serde_yaml::Error> for Error {
	#[inline]
	fn from(other: serde_yaml::Error) -> Self {
		Self::Yaml(other)
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
			Error::Yaml(e) => std::fmt::Display::fmt(e, f),
			Error::Fill(e) => std::fmt::Display::fmt(e, f),
		}
	}
}

/// Recursively apply a function to all string values in a YAML value.
fn visit_string_values<F, E>(value: &mut serde_yaml::Value, fun: F) -> Result<(), E>
where
	F: Copy + Fn(&mut String) -> Result<(), E>,
{
	match value {
		serde_yaml::Value::Null => Ok(()),
		serde_yaml::Value::Bool(_) => Ok(()),
		serde_yaml::Value::Number(_) => Ok(()),
		serde_yaml::Value::String(val) => fun(val),
		serde_yaml::Value::Tagged(tagged) => visit_string_values(&mut tagged.value, fun),
		serde_yaml::Value::Sequence(seq) => {
			for value in seq {
				visit_string_values(value, fun)?;
			}
			Ok(())
		},
		serde_yaml::Value::Mapping(map) => {
			for (_key, value) in map.iter_mut() {
				visit_string_values(value, fun)?;
			}
			Ok(())
		},
	}
}
