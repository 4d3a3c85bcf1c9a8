use std::marker::PhantomData;

use serde::{
	de::{Error, Visitor},
	Deserialize,
	Deserializer,
	Serialize,
	Serializer,
};

use crate::{Template, TemplateBuf};

struct TemplateVisitor<'de> {
	_lifetime: PhantomData<&'de ()>,
}

impl<'de> TemplateVisitor<'de> {
	const fn new() -> Self {
		Self { _lifetime: PhantomData }
	}
}

impl<'de> Visitor<'de> for TemplateVisitor<'de> {
	type Value = Template<'de>;

	fn visit_borrowed_str<E>(self, v: &'de str) -> Result<Self::Value, E>
	where
		E: Error,
	{
		Template::from_str(v).map_err(E::custom)
	}

	fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
		formatter.write_str("a borrowed template string")
	}
}

struct TemplateBufVisitor;

impl<'de> Visitor<'de> for TemplateBufVisitor {
	type Value = TemplateBuf;

	fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
		formatter.write_str("a template string")
	}

	fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
	where
		E: Error,
	{
		self.visit_string(v.to_owned())
	}

	fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
	where
		E: Error,
	{
		TemplateBuf::from_string(v).map_err(E::custom)
	}
}

/// Templates serialize as their source string.
///
/// The options are not serialized: deserialized templates always use the default options.
impl Serialize for Template<'_> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(self.source())
	}
}

impl Serialize for TemplateBuf {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(self.source())
	}
}

impl<'de> Deserialize<'de> for Template<'de> {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_str(TemplateVisitor::new())
	}
}

impl<'de> Deserialize<'de> for TemplateBuf {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_string(TemplateBufVisitor)
	}
}
