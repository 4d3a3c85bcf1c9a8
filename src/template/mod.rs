use crate::error::{FillError, ParseError};
use crate::format::Formatter;
use crate::tokenizer::Tokenizer;
use crate::{Options, ValueMap};

pub(crate) mod raw;

/// A parsed template that borrows the source string.
///
/// You can parse the template once and call [`Self::fill()`] multiple times.
/// This is generally more efficient than calling [`fill()`][crate::fill] multiple times on the same string.
///
/// This template borrows the source string.
/// You can use [`TemplateBuf`] if you need a template that owns the source string.
#[derive(Clone)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct Template<'a> {
	source: &'a str,
	options: Options,
	raw: raw::Template,
}

impl std::fmt::Debug for Template<'_> {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Template").field(&self.source).finish()
	}
}

impl<'a> Template<'a> {
	/// Parse a template from a string slice with the default options.
	///
	/// Tokens have the form `{key}`, `{key,alignment}`, `{key:format}` or `{key,alignment:format}`.
	/// Use `{{` and `}}` for literal braces.
	#[inline]
	#[allow(clippy::should_implement_trait)]
	pub fn from_str(source: &'a str) -> Result<Self, ParseError> {
		Self::with_options(source, Options::default())
	}

	/// Parse a template from a string slice with custom options.
	pub fn with_options(source: &'a str, options: Options) -> Result<Self, ParseError> {
		Ok(Self {
			source,
			options,
			raw: raw::Template::parse(source, &options)?,
		})
	}

	/// Get the original source string.
	#[inline]
	pub fn source(&self) -> &'a str {
		self.source
	}

	/// Get the options used to parse and fill the template.
	#[inline]
	pub fn options(&self) -> &Options {
		&self.options
	}

	/// Iterate over the segments of the source again.
	///
	/// The template already parsed successfully, so the tokenizer yields no errors.
	#[inline]
	pub fn segments(&self) -> Tokenizer<'a> {
		Tokenizer::new(self.source, &self.options)
	}

	/// Fill the template.
	///
	/// This will substitute all tokens in the template with the formatted values from the given map.
	pub fn fill<'b, M, F>(&self, values: &'b M, formatter: &F) -> Result<String, FillError>
	where
		M: ValueMap<'b> + ?Sized,
		F: Formatter<M::Value> + ?Sized,
	{
		let mut output = String::with_capacity(self.source.len() + self.source.len() / 10);
		self.raw.expand(&mut output, self.source, self.options.missing_key, values, formatter)?;
		Ok(output)
	}
}

/// A parsed template that owns the source string.
///
/// You can parse the template once and call [`Self::fill()`] multiple times.
///
/// This template owns the source string.
/// If you do not need ownership, you can also use [`Template`] to borrow it instead.
#[derive(Clone)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct TemplateBuf {
	source: String,
	options: Options,
	raw: raw::Template,
}

impl std::fmt::Debug for TemplateBuf {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("TemplateBuf").field(&self.source).finish()
	}
}

impl TemplateBuf {
	/// Parse a template from a string with the default options.
	///
	/// This takes ownership of the string.
	#[inline]
	pub fn from_string(source: String) -> Result<Self, ParseError> {
		Self::with_options(source, Options::default())
	}

	/// Parse a template from a string with custom options.
	pub fn with_options(source: String, options: Options) -> Result<Self, ParseError> {
		let raw = raw::Template::parse(&source, &options)?;
		Ok(Self { source, options, raw })
	}

	/// Get the original source string.
	#[inline]
	pub fn source(&self) -> &str {
		&self.source
	}

	/// Get the options used to parse and fill the template.
	#[inline]
	pub fn options(&self) -> &Options {
		&self.options
	}

	/// Consume the template to get the original source string.
	#[inline]
	pub fn into_source(self) -> String {
		self.source
	}

	/// Borrow the template.
	#[inline]
	pub fn as_template(&self) -> Template<'_> {
		self.into()
	}

	/// Fill the template.
	///
	/// This will substitute all tokens in the template with the formatted values from the given map.
	pub fn fill<'b, M, F>(&self, values: &'b M, formatter: &F) -> Result<String, FillError>
	where
		M: ValueMap<'b> + ?Sized,
		F: Formatter<M::Value> + ?Sized,
	{
		let mut output = String::with_capacity(self.source.len() + self.source.len() / 10);
		self.raw.expand(&mut output, &self.source, self.options.missing_key, values, formatter)?;
		Ok(output)
	}
}

impl<'a> From<&'a TemplateBuf> for Template<'a> {
	#[inline]
	fn from(other: &'a TemplateBuf) -> Self {
		Self {
			source: &other.source,
			options: other.options,
			raw: other.raw.clone(),
		}
	}
}

impl From<&Template<'_>> for TemplateBuf {
	#[inline]
	fn from(other: &Template<'_>) -> Self {
		other.clone().into()
	}
}

impl From<Template<'_>> for TemplateBuf {
	#[inline]
	fn from(other: Template<'_>) -> Self {
		Self {
			source: other.source.into(),
			options: other.options,
			raw: other.raw,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{DisplayFormatter, MissingKeyPolicy};
	use assert2::{assert, check, let_assert};
	use std::collections::BTreeMap;

	#[test]
	fn test_fill_many_times() {
		let_assert!(Ok(template) = Template::from_str("Hello {name,-6}|"));
		let mut map: BTreeMap<&str, &str> = BTreeMap::new();
		map.insert("name", "world");
		check!(let Ok("Hello world |") = template.fill(&map, &DisplayFormatter).as_deref());
		map.insert("name", "you");
		check!(let Ok("Hello you   |") = template.fill(&map, &DisplayFormatter).as_deref());
	}

	#[test]
	fn test_template_buf() {
		let mut map: BTreeMap<String, i32> = BTreeMap::new();
		map.insert("count".into(), 7);
		let source = "{{count}} = {count,3}";
		let_assert!(Ok(buf1) = TemplateBuf::from_string(source.into()));
		let buf2 = buf1.clone();
		let mut string = buf1.into_source();
		string.make_ascii_uppercase();
		check!(let Ok("{count} =   7") = buf2.fill(&map, &DisplayFormatter).as_deref());
		assert!(buf2.as_template().source() == source);
		assert!(buf2.into_source() == source);
	}

	#[test]
	fn test_move_template_buf() {
		#[inline(never)]
		fn check_template(buf: TemplateBuf) {
			let map = [("name", "world")];
			assert!(buf.as_template().source() == "Hello {name}!");
			let_assert!(Ok(filled) = buf.as_template().fill(&map, &DisplayFormatter));
			assert!(filled == "Hello world!");
		}

		let_assert!(Ok(template) = Template::from_str("Hello {name}!"));
		check_template(template.into());
	}

	#[test]
	fn test_options_are_kept() {
		let options = Options::new().with_missing_key(MissingKeyPolicy::LeaveUnchanged);
		let_assert!(Ok(buf) = TemplateBuf::with_options("{a} {b,5}".into(), options));
		assert!(buf.options() == &options);
		check!(let Ok("1 {b,5}") = buf.fill(&[("a", 1)], &DisplayFormatter).as_deref());
	}

	#[test]
	fn test_segments() {
		let_assert!(Ok(template) = Template::from_str("a{b}c"));
		assert!(template.segments().count() == 3);
		assert!(template.segments().all(|x| x.is_ok()));
	}
}
