//! Parsing and building the text between two delimiters.

use std::borrow::Cow;
use std::ops::Range;
use std::sync::OnceLock;

/// The parts of a single token: key, alignment and format.
///
/// A raw token has the form `key[,alignment][:format]`.
/// The first colon starts the format, so the format itself may contain colons and commas.
/// The last comma before the format starts the alignment.
///
/// Any string is a valid raw token.
/// In the worst case, the whole string is the key.
///
/// ```
/// # use bracefill::TokenInformation;
/// let token = TokenInformation::parse("price,10:#,##0.00");
/// assert_eq!(token.token_key(), "price");
/// assert_eq!(token.alignment(), Some("10"));
/// assert_eq!(token.format(), Some("#,##0.00"));
/// assert_eq!(token.format_string(), ",10:#,##0.00");
/// ```
#[derive(Debug)]
pub struct TokenInformation<'a> {
	raw: Cow<'a, str>,
	key: Range<usize>,
	alignment: Option<Range<usize>>,
	format: Option<Range<usize>>,
	format_string: OnceLock<String>,
}

impl<'a> TokenInformation<'a> {
	/// Parse a raw token, without the surrounding delimiters.
	pub fn parse(raw: &'a str) -> Self {
		Self::from_cow(Cow::Borrowed(raw))
	}

	/// Build a token from its parts.
	///
	/// This is the same as parsing the output of [`build_string()`].
	pub fn build(key: &str, alignment: Option<i64>, format: Option<&str>) -> TokenInformation<'static> {
		TokenInformation::from_cow(Cow::Owned(build_string(key, alignment, format)))
	}

	fn from_cow(raw: Cow<'a, str>) -> Self {
		let (head, format) = match memchr::memchr(b':', raw.as_bytes()) {
			Some(colon) => (0..colon, Some(colon + 1..raw.len())),
			None => (0..raw.len(), None),
		};
		let (key, alignment) = match memchr::memrchr(b',', &raw.as_bytes()[head.clone()]) {
			Some(comma) => (0..comma, Some(comma + 1..head.end)),
			None => (head, None),
		};
		Self {
			raw,
			key,
			alignment,
			format,
			format_string: OnceLock::new(),
		}
	}

	/// The unmodified text between the delimiters.
	#[inline]
	pub fn raw_token(&self) -> &str {
		&self.raw
	}

	/// The key used to look up the value.
	#[inline]
	pub fn token_key(&self) -> &str {
		&self.raw[self.key.clone()]
	}

	/// The alignment, as written in the token.
	#[inline]
	pub fn alignment(&self) -> Option<&str> {
		self.alignment.clone().map(|range| &self.raw[range])
	}

	/// The format specifier, without the leading colon.
	#[inline]
	pub fn format(&self) -> Option<&str> {
		self.format.clone().map(|range| &self.raw[range])
	}

	/// The byte range of the alignment within the raw token.
	pub(crate) fn alignment_range(&self) -> Option<Range<usize>> {
		self.alignment.clone()
	}

	/// The byte range of the format within the raw token.
	pub(crate) fn format_range(&self) -> Option<Range<usize>> {
		self.format.clone()
	}

	/// The alignment as a signed field width.
	///
	/// Returns `Ok(None)` if the token has no alignment or an empty one.
	/// Leading and trailing whitespace is ignored.
	/// Returns the alignment text if it is not an integer.
	pub fn alignment_width(&self) -> Result<Option<i64>, &str> {
		let alignment = match self.alignment() {
			Some(x) => x,
			None => return Ok(None),
		};
		let trimmed = alignment.trim();
		if trimmed.is_empty() {
			return Ok(None);
		}
		trimmed.parse().map(Some).map_err(|_| alignment)
	}

	/// The composite format string: `[,alignment][:format]`.
	///
	/// Empty parts are left out, so this is empty for a plain `key` token.
	/// The string is computed on first use and cached.
	pub fn format_string(&self) -> &str {
		self.format_string.get_or_init(|| {
			let mut output = String::new();
			push_suffix(&mut output, self.alignment(), self.format());
			output
		})
	}

	/// Convert into a token that owns its text.
	pub fn into_owned(self) -> TokenInformation<'static> {
		TokenInformation {
			raw: Cow::Owned(self.raw.into_owned()),
			key: self.key,
			alignment: self.alignment,
			format: self.format,
			format_string: self.format_string,
		}
	}
}

impl Clone for TokenInformation<'_> {
	fn clone(&self) -> Self {
		Self {
			raw: self.raw.clone(),
			key: self.key.clone(),
			alignment: self.alignment.clone(),
			format: self.format.clone(),
			format_string: self.format_string.clone(),
		}
	}
}

impl PartialEq for TokenInformation<'_> {
	fn eq(&self, other: &Self) -> bool {
		self.raw == other.raw
	}
}

impl Eq for TokenInformation<'_> {}

impl std::fmt::Display for TokenInformation<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.raw)
	}
}

/// Build a raw token from a key, an optional alignment and an optional format.
///
/// The result is `key[,alignment][:format]`, where an empty format is left out.
pub fn build_string(key: &str, alignment: Option<i64>, format: Option<&str>) -> String {
	let alignment = alignment.map(|x| x.to_string());
	build_string_raw(key, alignment.as_deref(), format)
}

/// Build a raw token from a key, an optional textual alignment and an optional format.
///
/// Empty alignment and format strings are left out.
pub fn build_string_raw(key: &str, alignment: Option<&str>, format: Option<&str>) -> String {
	let mut output = String::with_capacity(key.len() + 8);
	output.push_str(key);
	push_suffix(&mut output, alignment, format);
	output
}

fn push_suffix(output: &mut String, alignment: Option<&str>, format: Option<&str>) {
	if let Some(alignment) = alignment.filter(|x| !x.is_empty()) {
		output.push(',');
		output.push_str(alignment);
	}
	if let Some(format) = format.filter(|x| !x.is_empty()) {
		output.push(':');
		output.push_str(format);
	}
}
