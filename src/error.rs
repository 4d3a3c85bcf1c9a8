//! Module containing error details.

/// An error that can occur while filling a template.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub enum Error {
	/// The template could not be parsed.
	Parse(ParseError),

	/// A parsed template could not be filled.
	Fill(FillError),
}

/// An error that can occur while parsing a template.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub enum ParseError {
	/// The template contains an open delimiter without a matching close delimiter.
	UnterminatedToken(UnterminatedToken),

	/// The template contains a close delimiter that does not close anything and is not escaped.
	MalformedDelimiter(MalformedDelimiter),
}

/// An error that can occur while filling a parsed template.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub enum FillError {
	/// The template contains a token for a key that is not in the value map.
	MissingKey(MissingKey),

	/// The template contains a token with an alignment that is not an integer.
	InvalidAlignment(InvalidAlignment),

	/// The formatter failed to format a value.
	InvalidFormat(InvalidFormat),
}

impl From<ParseError> for Error {
	#[inline]
	fn from(other: ParseError) -> Self {
		Self::Parse(other)
	}
}

impl From<FillError> for Error {
	#[inline]
	fn from(other: FillError) -> Self {
		Self::Fill(other)
	}
}

impl From<UnterminatedToken> for ParseError {
	#[inline]
	fn from(other: UnterminatedToken) -> Self {
		Self::UnterminatedToken(other)
	}
}

impl From<MalformedDelimiter> for ParseError {
	#[inline]
	fn from(other: MalformedDelimiter) -> Self {
		Self::MalformedDelimiter(other)
	}
}

impl From<MissingKey> for FillError {
	#[inline]
	fn from(other: MissingKey) -> Self {
		Self::MissingKey(other)
	}
}

impl From<InvalidAlignment> for FillError {
	#[inline]
	fn from(other: InvalidAlignment) -> Self {
		Self::InvalidAlignment(other)
	}
}

impl From<InvalidFormat> for FillError {
	#[inline]
	fn from(other: InvalidFormat) -> Self {
		Self::InvalidFormat(other)
	}
}

impl From<UnterminatedToken> for Error {
	#[inline]
	fn from(other: UnterminatedToken) -> Self {
		Self::Parse(other.into())
	}
}

impl From<MalformedDelimiter> for Error {
	#[inline]
	fn from(other: MalformedDelimiter) -> Self {
		Self::Parse(other.into())
	}
}

impl From<MissingKey> for Error {
	#[inline]
	fn from(other: MissingKey) -> Self {
		Self::Fill(other.into())
	}
}

impl From<InvalidAlignment> for Error {
	#[inline]
	fn from(other: InvalidAlignment) -> Self {
		Self::Fill(other.into())
	}
}

impl From<InvalidFormat> for Error {
	#[inline]
	fn from(other: InvalidFormat) -> Self {
		Self::Fill(other.into())
	}
}

impl std::error::Error for Error {}
impl std::error::Error for ParseError {}
impl std::error::Error for FillError {}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Parse(e) => e.fmt(f),
			Self::Fill(e) => e.fmt(f),
		}
	}
}

impl std::fmt::Display for ParseError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::UnterminatedToken(e) => e.fmt(f),
			Self::MalformedDelimiter(e) => e.fmt(f),
		}
	}
}

impl std::fmt::Display for FillError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::MissingKey(e) => e.fmt(f),
			Self::InvalidAlignment(e) => e.fmt(f),
			Self::InvalidFormat(e) => e.fmt(f),
		}
	}
}

/// The template contains an open delimiter without a matching close delimiter.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct UnterminatedToken {
	/// The byte offset within the template where the error occurs.
	///
	/// This points to the open delimiter that is never closed.
	pub position: usize,
}

impl std::error::Error for UnterminatedToken {}

impl std::fmt::Display for UnterminatedToken {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Unterminated token: missing close delimiter")
	}
}

/// The template contains a close delimiter that does not close anything and is not escaped.
///
/// Only reported with [`UnmatchedDelimiterPolicy::Throw`][crate::UnmatchedDelimiterPolicy::Throw].
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct MalformedDelimiter {
	/// The byte offset within the template where the error occurs.
	pub position: usize,

	/// The unmatched delimiter.
	pub delimiter: char,
}

impl std::error::Error for MalformedDelimiter {}

impl std::fmt::Display for MalformedDelimiter {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Unmatched close delimiter: {:?}", self.delimiter)
	}
}

/// The template contains a token for a key that is not in the value map.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct MissingKey {
	/// The byte offset within the template where the error occurs.
	///
	/// This points to the open delimiter of the token.
	pub position: usize,

	/// The length of the token in bytes, including both delimiters.
	pub len: usize,

	/// The key that could not be resolved.
	pub key: String,
}

impl std::error::Error for MissingKey {}

impl std::fmt::Display for MissingKey {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "No value for key: {:?}", self.key)
	}
}

/// The template contains a token with an alignment that is not an integer.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct InvalidAlignment {
	/// The byte offset within the template where the error occurs.
	///
	/// This points to the first character of the alignment.
	pub position: usize,

	/// The alignment text as written in the template.
	pub alignment: String,
}

impl std::error::Error for InvalidAlignment {}

impl std::fmt::Display for InvalidAlignment {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Invalid alignment: {:?}, expected an integer between -999999 and 999999", self.alignment)
	}
}

/// The formatter failed to format a value.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct InvalidFormat {
	/// The byte offset within the template where the error occurs.
	///
	/// This points to the format specifier, or to the open delimiter if the token has none.
	pub position: usize,

	/// The length of the highlighted range in bytes.
	pub len: usize,

	/// The key of the value that failed to format.
	pub key: String,

	/// The format specifier passed to the formatter.
	pub format: Option<String>,
}

impl std::error::Error for InvalidFormat {}

impl std::fmt::Display for InvalidFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match &self.format {
			Some(format) => write!(f, "Failed to format value for key {:?} with format {:?}", self.key, format),
			None => write!(f, "Failed to format value for key {:?}", self.key),
		}
	}
}

impl ParseError {
	/// Get the range in the source text that contains the error.
	pub fn source_range(&self) -> std::ops::Range<usize> {
		let start = match self {
			Self::UnterminatedToken(e) => e.position,
			Self::MalformedDelimiter(e) => e.position,
		};
		start..start + 1
	}
}

impl FillError {
	/// Get the range in the source text that contains the error.
	pub fn source_range(&self) -> std::ops::Range<usize> {
		let (start, len) = match self {
			Self::MissingKey(e) => (e.position, e.len),
			Self::InvalidAlignment(e) => (e.position, e.alignment.len()),
			Self::InvalidFormat(e) => (e.position, e.len),
		};
		start..start + len
	}
}

impl Error {
	/// Get the range in the source text that contains the error.
	pub fn source_range(&self) -> std::ops::Range<usize> {
		match self {
			Self::Parse(e) => e.source_range(),
			Self::Fill(e) => e.source_range(),
		}
	}

	/// Get the line of source that contains the error.
	///
	/// # Panics
	/// May panic if the source text is not the original source that contains the error.
	pub fn source_line<'a>(&self, source: &'a str) -> &'a str {
		let position = self.source_range().start;
		let start = line_start(source, position);
		let end = line_end(source, position);
		&source[start..end]
	}

	/// Write source highlighting for the error location.
	///
	/// The highlighting ends with a newline.
	///
	/// Note: this function doesn't print anything if the source line exceeds 60 characters in width.
	/// For more control over this behaviour, consider using [`Self::source_range()`] and [`Self::source_line()`] instead.
	pub fn write_source_highlighting(&self, f: &mut impl std::fmt::Write, source: &str) -> std::fmt::Result {
		use unicode_width::UnicodeWidthStr;

		let range = self.source_range();
		let line_start = line_start(source, range.start);
		let line = self.source_line(source);
		if line.width() > 60 {
			return Ok(());
		}

		// Keep the underline on the line that contains the start of the error.
		let start = range.start - line_start;
		let end = (range.end - line_start).min(line.len());
		write!(f, "  {}\n  ", line)?;
		write_underline(f, line, start..end)?;
		writeln!(f)
	}

	/// Get source highlighting for the error location as a string.
	///
	/// The highlighting ends with a newline.
	pub fn source_highlighting(&self, source: &str) -> String {
		let mut output = String::new();
		// Writing to a String never fails.
		let _ = self.write_source_highlighting(&mut output, source);
		output
	}
}

fn line_start(source: &str, position: usize) -> usize {
	match source.as_bytes()[..position].iter().rposition(|&c| c == b'\n' || c == b'\r') {
		Some(line_end) => line_end + 1,
		None => 0,
	}
}

fn line_end(source: &str, position: usize) -> usize {
	match source.as_bytes()[position..].iter().position(|&c| c == b'\n' || c == b'\r') {
		Some(line_end) => position + line_end,
		None => source.len(),
	}
}

fn write_underline(f: &mut impl std::fmt::Write, line: &str, range: std::ops::Range<usize>) -> std::fmt::Result {
	use unicode_width::UnicodeWidthStr;
	let spaces = line[..range.start].width();
	let carets = line[range].width().max(1);
	write!(f, "{}", " ".repeat(spaces))?;
	write!(f, "{}", "^".repeat(carets))?;
	Ok(())
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use super::*;
	use assert2::assert;

	#[test]
	fn test_source_range() {
		let error: Error = MissingKey { position: 6, len: 6, key: "name".into() }.into();
		assert!(error.source_range() == (6..12));

		let error: Error = InvalidAlignment { position: 9, alignment: "wide".into() }.into();
		assert!(error.source_range() == (9..13));

		let error: Error = UnterminatedToken { position: 3 }.into();
		assert!(error.source_range() == (3..4));
	}

	#[test]
	fn test_source_line() {
		let source = "first line\nHello {name}!\nlast line";
		let error: Error = MissingKey { position: 17, len: 6, key: "name".into() }.into();
		assert!(error.source_line(source) == "Hello {name}!");
		assert!(error.source_highlighting(source) == concat!(
			"  Hello {name}!\n",
			"        ^^^^^^\n",
		));
	}

	#[test]
	fn test_highlighting_wide_characters() {
		let source = "❤❤ {name}";
		let error: Error = MissingKey { position: 7, len: 6, key: "name".into() }.into();
		assert!(error.source_highlighting(source) == concat!(
			"  ❤❤ {name}\n",
			"     ^^^^^^\n",
		));
	}

	#[test]
	fn test_highlighting_long_line_is_skipped() {
		let source = format!("{}{{name}}", "x".repeat(80));
		let error: Error = MissingKey { position: 80, len: 6, key: "name".into() }.into();
		assert!(error.source_highlighting(&source) == "");
	}

	#[test]
	fn test_display() {
		let error: Error = MalformedDelimiter { position: 0, delimiter: '}' }.into();
		assert!(error.to_string() == "Unmatched close delimiter: '}'");

		let error: Error = InvalidFormat { position: 0, len: 1, key: "date".into(), format: Some("%Q".into()) }.into();
		assert!(error.to_string() == r#"Failed to format value for key "date" with format "%Q""#);
	}
}
