//! Options controlling how templates are parsed and filled.

/// The pair of delimiters that surround a token.
///
/// Both delimiters must be ASCII characters.
/// A doubled delimiter in literal text is an escape for a single delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "(char, char)", into = "(char, char)"))]
pub struct Delimiters {
	open: u8,
	close: u8,
}

impl Delimiters {
	/// The default delimiters: `{` and `}`.
	pub const BRACES: Self = Self::new(b'{', b'}');

	/// Create a new delimiter pair.
	///
	/// # Panics
	/// Panics if either delimiter is not an ASCII character.
	pub const fn new(open: u8, close: u8) -> Self {
		assert!(open.is_ascii() && close.is_ascii(), "delimiters must be ASCII characters");
		Self { open, close }
	}

	/// Get the open delimiter.
	#[inline]
	pub const fn open(&self) -> u8 {
		self.open
	}

	/// Get the close delimiter.
	#[inline]
	pub const fn close(&self) -> u8 {
		self.close
	}

	/// Check if tokens can nest.
	///
	/// Nesting is only tracked when the open and close delimiters are different characters.
	#[inline]
	pub const fn nests(&self) -> bool {
		self.open != self.close
	}
}

impl Default for Delimiters {
	#[inline]
	fn default() -> Self {
		Self::BRACES
	}
}

impl TryFrom<(char, char)> for Delimiters {
	type Error = NonAsciiDelimiter;

	fn try_from((open, close): (char, char)) -> Result<Self, Self::Error> {
		for c in [open, close] {
			if !c.is_ascii() {
				return Err(NonAsciiDelimiter { delimiter: c });
			}
		}
		Ok(Self::new(open as u8, close as u8))
	}
}

impl From<Delimiters> for (char, char) {
	#[inline]
	fn from(other: Delimiters) -> Self {
		(char::from(other.open), char::from(other.close))
	}
}

/// A delimiter was not an ASCII character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonAsciiDelimiter {
	/// The rejected delimiter.
	pub delimiter: char,
}

impl std::error::Error for NonAsciiDelimiter {}

impl std::fmt::Display for NonAsciiDelimiter {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Delimiter must be an ASCII character: {:?}", self.delimiter)
	}
}

/// What to do with a token whose key is not in the value map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MissingKeyPolicy {
	/// Fail with a [`MissingKey`][crate::error::MissingKey] error.
	#[default]
	Throw,

	/// Replace the token with an empty string.
	SubstituteEmpty,

	/// Copy the token to the output as written, including the delimiters.
	LeaveUnchanged,
}

/// What to do with a close delimiter that does not close a token and is not doubled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnmatchedDelimiterPolicy {
	/// Fail with a [`MalformedDelimiter`][crate::error::MalformedDelimiter] error.
	Throw,

	/// Copy the delimiter to the output.
	#[default]
	TreatAsLiteral,
}

/// Options for parsing and filling templates.
///
/// The defaults use `{` and `}` as delimiters,
/// fail on missing keys and copy unmatched close delimiters verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Options {
	/// The delimiters that surround tokens.
	pub delimiters: Delimiters,

	/// What to do with a token whose key is not in the value map.
	pub missing_key: MissingKeyPolicy,

	/// What to do with an unmatched close delimiter.
	pub unmatched_delimiter: UnmatchedDelimiterPolicy,
}

impl Options {
	/// Create options with all default values.
	pub const fn new() -> Self {
		Self {
			delimiters: Delimiters::BRACES,
			missing_key: MissingKeyPolicy::Throw,
			unmatched_delimiter: UnmatchedDelimiterPolicy::TreatAsLiteral,
		}
	}

	/// Use different delimiters.
	#[must_use]
	pub const fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
		self.delimiters = delimiters;
		self
	}

	/// Set the policy for missing keys.
	#[must_use]
	pub const fn with_missing_key(mut self, policy: MissingKeyPolicy) -> Self {
		self.missing_key = policy;
		self
	}

	/// Set the policy for unmatched close delimiters.
	#[must_use]
	pub const fn with_unmatched_delimiter(mut self, policy: UnmatchedDelimiterPolicy) -> Self {
		self.unmatched_delimiter = policy;
		self
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use assert2::{assert, let_assert};

	#[test]
	fn test_defaults() {
		let options = Options::default();
		assert!(options == Options::new());
		assert!(options.delimiters.open() == b'{');
		assert!(options.delimiters.close() == b'}');
		assert!(options.missing_key == MissingKeyPolicy::Throw);
		assert!(options.unmatched_delimiter == UnmatchedDelimiterPolicy::TreatAsLiteral);
	}

	#[test]
	fn test_delimiters_from_chars() {
		let_assert!(Ok(delimiters) = Delimiters::try_from(('<', '>')));
		assert!(delimiters.nests());
		let_assert!(Ok(delimiters) = Delimiters::try_from(('%', '%')));
		assert!(!delimiters.nests());
		let_assert!(Err(e) = Delimiters::try_from(('«', '»')));
		assert!(e.delimiter == '«');
	}
}
