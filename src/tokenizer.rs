//! Splitting a template into literal text and tokens.

use std::ops::Range;

use crate::error::{self, ParseError};
use crate::options::{Delimiters, Options, UnmatchedDelimiterPolicy};
use crate::token::TokenInformation;

/// One piece of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
	/// Text to copy to the output verbatim.
	Literal(Literal<'a>),

	/// A token to be substituted.
	Token(TokenSegment<'a>),
}

/// Literal text from the template.
///
/// An escaped delimiter pair is represented by a literal that covers only the first delimiter of the pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal<'a> {
	source: &'a str,
	range: Range<usize>,
}

impl<'a> Literal<'a> {
	/// The text to copy to the output.
	#[inline]
	pub fn text(&self) -> &'a str {
		&self.source[self.range.clone()]
	}

	/// The byte range of the text in the template.
	#[inline]
	pub fn range(&self) -> Range<usize> {
		self.range.clone()
	}
}

/// A token from the template, including its delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSegment<'a> {
	source: &'a str,
	range: Range<usize>,
}

impl<'a> TokenSegment<'a> {
	/// The token as written in the template, including the delimiters.
	#[inline]
	pub fn text(&self) -> &'a str {
		&self.source[self.range.clone()]
	}

	/// The raw text between the delimiters.
	#[inline]
	pub fn inner(&self) -> &'a str {
		&self.source[self.inner_range()]
	}

	/// The byte range of the token in the template, including the delimiters.
	#[inline]
	pub fn range(&self) -> Range<usize> {
		self.range.clone()
	}

	/// The byte range of the text between the delimiters.
	#[inline]
	pub fn inner_range(&self) -> Range<usize> {
		// Delimiters are ASCII, so they are one byte each.
		self.range.start + 1..self.range.end - 1
	}

	/// Split the raw text into key, alignment and format.
	#[inline]
	pub fn parse(&self) -> TokenInformation<'a> {
		TokenInformation::parse(self.inner())
	}
}

/// Lazy iterator over the segments of a template.
///
/// The tokenizer makes a single forward pass over the template and never copies text:
/// all segments are views into the template.
///
/// After an error, the iterator yields no more items.
/// Clone the tokenizer to restart from its current position.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
	source: &'a str,
	delimiters: Delimiters,
	unmatched_delimiter: UnmatchedDelimiterPolicy,
	finger: usize,
	literal_start: usize,
	pending: Option<TokenSegment<'a>>,
	done: bool,
}

/// Tokenize a template with the default options.
pub fn tokenize(source: &str) -> Tokenizer<'_> {
	Tokenizer::new(source, &Options::default())
}

/// Append `text` to `output`, doubling every delimiter so it survives tokenizing as literal text.
///
/// This is the inverse of the escape collapsing done by the [`Tokenizer`]:
/// filling the escaped text with any value map gives back `text` unchanged.
///
/// ```
/// # use bracefill::{tokenizer::push_escaped, Delimiters};
/// let mut output = String::from("{greeting} ");
/// push_escaped(&mut output, "{not a token}", Delimiters::BRACES);
/// assert_eq!(output, "{greeting} {{not a token}}");
/// ```
pub fn push_escaped(output: &mut String, text: &str, delimiters: Delimiters) {
	let bytes = text.as_bytes();
	let mut finger = 0;
	loop {
		let found = if delimiters.nests() {
			memchr::memchr2(delimiters.open(), delimiters.close(), &bytes[finger..])
		} else {
			memchr::memchr(delimiters.open(), &bytes[finger..])
		};
		let Some(index) = found.map(|x| finger + x) else {
			output.push_str(&text[finger..]);
			return;
		};
		// Delimiters are ASCII, so `index + 1` is a char boundary.
		output.push_str(&text[finger..index + 1]);
		output.push(char::from(bytes[index]));
		finger = index + 1;
	}
}

/// Escape all delimiters in `text`.
///
/// See [`push_escaped()`].
pub fn escape(text: &str, delimiters: Delimiters) -> String {
	let mut output = String::with_capacity(text.len() + 8);
	push_escaped(&mut output, text, delimiters);
	output
}

impl<'a> Tokenizer<'a> {
	/// Create a tokenizer for a template.
	pub fn new(source: &'a str, options: &Options) -> Self {
		Self {
			source,
			delimiters: options.delimiters,
			unmatched_delimiter: options.unmatched_delimiter,
			finger: 0,
			literal_start: 0,
			pending: None,
			done: false,
		}
	}

	/// Get the template being tokenized.
	#[inline]
	pub fn source(&self) -> &'a str {
		self.source
	}

	fn literal(&self, range: Range<usize>) -> Segment<'a> {
		Segment::Literal(Literal { source: self.source, range })
	}

	/// Find the next open or close delimiter at or after `from`.
	fn find_delimiter(&self, from: usize) -> Option<usize> {
		let haystack = &self.source.as_bytes()[from..];
		let found = if self.delimiters.nests() {
			memchr::memchr2(self.delimiters.open(), self.delimiters.close(), haystack)
		} else {
			memchr::memchr(self.delimiters.open(), haystack)
		};
		found.map(|x| from + x)
	}

	/// Find the close delimiter matching the open delimiter at `open`.
	fn find_close(&self, open: usize) -> Option<usize> {
		let bytes = self.source.as_bytes();
		let close = self.delimiters.close();
		if !self.delimiters.nests() {
			return memchr::memchr(close, &bytes[open + 1..]).map(|x| open + 1 + x);
		}

		let mut nested = 0usize;
		let mut finger = open + 1;
		while finger < bytes.len() {
			let next = self.find_delimiter(finger)?;
			if bytes[next] == close {
				if nested == 0 {
					return Some(next);
				}
				nested -= 1;
			} else {
				nested += 1;
			}
			finger = next + 1;
		}
		None
	}

	fn next_segment(&mut self) -> Option<Result<Segment<'a>, ParseError>> {
		if let Some(token) = self.pending.take() {
			return Some(Ok(Segment::Token(token)));
		}

		let source = self.source;
		let bytes = source.as_bytes();
		loop {
			let index = match self.find_delimiter(self.finger) {
				Some(x) => x,
				None => {
					self.done = true;
					let literal = self.literal_start..bytes.len();
					self.finger = bytes.len();
					self.literal_start = bytes.len();
					return (!literal.is_empty()).then(|| Ok(self.literal(literal)));
				},
			};
			let delimiter = bytes[index];

			// A doubled delimiter is an escape: keep the first one as literal text and skip the second.
			if bytes.get(index + 1) == Some(&delimiter) {
				let literal = self.literal_start..index + 1;
				self.finger = index + 2;
				self.literal_start = index + 2;
				return Some(Ok(self.literal(literal)));
			}

			if delimiter == self.delimiters.open() {
				let close = match self.find_close(index) {
					Some(x) => x,
					None => {
						self.done = true;
						return Some(Err(error::UnterminatedToken { position: index }.into()));
					},
				};
				let literal = self.literal_start..index;
				let token = TokenSegment {
					source: self.source,
					range: index..close + 1,
				};
				self.finger = close + 1;
				self.literal_start = close + 1;
				if literal.is_empty() {
					return Some(Ok(Segment::Token(token)));
				}
				self.pending = Some(token);
				return Some(Ok(self.literal(literal)));
			}

			// A single close delimiter outside of a token.
			match self.unmatched_delimiter {
				UnmatchedDelimiterPolicy::Throw => {
					self.done = true;
					return Some(Err(error::MalformedDelimiter {
						position: index,
						delimiter: char::from(delimiter),
					}
					.into()));
				},
				UnmatchedDelimiterPolicy::TreatAsLiteral => {
					log::debug!("treating unmatched close delimiter at byte {index} as literal text");
					self.finger = index + 1;
				},
			}
		}
	}
}

impl<'a> Iterator for Tokenizer<'a> {
	type Item = Result<Segment<'a>, ParseError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}
		self.next_segment()
	}
}

impl std::iter::FusedIterator for Tokenizer<'_> {}
