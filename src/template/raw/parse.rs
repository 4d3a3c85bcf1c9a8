use super::{Alignment, Part, Template, Token};
use crate::error::ParseError;
use crate::tokenizer::{Segment, TokenSegment, Tokenizer};
use crate::Options;

/// Alignments with an absolute value of this or more are rejected.
const MAX_WIDTH: u64 = 1_000_000;

impl Template {
	/// Parse the template from source.
	pub fn parse(source: &str, options: &Options) -> Result<Self, ParseError> {
		let mut parts = Vec::with_capacity(1);
		for segment in Tokenizer::new(source, options) {
			match segment? {
				Segment::Literal(x) => parts.push(Part::Literal(x.range())),
				Segment::Token(x) => parts.push(Part::Token(Token::from_segment(&x))),
			}
		}
		Ok(Self { parts })
	}
}

impl Token {
	/// Split a token segment into absolute ranges for the key, alignment and format.
	pub fn from_segment(segment: &TokenSegment<'_>) -> Self {
		let info = segment.parse();
		let offset = segment.inner_range().start;
		let shift = |range: std::ops::Range<usize>| offset + range.start..offset + range.end;

		let key_len = info.token_key().len();
		let alignment = match info.alignment_width() {
			Ok(None) => Alignment::None,
			Ok(Some(width)) if width.unsigned_abs() < MAX_WIDTH => Alignment::Width(width),
			Ok(Some(_)) | Err(_) => Alignment::Invalid(info.alignment_range().map(shift).unwrap_or(offset..offset)),
		};
		log::trace!("parsed token {:?} at byte {}", segment.text(), segment.range().start);

		Self {
			range: segment.range(),
			key: offset..offset + key_len,
			alignment,
			format: info.format_range().map(shift),
		}
	}
}
