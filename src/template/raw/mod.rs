mod expand;
mod parse;

/// Raw template that doesn't track the original source.
///
/// Internally, this keeps a bunch of offsets into the original source.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct Template {
	/// The individual parts that make up the template.
	parts: Vec<Part>,
}

/// One piece of a parsed template.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub enum Part {
	/// A literal string to be used verbatim from the original source.
	///
	/// The literal can not contain any tokens or escaped delimiter pairs.
	Literal(std::ops::Range<usize>),

	/// A token to be substituted at fill time.
	Token(Token),
}

/// A token to be substituted at fill time.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct Token {
	/// The range of the whole token in the source, including the delimiters.
	///
	/// Copied verbatim to the output for [`MissingKeyPolicy::LeaveUnchanged`][crate::MissingKeyPolicy::LeaveUnchanged].
	range: std::ops::Range<usize>,

	/// The range in the source defining the key.
	key: std::ops::Range<usize>,

	/// The field width.
	alignment: Alignment,

	/// The range in the source defining the format specifier, without the colon.
	format: Option<std::ops::Range<usize>>,
}

#[derive(Debug, Clone)]
#[cfg_attr(test, derive(PartialEq, Eq))]
enum Alignment {
	/// No padding.
	None,

	/// Pad to the absolute value, on the left if positive.
	Width(i64),

	/// The alignment is not an integer: the range of the alignment text in the source.
	Invalid(std::ops::Range<usize>),
}
