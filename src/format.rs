//! Turning resolved values into text.

use std::fmt::Write;

/// Trait for types that can format values of type `V`.
///
/// The formatter writes the text for `value` to `output`,
/// interpreting the format specifier of the token if there is one.
/// Returning an error aborts the fill with an [`InvalidFormat`][crate::error::InvalidFormat] error.
pub trait Formatter<V> {
	/// Append the formatted value to `output`.
	fn format(&self, output: &mut String, value: V, format: Option<&str>) -> std::fmt::Result;
}

impl<V, F> Formatter<V> for &F
where
	F: ?Sized + Formatter<V>,
{
	#[inline(always)]
	fn format(&self, output: &mut String, value: V, format: Option<&str>) -> std::fmt::Result {
		F::format(self, output, value, format)
	}
}

/// Formats values with their [`Display`][std::fmt::Display] implementation.
///
/// Format specifiers are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayFormatter;

impl<V: std::fmt::Display> Formatter<V> for DisplayFormatter {
	#[inline]
	fn format(&self, output: &mut String, value: V, _format: Option<&str>) -> std::fmt::Result {
		write!(output, "{value}")
	}
}

/// [`Formatter`] produced by [`from_fn()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FnFormatter<F> {
	func: F,
}

impl<V, F> Formatter<V> for FnFormatter<F>
where
	F: Fn(&mut String, V, Option<&str>) -> std::fmt::Result,
{
	#[inline(always)]
	fn format(&self, output: &mut String, value: V, format: Option<&str>) -> std::fmt::Result {
		(self.func)(output, value, format)
	}
}

/// Creates a [`Formatter`] that delegates to the given function.
///
/// # Example
/// ```rust
/// # use std::fmt::Write;
/// # fn main() -> Result<(), bracefill::Error> {
/// let money = bracefill::format::from_fn(|output: &mut String, cents: &u64, format: Option<&str>| {
///     let symbol = format.unwrap_or("$");
///     write!(output, "{symbol}{}.{:02}", cents / 100, cents % 100)
/// });
/// let values = [("total", 1250u64)];
/// assert_eq!(bracefill::fill("{total:€}", &values, &money)?, "€12.50");
/// # Ok(())
/// # }
/// ```
pub const fn from_fn<F>(func: F) -> FnFormatter<F> {
	FnFormatter { func }
}

/// Pad the text written to `output` since `start` to the given alignment.
///
/// A positive alignment pads on the left, a negative alignment pads on the right.
/// Width is measured in display columns and text is never truncated.
pub(crate) fn pad(output: &mut String, start: usize, alignment: i64) {
	use unicode_width::UnicodeWidthStr;

	let width = usize::try_from(alignment.unsigned_abs()).unwrap_or(usize::MAX);
	let current = output[start..].width();
	if current >= width {
		return;
	}
	let padding = width - current;
	if alignment > 0 {
		output.insert_str(start, &" ".repeat(padding));
	} else {
		output.extend(std::iter::repeat(' ').take(padding));
	}
}
