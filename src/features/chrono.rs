//! Formatting of [`chrono`] dates and times.
//!
//! [`DateFormatter`] accepts two kinds of format specifiers:
//!
//! * strftime patterns, recognized by the presence of a `%` character: `{when:%Y-%m-%d %H:%M}`.
//! * Custom date patterns made of repeated letters: `{when:yyyy-MM-dd HH:mm}`.
//!
//! ```
//! # fn main() -> Result<(), bracefill::Error> {
//! use bracefill::chrono::DateFormatter;
//! use chrono::NaiveDate;
//!
//! let values = [("due", NaiveDate::from_ymd_opt(2024, 8, 29).unwrap())];
//! assert_eq!(bracefill::fill("Due {due:dddd, MMMM d}.", &values, &DateFormatter)?, "Due Thursday, August 29.");
//! assert_eq!(bracefill::fill("[{due,12:%d/%m/%Y}]", &values, &DateFormatter)?, "[  29/08/2024]");
//! # Ok(())
//! # }
//! ```
//!
//! The letters of custom patterns have the following meaning:
//!
//! | Pattern                | Meaning                                      |
//! |------------------------|----------------------------------------------|
//! | `y`, `yy`              | year in the century, without and with zero padding |
//! | `yyy`, `yyyy`          | full year                                    |
//! | `M`, `MM`              | month number, without and with zero padding  |
//! | `MMM`, `MMMM`          | abbreviated and full month name              |
//! | `d`, `dd`              | day of the month, without and with zero padding |
//! | `ddd`, `dddd`          | abbreviated and full weekday name            |
//! | `H`, `HH`              | hour (0-23)                                  |
//! | `h`, `hh`              | hour (1-12)                                  |
//! | `m`, `mm`              | minute                                       |
//! | `s`, `ss`              | second                                       |
//! | `fff`, `ffffff`, `fffffffff` | fraction of a second                   |
//! | `t`, `tt`              | `AM` or `PM` (a single `t` also gives both letters) |
//! | `zzz`                  | UTC offset as `+hh:mm`                       |
//!
//! Text between single or double quotes is copied literally, as is a character preceded by a backslash.
//! Other characters are copied as they are.

use std::borrow::Cow;
use std::fmt::{Display, Write};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::Formatter;

/// [`Formatter`] for [`chrono`] dates and times.
///
/// Without a format specifier, values are formatted with their [`Display`] implementation.
/// A format specifier that is not understood, or that asks for a field the value does not have
/// (like the hour of a [`NaiveDate`]), fails the fill with an [`InvalidFormat`][crate::error::InvalidFormat] error.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateFormatter;

macro_rules! impl_naive_formatter {
	($($ty:ty),*) => {
		$(
			impl Formatter<$ty> for DateFormatter {
				fn format(&self, output: &mut String, value: $ty, format: Option<&str>) -> std::fmt::Result {
					let pattern = match format {
						None | Some("") => return write!(output, "{value}"),
						Some(format) => strftime_pattern(format)?,
					};
					let items = parse_items(&pattern)?;
					write!(output, "{}", value.format_with_items(items.iter()))
				}
			}
		)*
	};
}

impl_naive_formatter!(NaiveDate, &NaiveDate, NaiveDateTime, &NaiveDateTime, NaiveTime, &NaiveTime);

impl<Tz> Formatter<DateTime<Tz>> for DateFormatter
where
	Tz: TimeZone,
	Tz::Offset: Display,
{
	#[inline]
	fn format(&self, output: &mut String, value: DateTime<Tz>, format: Option<&str>) -> std::fmt::Result {
		Formatter::<&DateTime<Tz>>::format(self, output, &value, format)
	}
}

impl<Tz> Formatter<&DateTime<Tz>> for DateFormatter
where
	Tz: TimeZone,
	Tz::Offset: Display,
{
	fn format(&self, output: &mut String, value: &DateTime<Tz>, format: Option<&str>) -> std::fmt::Result {
		let pattern = match format {
			None | Some("") => return write!(output, "{value}"),
			Some(format) => strftime_pattern(format)?,
		};
		let items = parse_items(&pattern)?;
		write!(output, "{}", value.format_with_items(items.iter()))
	}
}

/// Parse a strftime pattern, rejecting unknown specifiers.
fn parse_items(pattern: &str) -> Result<Vec<Item<'_>>, std::fmt::Error> {
	let items: Vec<_> = StrftimeItems::new(pattern).collect();
	if items.iter().any(|item| matches!(item, Item::Error)) {
		log::debug!("invalid date format: {pattern:?}");
		return Err(std::fmt::Error);
	}
	Ok(items)
}

/// Get the strftime pattern for a format specifier.
///
/// Specifiers containing a `%` are already strftime patterns.
fn strftime_pattern(format: &str) -> Result<Cow<'_, str>, std::fmt::Error> {
	if format.contains('%') {
		Ok(Cow::Borrowed(format))
	} else {
		translate_custom(format).map(Cow::Owned)
	}
}

/// Translate a custom date pattern to a strftime pattern.
fn translate_custom(format: &str) -> Result<String, std::fmt::Error> {
	let mut output = String::with_capacity(format.len() * 2);
	let mut chars = format.chars().peekable();
	while let Some(c) = chars.next() {
		match c {
			'\'' | '"' => loop {
				match chars.next() {
					Some(x) if x == c => break,
					Some(x) => push_literal(&mut output, x),
					None => {
						log::debug!("unterminated quote in date format: {format:?}");
						return Err(std::fmt::Error);
					},
				}
			},
			'\\' => push_literal(&mut output, chars.next().ok_or(std::fmt::Error)?),
			'y' | 'M' | 'd' | 'H' | 'h' | 'm' | 's' | 'f' | 't' | 'z' => {
				let mut count = 1;
				while chars.next_if_eq(&c).is_some() {
					count += 1;
				}
				match specifier(c, count) {
					Some(x) => output.push_str(x),
					None => {
						log::debug!("unsupported date pattern {:?} in format {format:?}", c.to_string().repeat(count));
						return Err(std::fmt::Error);
					},
				}
			},
			other => push_literal(&mut output, other),
		}
	}
	Ok(output)
}

fn push_literal(output: &mut String, c: char) {
	if c == '%' {
		output.push_str("%%");
	} else {
		output.push(c);
	}
}

#[rustfmt::skip]
fn specifier(letter: char, count: usize) -> Option<&'static str> {
	let spec = match (letter, count) {
		('y', 1) => "%-y",
		('y', 2) => "%y",
		('y', _) => "%Y",
		('M', 1) => "%-m",
		('M', 2) => "%m",
		('M', 3) => "%b",
		('M', _) => "%B",
		('d', 1) => "%-d",
		('d', 2) => "%d",
		('d', 3) => "%a",
		('d', _) => "%A",
		('H', 1) => "%-H",
		('H', 2) => "%H",
		('h', 1) => "%-I",
		('h', 2) => "%I",
		('m', 1) => "%-M",
		('m', 2) => "%M",
		('s', 1) => "%-S",
		('s', 2) => "%S",
		('f', 3) => "%3f",
		('f', 6) => "%6f",
		('f', 9) => "%9f",
		// chrono has no one-letter designator, so `t` gives the same as `tt`.
		('t', 1 | 2) => "%p",
		('z', 3) => "%:z",
		_ => return None,
	};
	Some(spec)
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use super::*;
	use crate::error::FillError;
	use crate::{fill, Error};
	use assert2::{assert, check, let_assert};
	use chrono::FixedOffset;

	fn date() -> NaiveDate {
		NaiveDate::from_ymd_opt(2024, 8, 29).unwrap()
	}

	#[test]
	fn test_custom_patterns() {
		let values = [("token", date())];
		check!(let Ok("'2024-08-29'") = fill("'{token:yyyy-MM-dd}'", &values, &DateFormatter).as_deref());
		check!(let Ok("'     2024-08-29'") = fill("'{token,15:yyyy-MM-dd}'", &values, &DateFormatter).as_deref());
		check!(let Ok("'2024-08-29     '") = fill("'{token,-15:yyyy-MM-dd}'", &values, &DateFormatter).as_deref());
		check!(let Ok("Thursday, August 29") = fill("{token:dddd, MMMM d}", &values, &DateFormatter).as_deref());
		check!(let Ok("Thu 29 Aug 24") = fill("{token:ddd dd MMM yy}", &values, &DateFormatter).as_deref());
		check!(let Ok("8/29") = fill("{token:M/d}", &values, &DateFormatter).as_deref());
	}

	#[test]
	fn test_literals_in_custom_patterns() {
		let values = [("token", date())];
		check!(let Ok("day 29") = fill("{token:'day' d}", &values, &DateFormatter).as_deref());
		check!(let Ok("d=29") = fill("{token:\\d=d}", &values, &DateFormatter).as_deref());
		check!(let Ok("100% 2024") = fill("{token:\"100%\" yyyy}", &values, &DateFormatter).as_deref());
	}

	#[test]
	fn test_strftime_patterns() {
		let values = [("token", date())];
		check!(let Ok("29/08/2024") = fill("{token:%d/%m/%Y}", &values, &DateFormatter).as_deref());
		check!(let Ok("Aug") = fill("{token:%b}", &values, &DateFormatter).as_deref());
	}

	#[test]
	fn test_no_format() {
		let values = [("token", date())];
		check!(let Ok("2024-08-29") = fill("{token}", &values, &DateFormatter).as_deref());
		check!(let Ok("2024-08-29") = fill("{token:}", &values, &DateFormatter).as_deref());
	}

	#[test]
	fn test_date_times() {
		let moment = date().and_hms_milli_opt(14, 5, 9, 250).unwrap();
		let values = [("at", moment)];
		check!(let Ok("14:05:09.250") = fill("{at:HH:mm:ss.fff}", &values, &DateFormatter).as_deref());
		check!(let Ok("2:05 PM") = fill("{at:h:mm tt}", &values, &DateFormatter).as_deref());
		check!(let Ok("02 PM") = fill("{at:hh t}", &values, &DateFormatter).as_deref());

		let values = [("at", moment.time())];
		check!(let Ok("14h05") = fill("{at:HH'h'mm}", &values, &DateFormatter).as_deref());
	}

	#[test]
	fn test_offsets() {
		let_assert!(Some(offset) = FixedOffset::east_opt(2 * 3600));
		let_assert!(Some(moment) = offset.with_ymd_and_hms(2024, 8, 29, 14, 5, 9).single());
		let values = [("at", moment)];
		check!(let Ok("2024-08-29T14:05:09+02:00") = fill("{at:yyyy-MM-ddTHH:mm:sszzz}", &values, &DateFormatter).as_deref());
	}

	#[test]
	fn test_invalid_formats() {
		let values = [("token", date())];
		let_assert!(Err(Error::Fill(FillError::InvalidFormat(e))) = fill("{token:yyyy HH:mm}", &values, &DateFormatter));
		assert!(e.key == "token");
		assert!(e.format.as_deref() == Some("yyyy HH:mm"));

		let_assert!(Err(Error::Fill(FillError::InvalidFormat(_))) = fill("{token:MMMM ffff}", &values, &DateFormatter));
		let_assert!(Err(Error::Fill(FillError::InvalidFormat(_))) = fill("{token:'open}", &values, &DateFormatter));
		let_assert!(Err(Error::Fill(FillError::InvalidFormat(_))) = fill("{token:%Q}", &values, &DateFormatter));
	}
}
