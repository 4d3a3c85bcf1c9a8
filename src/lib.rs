//! Brace-delimited string interpolation with alignment and format specifiers.
//!
//! # Features
//!
//! * Tokens: `"Hello {name}!"`
//! * Alignment: `"{name,10}"` pads on the left, `"{name,-10}"` pads on the right.
//! * Format specifiers: `"{date:yyyy-MM-dd}"`, passed to a pluggable [`Formatter`].
//! * Both: `"{total,12:#,##0.00}"`. The format may itself contain commas and colons.
//! * Literal braces by doubling: `"{{"` and `"}}"`.
//! * Configurable delimiters and policies for missing keys and unmatched close delimiters.
//! * Look up values in maps, the environment, or the fields of any [`serde::Serialize`] value (requires the `json` feature).
//! * Fill all string values of a JSON, TOML or YAML document (requires the `json`, `toml` or `yaml` feature).
//!
//! # Examples
//!
//! The [`fill()`] function fills a template with values from a map,
//! using a [`Formatter`] to turn values into text.
//! [`DisplayFormatter`] uses the [`Display`][std::fmt::Display] implementation of the values.
//!
//! ```
//! # fn main() -> Result<(), bracefill::Error> {
//! # use std::collections::HashMap;
//! use bracefill::DisplayFormatter;
//!
//! let mut values = HashMap::new();
//! values.insert("name", "world");
//! assert_eq!(bracefill::fill("Hello {name}!", &values, &DisplayFormatter)?, "Hello world!");
//! assert_eq!(bracefill::fill("[{name,8}]", &values, &DisplayFormatter)?, "[   world]");
//! assert_eq!(bracefill::fill("[{name,-8}]", &values, &DisplayFormatter)?, "[world   ]");
//! assert_eq!(bracefill::fill("{{{name}}}", &values, &DisplayFormatter)?, "{world}");
//! # Ok(())
//! # }
//! ```
//!
//! Missing keys are an error by default.
//! Use [`fill_with()`] and [`Options`] to change that.
//!
//! ```
//! # fn main() -> Result<(), bracefill::Error> {
//! use bracefill::{DisplayFormatter, MissingKeyPolicy, Options};
//!
//! let values = [("name", "world")];
//! assert!(bracefill::fill("Hello {nobody}!", &values, &DisplayFormatter).is_err());
//!
//! let options = Options::new().with_missing_key(MissingKeyPolicy::LeaveUnchanged);
//! assert_eq!(
//!   bracefill::fill_with("Hello {nobody}!", &values, &DisplayFormatter, &options)?,
//!   "Hello {nobody}!",
//! );
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs, missing_debug_implementations)]
#![cfg_attr(feature = "doc-cfg", feature(doc_cfg))]

pub mod error;
pub use error::Error;

pub mod format;
pub use format::{DisplayFormatter, Formatter};

pub mod map;
pub use map::{fallback, map_value, Env, NoValues, ValueMap};

mod options;
pub use options::*;

mod template;
pub use template::*;

mod token;
pub use token::*;

pub mod tokenizer;
pub use tokenizer::{tokenize, Segment, Tokenizer};

mod features;
#[allow(unused_imports)]
pub use features::*;

/// Fill a template with the default options.
///
/// Tokens have the form `{key}`, `{key,alignment}`, `{key:format}` or `{key,alignment:format}`.
/// Use `{{` and `}}` for literal braces.
///
/// The key of each token is looked up in `values`, and the value is turned into text by `formatter`.
/// A missing key is an error.
pub fn fill<'a, M, F>(source: &str, values: &'a M, formatter: &F) -> Result<String, Error>
where
	M: ValueMap<'a> + ?Sized,
	F: Formatter<M::Value> + ?Sized,
{
	fill_with(source, values, formatter, &Options::default())
}

/// Fill a template with custom options.
///
/// The template is filled in a single pass without building a [`Template`] first.
/// Nothing is returned but the error if any part of the template fails.
pub fn fill_with<'a, M, F>(source: &str, values: &'a M, formatter: &F, options: &Options) -> Result<String, Error>
where
	M: ValueMap<'a> + ?Sized,
	F: Formatter<M::Value> + ?Sized,
{
	let mut output = String::with_capacity(source.len() + source.len() / 8);
	for segment in Tokenizer::new(source, options) {
		match segment? {
			Segment::Literal(x) => output.push_str(x.text()),
			Segment::Token(x) => {
				let token = template::raw::Token::from_segment(&x);
				token.expand(&mut output, source, options.missing_key, values, formatter)?;
			},
		}
	}
	Ok(output)
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use std::collections::BTreeMap;
	use assert2::{assert, check, let_assert};
	use super::*;

	#[test]
	fn test_fill() {
		let mut map: BTreeMap<String, String> = BTreeMap::new();
		map.insert("name".into(), "world".into());
		check!(let Ok("Hello world!") = fill("Hello {name}!", &map, &DisplayFormatter).as_deref());
		check!(let Ok("Hello world!") = fill("Hello {name:unused}!", &map, &DisplayFormatter).as_deref());

		let mut map: BTreeMap<&str, &str> = BTreeMap::new();
		map.insert("name", "world");
		check!(let Ok("Hello world!") = fill("Hello {name}!", &map, &DisplayFormatter).as_deref());
	}

	#[test]
	fn test_escaped_delimiters() {
		check!(let Ok("{") = fill("{{", &NoValues, &DisplayFormatter).as_deref());
		check!(let Ok("}") = fill("}}", &NoValues, &DisplayFormatter).as_deref());
		check!(let Ok("{a} {b}") = fill("{{a}} {{b}}", &NoValues, &DisplayFormatter).as_deref());
		check!(let Ok("{1}") = fill("{{{a}}}", &[("a", 1)], &DisplayFormatter).as_deref());
	}

	#[test]
	fn test_alignment() {
		let map = [("k", "ab")];
		check!(let Ok("        ab") = fill("{k,10}", &map, &DisplayFormatter).as_deref());
		check!(let Ok("ab        ") = fill("{k,-10}", &map, &DisplayFormatter).as_deref());
		check!(let Ok("ab") = fill("{k,1}", &map, &DisplayFormatter).as_deref());
		check!(let Ok("ab") = fill("{k,}", &map, &DisplayFormatter).as_deref());
		check!(let Ok("[  ab]") = fill("[{k, 4}]", &map, &DisplayFormatter).as_deref());
	}

	#[test]
	fn test_format_is_passed_to_formatter() {
		let echo = format::from_fn(|output: &mut String, value: &&str, spec: Option<&str>| {
			output.push_str(value);
			output.push('|');
			output.push_str(spec.unwrap_or("<none>"));
			Ok(())
		});
		let map = [("token", "v")];
		check!(let Ok("v|<none>") = fill("{token}", &map, &echo).as_deref());
		check!(let Ok("v|a,b") = fill("{token:a,b}", &map, &echo).as_deref());
		check!(let Ok("v|HH:mm") = fill("{token:HH:mm}", &map, &echo).as_deref());
		check!(let Ok("  v|x") = fill("{token,5:x}", &map, &echo).as_deref());
	}

	#[test]
	#[rustfmt::skip]
	fn test_missing_key() {
		let map: BTreeMap<String, String> = BTreeMap::new();

		let source = "Hello {name,5}!";
		let_assert!(Err(e) = fill(source, &map, &DisplayFormatter));
		assert!(e.to_string() == r#"No value for key: "name""#);
		assert!(e.source_highlighting(source) == concat!(
			"  Hello {name,5}!\n",
			"        ^^^^^^^^\n",
		));

		let options = Options::new().with_missing_key(MissingKeyPolicy::SubstituteEmpty);
		check!(let Ok("Hello !") = fill_with("Hello {name}!", &map, &DisplayFormatter, &options).as_deref());
		check!(let Ok("Hello      !") = fill_with(source, &map, &DisplayFormatter, &options).as_deref());

		let options = Options::new().with_missing_key(MissingKeyPolicy::LeaveUnchanged);
		check!(let Ok("Hello {name,5}!") = fill_with(source, &map, &DisplayFormatter, &options).as_deref());
	}

	#[test]
	fn test_empty_key() {
		let_assert!(Err(Error::Fill(error::FillError::MissingKey(e))) = fill("{}", &NoValues, &DisplayFormatter));
		assert!(e.key == "");
		check!(let Ok("empty") = fill("{}", &[("", "empty")], &DisplayFormatter).as_deref());
	}

	#[test]
	#[rustfmt::skip]
	fn test_unterminated_token() {
		let source = "Hello {abc";
		let_assert!(Err(e) = fill(source, &[("abc", 1)], &DisplayFormatter));
		let_assert!(Error::Parse(error::ParseError::UnterminatedToken(_)) = &e);
		assert!(e.source_highlighting(source) == concat!(
			"  Hello {abc\n",
			"        ^\n",
		));
	}

	#[test]
	fn test_unmatched_close_delimiter() {
		check!(let Ok("a}b") = fill("a}b", &NoValues, &DisplayFormatter).as_deref());

		let options = Options::new().with_unmatched_delimiter(UnmatchedDelimiterPolicy::Throw);
		let_assert!(Err(Error::Parse(error::ParseError::MalformedDelimiter(e))) = fill_with("a}b", &NoValues, &DisplayFormatter, &options));
		assert!(e.position == 1);
	}

	#[test]
	fn test_invalid_alignment() {
		let source = "{k,wide}";
		let_assert!(Err(e) = fill(source, &[("k", 1)], &DisplayFormatter));
		assert!(e.to_string() == r#"Invalid alignment: "wide", expected an integer between -999999 and 999999"#);
		assert!(e.source_range() == (3..7));
	}

	#[test]
	fn test_huge_alignment_is_rejected() {
		let map = [("k", "ab")];
		let source = format!("{{k,{}}}", i64::MAX);
		let_assert!(Err(Error::Fill(error::FillError::InvalidAlignment(e))) = fill(&source, &map, &DisplayFormatter));
		assert!(e.alignment == i64::MAX.to_string());

		let source = format!("{{k,{}}}", i64::MIN);
		let_assert!(Err(Error::Fill(error::FillError::InvalidAlignment(e))) = fill(&source, &map, &DisplayFormatter));
		assert!(e.alignment == i64::MIN.to_string());

		let_assert!(Err(Error::Fill(error::FillError::InvalidAlignment(_))) = fill("{k,1000000}", &map, &DisplayFormatter));
		let_assert!(Ok(filled) = fill("{k,999999}", &map, &DisplayFormatter));
		assert!(filled.len() == 999_999);
		assert!(filled.ends_with(" ab"));
	}

	#[test]
	fn test_missing_key_policy_applies_before_alignment() {
		let source = "a {missing,wide} b";

		let options = Options::new().with_missing_key(MissingKeyPolicy::LeaveUnchanged);
		check!(let Ok("a {missing,wide} b") = fill_with(source, &NoValues, &DisplayFormatter, &options).as_deref());

		let_assert!(Err(Error::Fill(error::FillError::MissingKey(e))) = fill(source, &NoValues, &DisplayFormatter));
		assert!(e.key == "missing");

		let options = Options::new().with_missing_key(MissingKeyPolicy::SubstituteEmpty);
		let_assert!(Err(Error::Fill(error::FillError::InvalidAlignment(_))) = fill_with(source, &NoValues, &DisplayFormatter, &options));
	}

	#[test]
	fn test_invalid_format() {
		let strict = format::from_fn(|output: &mut String, value: &i32, spec: Option<&str>| {
			match spec {
				None | Some("d") => {
					output.push_str(&value.to_string());
					Ok(())
				},
				Some(_) => Err(std::fmt::Error),
			}
		});
		check!(let Ok("5") = fill("{n:d}", &[("n", 5)], &strict).as_deref());

		let_assert!(Err(Error::Fill(error::FillError::InvalidFormat(e))) = fill("x {n:q}", &[("n", 5)], &strict));
		assert!(e.position == 5);
		assert!(e.len == 1);
		assert!(e.format.as_deref() == Some("q"));
	}

	#[test]
	fn test_custom_delimiters() {
		let options = Options::new().with_delimiters(Delimiters::new(b'<', b'>'));
		check!(let Ok("{x} = 1 <>") = fill_with("{x} = <x> <<>>", &[("x", 1)], &DisplayFormatter, &options).as_deref());
	}

	#[test]
	fn test_dyn_value_map() {
		let mut values = BTreeMap::new();
		values.insert(String::from("aap"), String::from("noot"));
		let values: &dyn ValueMap<Value = &String> = &values;

		let_assert!(Ok(filled) = fill("one {aap}", values, &DisplayFormatter));
		assert!(filled == "one noot");
	}

	#[test]
	fn test_dyn_formatter() {
		let formatter: &dyn Formatter<&i32> = &DisplayFormatter;
		check!(let Ok("2") = fill("{a}", &[("a", 2)], formatter).as_deref());
	}

	mod proptests {
		use super::*;
		use proptest::prelude::*;

		proptest! {
			#[test]
			fn text_without_delimiters_is_unchanged(text in "[^{}]*") {
				let filled = fill(&text, &NoValues, &DisplayFormatter);
				prop_assert_eq!(filled.ok(), Some(text));
			}

			#[test]
			fn alignment_pads_to_width(value in "[a-z]{0,12}", width in 0i64..20) {
				let map = [("k", value.as_str())];
				let right = fill(&format!("{{k,{width}}}"), &map, &DisplayFormatter).unwrap();
				let left = fill(&format!("{{k,-{width}}}"), &map, &DisplayFormatter).unwrap();
				prop_assert_eq!(right.len(), value.len().max(width as usize));
				prop_assert!(right.ends_with(value.as_str()));
				prop_assert!(left.starts_with(value.as_str()));
				prop_assert_eq!(right.trim_start(), left.trim_end());
			}
		}
	}
}
