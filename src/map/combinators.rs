//! Building value maps out of other maps and functions.

use super::ValueMap;

/// Looks up keys in a primary map, then in a map of defaults.
///
/// Created by [`fallback()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FallbackMap<Primary, Defaults> {
	primary: Primary,
	defaults: Defaults,
}

/// Look up keys in `primary`, and use `defaults` for keys it does not have.
///
/// Both maps must give the same value type.
/// Use [`map_value()`] to convert the values of one of them first.
///
/// ```rust
/// # fn main() -> Result<(), bracefill::Error> {
/// use bracefill::{fallback, DisplayFormatter};
///
/// let invoice = [("customer", "ACME"), ("currency", "EUR")];
/// let values = fallback(invoice, [("currency", "USD"), ("terms", "30 days")]);
///
/// let line = bracefill::fill("{customer,-6}|{currency}|{terms}", &values, &DisplayFormatter)?;
/// assert_eq!(line, "ACME  |EUR|30 days");
/// # Ok(())
/// # }
/// ```
pub const fn fallback<Primary, Defaults>(primary: Primary, defaults: Defaults) -> FallbackMap<Primary, Defaults> {
	FallbackMap { primary, defaults }
}

impl<'a, V, Primary, Defaults> ValueMap<'a> for FallbackMap<Primary, Defaults>
where
	Primary: ValueMap<'a, Value = V>,
	Defaults: ValueMap<'a, Value = V>,
{
	type Value = V;

	fn get(&'a self, key: &str) -> Option<V> {
		match self.primary.get(key) {
			Some(value) => Some(value),
			None => self.defaults.get(key),
		}
	}
}

/// Resolves keys by calling a function.
///
/// Created by [`from_fn()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FnMap<F> {
	lookup: F,
}

/// Resolve keys with a function that returns `None` for unknown keys.
///
/// ```rust
/// # fn main() -> Result<(), bracefill::Error> {
/// use bracefill::map::from_fn;
/// use bracefill::DisplayFormatter;
///
/// let squares = from_fn(|key: &str| key.parse::<u32>().ok().map(|x| x * x));
/// assert_eq!(bracefill::fill("{3} {12,4}", &squares, &DisplayFormatter)?, "9  144");
/// # Ok(())
/// # }
/// ```
pub const fn from_fn<F, V>(lookup: F) -> FnMap<F>
where
	F: Fn(&str) -> Option<V>,
{
	FnMap { lookup }
}

impl<'a, F, V> ValueMap<'a> for FnMap<F>
where
	F: 'a + Fn(&str) -> Option<V>,
{
	type Value = V;

	#[inline]
	fn get(&'a self, key: &str) -> Option<V> {
		(self.lookup)(key)
	}
}

/// Converts every value found in a map.
///
/// Created by [`map_value()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MappedValues<M, F> {
	map: M,
	convert: F,
}

/// Convert every value that `map` gives with `convert`.
///
/// ```rust
/// # fn main() -> Result<(), bracefill::Error> {
/// use bracefill::{map_value, DisplayFormatter};
///
/// let prices = [("tea", 250u32), ("coffee", 300)];
/// let euros = map_value(prices, |cents: &u32| format!("{}.{:02}", cents / 100, cents % 100));
/// assert_eq!(bracefill::fill("tea {tea,6}", &euros, &DisplayFormatter)?, "tea   2.50");
/// # Ok(())
/// # }
/// ```
pub const fn map_value<'a, M, F, V>(map: M, convert: F) -> MappedValues<M, F>
where
	M: ValueMap<'a>,
	F: Fn(M::Value) -> V,
{
	MappedValues { map, convert }
}

impl<'a, M, F, V> ValueMap<'a> for MappedValues<M, F>
where
	M: ValueMap<'a>,
	F: Fn(M::Value) -> V,
{
	type Value = V;

	fn get(&'a self, key: &str) -> Option<V> {
		self.map.get(key).map(&self.convert)
	}
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use std::collections::HashMap;

	use super::*;
	use crate::error::FillError;
	use crate::{fill, format, DisplayFormatter, Error, MissingKeyPolicy, Options, Template};
	use assert2::{assert, check, let_assert};

	#[test]
	fn test_fallback_prefers_primary() {
		let mut overrides = HashMap::new();
		overrides.insert("host", "db.internal");
		let defaults = HashMap::from([("host", "localhost"), ("port", "5432")]);
		let values = fallback(&overrides, &defaults);

		check!(let Ok("db.internal:5432") = fill("{host}:{port}", &values, &DisplayFormatter).as_deref());
		let_assert!(Err(Error::Fill(FillError::MissingKey(e))) = fill("{user}", &values, &DisplayFormatter));
		assert!(e.key == "user");
	}

	#[test]
	fn test_fallback_chain() {
		let values = fallback([("a", 1)], fallback([("a", 2), ("b", 2)], [("c", 3)]));
		check!(let Ok("1 2 3") = fill("{a} {b} {c}", &values, &DisplayFormatter).as_deref());
	}

	#[test]
	fn test_from_fn_sees_the_key_only() {
		let values = from_fn(|key: &str| key.strip_prefix("upper.").map(str::to_uppercase));
		check!(let Ok("[  ABC]") = fill("[{upper.abc,5}]", &values, &DisplayFormatter).as_deref());
		check!(let Ok("[ABC:x]") = fill("[{upper.abc:x}]", &values, &format::from_fn(
			|output: &mut String, value: String, spec: Option<&str>| {
				output.push_str(&value);
				output.push(':');
				output.push_str(spec.unwrap_or(""));
				Ok(())
			},
		)).as_deref());

		let options = Options::new().with_missing_key(MissingKeyPolicy::LeaveUnchanged);
		let_assert!(Ok(template) = Template::with_options("{lower.abc,5}", options));
		check!(let Ok("{lower.abc,5}") = template.fill(&values, &DisplayFormatter).as_deref());
	}

	#[test]
	fn test_map_value_then_fallback() {
		let counts = [("apples", 3u32)];
		let labels = [("apples", "three"), ("pears", "none")];
		let values = fallback(map_value(counts, |x: &u32| x.to_string()), map_value(labels, |x: &&str| (*x).to_owned()));
		check!(let Ok("3 none") = fill("{apples} {pears}", &values, &DisplayFormatter).as_deref());
	}

	#[test]
	fn test_map_value_is_lazy() {
		let calls = std::cell::Cell::new(0);
		let values = map_value([("a", 1), ("b", 2)], |x: &i32| {
			calls.set(calls.get() + 1);
			x * 10
		});
		check!(let Ok("20") = fill("{b}", &values, &DisplayFormatter).as_deref());
		assert!(calls.get() == 1);
	}
}
