//! Maps and related utilities for looking up token values.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

mod combinators;
pub use combinators::*;

/// Trait for types that can resolve token keys to values.
///
/// The value type is up to the map.
/// It is handed to a [`Formatter`][crate::Formatter] to be turned into text.
pub trait ValueMap<'a> {
	/// The type returned by the [`get()`][Self::get] function.
	type Value;

	/// Get the value for a key, or `None` if the map has no value for it.
	fn get(&'a self, key: &str) -> Option<Self::Value>;
}

/// Allow using key-value [`slice`]s as [`ValueMap`]s.
///
/// # Performance
///
/// For a few key-value pairs, where the keys and values are small,
/// this is should be reasonably performant.
///
/// However, for many numbers of key-value pairs, or when the keys or values are large,
/// you may get better performance from a [`HashMap`] or [`BTreeMap`].
///
/// # Example
/// ```rust
/// # use bracefill::ValueMap;
///
/// let order = &[("item", "tea"), ("quantity", "3")];
///
/// assert_eq!(order.get("item"), Some(&"tea"));
/// assert_eq!(order.get("quantity"), Some(&"3"));
/// assert_eq!(order.get("price"), None);
/// ```
impl<'a, K, V> ValueMap<'a> for [(K, V)]
where
	K: Borrow<str>,
	V: 'a,
{
	type Value = &'a V;

	fn get(&'a self, key: &str) -> Option<Self::Value> {
		self.iter().find_map(|(k, v)| (k.borrow() == key).then_some(v))
	}
}

/// Allow using key-value [`arrays`](`array`) as [`ValueMap`]s.
///
/// Delegates to the implementation for [`slices`](`slice`).
impl<'a, K, V, const N: usize> ValueMap<'a> for [(K, V); N]
where
	K: Borrow<str>,
	V: 'a,
{
	type Value = &'a V;

	#[inline(always)]
	fn get(&'a self, key: &str) -> Option<Self::Value> {
		ValueMap::get(self.as_slice(), key)
	}
}

/// Allow using key-value [`Vec`]s as [`ValueMap`]s.
///
/// Delegates to the implementation for [`slices`](`slice`).
impl<'a, K, V> ValueMap<'a> for Vec<(K, V)>
where
	K: Borrow<str>,
	V: 'a,
{
	type Value = &'a V;

	#[inline(always)]
	fn get(&'a self, key: &str) -> Option<Self::Value> {
		ValueMap::get(self.as_slice(), key)
	}
}

impl<'a, T> ValueMap<'a> for &'_ T
where
	T: ?Sized + ValueMap<'a>,
{
	type Value = <T as ValueMap<'a>>::Value;

	#[inline(always)]
	fn get(&'a self, key: &str) -> Option<Self::Value> {
		T::get(self, key)
	}
}

impl<'a, T> ValueMap<'a> for std::boxed::Box<T>
where
	T: ?Sized + ValueMap<'a>,
{
	type Value = <T as ValueMap<'a>>::Value;

	#[inline(always)]
	fn get(&'a self, key: &str) -> Option<Self::Value> {
		T::get(self, key)
	}
}

impl<'a, T> ValueMap<'a> for std::rc::Rc<T>
where
	T: ?Sized + ValueMap<'a>,
{
	type Value = <T as ValueMap<'a>>::Value;

	#[inline(always)]
	fn get(&'a self, key: &str) -> Option<Self::Value> {
		T::get(self, key)
	}
}

impl<'a, T> ValueMap<'a> for std::sync::Arc<T>
where
	T: ?Sized + ValueMap<'a>,
{
	type Value = <T as ValueMap<'a>>::Value;

	#[inline(always)]
	fn get(&'a self, key: &str) -> Option<Self::Value> {
		T::get(self, key)
	}
}

/// A map that never returns any values.
///
/// Useful together with [`MissingKeyPolicy::LeaveUnchanged`][crate::MissingKeyPolicy::LeaveUnchanged]
/// to only collapse escaped delimiters.
#[derive(Debug)]
pub struct NoValues;

impl<'a> ValueMap<'a> for NoValues {
	type Value = NeverValue;

	#[inline]
	fn get(&'a self, _key: &str) -> Option<Self::Value> {
		None
	}
}

/// Value returned by the [`NoValues`] map.
#[derive(Debug)]
pub enum NeverValue {}

impl std::fmt::Display for NeverValue {
	#[inline]
	fn fmt(&self, _f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match *self {}
	}
}

/// A map that gives strings from the environment.
#[derive(Debug)]
pub struct Env;

impl<'a> ValueMap<'a> for Env {
	type Value = String;

	#[inline]
	fn get(&'a self, key: &str) -> Option<Self::Value> {
		std::env::var(key).ok()
	}
}

impl<'a, V: 'a> ValueMap<'a> for BTreeMap<&str, V> {
	type Value = &'a V;

	#[inline]
	fn get(&'a self, key: &str) -> Option<Self::Value> {
		self.get(key)
	}
}

impl<'a, V: 'a> ValueMap<'a> for BTreeMap<String, V> {
	type Value = &'a V;

	#[inline]
	fn get(&'a self, key: &str) -> Option<Self::Value> {
		self.get(key)
	}
}

impl<'a, V: 'a, S: BuildHasher> ValueMap<'a> for HashMap<&str, V, S> {
	type Value = &'a V;

	#[inline]
	fn get(&'a self, key: &str) -> Option<Self::Value> {
		self.get(key)
	}
}

impl<'a, V: 'a, S: BuildHasher> ValueMap<'a> for HashMap<String, V, S> {
	type Value = &'a V;

	#[inline]
	fn get(&'a self, key: &str) -> Option<Self::Value> {
		self.get(key)
	}
}
