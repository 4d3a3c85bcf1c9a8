use super::{Alignment, Part, Template, Token};
use crate::error::{self, FillError};
use crate::format::{pad, Formatter};
use crate::{MissingKeyPolicy, ValueMap};

impl Template {
	/// Fill the template into the output string.
	pub fn expand<'a, M, F>(
		&self,
		output: &mut String,
		source: &str,
		missing_key: MissingKeyPolicy,
		values: &'a M,
		formatter: &F,
	) -> Result<(), FillError>
	where
		M: ValueMap<'a> + ?Sized,
		F: Formatter<M::Value> + ?Sized,
	{
		// Fill all parts one by one.
		for part in &self.parts {
			match part {
				Part::Literal(range) => output.push_str(&source[range.clone()]),
				Part::Token(x) => x.expand(output, source, missing_key, values, formatter)?,
			}
		}
		Ok(())
	}
}

impl Token {
	/// Fill the token into the output string.
	pub fn expand<'a, M, F>(
		&self,
		output: &mut String,
		source: &str,
		missing_key: MissingKeyPolicy,
		values: &'a M,
		formatter: &F,
	) -> Result<(), FillError>
	where
		M: ValueMap<'a> + ?Sized,
		F: Formatter<M::Value> + ?Sized,
	{
		let key = &source[self.key.clone()];
		let value = values.get(key);
		if value.is_none() {
			match missing_key {
				MissingKeyPolicy::Throw => {
					return Err(error::MissingKey {
						position: self.range.start,
						len: self.range.len(),
						key: key.to_owned(),
					}
					.into());
				},
				MissingKeyPolicy::SubstituteEmpty => {
					log::debug!("no value for key {key:?}, substituting an empty string");
				},
				MissingKeyPolicy::LeaveUnchanged => {
					log::debug!("no value for key {key:?}, leaving the token unchanged");
					output.push_str(&source[self.range.clone()]);
					return Ok(());
				},
			}
		}

		// The alignment is only checked for tokens that are actually filled.
		let alignment = match &self.alignment {
			Alignment::None => None,
			Alignment::Width(x) => Some(*x),
			Alignment::Invalid(range) => {
				return Err(error::InvalidAlignment {
					position: range.start,
					alignment: source[range.clone()].to_owned(),
				}
				.into());
			},
		};

		let start = output.len();
		if let Some(value) = value {
			let format = self.format.clone().map(|range| &source[range]);
			if formatter.format(output, value, format).is_err() {
				let range = self.format.clone().unwrap_or(self.range.clone());
				return Err(error::InvalidFormat {
					position: range.start,
					len: range.len(),
					key: key.to_owned(),
					format: format.map(String::from),
				}
				.into());
			}
		}

		if let Some(alignment) = alignment {
			pad(output, start, alignment);
		}
		Ok(())
	}
}
