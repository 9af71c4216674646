//! Carrier identifiers and the capability trait consumed by aggregation layers.
//!
//! `ups` holds the reference adapter: request mapping, response normalization, and the
//! [`UpsCarrier`](ups::UpsCarrier) façade that sequences token acquisition, the rating call, and
//! error classification.

pub mod ups;

// std
use std::{borrow::Cow, ops::Deref};
// self
use crate::{
	_prelude::*,
	domain::{RateQuote, RateRequest},
};

/// Boxed future returned by [`Carrier::get_rates`].
pub type CarrierFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<RateQuote>>> + 'a + Send>>;

/// Capability every carrier adapter exposes to aggregation layers.
pub trait Carrier
where
	Self: Send + Sync,
{
	/// Stable identifier of the carrier (for example `ups`).
	fn id(&self) -> &CarrierId;

	/// Fetches normalized rate quotes for the provided request.
	fn get_rates<'a>(&'a self, request: &'a RateRequest) -> CarrierFuture<'a>;
}

/// Errors emitted when carrier identifiers fail validation.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum IdentifierError {
	/// Identifier is empty.
	#[error("Carrier identifier cannot be empty.")]
	Empty,
	/// Identifier contains a character outside `[a-z0-9_-]`.
	#[error("Carrier identifier contains an invalid character: {ch:?}.")]
	InvalidCharacter {
		/// Offending character.
		ch: char,
	},
	/// Identifier exceeds the supported length.
	#[error("Carrier identifier exceeds {max} characters.")]
	TooLong {
		/// Maximum supported length.
		max: usize,
	},
}

/// Lowercase carrier identifier carried by adapters and every [`Error`].
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CarrierId(Cow<'static, str>);
impl CarrierId {
	/// Identifier of the UPS reference adapter.
	pub const UPS: Self = Self::from_static("ups");

	const MAX_LEN: usize = 32;

	/// Creates a new identifier after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(Cow::Owned(view.to_owned())))
	}

	/// Wraps a compile-time identifier; callers must pass a value that would satisfy [`Self::new`].
	pub const fn from_static(value: &'static str) -> Self {
		Self(Cow::Borrowed(value))
	}

	/// Returns the identifier as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Deref for CarrierId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for CarrierId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Debug for CarrierId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "CarrierId({})", self.0)
	}
}
impl Display for CarrierId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

fn validate_view(view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty);
	}
	if view.chars().count() > CarrierId::MAX_LEN {
		return Err(IdentifierError::TooLong { max: CarrierId::MAX_LEN });
	}
	if let Some(ch) = view
		.chars()
		.find(|ch| !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '-' | '_')))
	{
		return Err(IdentifierError::InvalidCharacter { ch });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identifiers_validate_characters_and_length() {
		assert_eq!(CarrierId::new(""), Err(IdentifierError::Empty));
		assert_eq!(CarrierId::new("UPS"), Err(IdentifierError::InvalidCharacter { ch: 'U' }));
		assert_eq!(
			CarrierId::new("a".repeat(CarrierId::MAX_LEN + 1)),
			Err(IdentifierError::TooLong { max: CarrierId::MAX_LEN })
		);

		let fedex = CarrierId::new("fed-ex_2").expect("Identifier should be valid.");

		assert_eq!(fedex.as_str(), "fed-ex_2");
		assert_eq!(format!("{fedex:?}"), "CarrierId(fed-ex_2)");
	}

	#[test]
	fn static_identifier_matches_validated_value() {
		let validated = CarrierId::new("ups").expect("UPS identifier should be valid.");

		assert_eq!(CarrierId::UPS, validated);
		assert_eq!(CarrierId::UPS.to_string(), "ups");
	}
}
