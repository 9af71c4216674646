//! Postal address value object.

// self
use crate::{
	_prelude::*,
	domain::{DomainError, require_length, require_non_empty},
};

/// Immutable postal address used for origins and destinations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
	/// First street line.
	pub line1: String,
	/// Optional second street line.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub line2: Option<String>,
	/// City or locality.
	pub city: String,
	/// Optional state, province, or region code.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state_or_province: Option<String>,
	/// Postal or ZIP code.
	pub postal_code: String,
	/// ISO-3166 alpha-2 country code.
	pub country: String,
}
impl Address {
	/// Creates an address with the required fields.
	pub fn new(
		line1: impl Into<String>,
		city: impl Into<String>,
		postal_code: impl Into<String>,
		country: impl Into<String>,
	) -> Self {
		Self {
			line1: line1.into(),
			line2: None,
			city: city.into(),
			state_or_province: None,
			postal_code: postal_code.into(),
			country: country.into(),
		}
	}

	/// Sets the second street line.
	pub fn with_line2(mut self, line2: impl Into<String>) -> Self {
		self.line2 = Some(line2.into());

		self
	}

	/// Sets the state, province, or region code.
	pub fn with_state_or_province(mut self, code: impl Into<String>) -> Self {
		self.state_or_province = Some(code.into());

		self
	}

	/// Checks required fields and the country code length.
	pub fn validate(&self) -> Result<(), DomainError> {
		require_non_empty("line1", &self.line1)?;
		require_non_empty("city", &self.city)?;
		require_non_empty("postalCode", &self.postal_code)?;
		require_length("country", &self.country, 2)
	}
}
