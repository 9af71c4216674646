//! Monetary amount value object.

// self
use crate::{
	_prelude::*,
	domain::{DomainError, require_length, require_positive},
};

/// Positive amount tagged with a 3-letter currency code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Money {
	/// Positive amount.
	pub amount: f64,
	/// ISO-4217 style currency code.
	pub currency: String,
}
impl Money {
	/// Creates a new amount without validation.
	pub fn new(amount: f64, currency: impl Into<String>) -> Self {
		Self { amount, currency: currency.into() }
	}

	/// Checks that the amount is positive and the currency has three characters.
	pub fn validate(&self) -> Result<(), DomainError> {
		require_positive("amount", self.amount)?;
		require_length("currency", &self.currency, 3)
	}
}
