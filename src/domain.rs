//! Carrier-agnostic domain values: addresses, packages, rate requests, and quotes.
//!
//! Values are plain data with public fields. Each type offers a `validate` helper that checks the
//! invariants carrier adapters rely on; callers normally validate once at their own boundary, and
//! the response normalizer revalidates every [`RateQuote`] it produces.

pub mod address;
pub mod money;
pub mod package;
pub mod quote;
pub mod request;

pub use address::*;
pub use money::*;
pub use package::*;
pub use quote::*;
pub use request::*;

// self
use crate::_prelude::*;

/// Invariant violations detected while validating domain values.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum DomainError {
	/// A required text field is empty.
	#[error("The {field} field cannot be empty.")]
	EmptyField {
		/// Offending field name.
		field: &'static str,
	},
	/// A text field has the wrong length.
	#[error("The {field} field must be exactly {expected} characters long.")]
	InvalidLength {
		/// Offending field name.
		field: &'static str,
		/// Required character count.
		expected: usize,
	},
	/// A numeric field is zero, negative, or not finite.
	#[error("The {field} field must be a positive number.")]
	NonPositive {
		/// Offending field name.
		field: &'static str,
	},
	/// Rate requests must carry at least one package.
	#[error("A rate request must contain at least one package.")]
	NoPackages,
}

pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<(), DomainError> {
	if value.is_empty() { Err(DomainError::EmptyField { field }) } else { Ok(()) }
}

pub(crate) fn require_length(
	field: &'static str,
	value: &str,
	expected: usize,
) -> Result<(), DomainError> {
	if value.chars().count() == expected {
		Ok(())
	} else {
		Err(DomainError::InvalidLength { field, expected })
	}
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<(), DomainError> {
	if value.is_finite() && value > 0. { Ok(()) } else { Err(DomainError::NonPositive { field }) }
}
