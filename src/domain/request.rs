//! Rate request aggregate.

// self
use crate::{
	_prelude::*,
	domain::{Address, DomainError, Package},
};

/// Origin, destination, and the ordered packages to quote.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateRequest {
	/// Ship-from address; also used as the shipper location.
	pub origin: Address,
	/// Ship-to address.
	pub destination: Address,
	/// Packages in shipment order; never empty once validated.
	pub packages: Vec<Package>,
}
impl RateRequest {
	/// Builds a validated request.
	pub fn new(
		origin: Address,
		destination: Address,
		packages: Vec<Package>,
	) -> Result<Self, DomainError> {
		let request = Self { origin, destination, packages };

		request.validate()?;

		Ok(request)
	}

	/// Checks both addresses and every package, and that at least one package exists.
	pub fn validate(&self) -> Result<(), DomainError> {
		self.origin.validate()?;
		self.destination.validate()?;

		if self.packages.is_empty() {
			return Err(DomainError::NoPackages);
		}

		self.packages.iter().try_for_each(Package::validate)
	}
}
