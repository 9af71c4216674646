//! Normalized rate quote returned by carrier adapters.

// self
use crate::{
	_prelude::*,
	domain::{DomainError, Money, require_non_empty},
};

/// A priced shipping service option.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuote {
	/// Carrier-facing service label.
	pub service_name: String,
	/// Total price for the service.
	pub price: Money,
	/// Business days in transit, when the carrier reports it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub estimated_delivery_days: Option<u32>,
}
impl RateQuote {
	/// Checks the service name, price, and delivery estimate.
	pub fn validate(&self) -> Result<(), DomainError> {
		require_non_empty("serviceName", &self.service_name)?;
		self.price.validate()?;

		if self.estimated_delivery_days == Some(0) {
			return Err(DomainError::NonPositive { field: "estimatedDeliveryDays" });
		}

		Ok(())
	}
}
