// self
use crate::{
	carrier::CarrierId,
	obs::{CallKind, CallOutcome},
};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(kind: CallKind, carrier: &CarrierId, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"carrier_rates_call_total",
			"call" => kind.as_str(),
			"carrier" => carrier.to_string(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, carrier, outcome);
	}
}

/// Counts a carrier response entry that was dropped during normalization (when enabled).
pub fn record_discarded_quote(carrier: &CarrierId) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("carrier_rates_discarded_quote_total", "carrier" => carrier.to_string())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = carrier;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recorders_are_noops_without_a_recorder() {
		record_call_outcome(CallKind::TokenRefresh, &CarrierId::UPS, CallOutcome::Failure);
		record_discarded_quote(&CarrierId::UPS);
	}
}
