// self
use crate::{_prelude::*, carrier::CarrierId, obs::CallKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used around outbound carrier calls.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided call kind + carrier.
	pub fn new(kind: CallKind, carrier: &CarrierId) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("carrier_rates.call", call = kind.as_str(), carrier = %carrier);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, carrier);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a debug event for a carrier response entry that failed normalization.
pub fn trace_discarded_entry(carrier: &CarrierId, index: usize, reason: &dyn Display) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(carrier = %carrier, index, reason = %reason, "discarded rated shipment");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (carrier, index, reason);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn discarded_entry_trace_is_safe_without_subscriber() {
		trace_discarded_entry(&CarrierId::UPS, 0, &"missing amount");
	}

	#[cfg(feature = "tracing")]
	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = CallSpan::new(CallKind::Rating, &CarrierId::UPS);
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
