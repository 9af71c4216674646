//! Optional observability helpers for carrier calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `carrier_rates.call` with the `call` (token
//!   refresh or rating) and `carrier` fields, plus a `debug` event for every discarded quote entry.
//! - Enable `metrics` to increment the `carrier_rates_call_total` counter for every
//!   attempt/success/failure, labeled by `call` + `carrier` + `outcome`, and the
//!   `carrier_rates_discarded_quote_total` counter labeled by `carrier`.

mod metrics;
mod tracing;

pub use self::metrics::*;
pub use self::tracing::*;

// self
use crate::_prelude::*;

/// Outbound calls observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// OAuth client-credentials token refresh.
	TokenRefresh,
	/// Carrier rating request.
	Rating,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::TokenRefresh => "token_refresh",
			CallKind::Rating => "rating",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Call started.
	Attempt,
	/// Call completed successfully.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}

	/// Maps a call result onto its terminal outcome.
	pub fn of<T>(result: &Result<T>) -> Self {
		if result.is_ok() { CallOutcome::Success } else { CallOutcome::Failure }
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
