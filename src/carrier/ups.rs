//! UPS reference adapter (Rating API v2409, shop mode).
//!
//! - `request` maps a domain [`RateRequest`](crate::domain::RateRequest) onto the UPS payload.
//! - `response` validates the UPS payload and normalizes each rated shipment into a
//!   [`RateQuote`](crate::domain::RateQuote), dropping malformed entries.
//! - `adapter` holds [`UpsCarrier`], the façade that sequences token acquisition, the rating call,
//!   and status classification.

pub mod adapter;
pub mod request;
pub mod response;

pub use adapter::*;
pub use request::*;
pub use response::*;

/// Human-facing carrier label used in fallback service names.
pub const UPS_LABEL: &str = "UPS";
