//! UPS Rating API response schema and normalization into domain quotes.
//!
//! The schema is lenient: every nested field is optional and unknown keys are ignored, but a body
//! that does not fit the shape at all (for example `null`, or a `RateResponse` that is not an
//! object) is rejected as a whole. Individual rated shipments never fail the response; an entry
//! that cannot become a valid [`RateQuote`] is dropped and the rest are kept in order.

// self
use crate::{
	_prelude::*,
	carrier::{CarrierId, ups::UPS_LABEL},
	domain::{DomainError, Money, RateQuote},
	obs,
};

/// Currency assumed when UPS omits or garbles `CurrencyCode`.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Top-level response body: `{ "RateResponse": { ... } }`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsRateResponseEnvelope {
	/// Rating response, when present.
	pub rate_response: Option<UpsRateResponse>,
}

/// Rating response body.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsRateResponse {
	/// Response status block, kept verbatim.
	pub response: Option<serde_json::Map<String, Value>>,
	/// One rated shipment per available service.
	pub rated_shipment: Option<OneOrMany<UpsRatedShipment>>,
}

/// UPS collapses one-element lists into a bare object; this accepts both.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
	/// List form.
	Many(Vec<T>),
	/// Bare object form.
	One(T),
}
impl<T> OneOrMany<T> {
	/// Flattens either shape into a list.
	pub fn into_vec(self) -> Vec<T> {
		match self {
			Self::Many(items) => items,
			Self::One(item) => vec![item],
		}
	}
}

/// A single service option.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsRatedShipment {
	/// Service code + description.
	pub service: Option<UpsService>,
	/// Total price.
	pub total_charges: Option<UpsTotalCharges>,
	/// Transit estimate.
	pub time_in_transit: Option<UpsTimeInTransit>,
}

/// Service identification.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsService {
	/// Service code such as `03`.
	pub code: Option<String>,
	/// Service name such as `Ground`.
	pub description: Option<String>,
}

/// Total charges block.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsTotalCharges {
	/// Currency code.
	pub currency_code: Option<String>,
	/// Amount as sent on the wire.
	pub monetary_value: Option<MonetaryValue>,
}

/// UPS sends amounts as strings, but numbers are accepted too.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MonetaryValue {
	/// JSON number.
	Number(f64),
	/// Numeric string such as `"24.50"`.
	Text(String),
}

/// Transit estimate block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsTimeInTransit {
	/// Business days as a numeric string.
	pub business_days_in_transit: Option<String>,
}

/// Why a rated shipment was dropped during normalization.
#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum DiscardReason {
	/// `TotalCharges.MonetaryValue` is absent.
	#[error("The rated shipment has no monetary value.")]
	MissingAmount,
	/// The amount is not a positive finite number.
	#[error("The monetary value {raw:?} is not a positive number.")]
	InvalidAmount {
		/// Value as received.
		raw: String,
	},
	/// The assembled quote violates a domain invariant.
	#[error("The normalized quote is invalid: {0}")]
	InvalidQuote(#[from] DomainError),
}

/// Parses a UPS rating response body into quotes.
///
/// Fails with [`Error::InvalidResponse`] only when the top-level structure is wrong; malformed
/// rated shipments are skipped.
pub fn parse_rate_response(data: Value) -> Result<Vec<RateQuote>> {
	let carrier = CarrierId::UPS;
	let envelope: UpsRateResponseEnvelope =
		serde_path_to_error::deserialize(data).map_err(|e| {
			Error::invalid_response("The UPS rate response has an invalid top-level structure.")
				.with_carrier(carrier.clone())
				.with_source(e)
		})?;
	let Some(rated) = envelope.rate_response.and_then(|response| response.rated_shipment) else {
		return Ok(Vec::new());
	};
	let quotes = rated
		.into_vec()
		.iter()
		.enumerate()
		.filter_map(|(index, shipment)| match normalize_rated_shipment(shipment) {
			Ok(quote) => Some(quote),
			Err(reason) => {
				obs::trace_discarded_entry(&carrier, index, &reason);
				obs::record_discarded_quote(&carrier);

				None
			},
		})
		.collect();

	Ok(quotes)
}

/// Normalizes one rated shipment, or explains why it must be dropped.
pub fn normalize_rated_shipment(shipment: &UpsRatedShipment) -> Result<RateQuote, DiscardReason> {
	let charges = shipment.total_charges.as_ref();
	let amount = parse_amount(charges.and_then(|charges| charges.monetary_value.as_ref()))?;
	let currency = charges
		.and_then(|charges| charges.currency_code.as_deref())
		.filter(|code| code.len() == 3 && code.chars().all(|ch| ch.is_ascii_alphabetic()))
		.unwrap_or(DEFAULT_CURRENCY);
	let estimated_delivery_days = shipment
		.time_in_transit
		.as_ref()
		.and_then(|transit| transit.business_days_in_transit.as_deref())
		.and_then(parse_transit_days);
	let quote = RateQuote {
		service_name: service_name(shipment.service.as_ref()),
		price: Money::new(amount, currency),
		estimated_delivery_days,
	};

	quote.validate()?;

	Ok(quote)
}

fn parse_amount(value: Option<&MonetaryValue>) -> Result<f64, DiscardReason> {
	let (amount, raw) = match value.ok_or(DiscardReason::MissingAmount)? {
		MonetaryValue::Number(amount) => (Some(*amount), amount.to_string()),
		MonetaryValue::Text(raw) => (raw.trim().parse::<f64>().ok(), raw.clone()),
	};

	amount
		.filter(|amount| amount.is_finite() && *amount > 0.)
		.ok_or(DiscardReason::InvalidAmount { raw })
}

fn service_name(service: Option<&UpsService>) -> String {
	let description = service.and_then(|service| service.description.as_deref());
	let code = service.and_then(|service| service.code.as_deref());

	match (description, code) {
		(Some(description), _) if !description.is_empty() => description.to_owned(),
		(_, Some(code)) => format!("{UPS_LABEL} {code}"),
		_ => UPS_LABEL.to_owned(),
	}
}

// Leading-integer parse: "3" and "3 days" yield 3; anything not starting with a digit is ignored.
fn parse_transit_days(raw: &str) -> Option<u32> {
	let trimmed = raw.trim_start();
	let end = trimmed.find(|ch: char| !ch.is_ascii_digit()).unwrap_or(trimmed.len());

	trimmed.get(..end)?.parse::<u32>().ok().filter(|days| *days > 0)
}
