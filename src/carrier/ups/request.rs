//! UPS Rating API request payload and the domain → UPS mapper.
//!
//! UPS expects every measurement as a string: dimensions are rounded to whole units and weights
//! are formatted with two decimals. The precision loss is accepted.

// self
use crate::{
	_prelude::*,
	domain::{Address, DimensionUnit, Package, RateRequest, WeightUnit},
};

const PACKAGING_TYPE_CODE: &str = "02";
const PACKAGING_TYPE_DESCRIPTION: &str = "Customer Supplied Package";
const PAYMENT_TYPE_BILL_SHIPPER: &str = "01";

/// Top-level POST body: `{ "RateRequest": { ... } }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsRateRequestEnvelope {
	/// Rating request.
	pub rate_request: UpsRateRequest,
}

/// Rating request body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsRateRequest {
	/// Request metadata; sent as an empty object.
	pub request: UpsRequestInfo,
	/// Shipment being rated.
	pub shipment: UpsShipment,
}

/// Request metadata block.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsRequestInfo {
	/// Optional caller correlation data echoed back by UPS.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub transaction_reference: Option<UpsTransactionReference>,
}

/// Caller correlation data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsTransactionReference {
	/// Free-form context string.
	pub customer_context: String,
}

/// Shipment block of a rating request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsShipment {
	/// Account holder location.
	pub shipper: UpsAddress,
	/// Destination.
	pub ship_to: UpsAddress,
	/// Pickup location.
	pub ship_from: UpsAddress,
	/// Who pays for the shipment.
	pub payment_details: UpsPaymentDetails,
	/// Specific service to rate; omitted in shop mode.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub service: Option<UpsCodeDescription>,
	/// Package count as a decimal string.
	pub num_of_pieces: String,
	/// One package object, or a list when there are several.
	pub package: UpsPackages,
}

/// Named address as UPS expects it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsAddress {
	/// Display name for the location.
	pub name: String,
	/// One or two street lines.
	pub address_line: Vec<String>,
	/// City or locality.
	pub city: String,
	/// State or province code, when known.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state_province_code: Option<String>,
	/// Postal code.
	pub postal_code: String,
	/// ISO-3166 alpha-2 country code.
	pub country_code: String,
}

/// Payment block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsPaymentDetails {
	/// Charges and who is billed for them.
	pub shipment_charge: Vec<UpsShipmentCharge>,
}

/// Single shipment charge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsShipmentCharge {
	/// Charge type code (`01` = transportation).
	#[serde(rename = "Type")]
	pub charge_type: String,
	/// Bill the shipper account.
	pub bill_shipper: UpsBillShipper,
}

/// Shipper billing target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsBillShipper {
	/// Shipper account number; empty for published rates.
	pub account_number: String,
}

/// Generic `{ Code, Description }` pair used across the UPS schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsCodeDescription {
	/// Machine code.
	pub code: String,
	/// Human-readable description.
	pub description: String,
}
impl UpsCodeDescription {
	fn new(code: &str, description: &str) -> Self {
		Self { code: code.into(), description: description.into() }
	}
}

/// The `Package` field: a single object for one package, otherwise a list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpsPackages {
	/// Several packages.
	Many(Vec<UpsPackage>),
	/// Exactly one package.
	One(Box<UpsPackage>),
}
impl UpsPackages {
	/// Chooses the wire shape for `packages`.
	pub fn from_vec(packages: Vec<UpsPackage>) -> Self {
		match <[UpsPackage; 1]>::try_from(packages) {
			Ok([package]) => Self::One(Box::new(package)),
			Err(packages) => Self::Many(packages),
		}
	}

	/// Number of packages regardless of shape.
	pub fn len(&self) -> usize {
		match self {
			Self::One(_) => 1,
			Self::Many(packages) => packages.len(),
		}
	}

	/// Returns `true` when no packages are present.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Package block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsPackage {
	/// Packaging type; always customer supplied.
	pub packaging_type: UpsCodeDescription,
	/// Rounded dimensions.
	pub dimensions: UpsDimensions,
	/// Formatted weight.
	pub package_weight: UpsPackageWeight,
}

/// Package dimensions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsDimensions {
	/// `IN` or `CM`.
	pub unit_of_measurement: UpsCodeDescription,
	/// Whole-unit length.
	pub length: String,
	/// Whole-unit width.
	pub width: String,
	/// Whole-unit height.
	pub height: String,
}

/// Package weight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsPackageWeight {
	/// `LBS` or `KGS`.
	pub unit_of_measurement: UpsCodeDescription,
	/// Weight with two decimals.
	pub weight: String,
}

/// UPS code for a weight unit.
pub const fn weight_unit_code(unit: WeightUnit) -> &'static str {
	match unit {
		WeightUnit::Lb => "LBS",
		WeightUnit::Kg => "KGS",
	}
}

/// UPS code for a dimension unit.
pub const fn dimension_unit_code(unit: DimensionUnit) -> &'static str {
	match unit {
		DimensionUnit::In => "IN",
		DimensionUnit::Cm => "CM",
	}
}

/// Maps a domain request onto the UPS shop-mode payload.
///
/// The origin fills both the shipper and ship-from roles. Each address uses its city as the
/// required display name. Payment is billed to the shipper without an account number, which
/// yields published rates.
pub fn map_rate_request(request: &RateRequest) -> UpsRateRequestEnvelope {
	let packages = request.packages.iter().map(map_package).collect::<Vec<_>>();

	UpsRateRequestEnvelope {
		rate_request: UpsRateRequest {
			request: UpsRequestInfo::default(),
			shipment: UpsShipment {
				shipper: map_address(&request.origin),
				ship_to: map_address(&request.destination),
				ship_from: map_address(&request.origin),
				payment_details: UpsPaymentDetails {
					shipment_charge: vec![UpsShipmentCharge {
						charge_type: PAYMENT_TYPE_BILL_SHIPPER.into(),
						bill_shipper: UpsBillShipper { account_number: String::new() },
					}],
				},
				service: None,
				num_of_pieces: packages.len().to_string(),
				package: UpsPackages::from_vec(packages),
			},
		},
	}
}

fn map_address(address: &Address) -> UpsAddress {
	let mut address_line = vec![address.line1.clone()];

	if let Some(line2) = address.line2.as_ref() {
		address_line.push(line2.clone());
	}

	UpsAddress {
		name: address.city.clone(),
		address_line,
		city: address.city.clone(),
		state_province_code: address.state_or_province.clone(),
		postal_code: address.postal_code.clone(),
		country_code: address.country.clone(),
	}
}

fn map_package(package: &Package) -> UpsPackage {
	let dimension_code = dimension_unit_code(package.dimension_unit);
	let weight_code = weight_unit_code(package.weight_unit);

	UpsPackage {
		packaging_type: UpsCodeDescription::new(PACKAGING_TYPE_CODE, PACKAGING_TYPE_DESCRIPTION),
		dimensions: UpsDimensions {
			unit_of_measurement: UpsCodeDescription::new(dimension_code, dimension_code),
			length: format_dimension(package.length),
			width: format_dimension(package.width),
			height: format_dimension(package.height),
		},
		package_weight: UpsPackageWeight {
			unit_of_measurement: UpsCodeDescription::new(weight_code, weight_code),
			weight: format_weight(package.weight),
		},
	}
}

fn format_dimension(value: f64) -> String {
	format!("{:.0}", value.round())
}

// Ties round away from zero; `{:.2}` alone would round 1.125 down to "1.12".
fn format_weight(value: f64) -> String {
	format!("{:.2}", (value * 100.).round() / 100.)
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	fn origin() -> Address {
		Address::new("123 Origin St", "Timonium", "21093", "US")
	}

	fn destination() -> Address {
		Address::new("456 Dest Ave", "Alpharetta", "30005", "US").with_state_or_province("GA")
	}

	fn parcel() -> Package {
		Package::new(2.5, 10., 8., 6.)
			.with_weight_unit(WeightUnit::Lb)
			.with_dimension_unit(DimensionUnit::In)
	}

	fn request(packages: Vec<Package>) -> RateRequest {
		RateRequest { origin: origin(), destination: destination(), packages }
	}

	fn to_json(request: &RateRequest) -> Value {
		serde_json::to_value(map_rate_request(request)).expect("Payload should serialize.")
	}

	#[test]
	fn maps_the_reference_scenario() {
		let payload = to_json(&request(vec![parcel()]));
		let shipment = &payload["RateRequest"]["Shipment"];

		assert_eq!(payload["RateRequest"]["Request"], json!({}));
		assert_eq!(shipment["ShipFrom"]["PostalCode"], "21093");
		assert_eq!(shipment["Shipper"]["PostalCode"], "21093");
		assert_eq!(shipment["ShipTo"]["PostalCode"], "30005");
		assert_eq!(shipment["Package"]["PackageWeight"]["Weight"], "2.50");
		assert_eq!(
			shipment["Package"]["PackageWeight"]["UnitOfMeasurement"],
			json!({ "Code": "LBS", "Description": "LBS" })
		);
		assert_eq!(
			shipment["Package"]["Dimensions"],
			json!({
				"UnitOfMeasurement": { "Code": "IN", "Description": "IN" },
				"Length": "10",
				"Width": "8",
				"Height": "6",
			})
		);
		assert_eq!(shipment["NumOfPieces"], "1");
		assert!(shipment.get("Service").is_none());
	}

	#[test]
	fn single_package_is_an_object_and_several_are_a_list() {
		let single = to_json(&request(vec![parcel()]));
		let triple = to_json(&request(vec![parcel(), parcel(), Package::new(1., 2., 3., 4.)]));

		assert!(single["RateRequest"]["Shipment"]["Package"].is_object());
		let one = map_rate_request(&request(vec![parcel()])).rate_request.shipment.package;
		let packages =
			map_rate_request(&request(vec![parcel(), parcel()])).rate_request.shipment.package;

		assert_eq!(one.len(), 1);

		assert_eq!(packages.len(), 2);
		assert!(!packages.is_empty());
		assert!(UpsPackages::from_vec(Vec::new()).is_empty());

		let list = triple["RateRequest"]["Shipment"]["Package"]
			.as_array()
			.expect("Several packages should serialize as a list.");

		assert_eq!(list.len(), 3);
		assert_eq!(list[2]["PackageWeight"]["UnitOfMeasurement"]["Code"], "KGS");
		assert_eq!(list[2]["Dimensions"]["UnitOfMeasurement"]["Code"], "CM");
		assert_eq!(triple["RateRequest"]["Shipment"]["NumOfPieces"], "3");
	}

	#[test]
	fn addresses_use_city_as_name_and_optional_fields() {
		let origin = origin().with_line2("Suite 200");
		let payload = map_rate_request(&RateRequest {
			origin,
			destination: destination(),
			packages: vec![parcel()],
		});
		let shipment = payload.rate_request.shipment;

		assert_eq!(shipment.shipper.name, "Timonium");
		assert_eq!(shipment.shipper.address_line, ["123 Origin St", "Suite 200"]);
		assert_eq!(shipment.shipper, shipment.ship_from);
		assert_eq!(shipment.ship_to.name, "Alpharetta");
		assert_eq!(shipment.ship_to.address_line, ["456 Dest Ave"]);
		assert_eq!(shipment.ship_to.state_province_code.as_deref(), Some("GA"));
		assert_eq!(shipment.shipper.state_province_code, None);

		let json = serde_json::to_value(&shipment.shipper).expect("Address should serialize.");

		assert!(json.get("StateProvinceCode").is_none());
	}

	#[test]
	fn payment_is_billed_to_the_shipper_without_account() {
		let payload = to_json(&request(vec![parcel()]));

		assert_eq!(
			payload["RateRequest"]["Shipment"]["PaymentDetails"],
			json!({ "ShipmentCharge": [{ "Type": "01", "BillShipper": { "AccountNumber": "" } }] })
		);
	}

	#[test]
	fn measurements_are_rounded_for_the_wire() {
		let package = Package::new(1.005, 10.4, 10.5, 0.6);
		let mapped = map_package(&package);

		assert_eq!(mapped.dimensions.length, "10");
		assert_eq!(mapped.dimensions.width, "11");
		assert_eq!(mapped.dimensions.height, "1");
		assert_eq!(mapped.package_weight.weight, "1.00");
		assert_eq!(mapped.packaging_type.code, "02");
	}

	#[test]
	fn weight_ties_round_up() {
		for (weight, expected) in
			[(0.125, "0.13"), (0.375, "0.38"), (1.125, "1.13"), (2.625, "2.63"), (1.005, "1.00")]
		{
			assert_eq!(format_weight(weight), expected, "weight {weight}");
		}

		assert_eq!(map_package(&Package::new(1.125, 1., 1., 1.)).package_weight.weight, "1.13");
	}
}
