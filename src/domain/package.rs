//! Parcel value object and its measurement units.

// self
use crate::{
	_prelude::*,
	domain::{DomainError, require_positive},
};

/// Unit used for package weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
	#[default]
	/// Kilograms.
	Kg,
	/// Pounds.
	Lb,
}

/// Unit used for package dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionUnit {
	#[default]
	/// Centimeters.
	Cm,
	/// Inches.
	In,
}

/// Immutable package description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
	/// Weight expressed in [`Package::weight_unit`].
	pub weight: f64,
	/// Length expressed in [`Package::dimension_unit`].
	pub length: f64,
	/// Width expressed in [`Package::dimension_unit`].
	pub width: f64,
	/// Height expressed in [`Package::dimension_unit`].
	pub height: f64,
	/// Weight unit (defaults to kilograms).
	#[serde(default)]
	pub weight_unit: WeightUnit,
	/// Dimension unit (defaults to centimeters).
	#[serde(default)]
	pub dimension_unit: DimensionUnit,
}
impl Package {
	/// Creates a package measured in kilograms and centimeters.
	pub fn new(weight: f64, length: f64, width: f64, height: f64) -> Self {
		Self {
			weight,
			length,
			width,
			height,
			weight_unit: WeightUnit::default(),
			dimension_unit: DimensionUnit::default(),
		}
	}

	/// Overrides the weight unit.
	pub fn with_weight_unit(mut self, unit: WeightUnit) -> Self {
		self.weight_unit = unit;

		self
	}

	/// Overrides the dimension unit.
	pub fn with_dimension_unit(mut self, unit: DimensionUnit) -> Self {
		self.dimension_unit = unit;

		self
	}

	/// Checks that every measurement is positive.
	pub fn validate(&self) -> Result<(), DomainError> {
		require_positive("weight", self.weight)?;
		require_positive("length", self.length)?;
		require_positive("width", self.width)?;
		require_positive("height", self.height)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn units_default_to_metric() {
		let package: Package =
			serde_json::from_str(r#"{"weight":1.2,"length":30,"width":20,"height":10}"#)
				.expect("Package payload should deserialize.");

		assert_eq!(package.weight_unit, WeightUnit::Kg);
		assert_eq!(package.dimension_unit, DimensionUnit::Cm);
		assert_eq!(package, Package::new(1.2, 30., 20., 10.));
	}

	#[test]
	fn validate_rejects_non_positive_measurements() {
		assert_eq!(
			Package::new(0., 1., 1., 1.).validate(),
			Err(DomainError::NonPositive { field: "weight" })
		);
		assert_eq!(
			Package::new(1., 1., f64::NAN, 1.).validate(),
			Err(DomainError::NonPositive { field: "width" })
		);
		assert_eq!(
			Package::new(2.5, 10., 8., 6.).with_weight_unit(WeightUnit::Lb).validate(),
			Ok(())
		);
	}
}
