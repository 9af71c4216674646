//! Shops UPS rates through the carrier trait with the default reqwest transport.
//!
//! Runs against a local mock of the UPS token and rating endpoints unless `UPS_CLIENT_ID` is set,
//! in which case configuration is read from the `UPS_*` environment variables.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use carrier_rates::{
	carrier::{Carrier, ups::UpsCarrier},
	config::{ENV_UPS_CLIENT_ID, UpsConfig},
	domain::{Address, DimensionUnit, Package, RateRequest, WeightUnit},
	http::ReqwestHttpClient,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let config = if std::env::var_os(ENV_UPS_CLIENT_ID).is_some() {
		UpsConfig::from_env()?
	} else {
		mock_ups(&server).await;

		UpsConfig::builder()
			.client_id("demo-client")
			.client_secret("demo-secret")
			.auth_url(server.url("/security/v1/oauth/token"))
			.rating_url(server.url("/api/rating/v2409/Shop"))
			.build()?
	};
	let carrier: Box<dyn Carrier> = Box::new(<UpsCarrier<ReqwestHttpClient>>::from_config(
		ReqwestHttpClient::default(),
		&config,
	));
	let request = RateRequest::new(
		Address::new("123 Origin St", "Timonium", "21093", "US").with_state_or_province("MD"),
		Address::new("456 Dest Ave", "Alpharetta", "30005", "US").with_state_or_province("GA"),
		vec![
			Package::new(2.5, 10., 8., 6.)
				.with_weight_unit(WeightUnit::Lb)
				.with_dimension_unit(DimensionUnit::In),
		],
	)?;

	for quote in carrier.get_rates(&request).await? {
		let days = quote
			.estimated_delivery_days
			.map_or_else(|| "unknown transit".to_owned(), |days| format!("{days} business days"));

		println!(
			"{} {}: {:.2} {} ({days}).",
			carrier.id(),
			quote.service_name,
			quote.price.amount,
			quote.price.currency
		);
	}

	Ok(())
}

async fn mock_ups(server: &MockServer) {
	server
		.mock_async(|when, then| {
			when.method(POST).path("/security/v1/oauth/token");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"access_token": "demo-access",
				"token_type": "Bearer",
				"expires_in": "14399",
			}));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/rating/v2409/Shop");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"RateResponse": {
					"RatedShipment": [
						{
							"Service": { "Code": "03", "Description": "Ground" },
							"TotalCharges": { "CurrencyCode": "USD", "MonetaryValue": "24.50" },
							"TimeInTransit": { "BusinessDaysInTransit": "3" },
						},
						{
							"Service": { "Code": "01" },
							"TotalCharges": { "CurrencyCode": "USD", "MonetaryValue": "71.25" },
							"TimeInTransit": { "BusinessDaysInTransit": "1" },
						},
					],
				},
			}));
		})
		.await;
}
